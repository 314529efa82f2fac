// MHEG - mheg-foundation
// Module: Octet strings
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Byte strings as carried by MHEG content.
//!
//! MHEG strings are arbitrary octets, usually but not always UTF-8. They are
//! compared bytewise and only decoded lossily for display.

use alloc::{string::String, vec::Vec};
use core::fmt;

/// Owned MHEG octet string
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OctetString(Vec<u8>);

impl OctetString {
    /// Empty octet string
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Wrap raw bytes
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }

    /// Decimal text form of `value`, as used when an integer is stored in an
    /// octet-string variable
    #[must_use]
    pub fn from_integer(value: i32) -> Self {
        Self(alloc::format!("{value}").into_bytes())
    }

    /// Raw bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of octets
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no octets
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append another octet string in place
    pub fn append(&mut self, other: &Self) {
        self.0.extend_from_slice(&other.0);
    }

    /// True if the string starts with `prefix`
    #[must_use]
    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.0.starts_with(prefix)
    }

    /// Octets `begin..end` (0-based, end exclusive), clamped to the string
    #[must_use]
    pub fn slice(&self, begin: usize, end: usize) -> Self {
        let end = end.min(self.0.len());
        let begin = begin.min(end);
        Self(self.0[begin..end].to_vec())
    }

    /// Leading decimal integer: an optional `-` then digits, stopping at the
    /// first non-digit. No digits gives 0.
    #[must_use]
    pub fn parse_integer(&self) -> i32 {
        let (negative, digits) = match self.0.split_first() {
            Some((b'-', rest)) => (true, rest),
            _ => (false, self.0.as_slice()),
        };
        let magnitude = digits
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .fold(0_i32, |acc, b| acc.wrapping_mul(10).wrapping_add(i32::from(b - b'0')));
        if negative { magnitude.wrapping_neg() } else { magnitude }
    }

    /// Lossy UTF-8 rendering
    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }

    /// 1-based position of `needle` at or after the 1-based `start`, if any.
    ///
    /// An empty needle matches at `start`.
    #[must_use]
    pub fn find_from(&self, start: usize, needle: &Self) -> Option<usize> {
        if self.0.is_empty() || start == 0 || start > self.0.len() {
            return None;
        }
        if needle.is_empty() {
            return Some(start);
        }
        self.0[start - 1..]
            .windows(needle.len())
            .position(|w| w == needle.as_bytes())
            .map(|offset| start + offset)
    }
}

impl fmt::Debug for OctetString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_string_lossy())
    }
}

impl fmt::Display for OctetString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl From<&str> for OctetString {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl From<String> for OctetString {
    fn from(value: String) -> Self {
        Self(value.into_bytes())
    }
}

impl From<Vec<u8>> for OctetString {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<&[u8]> for OctetString {
    fn from(value: &[u8]) -> Self {
        Self::from_bytes(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer() {
        assert_eq!(OctetString::from("123").parse_integer(), 123);
        assert_eq!(OctetString::from("-45").parse_integer(), -45);
        assert_eq!(OctetString::from("12ab").parse_integer(), 12);
        assert_eq!(OctetString::from("abc").parse_integer(), 0);
        assert_eq!(OctetString::from("").parse_integer(), 0);
        assert_eq!(OctetString::from("-").parse_integer(), 0);
    }

    #[test]
    fn test_from_integer() {
        assert_eq!(OctetString::from_integer(-17), OctetString::from("-17"));
        assert_eq!(OctetString::from_integer(0).as_bytes(), b"0");
    }

    #[test]
    fn test_find_from_is_one_based() {
        let s = OctetString::from("hello world");
        assert_eq!(s.find_from(1, &OctetString::from("o")), Some(5));
        assert_eq!(s.find_from(6, &OctetString::from("o")), Some(8));
        assert_eq!(s.find_from(1, &OctetString::from("xyz")), None);
        assert_eq!(s.find_from(3, &OctetString::new()), Some(3));
        assert_eq!(OctetString::new().find_from(1, &OctetString::from("a")), None);
    }

    #[test]
    fn test_slice_clamps() {
        let s = OctetString::from("abcdef");
        assert_eq!(s.slice(1, 3), OctetString::from("bc"));
        assert_eq!(s.slice(4, 100), OctetString::from("ef"));
        assert_eq!(s.slice(10, 2), OctetString::new());
    }
}
