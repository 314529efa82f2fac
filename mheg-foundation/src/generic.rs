// MHEG - mheg-foundation
// Module: Generic values and variable payloads
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Generic values and variable payloads.
//!
//! Every action parameter in MHEG may be a literal or an indirect reference
//! to a variable that holds the value. [`Generic`] captures that choice in
//! the type; the runtime resolves it against its registry. The five payload
//! kinds a variable may hold are tied together by [`VariableType`].

use core::fmt;

use crate::{
    octet_string::OctetString,
    reference::{ContentReference, ObjectReference},
};

/// Fixed payload kind of a variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    /// Boolean payload
    Boolean,
    /// Integer payload
    Integer,
    /// Octet-string payload
    OctetString,
    /// Object-reference payload
    ObjectReference,
    /// Content-reference payload
    ContentReference,
}

impl VariableKind {
    /// All variable kinds, in tag order
    pub const ALL: [Self; 5] = [
        Self::Boolean,
        Self::Integer,
        Self::OctetString,
        Self::ObjectReference,
        Self::ContentReference,
    ];

    /// Human readable name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::OctetString => "octet-string",
            Self::ObjectReference => "object-reference",
            Self::ContentReference => "content-reference",
        }
    }
}

/// Value held by a variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableValue {
    /// Boolean payload
    Boolean(bool),
    /// Integer payload
    Integer(i32),
    /// Octet-string payload
    OctetString(OctetString),
    /// Object-reference payload
    ObjectReference(ObjectReference),
    /// Content-reference payload
    ContentReference(ContentReference),
}

impl VariableValue {
    /// Kind of this value
    #[must_use]
    pub const fn kind(&self) -> VariableKind {
        match self {
            Self::Boolean(_) => VariableKind::Boolean,
            Self::Integer(_) => VariableKind::Integer,
            Self::OctetString(_) => VariableKind::OctetString,
            Self::ObjectReference(_) => VariableKind::ObjectReference,
            Self::ContentReference(_) => VariableKind::ContentReference,
        }
    }

    /// Zero value of `kind`: false, 0, empty string, internal reference 0 or
    /// empty content reference
    #[must_use]
    pub fn zero(kind: VariableKind) -> Self {
        match kind {
            VariableKind::Boolean => Self::Boolean(false),
            VariableKind::Integer => Self::Integer(0),
            VariableKind::OctetString => Self::OctetString(OctetString::new()),
            VariableKind::ObjectReference => Self::ObjectReference(ObjectReference::default()),
            VariableKind::ContentReference => Self::ContentReference(ContentReference::default()),
        }
    }
}

impl fmt::Display for VariableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::OctetString(v) => write!(f, "\"{v}\""),
            Self::ObjectReference(v) => write!(f, "{v}"),
            Self::ContentReference(v) => write!(f, "<{v}>"),
        }
    }
}

/// Payload type that can live in a variable
pub trait VariableType: Clone + PartialEq + fmt::Debug + Sized + 'static {
    /// Variable kind holding this type
    const KIND: VariableKind;

    /// Value returned when resolution fails
    fn zero() -> Self;

    /// Borrow the payload if `value` has this kind
    fn from_value(value: &VariableValue) -> Option<&Self>;

    /// Mutably borrow the payload if `value` has this kind
    fn from_value_mut(value: &mut VariableValue) -> Option<&mut Self>;

    /// Wrap into a variable value
    fn into_value(self) -> VariableValue;
}

macro_rules! impl_variable_type {
    ($ty:ty, $variant:ident, $zero:expr) => {
        impl VariableType for $ty {
            const KIND: VariableKind = VariableKind::$variant;

            fn zero() -> Self {
                $zero
            }

            fn from_value(value: &VariableValue) -> Option<&Self> {
                match value {
                    VariableValue::$variant(v) => Some(v),
                    _ => None,
                }
            }

            fn from_value_mut(value: &mut VariableValue) -> Option<&mut Self> {
                match value {
                    VariableValue::$variant(v) => Some(v),
                    _ => None,
                }
            }

            fn into_value(self) -> VariableValue {
                VariableValue::$variant(self)
            }
        }
    };
}

impl_variable_type!(bool, Boolean, false);
impl_variable_type!(i32, Integer, 0);
impl_variable_type!(OctetString, OctetString, OctetString::new());
impl_variable_type!(ObjectReference, ObjectReference, ObjectReference::default());
impl_variable_type!(ContentReference, ContentReference, ContentReference::default());

/// Literal value or indirect reference to a variable holding it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generic<T> {
    /// The value itself
    Literal(T),
    /// Reference to a variable of the matching kind
    Indirect(ObjectReference),
}

impl<T> Generic<T> {
    /// True for the indirect form
    #[must_use]
    pub const fn is_indirect(&self) -> bool {
        matches!(self, Self::Indirect(_))
    }

    /// Literal payload, if literal
    #[must_use]
    pub const fn literal(&self) -> Option<&T> {
        match self {
            Self::Literal(v) => Some(v),
            Self::Indirect(_) => None,
        }
    }

    /// Indirect reference, if indirect
    #[must_use]
    pub const fn indirect(&self) -> Option<&ObjectReference> {
        match self {
            Self::Literal(_) => None,
            Self::Indirect(r) => Some(r),
        }
    }
}

impl<T> From<T> for Generic<T> {
    fn from(value: T) -> Self {
        Self::Literal(value)
    }
}

impl<T: VariableType + Default> Default for Generic<T> {
    fn default() -> Self {
        Self::Literal(T::default())
    }
}

/// Generic boolean parameter
pub type GenericBoolean = Generic<bool>;
/// Generic integer parameter
pub type GenericInteger = Generic<i32>;
/// Generic octet-string parameter
pub type GenericOctetString = Generic<OctetString>;
/// Generic object-reference parameter
pub type GenericObjectReference = Generic<ObjectReference>;
/// Generic content-reference parameter
pub type GenericContentReference = Generic<ContentReference>;

/// Generic parameter of any kind.
///
/// Used for SetVariable/TestVariable operands, SendEvent data and resident
/// program parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenericValue {
    /// Boolean parameter
    Boolean(GenericBoolean),
    /// Integer parameter
    Integer(GenericInteger),
    /// Octet-string parameter
    OctetString(GenericOctetString),
    /// Object-reference parameter
    ObjectReference(GenericObjectReference),
    /// Content-reference parameter
    ContentReference(GenericContentReference),
}

impl GenericValue {
    /// Kind the parameter resolves to
    #[must_use]
    pub const fn kind(&self) -> VariableKind {
        match self {
            Self::Boolean(_) => VariableKind::Boolean,
            Self::Integer(_) => VariableKind::Integer,
            Self::OctetString(_) => VariableKind::OctetString,
            Self::ObjectReference(_) => VariableKind::ObjectReference,
            Self::ContentReference(_) => VariableKind::ContentReference,
        }
    }
}

impl From<VariableValue> for GenericValue {
    fn from(value: VariableValue) -> Self {
        match value {
            VariableValue::Boolean(v) => Self::Boolean(Generic::Literal(v)),
            VariableValue::Integer(v) => Self::Integer(Generic::Literal(v)),
            VariableValue::OctetString(v) => Self::OctetString(Generic::Literal(v)),
            VariableValue::ObjectReference(v) => Self::ObjectReference(Generic::Literal(v)),
            VariableValue::ContentReference(v) => Self::ContentReference(Generic::Literal(v)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_values_match_kind() {
        for kind in VariableKind::ALL {
            assert_eq!(VariableValue::zero(kind).kind(), kind);
        }
        assert_eq!(<i32 as VariableType>::zero(), 0);
        assert!(!<bool as VariableType>::zero());
        assert!(<OctetString as VariableType>::zero().is_empty());
    }

    #[test]
    fn test_from_value_checks_kind() {
        let value = VariableValue::Integer(42);
        assert_eq!(i32::from_value(&value), Some(&42));
        assert_eq!(bool::from_value(&value), None);
        assert_eq!(OctetString::from_value(&value), None);
    }

    #[test]
    fn test_from_value_mut_writes_through() {
        let mut value = VariableValue::OctetString(OctetString::from("ab"));
        if let Some(s) = OctetString::from_value_mut(&mut value) {
            s.append(&OctetString::from("cd"));
        }
        assert_eq!(value, VariableValue::OctetString(OctetString::from("abcd")));
    }

    #[test]
    fn test_generic_accessors() {
        let literal: GenericInteger = 5.into();
        assert_eq!(literal.literal(), Some(&5));
        assert!(!literal.is_indirect());

        let indirect: GenericInteger = Generic::Indirect(ObjectReference::Internal(3));
        assert!(indirect.is_indirect());
        assert_eq!(indirect.indirect(), Some(&ObjectReference::Internal(3)));
    }
}
