// MHEG - mheg-foundation
// Module: Object and content references
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Object references, absolute addresses and content references.

use alloc::vec::Vec;
use core::fmt;

use crate::octet_string::OctetString;

/// Group identifier of an application or scene
pub type GroupId = OctetString;

/// Absolute form, starting `~//`, of the group identifier `name`.
///
/// `DSM:` is an alias for `~` and `//x` means `~//x`. Names starting `~/`
/// or `/`, and bare names, live in the directory of `application`, the
/// active application's identifier.
#[must_use]
pub fn absolute_group_id(name: &GroupId, application: Option<&GroupId>) -> GroupId {
    let bytes = name.as_bytes();
    let bytes = bytes.strip_prefix(b"DSM:").unwrap_or(bytes);
    let mut absolute = Vec::with_capacity(bytes.len() + 8);
    if bytes.starts_with(b"~//") {
        absolute.extend_from_slice(bytes);
    } else if bytes.starts_with(b"//") {
        absolute.push(b'~');
        absolute.extend_from_slice(bytes);
    } else {
        absolute.extend_from_slice(application_directory(application));
        let path = bytes.strip_prefix(b"~").filter(|rest| rest.starts_with(b"/")).unwrap_or(bytes);
        if !path.starts_with(b"/") {
            absolute.push(b'/');
        }
        absolute.extend_from_slice(path);
    }
    GroupId::from(absolute)
}

/// `~//dir` for an application `~//dir/name`; `~/` when there is none
fn application_directory(application: Option<&GroupId>) -> &[u8] {
    application
        .map(OctetString::as_bytes)
        .filter(|gid| gid.starts_with(b"~//"))
        .and_then(|gid| gid.iter().rposition(|&b| b == b'/').map(|slash| &gid[..slash]))
        .unwrap_or(b"~/".as_slice())
}

/// Absolute address of a runtime object: owning group plus object number.
///
/// The group object itself has object number 0.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExternalReference {
    /// Owning group identifier
    pub group_identifier: GroupId,
    /// Object number inside the group
    pub object_number:    i32,
}

impl ExternalReference {
    /// Create an absolute address
    pub fn new(group_identifier: impl Into<GroupId>, object_number: i32) -> Self {
        Self { group_identifier: group_identifier.into(), object_number }
    }

    /// Address of the group object itself
    pub fn group(group_identifier: impl Into<GroupId>) -> Self {
        Self::new(group_identifier, 0)
    }
}

impl fmt::Display for ExternalReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.group_identifier, self.object_number)
    }
}

/// Reference to a runtime object, scoped or fully qualified
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ObjectReference {
    /// Object number only; the group is the caller's current group
    Internal(i32),
    /// Explicit group and object number
    External(ExternalReference),
}

impl ObjectReference {
    /// Fully qualified reference
    pub fn external(group_identifier: impl Into<GroupId>, object_number: i32) -> Self {
        Self::External(ExternalReference::new(group_identifier, object_number))
    }

    /// Object number, whichever form the reference takes
    #[must_use]
    pub fn object_number(&self) -> i32 {
        match self {
            Self::Internal(number) => *number,
            Self::External(ext) => ext.object_number,
        }
    }

    /// Absolute address of this reference seen from `caller_group`.
    ///
    /// Internal references inherit `caller_group`; external references keep
    /// their own group.
    #[must_use]
    pub fn resolve(&self, caller_group: &GroupId) -> ExternalReference {
        match self {
            Self::Internal(number) => ExternalReference::new(caller_group.clone(), *number),
            Self::External(ext) => ext.clone(),
        }
    }
}

impl Default for ObjectReference {
    fn default() -> Self {
        Self::Internal(0)
    }
}

impl From<ExternalReference> for ObjectReference {
    fn from(value: ExternalReference) -> Self {
        Self::External(value)
    }
}

impl fmt::Display for ObjectReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Internal(number) => write!(f, "#{number}"),
            Self::External(ext) => fmt::Display::fmt(ext, f),
        }
    }
}

/// Reference to a piece of content, such as a file name in the carousel
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentReference(pub OctetString);

impl ContentReference {
    /// Content reference from a path
    pub fn new(path: impl Into<OctetString>) -> Self {
        Self(path.into())
    }

    /// Path bytes
    #[must_use]
    pub fn as_octets(&self) -> &OctetString {
        &self.0
    }
}

impl fmt::Display for ContentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_reference_inherits_caller_group() {
        let caller = GroupId::from("~//a/scene1");
        let resolved = ObjectReference::Internal(5).resolve(&caller);
        assert_eq!(resolved, ExternalReference::new("~//a/scene1", 5));
    }

    #[test]
    fn test_external_reference_keeps_its_group() {
        let caller = GroupId::from("~//a/scene1");
        let reference = ObjectReference::external("~//a/startup", 7);
        assert_eq!(reference.resolve(&caller), ExternalReference::new("~//a/startup", 7));
        assert_eq!(reference.object_number(), 7);
    }

    #[test]
    fn test_absolute_group_ids() {
        let app = GroupId::from("~//a/startup");
        let absolute = |name: &str| absolute_group_id(&GroupId::from(name), Some(&app)).to_string();
        assert_eq!(absolute("~//a/scene1"), "~//a/scene1");
        assert_eq!(absolute("//a/scene1"), "~//a/scene1");
        assert_eq!(absolute("DSM://a/scene1"), "~//a/scene1");
        assert_eq!(absolute("DSM:/scene1"), "~//a/scene1");
        assert_eq!(absolute("~/scene1"), "~//a/scene1");
        assert_eq!(absolute("/scene1"), "~//a/scene1");
        assert_eq!(absolute("scene1"), "~//a/scene1");
        assert_eq!(absolute(""), "~//a/");
    }

    #[test]
    fn test_absolute_group_id_at_the_root() {
        let app = GroupId::from("~//app");
        assert_eq!(absolute_group_id(&GroupId::from("/scene"), Some(&app)), GroupId::from("~//scene"));
        assert_eq!(absolute_group_id(&GroupId::from("app"), None), GroupId::from("~//app"));
        assert_eq!(absolute_group_id(&GroupId::from("//app"), None), GroupId::from("~//app"));
    }

    #[test]
    fn test_display() {
        assert_eq!(ExternalReference::new("~//app", 3).to_string(), "~//app,3");
        assert_eq!(ObjectReference::Internal(9).to_string(), "#9");
    }
}
