// MHEG - mheg-foundation
// Module: Foundation types
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Foundation types for the MHEG-5 runtime engine.
//!
//! Everything the action layer and the runtime share: octet strings,
//! object and content references, the literal-or-indirect [`Generic`]
//! parameter type, variable payloads, the closed set of [`ObjectKind`]s,
//! event types and visible geometry.

#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub use mheg_error::{Error, Result};

pub mod event;
pub mod generic;
pub mod geometry;
pub mod kind;
pub mod octet_string;
pub mod reference;

pub use event::{EventData, EventType};
pub use generic::{
    Generic, GenericBoolean, GenericContentReference, GenericInteger, GenericObjectReference,
    GenericOctetString, GenericValue, VariableKind, VariableType, VariableValue,
};
pub use geometry::{BoxSize, Colour, Region, XYPosition};
pub use kind::ObjectKind;
pub use octet_string::OctetString;
pub use reference::{absolute_group_id, ContentReference, ExternalReference, GroupId, ObjectReference};

/// First object number handed out to clones
pub const FIRST_CLONED_OBJECT_NUMBER: i32 = 65536;
