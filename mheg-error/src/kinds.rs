// MHEG - mheg-error
// Module: MHEG Error Kinds
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Constructors for the errors the engine reports most often.

use crate::{codes, Error, ErrorCategory};

/// Reference resolved to an address with no live object
#[must_use]
pub const fn object_not_found() -> Error {
    Error::new(ErrorCategory::Resolution, codes::OBJECT_NOT_FOUND, "Object not found")
}

/// Registry handle refers to a removed object
#[must_use]
pub const fn stale_handle() -> Error {
    Error::new(ErrorCategory::Resolution, codes::STALE_HANDLE, "Stale object handle")
}

/// Generic indirection points at a variable of another kind
#[must_use]
pub const fn variable_kind_mismatch() -> Error {
    Error::new(
        ErrorCategory::Type,
        codes::VARIABLE_KIND_MISMATCH,
        "Indirect reference points at a variable of another kind",
    )
}

/// Generic indirection points at something that is not a variable
#[must_use]
pub const fn not_a_variable() -> Error {
    Error::new(
        ErrorCategory::Type,
        codes::NOT_A_VARIABLE,
        "Indirect reference does not point at a variable",
    )
}

/// Object class tag outside the closed set
#[must_use]
pub const fn unknown_object_tag() -> Error {
    Error::new(ErrorCategory::ClosedSet, codes::UNKNOWN_OBJECT_TAG, "Unknown object class tag")
}

/// Elementary action tag outside the closed set
#[must_use]
pub const fn unknown_opcode_tag() -> Error {
    Error::new(ErrorCategory::ClosedSet, codes::UNKNOWN_OPCODE_TAG, "Unknown elementary action tag")
}

/// Event type code outside the closed set
#[must_use]
pub const fn unknown_event_type() -> Error {
    Error::new(ErrorCategory::ClosedSet, codes::UNKNOWN_EVENT_TYPE, "Unknown event type")
}

/// Branch the receiver does not implement
#[must_use]
pub const fn unimplemented_action(message: &'static str) -> Error {
    Error::new(ErrorCategory::NotImplemented, codes::UNIMPLEMENTED_ACTION, message)
}

/// Relational operator code illegal for the variable kind
#[must_use]
pub const fn invalid_operator() -> Error {
    Error::new(
        ErrorCategory::Parameter,
        codes::INVALID_OPERATOR,
        "Operator not legal for the variable kind",
    )
}

/// Content reference could not be loaded
#[must_use]
pub const fn content_missing() -> Error {
    Error::new(ErrorCategory::Content, codes::CONTENT_MISSING, "Content not available")
}
