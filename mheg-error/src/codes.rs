// MHEG - mheg-error
// Module: MHEG Error Codes
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Error codes for the MHEG runtime.
//!
//! Codes are grouped in ranges of one thousand, one range per
//! [`ErrorCategory`](crate::ErrorCategory).

// Resolution errors (1000-1999)
/// Reference resolved to an address with no live object
pub const OBJECT_NOT_FOUND: u16 = 1000;
/// Action target could not be resolved
pub const UNRESOLVED_TARGET: u16 = 1001;
/// Registry handle outlived the object it referred to
pub const STALE_HANDLE: u16 = 1002;
/// No application is active
pub const NO_ACTIVE_APPLICATION: u16 = 1003;
/// No scene is active
pub const NO_ACTIVE_SCENE: u16 = 1004;
/// Group could not be fetched from the content backend
pub const GROUP_NOT_FOUND: u16 = 1005;

// Type errors (2000-2999)
/// Generic indirection points at a variable of another kind
pub const VARIABLE_KIND_MISMATCH: u16 = 2000;
/// Generic indirection points at an object that is not a variable
pub const NOT_A_VARIABLE: u16 = 2001;
/// Action target kind is not legal for the opcode
pub const UNEXPECTED_TARGET: u16 = 2002;
/// Value cannot be converted to the variable kind
pub const TYPE_MISMATCH: u16 = 2003;
/// External reference required but internal reference given
pub const INTERNAL_REFERENCE_NOT_ALLOWED: u16 = 2004;

// Closed-set violations (3000-3999)
/// Object class tag outside the defined set
pub const UNKNOWN_OBJECT_TAG: u16 = 3000;
/// Elementary action tag outside the defined set
pub const UNKNOWN_OPCODE_TAG: u16 = 3001;
/// Event type code outside the defined set
pub const UNKNOWN_EVENT_TYPE: u16 = 3002;
/// Stream multiplex entry is not a stream component
pub const INVALID_STREAM_COMPONENT: u16 = 3003;
/// Item kind not allowed in this group
pub const INVALID_GROUP_ITEM: u16 = 3004;

// Not implemented (4000-4999)
/// Elementary action branch not implemented by this receiver
pub const UNIMPLEMENTED_ACTION: u16 = 4000;
/// Resident program known but not implemented by this receiver
pub const UNIMPLEMENTED_PROGRAM: u16 = 4001;
/// Resident program name not known
pub const UNKNOWN_PROGRAM: u16 = 4002;

// Parameter errors (5000-5999)
/// Relational operator code illegal for the variable kind
pub const INVALID_OPERATOR: u16 = 5000;
/// Division or modulo by zero
pub const DIVISION_BY_ZERO: u16 = 5001;
/// Resident program called with wrong number or types of parameters
pub const PROGRAM_SIGNATURE_MISMATCH: u16 = 5002;
/// Index outside the valid range
pub const INVALID_INDEX: u16 = 5003;
/// Movement identifier outside the movement table
pub const INVALID_MOVEMENT: u16 = 5004;
/// Drawing parameters outside their legal range
pub const INVALID_GEOMETRY: u16 = 5005;

// Content errors (6000-6999)
/// Content reference could not be loaded
pub const CONTENT_MISSING: u16 = 6000;
/// Content delivered for an object that is not waiting for it
pub const CONTENT_NOT_REQUESTED: u16 = 6001;

// Capacity errors (7000-7999)
/// Too many actions executed in one processing cycle
pub const ACTION_LIMIT_EXCEEDED: u16 = 7000;
/// No object number left for a clone
pub const CLONE_NUMBERS_EXHAUSTED: u16 = 7001;

// Validation errors (8000-8999)
/// Two items in one group share an object number
pub const DUPLICATE_OBJECT_NUMBER: u16 = 8000;
/// Group descriptor is malformed
pub const INVALID_GROUP_DESCRIPTOR: u16 = 8001;

// Runtime errors (9000-9999)
/// Operation not valid in the current state
pub const INVALID_STATE: u16 = 9000;
/// Persistent store has no file of that name
pub const PERSISTENT_FILE_NOT_FOUND: u16 = 9001;
