// MHEG - mheg-error
// Module: MHEG Error Handling
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! MHEG error handling library
//!
//! This library provides the error taxonomy of the MHEG-5 runtime engine.
//!
//! # Error Categories
//!
//! ## Resolution Errors (1000-1999)
//! - Reference points at nothing live
//! - No active application or scene
//!
//! ## Type Errors (2000-2999)
//! - Generic indirection through a wrong-kind variable
//! - Action target outside the opcode's legal kinds ("unexpected target")
//!
//! ## Closed-Set Violations (3000-3999)
//! - Decoder tags outside a closed set. These are the only fatal errors.
//!
//! ## Not Implemented (4000-4999)
//! - Actions and resident programs the receiver does not support
//!
//! ## Parameter, Content, Capacity, Validation, Runtime (5000-9999)
//!
//! # Usage
//!
//! ```
//! use mheg_error::{codes, kinds, Error, ErrorCategory};
//!
//! let error = Error::new(ErrorCategory::Parameter, codes::DIVISION_BY_ZERO, "Divide by zero");
//! assert!(!error.is_fatal());
//!
//! let tag_error = kinds::unknown_object_tag();
//! assert!(tag_error.is_fatal());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)] // Rule 2
#![deny(missing_docs)]

/// Error codes for the MHEG runtime
pub mod codes;
/// Error and error handling types
pub mod errors;
/// Error kind constructors
pub mod kinds;

// Re-export key types
pub use errors::{Error, ErrorCategory, ErrorSource};

/// A specialized `Result` type for MHEG operations.
pub type Result<T> = core::result::Result<T, Error>;
