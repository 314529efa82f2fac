//! # MHEG Logging
//!
//! Logging infrastructure for the MHEG-5 runtime engine.
//!
//! The engine never fails an action sequence because of bad broadcast
//! content; it logs instead. This crate defines the log record, the handler
//! registry embedders use to observe records, and the [`Logger`] facade the
//! engine writes through. With the `std` feature, records are also
//! forwarded to the `log` crate.

// MHEG - mheg-logging
// Module: Logging Infrastructure
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

#![forbid(unsafe_code)] // Rule 2
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

// Reexports for convenience
pub use mheg_error::{Error, Result};

/// Logging handlers for processing log records.
pub mod handler;

/// Log level definitions for categorizing message severity.
pub mod level;

/// Logger facade used by the engine.
pub mod logger;

/// Log record data structures.
pub mod operation;

// Reexport types
pub use handler::{HandlerRegistry, LogHandler, LoggingExt};
pub use level::LogLevel;
pub use logger::{Logger, LOG_TARGET};
pub use operation::LogOperation;
