// MHEG - mheg-error
// Module: MHEG Error Types
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Error type and categories for the MHEG runtime.
//!
//! Every failure the engine can observe maps onto one [`ErrorCategory`].
//! Only [`ErrorCategory::ClosedSet`] is fatal; all other categories are
//! contained by the engine at the scope of a single resolution or action.

use core::fmt;

use crate::codes;

/// `Error` categories for MHEG operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorCategory {
    /// A reference points at nothing live
    Resolution     = 1,
    /// Wrong-kind variable behind a Generic, or wrong-kind action target
    Type           = 2,
    /// Tag from outside the closed set of a dispatch table (fatal)
    ClosedSet      = 3,
    /// Feature the receiver does not implement
    NotImplemented = 4,
    /// Bad operand or parameter list
    Parameter      = 5,
    /// Content could not be loaded
    Content        = 6,
    /// Engine bound exceeded
    Capacity       = 7,
    /// Malformed decoded object tree
    Validation     = 8,
    /// Runtime errors (general)
    Runtime        = 9,
}

impl ErrorCategory {
    /// Short lowercase name used in log records
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Resolution => "resolution",
            Self::Type => "type",
            Self::ClosedSet => "closed-set",
            Self::NotImplemented => "not-implemented",
            Self::Parameter => "parameter",
            Self::Content => "content",
            Self::Capacity => "capacity",
            Self::Validation => "validation",
            Self::Runtime => "runtime",
        }
    }
}

/// Base trait for all error types
pub trait ErrorSource: fmt::Debug + Send + Sync {
    /// Get the error code
    fn code(&self) -> u16;

    /// Get the error message
    fn message(&self) -> &'static str;

    /// Get the error category
    fn category(&self) -> ErrorCategory;
}

/// MHEG `Error` type
///
/// Categorised error with a numeric code from [`codes`] and a static
/// message. It is `Copy` so it can be logged and returned without
/// allocation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Error {
    /// `Error` category
    pub category: ErrorCategory,
    /// `Error` code
    pub code:     u16,
    /// `Error` message
    pub message:  &'static str,
}

impl Error {
    /// Action target does not resolve to a live object
    pub const UNRESOLVED_TARGET: Self = Self::new(
        ErrorCategory::Resolution,
        codes::UNRESOLVED_TARGET,
        "Action target does not resolve to a live object",
    );
    /// Action target kind is not in the opcode's legal set
    pub const UNEXPECTED_TARGET: Self = Self::new(
        ErrorCategory::Type,
        codes::UNEXPECTED_TARGET,
        "unexpected target",
    );
    /// No active application
    pub const NO_ACTIVE_APPLICATION: Self = Self::new(
        ErrorCategory::Resolution,
        codes::NO_ACTIVE_APPLICATION,
        "No active application",
    );
    /// Action cycle bound exceeded
    pub const ACTION_LIMIT_EXCEEDED: Self = Self::new(
        ErrorCategory::Capacity,
        codes::ACTION_LIMIT_EXCEEDED,
        "Action limit per processing cycle exceeded, remaining actions dropped",
    );

    /// Create a new error.
    #[must_use]
    pub const fn new(category: ErrorCategory, code: u16, message: &'static str) -> Self {
        Self {
            category,
            code,
            message,
        }
    }

    /// True only for closed-set violations, which abort the surrounding
    /// group load.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self.category, ErrorCategory::ClosedSet)
    }

    /// Check if this is a resolution error
    #[must_use]
    pub fn is_resolution_error(&self) -> bool {
        self.category == ErrorCategory::Resolution
    }

    /// Check if this is a type error
    #[must_use]
    pub fn is_type_error(&self) -> bool {
        self.category == ErrorCategory::Type
    }

    /// Check if this is a not-implemented error
    #[must_use]
    pub fn is_not_implemented(&self) -> bool {
        self.category == ErrorCategory::NotImplemented
    }

    /// Create a resolution error
    #[must_use]
    pub const fn resolution_error(message: &'static str) -> Self {
        Self::new(ErrorCategory::Resolution, codes::OBJECT_NOT_FOUND, message)
    }

    /// Create a type error
    #[must_use]
    pub const fn type_error(message: &'static str) -> Self {
        Self::new(ErrorCategory::Type, codes::TYPE_MISMATCH, message)
    }

    /// Create a parameter error
    #[must_use]
    pub const fn parameter_error(code: u16, message: &'static str) -> Self {
        Self::new(ErrorCategory::Parameter, code, message)
    }

    /// Create a validation error
    #[must_use]
    pub const fn validation_error(code: u16, message: &'static str) -> Self {
        Self::new(ErrorCategory::Validation, code, message)
    }

    /// Create a runtime error
    #[must_use]
    pub const fn runtime_error(message: &'static str) -> Self {
        Self::new(ErrorCategory::Runtime, codes::INVALID_STATE, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}][E{:04}] {}", self.category.as_str(), self.code, self.message)
    }
}

impl ErrorSource for Error {
    fn code(&self) -> u16 {
        self.code
    }

    fn message(&self) -> &'static str {
        self.message
    }

    fn category(&self) -> ErrorCategory {
        self.category
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_closed_set_is_fatal() {
        let fatal = Error::new(ErrorCategory::ClosedSet, codes::UNKNOWN_OBJECT_TAG, "bad tag");
        assert!(fatal.is_fatal());

        for category in [
            ErrorCategory::Resolution,
            ErrorCategory::Type,
            ErrorCategory::NotImplemented,
            ErrorCategory::Parameter,
            ErrorCategory::Content,
            ErrorCategory::Capacity,
            ErrorCategory::Validation,
            ErrorCategory::Runtime,
        ] {
            assert!(!Error::new(category, 0, "x").is_fatal(), "{category:?}");
        }
    }

    #[test]
    fn test_display_includes_category_and_code() {
        let text = format!("{}", Error::UNEXPECTED_TARGET);
        assert_eq!(text, "[type][E2002] unexpected target");
    }
}
