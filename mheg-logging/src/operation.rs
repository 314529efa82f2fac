//! Log operation for the MHEG runtime.
//!
//! This module provides the record type handed to log handlers.

use alloc::string::String;

use mheg_error::Error;

use crate::level::LogLevel;

/// One log record produced by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogOperation {
    /// Log level
    pub level:   LogLevel,
    /// Log message
    pub message: String,
    /// Printable address of the object the record is about (optional)
    pub source:  Option<String>,
    /// Error being reported, if the record reports one
    pub error:   Option<Error>,
}

impl LogOperation {
    /// Create a new log operation
    #[must_use]
    pub const fn new(level: LogLevel, message: String) -> Self {
        Self { level, message, source: None, error: None }
    }

    /// Create a new log operation about a given object
    pub fn with_source<S1: Into<String>, S2: Into<String>>(
        level: LogLevel,
        message: S1,
        source: S2,
    ) -> Self {
        Self { level, message: message.into(), source: Some(source.into()), error: None }
    }

    /// Create a record reporting `error`; the level follows the error
    /// category.
    pub fn from_error<S: Into<String>>(error: Error, source: Option<S>, message: String) -> Self {
        Self {
            level: LogLevel::for_category(error.category),
            message,
            source: source.map(Into::into),
            error: Some(error),
        }
    }

    /// True if this record reports an error with the given code
    #[must_use]
    pub fn has_code(&self, code: u16) -> bool {
        self.error.is_some_and(|e| e.code == code)
    }
}

#[cfg(test)]
mod tests {
    use mheg_error::{codes, kinds, ErrorCategory};

    use super::*;

    #[test]
    fn test_log_operation_creation() {
        let op = LogOperation::new(LogLevel::Info, "test message".to_string());
        assert_eq!(op.level, LogLevel::Info);
        assert_eq!(op.message, "test message");
        assert!(op.source.is_none());

        let op = LogOperation::with_source(LogLevel::Debug, "test message", "~/a/startup,1");
        assert_eq!(op.level, LogLevel::Debug);
        assert_eq!(op.source, Some("~/a/startup,1".to_string()));
    }

    #[test]
    fn test_from_error_takes_category_level() {
        let op = LogOperation::from_error(
            kinds::unimplemented_action("OpenConnection"),
            Some("~/app,0"),
            "OpenConnection".to_string(),
        );
        assert_eq!(op.level, LogLevel::Critical);
        assert_eq!(op.error.map(|e| e.category), Some(ErrorCategory::NotImplemented));
        assert!(op.has_code(codes::UNIMPLEMENTED_ACTION));
        assert!(!op.has_code(codes::UNEXPECTED_TARGET));
    }
}
