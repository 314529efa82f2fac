//! Logger facade used by the engine.
//!
//! A [`Logger`] filters records by a minimum level and forwards the rest to
//! the `log` crate (target `"mheg"`) and to every registered handler.

use alloc::{format, string::String};
use core::fmt;

use mheg_error::Error;

use crate::{
    handler::{HandlerRegistry, LoggingExt},
    level::LogLevel,
    operation::LogOperation,
};

/// `log` target used for every engine record
pub const LOG_TARGET: &str = "mheg";

/// Level-filtering logger with handler fan-out
#[derive(Debug, Default)]
pub struct Logger {
    min_level: Option<LogLevel>,
    handlers:  HandlerRegistry,
}

impl Logger {
    /// Create a logger that passes records at `min_level` and above
    #[must_use]
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level: Some(min_level), handlers: HandlerRegistry::new() }
    }

    /// Minimum level currently passed through
    #[must_use]
    pub fn min_level(&self) -> LogLevel {
        self.min_level.unwrap_or(LogLevel::Info)
    }

    /// Change the minimum level
    pub fn set_min_level(&mut self, level: LogLevel) {
        self.min_level = Some(level);
    }

    /// Register a handler that receives every record passing the filter
    pub fn register_handler<F>(&mut self, handler: F)
    where
        F: Fn(&LogOperation) + Send + Sync + 'static,
    {
        self.handlers.register_log_handler(handler);
    }

    /// True if a record at `level` would be emitted
    #[must_use]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level()
    }

    /// Emit a prepared record
    pub fn log(&self, operation: &LogOperation) {
        if !self.enabled(operation.level) {
            return;
        }
        #[cfg(feature = "log")]
        forward_to_log(operation);
        self.handlers.handle_log(operation);
    }

    /// Emit a message about `source` at `level`
    pub fn emit(&self, level: LogLevel, source: impl fmt::Display, message: impl Into<String>) {
        if self.enabled(level) {
            self.log(&LogOperation::with_source(level, message, format!("{source}")));
        }
    }

    /// Trace-level message
    pub fn trace(&self, source: impl fmt::Display, message: impl Into<String>) {
        self.emit(LogLevel::Trace, source, message);
    }

    /// Debug-level message
    pub fn debug(&self, source: impl fmt::Display, message: impl Into<String>) {
        self.emit(LogLevel::Debug, source, message);
    }

    /// Info-level message
    pub fn info(&self, source: impl fmt::Display, message: impl Into<String>) {
        self.emit(LogLevel::Info, source, message);
    }

    /// Report a recoverable or fatal error about `source` with extra detail.
    ///
    /// The record carries the error so handlers can match on its category
    /// and code; the level follows [`LogLevel::for_category`].
    pub fn report(&self, source: impl fmt::Display, error: Error, detail: impl fmt::Display) {
        let level = LogLevel::for_category(error.category);
        if !self.enabled(level) {
            return;
        }
        let detail = format!("{detail}");
        let message = if detail.is_empty() {
            String::from(error.message)
        } else {
            format!("{}: {detail}", error.message)
        };
        self.log(&LogOperation::from_error(error, Some(format!("{source}")), message));
    }
}

#[cfg(feature = "log")]
fn forward_to_log(operation: &LogOperation) {
    let level = match operation.level {
        LogLevel::Trace => log::Level::Trace,
        LogLevel::Debug => log::Level::Debug,
        LogLevel::Info => log::Level::Info,
        LogLevel::Warn => log::Level::Warn,
        LogLevel::Error | LogLevel::Critical => log::Level::Error,
    };
    match (&operation.source, operation.level) {
        (Some(source), LogLevel::Critical) => {
            log::log!(target: LOG_TARGET, level, "CRITICAL {source}; {}", operation.message);
        }
        (Some(source), _) => log::log!(target: LOG_TARGET, level, "{source}; {}", operation.message),
        (None, _) => log::log!(target: LOG_TARGET, level, "{}", operation.message),
    }
}
