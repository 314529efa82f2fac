//! Log handlers for the MHEG runtime.
//!
//! Embedders and tests register handlers to observe every record the
//! engine logs.

use alloc::{boxed::Box, vec::Vec};
use core::fmt;

use crate::operation::LogOperation;

/// Function type for handling log operations
pub type LogHandler = Box<dyn Fn(&LogOperation) + Send + Sync>;

/// Ordered set of registered log handlers
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: Vec<LogHandler>,
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry").field("registered_handlers", &self.handlers.len()).finish()
    }
}

impl HandlerRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self { handlers: Vec::new() }
    }
}

/// Extension trait for registries that accept log handlers
pub trait LoggingExt {
    /// Register a log handler
    fn register_log_handler<F>(&mut self, handler: F)
    where
        F: Fn(&LogOperation) + Send + Sync + 'static;

    /// Handle a log operation
    fn handle_log(&self, operation: &LogOperation);

    /// Check if a log handler is registered
    fn has_log_handler(&self) -> bool;
}

impl LoggingExt for HandlerRegistry {
    fn register_log_handler<F>(&mut self, handler: F)
    where
        F: Fn(&LogOperation) + Send + Sync + 'static,
    {
        self.handlers.push(Box::new(handler));
    }

    fn handle_log(&self, operation: &LogOperation) {
        for handler in &self.handlers {
            handler(operation);
        }
    }

    fn has_log_handler(&self) -> bool {
        !self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::level::LogLevel;

    #[test]
    fn test_logging_extension() {
        let mut registry = HandlerRegistry::new();

        assert!(!registry.has_log_handler());

        // Logging without handler should not panic
        registry.handle_log(&LogOperation::new(LogLevel::Info, "test message".to_string()));

        let received = Arc::new(Mutex::new(Vec::new()));
        {
            let received = received.clone();
            registry.register_log_handler(move |log_op| {
                received.lock().unwrap().push((log_op.level, log_op.message.clone()));
            });
        }

        assert!(registry.has_log_handler());

        registry.handle_log(&LogOperation::new(LogLevel::Info, "info message".to_string()));
        registry.handle_log(&LogOperation::new(LogLevel::Error, "error message".to_string()));

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 2);
        assert_eq!(received[0], (LogLevel::Info, "info message".to_string()));
        assert_eq!(received[1], (LogLevel::Error, "error message".to_string()));
    }

    #[test]
    fn test_every_handler_sees_every_record() {
        let mut registry = HandlerRegistry::new();
        let count = Arc::new(Mutex::new(0_u32));
        for _ in 0..3 {
            let count = count.clone();
            registry.register_log_handler(move |_| *count.lock().unwrap() += 1);
        }
        registry.handle_log(&LogOperation::new(LogLevel::Warn, "x".to_string()));
        assert_eq!(*count.lock().unwrap(), 3);
    }
}
