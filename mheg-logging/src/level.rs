//! Engine log levels and the mapping from error categories to them.

use core::{fmt, str::FromStr};

use mheg_error::ErrorCategory;

/// Severity of an engine log record, least severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Every executed action
    Trace,
    /// Lifecycle transitions and events
    Debug,
    /// Application and scene changes
    Info,
    /// Content the engine could work around
    Warn,
    /// Bad references, kinds and parameters
    Error,
    /// Closed-set violations and unimplemented features
    Critical,
}

/// Accepted spellings, matched without regard to case
const NAMES: &[(&str, LogLevel)] = &[
    ("trace", LogLevel::Trace),
    ("debug", LogLevel::Debug),
    ("info", LogLevel::Info),
    ("warn", LogLevel::Warn),
    ("warning", LogLevel::Warn),
    ("error", LogLevel::Error),
    ("err", LogLevel::Error),
    ("critical", LogLevel::Critical),
    ("fatal", LogLevel::Critical),
];

/// A level name that is not in the accepted set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLogLevelError;

impl fmt::Display for ParseLogLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown log level")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseLogLevelError {}

impl FromStr for LogLevel {
    type Err = ParseLogLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|&(_, level)| level)
            .ok_or(ParseLogLevelError)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl LogLevel {
    /// Parse `s`, falling back to `Info`
    #[must_use]
    pub fn from_string_or_default(s: &str) -> Self {
        s.parse().unwrap_or(Self::Info)
    }

    /// Canonical lower-case name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }

    /// Level at which an error of the given category is reported.
    ///
    /// Unimplemented features and closed-set violations are logged at
    /// `Critical` so they stand apart from ordinary content errors.
    #[must_use]
    pub const fn for_category(category: ErrorCategory) -> Self {
        match category {
            ErrorCategory::NotImplemented | ErrorCategory::ClosedSet => Self::Critical,
            ErrorCategory::Resolution | ErrorCategory::Type | ErrorCategory::Parameter => {
                Self::Error
            }
            ErrorCategory::Content
            | ErrorCategory::Capacity
            | ErrorCategory::Validation
            | ErrorCategory::Runtime => Self::Warn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_parses_and_canonical_names_round_trip() {
        for &(name, level) in NAMES {
            assert_eq!(name.parse::<LogLevel>(), Ok(level));
            assert_eq!(name.to_ascii_uppercase().parse::<LogLevel>(), Ok(level));
        }
        for level in [LogLevel::Trace, LogLevel::Warn, LogLevel::Critical] {
            assert_eq!(level.as_str().parse::<LogLevel>(), Ok(level));
        }
        assert_eq!(" Debug ".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert_eq!("verbose".parse::<LogLevel>(), Err(ParseLogLevelError));
    }

    #[test]
    fn test_unknown_falls_back_to_info() {
        assert_eq!(LogLevel::from_string_or_default("fatal"), LogLevel::Critical);
        assert_eq!(LogLevel::from_string_or_default(""), LogLevel::Info);
    }

    #[test]
    fn test_category_levels() {
        assert_eq!(LogLevel::for_category(ErrorCategory::NotImplemented), LogLevel::Critical);
        assert_eq!(LogLevel::for_category(ErrorCategory::Type), LogLevel::Error);
        assert_eq!(LogLevel::for_category(ErrorCategory::Content), LogLevel::Warn);
        assert!(LogLevel::Critical > LogLevel::Error);
    }
}
