// MHEG - mheg-runtime
// Module: Engine configuration
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Engine configuration builder.
//!
//! Besides engine bounds, the configuration carries the receiver's answers
//! to `GetEngineSupport` and the identity reported by `WhoAmI`.

use chrono::NaiveDateTime;
use mheg_foundation::{BoxSize, FIRST_CLONED_OBJECT_NUMBER};
use mheg_logging::LogLevel;

/// Receiver, engine and DSM-CC identifiers reported by `WhoAmI`
pub const DEFAULT_RECEIVER_IDENTITY: &str = "MHGRUS001 MHEGENG001 DSMCCR001";

/// Content hook of MPEG stream content
pub const CONTENT_HOOK_STREAM_MPEG: i32 = 10;
/// Content hook of MPEG I-frame bitmaps
pub const CONTENT_HOOK_BITMAP_MPEG: i32 = 2;

/// How a feature answers its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureRule {
    /// Fixed answer, arguments ignored
    Flag(bool),
    /// True if the first integer argument is at most this value
    AtMost(i32),
    /// True if the integer arguments equal one of these tuples
    AnyOf(Vec<Vec<i32>>),
    /// True if the raw argument text equals one of these strings
    Text(Vec<String>),
}

/// One `GetEngineSupport` feature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineFeature {
    /// Long feature name, without arguments
    pub long_name:  String,
    /// Short feature name, without arguments
    pub short_name: String,
    /// Answer rule
    pub rule:       FeatureRule,
}

impl EngineFeature {
    /// Feature with the given names and rule
    pub fn new(long_name: &str, short_name: &str, rule: FeatureRule) -> Self {
        Self { long_name: long_name.into(), short_name: short_name.into(), rule }
    }

    fn matches(&self, name: &str) -> bool {
        name == self.long_name || name == self.short_name
    }

    fn answer(&self, arguments: &str) -> bool {
        match &self.rule {
            FeatureRule::Flag(answer) => *answer,
            FeatureRule::AtMost(max) => integer_arguments(arguments).first().is_some_and(|n| n <= max),
            FeatureRule::AnyOf(tuples) => {
                let args = integer_arguments(arguments);
                tuples.iter().any(|t| *t == args)
            }
            FeatureRule::Text(accepted) => accepted.iter().any(|a| a == arguments),
        }
    }
}

/// Comma separated decimal arguments; a non-digit ends each argument.
fn integer_arguments(arguments: &str) -> Vec<i32> {
    if arguments.is_empty() {
        return Vec::new();
    }
    arguments
        .split(',')
        .map(|arg| {
            arg.bytes()
                .take_while(u8::is_ascii_digit)
                .fold(0_i32, |acc, b| acc.wrapping_mul(10).wrapping_add(i32::from(b - b'0')))
        })
        .collect()
}

/// Default feature table of a UK profile receiver with a 720x576 screen
pub fn default_engine_features(screen: BoxSize, identity: &str) -> Vec<EngineFeature> {
    use FeatureRule::{AnyOf, AtMost, Flag, Text};

    let (w, h) = (screen.width, screen.height);
    let scales = |hook: i32| {
        AnyOf(vec![vec![hook, w * 2, h * 2], vec![hook, w, h], vec![hook, w / 2, h / 2]])
    };
    let mut profiles = vec![String::from("2")];
    profiles.extend(identity.split_whitespace().map(String::from));

    vec![
        EngineFeature::new("AncillaryConnections", "ACo", Flag(false)),
        EngineFeature::new("ApplicationStacking", "ASt", Flag(true)),
        EngineFeature::new("Cloning", "Clo", Flag(true)),
        EngineFeature::new("FreeMovingCursor", "FMC", Flag(false)),
        EngineFeature::new("MultipleAudioStreams", "MAS", AtMost(1)),
        EngineFeature::new("MultipleVideoStreams", "MVS", AtMost(1)),
        EngineFeature::new("OverlappingVisibles", "OvV", Flag(true)),
        EngineFeature::new("Scaling", "Sca", Flag(false)),
        EngineFeature::new("SceneAspectRatio", "SAR", AnyOf(vec![vec![4, 3], vec![16, 9]])),
        EngineFeature::new("SceneCoordinateSystem", "SCS", AnyOf(vec![vec![w, h]])),
        EngineFeature::new("TrickModes", "TrM", Flag(false)),
        EngineFeature::new("VideoScaling", "VSc", scales(CONTENT_HOOK_STREAM_MPEG)),
        EngineFeature::new("BitmapScaling", "BSc", scales(CONTENT_HOOK_BITMAP_MPEG)),
        EngineFeature::new(
            "VideoDecodeOffset",
            "VDO",
            AnyOf(vec![vec![CONTENT_HOOK_STREAM_MPEG, 0], vec![CONTENT_HOOK_STREAM_MPEG, 1]]),
        ),
        EngineFeature::new(
            "BitmapDecodeOffset",
            "BDO",
            AnyOf(vec![vec![CONTENT_HOOK_BITMAP_MPEG, 0], vec![CONTENT_HOOK_BITMAP_MPEG, 1]]),
        ),
        EngineFeature::new("UKEngineProfile", "UEP", Text(profiles)),
    ]
}

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Minimum level passed to log handlers
    pub log_level:             LogLevel,
    /// Actions one processing cycle may execute before the rest are dropped
    pub max_actions_per_cycle: usize,
    /// String returned by `WhoAmI`
    pub receiver_identity:     String,
    /// Feature table consulted by `GetEngineSupport`
    pub engine_features:       Vec<EngineFeature>,
    /// Seed of the `Random` resident program
    pub random_seed:           u64,
    /// Screen size; UnlockScreen redraws this region
    pub screen_size:           BoxSize,
    /// First object number handed to clones
    pub clone_number_start:    i32,
    /// Fixed wall-clock time for the date programs; `None` uses local time
    pub fixed_date_time:       Option<NaiveDateTime>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let screen_size = BoxSize::new(720, 576);
        Self {
            log_level: LogLevel::Info,
            max_actions_per_cycle: 10_000,
            receiver_identity: String::from(DEFAULT_RECEIVER_IDENTITY),
            engine_features: default_engine_features(screen_size, DEFAULT_RECEIVER_IDENTITY),
            random_seed: 0x2545_f491_4f6c_dd1d,
            screen_size,
            clone_number_start: FIRST_CLONED_OBJECT_NUMBER,
            fixed_date_time: None,
        }
    }
}

impl EngineConfig {
    /// Create a default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum log level
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Set the per-cycle action bound
    pub fn with_max_actions_per_cycle(mut self, max: usize) -> Self {
        self.max_actions_per_cycle = max;
        self
    }

    /// Set the `WhoAmI` answer
    pub fn with_receiver_identity(mut self, identity: impl Into<String>) -> Self {
        self.receiver_identity = identity.into();
        self
    }

    /// Replace the feature table
    pub fn with_engine_features(mut self, features: Vec<EngineFeature>) -> Self {
        self.engine_features = features;
        self
    }

    /// Set the random seed
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    /// Set the screen size
    pub fn with_screen_size(mut self, size: BoxSize) -> Self {
        self.screen_size = size;
        self
    }

    /// Set the first clone object number
    pub fn with_clone_number_start(mut self, start: i32) -> Self {
        self.clone_number_start = start;
        self
    }

    /// Pin the wall clock seen by the date programs
    pub fn with_fixed_date_time(mut self, at: NaiveDateTime) -> Self {
        self.fixed_date_time = Some(at);
        self
    }

    /// Answer to `GetEngineSupport(feature)`; `None` if the feature is
    /// unknown.
    ///
    /// `feature` is a long or short name, optionally followed by a
    /// parenthesised argument list, e.g. `MVS(1)`.
    pub fn engine_support(&self, feature: &str) -> Option<bool> {
        let (name, arguments) = match feature.split_once('(') {
            Some((name, rest)) => (name, rest.strip_suffix(')').unwrap_or(rest)),
            None => (feature, ""),
        };
        self.engine_features.iter().find(|f| f.matches(name)).map(|f| f.answer(arguments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_actions_per_cycle, 10_000);
        assert_eq!(config.clone_number_start, 65536);
        assert_eq!(config.screen_size, BoxSize::new(720, 576));
    }

    #[test]
    fn test_parameterised_features() {
        let config = EngineConfig::default();
        assert_eq!(config.engine_support("MultipleVideoStreams(1)"), Some(true));
        assert_eq!(config.engine_support("MVS(2)"), Some(false));
        assert_eq!(config.engine_support("SAR(16,9)"), Some(true));
        assert_eq!(config.engine_support("SAR(5,4)"), Some(false));
        assert_eq!(config.engine_support("SCS(720,576)"), Some(true));
        assert_eq!(config.engine_support("VSc(10,360,288)"), Some(true));
        assert_eq!(config.engine_support("UEP(2)"), Some(true));
        assert_eq!(config.engine_support("UEP(MHEGENG001)"), Some(true));
        assert_eq!(config.engine_support("UEP(3)"), Some(false));
    }

    #[test]
    fn test_flags_and_unknown() {
        let config = EngineConfig::default();
        assert_eq!(config.engine_support("ASt"), Some(true));
        assert_eq!(config.engine_support("TrickModes"), Some(false));
        assert_eq!(config.engine_support("Teleport"), None);
    }

    #[test]
    fn test_builder_overrides() {
        let config = EngineConfig::new()
            .with_log_level(LogLevel::Trace)
            .with_max_actions_per_cycle(5)
            .with_engine_features(vec![EngineFeature::new("Foo", "Fo", FeatureRule::Flag(true))]);
        assert_eq!(config.log_level, LogLevel::Trace);
        assert_eq!(config.max_actions_per_cycle, 5);
        assert_eq!(config.engine_support("Fo"), Some(true));
        assert_eq!(config.engine_support("ASt"), None);
    }
}
