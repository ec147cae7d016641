//! Error types.

use crate::schedule::ItemId;
use thiserror::Error;

/// A caller supplied an out-of-range tuning value.
///
/// These indicate a miscalibrated call site and are never coerced into range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("threshold percent must be within 0..=100, got {value}")]
    ThresholdPercentOutOfRange { value: i32 },

    #[error("{name} must be within 0.0..=1.0, got {value}")]
    WordThresholdOutOfRange { name: &'static str, value: f64 },

    #[error("approximate threshold {approximate} exceeds correct threshold {correct}")]
    WordThresholdsInverted { correct: f64, approximate: f64 },

    #[error("UTC offset of {minutes} minutes is not a valid time zone offset")]
    UtcOffsetOutOfRange { minutes: i32 },
}

/// Error loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),
}

/// Error applying a review through a repository.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("no learning item with id {0}")]
    UnknownItem(ItemId),
}
