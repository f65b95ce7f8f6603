//! # Error Types
//!
//! Prediction itself never fails. Errors only arise where data enters the
//! crate from outside the compiled-in tables: a station profile supplied in
//! configuration, or the configuration file itself.

use std::io;
use thiserror::Error;

/// A station profile that breaks a constituent or epoch invariant.
///
/// `index` is the constituent's position in the profile table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    #[error("constituent {index} ({name}): speed must be positive, got {speed}")]
    NonPositiveSpeed {
        index: usize,
        name: String,
        speed: f64,
    },

    #[error("constituent {index} ({name}): amplitude must be non-negative, got {amplitude}")]
    NegativeAmplitude {
        index: usize,
        name: String,
        amplitude: f64,
    },

    #[error("constituent {index} ({name}): phase must lie in [0, 360), got {phase}")]
    PhaseOutOfRange {
        index: usize,
        name: String,
        phase: f64,
    },

    #[error("constituent {index} ({name}): node factor must be non-negative, got {factor}")]
    NegativeNodeFactor {
        index: usize,
        name: String,
        factor: f64,
    },

    #[error("{field} is not a finite number")]
    NonFinite { field: String },

    #[error("reference epoch {0} is not a valid calendar instant")]
    InvalidEpoch(String),
}

/// Failure to read, parse, or write `tide-config.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config IO: {0}")]
    Io(#[from] io::Error),

    #[error("invalid config format: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config serialization: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid station profile: {0}")]
    Profile(#[from] ProfileError),
}
