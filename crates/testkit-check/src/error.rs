//! Error types for container checks

use crate::Mismatch;
use std::fmt;
use thiserror::Error;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Which side of a comparison a value was passed as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Got,
    Want,
}

impl Side {
    fn requirement(self) -> &'static str {
        match self {
            Side::Got => "can only compare arrays, vectors, slices, or receivers",
            Side::Want => "want type must be an array, vector, or slice",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Got => write!(f, "got"),
            Side::Want => write!(f, "want"),
        }
    }
}

/// The two values cannot be compared as containers at all
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClassificationError {
    /// The containers hold different element types
    #[error("got type '{got}', wanted type '{want}': contained types do not match")]
    TypeMismatch { got: String, want: String },

    /// A value is not an acceptable container for its side
    #[error("{side} type '{type_name}': {}", .side.requirement())]
    NotAContainer { side: Side, type_name: String },

    /// The got side is the sending end of a channel
    #[error("got type '{got}', a non-receiving channel")]
    NonReceivableStream { got: String },
}

/// Failure of a same-elements check
#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Classification(#[from] ClassificationError),

    #[error("{}", .0.report)]
    NotEquivalent(Mismatch),
}

/// Errors that can occur loading configuration from the environment
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}
