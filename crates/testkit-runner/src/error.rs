//! Error types for the test runner

use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

pub type ConfigResult<T> = Result<T, ConfigError>;

pub type RunResult<T> = Result<T, RunError>;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read test output: {0}")]
    Io(#[from] std::io::Error),

    #[error("expected only a single package")]
    MultiplePackages,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to run '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}
