//! Formatting configuration

use crate::error::{ConfigError, ConfigResult};
use std::env;
use tracing::warn;

/// Environment variable overriding [`FormatOptions::max_line_width`]
pub const MAX_LINE_WIDTH_VAR: &str = "TESTKIT_MAX_LINE_WIDTH";

/// Default width beyond which element listings are split one per line
pub const DEFAULT_MAX_LINE_WIDTH: usize = 80;

/// Options controlling how mismatch reports are rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// When any listing in a report is wider than this, every listing in
    /// that report is written one element per line
    pub max_line_width: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            max_line_width: DEFAULT_MAX_LINE_WIDTH,
        }
    }
}

impl FormatOptions {
    /// Load options from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load options from any key lookup
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = Self::default();

        if let Some(raw) = lookup(MAX_LINE_WIDTH_VAR) {
            options.max_line_width = parse_width(&raw)?;
        }

        Ok(options)
    }

    /// Load options from the environment, falling back to defaults on error
    pub fn load() -> Self {
        Self::load_from(|key| env::var(key).ok())
    }

    /// Like [`load`](Self::load), reading from `lookup`
    pub fn load_from<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup(lookup).unwrap_or_else(|err| {
            warn!(error = %err, "Ignoring invalid formatting configuration");
            Self::default()
        })
    }

    pub fn with_max_line_width(mut self, max_line_width: usize) -> Self {
        self.max_line_width = max_line_width;
        self
    }
}

fn parse_width(raw: &str) -> ConfigResult<usize> {
    let invalid = |reason: &str| ConfigError::InvalidValue {
        key: MAX_LINE_WIDTH_VAR.to_string(),
        reason: reason.to_string(),
    };

    match raw.trim().parse::<usize>() {
        Ok(0) => Err(invalid("must be greater than zero")),
        Ok(width) => Ok(width),
        Err(e) => Err(invalid(&format!("'{}' is not a width: {}", raw, e))),
    }
}
