//! Runner configuration

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::str::FromStr;

/// Package name reported when none is configured
pub const DEFAULT_PACKAGE: &str = "tests";

/// How results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable per-package summary
    #[default]
    Summary,
    /// Packages serialized as a JSON array
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "summary" => Ok(OutputFormat::Summary),
            "json" => Ok(OutputFormat::Json),
            other => Err(ConfigError::InvalidValue {
                key: "TESTKIT_OUTPUT".to_string(),
                reason: format!("unknown output format '{}'", other),
            }),
        }
    }
}

/// Configuration for running a test binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Name given to the parsed package
    pub package: String,
    pub output_format: OutputFormat,
    /// Exit non-zero when the output had no package result line, even if
    /// every test that ran passed
    pub fail_on_missing_result: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            package: DEFAULT_PACKAGE.to_string(),
            output_format: OutputFormat::default(),
            fail_on_missing_result: true,
        }
    }
}

impl RunnerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            package: lookup("TESTKIT_PACKAGE")
                .filter(|p| !p.trim().is_empty())
                .unwrap_or(defaults.package),
            output_format: lookup("TESTKIT_OUTPUT")
                .map(|raw| raw.parse())
                .transpose()?
                .unwrap_or(defaults.output_format),
            fail_on_missing_result: lookup("TESTKIT_FAIL_ON_MISSING_RESULT")
                .map(|raw| parse_bool("TESTKIT_FAIL_ON_MISSING_RESULT", &raw))
                .transpose()?
                .unwrap_or(defaults.fail_on_missing_result),
        })
    }
}

fn parse_bool(key: &str, raw: &str) -> ConfigResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            reason: format!("'{}' is not a boolean", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RunnerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, RunnerConfig::default());
        assert_eq!(config.package, "tests");
        assert_eq!(config.output_format, OutputFormat::Summary);
        assert!(config.fail_on_missing_result);
    }

    #[test]
    fn test_overrides() {
        let config = RunnerConfig::from_lookup(lookup(&[
            ("TESTKIT_PACKAGE", "github.com/example/pkg"),
            ("TESTKIT_OUTPUT", "JSON"),
            ("TESTKIT_FAIL_ON_MISSING_RESULT", "no"),
        ]))
        .unwrap();

        assert_eq!(config.package, "github.com/example/pkg");
        assert_eq!(config.output_format, OutputFormat::Json);
        assert!(!config.fail_on_missing_result);
    }

    #[test]
    fn test_invalid_values() {
        let err = RunnerConfig::from_lookup(lookup(&[("TESTKIT_OUTPUT", "xml")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration value for 'TESTKIT_OUTPUT': unknown output format 'xml'"
        );

        assert!(
            RunnerConfig::from_lookup(lookup(&[("TESTKIT_FAIL_ON_MISSING_RESULT", "maybe")]))
                .is_err()
        );
    }
}
