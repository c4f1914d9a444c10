//! Running a test binary and collecting its results

use crate::config::RunnerConfig;
use crate::error::{RunError, RunResult};
use crate::parser::{force_verbose_flag, parse_test_output};
use crate::results::{TestPackage, TestResult};
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tracing::{debug, info};

/// Run `command` verbosely and parse what it prints
///
/// Stderr is passed through. The exit status of the command is not used; the
/// package result comes from the output alone.
pub async fn run_test_binary(
    config: &RunnerConfig,
    command: &str,
    args: Vec<String>,
) -> RunResult<Vec<TestPackage>> {
    let args = force_verbose_flag(args);
    info!(command, ?args, package = %config.package, "Running tests");

    let started = Instant::now();
    let output = Command::new(command)
        .args(&args)
        .stdin(Stdio::null())
        .stderr(Stdio::inherit())
        .output()
        .await
        .map_err(|source| RunError::Spawn {
            command: command.to_string(),
            source,
        })?;
    let elapsed = started.elapsed();

    debug!(
        status = ?output.status.code(),
        bytes = output.stdout.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "Test command finished"
    );

    Ok(parse_test_output(
        &config.package,
        elapsed,
        output.stdout.as_slice(),
    )?)
}

/// Whether the run as a whole failed
///
/// A package that failed only because its result line was missing counts
/// as failed unless `fail_on_missing_result` is off.
pub fn run_failed(config: &RunnerConfig, packages: &[TestPackage]) -> bool {
    packages.iter().any(|package| {
        if package.passed() {
            return false;
        }
        let only_missing_result =
            package.result_missing && package.count(TestResult::Failed) == 0;
        config.fail_on_missing_result || !only_missing_result
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::Test;

    fn package(result: TestResult, result_missing: bool, failed_tests: usize) -> TestPackage {
        let tests = (0..failed_tests)
            .map(|i| Test {
                name: format!("Test{i}"),
                result: TestResult::Failed,
                duration: 0.0,
                output: String::new(),
                failure: String::new(),
            })
            .collect();
        TestPackage {
            name: "pkg".to_string(),
            result,
            duration: 0.0,
            tests,
            output: String::new(),
            result_missing,
        }
    }

    #[test]
    fn test_run_failed() {
        let strict = RunnerConfig::default();
        let lenient = RunnerConfig {
            fail_on_missing_result: false,
            ..RunnerConfig::default()
        };

        let passed = package(TestResult::Passed, false, 0);
        assert!(!run_failed(&strict, &[passed.clone()]));
        assert!(!run_failed(&strict, &[]));

        let failed = package(TestResult::Failed, false, 1);
        assert!(run_failed(&strict, &[passed.clone(), failed.clone()]));
        assert!(run_failed(&lenient, &[failed]));

        let truncated = package(TestResult::Failed, true, 0);
        assert!(run_failed(&strict, &[truncated.clone()]));
        assert!(!run_failed(&lenient, &[truncated]));

        let truncated_with_failure = package(TestResult::Failed, true, 1);
        assert!(run_failed(&lenient, &[truncated_with_failure]));
    }
}
