//! Parser for verbose test binary output
//!
//! Recognized lines:
//!
//! - `=== RUN <name>` starts a test
//! - `--- PASS|FAIL|SKIP: <name> (<secs>s)` ends the running test
//! - a bare `PASS` or `FAIL` gives the package result
//!
//! Lines printed while a test runs belong to that test's output. Tab-indented
//! lines printed after a result line belong to the last finished test's
//! failure text. Everything else is kept only in the package output.

use crate::error::{ParseError, ParseResult};
use crate::results::{Test, TestPackage, TestResult};
use regex::Regex;
use std::io::BufRead;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, trace};

/// Appended to the package output when no package result line was seen
pub const MISSING_RESULT_NOTE: &str =
    "\n[Did not find package result: marking package as failed.]\n";

const RUN_PREFIX: &str = "=== RUN ";

const VERBOSE_FLAG: &str = "-test.v=true";
const QUIET_FLAG: &str = "-test.v=false";

fn result_regex() -> &'static Regex {
    static RESULT: OnceLock<Regex> = OnceLock::new();
    RESULT.get_or_init(|| {
        Regex::new(r"^--- (PASS|FAIL|SKIP): (.+) \((\d+\.\d+)(?: seconds|s)\)$")
            .unwrap_or_else(|e| unreachable!("result pattern is valid: {e}"))
    })
}

/// Parse the output of one verbose test binary run
///
/// `duration` is the wall-clock time of the run. A test still running when
/// the output ends is dropped. Output without a package result line yields a
/// failed package.
pub fn parse_test_output<R: BufRead>(
    package: &str,
    duration: Duration,
    mut reader: R,
) -> ParseResult<Vec<TestPackage>> {
    let mut output = String::new();
    let mut tests: Vec<Test> = Vec::new();
    let mut running: Option<Test> = None;
    let mut result: Option<TestResult> = None;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let raw = String::from_utf8_lossy(&buf);
        output.push_str(&raw);
        let line = raw.trim_end();

        match running.as_mut() {
            None => {
                if let Some(name) = line.strip_prefix(RUN_PREFIX) {
                    trace!(test = name.trim(), "Test started");
                    running = Some(Test::started(name.trim()));
                } else if line == "PASS" || line == "FAIL" {
                    if result.is_some() {
                        return Err(ParseError::MultiplePackages);
                    }
                    result = Some(if line == "PASS" {
                        TestResult::Passed
                    } else {
                        TestResult::Failed
                    });
                } else if line.starts_with('\t') {
                    if let Some(last) = tests.last_mut() {
                        last.failure.push_str(&raw);
                    }
                }
            }
            Some(test) => {
                if let Some(captures) = result_regex().captures(line) {
                    test.result = match &captures[1] {
                        "PASS" => TestResult::Passed,
                        "SKIP" => TestResult::Skipped,
                        _ => TestResult::Failed,
                    };
                    test.duration = captures[3].parse().unwrap_or_default();
                    if let Some(finished) = running.take() {
                        trace!(test = %finished.name, result = ?finished.result, "Test finished");
                        tests.push(finished);
                    }
                } else {
                    test.output.push_str(&raw);
                }
            }
        }
    }

    if let Some(unfinished) = running {
        debug!(test = %unfinished.name, "Output ended while a test was running");
    }

    let result_missing = result.is_none();
    if result_missing {
        debug!(package, "No package result line; marking package as failed");
        output.push_str(MISSING_RESULT_NOTE);
    }

    let package = TestPackage {
        name: package.to_string(),
        result: result.unwrap_or(TestResult::Failed),
        duration: duration.as_secs_f64(),
        tests,
        output,
        result_missing,
    };
    debug!(
        package = %package.name,
        result = ?package.result,
        tests = package.tests.len(),
        "Parsed test output"
    );

    Ok(vec![package])
}

/// Make sure a test binary runs verbosely
///
/// Arguments are scanned in order. If a request for verbose output comes
/// first they are left alone; if a request for quiet output comes first it is
/// dropped. Either way, unless verbose was found first, verbose is appended.
pub fn force_verbose_flag(mut args: Vec<String>) -> Vec<String> {
    let first = args
        .iter()
        .position(|arg| arg == VERBOSE_FLAG || arg == QUIET_FLAG);

    match first {
        Some(index) if args[index] == VERBOSE_FLAG => return args,
        Some(index) => {
            args.remove(index);
        }
        None => {}
    }

    args.push(VERBOSE_FLAG.to_string());
    args
}
