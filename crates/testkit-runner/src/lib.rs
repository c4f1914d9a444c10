//! Test output runner
//!
//! Runs a test binary with verbose output forced on and turns the text it
//! prints into structured package and test results.
//!
//! ```
//! use std::time::Duration;
//! use testkit_runner::{parse_test_output, TestResult};
//!
//! let output = "=== RUN   TestSum\n--- PASS: TestSum (0.00s)\nPASS\n";
//! let packages = parse_test_output("math", Duration::ZERO, output.as_bytes()).unwrap();
//! assert_eq!(packages[0].result, TestResult::Passed);
//! assert_eq!(packages[0].tests[0].name, "TestSum");
//! ```

pub mod config;
pub mod error;
pub mod parser;
pub mod results;
pub mod run;

pub use config::{OutputFormat, RunnerConfig};
pub use error::{ConfigError, ParseError, ParseResult, RunError, RunResult};
pub use parser::{force_verbose_flag, parse_test_output};
pub use results::{Test, TestPackage, TestResult};
pub use run::{run_failed, run_test_binary};
