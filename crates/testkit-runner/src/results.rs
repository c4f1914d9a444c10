//! Test and package results

use serde::{Deserialize, Serialize};

/// Outcome of a single test or of a whole package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestResult {
    Passed,
    Failed,
    Skipped,
}

impl TestResult {
    pub fn label(&self) -> &'static str {
        match self {
            TestResult::Passed => "PASS",
            TestResult::Failed => "FAIL",
            TestResult::Skipped => "SKIP",
        }
    }
}

/// One test case reported by a verbose test binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Test {
    pub name: String,
    pub result: TestResult,
    /// Seconds, as reported on the result line
    pub duration: f64,
    /// Lines printed while the test was running
    pub output: String,
    /// Indented lines printed after the result line
    pub failure: String,
}

impl Test {
    pub(crate) fn started(name: &str) -> Self {
        Self {
            name: name.to_string(),
            result: TestResult::Skipped,
            duration: 0.0,
            output: String::new(),
            failure: String::new(),
        }
    }
}

/// Every test reported by one test binary run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestPackage {
    pub name: String,
    pub result: TestResult,
    /// Wall-clock seconds for the whole run
    pub duration: f64,
    pub tests: Vec<Test>,
    /// Complete output of the run
    pub output: String,
    /// True when the output had no package result line
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub result_missing: bool,
}

impl TestPackage {
    pub fn passed(&self) -> bool {
        self.result == TestResult::Passed
    }

    pub fn count(&self, result: TestResult) -> usize {
        self.tests.iter().filter(|t| t.result == result).count()
    }

    /// Print a human-readable summary of the package
    pub fn print_summary(&self) {
        let marker = if self.passed() { "✅" } else { "❌" };
        println!(
            "{} {} - {} ({:.3}s)",
            marker,
            self.name,
            self.result.label(),
            self.duration
        );

        for test in &self.tests {
            println!(
                "   [{}] {} ({:.2}s)",
                test.result.label(),
                test.name,
                test.duration
            );
            if test.result == TestResult::Failed {
                for line in test.output.lines().chain(test.failure.lines()) {
                    println!("      {}", line.trim_end());
                }
            }
        }

        if self.result_missing {
            println!("   [Did not find package result: marking package as failed.]");
        }
    }
}

/// Print a summary of every package and an overall tally
pub fn print_summary(packages: &[TestPackage]) {
    println!("\n=== Test Summary ===");
    for package in packages {
        package.print_summary();
    }

    let tests: Vec<&Test> = packages.iter().flat_map(|p| &p.tests).collect();
    let passed = tests.iter().filter(|t| t.result == TestResult::Passed).count();
    let failed = tests.iter().filter(|t| t.result == TestResult::Failed).count();
    let skipped = tests.len() - passed - failed;

    println!();
    println!(
        "Results: {} passed, {} failed, {} skipped",
        passed, failed, skipped
    );

    if packages.iter().all(TestPackage::passed) {
        println!("✅ All packages passed!");
    } else {
        let failed = packages.iter().filter(|p| !p.passed()).count();
        println!("❌ {} package(s) failed", failed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package(result_missing: bool) -> TestPackage {
        TestPackage {
            name: "pkg".to_string(),
            result: TestResult::Passed,
            duration: 1.5,
            tests: vec![
                Test {
                    result: TestResult::Passed,
                    ..Test::started("TestA")
                },
                Test {
                    result: TestResult::Failed,
                    ..Test::started("TestB")
                },
            ],
            output: String::new(),
            result_missing,
        }
    }

    #[test]
    fn test_counts() {
        let package = package(false);
        assert!(package.passed());
        assert_eq!(package.count(TestResult::Passed), 1);
        assert_eq!(package.count(TestResult::Failed), 1);
        assert_eq!(package.count(TestResult::Skipped), 0);
    }

    #[test]
    fn test_serialization() {
        let value = serde_json::to_value(package(false)).unwrap();
        assert_eq!(value["result"], "passed");
        assert_eq!(value["tests"][1]["result"], "failed");
        assert!(value.get("result_missing").is_none());

        let value = serde_json::to_value(package(true)).unwrap();
        assert_eq!(value["result_missing"], true);

        let back: TestPackage = serde_json::from_value(value).unwrap();
        assert!(back.result_missing);
    }
}
