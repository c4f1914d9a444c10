//! Assertions over unordered containers
//!
//! Failures are delivered through a [`Reporter`], the channel a test harness
//! uses to record that a test failed. [`Panicking`] fails the current test on
//! the spot; [`Recorder`] collects failures so a test can inspect them.
//!
//! ```
//! use testkit_assert::{assert_same_elements, has_same_elements, Recorder};
//!
//! assert_same_elements!(vec![3, 1, 2], [1, 2, 3]);
//!
//! let recorder = Recorder::new();
//! assert!(!has_same_elements(&recorder, vec![1, 1], vec![1, 2]));
//! assert_eq!(recorder.failures().len(), 1);
//! ```

use std::sync::Mutex;
use testkit_check::Container;
use tracing::debug;

pub use testkit_check::{CheckError, Erased, FormatOptions};

/// Receives assertion failures
pub trait Reporter {
    /// Record that the current test failed with `message`
    fn error(&self, message: &str);
}

impl<R: Reporter + ?Sized> Reporter for &R {
    #[track_caller]
    fn error(&self, message: &str) {
        (**self).error(message)
    }
}

/// Reporter that panics, failing the running test immediately
#[derive(Debug, Default, Clone, Copy)]
pub struct Panicking;

impl Reporter for Panicking {
    #[track_caller]
    fn error(&self, message: &str) {
        panic!("{}", message);
    }
}

/// Reporter that keeps every failure for later inspection
#[derive(Debug, Default)]
pub struct Recorder {
    failures: Mutex<Vec<String>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Failures recorded so far, oldest first
    pub fn failures(&self) -> Vec<String> {
        self.failures
            .lock()
            .map(|failures| failures.clone())
            .unwrap_or_default()
    }

    pub fn is_clean(&self) -> bool {
        self.failures
            .lock()
            .map(|failures| failures.is_empty())
            .unwrap_or(false)
    }

    /// Panic with every recorded failure if there are any
    #[track_caller]
    pub fn assert_clean(&self) {
        let failures = self.failures();
        if !failures.is_empty() {
            panic!(
                "{} assertion(s) failed:\n{}",
                failures.len(),
                failures.join("\n")
            );
        }
    }
}

impl Reporter for Recorder {
    fn error(&self, message: &str) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.push(message.to_string());
        }
    }
}

/// Check that `got` and `want` hold the same elements in any order
///
/// Returns whether they do. A classification error or a mismatch report is
/// passed to `reporter`; whether that stops the test is up to the reporter.
#[track_caller]
pub fn has_same_elements<R, G, W>(reporter: &R, got: G, want: W) -> bool
where
    R: Reporter + ?Sized,
    G: Container,
    W: Container<Item = G::Item>,
{
    match testkit_check::has_same_elements(got, want) {
        Ok(()) => true,
        Err(err) => {
            debug!(error = %err, "Assertion failed: containers differ");
            reporter.error(&err.to_string());
            false
        }
    }
}

/// Assert that two containers hold the same elements in any order
///
/// Panics with the mismatch report when they do not.
#[macro_export]
macro_rules! assert_same_elements {
    ($got:expr, $want:expr $(,)?) => {
        $crate::has_same_elements(&$crate::Panicking, $got, $want)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_collects_failures() {
        let recorder = Recorder::new();
        assert!(recorder.is_clean());

        recorder.error("first");
        recorder.error("second");

        assert!(!recorder.is_clean());
        assert_eq!(recorder.failures(), vec!["first", "second"]);
    }

    #[test]
    fn test_recorder_assert_clean_passes_when_empty() {
        Recorder::new().assert_clean();
    }

    #[test]
    #[should_panic(expected = "2 assertion(s) failed:\na\nb")]
    fn test_recorder_assert_clean_panics() {
        let recorder = Recorder::new();
        recorder.error("a");
        recorder.error("b");
        recorder.assert_clean();
    }

    #[test]
    #[should_panic(expected = "boom")]
    fn test_panicking_reporter() {
        Panicking.error("boom");
    }

    #[test]
    fn test_success_reports_nothing() {
        let recorder = Recorder::new();
        assert!(has_same_elements(&recorder, vec![1, 2, 3], vec![3, 2, 1]));
        assert!(has_same_elements(&recorder, [1, 1, 2], vec![1, 2, 1]));
        recorder.assert_clean();
    }

    #[test]
    fn test_failures_are_reported_not_raised() {
        let recorder = Recorder::new();
        assert!(!has_same_elements(&recorder, vec![1, 2, 3], vec![1, 2, 3, 4]));
        assert!(!has_same_elements(&recorder, Erased(vec!["a"]), Erased(vec![1])));

        let failures = recorder.failures();
        assert_eq!(failures.len(), 2);
        assert!(failures[0].contains("missing elements: [(i32) 4]"));
        assert_eq!(
            failures[1],
            "got type 'Vec<&str>', wanted type 'Vec<i32>': contained types do not match"
        );
    }

    #[test]
    fn test_reporter_behind_reference() {
        let recorder = Recorder::new();
        let by_ref: &dyn Reporter = &recorder;
        assert!(!has_same_elements(by_ref, vec![1], vec![2]));
        assert_eq!(recorder.failures().len(), 1);
    }
}
