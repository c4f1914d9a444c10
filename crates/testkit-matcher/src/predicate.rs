use crate::Matcher;
use std::fmt;

/// Matcher backed by a named closure
pub struct PredicateMatcher<F> {
    name: String,
    test: F,
}

impl<F> PredicateMatcher<F> {
    pub fn new(name: impl Into<String>, test: F) -> Self {
        Self {
            name: name.into(),
            test,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T: ?Sized, F: Fn(&T) -> bool> Matcher<T> for PredicateMatcher<F> {
    fn matches(&self, value: &T) -> bool {
        (self.test)(value)
    }
}

impl<F> fmt::Display for PredicateMatcher<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PredicateMatcher({})", self.name)
    }
}

impl<F> fmt::Debug for PredicateMatcher<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateMatcher")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_matcher() {
        let matcher = PredicateMatcher::new("string value tester", |s: &str| s == "matched!");

        assert!(!matcher.matches("nope"));
        assert!(matcher.matches("matched!"));
        assert_eq!(matcher.to_string(), "PredicateMatcher(string value tester)");
    }

    #[test]
    fn test_predicate_over_sized_values() {
        let positive = PredicateMatcher::new("positive", |n: &i64| *n > 0);
        assert!(positive.matches(&3i64));
        assert!(!positive.matches(&-3i64));
        assert_eq!(positive.name(), "positive");
    }
}
