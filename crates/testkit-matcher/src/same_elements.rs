use crate::Matcher;
use std::fmt;
use testkit_check::{compare_slices, listings, typed, ElementType, FormatOptions, Item, Outcome};
use tracing::debug;

/// Matches a sequence holding the same elements as `want`, in any order
#[derive(Debug, Clone)]
pub struct SameElements<T> {
    want: Vec<T>,
    options: FormatOptions,
}

impl<T: Item> SameElements<T> {
    pub fn new(want: impl IntoIterator<Item = T>) -> Self {
        Self {
            want: want.into_iter().collect(),
            options: FormatOptions::load(),
        }
    }

    pub fn with_options(mut self, options: FormatOptions) -> Self {
        self.options = options;
        self
    }

    /// Why `got` does not match, or `None` when it does
    pub fn explain(&self, got: &[T]) -> Option<String> {
        match compare_slices(got, &self.want, &self.options) {
            Outcome::Equivalent => None,
            Outcome::Mismatch(mismatch) => Some(mismatch.report),
        }
    }
}

impl<T: Item> Matcher<[T]> for SameElements<T> {
    fn matches(&self, value: &[T]) -> bool {
        match self.explain(value) {
            None => true,
            Some(report) => {
                debug!(matcher = %self, %report, "Argument rejected");
                false
            }
        }
    }
}

impl<T: Item> Matcher<Vec<T>> for SameElements<T> {
    fn matches(&self, value: &Vec<T>) -> bool {
        Matcher::<[T]>::matches(self, value.as_slice())
    }
}

impl<T: Item> fmt::Display for SameElements<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let element_type = ElementType::of::<T>();
        let want: Vec<String> = self.want.iter().map(|item| typed(&element_type, item)).collect();
        let listing = listings(&[want], &self.options).remove(0);
        write!(f, "SameElements({})", listing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher<T: Item>(want: Vec<T>) -> SameElements<T> {
        SameElements::new(want).with_options(FormatOptions::default())
    }

    #[test]
    fn test_matches_any_order() {
        let m = matcher(vec!["a", "b", "b"]);
        assert!(m.matches(&["b", "a", "b"][..]));
        assert!(m.matches(&vec!["b", "b", "a"]));
        assert!(!m.matches(&["a", "b"][..]));
        assert!(!m.matches(&vec!["a", "a", "b"]));
    }

    #[test]
    fn test_explain() {
        let m = matcher(vec![1, 2]);
        assert_eq!(m.explain(&[2, 1]), None);
        assert_eq!(
            m.explain(&[2, 3]).as_deref(),
            Some(
                "got [(i32) 2, (i32) 3] (len 2), wanted [(i32) 1, (i32) 2] (len 2); \
                 missing elements: [(i32) 1]; extra elements: [(i32) 3]"
            )
        );
    }

    #[test]
    fn test_borrowed_elements() {
        let words = ["alpha".to_string(), "beta".to_string()];
        let m = matcher(vec![&words[0], &words[1]]);

        assert!(m.matches(&vec![&words[1], &words[0]]));
        assert!(!m.matches(&[&words[0]][..]));
        assert_eq!(
            m.to_string(),
            "SameElements([(&String) `alpha`, (&String) `beta`])"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            matcher(vec!["x".to_string()]).to_string(),
            "SameElements([(String) `x`])"
        );
        assert_eq!(matcher(Vec::<u8>::new()).to_string(), "SameElements([])");
    }
}
