use crate::Matcher;
use std::fmt;
use std::sync::Mutex;

/// Matcher that records the last value it accepted
///
/// With no inner matcher every value is accepted. With one, only values the
/// inner matcher accepts are recorded; a rejected value leaves the previous
/// capture in place.
pub struct ValueCaptor<T> {
    must_match: Option<Box<dyn Matcher<T> + Send + Sync>>,
    value: Mutex<Option<T>>,
}

impl<T: Clone> ValueCaptor<T> {
    pub fn capture_any() -> Self {
        Self {
            must_match: None,
            value: Mutex::new(None),
        }
    }

    pub fn capture_matching<M>(matcher: M) -> Self
    where
        M: Matcher<T> + Send + Sync + 'static,
    {
        Self {
            must_match: Some(Box::new(matcher)),
            value: Mutex::new(None),
        }
    }

    /// The most recently captured value
    pub fn value(&self) -> Option<T> {
        self.value.lock().ok().and_then(|value| value.clone())
    }

    /// Remove and return the captured value
    pub fn take(&self) -> Option<T> {
        self.value.lock().ok().and_then(|mut value| value.take())
    }
}

impl<T: Clone> Matcher<T> for ValueCaptor<T> {
    fn matches(&self, value: &T) -> bool {
        if let Some(must_match) = &self.must_match {
            if !must_match.matches(value) {
                return false;
            }
        }

        if let Ok(mut captured) = self.value.lock() {
            *captured = Some(value.clone());
        }
        true
    }
}

impl<T> fmt::Display for ValueCaptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.must_match {
            Some(must_match) => write!(f, "valueCaptor(mustMatch: {})", must_match),
            None => f.write_str("valueCaptor(mustMatch: none)"),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ValueCaptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueCaptor")
            .field("must_match", &self.must_match.as_ref().map(|m| m.to_string()))
            .field("value", &self.value)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PredicateMatcher;

    #[test]
    fn test_capture_any() {
        let captor: ValueCaptor<String> = ValueCaptor::capture_any();
        assert_eq!(captor.value(), None);

        assert!(captor.matches(&"first".to_string()));
        assert!(captor.matches(&"second".to_string()));
        assert_eq!(captor.value().as_deref(), Some("second"));
        assert_eq!(captor.to_string(), "valueCaptor(mustMatch: none)");
    }

    #[test]
    fn test_capture_matching() {
        let even = PredicateMatcher::new("even", |n: &u32| n % 2 == 0);
        let captor: ValueCaptor<u32> = ValueCaptor::capture_matching(even);

        assert!(captor.matches(&4));
        assert!(!captor.matches(&5));
        assert_eq!(captor.value(), Some(4));
        assert_eq!(
            captor.to_string(),
            "valueCaptor(mustMatch: PredicateMatcher(even))"
        );
    }

    #[test]
    fn test_take_clears_capture() {
        let captor: ValueCaptor<Vec<i32>> = ValueCaptor::capture_any();
        assert!(captor.matches(&vec![1, 2]));
        assert_eq!(captor.take(), Some(vec![1, 2]));
        assert_eq!(captor.take(), None);
    }
}
