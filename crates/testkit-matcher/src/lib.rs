//! Argument matchers for mock expectations
//!
//! A [`Matcher`] decides whether an argument passed to a mock is acceptable and
//! describes itself for failure messages.

mod captor;
mod predicate;
mod same_elements;

pub use captor::ValueCaptor;
pub use predicate::PredicateMatcher;
pub use same_elements::SameElements;

use std::fmt;

/// Decides whether a value is acceptable
pub trait Matcher<T: ?Sized>: fmt::Display {
    fn matches(&self, value: &T) -> bool;
}

impl<T: ?Sized, M: Matcher<T> + ?Sized> Matcher<T> for &M {
    fn matches(&self, value: &T) -> bool {
        (**self).matches(value)
    }
}

impl<T: ?Sized, M: Matcher<T> + ?Sized> Matcher<T> for Box<M> {
    fn matches(&self, value: &T) -> bool {
        (**self).matches(value)
    }
}
