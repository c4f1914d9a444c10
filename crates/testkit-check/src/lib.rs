//! Order-insensitive container comparison
//!
//! This crate decides whether two containers hold the same multiset of
//! elements and, when they do not, explains exactly which elements are
//! missing and which are extra.
//!
//! - [`classify`] gates which container shapes may be compared at all
//! - [`extract`] materializes arrays and vectors, and drains receivers
//!   without blocking
//! - [`match_elements`] cancels equal elements pairwise, duplicates included
//! - [`format_mismatch`] renders the diagnostic report
//!
//! Element types are checked at compile time: both sides of [`compare`] must
//! yield the same [`Container::Item`], which may borrow local data. Containers
//! of different element types can still be compared through [`Erased`], in
//! which case [`classify`] rejects a type mismatch at runtime.
//!
//! # Example
//!
//! ```
//! use testkit_check::has_same_elements;
//!
//! assert!(has_same_elements(vec![1, 2, 1, 2], [2, 2, 1, 1]).is_ok());
//!
//! let err = has_same_elements(vec![1, 1, 1], vec![1, 2, 2]).unwrap_err();
//! assert!(err.to_string().contains("missing elements: [(i32) 2, (i32) 2]"));
//! ```

mod classify;
mod config;
mod container;
mod element;
mod error;
mod extract;
mod format;
mod multiset;

pub use classify::classify;
pub use config::{FormatOptions, DEFAULT_MAX_LINE_WIDTH, MAX_LINE_WIDTH_VAR};
pub use container::{
    Container, ContainerDescriptor, ContainerShape, Erased, IneligibleKind, Readable,
};
pub use element::{short_type_name, Element, ElementType, Item};
pub use error::{CheckError, ClassificationError, ConfigError, ConfigResult, Side};
pub use extract::{drain, extract, ElementSequence, TryReceive};
pub use format::{format_mismatch, format_nil_mismatch, listings, quote, stringify, typed};
pub use multiset::{match_elements, MatchResult};

use tracing::debug;

/// Why two containers did not compare equal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Human-readable explanation, ready to attach to a test failure
    pub report: String,
    /// Rendered want elements with no counterpart in got
    pub missing: Vec<String>,
    /// Rendered got elements with no counterpart in want
    pub extra: Vec<String>,
}

/// Result of comparing two eligible containers
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    Equivalent,
    Mismatch(Mismatch),
}

impl Outcome {
    pub fn is_equivalent(&self) -> bool {
        matches!(self, Outcome::Equivalent)
    }
}

/// Compare two containers without regard to order
///
/// `got` may be an array, a vector or slice, or a receiver; a receiver is
/// drained of whatever is available right now. `want` must be an array or a
/// vector or slice with the same element type. A nil sequence only matches
/// another nil sequence.
pub fn compare<G, W>(
    mut got: G,
    mut want: W,
    options: &FormatOptions,
) -> Result<Outcome, ClassificationError>
where
    G: Container,
    W: Container<Item = G::Item>,
{
    let got_descriptor = got.describe();
    let want_descriptor = want.describe();
    let element_type = classify(&got_descriptor, &want_descriptor)?;

    let got_elements = extract(&mut got, &got_descriptor);
    let want_elements = extract(&mut want, &want_descriptor);

    let outcome = match (got_elements.present(), want_elements.present()) {
        (None, None) => Outcome::Equivalent,
        (Some(got), Some(want)) => compare_elements(&element_type, got, want, options),
        (got, want) => Outcome::Mismatch(Mismatch {
            report: format_nil_mismatch(
                &element_type,
                &got_descriptor.type_name(),
                got,
                &want_descriptor.type_name(),
                want,
                options,
            ),
            missing: Vec::new(),
            extra: Vec::new(),
        }),
    };

    debug!(
        element_type = %element_type,
        got_len = got_elements.len(),
        want_len = want_elements.len(),
        equivalent = outcome.is_equivalent(),
        "Compared containers"
    );

    Ok(outcome)
}

/// Compare two slices without regard to order
///
/// The element type is known statically, so there is nothing to classify and
/// no nil to consider.
pub fn compare_slices<T: Item>(got: &[T], want: &[T], options: &FormatOptions) -> Outcome {
    compare_elements(&ElementType::of::<T>(), got, want, options)
}

/// Compare two containers, reading formatting options from the environment
///
/// Both a classification failure and a mismatch are returned as errors, which
/// suits `?` in tests that return `Result`.
pub fn has_same_elements<G, W>(got: G, want: W) -> Result<(), CheckError>
where
    G: Container,
    W: Container<Item = G::Item>,
{
    match compare(got, want, &FormatOptions::load())? {
        Outcome::Equivalent => Ok(()),
        Outcome::Mismatch(mismatch) => Err(CheckError::NotEquivalent(mismatch)),
    }
}

fn compare_elements<T: Item>(
    element_type: &ElementType,
    got: &[T],
    want: &[T],
    options: &FormatOptions,
) -> Outcome {
    let result = match_elements(got, want);
    if result.is_equivalent() {
        return Outcome::Equivalent;
    }

    Outcome::Mismatch(Mismatch {
        report: format_mismatch(element_type, got, want, &result, options),
        missing: result
            .missing()
            .iter()
            .map(|e| typed(element_type, *e))
            .collect(),
        extra: result
            .extra()
            .iter()
            .map(|e| typed(element_type, *e))
            .collect(),
    })
}
