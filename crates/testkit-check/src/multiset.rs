//! Multiset matching by greedy pairwise cancellation
//!
//! Each got element cancels the first still-unmatched want element equal to
//! it. Equal elements are interchangeable, so the first available partner
//! never blocks a later pairing and the surviving counts are exact: duplicates
//! cancel one for one rather than as a set.

/// Outcome of matching two element sequences as bags
#[derive(Debug, PartialEq)]
pub struct MatchResult<'a, T> {
    matched: usize,
    extra: Vec<&'a T>,
    missing: Vec<&'a T>,
}

impl<'a, T> MatchResult<'a, T> {
    /// Number of got/want pairs that cancelled
    pub fn matched(&self) -> usize {
        self.matched
    }

    /// Got elements with no counterpart, in got order
    pub fn extra(&self) -> &[&'a T] {
        &self.extra
    }

    /// Want elements with no counterpart, in want order
    pub fn missing(&self) -> &[&'a T] {
        &self.missing
    }

    /// True when every element on both sides cancelled
    pub fn is_equivalent(&self) -> bool {
        self.extra.is_empty() && self.missing.is_empty()
    }
}

/// Match `got` against `want` without regard to order
///
/// O(n·m) equality checks.
pub fn match_elements<'a, T: PartialEq>(got: &'a [T], want: &'a [T]) -> MatchResult<'a, T> {
    let mut got_matched = vec![false; got.len()];
    let mut want_matched = vec![false; want.len()];
    let mut matched = 0;

    for (got_index, g) in got.iter().enumerate() {
        let partner = want
            .iter()
            .enumerate()
            .find(|&(want_index, w)| !want_matched[want_index] && g == w)
            .map(|(want_index, _)| want_index);

        if let Some(want_index) = partner {
            want_matched[want_index] = true;
            got_matched[got_index] = true;
            matched += 1;
        }
    }

    let extra = survivors(got, &got_matched);
    let missing = survivors(want, &want_matched);

    MatchResult {
        matched,
        extra,
        missing,
    }
}

fn survivors<'a, T>(elements: &'a [T], matched: &[bool]) -> Vec<&'a T> {
    elements
        .iter()
        .zip(matched)
        .filter(|(_, &matched)| !matched)
        .map(|(element, _)| element)
        .collect()
}
