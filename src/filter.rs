//! Filter-and-sort over arbitrary candidate collections.
//!
//! This is the stateless front door of the matcher: hand it a slice of
//! items, a query, and a cap, and get back references to the matching items
//! in ranking order. Items are either string-like ([`AsCandidateText`]) or
//! structured values paired with an extractor closure
//! ([`filter_and_sort_candidates_by`]) that picks the text to match on --
//! the equivalent of naming a candidate property.
//!
//! Candidate strings are interned through the process-wide repository, so
//! repeated calls over the same collection skip re-analysis.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::sync::Arc;

use crate::candidate::{Candidate, intern_candidate};
use crate::result::MatchResult;
use crate::sort::partial_sort;
use crate::unicode::Word;

/// String-like items that can be matched directly, without an extractor.
///
/// # Examples
///
/// ```
/// use fuzzident::AsCandidateText;
///
/// let owned = String::from("hello");
/// assert_eq!(owned.as_candidate_text(), "hello");
/// ```
pub trait AsCandidateText {
    /// The text to match this item on.
    fn as_candidate_text(&self) -> &str;
}

impl AsCandidateText for String {
    fn as_candidate_text(&self) -> &str {
        self.as_str()
    }
}

impl AsCandidateText for str {
    fn as_candidate_text(&self) -> &str {
        self
    }
}

impl AsCandidateText for &str {
    fn as_candidate_text(&self) -> &str {
        self
    }
}

impl AsCandidateText for Cow<'_, str> {
    fn as_candidate_text(&self) -> &str {
        self.as_ref()
    }
}

/// An item paired with its score and input position, ordered best-first
/// with the input position as the final tie-break.
struct RankedCandidate<'a, T> {
    result: MatchResult,
    item: &'a T,
    index: usize,
}

impl<T> RankedCandidate<'_, T> {
    fn cmp_ranked(&self, other: &Self) -> Ordering {
        self.result
            .cmp(&other.result)
            .then_with(|| self.index.cmp(&other.index))
    }
}

impl<T> PartialEq for RankedCandidate<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp_ranked(other) == Ordering::Equal
    }
}

impl<T> Eq for RankedCandidate<'_, T> {}

impl<T> Ord for RankedCandidate<'_, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_ranked(other)
    }
}

impl<T> PartialOrd for RankedCandidate<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Rank string-like `candidates` against `query` and return the matches in
/// ranking order.
///
/// `max_candidates == 0` means no cap. Non-matches and empty candidates are
/// filtered out; everything else comes back as a reference into the input
/// slice, best match first.
///
/// # Examples
///
/// ```
/// use fuzzident::filter_and_sort_candidates;
///
/// let candidates = ["foo_bar", "fbr", "barfoo", "FooBar"];
/// let ranked = filter_and_sort_candidates(&candidates, "fb", 0);
/// assert_eq!(ranked, [&"fbr", &"FooBar", &"foo_bar"]);
/// ```
pub fn filter_and_sort_candidates<'a, T: AsCandidateText>(
    candidates: &'a [T],
    query: &str,
    max_candidates: usize,
) -> Vec<&'a T> {
    filter_and_sort_candidates_by(candidates, T::as_candidate_text, query, max_candidates)
}

/// Rank structured `candidates` against `query`, matching on the text that
/// `text_of` extracts from each item.
///
/// The structured equivalent of [`filter_and_sort_candidates`]: the
/// extractor plays the role of a candidate property name, and the original
/// items come back untouched in ranking order.
///
/// # Examples
///
/// ```
/// use fuzzident::filter_and_sort_candidates_by;
///
/// struct Completion {
///     insertion_text: &'static str,
/// }
///
/// let completions = [
///     Completion { insertion_text: "map_reduce" },
///     Completion { insertion_text: "mp" },
/// ];
/// let ranked =
///     filter_and_sort_candidates_by(&completions, |c| c.insertion_text, "mp", 1);
/// assert_eq!(ranked.len(), 1);
/// assert_eq!(ranked[0].insertion_text, "mp");
/// ```
pub fn filter_and_sort_candidates_by<'a, T, F>(
    candidates: &'a [T],
    text_of: F,
    query: &str,
    max_candidates: usize,
) -> Vec<&'a T>
where
    F: Fn(&T) -> &str,
{
    let interned: Vec<Arc<Candidate>> = candidates
        .iter()
        .map(|item| intern_candidate(text_of(item)))
        .collect();

    let query = Word::new(query);

    let mut ranked: Vec<RankedCandidate<'a, T>> = Vec::new();
    for (index, (item, candidate)) in candidates.iter().zip(&interned).enumerate() {
        if candidate.is_empty() || !candidate.contains_bytes(&query) {
            continue;
        }
        let result = candidate.query_match_result(&query);
        if result.is_subsequence() {
            ranked.push(RankedCandidate {
                result,
                item,
                index,
            });
        }
    }

    partial_sort(&mut ranked, max_candidates);
    ranked.into_iter().map(|ranked| ranked.item).collect()
}
