//! The subsequence matcher.
//!
//! Decides whether a query word embeds into a candidate in order, under
//! case- and diacritic-insensitive character equivalence, and computes the
//! ranking features of the embedding. Two walks over the candidate feed the
//! [`MatchResult`]:
//!
//! 1. an earliest-match walk that settles `is_subsequence`, `prefix`,
//!    `case_exact` and `first_char_same` from the leftmost embedding;
//! 2. a boundary-preferring walk that accumulates the word-boundary utility,
//!    deferring a hit to a later word-boundary occurrence of the same
//!    character when the rest of the query still fits behind it.
//!
//! The second walk is a greedy approximation with a single look-ahead; it is
//! not a full optimizer over all embeddings, but it finds the boundary hits
//! that matter for identifier-style candidates (camelCase humps, underscore
//! and punctuation seams).

use std::sync::Arc;

use crate::candidate::Candidate;
use crate::result::MatchResult;
use crate::unicode::{Character, Word};

/// Utility contributed by a query character that lands on a word boundary.
const WORD_BOUNDARY_HIT: u32 = 10;
/// Utility contributed by any other query character hit.
const PLAIN_HIT: u32 = 1;

/// Score `query` against `candidate`.
///
/// The caller is expected to have run the byte-presence fast reject already;
/// a query that fails it simply produces a non-match here at full cost.
pub(crate) fn query_match_result(candidate: &Arc<Candidate>, query: &Word) -> MatchResult {
    let query_chars = query.characters();
    let candidate_chars = candidate.word().characters();

    // The empty query matches everything, exactly.
    if query_chars.is_empty() {
        return MatchResult::new(Arc::clone(candidate), true, false, 0.0, 0, true, true);
    }

    let Some(positions) = earliest_embedding(query_chars, candidate_chars) else {
        return MatchResult::non_match(Arc::clone(candidate));
    };

    // Leftmost embedding of a subsequence is contiguous-from-zero iff its
    // last position is q-1.
    let is_prefix = positions[positions.len() - 1] == positions.len() - 1;

    let is_case_exact = positions
        .iter()
        .enumerate()
        .all(|(i, &j)| query_chars[i].normal() == candidate_chars[j].normal());

    let first_char_same = positions[0] == 0 && candidate_chars[0].is_base();

    let ratio = query_chars.len() as f64 / candidate_chars.len() as f64;

    let word_boundary_utility = boundary_utility(query_chars, candidate_chars);

    MatchResult::new(
        Arc::clone(candidate),
        true,
        first_char_same,
        ratio,
        word_boundary_utility,
        is_prefix,
        is_case_exact,
    )
}

/// Leftmost positions at which `query` embeds into `candidate`, or `None`
/// when it is not a subsequence.
fn earliest_embedding(query: &[Arc<Character>], candidate: &[Arc<Character>]) -> Option<Vec<usize>> {
    let mut positions = Vec::with_capacity(query.len());
    let mut next = 0;
    for query_char in query {
        let found = (next..candidate.len()).find(|&j| query_char.matches(&candidate[j]))?;
        positions.push(found);
        next = found + 1;
    }
    Some(positions)
}

/// Whether `query[from..]` embeds into `candidate[start..]`.
fn embeds(query: &[Arc<Character>], from: usize, candidate: &[Arc<Character>], start: usize) -> bool {
    let mut next = start;
    for query_char in &query[from..] {
        match (next..candidate.len()).find(|&j| query_char.matches(&candidate[j])) {
            Some(found) => next = found + 1,
            None => return false,
        }
    }
    true
}

/// Whether candidate position `j` starts a word.
///
/// A word starts at the first character, after punctuation, at a camelCase
/// hump (lowercase then uppercase), and at a non-letter/letter seam.
fn is_word_boundary(candidate: &[Arc<Character>], j: usize) -> bool {
    if j == 0 {
        return true;
    }
    let previous = &candidate[j - 1];
    let current = &candidate[j];
    (previous.is_punctuation() && !current.is_punctuation())
        || (previous.is_letter() && !previous.is_uppercase() && current.is_uppercase())
        || (!previous.is_letter() && current.is_letter())
}

/// Accumulate the word-boundary utility of the best greedy embedding.
///
/// Each query character takes its earliest match, except that a hit on a
/// non-boundary position defers to the earliest later *boundary* occurrence
/// of the same character, provided the remaining query still embeds after
/// it. The caller guarantees the query is a subsequence of the candidate.
fn boundary_utility(query: &[Arc<Character>], candidate: &[Arc<Character>]) -> u32 {
    let mut utility = 0;
    let mut next = 0;
    for (i, query_char) in query.iter().enumerate() {
        let Some(earliest) = (next..candidate.len()).find(|&j| query_char.matches(&candidate[j]))
        else {
            break;
        };

        let mut pick = earliest;
        if !is_word_boundary(candidate, pick) {
            let deferred = (pick + 1..candidate.len()).find(|&j| {
                is_word_boundary(candidate, j) && query_char.matches(&candidate[j])
            });
            if let Some(boundary) = deferred {
                if embeds(query, i + 1, candidate, boundary + 1) {
                    pick = boundary;
                }
            }
        }

        utility += if is_word_boundary(candidate, pick) {
            WORD_BOUNDARY_HIT
        } else {
            PLAIN_HIT
        };
        next = pick + 1;
    }
    utility
}
