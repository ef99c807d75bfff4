//! The scored outcome of matching one candidate against one query.
//!
//! A [`MatchResult`] carries the ranking features the matcher computed plus a
//! shared handle to the candidate it scored. Results order by *ranking*: the
//! best match compares least, so an ascending sort puts the best completions
//! first.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::candidate::Candidate;

/// Two ratios within this tolerance count as equal when ordering results.
const RATIO_EPSILON: f64 = 1e-8;

/// Ranking features for one (query, candidate) pair.
///
/// # Ordering
///
/// Results form a total order over their fields, in decreasing priority:
///
/// 1. subsequence matches before non-matches;
/// 2. matches whose first query character hit the candidate's first (base)
///    character before those that did not;
/// 3. higher query-length/candidate-length ratio first (with a small epsilon
///    treated as a tie);
/// 4. higher word-boundary utility first;
/// 5. case-folded prefix matches first;
/// 6. case-exact matches first;
/// 7. finally, lexicographic order of the candidates' folded-case text.
///
/// The best result compares `Less`, so `sort()` yields best-first order.
#[derive(Debug, Clone)]
pub struct MatchResult {
    candidate: Arc<Candidate>,
    is_subsequence: bool,
    first_char_same: bool,
    ratio: f64,
    word_boundary_utility: u32,
    is_prefix: bool,
    is_case_exact: bool,
}

impl MatchResult {
    pub(crate) fn new(
        candidate: Arc<Candidate>,
        is_subsequence: bool,
        first_char_same: bool,
        ratio: f64,
        word_boundary_utility: u32,
        is_prefix: bool,
        is_case_exact: bool,
    ) -> Self {
        Self {
            candidate,
            is_subsequence,
            first_char_same,
            ratio,
            word_boundary_utility,
            is_prefix,
            is_case_exact,
        }
    }

    /// A result for a candidate the query does not embed into.
    pub(crate) fn non_match(candidate: Arc<Candidate>) -> Self {
        Self::new(candidate, false, false, 0.0, 0, false, false)
    }

    /// The candidate this result scored.
    pub fn candidate(&self) -> &Arc<Candidate> {
        &self.candidate
    }

    /// The candidate's original text.
    pub fn text(&self) -> &str {
        self.candidate.text()
    }

    /// Whether the query is a subsequence of the candidate under
    /// case- and diacritic-insensitive equivalence.
    pub fn is_subsequence(&self) -> bool {
        self.is_subsequence
    }

    /// Whether the first query character matched the candidate's first
    /// character, and that character is a base character.
    pub fn first_char_same(&self) -> bool {
        self.first_char_same
    }

    /// Query length divided by candidate length (0 for non-matches and for
    /// the empty query).
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Accumulated word-boundary score of the match: +10 per query character
    /// that landed on a word boundary of the candidate, +1 otherwise.
    pub fn word_boundary_utility(&self) -> u32 {
        self.word_boundary_utility
    }

    /// Whether the query matched the leading characters of the candidate,
    /// case-folded.
    pub fn is_prefix(&self) -> bool {
        self.is_prefix
    }

    /// Whether every matched character pair agreed without case folding.
    pub fn is_case_exact(&self) -> bool {
        self.is_case_exact
    }

    fn cmp_ratio(&self, other: &Self) -> Ordering {
        if (self.ratio - other.ratio).abs() <= RATIO_EPSILON {
            return Ordering::Equal;
        }
        // Higher ratio ranks earlier. The ratios are always finite, so an
        // indeterminate comparison is treated as a tie.
        other.ratio.partial_cmp(&self.ratio).unwrap_or(Ordering::Equal)
    }
}

impl Ord for MatchResult {
    fn cmp(&self, other: &Self) -> Ordering {
        // `true` ranks earlier for every boolean feature, hence the flipped
        // operands; the final tie-break is plain lexicographic order.
        other
            .is_subsequence
            .cmp(&self.is_subsequence)
            .then_with(|| other.first_char_same.cmp(&self.first_char_same))
            .then_with(|| self.cmp_ratio(other))
            .then_with(|| other.word_boundary_utility.cmp(&self.word_boundary_utility))
            .then_with(|| other.is_prefix.cmp(&self.is_prefix))
            .then_with(|| other.is_case_exact.cmp(&self.is_case_exact))
            .then_with(|| {
                self.candidate
                    .word()
                    .folded_case()
                    .cmp(other.candidate.word().folded_case())
            })
    }
}

impl PartialOrd for MatchResult {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for MatchResult {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MatchResult {}
