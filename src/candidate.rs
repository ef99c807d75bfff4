//! Interned completion candidates.
//!
//! A [`Candidate`] is an identifier string analyzed once -- segmented,
//! normalized, byte-indexed -- and shared from then on. The process-wide
//! [`candidate_repository`] deduplicates candidates by their exact source
//! text, so the identifier database and the filter surface hand around
//! cheap `Arc` handles instead of re-analyzing strings per query.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::error::Result;
use crate::matcher;
use crate::repository::{Interned, Repository};
use crate::result::MatchResult;
use crate::unicode::Word;

static REPOSITORY: Lazy<Repository<Candidate>> = Lazy::new(Repository::new);

/// The process-wide [`Candidate`] interner, keyed by the exact identifier
/// text.
pub fn candidate_repository() -> &'static Repository<Candidate> {
    &REPOSITORY
}

/// Intern one candidate in the process-wide repository.
pub(crate) fn intern_candidate(text: &str) -> Arc<Candidate> {
    REPOSITORY.get_or_insert_with(text, || Candidate::new(text))
}

/// An identifier prepared for matching.
///
/// # Examples
///
/// ```
/// use fuzzident::{Candidate, unicode::Word};
/// use std::sync::Arc;
///
/// let candidate = Arc::new(Candidate::new("FooBar"));
/// let query = Word::new("fb");
///
/// assert!(candidate.contains_bytes(&query));
/// let result = candidate.query_match_result(&query);
/// assert!(result.is_subsequence());
/// ```
#[derive(Debug, Clone)]
pub struct Candidate {
    word: Word,
}

impl Candidate {
    /// Analyze an identifier string.
    pub fn new(text: &str) -> Self {
        Self {
            word: Word::new(text),
        }
    }

    /// The identifier text this candidate was built from.
    pub fn text(&self) -> &str {
        self.word.text()
    }

    /// The analyzed word backing this candidate.
    pub fn word(&self) -> &Word {
        &self.word
    }

    /// Whether the candidate was built from the empty string.
    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }

    /// Fast reject: whether every byte of the query's folded-case text also
    /// occurs in this candidate's folded-case text.
    ///
    /// A `false` here proves the query cannot be a subsequence; a `true`
    /// proves nothing and must be followed by
    /// [`query_match_result`](Candidate::query_match_result).
    pub fn contains_bytes(&self, query: &Word) -> bool {
        self.word.contains_bytes(query)
    }

    /// Run the full subsequence match and compute ranking features.
    pub fn query_match_result(self: &Arc<Self>, query: &Word) -> MatchResult {
        matcher::query_match_result(self, query)
    }
}

impl Interned for Candidate {
    fn from_text(text: &str) -> Result<Self> {
        Ok(Self::new(text))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.text() == other.text()
    }
}

impl Eq for Candidate {}

impl Hash for Candidate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text().hash(state);
    }
}
