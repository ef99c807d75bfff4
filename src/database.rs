//! The concurrent identifier database.
//!
//! Stores which identifiers were seen in which file, partitioned by
//! filetype: `filetype -> filepath -> set of candidates`. Writers update one
//! file's set at a time; queries walk every set of a filetype and rank the
//! union against the query word. The database holds shared handles into the
//! process-wide candidate repository, which owns candidate lifetimes --
//! clearing a file drops that file's references only.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::candidate::{Candidate, intern_candidate};
use crate::result::MatchResult;
use crate::sort::partial_sort;
use crate::unicode::Word;

/// Identifiers grouped by filetype, then by the file they came from.
///
/// The exchange format of the bulk database operations and of the tags-file
/// parser.
pub type FiletypeIdentifierMap = HashMap<String, HashMap<String, Vec<String>>>;

type CandidateSet = HashSet<Arc<Candidate>>;
type FileToCandidates = HashMap<String, CandidateSet>;

/// Thread-safe store of per-(filetype, file) identifier sets.
///
/// One mutex guards the outer filetype map; each filetype's file map sits
/// behind its own lock so queries for one filetype snapshot and score
/// without blocking writers of another. Candidates are immutable once
/// interned and are read without synchronization.
///
/// # Examples
///
/// ```
/// use fuzzident::IdentifierDatabase;
///
/// let database = IdentifierDatabase::new();
/// database.add_identifiers_for_file(["foo", "foobar"], "cpp", "/src/a.cpp");
///
/// let results = database.results_for_query_and_type("fo", "cpp", 0);
/// assert_eq!(results.len(), 2);
/// assert_eq!(results[0].text(), "foo");
/// ```
pub struct IdentifierDatabase {
    filetypes: Mutex<HashMap<String, Arc<Mutex<FileToCandidates>>>>,
}

impl IdentifierDatabase {
    /// Create an empty database.
    pub fn new() -> Self {
        Self {
            filetypes: Mutex::new(HashMap::new()),
        }
    }

    /// Shared handle to the file map of `filetype`, created on demand.
    fn files_for_filetype(&self, filetype: &str) -> Arc<Mutex<FileToCandidates>> {
        let mut filetypes = self.filetypes.lock();
        match filetypes.get(filetype) {
            Some(files) => Arc::clone(files),
            None => {
                let files = Arc::new(Mutex::new(FileToCandidates::new()));
                filetypes.insert(filetype.to_owned(), Arc::clone(&files));
                files
            }
        }
    }

    /// Add every identifier of a `filetype -> filepath -> identifiers` map.
    pub fn add_identifiers(&self, identifiers: &FiletypeIdentifierMap) {
        for (filetype, files) in identifiers {
            for (filepath, idents) in files {
                self.add_identifiers_for_file(idents.iter().map(String::as_str), filetype, filepath);
            }
        }
    }

    /// Add identifiers seen in one file.
    ///
    /// Identifiers are interned through the candidate repository and stored
    /// with set semantics, so re-adding is idempotent. Empty identifier
    /// strings are dropped.
    pub fn add_identifiers_for_file<I>(&self, identifiers: I, filetype: &str, filepath: &str)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let files = self.files_for_filetype(filetype);
        let mut files = files.lock();
        let set = files.entry(filepath.to_owned()).or_default();

        let mut added = 0usize;
        for identifier in identifiers {
            let identifier = identifier.as_ref();
            if identifier.is_empty() {
                continue;
            }
            if set.insert(intern_candidate(identifier)) {
                added += 1;
            }
        }
        debug!(filetype, filepath, added, "added identifiers");
    }

    /// Forget every identifier stored for `(filetype, filepath)`.
    ///
    /// Other files and filetypes are untouched, as are outstanding handles to
    /// the candidates themselves. A no-op when the pair was never added.
    pub fn clear_for_file(&self, filetype: &str, filepath: &str) {
        let files = {
            let filetypes = self.filetypes.lock();
            match filetypes.get(filetype) {
                Some(files) => Arc::clone(files),
                None => return,
            }
        };
        if files.lock().remove(filepath).is_some() {
            debug!(filetype, filepath, "cleared identifiers");
        }
    }

    /// Rank every identifier of `filetype` against `query`.
    ///
    /// Snapshots the filetype's candidate handles under the locks, then
    /// scores entirely lock-free. Identifiers present in several files are
    /// scored once. `max_results == 0` means no cap. Results arrive
    /// best-first.
    pub fn results_for_query_and_type(
        &self,
        query: &str,
        filetype: &str,
        max_results: usize,
    ) -> Vec<MatchResult> {
        let files = {
            let filetypes = self.filetypes.lock();
            match filetypes.get(filetype) {
                Some(files) => Arc::clone(files),
                None => return Vec::new(),
            }
        };

        let candidates = {
            let files = files.lock();
            let mut seen: HashSet<*const Candidate> = HashSet::new();
            let mut candidates: Vec<Arc<Candidate>> = Vec::new();
            for set in files.values() {
                for candidate in set {
                    if seen.insert(Arc::as_ptr(candidate)) {
                        candidates.push(Arc::clone(candidate));
                    }
                }
            }
            candidates
        };

        let query = Word::new(query);
        let mut results: Vec<MatchResult> = candidates
            .iter()
            .filter(|candidate| !candidate.is_empty() && candidate.contains_bytes(&query))
            .map(|candidate| candidate.query_match_result(&query))
            .filter(MatchResult::is_subsequence)
            .collect();

        partial_sort(&mut results, max_results);
        results
    }
}

impl Default for IdentifierDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for IdentifierDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentifierDatabase")
            .field("filetypes", &self.filetypes.lock().len())
            .finish()
    }
}
