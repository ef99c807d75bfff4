//! The identifier completer facade.
//!
//! Ties the pieces together for the completion server: feed identifiers in
//! (directly, in bulk, or from tags files), ask for ranked completion
//! strings out. All state lives in the wrapped
//! [`IdentifierDatabase`]; the completer itself adds the
//! clear-then-add choreography buffers need on reparse.

use std::path::Path;

use crate::database::{FiletypeIdentifierMap, IdentifierDatabase};
use crate::result::MatchResult;
use crate::tags::identifiers_from_tags_file;

/// Identifier-based completion over a concurrent per-filetype database.
///
/// # Examples
///
/// ```
/// use fuzzident::IdentifierCompleter;
///
/// let completer = IdentifierCompleter::new();
/// completer.add_single_identifier("FooBar", "cpp", "/src/a.cpp");
/// completer.add_single_identifier("foo_bar", "cpp", "/src/a.cpp");
///
/// let completions = completer.candidates_for_query_and_type("fb", "cpp", 0);
/// assert_eq!(completions, ["FooBar", "foo_bar"]);
/// ```
#[derive(Debug, Default)]
pub struct IdentifierCompleter {
    identifier_database: IdentifierDatabase,
}

impl IdentifierCompleter {
    /// Create a completer with an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every identifier in a `filetype -> filepath -> identifiers` map.
    pub fn add_identifiers_to_database(&self, identifiers: &FiletypeIdentifierMap) {
        self.identifier_database.add_identifiers(identifiers);
    }

    /// Add one identifier seen in one file.
    pub fn add_single_identifier(&self, identifier: &str, filetype: &str, filepath: &str) {
        self.identifier_database
            .add_identifiers_for_file([identifier], filetype, filepath);
    }

    /// Replace the stored identifiers of every (filetype, filepath) pair
    /// appearing in `identifiers` with the new ones.
    ///
    /// Only the pairs present in the map are cleared; everything else in the
    /// database is untouched. This is the reparse path: a buffer's previous
    /// identifiers go away, the fresh scan comes in.
    pub fn clear_for_file_and_add_identifiers(&self, identifiers: &FiletypeIdentifierMap) {
        for (filetype, files) in identifiers {
            for filepath in files.keys() {
                self.identifier_database.clear_for_file(filetype, filepath);
            }
        }
        self.identifier_database.add_identifiers(identifiers);
    }

    /// Parse each tags file and add the identifiers it yields.
    ///
    /// Unreadable files contribute nothing (see
    /// [`identifiers_from_tags_file`]).
    pub fn add_identifiers_from_tag_files<I>(&self, paths: I)
    where
        I: IntoIterator,
        I::Item: AsRef<Path>,
    {
        for path in paths {
            let identifiers = identifiers_from_tags_file(path.as_ref());
            self.identifier_database.add_identifiers(&identifiers);
        }
    }

    /// Ranked completion strings for `query` among identifiers of
    /// `filetype`. `max_candidates == 0` means no cap.
    pub fn candidates_for_query_and_type(
        &self,
        query: &str,
        filetype: &str,
        max_candidates: usize,
    ) -> Vec<String> {
        self.identifier_database
            .results_for_query_and_type(query, filetype, max_candidates)
            .iter()
            .map(|result| result.text().to_owned())
            .collect()
    }

    /// Ranked results, with their scoring features, for callers that need
    /// more than the completion strings.
    pub fn results_for_query_and_type(
        &self,
        query: &str,
        filetype: &str,
        max_candidates: usize,
    ) -> Vec<MatchResult> {
        self.identifier_database
            .results_for_query_and_type(query, filetype, max_candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_identifier_round_trip() {
        let completer = IdentifierCompleter::new();
        completer.add_single_identifier("unique_name", "rust", "/lib.rs");
        assert_eq!(
            completer.candidates_for_query_and_type("un", "rust", 0),
            ["unique_name"]
        );
        assert!(completer.candidates_for_query_and_type("un", "cpp", 0).is_empty());
    }

    #[test]
    fn clear_and_add_replaces_only_named_pairs() {
        let completer = IdentifierCompleter::new();
        completer.add_single_identifier("old_one", "cpp", "/a.cpp");
        completer.add_single_identifier("kept", "cpp", "/b.cpp");

        let mut update = FiletypeIdentifierMap::new();
        update
            .entry("cpp".to_owned())
            .or_default()
            .insert("/a.cpp".to_owned(), vec!["new_one".to_owned()]);
        completer.clear_for_file_and_add_identifiers(&update);

        let completions = completer.candidates_for_query_and_type("", "cpp", 0);
        assert!(completions.contains(&"new_one".to_owned()));
        assert!(completions.contains(&"kept".to_owned()));
        assert!(!completions.contains(&"old_one".to_owned()));
    }

    #[test]
    fn results_surface_match_features() {
        let completer = IdentifierCompleter::new();
        completer.add_single_identifier("prefix_match", "go", "/main.go");
        let results = completer.results_for_query_and_type("pre", "go", 0);
        assert_eq!(results.len(), 1);
        assert!(results[0].is_prefix());
        assert!(results[0].is_case_exact());
    }
}
