#![warn(missing_docs)]

//! Unicode-aware fuzzy identifier matching and completion.
//!
//! `fuzzident` is the native core of an identifier-completion engine: it
//! ranks candidate identifiers against short queries with a subsequence
//! matcher that understands grapheme clusters, case folding and diacritics,
//! and it maintains a concurrent per-filetype, per-file identifier database
//! fed by buffers and ctags files.
//!
//! # Quick start
//!
//! Rank a one-off collection:
//!
//! ```
//! use fuzzident::filter_and_sort_candidates;
//!
//! let candidates = ["foo_bar", "fbr", "barfoo", "FooBar"];
//! let ranked = filter_and_sort_candidates(&candidates, "fb", 0);
//! assert_eq!(ranked, [&"fbr", &"FooBar", &"foo_bar"]);
//! ```
//!
//! Or keep an evolving database behind an [`IdentifierCompleter`]:
//!
//! ```
//! use fuzzident::IdentifierCompleter;
//!
//! let completer = IdentifierCompleter::new();
//! completer.add_single_identifier("openFileDialog", "cpp", "/ui.cpp");
//! completer.add_single_identifier("office", "cpp", "/ui.cpp");
//!
//! let completions = completer.candidates_for_query_and_type("ofd", "cpp", 0);
//! assert_eq!(completions, ["openFileDialog"]);
//! ```
//!
//! # How matching works
//!
//! Every string is segmented into extended grapheme clusters, each cluster
//! normalized (canonical decomposition and reordering) and interned in a
//! process-wide repository. A query matches a candidate when its characters
//! embed into the candidate's in order, comparing case-folded and, failing
//! that, diacritic-stripped forms. Matches rank by a multi-field
//! [`MatchResult`] favoring short candidates, word-boundary hits (camelCase
//! humps, underscore seams), prefixes and exact case.

pub mod candidate;
pub mod completer;
pub mod database;
pub mod error;
pub mod filter;
mod matcher;
pub mod repository;
pub mod result;
pub mod sort;
pub mod tags;
pub mod unicode;

pub use candidate::{Candidate, candidate_repository};
pub use completer::IdentifierCompleter;
pub use database::{FiletypeIdentifierMap, IdentifierDatabase};
pub use error::{Error, Result};
pub use filter::{AsCandidateText, filter_and_sort_candidates, filter_and_sort_candidates_by};
pub use repository::{Interned, Repository};
pub use result::MatchResult;
pub use sort::partial_sort;
pub use tags::identifiers_from_tags_file;
