//! End-to-end tests of the completion pipeline through the public API:
//! interning, matching, ranking, the identifier database, and the
//! filter-and-sort surface.

use fuzzident::{
    FiletypeIdentifierMap, IdentifierCompleter, IdentifierDatabase, filter_and_sort_candidates,
};

// ---------------------------------------------------------------------------
// Ranking order
// ---------------------------------------------------------------------------

/// The classic boundary-vs-length trade-off: the tight prefix match wins,
/// then word-boundary hits break the tie between camelCase and snake_case,
/// and the out-of-order candidate is excluded entirely.
#[test]
fn word_boundary_ranking_order() {
    let candidates = ["foo_bar", "fbr", "barfoo", "FooBar"];
    let ranked = filter_and_sort_candidates(&candidates, "fb", 0);
    assert_eq!(ranked, [&"fbr", &"FooBar", &"foo_bar"]);
}

/// A contiguous match beats one with the same characters spread out:
/// higher length ratio and a prefix hit.
#[test]
fn tight_match_beats_scattered_match() {
    let candidates = ["abc", "aXbXc"];
    let ranked = filter_and_sort_candidates(&candidates, "abc", 0);
    assert_eq!(ranked, [&"abc", &"aXbXc"]);
}

/// Both the accented and the plain spelling match a plain query; the exact
/// spelling ranks first.
#[test]
fn diacritic_insensitive_matching_prefers_exact_text() {
    let candidates = ["caf\u{e9}", "cafe"];
    let ranked = filter_and_sort_candidates(&candidates, "cafe", 0);
    assert_eq!(ranked, [&"cafe", &"caf\u{e9}"]);
}

/// Precomposed and combining-mark spellings of the same candidate text are
/// matched identically.
#[test]
fn equivalent_spellings_rank_identically() {
    let precomposed = ["caf\u{e9}"];
    let decomposed = ["cafe\u{301}"];
    assert_eq!(
        filter_and_sort_candidates(&precomposed, "cafe", 0).len(),
        filter_and_sort_candidates(&decomposed, "cafe", 0).len(),
    );
}

/// An empty query is a match-all: every candidate comes back.
#[test]
fn empty_query_returns_all_candidates_in_order() {
    let candidates = ["a", "b"];
    let ranked = filter_and_sort_candidates(&candidates, "", 10);
    assert_eq!(ranked, [&"a", &"b"]);
}

/// Case-exact matches outrank case-folded ones when all else ties.
#[test]
fn exact_case_wins_over_folded_case() {
    let candidates = ["Foo", "foo"];
    let ranked = filter_and_sort_candidates(&candidates, "f", 0);
    assert_eq!(ranked, [&"foo", &"Foo"]);
}

/// The cap keeps only the best matches.
#[test]
fn max_candidates_truncates_after_ranking() {
    let candidates = ["fbr", "foo_bar", "FooBar"];
    let ranked = filter_and_sort_candidates(&candidates, "fb", 1);
    assert_eq!(ranked, [&"fbr"]);
}

// ---------------------------------------------------------------------------
// Identifier database
// ---------------------------------------------------------------------------

fn single_pair_map(filetype: &str, filepath: &str, identifiers: &[&str]) -> FiletypeIdentifierMap {
    let mut map = FiletypeIdentifierMap::new();
    map.entry(filetype.to_owned()).or_default().insert(
        filepath.to_owned(),
        identifiers.iter().map(|s| (*s).to_owned()).collect(),
    );
    map
}

/// Filetypes partition the database: a query for one filetype never sees
/// identifiers of another, and clearing one file affects only that file.
#[test]
fn database_scopes_and_clear_isolation() {
    let completer = IdentifierCompleter::new();

    let mut identifiers = single_pair_map("cpp", "/a.cpp", &["Foo", "Bar"]);
    identifiers
        .entry("py".to_owned())
        .or_default()
        .insert("/a.py".to_owned(), vec!["Foo".to_owned()]);
    completer.add_identifiers_to_database(&identifiers);

    assert_eq!(completer.candidates_for_query_and_type("f", "cpp", 0), ["Foo"]);

    completer.clear_for_file_and_add_identifiers(&single_pair_map("cpp", "/a.cpp", &[]));
    assert!(completer.candidates_for_query_and_type("f", "cpp", 0).is_empty());
    assert_eq!(completer.candidates_for_query_and_type("f", "py", 0), ["Foo"]);
}

/// Adding the same identifier twice leaves one stored copy.
#[test]
fn database_addition_is_idempotent() {
    let database = IdentifierDatabase::new();
    database.add_identifiers_for_file(["twice"], "rust", "/a.rs");
    database.add_identifiers_for_file(["twice"], "rust", "/a.rs");
    let results = database.results_for_query_and_type("tw", "rust", 0);
    assert_eq!(results.len(), 1);
}

/// Results come back best-first with features consistent with the query.
#[test]
fn database_results_are_ranked() {
    let database = IdentifierDatabase::new();
    database.add_identifiers_for_file(
        ["set_timeout", "style", "setTitle"],
        "javascript",
        "/app.js",
    );

    let results = database.results_for_query_and_type("st", "javascript", 0);
    let texts: Vec<&str> = results.iter().map(|r| r.text()).collect();
    // "style" is the tightest (ratio 2/5); the two boundary-heavy setters
    // follow, the shorter one first.
    assert_eq!(texts, ["style", "setTitle", "set_timeout"]);
    assert!(results.iter().all(|r| r.is_subsequence()));
}

/// Identifiers flow from buffers of different files into one filetype pool.
#[test]
fn filetype_pools_merge_across_files() {
    let completer = IdentifierCompleter::new();
    completer.add_single_identifier("from_header", "cpp", "/a.h");
    completer.add_single_identifier("from_source", "cpp", "/a.cpp");

    let completions = completer.candidates_for_query_and_type("from", "cpp", 0);
    assert_eq!(completions.len(), 2);
}

/// A query against a filetype that was never populated is empty, not an
/// error.
#[test]
fn unknown_filetype_is_empty() {
    let completer = IdentifierCompleter::new();
    assert!(completer.candidates_for_query_and_type("x", "fortran", 0).is_empty());
}

/// Unicode identifiers survive the full pipeline.
#[test]
fn unicode_identifiers_complete() {
    let completer = IdentifierCompleter::new();
    completer.add_single_identifier("h\u{e9}llo_world", "python", "/u.py");
    assert_eq!(
        completer.candidates_for_query_and_type("hello", "python", 0),
        ["h\u{e9}llo_world"]
    );
}

/// Concurrent use from several threads: adders and queriers sharing one
/// completer must neither deadlock nor surface bogus matches.
#[test]
fn concurrent_completer_use() {
    use std::sync::Arc;

    let completer = Arc::new(IdentifierCompleter::new());
    let mut handles = Vec::new();

    for worker in 0..4 {
        let completer = Arc::clone(&completer);
        handles.push(std::thread::spawn(move || {
            for i in 0..100 {
                completer.add_single_identifier(
                    &format!("worker{worker}_ident{i}"),
                    "cpp",
                    &format!("/w{worker}.cpp"),
                );
            }
        }));
    }
    for _ in 0..2 {
        let completer = Arc::clone(&completer);
        handles.push(std::thread::spawn(move || {
            for _ in 0..50 {
                for completion in completer.candidates_for_query_and_type("worker", "cpp", 25) {
                    assert!(completion.starts_with("worker"));
                }
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(
        completer.candidates_for_query_and_type("worker", "cpp", 0).len(),
        400
    );
}
