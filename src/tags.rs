//! Identifier extraction from ctags files.
//!
//! Reads tag files in the format Exuberant/Universal Ctags emits (see
//! <http://ctags.sourceforge.net/FORMAT>): one record per line,
//! tab-separated, with a `language:NAME` token somewhere in the trailing
//! fields. Records become `(filetype, filepath, identifier)` triples; the
//! language name maps through a fixed table to an editor filetype, tag paths
//! resolve relative to the tag file's directory, and unreadable files yield
//! an empty map rather than an error -- a missing tags file must never
//! abort completion.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use memchr::{memchr, memmem};
use once_cell::sync::Lazy;
use tracing::warn;

use crate::database::FiletypeIdentifierMap;
use crate::error::{Error, Result};

/// Language names as Universal Ctags reports them (`ctags
/// --list-languages`), mapped to the filetype the editor uses for them.
/// Languages missing from the table fall back to their lowercased name.
static LANG_TO_FILETYPE: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Ada", "ada"),
        ("AnsiblePlaybook", "ansibleplaybook"),
        ("Ant", "ant"),
        ("Asm", "asm"),
        ("Asp", "asp"),
        ("Autoconf", "autoconf"),
        ("Automake", "automake"),
        ("Awk", "awk"),
        ("Basic", "basic"),
        ("BETA", "beta"),
        ("C", "c"),
        ("C#", "cs"),
        ("C++", "cpp"),
        ("Clojure", "clojure"),
        ("Cobol", "cobol"),
        ("CPreProcessor", "cpreprocessor"),
        ("CSS", "css"),
        ("ctags", "ctags"),
        ("CUDA", "cuda"),
        ("D", "d"),
        ("DBusIntrospect", "dbusintrospect"),
        ("Diff", "diff"),
        ("DosBatch", "dosbatch"),
        ("DTD", "dtd"),
        ("DTS", "dts"),
        ("Eiffel", "eiffel"),
        ("elm", "elm"),
        ("Erlang", "erlang"),
        ("Falcon", "falcon"),
        ("Flex", "flex"),
        ("Fortran", "fortran"),
        ("gdbinit", "gdb"),
        ("Glade", "glade"),
        ("Go", "go"),
        ("HTML", "html"),
        ("Iniconf", "iniconf"),
        ("ITcl", "itcl"),
        ("Java", "java"),
        ("JavaProperties", "jproperties"),
        ("JavaScript", "javascript"),
        ("JSON", "json"),
        ("LdScript", "ldscript"),
        ("Lisp", "lisp"),
        ("Lua", "lua"),
        ("M4", "m4"),
        ("Make", "make"),
        ("man", "man"),
        ("MatLab", "matlab"),
        ("Maven2", "maven2"),
        ("Myrddin", "myrddin"),
        ("ObjectiveC", "objc"),
        ("OCaml", "ocaml"),
        ("Pascal", "pascal"),
        ("passwd", "passwd"),
        ("Perl", "perl"),
        ("Perl6", "perl6"),
        ("PHP", "php"),
        ("PlistXML", "plistxml"),
        ("pod", "pod"),
        ("Protobuf", "protobuf"),
        ("PuppetManifest", "puppet"),
        ("Python", "python"),
        ("PythonLoggingConfig", "pythonloggingconfig"),
        ("QemuHX", "qemuhx"),
        ("R", "r"),
        ("RelaxNG", "rng"),
        ("reStructuredText", "rst"),
        ("REXX", "rexx"),
        ("Robot", "robot"),
        ("RpmSpec", "spec"),
        ("RSpec", "rspec"),
        ("Ruby", "ruby"),
        ("Rust", "rust"),
        ("Scheme", "scheme"),
        ("Sh", "sh"),
        ("SLang", "slang"),
        ("SML", "sml"),
        ("SQL", "sql"),
        ("SVG", "svg"),
        ("SystemdUnit", "systemd"),
        ("SystemVerilog", "systemverilog"),
        ("Tcl", "tcl"),
        ("TclOO", "tcloo"),
        ("Tex", "tex"),
        ("TTCN", "ttcn"),
        ("Vera", "vera"),
        ("Verilog", "verilog"),
        ("VHDL", "vhdl"),
        ("Vim", "vim"),
        ("WindRes", "windres"),
        ("XSLT", "xslt"),
        ("YACC", "yacc"),
        ("Yaml", "yaml"),
        ("YumRepo", "yumrepo"),
        ("Zephir", "zephir"),
    ])
});

/// One parsed tag record, borrowing from the line it came from.
struct TagRecord<'a> {
    identifier: &'a str,
    path: &'a str,
    language: &'a str,
}

/// Parse one tags line: `IDENTIFIER<TAB>PATH<TAB>...language:NAME...`.
///
/// Returns `None` for pseudo-tags, comments, and anything else that does not
/// carry all three required pieces.
fn parse_tag_line(line: &[u8]) -> Option<TagRecord<'_>> {
    let first_tab = memchr(b'\t', line)?;
    let identifier = &line[..first_tab];
    if identifier.is_empty() {
        return None;
    }

    let rest = &line[first_tab + 1..];
    let second_tab = memchr(b'\t', rest)?;
    let path = &rest[..second_tab];
    if path.is_empty() {
        return None;
    }

    // The language token may sit anywhere in the trailing fields.
    let trailing = &rest[second_tab + 1..];
    let token = memmem::find(trailing, b"language:")?;
    let language_region = &trailing[token + b"language:".len()..];
    let language_end = memchr(b'\t', language_region).unwrap_or(language_region.len());
    let language = &language_region[..language_end];
    if language.is_empty() {
        return None;
    }

    Some(TagRecord {
        identifier: std::str::from_utf8(identifier).ok()?,
        path: std::str::from_utf8(path).ok()?,
        language: std::str::from_utf8(language).ok()?,
    })
}

/// Map a ctags language name to a filetype, lowercasing unknown names.
fn filetype_from_language(language: &str) -> String {
    match LANG_TO_FILETYPE.get(language) {
        Some(filetype) => (*filetype).to_owned(),
        None => language.to_lowercase(),
    }
}

/// Canonicalize `path`, tolerating a non-existent tail.
///
/// The longest existing ancestor is resolved through the filesystem
/// (following symlinks); the remaining components are appended lexically,
/// collapsing `.` and `..`.
fn weakly_canonicalize(path: &Path) -> PathBuf {
    for ancestor in path.ancestors() {
        let Ok(resolved) = dunce::canonicalize(ancestor) else {
            continue;
        };
        let Ok(remainder) = path.strip_prefix(ancestor) else {
            continue;
        };
        let mut out = resolved;
        for component in remainder.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    out.pop();
                }
                other => out.push(other.as_os_str()),
            }
        }
        return out;
    }
    path.to_path_buf()
}

fn read_tags_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse tag records out of raw file contents.
fn extract_identifiers(contents: &[u8], tags_directory: &Path) -> FiletypeIdentifierMap {
    let mut identifiers = FiletypeIdentifierMap::new();

    for line in contents.split(|&byte| byte == b'\n') {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        let Some(record) = parse_tag_line(line) else {
            continue;
        };

        let filetype = filetype_from_language(record.language);
        let filepath = weakly_canonicalize(&tags_directory.join(record.path))
            .to_string_lossy()
            .into_owned();

        identifiers
            .entry(filetype)
            .or_default()
            .entry(filepath)
            .or_default()
            .push(record.identifier.to_owned());
    }

    identifiers
}

/// Extract every identifier from the tags file at `path`.
///
/// Paths in the records resolve relative to the tags file's directory and
/// are canonicalized. An unreadable file is logged and produces an empty
/// map; completion carries on without it.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use fuzzident::identifiers_from_tags_file;
///
/// let identifiers = identifiers_from_tags_file(Path::new("/project/tags"));
/// for (filetype, files) in &identifiers {
///     println!("{filetype}: {} files", files.len());
/// }
/// ```
pub fn identifiers_from_tags_file(path: &Path) -> FiletypeIdentifierMap {
    let contents = match read_tags_file(path) {
        Ok(contents) => contents,
        Err(error) => {
            warn!(%error, "skipping unreadable tags file");
            return FiletypeIdentifierMap::new();
        }
    };
    let directory = path.parent().unwrap_or_else(|| Path::new("."));
    extract_identifiers(&contents, directory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_record() {
        let record = parse_tag_line(b"myIdent\tsrc/a.cpp\t/^def$/;\"\tlanguage:C++\tkind:f")
            .expect("record should parse");
        assert_eq!(record.identifier, "myIdent");
        assert_eq!(record.path, "src/a.cpp");
        assert_eq!(record.language, "C++");
    }

    #[test]
    fn language_token_mid_field_is_found() {
        let record =
            parse_tag_line(b"x\tf.rb\tjunk language:Ruby more junk").expect("record should parse");
        assert_eq!(record.language, "Ruby");
    }

    #[test]
    fn rejects_records_without_language() {
        assert!(parse_tag_line(b"ident\tfile.c\t/^pattern$/;\"\tkind:f").is_none());
    }

    #[test]
    fn rejects_pseudo_tags_and_malformed_lines() {
        assert!(parse_tag_line(b"!_TAG_FILE_FORMAT\t2").is_none());
        assert!(parse_tag_line(b"").is_none());
        assert!(parse_tag_line(b"no_tabs_at_all").is_none());
        assert!(parse_tag_line(b"\tmissing_ident\tlanguage:C").is_none());
        assert!(parse_tag_line(b"ident\t\tlanguage:C").is_none());
        assert!(parse_tag_line(b"ident\tfile\tlanguage:").is_none());
    }

    #[test]
    fn known_languages_map_to_filetypes() {
        assert_eq!(filetype_from_language("C++"), "cpp");
        assert_eq!(filetype_from_language("C#"), "cs");
        assert_eq!(filetype_from_language("Python"), "python");
        assert_eq!(filetype_from_language("RpmSpec"), "spec");
    }

    #[test]
    fn unknown_languages_fall_back_to_lowercase() {
        assert_eq!(filetype_from_language("Klingon"), "klingon");
    }

    #[test]
    fn extraction_groups_by_filetype_and_file() {
        let contents = b"alpha\ta.cpp\tlanguage:C++\n\
                         beta\ta.cpp\tlanguage:C++\n\
                         gamma\tb.py\tlanguage:Python\n";
        let identifiers = extract_identifiers(contents, Path::new("/base"));

        let cpp = &identifiers["cpp"];
        assert_eq!(cpp.len(), 1);
        let (path, idents) = cpp.iter().next().expect("one cpp file");
        assert!(path.ends_with("a.cpp"), "path was {path}");
        assert_eq!(idents, &["alpha", "beta"]);

        assert_eq!(identifiers["python"].len(), 1);
    }

    #[test]
    fn crlf_records_parse_like_lf_records() {
        let contents = b"one\tf.c\tlanguage:C\r\ntwo\tf.c\tlanguage:C\r\n";
        let identifiers = extract_identifiers(contents, Path::new("/base"));
        let (_, idents) = identifiers["c"].iter().next().expect("one file");
        assert_eq!(idents, &["one", "two"]);
    }

    #[test]
    fn weakly_canonicalize_tolerates_missing_tails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("not").join("there.cpp");
        let resolved = weakly_canonicalize(&missing);
        assert!(resolved.ends_with(Path::new("not/there.cpp")));
        assert!(resolved.starts_with(dunce::canonicalize(dir.path()).expect("canonical tempdir")));
    }

    #[test]
    fn weakly_canonicalize_collapses_dot_components() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dotted = dir.path().join(".").join("x").join("..").join("y.rs");
        let resolved = weakly_canonicalize(&dotted);
        assert!(resolved.ends_with(Path::new("y.rs")));
        assert!(!resolved.to_string_lossy().contains(".."));
    }

    #[test]
    fn unreadable_file_yields_an_empty_map() {
        let identifiers = identifiers_from_tags_file(Path::new("/no/such/tags/file"));
        assert!(identifiers.is_empty());
    }
}
