//! A single Unicode scalar and its precomputed properties.
//!
//! All character semantics in this crate come from the generated Unicode
//! Character Database tables embedded in the `unicode-normalization`,
//! `caseless` and `unicode-properties` crates -- never from platform
//! libraries. A [`CodePoint`] materializes one row of that data: the scalar's
//! fully decomposed normal form, its folded and swapped cases, its canonical
//! combining class, and the classification flags the matcher consults.

use std::cmp::Ordering;
use std::sync::Arc;

use caseless::Caseless;
use once_cell::sync::Lazy;
use unicode_normalization::char::{canonical_combining_class, decompose_canonical, is_combining_mark};
use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};

use crate::error::{Error, Result};
use crate::repository::{Interned, Repository};

static REPOSITORY: Lazy<Repository<CodePoint>> = Lazy::new(Repository::new);

/// The process-wide [`CodePoint`] interner, keyed by the UTF-8 bytes of the
/// code point.
pub fn code_point_repository() -> &'static Repository<CodePoint> {
    &REPOSITORY
}

/// Intern the code point for `scalar`.
///
/// Infallible variant used by character construction, which always hands in
/// exactly one scalar.
pub(crate) fn interned(scalar: char) -> Arc<CodePoint> {
    let mut buf = [0u8; 4];
    let text = scalar.encode_utf8(&mut buf);
    REPOSITORY.get_or_insert_with(text, || CodePoint::new(scalar))
}

/// A Unicode scalar value together with its table row.
///
/// Ordered by canonical combining class first and scalar value second, which
/// is the ordering the canonical reordering step of character construction
/// sorts by.
///
/// # Examples
///
/// ```
/// use fuzzident::unicode::CodePoint;
///
/// let e_acute = CodePoint::from_bytes("\u{e9}".as_bytes()).unwrap();
/// assert_eq!(e_acute.normal(), "e\u{301}");
/// assert_eq!(e_acute.combining_class(), 0);
/// assert!(e_acute.is_letter());
/// ```
#[derive(Debug, Clone)]
pub struct CodePoint {
    scalar: char,
    normal: String,
    folded_case: String,
    swapped_case: String,
    combining_class: u8,
    is_letter: bool,
    is_punctuation: bool,
    is_uppercase: bool,
    is_mark: bool,
}

impl CodePoint {
    /// Build the table row for `scalar`.
    pub fn new(scalar: char) -> Self {
        // Canonical decomposition, pre-expanded to fixed point: the callback
        // receives the fully recursive NFD expansion of the scalar.
        let mut normal = String::new();
        decompose_canonical(scalar, |decomposed| normal.push(decomposed));

        let folded_case: String = std::iter::once(scalar).default_case_fold().collect();

        let is_uppercase = scalar.is_uppercase();
        let swapped_case: String = if is_uppercase {
            scalar.to_lowercase().collect()
        } else if scalar.is_lowercase() {
            scalar.to_uppercase().collect()
        } else {
            scalar.to_string()
        };

        let group = scalar.general_category_group();

        Self {
            scalar,
            normal,
            folded_case,
            swapped_case,
            combining_class: canonical_combining_class(scalar),
            is_letter: group == GeneralCategoryGroup::Letter,
            is_punctuation: group == GeneralCategoryGroup::Punctuation,
            is_uppercase,
            is_mark: is_combining_mark(scalar),
        }
    }

    /// Build a code point from a UTF-8 byte slice.
    ///
    /// The slice must encode exactly one Unicode scalar; anything else --
    /// malformed UTF-8, empty input, more than one scalar -- is rejected
    /// with [`Error::InvalidUtf8`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|_| Error::InvalidUtf8(String::from_utf8_lossy(bytes).into_owned()))?;
        Self::from_text(text)
    }

    /// The scalar value.
    pub fn scalar(&self) -> char {
        self.scalar
    }

    /// Fully decomposed (NFD) form of the scalar.
    pub fn normal(&self) -> &str {
        &self.normal
    }

    /// Default Unicode case folding of the scalar (may expand, e.g.
    /// `'ẞ'` folds to `"ss"`).
    pub fn folded_case(&self) -> &str {
        &self.folded_case
    }

    /// The scalar with its case swapped; caseless scalars map to themselves.
    pub fn swapped_case(&self) -> &str {
        &self.swapped_case
    }

    /// Canonical combining class (0 for starters).
    pub fn combining_class(&self) -> u8 {
        self.combining_class
    }

    /// Whether the scalar is a letter (General_Category `L*`).
    pub fn is_letter(&self) -> bool {
        self.is_letter
    }

    /// Whether the scalar is punctuation (General_Category `P*`).
    pub fn is_punctuation(&self) -> bool {
        self.is_punctuation
    }

    /// Whether the scalar is uppercase.
    pub fn is_uppercase(&self) -> bool {
        self.is_uppercase
    }

    /// Whether the scalar is a combining mark (General_Category `M*`).
    ///
    /// Mark code points extend the preceding base character; they are
    /// excluded from a character's [base text](crate::unicode::Character::base).
    pub fn is_mark(&self) -> bool {
        self.is_mark
    }
}

impl Interned for CodePoint {
    fn from_text(text: &str) -> Result<Self> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(scalar), None) => Ok(Self::new(scalar)),
            _ => Err(Error::InvalidUtf8(text.to_owned())),
        }
    }
}

impl PartialEq for CodePoint {
    fn eq(&self, other: &Self) -> bool {
        self.scalar == other.scalar
    }
}

impl Eq for CodePoint {}

// Combining class outranks scalar value. Equal scalars always share a
// combining class, so this ordering is consistent with `Eq`.
impl Ord for CodePoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.combining_class
            .cmp(&other.combining_class)
            .then_with(|| self.scalar.cmp(&other.scalar))
    }
}

impl PartialOrd for CodePoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
