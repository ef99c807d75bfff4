//! A grapheme cluster normalized for matching.
//!
//! A [`Character`] is what the matcher calls "one character": a grapheme
//! cluster run through canonical decomposition (NFD) and the Canonical
//! Ordering Algorithm, with its case-folded, case-swapped and mark-stripped
//! renditions precomputed. Two clusters that differ only in encoding --
//! `"é"` and `"e\u{301}"` -- normalize to equal characters.

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::error::Result;
use crate::repository::{Interned, Repository};
use crate::unicode::code_point::{self, CodePoint};

static REPOSITORY: Lazy<Repository<Character>> = Lazy::new(Repository::new);

/// The process-wide [`Character`] interner, keyed by the grapheme cluster
/// text that produced each character.
pub fn character_repository() -> &'static Repository<Character> {
    &REPOSITORY
}

/// Intern the character for one grapheme cluster.
pub(crate) fn interned(cluster: &str) -> Arc<Character> {
    REPOSITORY.get_or_insert_with(cluster, || Character::new(cluster))
}

/// Decompose `text` into code points in canonical order.
///
/// Each scalar's stored normal form is already expanded to fixed point, so
/// decomposition is a single substitution pass; what remains is reordering
/// contiguous runs of non-starters (combining class != 0) by the code-point
/// ordering, using a stable sort.
fn canonical_decompose(text: &str) -> Vec<Arc<CodePoint>> {
    let mut normal = String::with_capacity(text.len());
    for scalar in text.chars() {
        normal.push_str(code_point::interned(scalar).normal());
    }

    let mut code_points: Vec<Arc<CodePoint>> =
        normal.chars().map(code_point::interned).collect();

    let mut start = 0;
    while start < code_points.len() {
        if code_points[start].combining_class() == 0 {
            start += 1;
            continue;
        }
        let mut end = start + 1;
        while end < code_points.len() && code_points[end].combining_class() != 0 {
            end += 1;
        }
        code_points[start..end].sort_by(|left, right| left.cmp(right));
        start = end + 1;
    }

    code_points
}

/// A normalized grapheme cluster.
///
/// # Examples
///
/// ```
/// use fuzzident::unicode::Character;
///
/// let precomposed = Character::new("é");
/// let decomposed = Character::new("e\u{301}");
/// assert_eq!(precomposed, decomposed);
/// assert_eq!(precomposed.base(), "e");
/// assert!(!precomposed.is_base());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    normal: String,
    base: String,
    folded_case: String,
    swapped_case: String,
    is_base: bool,
    is_letter: bool,
    is_punctuation: bool,
    is_uppercase: bool,
}

impl Character {
    /// Normalize one grapheme cluster.
    pub fn new(cluster: &str) -> Self {
        let mut character = Self {
            normal: String::new(),
            base: String::new(),
            folded_case: String::new(),
            swapped_case: String::new(),
            is_base: true,
            is_letter: false,
            is_punctuation: false,
            is_uppercase: false,
        };

        for code_point in canonical_decompose(cluster) {
            character.normal.push_str(code_point.normal());
            character.folded_case.push_str(code_point.folded_case());
            character.swapped_case.push_str(code_point.swapped_case());
            character.is_letter |= code_point.is_letter();
            character.is_punctuation |= code_point.is_punctuation();
            character.is_uppercase |= code_point.is_uppercase();
            if code_point.is_mark() {
                character.is_base = false;
            } else {
                character.base.push_str(code_point.folded_case());
            }
        }

        character
    }

    /// NFD-normalized, canonically ordered text of the cluster.
    pub fn normal(&self) -> &str {
        &self.normal
    }

    /// Folded case of the normalized cluster, the key for case-insensitive
    /// equality.
    pub fn folded_case(&self) -> &str {
        &self.folded_case
    }

    /// The normalized cluster with every code point's case swapped.
    pub fn swapped_case(&self) -> &str {
        &self.swapped_case
    }

    /// Folded case with combining marks removed, the key for
    /// diacritic-insensitive equality.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Whether the cluster consists solely of base code points (no
    /// combining marks).
    pub fn is_base(&self) -> bool {
        self.is_base
    }

    /// Whether any code point in the cluster is a letter.
    pub fn is_letter(&self) -> bool {
        self.is_letter
    }

    /// Whether any code point in the cluster is punctuation.
    pub fn is_punctuation(&self) -> bool {
        self.is_punctuation
    }

    /// Whether any code point in the cluster is uppercase.
    pub fn is_uppercase(&self) -> bool {
        self.is_uppercase
    }

    /// Whether `self` and `other` are equivalent for subsequence matching:
    /// equal after case folding, or equal after dropping diacritics as well.
    pub fn matches(&self, other: &Character) -> bool {
        self.folded_case == other.folded_case || self.base == other.base
    }
}

impl Interned for Character {
    fn from_text(text: &str) -> Result<Self> {
        Ok(Self::new(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precomposed_and_decomposed_are_equal() {
        let precomposed = Character::new("\u{e9}");
        let decomposed = Character::new("e\u{301}");
        assert_eq!(precomposed, decomposed);
        assert_eq!(precomposed.normal(), "e\u{301}");
        assert_eq!(precomposed.folded_case(), "e\u{301}");
        assert_eq!(precomposed.base(), "e");
    }

    #[test]
    fn marks_clear_the_base_flag() {
        assert!(Character::new("e").is_base());
        assert!(!Character::new("\u{e9}").is_base());
        assert!(!Character::new("e\u{301}").is_base());
    }

    #[test]
    fn combining_marks_reorder_canonically() {
        // Cedilla (ccc 202) must precede the acute accent (ccc 230) no
        // matter the input order.
        let marks_swapped = Character::new("c\u{301}\u{327}");
        let marks_canonical = Character::new("c\u{327}\u{301}");
        assert_eq!(marks_swapped.normal(), "c\u{327}\u{301}");
        assert_eq!(marks_swapped, marks_canonical);
    }

    #[test]
    fn classification_flags_or_over_code_points() {
        let upper = Character::new("\u{c9}"); // É
        assert!(upper.is_letter());
        assert!(upper.is_uppercase());
        assert!(!upper.is_punctuation());

        let underscore = Character::new("_");
        assert!(underscore.is_punctuation());
        assert!(!underscore.is_letter());
    }

    #[test]
    fn folding_uses_full_case_folding() {
        let sharp_s = Character::new("\u{df}");
        assert_eq!(sharp_s.folded_case(), "ss");
        assert_eq!(sharp_s.base(), "ss");
    }

    #[test]
    fn swapped_case_round_trip() {
        assert_eq!(Character::new("a").swapped_case(), "A");
        assert_eq!(Character::new("A").swapped_case(), "a");
        assert_eq!(Character::new("_").swapped_case(), "_");
    }

    #[test]
    fn matches_is_case_insensitive() {
        let lower = Character::new("f");
        let upper = Character::new("F");
        assert!(lower.matches(&upper));
        assert!(upper.matches(&lower));
    }

    #[test]
    fn matches_is_diacritic_insensitive() {
        let plain = Character::new("e");
        let accented = Character::new("\u{e9}");
        assert!(plain.matches(&accented));
        assert!(accented.matches(&plain));
        assert!(!plain.matches(&Character::new("a")));
    }

    #[test]
    fn hangul_syllable_decomposes_to_jamo() {
        // U+AC01 decomposes algorithmically to U+1100 U+1161 U+11A8.
        let syllable = Character::new("\u{ac01}");
        assert_eq!(syllable.normal(), "\u{1100}\u{1161}\u{11a8}");
        assert!(syllable.is_letter());
    }

    #[test]
    fn interning_deduplicates_equivalent_spellings_separately() {
        // Interning is keyed by source text: the two spellings are distinct
        // entries that normalize to equal values.
        let a = interned("\u{e9}");
        let b = interned("e\u{301}");
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(*a, *b);
    }
}
