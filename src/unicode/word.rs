//! A sequence of characters plus the byte-presence fast path.
//!
//! A [`Word`] is the unit on both sides of a match: the query is a word, and
//! every candidate wraps one. Construction segments the input into extended
//! grapheme clusters (UAX#29), interns each cluster as a
//! [`Character`](crate::unicode::Character), and records which byte values
//! occur in the concatenated folded-case text. That byte bitmap gives a
//! cheap necessary condition checked before the full subsequence scan.

use std::sync::Arc;

use unicode_segmentation::UnicodeSegmentation;

use crate::unicode::character::{self, Character};

/// Presence bitmap over the 256 byte values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ByteBitmap {
    bits: [u64; 4],
}

impl ByteBitmap {
    fn set(&mut self, byte: u8) {
        self.bits[usize::from(byte >> 6)] |= 1 << (byte & 63);
    }

    /// Whether every byte present in `other` is also present in `self`.
    fn contains_all(&self, other: &ByteBitmap) -> bool {
        self.bits
            .iter()
            .zip(other.bits.iter())
            .all(|(mine, theirs)| mine & theirs == *theirs)
    }
}

/// An ordered sequence of normalized characters built from one input string.
///
/// # Examples
///
/// ```
/// use fuzzident::unicode::Word;
///
/// let word = Word::new("caf\u{e9}");
/// assert_eq!(word.characters().len(), 4);
/// assert_eq!(word.text(), "caf\u{e9}");
///
/// // The byte filter is a necessary condition for a subsequence match.
/// let query = Word::new("cf");
/// assert!(word.contains_bytes(&query));
/// assert!(!word.contains_bytes(&Word::new("z")));
/// ```
#[derive(Debug, Clone)]
pub struct Word {
    text: String,
    folded_case: String,
    characters: Vec<Arc<Character>>,
    bytes_present: ByteBitmap,
}

impl Word {
    /// Segment `text` into grapheme clusters and intern each one.
    pub fn new(text: &str) -> Self {
        let characters: Vec<Arc<Character>> = text
            .graphemes(true)
            .map(character::interned)
            .collect();

        let mut folded_case = String::with_capacity(text.len());
        for c in &characters {
            folded_case.push_str(c.folded_case());
        }

        let mut bytes_present = ByteBitmap::default();
        for byte in folded_case.bytes() {
            bytes_present.set(byte);
        }

        Self {
            text: text.to_owned(),
            folded_case,
            characters,
            bytes_present,
        }
    }

    /// The original input text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Concatenated folded-case text of every character, in order.
    pub fn folded_case(&self) -> &str {
        &self.folded_case
    }

    /// The characters of the word, in order.
    pub fn characters(&self) -> &[Arc<Character>] {
        &self.characters
    }

    /// Whether the word contains no characters.
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Whether every byte value occurring in `other`'s folded-case text also
    /// occurs in this word's folded-case text.
    pub fn contains_bytes(&self, other: &Word) -> bool {
        self.bytes_present.contains_all(&other.bytes_present)
    }
}
