//! The Unicode text model: code points, grapheme-cluster characters, and
//! words.
//!
//! Matching is defined over *characters* -- extended grapheme clusters
//! normalized through canonical decomposition and reordering -- rather than
//! over bytes or scalars, so that `"é"` typed as one code point and as
//! `e` + combining acute behave identically. The layers build on each other:
//!
//! - [`CodePoint`]: one scalar and its table row (normal form, folded and
//!   swapped case, combining class, classification flags);
//! - [`Character`]: one grapheme cluster, normalized, with per-cluster flags
//!   and the mark-stripped base text;
//! - [`Word`]: a character sequence with a byte-presence bitmap used as the
//!   fast reject before full matching.
//!
//! All three are interned in process-wide repositories so analysis happens
//! once per distinct source string.

pub mod code_point;
pub mod character;
pub mod word;

pub use character::{Character, character_repository};
pub use code_point::{CodePoint, code_point_repository};
pub use word::Word;
