//! Error types shared across the crate.
//!
//! Only two things can go wrong in the core: text handed to a code-point
//! constructor is not a single UTF-8 scalar, or a tags file cannot be read.
//! Everything on the match hot path is infallible by construction because
//! candidates are validated when they are interned.

use std::path::PathBuf;

/// Errors produced by text construction and tags-file loading.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input bytes do not form exactly one UTF-8 encoded Unicode scalar.
    ///
    /// Returned by [`CodePoint`](crate::unicode::CodePoint) constructors.
    /// The offending input is carried for diagnostics.
    #[error("input is not a single UTF-8 code point: {0:?}")]
    InvalidUtf8(String),

    /// A tags file could not be read.
    ///
    /// Callers that load tags treat this as "no identifiers in that file"
    /// rather than aborting completion; see
    /// [`identifiers_from_tags_file`](crate::tags::identifiers_from_tags_file).
    #[error("failed to read tags file {path}")]
    Io {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
