//! The error type surfaced by every fallible entry point in this crate.

use thiserror::Error;

/// Failure modes of signature building, signature parsing, and delta computation.
#[derive(Debug, Error)]
pub enum Error {
    /// An unrecognized magic number was found (or passed) where a signature or delta tag
    /// was expected.
    #[error("unrecognized magic number: {0:#010x}")]
    BadMagic(u32),

    /// `strongLen` exceeds the native output size of the selected strong-hash algorithm.
    #[error("strong hash length {strong_len} exceeds the {max}-byte maximum for this algorithm")]
    BadParameter {
        /// The requested truncation length.
        strong_len: u32,
        /// The algorithm's native digest size.
        max: u32,
    },

    /// A read stopped short of the number of bytes a framed field requires.
    #[error("truncated stream: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Bytes the field declared it needed.
        expected: usize,
        /// Bytes actually available before EOF.
        actual: usize,
    },

    /// The underlying reader or writer failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias for fallible results in this crate.
pub type Result<T> = std::result::Result<T, Error>;
