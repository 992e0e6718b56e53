//! Error types for credential hashing and identifier operations.
//!
//! All failures in this crate are local, synchronous validation failures:
//! an invalid input never produces a live [`HashedPassword`],
//! [`HashedKey`], or identifier, and there is nothing to retry. Each
//! variant carries a stable kind plus a human-readable cause for logging.
//!
//! [`HashedPassword`]: crate::core::types::HashedPassword
//! [`HashedKey`]: crate::core::types::HashedKey

use thiserror::Error;

/// Errors that can occur when constructing, parsing, or deriving
/// credential material.
#[derive(Debug, Error)]
pub enum CredError {
    /// The algorithm name in an encoded credential is not recognized.
    #[error("unsupported algorithm: {0:?}")]
    UnsupportedAlgorithm(String),

    /// The encoded string does not match the expected field grammar.
    #[error("invalid encoding: {0}")]
    InvalidFormat(&'static str),

    /// A salt, key, or hash buffer does not have the length fixed by its
    /// algorithm.
    #[error("invalid {field} length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Which buffer failed validation ("salt", "key", or "hash").
        field: &'static str,
        /// The length the algorithm requires.
        expected: usize,
        /// The length that was supplied.
        actual: usize,
    },

    /// The iteration count is zero, negative, or not a number.
    #[error("iteration count must be a positive integer")]
    InvalidIterationCount,

    /// Decoded secret material is all-zero, which is reserved for the
    /// cleared sentinel value.
    #[error("all-zero secret material is reserved for the cleared sentinel")]
    ReservedValue,

    /// Base64 decoding of a salt or hash field failed.
    #[error("base64 decode error: {0}")]
    Base64Decode(#[from] base64::DecodeError),

    /// The operating system's secure random source failed.
    #[error("secure random source failed")]
    RandomSource,

    /// The key-derivation primitive rejected its parameters.
    #[error("key derivation failed")]
    KeyDerivation,
}

/// Result type alias for credential operations.
pub type CredResult<T> = Result<T, CredError>;
