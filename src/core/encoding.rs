//! Field grammar shared by the encoded credential forms.
//!
//! Encoded credentials are `.`-separated fields: an algorithm name
//! followed by unpadded URL-safe base64 fields (and, for passwords, a
//! decimal iteration count). The separator never appears in algorithm
//! names or in the base64 alphabet, so a plain split is unambiguous and
//! the whole string is safe in URLs, cookies, and filenames.
//!
//! The single-character string `"."` is the reserved sentinel meaning
//! "no credential set".

use base64::prelude::*;

use crate::core::error::{CredError, CredResult};

/// The reserved field separator.
pub const SEPARATOR: char = '.';

/// The encoded form of the "no credential" sentinel.
pub const SENTINEL: &str = ".";

/// Encodes a binary field as unpadded URL-safe base64.
#[must_use]
pub fn encode_field(bytes: &[u8]) -> String {
    BASE64_URL_SAFE_NO_PAD.encode(bytes)
}

/// Decodes a base64 field and checks it against the algorithm's fixed
/// length.
///
/// # Errors
///
/// Returns [`CredError::Base64Decode`] for malformed base64 and
/// [`CredError::InvalidLength`] when the decoded length differs from
/// `expected_len`.
pub fn decode_field(encoded: &str, field: &'static str, expected_len: usize) -> CredResult<Vec<u8>> {
    let bytes = BASE64_URL_SAFE_NO_PAD.decode(encoded)?;
    if bytes.len() != expected_len {
        return Err(CredError::InvalidLength {
            field,
            expected: expected_len,
            actual: bytes.len(),
        });
    }
    Ok(bytes)
}

/// Splits an encoded credential into exactly `expected` non-empty
/// fields.
///
/// The sentinel string is not a valid input here; callers check for it
/// before splitting.
///
/// # Errors
///
/// Returns [`CredError::InvalidFormat`] when the separator count or a
/// field is off.
pub fn split_fields(encoded: &str, expected: usize) -> CredResult<Vec<&str>> {
    let fields: Vec<&str> = encoded.split(SEPARATOR).collect();
    if fields.len() != expected {
        return Err(CredError::InvalidFormat("wrong number of `.`-separated fields"));
    }
    if fields.iter().any(|field| field.is_empty()) {
        return Err(CredError::InvalidFormat("empty field"));
    }
    Ok(fields)
}

/// Whether every byte of `bytes` is zero.
///
/// The all-zero pattern is reserved for cleared credentials; parsers use
/// this to reject forged sentinels and constructors use it to keep the
/// sentinel unique.
#[must_use]
pub fn is_all_zero(bytes: &[u8]) -> bool {
    bytes.iter().all(|&byte| byte == 0)
}
