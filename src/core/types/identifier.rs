//! Cryptographically random fixed-width identifiers.
//!
//! [`Identifier`] is 128 bits held as two unsigned 64-bit words;
//! [`SmallIdentifier`] is a single word. Both draw from the process-wide
//! secure random source and encode to fixed-width base-57 text (22 and
//! 11 characters), so an identifier is visually unambiguous, URL-safe,
//! and sorts the same way as its numeric value.

use core::fmt::{self, Display};
use core::str::FromStr;

use rand_core::{OsRng, TryRngCore};

use crate::core::error::{CredError, CredResult};
use crate::core::operations::base57::{decode_word, encode_word, WORD_LEN};

// =============================================================================
// Identifier (128-bit)
// =============================================================================

/// A 128-bit random identifier.
///
/// Ordering is unsigned-numeric, high word first, and matches the
/// lexicographic order of the encoded form.
///
/// # Example
///
/// ```rust
/// use credhash::Identifier;
///
/// let id = Identifier::random().expect("random source available");
/// let text = id.to_string();
/// assert_eq!(text.len(), Identifier::ENCODED_LEN);
///
/// let parsed: Identifier = text.parse().expect("own encoding parses");
/// assert_eq!(parsed, id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier {
    hi: u64,
    lo: u64,
}

impl Identifier {
    /// Width of the encoded form in characters.
    pub const ENCODED_LEN: usize = 2 * WORD_LEN;

    /// Creates an identifier from its two words, most significant first.
    #[must_use]
    pub const fn from_words(hi: u64, lo: u64) -> Self {
        Self { hi, lo }
    }

    /// Creates an identifier from a 128-bit value.
    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        Self {
            hi: (value >> 64) as u64,
            lo: value as u64,
        }
    }

    /// Draws a fresh identifier from the secure random source.
    ///
    /// # Errors
    ///
    /// Returns [`CredError::RandomSource`] if the operating system's
    /// random source fails.
    pub fn random() -> CredResult<Self> {
        let mut bytes = [0u8; 16];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|_| CredError::RandomSource)?;
        let value = u128::from_be_bytes(bytes);
        Ok(Self::from_u128(value))
    }

    /// The most significant word.
    #[must_use]
    pub const fn hi(self) -> u64 {
        self.hi
    }

    /// The least significant word.
    #[must_use]
    pub const fn lo(self) -> u64 {
        self.lo
    }

    /// The identifier as a 128-bit value.
    #[must_use]
    pub const fn as_u128(self) -> u128 {
        ((self.hi as u128) << 64) | (self.lo as u128)
    }
}

impl From<u128> for Identifier {
    fn from(value: u128) -> Self {
        Self::from_u128(value)
    }
}

impl From<Identifier> for u128 {
    fn from(id: Identifier) -> Self {
        id.as_u128()
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut digits = [0u8; Self::ENCODED_LEN];
        digits[..WORD_LEN].copy_from_slice(&encode_word(self.hi));
        digits[WORD_LEN..].copy_from_slice(&encode_word(self.lo));
        // The alphabet is pure ASCII.
        f.write_str(core::str::from_utf8(&digits).map_err(|_| fmt::Error)?)
    }
}

impl TryFrom<&str> for Identifier {
    type Error = CredError;

    fn try_from(encoded: &str) -> Result<Self, Self::Error> {
        if encoded.len() != Self::ENCODED_LEN {
            return Err(CredError::InvalidFormat("wrong identifier width"));
        }
        if !encoded.is_ascii() {
            return Err(CredError::InvalidFormat("character outside base-57 alphabet"));
        }
        let hi = decode_word(&encoded[..WORD_LEN])?;
        let lo = decode_word(&encoded[WORD_LEN..])?;
        Ok(Self { hi, lo })
    }
}

impl TryFrom<String> for Identifier {
    type Error = CredError;

    fn try_from(encoded: String) -> Result<Self, Self::Error> {
        Self::try_from(encoded.as_str())
    }
}

impl FromStr for Identifier {
    type Err = CredError;

    fn from_str(encoded: &str) -> Result<Self, Self::Err> {
        Self::try_from(encoded)
    }
}

// =============================================================================
// SmallIdentifier (64-bit)
// =============================================================================

/// A 64-bit random identifier.
///
/// The single-word form of [`Identifier`]: 11-character base-57
/// encoding, unsigned ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SmallIdentifier(u64);

impl SmallIdentifier {
    /// Width of the encoded form in characters.
    pub const ENCODED_LEN: usize = WORD_LEN;

    /// Creates an identifier from a 64-bit value.
    #[must_use]
    pub const fn from_u64(value: u64) -> Self {
        Self(value)
    }

    /// Draws a fresh identifier from the secure random source.
    ///
    /// # Errors
    ///
    /// Returns [`CredError::RandomSource`] if the operating system's
    /// random source fails.
    pub fn random() -> CredResult<Self> {
        let mut bytes = [0u8; 8];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|_| CredError::RandomSource)?;
        Ok(Self(u64::from_be_bytes(bytes)))
    }

    /// The identifier as a 64-bit value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for SmallIdentifier {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<SmallIdentifier> for u64 {
    fn from(id: SmallIdentifier) -> Self {
        id.0
    }
}

impl Display for SmallIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = encode_word(self.0);
        f.write_str(core::str::from_utf8(&digits).map_err(|_| fmt::Error)?)
    }
}

impl TryFrom<&str> for SmallIdentifier {
    type Error = CredError;

    fn try_from(encoded: &str) -> Result<Self, Self::Error> {
        decode_word(encoded).map(Self)
    }
}

impl TryFrom<String> for SmallIdentifier {
    type Error = CredError;

    fn try_from(encoded: String) -> Result<Self, Self::Error> {
        Self::try_from(encoded.as_str())
    }
}

impl FromStr for SmallIdentifier {
    type Err = CredError;

    fn from_str(encoded: &str) -> Result<Self, Self::Err> {
        Self::try_from(encoded)
    }
}
