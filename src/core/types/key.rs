//! `HashedKey` - digest hash of a random opaque key.
//!
//! Verifies high-entropy secrets (API tokens, session keys) without
//! keyed stretching: the plaintext key already carries a full digest
//! width of entropy, so a single hash pass is sufficient and salt or
//! iteration counts would add nothing.
//!
//! Format: `{algorithm}.{base64url(hash)}`, or the bare separator `"."`
//! for the "no key set" sentinel.

use core::fmt::{self, Debug, Display};
use core::str::FromStr;

use subtle::Choice;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::core::algorithm::KeyAlgorithm;
use crate::core::encoding::{self, SENTINEL};
use crate::core::error::{CredError, CredResult};
use crate::core::operations::{compare, kdf};

/// The digest hash of a cryptographically random key.
///
/// Format: `{algorithm}.{base64url(hash)}`
///
/// # Security
///
/// - The hash buffer is zeroized on drop and on [`close`](Self::close)
/// - `Debug` output redacts the hash
/// - Equality uses constant-time comparison and is `false` whenever
///   either side is closed, so a cleared credential never verifies
///
/// # Example
///
/// ```rust
/// use credhash::{HashedKey, KeyAlgorithm};
///
/// // Issue a new key: the plaintext goes to the caller, the hash to storage.
/// let (plaintext, hashed) = HashedKey::generate(KeyAlgorithm::RECOMMENDED)
///     .expect("random source available");
///
/// let stored = hashed.to_string();
///
/// // Later: hash the presented key and compare against storage.
/// let restored = HashedKey::try_from(stored.as_str()).expect("own encoding parses");
/// assert!(restored.matches(&plaintext));
/// ```
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct HashedKey {
    #[zeroize(skip)]
    algorithm: Option<KeyAlgorithm>,
    hash: Vec<u8>,
}

impl HashedKey {
    /// The "no key set" sentinel.
    ///
    /// Parses from and serializes to the bare separator string `"."`.
    /// A sentinel never [`matches`](Self::matches) and never compares
    /// equal, not even to itself.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            algorithm: None,
            hash: Vec::new(),
        }
    }

    /// Constructs a `HashedKey` from an algorithm and a previously
    /// derived hash, taking ownership of the buffer.
    ///
    /// # Errors
    ///
    /// Returns [`CredError::InvalidLength`] when the hash does not have
    /// the algorithm's fixed length, and [`CredError::ReservedValue`]
    /// when it is all-zero (that pattern is reserved for the sentinel).
    /// The supplied buffer is zeroized before either error is returned.
    pub fn new(algorithm: KeyAlgorithm, mut hash: Vec<u8>) -> CredResult<Self> {
        if hash.len() != algorithm.hash_len() {
            let actual = hash.len();
            hash.zeroize();
            return Err(CredError::InvalidLength {
                field: "hash",
                expected: algorithm.hash_len(),
                actual,
            });
        }
        if encoding::is_all_zero(&hash) {
            hash.zeroize();
            return Err(CredError::ReservedValue);
        }
        Ok(Self {
            algorithm: Some(algorithm),
            hash,
        })
    }

    /// Hashes caller-supplied plaintext key material.
    ///
    /// # Errors
    ///
    /// Returns [`CredError::InvalidLength`] when the key does not carry
    /// the algorithm's required [`key_len`](KeyAlgorithm::key_len) bytes.
    pub fn hash(algorithm: KeyAlgorithm, key: &[u8]) -> CredResult<Self> {
        let hash = kdf::digest_key(algorithm, key)?;
        Self::new(algorithm, hash)
    }

    /// Generates a fresh random key and its hash in one step.
    ///
    /// The plaintext key is handed to the caller once, wrapped in
    /// [`Zeroizing`] so it is wiped when the caller drops it; only the
    /// `HashedKey` should be persisted.
    ///
    /// # Errors
    ///
    /// Returns [`CredError::RandomSource`] if the operating system's
    /// random source fails.
    pub fn generate(algorithm: KeyAlgorithm) -> CredResult<(Zeroizing<Vec<u8>>, Self)> {
        let key = Zeroizing::new(kdf::generate_key(algorithm)?);
        let hashed = Self::hash(algorithm, &key)?;
        Ok((key, hashed))
    }

    /// The algorithm this hash was derived with, or `None` once closed.
    #[must_use]
    pub const fn algorithm(&self) -> Option<KeyAlgorithm> {
        self.algorithm
    }

    /// Verifies presented plaintext key material against this hash.
    ///
    /// Always `false` for a closed instance; the closed mask is folded
    /// in with bitwise AND after the comparison rather than checked up
    /// front, so a closed miss costs the same as an ordinary miss.
    #[must_use]
    pub fn matches(&self, key: &[u8]) -> bool {
        let open = Choice::from(u8::from(self.algorithm.is_some()));
        let algorithm = self.algorithm.unwrap_or(KeyAlgorithm::RECOMMENDED);
        let Ok(candidate) = kdf::digest_key(algorithm, key) else {
            return false;
        };
        let candidate = Zeroizing::new(candidate);
        bool::from(open & compare::bytes_eq_choice(&candidate, &self.hash))
    }

    /// Whether this instance has been closed (or parsed from the
    /// sentinel encoding).
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.algorithm.is_none()
    }

    /// Overwrites the hash buffer with zeros in place and drops the
    /// algorithm tag, leaving the sentinel state.
    ///
    /// Idempotent; there is no way back to the active state.
    pub fn close(&mut self) {
        self.hash.zeroize();
        self.algorithm = None;
    }
}

// =============================================================================
// Display (serialization)
// =============================================================================

impl Display for HashedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.algorithm {
            Some(algorithm) => write!(
                f,
                "{}.{}",
                algorithm.name(),
                encoding::encode_field(&self.hash)
            ),
            None => f.write_str(SENTINEL),
        }
    }
}

// =============================================================================
// Debug (security: don't expose the hash)
// =============================================================================

impl Debug for HashedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedKey")
            .field("algorithm", &self.algorithm)
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

// =============================================================================
// Parsing
// =============================================================================

impl TryFrom<&str> for HashedKey {
    type Error = CredError;

    fn try_from(encoded: &str) -> Result<Self, Self::Error> {
        if encoded == SENTINEL {
            return Ok(Self::none());
        }
        let fields = encoding::split_fields(encoded, 2)?;
        let algorithm = KeyAlgorithm::find(fields[0])?;
        let hash = encoding::decode_field(fields[1], "hash", algorithm.hash_len())?;
        Self::new(algorithm, hash)
    }
}

impl TryFrom<String> for HashedKey {
    type Error = CredError;

    fn try_from(encoded: String) -> Result<Self, Self::Error> {
        Self::try_from(encoded.as_str())
    }
}

impl FromStr for HashedKey {
    type Err = CredError;

    fn from_str(encoded: &str) -> Result<Self, Self::Err> {
        Self::try_from(encoded)
    }
}

// =============================================================================
// PartialEq (constant-time; closed never equals)
// =============================================================================

/// Constant-time equality.
///
/// Both sides must be open and on the same algorithm; a closed instance
/// is equal to nothing, including itself, so this is deliberately not
/// [`Eq`].
impl PartialEq for HashedKey {
    fn eq(&self, other: &Self) -> bool {
        let comparable = self.algorithm.is_some() && self.algorithm == other.algorithm;
        bool::from(
            Choice::from(u8::from(comparable)) & compare::bytes_eq_choice(&self.hash, &other.hash),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HashedKey {
        let key = vec![0x42u8; KeyAlgorithm::Sha256.key_len()];
        HashedKey::hash(KeyAlgorithm::Sha256, &key).expect("key length is valid")
    }

    #[test]
    fn test_generate_and_match() -> CredResult<()> {
        let (key, hashed) = HashedKey::generate(KeyAlgorithm::Sha512)?;
        assert_eq!(key.len(), KeyAlgorithm::Sha512.key_len());
        assert!(hashed.matches(&key));
        assert_eq!(hashed.algorithm(), Some(KeyAlgorithm::Sha512));
        Ok(())
    }

    #[test]
    fn test_mismatched_key() -> CredResult<()> {
        let (key, hashed) = HashedKey::generate(KeyAlgorithm::Sha256)?;
        let mut wrong = key.to_vec();
        wrong[0] ^= 1;
        assert!(!hashed.matches(&wrong));
        assert!(!hashed.matches(&[]));
        Ok(())
    }

    #[test]
    fn test_roundtrip() -> CredResult<()> {
        for algorithm in KeyAlgorithm::ALL {
            let key = vec![0x42u8; algorithm.key_len()];
            let hashed = HashedKey::hash(algorithm, &key)?;
            let encoded = hashed.to_string();
            assert!(encoded.starts_with(algorithm.name()));
            let parsed = HashedKey::try_from(encoded.as_str())?;
            assert_eq!(parsed, hashed);
        }
        Ok(())
    }

    #[test]
    fn test_parse_is_case_insensitive_on_algorithm() -> CredResult<()> {
        let encoded = sample().to_string();
        let upper = encoded.replacen("sha-256", "SHA-256", 1);
        let parsed = HashedKey::try_from(upper.as_str())?;
        assert_eq!(parsed, sample());
        Ok(())
    }

    #[test]
    fn test_sentinel_roundtrip() -> CredResult<()> {
        let none = HashedKey::none();
        assert!(none.is_closed());
        assert_eq!(none.to_string(), ".");
        let parsed = HashedKey::try_from(".")?;
        assert!(parsed.is_closed());
        Ok(())
    }

    #[test]
    fn test_close_semantics() -> CredResult<()> {
        let key = vec![0x42u8; KeyAlgorithm::Sha256.key_len()];
        let mut hashed = sample();
        assert!(hashed.matches(&key));

        hashed.close();
        assert!(hashed.is_closed());
        assert!(!hashed.matches(&key));
        assert_eq!(hashed.to_string(), ".");

        // Idempotent.
        hashed.close();
        assert!(hashed.is_closed());
        Ok(())
    }

    #[test]
    fn test_closed_equals_nothing() {
        let mut closed = sample();
        closed.close();
        assert_ne!(closed, sample());
        assert_ne!(closed, closed.clone());
        assert_ne!(HashedKey::none(), HashedKey::none());
    }

    #[test]
    fn test_equality_requires_same_algorithm() -> CredResult<()> {
        let key = vec![0x42u8; 32];
        let a = HashedKey::hash(KeyAlgorithm::Sha256, &key)?;
        let b = HashedKey::hash(KeyAlgorithm::Sha256, &key)?;
        assert_eq!(a, b);

        // Same input, different digest: never equal.
        let key48 = vec![0x42u8; 48];
        let c = HashedKey::hash(KeyAlgorithm::Sha384, &key48)?;
        assert_ne!(a, c);
        Ok(())
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        let result = HashedKey::new(KeyAlgorithm::Sha256, vec![1u8; 16]);
        assert!(matches!(
            result,
            Err(CredError::InvalidLength { field: "hash", .. })
        ));
    }

    #[test]
    fn test_new_rejects_all_zero() {
        let result = HashedKey::new(KeyAlgorithm::Sha256, vec![0u8; 32]);
        assert!(matches!(result, Err(CredError::ReservedValue)));
    }

    #[test]
    fn test_hash_rejects_wrong_key_length() {
        let result = HashedKey::hash(KeyAlgorithm::Sha256, &[0x42u8; 31]);
        assert!(matches!(
            result,
            Err(CredError::InvalidLength { field: "key", .. })
        ));
    }

    #[test]
    fn test_parse_rejects_forged_sentinel() {
        // A well-formed encoding whose hash decodes to all zeros must not
        // produce an active value.
        let forged = format!("sha-256.{}", encoding::encode_field(&[0u8; 32]));
        let result = HashedKey::try_from(forged.as_str());
        assert!(matches!(result, Err(CredError::ReservedValue)));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            HashedKey::try_from("sha-256"),
            Err(CredError::InvalidFormat(_))
        ));
        assert!(matches!(
            HashedKey::try_from("md5.AAAA"),
            Err(CredError::UnsupportedAlgorithm(_))
        ));
        assert!(matches!(
            HashedKey::try_from("sha-256.!!!"),
            Err(CredError::Base64Decode(_))
        ));
        assert!(matches!(
            HashedKey::try_from(""),
            Err(CredError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_debug_redacts_hash() {
        let debug_str = format!("{:?}", sample());
        assert!(debug_str.contains("[REDACTED]"));
        assert!(debug_str.contains("Sha256"));
    }
}
