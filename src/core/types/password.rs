//! `HashedPassword` - salted, iterated password hash.
//!
//! The storable result of stretching a human-chosen password: algorithm
//! tag, random salt, iteration count, and derived hash. Verification
//! re-derives with the stored parameters and compares in constant time,
//! so stored hashes keep verifying unchanged while the recommended
//! defaults strengthen release over release.
//!
//! Format: `{algorithm}.{base64url(salt)}.{iterations}.{base64url(hash)}`,
//! or the bare separator `"."` for the "no password set" sentinel.

use core::fmt::{self, Debug, Display};
use core::str::FromStr;

use subtle::Choice;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::core::algorithm::PasswordAlgorithm;
use crate::core::encoding::{self, SENTINEL};
use crate::core::error::{CredError, CredResult};
use crate::core::operations::{compare, kdf};

/// The hashing parameters new passwords should be stored with.
///
/// [`Default`] tracks the process-wide recommended constants on
/// [`PasswordAlgorithm`]; tests and migrations construct their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RehashPolicy {
    /// Minimum acceptable algorithm.
    pub algorithm: PasswordAlgorithm,
    /// Minimum acceptable iteration count.
    pub iterations: u32,
}

impl Default for RehashPolicy {
    fn default() -> Self {
        Self {
            algorithm: PasswordAlgorithm::RECOMMENDED,
            iterations: PasswordAlgorithm::RECOMMENDED_ITERATIONS,
        }
    }
}

/// A salted, iterated, algorithm-versioned password hash.
///
/// Format: `{algorithm}.{base64url(salt)}.{iterations}.{base64url(hash)}`
///
/// # Security
///
/// - Salt and hash buffers are zeroized on drop and on
///   [`close`](Self::close)
/// - `Debug` output redacts salt and hash
/// - [`matches`](Self::matches) compares in constant time and folds the
///   closed-state mask in with bitwise AND, never a short-circuit
/// - Constructors zeroize caller-supplied buffers before returning any
///   validation error, so failed calls do not leave secret material
///   behind
///
/// # Example
///
/// ```rust
/// use credhash::{HashedPassword, RehashPolicy};
///
/// let hashed = HashedPassword::generate("correct horse battery staple", &RehashPolicy::default())
///     .expect("random source available");
///
/// let stored = hashed.to_string();
///
/// // Later: restore from storage and verify.
/// let restored = HashedPassword::try_from(stored.as_str()).expect("own encoding parses");
/// assert!(restored.matches("correct horse battery staple"));
/// assert!(!restored.matches("incorrect horse battery staple"));
/// assert!(!restored.is_rehash_recommended());
/// ```
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct HashedPassword {
    #[zeroize(skip)]
    algorithm: Option<PasswordAlgorithm>,
    salt: Vec<u8>,
    iterations: u32,
    hash: Vec<u8>,
}

/// Zeroizes both caller-supplied buffers on a failed construction.
fn wipe(mut salt: Vec<u8>, mut hash: Vec<u8>, err: CredError) -> CredError {
    salt.zeroize();
    hash.zeroize();
    err
}

impl HashedPassword {
    /// The "no password set" sentinel.
    ///
    /// Parses from and serializes to the bare separator string `"."`.
    /// A sentinel never [`matches`](Self::matches).
    #[must_use]
    pub const fn none() -> Self {
        Self {
            algorithm: None,
            salt: Vec::new(),
            iterations: 0,
            hash: Vec::new(),
        }
    }

    /// Fills a fresh random salt for the given algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`CredError::RandomSource`] if the operating system's
    /// random source fails.
    pub fn generate_salt(algorithm: PasswordAlgorithm) -> CredResult<Vec<u8>> {
        kdf::generate_salt(algorithm)
    }

    /// Runs the algorithm's keyed-stretching function over a password,
    /// producing exactly [`hash_len`](PasswordAlgorithm::hash_len) bytes.
    ///
    /// The password bytes are fed to the KDF directly; no transient copy
    /// is made.
    ///
    /// # Errors
    ///
    /// Returns [`CredError::InvalidLength`] if the salt does not have
    /// the algorithm's fixed length.
    pub fn hash(
        password: &str,
        algorithm: PasswordAlgorithm,
        salt: &[u8],
        iterations: u32,
    ) -> CredResult<Vec<u8>> {
        kdf::derive_password_hash(algorithm, password.as_bytes(), salt, iterations)
    }

    /// Constructs a `HashedPassword` from its parts, taking ownership of
    /// both buffers.
    ///
    /// # Errors
    ///
    /// Returns [`CredError::InvalidLength`] for a salt or hash that does
    /// not have the algorithm's fixed length,
    /// [`CredError::InvalidIterationCount`] for zero iterations, and
    /// [`CredError::ReservedValue`] for an all-zero salt or hash (that
    /// pattern is reserved for the sentinel). Both supplied buffers are
    /// zeroized before any error is returned.
    pub fn new(
        algorithm: PasswordAlgorithm,
        salt: Vec<u8>,
        iterations: u32,
        hash: Vec<u8>,
    ) -> CredResult<Self> {
        if salt.len() != algorithm.salt_len() {
            let actual = salt.len();
            return Err(wipe(
                salt,
                hash,
                CredError::InvalidLength {
                    field: "salt",
                    expected: algorithm.salt_len(),
                    actual,
                },
            ));
        }
        if hash.len() != algorithm.hash_len() {
            let actual = hash.len();
            return Err(wipe(
                salt,
                hash,
                CredError::InvalidLength {
                    field: "hash",
                    expected: algorithm.hash_len(),
                    actual,
                },
            ));
        }
        if iterations == 0 {
            return Err(wipe(salt, hash, CredError::InvalidIterationCount));
        }
        if encoding::is_all_zero(&salt) || encoding::is_all_zero(&hash) {
            return Err(wipe(salt, hash, CredError::ReservedValue));
        }
        Ok(Self {
            algorithm: Some(algorithm),
            salt,
            iterations,
            hash,
        })
    }

    /// Hashes a password with a fresh salt and the policy's parameters
    /// in one step.
    ///
    /// # Errors
    ///
    /// Returns [`CredError::RandomSource`] if the operating system's
    /// random source fails, or [`CredError::InvalidIterationCount`] for
    /// a policy with zero iterations.
    pub fn generate(password: &str, policy: &RehashPolicy) -> CredResult<Self> {
        let salt = Self::generate_salt(policy.algorithm)?;
        let hash = Self::hash(password, policy.algorithm, &salt, policy.iterations)?;
        Self::new(policy.algorithm, salt, policy.iterations, hash)
    }

    /// The algorithm this hash was derived with, or `None` once closed.
    #[must_use]
    pub const fn algorithm(&self) -> Option<PasswordAlgorithm> {
        self.algorithm
    }

    /// The iteration count this hash was derived with (zero once closed).
    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Verifies a candidate password against this hash.
    ///
    /// Re-derives with the stored algorithm, salt, and iteration count
    /// and compares in constant time. Always `false` for a closed
    /// instance; the closed mask is folded in with bitwise AND after a
    /// full derivation against dummy parameters, so a closed miss costs
    /// the same as an ordinary miss.
    #[must_use]
    pub fn matches(&self, password: &str) -> bool {
        let open = Choice::from(u8::from(self.algorithm.is_some()));
        let algorithm = self.algorithm.unwrap_or(PasswordAlgorithm::RECOMMENDED);
        let iterations = match self.algorithm {
            Some(_) => self.iterations,
            None => PasswordAlgorithm::RECOMMENDED_ITERATIONS,
        };
        let dummy_salt;
        let salt: &[u8] = match self.algorithm {
            Some(_) => &self.salt,
            None => {
                dummy_salt = vec![0u8; algorithm.salt_len()];
                &dummy_salt
            }
        };

        let Ok(derived) =
            kdf::derive_password_hash(algorithm, password.as_bytes(), salt, iterations)
        else {
            return false;
        };
        let derived = Zeroizing::new(derived);
        bool::from(open & compare::bytes_eq_choice(&derived, &self.hash))
    }

    /// Whether this hash should be re-derived with current defaults.
    ///
    /// `true` when the stored algorithm is weaker than the recommended
    /// one or the stored iteration count is below the recommended count.
    /// Callers re-hash on the next successful [`matches`](Self::matches).
    #[must_use]
    pub fn is_rehash_recommended(&self) -> bool {
        self.is_rehash_recommended_for(&RehashPolicy::default())
    }

    /// Like [`is_rehash_recommended`](Self::is_rehash_recommended)
    /// against an explicit policy.
    #[must_use]
    pub fn is_rehash_recommended_for(&self, policy: &RehashPolicy) -> bool {
        match self.algorithm {
            Some(algorithm) => algorithm < policy.algorithm || self.iterations < policy.iterations,
            None => false,
        }
    }

    /// Whether this instance has been closed (or parsed from the
    /// sentinel encoding).
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.algorithm.is_none()
    }

    /// Overwrites the salt and hash buffers with zeros in place and
    /// drops the algorithm tag, leaving the sentinel state.
    ///
    /// Idempotent; there is no way back to the active state.
    pub fn close(&mut self) {
        self.salt.zeroize();
        self.hash.zeroize();
        self.iterations = 0;
        self.algorithm = None;
    }
}

// =============================================================================
// Display (serialization)
// =============================================================================

impl Display for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.algorithm {
            Some(algorithm) => write!(
                f,
                "{}.{}.{}.{}",
                algorithm.name(),
                encoding::encode_field(&self.salt),
                self.iterations,
                encoding::encode_field(&self.hash)
            ),
            None => f.write_str(SENTINEL),
        }
    }
}

// =============================================================================
// Debug (security: don't expose salt or hash)
// =============================================================================

impl Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("algorithm", &self.algorithm)
            .field("salt", &"[REDACTED]")
            .field("iterations", &self.iterations)
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

// =============================================================================
// Parsing
// =============================================================================

impl TryFrom<&str> for HashedPassword {
    type Error = CredError;

    fn try_from(encoded: &str) -> Result<Self, Self::Error> {
        if encoded == SENTINEL {
            return Ok(Self::none());
        }
        let fields = encoding::split_fields(encoded, 4)?;
        let algorithm = PasswordAlgorithm::find(fields[0])?;
        let salt = encoding::decode_field(fields[1], "salt", algorithm.salt_len())?;
        // Strict decimal only: `parse` alone would also accept a leading `+`.
        if !fields[2].bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(CredError::InvalidIterationCount);
        }
        let iterations: u32 = fields[2]
            .parse()
            .map_err(|_| CredError::InvalidIterationCount)?;
        let hash = encoding::decode_field(fields[3], "hash", algorithm.hash_len())?;
        Self::new(algorithm, salt, iterations, hash)
    }
}

impl TryFrom<String> for HashedPassword {
    type Error = CredError;

    fn try_from(encoded: String) -> Result<Self, Self::Error> {
        Self::try_from(encoded.as_str())
    }
}

impl FromStr for HashedPassword {
    type Err = CredError;

    fn from_str(encoded: &str) -> Result<Self, Self::Err> {
        Self::try_from(encoded)
    }
}

// =============================================================================
// PartialEq (constant-time; closed never equals)
// =============================================================================

/// Constant-time field-wise equality.
///
/// Both sides must be open with the same algorithm and iteration count;
/// a closed instance is equal to nothing, including itself, so this is
/// deliberately not [`Eq`].
impl PartialEq for HashedPassword {
    fn eq(&self, other: &Self) -> bool {
        let comparable = self.algorithm.is_some()
            && self.algorithm == other.algorithm
            && self.iterations == other.iterations;
        bool::from(
            Choice::from(u8::from(comparable))
                & compare::bytes_eq_choice(&self.salt, &other.salt)
                & compare::bytes_eq_choice(&self.hash, &other.hash),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Low iteration counts keep the suite fast; production counts are
    // exercised by the end-to-end integration test.
    const TEST_ITERATIONS: u32 = 10;

    fn quick_policy(algorithm: PasswordAlgorithm) -> RehashPolicy {
        RehashPolicy {
            algorithm,
            iterations: TEST_ITERATIONS,
        }
    }

    #[test]
    fn test_generate_and_match() -> CredResult<()> {
        let hashed = HashedPassword::generate(
            "hunter2",
            &quick_policy(PasswordAlgorithm::Pbkdf2HmacSha256),
        )?;
        assert!(hashed.matches("hunter2"));
        assert!(!hashed.matches("hunter2x"));
        assert!(!hashed.matches("Hunter2"));
        assert!(!hashed.matches(""));
        assert_eq!(hashed.algorithm(), Some(PasswordAlgorithm::Pbkdf2HmacSha256));
        assert_eq!(hashed.iterations(), TEST_ITERATIONS);
        Ok(())
    }

    #[test]
    fn test_roundtrip_every_algorithm() -> CredResult<()> {
        for algorithm in PasswordAlgorithm::ALL {
            let hashed = HashedPassword::generate("hunter2", &quick_policy(algorithm))?;
            let encoded = hashed.to_string();
            assert!(encoded.starts_with(algorithm.name()));
            let parsed = HashedPassword::try_from(encoded.as_str())?;
            assert_eq!(parsed, hashed);
            assert!(parsed.matches("hunter2"));
        }
        Ok(())
    }

    #[test]
    fn test_manual_assembly_matches_generate() -> CredResult<()> {
        let algorithm = PasswordAlgorithm::Pbkdf2HmacSha512;
        let salt = HashedPassword::generate_salt(algorithm)?;
        let hash = HashedPassword::hash("hunter2", algorithm, &salt, TEST_ITERATIONS)?;
        let hashed = HashedPassword::new(algorithm, salt, TEST_ITERATIONS, hash)?;
        assert!(hashed.matches("hunter2"));
        Ok(())
    }

    #[test]
    fn test_hash_rejects_wrong_salt_length() {
        let result = HashedPassword::hash(
            "hunter2",
            PasswordAlgorithm::Pbkdf2HmacSha512,
            &[0u8; 16],
            TEST_ITERATIONS,
        );
        assert!(matches!(
            result,
            Err(CredError::InvalidLength { field: "salt", .. })
        ));
    }

    #[test]
    fn test_new_validation() {
        let algorithm = PasswordAlgorithm::Pbkdf2HmacSha256;

        let result = HashedPassword::new(algorithm, vec![1u8; 7], TEST_ITERATIONS, vec![1u8; 32]);
        assert!(matches!(
            result,
            Err(CredError::InvalidLength { field: "salt", .. })
        ));

        let result = HashedPassword::new(algorithm, vec![1u8; 16], TEST_ITERATIONS, vec![1u8; 7]);
        assert!(matches!(
            result,
            Err(CredError::InvalidLength { field: "hash", .. })
        ));

        let result = HashedPassword::new(algorithm, vec![1u8; 16], 0, vec![1u8; 32]);
        assert!(matches!(result, Err(CredError::InvalidIterationCount)));

        let result = HashedPassword::new(algorithm, vec![0u8; 16], TEST_ITERATIONS, vec![1u8; 32]);
        assert!(matches!(result, Err(CredError::ReservedValue)));

        let result = HashedPassword::new(algorithm, vec![1u8; 16], TEST_ITERATIONS, vec![0u8; 32]);
        assert!(matches!(result, Err(CredError::ReservedValue)));
    }

    #[test]
    fn test_sentinel_roundtrip() -> CredResult<()> {
        let none = HashedPassword::none();
        assert!(none.is_closed());
        assert_eq!(none.to_string(), ".");
        assert!(!none.matches(""));
        assert!(!none.matches("anything"));

        let parsed = HashedPassword::try_from(".")?;
        assert!(parsed.is_closed());
        Ok(())
    }

    #[test]
    fn test_close_semantics() -> CredResult<()> {
        let mut hashed = HashedPassword::generate(
            "hunter2",
            &quick_policy(PasswordAlgorithm::Pbkdf2HmacSha256),
        )?;
        assert!(hashed.matches("hunter2"));

        hashed.close();
        assert!(hashed.is_closed());
        assert!(!hashed.matches("hunter2"));
        assert_eq!(hashed.to_string(), ".");
        assert_eq!(hashed.iterations(), 0);

        // Idempotent.
        hashed.close();
        assert!(hashed.is_closed());
        Ok(())
    }

    #[test]
    fn test_closed_equals_nothing() -> CredResult<()> {
        let policy = quick_policy(PasswordAlgorithm::Pbkdf2HmacSha256);
        let mut closed = HashedPassword::generate("hunter2", &policy)?;
        closed.close();
        assert_ne!(closed, closed.clone());
        assert_ne!(closed, HashedPassword::generate("hunter2", &policy)?);
        assert_ne!(HashedPassword::none(), HashedPassword::none());
        Ok(())
    }

    #[test]
    fn test_rehash_recommendation() -> CredResult<()> {
        let weakest = HashedPassword::generate(
            "hunter2",
            &RehashPolicy {
                algorithm: PasswordAlgorithm::Pbkdf2HmacSha1,
                iterations: 1,
            },
        )?;
        assert!(weakest.is_rehash_recommended());

        // Recommended algorithm but stale iteration count.
        let stale = HashedPassword::generate(
            "hunter2",
            &quick_policy(PasswordAlgorithm::RECOMMENDED),
        )?;
        assert!(stale.is_rehash_recommended());

        // Against an explicit policy the same hash can be current.
        assert!(!stale.is_rehash_recommended_for(&quick_policy(PasswordAlgorithm::RECOMMENDED)));

        // Sentinel has nothing to re-hash.
        assert!(!HashedPassword::none().is_rehash_recommended());
        Ok(())
    }

    #[test]
    fn test_parse_rejects_forged_sentinel() {
        let algorithm = PasswordAlgorithm::Pbkdf2HmacSha256;
        let zero_salt = encoding::encode_field(&vec![0u8; algorithm.salt_len()]);
        let real_hash = encoding::encode_field(&vec![1u8; algorithm.hash_len()]);
        let forged = format!("pbkdf2-sha256.{zero_salt}.{TEST_ITERATIONS}.{real_hash}");
        assert!(matches!(
            HashedPassword::try_from(forged.as_str()),
            Err(CredError::ReservedValue)
        ));
    }

    #[test]
    fn test_parse_errors() {
        // Missing fields.
        assert!(matches!(
            HashedPassword::try_from("pbkdf2-sha512.AAAA.100"),
            Err(CredError::InvalidFormat(_))
        ));
        // Unknown algorithm.
        assert!(matches!(
            HashedPassword::try_from("bcrypt.AAAA.100.BBBB"),
            Err(CredError::UnsupportedAlgorithm(_))
        ));
        // Bad iteration field.
        let algorithm = PasswordAlgorithm::Pbkdf2HmacSha256;
        let salt = encoding::encode_field(&vec![1u8; algorithm.salt_len()]);
        let hash = encoding::encode_field(&vec![1u8; algorithm.hash_len()]);
        for bad_iterations in ["abc", "+100", "-1", "0", "4294967296"] {
            let encoded = format!("pbkdf2-sha256.{salt}.{bad_iterations}.{hash}");
            assert!(
                matches!(
                    HashedPassword::try_from(encoded.as_str()),
                    Err(CredError::InvalidIterationCount)
                ),
                "iterations {bad_iterations:?} should be rejected"
            );
        }
        // Empty input.
        assert!(matches!(
            HashedPassword::try_from(""),
            Err(CredError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_is_case_insensitive_on_algorithm() -> CredResult<()> {
        let hashed = HashedPassword::generate(
            "hunter2",
            &quick_policy(PasswordAlgorithm::Pbkdf2HmacSha512),
        )?;
        let upper = hashed.to_string().replacen("pbkdf2-sha512", "PBKDF2-SHA512", 1);
        let parsed = HashedPassword::try_from(upper.as_str())?;
        assert_eq!(parsed, hashed);
        Ok(())
    }

    #[test]
    fn test_debug_redacts_secrets() -> CredResult<()> {
        let hashed = HashedPassword::generate(
            "hunter2",
            &quick_policy(PasswordAlgorithm::Pbkdf2HmacSha256),
        )?;
        let debug_str = format!("{hashed:?}");
        assert!(debug_str.contains("[REDACTED]"));
        assert!(!debug_str.contains("hunter2"));
        Ok(())
    }

    #[test]
    fn test_unicode_passwords() -> CredResult<()> {
        let policy = quick_policy(PasswordAlgorithm::Pbkdf2HmacSha256);
        let hashed = HashedPassword::generate("pässwörd🔑", &policy)?;
        assert!(hashed.matches("pässwörd🔑"));
        assert!(!hashed.matches("password"));
        Ok(())
    }
}
