//! Algorithm registries for password stretching and key digests.
//!
//! Two ordered enumerations back every encoded credential: one for the
//! PBKDF2 family used on human-chosen passwords, one for the plain
//! message digests used on already-random key material. Declaration
//! order is the strength relation, weakest first; re-hash decisions
//! compare against it directly.
//!
//! Both registries are append-only: new algorithms may be added at the
//! strong end, but existing variants must never be removed or reordered,
//! since persisted hashes reference them by canonical name and strength
//! comparisons rely on declaration order.

use crate::core::error::{CredError, CredResult};

// =============================================================================
// Password algorithms (keyed stretching)
// =============================================================================

/// A key-derivation algorithm for password hashing.
///
/// Each variant fixes the canonical persisted name, the salt length, and
/// the derived hash length. Canonical names are URL-safe and never
/// contain the `.` field separator.
///
/// The derive order (`PartialOrd`/`Ord`) follows declaration order and
/// is the strength ordering used by
/// [`HashedPassword::is_rehash_recommended`].
///
/// [`HashedPassword::is_rehash_recommended`]: crate::core::types::HashedPassword::is_rehash_recommended
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PasswordAlgorithm {
    /// PBKDF2 with HMAC-SHA-1. Legacy; kept so stored hashes keep
    /// verifying, never used for new hashes.
    Pbkdf2HmacSha1,
    /// PBKDF2 with HMAC-SHA-256.
    Pbkdf2HmacSha256,
    /// PBKDF2 with HMAC-SHA-384.
    Pbkdf2HmacSha384,
    /// PBKDF2 with HMAC-SHA-512.
    Pbkdf2HmacSha512,
}

impl PasswordAlgorithm {
    /// All supported algorithms, weakest first.
    pub const ALL: [Self; 4] = [
        Self::Pbkdf2HmacSha1,
        Self::Pbkdf2HmacSha256,
        Self::Pbkdf2HmacSha384,
        Self::Pbkdf2HmacSha512,
    ];

    /// The algorithm new password hashes should use.
    pub const RECOMMENDED: Self = Self::Pbkdf2HmacSha512;

    /// The iteration count new password hashes should use.
    ///
    /// May increase between releases; callers re-hash on successful login
    /// when [`HashedPassword::is_rehash_recommended`] reports `true`.
    ///
    /// [`HashedPassword::is_rehash_recommended`]: crate::core::types::HashedPassword::is_rehash_recommended
    pub const RECOMMENDED_ITERATIONS: u32 = 25_000;

    /// The canonical persisted name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pbkdf2HmacSha1 => "pbkdf2-sha1",
            Self::Pbkdf2HmacSha256 => "pbkdf2-sha256",
            Self::Pbkdf2HmacSha384 => "pbkdf2-sha384",
            Self::Pbkdf2HmacSha512 => "pbkdf2-sha512",
        }
    }

    /// The salt length in bytes.
    #[must_use]
    pub const fn salt_len(self) -> usize {
        match self {
            Self::Pbkdf2HmacSha1 | Self::Pbkdf2HmacSha256 => 16,
            Self::Pbkdf2HmacSha384 => 24,
            Self::Pbkdf2HmacSha512 => 32,
        }
    }

    /// The derived hash length in bytes (the underlying digest width).
    #[must_use]
    pub const fn hash_len(self) -> usize {
        match self {
            Self::Pbkdf2HmacSha1 => 20,
            Self::Pbkdf2HmacSha256 => 32,
            Self::Pbkdf2HmacSha384 => 48,
            Self::Pbkdf2HmacSha512 => 64,
        }
    }

    /// Looks up an algorithm by canonical name, case-insensitively.
    ///
    /// The search runs strongest to weakest, so a case-insensitive name
    /// collision would resolve to the stronger algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`CredError::UnsupportedAlgorithm`] for an unrecognized
    /// name.
    pub fn find(name: &str) -> CredResult<Self> {
        Self::ALL
            .iter()
            .rev()
            .find(|algorithm| algorithm.name().eq_ignore_ascii_case(name))
            .copied()
            .ok_or_else(|| CredError::UnsupportedAlgorithm(name.to_string()))
    }
}

// =============================================================================
// Key algorithms (single-pass digest)
// =============================================================================

/// A message-digest algorithm for hashing already-random key material.
///
/// Key hashing performs a single digest pass, no salt and no stretching:
/// the input is required to carry [`key_len`](Self::key_len) bytes of
/// entropy, so rainbow tables and brute force are already infeasible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyAlgorithm {
    /// SHA-224.
    Sha224,
    /// SHA-256.
    Sha256,
    /// SHA-384.
    Sha384,
    /// SHA-512.
    Sha512,
}

impl KeyAlgorithm {
    /// All supported algorithms, weakest first.
    pub const ALL: [Self; 4] = [Self::Sha224, Self::Sha256, Self::Sha384, Self::Sha512];

    /// The algorithm new key hashes should use.
    pub const RECOMMENDED: Self = Self::Sha256;

    /// The canonical persisted name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha224 => "sha-224",
            Self::Sha256 => "sha-256",
            Self::Sha384 => "sha-384",
            Self::Sha512 => "sha-512",
        }
    }

    /// The required plaintext key length in bytes.
    ///
    /// Matches the digest width, so the key carries at least as much
    /// entropy as the hash can hold.
    #[must_use]
    pub const fn key_len(self) -> usize {
        self.hash_len()
    }

    /// The digest output length in bytes.
    #[must_use]
    pub const fn hash_len(self) -> usize {
        match self {
            Self::Sha224 => 28,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    /// Looks up an algorithm by canonical name, case-insensitively,
    /// searching strongest to weakest.
    ///
    /// # Errors
    ///
    /// Returns [`CredError::UnsupportedAlgorithm`] for an unrecognized
    /// name.
    pub fn find(name: &str) -> CredResult<Self> {
        Self::ALL
            .iter()
            .rev()
            .find(|algorithm| algorithm.name().eq_ignore_ascii_case(name))
            .copied()
            .ok_or_else(|| CredError::UnsupportedAlgorithm(name.to_string()))
    }
}
