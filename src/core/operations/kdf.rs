//! Key derivation and digest primitives.
//!
//! Dispatches from the algorithm registries to the underlying RustCrypto
//! primitives: PBKDF2 over the named HMAC for password stretching, a
//! single digest pass for key hashing, and the process-wide secure
//! random source for salt and key generation.

use rand_core::{OsRng, TryRngCore};

use crate::core::algorithm::{KeyAlgorithm, PasswordAlgorithm};
use crate::core::encoding::is_all_zero;
use crate::core::error::{CredError, CredResult};

/// Fills a fresh salt for the given password algorithm from the secure
/// random source.
///
/// An all-zero draw is redrawn: that pattern is reserved for the cleared
/// sentinel and would be rejected at construction.
///
/// # Errors
///
/// Returns [`CredError::RandomSource`] if the operating system's random
/// source fails.
pub fn generate_salt(algorithm: PasswordAlgorithm) -> CredResult<Vec<u8>> {
    random_nonzero(algorithm.salt_len())
}

/// Generates plaintext key material for the given key algorithm.
///
/// The returned bytes are the secret itself (the analog of a password,
/// without the human-memorable constraint); callers hash them with
/// [`digest_key`] and store only the hash.
///
/// # Errors
///
/// Returns [`CredError::RandomSource`] if the operating system's random
/// source fails.
pub fn generate_key(algorithm: KeyAlgorithm) -> CredResult<Vec<u8>> {
    random_nonzero(algorithm.key_len())
}

fn random_nonzero(len: usize) -> CredResult<Vec<u8>> {
    let mut bytes = vec![0u8; len];
    loop {
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|_| CredError::RandomSource)?;
        if !is_all_zero(&bytes) {
            return Ok(bytes);
        }
    }
}

/// Runs the algorithm's keyed-stretching function over a password.
///
/// Produces exactly [`hash_len`](PasswordAlgorithm::hash_len) bytes. The
/// password bytes are consumed in place; no transient copy is made.
///
/// # Errors
///
/// Returns [`CredError::InvalidLength`] if the salt does not have the
/// algorithm's fixed length, or [`CredError::KeyDerivation`] if the
/// PBKDF2 primitive rejects its parameters.
pub fn derive_password_hash(
    algorithm: PasswordAlgorithm,
    password: &[u8],
    salt: &[u8],
    iterations: u32,
) -> CredResult<Vec<u8>> {
    use hmac::Hmac;
    use sha1::Sha1;
    use sha2::{Sha256, Sha384, Sha512};

    if salt.len() != algorithm.salt_len() {
        return Err(CredError::InvalidLength {
            field: "salt",
            expected: algorithm.salt_len(),
            actual: salt.len(),
        });
    }

    let mut hash = vec![0u8; algorithm.hash_len()];
    match algorithm {
        PasswordAlgorithm::Pbkdf2HmacSha1 => {
            pbkdf2::pbkdf2::<Hmac<Sha1>>(password, salt, iterations, &mut hash)
        }
        PasswordAlgorithm::Pbkdf2HmacSha256 => {
            pbkdf2::pbkdf2::<Hmac<Sha256>>(password, salt, iterations, &mut hash)
        }
        PasswordAlgorithm::Pbkdf2HmacSha384 => {
            pbkdf2::pbkdf2::<Hmac<Sha384>>(password, salt, iterations, &mut hash)
        }
        PasswordAlgorithm::Pbkdf2HmacSha512 => {
            pbkdf2::pbkdf2::<Hmac<Sha512>>(password, salt, iterations, &mut hash)
        }
    }
    .map_err(|_| CredError::KeyDerivation)?;

    Ok(hash)
}

/// Runs a single digest pass over plaintext key material.
///
/// # Errors
///
/// Returns [`CredError::InvalidLength`] if the key does not carry the
/// algorithm's required entropy.
pub fn digest_key(algorithm: KeyAlgorithm, key: &[u8]) -> CredResult<Vec<u8>> {
    use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

    if key.len() != algorithm.key_len() {
        return Err(CredError::InvalidLength {
            field: "key",
            expected: algorithm.key_len(),
            actual: key.len(),
        });
    }

    let hash = match algorithm {
        KeyAlgorithm::Sha224 => Sha224::digest(key).to_vec(),
        KeyAlgorithm::Sha256 => Sha256::digest(key).to_vec(),
        KeyAlgorithm::Sha384 => Sha384::digest(key).to_vec(),
        KeyAlgorithm::Sha512 => Sha512::digest(key).to_vec(),
    };
    Ok(hash)
}
