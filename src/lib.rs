//! Salted credential hashing and secure random identifiers.
//!
//! This crate provides the storage-side half of credential handling:
//! deriving and verifying password and key hashes, and generating the
//! random identifiers that name them. Every stored form is a compact,
//! URL-safe string with the algorithm baked in, so parameters can
//! strengthen over time without invalidating what is already persisted.
//!
//! # Quick Start
//!
//! ```rust
//! use credhash::{HashedPassword, RehashPolicy};
//!
//! // Hash a password with the current recommended parameters.
//! let hashed = HashedPassword::generate("correct horse battery staple", &RehashPolicy::default())
//!     .expect("random source available");
//!
//! // Persist the encoded form.
//! let stored = hashed.to_string();
//!
//! // Later: parse and verify in constant time.
//! let restored = HashedPassword::try_from(stored.as_str()).expect("own encoding parses");
//! assert!(restored.matches("correct horse battery staple"));
//!
//! // Re-hash on successful login once defaults have strengthened.
//! if restored.is_rehash_recommended() {
//!     // derive a fresh hash with RehashPolicy::default() and store it
//! }
//! ```
//!
//! # Types
//!
//! | Type | Format | Description |
//! |------|--------|-------------|
//! | [`HashedPassword`] | `{algorithm}.{salt}.{iterations}.{hash}` | Salted, iterated password hash |
//! | [`HashedKey`] | `{algorithm}.{hash}` | Digest hash of a random key |
//! | [`Identifier`] | 22-character base-57 | 128-bit random identifier |
//! | [`SmallIdentifier`] | 11-character base-57 | 64-bit random identifier |
//!
//! The bare separator string `"."` is the reserved sentinel for "no
//! credential set"; binary fields are unpadded URL-safe base64.
//!
//! # Passwords vs. keys
//!
//! [`HashedPassword`] runs PBKDF2 with a per-credential random salt and
//! an iteration count, because human-chosen passwords need stretching.
//! [`HashedKey`] is a single digest pass over caller-supplied
//! high-entropy key material (API tokens, session keys), where
//! stretching would add cost without adding security. Both carry their
//! algorithm in the encoded form and share one constant-time comparator.
//!
//! # Security
//!
//! This crate follows security best practices:
//!
//! - Salt and hash buffers are zeroized on drop and on `close()`
//! - Constructors zeroize caller-supplied buffers even on the error path
//! - Debug output redacts secret material
//! - All secret comparisons are constant-time (`subtle`)
//! - Randomness comes from the operating system (`OsRng`) only
//!
//! # Modules
//!
//! - [`core`] - Core types and operations

pub mod core;

// Re-export commonly used items at crate root
pub use crate::core::algorithm::{KeyAlgorithm, PasswordAlgorithm};
pub use crate::core::error::{CredError, CredResult};
pub use crate::core::types::{HashedKey, HashedPassword, Identifier, RehashPolicy, SmallIdentifier};
