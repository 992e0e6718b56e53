//! Credential type implementations.
//!
//! This module provides the first-class credential types:
//!
//! - [`HashedPassword`] - Salted, iterated password hash
//!   (`{algorithm}.{salt}.{iterations}.{hash}`)
//! - [`HashedKey`] - Digest hash of a random key (`{algorithm}.{hash}`)
//! - [`Identifier`] - 128-bit random identifier (22-character base-57)
//! - [`SmallIdentifier`] - 64-bit random identifier (11-character
//!   base-57)

mod identifier;
mod key;
mod password;

pub use identifier::{Identifier, SmallIdentifier};
pub use key::HashedKey;
pub use password::{HashedPassword, RehashPolicy};
