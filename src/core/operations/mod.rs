//! Primitive operations backing the credential types.
//!
//! - [`compare`] - Constant-time byte comparison
//! - [`kdf`] - PBKDF2 dispatch, digest dispatch, salt/key generation
//! - [`base57`] - Fixed-width base-57 identifier encoding

pub mod base57;
pub mod compare;
pub mod kdf;
