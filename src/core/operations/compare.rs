//! Constant-time byte comparison.
//!
//! The single comparator shared by [`HashedPassword`] and [`HashedKey`].
//! Verification must never take time proportional to the position of the
//! first differing byte, so both credential types route every secret
//! comparison through here and nowhere else.
//!
//! [`HashedPassword`]: crate::core::types::HashedPassword
//! [`HashedKey`]: crate::core::types::HashedKey

use subtle::{Choice, ConstantTimeEq};

/// Compares two byte sequences in constant time, returning a [`Choice`].
///
/// Length inequality is folded into the result instead of short-circuiting:
/// the common prefix is always compared in full, then combined with a
/// constant-time comparison of the lengths themselves.
#[must_use]
pub fn bytes_eq_choice(a: &[u8], b: &[u8]) -> Choice {
    let common = a.len().min(b.len());
    a.len().ct_eq(&b.len()) & a[..common].ct_eq(&b[..common])
}

/// Compares two byte sequences in constant time.
#[must_use]
pub fn bytes_eq(a: &[u8], b: &[u8]) -> bool {
    bytes_eq_choice(a, b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal() {
        assert!(bytes_eq(b"", b""));
        assert!(bytes_eq(b"a", b"a"));
        assert!(bytes_eq(&[0u8; 64], &[0u8; 64]));
        assert!(bytes_eq(b"correct horse", b"correct horse"));
    }

    #[test]
    fn test_difference_position_is_irrelevant_to_result() {
        let base = [0x55u8; 32];

        let mut first = base;
        first[0] ^= 0x01;
        assert!(!bytes_eq(&base, &first));

        let mut last = base;
        last[31] ^= 0x01;
        assert!(!bytes_eq(&base, &last));
    }

    #[test]
    fn test_unequal_lengths() {
        assert!(!bytes_eq(b"abc", b"abcd"));
        assert!(!bytes_eq(b"abcd", b"abc"));
        assert!(!bytes_eq(b"", b"a"));
        // Equal prefix must not make unequal lengths compare equal.
        assert!(!bytes_eq(&[0u8; 16], &[0u8; 32]));
    }

    #[test]
    fn test_choice_combines_with_bitwise_and() {
        let open = Choice::from(0u8);
        let eq = bytes_eq_choice(b"same", b"same");
        assert!(!bool::from(open & eq));

        let open = Choice::from(1u8);
        assert!(bool::from(open & eq));
    }
}
