//! Minimal signed little-endian integer codec.
//!
//! Verification programs push numeric literals in the stack machine's
//! canonical form: the shortest two's-complement little-endian byte
//! sequence, with zero encoded as the empty sequence. A non-negative value
//! is its little-endian magnitude with a trailing `0x00` when the top
//! byte's high bit is set (keeping the sign bit clear); a negative value is
//! the two's complement of its magnitude with a trailing `0xFF` when the
//! complement's top byte has a clear high bit (so the sign bit reads set).

use num_bigint::{BigInt, Sign};

/// Encode an integer into its minimal signed little-endian form.
///
/// Zero encodes as the empty sequence.
pub fn bigint_to_bytes(value: &BigInt) -> Vec<u8> {
    if value.sign() == Sign::NoSign {
        return Vec::new();
    }
    value.to_signed_bytes_le()
}

/// Decode a minimal signed little-endian byte sequence.
///
/// The empty sequence decodes to zero.
pub fn bigint_from_bytes(bytes: &[u8]) -> BigInt {
    if bytes.is_empty() {
        return BigInt::from(0);
    }
    BigInt::from_signed_bytes_le(bytes)
}
