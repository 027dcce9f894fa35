//! Signature value type.

use crate::crypto::scheme::SignatureScheme;
use crate::error::CryptoError;

/// Raw signature length: two 32-byte big-endian components for both curve
/// families.
pub const SIGNATURE_LEN: usize = 64;

/// A signature together with the scheme it was produced under.
///
/// Immutable and value-equal; the scheme travels with the bytes so a
/// verifier can recompute the right message digest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    scheme: SignatureScheme,
    bytes: [u8; SIGNATURE_LEN],
}

impl Signature {
    /// Wrap raw signature bytes, rejecting anything but exactly 64 bytes.
    pub fn new(scheme: SignatureScheme, bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != SIGNATURE_LEN {
            return Err(CryptoError::InvalidSignature);
        }
        let mut raw = [0u8; SIGNATURE_LEN];
        raw.copy_from_slice(bytes);
        Ok(Signature { scheme, bytes: raw })
    }

    /// Wrap an already fixed-width signature.
    pub fn from_array(scheme: SignatureScheme, bytes: [u8; SIGNATURE_LEN]) -> Self {
        Signature { scheme, bytes }
    }

    /// The scheme this signature was produced under.
    #[inline]
    pub fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    /// Borrow the raw 64 signature bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.bytes
    }

    /// Copy out the raw 64 signature bytes.
    #[inline]
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_length_accepted() {
        let sig = Signature::new(SignatureScheme::EcdsaSha256, &[7u8; 64]).unwrap();
        assert_eq!(sig.scheme(), SignatureScheme::EcdsaSha256);
        assert_eq!(sig.as_bytes(), &[7u8; 64]);
    }

    #[test]
    fn test_wrong_length_rejected() {
        for len in [0usize, 1, 63, 65, 128] {
            let bytes = vec![0u8; len];
            assert_eq!(
                Signature::new(SignatureScheme::EddsaSha512, &bytes),
                Err(CryptoError::InvalidSignature),
                "length {}",
                len
            );
        }
    }

    #[test]
    fn test_value_equality() {
        let a = Signature::from_array(SignatureScheme::EcdsaSha256, [1u8; 64]);
        let b = Signature::from_array(SignatureScheme::EcdsaSha256, [1u8; 64]);
        let c = Signature::from_array(SignatureScheme::EcdsaSha512, [1u8; 64]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
