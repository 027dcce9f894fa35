//! Private key: generation, serialization, derivation, and signing.

use std::fmt;

use p256::ecdsa::signature::hazmat::PrehashSigner;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::crypto::public_key::PublicKey;
use crate::crypto::scheme::{Curve, KeyAlgorithm, SignatureScheme};
use crate::crypto::signature::{Signature, SIGNATURE_LEN};
use crate::crypto::{Signable, Signer};
use crate::error::CryptoError;

/// Private scalar length in bytes.
pub const PRIVATE_KEY_LEN: usize = 32;

/// Serialized length of a tagged private key:
/// `[algorithm tag][curve tag][32-byte scalar]`.
const TAGGED_PRIVATE_KEY_LEN: usize = 2 + PRIVATE_KEY_LEN;

/// A 32-byte private scalar bound to its algorithm and curve.
///
/// Immutable once constructed. The scalar never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    algorithm: KeyAlgorithm,
    curve: Curve,
    key: [u8; PRIVATE_KEY_LEN],
}

impl PrivateKey {
    /// Generate a random private key for the default scheme (ECDSA over
    /// P-256).
    pub fn random() -> Self {
        Self::random_for(KeyAlgorithm::Ecdsa)
    }

    /// Generate a random private key for `algorithm` on its default curve.
    pub fn random_for(algorithm: KeyAlgorithm) -> Self {
        let mut key = [0u8; PRIVATE_KEY_LEN];
        OsRng.fill_bytes(&mut key);
        PrivateKey { algorithm, curve: algorithm.default_curve(), key }
    }

    /// Wrap an externally supplied scalar (e.g. from HD derivation).
    ///
    /// The scalar must be exactly 32 bytes and the curve must belong to the
    /// algorithm's family.
    pub fn new(key: &[u8], algorithm: KeyAlgorithm, curve: Curve) -> Result<Self, CryptoError> {
        if key.len() != PRIVATE_KEY_LEN {
            return Err(CryptoError::InvalidPrivateKey);
        }
        if !algorithm.accepts_curve(curve) {
            return Err(CryptoError::IncompatibleCurve {
                algorithm: algorithm.label(),
                curve: curve.label(),
            });
        }
        let mut raw = [0u8; PRIVATE_KEY_LEN];
        raw.copy_from_slice(key);
        Ok(PrivateKey { algorithm, curve, key: raw })
    }

    /// Deserialize a private key.
    ///
    /// A 32-byte buffer is a default-scheme (ECDSA, P-256) scalar; a
    /// 34-byte buffer is `[algorithm tag][curve tag][scalar]`. Anything
    /// else is malformed.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, CryptoError> {
        match bytes.len() {
            PRIVATE_KEY_LEN => Self::new(bytes, KeyAlgorithm::Ecdsa, Curve::P256),
            TAGGED_PRIVATE_KEY_LEN => {
                let algorithm = KeyAlgorithm::from_tag(bytes[0])?;
                let curve = Curve::from_tag(bytes[1])?;
                Self::new(&bytes[2..], algorithm, curve)
            }
            _ => Err(CryptoError::InvalidPrivateKey),
        }
    }

    /// Serialize the private key: 32 raw bytes for the default scheme,
    /// tagged form otherwise.
    pub fn serialize(&self) -> Vec<u8> {
        if self.algorithm == KeyAlgorithm::Ecdsa && self.curve == Curve::P256 {
            return self.key.to_vec();
        }
        let mut out = Vec::with_capacity(TAGGED_PRIVATE_KEY_LEN);
        out.push(self.algorithm.tag());
        out.push(self.curve.tag());
        out.extend_from_slice(&self.key);
        out
    }

    /// The key's algorithm.
    #[inline]
    pub fn algorithm(&self) -> KeyAlgorithm {
        self.algorithm
    }

    /// The key's curve.
    #[inline]
    pub fn curve(&self) -> Curve {
        self.curve
    }

    /// Borrow the raw 32-byte scalar.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; PRIVATE_KEY_LEN] {
        &self.key
    }

    /// Derive the corresponding public key.
    ///
    /// Deterministic: the same scalar always yields the same compressed
    /// point encoding.
    pub fn public_key(&self) -> Result<PublicKey, CryptoError> {
        match self.curve {
            Curve::P256 => {
                let signing_key = p256::ecdsa::SigningKey::from_slice(&self.key)
                    .map_err(|_| CryptoError::InvalidPrivateKey)?;
                let point = signing_key.verifying_key().to_encoded_point(true);
                PublicKey::new(point.as_bytes().to_vec(), self.algorithm, self.curve)
            }
            Curve::Ed25519 => {
                let signing_key = ed25519_dalek::SigningKey::from_bytes(&self.key);
                let point = signing_key.verifying_key().to_bytes();
                PublicKey::new(point.to_vec(), self.algorithm, self.curve)
            }
            other => Err(CryptoError::UnsupportedCurve { tag: other.tag() }),
        }
    }

    /// Sign a message under the key algorithm's default scheme.
    pub fn sign(&self, message: &[u8]) -> Result<Signature, CryptoError> {
        self.sign_with(message, self.algorithm.default_scheme())
    }

    /// Sign a message under an explicit scheme.
    ///
    /// Fails with [`CryptoError::SchemeMismatch`] when the scheme's curve
    /// family disagrees with the key's algorithm.
    pub fn sign_with(&self, message: &[u8], scheme: SignatureScheme) -> Result<Signature, CryptoError> {
        if !self.algorithm.supports(scheme) {
            return Err(CryptoError::SchemeMismatch {
                algorithm: self.algorithm.label(),
                scheme: scheme.label(),
            });
        }
        let digest = scheme.digest(message);
        let raw = match self.algorithm {
            KeyAlgorithm::Ecdsa => self.sign_ecdsa(&digest)?,
            KeyAlgorithm::Eddsa => self.sign_eddsa(&digest),
        };
        Ok(Signature::from_array(scheme, raw))
    }

    /// Sign a signable object's canonical content under the default scheme.
    pub fn sign_signable<S: Signable>(&self, signable: &S) -> Result<Signature, CryptoError> {
        self.sign(&signable.sign_content())
    }

    fn sign_ecdsa(&self, digest: &[u8]) -> Result<[u8; SIGNATURE_LEN], CryptoError> {
        if self.curve != Curve::P256 {
            return Err(CryptoError::UnsupportedCurve { tag: self.curve.tag() });
        }
        let signing_key = p256::ecdsa::SigningKey::from_slice(&self.key)
            .map_err(|_| CryptoError::InvalidPrivateKey)?;
        let signature: p256::ecdsa::Signature =
            signing_key.sign_prehash(digest).map_err(|_| CryptoError::SigningFailed)?;
        let signature = signature.normalize_s().unwrap_or(signature);
        let mut raw = [0u8; SIGNATURE_LEN];
        raw.copy_from_slice(&signature.to_bytes());
        Ok(raw)
    }

    fn sign_eddsa(&self, digest: &[u8]) -> [u8; SIGNATURE_LEN] {
        use ed25519_dalek::Signer as _;
        let signing_key = ed25519_dalek::SigningKey::from_bytes(&self.key);
        signing_key.sign(digest).to_bytes()
    }
}

impl Signer for PrivateKey {
    fn sign_message(&self, message: &[u8], scheme: SignatureScheme) -> Result<Signature, CryptoError> {
        self.sign_with(message, scheme)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("algorithm", &self.algorithm)
            .field("curve", &self.curve)
            .field("key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_defaults() {
        let key = PrivateKey::random();
        assert_eq!(key.algorithm(), KeyAlgorithm::Ecdsa);
        assert_eq!(key.curve(), Curve::P256);
    }

    #[test]
    fn test_random_keys_are_unique() {
        let a = PrivateKey::random();
        let b = PrivateKey::random();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_default_serialization_is_raw_32_bytes() {
        let key = PrivateKey::random();
        let bytes = key.serialize();
        assert_eq!(bytes.len(), 32);
        let recovered = PrivateKey::deserialize(&bytes).unwrap();
        assert_eq!(recovered, key);
    }

    #[test]
    fn test_tagged_serialization_roundtrip() {
        let key = PrivateKey::random_for(KeyAlgorithm::Eddsa);
        let bytes = key.serialize();
        assert_eq!(bytes.len(), 34);
        assert_eq!(bytes[0], 0x14);
        assert_eq!(bytes[1], 0x19);
        let recovered = PrivateKey::deserialize(&bytes).unwrap();
        assert_eq!(recovered, key);
    }

    #[test]
    fn test_deserialize_unknown_tags_fail() {
        let mut bytes = vec![0x13, 0x02];
        bytes.extend_from_slice(&[1u8; 32]);
        assert!(matches!(
            PrivateKey::deserialize(&bytes),
            Err(CryptoError::UnsupportedAlgorithm { tag: 0x13 })
        ));

        let mut bytes = vec![0x12, 0x20];
        bytes.extend_from_slice(&[1u8; 32]);
        assert!(matches!(
            PrivateKey::deserialize(&bytes),
            Err(CryptoError::UnsupportedCurve { tag: 0x20 })
        ));
    }

    #[test]
    fn test_deserialize_bad_lengths_fail() {
        for len in [0usize, 16, 33, 35] {
            let bytes = vec![0x12; len];
            assert!(PrivateKey::deserialize(&bytes).is_err(), "length {}", len);
        }
    }

    #[test]
    fn test_mismatched_curve_rejected() {
        let err = PrivateKey::new(&[1u8; 32], KeyAlgorithm::Ecdsa, Curve::Ed25519).unwrap_err();
        assert!(matches!(err, CryptoError::IncompatibleCurve { .. }));
        let err = PrivateKey::new(&[1u8; 32], KeyAlgorithm::Eddsa, Curve::P256).unwrap_err();
        assert!(matches!(err, CryptoError::IncompatibleCurve { .. }));
    }

    #[test]
    fn test_public_key_derivation_is_deterministic() {
        let key = PrivateKey::random();
        let a = key.public_key().unwrap();
        let b = key.public_key().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.serialize().len(), 33);
    }

    #[test]
    fn test_eddsa_public_key_is_32_bytes() {
        let key = PrivateKey::random_for(KeyAlgorithm::Eddsa);
        let public = key.public_key().unwrap();
        assert_eq!(public.key_bytes().len(), 32);
    }

    #[test]
    fn test_derivation_on_backendless_curve_fails() {
        let key = PrivateKey::new(&[1u8; 32], KeyAlgorithm::Ecdsa, Curve::P384).unwrap();
        assert!(matches!(key.public_key(), Err(CryptoError::UnsupportedCurve { tag: 0x03 })));
    }

    #[test]
    fn test_sign_rejects_foreign_scheme() {
        let key = PrivateKey::random();
        let err = key.sign_with(b"message", SignatureScheme::EddsaSha512).unwrap_err();
        assert!(matches!(err, CryptoError::SchemeMismatch { .. }));

        let key = PrivateKey::random_for(KeyAlgorithm::Eddsa);
        let err = key.sign_with(b"message", SignatureScheme::EcdsaSha256).unwrap_err();
        assert!(matches!(err, CryptoError::SchemeMismatch { .. }));
    }

    #[test]
    fn test_sign_uses_default_scheme() {
        let key = PrivateKey::random();
        let sig = key.sign(b"message").unwrap();
        assert_eq!(sig.scheme(), SignatureScheme::EcdsaSha256);

        let key = PrivateKey::random_for(KeyAlgorithm::Eddsa);
        let sig = key.sign(b"message").unwrap();
        assert_eq!(sig.scheme(), SignatureScheme::EddsaSha512);
    }

    #[test]
    fn test_signable_content_is_signed() {
        struct Memo(Vec<u8>);
        impl Signable for Memo {
            fn sign_content(&self) -> Vec<u8> {
                self.0.clone()
            }
        }

        let key = PrivateKey::random_for(KeyAlgorithm::Eddsa);
        let memo = Memo(b"canonical content".to_vec());
        let from_signable = key.sign_signable(&memo).unwrap();
        // Ed25519 is deterministic, so signing the extracted content directly
        // must produce the same bytes.
        let direct = key.sign(b"canonical content").unwrap();
        assert_eq!(from_signable, direct);
    }

    #[test]
    fn test_signer_trait_delegates() {
        let key = PrivateKey::random();
        let via_trait = <PrivateKey as Signer>::sign_message(&key, b"m", SignatureScheme::EcdsaSha256);
        assert!(via_trait.is_ok());
    }

    #[test]
    fn test_debug_redacts_scalar() {
        let key = PrivateKey::random();
        let rendered = format!("{:?}", key);
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains(&hex::encode(key.as_bytes())));
    }
}
