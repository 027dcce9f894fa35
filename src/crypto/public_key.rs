//! Public key: serialization, verification, and the canonical key order.

use std::cmp::Ordering;

use p256::ecdsa::signature::hazmat::PrehashVerifier;

use crate::crypto::scheme::{Curve, KeyAlgorithm};
use crate::crypto::signature::Signature;
use crate::crypto::Signable;
use crate::error::CryptoError;

/// Compressed SEC1 point length for the default P-256 curve.
const P256_POINT_LEN: usize = 33;

/// Compressed point length for edwards25519.
const ED25519_POINT_LEN: usize = 32;

/// A compressed public key bound to its algorithm and curve.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PublicKey {
    algorithm: KeyAlgorithm,
    curve: Curve,
    key: Vec<u8>,
}

impl PublicKey {
    /// Wrap a compressed point encoding.
    ///
    /// Points on curves with an arithmetic backend are validated; tagged
    /// keys on the remaining NIST curves are carried opaquely for wire
    /// round trips.
    pub fn new(key: Vec<u8>, algorithm: KeyAlgorithm, curve: Curve) -> Result<Self, CryptoError> {
        if !algorithm.accepts_curve(curve) {
            return Err(CryptoError::IncompatibleCurve {
                algorithm: algorithm.label(),
                curve: curve.label(),
            });
        }
        match curve {
            Curve::P256 => {
                if key.len() != P256_POINT_LEN
                    || p256::ecdsa::VerifyingKey::from_sec1_bytes(&key).is_err()
                {
                    return Err(CryptoError::InvalidPublicKey);
                }
            }
            Curve::Ed25519 => {
                if key.len() != ED25519_POINT_LEN {
                    return Err(CryptoError::InvalidPublicKey);
                }
            }
            _ => {}
        }
        Ok(PublicKey { algorithm, curve, key })
    }

    /// Deserialize a public key.
    ///
    /// A 33-byte buffer is a default-scheme (ECDSA, P-256) compressed
    /// point; anything else is `[algorithm tag][curve tag][point]`.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() == P256_POINT_LEN {
            return Self::new(bytes.to_vec(), KeyAlgorithm::Ecdsa, Curve::P256);
        }
        if bytes.len() < 2 {
            return Err(CryptoError::InvalidPublicKey);
        }
        let algorithm = KeyAlgorithm::from_tag(bytes[0])?;
        let curve = Curve::from_tag(bytes[1])?;
        Self::new(bytes[2..].to_vec(), algorithm, curve)
    }

    /// Serialize the public key: the bare compressed point for the default
    /// scheme, tagged form otherwise.
    pub fn serialize(&self) -> Vec<u8> {
        if self.algorithm == KeyAlgorithm::Ecdsa && self.curve == Curve::P256 {
            return self.key.clone();
        }
        let mut out = Vec::with_capacity(2 + self.key.len());
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

    /// Borrow the raw compressed point bytes (without tags).
    #[inline]
    pub fn key_bytes(&self) -> &[u8] {
        &self.key
    }

    /// Verify a signature over `message`.
    ///
    /// The message digest is recomputed under the signature's declared
    /// scheme. A well-formed but non-matching signature yields
    /// `Ok(false)`; errors are reserved for structural problems (scheme
    /// incompatible with the key, malformed key material).
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<bool, CryptoError> {
        let scheme = signature.scheme();
        if !self.algorithm.supports(scheme) {
            return Err(CryptoError::SchemeMismatch {
                algorithm: self.algorithm.label(),
                scheme: scheme.label(),
            });
        }
        let digest = scheme.digest(message);
        match self.algorithm {
            KeyAlgorithm::Ecdsa => self.verify_ecdsa(&digest, signature.as_bytes()),
            KeyAlgorithm::Eddsa => self.verify_eddsa(&digest, signature.as_bytes()),
        }
    }

    /// Verify a signature over a signable object's canonical content.
    pub fn verify_signable<S: Signable>(
        &self,
        signable: &S,
        signature: &Signature,
    ) -> Result<bool, CryptoError> {
        self.verify(&signable.sign_content(), signature)
    }

    /// Total order over serialized bytes.
    ///
    /// This is the canonical ordering multi-signature programs sort key
    /// sets by, so independently assembled groups converge on one address.
    pub fn compare(a: &PublicKey, b: &PublicKey) -> Ordering {
        a.serialize().cmp(&b.serialize())
    }

    fn verify_ecdsa(&self, digest: &[u8], raw: &[u8; 64]) -> Result<bool, CryptoError> {
        if self.curve != Curve::P256 {
            return Err(CryptoError::UnsupportedCurve { tag: self.curve.tag() });
        }
        let verifying_key = p256::ecdsa::VerifyingKey::from_sec1_bytes(&self.key)
            .map_err(|_| CryptoError::InvalidPublicKey)?;
        // r or s outside the field is a non-matching signature, not a
        // structural failure.
        let signature = match p256::ecdsa::Signature::from_slice(raw) {
            Ok(signature) => signature,
            Err(_) => return Ok(false),
        };
        Ok(verifying_key.verify_prehash(digest, &signature).is_ok())
    }

    fn verify_eddsa(&self, digest: &[u8], raw: &[u8; 64]) -> Result<bool, CryptoError> {
        use ed25519_dalek::Verifier as _;
        let point: [u8; ED25519_POINT_LEN] =
            self.key.as_slice().try_into().map_err(|_| CryptoError::InvalidPublicKey)?;
        let verifying_key = ed25519_dalek::VerifyingKey::from_bytes(&point)
            .map_err(|_| CryptoError::InvalidPublicKey)?;
        let signature = ed25519_dalek::Signature::from_bytes(raw);
        Ok(verifying_key.verify(digest, &signature).is_ok())
    }
}

impl Ord for PublicKey {
    fn cmp(&self, other: &Self) -> Ordering {
        PublicKey::compare(self, other)
    }
}

impl PartialOrd for PublicKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
