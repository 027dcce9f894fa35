//! Key algorithms, curves, and signature schemes.
//!
//! The pairing rules live here as plain lookup tables: which curve a key
//! algorithm defaults to, which digest each scheme applies, and which
//! schemes a key algorithm accepts. Every sign and verify consults
//! [`KeyAlgorithm::supports`] before touching curve arithmetic.

use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};

use crate::error::CryptoError;

/// Curve family of a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAlgorithm {
    /// ECDSA over a NIST prime curve.
    Ecdsa,
    /// EdDSA over edwards25519.
    Eddsa,
}

impl KeyAlgorithm {
    /// One-byte tag used in tagged key serialization.
    pub const fn tag(self) -> u8 {
        match self {
            KeyAlgorithm::Ecdsa => 0x12,
            KeyAlgorithm::Eddsa => 0x14,
        }
    }

    /// Resolve a serialized algorithm tag.
    pub fn from_tag(tag: u8) -> Result<Self, CryptoError> {
        match tag {
            0x12 => Ok(KeyAlgorithm::Ecdsa),
            0x14 => Ok(KeyAlgorithm::Eddsa),
            tag => Err(CryptoError::UnsupportedAlgorithm { tag }),
        }
    }

    /// Textual label stored in wallet records.
    pub const fn label(self) -> &'static str {
        match self {
            KeyAlgorithm::Ecdsa => "ECDSA",
            KeyAlgorithm::Eddsa => "EDDSA",
        }
    }

    /// Resolve a wallet-record label.
    pub fn from_label(label: &str) -> Result<Self, CryptoError> {
        match label {
            "ECDSA" => Ok(KeyAlgorithm::Ecdsa),
            "EDDSA" => Ok(KeyAlgorithm::Eddsa),
            other => Err(CryptoError::UnknownLabel { label: other.to_string() }),
        }
    }

    /// The curve newly generated keys of this algorithm use.
    pub const fn default_curve(self) -> Curve {
        match self {
            KeyAlgorithm::Ecdsa => Curve::P256,
            KeyAlgorithm::Eddsa => Curve::Ed25519,
        }
    }

    /// The scheme used when a caller signs without naming one.
    pub const fn default_scheme(self) -> SignatureScheme {
        match self {
            KeyAlgorithm::Ecdsa => SignatureScheme::EcdsaSha256,
            KeyAlgorithm::Eddsa => SignatureScheme::EddsaSha512,
        }
    }

    /// Whether `curve` belongs to this algorithm's family.
    pub const fn accepts_curve(self, curve: Curve) -> bool {
        match self {
            KeyAlgorithm::Ecdsa => {
                matches!(curve, Curve::P224 | Curve::P256 | Curve::P384 | Curve::P521)
            }
            KeyAlgorithm::Eddsa => matches!(curve, Curve::Ed25519),
        }
    }

    /// The algorithm/scheme compatibility table.
    ///
    /// ECDSA keys accept exactly the eight ECDSA digest variants; EdDSA
    /// keys accept exactly `SHA512withEdDSA`.
    pub const fn supports(self, scheme: SignatureScheme) -> bool {
        use SignatureScheme::*;
        match self {
            KeyAlgorithm::Ecdsa => matches!(
                scheme,
                EcdsaSha224
                    | EcdsaSha256
                    | EcdsaSha384
                    | EcdsaSha512
                    | EcdsaSha3_224
                    | EcdsaSha3_256
                    | EcdsaSha3_384
                    | EcdsaSha3_512
            ),
            KeyAlgorithm::Eddsa => matches!(scheme, EddsaSha512),
        }
    }
}

/// Named curve a key lives on.
///
/// All tags round-trip through serialization; arithmetic is implemented for
/// the default curves (P-256 and edwards25519). The other NIST tags exist
/// for wire compatibility and fail with `UnsupportedCurve` when used for
/// derivation or signing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Curve {
    /// NIST P-224.
    P224,
    /// NIST P-256 (secp256r1), the default ECDSA curve.
    P256,
    /// NIST P-384.
    P384,
    /// NIST P-521.
    P521,
    /// edwards25519, the EdDSA curve.
    Ed25519,
}

impl Curve {
    /// One-byte tag used in tagged key serialization.
    pub const fn tag(self) -> u8 {
        match self {
            Curve::P224 => 0x01,
            Curve::P256 => 0x02,
            Curve::P384 => 0x03,
            Curve::P521 => 0x04,
            Curve::Ed25519 => 0x19,
        }
    }

    /// Resolve a serialized curve tag.
    pub fn from_tag(tag: u8) -> Result<Self, CryptoError> {
        match tag {
            0x01 => Ok(Curve::P224),
            0x02 => Ok(Curve::P256),
            0x03 => Ok(Curve::P384),
            0x04 => Ok(Curve::P521),
            0x19 => Ok(Curve::Ed25519),
            tag => Err(CryptoError::UnsupportedCurve { tag }),
        }
    }

    /// Textual label stored in wallet records.
    pub const fn label(self) -> &'static str {
        match self {
            Curve::P224 => "P-224",
            Curve::P256 => "P-256",
            Curve::P384 => "P-384",
            Curve::P521 => "P-521",
            Curve::Ed25519 => "ed25519",
        }
    }

    /// Resolve a wallet-record label.
    pub fn from_label(label: &str) -> Result<Self, CryptoError> {
        match label {
            "P-224" => Ok(Curve::P224),
            "P-256" => Ok(Curve::P256),
            "P-384" => Ok(Curve::P384),
            "P-521" => Ok(Curve::P521),
            "ed25519" => Ok(Curve::Ed25519),
            other => Err(CryptoError::UnknownLabel { label: other.to_string() }),
        }
    }
}

/// A hash-curve combination a message can be signed under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignatureScheme {
    /// ECDSA over a SHA-224 digest.
    EcdsaSha224,
    /// ECDSA over a SHA-256 digest, the ECDSA default.
    EcdsaSha256,
    /// ECDSA over a SHA-384 digest.
    EcdsaSha384,
    /// ECDSA over a SHA-512 digest.
    EcdsaSha512,
    /// ECDSA over a SHA3-224 digest.
    EcdsaSha3_224,
    /// ECDSA over a SHA3-256 digest.
    EcdsaSha3_256,
    /// ECDSA over a SHA3-384 digest.
    EcdsaSha3_384,
    /// ECDSA over a SHA3-512 digest.
    EcdsaSha3_512,
    /// Ed25519 over a SHA-512 digest, the only EdDSA scheme.
    EddsaSha512,
}

impl SignatureScheme {
    /// The curve family this scheme signs with.
    pub const fn algorithm(self) -> KeyAlgorithm {
        match self {
            SignatureScheme::EddsaSha512 => KeyAlgorithm::Eddsa,
            _ => KeyAlgorithm::Ecdsa,
        }
    }

    /// Textual label of the scheme.
    pub const fn label(self) -> &'static str {
        match self {
            SignatureScheme::EcdsaSha224 => "SHA224withECDSA",
            SignatureScheme::EcdsaSha256 => "SHA256withECDSA",
            SignatureScheme::EcdsaSha384 => "SHA384withECDSA",
            SignatureScheme::EcdsaSha512 => "SHA512withECDSA",
            SignatureScheme::EcdsaSha3_224 => "SHA3-224withECDSA",
            SignatureScheme::EcdsaSha3_256 => "SHA3-256withECDSA",
            SignatureScheme::EcdsaSha3_384 => "SHA3-384withECDSA",
            SignatureScheme::EcdsaSha3_512 => "SHA3-512withECDSA",
            SignatureScheme::EddsaSha512 => "SHA512withEdDSA",
        }
    }

    /// Resolve a scheme label.
    pub fn from_label(label: &str) -> Result<Self, CryptoError> {
        match label {
            "SHA224withECDSA" => Ok(SignatureScheme::EcdsaSha224),
            "SHA256withECDSA" => Ok(SignatureScheme::EcdsaSha256),
            "SHA384withECDSA" => Ok(SignatureScheme::EcdsaSha384),
            "SHA512withECDSA" => Ok(SignatureScheme::EcdsaSha512),
            "SHA3-224withECDSA" => Ok(SignatureScheme::EcdsaSha3_224),
            "SHA3-256withECDSA" => Ok(SignatureScheme::EcdsaSha3_256),
            "SHA3-384withECDSA" => Ok(SignatureScheme::EcdsaSha3_384),
            "SHA3-512withECDSA" => Ok(SignatureScheme::EcdsaSha3_512),
            "SHA512withEdDSA" => Ok(SignatureScheme::EddsaSha512),
            other => Err(CryptoError::UnknownLabel { label: other.to_string() }),
        }
    }

    /// Compute this scheme's message digest.
    pub fn digest(self, message: &[u8]) -> Vec<u8> {
        match self {
            SignatureScheme::EcdsaSha224 => Sha224::digest(message).to_vec(),
            SignatureScheme::EcdsaSha256 => Sha256::digest(message).to_vec(),
            SignatureScheme::EcdsaSha384 => Sha384::digest(message).to_vec(),
            SignatureScheme::EcdsaSha512 | SignatureScheme::EddsaSha512 => {
                Sha512::digest(message).to_vec()
            }
            SignatureScheme::EcdsaSha3_224 => Sha3_224::digest(message).to_vec(),
            SignatureScheme::EcdsaSha3_256 => Sha3_256::digest(message).to_vec(),
            SignatureScheme::EcdsaSha3_384 => Sha3_384::digest(message).to_vec(),
            SignatureScheme::EcdsaSha3_512 => Sha3_512::digest(message).to_vec(),
        }
    }
}
