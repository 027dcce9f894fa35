//! Error types for the TST core crate.

use std::fmt;

/// Top-level error type for tst-core operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// Cryptographic operation failed.
    Crypto(CryptoError),
    /// Binary decoding failed.
    Decode(DecodeError),
    /// Verification-program assembly failed.
    Script(ScriptError),
    /// Address encoding or decoding failed.
    Address(AddressError),
    /// Private-key vault operation failed.
    Vault(VaultError),
    /// Wallet-record (account) operation failed.
    Account(AccountError),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::Crypto(e) => write!(f, "crypto error: {}", e),
            CoreError::Decode(e) => write!(f, "decode error: {}", e),
            CoreError::Script(e) => write!(f, "script error: {}", e),
            CoreError::Address(e) => write!(f, "address error: {}", e),
            CoreError::Vault(e) => write!(f, "vault error: {}", e),
            CoreError::Account(e) => write!(f, "account error: {}", e),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<CryptoError> for CoreError {
    fn from(e: CryptoError) -> Self {
        CoreError::Crypto(e)
    }
}

impl From<DecodeError> for CoreError {
    fn from(e: DecodeError) -> Self {
        CoreError::Decode(e)
    }
}

impl From<ScriptError> for CoreError {
    fn from(e: ScriptError) -> Self {
        CoreError::Script(e)
    }
}

impl From<AddressError> for CoreError {
    fn from(e: AddressError) -> Self {
        CoreError::Address(e)
    }
}

impl From<VaultError> for CoreError {
    fn from(e: VaultError) -> Self {
        CoreError::Vault(e)
    }
}

impl From<AccountError> for CoreError {
    fn from(e: AccountError) -> Self {
        CoreError::Account(e)
    }
}

/// Errors related to key algebra and signatures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CryptoError {
    /// An algorithm tag byte is not one of the supported algorithms.
    UnsupportedAlgorithm {
        /// The tag byte found in the input.
        tag: u8,
    },
    /// A curve tag byte is not one of the supported curves, or the curve
    /// has no arithmetic backend in this crate.
    UnsupportedCurve {
        /// The tag byte of the offending curve.
        tag: u8,
    },
    /// A textual algorithm, curve, or scheme label is not recognized.
    UnknownLabel {
        /// The label found in the input.
        label: String,
    },
    /// The key's algorithm and curve belong to different families.
    IncompatibleCurve {
        /// Label of the key algorithm.
        algorithm: &'static str,
        /// Label of the offending curve.
        curve: &'static str,
    },
    /// The requested signature scheme's curve family does not match the key.
    SchemeMismatch {
        /// Label of the key algorithm.
        algorithm: &'static str,
        /// Label of the requested scheme.
        scheme: &'static str,
    },
    /// The private key bytes are malformed (wrong length or invalid scalar).
    InvalidPrivateKey,
    /// The public key bytes are malformed.
    InvalidPublicKey,
    /// The signature bytes are malformed (not exactly 64 bytes).
    InvalidSignature,
    /// The underlying curve routine rejected the signing request.
    SigningFailed,
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::UnsupportedAlgorithm { tag } => {
                write!(f, "unsupported algorithm tag: 0x{:02x}", tag)
            }
            CryptoError::UnsupportedCurve { tag } => {
                write!(f, "unsupported curve tag: 0x{:02x}", tag)
            }
            CryptoError::UnknownLabel { label } => write!(f, "unknown label: {}", label),
            CryptoError::IncompatibleCurve { algorithm, curve } => {
                write!(f, "curve {} is not usable with algorithm {}", curve, algorithm)
            }
            CryptoError::SchemeMismatch { algorithm, scheme } => {
                write!(f, "signature scheme {} does not match key type {}", scheme, algorithm)
            }
            CryptoError::InvalidPrivateKey => write!(f, "invalid private key format"),
            CryptoError::InvalidPublicKey => write!(f, "invalid public key format"),
            CryptoError::InvalidSignature => write!(f, "invalid signature format"),
            CryptoError::SigningFailed => write!(f, "signing failed"),
        }
    }
}

impl std::error::Error for CryptoError {}

/// Errors produced by the binary reader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// A read ran past the end of the buffer.
    UnexpectedEof {
        /// Bytes the read required.
        needed: usize,
        /// Bytes left in the buffer.
        remaining: usize,
    },
    /// A seek targeted a position outside the buffer.
    BadSeek {
        /// The requested target position.
        target: i64,
        /// The buffer length.
        len: usize,
    },
    /// A length-prefixed string was not valid UTF-8.
    InvalidUtf8,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::UnexpectedEof { needed, remaining } => {
                write!(f, "unexpected end of input: needed {} bytes, {} remaining", needed, remaining)
            }
            DecodeError::BadSeek { target, len } => {
                write!(f, "seek target {} outside buffer of length {}", target, len)
            }
            DecodeError::InvalidUtf8 => write!(f, "string is not valid UTF-8"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Errors related to verification-program assembly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptError {
    /// Multi-signature parameters violate `1 <= m <= n <= 1024`.
    InvalidMultisigParams {
        /// The requested signature threshold.
        m: usize,
        /// The number of public keys supplied.
        n: usize,
    },
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::InvalidMultisigParams { m, n } => {
                write!(f, "invalid multi-sig parameters: m={}, n={}", m, n)
            }
        }
    }
}

impl std::error::Error for ScriptError {}

/// Errors related to address encoding and decoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddressError {
    /// The input contains characters outside the base-58 alphabet.
    InvalidBase58,
    /// The decoded payload has the wrong length.
    BadLength {
        /// Expected byte count.
        expected: usize,
        /// Actual byte count.
        actual: usize,
    },
    /// Re-encoding the decoded address did not reproduce the input string.
    ChecksumMismatch,
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressError::InvalidBase58 => write!(f, "invalid base-58 string"),
            AddressError::BadLength { expected, actual } => {
                write!(f, "bad address payload length: expected {} bytes, got {}", expected, actual)
            }
            AddressError::ChecksumMismatch => write!(f, "address checksum verification failed"),
        }
    }
}

impl std::error::Error for AddressError {}

/// Errors produced by the private-key vault.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VaultError {
    /// The KDF parameters are unusable (N not a power of two, wrong
    /// derived-key length, or values rejected by the KDF).
    InvalidKdfParams,
    /// The stored payload is structurally broken: bad base-64 or too short
    /// to contain an authentication tag.
    MalformedPayload,
    /// Tag verification failed: wrong password or corrupted/tampered data.
    AuthenticationFailed,
    /// The cipher rejected the encryption request.
    EncryptionFailed,
}

impl fmt::Display for VaultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VaultError::InvalidKdfParams => write!(f, "invalid key-derivation parameters"),
            VaultError::MalformedPayload => write!(f, "malformed encrypted payload"),
            VaultError::AuthenticationFailed => {
                write!(f, "decryption failed (wrong password or corrupted data)")
            }
            VaultError::EncryptionFailed => write!(f, "encryption failed"),
        }
    }
}

impl std::error::Error for VaultError {}

/// Errors produced at the wallet-record (account) boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccountError {
    /// The record JSON is malformed, has unknown fields, or misses fields.
    Json(String),
    /// The stored salt is not valid base-64.
    InvalidSalt,
    /// The stored public key is not valid hex.
    InvalidPublicKeyHex,
}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountError::Json(msg) => write!(f, "record parse failed: {}", msg),
            AccountError::InvalidSalt => write!(f, "stored salt is not valid base-64"),
            AccountError::InvalidPublicKeyHex => write!(f, "stored public key is not valid hex"),
        }
    }
}

impl std::error::Error for AccountError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = CoreError::Crypto(CryptoError::UnsupportedAlgorithm { tag: 0x42 });
        assert!(e.to_string().contains("0x42"));

        let e = CoreError::Decode(DecodeError::UnexpectedEof { needed: 8, remaining: 3 });
        assert!(e.to_string().contains("needed 8 bytes"));

        let e = CoreError::Script(ScriptError::InvalidMultisigParams { m: 3, n: 2 });
        assert!(e.to_string().contains("m=3"));

        let e = CoreError::Vault(VaultError::AuthenticationFailed);
        assert!(e.to_string().contains("wrong password"));
    }

    #[test]
    fn test_error_conversion() {
        let crypto_err = CryptoError::InvalidPublicKey;
        let core_err: CoreError = crypto_err.into();
        assert!(matches!(core_err, CoreError::Crypto(CryptoError::InvalidPublicKey)));

        let addr_err = AddressError::ChecksumMismatch;
        let core_err: CoreError = addr_err.into();
        assert!(matches!(core_err, CoreError::Address(AddressError::ChecksumMismatch)));
    }
}
