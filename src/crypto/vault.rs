//! Password-based encryption of private keys at rest.
//!
//! # Payload layout
//!
//! | Field      | Size (bytes) | Description                              |
//! |------------|--------------|------------------------------------------|
//! | Ciphertext | variable     | AES-256-GCM over the raw key bytes       |
//! | Tag        | 16           | GCM authentication tag                   |
//!
//! The whole payload is stored base-64 encoded; the salt is stored
//! separately (also base-64) and the scrypt parameters travel with the
//! record. Nothing is re-defaulted at decrypt time.
//!
//! # Key schedule
//!
//! scrypt(NFC(passphrase), salt, params) derives a 64-byte stream. The IV
//! is bytes 0..12 and the cipher key is bytes 32..64; the middle region is
//! unused, fixed by the deployed record format. The account's base-58
//! address text is bound as additional authenticated data, so a payload
//! cannot be replayed under a different address.

use aes_gcm::aead::{Aead, Payload};
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization as _;

use crate::error::VaultError;

/// GCM authentication tag size in bytes.
pub const TAG_LEN: usize = 16;

/// Derived-stream length the IV/key split is defined over.
pub const DERIVED_KEY_LEN: usize = 64;

/// IV region of the derived stream.
const IV_RANGE: std::ops::Range<usize> = 0..12;

/// Cipher-key region of the derived stream.
const KEY_RANGE: std::ops::Range<usize> = 32..64;

/// scrypt cost parameters.
///
/// These are caller-supplied at every encrypt and decrypt and must be
/// persisted alongside the payload and salt: a record encrypted under one
/// parameter set is unrecoverable under another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScryptParams {
    /// CPU/memory cost, a power of two greater than one.
    pub n: u32,
    /// Block size.
    pub r: u32,
    /// Parallelism.
    pub p: u32,
    /// Derived key length; the record format fixes this at 64.
    #[serde(rename = "dkLen")]
    pub dk_len: u32,
}

impl ScryptParams {
    /// The parameter set new records are written with.
    pub const RECOMMENDED: ScryptParams = ScryptParams { n: 4096, r: 8, p: 8, dk_len: 64 };

    fn log_n(&self) -> Result<u8, VaultError> {
        if self.n <= 1 || !self.n.is_power_of_two() {
            return Err(VaultError::InvalidKdfParams);
        }
        Ok(self.n.trailing_zeros() as u8)
    }
}

/// Derive the 64-byte key stream for a passphrase/salt pair.
fn derive_stream(
    passphrase: &str,
    salt: &[u8],
    params: &ScryptParams,
) -> Result<[u8; DERIVED_KEY_LEN], VaultError> {
    if params.dk_len as usize != DERIVED_KEY_LEN {
        return Err(VaultError::InvalidKdfParams);
    }
    let scrypt_params = scrypt::Params::new(params.log_n()?, params.r, params.p, DERIVED_KEY_LEN)
        .map_err(|_| VaultError::InvalidKdfParams)?;

    let normalized: String = passphrase.nfc().collect();
    let mut stream = [0u8; DERIVED_KEY_LEN];
    scrypt::scrypt(normalized.as_bytes(), salt, &scrypt_params, &mut stream)
        .map_err(|_| VaultError::InvalidKdfParams)?;
    Ok(stream)
}

/// Encrypt raw private-key bytes under a passphrase.
///
/// `address` is the key's base-58 address text; it is authenticated but
/// not encrypted. Returns the base-64 `ciphertext ‖ tag` payload.
pub fn encrypt(
    private_key: &[u8],
    address: &str,
    salt: &[u8],
    passphrase: &str,
    params: &ScryptParams,
) -> Result<String, VaultError> {
    let stream = derive_stream(passphrase, salt, params)?;

    let cipher = Aes256Gcm::new_from_slice(&stream[KEY_RANGE])
        .map_err(|_| VaultError::EncryptionFailed)?;
    let nonce = Nonce::from_slice(&stream[IV_RANGE]);
    let ciphertext = cipher
        .encrypt(nonce, Payload { msg: private_key, aad: address.as_bytes() })
        .map_err(|_| VaultError::EncryptionFailed)?;

    Ok(BASE64.encode(ciphertext))
}

/// Decrypt a base-64 `ciphertext ‖ tag` payload back to raw key bytes.
///
/// Structural problems (bad base-64, payload shorter than a tag) are
/// [`VaultError::MalformedPayload`]. A failed tag check (wrong password,
/// wrong address, or tampered data) is
/// [`VaultError::AuthenticationFailed`] and yields no partial plaintext.
pub fn decrypt(
    payload: &str,
    address: &str,
    salt: &[u8],
    passphrase: &str,
    params: &ScryptParams,
) -> Result<Vec<u8>, VaultError> {
    let raw = BASE64.decode(payload).map_err(|_| VaultError::MalformedPayload)?;
    if raw.len() < TAG_LEN {
        return Err(VaultError::MalformedPayload);
    }

    let stream = derive_stream(passphrase, salt, params)?;
    let cipher = Aes256Gcm::new_from_slice(&stream[KEY_RANGE])
        .map_err(|_| VaultError::AuthenticationFailed)?;
    let nonce = Nonce::from_slice(&stream[IV_RANGE]);

    cipher
        .decrypt(nonce, Payload { msg: raw.as_slice(), aad: address.as_bytes() })
        .map_err(|_| VaultError::AuthenticationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Small N keeps the KDF cheap in tests; the split logic is identical.
    const TEST_PARAMS: ScryptParams = ScryptParams { n: 16, r: 8, p: 1, dk_len: 64 };
    const SALT: [u8; 16] = [0x5C; 16];
    const ADDRESS: &str = "AXmQDzzvpT9ksrjvYfznnL9zKwaslEY3Zs";

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let secret = [0x42u8; 32];
        let payload = encrypt(&secret, ADDRESS, &SALT, "passphrase", &TEST_PARAMS).unwrap();
        let recovered = decrypt(&payload, ADDRESS, &SALT, "passphrase", &TEST_PARAMS).unwrap();
        assert_eq!(recovered, secret);
    }

    #[test]
    fn test_payload_is_ciphertext_plus_tag() {
        let secret = [0x42u8; 32];
        let payload = encrypt(&secret, ADDRESS, &SALT, "pw", &TEST_PARAMS).unwrap();
        let raw = BASE64.decode(payload).unwrap();
        assert_eq!(raw.len(), secret.len() + TAG_LEN);
    }

    #[test]
    fn test_wrong_password_fails_authentication() {
        let secret = [0x42u8; 32];
        let payload = encrypt(&secret, ADDRESS, &SALT, "pw1", &TEST_PARAMS).unwrap();
        let result = decrypt(&payload, ADDRESS, &SALT, "pw2", &TEST_PARAMS);
        assert_eq!(result, Err(VaultError::AuthenticationFailed));
    }

    #[test]
    fn test_wrong_address_fails_authentication() {
        let secret = [0x42u8; 32];
        let payload = encrypt(&secret, ADDRESS, &SALT, "pw", &TEST_PARAMS).unwrap();
        let result = decrypt(&payload, "AnotherAddressEntirely1111111111", &SALT, "pw", &TEST_PARAMS);
        assert_eq!(result, Err(VaultError::AuthenticationFailed));
    }

    #[test]
    fn test_tampered_ciphertext_fails_authentication() {
        let secret = [0x42u8; 32];
        let payload = encrypt(&secret, ADDRESS, &SALT, "pw", &TEST_PARAMS).unwrap();

        let mut raw = BASE64.decode(payload).unwrap();
        raw[3] ^= 0x01;
        let tampered = BASE64.encode(raw);

        let result = decrypt(&tampered, ADDRESS, &SALT, "pw", &TEST_PARAMS);
        assert_eq!(result, Err(VaultError::AuthenticationFailed));
    }

    #[test]
    fn test_bad_base64_is_malformed() {
        let result = decrypt("not//valid==base64!!", ADDRESS, &SALT, "pw", &TEST_PARAMS);
        assert_eq!(result, Err(VaultError::MalformedPayload));
    }

    #[test]
    fn test_short_payload_is_malformed() {
        let short = BASE64.encode([0u8; TAG_LEN - 1]);
        let result = decrypt(&short, ADDRESS, &SALT, "pw", &TEST_PARAMS);
        assert_eq!(result, Err(VaultError::MalformedPayload));
    }

    #[test]
    fn test_non_power_of_two_cost_rejected() {
        let params = ScryptParams { n: 1000, ..TEST_PARAMS };
        let result = encrypt(&[0u8; 32], ADDRESS, &SALT, "pw", &params);
        assert_eq!(result, Err(VaultError::InvalidKdfParams));
    }

    #[test]
    fn test_wrong_derived_length_rejected() {
        let params = ScryptParams { dk_len: 32, ..TEST_PARAMS };
        let result = encrypt(&[0u8; 32], ADDRESS, &SALT, "pw", &params);
        assert_eq!(result, Err(VaultError::InvalidKdfParams));
    }

    #[test]
    fn test_different_params_cannot_decrypt() {
        let secret = [0x42u8; 32];
        let payload = encrypt(&secret, ADDRESS, &SALT, "pw", &TEST_PARAMS).unwrap();
        let other = ScryptParams { n: 32, ..TEST_PARAMS };
        let result = decrypt(&payload, ADDRESS, &SALT, "pw", &other);
        assert_eq!(result, Err(VaultError::AuthenticationFailed));
    }

    #[test]
    fn test_passphrase_is_nfc_normalized() {
        let secret = [0x42u8; 32];
        // "é" composed (U+00E9) vs decomposed (U+0065 U+0301).
        let composed = "caf\u{00E9}";
        let decomposed = "cafe\u{0301}";

        let payload = encrypt(&secret, ADDRESS, &SALT, composed, &TEST_PARAMS).unwrap();
        let recovered = decrypt(&payload, ADDRESS, &SALT, decomposed, &TEST_PARAMS).unwrap();
        assert_eq!(recovered, secret);
    }

    #[test]
    fn test_empty_passphrase_roundtrip() {
        let secret = [0x01u8; 32];
        let payload = encrypt(&secret, ADDRESS, &SALT, "", &TEST_PARAMS).unwrap();
        let recovered = decrypt(&payload, ADDRESS, &SALT, "", &TEST_PARAMS).unwrap();
        assert_eq!(recovered, secret);
    }

    #[test]
    fn test_recommended_params_are_persistable() {
        let json = serde_json::to_string(&ScryptParams::RECOMMENDED).unwrap();
        assert_eq!(json, r#"{"n":4096,"r":8,"p":8,"dkLen":64}"#);
        let parsed: ScryptParams = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ScryptParams::RECOMMENDED);
    }
}
