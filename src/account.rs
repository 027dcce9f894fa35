//! Wallet-record boundary.
//!
//! An [`Account`] is the JSON record the external wallet layer persists
//! for one key: the base-58 address, the vault-encrypted private key, the
//! salt, the scrypt parameters it was sealed under, and the public key
//! with its algorithm labels. Parsing is strict: unknown or missing
//! fields are rejected before any core type is constructed.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::crypto::{vault, Address, Curve, KeyAlgorithm, PrivateKey, PublicKey, ScryptParams};
use crate::error::{AccountError, CoreError};

/// Salt length for newly created records.
const SALT_LEN: usize = 16;

/// Curve parameters of the stored public key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyParameters {
    /// Curve label, e.g. `"P-256"`.
    pub curve: String,
}

/// A persisted wallet record for one encrypted key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct Account {
    address: String,
    label: String,
    lock: bool,
    is_default: bool,
    #[serde(rename = "enc-alg")]
    enc_alg: String,
    key: String,
    salt: String,
    public_key: String,
    algorithm: String,
    parameters: KeyParameters,
    scrypt: ScryptParams,
}

impl Account {
    /// Create a record by sealing `private_key` under `password`.
    ///
    /// A random 16-byte salt is drawn; the supplied scrypt parameters are
    /// stored in the record so decryption never has to assume them.
    pub fn create(
        label: &str,
        private_key: &PrivateKey,
        password: &str,
        scrypt: &ScryptParams,
    ) -> Result<Self, CoreError> {
        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);
        Self::create_with_salt(label, private_key, password, &salt, scrypt)
    }

    /// Create a record with a caller-supplied salt.
    pub fn create_with_salt(
        label: &str,
        private_key: &PrivateKey,
        password: &str,
        salt: &[u8],
        scrypt: &ScryptParams,
    ) -> Result<Self, CoreError> {
        let public_key = private_key.public_key()?;
        let address = Address::from_pub_key(&public_key);
        let address_b58 = address.to_base58();

        let encrypted =
            vault::encrypt(private_key.as_bytes(), &address_b58, salt, password, scrypt)?;

        Ok(Account {
            address: address_b58,
            label: label.to_string(),
            lock: false,
            is_default: false,
            enc_alg: "aes-256-gcm".to_string(),
            key: encrypted,
            salt: BASE64.encode(salt),
            public_key: hex::encode(public_key.serialize()),
            algorithm: public_key.algorithm().label().to_string(),
            parameters: KeyParameters { curve: public_key.curve().label().to_string() },
            scrypt: *scrypt,
        })
    }

    /// Unseal the private key with `password`.
    ///
    /// A wrong password surfaces as the vault's authentication failure; it
    /// never yields partial key material.
    pub fn decrypt_key(&self, password: &str) -> Result<PrivateKey, CoreError> {
        let address = Address::from_base58(&self.address)?;
        let salt = BASE64.decode(&self.salt).map_err(|_| AccountError::InvalidSalt)?;

        let raw =
            vault::decrypt(&self.key, &address.to_base58(), &salt, password, &self.scrypt)?;
        let algorithm = KeyAlgorithm::from_label(&self.algorithm)?;
        let curve = Curve::from_label(&self.parameters.curve)?;
        PrivateKey::new(&raw, algorithm, curve).map_err(Into::into)
    }

    /// The record's base-58 address text.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The record's label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The scrypt parameters the key was sealed under.
    pub fn scrypt(&self) -> &ScryptParams {
        &self.scrypt
    }

    /// Reconstruct the stored public key.
    pub fn public_key(&self) -> Result<PublicKey, CoreError> {
        let bytes =
            hex::decode(&self.public_key).map_err(|_| AccountError::InvalidPublicKeyHex)?;
        let public_key = PublicKey::deserialize(&bytes)?;
        // The labels are redundant with the serialized form; make sure a
        // hand-edited record cannot smuggle in a mismatch.
        let algorithm = KeyAlgorithm::from_label(&self.algorithm)?;
        let curve = Curve::from_label(&self.parameters.curve)?;
        if public_key.algorithm() != algorithm || public_key.curve() != curve {
            return Err(AccountError::Json("public key does not match its labels".to_string()).into());
        }
        Ok(public_key)
    }

    /// Serialize the record to JSON.
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string(self).map_err(|e| AccountError::Json(e.to_string()).into())
    }

    /// Parse a record from JSON, rejecting unknown and missing fields and
    /// re-validating the address text.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let account: Account =
            serde_json::from_str(json).map_err(|e| AccountError::Json(e.to_string()))?;
        Address::from_base58(&account.address)?;
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KeyAlgorithm;
    use crate::error::VaultError;

    const TEST_SCRYPT: ScryptParams = ScryptParams { n: 16, r: 8, p: 1, dk_len: 64 };

    #[test]
    fn test_create_and_decrypt_roundtrip() {
        let private_key = PrivateKey::random();
        let account = Account::create("main", &private_key, "hunter2", &TEST_SCRYPT).unwrap();

        let recovered = account.decrypt_key("hunter2").unwrap();
        assert_eq!(recovered, private_key);
    }

    #[test]
    fn test_eddsa_key_roundtrip() {
        let private_key = PrivateKey::random_for(KeyAlgorithm::Eddsa);
        let account = Account::create("ed", &private_key, "pw", &TEST_SCRYPT).unwrap();

        let recovered = account.decrypt_key("pw").unwrap();
        assert_eq!(recovered, private_key);
        assert_eq!(recovered.algorithm(), KeyAlgorithm::Eddsa);
    }

    #[test]
    fn test_wrong_password_is_authentication_failure() {
        let private_key = PrivateKey::random();
        let account = Account::create("main", &private_key, "pw1", &TEST_SCRYPT).unwrap();

        let err = account.decrypt_key("pw2").unwrap_err();
        assert_eq!(err, CoreError::Vault(VaultError::AuthenticationFailed));
    }

    #[test]
    fn test_json_roundtrip() {
        let private_key = PrivateKey::random();
        let account = Account::create("main", &private_key, "pw", &TEST_SCRYPT).unwrap();

        let json = account.to_json().unwrap();
        let parsed = Account::from_json(&json).unwrap();
        assert_eq!(parsed, account);

        let recovered = parsed.decrypt_key("pw").unwrap();
        assert_eq!(recovered, private_key);
    }

    #[test]
    fn test_json_field_names_match_record_format() {
        let private_key = PrivateKey::random();
        let account =
            Account::create_with_salt("main", &private_key, "pw", &[7u8; 16], &TEST_SCRYPT)
                .unwrap();
        let json = account.to_json().unwrap();

        for field in ["\"address\"", "\"enc-alg\"", "\"isDefault\"", "\"publicKey\"", "\"dkLen\""] {
            assert!(json.contains(field), "missing {} in {}", field, json);
        }
        assert!(json.contains("\"aes-256-gcm\""));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let private_key = PrivateKey::random();
        let account = Account::create("main", &private_key, "pw", &TEST_SCRYPT).unwrap();
        let json = account.to_json().unwrap();

        let with_extra = json.replacen('{', "{\"surprise\":1,", 1);
        assert!(matches!(
            Account::from_json(&with_extra),
            Err(CoreError::Account(AccountError::Json(_)))
        ));
    }

    #[test]
    fn test_missing_field_rejected() {
        assert!(matches!(
            Account::from_json("{\"address\":\"x\"}"),
            Err(CoreError::Account(AccountError::Json(_)))
        ));
    }

    #[test]
    fn test_corrupted_address_rejected_on_parse() {
        let private_key = PrivateKey::random();
        let account = Account::create("main", &private_key, "pw", &TEST_SCRYPT).unwrap();
        let json = account.to_json().unwrap();

        let address = account.address().to_string();
        let mut corrupted_addr = address.clone();
        corrupted_addr.pop();
        corrupted_addr.push(if address.ends_with('2') { '3' } else { '2' });

        let corrupted = json.replacen(&address, &corrupted_addr, 1);
        assert!(Account::from_json(&corrupted).is_err());
    }

    #[test]
    fn test_stored_public_key_matches_private() {
        let private_key = PrivateKey::random();
        let account = Account::create("main", &private_key, "pw", &TEST_SCRYPT).unwrap();

        let public_key = account.public_key().unwrap();
        assert_eq!(public_key, private_key.public_key().unwrap());
        assert_eq!(account.scrypt(), &TEST_SCRYPT);
    }

    #[test]
    fn test_deterministic_with_fixed_salt() {
        let private_key =
            PrivateKey::new(&[0x11u8; 32], KeyAlgorithm::Ecdsa, Curve::P256).unwrap();
        let a = Account::create_with_salt("x", &private_key, "pw", &[1u8; 16], &TEST_SCRYPT)
            .unwrap();
        let b = Account::create_with_salt("x", &private_key, "pw", &[1u8; 16], &TEST_SCRYPT)
            .unwrap();
        assert_eq!(a, b);
    }
}
