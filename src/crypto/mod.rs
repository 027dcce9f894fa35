//! Key algebra, addresses, and the private-key vault.
//!
//! This module provides:
//! - Typed private/public keys over two curve families (ECDSA/P-256 and
//!   EdDSA/edwards25519), with the scheme compatibility table
//! - Signing and verification under nine hash-curve schemes
//! - Address derivation (`RIPEMD160(SHA256(program))`) with base-58-check
//!   text and `did:tst:` identifier forms
//! - scrypt + AES-256-GCM encryption of private keys at rest

pub mod vault;

mod address;
mod hashing;
mod private_key;
mod public_key;
mod scheme;
mod signature;

pub use address::{Address, ADDRESS_VERSION, ADDR_LEN, DID_PREFIX};
pub use hashing::{double_sha256, hash160, sha256};
pub use private_key::{PrivateKey, PRIVATE_KEY_LEN};
pub use public_key::PublicKey;
pub use scheme::{Curve, KeyAlgorithm, SignatureScheme};
pub use signature::{Signature, SIGNATURE_LEN};
pub use vault::ScryptParams;

use crate::error::CryptoError;

/// An object with canonical sign-content.
///
/// Transactions and similar structures implement this so keys can sign
/// them directly instead of requiring callers to pre-extract bytes.
pub trait Signable {
    /// The canonical byte content covered by a signature.
    fn sign_content(&self) -> Vec<u8>;
}

/// An injectable signing capability.
///
/// [`PrivateKey`] is the in-process implementation; external backends
/// (hardware tokens, remote signers) plug in behind the same interface.
/// The core's own arithmetic stays synchronous; a backend that must wait
/// does so outside this crate.
pub trait Signer {
    /// Sign `message` under `scheme`.
    fn sign_message(&self, message: &[u8], scheme: SignatureScheme) -> Result<Signature, CryptoError>;
}
