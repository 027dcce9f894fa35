//! # TST Core
//!
//! Client-side key management and address/script encoding for the TST
//! ledger. This crate is the custody-critical foundation the wallet and
//! CLI layers build on:
//!
//! - Typed key algebra over two curve families (ECDSA/P-256, EdDSA) with
//!   a strict scheme compatibility table
//! - Deterministic binary framing (little-endian fixed-width + varint)
//! - Verification-program assembly: single-key, m-of-n multi-key (with a
//!   canonical key order, so any party derives the same address), and
//!   signature-parameter programs
//! - Address derivation with base-58-check text and `did:tst:` forms
//! - scrypt + AES-256-GCM encryption of private keys at rest
//!
//! All operations are synchronous and side-effect free; values are
//! immutable once constructed. The one mutable type,
//! [`ProgramBuilder`], is a single-owner accumulator.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod account;
pub mod crypto;
pub mod error;
pub mod script;
pub mod serialization;

// Re-export commonly used types at crate root
pub use account::Account;
pub use crypto::{
    Address, Curve, KeyAlgorithm, PrivateKey, PublicKey, ScryptParams, Signable, Signature,
    SignatureScheme, Signer,
};
pub use error::{
    AccountError, AddressError, CoreError, CryptoError, DecodeError, ScriptError, VaultError,
};
pub use script::{
    program_from_multi_pub_keys, program_from_params, program_from_pub_key, Program,
    ProgramBuilder,
};
pub use serialization::{Reader, Whence, Writer};
