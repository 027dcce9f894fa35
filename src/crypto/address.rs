//! Address derivation and encoding.
//!
//! An address is the 20-byte `RIPEMD160(SHA256(program))` hash of a
//! verification program. Its text form is base-58 over
//! `[version][hash][4-byte double-SHA256 checksum]`, and the DID form
//! prefixes that text with `did:tst:`.

use std::fmt;

use crate::crypto::hashing::{double_sha256, hash160};
use crate::crypto::public_key::PublicKey;
use crate::error::{AddressError, DecodeError, ScriptError};
use crate::script::{program_from_multi_pub_keys, program_from_pub_key, Program};
use crate::serialization::{Reader, Writer};

/// Address length in bytes.
pub const ADDR_LEN: usize = 20;

/// Version byte prepended to the hash in the base-58 text form.
pub const ADDRESS_VERSION: u8 = 0x17;

/// Prefix of the decentralized-identifier string form.
pub const DID_PREFIX: &str = "did:tst:";

/// Checksum length in the base-58 text form.
const CHECKSUM_LEN: usize = 4;

/// Decoded base-58 payload length: version + hash + checksum.
const B58_PAYLOAD_LEN: usize = 1 + ADDR_LEN + CHECKSUM_LEN;

/// A 20-byte program-hash address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Address([u8; ADDR_LEN]);

impl Address {
    /// Wrap raw address bytes; anything but exactly 20 bytes is rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AddressError> {
        if bytes.len() != ADDR_LEN {
            return Err(AddressError::BadLength { expected: ADDR_LEN, actual: bytes.len() });
        }
        let mut raw = [0u8; ADDR_LEN];
        raw.copy_from_slice(bytes);
        Ok(Address(raw))
    }

    /// Derive the address of a verification program.
    pub fn from_vm_code(program: &Program) -> Self {
        Address(hash160(program.as_bytes()))
    }

    /// Derive the single-signer address of a public key.
    pub fn from_pub_key(key: &PublicKey) -> Self {
        Self::from_vm_code(&program_from_pub_key(key))
    }

    /// Derive the m-of-n multi-signer address of a key set.
    ///
    /// Key order does not matter; the program sorts the set canonically.
    pub fn from_multi_pub_keys(m: usize, keys: &[PublicKey]) -> Result<Self, ScriptError> {
        Ok(Self::from_vm_code(&program_from_multi_pub_keys(m, keys)?))
    }

    /// Decode the base-58-check text form.
    ///
    /// The decoded hash is re-encoded and compared to the input, so a
    /// corrupted checksum, a truncated string, or a flipped character all
    /// fail closed with [`AddressError::ChecksumMismatch`].
    pub fn from_base58(encoded: &str) -> Result<Self, AddressError> {
        let decoded =
            bs58::decode(encoded).into_vec().map_err(|_| AddressError::InvalidBase58)?;
        if decoded.len() != B58_PAYLOAD_LEN {
            return Err(AddressError::BadLength {
                expected: B58_PAYLOAD_LEN,
                actual: decoded.len(),
            });
        }

        let mut raw = [0u8; ADDR_LEN];
        raw.copy_from_slice(&decoded[1..1 + ADDR_LEN]);
        let address = Address(raw);

        if address.to_base58() != encoded {
            return Err(AddressError::ChecksumMismatch);
        }
        Ok(address)
    }

    /// Borrow the raw 20 address bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; ADDR_LEN] {
        &self.0
    }

    /// Encode the base-58-check text form.
    pub fn to_base58(&self) -> String {
        let mut data = Vec::with_capacity(B58_PAYLOAD_LEN);
        data.push(ADDRESS_VERSION);
        data.extend_from_slice(&self.0);

        let checksum = double_sha256(&data);
        data.extend_from_slice(&checksum[..CHECKSUM_LEN]);

        bs58::encode(data).into_string()
    }

    /// Encode the decentralized-identifier string form.
    pub fn to_tst_id(&self) -> String {
        format!("{}{}", DID_PREFIX, self.to_base58())
    }

    /// Append the 20 raw bytes to a writer.
    pub fn serialize(&self, w: &mut Writer) {
        w.write_bytes(&self.0);
    }

    /// Read exactly 20 bytes from a reader.
    pub fn deserialize(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let bytes = r.read_bytes(ADDR_LEN)?;
        let mut raw = [0u8; ADDR_LEN];
        raw.copy_from_slice(bytes);
        Ok(Address(raw))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}
