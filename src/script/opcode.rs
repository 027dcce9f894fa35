//! Stable opcode byte values for verification programs.
//!
//! These values are fixed by the ledger's virtual machine; programs are
//! hashed into addresses, so a single changed byte changes every derived
//! address.

/// Push the empty value (integer zero).
pub const PUSH0: u8 = 0x00;
/// Boolean false, an alias of [`PUSH0`].
pub const PUSHF: u8 = PUSH0;
/// First of the direct-length push opcodes: the opcode byte doubles as the
/// byte count, from 1 up to [`PUSHBYTES75`].
pub const PUSHBYTES1: u8 = 0x01;
/// Last direct-length push opcode (75 bytes of data).
pub const PUSHBYTES75: u8 = 0x4B;
/// Push with a one-byte length prefix.
pub const PUSHDATA1: u8 = 0x4C;
/// Push with a two-byte little-endian length prefix.
pub const PUSHDATA2: u8 = 0x4D;
/// Push with a four-byte little-endian length prefix.
pub const PUSHDATA4: u8 = 0x4E;
/// Push the integer -1.
pub const PUSHM1: u8 = 0x4F;
/// Push the integer 1; values 1 through 16 are `PUSH1 + n - 1`.
pub const PUSH1: u8 = 0x51;
/// Boolean true, an alias of [`PUSH1`].
pub const PUSHT: u8 = PUSH1;
/// Push the integer 16.
pub const PUSH16: u8 = 0x60;
/// Verify one signature against the pushed public key.
pub const CHECKSIG: u8 = 0xAC;
/// Verify m signatures against the pushed key set.
pub const CHECKMULTISIG: u8 = 0xAE;
