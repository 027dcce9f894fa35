//! Verification-program assembly.

use num_bigint::BigInt;

use crate::crypto::{PublicKey, Signature};
use crate::error::ScriptError;
use crate::script::opcode;
use crate::serialization::{bigint_to_bytes, Writer};

/// Largest key-set size a multi-signature program may carry.
pub const MAX_MULTISIG_KEYS: usize = 1024;

/// A finished verification program.
///
/// Immutable once built; the core never executes programs, it only hashes
/// them into addresses.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Program(Vec<u8>);

impl Program {
    /// Borrow the program bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the program and return its bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Program length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the program is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Single-owner accumulator emitting opcode/operand bytes.
///
/// Not meant to be shared; build the program in one place and hand out the
/// immutable [`Program`] from [`finish`](Self::finish).
#[derive(Debug, Default)]
pub struct ProgramBuilder {
    w: Writer,
}

impl ProgramBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        ProgramBuilder { w: Writer::new() }
    }

    /// Emit a bare opcode byte.
    pub fn push_opcode(&mut self, opcode: u8) -> &mut Self {
        self.w.write_u8(opcode);
        self
    }

    /// Emit a serialized public key as a byte push.
    pub fn push_pub_key(&mut self, key: &PublicKey) -> &mut Self {
        self.push_bytes(&key.serialize())
    }

    /// Emit arbitrary bytes using the shortest push encoding.
    ///
    /// Up to 75 bytes the opcode byte itself carries the length; beyond
    /// that a `PUSHDATA1`/`PUSHDATA2`/`PUSHDATA4` prefix is chosen by
    /// magnitude.
    pub fn push_bytes(&mut self, data: &[u8]) -> &mut Self {
        let len = data.len();
        if len <= opcode::PUSHBYTES75 as usize {
            self.w.write_u8(len as u8);
        } else if len < 0x100 {
            self.w.write_u8(opcode::PUSHDATA1);
            self.w.write_u8(len as u8);
        } else if len < 0x1_0000 {
            self.w.write_u8(opcode::PUSHDATA2);
            self.w.write_u16(len as u16);
        } else {
            self.w.write_u8(opcode::PUSHDATA4);
            self.w.write_u32(len as u32);
        }
        self.w.write_bytes(data);
        self
    }

    /// Emit an integer literal.
    ///
    /// -1 and 0 through 16 use their dedicated one-byte opcodes; everything
    /// else falls back to a byte push of the minimal signed encoding.
    pub fn push_int(&mut self, value: &BigInt) -> &mut Self {
        match i64::try_from(value) {
            Ok(-1) => self.push_opcode(opcode::PUSHM1),
            Ok(0) => self.push_opcode(opcode::PUSH0),
            Ok(small @ 1..=16) => self.push_opcode(opcode::PUSH1 + (small as u8 - 1)),
            _ => self.push_bytes(&bigint_to_bytes(value)),
        }
    }

    /// Emit an integer literal from a machine integer.
    pub fn push_i64(&mut self, value: i64) -> &mut Self {
        self.push_int(&BigInt::from(value))
    }

    /// Emit a boolean literal.
    pub fn push_bool(&mut self, value: bool) -> &mut Self {
        if value {
            self.push_opcode(opcode::PUSHT)
        } else {
            self.push_opcode(opcode::PUSHF)
        }
    }

    /// Finish assembly and return the immutable program.
    pub fn finish(self) -> Program {
        Program(self.w.into_bytes())
    }
}

/// Build the single-signer verification program: push the key, `CHECKSIG`.
pub fn program_from_pub_key(key: &PublicKey) -> Program {
    let mut b = ProgramBuilder::new();
    b.push_pub_key(key);
    b.push_opcode(opcode::CHECKSIG);
    b.finish()
}

/// Build the m-of-n multi-signer verification program.
///
/// Requires `1 <= m <= n <= 1024` where `n = keys.len()`. With `m == 1`
/// the program degenerates to the single-key form over the first key.
/// Otherwise the key set is sorted into the canonical public-key order
/// before emission, so any permutation of the same keys produces the same
/// program bytes and therefore the same address.
pub fn program_from_multi_pub_keys(m: usize, keys: &[PublicKey]) -> Result<Program, ScriptError> {
    let n = keys.len();
    if m < 1 || m > n || n > MAX_MULTISIG_KEYS {
        return Err(ScriptError::InvalidMultisigParams { m, n });
    }

    if m == 1 {
        return Ok(program_from_pub_key(&keys[0]));
    }

    let mut sorted = keys.to_vec();
    sorted.sort();

    let mut b = ProgramBuilder::new();
    b.push_i64(m as i64);
    for key in &sorted {
        b.push_pub_key(key);
    }
    b.push_i64(n as i64);
    b.push_opcode(opcode::CHECKMULTISIG);
    Ok(b.finish())
}

/// Build the invocation program carrying signature parameters.
///
/// Signatures are emitted in the given order: it must match the order the
/// verification program expects them in, so no sorting is applied.
pub fn program_from_params(signatures: &[Signature]) -> Program {
    let mut b = ProgramBuilder::new();
    for signature in signatures {
        b.push_bytes(signature.as_bytes());
    }
    b.finish()
}
