//! Verification-program ("script") assembly.
//!
//! A verification program is the opcode sequence whose hash becomes an
//! address: a single-key program proves ownership with one signature, an
//! m-of-n program with a quorum over a canonical key set. Programs built
//! here are never executed by this crate; they exist to be hashed and to
//! frame signature parameters on the wire.

pub mod opcode;

mod builder;

pub use builder::{
    program_from_multi_pub_keys, program_from_params, program_from_pub_key, Program,
    ProgramBuilder, MAX_MULTISIG_KEYS,
};
