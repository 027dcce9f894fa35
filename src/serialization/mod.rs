//! Deterministic binary framing for the TST ledger.
//!
//! The ledger's wire format is fixed: little-endian fixed-width integers,
//! a canonical variable-length unsigned integer ("varint"), and varint
//! length-prefixed byte strings. [`Writer`] and [`Reader`] are the two
//! halves of that codec; [`bigint`] holds the minimal signed integer
//! encoding used to push numeric literals into verification programs.
//!
//! Same input always produces the same output: addresses and program
//! hashes are computed over these bytes.

mod bigint;
mod reader;
mod writer;

pub use bigint::{bigint_from_bytes, bigint_to_bytes};
pub use reader::{Reader, Whence};
pub use writer::Writer;
