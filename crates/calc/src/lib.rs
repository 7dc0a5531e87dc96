//! Calculators and models for the bitforge pipeline.
//!
//! This crate provides the accumulators that variables bind to, plus the
//! model types that parameterize them:
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Polynomial`] | CRC generator polynomial, four input notations |
//! | [`CrcModel`] | Rocksoft-parameterized CRC description |
//! | [`Crc`] | Table-driven CRC engine for arbitrary widths |
//! | [`CheckSum`] | Modular additive checksum |
//! | [`Parity`] | Single-bit even/odd parity |
//! | [`Digest`] | Cryptographic digest selected by name, peekable mid-stream |
//! | [`Catalog`] | Built-in preset CRC models with self-verifying check values |
//!
//! # CRC Model
//!
//! CRC calculators follow the Rocksoft model (CRC RevEng catalog):
//!
//! | Parameter | Description |
//! |-----------|-------------|
//! | `width` | CRC width in bits, any value ≥ 1 |
//! | `poly` | Generator polynomial in normal notation |
//! | `xor_in` | Initial register value |
//! | `reflect_in` | Reflect input bytes |
//! | `reflect_out` | Reflect output before the final XOR |
//! | `xor_out` | Final XOR value |
//!
//! The table-driven byte path is bit-exact with the single-bit path for every
//! model; the property suite in `proptests.rs` pins this equivalence.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

mod catalog;
mod checksum;
mod crc;
mod digest;
mod model;
mod parity;
mod polynomial;
pub mod value;

#[cfg(test)]
mod proptests;

pub use catalog::Catalog;
pub use checksum::CheckSum;
pub use crc::Crc;
pub use digest::Digest;
pub use model::{CheckSumModel, CrcModel, CrcModelBuilder, ParityKind};
pub use parity::Parity;
pub use polynomial::{Notation, Polynomial};
// Re-export the contracts for convenience
pub use traits::{Calculator, Value};
