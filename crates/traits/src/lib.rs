//! Core contracts for the bitforge pipeline.
//!
//! This crate provides the foundational traits and enums that the bitforge
//! crates conform to. It carries no algorithmic code of its own.
//!
//! # Contract Overview
//!
//! | Item | Purpose | Implementors |
//! |------|---------|--------------|
//! | [`Stream`] | Buffered pipeline stage (configure/reset/write/flush/close) | the six stages in `stream` |
//! | [`Calculator`] | Streaming accumulator over pipeline values | `Crc`, `CheckSum`, `Parity`, `Digest` in `calc` |
//! | [`Trigger`] | Observer dispatch invoked by every stage on every accepted value | `stream::Context` |
//!
//! # Values
//!
//! All data flowing through the pipeline is [`Value`], an arbitrary-precision
//! unsigned integer. CRC widths and user tokens may exceed any native machine
//! word, so every operation masks explicitly instead of relying on fixed-width
//! wraparound.
//!
//! # Fallibility Discipline
//!
//! This workspace denies `unwrap` and `expect` in non-test code to ensure all
//! error paths are handled explicitly.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

mod calculator;
pub mod error;
mod stream;

/// Arbitrary-precision unsigned bit pattern flowing through the pipeline.
pub type Value = num_bigint::BigUint;

pub use calculator::Calculator;
pub use error::{ConfigError, Error, EvalError, ModelError, ProcessingError, Result};
pub use stream::{Endianness, Stage, Stream, Trigger};
