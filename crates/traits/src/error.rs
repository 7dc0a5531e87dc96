//! Error taxonomy for the bitforge pipeline.
//!
//! Each variant corresponds to a specific failure domain:
//! - Configuration: illegal width/endianness combinations — fatal to the
//!   offending setter call only, the pipeline is otherwise untouched
//! - Processing: calculator/script failure during trigger dispatch, illegal
//!   variable names — aborts the current document's processing entirely
//! - Model: invalid polynomial or CRC/checksum model parameters
//! - I/O: sink failure, propagated immediately
//!
//! No error is silently swallowed and nothing retries; already-written output
//! is never rolled back.

use thiserror::Error;

/// Top-level error type for all pipeline operations.
#[derive(Debug, Error)]
pub enum Error {
  /// Illegal width/endianness combination.
  #[error("configuration error: {0}")]
  Config(#[from] ConfigError),

  /// Trigger dispatch failed (script evaluation, variable naming).
  #[error("processing error: {0}")]
  Processing(#[from] ProcessingError),

  /// Invalid polynomial or calculator model.
  #[error("model error: {0}")]
  Model(#[from] ModelError),

  /// Unknown or unusable digest algorithm name.
  #[error("unsupported digest algorithm: '{0}'")]
  UnsupportedAlgorithm(String),

  /// Sink failure.
  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),
}

/// Illegal stage configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
  /// Width outside the legal range (must be at least 1 bit).
  #[error("invalid width: {0}")]
  InvalidWidth(u64),

  /// Unit width does not evenly divide the aggregate width.
  #[error("width mismatch: {unit}-bit units do not divide the {aggregate}-bit aggregate")]
  WidthMismatch { unit: u64, aggregate: u64 },

  /// The output stage is byte-granular on this target.
  #[error("output width must be 8 bits on this architecture, got {0}")]
  UnsupportedOutputWidth(u64),
}

/// Trigger dispatch failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProcessingError {
  /// A callback expression failed to evaluate.
  #[error("script evaluation failed: {0}")]
  Eval(#[from] EvalError),

  /// A callback expression is registered but no evaluator is installed.
  #[error("callback registered on variable '{variable}' but no evaluator is installed")]
  NoEvaluator { variable: String },

  /// Variable name does not match `[a-zA-Z_$][a-zA-Z0-9_$]*`.
  #[error("illegal variable name: '{0}'")]
  IllegalVariableName(String),

  /// A numeric token is not a valid decimal/hex/octal/binary literal.
  #[error("bad number format: '{0}'")]
  BadNumberFormat(String),
}

/// Opaque failure reported by the external expression evaluator.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct EvalError(pub String);

/// Invalid polynomial or calculator model parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
  /// Zero polynomial; a CRC generator must have at least one term.
  #[error("non-positive polynomial not allowed")]
  NonPositivePolynomial,

  /// Width missing where the notation cannot derive it.
  #[error("polynomial width must be specified for the {notation} notation")]
  MissingWidth { notation: &'static str },

  /// Polynomial does not fit in the declared width.
  #[error("polynomial of {bits} bits does not fit in width {width}")]
  PolynomialTooWide { bits: u64, width: u64 },

  /// Derived and explicit widths disagree.
  #[error("polynomial/width mismatch: derived {derived}, given {given}")]
  WidthMismatch { derived: u64, given: u64 },

  /// Checksum/CRC width outside the legal range.
  #[error("invalid model width: {0}")]
  InvalidWidth(u64),

  /// Model identifier is empty.
  #[error("empty CRC model id not allowed")]
  EmptyId,

  /// A preset model's computed check value disagrees with its declaration.
  #[error("check value mismatch for model '{id}': computed {computed}, declared {declared}")]
  CheckMismatch {
    id: String,
    computed: String,
    declared: String,
  },
}

/// Type alias for Result with the pipeline [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
