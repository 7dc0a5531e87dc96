//! Binary-file generation engine.
//!
//! `bitforge` turns a sequence of abstract numeric tokens into a concrete
//! byte stream through a six-stage bit/byte transformation pipeline, while
//! running checksums, CRCs, parity bits and message digests over the data at
//! user-selected points of the pipeline.
//!
//! # Quick Start
//!
//! ```
//! use bitforge::{Pipeline, Value};
//!
//! // Assemble two nibbles per output byte
//! let mut pipeline = Pipeline::new(Box::new(std::io::sink()));
//! pipeline.set_width_in(4)?;
//! for nibble in [0xBu8, 0xE, 0xE, 0xF] {
//!   pipeline.write(&Value::from(nibble))?;
//! }
//! pipeline.close()?;
//! assert_eq!(pipeline.counters().total_length(), 2);
//! # Ok::<(), bitforge::Error>(())
//! ```
//!
//! # Observing the stream
//!
//! ```
//! use bitforge::{Catalog, Crc, Pipeline, Stage, Value};
//!
//! let mut pipeline = Pipeline::new(Box::new(std::io::sink()));
//! let model = Catalog::builtin()?.find("crc-32").expect("preset").clone();
//! let crc = pipeline.get_or_create("crc")?;
//! crc.set_stage(Some(Stage::StreamIn));
//! crc.bind_calculator(Box::new(Crc::new(model)));
//! for byte in b"123456789" {
//!   pipeline.write(&Value::from(*byte))?;
//! }
//! assert_eq!(pipeline.variable("crc").unwrap().value(), &Value::from(0xCBF43926u32));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// =============================================================================
// Pipeline
// =============================================================================

pub use stream::{
  BitStream,
  ControlledOutputStream,
  Context,
  Counters,
  EvalScope,
  Evaluator,
  InAggregateStream,
  InStream,
  OutAggregateStream,
  OutStream,
  Pipeline,
  Variable,
  check_name,
};

// =============================================================================
// Calculators and models
// =============================================================================

pub use calc::{
  Catalog,
  CheckSum,
  CheckSumModel,
  Crc,
  CrcModel,
  CrcModelBuilder,
  Digest,
  Notation,
  Parity,
  ParityKind,
  Polynomial,
  value,
};

// =============================================================================
// Contracts
// =============================================================================

pub use traits::{
  Calculator,
  ConfigError,
  Endianness,
  Error,
  EvalError,
  ModelError,
  ProcessingError,
  Result,
  Stage,
  Stream,
  Trigger,
  Value,
};
