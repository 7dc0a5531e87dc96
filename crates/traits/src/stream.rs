//! Pipeline stage contract.
//!
//! The six pipeline stages share a single capability set: configure to
//! documented defaults, reset buffering state, accept one value, force out a
//! partial buffer, and close the downstream chain. Stages compose into a
//! strictly linear chain, each owning its downstream neighbour and calling it
//! only in the forward direction.

use crate::{ProcessingError, Result, Value};

/// Byte/token ordering inside an aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endianness {
  /// First-arriving unit lands in the most-significant position.
  Big,
  /// First-arriving unit lands in the least-significant position.
  Little,
}

/// Identifies the pipeline stage a value was observed at.
///
/// Variables carry one of these tags to select which stage they snoop on;
/// every stage passes its own tag to [`Trigger::trigger`] on each accepted
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
  /// Raw input tokens, before aggregation.
  StreamIn,
  /// Assembled input aggregates.
  AggregateStreamIn,
  /// Individual bits between the input and output halves.
  BitStream,
  /// Assembled output aggregates.
  AggregateStreamOut,
  /// Fixed-width output chunks.
  StreamOut,
  /// Bytes reaching the final sink.
  OutputStream,
}

impl Stage {
  /// All stages, in pipeline order.
  pub const ALL: [Stage; 6] = [
    Stage::StreamIn,
    Stage::AggregateStreamIn,
    Stage::BitStream,
    Stage::AggregateStreamOut,
    Stage::StreamOut,
    Stage::OutputStream,
  ];

  /// Stable lowercase name, used in logs and error messages.
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Stage::StreamIn => "stream-in",
      Stage::AggregateStreamIn => "aggregate-stream-in",
      Stage::BitStream => "bitstream",
      Stage::AggregateStreamOut => "aggregate-stream-out",
      Stage::StreamOut => "stream-out",
      Stage::OutputStream => "output-stream",
    }
  }
}

impl core::fmt::Display for Stage {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Observer dispatch invoked by every stage on every accepted value.
///
/// Implemented by the processing context, which feeds bound calculators and
/// evaluates callback expressions. A trigger failure aborts the write that
/// caused it; bytes already flushed downstream are not retracted.
pub trait Trigger {
  /// Report one masked value observed at `stage`.
  fn trigger(&mut self, stage: Stage, value: &Value) -> core::result::Result<(), ProcessingError>;
}

/// Buffered pipeline stage.
///
/// # Implementor Requirements
///
/// - `write` must mask the incoming value to the stage's configured width
///   rather than reject out-of-range values.
/// - `write` must invoke the stage's [`Trigger`] with the masked value before
///   any buffering takes place.
/// - `reset` clears buffer and cursor state without touching configuration.
/// - `close` flushes and closes the downstream chain exactly once; a second
///   `close` is a no-op.
pub trait Stream {
  /// Establish the documented default configuration and reset.
  fn set_defaults(&mut self);

  /// Clear buffer, counter and cursor; configuration is untouched.
  fn reset(&mut self);

  /// Accept one value, regardless of width.
  fn write(&mut self, trigger: &mut dyn Trigger, value: &Value) -> Result<()>;

  /// Force out any partially filled buffer, then flush downstream.
  fn flush(&mut self, trigger: &mut dyn Trigger) -> Result<()>;

  /// Flush and close the downstream chain.
  fn close(&mut self, trigger: &mut dyn Trigger) -> Result<()>;
}
