//! Streaming accumulator contract.
//!
//! This trait is deliberately shaped like a streaming checksum interface:
//! incremental updates, an idempotent register read-out, and reset support.
//! Calculators are bound to variables and fed by the trigger dispatcher.

use crate::Value;

/// Streaming accumulator over pipeline values.
///
/// All arithmetic is confined to the calculator's configured bit-width mask.
///
/// # Implementor Requirements
///
/// - `register()` must be a pure read-out: it applies any output
///   transformation (reflection, final XOR) to a *copy* of the running state
///   so that further updates remain possible.
/// - `reset()` restores the freshly-constructed state.
pub trait Calculator {
  /// Restore the initial state of the accumulator.
  fn reset(&mut self);

  /// Load the running register.
  ///
  /// Models with an input transformation (CRC's initial XOR) apply it here;
  /// plain accumulators assign the value directly.
  fn set_register(&mut self, value: &Value);

  /// Read out the register, applying the model's output transformation.
  #[must_use]
  fn register(&self) -> Value;

  /// Update with one value (the low 8 bits for byte-granular calculators).
  fn update(&mut self, value: &Value);

  /// Update with a single bit.
  ///
  /// Used when the pipeline operates below byte granularity.
  fn update_bit(&mut self, bit: bool);

  /// Update with a contiguous byte run.
  ///
  /// Semantics are identical to calling [`update`](Self::update) per byte, but
  /// implementations may fuse the per-byte dispatch.
  fn update_bytes(&mut self, data: &[u8]) {
    for &b in data {
      self.update(&Value::from(b));
    }
  }
}
