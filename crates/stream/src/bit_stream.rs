//! Bit-packing stage.
//!
//! The midpoint of the pipeline: everything upstream has been exploded into
//! single bits, and this stage packs them back into output aggregates. With
//! `reflect_out` clear, bits fill the aggregate from the most-significant
//! slot downward; set, from bit 0 upward.

use tracing::debug;
use traits::{Result, Stage, Stream, Trigger, Value};

use crate::out_aggregate::OutAggregateStream;

pub struct BitStream {
  down: OutAggregateStream,
  reflect_out: bool,
  buffer: Value,
  counter: u64,
  offset: u64,
}

impl BitStream {
  pub fn new(down: OutAggregateStream) -> Self {
    let mut stage = Self { down, reflect_out: false, buffer: Value::default(), counter: 0, offset: 0 };
    stage.set_defaults();
    stage
  }

  pub fn set_reflect_out(&mut self, reflect_out: bool) {
    debug!(reflect_out, "bit packing order");
    self.reflect_out = reflect_out;
    self.reset();
  }

  #[must_use]
  pub fn reflect_out(&self) -> bool {
    self.reflect_out
  }

  /// Change the downstream aggregate width; this stage's capacity follows
  /// it, so the partial buffer is dropped and the cursor re-seeded.
  pub fn set_width_out_aggregate(&mut self, width: u64) -> Result<()> {
    self.down.set_width(width)?;
    self.reset();
    Ok(())
  }

  pub(crate) fn downstream_mut(&mut self) -> &mut OutAggregateStream {
    &mut self.down
  }

  fn capacity(&self) -> u64 {
    self.down.width()
  }

  /// Accept one bit; a full aggregate is forwarded immediately.
  pub fn write_bit(&mut self, trigger: &mut dyn Trigger, bit: bool) -> Result<()> {
    trigger.trigger(Stage::BitStream, &Value::from(u8::from(bit)))?;
    self.buffer.set_bit(self.offset, bit);
    self.counter -= 1;
    if self.counter == 0 {
      let full = std::mem::take(&mut self.buffer);
      self.down.write(trigger, &full)?;
      self.reset();
    } else if self.reflect_out {
      self.offset += 1;
    } else {
      self.offset -= 1;
    }
    Ok(())
  }
}

impl Stream for BitStream {
  fn set_defaults(&mut self) {
    self.reflect_out = false;
    self.reset();
  }

  fn reset(&mut self) {
    self.buffer = Value::default();
    self.counter = self.capacity();
    self.offset = if self.reflect_out { 0 } else { self.counter - 1 };
  }

  fn write(&mut self, trigger: &mut dyn Trigger, value: &Value) -> Result<()> {
    self.write_bit(trigger, value.bit(0))
  }

  fn flush(&mut self, trigger: &mut dyn Trigger) -> Result<()> {
    if self.counter != self.capacity() {
      // Partial aggregate: without reflection the filled slots sit at the
      // top and must be shifted down before forwarding
      let mut partial = std::mem::take(&mut self.buffer);
      if !self.reflect_out {
        partial >>= self.counter;
      }
      self.down.write(trigger, &partial)?;
      self.reset();
    }
    self.down.flush(trigger)
  }

  fn close(&mut self, trigger: &mut dyn Trigger) -> Result<()> {
    self.down.close(trigger)
  }
}
