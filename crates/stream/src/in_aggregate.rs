//! Input aggregate exploder.
//!
//! Takes an assembled input aggregate and hands it to the bit stage one bit
//! at a time. `reflect_in` selects the walk order: set, the aggregate is
//! walked from bit 0 upward; clear, from the top bit downward.

use calc::value::make_mask;
use tracing::debug;
use traits::{ConfigError, Result, Stage, Stream, Trigger, Value};

use crate::bit_stream::BitStream;

pub struct InAggregateStream {
  down: BitStream,
  width: u64,
  reflect_in: bool,
  mask: Value,
}

impl InAggregateStream {
  pub fn new(down: BitStream) -> Self {
    let mut stage = Self { down, width: 8, reflect_in: false, mask: make_mask(8) };
    stage.set_defaults();
    stage
  }

  /// Aggregate width in bits; must be positive.
  pub fn set_width(&mut self, width: u64) -> Result<()> {
    if width < 1 {
      return Err(ConfigError::InvalidWidth(width).into());
    }
    debug!(width, "input aggregate width");
    self.width = width;
    self.mask = make_mask(width);
    self.reset();
    Ok(())
  }

  #[must_use]
  pub fn width(&self) -> u64 {
    self.width
  }

  pub fn set_reflect_in(&mut self, reflect_in: bool) {
    debug!(reflect_in, "bit explosion order");
    self.reflect_in = reflect_in;
    self.reset();
  }

  #[must_use]
  pub fn reflect_in(&self) -> bool {
    self.reflect_in
  }

  pub(crate) fn downstream_mut(&mut self) -> &mut BitStream {
    &mut self.down
  }
}

impl Stream for InAggregateStream {
  fn set_defaults(&mut self) {
    self.width = 8;
    self.mask = make_mask(8);
    self.reflect_in = false;
    self.reset();
  }

  fn reset(&mut self) {}

  fn write(&mut self, trigger: &mut dyn Trigger, value: &Value) -> Result<()> {
    let value = value & &self.mask;
    trigger.trigger(Stage::AggregateStreamIn, &value)?;
    for i in 0..self.width {
      let bit = if self.reflect_in { i } else { self.width - 1 - i };
      self.down.write_bit(trigger, value.bit(bit))?;
    }
    Ok(())
  }

  fn flush(&mut self, trigger: &mut dyn Trigger) -> Result<()> {
    self.down.flush(trigger)
  }

  fn close(&mut self, trigger: &mut dyn Trigger) -> Result<()> {
    self.down.close(trigger)
  }
}
