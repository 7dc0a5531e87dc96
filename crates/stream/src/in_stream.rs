//! Token intake stage, the head of the pipeline.
//!
//! Collects fixed-width input tokens into an input aggregate. Big-endian
//! placement fills the aggregate from the most-significant slot downward,
//! little-endian from bit 0 upward; a full aggregate is forwarded and the
//! cursor re-seeded.

use calc::value::make_mask;
use tracing::debug;
use traits::{ConfigError, Endianness, Result, Stage, Stream, Trigger, Value};

use crate::in_aggregate::InAggregateStream;

pub struct InStream {
  down: InAggregateStream,
  width_in: u64,
  endianness: Endianness,
  mask: Value,
  buffer: Value,
  counter: u64,
  offset: u64,
}

impl InStream {
  pub fn new(down: InAggregateStream) -> Self {
    let mut stage = Self {
      down,
      width_in: 8,
      endianness: Endianness::Big,
      mask: make_mask(8),
      buffer: Value::default(),
      counter: 0,
      offset: 0,
    };
    stage.set_defaults();
    stage
  }

  /// Token width; must be positive and divide the input aggregate width.
  pub fn set_width_in(&mut self, width_in: u64) -> Result<()> {
    if width_in < 1 {
      return Err(ConfigError::InvalidWidth(width_in).into());
    }
    if self.down.width() % width_in != 0 {
      return Err(ConfigError::WidthMismatch { unit: width_in, aggregate: self.down.width() }.into());
    }
    debug!(width_in, "input token width");
    self.width_in = width_in;
    self.mask = make_mask(width_in);
    self.reset();
    Ok(())
  }

  #[must_use]
  pub fn width_in(&self) -> u64 {
    self.width_in
  }

  /// Change the downstream aggregate width; the token width must still
  /// divide it, and this stage's partial buffer is dropped.
  pub fn set_width_in_aggregate(&mut self, width: u64) -> Result<()> {
    if width % self.width_in != 0 {
      return Err(ConfigError::WidthMismatch { unit: self.width_in, aggregate: width }.into());
    }
    self.down.set_width(width)?;
    self.reset();
    Ok(())
  }

  pub fn set_endianness(&mut self, endianness: Endianness) {
    debug!(?endianness, "input endianness");
    self.endianness = endianness;
    self.reset();
  }

  #[must_use]
  pub fn endianness(&self) -> Endianness {
    self.endianness
  }

  pub(crate) fn downstream_mut(&mut self) -> &mut InAggregateStream {
    &mut self.down
  }

  fn capacity(&self) -> u64 {
    self.down.width() / self.width_in
  }
}

impl Stream for InStream {
  fn set_defaults(&mut self) {
    self.width_in = 8;
    self.mask = make_mask(8);
    self.endianness = Endianness::Big;
    self.reset();
  }

  fn reset(&mut self) {
    self.buffer = Value::default();
    self.counter = self.capacity();
    self.offset = match self.endianness {
      Endianness::Big => (self.counter - 1) * self.width_in,
      Endianness::Little => 0,
    };
  }

  fn write(&mut self, trigger: &mut dyn Trigger, value: &Value) -> Result<()> {
    let value = value & &self.mask;
    trigger.trigger(Stage::StreamIn, &value)?;
    for i in 0..self.width_in {
      self.buffer.set_bit(self.offset + i, value.bit(i));
    }
    self.counter -= 1;
    if self.counter == 0 {
      let full = std::mem::take(&mut self.buffer);
      self.down.write(trigger, &full)?;
      self.reset();
    } else {
      match self.endianness {
        Endianness::Big => self.offset -= self.width_in,
        Endianness::Little => self.offset += self.width_in,
      }
    }
    Ok(())
  }

  fn flush(&mut self, trigger: &mut dyn Trigger) -> Result<()> {
    if self.counter != self.capacity() {
      // Big-endian partials sit in the high slots; align them down first
      let mut partial = std::mem::take(&mut self.buffer);
      if self.endianness == Endianness::Big {
        partial >>= self.counter * self.width_in;
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
