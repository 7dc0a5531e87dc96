//! Output aggregate splitter.
//!
//! Stateless: each assembled aggregate is cut into `width_out`-sized chunks
//! in one pass, ordered by the configured output endianness.

use calc::value::make_mask;
use tracing::debug;
use traits::{ConfigError, Endianness, Result, Stage, Stream, Trigger, Value};

use crate::out_stream::OutStream;

pub struct OutAggregateStream {
  down: OutStream,
  width: u64,
  endianness: Endianness,
  mask: Value,
}

impl OutAggregateStream {
  pub fn new(down: OutStream) -> Self {
    let mut stage = Self { down, width: 8, endianness: Endianness::Big, mask: make_mask(8) };
    stage.set_defaults();
    stage
  }

  /// Aggregate width; must be a positive multiple of the chunk width.
  pub fn set_width(&mut self, width: u64) -> Result<()> {
    if width < 1 {
      return Err(ConfigError::InvalidWidth(width).into());
    }
    if width % self.down.width_out() != 0 {
      return Err(ConfigError::WidthMismatch { unit: self.down.width_out(), aggregate: width }.into());
    }
    debug!(width, "output aggregate width");
    self.width = width;
    self.mask = make_mask(width);
    self.reset();
    Ok(())
  }

  #[must_use]
  pub fn width(&self) -> u64 {
    self.width
  }

  pub fn set_endianness(&mut self, endianness: Endianness) {
    debug!(?endianness, "output endianness");
    self.endianness = endianness;
    self.reset();
  }

  #[must_use]
  pub fn endianness(&self) -> Endianness {
    self.endianness
  }

  pub(crate) fn downstream_mut(&mut self) -> &mut OutStream {
    &mut self.down
  }
}

impl Stream for OutAggregateStream {
  fn set_defaults(&mut self) {
    self.width = 8;
    self.mask = make_mask(8);
    self.endianness = Endianness::Big;
    self.reset();
  }

  fn reset(&mut self) {}

  fn write(&mut self, trigger: &mut dyn Trigger, value: &Value) -> Result<()> {
    let value = value & &self.mask;
    trigger.trigger(Stage::AggregateStreamOut, &value)?;
    let width_out = self.down.width_out();
    let count = self.width / width_out;
    let chunk_mask = make_mask(width_out);
    for i in 0..count {
      let offset = match self.endianness {
        Endianness::Big => (count - 1 - i) * width_out,
        Endianness::Little => i * width_out,
      };
      let chunk = (&value >> offset) & &chunk_mask;
      self.down.write(trigger, &chunk)?;
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
