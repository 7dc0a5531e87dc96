//! Fixed-width output chunk stage.
//!
//! The final transformation step before the sink. On byte-oriented targets
//! the chunk width is pinned to 8 bits; the setter exists so a document can
//! state the width explicitly and be rejected early if it ever disagrees.

use tracing::debug;
use traits::{ConfigError, Result, Stage, Stream, Trigger, Value};

use crate::output::ControlledOutputStream;

pub struct OutStream {
  down: ControlledOutputStream,
  width_out: u64,
  mask: Value,
}

impl OutStream {
  pub fn new(down: ControlledOutputStream) -> Self {
    let mut stage = Self { down, width_out: 8, mask: Value::from(0xFFu32) };
    stage.set_defaults();
    stage
  }

  /// Output chunk width; anything but 8 is rejected.
  pub fn set_width_out(&mut self, width_out: u64) -> Result<()> {
    if width_out != 8 {
      return Err(ConfigError::UnsupportedOutputWidth(width_out).into());
    }
    debug!(width_out, "output width");
    self.width_out = width_out;
    self.reset();
    Ok(())
  }

  #[must_use]
  pub fn width_out(&self) -> u64 {
    self.width_out
  }

  pub(crate) fn downstream_mut(&mut self) -> &mut ControlledOutputStream {
    &mut self.down
  }
}

impl Stream for OutStream {
  fn set_defaults(&mut self) {
    self.width_out = 8;
    self.mask = Value::from(0xFFu32);
    self.reset();
  }

  fn reset(&mut self) {}

  fn write(&mut self, trigger: &mut dyn Trigger, value: &Value) -> Result<()> {
    let value = value & &self.mask;
    trigger.trigger(Stage::StreamOut, &value)?;
    self.down.write(trigger, &value)
  }

  fn flush(&mut self, trigger: &mut dyn Trigger) -> Result<()> {
    self.down.flush(trigger)
  }

  fn close(&mut self, trigger: &mut dyn Trigger) -> Result<()> {
    self.down.close(trigger)
  }
}
