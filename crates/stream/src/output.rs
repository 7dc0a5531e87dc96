//! Final sink stage.
//!
//! Wraps the caller-supplied [`std::io::Write`] and applies the output
//! policy: `discard` silences the sink (counters still advance, in the
//! context), `hex_mode` renders bytes as lowercase hex in fixed-width lines
//! instead of raw bytes.

use std::io::Write;

use num_traits::ToPrimitive;
use tracing::debug;
use traits::{ConfigError, Result, Stage, Stream, Trigger, Value};

const DEFAULT_BYTES_PER_LINE: u64 = 16;

/// Policy-controlled byte sink at the end of the chain.
pub struct ControlledOutputStream {
  sink: Box<dyn Write>,
  discard: bool,
  hex_mode: bool,
  bytes_per_line: u64,
  hex_count: u64,
  closed: bool,
}

impl ControlledOutputStream {
  pub fn new(sink: Box<dyn Write>) -> Self {
    Self {
      sink,
      discard: false,
      hex_mode: false,
      bytes_per_line: DEFAULT_BYTES_PER_LINE,
      hex_count: 0,
      closed: false,
    }
  }

  pub fn set_discard(&mut self, discard: bool) {
    debug!(discard, "output policy");
    self.discard = discard;
    self.reset();
  }

  #[must_use]
  pub fn discard(&self) -> bool {
    self.discard
  }

  pub fn set_hex_mode(&mut self, hex_mode: bool) {
    debug!(hex_mode, "output policy");
    self.hex_mode = hex_mode;
    self.reset();
  }

  #[must_use]
  pub fn hex_mode(&self) -> bool {
    self.hex_mode
  }

  /// Bytes rendered per line in hex mode; must be at least 1.
  pub fn set_bytes_per_line(&mut self, bytes_per_line: u64) -> Result<()> {
    if bytes_per_line < 1 {
      return Err(ConfigError::InvalidWidth(bytes_per_line).into());
    }
    self.bytes_per_line = bytes_per_line;
    Ok(())
  }

  #[must_use]
  pub fn bytes_per_line(&self) -> u64 {
    self.bytes_per_line
  }

  fn newline(&mut self) -> Result<()> {
    self.sink.write_all(b"\n")?;
    Ok(())
  }
}

impl Stream for ControlledOutputStream {
  fn set_defaults(&mut self) {
    self.discard = false;
    self.hex_mode = false;
    self.bytes_per_line = DEFAULT_BYTES_PER_LINE;
    self.reset();
  }

  fn reset(&mut self) {
    self.hex_count = 0;
  }

  fn write(&mut self, trigger: &mut dyn Trigger, value: &Value) -> Result<()> {
    let byte = (value & &Value::from(0xFFu32)).to_u8().unwrap_or(0);
    trigger.trigger(Stage::OutputStream, &Value::from(byte))?;
    if !self.discard {
      if self.hex_mode {
        let separator = if self.hex_count % self.bytes_per_line != 0 { " " } else { "" };
        write!(self.sink, "{separator}{byte:02x}")?;
        self.hex_count += 1;
        if self.hex_count % self.bytes_per_line == 0 {
          self.newline()?;
        }
      } else {
        self.sink.write_all(&[byte])?;
      }
    }
    Ok(())
  }

  fn flush(&mut self, _trigger: &mut dyn Trigger) -> Result<()> {
    if !self.discard {
      self.sink.flush()?;
    }
    Ok(())
  }

  fn close(&mut self, _trigger: &mut dyn Trigger) -> Result<()> {
    if self.closed {
      return Ok(());
    }
    // Terminate an unfinished hex line
    if self.hex_mode && self.hex_count != 0 && self.hex_count % self.bytes_per_line != 0 {
      self.newline()?;
    }
    self.sink.flush()?;
    self.closed = true;
    Ok(())
  }
}

#[cfg(test)]
pub(crate) mod tests {
  use super::*;
  use std::cell::RefCell;
  use std::rc::Rc;

  use traits::ProcessingError;

  /// Shared in-memory sink: the pipeline owns the writer half, the test
  /// keeps the handle.
  #[derive(Clone, Default)]
  pub(crate) struct SharedSink(Rc<RefCell<Vec<u8>>>);

  impl SharedSink {
    pub(crate) fn bytes(&self) -> Vec<u8> {
      self.0.borrow().clone()
    }

    pub(crate) fn text(&self) -> String {
      String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
  }

  impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
      self.0.borrow_mut().extend_from_slice(buf);
      Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
      Ok(())
    }
  }

  /// Trigger stub that records every (stage, value) pair.
  #[derive(Default)]
  pub(crate) struct Recorder(pub Vec<(Stage, Value)>);

  impl Trigger for Recorder {
    fn trigger(&mut self, stage: Stage, value: &Value) -> std::result::Result<(), ProcessingError> {
      self.0.push((stage, value.clone()));
      Ok(())
    }
  }

  fn stage() -> (ControlledOutputStream, SharedSink, Recorder) {
    let sink = SharedSink::default();
    (ControlledOutputStream::new(Box::new(sink.clone())), sink, Recorder::default())
  }

  #[test]
  fn raw_bytes_pass_through_masked() {
    let (mut out, sink, mut rec) = stage();
    out.write(&mut rec, &Value::from(0x1ABu16)).unwrap();
    out.write(&mut rec, &Value::from(0x02u8)).unwrap();
    assert_eq!(sink.bytes(), vec![0xAB, 0x02]);
    assert_eq!(rec.0[0], (Stage::OutputStream, Value::from(0xABu8)));
  }

  #[test]
  fn discard_silences_sink_but_still_triggers() {
    let (mut out, sink, mut rec) = stage();
    out.set_discard(true);
    out.write(&mut rec, &Value::from(0x55u8)).unwrap();
    assert!(sink.bytes().is_empty());
    assert_eq!(rec.0.len(), 1);
  }

  #[test]
  fn hex_lines_wrap_and_close() {
    let (mut out, sink, mut rec) = stage();
    out.set_hex_mode(true);
    for i in 0u8..=16 {
      out.write(&mut rec, &Value::from(i)).unwrap();
    }
    out.close(&mut rec).unwrap();
    assert_eq!(
      sink.text(),
      "00 01 02 03 04 05 06 07 08 09 0a 0b 0c 0d 0e 0f\n10\n"
    );
  }

  #[test]
  fn hex_full_line_needs_no_extra_newline() {
    let (mut out, sink, mut rec) = stage();
    out.set_hex_mode(true);
    out.set_bytes_per_line(4).unwrap();
    for i in 0u8..4 {
      out.write(&mut rec, &Value::from(i)).unwrap();
    }
    out.close(&mut rec).unwrap();
    assert_eq!(sink.text(), "00 01 02 03\n");
  }

  #[test]
  fn hex_toggle_restarts_line_accounting() {
    let (mut out, sink, mut rec) = stage();
    out.set_hex_mode(true);
    out.set_bytes_per_line(2).unwrap();
    out.write(&mut rec, &Value::from(0u8)).unwrap();
    out.set_hex_mode(false);
    out.set_hex_mode(true);
    // The new line starts from a fresh count, not one byte in
    out.write(&mut rec, &Value::from(1u8)).unwrap();
    out.write(&mut rec, &Value::from(2u8)).unwrap();
    out.close(&mut rec).unwrap();
    assert_eq!(sink.text(), "0001 02\n");
  }

  #[test]
  fn close_is_idempotent() {
    let (mut out, sink, mut rec) = stage();
    out.set_hex_mode(true);
    out.write(&mut rec, &Value::from(1u8)).unwrap();
    out.close(&mut rec).unwrap();
    out.close(&mut rec).unwrap();
    assert_eq!(sink.text(), "01\n");
  }

  #[test]
  fn zero_bytes_per_line_is_rejected() {
    let (mut out, _sink, _rec) = stage();
    assert!(out.set_bytes_per_line(0).is_err());
  }
}
