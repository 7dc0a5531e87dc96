//! Pipeline assembly.
//!
//! Builds the six-stage chain over a caller-supplied sink and pairs it with
//! the observer [`Context`]. All configuration flows through here so that a
//! width change always resets the upstream stage whose capacity it alters.

use std::io::Write;

use calc::value::{parse_number, to_value};
use tracing::debug;
use traits::{Endianness, Result, Stream, Value};

use crate::bit_stream::BitStream;
use crate::context::{Context, Counters, Evaluator};
use crate::in_aggregate::InAggregateStream;
use crate::in_stream::InStream;
use crate::out_aggregate::OutAggregateStream;
use crate::out_stream::OutStream;
use crate::output::ControlledOutputStream;
use crate::variable::Variable;

/// The assembled transformation pipeline.
pub struct Pipeline {
  context: Context,
  chain: InStream,
}

impl Pipeline {
  /// Build a pipeline with default configuration writing to `sink`.
  #[must_use]
  pub fn new(sink: Box<dyn Write>) -> Self {
    debug!("pipeline assembled");
    let chain = InStream::new(InAggregateStream::new(BitStream::new(OutAggregateStream::new(OutStream::new(
      ControlledOutputStream::new(sink),
    )))));
    Self { context: Context::new(), chain }
  }

  fn bit_stage(&mut self) -> &mut BitStream {
    self.chain.downstream_mut().downstream_mut()
  }

  fn out_aggregate_stage(&mut self) -> &mut OutAggregateStream {
    self.bit_stage().downstream_mut()
  }

  fn out_stage(&mut self) -> &mut OutStream {
    self.out_aggregate_stage().downstream_mut()
  }

  fn output_stage(&mut self) -> &mut ControlledOutputStream {
    self.out_stage().downstream_mut()
  }

  // ── configuration ──────────────────────────────────────────────────────

  pub fn set_width_in(&mut self, width: u64) -> Result<()> {
    self.chain.set_width_in(width)
  }

  pub fn set_endianness_in(&mut self, endianness: Endianness) {
    self.chain.set_endianness(endianness);
  }

  pub fn set_width_in_aggregate(&mut self, width: u64) -> Result<()> {
    self.chain.set_width_in_aggregate(width)
  }

  pub fn set_reflect_in(&mut self, reflect_in: bool) {
    self.chain.downstream_mut().set_reflect_in(reflect_in);
  }

  pub fn set_reflect_out(&mut self, reflect_out: bool) {
    self.bit_stage().set_reflect_out(reflect_out);
  }

  pub fn set_width_out_aggregate(&mut self, width: u64) -> Result<()> {
    self.bit_stage().set_width_out_aggregate(width)
  }

  pub fn set_endianness_out(&mut self, endianness: Endianness) {
    self.out_aggregate_stage().set_endianness(endianness);
  }

  pub fn set_width_out(&mut self, width: u64) -> Result<()> {
    self.out_stage().set_width_out(width)
  }

  pub fn set_discard(&mut self, discard: bool) {
    self.output_stage().set_discard(discard);
  }

  pub fn set_hex_mode(&mut self, hex_mode: bool) {
    self.output_stage().set_hex_mode(hex_mode);
  }

  pub fn set_bytes_per_line(&mut self, bytes_per_line: u64) -> Result<()> {
    self.output_stage().set_bytes_per_line(bytes_per_line)
  }

  // ── data path ──────────────────────────────────────────────────────────

  /// Feed one token; it is masked to the configured input width.
  pub fn write(&mut self, value: &Value) -> Result<()> {
    self.chain.write(&mut self.context, value)
  }

  /// Feed one textual token (decimal, `0x`, `0b` or leading-zero octal,
  /// optionally signed); negative values wrap two's-complement at the
  /// input width.
  pub fn write_token(&mut self, token: &str) -> Result<()> {
    let number = parse_number(token)?;
    let value = to_value(&number, self.chain.width_in());
    self.write(&value)
  }

  /// Force out all partial buffers, down to the sink.
  pub fn flush(&mut self) -> Result<()> {
    self.chain.flush(&mut self.context)
  }

  /// Flush nothing further; close the chain and the sink. Idempotent.
  pub fn close(&mut self) -> Result<()> {
    self.chain.close(&mut self.context)
  }

  // ── observers ──────────────────────────────────────────────────────────

  pub fn get_or_create(&mut self, name: &str) -> Result<&mut Variable> {
    Ok(self.context.get_or_create(name)?)
  }

  #[must_use]
  pub fn variable(&self, name: &str) -> Option<&Variable> {
    self.context.variable(name)
  }

  pub fn set_evaluator(&mut self, evaluator: Box<dyn Evaluator>) {
    self.context.set_evaluator(evaluator);
  }

  /// The observer context; trigger dispatch is reachable here for tests.
  #[must_use]
  pub fn context(&self) -> &Context {
    &self.context
  }

  pub fn context_mut(&mut self) -> &mut Context {
    &mut self.context
  }

  // ── bookkeeping ────────────────────────────────────────────────────────

  #[must_use]
  pub fn counters(&self) -> &Counters {
    self.context.counters()
  }

  /// Start a new logical output stream.
  pub fn reset_stream(&mut self) {
    self.context.counters_mut().reset_stream();
  }
}
