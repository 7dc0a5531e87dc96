//! Variable registry and trigger dispatch.
//!
//! The [`Context`] is the single observer every stage reports to. It owns
//! the variables, the optional expression evaluator and the output
//! bookkeeping counters, and implements [`Trigger`] by feeding bound
//! calculators and running callback expressions.

use std::collections::BTreeMap;

use tracing::trace;
use traits::{EvalError, ProcessingError, Stage, Trigger, Value};

use crate::variable::Variable;

/// Output bookkeeping: total bytes, per-stream bytes, stream ordinal.
///
/// All three advance for discarded bytes too; discarding silences the sink,
/// not the accounting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
  stream_number: u64,
  stream_length: u64,
  total_length: u64,
}

impl Counters {
  /// Ordinal of the current output stream, starting at 0.
  #[must_use]
  pub fn stream_number(&self) -> u64 {
    self.stream_number
  }

  /// Bytes accounted to the current output stream.
  #[must_use]
  pub fn stream_length(&self) -> u64 {
    self.stream_length
  }

  /// Bytes accounted since the pipeline was built.
  #[must_use]
  pub fn total_length(&self) -> u64 {
    self.total_length
  }

  /// Start a new output stream: zero `stream_length`, bump `stream_number`.
  pub fn reset_stream(&mut self) {
    self.stream_length = 0;
    self.stream_number += 1;
  }

  fn advance(&mut self) {
    self.stream_length += 1;
    self.total_length += 1;
  }
}

/// Read-only view handed to the evaluator during a callback.
///
/// Exposes the current variable values and counters; nothing here lets a
/// callback write back into the pipeline.
#[derive(Debug)]
pub struct EvalScope<'a> {
  variables: &'a BTreeMap<String, Variable>,
  counters: &'a Counters,
}

impl EvalScope<'_> {
  /// Current value of a variable, by name.
  #[must_use]
  pub fn get(&self, name: &str) -> Option<&Value> {
    self.variables.get(name).map(Variable::value)
  }

  /// All variables, in name order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
    self.variables.iter().map(|(name, variable)| (name.as_str(), variable.value()))
  }

  /// Output bookkeeping counters.
  #[must_use]
  pub fn counters(&self) -> &Counters {
    self.counters
  }
}

/// Callback-expression evaluator, supplied by the embedding application.
///
/// The pipeline core evaluates nothing itself; it forwards the expression
/// string, the most recent triggering value (via [`Evaluator::put_value`])
/// and a read-only [`EvalScope`].
pub trait Evaluator {
  /// Record the value that caused the current trigger; conventionally bound
  /// to a well-known name such as `val`.
  fn put_value(&mut self, value: &Value);

  /// Evaluate one callback expression against the scope.
  fn eval(&mut self, expression: &str, scope: &EvalScope<'_>) -> Result<Value, EvalError>;
}

/// Observer context: variable registry, evaluator seam and counters.
#[derive(Default)]
pub struct Context {
  variables: BTreeMap<String, Variable>,
  evaluator: Option<Box<dyn Evaluator>>,
  counters: Counters,
}

impl Context {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Fetch a variable, creating it with default state on first use.
  pub fn get_or_create(&mut self, name: &str) -> Result<&mut Variable, ProcessingError> {
    if !self.variables.contains_key(name) {
      let variable = Variable::new(name)?;
      self.variables.insert(name.to_owned(), variable);
    }
    // The entry was just ensured
    self.variables.get_mut(name).ok_or_else(|| ProcessingError::IllegalVariableName(name.to_owned()))
  }

  #[must_use]
  pub fn variable(&self, name: &str) -> Option<&Variable> {
    self.variables.get(name)
  }

  pub fn variable_mut(&mut self, name: &str) -> Option<&mut Variable> {
    self.variables.get_mut(name)
  }

  /// All variables, in name order.
  pub fn variables(&self) -> impl Iterator<Item = &Variable> {
    self.variables.values()
  }

  pub fn variables_mut(&mut self) -> impl Iterator<Item = &mut Variable> {
    self.variables.values_mut()
  }

  /// Install the callback-expression evaluator.
  pub fn set_evaluator(&mut self, evaluator: Box<dyn Evaluator>) {
    self.evaluator = Some(evaluator);
  }

  #[must_use]
  pub fn counters(&self) -> &Counters {
    &self.counters
  }

  pub fn counters_mut(&mut self) -> &mut Counters {
    &mut self.counters
  }
}

impl Trigger for Context {
  /// Dispatch one observed value.
  ///
  /// For every variable in name order: first the bound calculator (if its
  /// stage tag matches) consumes the value and the register is copied into
  /// the variable, then the stage's callback expression (if registered)
  /// overwrites the variable's value. Calculator before callback, per
  /// variable.
  fn trigger(&mut self, stage: Stage, value: &Value) -> Result<(), ProcessingError> {
    trace!(%stage, value = %format_args!("{value:#x}"), "trigger");
    if let Some(evaluator) = self.evaluator.as_deref_mut() {
      evaluator.put_value(value);
    }
    let names: Vec<String> = self.variables.keys().cloned().collect();
    for name in names {
      let mut expression = None;
      if let Some(variable) = self.variables.get_mut(&name) {
        if variable.stage() == Some(stage) {
          if let Some(calculator) = variable.calculator_mut() {
            if stage == Stage::BitStream {
              calculator.update_bit(value.bit(0));
            } else {
              calculator.update(value);
            }
            let register = calculator.register();
            variable.set_value(register);
          }
        }
        expression = variable.callback(stage).map(str::trim).filter(|e| !e.is_empty()).map(ToOwned::to_owned);
      }
      if let Some(expression) = expression {
        let result = match self.evaluator.as_deref_mut() {
          Some(evaluator) => {
            let scope = EvalScope { variables: &self.variables, counters: &self.counters };
            evaluator.eval(&expression, &scope)?
          }
          None => return Err(ProcessingError::NoEvaluator { variable: name }),
        };
        if let Some(variable) = self.variables.get_mut(&name) {
          variable.set_value(result);
        }
      }
    }
    if stage == Stage::OutputStream {
      self.counters.advance();
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use calc::{CheckSum, CheckSumModel};

  struct Doubler;

  impl Evaluator for Doubler {
    fn put_value(&mut self, _value: &Value) {}

    fn eval(&mut self, expression: &str, scope: &EvalScope<'_>) -> Result<Value, EvalError> {
      match expression {
        "double" => Ok(scope.get("sum").cloned().unwrap_or_default() << 1u32),
        "fail" => Err(EvalError("boom".into())),
        other => Err(EvalError(format!("unknown expression: {other}"))),
      }
    }
  }

  fn checksum() -> Box<CheckSum> {
    Box::new(CheckSum::new(CheckSumModel::plain(8).unwrap()))
  }

  #[test]
  fn calculator_updates_on_matching_stage_only() {
    let mut ctx = Context::new();
    let var = ctx.get_or_create("sum").unwrap();
    var.set_stage(Some(Stage::StreamIn));
    var.bind_calculator(checksum());

    ctx.trigger(Stage::StreamIn, &Value::from(3u8)).unwrap();
    ctx.trigger(Stage::StreamOut, &Value::from(100u8)).unwrap();
    assert_eq!(ctx.variable("sum").unwrap().value(), &Value::from(3u8));
  }

  #[test]
  fn bitstream_stage_feeds_single_bits() {
    let mut ctx = Context::new();
    let var = ctx.get_or_create("ones").unwrap();
    var.set_stage(Some(Stage::BitStream));
    var.bind_calculator(checksum());

    for bit in [1u8, 0, 1, 1] {
      ctx.trigger(Stage::BitStream, &Value::from(bit)).unwrap();
    }
    assert_eq!(ctx.variable("ones").unwrap().value(), &Value::from(3u8));
  }

  #[test]
  fn callback_overwrites_calculator_result() {
    let mut ctx = Context::new();
    ctx.set_evaluator(Box::new(Doubler));
    let var = ctx.get_or_create("sum").unwrap();
    var.set_stage(Some(Stage::StreamIn));
    var.bind_calculator(checksum());
    var.set_callback(Stage::StreamIn, "double");

    ctx.trigger(Stage::StreamIn, &Value::from(5u8)).unwrap();
    // Calculator writes 5, callback then doubles it
    assert_eq!(ctx.variable("sum").unwrap().value(), &Value::from(10u8));
  }

  #[test]
  fn callback_without_evaluator_fails() {
    let mut ctx = Context::new();
    let var = ctx.get_or_create("v").unwrap();
    var.set_callback(Stage::StreamIn, "double");
    let err = ctx.trigger(Stage::StreamIn, &Value::from(1u8)).unwrap_err();
    assert!(matches!(err, ProcessingError::NoEvaluator { .. }));
  }

  #[test]
  fn blank_callback_is_ignored() {
    let mut ctx = Context::new();
    let var = ctx.get_or_create("v").unwrap();
    var.set_callback(Stage::StreamIn, "   ");
    ctx.trigger(Stage::StreamIn, &Value::from(1u8)).unwrap();
  }

  #[test]
  fn eval_failure_propagates() {
    let mut ctx = Context::new();
    ctx.set_evaluator(Box::new(Doubler));
    let var = ctx.get_or_create("v").unwrap();
    var.set_callback(Stage::StreamIn, "fail");
    let err = ctx.trigger(Stage::StreamIn, &Value::from(1u8)).unwrap_err();
    assert!(matches!(err, ProcessingError::Eval(_)));
  }

  #[test]
  fn output_stage_advances_counters() {
    let mut ctx = Context::new();
    ctx.trigger(Stage::OutputStream, &Value::from(1u8)).unwrap();
    ctx.trigger(Stage::OutputStream, &Value::from(2u8)).unwrap();
    assert_eq!(ctx.counters().total_length(), 2);
    assert_eq!(ctx.counters().stream_length(), 2);
    ctx.counters_mut().reset_stream();
    assert_eq!(ctx.counters().stream_number(), 1);
    assert_eq!(ctx.counters().stream_length(), 0);
    assert_eq!(ctx.counters().total_length(), 2);
  }
}
