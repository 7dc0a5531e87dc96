//! Named observer variables.
//!
//! A variable is the user-visible handle on the observer mechanism: it holds
//! a current value, may own a calculator fed from one pipeline stage, and may
//! carry one callback expression per stage. The trigger dispatcher in
//! [`crate::Context`] drives both.

use std::fmt;

use traits::{Calculator, ProcessingError, Stage, Value};

/// Check a candidate variable name against `[a-zA-Z_$][a-zA-Z0-9_$]*`.
pub fn check_name(name: &str) -> Result<(), ProcessingError> {
  let mut chars = name.chars();
  let valid_head = chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');
  if valid_head && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
    Ok(())
  } else {
    Err(ProcessingError::IllegalVariableName(name.to_owned()))
  }
}

/// One observer variable.
pub struct Variable {
  name: String,
  value: Value,
  calculator: Option<Box<dyn Calculator>>,
  stage: Option<Stage>,
  callbacks: [Option<String>; Stage::ALL.len()],
}

impl Variable {
  /// Create a variable with a validated name and default state.
  pub fn new(name: &str) -> Result<Self, ProcessingError> {
    check_name(name)?;
    Ok(Self {
      name: name.to_owned(),
      value: Value::default(),
      calculator: None,
      stage: None,
      callbacks: Default::default(),
    })
  }

  #[must_use]
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Current value, as last written by a calculator or callback.
  #[must_use]
  pub fn value(&self) -> &Value {
    &self.value
  }

  pub fn set_value(&mut self, value: Value) {
    self.value = value;
  }

  /// Bind a calculator, fed from the variable's tagged stage.
  pub fn bind_calculator(&mut self, calculator: Box<dyn Calculator>) {
    self.calculator = Some(calculator);
  }

  #[must_use]
  pub fn has_calculator(&self) -> bool {
    self.calculator.is_some()
  }

  pub fn calculator_mut(&mut self) -> Option<&mut (dyn Calculator + 'static)> {
    self.calculator.as_deref_mut()
  }

  /// The stage whose values feed the bound calculator.
  #[must_use]
  pub fn stage(&self) -> Option<Stage> {
    self.stage
  }

  pub fn set_stage(&mut self, stage: Option<Stage>) {
    self.stage = stage;
  }

  /// The callback expression registered for `stage`, if any.
  #[must_use]
  pub fn callback(&self, stage: Stage) -> Option<&str> {
    self.callbacks[stage as usize].as_deref()
  }

  pub fn set_callback(&mut self, stage: Stage, expression: impl Into<String>) {
    self.callbacks[stage as usize] = Some(expression.into());
  }

  pub fn clear_callback(&mut self, stage: Stage) {
    self.callbacks[stage as usize] = None;
  }

  /// Restore default state: zero value, no calculator, no stage tag, no
  /// callbacks. The name is permanent.
  pub fn reset(&mut self) {
    self.value = Value::default();
    self.calculator = None;
    self.stage = None;
    self.callbacks = Default::default();
  }
}

impl fmt::Debug for Variable {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Variable")
      .field("name", &self.name)
      .field("value", &self.value)
      .field("stage", &self.stage)
      .field("calculator", &self.calculator.is_some())
      .finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn name_validation() {
    for ok in ["a", "_tmp", "$crc", "ab3", "A$_9"] {
      assert!(check_name(ok).is_ok(), "{ok}");
    }
    for bad in ["", "3a", "a-b", "a b", "naïve", "a.b"] {
      assert!(check_name(bad).is_err(), "{bad}");
    }
  }

  #[test]
  fn new_rejects_bad_name() {
    assert!(matches!(Variable::new("1bad"), Err(ProcessingError::IllegalVariableName(_))));
  }

  #[test]
  fn callbacks_are_per_stage() {
    let mut v = Variable::new("v").unwrap();
    v.set_callback(Stage::BitStream, "val + 1");
    assert_eq!(v.callback(Stage::BitStream), Some("val + 1"));
    assert_eq!(v.callback(Stage::StreamIn), None);
    v.clear_callback(Stage::BitStream);
    assert_eq!(v.callback(Stage::BitStream), None);
  }

  #[test]
  fn reset_restores_defaults() {
    let mut v = Variable::new("v").unwrap();
    v.set_value(Value::from(7u8));
    v.set_stage(Some(Stage::StreamOut));
    v.set_callback(Stage::StreamOut, "val");
    v.reset();
    assert_eq!(v.value(), &Value::default());
    assert_eq!(v.stage(), None);
    assert!(!v.has_calculator());
    assert_eq!(v.callback(Stage::StreamOut), None);
    assert_eq!(v.name(), "v");
  }
}
