//! Calculator model descriptions.
//!
//! Models are validated at construction and immutable afterwards; the
//! calculators they parameterize never re-check them.

use tracing::debug;
use traits::{ModelError, Value};

use crate::polynomial::Polynomial;

/// Rocksoft-parameterized CRC description.
///
/// Built through [`CrcModelBuilder`]; `check`, when present, is the expected
/// CRC of the ASCII bytes `"123456789"` and lets preset catalogs
/// self-validate.
#[derive(Debug, Clone)]
pub struct CrcModel {
  id: String,
  aliases: Vec<String>,
  description: Option<String>,
  polynomial: Polynomial,
  reflect_in: bool,
  xor_in: Value,
  reflect_out: bool,
  xor_out: Value,
  check: Option<Value>,
}

impl CrcModel {
  /// Start building a model around a validated polynomial.
  #[must_use]
  pub fn builder(id: impl Into<String>, polynomial: Polynomial) -> CrcModelBuilder {
    CrcModelBuilder {
      id: id.into(),
      aliases: Vec::new(),
      description: None,
      polynomial,
      reflect_in: false,
      xor_in: Value::default(),
      reflect_out: false,
      xor_out: Value::default(),
      check: None,
    }
  }

  /// Model identifier.
  #[must_use]
  pub fn id(&self) -> &str {
    &self.id
  }

  /// Alternative identifiers.
  #[must_use]
  pub fn aliases(&self) -> &[String] {
    &self.aliases
  }

  /// Human-readable description.
  #[must_use]
  pub fn description(&self) -> Option<&str> {
    self.description.as_deref()
  }

  /// The generator polynomial.
  #[must_use]
  pub fn polynomial(&self) -> &Polynomial {
    &self.polynomial
  }

  /// Whether input bytes are bit-reflected.
  #[must_use]
  pub fn reflect_in(&self) -> bool {
    self.reflect_in
  }

  /// Initial register value.
  #[must_use]
  pub fn xor_in(&self) -> &Value {
    &self.xor_in
  }

  /// Whether the register is bit-reflected before the final XOR.
  #[must_use]
  pub fn reflect_out(&self) -> bool {
    self.reflect_out
  }

  /// Final XOR value.
  #[must_use]
  pub fn xor_out(&self) -> &Value {
    &self.xor_out
  }

  /// Expected CRC of ASCII `"123456789"`, when declared.
  #[must_use]
  pub fn check(&self) -> Option<&Value> {
    self.check.as_ref()
  }

  /// Whether `candidate` names this model (id or alias, case-insensitive).
  #[must_use]
  pub fn matches(&self, candidate: &str) -> bool {
    self.id.eq_ignore_ascii_case(candidate) || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(candidate))
  }
}

/// Builder for [`CrcModel`].
#[derive(Debug, Clone)]
pub struct CrcModelBuilder {
  id: String,
  aliases: Vec<String>,
  description: Option<String>,
  polynomial: Polynomial,
  reflect_in: bool,
  xor_in: Value,
  reflect_out: bool,
  xor_out: Value,
  check: Option<Value>,
}

impl CrcModelBuilder {
  /// Add an alternative identifier.
  #[must_use]
  pub fn alias(mut self, alias: impl Into<String>) -> Self {
    self.aliases.push(alias.into());
    self
  }

  /// Attach a human-readable description.
  #[must_use]
  pub fn description(mut self, description: impl Into<String>) -> Self {
    self.description = Some(description.into());
    self
  }

  /// Reflect input bytes.
  #[must_use]
  pub fn reflect_in(mut self, reflect_in: bool) -> Self {
    self.reflect_in = reflect_in;
    self
  }

  /// Initial register value.
  #[must_use]
  pub fn xor_in(mut self, xor_in: Value) -> Self {
    self.xor_in = xor_in;
    self
  }

  /// Reflect the register before the final XOR.
  #[must_use]
  pub fn reflect_out(mut self, reflect_out: bool) -> Self {
    self.reflect_out = reflect_out;
    self
  }

  /// Final XOR value.
  #[must_use]
  pub fn xor_out(mut self, xor_out: Value) -> Self {
    self.xor_out = xor_out;
    self
  }

  /// Declare the expected CRC of ASCII `"123456789"`.
  #[must_use]
  pub fn check(mut self, check: Value) -> Self {
    self.check = Some(check);
    self
  }

  /// Validate and freeze the model.
  pub fn build(self) -> Result<CrcModel, ModelError> {
    if self.id.is_empty() {
      return Err(ModelError::EmptyId);
    }
    debug!(id = %self.id, width = self.polynomial.width(), "CRC model built");
    Ok(CrcModel {
      id: self.id,
      aliases: self.aliases,
      description: self.description,
      polynomial: self.polynomial,
      reflect_in: self.reflect_in,
      xor_in: self.xor_in,
      reflect_out: self.reflect_out,
      xor_out: self.xor_out,
      check: self.check,
    })
  }
}

/// Additive checksum description: width plus initial/final XOR masks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckSumModel {
  width: u64,
  xor_in: Value,
  xor_out: Value,
}

impl CheckSumModel {
  /// Construct a model; `width` must be at least 1.
  pub fn new(width: u64, xor_in: Value, xor_out: Value) -> Result<Self, ModelError> {
    if width < 1 {
      return Err(ModelError::InvalidWidth(width));
    }
    Ok(Self { width, xor_in, xor_out })
  }

  /// Construct a model with zero XOR masks.
  pub fn plain(width: u64) -> Result<Self, ModelError> {
    Self::new(width, Value::default(), Value::default())
  }

  /// Checksum width in bits.
  #[must_use]
  pub fn width(&self) -> u64 {
    self.width
  }

  /// Initial register value.
  #[must_use]
  pub fn xor_in(&self) -> &Value {
    &self.xor_in
  }

  /// Final XOR value.
  #[must_use]
  pub fn xor_out(&self) -> &Value {
    &self.xor_out
  }
}

/// Parity sense for the [`crate::Parity`] calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParityKind {
  Even,
  Odd,
}
