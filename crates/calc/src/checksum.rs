//! Modular additive checksum.

use traits::{Calculator, Value};

use crate::model::CheckSumModel;
use crate::value::make_mask;

/// Sums inputs modulo `2^width`.
///
/// Every input is masked to the model width before being added, so a wide
/// value contributes only its low bits. `set_register` assigns directly; the
/// input XOR convention is a CRC-only affair.
#[derive(Debug, Clone)]
pub struct CheckSum {
  model: CheckSumModel,
  mask: Value,
  register: Value,
}

impl CheckSum {
  #[must_use]
  pub fn new(model: CheckSumModel) -> Self {
    let mask = make_mask(model.width());
    let register = model.xor_in() & &mask;
    Self { model, mask, register }
  }

  /// The model this calculator was built from.
  #[must_use]
  pub fn model(&self) -> &CheckSumModel {
    &self.model
  }
}

impl Calculator for CheckSum {
  fn reset(&mut self) {
    self.register = self.model.xor_in() & &self.mask;
  }

  fn set_register(&mut self, value: &Value) {
    self.register = value.clone();
  }

  fn register(&self) -> Value {
    &self.register ^ self.model.xor_out()
  }

  fn update(&mut self, value: &Value) {
    self.register = (&self.register + (value & &self.mask)) & &self.mask;
  }

  fn update_bit(&mut self, bit: bool) {
    if bit {
      self.update(&Value::from(1u8));
    }
  }

  fn update_bytes(&mut self, bytes: &[u8]) {
    for &byte in bytes {
      self.update(&Value::from(byte));
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn plain(width: u64) -> CheckSum {
    CheckSum::new(CheckSumModel::plain(width).unwrap())
  }

  #[test]
  fn sums_bytes_modulo_width() {
    let mut sum = plain(8);
    sum.update_bytes(&[0xF0, 0x20]);
    assert_eq!(sum.register(), Value::from(0x10u8));
  }

  #[test]
  fn wide_register_keeps_carries() {
    let mut sum = plain(16);
    sum.update_bytes(&[0xFF; 4]);
    assert_eq!(sum.register(), Value::from(4u32 * 0xFF));
  }

  #[test]
  fn input_is_masked_before_adding() {
    let mut sum = plain(4);
    sum.update(&Value::from(0xFFu8));
    assert_eq!(sum.register(), Value::from(0xFu8));
  }

  #[test]
  fn bit_updates_count_ones() {
    let mut sum = plain(8);
    for bit in [true, false, true, true] {
      sum.update_bit(bit);
    }
    assert_eq!(sum.register(), Value::from(3u8));
  }

  #[test]
  fn xor_masks_apply() {
    let model = CheckSumModel::new(8, Value::from(0x01u8), Value::from(0xFFu8)).unwrap();
    let mut sum = CheckSum::new(model);
    sum.update(&Value::from(0x02u8));
    assert_eq!(sum.register(), Value::from(0xFCu8));
  }

  #[test]
  fn set_register_assigns_directly() {
    let mut sum = plain(8);
    sum.set_register(&Value::from(0x80u8));
    sum.update(&Value::from(0x80u8));
    assert_eq!(sum.register(), Value::from(0u8));
  }
}
