//! Single-bit parity accumulator.

use traits::{Calculator, Value};

use crate::model::ParityKind;

/// Tracks the parity of all input bits seen since the last reset.
///
/// The internal register is one bit wide and flips once per set input bit.
/// `register()` reports the parity *bit to append*: 0 when the stream already
/// satisfies the configured sense, 1 otherwise. An odd-parity calculator over
/// no input therefore reports 1.
#[derive(Debug, Clone)]
pub struct Parity {
  kind: ParityKind,
  register: Value,
}

impl Parity {
  #[must_use]
  pub fn new(kind: ParityKind) -> Self {
    Self { kind, register: Value::default() }
  }

  /// The configured parity sense.
  #[must_use]
  pub fn kind(&self) -> ParityKind {
    self.kind
  }

  fn flip(&mut self) {
    let flipped = !self.register.bit(0);
    self.register.set_bit(0, flipped);
  }
}

impl Calculator for Parity {
  fn reset(&mut self) {
    self.register = Value::default();
  }

  fn set_register(&mut self, value: &Value) {
    self.register = value & &Value::from(1u8);
  }

  fn register(&self) -> Value {
    if self.register.bit(0) == matches!(self.kind, ParityKind::Odd) {
      Value::from(0u8)
    } else {
      Value::from(1u8)
    }
  }

  fn update(&mut self, value: &Value) {
    if value.count_ones() % 2 == 1 {
      self.flip();
    }
  }

  fn update_bit(&mut self, bit: bool) {
    if bit {
      self.flip();
    }
  }

  fn update_bytes(&mut self, bytes: &[u8]) {
    for &byte in bytes {
      if byte.count_ones() % 2 == 1 {
        self.flip();
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_stream_senses() {
    assert_eq!(Parity::new(ParityKind::Even).register(), Value::from(0u8));
    assert_eq!(Parity::new(ParityKind::Odd).register(), Value::from(1u8));
  }

  #[test]
  fn single_set_bit_flips_both_senses() {
    let mut even = Parity::new(ParityKind::Even);
    even.update_bit(true);
    assert_eq!(even.register(), Value::from(1u8));

    let mut odd = Parity::new(ParityKind::Odd);
    odd.update_bit(true);
    assert_eq!(odd.register(), Value::from(0u8));
  }

  #[test]
  fn byte_parity_uses_popcount() {
    // 0xFF has even popcount, 0x01 odd
    let mut odd = Parity::new(ParityKind::Odd);
    odd.update(&Value::from(0xFFu8));
    assert_eq!(odd.register(), Value::from(1u8));
    odd.update(&Value::from(0x01u8));
    assert_eq!(odd.register(), Value::from(0u8));
  }

  #[test]
  fn wide_value_counts_all_bits() {
    let mut even = Parity::new(ParityKind::Even);
    even.update(&Value::from(0x1_0001u32));
    assert_eq!(even.register(), Value::from(0u8));
    even.update(&Value::from(0x1_0000u32));
    assert_eq!(even.register(), Value::from(1u8));
  }

  #[test]
  fn clear_bits_do_not_flip() {
    let mut even = Parity::new(ParityKind::Even);
    even.update_bytes(&[0x00, 0x00]);
    even.update_bit(false);
    assert_eq!(even.register(), Value::from(0u8));
  }

  #[test]
  fn set_register_keeps_one_bit() {
    let mut parity = Parity::new(ParityKind::Even);
    parity.set_register(&Value::from(0xFFu8));
    assert_eq!(parity.register(), Value::from(1u8));
  }
}
