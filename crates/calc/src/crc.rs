//! Table-driven CRC engine for arbitrary widths.
//!
//! The register is kept `width` bits wide regardless of the model. Widths
//! below 8 are handled by shifting the working register left so a full byte
//! still indexes the lookup table; the shift is undone before the register is
//! stored. The single-bit path works on the unshifted register directly and
//! is bit-exact with the table path (see the property suite).

use num_traits::ToPrimitive;
use tracing::trace;
use traits::{Calculator, Value};

use crate::model::CrcModel;
use crate::value::reflect;

/// CRC calculator parameterized by a [`CrcModel`].
#[derive(Debug, Clone)]
pub struct Crc {
  model: CrcModel,
  width: u64,
  // Left shift applied to the working register for widths below 8.
  shift: u64,
  mask: Value,
  shifted_mask: Value,
  poly: Value,
  table: Vec<Value>,
  register: Value,
}

impl Crc {
  /// Build the calculator and its 256-entry lookup table.
  #[must_use]
  pub fn new(model: CrcModel) -> Self {
    let width = model.polynomial().width();
    let shift = 8u64.saturating_sub(width);
    let mask = model.polynomial().mask();
    let shifted_mask = &mask << shift;
    let poly = model.polynomial().polynomial().clone();
    let table = Self::build_table(&model, width, shift, &shifted_mask);
    let register = model.xor_in() & &mask;
    trace!(id = model.id(), width, shift, "CRC calculator ready");
    Self { model, width, shift, mask, shifted_mask, poly, table, register }
  }

  /// The model this calculator was built from.
  #[must_use]
  pub fn model(&self) -> &CrcModel {
    &self.model
  }

  fn build_table(model: &CrcModel, width: u64, shift: u64, shifted_mask: &Value) -> Vec<Value> {
    let poly_shifted = model.polynomial().polynomial() << shift;
    let top = width + shift - 1;
    (0u32..256)
      .map(|i| {
        let mut n = Value::from(i);
        if model.reflect_in() {
          n = reflect(&n, 8);
        }
        n <<= width + shift - 8;
        for _ in 0..8 {
          n = if n.bit(top) { (n << 1u64) ^ &poly_shifted } else { n << 1u64 };
        }
        if model.reflect_in() {
          n = reflect(&(n >> shift), width) << shift;
        }
        n & shifted_mask
      })
      .collect()
  }

  fn table_entry(&self, index: &Value) -> &Value {
    // index is already masked to one byte
    &self.table[index.to_usize().unwrap_or(0)]
  }
}

impl Calculator for Crc {
  fn reset(&mut self) {
    self.register = self.model.xor_in() & &self.mask;
  }

  fn set_register(&mut self, value: &Value) {
    self.register = (value ^ self.model.xor_in()) & &self.mask;
  }

  fn register(&self) -> Value {
    let out = if self.model.reflect_out() {
      reflect(&self.register, self.width)
    } else {
      self.register.clone()
    };
    (out ^ self.model.xor_out()) & &self.mask
  }

  fn update(&mut self, value: &Value) {
    let byte = (value & &Value::from(0xFFu32)).to_u8().unwrap_or(0);
    self.update_bytes(&[byte]);
  }

  fn update_bit(&mut self, bit: bool) {
    self.register = if self.register.bit(self.width - 1) == !bit {
      ((&self.register << 1u64) ^ &self.poly) & &self.mask
    } else {
      (&self.register << 1u64) & &self.mask
    };
  }

  fn update_bytes(&mut self, bytes: &[u8]) {
    if self.model.reflect_in() {
      // The register stays in reflected orientation for the whole run.
      let mut reg = reflect(&self.register, self.width + self.shift);
      for &byte in bytes {
        let index = ((&reg >> self.shift) ^ &Value::from(byte)) & &Value::from(0xFFu32);
        reg = ((reg >> 8u64) ^ self.table_entry(&index)) & &self.shifted_mask;
      }
      self.register = reflect(&reg, self.width + self.shift) & &self.mask;
    } else {
      let mut reg = &self.register << self.shift;
      for &byte in bytes {
        let index = ((&reg >> (self.width + self.shift - 8)) ^ &Value::from(byte)) & &Value::from(0xFFu32);
        reg = ((reg << (8 - self.shift)) ^ self.table_entry(&index)) & &self.shifted_mask;
      }
      self.register = reg >> self.shift;
    }
  }
}
