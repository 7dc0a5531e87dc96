//! Property suite for the calculators.
//!
//! Each property pins an algebraic identity against a simple oracle: the
//! reflection helper is an involution, the table-driven CRC paths agree with
//! the single-bit register, and the additive calculators match plain integer
//! arithmetic.

use proptest::collection::vec;
use proptest::prelude::*;
use traits::{Calculator, Value};

use crate::checksum::CheckSum;
use crate::crc::Crc;
use crate::model::{CheckSumModel, CrcModel, ParityKind};
use crate::parity::Parity;
use crate::polynomial::{Notation, Polynomial};
use crate::value::{make_mask, reflect};

/// Arbitrary CRC model up to 32 bits wide, reflected or not, with random
/// XOR masks. The constant term is forced on so every notation can express
/// the polynomial.
fn arb_model() -> impl Strategy<Value = CrcModel> {
  (1u64..=32, any::<u64>(), any::<bool>(), any::<u64>(), any::<u64>()).prop_map(
    |(width, poly, reflected, xor_in, xor_out)| {
      let mask = (1u64 << width) - 1;
      let poly = (poly & mask) | 1;
      let polynomial = Polynomial::new(&Value::from(poly), Notation::Normal, Some(width)).unwrap();
      CrcModel::builder("prop", polynomial)
        .reflect_in(reflected)
        .xor_in(Value::from(xor_in & mask))
        .reflect_out(reflected)
        .xor_out(Value::from(xor_out & mask))
        .build()
        .unwrap()
    },
  )
}

proptest! {
  #[test]
  fn reflect_is_an_involution(value: u128, width in 0u64..=130) {
    let value = Value::from(value);
    let masked = &value & &make_mask(width);
    prop_assert_eq!(reflect(&reflect(&value, width), width), masked);
  }

  #[test]
  fn reflect_preserves_popcount_within_width(value: u64, width in 64u64..=80) {
    let value = Value::from(value);
    prop_assert_eq!(reflect(&value, width).count_ones(), value.count_ones());
  }

  #[test]
  fn bit_path_matches_table_path(model in arb_model(), data in vec(any::<u8>(), 0..64)) {
    // Reflected models consume bytes least-significant bit first
    let lsb_first = model.reflect_in();
    let mut table = Crc::new(model.clone());
    let mut bitwise = Crc::new(model);
    table.update_bytes(&data);
    for &byte in &data {
      for i in 0..8 {
        let i = if lsb_first { i } else { 7 - i };
        bitwise.update_bit(byte >> i & 1 == 1);
      }
    }
    prop_assert_eq!(table.register(), bitwise.register());
  }

  #[test]
  fn byte_and_slice_updates_agree(model in arb_model(), data in vec(any::<u8>(), 0..64)) {
    let mut by_slice = Crc::new(model.clone());
    let mut by_byte = Crc::new(model);
    by_slice.update_bytes(&data);
    for &byte in &data {
      by_byte.update(&Value::from(byte));
    }
    prop_assert_eq!(by_slice.register(), by_byte.register());
  }

  #[test]
  fn crc_register_fits_width(model in arb_model(), data in vec(any::<u8>(), 0..32)) {
    let width = model.polynomial().width();
    let mut crc = Crc::new(model);
    crc.update_bytes(&data);
    prop_assert!(crc.register().bits() <= width);
  }

  #[test]
  fn notation_conversions_roundtrip(width in 1u64..=32, poly: u64) {
    let mask = (1u64 << width) - 1;
    let poly = (poly & mask) | 1;
    let original = Polynomial::new(&Value::from(poly), Notation::Normal, Some(width)).unwrap();
    for (notation, give_width) in [
      (Notation::Normal, true),
      (Notation::Full, false),
      (Notation::Reversed, true),
      (Notation::Koopman, false),
    ] {
      let encoded = original.to_notation(notation).unwrap();
      let width = give_width.then_some(width);
      let decoded = Polynomial::new(&encoded, notation, width).unwrap();
      prop_assert_eq!(&decoded, &original);
    }
  }

  #[test]
  fn checksum_matches_integer_sum(width in 1u64..=24, data in vec(any::<u8>(), 0..64)) {
    let mut sum = CheckSum::new(CheckSumModel::plain(width).unwrap());
    sum.update_bytes(&data);
    let oracle = data.iter().map(|&b| u64::from(b)).sum::<u64>() % (1u64 << width);
    prop_assert_eq!(sum.register(), Value::from(oracle));
  }

  #[test]
  fn parity_matches_popcount(data in vec(any::<u8>(), 0..64)) {
    let mut even = Parity::new(ParityKind::Even);
    let mut odd = Parity::new(ParityKind::Odd);
    even.update_bytes(&data);
    odd.update_bytes(&data);
    let ones: u32 = data.iter().map(|b| b.count_ones()).sum();
    let expect_even = Value::from(ones % 2);
    prop_assert_eq!(even.register(), expect_even.clone());
    prop_assert_eq!(odd.register(), Value::from(1u8) - expect_even);
  }

  #[test]
  fn crc_is_linear_in_concatenation(model in arb_model(), a in vec(any::<u8>(), 0..32), b in vec(any::<u8>(), 0..32)) {
    // Splitting the input across calls never changes the result
    let mut whole = Crc::new(model.clone());
    whole.update_bytes(&a);
    whole.update_bytes(&b);
    let mut joined = Crc::new(model);
    let mut data = a;
    data.extend_from_slice(&b);
    joined.update_bytes(&data);
    prop_assert_eq!(whole.register(), joined.register());
  }
}
