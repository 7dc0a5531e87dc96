//! Bit-pattern helpers for arbitrary-precision values.
//!
//! These are the small, obviously-correct primitives everything else builds
//! on: width masks, bit reflection, and numeric-literal parsing for the
//! boundary where the external document layer feeds tokens in. The reflection
//! loop doubles as the oracle for the property suite (involution, masking).

use num_bigint::{BigInt, Sign};
use num_traits::{One, Zero};
use traits::{ProcessingError, Value};

/// Build the mask `2^width - 1`.
///
/// A zero width yields the zero mask; stage and model constructors validate
/// `width >= 1` before calling this.
#[must_use]
pub fn make_mask(width: u64) -> Value {
  if width == 0 {
    return Value::zero();
  }
  (Value::one() << width) - Value::one()
}

/// Reverse the low `width` bits of `value`.
///
/// Bits at or above `width` are dropped. `reflect(reflect(v, w), w) == v`
/// for every `v` fitting in `w` bits.
#[must_use]
pub fn reflect(value: &Value, width: u64) -> Value {
  let mut aux = value.clone();
  let mut result = Value::zero();
  for _ in 0..width {
    result <<= 1u32;
    if aux.bit(0) {
      result.set_bit(0, true);
    }
    aux >>= 1u32;
  }
  result
}

/// Parse a possibly signed numeric literal.
///
/// Accepted forms, after trimming: decimal (`123`), hexadecimal (`0x7b`),
/// binary (`0b1111011`), octal with a leading zero (`0173`), and any
/// all-zero string. An optional `+`/`-` sign may precede the digits.
pub fn parse_number(input: &str) -> Result<BigInt, ProcessingError> {
  let trimmed = input.trim();
  let bad = || ProcessingError::BadNumberFormat(trimmed.to_owned());

  let (negative, digits) = match trimmed.as_bytes().first() {
    Some(b'-') => (true, &trimmed[1..]),
    Some(b'+') => (false, &trimmed[1..]),
    Some(_) => (false, trimmed),
    None => return Err(bad()),
  };
  if digits.is_empty() {
    return Err(bad());
  }

  let (radix, body) = if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
    (16, hex)
  } else if let Some(bin) = digits.strip_prefix("0b").or_else(|| digits.strip_prefix("0B")) {
    (2, bin)
  } else if digits.bytes().all(|b| b == b'0') {
    return Ok(BigInt::zero());
  } else if let Some(oct) = digits.strip_prefix('0') {
    (8, oct)
  } else {
    (10, digits)
  };

  let magnitude = BigInt::parse_bytes(body.as_bytes(), radix).ok_or_else(bad)?;
  if magnitude.sign() == Sign::Minus {
    // Sign is handled here, not by the radix parser.
    return Err(bad());
  }
  Ok(if negative { -magnitude } else { magnitude })
}

/// Convert a signed number to a two's-complement [`Value`] of `width` bits.
///
/// Nonnegative inputs are simply masked; negative inputs wrap modulo
/// `2^width`, matching what the pipeline's write-side masking does with a
/// negative token.
#[must_use]
pub fn to_value(number: &BigInt, width: u64) -> Value {
  let modulus = BigInt::one() << width;
  let mut n = number % &modulus;
  if n.sign() == Sign::Minus {
    n += &modulus;
  }
  n.magnitude().clone()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn mask_widths() {
    assert_eq!(make_mask(0), Value::zero());
    assert_eq!(make_mask(1), Value::from(1u8));
    assert_eq!(make_mask(8), Value::from(0xFFu8));
    assert_eq!(make_mask(33), Value::from(0x1_FFFF_FFFFu64));
  }

  #[test]
  fn reflect_known_patterns() {
    assert_eq!(reflect(&Value::from(0b1u8), 8), Value::from(0b1000_0000u8));
    assert_eq!(reflect(&Value::from(0xA5u8), 8), Value::from(0xA5u8));
    assert_eq!(reflect(&Value::from(0b110u8), 3), Value::from(0b011u8));
    // Bits above the width are dropped
    assert_eq!(reflect(&Value::from(0x1F0u16), 4), Value::zero());
  }

  #[test]
  fn reflect_involution_small() {
    for w in 1..=12u64 {
      for v in 0u32..(1 << w.min(10)) {
        let v = Value::from(v);
        assert_eq!(reflect(&reflect(&v, w), w), v);
      }
    }
  }

  #[test]
  fn parse_radixes() {
    assert_eq!(parse_number("123").unwrap(), BigInt::from(123));
    assert_eq!(parse_number("0x7b").unwrap(), BigInt::from(0x7b));
    assert_eq!(parse_number("0X7B").unwrap(), BigInt::from(0x7b));
    assert_eq!(parse_number("0b1111011").unwrap(), BigInt::from(123));
    assert_eq!(parse_number("0173").unwrap(), BigInt::from(123));
    assert_eq!(parse_number("  42 ").unwrap(), BigInt::from(42));
    assert_eq!(parse_number("0").unwrap(), BigInt::zero());
    assert_eq!(parse_number("-000").unwrap(), BigInt::zero());
  }

  #[test]
  fn parse_signs() {
    assert_eq!(parse_number("-5").unwrap(), BigInt::from(-5));
    assert_eq!(parse_number("+0x10").unwrap(), BigInt::from(16));
    assert_eq!(parse_number("-0b101").unwrap(), BigInt::from(-5));
  }

  #[test]
  fn parse_rejects_garbage() {
    for s in ["", "  ", "0x", "0b", "12ab", "0x1g", "089", "--3", "-"] {
      assert!(parse_number(s).is_err(), "accepted {s:?}");
    }
  }

  #[test]
  fn parse_huge() {
    let n = parse_number("0xffffffffffffffffffffffffffffffff").unwrap();
    assert_eq!(n.bits(), 128);
  }

  #[test]
  fn two_complement_conversion() {
    assert_eq!(to_value(&BigInt::from(0x1FF), 8), Value::from(0xFFu8));
    assert_eq!(to_value(&BigInt::from(-1), 8), Value::from(0xFFu8));
    assert_eq!(to_value(&BigInt::from(-2), 4), Value::from(0xEu8));
    assert_eq!(to_value(&BigInt::from(5), 16), Value::from(5u8));
  }
}
