//! CRC generator polynomial.
//!
//! Stored internally in *normal* notation: the coefficient of `x^width` is
//! implicit and the least-significant bit is the constant term. Constructors
//! accept all four common notations and normalize.

use num_traits::Zero;
use tracing::debug;
use traits::{ModelError, Value};

use crate::value::{make_mask, reflect};

/// Polynomial input/output notations.
///
/// | Notation | Encoding of `x^16 + x^12 + x^5 + 1` (CCITT) |
/// |----------|---------------------------------------------|
/// | `Normal` | `0x1021`, width 16 given explicitly |
/// | `Full` | `0x11021`, width encoded by the top bit |
/// | `Reversed` | `0x8408`, bit-reflected normal form |
/// | `Koopman` | `0x8810`, implicit constant term, explicit top bit |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
  Normal,
  Full,
  Reversed,
  Koopman,
}

impl Notation {
  const fn as_str(self) -> &'static str {
    match self {
      Notation::Normal => "normal",
      Notation::Full => "full",
      Notation::Reversed => "reversed",
      Notation::Koopman => "koopman",
    }
  }
}

/// CRC generator polynomial in normal notation plus its bit-width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial {
  width: u64,
  polynomial: Value,
}

impl Polynomial {
  /// Construct from a polynomial in the given notation.
  ///
  /// `width` is required for `Normal` and `Reversed`; for `Full` and
  /// `Koopman` it is derived from the value and, when also given, must
  /// agree with the derived width.
  pub fn new(polynomial: &Value, notation: Notation, width: Option<u64>) -> Result<Self, ModelError> {
    if polynomial.is_zero() {
      return Err(ModelError::NonPositivePolynomial);
    }
    let built = match notation {
      Notation::Normal => {
        let width = width.ok_or(ModelError::MissingWidth { notation: notation.as_str() })?;
        if width < 1 {
          return Err(ModelError::InvalidWidth(width));
        }
        if polynomial.bits() > width {
          return Err(ModelError::PolynomialTooWide { bits: polynomial.bits(), width });
        }
        Self { width, polynomial: polynomial.clone() }
      }
      Notation::Full => {
        // The top bit encodes the width itself.
        let derived = polynomial.bits() - 1;
        if derived < 1 {
          return Err(ModelError::InvalidWidth(derived));
        }
        if let Some(given) = width {
          if given != derived {
            return Err(ModelError::WidthMismatch { derived, given });
          }
        }
        let mut normal = polynomial.clone();
        normal.set_bit(derived, false);
        Self { width: derived, polynomial: normal }
      }
      Notation::Reversed => {
        let width = width.ok_or(ModelError::MissingWidth { notation: notation.as_str() })?;
        if width < 1 {
          return Err(ModelError::InvalidWidth(width));
        }
        if polynomial.bits() > width {
          return Err(ModelError::PolynomialTooWide { bits: polynomial.bits(), width });
        }
        Self { width, polynomial: reflect(polynomial, width) }
      }
      Notation::Koopman => {
        let derived = polynomial.bits();
        if let Some(given) = width {
          if given != derived {
            return Err(ModelError::WidthMismatch { derived, given });
          }
        }
        let mut normal = polynomial << 1u32;
        normal.set_bit(derived, false);
        normal.set_bit(0, true);
        Self { width: derived, polynomial: normal }
      }
    };
    debug!(
      width = built.width,
      polynomial = %format_args!("{:#x}", built.polynomial),
      "polynomial constructed"
    );
    Ok(built)
  }

  /// Bit-width of the polynomial (its degree).
  #[must_use]
  pub fn width(&self) -> u64 {
    self.width
  }

  /// The polynomial in normal notation.
  #[must_use]
  pub fn polynomial(&self) -> &Value {
    &self.polynomial
  }

  /// Convert to the requested notation.
  ///
  /// Returns `None` for `Koopman` when the constant term is 0, since that
  /// notation cannot represent such polynomials.
  #[must_use]
  pub fn to_notation(&self, notation: Notation) -> Option<Value> {
    match notation {
      Notation::Normal => Some(self.polynomial.clone()),
      Notation::Full => {
        let mut full = self.polynomial.clone();
        full.set_bit(self.width, true);
        Some(full)
      }
      Notation::Reversed => Some(reflect(&self.polynomial, self.width)),
      Notation::Koopman => {
        if !self.polynomial.bit(0) {
          return None;
        }
        let mut full = self.polynomial.clone();
        full.set_bit(self.width, true);
        Some(full >> 1u32)
      }
    }
  }

  /// Mask covering the polynomial's width.
  #[must_use]
  pub fn mask(&self) -> Value {
    make_mask(self.width)
  }
}
