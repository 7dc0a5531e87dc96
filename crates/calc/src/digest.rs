//! Cryptographic digest calculator.
//!
//! Wraps a [`DynDigest`] selected by name at runtime. Unlike the other
//! calculators the register cannot be seeded: digest state is opaque, so
//! `set_register` is a no-op and `register()` peeks by finalizing a clone,
//! leaving the running state untouched.

use std::fmt;

use digest::DynDigest;
use tracing::debug;
use traits::{Calculator, Error, Value};

/// Digest calculator selected by algorithm name.
///
/// Accepted names (case-insensitive, `-` and `_` ignored): `md5`, `sha1`,
/// `sha224`, `sha256`, `sha384`, `sha512`.
///
/// A single-bit update hashes one whole byte holding 0 or 1; digests have no
/// sub-byte input granularity.
pub struct Digest {
  algorithm: String,
  inner: Box<dyn DynDigest>,
}

impl Digest {
  /// Look up an algorithm by name.
  pub fn new(algorithm: &str) -> Result<Self, Error> {
    let normalized: String = algorithm.chars().filter(|&c| c != '-' && c != '_').collect::<String>().to_ascii_lowercase();
    let inner: Box<dyn DynDigest> = match normalized.as_str() {
      "md5" => Box::new(md5::Md5::default()),
      "sha1" => Box::new(sha1::Sha1::default()),
      "sha224" => Box::new(sha2::Sha224::default()),
      "sha256" => Box::new(sha2::Sha256::default()),
      "sha384" => Box::new(sha2::Sha384::default()),
      "sha512" => Box::new(sha2::Sha512::default()),
      _ => return Err(Error::UnsupportedAlgorithm(algorithm.to_owned())),
    };
    debug!(algorithm = %normalized, "digest calculator ready");
    Ok(Self { algorithm: normalized, inner })
  }

  /// Normalized algorithm name.
  #[must_use]
  pub fn algorithm(&self) -> &str {
    &self.algorithm
  }

  /// Digest output size in bits.
  #[must_use]
  pub fn output_bits(&self) -> u64 {
    self.inner.output_size() as u64 * 8
  }
}

impl Clone for Digest {
  fn clone(&self) -> Self {
    Self { algorithm: self.algorithm.clone(), inner: self.inner.box_clone() }
  }
}

impl fmt::Debug for Digest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Digest").field("algorithm", &self.algorithm).finish_non_exhaustive()
  }
}

impl Calculator for Digest {
  fn reset(&mut self) {
    self.inner.reset();
  }

  /// Digest state cannot be seeded; the value is ignored.
  fn set_register(&mut self, _value: &Value) {}

  fn register(&self) -> Value {
    Value::from_bytes_be(&self.inner.box_clone().finalize())
  }

  fn update(&mut self, value: &Value) {
    let byte = (value & &Value::from(0xFFu32)).to_u32_digits().first().copied().unwrap_or(0) as u8;
    self.inner.update(&[byte]);
  }

  fn update_bit(&mut self, bit: bool) {
    self.inner.update(&[u8::from(bit)]);
  }

  fn update_bytes(&mut self, bytes: &[u8]) {
    self.inner.update(bytes);
  }
}
