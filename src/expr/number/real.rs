
//! Bounded-precision decimal values.

use serde::{Serialize, Deserialize};

use std::fmt::{self, Display, Formatter};

/// Number of significant digits kept by every [`RNumber`].
pub const PRECISION: i32 = 7;

/// A real number stored as a decimal value rounded to [`PRECISION`]
/// significant digits, half-up. Rounding happens once, at
/// construction, so arithmetic on `RNumber`s never accumulates digits
/// beyond the precision context.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct RNumber {
  value: f64,
}

impl RNumber {
  pub fn new(value: f64) -> Self {
    Self { value: round_to_precision(value) }
  }

  pub fn value(&self) -> f64 {
    self.value
  }

  /// True if the stored value is integral.
  pub fn is_integer(&self) -> bool {
    self.value.fract() == 0.0
  }

  /// True if the stored value is an even integer.
  pub fn is_even(&self) -> bool {
    self.is_integer() && (self.value % 2.0) == 0.0
  }

  pub fn is_zero(&self) -> bool {
    self.value == 0.0
  }

  pub fn abs(&self) -> Self {
    Self::new(self.value.abs())
  }

  /// Rounds half-up to a fixed number of decimal places. Unlike the
  /// significant-digit rounding applied at construction, this is an
  /// absolute scale.
  pub fn with_scale(&self, decimals: u32) -> Self {
    let scale = 10f64.powi(decimals as i32);
    let scaled = (self.value.abs() * scale + 0.5).floor() / scale;
    Self::new(scaled * self.value.signum())
  }

  /// Raises to an arbitrary real power. An integer-valued exponent
  /// uses exact repeated squaring; anything else falls back to the
  /// floating `powf`.
  pub fn pow(&self, exp: f64) -> Self {
    if exp.fract() == 0.0 && exp.abs() < i32::MAX as f64 {
      Self::new(self.value.powi(exp as i32))
    } else {
      Self::new(self.value.powf(exp))
    }
  }
}

/// Half-up rounding to [`PRECISION`] significant digits. Ties round
/// away from zero.
fn round_to_precision(value: f64) -> f64 {
  if value == 0.0 || !value.is_finite() {
    return value;
  }
  let magnitude = value.abs().log10().floor() as i32;
  let scale = 10f64.powi(PRECISION - 1 - magnitude);
  ((value.abs() * scale + 0.5).floor() / scale) * value.signum()
}

impl From<f64> for RNumber {
  fn from(value: f64) -> Self {
    Self::new(value)
  }
}

impl From<i64> for RNumber {
  fn from(value: i64) -> Self {
    Self::new(value as f64)
  }
}

impl From<RNumber> for f64 {
  fn from(number: RNumber) -> f64 {
    number.value
  }
}

impl Display for RNumber {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    // An integral value gets a forced decimal point, so `2` prints as
    // `2.0` and stays visually distinct from a symbol.
    if self.is_integer() && self.value.abs() < u64::MAX as f64 {
      write!(f, "{:.1}", self.value)
    } else {
      write!(f, "{}", self.value)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_construction_rounds_to_precision() {
    assert_eq!(RNumber::new(1.23456789).value(), 1.234568);
    assert_eq!(RNumber::new(123456789.0).value(), 123456800.0);
    assert_eq!(RNumber::new(-1.23456789).value(), -1.234568);
    assert_eq!(RNumber::new(0.5).value(), 0.5);
    assert_eq!(RNumber::new(0.0).value(), 0.0);
  }

  #[test]
  fn test_rounding_is_half_up() {
    // 0.125 is exactly representable, so the tie is real; half-up
    // rounds it away from zero where half-even would not.
    assert_eq!(RNumber::new(0.125).with_scale(2).value(), 0.13);
    assert_eq!(RNumber::new(-0.125).with_scale(2).value(), -0.13);
  }

  #[test]
  fn test_is_integer() {
    assert!(RNumber::new(3.0).is_integer());
    assert!(RNumber::new(-7.0).is_integer());
    assert!(RNumber::new(0.0).is_integer());
    assert!(!RNumber::new(0.5).is_integer());
  }

  #[test]
  fn test_is_even() {
    assert!(RNumber::new(4.0).is_even());
    assert!(RNumber::new(0.0).is_even());
    assert!(!RNumber::new(3.0).is_even());
    assert!(!RNumber::new(2.5).is_even());
  }

  #[test]
  fn test_with_scale() {
    assert_eq!(RNumber::new(1.231).with_scale(2).value(), 1.23);
    assert_eq!(RNumber::new(1.236).with_scale(2).value(), 1.24);
    assert_eq!(RNumber::new(-1.236).with_scale(2).value(), -1.24);
  }

  #[test]
  fn test_pow() {
    assert_eq!(RNumber::new(3.0).pow(2.0).value(), 9.0);
    assert_eq!(RNumber::new(2.0).pow(-2.0).value(), 0.25);
    assert_eq!(RNumber::new(4.0).pow(0.5).value(), 2.0);
    assert_eq!(RNumber::new(9.0).pow(0.0).value(), 1.0);
  }

  #[test]
  fn test_display() {
    assert_eq!(RNumber::new(2.0).to_string(), "2.0");
    assert_eq!(RNumber::new(-2.0).to_string(), "-2.0");
    assert_eq!(RNumber::new(0.5).to_string(), "0.5");
    assert_eq!(RNumber::new(0.0).to_string(), "0.0");
  }
}
