
//! The value tower: exact-decimal numbers and reduced fractions.
//!
//! Every piece of arithmetic in the crate eventually funnels into
//! [`Number`]. Equality and ordering are defined on the numeric value,
//! not the representation, so `1/2` and `0.5` compare equal; use
//! [`StrictEq`] when the representation matters.

pub mod rational;
pub mod real;

pub use rational::QNumber;
pub use real::RNumber;

use crate::util::stricteq::StrictEq;

use num::{Zero, One};
use serde::{Serialize, Deserialize};
use thiserror::Error;

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::ops;

/// A scalar value: a bounded-precision decimal or a reduced fraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Number {
  Real(RNumber),
  Ratio(QNumber),
}

/// The representation currently in use by a [`Number`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberRepr {
  Decimal,
  Fraction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("division by zero")]
pub struct DivisionByZeroError;

impl Number {
  pub fn repr(&self) -> NumberRepr {
    match self {
      Number::Real(_) => NumberRepr::Decimal,
      Number::Ratio(_) => NumberRepr::Fraction,
    }
  }

  /// Convenience constructor for a reduced fraction.
  ///
  /// Panics if `denom == 0`.
  pub fn ratio(numer: i64, denom: i64) -> Number {
    let q = QNumber::new(Number::from(numer), Number::from(denom))
      .expect("Number::ratio requires a non-zero denominator");
    q.simplify()
  }

  /// The decimal value, in the precision context.
  pub fn value(&self) -> f64 {
    match self {
      Number::Real(r) => r.value(),
      Number::Ratio(q) => q.value(),
    }
  }

  pub fn is_integer(&self) -> bool {
    self.value().fract() == 0.0
  }

  pub fn is_even(&self) -> bool {
    self.is_integer() && (self.value() % 2.0) == 0.0
  }

  pub fn abs(&self) -> Number {
    match self {
      Number::Real(r) => Number::Real(r.abs()),
      Number::Ratio(q) => Number::Ratio(q.abs()),
    }
  }

  /// The reciprocal. Fails on zero.
  pub fn inverse(&self) -> Result<Number, DivisionByZeroError> {
    match self {
      Number::Real(r) => {
        if r.is_zero() {
          Err(DivisionByZeroError)
        } else if r.value() == 1.0 {
          Ok(self.clone())
        } else {
          Ok(Number::Ratio(QNumber::new(Number::from(1), self.clone())?))
        }
      }
      Number::Ratio(q) => q.inverse(),
    }
  }

  /// Checked division; the only fallible arithmetic operation.
  pub fn div(&self, other: &Number) -> Result<Number, DivisionByZeroError> {
    if other.is_zero() {
      return Err(DivisionByZeroError);
    }
    match (self, other) {
      (Number::Real(a), Number::Real(b)) => {
        Ok(Number::Real(RNumber::new(a.value() / b.value())))
      }
      _ => Ok(self.as_ratio().div(&other.as_ratio())),
    }
  }

  /// Raises to an arbitrary numeric power.
  pub fn pow(&self, exp: &Number) -> Number {
    match self {
      Number::Real(r) => Number::Real(r.pow(exp.value())),
      Number::Ratio(q) => q.pow(exp),
    }
  }

  /// Collapses a fraction toward lowest terms or an integral decimal.
  /// Decimals are already normal.
  pub fn simplify(self) -> Number {
    match self {
      Number::Real(_) => self,
      Number::Ratio(q) => q.simplify(),
    }
  }

  fn as_ratio(&self) -> QNumber {
    match self {
      Number::Real(_) => QNumber::promote(self.clone()),
      Number::Ratio(q) => q.clone(),
    }
  }
}

impl From<i64> for Number {
  fn from(value: i64) -> Number {
    Number::Real(RNumber::from(value))
  }
}

impl From<f64> for Number {
  fn from(value: f64) -> Number {
    Number::Real(RNumber::from(value))
  }
}

impl From<RNumber> for Number {
  fn from(value: RNumber) -> Number {
    Number::Real(value)
  }
}

impl Default for Number {
  fn default() -> Number {
    Number::from(0)
  }
}

/// Compares the numeric value and ignores the representation. To
/// include the representation, use [`StrictEq::strict_eq`].
impl PartialEq for Number {
  fn eq(&self, other: &Number) -> bool {
    self.value() == other.value()
  }
}

impl StrictEq for Number {
  /// Compares the representation as well as the value, so `1/2` and
  /// `0.5` differ, as do `1/2` and `4/8`.
  fn strict_eq(&self, other: &Number) -> bool {
    match (self, other) {
      (Number::Real(a), Number::Real(b)) => a == b,
      (Number::Ratio(a), Number::Ratio(b)) => {
        a.numer().strict_eq(b.numer()) && a.denom().strict_eq(b.denom())
      }
      _ => false,
    }
  }
}

impl PartialOrd for Number {
  fn partial_cmp(&self, other: &Number) -> Option<Ordering> {
    self.value().partial_cmp(&other.value())
  }
}

impl ops::Add for Number {
  type Output = Number;

  fn add(self, other: Number) -> Number {
    match (&self, &other) {
      (Number::Real(a), Number::Real(b)) => {
        Number::Real(RNumber::new(a.value() + b.value()))
      }
      _ => self.as_ratio().add(&other.as_ratio()),
    }
  }
}

impl ops::Add for &Number {
  type Output = Number;

  fn add(self, other: &Number) -> Number {
    self.clone() + other.clone()
  }
}

impl ops::Sub for Number {
  type Output = Number;

  fn sub(self, other: Number) -> Number {
    match (&self, &other) {
      (Number::Real(a), Number::Real(b)) => {
        Number::Real(RNumber::new(a.value() - b.value()))
      }
      _ => self.as_ratio().sub(&other.as_ratio()),
    }
  }
}

impl ops::Sub for &Number {
  type Output = Number;

  fn sub(self, other: &Number) -> Number {
    self.clone() - other.clone()
  }
}

impl ops::Mul for Number {
  type Output = Number;

  fn mul(self, other: Number) -> Number {
    match (&self, &other) {
      (Number::Real(a), Number::Real(b)) => {
        Number::Real(RNumber::new(a.value() * b.value()))
      }
      _ => self.as_ratio().mul(&other.as_ratio()),
    }
  }
}

impl ops::Mul for &Number {
  type Output = Number;

  fn mul(self, other: &Number) -> Number {
    self.clone() * other.clone()
  }
}

impl ops::Neg for Number {
  type Output = Number;

  fn neg(self) -> Number {
    Number::from(-1) * self
  }
}

impl ops::Neg for &Number {
  type Output = Number;

  fn neg(self) -> Number {
    self.clone().neg()
  }
}

impl Zero for Number {
  fn zero() -> Number {
    Number::from(0)
  }
  fn is_zero(&self) -> bool {
    match self {
      Number::Real(r) => r.is_zero(),
      Number::Ratio(q) => q.is_zero(),
    }
  }
}

impl One for Number {
  fn one() -> Number {
    Number::from(1)
  }
  fn is_one(&self) -> bool {
    self.value() == 1.0
  }
}

impl Display for Number {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Number::Real(r) => write!(f, "{r}"),
      Number::Ratio(q) => write!(f, "{q}"),
    }
  }
}
