
//! Reduced-fraction values.

use super::{DivisionByZeroError, Number};
use super::real::RNumber;
use crate::util::numeric::gcd;

use num::Zero;
use serde::{Serialize, Deserialize};

use std::fmt::{self, Display, Formatter};

/// A fraction of two [`Number`]s. The sides may themselves be
/// fractions immediately after construction; [`QNumber::simplify`]
/// flattens nesting and drives the pair toward lowest terms (or an
/// integral [`RNumber`] when the denominator divides evenly).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QNumber {
  numer: Box<Number>,
  denom: Box<Number>,
}

impl QNumber {
  /// Constructs a fraction, rejecting a zero denominator.
  pub fn new(numer: Number, denom: Number) -> Result<QNumber, DivisionByZeroError> {
    if denom.is_zero() {
      return Err(DivisionByZeroError);
    }
    Ok(Self::new_unchecked(numer, denom))
  }

  /// Invariant: `denom` is non-zero.
  pub(super) fn new_unchecked(numer: Number, denom: Number) -> QNumber {
    debug_assert!(!denom.is_zero());
    QNumber { numer: Box::new(numer), denom: Box::new(denom) }
  }

  /// The whole number `n`, as the fraction `n / 1`.
  pub fn promote(n: Number) -> QNumber {
    Self::new_unchecked(n, Number::from(1))
  }

  pub fn numer(&self) -> &Number {
    &self.numer
  }

  pub fn denom(&self) -> &Number {
    &self.denom
  }

  /// The decimal value of the quotient, in the precision context.
  pub fn value(&self) -> f64 {
    RNumber::new(self.numer.value() / self.denom.value()).value()
  }

  pub fn is_zero(&self) -> bool {
    self.numer.is_zero()
  }

  pub fn abs(&self) -> QNumber {
    Self::new_unchecked(self.numer.abs(), self.denom.abs())
  }

  /// The reciprocal. Fails when the numerator is zero.
  pub fn inverse(&self) -> Result<Number, DivisionByZeroError> {
    let flipped = QNumber::new((*self.denom).clone(), (*self.numer).clone())?;
    Ok(flipped.simplify())
  }

  pub fn add(&self, other: &QNumber) -> Number {
    let numer = &*self.numer * &*other.denom + &*other.numer * &*self.denom;
    let denom = &*self.denom * &*other.denom;
    Self::new_unchecked(numer, denom).simplify()
  }

  pub fn sub(&self, other: &QNumber) -> Number {
    let numer = &*self.numer * &*other.denom - &*other.numer * &*self.denom;
    let denom = &*self.denom * &*other.denom;
    Self::new_unchecked(numer, denom).simplify()
  }

  pub fn mul(&self, other: &QNumber) -> Number {
    let numer = &*self.numer * &*other.numer;
    let denom = &*self.denom * &*other.denom;
    Self::new_unchecked(numer, denom).simplify()
  }

  /// Invariant: `other` is non-zero (checked by [`Number::div`]).
  pub(super) fn div(&self, other: &QNumber) -> Number {
    debug_assert!(!other.is_zero());
    let numer = &*self.numer * &*other.denom;
    let denom = &*self.denom * &*other.numer;
    Self::new_unchecked(numer, denom).simplify()
  }

  /// Raises both sides to the exponent. Falls back to a plain decimal
  /// when the powered denominator degenerates to zero.
  pub fn pow(&self, exp: &Number) -> Number {
    let numer = Number::Real(RNumber::new(self.numer.pow(exp).value()));
    let denom = Number::Real(RNumber::new(self.denom.pow(exp).value()));
    match QNumber::new(numer, denom) {
      Ok(q) => q.simplify(),
      Err(DivisionByZeroError) => Number::Real(RNumber::new(self.value().powf(exp.value()))),
    }
  }

  /// Normalizes the fraction:
  ///
  /// * zero numerator collapses to zero;
  /// * a numerator equal in value to the denominator collapses to one;
  /// * a fraction on either side flattens to a single fraction;
  /// * an evenly-dividing denominator collapses to an integral
  ///   [`RNumber`];
  /// * an integer pair reduces by its greatest common divisor.
  pub fn simplify(self) -> Number {
    let numer = *self.numer;
    let denom = *self.denom;

    if numer.is_zero() {
      return Number::from(0);
    }
    if numer == denom {
      return Number::from(1);
    }

    let (numer, denom) = match (numer, denom) {
      (Number::Ratio(inner), denom) => {
        // (a/b) / d  =  a / (b*d)
        let new_denom = &*inner.denom * &denom;
        return Self::new_unchecked(*inner.numer, new_denom).simplify();
      }
      (numer, Number::Ratio(inner)) => {
        // n / (a/b)  =  (n*b) / a
        let new_numer = &numer * &*inner.denom;
        return Self::new_unchecked(new_numer, *inner.numer).simplify();
      }
      (numer, denom) => (numer, denom),
    };

    let quotient = RNumber::new(numer.value() / denom.value());
    if quotient.is_integer() {
      return Number::Real(quotient);
    }

    if numer.is_integer() && denom.is_integer() {
      let g = gcd(numer.value() as i64, denom.value() as i64);
      if g != 1 {
        return Number::Ratio(Self::new_unchecked(
          Number::Real(RNumber::new(numer.value() / g as f64)),
          Number::Real(RNumber::new(denom.value() / g as f64)),
        ));
      }
    }

    Number::Ratio(Self::new_unchecked(numer, denom))
  }
}

impl Display for QNumber {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    if self.denom.value() == 1.0 {
      return write!(f, "{}", self.numer);
    }
    if self.numer.is_zero() {
      return write!(f, "0.0");
    }
    write!(f, "({}/{})", self.numer, self.denom)
  }
}
