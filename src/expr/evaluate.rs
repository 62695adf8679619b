
//! Numeric evaluation of expression trees at a point.
//!
//! A [`Point`] binds symbols to evaluated values. Evaluation
//! substitutes bindings, folds every operation through the arithmetic
//! combinators, and computes the elementary functions numerically.
//! Unbound symbols survive, so a partially bound expression evaluates
//! to a reduced expression rather than an error.

use super::{Expr, Function};
use super::arith::{self, ArithmeticError};
use super::number::{Number, RNumber};
use super::space::Space;
use super::symbol::Symbol;
use super::vector::Vector;

use std::collections::HashMap;

/// An assignment of values to symbols.
pub type Point = HashMap<Symbol, Space>;

impl Expr {
  /// Evaluates the expression at the given point. Trigonometric
  /// arguments are taken in degrees.
  pub fn evaluate(&self, point: &Point) -> Result<Expr, ArithmeticError> {
    match self {
      // Fractions collapse to their decimal value; exactness is a
      // property of simplification, not evaluation.
      Expr::Number(Number::Ratio(q)) => {
        Ok(Expr::Number(Number::Real(RNumber::new(q.value()))))
      }
      Expr::Number(n) => Ok(Expr::Number(n.clone())),
      Expr::Symbol(s) => {
        Ok(match point.get(s) {
          Some(value) => value.clone().into(),
          None => Expr::Symbol(s.clone()),
        })
      }
      Expr::Sum(terms) => fold_children(terms, point, arith::add),
      Expr::Product(factors) => fold_children(factors, point, arith::mul),
      Expr::Quotient(numer, denom) => {
        arith::div(numer.evaluate(point)?, denom.evaluate(point)?)
      }
      Expr::Power(base, exp) => {
        arith::pow(base.evaluate(point)?, exp.evaluate(point)?)
      }
      Expr::Function(function, argument) => {
        match argument.evaluate(point)? {
          Expr::Number(n) => Ok(Expr::Number(apply_function(*function, &n))),
          Expr::Vector(_) | Expr::Matrix(_) => {
            Err(ArithmeticError::NonScalarArgument { function: *function })
          }
          reduced => Ok(Expr::Function(*function, Box::new(reduced))),
        }
      }
      Expr::Vector(v) => {
        let cells: Result<Vec<Expr>, ArithmeticError> =
          v.iter().map(|cell| cell.evaluate(point)).collect();
        Ok(Expr::Vector(Vector::new(cells?)))
      }
      Expr::Matrix(m) => {
        let rows: Result<Vec<Vec<Expr>>, ArithmeticError> = m.rows_as_vectors()
          .iter()
          .map(|row| row.iter().map(|cell| cell.evaluate(point)).collect())
          .collect();
        let rows = rows?;
        // Evaluation preserves the shape, so the grid stays rectangular.
        let matrix = super::vector::matrix::Matrix::from_rows(rows)
          .expect("cell-wise evaluation preserved the dimensions");
        Ok(Expr::Matrix(matrix))
      }
    }
  }

  /// The numeric value of a constant expression, if it has one.
  pub(crate) fn constant_value(&self) -> Option<Number> {
    if self.has_symbols() {
      return None;
    }
    match self.evaluate(&Point::new()) {
      Ok(Expr::Number(n)) => Some(n),
      _ => None,
    }
  }
}

fn fold_children(
  children: &[Expr],
  point: &Point,
  combine: fn(Expr, Expr) -> Result<Expr, ArithmeticError>,
) -> Result<Expr, ArithmeticError> {
  let mut iter = children.iter();
  let Some(first) = iter.next() else {
    return Ok(Expr::zero());
  };
  let mut acc = first.evaluate(point)?;
  for child in iter {
    acc = combine(acc, child.evaluate(point)?)?;
  }
  Ok(acc)
}

fn apply_function(function: Function, argument: &Number) -> Number {
  let x = argument.value();
  let value = match function {
    Function::Sin => x.to_radians().sin(),
    Function::Cos => x.to_radians().cos(),
    Function::Ln => x.ln(),
    Function::Log10 => x.log10(),
  };
  Number::Real(RNumber::new(value))
}

#[cfg(test)]
mod tests {
  use super::*;
  use approx::assert_abs_diff_eq;

  fn point(bindings: &[(&str, f64)]) -> Point {
    bindings
      .iter()
      .map(|(name, value)| {
        (Symbol::variable(*name).unwrap(), Space::Number(Number::from(*value)))
      })
      .collect()
  }

  fn eval_number(expr: &Expr, point: &Point) -> f64 {
    match expr.evaluate(point).unwrap() {
      Expr::Number(n) => n.value(),
      other => panic!("expected a number, got {other}"),
    }
  }

  #[test]
  fn test_evaluate_polynomial() {
    // x^2 + 2x + 1 at x = 3
    let e = Expr::Sum(vec![
      Expr::Power(Box::new(Expr::var("x")), Box::new(Expr::from(2))),
      Expr::Product(vec![Expr::from(2), Expr::var("x")]),
      Expr::from(1),
    ]);
    assert_eq!(eval_number(&e, &point(&[("x", 3.0)])), 16.0);
  }

  #[test]
  fn test_unbound_symbol_survives() {
    let e = Expr::Sum(vec![Expr::var("x"), Expr::var("y")]);
    let result = e.evaluate(&point(&[("x", 1.0)])).unwrap();
    assert_eq!(result, Expr::Sum(vec![Expr::var("y"), Expr::from(1)]));
  }

  #[test]
  fn test_fraction_evaluates_to_decimal() {
    let e = Expr::Number(Number::ratio(1, 2));
    assert_eq!(eval_number(&e, &Point::new()), 0.5);
  }

  #[test]
  fn test_quotient_evaluates_to_decimal() {
    let e = Expr::Quotient(Box::new(Expr::var("x")), Box::new(Expr::from(4)));
    assert_eq!(
      e.evaluate(&point(&[("x", 6.0)])).unwrap(),
      Expr::Number(Number::Real(RNumber::new(1.5))),
    );
  }

  #[test]
  fn test_trig_is_in_degrees() {
    let sin90 = Expr::sin(Expr::from(90));
    assert_eq!(eval_number(&sin90, &Point::new()), 1.0);
    let cos180 = Expr::cos(Expr::from(180));
    assert_eq!(eval_number(&cos180, &Point::new()), -1.0);
    let sin30 = Expr::sin(Expr::from(30));
    assert_abs_diff_eq!(eval_number(&sin30, &Point::new()), 0.5, epsilon = 1e-6);
  }

  #[test]
  fn test_logarithms() {
    let e = Expr::log10(Expr::from(1000));
    assert_eq!(eval_number(&e, &Point::new()), 3.0);
    let e = Expr::ln(Expr::from(1));
    assert_eq!(eval_number(&e, &Point::new()), 0.0);
  }

  #[test]
  fn test_partially_bound_function_reduces() {
    let e = Expr::cos(Expr::Sum(vec![Expr::var("x"), Expr::var("y")]));
    let result = e.evaluate(&point(&[("y", 10.0)])).unwrap();
    assert_eq!(
      result,
      Expr::cos(Expr::Sum(vec![Expr::var("x"), Expr::from(10)])),
    );
  }

  #[test]
  fn test_function_rejects_vector_argument() {
    let e = Expr::sin(Expr::Vector(Vector::new(vec![Expr::from(1)])));
    assert!(matches!(
      e.evaluate(&Point::new()).unwrap_err(),
      ArithmeticError::NonScalarArgument { function: Function::Sin },
    ));
  }

  #[test]
  fn test_division_by_evaluated_zero() {
    // x / (y - 1) at y = 1
    let denom = Expr::Sum(vec![Expr::var("y"), Expr::from(-1)]);
    let e = Expr::Quotient(Box::new(Expr::var("x")), Box::new(denom));
    assert!(matches!(
      e.evaluate(&point(&[("x", 2.0), ("y", 1.0)])).unwrap_err(),
      ArithmeticError::DivisionByZero(_),
    ));
  }

  #[test]
  fn test_vector_evaluates_cell_wise() {
    let e = Expr::Vector(Vector::new(vec![
      Expr::var("x"),
      Expr::Product(vec![Expr::from(2), Expr::var("x")]),
    ]));
    let result = e.evaluate(&point(&[("x", 3.0)])).unwrap();
    assert_eq!(
      result,
      Expr::Vector(Vector::new(vec![Expr::from(3), Expr::from(6)])),
    );
  }

  #[test]
  fn test_symbol_bound_to_vector() {
    let v = Vector::new(vec![Expr::from(1), Expr::from(2)]);
    let mut bindings = Point::new();
    bindings.insert(Symbol::variable("v").unwrap(), Space::Vector(v.clone()));
    let e = Expr::Product(vec![Expr::from(2), Expr::var("v")]);
    let result = e.evaluate(&bindings).unwrap();
    assert_eq!(
      result,
      Expr::Vector(Vector::new(vec![Expr::from(2), Expr::from(4)])),
    );
  }

  #[test]
  fn test_constant_value() {
    let e = Expr::Sum(vec![Expr::from(2), Expr::from(3)]);
    assert_eq!(e.constant_value(), Some(Number::from(5)));
    assert_eq!(Expr::var("x").constant_value(), None);
  }
}
