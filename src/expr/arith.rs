
//! Shape-aware arithmetic combinators.
//!
//! These functions dispatch on the shapes of their operands: scalars
//! combine symbolically, a scalar broadcasts over the cells of a
//! vector or matrix, and vectorial operands get the usual linear
//! algebra (element-wise sums, dot and matrix products, division as
//! multiplication by the inverse). The evaluator is built on top of
//! them.

use super::{Expr, Function};
use super::builder::SumBuilder;
use super::number::DivisionByZeroError;
use super::space::{SpaceKind, kind_of};
use super::vector::Vector;
use super::vector::matrix::Matrix;
use crate::util::grid::{Grid, GridIndex};

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ArithmeticError {
  #[error("{0}")]
  DivisionByZero(#[from] DivisionByZeroError),
  #[error("Dimension mismatch: expected {expected} but found {actual}")]
  DimensionMismatch { expected: usize, actual: usize },
  #[error("Cannot {op} {left} and {right}")]
  InvalidOperands { op: &'static str, left: SpaceKind, right: SpaceKind },
  #[error("{function} requires a scalar argument")]
  NonScalarArgument { function: Function },
  #[error("Expected a square matrix, got {height}x{width}")]
  NonSquareMatrix { height: usize, width: usize },
}

pub fn add(left: Expr, right: Expr) -> Result<Expr, ArithmeticError> {
  match (left, right) {
    (Expr::Vector(a), Expr::Vector(b)) => {
      check_lengths(a.len(), b.len())?;
      let cells = a.into_iter()
        .zip(b)
        .map(|(x, y)| Expr::Sum(vec![x, y]).simplify())
        .collect();
      Ok(Expr::Vector(cells))
    }
    (Expr::Matrix(a), Expr::Matrix(b)) => {
      check_matrix_dims(&a, &b)?;
      Ok(Expr::Matrix(a.zip_with(b, |x, y| Expr::Sum(vec![x, y]).simplify())))
    }
    (left @ (Expr::Vector(_) | Expr::Matrix(_)), right @ (Expr::Vector(_) | Expr::Matrix(_))) => {
      Err(invalid("add", &left, &right))
    }
    (Expr::Vector(v), scalar) | (scalar, Expr::Vector(v)) => {
      Ok(Expr::Vector(v.map(|x| Expr::Sum(vec![x, scalar.clone()]).simplify())))
    }
    (Expr::Matrix(m), scalar) | (scalar, Expr::Matrix(m)) => {
      Ok(Expr::Matrix(m.map(|x| Expr::Sum(vec![x, scalar.clone()]).simplify())))
    }
    (a, b) => Ok(Expr::Sum(vec![a, b]).simplify()),
  }
}

pub fn sub(left: Expr, right: Expr) -> Result<Expr, ArithmeticError> {
  match add(left, negate(right)) {
    Err(ArithmeticError::InvalidOperands { left, right, .. }) => {
      Err(ArithmeticError::InvalidOperands { op: "subtract", left, right })
    }
    result => result,
  }
}

pub fn mul(left: Expr, right: Expr) -> Result<Expr, ArithmeticError> {
  match (left, right) {
    (Expr::Vector(a), Expr::Vector(b)) => Ok(Expr::Vector(a.dot(&b)?)),
    (Expr::Matrix(a), Expr::Matrix(b)) => Ok(Expr::Matrix(matrix_product(&a, &b)?)),
    (Expr::Matrix(m), Expr::Vector(v)) => Ok(Expr::Vector(matrix_vector_product(&m, &v)?)),
    (left @ Expr::Vector(_), right @ Expr::Matrix(_)) => {
      Err(invalid("multiply", &left, &right))
    }
    (Expr::Vector(v), scalar) | (scalar, Expr::Vector(v)) => {
      Ok(Expr::Vector(v.map(|x| Expr::Product(vec![x, scalar.clone()]).simplify())))
    }
    (Expr::Matrix(m), scalar) | (scalar, Expr::Matrix(m)) => {
      Ok(Expr::Matrix(m.map(|x| Expr::Product(vec![x, scalar.clone()]).simplify())))
    }
    (a, b) => Ok(Expr::Product(vec![a, b]).simplify()),
  }
}

pub fn div(left: Expr, right: Expr) -> Result<Expr, ArithmeticError> {
  match (left, right) {
    // Evaluation divides out to a decimal; exact fraction reduction
    // belongs to simplification.
    (Expr::Number(a), Expr::Number(b)) => Ok(Expr::Number(a.div(&b)?)),
    (Expr::Vector(a), Expr::Vector(b)) => {
      check_lengths(a.len(), b.len())?;
      let cells: Result<Vec<Expr>, DivisionByZeroError> = a.into_iter()
        .zip(b)
        .map(|(x, y)| Expr::quotient(x, y).map(Expr::simplify))
        .collect();
      Ok(Expr::Vector(Vector::new(cells?)))
    }
    (Expr::Matrix(a), Expr::Matrix(b)) => {
      let inverse = b.inverse()?;
      Ok(Expr::Matrix(matrix_product(&a, &inverse)?))
    }
    (left @ (Expr::Vector(_) | Expr::Matrix(_)), right @ (Expr::Vector(_) | Expr::Matrix(_))) => {
      Err(invalid("divide", &left, &right))
    }
    (Expr::Vector(v), scalar) => {
      if scalar.is_zero() {
        return Err(DivisionByZeroError.into());
      }
      Ok(Expr::Vector(v.map(|x| Expr::quotient_unchecked(x, scalar.clone()).simplify())))
    }
    (Expr::Matrix(m), scalar) => {
      if scalar.is_zero() {
        return Err(DivisionByZeroError.into());
      }
      Ok(Expr::Matrix(m.map(|x| Expr::quotient_unchecked(x, scalar.clone()).simplify())))
    }
    (left, right @ (Expr::Vector(_) | Expr::Matrix(_))) => {
      Err(invalid("divide", &left, &right))
    }
    (a, b) => Ok(Expr::quotient(a, b)?.simplify()),
  }
}

pub fn pow(left: Expr, right: Expr) -> Result<Expr, ArithmeticError> {
  match (left, right) {
    (left, right) if is_vectorial(&left) || is_vectorial(&right) => {
      Err(invalid("exponentiate", &left, &right))
    }
    // Evaluation folds numeric powers unconditionally; the display
    // threshold only applies during simplification.
    (Expr::Number(a), Expr::Number(b)) => Ok(Expr::Number(a.pow(&b))),
    (a, b) => Ok(Expr::Power(Box::new(a), Box::new(b)).simplify()),
  }
}

pub fn negate(expr: Expr) -> Expr {
  match expr {
    Expr::Number(n) => Expr::Number(-n),
    Expr::Vector(v) => Expr::Vector(v.map(negate)),
    Expr::Matrix(m) => Expr::Matrix(m.map(negate)),
    scalar => Expr::Product(vec![Expr::from(-1), scalar]).simplify(),
  }
}

/// The multiplicative inverse: reciprocal for scalars, element-wise
/// reciprocal for vectors, matrix inverse for matrices.
pub fn inverse(expr: Expr) -> Result<Expr, ArithmeticError> {
  match expr {
    Expr::Number(n) => Ok(Expr::Number(n.inverse()?)),
    Expr::Vector(v) => {
      let cells: Result<Vec<Expr>, DivisionByZeroError> = v.into_iter()
        .map(|x| Expr::quotient(Expr::one(), x).map(Expr::simplify))
        .collect();
      Ok(Expr::Vector(Vector::new(cells?)))
    }
    Expr::Matrix(m) => Ok(Expr::Matrix(m.inverse()?)),
    scalar => Ok(Expr::quotient(Expr::one(), scalar)?),
  }
}

fn is_vectorial(expr: &Expr) -> bool {
  matches!(expr, Expr::Vector(_) | Expr::Matrix(_))
}

fn invalid(op: &'static str, left: &Expr, right: &Expr) -> ArithmeticError {
  ArithmeticError::InvalidOperands { op, left: kind_of(left), right: kind_of(right) }
}

fn check_lengths(expected: usize, actual: usize) -> Result<(), ArithmeticError> {
  if expected != actual {
    return Err(ArithmeticError::DimensionMismatch { expected, actual });
  }
  Ok(())
}

fn check_matrix_dims(a: &Matrix, b: &Matrix) -> Result<(), ArithmeticError> {
  check_lengths(a.height(), b.height())?;
  check_lengths(a.width(), b.width())
}

fn matrix_product(a: &Matrix, b: &Matrix) -> Result<Matrix, ArithmeticError> {
  check_lengths(a.width(), b.height())?;
  let grid = Grid::from_generator(a.height(), b.width(), |idx| {
    let mut sum = SumBuilder::new();
    for k in 0..a.width() {
      sum.push(Expr::Product(vec![
        a[GridIndex { row: idx.row, col: k }].clone(),
        b[GridIndex { row: k, col: idx.col }].clone(),
      ]));
    }
    sum.build().simplify()
  });
  Ok(Matrix::new(grid))
}

fn matrix_vector_product(m: &Matrix, v: &Vector) -> Result<Vector, ArithmeticError> {
  check_lengths(m.width(), v.len())?;
  let cells = (0..m.height())
    .map(|row| {
      let mut sum = SumBuilder::new();
      for k in 0..m.width() {
        sum.push(Expr::Product(vec![
          m[GridIndex { row, col: k }].clone(),
          v[k].clone(),
        ]));
      }
      sum.build().simplify()
    })
    .collect();
  Ok(cells)
}
