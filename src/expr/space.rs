
//! Evaluated values: the subset of expressions a bound symbol can
//! take at an evaluation point.

use super::Expr;
use super::number::Number;
use super::vector::Vector;
use super::vector::matrix::Matrix;

use thiserror::Error;

use std::convert::TryFrom;
use std::fmt::{self, Display, Formatter};

/// A fully evaluated value: a scalar, a vector, or a matrix. Vectorial
/// values may still carry symbolic cells.
#[derive(Debug, Clone, PartialEq)]
pub enum Space {
  Number(Number),
  Vector(Vector),
  Matrix(Matrix),
}

/// The shape of a value, for dispatch and error messages. Every
/// non-vectorial expression counts as a scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceKind {
  Scalar,
  Vector,
  Matrix,
}

#[derive(Debug, Clone, Error)]
#[error("Expected an evaluated value, got {original_expr}")]
pub struct NotAValueError {
  pub original_expr: Expr,
  _priv: (),
}

impl Space {
  pub fn kind(&self) -> SpaceKind {
    match self {
      Space::Number(_) => SpaceKind::Scalar,
      Space::Vector(_) => SpaceKind::Vector,
      Space::Matrix(_) => SpaceKind::Matrix,
    }
  }
}

/// The shape an expression would evaluate into.
pub fn kind_of(expr: &Expr) -> SpaceKind {
  match expr {
    Expr::Vector(_) => SpaceKind::Vector,
    Expr::Matrix(_) => SpaceKind::Matrix,
    _ => SpaceKind::Scalar,
  }
}

impl TryFrom<Expr> for Space {
  type Error = NotAValueError;

  fn try_from(expr: Expr) -> Result<Space, NotAValueError> {
    match expr {
      Expr::Number(n) => Ok(Space::Number(n)),
      Expr::Vector(v) => Ok(Space::Vector(v)),
      Expr::Matrix(m) => Ok(Space::Matrix(m)),
      original_expr => Err(NotAValueError { original_expr, _priv: () }),
    }
  }
}

impl From<Space> for Expr {
  fn from(space: Space) -> Expr {
    match space {
      Space::Number(n) => Expr::Number(n),
      Space::Vector(v) => Expr::Vector(v),
      Space::Matrix(m) => Expr::Matrix(m),
    }
  }
}

impl From<Number> for Space {
  fn from(n: Number) -> Space {
    Space::Number(n)
  }
}

impl From<Vector> for Space {
  fn from(v: Vector) -> Space {
    Space::Vector(v)
  }
}

impl From<Matrix> for Space {
  fn from(m: Matrix) -> Space {
    Space::Matrix(m)
  }
}

impl Display for Space {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Space::Number(n) => write!(f, "{n}"),
      Space::Vector(v) => write!(f, "{v}"),
      Space::Matrix(m) => write!(f, "{m}"),
    }
  }
}

impl Display for SpaceKind {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      SpaceKind::Scalar => write!(f, "a scalar"),
      SpaceKind::Vector => write!(f, "a vector"),
      SpaceKind::Matrix => write!(f, "a matrix"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_try_from_expr() {
    let space = Space::try_from(Expr::from(3)).unwrap();
    assert_eq!(space, Space::Number(Number::from(3)));
    let err = Space::try_from(Expr::var("x")).unwrap_err();
    assert_eq!(err.original_expr, Expr::var("x"));
  }

  #[test]
  fn test_kind_of() {
    assert_eq!(kind_of(&Expr::from(3)), SpaceKind::Scalar);
    assert_eq!(kind_of(&Expr::var("x")), SpaceKind::Scalar);
    assert_eq!(kind_of(&Expr::Vector(Vector::default())), SpaceKind::Vector);
  }
}
