
//! Vectors of expressions.

pub mod matrix;

use matrix::Matrix;
use super::Expr;
use super::arith::ArithmeticError;
use super::builder::SumBuilder;
use super::number::Number;
use crate::util::grid::Grid;

use itertools::Itertools;
use serde::{Serialize, Deserialize};

use std::fmt::{self, Display, Formatter};
use std::ops::Index;

/// A `Vector` is simply a `Vec<Expr>` but with added functionality
/// for the mathematical operations typical of vectors. The cells are
/// arbitrary expressions, not just numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector {
  data: Vec<Expr>,
}

impl Vector {
  pub fn new(data: Vec<Expr>) -> Self {
    Self { data }
  }

  /// A new, empty `Vector`.
  pub fn empty() -> Self {
    Self { data: vec![] }
  }

  pub fn len(&self) -> usize {
    self.data.len()
  }

  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  pub fn get(&self, index: usize) -> Option<&Expr> {
    self.data.get(index)
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Expr> {
    self.data.iter()
  }

  /// The sub-vector covering `from .. to`. Indices are clamped to the
  /// vector's bounds.
  pub fn slice(&self, from: usize, to: usize) -> Vector {
    let to = to.min(self.data.len());
    let from = from.min(to);
    Vector::new(self.data[from..to].to_vec())
  }

  pub fn map<F>(self, f: F) -> Vector
  where F: FnMut(Expr) -> Expr {
    Vector::new(self.data.into_iter().map(f).collect())
  }

  /// The dot product, as a one-element vector.
  pub fn dot(&self, other: &Vector) -> Result<Vector, ArithmeticError> {
    if self.len() != other.len() {
      return Err(ArithmeticError::DimensionMismatch {
        expected: self.len(),
        actual: other.len(),
      });
    }
    let mut sum = SumBuilder::new();
    for (a, b) in self.iter().zip(other.iter()) {
      sum.push(Expr::Product(vec![a.clone(), b.clone()]));
    }
    Ok(Vector::new(vec![sum.build().simplify()]))
  }

  /// The transpose: a single-column matrix.
  pub fn transpose(&self) -> Matrix {
    Matrix::new(Grid::from_generator(self.len(), 1, |idx| self.data[idx.row].clone()))
  }

  /// The Euclidean norm, as the symbolic square root of the sum of
  /// squared cells.
  pub fn norm(&self) -> Expr {
    let mut squares = SumBuilder::new();
    for cell in self.iter() {
      squares.push(Expr::Power(Box::new(cell.clone()), Box::new(Expr::from(2))));
    }
    Expr::power(squares.build(), Expr::Number(Number::ratio(1, 2)))
  }

  /// Whether any numeric cell is negative. Symbolic cells do not
  /// count. Paired with the leading principal minors, this drives
  /// definiteness checks.
  pub fn has_negative(&self) -> bool {
    self.iter().any(is_negative_number)
  }

  /// Like [`Vector::has_negative`], but the final cell is ignored.
  pub fn has_negative_except_last(&self) -> bool {
    let Some((_, init)) = self.data.split_last() else {
      return false;
    };
    init.iter().any(is_negative_number)
  }
}

fn is_negative_number(cell: &Expr) -> bool {
  matches!(cell, Expr::Number(n) if n.value() < 0.0)
}

impl From<Vector> for Vec<Expr> {
  fn from(vector: Vector) -> Vec<Expr> {
    vector.data
  }
}

impl FromIterator<Expr> for Vector {
  fn from_iter<I: IntoIterator<Item = Expr>>(iter: I) -> Self {
    Vector::new(iter.into_iter().collect())
  }
}

impl IntoIterator for Vector {
  type Item = Expr;
  type IntoIter = std::vec::IntoIter<Expr>;

  fn into_iter(self) -> Self::IntoIter {
    self.data.into_iter()
  }
}

impl<'a> IntoIterator for &'a Vector {
  type Item = &'a Expr;
  type IntoIter = std::slice::Iter<'a, Expr>;

  fn into_iter(self) -> Self::IntoIter {
    self.data.iter()
  }
}

impl Index<usize> for Vector {
  type Output = Expr;

  fn index(&self, index: usize) -> &Expr {
    &self.data[index]
  }
}

impl Display for Vector {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "[{}]", self.data.iter().join(","))
  }
}
