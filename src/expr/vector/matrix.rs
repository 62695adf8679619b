
//! Matrices of expressions, backed by the dimension-checked grid.

use super::Vector;
use super::super::Expr;
use super::super::arith::ArithmeticError;
use super::super::builder::SumBuilder;
use super::super::number::DivisionByZeroError;
use crate::util::grid::{Grid, GridIndex, GridDimsError};

use itertools::Itertools;
use serde::{Serialize, Deserialize};

use std::fmt::{self, Display, Formatter};
use std::ops::Index;

/// An m-by-n matrix of expressions. Rows are guaranteed rectangular
/// by the backing [`Grid`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Matrix {
  body: Grid<Expr>,
}

impl Matrix {
  pub fn new(body: Grid<Expr>) -> Self {
    Self { body }
  }

  pub fn from_rows(rows: Vec<Vec<Expr>>) -> Result<Matrix, GridDimsError> {
    Ok(Matrix::new(Grid::new(rows)?))
  }

  pub fn from_row_vectors(rows: Vec<Vector>) -> Result<Matrix, GridDimsError> {
    Matrix::from_rows(rows.into_iter().map(Vec::from).collect())
  }

  /// The n-by-n matrix of zeroes.
  pub fn zero(size: usize) -> Matrix {
    Matrix::new(Grid::of_value(size, size, Expr::zero()))
  }

  /// The n-by-n identity matrix.
  pub fn identity(size: usize) -> Matrix {
    Matrix::new(Grid::from_generator(size, size, |idx| {
      if idx.row == idx.col { Expr::one() } else { Expr::zero() }
    }))
  }

  pub fn width(&self) -> usize {
    self.body.width()
  }

  pub fn height(&self) -> usize {
    self.body.height()
  }

  pub fn is_square(&self) -> bool {
    self.width() == self.height()
  }

  pub fn get(&self, index: GridIndex) -> Option<&Expr> {
    self.body.get(index)
  }

  pub fn row(&self, index: usize) -> Option<&[Expr]> {
    self.body.row(index)
  }

  pub fn items(&self) -> impl Iterator<Item = &Expr> + '_ {
    self.body.items()
  }

  pub fn rows_as_vectors(&self) -> Vec<Vector> {
    self.body.rows().map(|row| Vector::new(row.to_vec())).collect()
  }

  pub fn map<F>(self, f: F) -> Matrix
  where F: FnMut(Expr) -> Expr {
    Matrix::new(self.body.map(f))
  }

  pub(crate) fn zip_with<F>(self, other: Matrix, f: F) -> Matrix
  where F: FnMut(Expr, Expr) -> Expr {
    Matrix::new(self.body.zip_with(other.body, f))
  }

  /// The transpose. A one-by-one matrix is its own transpose.
  pub fn transpose(&self) -> Matrix {
    if self.height() == 1 && self.width() == 1 {
      return self.clone();
    }
    Matrix::new(self.body.clone().transpose())
  }

  /// The determinant, by Laplace expansion along the first row. Fails
  /// on a non-square matrix.
  pub fn determinant(&self) -> Result<Expr, ArithmeticError> {
    if !self.is_square() {
      return Err(ArithmeticError::NonSquareMatrix {
        height: self.height(),
        width: self.width(),
      });
    }
    match self.height() {
      0 => Ok(Expr::one()),
      1 => Ok(self[GridIndex { row: 0, col: 0 }].clone()),
      2 => {
        let a = self[GridIndex { row: 0, col: 0 }].clone();
        let b = self[GridIndex { row: 0, col: 1 }].clone();
        let c = self[GridIndex { row: 1, col: 0 }].clone();
        let d = self[GridIndex { row: 1, col: 1 }].clone();
        Ok(Expr::Sum(vec![
          Expr::Product(vec![a, d]),
          Expr::Product(vec![Expr::from(-1), c, b]),
        ]).simplify())
      }
      _ => {
        let mut sum = SumBuilder::new();
        for col in 0..self.width() {
          let sign = if col % 2 == 0 { 1 } else { -1 };
          let cell = self[GridIndex { row: 0, col }].clone();
          let minor = self.submatrix(0, col).determinant()?;
          sum.push(Expr::Product(vec![Expr::from(sign), cell, minor]));
        }
        Ok(sum.build().simplify())
      }
    }
  }

  /// The inverse, by the adjugate formula. Fails on a non-square
  /// matrix or a zero determinant.
  pub fn inverse(&self) -> Result<Matrix, ArithmeticError> {
    let det = self.determinant()?;
    if det.is_zero() {
      return Err(DivisionByZeroError.into());
    }
    let mut rows = Vec::with_capacity(self.height());
    for row in 0..self.height() {
      let mut cells = Vec::with_capacity(self.width());
      for col in 0..self.width() {
        // Transposed cofactor, so this builds the adjugate directly.
        let cofactor = self.cofactor(col, row)?;
        cells.push(Expr::quotient(cofactor, det.clone())?.simplify());
      }
      rows.push(cells);
    }
    let grid = Grid::new(rows).map_err(|_| DivisionByZeroError)?;
    Ok(Matrix::new(grid))
  }

  /// The leading principal minors, in order of size. The last entry
  /// is the determinant of the whole matrix.
  pub fn minors(&self) -> Result<Vec<Expr>, ArithmeticError> {
    if !self.is_square() {
      return Err(ArithmeticError::NonSquareMatrix {
        height: self.height(),
        width: self.width(),
      });
    }
    (1..=self.height())
      .map(|size| self.leading(size).determinant())
      .collect()
  }

  fn cofactor(&self, row: usize, col: usize) -> Result<Expr, ArithmeticError> {
    let sign = if (row + col) % 2 == 0 { 1 } else { -1 };
    let minor = self.submatrix(row, col).determinant()?;
    Ok(Expr::Product(vec![Expr::from(sign), minor]).simplify())
  }

  /// The matrix with one row and one column removed.
  fn submatrix(&self, skip_row: usize, skip_col: usize) -> Matrix {
    Matrix::new(Grid::from_generator(self.height() - 1, self.width() - 1, |idx| {
      let row = if idx.row < skip_row { idx.row } else { idx.row + 1 };
      let col = if idx.col < skip_col { idx.col } else { idx.col + 1 };
      self[GridIndex { row, col }].clone()
    }))
  }

  /// The top-left size-by-size corner.
  fn leading(&self, size: usize) -> Matrix {
    Matrix::new(Grid::from_generator(size, size, |idx| self[idx].clone()))
  }
}

impl Index<GridIndex> for Matrix {
  type Output = Expr;

  fn index(&self, index: GridIndex) -> &Expr {
    &self.body[index]
  }
}

impl Display for Matrix {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    writeln!(f, "{{")?;
    for row in self.body.rows() {
      writeln!(f, "[ {}]", row.iter().join(" ,"))?;
    }
    write!(f, "}}")
  }
}
