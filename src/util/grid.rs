
//! Rectangular grid type which enforces consistency in the dimensions
//! of its data. Backs the expression-level matrix.

use thiserror::Error;
use serde::{Serialize, Deserialize};

use std::ops::{Index, IndexMut};

/// A `Grid<T>` is a vector of rows of `T` in which every row has the
/// same length.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Vec<Vec<T>>")]
pub struct Grid<T> {
  body: Vec<Vec<T>>,
}

/// Row-major cell address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridIndex {
  pub row: usize,
  pub col: usize,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("the rows of the grid have inconsistent lengths")]
pub struct GridDimsError {
  _priv: (),
}

impl<T> Grid<T> {
  pub fn new(body: Vec<Vec<T>>) -> Result<Grid<T>, GridDimsError> {
    if body.iter().any(|row| row.len() != body[0].len()) {
      return Err(GridDimsError { _priv: () });
    }
    Ok(Grid { body })
  }

  pub fn from_generator<F>(height: usize, width: usize, mut generator: F) -> Self
  where F: FnMut(GridIndex) -> T {
    let body = (0..height)
      .map(|row| (0..width).map(|col| generator(GridIndex { row, col })).collect())
      .collect();
    Grid { body }
  }

  pub fn of_value(height: usize, width: usize, value: T) -> Self
  where T: Clone {
    Grid::from_generator(height, width, |_| value.clone())
  }

  pub fn into_row_major(self) -> Vec<Vec<T>> {
    self.body
  }

  pub fn row(&self, index: usize) -> Option<&[T]> {
    self.body.get(index).map(|row| row.as_slice())
  }

  pub fn get(&self, index: GridIndex) -> Option<&T> {
    self.body
      .get(index.row)
      .and_then(|row| row.get(index.col))
  }

  pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
    self.body.iter().map(|row| row.as_slice())
  }

  pub fn items(&self) -> impl Iterator<Item = &T> + '_ {
    self.body.iter().flat_map(|row| row.iter())
  }

  pub fn into_items(self) -> impl Iterator<Item = T> {
    self.body.into_iter().flatten()
  }

  pub fn width(&self) -> usize {
    self.body
      .first()
      .map(|row| row.len())
      .unwrap_or_default()
  }

  pub fn height(&self) -> usize {
    self.body.len()
  }

  pub fn map<F, U>(self, mut f: F) -> Grid<U>
  where F: FnMut(T) -> U {
    Grid {
      body: self
        .body
        .into_iter()
        .map(|row| row.into_iter().map(&mut f).collect())
        .collect(),
    }
  }

  /// Combines two grids cell-wise. The caller is responsible for
  /// checking that the dimensions agree beforehand.
  pub fn zip_with<F, U, V>(self, other: Grid<U>, mut f: F) -> Grid<V>
  where F: FnMut(T, U) -> V {
    assert!(self.height() == other.height() && self.width() == other.width());
    Grid {
      body: self
        .body
        .into_iter()
        .zip(other.body)
        .map(|(a, b)| a.into_iter().zip(b).map(|(x, y)| f(x, y)).collect())
        .collect(),
    }
  }

  pub fn transpose(self) -> Grid<T> {
    let height = self.height();
    let width = self.width();
    let mut columns: Vec<Vec<T>> = (0..width).map(|_| Vec::with_capacity(height)).collect();
    for row in self.body {
      for (col, item) in row.into_iter().enumerate() {
        columns[col].push(item);
      }
    }
    Grid { body: columns }
  }
}

impl<T> TryFrom<Vec<Vec<T>>> for Grid<T> {
  type Error = GridDimsError;

  fn try_from(body: Vec<Vec<T>>) -> Result<Self, Self::Error> {
    Self::new(body)
  }
}

impl<T> Index<GridIndex> for Grid<T> {
  type Output = T;

  fn index(&self, index: GridIndex) -> &Self::Output {
    &self.body[index.row][index.col]
  }
}

impl<T> IndexMut<GridIndex> for Grid<T> {
  fn index_mut(&mut self, index: GridIndex) -> &mut Self::Output {
    &mut self.body[index.row][index.col]
  }
}

impl<T: Serialize> Serialize for Grid<T> {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where S: serde::Serializer {
    self.body.serialize(serializer)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new_rejects_ragged_rows() {
    let err = Grid::new(vec![vec![1, 2], vec![3]]);
    assert!(err.is_err());
  }

  #[test]
  fn test_dimensions() {
    let grid = Grid::from_generator(2, 3, |idx| idx.row * 10 + idx.col);
    assert_eq!(grid.height(), 2);
    assert_eq!(grid.width(), 3);
    assert_eq!(grid[GridIndex { row: 1, col: 2 }], 12);
  }

  #[test]
  fn test_transpose() {
    let grid = Grid::new(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
    let transposed = grid.transpose();
    assert_eq!(transposed, Grid::new(vec![vec![1, 4], vec![2, 5], vec![3, 6]]).unwrap());
  }

  #[test]
  fn test_zip_with() {
    let a = Grid::new(vec![vec![1, 2], vec![3, 4]]).unwrap();
    let b = Grid::new(vec![vec![10, 20], vec![30, 40]]).unwrap();
    assert_eq!(a.zip_with(b, |x, y| x + y), Grid::new(vec![vec![11, 22], vec![33, 44]]).unwrap());
  }

  #[test]
  fn test_roundtrip_serialize() {
    let grid = Grid::from_generator(4, 4, |idx| idx.row + idx.col);
    let json = serde_json::to_string(&grid).unwrap();
    let deserialized: Grid<usize> = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized, grid);
  }
}
