
//! Parsers for the literal text forms: numbers (decimal or `n/d`
//! fraction), comma-separated vectors, and semicolon-delimited
//! matrix rows. These are literal grammars only, not a general infix
//! expression parser.

use crate::expr::Expr;
use crate::expr::number::{Number, QNumber, RNumber};
use crate::expr::vector::Vector;
use crate::expr::vector::matrix::Matrix;
use crate::util::grid::Grid;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use std::str::FromStr;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseLiteralError {
  #[error("Malformed number literal {0:?}")]
  MalformedNumber(String),
  #[error("Number literal {0:?} has a zero denominator")]
  ZeroDenominator(String),
  #[error("Malformed vector literal {0:?}")]
  MalformedVector(String),
  #[error("Matrix literal {0:?} has ragged rows")]
  RaggedMatrix(String),
}

static FRACTION_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^\s*([^/\s]+)\s*/\s*(\S.*)$").unwrap()
});

/// Parses a number literal: a decimal, or `n/d` where the numerator
/// is a decimal and the denominator is recursively a number literal.
/// Fractions are kept as fractions, not reduced; reduction belongs to
/// simplification.
pub fn parse_number(text: &str) -> Result<Number, ParseLiteralError> {
  if let Some(caps) = FRACTION_RE.captures(text) {
    let numer: f64 = caps[1].parse()
      .map_err(|_| ParseLiteralError::MalformedNumber(text.to_owned()))?;
    let denom = parse_number(&caps[2])?;
    let q = QNumber::new(Number::from(numer), denom)
      .map_err(|_| ParseLiteralError::ZeroDenominator(text.to_owned()))?;
    Ok(Number::Ratio(q))
  } else {
    let value: f64 = text.trim().parse()
      .map_err(|_| ParseLiteralError::MalformedNumber(text.to_owned()))?;
    Ok(Number::Real(RNumber::new(value)))
  }
}

/// Parses a comma-separated vector of number literals. An empty
/// element, including one produced by a leading or trailing comma, is
/// a syntax error.
pub fn parse_vector(text: &str) -> Result<Vector, ParseLiteralError> {
  let mut cells = Vec::new();
  for piece in text.split(',') {
    if piece.trim().is_empty() {
      return Err(ParseLiteralError::MalformedVector(text.to_owned()));
    }
    cells.push(Expr::Number(parse_number(piece)?));
  }
  Ok(Vector::new(cells))
}

/// Parses semicolon-delimited rows, each a vector literal. Rows of
/// unequal length are a syntax error.
pub fn parse_matrix(text: &str) -> Result<Matrix, ParseLiteralError> {
  let mut rows = Vec::new();
  for row_text in text.split(';') {
    rows.push(Vec::from(parse_vector(row_text)?));
  }
  let grid = Grid::new(rows)
    .map_err(|_| ParseLiteralError::RaggedMatrix(text.to_owned()))?;
  Ok(Matrix::new(grid))
}

impl FromStr for Number {
  type Err = ParseLiteralError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    parse_number(s)
  }
}

impl FromStr for Vector {
  type Err = ParseLiteralError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    parse_vector(s)
  }
}

impl FromStr for Matrix {
  type Err = ParseLiteralError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    parse_matrix(s)
  }
}
