
//! Top-level error type, aggregating the failures of the individual
//! modules.

use crate::expr::arith::ArithmeticError;
use crate::expr::calculus::DifferentiationFailure;
use crate::expr::number::DivisionByZeroError;
use crate::parsing::ParseLiteralError;
use crate::util::grid::GridDimsError;

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
  #[error("{0}")]
  ArithmeticError(#[from] ArithmeticError),
  #[error("{0}")]
  DivisionByZeroError(#[from] DivisionByZeroError),
  #[error("{0}")]
  DifferentiationFailure(#[from] DifferentiationFailure),
  #[error("{0}")]
  ParseLiteralError(#[from] ParseLiteralError),
  #[error("{0}")]
  GridDimsError(#[from] GridDimsError),
}
