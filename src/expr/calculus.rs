
//! Symbolic differentiation.

use super::Expr;
use super::Function;
use super::builder::SumBuilder;
use super::number::DivisionByZeroError;
use super::symbol::{Symbol, Var};
use super::vector::Vector;
use super::vector::matrix::Matrix;
use crate::util::grid::Grid;

use thiserror::Error;

#[derive(Debug)]
pub struct DerivativeEngine {
  target_variable: Var,
  original_expr: Expr,
}

/// A differentiation error, together with the expression the engine
/// was originally asked to differentiate.
#[derive(Debug, Clone, Error)]
#[error("Differentiating {original_expr}: {error}")]
pub struct DifferentiationFailure {
  pub original_expr: Expr,
  pub error: DifferentiationError,
  _priv: (), // Prevent construction outside of this module
}

#[derive(Debug, Clone, Error)]
pub enum DifferentiationError {
  #[error("Derivative of function '{0}' is not known")]
  UnknownDerivative(Function),
  #[error("Derivative of a power whose exponent contains the variable is not known")]
  VariableExponent,
  #[error("{0}")]
  DivisionByZero(#[from] DivisionByZeroError),
}

impl DerivativeEngine {
  pub fn differentiate(&self, expr: &Expr) -> Result<Expr, DifferentiationFailure> {
    match expr {
      Expr::Number(_) => Ok(Expr::zero()),
      Expr::Symbol(Symbol::Variable(v)) if *v == self.target_variable => Ok(Expr::one()),
      Expr::Symbol(_) => Ok(Expr::zero()),
      Expr::Sum(terms) => {
        let mut sum = SumBuilder::new();
        for term in terms {
          sum.push(self.differentiate(term)?);
        }
        Ok(sum.build())
      }
      Expr::Product(factors) => self.differentiate_product(factors),
      Expr::Quotient(numer, denom) => self.differentiate_quotient(numer, denom),
      Expr::Power(base, exp) => self.differentiate_power(base, exp),
      Expr::Function(function, argument) => self.differentiate_function(*function, argument),
      Expr::Vector(v) => {
        let cells: Result<Vec<Expr>, DifferentiationFailure> =
          v.iter().map(|cell| self.differentiate(cell)).collect();
        Ok(Expr::Vector(Vector::new(cells?)))
      }
      Expr::Matrix(m) => {
        let rows: Result<Vec<Vec<Expr>>, DifferentiationFailure> = m.rows_as_vectors()
          .iter()
          .map(|row| row.iter().map(|cell| self.differentiate(cell)).collect())
          .collect();
        let matrix = Matrix::from_rows(rows?)
          .expect("cell-wise differentiation preserved the dimensions");
        Ok(Expr::Matrix(matrix))
      }
    }
  }

  /// Product rule. More than two factors split into two halves, each
  /// treated as a single factor, so the rule divides and conquers
  /// rather than differentiating left to right.
  fn differentiate_product(&self, factors: &[Expr]) -> Result<Expr, DifferentiationFailure> {
    match factors {
      [] => Ok(Expr::zero()),
      [only] => self.differentiate(only),
      [f, g] => self.product_rule(f, g),
      _ => {
        let (left, right) = factors.split_at(factors.len() / 2);
        self.product_rule(&Expr::Product(left.to_vec()), &Expr::Product(right.to_vec()))
      }
    }
  }

  /// (fg)' = f'g + fg'.
  fn product_rule(&self, f: &Expr, g: &Expr) -> Result<Expr, DifferentiationFailure> {
    let d_f = self.differentiate(f)?;
    let d_g = self.differentiate(g)?;
    Ok(Expr::Sum(vec![
      Expr::Product(vec![d_f, g.clone()]),
      Expr::Product(vec![f.clone(), d_g]),
    ]))
  }

  /// Quotient rule: (f'g - fg') / g^2.
  fn differentiate_quotient(&self, numer: &Expr, denom: &Expr) -> Result<Expr, DifferentiationFailure> {
    let d_numer = self.differentiate(numer)?;
    let d_denom = self.differentiate(denom)?;
    let top = Expr::Sum(vec![
      Expr::Product(vec![d_numer, denom.clone()]),
      Expr::Product(vec![Expr::from(-1), numer.clone(), d_denom]),
    ]);
    let bottom = Expr::Power(Box::new(denom.clone()), Box::new(Expr::from(2)));
    Expr::quotient(top, bottom).map_err(|e| self.error(e.into()))
  }

  /// Power rule, for a constant exponent only.
  fn differentiate_power(&self, base: &Expr, exp: &Expr) -> Result<Expr, DifferentiationFailure> {
    if exp.contains_var(&self.target_variable) {
      return Err(self.error(DifferentiationError::VariableExponent));
    }
    let d_base = self.differentiate(base)?;
    let lowered = Expr::Power(
      Box::new(base.clone()),
      Box::new(Expr::Sum(vec![exp.clone(), Expr::from(-1)])),
    );
    Ok(Expr::Product(vec![exp.clone(), lowered, d_base]))
  }

  fn differentiate_function(&self, function: Function, argument: &Expr) -> Result<Expr, DifferentiationFailure> {
    match function {
      Function::Sin => {
        let d_argument = self.differentiate(argument)?;
        Ok(Expr::Product(vec![Expr::cos(argument.clone()), d_argument]))
      }
      Function::Cos => {
        Err(self.error(DifferentiationError::UnknownDerivative(Function::Cos)))
      }
      // Both logarithms share the x'/x rule; the base only changes
      // the display and evaluation.
      Function::Ln | Function::Log10 => {
        let d_argument = self.differentiate(argument)?;
        Expr::quotient(d_argument, argument.clone()).map_err(|e| self.error(e.into()))
      }
    }
  }

  fn error(&self, reason: DifferentiationError) -> DifferentiationFailure {
    DifferentiationFailure {
      original_expr: self.original_expr.clone(),
      error: reason,
      _priv: (),
    }
  }
}

/// Differentiates the expression with respect to the variable and
/// simplifies the result.
pub fn differentiate(expr: Expr, var: Var) -> Result<Expr, DifferentiationFailure> {
  let engine = DerivativeEngine {
    target_variable: var,
    original_expr: expr.clone(),
  };
  engine.differentiate(&expr).map(Expr::simplify)
}

/// The gradient: the vector of first partial derivatives, ordered by
/// first occurrence of each variable.
pub fn gradient(expr: &Expr) -> Result<Vector, DifferentiationFailure> {
  expr.variables()
    .into_iter()
    .map(|var| differentiate(expr.clone(), var))
    .collect()
}

/// The Hessian: the square matrix of second partial derivatives, in
/// the same variable order as [`gradient`].
pub fn hessian(expr: &Expr) -> Result<Matrix, DifferentiationFailure> {
  let vars = expr.variables();
  let mut rows = Vec::with_capacity(vars.len());
  for row_var in &vars {
    let first = differentiate(expr.clone(), row_var.clone())?;
    let mut row = Vec::with_capacity(vars.len());
    for col_var in &vars {
      row.push(differentiate(first.clone(), col_var.clone())?);
    }
    rows.push(row);
  }
  let grid = Grid::new(rows).expect("one derivative per variable pair");
  Ok(Matrix::new(grid))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn x() -> Var {
    Var::new("x").unwrap()
  }

  fn d(expr: Expr) -> Expr {
    differentiate(expr, x()).unwrap()
  }

  #[test]
  fn test_derivative_of_leaves() {
    assert_eq!(d(Expr::from(5)), Expr::zero());
    assert_eq!(d(Expr::var("x")), Expr::one());
    assert_eq!(d(Expr::var("y")), Expr::zero());
    assert_eq!(d(Expr::constant("x")), Expr::zero());
  }

  #[test]
  fn test_derivative_is_linear() {
    // (3x + 7)' = 3
    let e = Expr::Sum(vec![
      Expr::Product(vec![Expr::from(3), Expr::var("x")]),
      Expr::from(7),
    ]);
    assert_eq!(d(e), Expr::from(3));
  }

  #[test]
  fn test_derivative_distributes_over_sums() {
    // (f + g)' agrees with f' + g'.
    let f = Expr::Power(Box::new(Expr::var("x")), Box::new(Expr::from(2)));
    let g = Expr::sin(Expr::var("x"));
    let whole = d(Expr::Sum(vec![f.clone(), g.clone()]));
    let piecewise = Expr::sum(vec![d(f), d(g)]).simplify();
    assert_eq!(whole, piecewise);
  }

  #[test]
  fn test_product_rule() {
    // (x*x)' = 2x
    let e = Expr::Product(vec![Expr::var("x"), Expr::var("x")]);
    assert_eq!(d(e), Expr::Product(vec![Expr::from(2), Expr::var("x")]));
  }

  #[test]
  fn test_power_rule() {
    // (x^3)' = 3x^2
    let e = Expr::Power(Box::new(Expr::var("x")), Box::new(Expr::from(3)));
    assert_eq!(
      d(e),
      Expr::Product(vec![
        Expr::from(3),
        Expr::Power(Box::new(Expr::var("x")), Box::new(Expr::from(2))),
      ]),
    );
  }

  #[test]
  fn test_quotient_rule() {
    // (1/x)' = -1 / x^2
    let e = Expr::Quotient(Box::new(Expr::one()), Box::new(Expr::var("x")));
    assert_eq!(
      d(e),
      Expr::Quotient(
        Box::new(Expr::from(-1)),
        Box::new(Expr::Power(Box::new(Expr::var("x")), Box::new(Expr::from(2)))),
      ),
    );
  }

  #[test]
  fn test_sin_rule() {
    // Sin[x]' = Cos[x]
    assert_eq!(d(Expr::sin(Expr::var("x"))), Expr::cos(Expr::var("x")));
    // Sin[2x]' = 2 Cos[2x]
    let inner = Expr::Product(vec![Expr::from(2), Expr::var("x")]);
    assert_eq!(
      d(Expr::sin(inner.clone())),
      Expr::Product(vec![Expr::from(2), Expr::cos(inner)]),
    );
  }

  #[test]
  fn test_log_rule() {
    // Ln[x]' = 1/x
    assert_eq!(
      d(Expr::ln(Expr::var("x"))),
      Expr::Quotient(Box::new(Expr::one()), Box::new(Expr::var("x"))),
    );
    assert_eq!(
      d(Expr::log10(Expr::var("x"))),
      Expr::Quotient(Box::new(Expr::one()), Box::new(Expr::var("x"))),
    );
  }

  #[test]
  fn test_cos_derivative_is_unknown() {
    let failure = differentiate(Expr::cos(Expr::var("x")), x()).unwrap_err();
    assert!(matches!(failure.error, DifferentiationError::UnknownDerivative(Function::Cos)));
    assert_eq!(failure.original_expr, Expr::cos(Expr::var("x")));
  }

  #[test]
  fn test_variable_exponent_is_unknown() {
    let e = Expr::Power(Box::new(Expr::from(2)), Box::new(Expr::var("x")));
    let failure = differentiate(e, x()).unwrap_err();
    assert!(matches!(failure.error, DifferentiationError::VariableExponent));
  }

  #[test]
  fn test_gradient() {
    // f = x^2 + y^2, grad = [2x, 2y]
    let e = Expr::Sum(vec![
      Expr::Power(Box::new(Expr::var("x")), Box::new(Expr::from(2))),
      Expr::Power(Box::new(Expr::var("y")), Box::new(Expr::from(2))),
    ]);
    let grad = gradient(&e).unwrap();
    assert_eq!(grad.len(), 2);
    assert_eq!(grad[0], Expr::Product(vec![Expr::from(2), Expr::var("x")]));
    assert_eq!(grad[1], Expr::Product(vec![Expr::from(2), Expr::var("y")]));
  }

  #[test]
  fn test_hessian() {
    // f = x^2 * y
    let e = Expr::Product(vec![
      Expr::Power(Box::new(Expr::var("x")), Box::new(Expr::from(2))),
      Expr::var("y"),
    ]);
    let hessian = hessian(&e).unwrap();
    assert_eq!(hessian.height(), 2);
    assert_eq!(hessian.width(), 2);
    // d2f/dx2 = 2y
    let top_left = &hessian[crate::util::grid::GridIndex { row: 0, col: 0 }];
    assert_eq!(*top_left, Expr::Product(vec![Expr::from(2), Expr::var("y")]));
    // d2f/dy2 = 0
    let bottom_right = &hessian[crate::util::grid::GridIndex { row: 1, col: 1 }];
    assert_eq!(*bottom_right, Expr::zero());
  }

  #[test]
  fn test_gradient_of_constant_expression_is_empty() {
    let grad = gradient(&Expr::from(5)).unwrap();
    assert!(grad.is_empty());
  }
}
