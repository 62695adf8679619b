
//! The expression tree and its transformations.
//!
//! [`Expr`] is a closed union: numbers, symbols, n-ary sums and
//! products, binary quotients and powers, unary elementary functions,
//! and vectorial grids. Every node is immutable; `simplify`,
//! `derivate` and `evaluate` return new trees.

pub mod arith;
pub mod builder;
pub mod calculus;
pub mod evaluate;
pub mod number;
pub mod simplify;
pub mod space;
pub mod symbol;
pub mod vector;

use number::{Number, DivisionByZeroError};
use symbol::{Symbol, Var};
use vector::Vector;
use vector::matrix::Matrix;

use itertools::Itertools;
use serde::{Serialize, Deserialize};

use std::fmt::{self, Display, Formatter};

/// A node in the symbolic tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Expr {
  Number(Number),
  Symbol(Symbol),
  /// N-ary addition.
  Sum(Vec<Expr>),
  /// N-ary multiplication.
  Product(Vec<Expr>),
  /// Binary division. The public constructor rejects a structurally
  /// zero denominator.
  Quotient(Box<Expr>, Box<Expr>),
  /// Binary exponentiation: base, exponent.
  Power(Box<Expr>, Box<Expr>),
  /// A unary elementary function applied to one argument.
  Function(Function, Box<Expr>),
  Vector(Vector),
  Matrix(Matrix),
}

/// The unary elementary functions. The two logarithms share their
/// differentiation rule; the base distinguishes them only at display
/// and evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Function {
  Sin,
  Cos,
  Ln,
  Log10,
}

impl Function {
  pub fn name(&self) -> &'static str {
    match self {
      Function::Sin => "Sin",
      Function::Cos => "Cos",
      Function::Ln => "Ln",
      Function::Log10 => "Log10",
    }
  }
}

impl Expr {
  pub fn zero() -> Expr {
    Expr::Number(Number::from(0))
  }

  pub fn one() -> Expr {
    Expr::Number(Number::from(1))
  }

  /// An n-ary sum. As with every operation constructor, each child is
  /// simplified individually; the node itself is not.
  pub fn sum(terms: Vec<Expr>) -> Expr {
    Expr::Sum(terms.into_iter().map(Expr::simplify).collect())
  }

  /// An n-ary product.
  pub fn product(factors: Vec<Expr>) -> Expr {
    Expr::Product(factors.into_iter().map(Expr::simplify).collect())
  }

  /// A quotient. Rejects a denominator which is already structurally
  /// zero; a denominator which merely *evaluates* to zero is caught at
  /// evaluation time instead.
  pub fn quotient(numer: Expr, denom: Expr) -> Result<Expr, DivisionByZeroError> {
    if denom.is_zero() {
      return Err(DivisionByZeroError);
    }
    Ok(Expr::quotient_unchecked(numer, denom))
  }

  /// Invariant: `denom` is not structurally zero.
  pub(crate) fn quotient_unchecked(numer: Expr, denom: Expr) -> Expr {
    debug_assert!(!denom.is_zero());
    Expr::Quotient(Box::new(numer.simplify()), Box::new(denom.simplify()))
  }

  pub fn power(base: Expr, exponent: Expr) -> Expr {
    Expr::Power(Box::new(base.simplify()), Box::new(exponent.simplify()))
  }

  pub fn function(function: Function, argument: Expr) -> Expr {
    Expr::Function(function, Box::new(argument.simplify()))
  }

  pub fn sin(argument: Expr) -> Expr {
    Expr::function(Function::Sin, argument)
  }

  pub fn cos(argument: Expr) -> Expr {
    Expr::function(Function::Cos, argument)
  }

  pub fn ln(argument: Expr) -> Expr {
    Expr::function(Function::Ln, argument)
  }

  pub fn log10(argument: Expr) -> Expr {
    Expr::function(Function::Log10, argument)
  }

  /// Convenience constructor for a variable leaf.
  ///
  /// Panics on an invalid name; use [`Var::new`] to validate.
  pub fn var(name: &str) -> Expr {
    let var = Var::new(name).expect("invalid variable name");
    Expr::Symbol(Symbol::Variable(var))
  }

  /// Convenience constructor for a named-constant leaf.
  ///
  /// Panics on an invalid name; use [`Var::new`] to validate.
  pub fn constant(name: &str) -> Expr {
    let var = Var::new(name).expect("invalid constant name");
    Expr::Symbol(Symbol::Constant(var))
  }

  /// Structural zero check. No evaluation happens, but a sum falls
  /// back on its simplified form to decide.
  pub fn is_zero(&self) -> bool {
    match self {
      Expr::Number(n) => num::Zero::is_zero(n),
      Expr::Symbol(_) => false,
      Expr::Sum(_) => {
        matches!(self.clone().simplify(), Expr::Number(n) if num::Zero::is_zero(&n))
      }
      Expr::Product(factors) => factors.iter().any(Expr::is_zero),
      Expr::Quotient(numer, _) => numer.is_zero(),
      Expr::Power(base, _) => base.is_zero(),
      Expr::Function(function, argument) => match function {
        Function::Sin => {
          matches!(&**argument, Expr::Number(n) if n.value().to_radians().sin() == 0.0)
        }
        Function::Cos => {
          matches!(&**argument, Expr::Number(n) if n.value().to_radians().cos() == 0.0)
        }
        // log(1) = 0, in any base.
        Function::Ln | Function::Log10 => {
          matches!(&**argument, Expr::Number(n) if num::One::is_one(n))
        }
      },
      Expr::Vector(v) => v.iter().all(Expr::is_zero),
      Expr::Matrix(m) => m.items().all(Expr::is_zero),
    }
  }

  /// True if the variable occurs anywhere in the tree. Constants do
  /// not count, even under the same name.
  pub fn contains_var(&self, var: &Var) -> bool {
    match self {
      Expr::Number(_) => false,
      Expr::Symbol(Symbol::Variable(v)) => v == var,
      Expr::Symbol(Symbol::Constant(_)) => false,
      Expr::Sum(children) | Expr::Product(children) => {
        children.iter().any(|c| c.contains_var(var))
      }
      Expr::Quotient(a, b) | Expr::Power(a, b) => {
        a.contains_var(var) || b.contains_var(var)
      }
      Expr::Function(_, argument) => argument.contains_var(var),
      Expr::Vector(v) => v.iter().any(|c| c.contains_var(var)),
      Expr::Matrix(m) => m.items().any(|c| c.contains_var(var)),
    }
  }

  /// True if any symbol (variable or constant) occurs in the tree.
  pub fn has_symbols(&self) -> bool {
    match self {
      Expr::Number(_) => false,
      Expr::Symbol(_) => true,
      Expr::Sum(children) | Expr::Product(children) => {
        children.iter().any(Expr::has_symbols)
      }
      Expr::Quotient(a, b) | Expr::Power(a, b) => {
        a.has_symbols() || b.has_symbols()
      }
      Expr::Function(_, argument) => argument.has_symbols(),
      Expr::Vector(v) => v.iter().any(Expr::has_symbols),
      Expr::Matrix(m) => m.items().any(Expr::has_symbols),
    }
  }

  /// The distinct variables of the tree, in first-occurrence order.
  /// Constants are excluded.
  pub fn variables(&self) -> Vec<Var> {
    let mut vars = Vec::new();
    self.collect_variables(&mut vars);
    vars.into_iter().unique().collect()
  }

  fn collect_variables(&self, acc: &mut Vec<Var>) {
    match self {
      Expr::Number(_) => {}
      Expr::Symbol(Symbol::Variable(v)) => acc.push(v.clone()),
      Expr::Symbol(Symbol::Constant(_)) => {}
      Expr::Sum(children) | Expr::Product(children) => {
        for child in children {
          child.collect_variables(acc);
        }
      }
      Expr::Quotient(a, b) | Expr::Power(a, b) => {
        a.collect_variables(acc);
        b.collect_variables(acc);
      }
      Expr::Function(_, argument) => argument.collect_variables(acc),
      Expr::Vector(v) => {
        for cell in v.iter() {
          cell.collect_variables(acc);
        }
      }
      Expr::Matrix(m) => {
        for cell in m.items() {
          cell.collect_variables(acc);
        }
      }
    }
  }
}

impl From<Number> for Expr {
  fn from(n: Number) -> Expr {
    Expr::Number(n)
  }
}

impl From<i64> for Expr {
  fn from(n: i64) -> Expr {
    Expr::Number(Number::from(n))
  }
}

impl From<f64> for Expr {
  fn from(n: f64) -> Expr {
    Expr::Number(Number::from(n))
  }
}

impl From<Symbol> for Expr {
  fn from(s: Symbol) -> Expr {
    Expr::Symbol(s)
  }
}

impl From<Var> for Expr {
  fn from(v: Var) -> Expr {
    Expr::Symbol(Symbol::Variable(v))
  }
}

impl From<Vector> for Expr {
  fn from(v: Vector) -> Expr {
    Expr::Vector(v)
  }
}

impl From<Matrix> for Expr {
  fn from(m: Matrix) -> Expr {
    Expr::Matrix(m)
  }
}

/// Structural equality, with two numeric exceptions: numbers compare
/// by value across representations, and two powers that both fold to
/// constants compare by their folded values.
impl PartialEq for Expr {
  fn eq(&self, other: &Expr) -> bool {
    match (self, other) {
      (Expr::Number(a), Expr::Number(b)) => a == b,
      (Expr::Symbol(a), Expr::Symbol(b)) => a == b,
      (Expr::Sum(a), Expr::Sum(b)) => a == b,
      (Expr::Product(a), Expr::Product(b)) => a == b,
      (Expr::Quotient(a1, b1), Expr::Quotient(a2, b2)) => a1 == a2 && b1 == b2,
      (Expr::Power(base1, exp1), Expr::Power(base2, exp2)) => {
        if let (Some(a), Some(b)) = (self.constant_value(), other.constant_value()) {
          return a == b;
        }
        base1 == base2 && exp1 == exp2
      }
      (Expr::Function(f1, a1), Expr::Function(f2, a2)) => f1 == f2 && a1 == a2,
      (Expr::Vector(a), Expr::Vector(b)) => a == b,
      (Expr::Matrix(a), Expr::Matrix(b)) => a == b,
      _ => false,
    }
  }
}

impl Display for Function {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.name())
  }
}

impl Display for Expr {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Expr::Number(n) => write!(f, "{n}"),
      Expr::Symbol(s) => write!(f, "{s}"),
      Expr::Sum(terms) => write_nary(f, terms, '+'),
      Expr::Product(factors) => write_nary(f, factors, '*'),
      Expr::Quotient(numer, denom) => write!(f, "({numer} / {denom})"),
      Expr::Power(base, exp) => write!(f, "({base})^({exp})"),
      Expr::Function(function, argument) => write!(f, "{function}[{argument}]"),
      Expr::Vector(v) => write!(f, "{v}"),
      Expr::Matrix(m) => write!(f, "{m}"),
    }
  }
}

/// Prints `(a + b + c)` or `(a * b * c)`. A `-1` coefficient in a
/// product renders as a leading minus sign rather than `-1.0 * `.
fn write_nary(f: &mut Formatter<'_>, children: &[Expr], symbol: char) -> fmt::Result {
  let Some((last, init)) = children.split_last() else {
    return write!(f, "(0.0)");
  };
  write!(f, "(")?;
  for child in init {
    let is_minus_one = matches!(child, Expr::Number(n) if n.value() == -1.0);
    if symbol == '*' && is_minus_one {
      write!(f, "-")?;
    } else {
      write!(f, "{child} {symbol} ")?;
    }
  }
  write!(f, "{last})")
}
