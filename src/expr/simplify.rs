
//! Structural normalization of expression trees.
//!
//! Simplification is idempotent: nested sums and products flatten in
//! a single pure loop, numeric children fold into one constant,
//! repeated symbols group into coefficients or powers, and singleton
//! operations collapse into their only child. Simplifying an already
//! simplified tree returns it unchanged.

use super::Expr;
use super::number::{Number, QNumber};
use super::symbol::Symbol;

use num::{Zero, One};

/// Numeric powers whose computed value has magnitude strictly below
/// this collapse to that value; anything else stays symbolic.
const MAX_VALUE_SIMPLIFY: f64 = 10.0;

impl Expr {
  pub fn simplify(self) -> Expr {
    match self {
      Expr::Number(n) => Expr::Number(n.simplify()),
      Expr::Symbol(_) => self,
      Expr::Sum(terms) => simplify_sum(terms),
      Expr::Product(factors) => simplify_product(factors),
      Expr::Quotient(numer, denom) => simplify_quotient(*numer, *denom),
      Expr::Power(base, exp) => simplify_power(*base, *exp),
      Expr::Function(function, argument) => {
        Expr::Function(function, Box::new(argument.simplify()))
      }
      Expr::Vector(v) => Expr::Vector(v.map(Expr::simplify)),
      Expr::Matrix(m) => Expr::Matrix(m.map(Expr::simplify)),
    }
  }
}

/// Flattens one level of nesting at a time until none remains, in
/// document order, without recursing into the tree.
fn flatten<F>(children: Vec<Expr>, unwrap: F) -> Vec<Expr>
where F: Fn(Expr) -> Result<Vec<Expr>, Expr> {
  let mut stack: Vec<Expr> = children.into_iter().rev().collect();
  let mut out = Vec::new();
  while let Some(child) = stack.pop() {
    match unwrap(child) {
      Ok(nested) => stack.extend(nested.into_iter().rev()),
      Err(leaf) => out.push(leaf),
    }
  }
  out
}

/// Splits flattened children into a folded numeric constant, grouped
/// symbol occurrence counts, and everything else.
fn partition_children(
  children: Vec<Expr>,
  mut fold: impl FnMut(Number, Number) -> Number,
  start: Number,
) -> (Number, Vec<(Symbol, i64)>, Vec<Expr>) {
  let mut constant = start;
  let mut symbols: Vec<(Symbol, i64)> = Vec::new();
  let mut rest = Vec::new();
  for child in children {
    match child {
      Expr::Number(n) => constant = fold(constant, n),
      Expr::Symbol(s) => match symbols.iter_mut().find(|(symbol, _)| *symbol == s) {
        Some((_, count)) => *count += 1,
        None => symbols.push((s, 1)),
      },
      other => rest.push(other),
    }
  }
  (constant, symbols, rest)
}

fn simplify_sum(terms: Vec<Expr>) -> Expr {
  let terms = terms.into_iter().map(Expr::simplify).collect();
  let terms = flatten(terms, |term| match term {
    Expr::Sum(nested) => Ok(nested),
    other => Err(other),
  });

  let (constant, symbols, rest) =
    partition_children(terms, |acc, n| acc + n, Number::zero());

  // Lone symbols come before grouped terms; a second pass partitions
  // the groups into `rest`, so this ordering is a fixed point.
  let mut out = Vec::new();
  let mut grouped = Vec::new();
  for (symbol, count) in symbols {
    if count == 1 {
      out.push(Expr::Symbol(symbol));
    } else {
      grouped.push(Expr::Product(vec![Expr::from(count), Expr::Symbol(symbol)]));
    }
  }
  out.extend(grouped);
  out.extend(rest);
  if !constant.is_zero() || out.is_empty() {
    out.push(Expr::Number(constant.simplify()));
  }

  collapse_singleton(out, Expr::Sum)
}

fn simplify_product(factors: Vec<Expr>) -> Expr {
  let factors: Vec<Expr> = factors.into_iter().map(Expr::simplify).collect();
  let factors = flatten(factors, |factor| match factor {
    Expr::Product(nested) => Ok(nested),
    other => Err(other),
  });

  // An empty product is zero, as is any product with a zero factor.
  if factors.is_empty() || factors.iter().any(Expr::is_zero) {
    return Expr::zero();
  }

  let (constant, symbols, rest) =
    partition_children(factors, |acc, n| acc * n, Number::one());

  let mut out = Vec::new();
  let mut grouped = Vec::new();
  for (symbol, count) in symbols {
    if count == 1 {
      out.push(Expr::Symbol(symbol));
    } else {
      grouped.push(Expr::Power(Box::new(Expr::Symbol(symbol)), Box::new(Expr::from(count))));
    }
  }
  out.extend(grouped);
  out.extend(rest);
  if !constant.is_one() || out.is_empty() {
    out.insert(0, Expr::Number(constant.simplify()));
  }

  collapse_singleton(out, Expr::Product)
}

fn simplify_quotient(numer: Expr, denom: Expr) -> Expr {
  let numer = numer.simplify();
  let denom = denom.simplify();

  if numer.is_zero() {
    return Expr::zero();
  }
  // A zero denominator is not a simplification bug to paper over;
  // leave the node alone and let evaluation report it.
  if denom.is_zero() {
    return Expr::Quotient(Box::new(numer), Box::new(denom));
  }
  if matches!(&denom, Expr::Number(n) if n.is_one()) {
    return numer;
  }
  if numer == denom {
    return Expr::one();
  }

  match (numer, denom) {
    // A quotient of numbers reduces as a fraction, keeping exactness.
    // The denominator is non-zero here, so construction cannot fail.
    (Expr::Number(a), Expr::Number(b)) => match QNumber::new(a.clone(), b.clone()) {
      Ok(q) => Expr::Number(q.simplify()),
      Err(_) => Expr::Quotient(Box::new(Expr::Number(a)), Box::new(Expr::Number(b))),
    },
    (numer, denom) => Expr::Quotient(Box::new(numer), Box::new(denom)),
  }
}

fn simplify_power(base: Expr, exp: Expr) -> Expr {
  let base = base.simplify();
  let exp = exp.simplify();

  if exp.is_zero() {
    return Expr::one();
  }
  if base.is_zero() {
    return Expr::zero();
  }
  if matches!(&exp, Expr::Number(n) if n.is_one()) {
    return base;
  }
  if matches!(&base, Expr::Number(n) if n.is_one()) {
    return Expr::one();
  }
  if let (Expr::Number(b), Expr::Number(e)) = (&base, &exp) {
    let value = b.pow(e);
    if value.value().abs() < MAX_VALUE_SIMPLIFY {
      return Expr::Number(value);
    }
  }
  Expr::Power(Box::new(base), Box::new(exp))
}

fn collapse_singleton<F>(mut children: Vec<Expr>, rebuild: F) -> Expr
where F: FnOnce(Vec<Expr>) -> Expr {
  if children.len() == 1 {
    children.remove(0)
  } else {
    rebuild(children)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::expr::symbol::Var;

  fn simplified(expr: Expr) -> Expr {
    expr.simplify()
  }

  #[test]
  fn test_sum_folds_numbers() {
    let e = Expr::Sum(vec![Expr::from(1), Expr::from(2), Expr::from(3)]);
    assert_eq!(simplified(e), Expr::from(6));
  }

  #[test]
  fn test_sum_groups_repeated_symbols() {
    let e = Expr::Sum(vec![Expr::var("x"), Expr::var("x"), Expr::var("x")]);
    assert_eq!(
      simplified(e),
      Expr::Product(vec![Expr::from(3), Expr::var("x")]),
    );
  }

  #[test]
  fn test_sum_keeps_mixed_symbols() {
    // Variables and constants both survive grouping.
    let e = Expr::Sum(vec![
      Expr::var("x"),
      Expr::constant("g"),
      Expr::var("x"),
      Expr::from(4),
    ]);
    assert_eq!(
      simplified(e),
      Expr::Sum(vec![
        Expr::constant("g"),
        Expr::Product(vec![Expr::from(2), Expr::var("x")]),
        Expr::from(4),
      ]),
    );
  }

  #[test]
  fn test_sum_flattens_nesting() {
    let e = Expr::Sum(vec![
      Expr::from(1),
      Expr::Sum(vec![Expr::var("x"), Expr::Sum(vec![Expr::from(2)])]),
    ]);
    assert_eq!(
      simplified(e),
      Expr::Sum(vec![Expr::var("x"), Expr::from(3)]),
    );
  }

  #[test]
  fn test_sum_drops_zero() {
    let e = Expr::Sum(vec![Expr::var("x"), Expr::from(0)]);
    assert_eq!(simplified(e), Expr::var("x"));
  }

  #[test]
  fn test_product_folds_numbers_and_groups_powers() {
    let e = Expr::Product(vec![Expr::from(2), Expr::var("x"), Expr::from(3), Expr::var("x")]);
    assert_eq!(
      simplified(e),
      Expr::Product(vec![
        Expr::from(6),
        Expr::Power(Box::new(Expr::var("x")), Box::new(Expr::from(2))),
      ]),
    );
  }

  #[test]
  fn test_product_with_zero_factor() {
    let e = Expr::Product(vec![Expr::from(2), Expr::zero(), Expr::var("x")]);
    assert_eq!(simplified(e), Expr::zero());
  }

  #[test]
  fn test_product_drops_unit_coefficient() {
    let e = Expr::Product(vec![Expr::from(1), Expr::var("x")]);
    assert_eq!(simplified(e), Expr::var("x"));
  }

  #[test]
  fn test_empty_product_is_zero() {
    assert_eq!(simplified(Expr::Product(vec![])), Expr::zero());
  }

  #[test]
  fn test_quotient_of_numbers() {
    let e = Expr::Quotient(Box::new(Expr::from(6)), Box::new(Expr::from(3)));
    assert_eq!(simplified(e), Expr::from(2));
  }

  #[test]
  fn test_quotient_with_zero_numerator() {
    let e = Expr::Quotient(Box::new(Expr::zero()), Box::new(Expr::var("x")));
    assert_eq!(simplified(e), Expr::zero());
  }

  #[test]
  fn test_quotient_by_one() {
    let e = Expr::Quotient(Box::new(Expr::var("x")), Box::new(Expr::from(1)));
    assert_eq!(simplified(e), Expr::var("x"));
  }

  #[test]
  fn test_quotient_of_equal_operands() {
    let e = Expr::Quotient(Box::new(Expr::var("x")), Box::new(Expr::var("x")));
    assert_eq!(simplified(e), Expr::one());
  }

  #[test]
  fn test_nested_numeric_quotients_reduce_exactly() {
    // (1/2) / 3  =  1/6, through the fraction tower.
    let e = Expr::Quotient(
      Box::new(Expr::Quotient(Box::new(Expr::from(1)), Box::new(Expr::from(2)))),
      Box::new(Expr::from(3)),
    );
    assert_eq!(simplified(e), Expr::Number(Number::ratio(1, 6)));
  }

  #[test]
  fn test_symbolic_nested_quotients_stay_structural() {
    // Only numeric quotients reduce; otherwise the node is rebuilt
    // from the simplified operands.
    let e = Expr::Quotient(
      Box::new(Expr::var("x")),
      Box::new(Expr::Quotient(Box::new(Expr::var("y")), Box::new(Expr::from(2)))),
    );
    assert_eq!(
      simplified(e),
      Expr::Quotient(
        Box::new(Expr::var("x")),
        Box::new(Expr::Quotient(Box::new(Expr::var("y")), Box::new(Expr::from(2)))),
      ),
    );
  }

  #[test]
  fn test_power_identities() {
    let x = Expr::var("x");
    let power = |b: Expr, e: Expr| Expr::Power(Box::new(b), Box::new(e));
    assert_eq!(simplified(power(x.clone(), Expr::zero())), Expr::one());
    assert_eq!(simplified(power(x.clone(), Expr::one())), x.clone());
    assert_eq!(simplified(power(Expr::zero(), x.clone())), Expr::zero());
    assert_eq!(simplified(power(Expr::one(), x.clone())), Expr::one());
  }

  #[test]
  fn test_small_numeric_powers_collapse() {
    let power = |b: Expr, e: Expr| Expr::Power(Box::new(b), Box::new(e));
    assert_eq!(simplified(power(Expr::from(2), Expr::from(3))), Expr::from(8));
    assert_eq!(
      simplified(power(Expr::from(4), Expr::Number(Number::ratio(1, 2)))),
      Expr::from(2),
    );
    // A value at or past the display threshold stays symbolic.
    let large = simplified(power(Expr::from(2), Expr::from(4)));
    assert!(matches!(large, Expr::Power(_, _)));
    let boundary = simplified(power(Expr::from(100), Expr::Number(Number::ratio(1, 2))));
    assert!(matches!(boundary, Expr::Power(_, _)));
  }

  #[test]
  fn test_simplify_is_idempotent() {
    let x = Var::new("x").unwrap();
    let exprs = vec![
      Expr::Sum(vec![Expr::var("x"), Expr::var("x"), Expr::from(3)]),
      Expr::Sum(vec![Expr::var("x"), Expr::constant("g"), Expr::var("x"), Expr::from(4)]),
      Expr::Product(vec![Expr::from(2), Expr::var("x"), Expr::var("x")]),
      Expr::Product(vec![Expr::from(2), Expr::var("x"), Expr::var("y"), Expr::var("x")]),
      Expr::Quotient(
        Box::new(Expr::Quotient(Box::new(Expr::var("x")), Box::new(Expr::from(2)))),
        Box::new(Expr::var("y")),
      ),
      Expr::Power(Box::new(Expr::var("x")), Box::new(Expr::from(3))),
      Expr::sin(Expr::Sum(vec![Expr::var("x"), Expr::zero()])),
    ];
    for expr in exprs {
      let once = expr.clone().simplify();
      let twice = once.clone().simplify();
      assert_eq!(once, twice, "simplify not idempotent for {expr}");
      assert!(once.contains_var(&x));
    }
  }
}
