
//! Incremental construction of the n-ary operations.
//!
//! [`Expr`] nodes are immutable, so a sum or product assembled one
//! term at a time goes through a builder rather than a mutable node.

use super::Expr;

/// Accumulates terms for an n-ary sum.
#[derive(Debug, Clone, Default)]
pub struct SumBuilder {
  terms: Vec<Expr>,
}

/// Accumulates factors for an n-ary product.
#[derive(Debug, Clone, Default)]
pub struct ProductBuilder {
  factors: Vec<Expr>,
}

impl SumBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, term: Expr) {
    self.terms.push(term);
  }

  pub fn len(&self) -> usize {
    self.terms.len()
  }

  pub fn is_empty(&self) -> bool {
    self.terms.is_empty()
  }

  pub fn build(self) -> Expr {
    Expr::sum(self.terms)
  }
}

impl ProductBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, factor: Expr) {
    self.factors.push(factor);
  }

  pub fn len(&self) -> usize {
    self.factors.len()
  }

  pub fn is_empty(&self) -> bool {
    self.factors.is_empty()
  }

  pub fn build(self) -> Expr {
    Expr::product(self.factors)
  }
}

impl Extend<Expr> for SumBuilder {
  fn extend<I: IntoIterator<Item = Expr>>(&mut self, iter: I) {
    self.terms.extend(iter);
  }
}

impl Extend<Expr> for ProductBuilder {
  fn extend<I: IntoIterator<Item = Expr>>(&mut self, iter: I) {
    self.factors.extend(iter);
  }
}
