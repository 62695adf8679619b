
//! Stateless integer-math helpers. The fraction-reduction code in the
//! number tower is the only caller of [`gcd`]; [`fibonacci`] is part of
//! the same utility pair.

/// Greatest common divisor of `x` and `y`, by repeated subtraction.
/// Always non-negative; `gcd(0, y)` is `|y|`.
pub fn gcd(x: i64, y: i64) -> i64 {
  let mut a = x.abs();
  let mut b = y.abs();
  if a == 0 {
    return b;
  }
  while b != 0 {
    if a > b {
      a -= b;
    } else {
      b -= a;
    }
  }
  a
}

/// The `n`th Fibonacci number, iteratively, in constant space.
pub fn fibonacci(n: u64) -> u64 {
  if n == 0 {
    return 0;
  }
  let mut prev = 0u64;
  let mut res = 1u64;
  for _ in 2..=n {
    let next = prev + res;
    prev = res;
    res = next;
  }
  res
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_gcd() {
    assert_eq!(gcd(4, 8), 4);
    assert_eq!(gcd(8, 4), 4);
    assert_eq!(gcd(7, 13), 1);
    assert_eq!(gcd(6, 3), 3);
    assert_eq!(gcd(12, 18), 6);
    assert_eq!(gcd(1, 1), 1);
  }

  #[test]
  fn test_gcd_with_zero() {
    assert_eq!(gcd(0, 9), 9);
    assert_eq!(gcd(9, 0), 9);
    assert_eq!(gcd(0, 0), 0);
  }

  #[test]
  fn test_gcd_on_negatives() {
    assert_eq!(gcd(-4, 8), 4);
    assert_eq!(gcd(4, -8), 4);
    assert_eq!(gcd(-4, -8), 4);
  }

  #[test]
  fn test_fibonacci() {
    let expected = [0, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55];
    for (n, value) in expected.iter().enumerate() {
      assert_eq!(fibonacci(n as u64), *value);
    }
    assert_eq!(fibonacci(30), 832040);
  }
}
