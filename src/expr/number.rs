
//! Exact rational numbers, the only numeric literal in the expression
//! tree.

use num::{BigInt, BigRational, Zero, One, Signed, ToPrimitive};
use serde::{Serialize, Deserialize};

use std::fmt::{self, Display, Formatter};
use std::ops;

/// An exact rational number. Integers are simply rationals whose
/// denominator is one.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Number(BigRational);

impl Number {
  /// Produces a rational number in lowest terms.
  ///
  /// Panics if `denom == 0`.
  pub fn ratio(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Number {
    Number(BigRational::new(numer.into(), denom.into()))
  }

  pub fn is_integer(&self) -> bool {
    self.0.is_integer()
  }

  pub fn is_positive(&self) -> bool {
    self.0.is_positive()
  }

  pub fn is_negative(&self) -> bool {
    self.0.is_negative()
  }

  pub fn numer(&self) -> &BigInt {
    self.0.numer()
  }

  pub fn denom(&self) -> &BigInt {
    self.0.denom()
  }

  /// The value as a machine integer, if it is an integer that fits.
  pub fn to_i64(&self) -> Option<i64> {
    if self.is_integer() {
      self.0.numer().to_i64()
    } else {
      None
    }
  }

  pub fn to_f64(&self) -> Option<f64> {
    self.0.to_f64()
  }

  /// Returns the sign of the number, as an exact integer.
  pub fn signum(&self) -> Number {
    Number(self.0.signum())
  }

  pub fn abs(&self) -> Number {
    Number(self.0.abs())
  }

  pub fn recip(&self) -> Option<Number> {
    if self.is_zero() {
      None
    } else {
      Some(Number(self.0.recip()))
    }
  }

  /// Raises a `Number` to an integer power. Returns `None` for zero
  /// raised to a negative power.
  ///
  /// The indeterminate form `0^0` is treated as 1.
  pub fn powi(&self, exp: i64) -> Option<Number> {
    if exp == 0 {
      return Some(Number::one());
    }
    let base = if exp < 0 { self.recip()? } else { self.clone() };
    Some(Number(powi_by_repeated_square(base.0, exp.unsigned_abs())))
  }

  /// `n!` as an exact integer.
  pub fn factorial(n: u64) -> Number {
    (1..=n).fold(Number::one(), |acc, k| acc * Number::from(k as i64))
  }
}

// Precondition: exp > 0.
fn powi_by_repeated_square<T>(mut input: T, mut exp: u64) -> T
where T: One + ops::MulAssign + Clone {
  assert!(exp > 0);
  let mut result = T::one();
  while exp > 1 {
    if exp % 2 == 0 {
      input *= input.clone();
      exp /= 2;
    } else {
      result *= input.clone();
      exp -= 1;
    }
  }
  result *= input;
  result
}

impl From<i64> for Number {
  fn from(i: i64) -> Number {
    Number(BigRational::from_integer(i.into()))
  }
}

impl From<BigInt> for Number {
  fn from(i: BigInt) -> Number {
    Number(BigRational::from_integer(i))
  }
}

impl From<BigRational> for Number {
  fn from(r: BigRational) -> Number {
    Number(r)
  }
}

impl Zero for Number {
  fn zero() -> Self {
    Number(BigRational::zero())
  }

  fn is_zero(&self) -> bool {
    self.0.is_zero()
  }
}

impl One for Number {
  fn one() -> Self {
    Number(BigRational::one())
  }

  fn is_one(&self) -> bool {
    self.0.is_one()
  }
}

impl ops::Add for Number {
  type Output = Number;

  fn add(self, rhs: Number) -> Number {
    Number(self.0 + rhs.0)
  }
}

impl ops::Sub for Number {
  type Output = Number;

  fn sub(self, rhs: Number) -> Number {
    Number(self.0 - rhs.0)
  }
}

impl ops::Mul for Number {
  type Output = Number;

  fn mul(self, rhs: Number) -> Number {
    Number(self.0 * rhs.0)
  }
}

impl ops::Neg for Number {
  type Output = Number;

  fn neg(self) -> Number {
    Number(- self.0)
  }
}

impl Display for Number {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    if self.is_integer() {
      write!(f, "{}", self.0.numer())
    } else {
      write!(f, "{}/{}", self.0.numer(), self.0.denom())
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_ratio_is_reduced() {
    assert_eq!(Number::ratio(2, 4), Number::ratio(1, 2));
    assert_eq!(Number::ratio(4, 2), Number::from(2));
    assert!(Number::ratio(4, 2).is_integer());
  }

  #[test]
  fn test_powi() {
    assert_eq!(Number::from(3).powi(3), Some(Number::from(27)));
    assert_eq!(Number::from(2).powi(-2), Some(Number::ratio(1, 4)));
    assert_eq!(Number::ratio(2, 3).powi(2), Some(Number::ratio(4, 9)));
    assert_eq!(Number::from(0).powi(0), Some(Number::from(1)));
    assert_eq!(Number::from(0).powi(-1), None);
  }

  #[test]
  fn test_factorial() {
    assert_eq!(Number::factorial(0), Number::from(1));
    assert_eq!(Number::factorial(5), Number::from(120));
  }

  #[test]
  fn test_to_i64() {
    assert_eq!(Number::from(-7).to_i64(), Some(-7));
    assert_eq!(Number::ratio(1, 2).to_i64(), None);
  }

  #[test]
  fn test_display() {
    assert_eq!(Number::from(-3).to_string(), "-3");
    assert_eq!(Number::ratio(-1, 2).to_string(), "-1/2");
  }
}
