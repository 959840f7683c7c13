
//! Canonical constructors for sums, products and powers, and the
//! arithmetic operators on [`Expr`].
//!
//! The canonical form is deliberately small: nested operators are
//! flattened, numeric operands are folded, like terms and like bases
//! are collected, and commutative operands are sorted by
//! [`cmp_expr`](super::ordering::cmp_expr). That is enough for two
//! expressions that differ only in the order in which they were
//! written to compare equal.

use super::Expr;
use super::atom::Atom;
use super::number::Number;

use num::{Zero, One};

use std::collections::BTreeMap;
use std::ops::{Add, Sub, Mul, Div, Neg};

impl Expr {
  /// The canonical sum of the given terms.
  ///
  /// An empty sum is zero, and a sum of one term is that term.
  pub fn sum(terms: Vec<Expr>) -> Expr {
    let mut constant = Number::zero();
    let mut collected: BTreeMap<Expr, Number> = BTreeMap::new();
    for term in flatten(terms, |e| matches!(e, Expr::Add(_))) {
      match term {
        Expr::Atom(Atom::Number(n)) => {
          constant = constant + n;
        }
        term => {
          let (coeff, rest) = split_coefficient(term);
          let entry = collected.entry(rest).or_insert_with(Number::zero);
          *entry = entry.clone() + coeff;
        }
      }
    }

    let mut result: Vec<Expr> = Vec::with_capacity(collected.len() + 1);
    if !constant.is_zero() {
      result.push(Expr::from(constant));
    }
    for (rest, coeff) in collected {
      if !coeff.is_zero() {
        result.push(with_coefficient(coeff, rest));
      }
    }
    match result.len() {
      0 => Expr::zero(),
      1 => result.swap_remove(0),
      _ => {
        result.sort();
        Expr::Add(result)
      }
    }
  }

  /// The canonical product of the given factors.
  ///
  /// Commutative factors are grouped by base and sorted. Factors that
  /// are not known to commute keep their relative order, and only
  /// adjacent equal bases among them are combined. A rational
  /// coefficient multiplying a single sum is distributed over it.
  pub fn product(factors: Vec<Expr>) -> Expr {
    let mut coeff = Number::one();
    let mut commutative: BTreeMap<Expr, Vec<Expr>> = BTreeMap::new();
    let mut noncommutative: Vec<(Expr, Expr)> = Vec::new();
    for factor in flatten(factors, |e| matches!(e, Expr::Mul(_))) {
      match factor {
        Expr::Atom(Atom::Number(n)) => {
          coeff = coeff * n;
        }
        factor if factor.is_commutative() == Some(true) => {
          let (base, exp) = factor.as_base_exp();
          commutative.entry(base).or_default().push(exp);
        }
        factor => {
          let (base, exp) = factor.as_base_exp();
          match noncommutative.last_mut() {
            Some((last_base, last_exp)) if *last_base == base => {
              *last_exp = Expr::sum(vec![last_exp.clone(), exp]);
            }
            _ => noncommutative.push((base, exp)),
          }
        }
      }
    }
    if coeff.is_zero() {
      return Expr::zero();
    }

    let mut needs_reflatten = false;
    let mut rest: Vec<Expr> = Vec::new();
    for (base, exps) in commutative {
      match Expr::power(base, Expr::sum(exps)) {
        Expr::Atom(Atom::Number(n)) => coeff = coeff * n,
        other => {
          needs_reflatten |= matches!(other, Expr::Mul(_));
          rest.push(other);
        }
      }
    }
    if coeff.is_zero() {
      return Expr::zero();
    }
    rest.sort();
    for (base, exp) in noncommutative {
      let factor = Expr::power(base, exp);
      if !factor.is_one() {
        needs_reflatten |= matches!(factor, Expr::Mul(_) | Expr::Atom(Atom::Number(_)));
        rest.push(factor);
      }
    }

    if needs_reflatten {
      rest.insert(0, Expr::from(coeff));
      return Expr::product(rest);
    }

    if rest.is_empty() {
      return Expr::from(coeff);
    }
    if rest.len() == 1 && !coeff.is_one() {
      if let Expr::Add(terms) = &rest[0] {
        let terms = terms.iter().map(|t| Expr::product(vec![Expr::from(coeff.clone()), t.clone()])).collect();
        return Expr::sum(terms);
      }
    }
    if coeff.is_one() {
      if rest.len() == 1 {
        return rest.swap_remove(0);
      }
    } else {
      rest.insert(0, Expr::from(coeff));
    }
    Expr::Mul(rest)
  }

  /// The canonical power `base ** exp`.
  pub fn power(base: Expr, exp: Expr) -> Expr {
    if exp.is_zero() || base.is_one() {
      return Expr::one();
    }
    if exp.is_one() {
      return base;
    }
    let int_exp = exp.as_number().and_then(Number::to_i64);
    match (base, int_exp) {
      (Expr::Atom(Atom::Number(b)), Some(n)) => {
        match b.powi(n) {
          Some(value) => Expr::from(value),
          None => Expr::Pow(Box::new(Expr::from(b)), Box::new(exp)),
        }
      }
      (Expr::Atom(Atom::Number(b)), None) if b.is_zero() && exp.as_number().is_some_and(Number::is_positive) => {
        Expr::zero()
      }
      (Expr::Atom(Atom::ImaginaryUnit), Some(n)) => {
        match n.rem_euclid(4) {
          0 => Expr::one(),
          1 => Expr::imaginary_unit(),
          2 => Expr::minus_one(),
          _ => Expr::Mul(vec![Expr::minus_one(), Expr::imaginary_unit()]),
        }
      }
      (Expr::Pow(inner_base, inner_exp), Some(_)) => {
        Expr::power(*inner_base, Expr::product(vec![*inner_exp, exp]))
      }
      (Expr::Mul(factors), Some(_)) if factors.iter().all(|f| f.is_commutative() == Some(true)) => {
        Expr::product(factors.into_iter().map(|f| Expr::power(f, exp.clone())).collect())
      }
      (base, _) => Expr::Pow(Box::new(base), Box::new(exp)),
    }
  }
}

fn flatten<F>(exprs: Vec<Expr>, is_nested: F) -> Vec<Expr>
where F: Fn(&Expr) -> bool {
  let mut out = Vec::with_capacity(exprs.len());
  for e in exprs {
    if is_nested(&e) {
      out.extend(e.args());
    } else {
      out.push(e);
    }
  }
  out
}

/// Splits a term into its rational coefficient and the remaining
/// factor.
pub(crate) fn split_coefficient(term: Expr) -> (Number, Expr) {
  match term {
    Expr::Atom(Atom::Number(n)) => (n, Expr::one()),
    Expr::Mul(mut factors) if factors.first().is_some_and(|f| f.as_number().is_some()) => {
      let Expr::Atom(Atom::Number(coeff)) = factors.remove(0) else { unreachable!() };
      let rest = if factors.len() == 1 { factors.swap_remove(0) } else { Expr::Mul(factors) };
      (coeff, rest)
    }
    term => (Number::one(), term),
  }
}

pub(crate) fn with_coefficient(coeff: Number, rest: Expr) -> Expr {
  if coeff.is_one() {
    rest
  } else {
    Expr::product(vec![Expr::from(coeff), rest])
  }
}

impl<T: Into<Expr>> Add<T> for Expr {
  type Output = Expr;

  fn add(self, rhs: T) -> Expr {
    Expr::sum(vec![self, rhs.into()])
  }
}

impl<T: Into<Expr>> Sub<T> for Expr {
  type Output = Expr;

  fn sub(self, rhs: T) -> Expr {
    Expr::sum(vec![self, -rhs.into()])
  }
}

impl<T: Into<Expr>> Mul<T> for Expr {
  type Output = Expr;

  fn mul(self, rhs: T) -> Expr {
    Expr::product(vec![self, rhs.into()])
  }
}

impl<T: Into<Expr>> Div<T> for Expr {
  type Output = Expr;

  fn div(self, rhs: T) -> Expr {
    Expr::product(vec![self, Expr::power(rhs.into(), Expr::minus_one())])
  }
}

impl Neg for Expr {
  type Output = Expr;

  fn neg(self) -> Expr {
    Expr::product(vec![Expr::minus_one(), self])
  }
}

impl<T: Into<Expr>> num::pow::Pow<T> for Expr {
  type Output = Expr;

  fn pow(self, rhs: T) -> Expr {
    Expr::power(self, rhs.into())
  }
}
