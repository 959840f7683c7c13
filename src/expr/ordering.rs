
//! This module defines a total ordering on the [`Expr`] type. This
//! ordering has the following properties.
//!
//! * It is consistent with the `Eq` instance on `Expr`. In
//! particular, alpha-equivalent lambdas compare equal.
//!
//! * Numbers compare using the typical ordering and are less than
//! every other expression.
//!
//! * Symbols are greater than numbers and the imaginary unit, and
//! compare by name first.
//!
//! * Compound expressions compare by node kind first, then
//! lexicographically by their children, using this same ordering.
//!
//! Canonical sums and products sort their operands with this
//! ordering, so it determines the printed order of terms.

use super::Expr;
use super::atom::Atom;
use crate::util::cmp_iter_by;

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Rank {
  Number,
  ImaginaryUnit,
  Symbol,
  Wild,
  Pow,
  Mul,
  Add,
  Apply,
  Derivative,
  Lambda,
}

fn rank(e: &Expr) -> Rank {
  match e {
    Expr::Atom(Atom::Number(_)) => Rank::Number,
    Expr::Atom(Atom::ImaginaryUnit) => Rank::ImaginaryUnit,
    Expr::Atom(Atom::Symbol(_)) => Rank::Symbol,
    Expr::Atom(Atom::Wild(_)) => Rank::Wild,
    Expr::Pow(_, _) => Rank::Pow,
    Expr::Mul(_) => Rank::Mul,
    Expr::Add(_) => Rank::Add,
    Expr::Apply(_) => Rank::Apply,
    Expr::Derivative(_) => Rank::Derivative,
    Expr::Lambda(_) => Rank::Lambda,
  }
}

fn cmp_slice(a: &[Expr], b: &[Expr]) -> Ordering {
  cmp_iter_by(a, b, |x, y| cmp_expr(x, y))
}

pub fn cmp_expr(a: &Expr, b: &Expr) -> Ordering {
  match (a, b) {
    (Expr::Atom(Atom::Number(x)), Expr::Atom(Atom::Number(y))) => x.cmp(y),
    (Expr::Atom(Atom::Symbol(x)), Expr::Atom(Atom::Symbol(y))) => x.cmp(y),
    (Expr::Atom(Atom::Wild(x)), Expr::Atom(Atom::Wild(y))) => x.cmp(y),
    (Expr::Pow(b1, e1), Expr::Pow(b2, e2)) => {
      cmp_expr(b1, b2).then_with(|| cmp_expr(e1, e2))
    }
    (Expr::Mul(x), Expr::Mul(y)) | (Expr::Add(x), Expr::Add(y)) => cmp_slice(x, y),
    (Expr::Apply(x), Expr::Apply(y)) => {
      x.func().cmp(y.func())
        .then_with(|| cmp_slice(x.args(), y.args()))
        .then_with(|| x.options().cmp(y.options()))
    }
    (Expr::Derivative(x), Expr::Derivative(y)) => {
      cmp_expr(x.expr(), y.expr())
        .then_with(|| cmp_slice(x.variables(), y.variables()))
    }
    (Expr::Lambda(x), Expr::Lambda(y)) => {
      x.params().len().cmp(&y.params().len())
        .then_with(|| cmp_expr(&x.canonical_body(), &y.canonical_body()))
    }
    _ => rank(a).cmp(&rank(b)),
  }
}

impl PartialOrd for Expr {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for Expr {
  fn cmp(&self, other: &Self) -> Ordering {
    cmp_expr(self, other)
  }
}
