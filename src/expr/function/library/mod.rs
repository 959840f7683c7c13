
//! Library of built-in well-known mathematical functions and their
//! properties.
//!
//! Each family is a lazily built [`FunctionClass`] with a matching
//! constructor function, so that `sin(x)` reads as it would on paper.

mod complex;
mod transcendental;

pub use complex::{SIGN, RE, IM, sign, re, im};
pub use transcendental::{SIN, COS, EXP, LOG, sin, cos, exp, log};

use super::FunctionClass;
use super::options::Options;
use super::table::FunctionTable;
use crate::expr::Expr;
use crate::expr::arithmetic::{split_coefficient, with_coefficient};

pub fn build_function_table() -> FunctionTable {
  [&SIN, &COS, &EXP, &LOG, &SIGN, &RE, &IM].into_iter()
    .map(|func| FunctionClass::clone(func))
    .collect()
}

// All library families are unary, so applying one never violates
// its arity.
fn apply_unary(func: &FunctionClass, arg: Expr) -> Expr {
  func.reapply(vec![arg], Options::default())
}

/// If `arg` carries a negative rational coefficient, returns `-arg`.
fn extract_minus_sign(arg: &Expr) -> Option<Expr> {
  let (coeff, rest) = split_coefficient(arg.clone());
  if coeff.is_negative() {
    Some(with_coefficient(-coeff, rest))
  } else {
    None
  }
}
