
//! Simple functions that apply to, or extract parts of, complex
//! numbers.

use super::apply_unary;
use crate::expr::Expr;
use crate::expr::atom::Atom;
use crate::expr::arithmetic::split_coefficient;
use crate::expr::function::{FunctionClass, Canonical};
use crate::expr::function::arity::Arity;

use once_cell::sync::Lazy;
use num::One;

pub static SIGN: Lazy<FunctionClass> = Lazy::new(signum);
pub static RE: Lazy<FunctionClass> = Lazy::new(real_part);
pub static IM: Lazy<FunctionClass> = Lazy::new(imaginary_part);

pub fn sign(arg: Expr) -> Expr {
  apply_unary(&SIGN, arg)
}

pub fn re(arg: Expr) -> Expr {
  apply_unary(&RE, arg)
}

pub fn im(arg: Expr) -> Expr {
  apply_unary(&IM, arg)
}

fn float_signum(x: f64) -> f64 {
  if x == 0.0 { 0.0 } else { x.signum() }
}

fn signum() -> FunctionClass {
  FunctionClass::builder("sign")
    .nargs(Arity::Exactly(1))
    .real_on_real_args()
    .set_canonize(|args, _| {
      let [arg] = args else { return Canonical::Unevaluated };
      if let Some(n) = arg.as_number() {
        return Canonical::Done(Expr::from(n.signum()));
      }
      let (coeff, rest) = split_coefficient(arg.clone());
      if !coeff.is_one() {
        return Canonical::Done(Expr::from(coeff.signum()) * sign(rest));
      }
      match arg.evalf() {
        Some(value) => Canonical::Done(Expr::from(float_signum(value) as i64)),
        None => Canonical::Unevaluated,
      }
    })
    .set_derivative(|_, argindex| (argindex == 1).then(Expr::zero))
    .set_evalf(|args| args.first().copied().map(float_signum))
    .build()
}

/// A product split into its known-real factors and the rest. `I`
/// among the rest is pulled out separately.
struct SplitProduct {
  real: Expr,
  has_i: bool,
  rest: Expr,
}

fn split_product(factors: &[Expr]) -> SplitProduct {
  let mut real = Vec::new();
  let mut rest = Vec::new();
  let mut has_i = false;
  for factor in factors {
    if factor.is_real() {
      real.push(factor.clone());
    } else if !has_i && matches!(factor, Expr::Atom(Atom::ImaginaryUnit)) {
      has_i = true;
    } else {
      rest.push(factor.clone());
    }
  }
  SplitProduct { real: Expr::product(real), has_i, rest: Expr::product(rest) }
}

fn real_part() -> FunctionClass {
  FunctionClass::builder("re")
    .nargs(Arity::Exactly(1))
    .always_real()
    .set_canonize(|args, _| {
      let [arg] = args else { return Canonical::Unevaluated };
      if arg.is_real() {
        return Canonical::Done(arg.clone());
      }
      match arg {
        Expr::Atom(Atom::ImaginaryUnit) => Canonical::Done(Expr::zero()),
        Expr::Add(terms) => Canonical::Done(Expr::sum(terms.iter().cloned().map(re).collect())),
        Expr::Mul(factors) => {
          let split = split_product(factors);
          match (split.has_i, split.real.is_one()) {
            // re(r*I*w) = -r*im(w)
            (true, _) => Canonical::Done(- split.real * im(split.rest)),
            (false, false) => Canonical::Done(split.real * re(split.rest)),
            (false, true) => Canonical::Unevaluated,
          }
        }
        _ => Canonical::Unevaluated,
      }
    })
    .set_evalf(|args| args.first().copied())
    .build()
}

fn imaginary_part() -> FunctionClass {
  FunctionClass::builder("im")
    .nargs(Arity::Exactly(1))
    .always_real()
    .set_canonize(|args, _| {
      let [arg] = args else { return Canonical::Unevaluated };
      if arg.is_real() {
        return Canonical::Done(Expr::zero());
      }
      match arg {
        Expr::Atom(Atom::ImaginaryUnit) => Canonical::Done(Expr::one()),
        Expr::Add(terms) => Canonical::Done(Expr::sum(terms.iter().cloned().map(im).collect())),
        Expr::Mul(factors) => {
          let split = split_product(factors);
          match (split.has_i, split.real.is_one()) {
            // im(r*I*w) = r*re(w)
            (true, _) => Canonical::Done(split.real * re(split.rest)),
            (false, false) => Canonical::Done(split.real * im(split.rest)),
            (false, true) => Canonical::Unevaluated,
          }
        }
        _ => Canonical::Unevaluated,
      }
    })
    .set_evalf(|args| args.first().map(|_| 0.0))
    .build()
}
