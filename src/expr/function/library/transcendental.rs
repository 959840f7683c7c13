
//! Trigonometric functions, the exponential and the natural
//! logarithm.

use super::{apply_unary, extract_minus_sign};
use crate::expr::Expr;
use crate::expr::expand::as_real_imag;
use crate::expr::function::{FunctionClass, Canonical};
use crate::expr::function::arity::Arity;

use once_cell::sync::Lazy;

pub static SIN: Lazy<FunctionClass> = Lazy::new(sine);
pub static COS: Lazy<FunctionClass> = Lazy::new(cosine);
pub static EXP: Lazy<FunctionClass> = Lazy::new(exponent);
pub static LOG: Lazy<FunctionClass> = Lazy::new(natural_log);

pub fn sin(arg: Expr) -> Expr {
  apply_unary(&SIN, arg)
}

pub fn cos(arg: Expr) -> Expr {
  apply_unary(&COS, arg)
}

pub fn exp(arg: Expr) -> Expr {
  apply_unary(&EXP, arg)
}

pub fn log(arg: Expr) -> Expr {
  apply_unary(&LOG, arg)
}

fn sine() -> FunctionClass {
  FunctionClass::builder("sin")
    .nargs(Arity::Exactly(1))
    .real_on_real_args()
    .set_canonize(|args, _| {
      let [arg] = args else { return Canonical::Unevaluated };
      if arg.is_zero() {
        return Canonical::Done(Expr::zero());
      }
      // Odd function
      match extract_minus_sign(arg) {
        Some(arg) => Canonical::Done(- sin(arg)),
        None => Canonical::Unevaluated,
      }
    })
    .set_derivative(|args, argindex| {
      (argindex == 1).then(|| cos(args[0].clone()))
    })
    .set_evalf(|args| args.first().map(|x| x.sin()))
    .add_rewrite_rule("exp", |args| {
      let [arg] = args else { return None };
      let i_arg = Expr::imaginary_unit() * arg.clone();
      let difference = exp(i_arg.clone()) - exp(- i_arg);
      Some(difference / (Expr::from(2) * Expr::imaginary_unit()))
    })
    .build()
}

fn cosine() -> FunctionClass {
  FunctionClass::builder("cos")
    .nargs(Arity::Exactly(1))
    .real_on_real_args()
    .set_canonize(|args, _| {
      let [arg] = args else { return Canonical::Unevaluated };
      if arg.is_zero() {
        return Canonical::Done(Expr::one());
      }
      // Even function
      match extract_minus_sign(arg) {
        Some(arg) => Canonical::Done(cos(arg)),
        None => Canonical::Unevaluated,
      }
    })
    .set_derivative(|args, argindex| {
      (argindex == 1).then(|| - sin(args[0].clone()))
    })
    .set_evalf(|args| args.first().map(|x| x.cos()))
    .add_rewrite_rule("exp", |args| {
      let [arg] = args else { return None };
      let i_arg = Expr::imaginary_unit() * arg.clone();
      Some((exp(i_arg.clone()) + exp(- i_arg)) / 2)
    })
    .build()
}

fn exponent() -> FunctionClass {
  FunctionClass::builder("exp")
    .nargs(Arity::Exactly(1))
    .real_on_real_args()
    .set_canonize(|args, _| {
      let [arg] = args else { return Canonical::Unevaluated };
      if arg.is_zero() {
        return Canonical::Done(Expr::one());
      }
      match arg.as_application() {
        Some(app) if app.func() == &*LOG => Canonical::Done(app.args()[0].clone()),
        _ => Canonical::Unevaluated,
      }
    })
    .set_derivative(|args, argindex| {
      (argindex == 1).then(|| exp(args[0].clone()))
    })
    .set_evalf(|args| args.first().map(|x| x.exp()))
    .set_expand_complex(|args| {
      // exp(a + b*I) = exp(a) * (cos(b) + I*sin(b))
      let [arg] = args else { return None };
      let (re, im) = as_real_imag(arg);
      let modulus = exp(re);
      Some(modulus.clone() * cos(im.clone()) + Expr::imaginary_unit() * modulus * sin(im))
    })
    .build()
}

fn natural_log() -> FunctionClass {
  FunctionClass::builder("log")
    .nargs(Arity::Exactly(1))
    .set_canonize(|args, _| {
      let [arg] = args else { return Canonical::Unevaluated };
      if arg.is_one() {
        return Canonical::Done(Expr::zero());
      }
      match arg.as_application() {
        Some(app) if app.func() == &*EXP && app.args()[0].is_real() => {
          Canonical::Done(app.args()[0].clone())
        }
        _ => Canonical::Unevaluated,
      }
    })
    .set_derivative(|args, argindex| {
      (argindex == 1).then(|| Expr::power(args[0].clone(), Expr::minus_one()))
    })
    .set_evalf(|args| args.first().map(|x| x.ln()))
    .build()
}
