
//! Expansion of expressions: distributing products over sums, and
//! splitting expressions into real and imaginary parts.

use super::Expr;
use super::atom::Atom;
use super::function::library::{re, im};

use bitflags::bitflags;
use itertools::Itertools;

bitflags! {
  /// Which expansions [`expand`] should perform.
  #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
  pub struct ExpandHints: u32 {
    /// Distribute products over sums and multiply out positive
    /// integer powers of sums.
    const BASIC = 0b0001;
    /// Rewrite into the form `re + I*im`.
    const COMPLEX = 0b0010;
  }
}

impl Default for ExpandHints {
  fn default() -> Self {
    ExpandHints::BASIC
  }
}

pub fn expand(expr: &Expr, hints: ExpandHints) -> Expr {
  expr.expand(hints)
}

impl Expr {
  pub fn expand(&self, hints: ExpandHints) -> Expr {
    let mut result = self.clone();
    if hints.contains(ExpandHints::BASIC) {
      result = expand_basic(&result);
    }
    if hints.contains(ExpandHints::COMPLEX) {
      result = expand_complex(&result);
    }
    result
  }
}

fn expand_basic(expr: &Expr) -> Expr {
  let expr = match expr {
    Expr::Atom(_) => return expr.clone(),
    expr => expr.map_args(expand_basic),
  };
  match &expr {
    Expr::Mul(factors) if factors.iter().any(|f| matches!(f, Expr::Add(_))) => {
      distribute(factors.clone())
    }
    Expr::Pow(base, exp) if matches!(**base, Expr::Add(_)) => {
      match exp.as_number().and_then(|n| n.to_i64()) {
        Some(n) if n > 1 => {
          let copies = usize::try_from(n).unwrap_or(0);
          distribute(vec![(**base).clone(); copies])
        }
        _ => expr.clone(),
      }
    }
    _ => expr.clone(),
  }
}

/// Multiplies out a product of factors, some of which are sums. The
/// factors of each resulting term stay in their original order.
fn distribute(factors: Vec<Expr>) -> Expr {
  let terms = factors.into_iter()
    .map(|factor| match factor {
      Expr::Add(terms) => terms,
      factor => vec![factor],
    })
    .multi_cartesian_product()
    .map(Expr::product)
    .collect();
  Expr::sum(terms)
}

/// Rewrites `expr` as `re + I*im`.
pub fn expand_complex(expr: &Expr) -> Expr {
  if let Expr::Lambda(_) = expr {
    return expr.map_args(expand_complex);
  }
  let (real, imag) = as_real_imag(expr);
  expand_basic(&(real + Expr::imaginary_unit() * imag))
}

/// Splits `expr` into its real and imaginary parts.
///
/// Parts that cannot be determined are expressed through the `re`
/// and `im` functions.
pub fn as_real_imag(expr: &Expr) -> (Expr, Expr) {
  if expr.is_real() {
    return (expr.clone(), Expr::zero());
  }
  match expr {
    Expr::Atom(Atom::ImaginaryUnit) => (Expr::zero(), Expr::one()),
    Expr::Add(terms) => {
      let (reals, imags): (Vec<_>, Vec<_>) = terms.iter().map(as_real_imag).unzip();
      (Expr::sum(reals), Expr::sum(imags))
    }
    Expr::Mul(factors) => {
      factors.iter().map(as_real_imag).fold((Expr::one(), Expr::zero()), complex_mul)
    }
    Expr::Pow(base, exp) => {
      match exp.as_number().and_then(|n| n.to_i64()) {
        Some(n) if n >= 0 => {
          let parts = as_real_imag(base);
          (0..n).fold((Expr::one(), Expr::zero()), |acc, _| complex_mul(acc, parts.clone()))
        }
        Some(n) => {
          // 1 / (a + bI) = (a - bI) / (a^2 + b^2)
          let parts = as_real_imag(base);
          let (a, b) = (0..-n).fold((Expr::one(), Expr::zero()), |acc, _| complex_mul(acc, parts.clone()));
          let norm = Expr::power(a.clone(), Expr::from(2)) + Expr::power(b.clone(), Expr::from(2));
          (a / norm.clone(), - b / norm)
        }
        None => (re(expr.clone()), im(expr.clone())),
      }
    }
    Expr::Apply(app) => {
      let args: Vec<Expr> = app.args().iter().map(expand_complex).collect();
      if let Some(hook) = app.func().expand_complex_hook() {
        if let Some(expanded) = hook(&args) {
          return as_real_imag(&expanded);
        }
      }
      let node = app.func().reapply(args, app.options().clone());
      (re(node.clone()), im(node))
    }
    _ => (re(expr.clone()), im(expr.clone())),
  }
}

fn complex_mul((a, b): (Expr, Expr), (c, d): (Expr, Expr)) -> (Expr, Expr) {
  let real = a.clone() * c.clone() - b.clone() * d.clone();
  let imag = a * d + b * c;
  (real, imag)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::expr::symbol::Symbol;
  use crate::expr::function::FunctionClass;
  use crate::expr::function::library::{exp, sin, cos};
  use crate::expr::lambda::Lambda;

  use pretty_assertions::assert_eq;

  fn x() -> Expr {
    Expr::symbol("x").unwrap()
  }

  fn y() -> Expr {
    Expr::symbol("y").unwrap()
  }

  fn real_x() -> Expr {
    Expr::from(Symbol::new("x").unwrap().with_real(true))
  }

  #[test]
  fn test_expand_function() {
    let i = Expr::imaginary_unit();
    assert_eq!(expand(&(x() + y()), ExpandHints::default()), x() + y());
    let expected = i.clone() * im(x()) + i * im(y()) + re(x()) + re(y());
    assert_eq!(expand(&(x() + y()), ExpandHints::COMPLEX), expected);
  }

  #[test]
  fn test_f_expand_complex() {
    let i = Expr::imaginary_unit();
    let f = FunctionClass::declare("f").unwrap();
    let z = Expr::symbol("z").unwrap();
    let fx = f.call(vec![real_x()]).unwrap();
    assert_eq!(fx.expand(ExpandHints::COMPLEX), i.clone() * im(fx.clone()) + re(fx));
    assert_eq!(exp(real_x()).expand(ExpandHints::COMPLEX), exp(real_x()));
    let ix = i.clone() * real_x();
    assert_eq!(exp(ix).expand(ExpandHints::COMPLEX), cos(real_x()) + i.clone() * sin(real_x()));
    let expected = cos(im(z.clone())) * exp(re(z.clone())) + i * sin(im(z.clone())) * exp(re(z.clone()));
    assert_eq!(exp(z).expand(ExpandHints::COMPLEX), expected);
  }

  #[test]
  fn test_distribute() {
    let product = (x() + 1) * (y() + 2);
    assert_eq!(product.expand(ExpandHints::BASIC), x() * y() + x() * 2 + y() + 2);
    let difference = (x() + 1) * (x() - 1);
    assert_eq!(difference.expand(ExpandHints::BASIC), Expr::power(x(), Expr::from(2)) - 1);
  }

  #[test]
  fn test_power_of_sum() {
    let square = Expr::power(x() + 1, Expr::from(2));
    let expected = Expr::power(x(), Expr::from(2)) + x() * 2 + 1;
    assert_eq!(square.expand(ExpandHints::BASIC), expected);
    let symbolic = Expr::power(x() + 1, y());
    assert_eq!(symbolic.expand(ExpandHints::BASIC), symbolic);
  }

  #[test]
  fn test_expand_inside_function() {
    let f = FunctionClass::declare("f").unwrap();
    let fx = f.call(vec![(x() + 1) * (x() - 1)]).unwrap();
    let expected = f.call(vec![Expr::power(x(), Expr::from(2)) - 1]).unwrap();
    assert_eq!(fx.expand(ExpandHints::BASIC), expected);
  }

  #[test]
  fn test_noncommutative_order_is_kept() {
    let a = Expr::from(Symbol::new("A").unwrap().with_commutative(Some(false)));
    let b = Expr::from(Symbol::new("B").unwrap().with_commutative(Some(false)));
    let c = Expr::from(Symbol::new("C").unwrap().with_commutative(Some(false)));
    let product = Expr::product(vec![a.clone(), b.clone() + c.clone()]);
    let expected = Expr::product(vec![a.clone(), b]) + Expr::product(vec![a, c]);
    assert_eq!(product.expand(ExpandHints::BASIC), expected);
  }

  #[test]
  fn test_as_real_imag() {
    let i = Expr::imaginary_unit();
    assert_eq!(as_real_imag(&Expr::from(3)), (Expr::from(3), Expr::zero()));
    assert_eq!(as_real_imag(&i), (Expr::zero(), Expr::one()));
    let w = real_x() + i.clone() * 2;
    assert_eq!(as_real_imag(&w), (real_x(), Expr::from(2)));
    // (x + 2I)^2 = x^2 - 4 + 4xI
    let square = Expr::power(w, Expr::from(2));
    let (real, imag) = as_real_imag(&square);
    assert_eq!(real, Expr::power(real_x(), Expr::from(2)) - 4);
    assert_eq!(imag, real_x() * 4);
  }

  #[test]
  fn test_expand_complex_of_lambda() {
    let t = Symbol::new("t").unwrap();
    let lam = Expr::from(Lambda::new(vec![t.clone()], exp(Expr::from(t) * Expr::imaginary_unit())).unwrap());
    let expanded = lam.expand(ExpandHints::COMPLEX);
    let body = expanded.as_lambda().unwrap().body().clone();
    let param = Expr::from(&expanded.as_lambda().unwrap().params()[0]);
    let expected = exp(- im(param.clone())) * cos(re(param.clone()))
      + Expr::imaginary_unit() * exp(- im(param.clone())) * sin(re(param));
    assert_eq!(body, expected);
  }
}
