
//! Subsystems for doing basic calculus on expressions, namely taking
//! derivatives.

mod derivative;

pub use derivative::Derivative;

use crate::expr::Expr;
use crate::expr::symbol::Symbol;
use crate::expr::function::library::log;

/// Differentiates `expr` with respect to `s`, `times` times over.
///
/// With `evaluate` unset, the result is a single symbolic
/// [`Derivative`] node, regardless of `times`.
pub fn diff(expr: &Expr, s: &Symbol, times: u64, evaluate: bool) -> Expr {
  if evaluate {
    (0..times).fold(expr.clone(), |acc, _| acc.diff(s))
  } else {
    Derivative::new(expr.clone(), vec![Expr::from(s)], false)
  }
}

impl Expr {
  /// The derivative of this expression with respect to `s`, as far
  /// as it can be carried out.
  pub fn diff(&self, s: &Symbol) -> Expr {
    Derivative::evaluated(self.clone(), std::slice::from_ref(s))
  }

  /// A single differentiation step on this node. Returns `None` if
  /// the node has no derivative rule, in which case the caller keeps
  /// the derivative symbolic.
  pub fn eval_derivative(&self, s: &Symbol) -> Option<Expr> {
    match self {
      Expr::Atom(_) => {
        let is_s = self.as_symbol() == Some(s);
        Some(if is_s { Expr::one() } else { Expr::zero() })
      }
      Expr::Add(terms) => {
        Some(Expr::sum(terms.iter().map(|t| t.diff(s)).collect()))
      }
      Expr::Mul(factors) => {
        // Product rule. Each term keeps the factors in place, so
        // noncommutative products stay in order.
        let terms = (0..factors.len()).filter_map(|i| {
          let d = factors[i].diff(s);
          if d.is_zero() {
            return None;
          }
          let mut term = factors.clone();
          term[i] = d;
          Some(Expr::product(term))
        }).collect();
        Some(Expr::sum(terms))
      }
      Expr::Pow(base, exp) => {
        let base = (**base).clone();
        let exp = (**exp).clone();
        if !exp.has(s) {
          let lowered = Expr::power(base.clone(), exp.clone() - 1);
          Some(exp * lowered * base.diff(s))
        } else {
          // d(b^e) = b^e * (e' log(b) + e b' / b)
          let inner = exp.diff(s) * log(base.clone()) + exp.clone() * base.diff(s) / base.clone();
          Some(Expr::power(base, exp) * inner)
        }
      }
      Expr::Apply(app) => app.eval_derivative(s),
      Expr::Derivative(d) => d.eval_derivative(s),
      Expr::Lambda(_) => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::expr::function::FunctionClass;
  use crate::expr::function::library::{sin, cos, exp};
  use crate::expr::lambda::Lambda;

  use pretty_assertions::assert_eq;

  fn sym(name: &str) -> Symbol {
    Symbol::new(name).unwrap()
  }

  #[test]
  fn test_polynomial_derivatives() {
    let x = sym("x");
    let ex = Expr::from(&x);
    let poly = Expr::power(ex.clone(), Expr::from(3)) * 2 + ex.clone() * 5 + 7;
    let expected = Expr::power(ex.clone(), Expr::from(2)) * 6 + 5;
    assert_eq!(poly.diff(&x), expected);
    assert_eq!(Expr::from(7).diff(&x), Expr::zero());
    assert_eq!(ex.diff(&x), Expr::one());
  }

  #[test]
  fn test_exponent_depends_on_variable() {
    let x = sym("x");
    let ex = Expr::from(&x);
    let power = Expr::power(Expr::from(2), ex.clone());
    assert_eq!(power.diff(&x), power.clone() * log(Expr::from(2)));
  }

  #[test]
  fn test_derivative_subs_bug() {
    let x = sym("x");
    let l = FunctionClass::declare("l").unwrap();
    let n = FunctionClass::declare("n").unwrap();
    let nx = n.call(vec![Expr::from(&x)]).unwrap();
    let lx = l.call(vec![Expr::from(&x)]).unwrap();
    let e = diff(&nx, &x, 1, true);
    assert_eq!(e.subs(&nx, &lx), lx.diff(&x));
    assert_ne!(e.subs(&nx, &lx), e);
    let e = diff(&nx, &x, 1, true);
    assert_eq!(e.subs(&nx, &Expr::from(&x)), Expr::one());
  }

  #[test]
  fn test_derivative_linearity() {
    let (x, y) = (sym("x"), sym("y"));
    let n = FunctionClass::declare("n").unwrap();
    let nx = n.call(vec![Expr::from(&x)]).unwrap();
    assert_eq!((nx.clone() * -1).diff(&x), - nx.diff(&x));
    assert_eq!((nx.clone() * 8).diff(&x), nx.diff(&x) * 8);
    assert_ne!((nx.clone() * 8).diff(&x), nx.diff(&x) * 7);
    let product = nx.clone() * 8 * Expr::from(&y) * Expr::from(&x);
    let expected = nx.clone() * 8 * Expr::from(&y) + nx.diff(&x) * 8 * Expr::from(&y) * Expr::from(&x);
    assert_eq!(product.diff(&x), expected);
  }

  #[test]
  fn test_derivative_evaluate() {
    let x = sym("x");
    let sx = sin(Expr::from(&x));
    let held = Derivative::new(sx.clone(), vec![Expr::from(&x)], false);
    assert_ne!(held, diff(&sx, &x, 1, true));
    assert_eq!(held.as_derivative().unwrap().doit(), diff(&sx, &x, 1, true));
    assert_eq!(diff(&sx, &x, 1, true), cos(Expr::from(&x)));
  }

  #[test]
  fn test_diff_repeatedly() {
    let x = sym("x");
    let ex = Expr::from(&x);
    assert_eq!(diff(&sin(ex.clone()), &x, 2, true), - sin(ex.clone()));
    assert_eq!(diff(&exp(ex.clone()), &x, 5, true), exp(ex.clone()));
    assert_eq!(diff(&sin(ex.clone()), &x, 0, true), sin(ex.clone()));
  }

  #[test]
  fn test_diff_unevaluated_ignores_times() {
    let x = sym("x");
    let sx = sin(Expr::from(&x));
    let held = diff(&sx, &x, 3, false);
    assert_eq!(held.as_derivative().unwrap().variables(), &[Expr::from(&x)]);
  }

  #[test]
  fn test_general_function_derivatives() {
    let (x, y) = (sym("x"), sym("y"));
    let nu = FunctionClass::declare("nu").unwrap();
    let e = nu.call(vec![Expr::from(&x)]).unwrap();
    let edx = e.diff(&x);
    assert_eq!(edx.diff(&y), Expr::zero());
    let edxdx = edx.diff(&x);
    assert_eq!(edxdx, diff(&edx, &x, 1, true));
    assert_eq!(edxdx, Derivative::unevaluated(e.clone(), vec![Expr::from(&x), Expr::from(&x)]));
    assert_eq!(e.diff(&y), Expr::zero());
  }

  #[test]
  fn test_noncommutative_product_keeps_order() {
    let x = sym("x");
    let a = Expr::from(sym("A").with_commutative(Some(false)));
    let b = Expr::from(sym("B").with_commutative(Some(false)));
    let f = FunctionClass::declare("f").unwrap();
    let fx = f.call(vec![Expr::from(&x)]).unwrap();
    let product = Expr::product(vec![a.clone(), fx.clone(), b.clone()]);
    let expected = Expr::product(vec![a, fx.diff(&x), b]);
    assert_eq!(product.diff(&x), expected);
  }

  #[test]
  fn test_lambda_derivative_stays_symbolic() {
    let x = sym("x");
    let lam = Expr::from(Lambda::new(vec![sym("t")], Expr::from(sym("t")) * Expr::from(&x)).unwrap());
    let d = lam.diff(&x);
    let node = d.as_derivative().unwrap();
    assert_eq!(node.expr(), &lam);
    assert_eq!(node.variables(), &[Expr::from(&x)]);
  }
}
