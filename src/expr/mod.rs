
pub mod arithmetic;
pub mod atom;
pub mod calculus;
pub mod context;
pub mod display;
pub mod error;
pub mod expand;
pub mod function;
pub mod lambda;
pub mod number;
pub mod ordering;
pub mod pattern;
pub mod symbol;
pub mod walker;

use atom::Atom;
use number::Number;
use symbol::Symbol;
use function::Application;
use function::flags::FunctionFlags;
use function::wild::WildFunction;
use calculus::Derivative;
use lambda::Lambda;
use crate::util::all_known;

use num::{Zero, One};

use std::collections::BTreeSet;
use std::sync::Arc;

/// An immutable symbolic expression.
///
/// Sums, products and powers should be built through
/// [`Expr::sum`], [`Expr::product`] and [`Expr::power`] (or the
/// arithmetic operators), which keep them in the canonical form that
/// structural equality relies on. Applied functions, derivatives and
/// lambdas are reference-counted, so cloning any expression is cheap
/// relative to the tree it names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
  Atom(Atom),
  Add(Vec<Expr>),
  Mul(Vec<Expr>),
  Pow(Box<Expr>, Box<Expr>),
  Apply(Arc<Application>),
  Derivative(Arc<Derivative>),
  Lambda(Arc<Lambda>),
}

impl Expr {
  /// A symbol expression. Returns `None` if the name is not a valid
  /// symbol name.
  pub fn symbol(name: &str) -> Option<Expr> {
    Symbol::new(name).map(Expr::from)
  }

  pub fn zero() -> Expr {
    Expr::from(0)
  }

  pub fn one() -> Expr {
    Expr::from(1)
  }

  pub fn minus_one() -> Expr {
    Expr::from(-1)
  }

  pub fn imaginary_unit() -> Expr {
    Expr::Atom(Atom::ImaginaryUnit)
  }

  pub fn is_zero(&self) -> bool {
    self.as_number().is_some_and(Number::is_zero)
  }

  pub fn is_one(&self) -> bool {
    self.as_number().is_some_and(Number::is_one)
  }

  pub fn as_number(&self) -> Option<&Number> {
    match self {
      Expr::Atom(Atom::Number(n)) => Some(n),
      _ => None,
    }
  }

  pub fn as_symbol(&self) -> Option<&Symbol> {
    match self {
      Expr::Atom(Atom::Symbol(s)) => Some(s),
      _ => None,
    }
  }

  pub fn as_application(&self) -> Option<&Application> {
    match self {
      Expr::Apply(app) => Some(app),
      _ => None,
    }
  }

  pub fn as_derivative(&self) -> Option<&Derivative> {
    match self {
      Expr::Derivative(d) => Some(d),
      _ => None,
    }
  }

  pub fn as_lambda(&self) -> Option<&Lambda> {
    match self {
      Expr::Lambda(l) => Some(l),
      _ => None,
    }
  }

  /// The ordered children of this node.
  pub fn args(&self) -> Vec<Expr> {
    match self {
      Expr::Atom(_) => Vec::new(),
      Expr::Add(args) | Expr::Mul(args) => args.clone(),
      Expr::Pow(base, exp) => vec![(**base).clone(), (**exp).clone()],
      Expr::Apply(app) => app.args().to_vec(),
      Expr::Derivative(d) => {
        let mut args = vec![d.expr().clone()];
        args.extend(d.variables().iter().cloned());
        args
      }
      Expr::Lambda(l) => {
        let mut args: Vec<Expr> = l.params().iter().cloned().map(Expr::from).collect();
        args.push(l.body().clone());
        args
      }
    }
  }

  /// Rebuilds this node from its children, each transformed by `f`.
  /// Sums, products and powers are re-canonicalized; applied
  /// functions go back through the construction protocol (unless no
  /// argument changed, in which case the node itself is returned).
  /// Lambda parameters are binders and are not passed to `f`.
  pub fn map_args<F>(&self, mut f: F) -> Expr
  where F: FnMut(&Expr) -> Expr {
    match self {
      Expr::Atom(_) => self.clone(),
      Expr::Add(terms) => Expr::sum(terms.iter().map(&mut f).collect()),
      Expr::Mul(factors) => Expr::product(factors.iter().map(&mut f).collect()),
      Expr::Pow(base, exp) => Expr::power(f(base), f(exp)),
      Expr::Apply(app) => {
        let args: Vec<Expr> = app.args().iter().map(&mut f).collect();
        if args == app.args() {
          self.clone()
        } else {
          app.func().reapply(args, app.options().clone())
        }
      }
      Expr::Derivative(d) => {
        let expr = f(d.expr());
        let variables = d.variables().iter().map(&mut f).collect();
        Derivative::unevaluated(expr, variables)
      }
      Expr::Lambda(l) => Expr::from(l.with_body(f(l.body()))),
    }
  }

  /// Replaces every occurrence of `old` with `new`.
  pub fn subs(&self, old: &Expr, new: &Expr) -> Expr {
    if self == old {
      return new.clone();
    }
    match self {
      Expr::Atom(_) => self.clone(),
      Expr::Apply(app) => app.eval_subs(self, old, new),
      Expr::Derivative(d) => d.eval_subs(old, new),
      Expr::Lambda(l) => l.eval_subs(old, new),
      Expr::Add(_) | Expr::Mul(_) | Expr::Pow(_, _) => self.map_args(|arg| arg.subs(old, new)),
    }
  }

  /// The symbols which occur free in this expression. Lambda
  /// parameters are bound and never free.
  pub fn free_symbols(&self) -> BTreeSet<Symbol> {
    let mut acc = BTreeSet::new();
    self.collect_free_symbols(&mut acc);
    acc
  }

  fn collect_free_symbols(&self, acc: &mut BTreeSet<Symbol>) {
    match self {
      Expr::Atom(Atom::Symbol(s)) => {
        acc.insert(s.clone());
      }
      Expr::Atom(_) => {}
      Expr::Lambda(l) => {
        let mut inner = l.body().free_symbols();
        for param in l.params() {
          inner.remove(param);
        }
        acc.extend(inner);
      }
      _ => {
        for arg in self.args() {
          arg.collect_free_symbols(acc);
        }
      }
    }
  }

  /// Returns true if `s` occurs free in this expression.
  pub fn has(&self, s: &Symbol) -> bool {
    match self {
      Expr::Atom(Atom::Symbol(t)) => t == s,
      Expr::Atom(_) => false,
      Expr::Add(args) | Expr::Mul(args) => args.iter().any(|a| a.has(s)),
      Expr::Pow(base, exp) => base.has(s) || exp.has(s),
      Expr::Apply(app) => app.args().iter().any(|a| a.has(s)),
      Expr::Derivative(d) => d.expr().has(s) || d.variables().iter().any(|v| v.has(s)),
      Expr::Lambda(l) => !l.params().contains(s) && l.body().has(s),
    }
  }

  /// Returns true if `sub` occurs anywhere in this expression,
  /// including as the expression itself.
  pub fn contains(&self, sub: &Expr) -> bool {
    walker::any(self, |e| e == sub)
  }

  /// Number of operations in the expression tree.
  pub fn count_ops(&self) -> usize {
    match self {
      Expr::Atom(_) => 0,
      Expr::Add(args) | Expr::Mul(args) => {
        args.len().saturating_sub(1) + args.iter().map(Expr::count_ops).sum::<usize>()
      }
      Expr::Pow(base, exp) => 1 + base.count_ops() + exp.count_ops(),
      Expr::Apply(app) => app.count_ops(),
      Expr::Derivative(d) => 1 + d.expr().count_ops(),
      Expr::Lambda(l) => l.body().count_ops(),
    }
  }

  /// Whether the expression commutes under multiplication. `None`
  /// means unknown.
  pub fn is_commutative(&self) -> Option<bool> {
    match self {
      Expr::Atom(Atom::Symbol(s)) => s.is_commutative(),
      Expr::Atom(_) => Some(true),
      Expr::Add(args) | Expr::Mul(args) => all_known(args.iter().map(Expr::is_commutative)),
      Expr::Pow(base, exp) => all_known([base.is_commutative(), exp.is_commutative()]),
      Expr::Apply(app) => app.eval_is_commutative(),
      Expr::Derivative(d) => d.expr().is_commutative(),
      Expr::Lambda(_) => Some(true),
    }
  }

  /// Whether the expression can be compared against real numbers,
  /// that is, whether it denotes a specific constant.
  pub fn is_comparable(&self) -> Option<bool> {
    match self {
      Expr::Atom(Atom::Number(_)) => Some(true),
      Expr::Atom(_) => Some(false),
      Expr::Add(args) | Expr::Mul(args) => all_known(args.iter().map(Expr::is_comparable)),
      Expr::Pow(base, exp) => all_known([base.is_comparable(), exp.is_comparable()]),
      Expr::Apply(app) => all_known(app.args().iter().map(Expr::is_comparable)),
      Expr::Derivative(_) | Expr::Lambda(_) => Some(false),
    }
  }

  /// Returns true if the expression is known to be real-valued.
  /// False means "not known", not "known to be complex".
  pub fn is_real(&self) -> bool {
    match self {
      Expr::Atom(Atom::Number(_)) => true,
      Expr::Atom(Atom::Symbol(s)) => s.is_real(),
      Expr::Atom(_) => false,
      Expr::Add(args) | Expr::Mul(args) => args.iter().all(Expr::is_real),
      Expr::Pow(base, exp) => {
        base.is_real() && exp.as_number().is_some_and(Number::is_integer)
      }
      Expr::Apply(app) => {
        let flags = app.func().flags();
        flags.contains(FunctionFlags::ALWAYS_REAL) ||
          (flags.contains(FunctionFlags::REAL_ON_REAL_ARGS) && app.args().iter().all(Expr::is_real))
      }
      Expr::Derivative(d) => d.expr().is_real() && d.variables().iter().all(Expr::is_real),
      Expr::Lambda(_) => false,
    }
  }

  /// Whether the expression is a polynomial in `symbols`. An applied
  /// function is polynomial exactly when none of its arguments
  /// mention any of the symbols.
  pub fn is_polynomial(&self, symbols: &[Symbol]) -> bool {
    let mentions = |e: &Expr| symbols.iter().any(|s| e.has(s));
    match self {
      Expr::Atom(_) => true,
      Expr::Add(args) | Expr::Mul(args) => args.iter().all(|a| a.is_polynomial(symbols)),
      Expr::Pow(base, exp) => {
        if !mentions(base) && !mentions(exp) {
          true
        } else {
          let nonneg_integer = exp.as_number().is_some_and(|n| n.is_integer() && !n.is_negative());
          nonneg_integer && base.is_polynomial(symbols)
        }
      }
      Expr::Apply(app) => !app.args().iter().any(mentions),
      Expr::Derivative(_) | Expr::Lambda(_) => !mentions(self),
    }
  }

  /// Splits the expression into `(base, exponent)`.
  pub fn as_base_exp(&self) -> (Expr, Expr) {
    match self {
      Expr::Pow(base, exp) => ((**base).clone(), (**exp).clone()),
      _ => (self.clone(), Expr::one()),
    }
  }

  /// Evaluates the expression to a real floating-point value, if it
  /// denotes a real constant that the known functions can evaluate.
  pub fn evalf(&self) -> Option<f64> {
    let value = match self {
      Expr::Atom(Atom::Number(n)) => n.to_f64()?,
      Expr::Atom(_) => return None,
      Expr::Add(args) => args.iter().map(Expr::evalf).sum::<Option<f64>>()?,
      Expr::Mul(args) => args.iter().map(Expr::evalf).product::<Option<f64>>()?,
      Expr::Pow(base, exp) => base.evalf()?.powf(exp.evalf()?),
      Expr::Apply(app) => app.evalf()?,
      Expr::Derivative(_) | Expr::Lambda(_) => return None,
    };
    Some(value).filter(|v| !v.is_nan())
  }
}

impl From<Atom> for Expr {
  fn from(a: Atom) -> Expr {
    Expr::Atom(a)
  }
}

impl From<Number> for Expr {
  fn from(n: Number) -> Expr {
    Expr::Atom(Atom::Number(n))
  }
}

impl From<i64> for Expr {
  fn from(n: i64) -> Expr {
    Expr::Atom(Atom::from(n))
  }
}

impl From<i32> for Expr {
  fn from(n: i32) -> Expr {
    Expr::from(i64::from(n))
  }
}

impl From<Symbol> for Expr {
  fn from(s: Symbol) -> Expr {
    Expr::Atom(Atom::Symbol(s))
  }
}

impl From<&Symbol> for Expr {
  fn from(s: &Symbol) -> Expr {
    Expr::Atom(Atom::Symbol(s.clone()))
  }
}

impl From<WildFunction> for Expr {
  fn from(w: WildFunction) -> Expr {
    Expr::Atom(Atom::Wild(w))
  }
}

impl From<Lambda> for Expr {
  fn from(l: Lambda) -> Expr {
    Expr::Lambda(Arc::new(l))
  }
}
