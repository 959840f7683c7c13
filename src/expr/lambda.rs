
//! Anonymous functions over bound parameters.

use super::Expr;
use super::context::Context;
use super::error::ArityError;
use super::symbol::Symbol;

use std::hash::{Hash, Hasher};

/// A lambda abstraction `Lambda(x, y, ..., body)`.
///
/// Parameters are renamed to fresh dummy symbols at construction, so
/// a lambda's body never captures a symbol of the caller's. Two
/// lambdas are equal if they have the same number of parameters and
/// their bodies agree once parameters are identified positionally,
/// so `Lambda(x, x**2) == Lambda(y, y**2)`.
#[derive(Clone, Debug)]
pub struct Lambda {
  params: Vec<Symbol>,
  body: Expr,
}

impl Lambda {
  pub fn new(params: Vec<Symbol>, body: Expr) -> Result<Lambda, ArityError> {
    Lambda::new_in(Context::global(), params, body)
  }

  /// As [`Lambda::new`], drawing dummy ids from `ctx`.
  pub fn new_in(ctx: &Context, params: Vec<Symbol>, body: Expr) -> Result<Lambda, ArityError> {
    if params.is_empty() {
      return Err(ArityError::TooFewChildren { actual: params.len() + 1 });
    }
    let mut body = body;
    let mut dummies = Vec::with_capacity(params.len());
    for param in &params {
      let dummy = ctx.dummy(param);
      body = body.subs(&Expr::from(param), &Expr::from(&dummy));
      dummies.push(dummy);
    }
    Ok(Lambda { params: dummies, body })
  }

  pub fn params(&self) -> &[Symbol] {
    &self.params
  }

  pub fn body(&self) -> &Expr {
    &self.body
  }

  /// Applies the lambda to `args`, substituting them for the leading
  /// parameters.
  ///
  /// Applying fewer arguments than there are parameters curries: the
  /// result is a lambda over the remaining parameters. Applying no
  /// arguments returns the lambda itself.
  pub fn apply(&self, args: &[Expr]) -> Result<Expr, ArityError> {
    if args.len() > self.params.len() {
      return Err(ArityError::TooManyArguments { expected: self.params.len(), actual: args.len() });
    }
    let body = self.params.iter().zip(args).fold(self.body.clone(), |body, (param, arg)| {
      body.subs(&Expr::from(param), arg)
    });
    if args.len() == self.params.len() {
      Ok(body)
    } else {
      // The remaining parameters are already dummies.
      let params = self.params[args.len()..].to_vec();
      Ok(Expr::from(Lambda { params, body }))
    }
  }

  pub fn call(&self, args: Vec<Expr>) -> Result<Expr, ArityError> {
    self.apply(&args)
  }

  /// The same parameters over a new body.
  pub fn with_body(&self, body: Expr) -> Lambda {
    Lambda { params: self.params.clone(), body }
  }

  /// Substitution never touches the bound parameters.
  pub fn eval_subs(&self, old: &Expr, new: &Expr) -> Expr {
    let binds_old = old.as_symbol().is_some_and(|s| self.params.contains(s));
    if binds_old {
      return Expr::from(self.clone());
    }
    Expr::from(self.with_body(self.body.subs(old, new)))
  }

  /// The body with each parameter replaced by a positional
  /// placeholder. Alpha-equivalent lambdas have equal canonical
  /// bodies.
  ///
  /// A body may already hold placeholders left by an enclosing
  /// lambda's canonicalization. Those are moved one binder out before
  /// this lambda's parameters take depth zero.
  pub fn canonical_body(&self) -> Expr {
    // Deepest first, so that no placeholder is shifted twice.
    let outer: Vec<(Symbol, Symbol)> = self.body.free_symbols().into_iter()
      .rev()
      .filter_map(|s| s.shifted_out().map(|shifted| (s, shifted)))
      .collect();
    let body = outer.into_iter().fold(self.body.clone(), |body, (s, shifted)| {
      body.subs(&Expr::from(s), &Expr::from(shifted))
    });
    self.params.iter().enumerate().fold(body, |body, (i, param)| {
      body.subs(&Expr::from(param), &Expr::from(Symbol::bound(0, i)))
    })
  }
}

impl PartialEq for Lambda {
  fn eq(&self, other: &Lambda) -> bool {
    self.params.len() == other.params.len() && self.canonical_body() == other.canonical_body()
  }
}

impl Eq for Lambda {}

impl Hash for Lambda {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.params.len().hash(state);
    self.canonical_body().hash(state);
  }
}
