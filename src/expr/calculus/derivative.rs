
use crate::expr::Expr;
use crate::expr::symbol::Symbol;
use crate::expr::pattern::{Bindings, structural_match};

use log::debug;

use std::sync::Arc;

/// An unevaluated derivative of `expr` with respect to `variables`,
/// in order. Variables may repeat.
///
/// A `Derivative` node only exists when at least one differentiation
/// step could not be carried out (or when one is explicitly asked
/// for), so most calls to [`Derivative::new`] return some other kind
/// of expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Derivative {
  expr: Expr,
  variables: Vec<Expr>,
}

impl Derivative {
  /// Differentiates `expr` with respect to each of `variables`.
  ///
  /// With no variables the expression is returned unchanged. If
  /// `evaluate` is false the derivative is kept symbolic (see
  /// [`Derivative::unevaluated`]).
  ///
  /// # Panics
  ///
  /// If `evaluate` is true, every variable must be a symbol.
  pub fn new(expr: Expr, variables: Vec<Expr>, evaluate: bool) -> Expr {
    if variables.is_empty() {
      return expr;
    }
    if !evaluate {
      return Derivative::unevaluated(expr, variables);
    }
    assert!(
      variables.iter().all(|v| v.as_symbol().is_some()),
      "Can only differentiate with respect to symbols, got {:?}",
      variables,
    );
    let symbols: Vec<Symbol> = variables.iter().filter_map(Expr::as_symbol).cloned().collect();
    Derivative::evaluated(expr, &symbols)
  }

  /// A symbolic derivative node. A derivative of a derivative is
  /// folded into a single node, inner variables first.
  pub fn unevaluated(expr: Expr, variables: Vec<Expr>) -> Expr {
    if variables.is_empty() {
      return expr;
    }
    let node = match expr {
      Expr::Derivative(inner) => {
        let mut all_variables = inner.variables.clone();
        all_variables.extend(variables);
        Derivative { expr: inner.expr.clone(), variables: all_variables }
      }
      expr => Derivative { expr, variables },
    };
    Expr::Derivative(Arc::new(node))
  }

  /// Differentiates `expr` by each symbol in turn, through the
  /// expression's own derivative rule. Symbols the rule cannot handle
  /// are left pending on a symbolic node.
  pub fn evaluated(expr: Expr, symbols: &[Symbol]) -> Expr {
    if symbols.iter().any(|s| !expr.has(s)) {
      return Expr::zero();
    }
    let mut current = expr;
    let mut pending = Vec::new();
    for s in symbols {
      match current.eval_derivative(s) {
        Some(result) => {
          current = result;
        }
        None => {
          debug!("Deferring derivative of {} with respect to {}", current, s);
          pending.push(Expr::from(s));
        }
      }
    }
    Derivative::unevaluated(current, pending)
  }

  pub fn expr(&self) -> &Expr {
    &self.expr
  }

  pub fn variables(&self) -> &[Expr] {
    &self.variables
  }

  /// Attempts to carry out the differentiation.
  ///
  /// # Panics
  ///
  /// Panics if any variable is not a symbol.
  pub fn doit(&self) -> Expr {
    Derivative::new(self.expr.clone(), self.variables.clone(), true)
  }

  pub fn eval_derivative(&self, s: &Symbol) -> Option<Expr> {
    let s_expr = Expr::from(s);
    if self.variables.contains(&s_expr) {
      let mut variables = self.variables.clone();
      variables.push(s_expr);
      return Some(Derivative::unevaluated(self.expr.clone(), variables));
    }
    // A derivative result folds into the held variables here.
    let inner = self.expr.diff(s);
    if inner.is_zero() {
      return Some(Expr::zero());
    }
    Some(Derivative::unevaluated(inner, self.variables.clone()))
  }

  /// Substitutes into the target and differentiates again from
  /// scratch. Derivatives with respect to non-symbol expressions
  /// cannot be re-derived and are substituted in place.
  pub fn eval_subs(&self, old: &Expr, new: &Expr) -> Expr {
    let expr = self.expr.subs(old, new);
    if self.variables.iter().all(|v| v.as_symbol().is_some()) {
      Derivative::new(expr, self.variables.clone(), true)
    } else {
      let variables = self.variables.iter().map(|v| v.subs(old, new)).collect();
      Derivative::unevaluated(expr, variables)
    }
  }

  /// Matches a derivative pattern against `expr`. Only derivatives
  /// with the same number of variables can match.
  pub fn matches(&self, expr: &Expr, bindings: &Bindings) -> Option<Bindings> {
    let this = Expr::Derivative(Arc::new(self.clone()));
    if let Some(bound) = bindings.get(&this) {
      return (bound == expr).then(|| bindings.clone());
    }
    let other = expr.as_derivative()?;
    if other.variables.len() != self.variables.len() {
      return None;
    }
    structural_match(&this, expr, bindings)
  }
}
