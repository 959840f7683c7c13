
//! Utility functions for walking an expression tree.
//!
//! Lambda parameters are binders, not subexpressions, so the walkers
//! visit a lambda's body but never its parameters.

use super::Expr;
use crate::util::unwrap_infallible;

pub fn postorder_walk<E, F>(expr: Expr, mut f: F) -> Result<Expr, E>
where F: FnMut(Expr) -> Result<Expr, E> {
  postorder_walk_impl(expr, &mut f)
}

pub fn postorder_walk_ok<F>(expr: Expr, mut f: F) -> Expr
where F: FnMut(Expr) -> Expr {
  let f_err = |expr| Ok(f(expr));
  unwrap_infallible(
    postorder_walk(expr, f_err)
  )
}

fn postorder_walk_impl<E, F>(expr: Expr, f: &mut F) -> Result<Expr, E>
where F: FnMut(Expr) -> Result<Expr, E> {
  let expr = match expr {
    Expr::Atom(atom) => {
      Expr::Atom(atom)
    }
    expr => {
      let mut error = None;
      let rebuilt = expr.map_args(|arg| {
        if error.is_some() {
          return arg.clone();
        }
        postorder_walk_impl(arg.clone(), f).unwrap_or_else(|err| {
          error = Some(err);
          arg.clone()
        })
      });
      if let Some(err) = error {
        return Err(err);
      }
      rebuilt
    }
  };
  f(expr)
}

pub fn postorder_walk_borrowed<F>(expr: &Expr, mut f: F)
where F: FnMut(&Expr) {
  postorder_walk_borrowed_impl(expr, &mut f);
}

fn postorder_walk_borrowed_impl<F>(expr: &Expr, f: &mut F)
where F: FnMut(&Expr) {
  match expr {
    Expr::Atom(_) => {}
    Expr::Add(args) | Expr::Mul(args) => {
      for arg in args {
        postorder_walk_borrowed_impl(arg, f);
      }
    }
    Expr::Pow(base, exp) => {
      postorder_walk_borrowed_impl(base, f);
      postorder_walk_borrowed_impl(exp, f);
    }
    Expr::Apply(app) => {
      for arg in app.args() {
        postorder_walk_borrowed_impl(arg, f);
      }
    }
    Expr::Derivative(d) => {
      postorder_walk_borrowed_impl(d.expr(), f);
      for var in d.variables() {
        postorder_walk_borrowed_impl(var, f);
      }
    }
    Expr::Lambda(l) => {
      postorder_walk_borrowed_impl(l.body(), f);
    }
  }
  f(expr);
}

/// Returns true if any of the sub-expressions of `expr` (including
/// `expr` itself) satisfies the predicate.
pub fn any<F>(expr: &Expr, f: F) -> bool
where F: Fn(&Expr) -> bool {
  let mut result = false;
  postorder_walk_borrowed(expr, |e| {
    if f(e) {
      result = true;
    }
  });
  result
}
