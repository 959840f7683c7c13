
//! Structural pattern matching of expressions against patterns
//! containing [`WildFunction`](super::function::wild::WildFunction)s.

use super::Expr;
use super::atom::Atom;

use std::collections::BTreeMap;
use std::collections::btree_map;

/// A set of pattern-to-expression bindings produced by a successful
/// match. An empty `Bindings` is a match that bound nothing, which is
/// distinct from no match at all (`None`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bindings(BTreeMap<Expr, Expr>);

impl Bindings {
  pub fn new() -> Bindings {
    Bindings::default()
  }

  pub fn get(&self, pattern: &Expr) -> Option<&Expr> {
    self.0.get(pattern)
  }

  pub fn with(mut self, pattern: Expr, value: Expr) -> Bindings {
    self.0.insert(pattern, value);
    self
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> btree_map::Iter<'_, Expr, Expr> {
    self.0.iter()
  }
}

impl Expr {
  /// Matches `self`, as a pattern, against `expr`, extending
  /// `bindings`. Returns `None` if there is no match.
  pub fn matches(&self, expr: &Expr, bindings: &Bindings) -> Option<Bindings> {
    match self {
      Expr::Atom(Atom::Wild(w)) => w.matches(expr, bindings),
      Expr::Derivative(d) => d.matches(expr, bindings),
      _ => structural_match(self, expr, bindings),
    }
  }
}

/// Generic matching: `pattern` and `expr` must be the same kind of
/// node with the same number of children, and the children must match
/// pairwise, left to right. Leaves match only themselves.
pub(crate) fn structural_match(pattern: &Expr, expr: &Expr, bindings: &Bindings) -> Option<Bindings> {
  if pattern == expr {
    return Some(bindings.clone());
  }
  if !same_head(pattern, expr) {
    return None;
  }
  let pattern_args = pattern.args();
  let expr_args = expr.args();
  if pattern_args.len() != expr_args.len() {
    return None;
  }
  pattern_args.iter().zip(&expr_args).try_fold(bindings.clone(), |acc, (p, e)| p.matches(e, &acc))
}

fn same_head(pattern: &Expr, expr: &Expr) -> bool {
  match (pattern, expr) {
    (Expr::Add(_), Expr::Add(_)) | (Expr::Mul(_), Expr::Mul(_)) | (Expr::Pow(_, _), Expr::Pow(_, _)) => true,
    (Expr::Apply(a), Expr::Apply(b)) => a.func() == b.func() && a.options() == b.options(),
    (Expr::Derivative(_), Expr::Derivative(_)) => true,
    // Atoms and lambdas only match by equality.
    _ => false,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::expr::function::FunctionClass;
  use crate::expr::function::arity::Arity;
  use crate::expr::function::wild::WildFunction;

  use pretty_assertions::assert_eq;

  fn x() -> Expr {
    Expr::symbol("x").unwrap()
  }

  fn y() -> Expr {
    Expr::symbol("y").unwrap()
  }

  #[test]
  fn test_leaves_match_themselves() {
    assert_eq!(x().matches(&x(), &Bindings::new()), Some(Bindings::new()));
    assert_eq!(x().matches(&y(), &Bindings::new()), None);
    assert_eq!(Expr::from(2).matches(&Expr::from(3), &Bindings::new()), None);
  }

  #[test]
  fn test_wild_inside_product() {
    let f = FunctionClass::declare("f").unwrap();
    let w = Expr::from(WildFunction::new(Some("w")));
    let fx = f.call(vec![x()]).unwrap();
    let pattern = w.clone() * 2;
    let bindings = pattern.matches(&(fx.clone() * 2), &Bindings::new()).unwrap();
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings.get(&w), Some(&fx));
    assert_eq!(pattern.matches(&(fx * 3), &Bindings::new()), None);
  }

  #[test]
  fn test_repeated_wild_must_agree() {
    let f = FunctionClass::declare("f").unwrap();
    let g = FunctionClass::declare_with_arity("g", Arity::Exactly(2)).unwrap();
    let w = Expr::from(WildFunction::new(Some("w")));
    let fx = f.call(vec![x()]).unwrap();
    let fy = f.call(vec![y()]).unwrap();
    let pattern = g.call(vec![w.clone(), w.clone()]).unwrap();
    let same = g.call(vec![fx.clone(), fx.clone()]).unwrap();
    let different = g.call(vec![fx.clone(), fy]).unwrap();
    assert_eq!(pattern.matches(&same, &Bindings::new()), Some(Bindings::new().with(w, fx)));
    assert_eq!(pattern.matches(&different, &Bindings::new()), None);
  }

  #[test]
  fn test_function_heads_must_agree() {
    let f = FunctionClass::declare("f").unwrap();
    let g = FunctionClass::declare("g").unwrap();
    let w = Expr::from(WildFunction::new(Some("w")));
    let pattern = f.call(vec![w]).unwrap();
    let target = g.call(vec![g.call(vec![x()]).unwrap()]).unwrap();
    assert_eq!(pattern.matches(&target, &Bindings::new()), None);
  }
}
