
use super::arity::Arity;
use crate::expr::Expr;
use crate::expr::context::Context;
use crate::expr::pattern::Bindings;

use std::fmt::{self, Display, Formatter};

/// A pattern that stands for any applied function whose argument
/// count its arity admits. Unary by default.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WildFunction {
  name: String,
  nargs: Arity,
}

impl WildFunction {
  /// A new wildcard. Unnamed wildcards draw a `Wf<n>` name from the
  /// global context.
  pub fn new(name: Option<&str>) -> WildFunction {
    WildFunction::new_in(Context::global(), name)
  }

  pub fn new_in(ctx: &Context, name: Option<&str>) -> WildFunction {
    let name = match name {
      Some(name) => name.to_owned(),
      None => ctx.wild_name(),
    };
    WildFunction { name, nargs: Arity::Exactly(1) }
  }

  pub fn with_arity(self, nargs: Arity) -> WildFunction {
    WildFunction { nargs, ..self }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn nargs(&self) -> &Arity {
    &self.nargs
  }

  /// Matches this pattern against `expr`, extending `bindings`.
  ///
  /// If the pattern is already bound, the match succeeds only when
  /// `expr` equals the bound value. Otherwise `expr` must be an
  /// applied function with an admissible number of arguments.
  pub fn matches(&self, expr: &Expr, bindings: &Bindings) -> Option<Bindings> {
    let key = Expr::from(self.clone());
    if let Some(bound) = bindings.get(&key) {
      return (bound == expr).then(|| bindings.clone());
    }
    let app = expr.as_application()?;
    if !self.nargs.admits(app.args().len()) {
      return None;
    }
    Some(bindings.clone().with(key, expr.clone()))
  }
}

impl Display for WildFunction {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}_", self.name)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::expr::function::FunctionClass;

  fn x() -> Expr {
    Expr::symbol("x").unwrap()
  }

  #[test]
  fn test_auto_name() {
    let ctx = Context::new();
    ctx.next_id();
    let w = WildFunction::new_in(&ctx, None);
    assert_eq!(w.name(), "Wf2");
    assert_eq!(w.to_string(), "Wf2_");
    assert_eq!(WildFunction::new(Some("w")).to_string(), "w_");
  }

  #[test]
  fn test_matches_unary_application() {
    let f = FunctionClass::declare("f").unwrap();
    let w = WildFunction::new(Some("w"));
    let fx = f.call(vec![x()]).unwrap();
    let bindings = w.matches(&fx, &Bindings::new()).unwrap();
    assert_eq!(bindings.get(&Expr::from(w.clone())), Some(&fx));
  }

  #[test]
  fn test_rejects_wrong_arity_and_non_applications() {
    let f = FunctionClass::declare("f").unwrap();
    let w = WildFunction::new(Some("w"));
    let fxx = f.call(vec![x(), x()]).unwrap();
    assert_eq!(w.matches(&fxx, &Bindings::new()), None);
    assert_eq!(w.matches(&x(), &Bindings::new()), None);
    let w2 = w.with_arity(Arity::Exactly(2));
    assert!(w2.matches(&fxx, &Bindings::new()).is_some());
  }

  #[test]
  fn test_respects_existing_binding() {
    let f = FunctionClass::declare("f").unwrap();
    let g = FunctionClass::declare("g").unwrap();
    let w = WildFunction::new(Some("w"));
    let fx = f.call(vec![x()]).unwrap();
    let gx = g.call(vec![x()]).unwrap();
    let bindings = w.matches(&fx, &Bindings::new()).unwrap();
    assert_eq!(w.matches(&fx, &bindings), Some(bindings.clone()));
    assert_eq!(w.matches(&gx, &bindings), None);
  }
}
