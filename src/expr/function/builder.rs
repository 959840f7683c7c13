
//! Builder API for concrete [`FunctionClass`] families.

use super::{FunctionClass, FunctionClassImpl, FunctionKind, Application, Canonical};
use super::{CanonizeHook, DerivativeHook, EvalfHook, SubsHook, ExpandComplexHook, RewriteHook};
use super::arity::Arity;
use super::flags::FunctionFlags;
use super::options::Options;
use crate::expr::Expr;

use std::collections::HashMap;

pub struct FunctionClassBuilder {
  name: String,
  nargs: Arity,
  flags: FunctionFlags,
  canonize: Option<Box<CanonizeHook>>,
  derivative: Option<Box<DerivativeHook>>,
  evalf: Option<Box<EvalfHook>>,
  subs: Option<Box<SubsHook>>,
  expand_complex: Option<Box<ExpandComplexHook>>,
  rewrite_rules: HashMap<String, Box<RewriteHook>>,
}

impl FunctionClassBuilder {
  /// Constructs a new `FunctionClassBuilder` object for the function
  /// family with the given name. The family accepts any number of
  /// arguments until [`FunctionClassBuilder::nargs`] says otherwise.
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      nargs: Arity::Any,
      flags: FunctionFlags::default(),
      canonize: None,
      derivative: None,
      evalf: None,
      subs: None,
      expand_complex: None,
      rewrite_rules: HashMap::new(),
    }
  }

  /// Sets the arity of the family. Modifies and returns `self`, to
  /// permit fluent-style calling.
  pub fn nargs(mut self, nargs: Arity) -> Self {
    self.nargs = nargs;
    self
  }

  /// Enables the [`REAL_ON_REAL_ARGS`](FunctionFlags::REAL_ON_REAL_ARGS)
  /// flag for `self`.
  pub fn real_on_real_args(mut self) -> Self {
    self.flags |= FunctionFlags::REAL_ON_REAL_ARGS;
    self
  }

  /// Enables the [`ALWAYS_REAL`](FunctionFlags::ALWAYS_REAL) flag for
  /// `self`.
  pub fn always_real(mut self) -> Self {
    self.flags |= FunctionFlags::ALWAYS_REAL;
    self
  }

  /// Sets the canonicalization rule, run once per distinct
  /// construction. If a canonicalization rule has already been set,
  /// then `set_canonize` panics.
  pub fn set_canonize(mut self, rule: impl Fn(&[Expr], &Options) -> Canonical + Send + Sync + 'static) -> Self {
    assert!(
      self.canonize.is_none(),
      "Cannot set canonize rule on function {} that already has one.",
      self.name,
    );
    self.canonize = Some(Box::new(rule));
    self
  }

  /// Sets the rule for how to differentiate this function. The rule
  /// receives the arguments and the 1-based index of the argument to
  /// differentiate by. If a derivative rule has already been set, then
  /// `set_derivative` panics.
  pub fn set_derivative(mut self, rule: impl Fn(&[Expr], usize) -> Option<Expr> + Send + Sync + 'static) -> Self {
    assert!(
      self.derivative.is_none(),
      "Cannot set derivative rule on function {} that already has one.",
      self.name,
    );
    self.derivative = Some(Box::new(rule));
    self
  }

  pub fn set_evalf(mut self, rule: impl Fn(&[f64]) -> Option<f64> + Send + Sync + 'static) -> Self {
    assert!(
      self.evalf.is_none(),
      "Cannot set evalf rule on function {} that already has one.",
      self.name,
    );
    self.evalf = Some(Box::new(rule));
    self
  }

  pub fn set_subs(mut self, rule: impl Fn(&Application, &Expr, &Expr) -> Option<Expr> + Send + Sync + 'static) -> Self {
    assert!(
      self.subs.is_none(),
      "Cannot set subs rule on function {} that already has one.",
      self.name,
    );
    self.subs = Some(Box::new(rule));
    self
  }

  pub fn set_expand_complex(mut self, rule: impl Fn(&[Expr]) -> Option<Expr> + Send + Sync + 'static) -> Self {
    assert!(
      self.expand_complex.is_none(),
      "Cannot set expand_complex rule on function {} that already has one.",
      self.name,
    );
    self.expand_complex = Some(Box::new(rule));
    self
  }

  /// Adds a named rewrite rule, used by
  /// [`Expr::rewrite`](crate::expr::Expr::rewrite). Panics if a rule
  /// with that name already exists.
  pub fn add_rewrite_rule(mut self, rule_name: &str, rule: impl Fn(&[Expr]) -> Option<Expr> + Send + Sync + 'static) -> Self {
    assert!(
      !self.rewrite_rules.contains_key(rule_name),
      "Function {} already has a rewrite rule named {}.",
      self.name,
      rule_name,
    );
    self.rewrite_rules.insert(rule_name.to_owned(), Box::new(rule));
    self
  }

  /// Consumes `self` and builds it into a completed [`FunctionClass`]
  /// value.
  pub fn build(self) -> FunctionClass {
    FunctionClass::from_impl(FunctionClassImpl {
      name: self.name,
      nargs: self.nargs,
      kind: FunctionKind::Defined,
      family: FunctionClassImpl::next_family(),
      flags: self.flags,
      canonize: self.canonize,
      derivative: self.derivative,
      evalf: self.evalf,
      subs: self.subs,
      expand_complex: self.expand_complex,
      rewrite_rules: self.rewrite_rules,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_build_sets_kind_and_flags() {
    let f = FunctionClassBuilder::new("builder_f")
      .nargs(Arity::Exactly(1))
      .real_on_real_args()
      .add_rewrite_rule("id", |args| Some(args[0].clone()))
      .build();
    assert_eq!(f.kind(), FunctionKind::Defined);
    assert_eq!(f.nargs(), &Arity::Exactly(1));
    assert!(f.flags().contains(FunctionFlags::REAL_ON_REAL_ARGS));
    assert!(f.has_rewrite_rule("id"));
    assert!(!f.has_rewrite_rule("exp"));
  }

  #[test]
  #[should_panic]
  fn test_set_derivative_twice() {
    FunctionClassBuilder::new("builder_g")
      .set_derivative(|_, _| None)
      .set_derivative(|_, _| None);
  }

  #[test]
  #[should_panic]
  fn test_add_rewrite_rule_twice() {
    FunctionClassBuilder::new("builder_h")
      .add_rewrite_rule("exp", |_| None)
      .add_rewrite_rule("exp", |_| None);
  }
}
