
//! Function symbols and their applications.
//!
//! A [`FunctionClass`] is a runtime descriptor for a function symbol:
//! a name, an [`Arity`], and (for the concrete families in
//! [`library`]) the hooks that give the function its algebraic
//! identities. Applying a descriptor to arguments goes through a
//! fixed construction protocol (see [`FunctionClass::call_with`])
//! and produces an [`Expr::Apply`] node, or whatever simpler value
//! the family's canonicalization hook chooses.

pub mod arity;
pub mod builder;
pub mod flags;
pub mod library;
pub mod options;
pub mod table;
pub mod wild;

use arity::Arity;
use builder::FunctionClassBuilder;
use flags::FunctionFlags;
use options::Options;
use crate::expr::Expr;
use crate::expr::calculus::Derivative;
use crate::expr::context::Context;
use crate::expr::error::{ArityError, UsageError};
use crate::expr::number::Number;
use crate::expr::symbol::Symbol;
use crate::expr::walker::postorder_walk_ok;
use crate::util::all_known;

use log::trace;

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

static NEXT_FAMILY: AtomicU64 = AtomicU64::new(1);

/// A function symbol, shared by reference counting.
///
/// Cloning a `FunctionClass` is cheap and yields the same symbol.
/// Two undefined descriptors denote the same symbol if their name and
/// arity agree, so declaring the same undefined name twice yields
/// descriptors whose applications compare equal. Every built family
/// carries its own id, so two families that merely share a name are
/// different symbols.
#[derive(Clone)]
pub struct FunctionClass {
  inner: Arc<FunctionClassImpl>,
}

pub(crate) struct FunctionClassImpl {
  pub(crate) name: String,
  pub(crate) nargs: Arity,
  pub(crate) kind: FunctionKind,
  /// Zero for undefined symbols, unique per built family otherwise.
  pub(crate) family: u64,
  pub(crate) flags: FunctionFlags,
  pub(crate) canonize: Option<Box<CanonizeHook>>,
  pub(crate) derivative: Option<Box<DerivativeHook>>,
  pub(crate) evalf: Option<Box<EvalfHook>>,
  pub(crate) subs: Option<Box<SubsHook>>,
  pub(crate) expand_complex: Option<Box<ExpandComplexHook>>,
  pub(crate) rewrite_rules: HashMap<String, Box<RewriteHook>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FunctionKind {
  /// A bare function symbol with no identities beyond its arity.
  Undefined,
  /// A concrete family built through [`FunctionClassBuilder`].
  Defined,
}

/// Outcome of a canonicalization hook.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Canonical {
  /// Keep the applied node over the original arguments.
  Unevaluated,
  /// The application simplifies to this expression.
  Done(Expr),
  /// Keep the applied node, but over these replacement arguments.
  Args(Vec<Expr>),
}

pub type CanonizeHook = dyn Fn(&[Expr], &Options) -> Canonical + Send + Sync;

/// Partial derivative with respect to the 1-based argument index.
/// `None` means the family has no closed form for that argument.
pub type DerivativeHook = dyn Fn(&[Expr], usize) -> Option<Expr> + Send + Sync;

pub type EvalfHook = dyn Fn(&[f64]) -> Option<f64> + Send + Sync;

/// Family-specific substitution. Receives the node, `old` and `new`.
pub type SubsHook = dyn Fn(&Application, &Expr, &Expr) -> Option<Expr> + Send + Sync;

/// Complex expansion over already-expanded arguments.
pub type ExpandComplexHook = dyn Fn(&[Expr]) -> Option<Expr> + Send + Sync;

pub type RewriteHook = dyn Fn(&[Expr]) -> Option<Expr> + Send + Sync;

/// A function symbol applied to arguments.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Application {
  func: FunctionClass,
  args: Vec<Expr>,
  options: Options,
}

/// Memo key for construction. Covers the descriptor, the full
/// argument vector and the remaining options.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct ApplyKey {
  func: FunctionClass,
  args: Vec<Expr>,
  options: Options,
}

impl FunctionClass {
  /// Declares a new undefined function symbol accepting any number
  /// of arguments.
  pub fn declare(name: &str) -> Result<FunctionClass, UsageError> {
    FunctionClass::declare_with_arity(name, Arity::Any)
  }

  pub fn declare_with_arity(name: &str, nargs: Arity) -> Result<FunctionClass, UsageError> {
    if !Symbol::is_valid_name(name) {
      return Err(UsageError::InvalidName(name.to_owned()));
    }
    Ok(FunctionClass::from_impl(FunctionClassImpl::undefined(name.to_owned(), nargs)))
  }

  /// Declares an undefined function symbol from a list of names,
  /// which must contain exactly one element.
  pub fn declare_from_args(names: &[&str]) -> Result<FunctionClass, UsageError> {
    match names {
      [name] => FunctionClass::declare(name),
      _ => Err(UsageError::WrongArgumentCount(names.len())),
    }
  }

  /// Starts building a concrete function family.
  pub fn builder(name: impl Into<String>) -> FunctionClassBuilder {
    FunctionClassBuilder::new(name)
  }

  pub(crate) fn from_impl(inner: FunctionClassImpl) -> FunctionClass {
    FunctionClass { inner: Arc::new(inner) }
  }

  pub fn name(&self) -> &str {
    &self.inner.name
  }

  pub fn nargs(&self) -> &Arity {
    &self.inner.nargs
  }

  pub fn kind(&self) -> FunctionKind {
    self.inner.kind
  }

  pub fn flags(&self) -> FunctionFlags {
    self.inner.flags
  }

  pub fn is_undefined(&self) -> bool {
    self.inner.kind == FunctionKind::Undefined
  }

  pub fn has_rewrite_rule(&self, rule: &str) -> bool {
    self.inner.rewrite_rules.contains_key(rule)
  }

  /// Applies the function in the global [`Context`] with no options.
  pub fn call(&self, args: Vec<Expr>) -> Result<Expr, ArityError> {
    self.call_with(Context::global(), args, Options::default())
  }

  /// Applies the function to `args`.
  ///
  /// The argument count is checked against the declared arity, the
  /// construction-only keys are stripped from `options`, and the memo
  /// cache of `ctx` is consulted. On a miss the family's
  /// canonicalization hook runs and its outcome is remembered, so an
  /// equal call later returns the identical node without
  /// canonicalizing again.
  ///
  /// Only this construction uses `ctx`. Nodes rebuilt later, by
  /// substitution, rewriting or differentiation, are memoized in
  /// [`Context::global`].
  pub fn call_with(&self, ctx: &Context, args: Vec<Expr>, options: Options) -> Result<Expr, ArityError> {
    if !self.nargs().admits(args.len()) {
      return Err(ArityError::ArgumentCount {
        function: self.name().to_owned(),
        expected: self.nargs().clone(),
        actual: args.len(),
      });
    }
    Ok(self.construct(ctx, args, options))
  }

  /// Re-applies the function to arguments already known to satisfy
  /// its arity, such as the rebuilt arguments of an existing node.
  /// Always constructs in the global context.
  pub(crate) fn reapply(&self, args: Vec<Expr>, options: Options) -> Expr {
    self.construct(Context::global(), args, options)
  }

  fn construct(&self, ctx: &Context, args: Vec<Expr>, mut options: Options) -> Expr {
    options.strip_construction_keys();
    let key = ApplyKey { func: self.clone(), args, options };
    if let Some(hit) = ctx.cached(&key) {
      return hit;
    }
    let canonical = match &self.inner.canonize {
      Some(canonize) => canonize(&key.args, &key.options),
      None => Canonical::Unevaluated,
    };
    let result = match canonical {
      Canonical::Done(expr) => expr,
      Canonical::Unevaluated => self.node(key.args.clone(), key.options.clone()),
      Canonical::Args(args) => self.node(args, key.options.clone()),
    };
    trace!("Constructed {} from {} arguments", self.name(), key.args.len());
    ctx.remember(key, result.clone());
    result
  }

  fn node(&self, args: Vec<Expr>, options: Options) -> Expr {
    Expr::Apply(Arc::new(Application { func: self.clone(), args, options }))
  }

  /// The `n`th Taylor coefficient term of this function around zero,
  /// `f(x).diff(x, n).subs(x, 0) * x**n / n!`.
  pub fn taylor_term(&self, n: u64, x: &Symbol) -> Result<Expr, ArityError> {
    let fx = self.call(vec![Expr::from(x)])?;
    let nth = crate::expr::calculus::diff(&fx, x, n, true);
    let at_zero = nth.subs(&Expr::from(x), &Expr::zero());
    let n_expr = Expr::from(i64::try_from(n).unwrap_or(i64::MAX));
    Ok(at_zero * Expr::power(Expr::from(x), n_expr) / Expr::from(Number::factorial(n)))
  }

  pub(crate) fn evalf_hook(&self) -> Option<&EvalfHook> {
    self.inner.evalf.as_deref()
  }

  pub(crate) fn expand_complex_hook(&self) -> Option<&ExpandComplexHook> {
    self.inner.expand_complex.as_deref()
  }

  fn identity(&self) -> (&str, FunctionKind, u64, &Arity) {
    (self.name(), self.kind(), self.inner.family, self.nargs())
  }
}

impl FunctionClassImpl {
  pub(crate) fn undefined(name: String, nargs: Arity) -> Self {
    Self {
      name,
      nargs,
      kind: FunctionKind::Undefined,
      family: 0,
      flags: FunctionFlags::default(),
      canonize: None,
      derivative: None,
      evalf: None,
      subs: None,
      expand_complex: None,
      rewrite_rules: HashMap::new(),
    }
  }

  /// A fresh family id for a built [`FunctionClass`].
  pub(crate) fn next_family() -> u64 {
    NEXT_FAMILY.fetch_add(1, AtomicOrdering::Relaxed)
  }
}

impl Debug for FunctionClass {
  fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
    write!(f, "FunctionClass {{ name: {:?}, nargs: {:?}, kind: {:?}, ... }}", self.name(), self.nargs(), self.kind())
  }
}

impl PartialEq for FunctionClass {
  fn eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.inner, &other.inner) || self.identity() == other.identity()
  }
}

impl Eq for FunctionClass {}

impl Hash for FunctionClass {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.identity().hash(state);
  }
}

impl PartialOrd for FunctionClass {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for FunctionClass {
  fn cmp(&self, other: &Self) -> Ordering {
    self.identity().cmp(&other.identity())
  }
}

impl Application {
  pub fn func(&self) -> &FunctionClass {
    &self.func
  }

  pub fn args(&self) -> &[Expr] {
    &self.args
  }

  pub fn options(&self) -> &Options {
    &self.options
  }

  fn to_expr(&self) -> Expr {
    Expr::Apply(Arc::new(self.clone()))
  }

  pub fn count_ops(&self) -> usize {
    1 + self.args.iter().map(Expr::count_ops).sum::<usize>()
  }

  pub fn eval_is_commutative(&self) -> Option<bool> {
    all_known(self.args.iter().map(Expr::is_commutative))
  }

  /// The partial derivative with respect to the `argindex`th
  /// argument (1-based).
  ///
  /// If the family knows the partial derivative, it is returned.
  /// Otherwise the result is an unevaluated [`Derivative`] of this
  /// node with respect to the argument expression itself.
  pub fn fdiff(&self, argindex: usize) -> Result<Expr, ArityError> {
    let max = self.func.nargs().max().unwrap_or(self.args.len());
    if argindex < 1 || argindex > max || argindex > self.args.len() {
      return Err(ArityError::ArgumentIndex { index: argindex, max });
    }
    Ok(self.partial(argindex))
  }

  // Precondition: 1 <= argindex <= args.len().
  fn partial(&self, argindex: usize) -> Expr {
    let known = self.func.inner.derivative.as_ref().and_then(|hook| hook(&self.args, argindex));
    known.unwrap_or_else(|| {
      Derivative::unevaluated(self.to_expr(), vec![self.args[argindex - 1].clone()])
    })
  }

  /// Chain rule over every argument. Arguments that do not depend on
  /// `s` contribute nothing.
  pub fn eval_derivative(&self, s: &Symbol) -> Option<Expr> {
    let terms = self.args.iter().enumerate().filter_map(|(i, arg)| {
      let darg = arg.diff(s);
      if darg.is_zero() {
        None
      } else {
        Some(self.partial(i + 1) * darg)
      }
    }).collect();
    Some(Expr::sum(terms))
  }

  /// Substitution on this node. `this` is the node itself, as an
  /// expression.
  pub fn eval_subs(&self, this: &Expr, old: &Expr, new: &Expr) -> Expr {
    if this == old {
      return new.clone();
    }
    if let Some(hook) = &self.func.inner.subs {
      if let Some(result) = hook(self, old, new) {
        return result;
      }
    }
    this.map_args(|arg| arg.subs(old, new))
  }

  /// Applies the named rewrite rule to this node, if `pattern` is
  /// unset or names this node's function symbol. Falls back to
  /// rebuilding the node from its (possibly rewritten) arguments.
  pub fn eval_rewrite(&self, pattern: Option<&FunctionClass>, rule: &str, deep: bool) -> Expr {
    let args: Vec<Expr> = if deep {
      self.args.iter().map(|arg| arg.rewrite(pattern, rule, deep)).collect()
    } else {
      self.args.clone()
    };
    if pattern.is_none() || pattern == Some(&self.func) {
      if let Some(handler) = self.func.inner.rewrite_rules.get(rule) {
        if let Some(rewritten) = handler(&args) {
          return rewritten;
        }
      }
    }
    self.func.reapply(args, self.options.clone())
  }

  /// Floating-point value through the family's evaluation hook.
  pub fn evalf(&self) -> Option<f64> {
    let hook = self.func.evalf_hook()?;
    let args = self.args.iter().map(Expr::evalf).collect::<Option<Vec<_>>>()?;
    hook(&args).filter(|v| !v.is_nan())
  }
}

impl ApplyKey {
  pub(crate) fn func(&self) -> &FunctionClass {
    &self.func
  }
}

impl Expr {
  /// The partial derivative of an applied function with respect to
  /// its `argindex`th argument (1-based). Expressions other than
  /// applied functions have no arguments to index.
  pub fn fdiff(&self, argindex: usize) -> Result<Expr, ArityError> {
    match self {
      Expr::Apply(app) => app.fdiff(argindex),
      _ => Err(ArityError::ArgumentIndex { index: argindex, max: 0 }),
    }
  }

  /// Rewrites applied functions in terms of the named rule (for
  /// instance, `sin(x).rewrite(None, "exp", true)`). If `pattern` is
  /// given, only applications of that symbol are rewritten.
  pub fn rewrite(&self, pattern: Option<&FunctionClass>, rule: &str, deep: bool) -> Expr {
    match self {
      Expr::Apply(app) => app.eval_rewrite(pattern, rule, deep),
      Expr::Atom(_) => self.clone(),
      _ => self.map_args(|arg| arg.rewrite(pattern, rule, deep)),
    }
  }

  /// Replaces every application of `old` with an application of
  /// `new` over the same arguments. Applications are only rebound
  /// when both symbols declare the same arity.
  pub fn subs_function(&self, old: &FunctionClass, new: &FunctionClass) -> Expr {
    if old.nargs() != new.nargs() {
      return self.clone();
    }
    postorder_walk_ok(self.clone(), |expr| {
      if let Expr::Apply(app) = &expr {
        if app.func() == old {
          return new.reapply(app.args().to_vec(), app.options().clone());
        }
      }
      expr
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::expr::calculus::diff;
  use crate::expr::function::options::OptionValue;

  use pretty_assertions::assert_eq;

  use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

  fn x() -> Symbol {
    Symbol::new("x").unwrap()
  }

  fn y() -> Symbol {
    Symbol::new("y").unwrap()
  }

  #[test]
  fn test_applied_function_args() {
    let f = FunctionClass::declare("f").unwrap();
    let fx = f.call(vec![Expr::from(x())]).unwrap();
    let app = fx.as_application().unwrap();
    assert_eq!(app.func(), &f);
    assert_eq!(app.args(), &[Expr::from(x())]);
    assert_eq!(fx.args(), vec![Expr::from(x())]);
  }

  #[test]
  fn test_declare_rejects_bad_names() {
    assert_eq!(FunctionClass::declare("1f").unwrap_err(), UsageError::InvalidName(String::from("1f")));
    assert_eq!(FunctionClass::declare_from_args(&["f", "g"]).unwrap_err(), UsageError::WrongArgumentCount(2));
    assert_eq!(FunctionClass::declare_from_args(&[]).unwrap_err(), UsageError::WrongArgumentCount(0));
    assert_eq!(FunctionClass::declare_from_args(&["f"]).unwrap().name(), "f");
  }

  #[test]
  fn test_declaring_twice_gives_equal_applications() {
    let f1 = FunctionClass::declare("f").unwrap();
    let f2 = FunctionClass::declare("f").unwrap();
    assert_eq!(f1, f2);
    assert_eq!(f1.call(vec![Expr::from(x())]).unwrap(), f2.call(vec![Expr::from(x())]).unwrap());
    let g = FunctionClass::declare_with_arity("f", Arity::Exactly(1)).unwrap();
    assert_ne!(f1, g);
  }

  #[test]
  fn test_arity_is_checked() {
    let f = FunctionClass::declare_with_arity("f", Arity::Exactly(1)).unwrap();
    let err = f.call(vec![Expr::from(x()), Expr::from(y())]).unwrap_err();
    assert_eq!(err, ArityError::ArgumentCount { function: String::from("f"), expected: Arity::Exactly(1), actual: 2 });
  }

  #[test]
  fn test_construction_is_memoized() {
    let ctx = Context::new();
    let f = FunctionClass::declare("memo_f").unwrap();
    let a = f.call_with(&ctx, vec![Expr::from(x())], Options::new()).unwrap();
    let b = f.call_with(&ctx, vec![Expr::from(x())], Options::new()).unwrap();
    match (&a, &b) {
      (Expr::Apply(a), Expr::Apply(b)) => assert!(Arc::ptr_eq(a, b)),
      _ => panic!("Expected applied nodes, got {a:?} and {b:?}"),
    }
    assert_eq!(ctx.cache_len(), 1);
  }

  #[test]
  fn test_cache_hit_skips_canonize() {
    static CALLS: AtomicUsize = AtomicUsize::new(0);
    let ctx = Context::new();
    let f = FunctionClass::builder("counted")
      .set_canonize(|_, _| {
        CALLS.fetch_add(1, AtomicOrdering::SeqCst);
        Canonical::Unevaluated
      })
      .build();
    f.call_with(&ctx, vec![Expr::from(1)], Options::new()).unwrap();
    f.call_with(&ctx, vec![Expr::from(1)], Options::new()).unwrap();
    assert_eq!(CALLS.load(AtomicOrdering::SeqCst), 1);
    ctx.clear_cache();
    f.call_with(&ctx, vec![Expr::from(1)], Options::new()).unwrap();
    assert_eq!(CALLS.load(AtomicOrdering::SeqCst), 2);
  }

  #[test]
  fn test_construction_options() {
    let ctx = Context::new();
    let f = FunctionClass::declare("opt_f").unwrap();
    let plain = f.call_with(&ctx, vec![Expr::from(x())], Options::new()).unwrap();
    let stripped = f.call_with(&ctx, vec![Expr::from(x())], Options::new().with("commutative", OptionValue::Bool(true))).unwrap();
    let tagged = f.call_with(&ctx, vec![Expr::from(x())], Options::new().with("tag", OptionValue::Int(1))).unwrap();
    assert_eq!(plain, stripped);
    assert_ne!(plain, tagged);
    assert_eq!(ctx.cache_len(), 2);
  }

  #[test]
  fn test_families_sharing_a_name_are_distinct() {
    let ctx = Context::new();
    let one = FunctionClass::builder("same_g")
      .set_canonize(|_, _| Canonical::Done(Expr::from(1)))
      .build();
    let two = FunctionClass::builder("same_g")
      .set_canonize(|_, _| Canonical::Done(Expr::from(2)))
      .build();
    assert_ne!(one, two);
    assert_eq!(one, one.clone());
    assert_eq!(one.call_with(&ctx, vec![Expr::from(x())], Options::new()), Ok(Expr::from(1)));
    assert_eq!(two.call_with(&ctx, vec![Expr::from(x())], Options::new()), Ok(Expr::from(2)));
    assert_eq!(ctx.cache_len(), 2);

    let h1 = FunctionClass::builder("same_h").build();
    let h2 = FunctionClass::builder("same_h").build();
    assert_ne!(h1.call(vec![Expr::from(x())]).unwrap(), h2.call(vec![Expr::from(x())]).unwrap());
    let undefined = FunctionClass::declare("same_h").unwrap();
    assert_ne!(h1, undefined);
  }

  #[test]
  fn test_rebuilt_nodes_leave_isolated_context_alone() {
    let ctx = Context::new();
    let f = FunctionClass::declare("iso_f").unwrap();
    let fx = f.call_with(&ctx, vec![Expr::from(x())], Options::new()).unwrap();
    assert_eq!(ctx.cache_len(), 1);
    let fy = fx.subs(&Expr::from(x()), &Expr::from(y()));
    assert_eq!(fy, f.call(vec![Expr::from(y())]).unwrap());
    assert_eq!(ctx.cache_len(), 1);
  }

  #[test]
  fn test_canonical_outcomes() {
    let f = FunctionClass::builder("canon")
      .set_canonize(|args, _| {
        match args {
          [a] if a.is_zero() => Canonical::Done(Expr::from(7)),
          [a] if a.is_one() => Canonical::Args(vec![Expr::from(2)]),
          _ => Canonical::Unevaluated,
        }
      })
      .build();
    assert_eq!(f.call(vec![Expr::zero()]).unwrap(), Expr::from(7));
    assert_eq!(f.call(vec![Expr::one()]).unwrap().args(), vec![Expr::from(2)]);
    assert_eq!(f.call(vec![Expr::from(x())]).unwrap().args(), vec![Expr::from(x())]);
  }

  #[test]
  fn test_fdiff() {
    let f = FunctionClass::declare_with_arity("f", Arity::Exactly(2)).unwrap();
    let fxy = f.call(vec![Expr::from(x()), Expr::from(y())]).unwrap();
    assert_eq!(fxy.fdiff(2).unwrap(), Derivative::unevaluated(fxy.clone(), vec![Expr::from(y())]));
    assert_eq!(fxy.fdiff(3).unwrap_err(), ArityError::ArgumentIndex { index: 3, max: 2 });
    assert_eq!(fxy.fdiff(0).unwrap_err(), ArityError::ArgumentIndex { index: 0, max: 2 });

    let g = FunctionClass::declare("g").unwrap();
    let gx = g.call(vec![Expr::from(x())]).unwrap();
    assert_eq!(gx.fdiff(2).unwrap_err(), ArityError::ArgumentIndex { index: 2, max: 1 });
  }

  #[test]
  fn test_chain_rule_single_argument() {
    let f = FunctionClass::declare("f").unwrap();
    let two_x = Expr::from(x()) * 2;
    let f2x = f.call(vec![two_x.clone()]).unwrap();
    let expected = Derivative::unevaluated(f2x.clone(), vec![two_x]) * 2;
    assert_eq!(f2x.diff(&x()), expected);
  }

  #[test]
  fn test_chain_rule_multiple_arguments() {
    let f = FunctionClass::declare("f").unwrap();
    let fxy = f.call(vec![Expr::from(x()), Expr::from(x()) * Expr::from(y())]).unwrap();
    let expected =
      fxy.fdiff(1).unwrap() + fxy.fdiff(2).unwrap() * Expr::from(y());
    assert_eq!(fxy.diff(&x()), expected);
    assert_eq!(fxy.diff(&Symbol::new("z").unwrap()), Expr::zero());
  }

  #[test]
  fn test_general_function() {
    let nu = FunctionClass::declare_with_arity("nu", Arity::Exactly(1)).unwrap();
    let e = nu.call(vec![Expr::from(x())]).unwrap();
    let edx = e.diff(&x());
    assert_ne!(edx, e);
    assert_eq!(edx, diff(&e, &x(), 1, true));
    assert_eq!(e.diff(&y()), Expr::zero());
    assert_eq!(edx.diff(&x()), diff(&diff(&e, &x(), 1, true), &x(), 1, true));
    assert_eq!(edx.diff(&y()), Expr::zero());
  }

  #[test]
  fn test_subs_function() {
    let f = FunctionClass::declare_with_arity("f", Arity::Exactly(1)).unwrap();
    let g = FunctionClass::declare_with_arity("g", Arity::Exactly(1)).unwrap();
    let h = FunctionClass::declare_with_arity("h", Arity::Exactly(2)).unwrap();
    let fx = f.call(vec![Expr::from(x())]).unwrap();
    let ffx = f.call(vec![fx.clone()]).unwrap();
    let gx = g.call(vec![Expr::from(x())]).unwrap();
    let ggx = g.call(vec![gx]).unwrap();
    assert_eq!(ffx.subs_function(&f, &g), ggx);
    assert_eq!(ffx.subs_function(&f, &h), ffx);
  }

  #[test]
  fn test_subs_hook() {
    let f = FunctionClass::builder("swap")
      .set_subs(|app, old, new| {
        (app.args().first() == Some(old)).then(|| new.clone() * 10)
      })
      .build();
    let fx = f.call(vec![Expr::from(x())]).unwrap();
    assert_eq!(fx.subs(&Expr::from(x()), &Expr::from(y())), Expr::from(y()) * 10);
  }

  #[test]
  fn test_rewrite_falls_through() {
    let f = FunctionClass::declare("f").unwrap();
    let fx = f.call(vec![Expr::from(x())]).unwrap();
    assert_eq!(fx.rewrite(None, "exp", true), fx);
  }

  #[test]
  fn test_rewrite_respects_pattern() {
    let f = FunctionClass::builder("twice")
      .add_rewrite_rule("sum", |args| Some(args[0].clone() + args[0].clone()))
      .build();
    let g = FunctionClass::declare("g").unwrap();
    let fx = f.call(vec![Expr::from(x())]).unwrap();
    assert_eq!(fx.rewrite(None, "sum", false), Expr::from(x()) * 2);
    assert_eq!(fx.rewrite(Some(&f), "sum", false), Expr::from(x()) * 2);
    assert_eq!(fx.rewrite(Some(&g), "sum", false), fx);
    let gfx = g.call(vec![fx.clone()]).unwrap();
    assert_eq!(gfx.rewrite(None, "sum", true), g.call(vec![Expr::from(x()) * 2]).unwrap());
    assert_eq!(gfx.rewrite(None, "sum", false), gfx);
  }

  #[test]
  fn test_taylor_term() {
    let term = library::EXP.taylor_term(3, &x()).unwrap();
    assert_eq!(term, Expr::power(Expr::from(x()), Expr::from(3)) / 6);
  }
}
