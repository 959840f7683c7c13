
//! Textual rendering of expressions.
//!
//! [`Display`] produces the short, human-readable form (`f(x)`,
//! `w_`, `D(f(x), x)`), parenthesizing subexpressions only where
//! precedence requires it. [`Expr::repr`] produces the constructor
//! form (`Function('f')(Symbol('x'))`).

use super::Expr;
use super::atom::Atom;
use super::arithmetic::{split_coefficient, with_coefficient};
use super::function::FunctionKind;
use super::number::Number;
use super::symbol::{Symbol, SymbolKind};

use itertools::Itertools;
use num::One;

use std::fmt::{self, Display, Formatter};

pub const ADD_PRECEDENCE: u32 = 40;
pub const MUL_PRECEDENCE: u32 = 50;
pub const POW_PRECEDENCE: u32 = 60;
pub const APPLY_PRECEDENCE: u32 = 70;
pub const ATOM_PRECEDENCE: u32 = 1000;

/// The constructor form of an expression, as returned by
/// [`Expr::repr`].
#[derive(Clone, Copy, Debug)]
pub struct Repr<'a>(&'a Expr);

impl Expr {
  pub fn repr(&self) -> Repr<'_> {
    Repr(self)
  }

  pub fn precedence(&self) -> u32 {
    match self {
      Expr::Atom(Atom::Number(n)) => number_precedence(n),
      Expr::Atom(_) => ATOM_PRECEDENCE,
      Expr::Add(_) => ADD_PRECEDENCE,
      Expr::Mul(factors) => {
        let negative = factors.first().and_then(Expr::as_number).is_some_and(Number::is_negative);
        if negative { ADD_PRECEDENCE } else { MUL_PRECEDENCE }
      }
      Expr::Pow(_, _) => POW_PRECEDENCE,
      Expr::Apply(_) => APPLY_PRECEDENCE,
      Expr::Derivative(_) | Expr::Lambda(_) => ATOM_PRECEDENCE,
    }
  }
}

fn number_precedence(n: &Number) -> u32 {
  if n.is_negative() {
    ADD_PRECEDENCE
  } else if !n.is_integer() {
    MUL_PRECEDENCE
  } else {
    ATOM_PRECEDENCE
  }
}

fn write_at(f: &mut Formatter<'_>, expr: &Expr, level: u32) -> fmt::Result {
  if expr.precedence() <= level {
    write!(f, "(")?;
    write_expr(f, expr)?;
    write!(f, ")")
  } else {
    write_expr(f, expr)
  }
}

fn write_expr(f: &mut Formatter<'_>, expr: &Expr) -> fmt::Result {
  match expr {
    Expr::Atom(a) => write!(f, "{a}"),
    Expr::Add(terms) => {
      // Sums are flattened, so no term needs parentheses.
      for (i, term) in terms.iter().enumerate() {
        if i == 0 {
          write_expr(f, term)?;
          continue;
        }
        let (coeff, rest) = split_coefficient(term.clone());
        if coeff.is_negative() {
          write!(f, " - ")?;
          write_expr(f, &with_coefficient(-coeff, rest))?;
        } else {
          write!(f, " + ")?;
          write_expr(f, term)?;
        }
      }
      Ok(())
    }
    Expr::Mul(factors) => write_product(f, factors),
    Expr::Pow(base, exp) => {
      write_at(f, base, POW_PRECEDENCE)?;
      write!(f, "**")?;
      write_at(f, exp, POW_PRECEDENCE)
    }
    Expr::Apply(app) => {
      write!(f, "{}(", app.func().name())?;
      write_args(f, app.args())?;
      write!(f, ")")
    }
    Expr::Derivative(d) => {
      write!(f, "D(")?;
      write_expr(f, d.expr())?;
      for var in d.variables() {
        write!(f, ", ")?;
        write_expr(f, var)?;
      }
      write!(f, ")")
    }
    Expr::Lambda(l) => {
      write!(f, "Lambda(")?;
      for param in l.params() {
        write!(f, "{param}, ")?;
      }
      write_expr(f, l.body())?;
      write!(f, ")")
    }
  }
}

fn write_product(f: &mut Formatter<'_>, factors: &[Expr]) -> fmt::Result {
  let (mut coeff, rest) = match factors.split_first() {
    Some((Expr::Atom(Atom::Number(n)), rest)) => (n.clone(), rest),
    _ => (Number::one(), factors),
  };
  if coeff.is_negative() {
    write!(f, "-")?;
    coeff = -coeff;
  }
  let mut first = true;
  if !coeff.is_one() || rest.is_empty() {
    write_at(f, &Expr::from(coeff), MUL_PRECEDENCE)?;
    first = false;
  }
  for factor in rest {
    if !first {
      write!(f, "*")?;
    }
    first = false;
    write_at(f, factor, MUL_PRECEDENCE)?;
  }
  Ok(())
}

fn write_args(f: &mut Formatter<'_>, args: &[Expr]) -> fmt::Result {
  let mut first = true;
  for arg in args {
    if !first {
      write!(f, ", ")?;
    }
    first = false;
    write_expr(f, arg)?;
  }
  Ok(())
}

impl Display for Expr {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write_expr(f, self)
  }
}

fn symbol_repr(s: &Symbol) -> String {
  match s.kind() {
    SymbolKind::Plain => format!("Symbol('{}')", s.name()),
    SymbolKind::Dummy { .. } => format!("Dummy('{}')", s.name()),
    SymbolKind::Bound { depth, index } => format!("Bound({depth}, {index})"),
  }
}

fn join_repr(args: &[Expr]) -> String {
  args.iter().map(|a| a.repr().to_string()).join(", ")
}

impl<'a> Display for Repr<'a> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self.0 {
      Expr::Atom(Atom::Number(n)) => {
        if n.is_integer() {
          write!(f, "Integer({n})")
        } else {
          write!(f, "Rational({}, {})", n.numer(), n.denom())
        }
      }
      Expr::Atom(Atom::Symbol(s)) => write!(f, "{}", symbol_repr(s)),
      Expr::Atom(Atom::ImaginaryUnit) => write!(f, "I"),
      Expr::Atom(Atom::Wild(w)) => write!(f, "WildFunction('{}')", w.name()),
      Expr::Add(terms) => write!(f, "Add({})", join_repr(terms)),
      Expr::Mul(factors) => write!(f, "Mul({})", join_repr(factors)),
      Expr::Pow(base, exp) => write!(f, "Pow({}, {})", base.repr(), exp.repr()),
      Expr::Apply(app) => {
        match app.func().kind() {
          FunctionKind::Undefined => write!(f, "Function('{}')", app.func().name())?,
          FunctionKind::Defined => write!(f, "{}", app.func().name())?,
        }
        write!(f, "({})", join_repr(app.args()))
      }
      Expr::Derivative(d) => {
        write!(f, "Derivative({}, {})", d.expr().repr(), join_repr(d.variables()))
      }
      Expr::Lambda(l) => {
        let params = l.params().iter().map(symbol_repr).join(", ");
        write!(f, "Lambda({}, {})", params, l.body().repr())
      }
    }
  }
}
