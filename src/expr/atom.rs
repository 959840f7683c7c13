
use super::number::Number;
use super::symbol::Symbol;
use super::function::wild::WildFunction;

use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Atom {
  Number(Number),
  Symbol(Symbol),
  /// The imaginary unit `I`, with `I**2 == -1`.
  ImaginaryUnit,
  Wild(WildFunction),
}

impl From<Number> for Atom {
  fn from(n: Number) -> Self {
    Self::Number(n)
  }
}

impl From<Symbol> for Atom {
  fn from(s: Symbol) -> Self {
    Self::Symbol(s)
  }
}

impl From<i64> for Atom {
  fn from(n: i64) -> Self {
    Self::Number(Number::from(n))
  }
}

impl From<WildFunction> for Atom {
  fn from(w: WildFunction) -> Self {
    Self::Wild(w)
  }
}

impl Display for Atom {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Atom::Number(n) => write!(f, "{n}"),
      Atom::Symbol(s) => write!(f, "{s}"),
      Atom::ImaginaryUnit => write!(f, "I"),
      Atom::Wild(w) => write!(f, "{w}"),
    }
  }
}
