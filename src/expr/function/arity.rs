
use serde::{Serialize, Deserialize};
use itertools::Itertools;

use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};

/// The number of arguments a function symbol accepts.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Arity {
  /// Any number of arguments, including zero.
  #[default]
  Any,
  Exactly(usize),
  /// Any count in the set.
  OneOf(BTreeSet<usize>),
}

impl Arity {
  pub fn admits(&self, count: usize) -> bool {
    match self {
      Arity::Any => true,
      Arity::Exactly(n) => *n == count,
      Arity::OneOf(set) => set.contains(&count),
    }
  }

  /// The largest admitted argument count, or `None` if unconstrained.
  pub fn max(&self) -> Option<usize> {
    match self {
      Arity::Any => None,
      Arity::Exactly(n) => Some(*n),
      Arity::OneOf(set) => set.last().copied(),
    }
  }
}

impl Display for Arity {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Arity::Any => write!(f, "any number of"),
      Arity::Exactly(n) => write!(f, "{n}"),
      Arity::OneOf(set) => write!(f, "one of {{{}}}", set.iter().join(", ")),
    }
  }
}
