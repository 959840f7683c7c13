
use regex::Regex;
use once_cell::sync::Lazy;
use serde::{Serialize, Deserialize};

use std::error::{Error as StdError};
use std::fmt::{self, Display, Formatter};

/// A named symbol in an expression, left intentionally un-evaluated.
///
/// A symbol's name must begin with a letter, followed by zero or more
/// letters, digits, underscores, or apostrophes. Symbols also carry
/// the assumptions that the rest of the engine consults (realness and
/// commutativity), and two symbols with the same name but different
/// assumptions are different symbols.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol {
  name: String,
  kind: SymbolKind,
  real: bool,
  commutative: Option<bool>,
}

/// How a symbol came to be.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
  /// A symbol written by the user.
  Plain,
  /// A fresh symbol minted from a [`Context`](super::context::Context)
  /// counter, tagged with the id of that context. Dummies never
  /// compare equal to a plain symbol of the same name, nor to each
  /// other.
  Dummy { context: u64, id: u64 },
  /// Positional placeholder used when comparing lambda bodies. `depth`
  /// counts the lambdas between the placeholder and its binder, so
  /// the parameters of nested lambdas never collide.
  Bound { depth: usize, index: usize },
}

#[derive(Clone, Debug)]
pub struct TryFromStringError {
  original_string: String,
}

pub static VALID_NAME_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^[a-zA-Z][a-zA-Z0-9_']*$").unwrap()
});

impl Symbol {
  pub fn new(name: impl Into<String>) -> Option<Self> {
    Self::try_from(name.into()).ok()
  }

  /// Returns true if `name` would be accepted by [`Symbol::new`].
  pub fn is_valid_name(name: &str) -> bool {
    VALID_NAME_RE.is_match(name)
  }

  pub(crate) fn bound(depth: usize, index: usize) -> Self {
    Self {
      name: String::new(),
      kind: SymbolKind::Bound { depth, index },
      real: false,
      commutative: Some(true),
    }
  }

  /// For a placeholder, the same placeholder one binder further out.
  pub(crate) fn shifted_out(&self) -> Option<Self> {
    match self.kind {
      SymbolKind::Bound { depth, index } => Some(Symbol::bound(depth + 1, index)),
      _ => None,
    }
  }

  /// A dummy copy of `self` with the given context and id. The dummy
  /// keeps the name and assumptions of the original.
  pub(crate) fn into_dummy(self, context: u64, id: u64) -> Self {
    Self { kind: SymbolKind::Dummy { context, id }, ..self }
  }

  pub fn with_real(self, real: bool) -> Self {
    Self { real, ..self }
  }

  pub fn with_commutative(self, commutative: Option<bool>) -> Self {
    Self { commutative, ..self }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn kind(&self) -> SymbolKind {
    self.kind
  }

  pub fn is_dummy(&self) -> bool {
    matches!(self.kind, SymbolKind::Dummy { .. })
  }

  pub fn is_real(&self) -> bool {
    self.real
  }

  /// Whether the symbol commutes under multiplication. `None` means
  /// unknown.
  pub fn is_commutative(&self) -> Option<bool> {
    self.commutative
  }
}

impl TryFrom<String> for Symbol {
  type Error = TryFromStringError;

  fn try_from(name: String) -> Result<Self, Self::Error> {
    if VALID_NAME_RE.is_match(&name) {
      Ok(Self { name, kind: SymbolKind::Plain, real: false, commutative: Some(true) })
    } else {
      Err(TryFromStringError { original_string: name })
    }
  }
}

impl Display for Symbol {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self.kind {
      SymbolKind::Plain => write!(f, "{}", self.name),
      SymbolKind::Dummy { .. } => write!(f, "_{}", self.name),
      SymbolKind::Bound { depth, index } => write!(f, "_{}_{}", depth, index),
    }
  }
}

impl TryFromStringError {
  pub fn original_string(&self) -> &str {
    &self.original_string
  }
}

impl Display for TryFromStringError {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "Invalid symbol name '{}'", self.original_string)
  }
}

impl StdError for TryFromStringError {}
