
use super::function::arity::Arity;

use thiserror::Error;

/// Malformed declaration of a function symbol.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum UsageError {
  #[error("You need to specify exactly one name, but {0} were given.")]
  WrongArgumentCount(usize),
  #[error("Invalid function name '{0}'")]
  InvalidName(String),
}

/// An arity constraint was violated.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ArityError {
  #[error("Function {function} expects {expected} arguments, but got {actual}.")]
  ArgumentCount {
    function: String,
    expected: Arity,
    actual: usize,
  },
  #[error("Argument index {index} is out of range [1, {max}].")]
  ArgumentIndex {
    index: usize,
    max: usize,
  },
  #[error("Cannot call lambda of {expected} parameters with {actual} arguments.")]
  TooManyArguments {
    expected: usize,
    actual: usize,
  },
  #[error("Lambda needs at least one parameter and a body, but got {actual} children.")]
  TooFewChildren {
    actual: usize,
  },
}
