
use super::FunctionClass;
use crate::expr::error::UsageError;

use std::collections::HashMap;

/// A table of known function families, by name.
#[derive(Debug, Default)]
pub struct FunctionTable {
  known_functions: HashMap<String, FunctionClass>,
}

impl FunctionTable {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      known_functions: HashMap::with_capacity(capacity),
    }
  }

  pub fn insert(&mut self, func: FunctionClass) {
    self.known_functions.insert(func.name().to_string(), func);
  }

  pub fn get(&self, name: &str) -> Option<&FunctionClass> {
    self.known_functions.get(name)
  }

  pub fn len(&self) -> usize {
    self.known_functions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.known_functions.is_empty()
  }

  /// The family registered under `name`, or a fresh undefined symbol
  /// of that name if there is none.
  pub fn resolve(&self, name: &str) -> Result<FunctionClass, UsageError> {
    match self.get(name) {
      Some(func) => Ok(func.clone()),
      None => FunctionClass::declare(name),
    }
  }
}

impl FromIterator<FunctionClass> for FunctionTable {
  fn from_iter<I: IntoIterator<Item = FunctionClass>>(iter: I) -> Self {
    let iter = iter.into_iter();
    let (len_bound, _) = iter.size_hint();
    let mut table = Self::with_capacity(len_bound);
    for func in iter {
      table.insert(func);
    }
    table
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::expr::function::FunctionKind;

  #[test]
  fn test_resolve() {
    let sin = FunctionClass::builder("table_sin").build();
    let table: FunctionTable = [sin.clone()].into_iter().collect();
    assert_eq!(table.len(), 1);
    assert_eq!(table.resolve("table_sin").unwrap(), sin);
    assert_eq!(table.resolve("g").unwrap().kind(), FunctionKind::Undefined);
    assert!(table.resolve("1g").is_err());
  }
}
