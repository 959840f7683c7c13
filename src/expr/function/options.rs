
//! Construction options passed alongside the arguments of an applied
//! function.

use serde::{Serialize, Deserialize};

use std::collections::BTreeMap;

/// Option keys that only steer construction and are never stored on
/// the resulting node.
pub const CONSTRUCTION_KEYS: [&str; 5] = ["nargs", "dummy", "comparable", "noncommutative", "commutative"];

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
  Bool(bool),
  Int(i64),
  Text(String),
}

/// An ordered map of named options. Options participate in the
/// equality of applied-function nodes, and so in the memo key.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options(BTreeMap<String, OptionValue>);

impl Options {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with(mut self, key: impl Into<String>, value: OptionValue) -> Self {
    self.0.insert(key.into(), value);
    self
  }

  pub fn get(&self, key: &str) -> Option<&OptionValue> {
    self.0.get(key)
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v))
  }

  /// Removes the keys in [`CONSTRUCTION_KEYS`].
  pub fn strip_construction_keys(&mut self) {
    for key in CONSTRUCTION_KEYS {
      self.0.remove(key);
    }
  }
}

impl From<bool> for OptionValue {
  fn from(b: bool) -> Self {
    OptionValue::Bool(b)
  }
}

impl From<i64> for OptionValue {
  fn from(i: i64) -> Self {
    OptionValue::Int(i)
  }
}

impl From<&str> for OptionValue {
  fn from(s: &str) -> Self {
    OptionValue::Text(s.to_owned())
  }
}
