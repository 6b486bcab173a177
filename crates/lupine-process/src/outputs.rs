//! Output mappings.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PublishError;

/// Mapping from output name to value.
///
/// Each name is published at most once per resolution; publishing a name
/// twice is a contract violation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputMapping(HashMap<String, Value>);

impl OutputMapping {
  pub fn new() -> Self {
    Self(HashMap::new())
  }

  /// Mapping holding one already-published value.
  pub fn single(name: impl Into<String>, value: Value) -> Self {
    let mut mapping = Self::new();
    mapping.0.insert(name.into(), value);
    mapping
  }

  /// Register a value under a name, at most once per name.
  pub fn publish(&mut self, name: impl Into<String>, value: Value) -> Result<(), PublishError> {
    let name = name.into();
    if self.0.contains_key(&name) {
      return Err(PublishError::DuplicateOutput { name });
    }
    self.0.insert(name, value);
    Ok(())
  }

  pub fn get(&self, name: &str) -> Option<&Value> {
    self.0.get(name)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
    self.0.iter()
  }
}

impl IntoIterator for OutputMapping {
  type Item = (String, Value);
  type IntoIter = std::collections::hash_map::IntoIter<String, Value>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.into_iter()
  }
}
