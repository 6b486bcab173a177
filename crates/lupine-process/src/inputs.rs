//! Input mappings.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BindError;

/// Mapping from input name to value.
///
/// Input names are unique; supplying the same name twice is a binding
/// fault, not a silent overwrite. Insertion order is irrelevant.
/// Read-only after binding, so it can be shared across concurrent units
/// of work.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputMapping(HashMap<String, Value>);

impl InputMapping {
  pub fn new() -> Self {
    Self(HashMap::new())
  }

  /// Build a mapping from name/value pairs, rejecting duplicate names.
  pub fn from_pairs<I, K>(pairs: I) -> Result<Self, BindError>
  where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
  {
    let mut mapping = Self::new();
    for (name, value) in pairs {
      mapping.insert(name, value)?;
    }
    Ok(mapping)
  }

  /// Insert an input, rejecting duplicate names.
  pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Result<(), BindError> {
    let name = name.into();
    if self.0.contains_key(&name) {
      return Err(BindError::DuplicateInput { name });
    }
    self.0.insert(name, value);
    Ok(())
  }

  /// Insert without the duplicate check. Callers must have checked
  /// `contains` themselves.
  pub(crate) fn set(&mut self, name: String, value: Value) {
    self.0.insert(name, value);
  }

  pub fn get(&self, name: &str) -> Option<&Value> {
    self.0.get(name)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.0.contains_key(name)
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
