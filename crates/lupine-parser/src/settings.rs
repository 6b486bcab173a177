//! Optional process settings.

use serde_json::{Map, Value};

/// Optional settings attached to a process.
///
/// Lookups are explicit and absent-defaulted: a missing key (or a value of
/// the wrong type) falls back to the supplied default. Callers handle the
/// missing-settings-object case by not constructing one at all.
#[derive(Debug, Clone, Default)]
pub struct Settings(Map<String, Value>);

impl Settings {
  pub fn new(values: Map<String, Value>) -> Self {
    Self(values)
  }

  /// Boolean lookup with an explicit default.
  pub fn get_bool(&self, key: &str, default: bool) -> bool {
    self.0.get(key).and_then(Value::as_bool).unwrap_or(default)
  }
}

impl From<Map<String, Value>> for Settings {
  fn from(values: Map<String, Value>) -> Self {
    Self::new(values)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn settings(value: Value) -> Settings {
    match value {
      Value::Object(map) => Settings::new(map),
      _ => panic!("settings fixture must be an object"),
    }
  }

  #[test]
  fn test_present_key_wins_over_default() {
    let settings = settings(json!({ "allow_negative": false }));
    assert!(!settings.get_bool("allow_negative", true));
  }

  #[test]
  fn test_absent_key_falls_back_to_default() {
    let settings = settings(json!({}));
    assert!(settings.get_bool("allow_negative", true));
    assert!(!settings.get_bool("allow_negative", false));
  }

  #[test]
  fn test_non_boolean_value_falls_back_to_default() {
    let settings = settings(json!({ "allow_negative": "yes" }));
    assert!(settings.get_bool("allow_negative", true));
  }
}
