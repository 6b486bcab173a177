//! Result resolution.

use serde_json::Value;

use crate::descriptor::ProcessDescriptor;
use crate::outputs::OutputMapping;

/// The caller-facing form of a resolved output mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
  /// A lone return value, unwrapped from the mapping.
  Value(Value),
  /// The full named-output mapping, unchanged.
  Mapping(OutputMapping),
}

/// Apply the single-value-unwrapping rule.
///
/// If the mapping contains exactly one entry and that entry's name equals
/// the descriptor's single-return name, the bare value is returned.
/// Anything else, including the empty mapping, passes through unchanged.
pub fn resolve(descriptor: &ProcessDescriptor, outputs: OutputMapping) -> Resolved {
  if outputs.len() == 1 {
    if let Some(value) = outputs.get(descriptor.single_return_name()) {
      return Resolved::Value(value.clone());
    }
  }

  Resolved::Mapping(outputs)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::descriptor::ProcessOutput;
  use serde_json::json;

  fn descriptor() -> ProcessDescriptor {
    ProcessDescriptor::build("noop", &[], |_| ProcessOutput::Value(json!(null)))
  }

  #[test]
  fn test_lone_single_return_entry_unwraps() {
    let descriptor = descriptor();
    let outputs = OutputMapping::single(descriptor.single_return_name(), json!(42));

    assert_eq!(resolve(&descriptor, outputs), Resolved::Value(json!(42)));
  }

  #[test]
  fn test_lone_entry_under_other_name_passes_through() {
    let descriptor = descriptor();
    let outputs = OutputMapping::single("sum", json!(42));

    assert_eq!(
      resolve(&descriptor, outputs.clone()),
      Resolved::Mapping(outputs)
    );
  }

  #[test]
  fn test_multi_entry_mapping_passes_through() {
    let descriptor = descriptor();
    let mut outputs = OutputMapping::new();
    outputs
      .publish(descriptor.single_return_name(), json!(1))
      .unwrap();
    outputs.publish("other", json!(2)).unwrap();

    assert_eq!(
      resolve(&descriptor, outputs.clone()),
      Resolved::Mapping(outputs)
    );
  }

  #[test]
  fn test_empty_mapping_is_valid_and_passes_through() {
    let descriptor = descriptor();

    assert_eq!(
      resolve(&descriptor, OutputMapping::new()),
      Resolved::Mapping(OutputMapping::new())
    );
  }
}
