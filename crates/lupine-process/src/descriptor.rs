//! Process descriptors.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::BindError;
use crate::exit_code::ProcessFailure;
use crate::inputs::InputMapping;
use crate::outputs::OutputMapping;

/// Name under which a lone return value is exposed.
pub const SINGLE_RETURN_NAME: &str = "result";

/// What a wrapped process function produces.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessOutput {
  /// A single value, published under the descriptor's single-return name.
  Value(Value),
  /// A full named-output mapping.
  Mapping(OutputMapping),
  /// A structured failure, surfaced through the result channel.
  Failure(ProcessFailure),
}

impl From<Result<OutputMapping, ProcessFailure>> for ProcessOutput {
  fn from(result: Result<OutputMapping, ProcessFailure>) -> Self {
    match result {
      Ok(outputs) => ProcessOutput::Mapping(outputs),
      Err(failure) => ProcessOutput::Failure(failure),
    }
  }
}

/// The function type a descriptor wraps.
pub type ProcessFn = Arc<dyn Fn(&InputMapping) -> ProcessOutput + Send + Sync>;

/// A declarative wrapper around a plain function.
///
/// The descriptor records the ordered positional-argument names, the
/// declared keyword inputs with their defaults, and the name reserved for
/// a lone return value. It is built once per invocation, is immutable
/// after construction, and never executes the function at build time.
///
/// It is also the sole authority on the single-return name, so the result
/// resolver can recognize the single-value case without inspecting the
/// function again.
#[derive(Clone)]
pub struct ProcessDescriptor {
  name: String,
  func: ProcessFn,
  arg_names: Vec<String>,
  defaults: InputMapping,
  single_return_name: &'static str,
}

impl ProcessDescriptor {
  /// Build a descriptor from a plain function and its declared
  /// positional-argument names, in declaration order.
  pub fn build(
    name: impl Into<String>,
    arg_names: &[&str],
    func: impl Fn(&InputMapping) -> ProcessOutput + Send + Sync + 'static,
  ) -> Self {
    Self {
      name: name.into(),
      func: Arc::new(func),
      arg_names: arg_names.iter().map(|s| s.to_string()).collect(),
      defaults: InputMapping::new(),
      single_return_name: SINGLE_RETURN_NAME,
    }
  }

  /// Declare a keyword input with a default value.
  ///
  /// The default fills in at bind time when the caller did not supply the
  /// name. Declaring the same default twice is a binding fault.
  pub fn with_default(
    mut self,
    name: impl Into<String>,
    value: Value,
  ) -> Result<Self, BindError> {
    self.defaults.insert(name, value)?;
    Ok(self)
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// Declared positional-argument names, in declaration order.
  pub fn arg_names(&self) -> &[String] {
    &self.arg_names
  }

  pub fn single_return_name(&self) -> &str {
    self.single_return_name
  }

  /// Bind positional arguments to the declared names, in declaration
  /// order. Fails if more positional arguments are supplied than declared
  /// names exist.
  pub fn args_to_map(&self, args: &[Value]) -> Result<InputMapping, BindError> {
    if args.len() > self.arg_names.len() {
      return Err(BindError::TooManyArguments {
        supplied: args.len(),
        declared: self.arg_names.len(),
      });
    }

    let mut mapping = InputMapping::new();
    for (name, value) in self.arg_names.iter().zip(args) {
      mapping.insert(name.clone(), value.clone())?;
    }
    Ok(mapping)
  }

  /// Merge keyword inputs with positional arguments, in that order, then
  /// fill in declared defaults for names the caller left out.
  pub fn bind(&self, args: &[Value], kwargs: &InputMapping) -> Result<InputMapping, BindError> {
    let mut inputs = InputMapping::new();

    for (name, value) in kwargs.iter() {
      inputs.insert(name.clone(), value.clone())?;
    }
    for (name, value) in self.args_to_map(args)?.iter() {
      inputs.insert(name.clone(), value.clone())?;
    }
    for (name, value) in self.defaults.iter() {
      if !inputs.contains(name) {
        inputs.set(name.clone(), value.clone());
      }
    }

    Ok(inputs)
  }

  /// Execute the wrapped function against bound inputs.
  pub fn call(&self, inputs: &InputMapping) -> ProcessOutput {
    (self.func)(inputs)
  }
}

impl fmt::Debug for ProcessDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ProcessDescriptor")
      .field("name", &self.name)
      .field("arg_names", &self.arg_names)
      .field("defaults", &self.defaults)
      .finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn add_descriptor() -> ProcessDescriptor {
    ProcessDescriptor::build("add", &["a", "b"], |inputs| {
      let a = inputs.get("a").and_then(Value::as_i64).unwrap_or(0);
      let b = inputs.get("b").and_then(Value::as_i64).unwrap_or(0);
      ProcessOutput::Value(json!(a + b))
    })
  }

  #[test]
  fn test_bind_merges_kwargs_then_positionals() {
    let descriptor = add_descriptor();
    let kwargs = InputMapping::from_pairs([("tag", json!("demo"))]).unwrap();

    let inputs = descriptor.bind(&[json!(1), json!(2)], &kwargs).unwrap();

    assert_eq!(inputs.len(), 3);
    assert_eq!(inputs.get("a"), Some(&json!(1)));
    assert_eq!(inputs.get("b"), Some(&json!(2)));
    assert_eq!(inputs.get("tag"), Some(&json!("demo")));
  }

  #[test]
  fn test_too_many_positionals_fail_loudly() {
    let descriptor = add_descriptor();

    let err = descriptor
      .bind(&[json!(1), json!(2), json!(3)], &InputMapping::new())
      .unwrap_err();

    assert_eq!(
      err,
      BindError::TooManyArguments {
        supplied: 3,
        declared: 2
      }
    );
  }

  #[test]
  fn test_keyword_colliding_with_positional_is_rejected() {
    let descriptor = add_descriptor();
    let kwargs = InputMapping::from_pairs([("a", json!(9))]).unwrap();

    let err = descriptor.bind(&[json!(1), json!(2)], &kwargs).unwrap_err();

    assert_eq!(
      err,
      BindError::DuplicateInput {
        name: "a".to_string()
      }
    );
  }

  #[test]
  fn test_defaults_fill_in_without_overriding() {
    let descriptor = add_descriptor()
      .with_default("verbose", json!(false))
      .unwrap();

    let kwargs = InputMapping::from_pairs([("verbose", json!(true))]).unwrap();
    let inputs = descriptor.bind(&[json!(1)], &kwargs).unwrap();
    assert_eq!(inputs.get("verbose"), Some(&json!(true)));

    let inputs = descriptor.bind(&[json!(1)], &InputMapping::new()).unwrap();
    assert_eq!(inputs.get("verbose"), Some(&json!(false)));
  }

  #[test]
  fn test_build_does_not_execute_the_function() {
    use std::sync::atomic::{AtomicBool, Ordering};

    static CALLED: AtomicBool = AtomicBool::new(false);

    let descriptor = ProcessDescriptor::build("probe", &[], |_| {
      CALLED.store(true, Ordering::SeqCst);
      ProcessOutput::Value(json!(null))
    });

    assert!(!CALLED.load(Ordering::SeqCst));
    descriptor.call(&InputMapping::new());
    assert!(CALLED.load(Ordering::SeqCst));
  }
}
