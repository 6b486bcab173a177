//! Construction-time contract violations.

use thiserror::Error;

/// Errors raised while binding caller inputs to a descriptor.
///
/// These are programming-contract violations: they are fatal at
/// construction time and nothing gets scheduled.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindError {
  /// More positional arguments were supplied than declared names exist.
  #[error("too many positional arguments: {supplied} supplied, {declared} declared")]
  TooManyArguments { supplied: usize, declared: usize },

  /// The same input name was supplied more than once.
  #[error("duplicate input '{name}'")]
  DuplicateInput { name: String },
}

/// Errors raised while publishing process outputs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PublishError {
  /// An output name was published more than once per resolution.
  #[error("output '{name}' already published")]
  DuplicateOutput { name: String },
}
