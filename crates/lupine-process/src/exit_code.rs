//! Process exit codes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a process or parser could not produce results.
///
/// This set is closed. Each code maps to a stable status number and a
/// stable label so it can be reported across process boundaries without
/// carrying the originating error value along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExitCode {
  /// The expected retrieved-output container is absent.
  #[serde(rename = "ERROR_NO_RETRIEVED_FOLDER")]
  NoRetrievedFolder,

  /// The named output file could not be opened or read.
  #[serde(rename = "ERROR_READING_OUTPUT_FILE")]
  ReadingOutputFile,

  /// The output was present but not interpretable as the expected type.
  #[serde(rename = "ERROR_INVALID_OUTPUT")]
  InvalidOutput,

  /// The output was interpretable but violates the configured sign policy.
  #[serde(rename = "ERROR_NEGATIVE_NUMBER")]
  NegativeNumber,
}

impl ExitCode {
  /// Stable status number for cross-process reporting.
  pub fn status(self) -> u32 {
    match self {
      ExitCode::NoRetrievedFolder => 300,
      ExitCode::ReadingOutputFile => 310,
      ExitCode::InvalidOutput => 320,
      ExitCode::NegativeNumber => 410,
    }
  }

  /// Stable label for cross-process reporting.
  pub fn label(self) -> &'static str {
    match self {
      ExitCode::NoRetrievedFolder => "ERROR_NO_RETRIEVED_FOLDER",
      ExitCode::ReadingOutputFile => "ERROR_READING_OUTPUT_FILE",
      ExitCode::InvalidOutput => "ERROR_INVALID_OUTPUT",
      ExitCode::NegativeNumber => "ERROR_NEGATIVE_NUMBER",
    }
  }
}

impl fmt::Display for ExitCode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} ({})", self.label(), self.status())
  }
}

/// A failed process result: the stable exit code plus a short diagnostic.
///
/// This is a first-class return value, not an error type. It never crosses
/// the submit/await boundary as a raised error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessFailure {
  pub code: ExitCode,
  pub message: String,
}

impl ProcessFailure {
  pub fn new(code: ExitCode, message: impl Into<String>) -> Self {
    Self {
      code,
      message: message.into(),
    }
  }
}

impl fmt::Display for ProcessFailure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.code, self.message)
  }
}
