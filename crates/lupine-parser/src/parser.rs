//! Parser for arithmetic-add process output.

use futures::TryStreamExt;
use serde_json::json;
use tracing::debug;

use lupine_process::{ExitCode, OutputMapping, ProcessFailure};
use lupine_repository::{Error as StoreError, Store};

use crate::settings::Settings;

/// Name under which the parsed value is published.
pub const OUTPUT_NAME: &str = "sum";

/// Default name of the captured stdout file in the retrieved folder.
pub const DEFAULT_OUTPUT_FILENAME: &str = "stdout";

/// Parses the captured standard output of an arithmetic-add process.
///
/// The checks run in a fixed order and each one short-circuits with its
/// own exit code: retrieved-folder presence, file readability, integer
/// parseability, then the sign policy. Only when all pass is the value
/// published under [`OUTPUT_NAME`].
#[derive(Debug, Clone)]
pub struct AddParser {
  output_filename: String,
  settings: Option<Settings>,
}

impl AddParser {
  pub fn new(output_filename: impl Into<String>) -> Self {
    Self {
      output_filename: output_filename.into(),
      settings: None,
    }
  }

  /// Attach optional settings. Without them every lookup uses its default.
  pub fn with_settings(mut self, settings: Settings) -> Self {
    self.settings = Some(settings);
    self
  }

  /// Parse the retrieved output into a named-output mapping.
  ///
  /// Deterministic given the stream contents and the `allow_negative`
  /// policy; the only side effect is consuming the stream.
  pub async fn parse(
    &self,
    retrieved: Option<&dyn Store>,
  ) -> Result<OutputMapping, ProcessFailure> {
    let Some(retrieved) = retrieved else {
      return Err(ProcessFailure::new(
        ExitCode::NoRetrievedFolder,
        "no retrieved output folder attached to the process",
      ));
    };

    let contents = match self.read_output(retrieved).await {
      Ok(contents) => contents,
      Err(e) => {
        return Err(ProcessFailure::new(
          ExitCode::ReadingOutputFile,
          format!("could not read '{}': {}", self.output_filename, e),
        ));
      }
    };

    let Some(sum) = parse_stdout(&contents) else {
      return Err(ProcessFailure::new(
        ExitCode::InvalidOutput,
        format!(
          "'{}' does not contain a single integer",
          self.output_filename
        ),
      ));
    };

    // The same number is valid or invalid purely based on configuration;
    // zero passes. Absent settings or an absent key mean permissive.
    let allow_negative = self
      .settings
      .as_ref()
      .map(|s| s.get_bool("allow_negative", true))
      .unwrap_or(true);

    if !allow_negative && sum < 0 {
      return Err(ProcessFailure::new(
        ExitCode::NegativeNumber,
        format!("negative sum {} rejected by settings", sum),
      ));
    }

    debug!(sum, "parsed process output");

    Ok(OutputMapping::single(OUTPUT_NAME, json!(sum)))
  }

  async fn read_output(&self, retrieved: &dyn Store) -> Result<Vec<u8>, StoreError> {
    let mut stream = retrieved.open(&self.output_filename).await?;

    let mut contents = Vec::new();
    while let Some(chunk) = stream.try_next().await? {
      contents.extend_from_slice(&chunk);
    }
    Ok(contents)
  }
}

/// Interpret captured stdout as a single integer.
///
/// Returns `None` when the trimmed contents are not a valid integer.
pub fn parse_stdout(contents: &[u8]) -> Option<i64> {
  let text = std::str::from_utf8(contents).ok()?;
  text.trim().parse().ok()
}
