//! Execution engine implementation.

use lupine_process::{
  InputMapping, OutputMapping, ProcessDescriptor, ProcessFailure, ProcessOutput, Resolved,
  resolve,
};
use serde_json::Value;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::error::EngineError;
use crate::handle::{ExecutionHandle, HandleState, ProcessOutcome};

/// Final result of a synchronous run.
///
/// Failures travel through this type rather than through `Err`, so callers
/// can pattern-match on the exit code the same way they would on a value.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
  /// A lone return value, unwrapped per the single-return rule.
  Value(Value),
  /// The full named-output mapping.
  Mapping(OutputMapping),
  /// The process surfaced a structured failure.
  Failed(ProcessFailure),
}

/// The execution engine.
///
/// Constructed once per run and passed explicitly to callers; there is no
/// ambient process-wide engine. `shutdown` cancels units of work that have
/// not started yet and is the cancellation extension point.
pub struct ExecutionEngine {
  cancel: CancellationToken,
}

impl ExecutionEngine {
  pub fn new() -> Self {
    Self {
      cancel: CancellationToken::new(),
    }
  }

  /// Schedule the described unit of work.
  ///
  /// Never blocks the submitting context. The spawned task writes the
  /// handle's terminal state exactly once; independent submissions run
  /// concurrently with each other and with the submitter.
  pub fn submit(&self, descriptor: ProcessDescriptor, inputs: InputMapping) -> ExecutionHandle {
    let process_id = uuid::Uuid::new_v4().to_string();
    let (tx, rx) = watch::channel(HandleState::Pending);
    let cancel = self.cancel.clone();

    info!(
      process_id = %process_id,
      process = %descriptor.name(),
      inputs = inputs.len(),
      "process_submitted"
    );

    let id = process_id.clone();
    tokio::task::spawn_blocking(move || {
      if cancel.is_cancelled() {
        // Dropping the sender while pending surfaces to waiters as
        // EngineError::Terminated.
        return;
      }

      let state = match descriptor.call(&inputs) {
        ProcessOutput::Value(value) => HandleState::Resolved(OutputMapping::single(
          descriptor.single_return_name(),
          value,
        )),
        ProcessOutput::Mapping(outputs) => HandleState::Resolved(outputs),
        ProcessOutput::Failure(failure) => HandleState::Failed(failure),
      };

      match &state {
        HandleState::Resolved(outputs) => {
          info!(process_id = %id, outputs = outputs.len(), "process_completed");
        }
        HandleState::Failed(failure) => {
          error!(process_id = %id, code = %failure.code, "process_failed");
        }
        HandleState::Pending => {}
      }

      let _ = tx.send(state);
    });

    ExecutionHandle::new(process_id, rx)
  }

  /// Bind, submit, wait, and resolve in one call.
  ///
  /// This is the synchronous mode: the asynchronous mode is `submit` plus
  /// holding the handle. Binding faults are returned before anything is
  /// scheduled; process failures come back as [`RunOutcome::Failed`].
  pub async fn run(
    &self,
    descriptor: ProcessDescriptor,
    args: &[Value],
    kwargs: &InputMapping,
  ) -> Result<RunOutcome, EngineError> {
    let inputs = descriptor.bind(args, kwargs)?;
    let handle = self.submit(descriptor.clone(), inputs);

    match handle.wait().await? {
      ProcessOutcome::Resolved(outputs) => Ok(match resolve(&descriptor, outputs) {
        Resolved::Value(value) => RunOutcome::Value(value),
        Resolved::Mapping(outputs) => RunOutcome::Mapping(outputs),
      }),
      ProcessOutcome::Failed(failure) => Ok(RunOutcome::Failed(failure)),
    }
  }

  /// Stop accepting work. Units that have not started yet are dropped and
  /// their handles surface [`EngineError::Terminated`].
  pub fn shutdown(&self) {
    self.cancel.cancel();
  }
}

impl Default for ExecutionEngine {
  fn default() -> Self {
    Self::new()
  }
}
