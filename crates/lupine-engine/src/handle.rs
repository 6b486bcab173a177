//! Execution handles.

use lupine_process::{OutputMapping, ProcessFailure};
use tokio::sync::watch;
use tracing::instrument;

use crate::error::EngineError;

/// Observable state of a scheduled unit of work.
///
/// Transitions are linear: `Pending` moves to exactly one of the terminal
/// states and never back. The terminal payload is written once through a
/// single-writer channel, so an observer never sees it partially written.
#[derive(Debug, Clone, PartialEq)]
pub enum HandleState {
  Pending,
  Resolved(OutputMapping),
  Failed(ProcessFailure),
}

impl HandleState {
  pub fn is_terminal(&self) -> bool {
    !matches!(self, HandleState::Pending)
  }
}

/// Terminal result of a unit of work.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessOutcome {
  Resolved(OutputMapping),
  Failed(ProcessFailure),
}

/// A handle to one scheduled unit of work.
///
/// Each submission yields exactly one handle. `state` can be polled from
/// any context; once a terminal state is reached, repeated queries return
/// the identical payload. `wait` consumes the handle for blocking
/// resolution.
#[derive(Debug)]
pub struct ExecutionHandle {
  process_id: String,
  state: watch::Receiver<HandleState>,
}

impl ExecutionHandle {
  pub(crate) fn new(process_id: String, state: watch::Receiver<HandleState>) -> Self {
    Self { process_id, state }
  }

  pub fn process_id(&self) -> &str {
    &self.process_id
  }

  /// Snapshot of the current state without blocking.
  pub fn state(&self) -> HandleState {
    self.state.borrow().clone()
  }

  /// Block the calling context until the handle reaches a terminal state.
  ///
  /// A process failure is part of the normal outcome, not an error; the
  /// error case is reserved for the engine dropping the unit of work
  /// before it resolved.
  #[instrument(name = "process_wait", skip(self), fields(process_id = %self.process_id))]
  pub async fn wait(mut self) -> Result<ProcessOutcome, EngineError> {
    loop {
      match self.state.borrow_and_update().clone() {
        HandleState::Pending => {}
        HandleState::Resolved(outputs) => return Ok(ProcessOutcome::Resolved(outputs)),
        HandleState::Failed(failure) => return Ok(ProcessOutcome::Failed(failure)),
      }

      if self.state.changed().await.is_err() {
        return Err(EngineError::Terminated);
      }
    }
  }
}
