//! Engine errors.

use lupine_process::BindError;

/// Errors surfaced by the engine API itself.
///
/// Process failures are not represented here. They travel through the
/// normal result channel as `ProcessFailure` values so downstream
/// orchestration can pattern-match on their exit codes.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
  /// Input binding failed; nothing was scheduled.
  #[error("input binding failed: {source}")]
  Bind {
    #[from]
    source: BindError,
  },

  /// The engine terminated before the handle reached a terminal state.
  ///
  /// This is the liveness fault: the unit of work was dropped (engine
  /// shutdown, panicked task) and the handle will never resolve.
  #[error("engine terminated before the handle resolved")]
  Terminated,
}
