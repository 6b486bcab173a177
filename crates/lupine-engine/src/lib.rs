//! Lupine Engine
//!
//! This crate provides the [`ExecutionEngine`], which accepts a process
//! descriptor with bound inputs and schedules it as a single unit of work.
//! Submission returns an [`ExecutionHandle`] immediately; the caller
//! decides whether to hold the handle (asynchronous mode) or wait on it
//! (synchronous mode). A handle resolves exactly once, to a named-output
//! mapping or to a structured process failure.

mod engine;
mod error;
mod handle;

pub use engine::{ExecutionEngine, RunOutcome};
pub use error::EngineError;
pub use handle::{ExecutionHandle, HandleState, ProcessOutcome};
