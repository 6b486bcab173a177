//! Lupine Process
//!
//! This crate contains the shared process data model for lupine: a
//! [`ProcessDescriptor`] wraps a plain function together with its declared
//! inputs, an [`InputMapping`] carries the bound inputs into execution, and
//! an [`OutputMapping`] carries the named outputs back out.
//!
//! Failures a process can recover from are not exceptions here. They are
//! [`ProcessFailure`] values built from a closed set of [`ExitCode`]s, and
//! they travel through the normal result channel so callers can pattern
//! match on them.

mod descriptor;
mod error;
mod exit_code;
mod inputs;
mod outputs;
mod resolve;

pub use descriptor::{ProcessDescriptor, ProcessFn, ProcessOutput, SINGLE_RETURN_NAME};
pub use error::{BindError, PublishError};
pub use exit_code::{ExitCode, ProcessFailure};
pub use inputs::InputMapping;
pub use outputs::OutputMapping;
pub use resolve::{Resolved, resolve};
