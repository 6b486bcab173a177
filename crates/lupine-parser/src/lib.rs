//! Lupine Parser
//!
//! This crate turns the captured output of an arithmetic-add process into
//! a typed result or a typed failure. The [`AddParser`] reads the process's
//! stdout file from a retrieved-output store and publishes the parsed sum,
//! short-circuiting with one exit code per failure mode along the way.

mod parser;
mod settings;

pub use parser::{AddParser, DEFAULT_OUTPUT_FILENAME, OUTPUT_NAME, parse_stdout};
pub use settings::Settings;
