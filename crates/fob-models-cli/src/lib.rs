//! Command-line front end for [`fob_models`].
//!
//! `fob-models [OPTIONS] <PATHS>...` scans the given files and directories
//! for TypeScript sources, builds their model graph and prints it as JSON.
//!
//! - [`cli`] - argument parsing
//! - [`sources`] - source discovery
//! - [`run`] - the build itself
//! - [`logger`] - tracing setup
//! - [`error`] - error types and miette conversion

pub mod cli;
pub mod error;
pub mod logger;
pub mod run;
pub mod sources;

pub use error::{CliError, Result};
