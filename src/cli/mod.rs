//! Command-line front end
//!
//! Thin handlers that load the pipeline configuration, run one step and
//! print its results.

mod commands;
pub(crate) mod logging;

pub use commands::run_command;
pub use logging::LogLevel;

// Re-export Cli from config for convenience
pub use crate::config::Cli;
