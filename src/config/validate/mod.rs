//! Configuration validation
//!
//! Checks a pipeline specification for consistency before any step runs.

mod error;
mod validator;

#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use validator::validate_spec;
