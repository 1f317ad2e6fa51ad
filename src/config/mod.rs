//! Declarative pipeline configuration
//!
//! A YAML document describes where the dataset lives, which columns play
//! which role, how to split, where runs and models are stored, and which
//! model `predict` should exercise. Command-line flags override it.

pub mod cli;
mod loader;
pub mod schema;
mod validate;

pub use cli::{
    apply_global_overrides, apply_predict_overrides, apply_split_overrides,
    apply_validate_overrides, parse_args, Cli, Command, PredictArgs, RegistryArgs,
    RegistryCommand, RunsArgs, RunsCommand, SplitArgs, ValidateArgs,
};
pub use loader::{load_config, load_or_default};
pub use schema::{DataSpec, PipelineSpec, RegistrySpec, SplitSpec, TrackingSpec};
pub use validate::{validate_spec, ConfigError};
