//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! tabprep validate --data Iris.csv
//! tabprep split --test-size 0.25 --seed 42 --output-dir processed_data
//! tabprep registry register iris-classifier-prod demos/centroid_model.json
//! tabprep registry promote iris-classifier-prod 1 Development
//! tabprep predict --uri models:/iris-classifier-prod/Staging
//! tabprep runs list --experiment "Iris Classification - Data Preprocessing"
//! ```

mod core;


pub use self::core::{
    apply_global_overrides, apply_predict_overrides, apply_split_overrides,
    apply_validate_overrides, parse_args, Cli, Command, PredictArgs, RegistryArgs,
    RegistryCommand, RunsArgs, RunsCommand, SplitArgs, ValidateArgs,
};
