//! Core CLI types - Cli, Command, and argument structs

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::PipelineSpec;
use crate::partition::SplitStrategy;
use crate::storage::registry::{ModelRef, ModelStage};

/// tabprep: dataset validation, stratified splitting and model smoke tests
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "tabprep")]
#[command(version)]
#[command(
    about = "Validate tabular datasets, split them into stratified train/test sets, and smoke-test registered models"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Pipeline configuration file (YAML)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the experiment tracking directory
    #[arg(long, global = true, value_name = "DIR")]
    pub tracking_dir: Option<PathBuf>,

    /// Override the model registry directory
    #[arg(long, global = true, value_name = "DIR")]
    pub registry_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Check a dataset's shape, class count and missing values
    Validate(ValidateArgs),

    /// Split a dataset into train.csv and test.csv
    Split(SplitArgs),

    /// Run one example through a registered model
    Predict(PredictArgs),

    /// Manage registered models
    Registry(RegistryArgs),

    /// Inspect tracked runs
    Runs(RunsArgs),
}

/// Arguments for the validate command
#[derive(Args, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Override the dataset path
    #[arg(short, long, value_name = "CSV")]
    pub data: Option<PathBuf>,

    /// Override the minimum number of classes
    #[arg(long)]
    pub min_classes: Option<usize>,
}

/// Arguments for the split command
#[derive(Args, Debug, Clone, PartialEq)]
pub struct SplitArgs {
    /// Override the dataset path
    #[arg(short, long, value_name = "CSV")]
    pub data: Option<PathBuf>,

    /// Fraction of rows in the test subset
    #[arg(short, long)]
    pub test_size: Option<f64>,

    /// Random seed for reproducibility
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Override the output directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Stratify by label (the default)
    #[arg(long, conflicts_with = "no_stratify")]
    pub stratify: bool,

    /// Split without regard to labels
    #[arg(long)]
    pub no_stratify: bool,
}

/// Arguments for the predict command
#[derive(Args, Debug, Clone, PartialEq)]
pub struct PredictArgs {
    /// Full model reference, e.g. models:/iris-classifier-prod/Staging
    #[arg(long, conflicts_with_all = ["model", "version", "stage"])]
    pub uri: Option<ModelRef>,

    /// Registered model name
    #[arg(short, long)]
    pub model: Option<String>,

    /// Pin a model version
    #[arg(long, conflicts_with = "stage")]
    pub version: Option<u32>,

    /// Resolve the newest version in this stage
    #[arg(long)]
    pub stage: Option<ModelStage>,

    /// Dataset to take the example from
    #[arg(short, long, value_name = "CSV")]
    pub data: Option<PathBuf>,

    /// Row of the dataset to use
    #[arg(short, long, default_value_t = 0, conflicts_with = "features")]
    pub row: usize,

    /// Feature values instead of a dataset row (comma separated)
    #[arg(long, value_delimiter = ',', num_args = 1.., allow_negative_numbers = true)]
    pub features: Option<Vec<f64>>,

    /// Known label of --features (name or class index)
    #[arg(short, long, requires = "features")]
    pub label: Option<String>,
}

/// Arguments for the registry command
#[derive(Args, Debug, Clone, PartialEq)]
pub struct RegistryArgs {
    #[command(subcommand)]
    pub command: RegistryCommand,
}

/// Registry subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum RegistryCommand {
    /// Register a model artifact as a new version
    Register {
        /// Model name
        name: String,
        /// Path to the model file
        artifact: PathBuf,
    },

    /// Move a version to another stage
    Promote {
        name: String,
        version: u32,
        stage: ModelStage,
        /// Who is making the change
        #[arg(long)]
        user: Option<String>,
    },

    /// List models, or the versions of one model
    List {
        name: Option<String>,
    },

    /// Show the stage history of a model
    History {
        name: String,
    },
}

/// Arguments for the runs command
#[derive(Args, Debug, Clone, PartialEq)]
pub struct RunsArgs {
    #[command(subcommand)]
    pub command: RunsCommand,
}

/// Runs subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum RunsCommand {
    /// List runs of an experiment (every run when omitted)
    List {
        #[arg(short, long)]
        experiment: Option<String>,
    },

    /// Show one run in full
    Show {
        run_id: String,
    },
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Apply the global overrides to a PipelineSpec
pub fn apply_global_overrides(spec: &mut PipelineSpec, cli: &Cli) {
    if let Some(dir) = &cli.tracking_dir {
        spec.tracking.dir = dir.clone();
    }
    if let Some(dir) = &cli.registry_dir {
        spec.registry.dir = dir.clone();
    }
}

/// Apply validate overrides to a PipelineSpec
pub fn apply_validate_overrides(spec: &mut PipelineSpec, args: &ValidateArgs) {
    if let Some(data) = &args.data {
        spec.data.path = data.clone();
    }
    if let Some(min_classes) = args.min_classes {
        spec.validation.min_classes = min_classes;
    }
}

/// Apply split overrides to a PipelineSpec
pub fn apply_split_overrides(spec: &mut PipelineSpec, args: &SplitArgs) {
    if let Some(data) = &args.data {
        spec.data.path = data.clone();
    }
    if let Some(test_size) = args.test_size {
        spec.split.config.test_ratio = test_size;
    }
    if let Some(seed) = args.seed {
        spec.split.config.seed = seed;
    }
    if let Some(output_dir) = &args.output_dir {
        spec.split.output_dir = output_dir.clone();
    }
    if args.stratify {
        spec.split.config.strategy = SplitStrategy::Stratified;
    }
    if args.no_stratify {
        spec.split.config.strategy = SplitStrategy::Random;
    }
}

/// Apply predict overrides to a PipelineSpec
pub fn apply_predict_overrides(spec: &mut PipelineSpec, args: &PredictArgs) {
    if let Some(data) = &args.data {
        spec.data.path = data.clone();
    }
    if let Some(model) = &args.model {
        spec.registry.model_name = model.clone();
    }
    if let Some(stage) = args.stage {
        spec.registry.stage = stage;
        spec.registry.version = None;
    }
    if let Some(version) = args.version {
        spec.registry.version = Some(version);
    }
}
