//! Configuration error types

use std::path::PathBuf;

/// Errors from reading or checking a pipeline specification
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid test ratio: {0} (must be in (0.0, 1.0))")]
    InvalidTestRatio(f64),

    #[error("Invalid minimum class count: {0} (must be > 0)")]
    InvalidMinClasses(usize),

    #[error("Label column name cannot be empty")]
    EmptyLabelColumn,

    #[error("Column '{0}' cannot be both the identifier and the label")]
    IdIsLabel(String),

    #[error("Label column '{0}' cannot also be a feature column")]
    LabelIsFeature(String),

    #[error("Identifier column '{0}' cannot also be a feature column")]
    IdIsFeature(String),

    #[error("Feature column list cannot be empty")]
    EmptyFeatureColumns,

    #[error("Invalid delimiter {0:?} (must be a single ASCII character other than a quote or newline)")]
    InvalidDelimiter(char),

    #[error("Experiment name cannot be empty")]
    EmptyExperimentName,

    #[error("Model name cannot be empty")]
    EmptyModelName,
}
