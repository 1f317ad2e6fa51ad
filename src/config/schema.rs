//! YAML schema for pipeline configuration
//!
//! Every field has a default, so an empty document (or no file at all)
//! describes the stock iris pipeline.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::data::DatasetSchema;
use crate::partition::SplitConfig;
use crate::predict::LabelMap;
use crate::storage::registry::{ModelRef, ModelStage};
use crate::validation::ValidationPolicy;

/// Complete pipeline specification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineSpec {
    #[serde(default)]
    pub data: DataSpec,

    #[serde(default)]
    pub validation: ValidationPolicy,

    #[serde(default)]
    pub split: SplitSpec,

    #[serde(default)]
    pub tracking: TrackingSpec,

    #[serde(default)]
    pub registry: RegistrySpec,

    /// Class index to name mapping used by `predict`
    #[serde(default)]
    pub labels: LabelMap,
}

/// Input dataset location and column roles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSpec {
    #[serde(default = "default_data_path")]
    pub path: PathBuf,

    /// Field separator
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    #[serde(flatten)]
    pub schema: DatasetSchema,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("Iris.csv")
}

fn default_delimiter() -> char {
    ','
}

impl Default for DataSpec {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            delimiter: default_delimiter(),
            schema: DatasetSchema::default(),
        }
    }
}

/// Split parameters plus where the subsets are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitSpec {
    #[serde(flatten)]
    pub config: SplitConfig,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("processed_data")
}

impl Default for SplitSpec {
    fn default() -> Self {
        Self {
            config: SplitConfig::default(),
            output_dir: default_output_dir(),
        }
    }
}

/// Experiment tracking store and experiment names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingSpec {
    #[serde(default = "default_tracking_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_validation_experiment")]
    pub validation_experiment: String,

    #[serde(default = "default_preprocessing_experiment")]
    pub preprocessing_experiment: String,
}

fn default_tracking_dir() -> PathBuf {
    PathBuf::from("mlruns")
}

fn default_validation_experiment() -> String {
    "Iris Classification - Data Validation".to_string()
}

fn default_preprocessing_experiment() -> String {
    "Iris Classification - Data Preprocessing".to_string()
}

impl Default for TrackingSpec {
    fn default() -> Self {
        Self {
            dir: default_tracking_dir(),
            validation_experiment: default_validation_experiment(),
            preprocessing_experiment: default_preprocessing_experiment(),
        }
    }
}

/// Model registry location and the model `predict` uses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrySpec {
    #[serde(default = "default_registry_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_model_name")]
    pub model_name: String,

    /// Stage to resolve when no version is pinned
    #[serde(default = "default_stage")]
    pub stage: ModelStage,

    /// Pinned version; takes precedence over `stage`
    #[serde(default)]
    pub version: Option<u32>,
}

fn default_registry_dir() -> PathBuf {
    PathBuf::from("model_registry")
}

fn default_model_name() -> String {
    "iris-classifier-prod".to_string()
}

fn default_stage() -> ModelStage {
    ModelStage::Staging
}

impl Default for RegistrySpec {
    fn default() -> Self {
        Self {
            dir: default_registry_dir(),
            model_name: default_model_name(),
            stage: default_stage(),
            version: None,
        }
    }
}

impl RegistrySpec {
    /// The model reference these settings denote
    pub fn model_ref(&self) -> ModelRef {
        match self.version {
            Some(version) => ModelRef::version(&self.model_name, version),
            None => ModelRef::stage(&self.model_name, self.stage),
        }
    }
}
