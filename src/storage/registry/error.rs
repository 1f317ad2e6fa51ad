//! Registry error types

use thiserror::Error;

use super::stage::ModelStage;

/// Registry errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Version not found: {0} v{1}")]
    VersionNotFound(String, u32),

    #[error("No version of model '{name}' is in stage {stage}")]
    NoVersionInStage { name: String, stage: ModelStage },

    #[error("Invalid stage transition from {0} to {1}")]
    InvalidTransition(ModelStage, ModelStage),

    #[error("Unknown model stage: {0}")]
    UnknownStage(String),

    #[error("Invalid model reference '{uri}': {reason}")]
    InvalidReference { uri: String, reason: String },

    #[error("Registry I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Registry file is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;
