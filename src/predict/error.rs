//! Prediction errors

use thiserror::Error;

/// Errors from resolving a model and running it
#[derive(Debug, Error)]
pub enum PredictError {
    /// The reference does not denote a loadable registered version
    #[error("Could not resolve model '{model}': {reason}")]
    ModelResolution { model: String, reason: String },

    /// The artifact was found but could not be read or is malformed
    #[error("Could not load model artifact '{uri}': {reason}")]
    ModelLoad { uri: String, reason: String },

    /// The model document is malformed or inconsistent
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Model returned no prediction")]
    EmptyPrediction,
}

/// Result alias for prediction operations
pub type Result<T> = std::result::Result<T, PredictError>;
