//! Crate-wide error type

use crate::config::ConfigError;
use crate::data::DataError;
use crate::partition::PartitionError;
use crate::predict::PredictError;
use crate::storage::registry::RegistryError;
use crate::tracking::TrackingError;

/// Any failure of a pipeline step
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Partition(#[from] PartitionError),

    #[error(transparent)]
    Tracking(#[from] TrackingError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Predict(#[from] PredictError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result alias for pipeline steps
pub type Result<T> = std::result::Result<T, Error>;
