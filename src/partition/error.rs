//! Partitioning errors

use crate::data::DataError;

/// Errors from splitting a dataset
#[derive(Debug, thiserror::Error)]
pub enum PartitionError {
    #[error("Invalid test ratio: {0} (must be in (0.0, 1.0))")]
    InvalidRatio(f64),

    #[error("Dataset has no rows")]
    EmptyDataset,

    #[error("Label column not found: {0}")]
    MissingColumn(String),

    #[error("Row {row} has no label")]
    MissingLabel { row: usize },

    #[error("Cannot split {rows} rows into non-empty train/test subsets with {test_rows} test rows")]
    InfeasibleSizes { rows: usize, test_rows: usize },

    #[error(
        "Stratified split infeasible: class '{class}' has {members} member(s), \
         too few to appear in both subsets at test ratio {ratio}"
    )]
    StratificationInfeasible {
        class: String,
        members: usize,
        ratio: f64,
    },

    #[error(transparent)]
    Data(#[from] DataError),
}

/// Result alias for partition operations
pub type Result<T> = std::result::Result<T, PartitionError>;
