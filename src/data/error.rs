//! Data access errors

/// Errors from loading, shaping or writing datasets
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("The file '{0}' was not found")]
    MissingInputFile(String),

    #[error("CSV error in {origin}: {source}")]
    Csv {
        origin: String,
        #[source]
        source: csv::Error,
    },

    #[error("Column not found: {0}")]
    MissingColumn(String),

    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Dataset has no rows")]
    EmptyDataset,

    #[error("Non-numeric value in column '{column}' at row {row}")]
    NotNumeric { column: String, row: usize },

    #[error("Row index {index} out of range ({rows} rows)")]
    RowOutOfRange { index: usize, rows: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    pub(crate) fn csv(origin: impl Into<String>, source: csv::Error) -> Self {
        DataError::Csv {
            origin: origin.into(),
            source,
        }
    }
}

/// Result alias for data operations
pub type Result<T> = std::result::Result<T, DataError>;
