//! Tabular data access
//!
//! A [`Dataset`] is an ordered set of named columns and rows of [`Cell`]s,
//! usually read from a CSV file with a header row. Loading goes through the
//! [`DatasetLoader`] trait so callers can swap the filesystem for in-memory
//! fixtures.
//!
//! # Example
//!
//! ```
//! use tabprep::data::{Cell, CsvLoader, DatasetSchema};
//!
//! let csv = "Id,SepalLengthCm,Species\n1,5.1,Iris-setosa\n2,,Iris-virginica\n";
//! let dataset = CsvLoader::new().read_from(csv.as_bytes(), "inline").unwrap();
//! assert_eq!(dataset.row_count(), 2);
//! assert_eq!(dataset.missing_count(), 1);
//! assert_eq!(dataset.rows()[0][1], Cell::Number(5.1));
//!
//! let schema = DatasetSchema::default();
//! let features = schema.feature_columns_for(&dataset).unwrap();
//! assert_eq!(features, vec!["SepalLengthCm".to_string()]);
//! ```

mod cell;
mod dataset;
mod error;
mod loader;
mod writer;

pub use cell::{Cell, NA_TOKENS};
pub use dataset::{Dataset, DatasetSchema, DEFAULT_ID_COLUMN, DEFAULT_LABEL_COLUMN};
pub use error::{DataError, Result};
pub use loader::{CsvLoader, DatasetLoader, InMemoryLoader};
pub use writer::write_csv;
