//! Dataset loaders

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use super::cell::Cell;
use super::dataset::Dataset;
use super::error::{DataError, Result};

/// Capability to load a dataset from a source location
///
/// Implementations must report an absent source as
/// [`DataError::MissingInputFile`] so callers can treat it separately from
/// malformed data.
pub trait DatasetLoader {
    /// Load the dataset stored at `source`
    fn load(&self, source: &Path) -> Result<Dataset>;
}

/// CSV loader with a mandatory header row
#[derive(Debug, Clone)]
pub struct CsvLoader {
    delimiter: u8,
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different field delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parse CSV from any reader; `origin` is only used in error messages
    pub fn read_from<R: Read>(&self, input: R, origin: &str) -> Result<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .from_reader(input);

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| DataError::csv(origin, e))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| DataError::csv(origin, e))?;
            rows.push(record.iter().map(Cell::parse).collect());
        }

        Dataset::new(columns, rows)
    }
}

impl DatasetLoader for CsvLoader {
    fn load(&self, source: &Path) -> Result<Dataset> {
        let file = File::open(source).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => DataError::MissingInputFile(source.display().to_string()),
            _ => DataError::Io(e),
        })?;
        self.read_from(file, &source.display().to_string())
    }
}

/// Loader backed by a map of fixtures, for tests and embedding
#[derive(Debug, Default, Clone)]
pub struct InMemoryLoader {
    datasets: HashMap<PathBuf, Dataset>,
}

impl InMemoryLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a dataset under `source`
    #[must_use]
    pub fn with_dataset(mut self, source: impl Into<PathBuf>, dataset: Dataset) -> Self {
        self.datasets.insert(source.into(), dataset);
        self
    }
}

impl DatasetLoader for InMemoryLoader {
    fn load(&self, source: &Path) -> Result<Dataset> {
        self.datasets
            .get(source)
            .cloned()
            .ok_or_else(|| DataError::MissingInputFile(source.display().to_string()))
    }
}
