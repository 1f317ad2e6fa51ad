//! Train/test partitioning
//!
//! Splits a dataset into disjoint train and test subsets with a seeded
//! generator, stratified by label by default so both subsets keep the class
//! proportions of the source. The identifier column is dropped; outputs hold
//! the feature columns followed by the label column.
//!
//! # Example
//!
//! ```
//! use tabprep::data::{Cell, Dataset, DatasetSchema};
//! use tabprep::partition::{partition, SplitConfig};
//!
//! let rows = (0..20)
//!     .map(|i| vec![Cell::Number(i as f64), Cell::Number(0.5), Cell::from(if i % 2 == 0 { "a" } else { "b" })])
//!     .collect();
//! let dataset = Dataset::new(vec!["Id".into(), "x".into(), "Species".into()], rows).unwrap();
//!
//! let split = partition(&dataset, &DatasetSchema::default(), &SplitConfig::new(0.25, 42)).unwrap();
//! assert_eq!(split.test.row_count(), 5);
//! assert_eq!(split.train.row_count(), 15);
//! assert_eq!(split.train.columns(), &["x".to_string(), "Species".to_string()]);
//! ```

mod error;
mod stratified;

#[cfg(test)]
mod tests;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

pub use error::{PartitionError, Result};

use crate::data::{write_csv, DataError, Dataset, DatasetLoader, DatasetSchema};
use crate::tracking::storage::ArtifactEntry;
use crate::tracking::{self, RunRecorder};

/// Tag value identifying preprocessing runs
pub const STEP_TAG: &str = "data_preprocessing";

/// Artifact bundle name of the written partition files
pub const ARTIFACT_PATH: &str = "processed_data";

/// File name of the training subset
pub const TRAIN_FILE: &str = "train.csv";

/// File name of the test subset
pub const TEST_FILE: &str = "test.csv";

/// How rows are assigned to subsets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitStrategy {
    /// Shuffle and cut each label class independently
    #[default]
    Stratified,
    /// Shuffle all rows together, ignoring labels
    Random,
}

impl SplitStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            SplitStrategy::Stratified => "stratified",
            SplitStrategy::Random => "random",
        }
    }
}

impl fmt::Display for SplitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Fraction of rows in the test subset, in (0, 1)
    #[serde(default = "default_test_ratio")]
    pub test_ratio: f64,
    /// Generator seed
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub strategy: SplitStrategy,
}

fn default_test_ratio() -> f64 {
    0.25
}

fn default_seed() -> u64 {
    42
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_ratio: default_test_ratio(),
            seed: default_seed(),
            strategy: SplitStrategy::default(),
        }
    }
}

impl SplitConfig {
    /// Stratified split with the given test ratio and seed
    pub fn new(test_ratio: f64, seed: u64) -> Self {
        Self {
            test_ratio,
            seed,
            strategy: SplitStrategy::Stratified,
        }
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: SplitStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Disjoint train and test subsets of one dataset
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub train: Dataset,
    pub test: Dataset,
}

impl Partition {
    /// Write `train.csv` and `test.csv` into `dir`, creating it if needed
    ///
    /// Returns the paths of the train and test files.
    pub fn write_csv(&self, dir: &Path) -> std::result::Result<(PathBuf, PathBuf), DataError> {
        fs::create_dir_all(dir)?;
        let train_path = dir.join(TRAIN_FILE);
        let test_path = dir.join(TEST_FILE);
        write_csv(&self.train, &train_path)?;
        write_csv(&self.test, &test_path)?;
        Ok((train_path, test_path))
    }
}

/// Split `dataset` according to `config`
///
/// Identical inputs always produce identical row membership.
pub fn partition(
    dataset: &Dataset,
    schema: &DatasetSchema,
    config: &SplitConfig,
) -> Result<Partition> {
    if !(config.test_ratio > 0.0 && config.test_ratio < 1.0) {
        return Err(PartitionError::InvalidRatio(config.test_ratio));
    }
    if dataset.is_empty() {
        return Err(PartitionError::EmptyDataset);
    }
    let label_idx = dataset
        .column_index(&schema.label_column)
        .ok_or_else(|| PartitionError::MissingColumn(schema.label_column.clone()))?;

    let rows = dataset.row_count();
    let n_test = stratified::test_size(rows, config.test_ratio);
    if n_test == 0 || n_test >= rows {
        return Err(PartitionError::InfeasibleSizes {
            rows,
            test_rows: n_test,
        });
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let assignment = match config.strategy {
        SplitStrategy::Stratified => {
            let labels = dataset
                .rows()
                .iter()
                .enumerate()
                .map(|(row, cells)| {
                    cells[label_idx]
                        .key()
                        .ok_or(PartitionError::MissingLabel { row })
                })
                .collect::<Result<Vec<_>>>()?;
            stratified::stratified(&labels, n_test, config.test_ratio, &mut rng)?
        }
        SplitStrategy::Random => stratified::random(rows, n_test, &mut rng),
    };

    let columns = schema.partition_columns(dataset)?;
    Ok(Partition {
        train: dataset.select(&columns, &assignment.train)?,
        test: dataset.select(&columns, &assignment.test)?,
    })
}

/// Log the split parameters and subset sizes on the open run
pub fn record_partition<R: RunRecorder>(
    partition: &Partition,
    config: &SplitConfig,
    recorder: &mut R,
) -> tracking::Result<()> {
    recorder.log_param("test_size", &config.test_ratio.to_string())?;
    recorder.log_param("random_state", &config.seed.to_string())?;
    recorder.log_param("split_strategy", config.strategy.as_str())?;
    recorder.log_metric("training_set_rows", partition.train.row_count() as f64)?;
    recorder.log_metric("test_set_rows", partition.test.row_count() as f64)?;
    Ok(())
}

/// What a completed preprocessing step produced
#[derive(Debug, Clone, PartialEq)]
pub struct SplitSummary {
    pub run_id: String,
    pub train_rows: usize,
    pub test_rows: usize,
    pub train_path: PathBuf,
    pub test_path: PathBuf,
    pub artifacts: Vec<ArtifactEntry>,
}

/// Preprocessing step against a loader: tag, load, split, write, record, upload
///
/// Returns `Ok(None)` when the source does not exist; in that case nothing
/// beyond the step tag is recorded and no files are written.
pub fn split_source<L, R>(
    loader: &L,
    source: &Path,
    schema: &DatasetSchema,
    config: &SplitConfig,
    output_dir: &Path,
    recorder: &mut R,
) -> crate::Result<Option<SplitSummary>>
where
    L: DatasetLoader + ?Sized,
    R: RunRecorder,
{
    recorder.set_tag("ml.step", STEP_TAG)?;

    let dataset = match loader.load(source) {
        Ok(dataset) => dataset,
        Err(DataError::MissingInputFile(_)) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let split = partition(&dataset, schema, config)?;
    let (train_path, test_path) = split.write_csv(output_dir)?;
    record_partition(&split, config, recorder)?;
    let artifacts = recorder.log_artifacts(output_dir, ARTIFACT_PATH)?;

    Ok(Some(SplitSummary {
        run_id: recorder.run_id().to_string(),
        train_rows: split.train.row_count(),
        test_rows: split.test.row_count(),
        train_path,
        test_path,
        artifacts,
    }))
}
