//! In-memory dataset and column roles

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::error::{DataError, Result};

/// Identifier column of the bundled Iris layout
pub const DEFAULT_ID_COLUMN: &str = "Id";

/// Label column of the bundled Iris layout
pub const DEFAULT_LABEL_COLUMN: &str = "Species";

/// Ordered rows sharing one column set
///
/// Every row holds exactly one cell per column; [`Dataset::new`] rejects
/// anything else.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Dataset {
    /// Build a dataset, checking column names are unique and rows are not ragged
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(DataError::DuplicateColumn(column.clone()));
            }
        }
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != columns.len() {
                return Err(DataError::RaggedRow {
                    row,
                    expected: columns.len(),
                    found: cells.len(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    /// Column names in file order
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in file order
    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, if present
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Position of a column, failing with [`DataError::MissingColumn`]
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))
    }

    /// Cells of one column, top to bottom
    pub fn column(&self, name: &str) -> Result<impl Iterator<Item = &Cell> + '_> {
        let idx = self.require_column(name)?;
        Ok(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Total number of missing cells across all rows and columns
    #[must_use]
    pub fn missing_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.is_missing())
            .count()
    }

    /// Project onto `columns` (in the given order) and keep `row_indices` (in the given order)
    pub fn select(&self, columns: &[String], row_indices: &[usize]) -> Result<Dataset> {
        let positions = columns
            .iter()
            .map(|c| self.require_column(c))
            .collect::<Result<Vec<_>>>()?;

        let mut rows = Vec::with_capacity(row_indices.len());
        for &index in row_indices {
            let source = self.rows.get(index).ok_or(DataError::RowOutOfRange {
                index,
                rows: self.rows.len(),
            })?;
            rows.push(positions.iter().map(|&p| source[p].clone()).collect());
        }

        Dataset::new(columns.to_vec(), rows)
    }

    /// Numeric values of `columns` for one row
    pub fn numeric_row(&self, index: usize, columns: &[String]) -> Result<Vec<f64>> {
        let row = self.rows.get(index).ok_or(DataError::RowOutOfRange {
            index,
            rows: self.rows.len(),
        })?;
        columns
            .iter()
            .map(|column| {
                let position = self.require_column(column)?;
                row[position].as_f64().ok_or_else(|| DataError::NotNumeric {
                    column: column.clone(),
                    row: index,
                })
            })
            .collect()
    }
}

/// Roles of the columns in a dataset
///
/// The identifier column carries no predictive meaning and is dropped before
/// splitting. When `feature_columns` is `None`, every column other than the
/// identifier and the label is a feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSchema {
    /// Row identifier column, if the file has one
    #[serde(default = "default_id_column")]
    pub id_column: Option<String>,

    /// Categorical label column
    #[serde(default = "default_label_column")]
    pub label_column: String,

    /// Explicit feature columns, in output order
    #[serde(default)]
    pub feature_columns: Option<Vec<String>>,
}

fn default_id_column() -> Option<String> {
    Some(DEFAULT_ID_COLUMN.to_string())
}

fn default_label_column() -> String {
    DEFAULT_LABEL_COLUMN.to_string()
}

impl Default for DatasetSchema {
    fn default() -> Self {
        Self {
            id_column: default_id_column(),
            label_column: default_label_column(),
            feature_columns: None,
        }
    }
}

impl DatasetSchema {
    /// Schema with the given label column and no identifier column
    pub fn new(label_column: impl Into<String>) -> Self {
        Self {
            id_column: None,
            label_column: label_column.into(),
            feature_columns: None,
        }
    }

    /// Set the identifier column
    pub fn with_id_column(mut self, id_column: impl Into<String>) -> Self {
        self.id_column = Some(id_column.into());
        self
    }

    /// Pin the feature columns
    pub fn with_feature_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.feature_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Resolve the feature column names against `dataset`
    pub fn feature_columns_for(&self, dataset: &Dataset) -> Result<Vec<String>> {
        let candidates: &[String] = match &self.feature_columns {
            Some(explicit) => {
                for column in explicit {
                    dataset.require_column(column)?;
                }
                explicit
            }
            None => dataset.columns(),
        };

        // the identifier and the label never count as features
        Ok(candidates
            .iter()
            .filter(|c| Some(c.as_str()) != self.id_column.as_deref())
            .filter(|c| **c != self.label_column)
            .cloned()
            .collect())
    }

    /// Features followed by the label: the layout of split outputs
    pub fn partition_columns(&self, dataset: &Dataset) -> Result<Vec<String>> {
        dataset.require_column(&self.label_column)?;
        let mut columns = self.feature_columns_for(dataset)?;
        columns.push(self.label_column.clone());
        Ok(columns)
    }
}
