//! Inputs and outputs of a single prediction

use std::fmt;

use serde::{Deserialize, Serialize};

use super::labels::{LabelMap, UNKNOWN_LABEL};
use crate::data::{Cell, Dataset, DatasetSchema, Result};

/// Ground truth attached to an example
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActualLabel {
    Name(String),
    /// Numeric class index, named through a [`LabelMap`]
    Index(i64),
    Missing,
}

impl ActualLabel {
    /// Interpret a raw label string
    pub fn parse(raw: &str) -> Self {
        Self::from_cell(&Cell::parse(raw))
    }

    fn from_cell(cell: &Cell) -> Self {
        match cell {
            Cell::Number(n) if n.fract() == 0.0 => ActualLabel::Index(*n as i64),
            Cell::Number(n) => ActualLabel::Name(n.to_string()),
            Cell::Text(s) => ActualLabel::Name(s.clone()),
            Cell::Missing => ActualLabel::Missing,
        }
    }

    /// Display name of the label
    pub fn resolve(&self, labels: &LabelMap) -> String {
        match self {
            ActualLabel::Name(name) => name.clone(),
            ActualLabel::Index(index) => labels.name(*index).to_string(),
            ActualLabel::Missing => UNKNOWN_LABEL.to_string(),
        }
    }
}

/// One feature vector plus its known label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub features: Vec<f64>,
    pub actual: ActualLabel,
}

impl Example {
    pub fn new(features: Vec<f64>, actual: ActualLabel) -> Self {
        Self { features, actual }
    }

    /// Take row `row` of `dataset`
    ///
    /// Features follow `schema`; the label is [`ActualLabel::Missing`] when
    /// the dataset has no label column.
    pub fn from_row(dataset: &Dataset, schema: &DatasetSchema, row: usize) -> Result<Self> {
        let columns = schema.feature_columns_for(dataset)?;
        let features = dataset.numeric_row(row, &columns)?;
        let actual = dataset
            .column_index(&schema.label_column)
            .map_or(ActualLabel::Missing, |idx| {
                ActualLabel::from_cell(&dataset.rows()[row][idx])
            });
        Ok(Self { features, actual })
    }
}

/// What a prediction produced, with both labels already named
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub features: Vec<f64>,
    pub actual_label: String,
    pub predicted_label: String,
}

impl PredictionRecord {
    /// Whether the model agreed with the known label
    pub fn matches(&self) -> bool {
        self.actual_label == self.predicted_label
    }
}

impl fmt::Display for PredictionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(30);
        writeln!(f, "{rule}")?;
        writeln!(f, "Sample features: {:?}", self.features)?;
        writeln!(f, "Actual label:    {}", self.actual_label)?;
        writeln!(f, "Predicted label: {}", self.predicted_label)?;
        write!(f, "{rule}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::new(
            vec!["Id".into(), "a".into(), "b".into(), "Species".into()],
            vec![
                vec![Cell::Number(1.0), Cell::Number(5.1), Cell::Number(3.5), "Iris-setosa".into()],
                vec![Cell::Number(2.0), Cell::Number(6.0), Cell::Number(2.9), Cell::Number(1.0)],
                vec![Cell::Number(3.0), Cell::Missing, Cell::Number(2.9), Cell::Missing],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_from_row_named_label() {
        let example = Example::from_row(&sample(), &DatasetSchema::default(), 0).unwrap();
        assert_eq!(example.features, vec![5.1, 3.5]);
        assert_eq!(example.actual, ActualLabel::Name("Iris-setosa".into()));
    }

    #[test]
    fn test_from_row_index_label() {
        let example = Example::from_row(&sample(), &DatasetSchema::default(), 1).unwrap();
        assert_eq!(example.actual, ActualLabel::Index(1));
        assert_eq!(example.actual.resolve(&LabelMap::default()), "versicolor");
    }

    #[test]
    fn test_from_row_missing_feature() {
        assert!(Example::from_row(&sample(), &DatasetSchema::default(), 2).is_err());
    }

    #[test]
    fn test_from_row_out_of_range() {
        assert!(Example::from_row(&sample(), &DatasetSchema::default(), 3).is_err());
    }

    #[test]
    fn test_from_row_without_label_column() {
        let schema = DatasetSchema::new("target").with_id_column("Id");
        let ds = Dataset::new(
            vec!["Id".into(), "a".into()],
            vec![vec![Cell::Number(1.0), Cell::Number(0.5)]],
        )
        .unwrap();
        let example = Example::from_row(&ds, &schema, 0).unwrap();
        assert_eq!(example.features, vec![0.5]);
        assert_eq!(example.actual, ActualLabel::Missing);
    }

    #[test]
    fn test_actual_label_parse() {
        assert_eq!(ActualLabel::parse("2"), ActualLabel::Index(2));
        assert_eq!(ActualLabel::parse(" virginica "), ActualLabel::Name("virginica".into()));
        assert_eq!(ActualLabel::parse("NA"), ActualLabel::Missing);
        assert_eq!(ActualLabel::Missing.resolve(&LabelMap::default()), UNKNOWN_LABEL);
    }

    #[test]
    fn test_record_display_block() {
        let record = PredictionRecord {
            features: vec![5.1, 3.5],
            actual_label: "setosa".into(),
            predicted_label: "setosa".into(),
        };
        assert!(record.matches());
        let text = record.to_string();
        assert!(text.starts_with(&"-".repeat(30)));
        assert!(text.contains("Sample features: [5.1, 3.5]"));
        assert!(text.contains("Predicted label: setosa"));
    }
}
