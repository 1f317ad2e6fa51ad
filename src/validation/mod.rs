//! Dataset validation
//!
//! Computes structural health metrics of a dataset (shape, class cardinality,
//! missing cells) and a pass/fail verdict, and records them on a tracking run.
//!
//! # Example
//!
//! ```
//! use tabprep::data::{CsvLoader, DatasetSchema};
//! use tabprep::validation::{validate, ValidationPolicy, ValidationStatus};
//!
//! let csv = "Id,x,Species\n1,0.1,a\n2,0.2,b\n3,0.3,c\n";
//! let dataset = CsvLoader::new().read_from(csv.as_bytes(), "inline").unwrap();
//! let report = validate(&dataset, &DatasetSchema::default(), &ValidationPolicy::default()).unwrap();
//! assert_eq!(report.class_count, 3);
//! assert_eq!(report.status, ValidationStatus::Success);
//! ```

mod report;

use std::collections::HashSet;
use std::path::Path;

pub use report::{ValidationPolicy, ValidationReport, ValidationStatus, DEFAULT_MIN_CLASSES};

use crate::data::{DataError, Dataset, DatasetLoader, DatasetSchema};
use crate::tracking::{self, RunRecorder};
use crate::Result;

/// Tag value identifying validation runs
pub const STEP_TAG: &str = "data_validation";

/// Compute the validation report of `dataset`
///
/// Fails with [`DataError::EmptyDataset`] when there are no rows and with
/// [`DataError::MissingColumn`] when the label column is absent.
pub fn validate(
    dataset: &Dataset,
    schema: &DatasetSchema,
    policy: &ValidationPolicy,
) -> std::result::Result<ValidationReport, DataError> {
    if dataset.is_empty() {
        return Err(DataError::EmptyDataset);
    }

    let classes: HashSet<String> = dataset
        .column(&schema.label_column)?
        .filter_map(|cell| cell.key())
        .collect();

    Ok(ValidationReport::from_counts(
        dataset.row_count(),
        dataset.column_count(),
        classes.len(),
        dataset.missing_count(),
        policy,
    ))
}

/// Emit every metric of `report` once on the open run
pub fn record_report<R: RunRecorder>(
    report: &ValidationReport,
    recorder: &mut R,
) -> tracking::Result<()> {
    recorder.log_metric("num_rows", report.row_count as f64)?;
    recorder.log_metric("num_cols", report.column_count as f64)?;
    recorder.log_metric("missing_values", report.missing_value_count as f64)?;
    recorder.log_param("num_classes", &report.class_count.to_string())?;
    recorder.log_param("validation_status", report.status.as_str())?;
    Ok(())
}

/// Validation step against a loader: tag the run, load, validate, record
///
/// Returns `Ok(None)` when the source does not exist; in that case nothing
/// beyond the step tag is recorded.
pub fn validate_source<L, R>(
    loader: &L,
    source: &Path,
    schema: &DatasetSchema,
    policy: &ValidationPolicy,
    recorder: &mut R,
) -> Result<Option<ValidationReport>>
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

    let report = validate(&dataset, schema, policy)?;
    record_report(&report, recorder)?;
    Ok(Some(report))
}
