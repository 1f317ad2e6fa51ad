//! Validate command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{apply_validate_overrides, validate_spec, PipelineSpec, ValidateArgs};
use crate::data::DataError;
use crate::tracking::storage::JsonFileBackend;
use crate::tracking::ExperimentTracker;
use crate::validation::{validate_source, ValidationReport, STEP_TAG};

/// Format the report the way the step prints it
pub fn format_report(report: &ValidationReport) -> String {
    [
        format!(
            "Dataset shape: {} rows, {} columns",
            report.row_count, report.column_count
        ),
        format!("Number of classes: {}", report.class_count),
        format!("Missing values: {}", report.missing_value_count),
        format!("Validation status: {}", report.status),
    ]
    .join("\n")
}

pub fn run_validate(
    mut spec: PipelineSpec,
    args: &ValidateArgs,
    level: LogLevel,
) -> Result<(), String> {
    apply_validate_overrides(&mut spec, args);
    validate_spec(&spec).map_err(|e| format!("Invalid configuration: {e}"))?;

    let loader = super::csv_loader(&spec);
    let mut tracker = ExperimentTracker::new(
        spec.tracking.validation_experiment.as_str(),
        JsonFileBackend::new(&spec.tracking.dir),
    );

    log(level, LogLevel::Normal, "Starting data validation run...");
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "  Dataset: {}\n  Minimum classes: {}",
            spec.data.path.display(),
            spec.validation.min_classes
        ),
    );

    let report = tracker
        .with_run(Some(STEP_TAG), |run| {
            validate_source(
                &loader,
                &spec.data.path,
                &spec.data.schema,
                &spec.validation,
                run,
            )
        })
        .map_err(|e| format!("Data validation failed: {e}"))?;

    match report {
        Some(report) => {
            log(level, LogLevel::Normal, &format_report(&report));
            log(level, LogLevel::Normal, "Data validation run finished.");
        }
        None => {
            let missing = DataError::MissingInputFile(spec.data.path.display().to_string());
            eprintln!("Error: {missing}.");
        }
    }
    Ok(())
}
