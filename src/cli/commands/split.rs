//! Split command implementation

use std::path::Path;

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{apply_split_overrides, validate_spec, PipelineSpec, SplitArgs};
use crate::data::DataError;
use crate::partition::{split_source, SplitSummary, ARTIFACT_PATH, STEP_TAG};
use crate::tracking::storage::JsonFileBackend;
use crate::tracking::{ExperimentTracker, RunRecorder};

/// Closing banner pointing the next step at this run
pub fn format_run_banner(run_id: &str) -> String {
    let rule = "-".repeat(50);
    format!(
        "{rule}\nData preprocessing run finished. Please use the following Run ID for the next step:\nPreprocessing Run ID: {run_id}\n{rule}"
    )
}

pub fn run_split(mut spec: PipelineSpec, args: &SplitArgs, level: LogLevel) -> Result<(), String> {
    apply_split_overrides(&mut spec, args);
    validate_spec(&spec).map_err(|e| format!("Invalid configuration: {e}"))?;

    let loader = super::csv_loader(&spec);
    let config = &spec.split.config;
    let output_dir = &spec.split.output_dir;
    let mut tracker = ExperimentTracker::new(
        spec.tracking.preprocessing_experiment.as_str(),
        JsonFileBackend::new(&spec.tracking.dir),
    );

    let summary = tracker
        .with_run(Some(STEP_TAG), |run| {
            log(
                level,
                LogLevel::Normal,
                &format!("Starting data preprocessing run with run_id: {}", run.run_id()),
            );
            log(
                level,
                LogLevel::Verbose,
                &format!(
                    "  Dataset: {}\n  Test size: {}\n  Seed: {}\n  Strategy: {}",
                    spec.data.path.display(),
                    config.test_ratio,
                    config.seed,
                    config.strategy
                ),
            );
            split_source(
                &loader,
                &spec.data.path,
                &spec.data.schema,
                config,
                output_dir,
                run,
            )
        })
        .map_err(|e| format!("Data preprocessing failed: {e}"))?;

    let Some(summary) = summary else {
        let missing = DataError::MissingInputFile(spec.data.path.display().to_string());
        eprintln!("Error: {missing}.");
        return Ok(());
    };

    report_summary(&summary, output_dir, level);
    Ok(())
}

fn report_summary(summary: &SplitSummary, output_dir: &Path, level: LogLevel) {
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "  Train rows: {}\n  Test rows: {}",
            summary.train_rows, summary.test_rows
        ),
    );
    log(
        level,
        LogLevel::Normal,
        &format!(
            "Saved processed data to '{}' directory.",
            output_dir.display()
        ),
    );
    for artifact in &summary.artifacts {
        log(
            level,
            LogLevel::Verbose,
            &format!("  {} ({} bytes)", artifact.path, artifact.size_bytes),
        );
    }
    log(
        level,
        LogLevel::Normal,
        &format!("Logged processed data as artifacts under '{ARTIFACT_PATH}'."),
    );
    log(level, LogLevel::Normal, &format_run_banner(&summary.run_id));
}
