//! Runs command implementation
//!
//! Read-only views over the JSON tracking store.

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{PipelineSpec, RunsArgs, RunsCommand};
use crate::tracking::storage::{JsonFileBackend, TrackingBackend};
use crate::tracking::Run;

pub fn run_runs(spec: &PipelineSpec, args: RunsArgs, level: LogLevel) -> Result<(), String> {
    let backend = JsonFileBackend::new(&spec.tracking.dir);

    match args.command {
        RunsCommand::List { experiment } => list_runs(&backend, experiment.as_deref(), level),
        RunsCommand::Show { run_id } => show_run(&backend, &run_id, level),
    }
}

fn list_runs(
    backend: &JsonFileBackend,
    experiment: Option<&str>,
    level: LogLevel,
) -> Result<(), String> {
    let mut runs: Vec<Run> = backend
        .list_runs()
        .map_err(|e| format!("Failed to list runs: {e}"))?
        .into_iter()
        .filter(|run| experiment.map_or(true, |name| run.experiment_name == name))
        .collect();
    runs.sort_by_key(|run| run.start_time_ms);

    let output = match format_run_table(&runs) {
        Some(table) => table,
        None => format!("No runs found in {}", backend.dir().display()),
    };
    log(level, LogLevel::Normal, &output);
    Ok(())
}

/// Header, one row per run and a count; `None` when there are no runs
pub fn format_run_table(runs: &[Run]) -> Option<String> {
    if runs.is_empty() {
        return None;
    }
    let mut lines = vec![
        format!("{:<34} {:<10} {:<20} EXPERIMENT", "RUN ID", "STATUS", "STEP"),
        "-".repeat(100),
    ];
    lines.extend(runs.iter().map(format_run_row));
    lines.push(format!("\n{} run(s)", runs.len()));
    Some(lines.join("\n"))
}

/// One row of the run table
pub fn format_run_row(run: &Run) -> String {
    format!(
        "{:<34} {:<10} {:<20} {}",
        run.run_id,
        format!("{:?}", run.status),
        run.tags.get("ml.step").map_or("-", String::as_str),
        run.experiment_name
    )
}

fn show_run(backend: &JsonFileBackend, run_id: &str, level: LogLevel) -> Result<(), String> {
    let run = backend
        .load_run(run_id)
        .map_err(|e| format!("Failed to load run: {e}"))?;
    log(level, LogLevel::Normal, &format_run_details(&run));
    Ok(())
}

/// Full listing of a run; map entries are sorted by key
pub fn format_run_details(run: &Run) -> String {
    let mut lines = vec![
        format!("Run: {}", run.run_id),
        format!("  Experiment: {}", run.experiment_name),
        format!("  Status:     {:?}", run.status),
    ];
    if let Some(name) = &run.run_name {
        lines.push(format!("  Name:       {name}"));
    }

    let mut tags: Vec<_> = run.tags.iter().collect();
    tags.sort();
    if !tags.is_empty() {
        lines.push("  Tags:".to_string());
        lines.extend(tags.iter().map(|(k, v)| format!("    {k} = {v}")));
    }

    let mut params: Vec<_> = run.params.iter().collect();
    params.sort();
    if !params.is_empty() {
        lines.push("  Params:".to_string());
        lines.extend(params.iter().map(|(k, v)| format!("    {k} = {v}")));
    }

    let mut metrics: Vec<_> = run.metrics.keys().collect();
    metrics.sort();
    if !metrics.is_empty() {
        lines.push("  Metrics:".to_string());
        for key in metrics {
            if let Some(value) = run.latest_metric(key) {
                lines.push(format!("    {key} = {value}"));
            }
        }
    }

    if !run.artifacts.is_empty() {
        lines.push("  Artifacts:".to_string());
        lines.extend(
            run.artifacts
                .iter()
                .map(|a| format!("    {} ({} bytes, {})", a.path, a.size_bytes, a.sha256)),
        );
    }
    lines.join("\n")
}
