//! Predict command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{apply_predict_overrides, validate_spec, PipelineSpec, PredictArgs};
use crate::data::DatasetLoader;
use crate::predict::{predict_one, ActualLabel, Example, PredictError, RegistryModelSource};
use crate::storage::registry::{JsonFileRegistry, ModelRef, ModelSelector};

/// Progress line announcing which model is being loaded
pub fn format_loading(reference: &ModelRef) -> String {
    match &reference.selector {
        ModelSelector::Stage(stage) => {
            format!("Loading model '{}' from stage '{stage}'...", reference.name)
        }
        ModelSelector::Version(version) => {
            format!("Loading model '{}' version {version}...", reference.name)
        }
        ModelSelector::Latest => {
            format!("Loading latest version of model '{}'...", reference.name)
        }
    }
}

/// Hint printed after a resolution failure
fn resolution_hint(reference: &ModelRef) -> String {
    match &reference.selector {
        ModelSelector::Stage(stage) => {
            format!("Please make sure a model version is in the '{stage}' stage.")
        }
        _ => format!(
            "Please make sure '{}' is registered (tabprep registry list {}).",
            reference, reference.name
        ),
    }
}

pub fn run_predict(
    mut spec: PipelineSpec,
    args: &PredictArgs,
    level: LogLevel,
) -> Result<(), String> {
    apply_predict_overrides(&mut spec, args);
    validate_spec(&spec).map_err(|e| format!("Invalid configuration: {e}"))?;

    let reference = args
        .uri
        .clone()
        .unwrap_or_else(|| spec.registry.model_ref());
    log(level, LogLevel::Normal, &format_loading(&reference));

    let registry = JsonFileRegistry::open(&spec.registry.dir)
        .map_err(|e| format!("Failed to open model registry: {e}"))?;
    log(
        level,
        LogLevel::Verbose,
        &format!("  Registry: {}", registry.path().display()),
    );

    let example = load_example(&spec, args)?;
    let source = RegistryModelSource::new(&registry);

    let record = match predict_one(&source, &reference, &example, &spec.labels) {
        Ok(record) => record,
        Err(e @ PredictError::ModelResolution { .. }) => {
            eprintln!("{}", resolution_hint(&reference));
            return Err(format!("Error loading model: {e}"));
        }
        Err(e) => return Err(e.to_string()),
    };

    log(level, LogLevel::Normal, &record.to_string());
    if !record.matches() {
        log(
            level,
            LogLevel::Verbose,
            "  Prediction differs from the actual label",
        );
    }
    Ok(())
}

fn load_example(spec: &PipelineSpec, args: &PredictArgs) -> Result<Example, String> {
    if let Some(features) = &args.features {
        let actual = args
            .label
            .as_deref()
            .map_or(ActualLabel::Missing, ActualLabel::parse);
        return Ok(Example::new(features.clone(), actual));
    }

    let dataset = super::csv_loader(spec)
        .load(&spec.data.path)
        .map_err(|e| e.to_string())?;
    Example::from_row(&dataset, &spec.data.schema, args.row).map_err(|e| e.to_string())
}
