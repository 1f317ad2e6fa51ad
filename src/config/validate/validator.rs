//! Configuration validation logic

use super::error::ConfigError;
use crate::config::schema::PipelineSpec;

/// Validate a pipeline specification
///
/// Checks:
/// - Split ratio and class threshold are in range
/// - Column roles do not overlap (id, label and features are distinct)
/// - Names used for lookups are non-empty
///
/// File paths are not checked here; a missing input file is reported by the
/// step that reads it.
pub fn validate_spec(spec: &PipelineSpec) -> Result<(), ConfigError> {
    let ratio = spec.split.config.test_ratio;
    if !(ratio > 0.0 && ratio < 1.0) {
        return Err(ConfigError::InvalidTestRatio(ratio));
    }

    if spec.validation.min_classes == 0 {
        return Err(ConfigError::InvalidMinClasses(spec.validation.min_classes));
    }

    let delimiter = spec.data.delimiter;
    if !delimiter.is_ascii() || matches!(delimiter, '"' | '\n' | '\r') {
        return Err(ConfigError::InvalidDelimiter(delimiter));
    }

    let schema = &spec.data.schema;
    if schema.label_column.trim().is_empty() {
        return Err(ConfigError::EmptyLabelColumn);
    }
    if schema.id_column.as_deref() == Some(schema.label_column.as_str()) {
        return Err(ConfigError::IdIsLabel(schema.label_column.clone()));
    }
    if let Some(features) = &schema.feature_columns {
        if features.is_empty() {
            return Err(ConfigError::EmptyFeatureColumns);
        }
        if features.contains(&schema.label_column) {
            return Err(ConfigError::LabelIsFeature(schema.label_column.clone()));
        }
        if let Some(id) = schema.id_column.as_ref().filter(|id| features.contains(id)) {
            return Err(ConfigError::IdIsFeature(id.clone()));
        }
    }

    if spec.tracking.validation_experiment.trim().is_empty()
        || spec.tracking.preprocessing_experiment.trim().is_empty()
    {
        return Err(ConfigError::EmptyExperimentName);
    }

    if spec.registry.model_name.trim().is_empty() {
        return Err(ConfigError::EmptyModelName);
    }

    Ok(())
}
