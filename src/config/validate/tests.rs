use proptest::prelude::*;

use super::*;
use crate::config::PipelineSpec;

fn spec() -> PipelineSpec {
    PipelineSpec::default()
}

#[test]
fn test_default_spec_is_valid() {
    assert!(validate_spec(&spec()).is_ok());
}

#[test]
fn test_ratio_bounds() {
    for ratio in [0.0, 1.0, -0.1, 2.0, f64::NAN] {
        let mut s = spec();
        s.split.config.test_ratio = ratio;
        assert!(matches!(
            validate_spec(&s),
            Err(ConfigError::InvalidTestRatio(_))
        ));
    }
}

#[test]
fn test_zero_min_classes() {
    let mut s = spec();
    s.validation.min_classes = 0;
    assert!(matches!(
        validate_spec(&s),
        Err(ConfigError::InvalidMinClasses(0))
    ));
}

#[test]
fn test_delimiters() {
    let mut s = spec();
    s.data.delimiter = ';';
    assert!(validate_spec(&s).is_ok());
    s.data.delimiter = '\t';
    assert!(validate_spec(&s).is_ok());

    for bad in ['"', '\n', 'é'] {
        s.data.delimiter = bad;
        assert!(matches!(
            validate_spec(&s),
            Err(ConfigError::InvalidDelimiter(c)) if c == bad
        ));
    }
}

#[test]
fn test_empty_label_column() {
    let mut s = spec();
    s.data.schema.label_column = "  ".into();
    assert!(matches!(validate_spec(&s), Err(ConfigError::EmptyLabelColumn)));
}

#[test]
fn test_id_equal_to_label() {
    let mut s = spec();
    s.data.schema.id_column = Some("Species".into());
    assert!(matches!(
        validate_spec(&s),
        Err(ConfigError::IdIsLabel(c)) if c == "Species"
    ));
}

#[test]
fn test_feature_columns() {
    let mut s = spec();
    s.data.schema.feature_columns = Some(vec![]);
    assert!(matches!(
        validate_spec(&s),
        Err(ConfigError::EmptyFeatureColumns)
    ));

    s.data.schema.feature_columns = Some(vec!["PetalWidthCm".into(), "Species".into()]);
    assert!(matches!(
        validate_spec(&s),
        Err(ConfigError::LabelIsFeature(_))
    ));
}

#[test]
fn test_id_column_as_feature() {
    let mut s = spec();
    s.data.schema.feature_columns = Some(vec!["Id".into(), "PetalWidthCm".into()]);
    assert!(matches!(
        validate_spec(&s),
        Err(ConfigError::IdIsFeature(c)) if c == "Id"
    ));

    s.data.schema.id_column = None;
    assert!(validate_spec(&s).is_ok());
}

#[test]
fn test_empty_names() {
    let mut s = spec();
    s.tracking.preprocessing_experiment = String::new();
    assert!(matches!(
        validate_spec(&s),
        Err(ConfigError::EmptyExperimentName)
    ));

    let mut s = spec();
    s.registry.model_name = String::new();
    assert!(matches!(validate_spec(&s), Err(ConfigError::EmptyModelName)));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_ratio_accepted_iff_open_unit_interval(ratio in -1.0f64..2.0) {
        let mut s = spec();
        s.split.config.test_ratio = ratio;
        let ok = validate_spec(&s).is_ok();
        prop_assert_eq!(ok, ratio > 0.0 && ratio < 1.0);
    }

    #[test]
    fn prop_positive_min_classes_accepted(min_classes in 1usize..1000) {
        let mut s = spec();
        s.validation.min_classes = min_classes;
        prop_assert!(validate_spec(&s).is_ok());
    }
}
