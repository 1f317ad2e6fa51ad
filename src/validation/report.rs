//! Validation report and verdict policy

use std::fmt;

use serde::{Deserialize, Serialize};

/// Minimum number of distinct labels expected in the bundled Iris data
pub const DEFAULT_MIN_CLASSES: usize = 3;

/// Pass/fail verdict of a validation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationStatus {
    Success,
    Failed,
}

impl ValidationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationStatus::Success => "Success",
            ValidationStatus::Failed => "Failed",
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Thresholds a dataset must meet to pass validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationPolicy {
    /// Fewest distinct label values accepted
    #[serde(default = "default_min_classes")]
    pub min_classes: usize,
}

fn default_min_classes() -> usize {
    DEFAULT_MIN_CLASSES
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            min_classes: DEFAULT_MIN_CLASSES,
        }
    }
}

impl ValidationPolicy {
    pub fn new(min_classes: usize) -> Self {
        Self { min_classes }
    }

    /// Failed iff any cell is missing or there are fewer classes than required
    #[must_use]
    pub fn verdict(&self, missing_value_count: usize, class_count: usize) -> ValidationStatus {
        if missing_value_count > 0 || class_count < self.min_classes {
            ValidationStatus::Failed
        } else {
            ValidationStatus::Success
        }
    }
}

/// Structural health metrics of one dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub row_count: usize,
    pub column_count: usize,
    pub class_count: usize,
    pub missing_value_count: usize,
    pub status: ValidationStatus,
}

impl ValidationReport {
    /// Build a report from raw counts, deriving the status from `policy`
    pub fn from_counts(
        row_count: usize,
        column_count: usize,
        class_count: usize,
        missing_value_count: usize,
        policy: &ValidationPolicy,
    ) -> Self {
        Self {
            row_count,
            column_count,
            class_count,
            missing_value_count,
            status: policy.verdict(missing_value_count, class_count),
        }
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == ValidationStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_verdict_success() {
        let policy = ValidationPolicy::default();
        assert_eq!(policy.verdict(0, 3), ValidationStatus::Success);
        assert_eq!(policy.verdict(0, 7), ValidationStatus::Success);
    }

    #[test]
    fn test_verdict_missing_values_fail() {
        let policy = ValidationPolicy::default();
        assert_eq!(policy.verdict(1, 3), ValidationStatus::Failed);
    }

    #[test]
    fn test_verdict_too_few_classes_fail() {
        let policy = ValidationPolicy::default();
        assert_eq!(policy.verdict(0, 2), ValidationStatus::Failed);
    }

    #[test]
    fn test_custom_threshold() {
        let policy = ValidationPolicy::new(2);
        assert_eq!(policy.verdict(0, 2), ValidationStatus::Success);
    }

    #[test]
    fn test_report_from_counts() {
        let report = ValidationReport::from_counts(150, 6, 3, 0, &ValidationPolicy::default());
        assert!(report.passed());
        assert_eq!(report.row_count, 150);
        assert_eq!(report.column_count, 6);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ValidationStatus::Success.to_string(), "Success");
        assert_eq!(ValidationStatus::Failed.to_string(), "Failed");
    }

    #[test]
    fn test_policy_yaml_default() {
        let policy: ValidationPolicy = serde_yaml::from_str("{}").unwrap();
        assert_eq!(policy.min_classes, DEFAULT_MIN_CLASSES);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_verdict_law(missing in 0usize..5, classes in 0usize..8, min in 0usize..6) {
            let status = ValidationPolicy::new(min).verdict(missing, classes);
            let should_pass = missing == 0 && classes >= min;
            prop_assert_eq!(status == ValidationStatus::Success, should_pass);
        }
    }
}
