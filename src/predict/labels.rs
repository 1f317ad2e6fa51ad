//! Class index to label name mapping

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Name shown for indices the map does not know
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Maps numeric class indices to human-readable names
///
/// Defaults to the three iris species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelMap(BTreeMap<i64, String>);

impl Default for LabelMap {
    fn default() -> Self {
        Self::from_names(["setosa", "versicolor", "virginica"])
    }
}

impl LabelMap {
    /// Index `i` maps to the `i`-th name
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self((0..).zip(names.into_iter().map(Into::into)).collect())
    }

    /// Name of class `index`, or `"Unknown"`
    pub fn name(&self, index: i64) -> &str {
        self.0.get(&index).map_or(UNKNOWN_LABEL, String::as_str)
    }

    /// Display name for a raw model or dataset label
    ///
    /// Integer labels are looked up; anything else is already a name.
    pub fn resolve(&self, raw: &str) -> String {
        match raw.trim().parse::<i64>() {
            Ok(index) => self.name(index).to_string(),
            Err(_) => raw.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_iris_names() {
        let labels = LabelMap::default();
        assert_eq!(labels.name(0), "setosa");
        assert_eq!(labels.name(2), "virginica");
        assert_eq!(labels.len(), 3);
    }

    #[test]
    fn test_unknown_index() {
        assert_eq!(LabelMap::default().name(7), UNKNOWN_LABEL);
        assert_eq!(LabelMap::default().name(-1), UNKNOWN_LABEL);
    }

    #[test]
    fn test_resolve_names_and_indices() {
        let labels = LabelMap::default();
        assert_eq!(labels.resolve("1"), "versicolor");
        assert_eq!(labels.resolve("Iris-setosa"), "Iris-setosa");
        assert_eq!(labels.resolve("9"), UNKNOWN_LABEL);
    }

    #[test]
    fn test_yaml_map() {
        let labels: LabelMap = serde_yaml::from_str("0: cat\n1: dog\n").unwrap();
        assert_eq!(labels.name(1), "dog");
        assert_eq!(labels, LabelMap::from_names(["cat", "dog"]));
    }
}
