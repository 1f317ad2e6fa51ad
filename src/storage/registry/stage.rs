//! Model lifecycle stages

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::RegistryError;

/// Lifecycle stage of a registered model version
///
/// Versions flow `None -> Development -> Staging -> Production` and may be
/// archived from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelStage {
    /// Freshly registered
    None,
    Development,
    /// Candidate under evaluation
    Staging,
    /// Serving predictions
    Production,
    Archived,
}

impl ModelStage {
    pub const ALL: [ModelStage; 5] = [
        ModelStage::None,
        ModelStage::Development,
        ModelStage::Staging,
        ModelStage::Production,
        ModelStage::Archived,
    ];

    /// Whether a version in this stage may move to `target`
    pub fn can_transition_to(&self, target: ModelStage) -> bool {
        use ModelStage::{Archived, Development, Production, Staging};

        if *self == target || target == Archived {
            return true;
        }
        matches!(
            (self, target),
            (ModelStage::None, Development)
                | (Development, Staging)
                | (Staging, Production)
                // rollback
                | (Production, Staging)
                // rejection
                | (Staging, Development)
                // restore
                | (Archived, Development)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelStage::None => "None",
            ModelStage::Development => "Development",
            ModelStage::Staging => "Staging",
            ModelStage::Production => "Production",
            ModelStage::Archived => "Archived",
        }
    }
}

impl fmt::Display for ModelStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelStage {
    type Err = RegistryError;

    /// Case-insensitive stage name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelStage::ALL
            .into_iter()
            .find(|stage| stage.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RegistryError::UnknownStage(s.to_string()))
    }
}
