//! InMemoryRegistry struct and core methods

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::super::transition::StageTransition;
use super::super::version::ModelVersion;

/// Registry held entirely in memory
///
/// Serializable so that [`JsonFileRegistry`](super::super::JsonFileRegistry)
/// can persist it as a single document.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct InMemoryRegistry {
    /// Models by name -> version -> ModelVersion
    #[serde(default)]
    pub(crate) models: BTreeMap<String, BTreeMap<u32, ModelVersion>>,
    /// Stage transition history, oldest first
    #[serde(default)]
    pub(crate) transitions: Vec<StageTransition>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next version number for a model
    pub(crate) fn next_version(&self, name: &str) -> u32 {
        self.models
            .get(name)
            .and_then(|versions| versions.keys().next_back())
            .map_or(1, |latest| latest + 1)
    }
}
