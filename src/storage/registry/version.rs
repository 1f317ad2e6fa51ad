//! Registered model versions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::reference::{ModelRef, ModelSelector};
use super::stage::ModelStage;

/// One registered version of a named model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelVersion {
    pub name: String,
    /// Version number, starting at 1 and increasing per name
    pub version: u32,
    pub stage: ModelStage,
    /// Location of the serialized model
    pub artifact_uri: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub promoted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub promoted_by: Option<String>,
}

impl ModelVersion {
    pub fn new(name: &str, version: u32, artifact_uri: &str) -> Self {
        Self {
            name: name.to_string(),
            version,
            stage: ModelStage::None,
            artifact_uri: artifact_uri.to_string(),
            description: None,
            created_at: Utc::now(),
            promoted_at: None,
            promoted_by: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Reference pinning exactly this version
    pub fn reference(&self) -> ModelRef {
        ModelRef {
            name: self.name.clone(),
            selector: ModelSelector::Version(self.version),
        }
    }
}
