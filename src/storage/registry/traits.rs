//! Model registry trait definition

use super::error::{RegistryError, Result};
use super::reference::{ModelRef, ModelSelector};
use super::stage::ModelStage;
use super::transition::StageTransition;
use super::version::ModelVersion;

/// Model registry trait
pub trait ModelRegistry {
    /// Register a new model version
    fn register_model(&mut self, name: &str, artifact_uri: &str) -> Result<ModelVersion>;

    /// Get a model version
    fn get_model(&self, name: &str, version: u32) -> Result<ModelVersion>;

    /// Get latest version of a model
    fn get_latest(&self, name: &str) -> Result<ModelVersion>;

    /// Get latest version at a specific stage
    fn get_latest_by_stage(&self, name: &str, stage: ModelStage) -> Option<ModelVersion>;

    /// List all versions of a model, oldest first
    fn list_versions(&self, name: &str) -> Result<Vec<ModelVersion>>;

    /// Names of every registered model, sorted
    fn list_models(&self) -> Vec<String>;

    /// Transition model to new stage
    fn transition_stage(
        &mut self,
        name: &str,
        version: u32,
        target_stage: ModelStage,
        user: Option<&str>,
    ) -> Result<()>;

    /// Get transition history for a model
    fn get_transition_history(&self, name: &str) -> Result<Vec<StageTransition>>;

    /// Resolve a reference to the version it currently denotes
    fn resolve(&self, reference: &ModelRef) -> Result<ModelVersion> {
        match reference.selector {
            ModelSelector::Version(version) => self.get_model(&reference.name, version),
            ModelSelector::Latest => self.get_latest(&reference.name),
            ModelSelector::Stage(stage) => {
                // distinguish an unknown model from an empty stage
                self.list_versions(&reference.name)?;
                self.get_latest_by_stage(&reference.name, stage)
                    .ok_or_else(|| RegistryError::NoVersionInStage {
                        name: reference.name.clone(),
                        stage,
                    })
            }
        }
    }
}
