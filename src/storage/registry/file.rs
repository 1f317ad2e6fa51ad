//! JSON-file backed model registry

use std::fs;
use std::path::{Path, PathBuf};

use super::error::Result;
use super::memory::InMemoryRegistry;
use super::stage::ModelStage;
use super::traits::ModelRegistry;
use super::transition::StageTransition;
use super::version::ModelVersion;

/// File the registry is stored in, inside its directory
pub const REGISTRY_FILE: &str = "registry.json";

/// Registry persisted as one JSON document
///
/// Every mutation rewrites `registry.json`; reads are served from memory.
///
/// ```no_run
/// use tabprep::storage::registry::{JsonFileRegistry, ModelRegistry, ModelStage};
///
/// let mut registry = JsonFileRegistry::open("model-registry")?;
/// let v = registry.register_model("iris-classifier-prod", "demos/centroid_model.json")?;
/// registry.transition_stage(&v.name, v.version, ModelStage::Development, None)?;
/// # Ok::<(), tabprep::storage::registry::RegistryError>(())
/// ```
#[derive(Debug)]
pub struct JsonFileRegistry {
    path: PathBuf,
    inner: InMemoryRegistry,
}

impl JsonFileRegistry {
    /// Open the registry stored under `dir`, starting empty if there is none yet
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref().join(REGISTRY_FILE);
        let inner = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            InMemoryRegistry::new()
        };
        Ok(Self { path, inner })
    }

    /// Location of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, registry: &InMemoryRegistry) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(registry)?)?;
        Ok(())
    }
}

impl ModelRegistry for JsonFileRegistry {
    fn register_model(&mut self, name: &str, artifact_uri: &str) -> Result<ModelVersion> {
        // memory only changes once the file has been written
        let mut next = self.inner.clone();
        let model = next.register_model(name, artifact_uri)?;
        self.persist(&next)?;
        self.inner = next;
        Ok(model)
    }

    fn get_model(&self, name: &str, version: u32) -> Result<ModelVersion> {
        self.inner.get_model(name, version)
    }

    fn get_latest(&self, name: &str) -> Result<ModelVersion> {
        self.inner.get_latest(name)
    }

    fn get_latest_by_stage(&self, name: &str, stage: ModelStage) -> Option<ModelVersion> {
        self.inner.get_latest_by_stage(name, stage)
    }

    fn list_versions(&self, name: &str) -> Result<Vec<ModelVersion>> {
        self.inner.list_versions(name)
    }

    fn list_models(&self) -> Vec<String> {
        self.inner.list_models()
    }

    fn transition_stage(
        &mut self,
        name: &str,
        version: u32,
        target_stage: ModelStage,
        user: Option<&str>,
    ) -> Result<()> {
        let mut next = self.inner.clone();
        next.transition_stage(name, version, target_stage, user)?;
        self.persist(&next)?;
        self.inner = next;
        Ok(())
    }

    fn get_transition_history(&self, name: &str) -> Result<Vec<StageTransition>> {
        self.inner.get_transition_history(name)
    }
}
