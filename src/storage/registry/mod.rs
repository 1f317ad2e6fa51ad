//! Model registry with staged promotion
//!
//! Named models carry numbered versions, each in one lifecycle stage:
//! None -> Development -> Staging -> Production, with Archived reachable from
//! anywhere. Predictions resolve a [`ModelRef`] (`models:/<name>/<selector>`)
//! against a registry to find the artifact to load.
//!
//! # Example
//!
//! ```
//! use tabprep::storage::registry::{InMemoryRegistry, ModelRef, ModelRegistry, ModelStage};
//!
//! let mut registry = InMemoryRegistry::new();
//! registry.register_model("iris-classifier-prod", "models/iris.json")?;
//! registry.transition_stage("iris-classifier-prod", 1, ModelStage::Development, Some("alice"))?;
//! registry.transition_stage("iris-classifier-prod", 1, ModelStage::Staging, Some("alice"))?;
//!
//! let staged = registry.resolve(&"models:/iris-classifier-prod/Staging".parse::<ModelRef>()?)?;
//! assert_eq!(staged.version, 1);
//! # Ok::<(), tabprep::storage::registry::RegistryError>(())
//! ```

mod error;
mod file;
mod memory;
mod reference;
mod stage;
mod traits;
mod transition;
mod version;

pub use error::{RegistryError, Result};
pub use file::{JsonFileRegistry, REGISTRY_FILE};
pub use memory::InMemoryRegistry;
pub use reference::{ModelRef, ModelSelector};
pub use stage::ModelStage;
pub use traits::ModelRegistry;
pub use transition::StageTransition;
pub use version::ModelVersion;
