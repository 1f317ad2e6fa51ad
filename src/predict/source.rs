//! Resolving model references into loaded predictors

use std::path::Path;

use super::error::{PredictError, Result};
use super::model::{CentroidModel, Predictor};
use crate::storage::registry::{ModelRef, ModelRegistry};

/// Anything that can turn a model reference into a ready predictor
pub trait ModelSource {
    fn load(&self, reference: &ModelRef) -> Result<Box<dyn Predictor>>;
}

/// Loads models registered in a [`ModelRegistry`]
///
/// Artifact URIs are local paths, optionally prefixed with `file://`.
/// Relative paths are taken relative to `base_dir` when one is set.
#[derive(Debug)]
pub struct RegistryModelSource<'r, R: ModelRegistry + ?Sized> {
    registry: &'r R,
    base_dir: Option<&'r Path>,
}

impl<'r, R: ModelRegistry + ?Sized> RegistryModelSource<'r, R> {
    pub fn new(registry: &'r R) -> Self {
        Self {
            registry,
            base_dir: None,
        }
    }

    #[must_use]
    pub fn with_base_dir(mut self, base_dir: &'r Path) -> Self {
        self.base_dir = Some(base_dir);
        self
    }
}

impl<R: ModelRegistry + ?Sized> ModelSource for RegistryModelSource<'_, R> {
    fn load(&self, reference: &ModelRef) -> Result<Box<dyn Predictor>> {
        let version = self
            .registry
            .resolve(reference)
            .map_err(|e| PredictError::ModelResolution {
                model: reference.to_string(),
                reason: e.to_string(),
            })?;

        let raw = version
            .artifact_uri
            .strip_prefix("file://")
            .unwrap_or(&version.artifact_uri);
        let path = match self.base_dir {
            Some(base) if Path::new(raw).is_relative() => base.join(raw),
            _ => Path::new(raw).to_path_buf(),
        };

        Ok(Box::new(CentroidModel::load(&path)?))
    }
}
