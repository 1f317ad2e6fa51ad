//! Model references (`models:/<name>/<version|stage|latest>`)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::RegistryError;
use super::stage::ModelStage;

const SCHEME: &str = "models:/";

/// Which version of a named model to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelSelector {
    /// An exact version number
    Version(u32),
    /// The newest version currently in a stage
    Stage(ModelStage),
    /// The newest version regardless of stage
    Latest,
}

impl fmt::Display for ModelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelSelector::Version(v) => write!(f, "{v}"),
            ModelSelector::Stage(stage) => write!(f, "{stage}"),
            ModelSelector::Latest => f.write_str("latest"),
        }
    }
}

impl FromStr for ModelSelector {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("latest") {
            return Ok(ModelSelector::Latest);
        }
        if let Ok(version) = s.parse::<u32>() {
            return Ok(ModelSelector::Version(version));
        }
        s.parse().map(ModelSelector::Stage)
    }
}

/// Reference to a model in the registry
///
/// ```
/// use tabprep::storage::registry::{ModelRef, ModelSelector, ModelStage};
///
/// let r: ModelRef = "models:/iris-classifier-prod/Staging".parse().unwrap();
/// assert_eq!(r.name, "iris-classifier-prod");
/// assert_eq!(r.selector, ModelSelector::Stage(ModelStage::Staging));
/// assert_eq!(r.to_string(), "models:/iris-classifier-prod/Staging");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRef {
    pub name: String,
    pub selector: ModelSelector,
}

impl ModelRef {
    pub fn version(name: impl Into<String>, version: u32) -> Self {
        Self {
            name: name.into(),
            selector: ModelSelector::Version(version),
        }
    }

    pub fn stage(name: impl Into<String>, stage: ModelStage) -> Self {
        Self {
            name: name.into(),
            selector: ModelSelector::Stage(stage),
        }
    }

    pub fn latest(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            selector: ModelSelector::Latest,
        }
    }
}

impl fmt::Display for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SCHEME}{}/{}", self.name, self.selector)
    }
}

impl FromStr for ModelRef {
    type Err = RegistryError;

    fn from_str(uri: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| RegistryError::InvalidReference {
            uri: uri.to_string(),
            reason: reason.to_string(),
        };

        let rest = uri
            .strip_prefix(SCHEME)
            .ok_or_else(|| invalid("expected the models:/ scheme"))?;
        let (name, selector) = rest
            .rsplit_once('/')
            .ok_or_else(|| invalid("expected models:/<name>/<version|stage|latest>"))?;
        if name.is_empty() {
            return Err(invalid("model name is empty"));
        }
        let selector = selector
            .parse()
            .map_err(|_| invalid("selector is not a version, stage or 'latest'"))?;

        Ok(ModelRef {
            name: name.to_string(),
            selector,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version_reference() {
        let r: ModelRef = "models:/iris-classifier-prod/1".parse().unwrap();
        assert_eq!(r, ModelRef::version("iris-classifier-prod", 1));
    }

    #[test]
    fn test_parse_latest_reference() {
        let r: ModelRef = "models:/iris/Latest".parse().unwrap();
        assert_eq!(r, ModelRef::latest("iris"));
        assert_eq!(r.to_string(), "models:/iris/latest");
    }

    #[test]
    fn test_parse_stage_is_case_insensitive() {
        let r: ModelRef = "models:/iris/production".parse().unwrap();
        assert_eq!(r.selector, ModelSelector::Stage(ModelStage::Production));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for uri in [
            "iris/1",
            "models:/iris",
            "models://1",
            "models:/iris/canary",
            "runs:/abc/model",
        ] {
            assert!(
                matches!(uri.parse::<ModelRef>(), Err(RegistryError::InvalidReference { .. })),
                "{uri} should be rejected"
            );
        }
    }

    #[test]
    fn test_display_roundtrip() {
        for r in [
            ModelRef::version("a", 7),
            ModelRef::stage("a", ModelStage::Archived),
            ModelRef::latest("a"),
        ] {
            assert_eq!(r.to_string().parse::<ModelRef>().unwrap(), r);
        }
    }
}
