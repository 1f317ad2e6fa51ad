//! Loading pipeline specifications from YAML

use std::fs;
use std::path::Path;

use super::schema::PipelineSpec;
use super::validate::{validate_spec, ConfigError};

/// Read, parse and validate the specification at `config_path`
///
/// ```no_run
/// use tabprep::config::load_config;
///
/// let spec = load_config("pipeline.yaml")?;
/// println!("splitting {}", spec.data.path.display());
/// # Ok::<(), tabprep::config::ConfigError>(())
/// ```
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<PipelineSpec, ConfigError> {
    let path = config_path.as_ref();
    let yaml_content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let spec: PipelineSpec = serde_yaml::from_str(&yaml_content)?;
    validate_spec(&spec)?;
    Ok(spec)
}

/// [`load_config`] when a file is given, the validated defaults otherwise
pub fn load_or_default(config_path: Option<&Path>) -> Result<PipelineSpec, ConfigError> {
    match config_path {
        Some(path) => load_config(path),
        None => {
            let spec = PipelineSpec::default();
            validate_spec(&spec)?;
            Ok(spec)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn yaml_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let file = yaml_file("split:\n  seed: 99\ntracking:\n  dir: runs\n");
        let spec = load_config(file.path()).unwrap();
        assert_eq!(spec.split.config.seed, 99);
        assert_eq!(spec.tracking.dir, Path::new("runs"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config("/definitely/not/a/config.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/definitely/not/a/config.yaml"));
    }

    #[test]
    fn test_load_malformed_yaml() {
        let file = yaml_file("split: [unclosed\n");
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let file = yaml_file("split:\n  test_ratio: 1.5\n");
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::InvalidTestRatio(_))
        ));
    }

    #[test]
    fn test_demo_config_spells_out_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/pipeline.yaml");
        assert_eq!(load_config(path).unwrap(), PipelineSpec::default());
    }

    #[test]
    fn test_load_or_default_without_file() {
        assert_eq!(load_or_default(None).unwrap(), PipelineSpec::default());
    }
}
