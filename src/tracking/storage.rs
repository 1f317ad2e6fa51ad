//! Tracking storage backends
//!
//! Provides the `TrackingBackend` trait, a JSON file-based implementation
//! for persisting runs and artifact bundles to disk, and an in-memory
//! implementation for tests.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{Run, RunStatus};

/// Errors from tracking storage operations
#[derive(Debug, thiserror::Error)]
pub enum TrackingStorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Artifact directory not found: {0}")]
    ArtifactDirNotFound(String),
}

/// Result alias for tracking storage operations
pub type Result<T> = std::result::Result<T, TrackingStorageError>;

/// One uploaded artifact file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactEntry {
    /// Path inside the run's artifact tree, `/`-separated (e.g. `processed_data/train.csv`)
    pub path: String,
    /// File size in bytes
    pub size_bytes: u64,
    /// Content digest, `sha256-<hex>`
    pub sha256: String,
}

/// Serializable snapshot of a run for persistence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub run_id: String,
    pub run_name: Option<String>,
    pub experiment_name: String,
    pub status: RunStatus,
    pub params: HashMap<String, String>,
    pub metrics: HashMap<String, Vec<MetricEntry>>,
    #[serde(default)]
    pub artifacts: Vec<ArtifactEntry>,
    pub tags: HashMap<String, String>,
    pub start_time_ms: Option<u64>,
    pub end_time_ms: Option<u64>,
}

/// A single metric data point for serialization
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricEntry {
    pub value: f64,
    pub step: u64,
}

impl From<&Run> for RunRecord {
    fn from(run: &Run) -> Self {
        Self {
            run_id: run.run_id.clone(),
            run_name: run.run_name.clone(),
            experiment_name: run.experiment_name.clone(),
            status: run.status,
            params: run.params.clone(),
            metrics: run
                .metrics
                .iter()
                .map(|(k, v)| {
                    (
                        k.clone(),
                        v.iter()
                            .map(|(val, step)| MetricEntry {
                                value: *val,
                                step: *step,
                            })
                            .collect(),
                    )
                })
                .collect(),
            artifacts: run.artifacts.clone(),
            tags: run.tags.clone(),
            start_time_ms: run.start_time_ms,
            end_time_ms: run.end_time_ms,
        }
    }
}

impl RunRecord {
    /// Convert back into a `Run`
    pub fn into_run(self) -> Run {
        Run {
            run_id: self.run_id,
            run_name: self.run_name,
            experiment_name: self.experiment_name,
            status: self.status,
            params: self.params,
            metrics: self
                .metrics
                .into_iter()
                .map(|(k, v)| (k, v.into_iter().map(|e| (e.value, e.step)).collect()))
                .collect(),
            artifacts: self.artifacts,
            tags: self.tags,
            start_time_ms: self.start_time_ms,
            end_time_ms: self.end_time_ms,
        }
    }
}

/// Digest of a byte slice in the `sha256-<hex>` form used by artifact entries
pub fn sha256_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("sha256-{}", hex::encode(hasher.finalize()))
}

/// Regular files under `root`, recursively, with their `/`-separated relative paths
///
/// Sorted by relative path so bundles are listed deterministically.
fn walk_files(root: &Path) -> Result<Vec<(PathBuf, String)>> {
    if !root.is_dir() {
        return Err(TrackingStorageError::ArtifactDirNotFound(
            root.display().to_string(),
        ));
    }

    let mut files = Vec::new();
    let mut pending = vec![(root.to_path_buf(), String::new())];
    while let Some((dir, prefix)) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let relative = if prefix.is_empty() {
                name
            } else {
                format!("{prefix}/{name}")
            };
            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                pending.push((entry.path(), relative));
            } else if file_type.is_file() {
                files.push((entry.path(), relative));
            }
        }
    }
    files.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(files)
}

fn bundle_path(artifact_path: &str, relative: &str) -> String {
    let prefix = artifact_path.trim_matches('/');
    if prefix.is_empty() {
        relative.to_string()
    } else {
        format!("{prefix}/{relative}")
    }
}

/// Trait for tracking storage backends
///
/// Implementations persist and retrieve experiment runs and their artifacts.
pub trait TrackingBackend {
    /// Save a run to the backend
    fn save_run(&mut self, run: &Run) -> Result<()>;

    /// Load a run by its ID
    fn load_run(&self, run_id: &str) -> Result<Run>;

    /// List all stored runs
    fn list_runs(&self) -> Result<Vec<Run>>;

    /// Upload every file under `local_dir` as the bundle `artifact_path` of `run_id`
    fn store_artifacts(
        &mut self,
        run_id: &str,
        artifact_path: &str,
        local_dir: &Path,
    ) -> Result<Vec<ArtifactEntry>>;
}

/// JSON file-based tracking backend
///
/// Stores each run as `{dir}/{run_id}.json` and copies artifact bundles into
/// `{dir}/artifacts/{run_id}/{artifact_path}/`.
///
/// # Example
///
/// ```no_run
/// use tabprep::tracking::storage::JsonFileBackend;
///
/// let backend = JsonFileBackend::new("mlruns");
/// assert!(backend.artifact_root("abc").ends_with("artifacts/abc"));
/// ```
#[derive(Debug)]
pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    /// Create a backend rooted at `dir`; the directory is created on first write
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Root directory of the backend
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Directory holding the artifacts of `run_id`
    #[must_use]
    pub fn artifact_root(&self, run_id: &str) -> PathBuf {
        self.dir.join("artifacts").join(run_id)
    }

    fn run_path(&self, run_id: &str) -> PathBuf {
        self.dir.join(format!("{run_id}.json"))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        Ok(())
    }
}

impl TrackingBackend for JsonFileBackend {
    fn save_run(&mut self, run: &Run) -> Result<()> {
        self.ensure_dir()?;
        let record = RunRecord::from(run);
        let json = serde_json::to_string_pretty(&record)?;
        fs::write(self.run_path(&run.run_id), json)?;
        Ok(())
    }

    fn load_run(&self, run_id: &str) -> Result<Run> {
        let path = self.run_path(run_id);
        if !path.exists() {
            return Err(TrackingStorageError::RunNotFound(run_id.to_string()));
        }
        let json = fs::read_to_string(path)?;
        let record: RunRecord = serde_json::from_str(&json)?;
        Ok(record.into_run())
    }

    fn list_runs(&self) -> Result<Vec<Run>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut runs = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("json") {
                let json = fs::read_to_string(&path)?;
                let record: RunRecord = serde_json::from_str(&json)?;
                runs.push(record.into_run());
            }
        }
        runs.sort_by(|a, b| a.run_id.cmp(&b.run_id));
        Ok(runs)
    }

    fn store_artifacts(
        &mut self,
        run_id: &str,
        artifact_path: &str,
        local_dir: &Path,
    ) -> Result<Vec<ArtifactEntry>> {
        let files = walk_files(local_dir)?;
        let root = self.artifact_root(run_id);

        let mut entries = Vec::with_capacity(files.len());
        for (source, relative) in files {
            let bytes = fs::read(&source)?;
            let path = bundle_path(artifact_path, &relative);
            let target = root.join(&path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, &bytes)?;
            entries.push(ArtifactEntry {
                path,
                size_bytes: bytes.len() as u64,
                sha256: sha256_digest(&bytes),
            });
        }
        Ok(entries)
    }
}

/// In-memory tracking backend for testing
///
/// Stores runs in a `HashMap` and keeps only the digests of uploaded
/// artifacts. No persistence.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    runs: HashMap<String, RunRecord>,
    artifacts: HashMap<String, Vec<ArtifactEntry>>,
}

impl InMemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Artifacts uploaded for `run_id`
    #[must_use]
    pub fn artifacts(&self, run_id: &str) -> &[ArtifactEntry] {
        self.artifacts.get(run_id).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl TrackingBackend for InMemoryBackend {
    fn save_run(&mut self, run: &Run) -> Result<()> {
        self.runs.insert(run.run_id.clone(), RunRecord::from(run));
        Ok(())
    }

    fn load_run(&self, run_id: &str) -> Result<Run> {
        self.runs
            .get(run_id)
            .map(|r| r.clone().into_run())
            .ok_or_else(|| TrackingStorageError::RunNotFound(run_id.to_string()))
    }

    fn list_runs(&self) -> Result<Vec<Run>> {
        let mut runs: Vec<Run> = self.runs.values().map(|r| r.clone().into_run()).collect();
        runs.sort_by(|a, b| a.run_id.cmp(&b.run_id));
        Ok(runs)
    }

    fn store_artifacts(
        &mut self,
        run_id: &str,
        artifact_path: &str,
        local_dir: &Path,
    ) -> Result<Vec<ArtifactEntry>> {
        let mut entries = Vec::new();
        for (source, relative) in walk_files(local_dir)? {
            let bytes = fs::read(&source)?;
            entries.push(ArtifactEntry {
                path: bundle_path(artifact_path, &relative),
                size_bytes: bytes.len() as u64,
                sha256: sha256_digest(&bytes),
            });
        }
        self.artifacts
            .entry(run_id.to_string())
            .or_default()
            .extend(entries.iter().cloned());
        Ok(entries)
    }
}
