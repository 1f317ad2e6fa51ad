//! Experiment Tracking Module
//!
//! Records parameters, metrics, tags and artifact bundles for each pipeline
//! step. Backed by pluggable storage via the
//! [`TrackingBackend`](storage::TrackingBackend) trait.
//!
//! # Architecture
//!
//! - **`ExperimentTracker`**: Top-level handle that manages runs for a named experiment
//! - **`Run`**: A single execution with parameters, metrics, tags and artifacts
//! - **`ActiveRun`**: Scoped handle given to [`ExperimentTracker::with_run`] closures
//! - **`RunRecorder`**: The narrow logging contract the pipeline steps depend on
//! - **`TrackingBackend`**: Pluggable persistence (JSON files, in-memory)
//!
//! # Example
//!
//! ```
//! use tabprep::tracking::{ExperimentTracker, RunRecorder, RunStatus, TrackingError};
//! use tabprep::tracking::storage::InMemoryBackend;
//!
//! # fn main() -> std::result::Result<(), TrackingError> {
//! let mut tracker = ExperimentTracker::new("iris-validation", InMemoryBackend::new());
//!
//! let run_id = tracker.with_run(Some("data_validation"), |run| {
//!     run.set_tag("ml.step", "data_validation")?;
//!     run.log_metric("num_rows", 150.0)?;
//!     run.log_param("validation_status", "Success")?;
//!     Ok::<_, TrackingError>(run.run_id().to_string())
//! })?;
//!
//! let run = tracker.get_run(&run_id)?;
//! assert_eq!(run.status, RunStatus::Completed);
//! assert_eq!(run.params["validation_status"], "Success");
//! # Ok(())
//! # }
//! ```

pub mod storage;


use std::collections::HashMap;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use storage::{ArtifactEntry, TrackingBackend, TrackingStorageError};

/// Status of a tracking run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// Run is actively recording
    Active,
    /// Run completed successfully
    Completed,
    /// Run failed
    Failed,
}

/// A single experiment run
///
/// Tracks parameters, metrics (per-step values), artifacts (uploaded files)
/// and tags (key-value metadata).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    /// Unique identifier for the run
    pub run_id: String,
    /// Optional human-readable name
    pub run_name: Option<String>,
    /// Parent experiment name
    pub experiment_name: String,
    /// Current status
    pub status: RunStatus,
    /// Parameters: key -> value (string-encoded)
    pub params: HashMap<String, String>,
    /// Metrics: key -> list of (value, step)
    pub metrics: HashMap<String, Vec<(f64, u64)>>,
    /// Uploaded artifacts
    pub artifacts: Vec<ArtifactEntry>,
    /// Tags: key -> value
    pub tags: HashMap<String, String>,
    /// Unix timestamp (ms) when the run started
    pub start_time_ms: Option<u64>,
    /// Unix timestamp (ms) when the run ended
    pub end_time_ms: Option<u64>,
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

impl Run {
    fn new(run_id: String, run_name: Option<String>, experiment_name: String) -> Self {
        Self {
            run_id,
            run_name,
            experiment_name,
            status: RunStatus::Active,
            params: HashMap::new(),
            metrics: HashMap::new(),
            artifacts: Vec::new(),
            tags: HashMap::new(),
            start_time_ms: Some(now_ms()),
            end_time_ms: None,
        }
    }

    /// Most recent value of a metric
    #[must_use]
    pub fn latest_metric(&self, key: &str) -> Option<f64> {
        self.metrics
            .get(key)
            .and_then(|points| points.last())
            .map(|(value, _)| *value)
    }
}

/// Errors from experiment tracking operations
#[derive(Debug, thiserror::Error)]
pub enum TrackingError {
    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Run is not active: {0}")]
    RunNotActive(String),

    #[error("Storage error: {0}")]
    Storage(#[from] TrackingStorageError),
}

/// Result alias for tracking operations
pub type Result<T> = std::result::Result<T, TrackingError>;

/// Logging surface of one open run
///
/// This is all a pipeline step needs from the tracking service; any backend
/// (or a test double) that implements it can stand in.
pub trait RunRecorder {
    /// Identifier of the open run
    fn run_id(&self) -> &str;

    /// Set a string tag on the run
    fn set_tag(&mut self, key: &str, value: &str) -> Result<()>;

    /// Log a named parameter
    fn log_param(&mut self, key: &str, value: &str) -> Result<()>;

    /// Log a named numeric metric
    fn log_metric(&mut self, key: &str, value: f64) -> Result<()>;

    /// Upload every file under `local_dir` as the bundle `artifact_path`
    fn log_artifacts(&mut self, local_dir: &Path, artifact_path: &str)
        -> Result<Vec<ArtifactEntry>>;
}

/// Experiment tracker
///
/// Manages runs under a single experiment name. Persists run data through a
/// pluggable [`TrackingBackend`] when each run ends.
#[derive(Debug)]
pub struct ExperimentTracker<B: TrackingBackend> {
    experiment_name: String,
    backend: B,
    /// Active runs held in memory for fast mutation
    active_runs: HashMap<String, Run>,
}

impl<B: TrackingBackend> ExperimentTracker<B> {
    /// Create a new tracker for the given experiment name
    pub fn new(experiment_name: impl Into<String>, backend: B) -> Self {
        Self {
            experiment_name: experiment_name.into(),
            backend,
            active_runs: HashMap::new(),
        }
    }

    #[must_use]
    pub fn experiment_name(&self) -> &str {
        &self.experiment_name
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Start a new run, optionally with a human-readable name
    ///
    /// Returns the run ID (a UUID v4 in simple form).
    pub fn start_run(&mut self, run_name: Option<&str>) -> Result<String> {
        let run_id = uuid::Uuid::new_v4().simple().to_string();

        let run = Run::new(
            run_id.clone(),
            run_name.map(String::from),
            self.experiment_name.clone(),
        );

        self.active_runs.insert(run_id.clone(), run);
        Ok(run_id)
    }

    /// End a run with the given status, persisting it to the backend
    pub fn end_run(&mut self, run_id: &str, status: RunStatus) -> Result<()> {
        let mut run = self
            .active_runs
            .remove(run_id)
            .ok_or_else(|| TrackingError::RunNotFound(run_id.to_string()))?;

        run.status = status;
        run.end_time_ms = Some(now_ms());

        self.backend.save_run(&run)?;
        Ok(())
    }

    /// Run `f` inside a fresh run that is always closed afterwards
    ///
    /// The run ends as [`RunStatus::Completed`] when `f` returns `Ok` and as
    /// [`RunStatus::Failed`] when it returns `Err`. An error from `f` takes
    /// precedence over an error while closing the run.
    pub fn with_run<T, E, F>(&mut self, run_name: Option<&str>, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut ActiveRun<'_, B>) -> std::result::Result<T, E>,
        E: From<TrackingError>,
    {
        let run_id = self.start_run(run_name)?;

        let outcome = {
            let mut active = ActiveRun {
                tracker: &mut *self,
                run_id: run_id.clone(),
            };
            f(&mut active)
        };

        let status = if outcome.is_ok() {
            RunStatus::Completed
        } else {
            RunStatus::Failed
        };
        let closed = self.end_run(&run_id, status);

        let value = outcome?;
        closed?;
        Ok(value)
    }

    fn active_run_mut(&mut self, run_id: &str) -> Result<&mut Run> {
        self.active_runs
            .get_mut(run_id)
            .ok_or_else(|| TrackingError::RunNotActive(run_id.to_string()))
    }

    /// Set a tag on an active run
    pub fn set_tag(&mut self, run_id: &str, key: &str, value: &str) -> Result<()> {
        let run = self.active_run_mut(run_id)?;
        run.tags.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Log a single parameter
    pub fn log_param(&mut self, run_id: &str, key: &str, value: &str) -> Result<()> {
        let run = self.active_run_mut(run_id)?;
        run.params.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Log a metric value at a given step
    pub fn log_metric(&mut self, run_id: &str, key: &str, value: f64, step: u64) -> Result<()> {
        let run = self.active_run_mut(run_id)?;
        run.metrics
            .entry(key.to_string())
            .or_default()
            .push((value, step));
        Ok(())
    }

    /// Upload the files under `local_dir` through the backend and record them on the run
    pub fn log_artifacts(
        &mut self,
        run_id: &str,
        local_dir: &Path,
        artifact_path: &str,
    ) -> Result<Vec<ArtifactEntry>> {
        if !self.active_runs.contains_key(run_id) {
            return Err(TrackingError::RunNotActive(run_id.to_string()));
        }

        let entries = self
            .backend
            .store_artifacts(run_id, artifact_path, local_dir)?;

        let run = self.active_run_mut(run_id)?;
        run.artifacts.extend(entries.iter().cloned());
        Ok(entries)
    }

    /// Retrieve a run by ID
    ///
    /// Checks active (in-memory) runs first, then falls back to the backend.
    pub fn get_run(&self, run_id: &str) -> Result<Run> {
        if let Some(run) = self.active_runs.get(run_id) {
            return Ok(run.clone());
        }
        self.backend
            .load_run(run_id)
            .map_err(|e| TrackingError::RunNotFound(format!("{run_id}: {e}")))
    }

    /// List runs of this experiment (active + persisted), oldest first
    pub fn list_runs(&self) -> Result<Vec<Run>> {
        let mut runs: Vec<Run> = self.active_runs.values().cloned().collect();
        let persisted = self.backend.list_runs()?;
        for r in persisted {
            if r.experiment_name == self.experiment_name && !self.active_runs.contains_key(&r.run_id)
            {
                runs.push(r);
            }
        }
        runs.sort_by(|a, b| {
            a.start_time_ms
                .cmp(&b.start_time_ms)
                .then_with(|| a.run_id.cmp(&b.run_id))
        });
        Ok(runs)
    }
}

/// Handle to the run opened by [`ExperimentTracker::with_run`]
#[derive(Debug)]
pub struct ActiveRun<'t, B: TrackingBackend> {
    tracker: &'t mut ExperimentTracker<B>,
    run_id: String,
}

impl<B: TrackingBackend> ActiveRun<'_, B> {
    /// Name of the experiment this run belongs to
    #[must_use]
    pub fn experiment_name(&self) -> &str {
        self.tracker.experiment_name()
    }

    /// Snapshot of the run as recorded so far
    pub fn snapshot(&self) -> Result<Run> {
        self.tracker.get_run(&self.run_id)
    }
}

impl<B: TrackingBackend> RunRecorder for ActiveRun<'_, B> {
    fn run_id(&self) -> &str {
        &self.run_id
    }

    fn set_tag(&mut self, key: &str, value: &str) -> Result<()> {
        self.tracker.set_tag(&self.run_id, key, value)
    }

    fn log_param(&mut self, key: &str, value: &str) -> Result<()> {
        self.tracker.log_param(&self.run_id, key, value)
    }

    fn log_metric(&mut self, key: &str, value: f64) -> Result<()> {
        self.tracker.log_metric(&self.run_id, key, value, 0)
    }

    fn log_artifacts(
        &mut self,
        local_dir: &Path,
        artifact_path: &str,
    ) -> Result<Vec<ArtifactEntry>> {
        self.tracker
            .log_artifacts(&self.run_id, local_dir, artifact_path)
    }
}
