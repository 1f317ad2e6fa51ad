//! Predictors and the bundled centroid model format

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{PredictError, Result};

/// A loaded model that maps feature vectors to labels
pub trait Predictor {
    /// One label per row of `batch`, in order
    fn predict(&self, batch: &[Vec<f64>]) -> Result<Vec<String>>;
}

/// Per-feature standardisation applied before distances are measured
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standardizer {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl Standardizer {
    fn apply(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (m, s))| (x - m) / s)
            .collect()
    }
}

/// Class prototype in (possibly standardised) feature space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub label: String,
    pub center: Vec<f64>,
}

/// Nearest-centroid classifier stored as JSON
///
/// ```
/// use tabprep::predict::{CentroidModel, Predictor};
///
/// let model = CentroidModel::from_json(r#"{
///     "feature_names": ["x"],
///     "centroids": [{"label": "0", "center": [0.0]}, {"label": "1", "center": [10.0]}]
/// }"#).unwrap();
/// assert_eq!(model.predict(&[vec![2.0], vec![7.5]]).unwrap(), vec!["0", "1"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentroidModel {
    pub feature_names: Vec<String>,
    #[serde(default)]
    pub scaler: Option<Standardizer>,
    pub centroids: Vec<Centroid>,
}

impl CentroidModel {
    /// Parse and validate a model document
    pub fn from_json(json: &str) -> Result<Self> {
        let model: CentroidModel =
            serde_json::from_str(json).map_err(|e| PredictError::InvalidModel(e.to_string()))?;
        model.check()?;
        Ok(model)
    }

    /// Read and validate the model stored at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let load_error = |reason: String| PredictError::ModelLoad {
            uri: path.display().to_string(),
            reason,
        };
        let json = fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
        Self::from_json(&json).map_err(|e| match e {
            PredictError::InvalidModel(reason) => load_error(reason),
            other => other,
        })
    }

    /// Check that features, centroids and scaler agree in shape
    pub fn check(&self) -> Result<()> {
        let invalid = |reason: String| -> Result<()> { Err(PredictError::InvalidModel(reason)) };
        let width = self.feature_names.len();
        if width == 0 {
            return invalid("model has no features".into());
        }
        if self.centroids.is_empty() {
            return invalid("model has no centroids".into());
        }
        if let Some(c) = self.centroids.iter().find(|c| c.center.len() != width) {
            return invalid(format!(
                "centroid '{}' has {} coordinates, expected {width}",
                c.label,
                c.center.len()
            ));
        }
        if let Some(scaler) = &self.scaler {
            if scaler.mean.len() != width || scaler.scale.len() != width {
                return invalid(format!("scaler must have {width} means and scales"));
            }
            if scaler.scale.iter().any(|s| *s == 0.0 || !s.is_finite()) {
                return invalid("scaler scales must be finite and non-zero".into());
            }
        }
        Ok(())
    }

    fn nearest(&self, point: &[f64]) -> Option<&str> {
        let mut best: Option<(&Centroid, f64)> = None;
        for centroid in &self.centroids {
            let distance: f64 = centroid
                .center
                .iter()
                .zip(point)
                .map(|(c, x)| (c - x).powi(2))
                .sum();
            // strict comparison keeps the first centroid on ties
            if best.map_or(true, |(_, best_distance)| distance < best_distance) {
                best = Some((centroid, distance));
            }
        }
        best.map(|(centroid, _)| centroid.label.as_str())
    }
}

impl Predictor for CentroidModel {
    fn predict(&self, batch: &[Vec<f64>]) -> Result<Vec<String>> {
        // fields are public, so a hand-built model may never have been checked
        self.check()?;
        batch
            .iter()
            .enumerate()
            .map(|(i, row)| {
                if row.len() != self.feature_names.len() {
                    return Err(PredictError::Inference(format!(
                        "row {i} has {} features, model expects {}",
                        row.len(),
                        self.feature_names.len()
                    )));
                }
                if row.iter().any(|x| !x.is_finite()) {
                    return Err(PredictError::Inference(format!(
                        "row {i} contains a non-finite value"
                    )));
                }
                let label = match &self.scaler {
                    Some(scaler) => self.nearest(&scaler.apply(row)),
                    None => self.nearest(row),
                };
                label
                    .map(str::to_string)
                    .ok_or_else(|| PredictError::InvalidModel("model has no centroids".into()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_class() -> CentroidModel {
        CentroidModel {
            feature_names: vec!["a".into(), "b".into()],
            scaler: None,
            centroids: vec![
                Centroid {
                    label: "left".into(),
                    center: vec![0.0, 0.0],
                },
                Centroid {
                    label: "right".into(),
                    center: vec![4.0, 0.0],
                },
            ],
        }
    }

    #[test]
    fn test_nearest_centroid() {
        let labels = two_class()
            .predict(&[vec![1.0, 3.0], vec![3.5, -1.0]])
            .unwrap();
        assert_eq!(labels, vec!["left", "right"]);
    }

    #[test]
    fn test_tie_goes_to_first_centroid() {
        assert_eq!(two_class().predict(&[vec![2.0, 0.0]]).unwrap(), vec!["left"]);
    }

    #[test]
    fn test_scaler_changes_geometry() {
        let mut model = two_class();
        // second feature dominates once the first is shrunk
        model.scaler = Some(Standardizer {
            mean: vec![0.0, 0.0],
            scale: vec![100.0, 1.0],
        });
        model.centroids[1].center = vec![0.0, 5.0];
        assert_eq!(model.predict(&[vec![300.0, 4.0]]).unwrap(), vec!["right"]);
    }

    #[test]
    fn test_wrong_arity_is_inference_error() {
        assert!(matches!(
            two_class().predict(&[vec![1.0]]),
            Err(PredictError::Inference(_))
        ));
    }

    #[test]
    fn test_non_finite_input_is_inference_error() {
        assert!(matches!(
            two_class().predict(&[vec![f64::NAN, 0.0]]),
            Err(PredictError::Inference(_))
        ));
    }

    #[test]
    fn test_from_json_validates_shape() {
        let err = CentroidModel::from_json(
            r#"{"feature_names": ["a", "b"], "centroids": [{"label": "x", "center": [1.0]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, PredictError::InvalidModel(ref r) if r.contains("centroid 'x'")));

        let err = CentroidModel::from_json(r#"{"feature_names": ["a"], "centroids": []}"#)
            .unwrap_err();
        assert!(matches!(err, PredictError::InvalidModel(ref r) if r.contains("no centroids")));

        let err = CentroidModel::from_json(
            r#"{"feature_names": ["a"], "scaler": {"mean": [0.0], "scale": [0.0]},
                "centroids": [{"label": "x", "center": [1.0]}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("non-zero"));

        assert!(matches!(
            CentroidModel::from_json("{not json"),
            Err(PredictError::InvalidModel(_))
        ));
    }

    #[test]
    fn test_hand_built_model_without_centroids_errors() {
        let model = CentroidModel {
            feature_names: vec!["x".into()],
            scaler: None,
            centroids: vec![],
        };
        assert!(matches!(
            model.predict(&[vec![1.0]]),
            Err(PredictError::InvalidModel(ref r)) if r.contains("no centroids")
        ));
    }

    #[test]
    fn test_hand_built_model_with_ragged_centroid_errors() {
        let mut model = two_class();
        model.centroids[1].center.pop();
        assert!(matches!(
            model.predict(&[vec![1.0, 0.0]]),
            Err(PredictError::InvalidModel(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = CentroidModel::load(Path::new("/no/such/model.json")).unwrap_err();
        assert!(matches!(err, PredictError::ModelLoad { ref uri, .. } if uri.ends_with("model.json")));
    }

    #[test]
    fn test_load_roundtrip_through_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("model.json");
        fs::write(&path, serde_json::to_string(&two_class()).unwrap()).unwrap();
        assert_eq!(CentroidModel::load(&path).unwrap(), two_class());
    }
}
