//! Single-example prediction smoke test
//!
//! Resolves a registered model, feeds it one example and reports the actual
//! and predicted labels side by side.
//!
//! # Example
//!
//! ```
//! use tabprep::predict::{predict_one, ActualLabel, Example, LabelMap, ModelSource, Predictor, PredictError};
//! use tabprep::storage::registry::ModelRef;
//!
//! struct AlwaysSetosa;
//! impl Predictor for AlwaysSetosa {
//!     fn predict(&self, batch: &[Vec<f64>]) -> Result<Vec<String>, PredictError> {
//!         Ok(vec!["0".to_string(); batch.len()])
//!     }
//! }
//!
//! struct Fixed;
//! impl ModelSource for Fixed {
//!     fn load(&self, _: &ModelRef) -> Result<Box<dyn Predictor>, PredictError> {
//!         Ok(Box::new(AlwaysSetosa))
//!     }
//! }
//!
//! let example = Example::new(vec![5.1, 3.5, 1.4, 0.2], ActualLabel::Index(0));
//! let record = predict_one(&Fixed, &ModelRef::version("iris", 1), &example, &LabelMap::default()).unwrap();
//! assert_eq!(record.predicted_label, "setosa");
//! assert!(record.matches());
//! ```

mod error;
mod example;
mod labels;
mod model;
mod source;


pub use error::{PredictError, Result};
pub use example::{ActualLabel, Example, PredictionRecord};
pub use labels::{LabelMap, UNKNOWN_LABEL};
pub use model::{Centroid, CentroidModel, Predictor, Standardizer};
pub use source::{ModelSource, RegistryModelSource};

use crate::storage::registry::ModelRef;

/// Load the model behind `reference` and predict `example`
///
/// The feature vector is passed to the model unchanged; any preprocessing is
/// the model's own. Resolution failures are not retried.
pub fn predict_one<S: ModelSource + ?Sized>(
    source: &S,
    reference: &ModelRef,
    example: &Example,
    labels: &LabelMap,
) -> Result<PredictionRecord> {
    let model = source.load(reference)?;
    let raw = model
        .predict(std::slice::from_ref(&example.features))?
        .into_iter()
        .next()
        .ok_or(PredictError::EmptyPrediction)?;

    Ok(PredictionRecord {
        features: example.features.clone(),
        actual_label: example.actual.resolve(labels),
        predicted_label: labels.resolve(&raw),
    })
}
