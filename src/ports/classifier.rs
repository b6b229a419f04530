//! Classifier port: Trait for pre-trained binary disease models.
//!
//! This trait abstracts the model format (JSON exports of fitted
//! estimators) from the prediction pipeline.

use std::sync::Arc;

use crate::domain::{Disease, ModelError};

/// A fitted binary classifier.
///
/// Implementations are immutable once loaded and shared read-only across
/// requests.
pub trait Classifier: Send + Sync {
    /// Feature names in the order the model was trained with, if the
    /// model declares them.
    fn expected_features(&self) -> Option<&[String]>;

    /// Class probabilities for one sample, negative class first.
    ///
    /// # Errors
    /// Returns `ModelError::DimensionMismatch` if `features` does not have
    /// the length the model was fitted on.
    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ModelError>;

    /// Index of the disease-present class in `predict_proba` output.
    fn positive_class(&self) -> usize {
        1
    }
}

/// A loaded model together with a fingerprint of the resource it came from.
#[derive(Clone)]
pub struct LoadedModel {
    pub classifier: Arc<dyn Classifier>,

    /// Hex SHA-256 of the serialized model bytes.
    pub fingerprint: String,
}

impl std::fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModel")
            .field("fingerprint", &self.fingerprint)
            .field(
                "expected_features",
                &self.classifier.expected_features().map(<[String]>::len),
            )
            .finish()
    }
}

/// Where serialized models come from.
pub trait ModelSource {
    /// Load the model for `disease`.
    ///
    /// # Returns
    /// `None` if no resource exists for this disease.
    ///
    /// # Errors
    /// Returns error if the resource exists but cannot be read or decoded.
    fn load(&self, disease: Disease) -> Result<Option<LoadedModel>, ModelError>;
}
