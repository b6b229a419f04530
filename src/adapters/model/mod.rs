//! Model file adapter: Implementation of ModelSource over a directory of
//! JSON model exports.
//!
//! Each disease has one file, `<disease>_model.json`, tagged by estimator
//! kind:
//!
//! ```json
//! {"kind": "logistic_regression", "feature_names": ["Glucose", "BMI"],
//!  "coefficients": [0.03, 0.08], "intercept": -7.1,
//!  "scaler": {"mean": [120.0, 32.0], "scale": [31.0, 7.8]}}
//! ```
//!
//! A missing file is not an error; the disease is simply unavailable.

mod estimators;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{Disease, ModelError};
use crate::ports::{Classifier, LoadedModel, ModelSource};

pub use estimators::{
    ConstantModel, DecisionTree, LogisticRegression, RandomForest, StandardScaler, TreeNode,
};

/// On-disk model representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SerializedModel {
    LogisticRegression(LogisticRegression),
    RandomForest(RandomForest),
    Constant(ConstantModel),
}

impl SerializedModel {
    /// Validate parameters and hand back a shareable classifier.
    ///
    /// # Errors
    /// Returns `ModelError::Invalid` if the parameters are inconsistent.
    pub fn into_classifier(self) -> Result<Arc<dyn Classifier>, ModelError> {
        Ok(match self {
            Self::LogisticRegression(m) => {
                m.validate()?;
                Arc::new(m)
            }
            Self::RandomForest(m) => {
                m.validate()?;
                Arc::new(m)
            }
            Self::Constant(m) => {
                m.validate()?;
                Arc::new(m)
            }
        })
    }
}

pub(crate) fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Decode a model from serialized bytes.
///
/// # Errors
/// Returns `ModelError::Parse` for malformed JSON and `ModelError::Invalid`
/// for inconsistent parameters.
pub fn decode_model(bytes: &[u8]) -> Result<LoadedModel, ModelError> {
    let serialized: SerializedModel = serde_json::from_slice(bytes)?;
    Ok(LoadedModel {
        classifier: serialized.into_classifier()?,
        fingerprint: sha256_hex(bytes),
    })
}

/// Reads `<disease>_model.json` files from a directory.
#[derive(Debug, Clone)]
pub struct JsonModelStore {
    dir: PathBuf,
}

impl JsonModelStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the model resource for `disease`.
    #[must_use]
    pub fn path_for(&self, disease: Disease) -> PathBuf {
        self.dir.join(disease.model_file_name())
    }
}

impl ModelSource for JsonModelStore {
    fn load(&self, disease: Disease) -> Result<Option<LoadedModel>, ModelError> {
        let path = self.path_for(disease);
        if !path.is_file() {
            return Ok(None);
        }

        let bytes = std::fs::read(&path)?;
        let model = decode_model(&bytes)?;

        tracing::debug!(
            "Decoded {} model from {:?} ({} bytes)",
            disease,
            path,
            bytes.len()
        );
        Ok(Some(model))
    }
}
