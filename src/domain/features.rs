//! Model-ready feature vectors and model-level errors.

/// Error type for classifier loading and evaluation.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Failed to read model: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed model file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid model: {0}")]
    Invalid(String),

    #[error("Expected {expected} features, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Feature '{0}' is not a finite number")]
    NonFiniteFeature(String),

    #[error("Model returned an unusable probability: {0}")]
    BadProbability(String),
}

/// Feature values in exactly the order a model consumes them.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    names: Vec<String>,
    values: Vec<f64>,
}

impl FeatureVector {
    /// Pair names with values.
    ///
    /// # Errors
    /// Returns `ModelError::DimensionMismatch` when the lengths differ.
    pub fn new(names: Vec<String>, values: Vec<f64>) -> Result<Self, ModelError> {
        if names.len() != values.len() {
            return Err(ModelError::DimensionMismatch {
                expected: names.len(),
                got: values.len(),
            });
        }
        Ok(Self { names, values })
    }

    /// For callers that build both halves from one iteration.
    pub(crate) fn from_parts(names: Vec<String>, values: Vec<f64>) -> Self {
        debug_assert_eq!(names.len(), values.len());
        Self { names, values }
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.values[i])
    }

    /// Reject NaN and infinities before they reach a model.
    ///
    /// # Errors
    /// Returns `ModelError::NonFiniteFeature` naming the first bad feature.
    pub fn ensure_finite(&self) -> Result<(), ModelError> {
        match self.values.iter().position(|v| !v.is_finite()) {
            Some(i) => Err(ModelError::NonFiniteFeature(self.names[i].clone())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch() {
        let err = FeatureVector::new(vec!["a".into()], vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            ModelError::DimensionMismatch { expected: 1, got: 2 }
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        let v = FeatureVector::new(vec!["a".into(), "b".into()], vec![1.0, f64::NAN]).unwrap();
        let err = v.ensure_finite().unwrap_err();
        assert!(err.to_string().contains("'b'"));
    }
}
