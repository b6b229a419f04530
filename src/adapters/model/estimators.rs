//! Fitted estimators exported from the training notebooks.
//!
//! Each estimator mirrors the parameters of its scikit-learn counterpart
//! closely enough to reproduce `predict_proba` for a single sample.

use serde::{Deserialize, Serialize};

use crate::domain::ModelError;
use crate::ports::Classifier;

fn check_dimension(expected: usize, features: &[f64]) -> Result<(), ModelError> {
    if features.len() != expected {
        return Err(ModelError::DimensionMismatch {
            expected,
            got: features.len(),
        });
    }
    Ok(())
}

fn check_names(names: Option<&Vec<String>>, n: usize) -> Result<(), ModelError> {
    if let Some(names) = names {
        if names.len() != n {
            return Err(ModelError::Invalid(format!(
                "feature_names has {} entries but the model uses {n} features",
                names.len()
            )));
        }
    }
    Ok(())
}

/// Per-feature standardization applied before the linear term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Logistic regression with optional standardization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub scaler: Option<StandardScaler>,
}

impl LogisticRegression {
    /// Sanity-check parameter shapes.
    ///
    /// # Errors
    /// Returns `ModelError::Invalid` if the parameters are inconsistent.
    pub fn validate(&self) -> Result<(), ModelError> {
        let n = self.coefficients.len();
        if n == 0 {
            return Err(ModelError::Invalid("logistic regression has no coefficients".into()));
        }
        check_names(self.feature_names.as_ref(), n)?;
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::Invalid("non-finite coefficient".into()));
        }
        if let Some(scaler) = &self.scaler {
            if scaler.mean.len() != n || scaler.scale.len() != n {
                return Err(ModelError::Invalid(
                    "scaler parameter lengths do not match coefficients".into(),
                ));
            }
            if scaler.scale.iter().any(|s| *s == 0.0 || !s.is_finite()) {
                return Err(ModelError::Invalid("scaler has a zero or non-finite scale".into()));
            }
        }
        Ok(())
    }

    fn decision_function(&self, features: &[f64]) -> f64 {
        let mut z = self.intercept;
        for (i, (x, coef)) in features.iter().zip(&self.coefficients).enumerate() {
            let x = match &self.scaler {
                Some(s) => (x - s.mean[i]) / s.scale[i],
                None => *x,
            };
            z += coef * x;
        }
        z
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl Classifier for LogisticRegression {
    fn expected_features(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        check_dimension(self.coefficients.len(), features)?;
        let p = sigmoid(self.decision_function(features));
        Ok(vec![1.0 - p, p])
    }
}

/// One node of a flattened decision tree.
///
/// Leaves have `feature < 0`; internal nodes send a sample left when
/// `x[feature] <= threshold`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    pub feature: i64,
    #[serde(default)]
    pub threshold: f64,
    #[serde(default)]
    pub left: usize,
    #[serde(default)]
    pub right: usize,
    /// Class weights at this node (negative, positive).
    #[serde(default)]
    pub value: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    fn validate(&self, n_features: usize) -> Result<(), ModelError> {
        if self.nodes.is_empty() {
            return Err(ModelError::Invalid("tree has no nodes".into()));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if node.feature < 0 {
                if node.value.len() != 2
                    || node.value.iter().any(|v| *v < 0.0 || !v.is_finite())
                    || node.value.iter().sum::<f64>() <= 0.0
                {
                    return Err(ModelError::Invalid(format!(
                        "leaf {i} must carry two non-negative class weights"
                    )));
                }
                continue;
            }
            if node.feature as usize >= n_features {
                return Err(ModelError::Invalid(format!(
                    "node {i} splits on feature {} of {n_features}",
                    node.feature
                )));
            }
            // Children must come after their parent; this also rules out cycles.
            for child in [node.left, node.right] {
                if child <= i || child >= self.nodes.len() {
                    return Err(ModelError::Invalid(format!(
                        "node {i} has invalid child index {child}"
                    )));
                }
            }
        }
        Ok(())
    }

    fn leaf_distribution(&self, features: &[f64]) -> [f64; 2] {
        let mut idx = 0;
        loop {
            let node = &self.nodes[idx];
            if node.feature < 0 {
                let total = node.value[0] + node.value[1];
                return [node.value[0] / total, node.value[1] / total];
            }
            idx = if features[node.feature as usize] <= node.threshold {
                node.left
            } else {
                node.right
            };
        }
    }
}

/// Random forest: the mean of per-tree leaf class distributions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    pub n_features: usize,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Sanity-check the forest structure.
    ///
    /// # Errors
    /// Returns `ModelError::Invalid` on empty forests, bad child indices,
    /// out-of-range split features or malformed leaves.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.n_features == 0 {
            return Err(ModelError::Invalid("random forest declares zero features".into()));
        }
        if self.trees.is_empty() {
            return Err(ModelError::Invalid("random forest has no trees".into()));
        }
        check_names(self.feature_names.as_ref(), self.n_features)?;
        for (t, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features)
                .map_err(|e| ModelError::Invalid(format!("tree {t}: {e}")))?;
        }
        Ok(())
    }
}

impl Classifier for RandomForest {
    fn expected_features(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        check_dimension(self.n_features, features)?;
        let mut sum = [0.0, 0.0];
        for tree in &self.trees {
            let [neg, pos] = tree.leaf_distribution(features);
            sum[0] += neg;
            sum[1] += pos;
        }
        let n = self.trees.len() as f64;
        Ok(vec![sum[0] / n, sum[1] / n])
    }
}

/// A model that always returns the same probabilities.
///
/// Used as a fixture and for smoke deployments where no fitted model is
/// available yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstantModel {
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub probabilities: Vec<f64>,
}

impl ConstantModel {
    /// # Errors
    /// Returns `ModelError::Invalid` unless there are at least two
    /// probabilities, each within `[0, 1]`.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.probabilities.len() < 2 {
            return Err(ModelError::Invalid("constant model needs two class probabilities".into()));
        }
        if self
            .probabilities
            .iter()
            .any(|p| !p.is_finite() || !(0.0..=1.0).contains(p))
        {
            return Err(ModelError::Invalid("probabilities must lie in [0, 1]".into()));
        }
        Ok(())
    }
}

impl Classifier for ConstantModel {
    fn expected_features(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        if let Some(names) = &self.feature_names {
            check_dimension(names.len(), features)?;
        }
        Ok(self.probabilities.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(neg: f64, pos: f64) -> TreeNode {
        TreeNode {
            feature: -1,
            threshold: 0.0,
            left: 0,
            right: 0,
            value: vec![neg, pos],
        }
    }

    fn split(feature: i64, threshold: f64, left: usize, right: usize) -> TreeNode {
        TreeNode {
            feature,
            threshold,
            left,
            right,
            value: Vec::new(),
        }
    }

    #[test]
    fn test_logistic_at_mean_is_sigmoid_of_intercept() {
        let model = LogisticRegression {
            feature_names: None,
            coefficients: vec![0.5, -1.0],
            intercept: 0.0,
            scaler: Some(StandardScaler {
                mean: vec![100.0, 30.0],
                scale: vec![10.0, 5.0],
            }),
        };
        model.validate().unwrap();

        let proba = model.predict_proba(&[100.0, 30.0]).unwrap();
        assert!((proba[1] - 0.5).abs() < 1e-12);

        // One std above the mean on the first feature: sigmoid(0.5).
        let proba = model.predict_proba(&[110.0, 30.0]).unwrap();
        assert!((proba[1] - 1.0 / (1.0 + (-0.5f64).exp())).abs() < 1e-12);
        assert!((proba[0] + proba[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_logistic_dimension_mismatch() {
        let model = LogisticRegression {
            feature_names: None,
            coefficients: vec![1.0, 1.0, 1.0],
            intercept: 0.0,
            scaler: None,
        };
        let err = model.predict_proba(&[1.0]).unwrap_err();
        assert!(matches!(err, ModelError::DimensionMismatch { expected: 3, got: 1 }));
    }

    #[test]
    fn test_logistic_rejects_zero_scale() {
        let model = LogisticRegression {
            feature_names: None,
            coefficients: vec![1.0],
            intercept: 0.0,
            scaler: Some(StandardScaler {
                mean: vec![0.0],
                scale: vec![0.0],
            }),
        };
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_forest_averages_trees() {
        let forest = RandomForest {
            n_features: 1,
            feature_names: Some(vec!["Glucose".into()]),
            trees: vec![
                DecisionTree {
                    nodes: vec![split(0, 140.0, 1, 2), leaf(9.0, 1.0), leaf(1.0, 3.0)],
                },
                DecisionTree {
                    nodes: vec![leaf(1.0, 1.0)],
                },
            ],
        };
        forest.validate().unwrap();

        // Boundary goes left (<=).
        let low = forest.predict_proba(&[140.0]).unwrap();
        assert!((low[1] - (0.1 + 0.5) / 2.0).abs() < 1e-12);

        let high = forest.predict_proba(&[200.0]).unwrap();
        assert!((high[1] - (0.75 + 0.5) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_forest_rejects_backward_child() {
        let forest = RandomForest {
            n_features: 1,
            feature_names: None,
            trees: vec![DecisionTree {
                nodes: vec![split(0, 1.0, 0, 1), leaf(1.0, 0.0)],
            }],
        };
        assert!(forest.validate().is_err());
    }

    #[test]
    fn test_forest_rejects_unknown_feature() {
        let forest = RandomForest {
            n_features: 1,
            feature_names: None,
            trees: vec![DecisionTree {
                nodes: vec![split(3, 1.0, 1, 2), leaf(1.0, 0.0), leaf(0.0, 1.0)],
            }],
        };
        assert!(forest.validate().is_err());
    }

    #[test]
    fn test_constant_checks_names_length() {
        let model = ConstantModel {
            feature_names: Some(vec!["a".into(), "b".into()]),
            probabilities: vec![0.2, 0.8],
        };
        model.validate().unwrap();
        assert_eq!(model.predict_proba(&[1.0, 2.0]).unwrap(), vec![0.2, 0.8]);
        assert!(model.predict_proba(&[1.0]).is_err());
    }
}
