//! Risk classification: turn a model's output into a bucketed result.

use crate::domain::{Disease, FeatureVector, ModelError, PredictionResult};
use crate::ports::Classifier;
use crate::HealthError;

/// Score `vector` with `model` and bucket the positive-class probability.
///
/// # Errors
/// Returns `HealthError::Prediction` if the vector holds non-finite values,
/// the model rejects it, or the model's output has no usable positive-class
/// probability. No risk level is ever assumed on failure.
pub fn classify<C: Classifier + ?Sized>(
    disease: Disease,
    vector: &FeatureVector,
    model: &C,
) -> Result<PredictionResult, HealthError> {
    vector
        .ensure_finite()
        .map_err(|e| HealthError::prediction(disease, e))?;

    let proba = model
        .predict_proba(vector.values())
        .map_err(|e| HealthError::prediction(disease, e))?;

    let positive = model.positive_class();
    let p = positive_probability(&proba, positive).map_err(|e| HealthError::prediction(disease, e))?;

    let result = PredictionResult::from_percentage(disease, p * 100.0);
    tracing::info!("{} prediction complete: {} risk", disease, result.risk);
    Ok(result)
}

fn positive_probability(proba: &[f64], index: usize) -> Result<f64, ModelError> {
    let p = *proba.get(index).ok_or_else(|| {
        ModelError::BadProbability(format!(
            "no class {index} in output of {} classes",
            proba.len()
        ))
    })?;
    if !p.is_finite() || !(0.0..=1.0).contains(&p) {
        return Err(ModelError::BadProbability(p.to_string()));
    }
    Ok(p)
}
