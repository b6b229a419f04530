//! Prediction results and the fixed risk policy.

use serde::{Deserialize, Serialize};

use crate::domain::disease::Disease;

/// Probability (percent) at which risk becomes `Moderate`.
pub const MODERATE_THRESHOLD: f64 = 33.0;

/// Probability (percent) at which risk becomes `High`.
pub const HIGH_THRESHOLD: f64 = 66.0;

/// Three-level risk category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Bucket a percentage. Bounds are half-open: 33.0 is `Moderate`,
    /// 66.0 is `High`.
    #[must_use]
    pub fn from_percentage(probability: f64) -> Self {
        if probability < MODERATE_THRESHOLD {
            Self::Low
        } else if probability < HIGH_THRESHOLD {
            Self::Moderate
        } else {
            Self::High
        }
    }

    /// Advice shown for this category. Never depends on the patient.
    #[must_use]
    pub fn recommendation(&self) -> &'static str {
        match self {
            Self::Low => "Maintain healthy lifestyle.",
            Self::Moderate => "Monitor closely & improve lifestyle.",
            Self::High => "Consult a doctor immediately.",
        }
    }

    /// Colour for gauges (RGB).
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Low => (16, 185, 129),      // Emerald (#10B981)
            Self::Moderate => (251, 191, 36), // Amber (#FBBF24)
            Self::High => (244, 63, 94),      // Rose (#F43F5E)
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Moderate => write!(f, "Moderate"),
            Self::High => write!(f, "High"),
        }
    }
}

/// Outcome of one prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub disease: Disease,

    /// Positive-class probability in percent, `0.0..=100.0`.
    pub probability: f64,

    pub risk: RiskLevel,

    pub recommendation: &'static str,
}

impl PredictionResult {
    /// Derive risk and recommendation from a percentage.
    #[must_use]
    pub fn from_percentage(disease: Disease, probability: f64) -> Self {
        let risk = RiskLevel::from_percentage(probability);
        Self {
            disease,
            probability,
            risk,
            recommendation: risk.recommendation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_thresholds() {
        assert_eq!(RiskLevel::from_percentage(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_percentage(32.999), RiskLevel::Low);
        assert_eq!(RiskLevel::from_percentage(33.0), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_percentage(65.999), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_percentage(66.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_percentage(100.0), RiskLevel::High);
    }

    #[test]
    fn test_threshold_sweep() {
        for tenth in 0..=1000 {
            let p = f64::from(tenth) / 10.0;
            let expected = if p < 33.0 {
                RiskLevel::Low
            } else if p < 66.0 {
                RiskLevel::Moderate
            } else {
                RiskLevel::High
            };
            assert_eq!(RiskLevel::from_percentage(p), expected, "p = {p}");
        }
    }

    #[test]
    fn test_recommendation_depends_only_on_risk() {
        for disease in Disease::ALL {
            let a = PredictionResult::from_percentage(disease, 70.0);
            let b = PredictionResult::from_percentage(Disease::Heart, 99.0);
            assert_eq!(a.recommendation, b.recommendation);
            assert_eq!(a.recommendation, RiskLevel::High.recommendation());
        }

        let texts = [
            RiskLevel::Low.recommendation(),
            RiskLevel::Moderate.recommendation(),
            RiskLevel::High.recommendation(),
        ];
        assert_ne!(texts[0], texts[1]);
        assert_ne!(texts[1], texts[2]);
        assert_ne!(texts[0], texts[2]);
    }
}
