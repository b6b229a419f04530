//! The closed set of diseases the application can score.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::schema::{self, DiseaseSchema};
use crate::HealthError;

/// A disease with a pre-trained binary classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Disease {
    Kidney,
    Hypertension,
    Stroke,
    Cancer,
    Liver,
    Diabetes,
    Heart,
}

impl Disease {
    /// All diseases in canonical (menu) order.
    pub const ALL: [Disease; 7] = [
        Self::Kidney,
        Self::Hypertension,
        Self::Stroke,
        Self::Cancer,
        Self::Liver,
        Self::Diabetes,
        Self::Heart,
    ];

    /// Display name, e.g. `"Diabetes"`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Kidney => "Kidney",
            Self::Hypertension => "Hypertension",
            Self::Stroke => "Stroke",
            Self::Cancer => "Cancer",
            Self::Liver => "Liver",
            Self::Diabetes => "Diabetes",
            Self::Heart => "Heart",
        }
    }

    /// Name of the serialized model resource inside the model directory.
    #[must_use]
    pub fn model_file_name(&self) -> String {
        format!("{}_model.json", self.name().to_ascii_lowercase())
    }

    /// Name of the report artifact. Re-running a prediction overwrites it.
    #[must_use]
    pub fn report_file_name(&self) -> String {
        format!("{}_report.pdf", self.name())
    }

    /// Input schema for this disease.
    #[must_use]
    pub fn schema(&self) -> &'static DiseaseSchema {
        schema::schema_of(*self)
    }
}

impl std::fmt::Display for Disease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Disease {
    type Err = HealthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| HealthError::NotFound {
                kind: "disease",
                name: wanted.to_string(),
            })
    }
}
