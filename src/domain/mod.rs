//! Domain layer: Core business types and logic.
//!
//! Pure types with no I/O: the disease catalogue and its input schemas,
//! patient records, feature vectors, prediction results and report layout.

mod disease;
mod features;
mod patient;
mod prediction;
pub mod report;
pub mod schema;

pub use disease::Disease;
pub use features::{FeatureVector, ModelError};
pub use patient::{FieldValue, PatientRecord};
pub use prediction::{PredictionResult, RiskLevel, HIGH_THRESHOLD, MODERATE_THRESHOLD};
pub use report::ReportLayout;
pub use schema::{schema_for, DiseaseSchema, FieldKind, FieldSpec};
