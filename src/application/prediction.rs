//! Prediction service: Orchestrates one prediction request end to end.
//!
//! This service coordinates:
//! - Model lookup in the registry
//! - Feature alignment
//! - Risk classification
//! - Report layout, encoding and storage

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::{aligner, risk, ModelRegistry};
use crate::domain::{self, Disease, DiseaseSchema, PatientRecord, PredictionResult, ReportLayout};
use crate::ports::{DocumentEncoder, ReportStore};
use crate::HealthError;

/// Result of a full run: the prediction plus what happened to its report.
///
/// A report failure never invalidates the prediction.
#[derive(Debug)]
pub struct PredictionOutcome {
    pub result: PredictionResult,
    pub report: Result<PathBuf, HealthError>,
}

/// Service for scoring patient records and producing reports.
pub struct PredictionService<E, S>
where
    E: DocumentEncoder,
    S: ReportStore,
{
    registry: Arc<ModelRegistry>,
    encoder: E,
    store: S,
}

impl<E, S> PredictionService<E, S>
where
    E: DocumentEncoder,
    S: ReportStore,
{
    /// Create a new prediction service.
    pub fn new(registry: Arc<ModelRegistry>, encoder: E, store: S) -> Self {
        Self {
            registry,
            encoder,
            store,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Diseases that can be predicted right now.
    ///
    /// # Errors
    /// Returns `HealthError::RegistryEmpty` when no model was loaded.
    pub fn available_diseases(&self) -> Result<Vec<Disease>, HealthError> {
        self.registry.ensure_available()?;
        Ok(self.registry.available())
    }

    /// Input schema for a disease name.
    ///
    /// # Errors
    /// Returns `HealthError::NotFound` for unknown names.
    pub fn schema_for(&self, name: &str) -> Result<&'static DiseaseSchema, HealthError> {
        domain::schema_for(name)
    }

    /// Score a patient record.
    ///
    /// # Errors
    /// Returns `HealthError::NotFound` if no model is loaded for `disease`,
    /// or `HealthError::Prediction` if the model cannot score the record.
    pub fn predict(
        &self,
        disease: Disease,
        record: &PatientRecord,
    ) -> Result<PredictionResult, HealthError> {
        let model = self.registry.get(disease)?;
        let vector = aligner::align(record, &*model);
        risk::classify(disease, &vector, &*model)
    }

    /// Encode the report for a prediction.
    ///
    /// Identical inputs yield identical bytes.
    ///
    /// # Errors
    /// Returns `HealthError::Document` if encoding fails.
    pub fn render_report(
        &self,
        result: &PredictionResult,
        record: &PatientRecord,
    ) -> Result<Vec<u8>, HealthError> {
        let layout = ReportLayout::compose(result, record);
        Ok(self.encoder.encode(&layout)?)
    }

    /// Render and store the report as `<Disease>_report.pdf`.
    ///
    /// # Errors
    /// Returns `HealthError::ArtifactWrite` if the store rejects the write,
    /// or `HealthError::Document` if encoding fails.
    pub fn save_report(
        &self,
        result: &PredictionResult,
        record: &PatientRecord,
    ) -> Result<PathBuf, HealthError> {
        let bytes = self.render_report(result, record)?;
        let name = result.disease.report_file_name();
        self.store
            .save(&name, &bytes)
            .map_err(|e| HealthError::ArtifactWrite {
                path: self.store.location(&name),
                source: Box::new(e),
            })
    }

    /// Read a previously stored report back, e.g. for download.
    ///
    /// # Errors
    /// Returns `HealthError::NotFound` if it cannot be read.
    pub fn load_report(&self, disease: Disease) -> Result<Vec<u8>, HealthError> {
        let name = disease.report_file_name();
        self.store.load(&name).map_err(|e| {
            tracing::debug!("Report load failed: {}", e);
            HealthError::NotFound { kind: "report", name }
        })
    }

    /// Predict, then write the report.
    ///
    /// # Errors
    /// Returns error only if the prediction itself fails; report failures
    /// are carried in the outcome.
    pub fn run(
        &self,
        disease: Disease,
        record: &PatientRecord,
    ) -> Result<PredictionOutcome, HealthError> {
        let result = self.predict(disease, record)?;
        let report = self.save_report(&result, record);
        if let Err(e) = &report {
            tracing::error!("Report for {} not saved: {}", disease, e);
        }
        Ok(PredictionOutcome { result, report })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::model::ConstantModel;
    use crate::adapters::{FsReportStore, PdfEncoder};
    use crate::domain::{FieldValue, RiskLevel};
    use crate::ports::LoadedModel;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn registry_with(disease: Disease, model: ConstantModel) -> Arc<ModelRegistry> {
        Arc::new(ModelRegistry::from_models([(
            disease,
            LoadedModel {
                classifier: Arc::new(model),
                fingerprint: "test".into(),
            },
        )]))
    }

    fn diabetes_record() -> PatientRecord {
        let values: HashMap<String, FieldValue> = [
            ("Glucose", FieldValue::Integer(200)),
            ("BMI", FieldValue::Decimal(35.0)),
            ("Age", FieldValue::Integer(55)),
            ("Pregnancies", FieldValue::Integer(4)),
            ("BloodPressure", FieldValue::Integer(90)),
            ("SkinThickness", FieldValue::Integer(30)),
            ("Insulin", FieldValue::Integer(150)),
            ("DiabetesPedigreeFunction", FieldValue::Decimal(1.2)),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        PatientRecord::collect(Disease::Diabetes.schema(), &values).expect("valid record")
    }

    fn diabetes_model() -> ConstantModel {
        ConstantModel {
            feature_names: Some(Disease::Diabetes.schema().names().map(String::from).collect()),
            probabilities: vec![0.2, 0.8],
        }
    }

    /// Store whose writes always fail.
    struct ReadOnlyStore;

    impl ReportStore for ReadOnlyStore {
        type Error = std::io::Error;

        fn save(&self, _name: &str, _bytes: &[u8]) -> Result<PathBuf, Self::Error> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"))
        }

        fn load(&self, _name: &str) -> Result<Vec<u8>, Self::Error> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"))
        }

        fn location(&self, name: &str) -> PathBuf {
            PathBuf::from("/readonly").join(name)
        }
    }

    #[test]
    fn test_diabetes_end_to_end() {
        let temp = tempdir().expect("tempdir");
        let service = PredictionService::new(
            registry_with(Disease::Diabetes, diabetes_model()),
            PdfEncoder::new(),
            FsReportStore::new(temp.path()),
        );

        let record = diabetes_record();
        let outcome = service.run(Disease::Diabetes, &record).unwrap();

        assert!((outcome.result.probability - 80.0).abs() < 1e-9);
        assert_eq!(outcome.result.risk, RiskLevel::High);
        assert_eq!(outcome.result.recommendation, "Consult a doctor immediately.");

        let path = outcome.report.expect("report saved");
        assert_eq!(path, temp.path().join("Diabetes_report.pdf"));
        let layout = ReportLayout::compose(&outcome.result, &record);
        assert!(layout.lines().any(|l| l.text == "Glucose: 200"));
        assert!(layout.lines().any(|l| l.text == "DiabetesPedigreeFunction: 1.2"));
        let stored = service.load_report(Disease::Diabetes).unwrap();
        assert_eq!(stored, service.render_report(&outcome.result, &record).unwrap());
    }

    #[test]
    fn test_report_failure_keeps_result() {
        let service = PredictionService::new(
            registry_with(Disease::Diabetes, diabetes_model()),
            PdfEncoder::new(),
            ReadOnlyStore,
        );

        let outcome = service.run(Disease::Diabetes, &diabetes_record()).unwrap();
        assert_eq!(outcome.result.risk, RiskLevel::High);
        match outcome.report {
            Err(HealthError::ArtifactWrite { path, .. }) => {
                assert_eq!(path, PathBuf::from("/readonly/Diabetes_report.pdf"));
            }
            other => panic!("expected ArtifactWrite, got {other:?}"),
        }
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let temp = tempdir().expect("tempdir");
        let service = PredictionService::new(
            registry_with(Disease::Diabetes, diabetes_model()),
            PdfEncoder::new(),
            FsReportStore::new(temp.path()),
        );
        let record = diabetes_record();
        let result = service.predict(Disease::Diabetes, &record).unwrap();

        let first = service.render_report(&result, &record).unwrap();
        let second = service.render_report(&result, &record).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unloaded_disease_not_found() {
        let temp = tempdir().expect("tempdir");
        let service = PredictionService::new(
            registry_with(Disease::Diabetes, diabetes_model()),
            PdfEncoder::new(),
            FsReportStore::new(temp.path()),
        );
        let record = PatientRecord::with_defaults(Disease::Heart.schema());
        assert!(matches!(
            service.predict(Disease::Heart, &record),
            Err(HealthError::NotFound { kind: "model", .. })
        ));
        assert!(matches!(
            service.load_report(Disease::Heart),
            Err(HealthError::NotFound { kind: "report", .. })
        ));
    }

    #[test]
    fn test_empty_registry_refuses_listing() {
        let temp = tempdir().expect("tempdir");
        let service = PredictionService::new(
            Arc::new(ModelRegistry::default()),
            PdfEncoder::new(),
            FsReportStore::new(temp.path()),
        );
        assert!(matches!(
            service.available_diseases(),
            Err(HealthError::RegistryEmpty)
        ));
    }

    #[test]
    fn test_schema_lookup() {
        let temp = tempdir().expect("tempdir");
        let service = PredictionService::new(
            Arc::new(ModelRegistry::default()),
            PdfEncoder::new(),
            FsReportStore::new(temp.path()),
        );
        assert_eq!(service.schema_for("kidney").unwrap().len(), 24);
        assert!(matches!(
            service.schema_for("Gout"),
            Err(HealthError::NotFound { kind: "schema", .. })
        ));
    }
}
