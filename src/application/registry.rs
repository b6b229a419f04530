//! Model registry: read-only map from disease to loaded classifier.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::Disease;
use crate::ports::{Classifier, LoadedModel, ModelSource};
use crate::HealthError;

/// Classifiers loaded once at startup and shared for the process lifetime.
///
/// Never mutated after `load`; safe to share behind an `Arc`.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: BTreeMap<Disease, LoadedModel>,
}

impl ModelRegistry {
    /// Load every disease in `diseases` from `source`.
    ///
    /// A missing resource silently omits that disease. A resource that
    /// exists but cannot be decoded is logged and omitted as well, so one
    /// broken file never takes the other diseases down with it.
    pub fn load<S: ModelSource + ?Sized>(source: &S, diseases: &[Disease]) -> Self {
        let mut models = BTreeMap::new();

        for &disease in diseases {
            match source.load(disease) {
                Ok(Some(model)) => {
                    tracing::info!(
                        "Loaded {} model (fingerprint {}, {} declared features)",
                        disease,
                        &model.fingerprint[..model.fingerprint.len().min(16)],
                        model
                            .classifier
                            .expected_features()
                            .map_or_else(|| "no".to_string(), |f| f.len().to_string())
                    );
                    models.insert(disease, model);
                }
                Ok(None) => tracing::debug!("No model resource for {}, skipping", disease),
                Err(e) => tracing::warn!("Skipping {} model: {}", disease, e),
            }
        }

        if models.is_empty() {
            tracing::warn!("Model registry is empty; predictions are unavailable");
        } else {
            tracing::info!("Model registry ready with {} model(s)", models.len());
        }

        Self { models }
    }

    /// Build a registry from already-constructed models.
    #[must_use]
    pub fn from_models(models: impl IntoIterator<Item = (Disease, LoadedModel)>) -> Self {
        Self {
            models: models.into_iter().collect(),
        }
    }

    /// Classifier for `disease`.
    ///
    /// # Errors
    /// Returns `HealthError::NotFound` when no model was loaded for it.
    pub fn get(&self, disease: Disease) -> Result<Arc<dyn Classifier>, HealthError> {
        self.models
            .get(&disease)
            .map(|m| Arc::clone(&m.classifier))
            .ok_or_else(|| HealthError::NotFound {
                kind: "model",
                name: disease.to_string(),
            })
    }

    /// Classifier by disease name.
    ///
    /// # Errors
    /// Returns `HealthError::NotFound` for unknown names or unloaded models.
    pub fn get_by_name(&self, name: &str) -> Result<Arc<dyn Classifier>, HealthError> {
        let disease: Disease = name.parse().map_err(|_| HealthError::NotFound {
            kind: "model",
            name: name.trim().to_string(),
        })?;
        self.get(disease)
    }

    /// Fingerprint of the resource `disease` was loaded from.
    #[must_use]
    pub fn fingerprint(&self, disease: Disease) -> Option<&str> {
        self.models.get(&disease).map(|m| m.fingerprint.as_str())
    }

    /// Fail when nothing could be loaded at all.
    ///
    /// # Errors
    /// Returns `HealthError::RegistryEmpty` for an empty registry.
    pub fn ensure_available(&self) -> Result<(), HealthError> {
        if self.models.is_empty() {
            return Err(HealthError::RegistryEmpty);
        }
        Ok(())
    }

    /// Loaded diseases in canonical order.
    #[must_use]
    pub fn available(&self) -> Vec<Disease> {
        self.models.keys().copied().collect()
    }

    #[must_use]
    pub fn contains(&self, disease: Disease) -> bool {
        self.models.contains_key(&disease)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::model::{ConstantModel, JsonModelStore};
    use crate::domain::ModelError;
    use tempfile::tempdir;

    struct FixedSource {
        present: Vec<Disease>,
        broken: Vec<Disease>,
    }

    impl ModelSource for FixedSource {
        fn load(&self, disease: Disease) -> Result<Option<LoadedModel>, ModelError> {
            if self.broken.contains(&disease) {
                return Err(ModelError::Invalid("corrupt".into()));
            }
            if !self.present.contains(&disease) {
                return Ok(None);
            }
            Ok(Some(LoadedModel {
                classifier: Arc::new(ConstantModel {
                    feature_names: None,
                    probabilities: vec![0.5, 0.5],
                }),
                fingerprint: format!("{disease}-fp"),
            }))
        }
    }

    #[test]
    fn test_missing_and_broken_models_are_skipped() {
        let source = FixedSource {
            present: vec![Disease::Heart, Disease::Diabetes],
            broken: vec![Disease::Liver],
        };
        let registry = ModelRegistry::load(&source, &Disease::ALL);

        assert_eq!(registry.available(), vec![Disease::Diabetes, Disease::Heart]);
        assert!(registry.get(Disease::Heart).is_ok());
        assert_eq!(registry.fingerprint(Disease::Heart), Some("Heart-fp"));
        assert!(registry.ensure_available().is_ok());

        assert!(matches!(
            registry.get(Disease::Liver),
            Err(HealthError::NotFound { kind: "model", .. })
        ));
    }

    #[test]
    fn test_only_configured_names_load() {
        let source = FixedSource {
            present: Disease::ALL.to_vec(),
            broken: Vec::new(),
        };
        let registry = ModelRegistry::load(&source, &[Disease::Stroke]);
        assert_eq!(registry.available(), vec![Disease::Stroke]);
    }

    #[test]
    fn test_get_by_name() {
        let source = FixedSource {
            present: vec![Disease::Cancer],
            broken: Vec::new(),
        };
        let registry = ModelRegistry::load(&source, &Disease::ALL);

        assert!(registry.get_by_name("cancer").is_ok());
        assert!(matches!(
            registry.get_by_name("Gout"),
            Err(HealthError::NotFound { .. })
        ));
        assert!(matches!(
            registry.get_by_name("Kidney"),
            Err(HealthError::NotFound { .. })
        ));
    }

    #[test]
    fn test_empty_directory_gives_empty_registry() {
        let temp = tempdir().expect("tempdir");
        let registry = ModelRegistry::load(&JsonModelStore::new(temp.path()), &Disease::ALL);

        assert!(registry.is_empty());
        assert!(registry.available().is_empty());
        let err = registry.ensure_available().unwrap_err();
        assert!(matches!(err, HealthError::RegistryEmpty));
        assert!(err.is_fatal_to_prediction());
    }
}
