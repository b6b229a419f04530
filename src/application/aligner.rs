//! Feature alignment: project a patient record onto a model's inputs.

use crate::domain::{FeatureVector, PatientRecord};
use crate::ports::Classifier;

/// Conform `record` to the features `model` was trained with.
///
/// - Model declares no feature names: the record is used as-is, in record
///   (schema) order.
/// - Otherwise the output follows the declared order exactly. Declared
///   features missing from the record are filled with `0.0`; record fields
///   the model does not know are dropped.
///
/// Zero-filling keeps predictions available when a form under-collects a
/// model's inputs, at the cost of accuracy. Filled names are logged at
/// debug level.
#[must_use]
pub fn align<C: Classifier + ?Sized>(record: &PatientRecord, model: &C) -> FeatureVector {
    let (names, values): (Vec<String>, Vec<f64>) = match model.expected_features() {
        None => record
            .iter()
            .map(|(name, value)| (name.to_string(), value.as_f64()))
            .unzip(),
        Some(expected) => {
            let mut filled = Vec::new();
            let values = expected
                .iter()
                .map(|name| match record.get(name) {
                    Some(value) => value.as_f64(),
                    None => {
                        filled.push(name.as_str());
                        0.0
                    }
                })
                .collect();
            if !filled.is_empty() {
                tracing::debug!("Zero-filled {} missing feature(s): {:?}", filled.len(), filled);
            }
            (expected.to_vec(), values)
        }
    };

    FeatureVector::from_parts(names, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::model::ConstantModel;
    use crate::domain::{Disease, FieldValue};

    fn model_expecting(names: &[&str]) -> ConstantModel {
        ConstantModel {
            feature_names: Some(names.iter().map(|s| s.to_string()).collect()),
            probabilities: vec![0.5, 0.5],
        }
    }

    #[test]
    fn test_reorders_fills_and_drops() {
        let mut record = PatientRecord::new();
        record.insert("Glucose", 200_i64);
        record.insert("BMI", 35.0);
        record.insert("Unused", 1_i64);

        let model = model_expecting(&["BMI", "Insulin", "Glucose"]);
        let vector = align(&record, &model);

        assert_eq!(vector.names(), &["BMI", "Insulin", "Glucose"]);
        assert_eq!(vector.values(), &[35.0, 0.0, 200.0]);
        assert!(vector.get("Unused").is_none());
    }

    #[test]
    fn test_no_declared_features_uses_record_order() {
        let record = PatientRecord::with_defaults(Disease::Stroke.schema());
        let model = ConstantModel {
            feature_names: None,
            probabilities: vec![0.5, 0.5],
        };
        let vector = align(&record, &model);

        let expected: Vec<&str> = Disease::Stroke.schema().names().collect();
        assert_eq!(vector.names(), expected.as_slice());
        assert_eq!(vector.get("age"), Some(45.0));
    }

    #[test]
    fn test_length_matches_model_for_every_schema() {
        // Models that declare a superset, a subset and a shuffle of each schema.
        for disease in Disease::ALL {
            let record = PatientRecord::with_defaults(disease.schema());
            let names: Vec<&str> = disease.schema().names().collect();

            let mut superset = names.clone();
            superset.push("extra_lab_value");
            let subset = &names[..names.len() / 2];
            let mut shuffled = names.clone();
            shuffled.reverse();

            for expected in [superset.as_slice(), subset, shuffled.as_slice()] {
                let model = model_expecting(expected);
                let vector = align(&record, &model);
                assert_eq!(vector.len(), expected.len(), "{disease}");
                assert_eq!(
                    vector.names().iter().map(String::as_str).collect::<Vec<_>>(),
                    expected,
                    "{disease}"
                );
            }
        }
    }

    #[test]
    fn test_categorical_codes_become_numbers() {
        let mut record = PatientRecord::new();
        record.insert("sex", FieldValue::Integer(1));
        let vector = align(&record, &model_expecting(&["sex"]));
        assert_eq!(vector.values(), &[1.0]);
    }
}
