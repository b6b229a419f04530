//! Patient records submitted for a single prediction.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::schema::DiseaseSchema;
use crate::HealthError;

/// A submitted field value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Integer slider value or categorical code.
    Integer(i64),
    /// Decimal slider value.
    Decimal(f64),
}

impl FieldValue {
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Integer(v) => v as f64,
            Self::Decimal(v) => v,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Integer(v) => write!(f, "{v}"),
            // Decimals always show a fractional part: 27.0, not 27.
            Self::Decimal(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            Self::Decimal(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Decimal(v)
    }
}

/// Field values for one prediction request, in schema order.
///
/// Keys are unique; re-inserting a key replaces the value in place.
/// `Debug` redacts values so a record can never leak into logs.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    entries: Vec<(String, FieldValue)>,
}

impl PatientRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A record holding every field's declared default.
    #[must_use]
    pub fn with_defaults(schema: &DiseaseSchema) -> Self {
        let mut record = Self::new();
        for field in schema.fields {
            record.insert(field.name, field.default_value());
        }
        record
    }

    /// Build a record with exactly the schema's field set, in schema order.
    ///
    /// Ranges are not re-checked here; that is the input layer's job.
    ///
    /// # Errors
    /// Returns `HealthError::InvalidRecord` if a schema field has no value
    /// or `raw` carries a field the schema does not declare.
    pub fn collect(
        schema: &DiseaseSchema,
        raw: &HashMap<String, FieldValue>,
    ) -> Result<Self, HealthError> {
        if let Some(unknown) = raw.keys().find(|k| schema.field(k).is_none()) {
            return Err(HealthError::InvalidRecord(format!(
                "{} has no field named '{unknown}'",
                schema.disease
            )));
        }

        let mut record = Self::new();
        for field in schema.fields {
            let value = raw.get(field.name).ok_or_else(|| {
                HealthError::InvalidRecord(format!(
                    "missing value for {}.{}",
                    schema.disease, field.name
                ))
            })?;
            record.insert(field.name, *value);
        }
        Ok(record)
    }

    /// Insert or replace a value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<FieldValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| *v)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == name)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for PatientRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatientRecord")
            .field("fields", &self.entries.len())
            .field("values", &"[REDACTED]")
            .finish()
    }
}
