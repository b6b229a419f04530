//! Per-disease input schemas.
//!
//! Each disease has a fixed, ordered list of fields. The shell renders its
//! form from this table and the record/feature assembly follows the same
//! order, so there is exactly one place where a disease's inputs are
//! declared.

use crate::domain::disease::Disease;
use crate::domain::patient::FieldValue;
use crate::HealthError;

/// Input domain of a single field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Slider-style input over an inclusive range.
    ///
    /// A whole-number `step` makes the field integer-valued.
    Numeric { min: f64, max: f64, step: f64 },

    /// Selection among a finite set of integer codes.
    Categorical { choices: &'static [i64] },
}

/// One patient attribute requested by a disease form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Feature name as the model was trained with it.
    pub name: &'static str,
    /// Prompt shown to the user.
    pub label: &'static str,
    pub kind: FieldKind,
    pub default: f64,
}

const BINARY: &[i64] = &[0, 1];

const fn int(name: &'static str, label: &'static str, min: i64, max: i64, default: i64) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind: FieldKind::Numeric {
            min: min as f64,
            max: max as f64,
            step: 1.0,
        },
        default: default as f64,
    }
}

const fn decimal(name: &'static str, label: &'static str, min: f64, max: f64, default: f64) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind: FieldKind::Numeric {
            min,
            max,
            step: 0.01,
        },
        default,
    }
}

const fn flag(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind: FieldKind::Categorical { choices: BINARY },
        default: 0.0,
    }
}

impl FieldSpec {
    /// Whether values of this field are integers.
    #[must_use]
    pub fn is_integral(&self) -> bool {
        match self.kind {
            FieldKind::Numeric { step, .. } => step.fract() == 0.0,
            FieldKind::Categorical { .. } => true,
        }
    }

    /// Convert a raw number into this field's value type.
    #[must_use]
    pub fn value_from_f64(&self, raw: f64) -> FieldValue {
        if self.is_integral() {
            FieldValue::Integer(raw.round() as i64)
        } else {
            FieldValue::Decimal(raw)
        }
    }

    /// The declared default as a typed value.
    #[must_use]
    pub fn default_value(&self) -> FieldValue {
        self.value_from_f64(self.default)
    }

    /// Whether `value` lies inside the declared domain.
    #[must_use]
    pub fn accepts(&self, value: &FieldValue) -> bool {
        let v = value.as_f64();
        match self.kind {
            FieldKind::Numeric { min, max, .. } => v.is_finite() && (min..=max).contains(&v),
            FieldKind::Categorical { choices } => match value {
                FieldValue::Integer(code) => choices.contains(code),
                FieldValue::Decimal(_) => false,
            },
        }
    }

    /// Move `value` by `steps` increments, staying inside the domain.
    ///
    /// Numeric fields move along the step grid and clamp at the bounds;
    /// categorical fields move through the choice list without wrapping.
    #[must_use]
    pub fn step_by(&self, value: &FieldValue, steps: i32) -> FieldValue {
        match self.kind {
            FieldKind::Numeric { min, max, step } => {
                let moved = value.as_f64() + f64::from(steps) * step;
                let snapped = ((moved - min) / step).round() * step + min;
                let clamped = snapped.clamp(min, max);
                // Keep decimals on the step grid so 0.1 + 0.01 displays as 0.11.
                let precision = (1.0 / step).round().max(1.0);
                self.value_from_f64((clamped * precision).round() / precision)
            }
            FieldKind::Categorical { choices } => {
                let current = choices
                    .iter()
                    .position(|c| FieldValue::Integer(*c) == *value)
                    .unwrap_or(0) as i64;
                let last = choices.len().saturating_sub(1) as i64;
                let idx = (current + i64::from(steps)).clamp(0, last) as usize;
                FieldValue::Integer(choices[idx])
            }
        }
    }

    /// Parse typed text into a value of this field's type.
    ///
    /// # Errors
    /// Returns a message naming the field when the text is not a number
    /// or falls outside the declared domain.
    pub fn parse_value(&self, text: &str) -> Result<FieldValue, String> {
        let raw: f64 = text
            .trim()
            .parse()
            .map_err(|_| format!("{}: invalid number", self.label))?;
        if self.is_integral() && raw.fract() != 0.0 {
            return Err(format!("{}: expected a whole number", self.label));
        }
        let value = self.value_from_f64(raw);
        if !self.accepts(&value) {
            return Err(format!("{}: {}", self.label, self.domain_hint()));
        }
        Ok(value)
    }

    /// Short description of the valid domain, e.g. `"1-100"` or `"0/1"`.
    #[must_use]
    pub fn domain_hint(&self) -> String {
        match self.kind {
            FieldKind::Numeric { min, max, .. } => {
                format!("{}-{}", self.value_from_f64(min), self.value_from_f64(max))
            }
            FieldKind::Categorical { choices } => choices
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("/"),
        }
    }
}

/// Ordered input fields for one disease.
#[derive(Debug)]
pub struct DiseaseSchema {
    pub disease: Disease,
    pub fields: &'static [FieldSpec],
}

impl DiseaseSchema {
    /// Look up a field by its feature name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in schema order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }
}

static KIDNEY: DiseaseSchema = DiseaseSchema {
    disease: Disease::Kidney,
    fields: &[
        int("age", "Age", 1, 100, 48),
        int("bp", "Blood Pressure", 50, 200, 80),
        decimal("sg", "Specific Gravity", 1.0, 1.05, 1.02),
        int("al", "Albumin", 0, 5, 1),
        int("su", "Sugar", 0, 5, 0),
        flag("rbc", "RBC (0=normal,1=abnormal)"),
        flag("pc", "Pus Cell (0=normal,1=abnormal)"),
        flag("pcc", "Pus Cell Clumps"),
        flag("ba", "Bacteria"),
        int("bgr", "Blood Glucose Random", 50, 300, 121),
        int("bu", "Blood Urea", 10, 150, 36),
        decimal("sc", "Serum Creatinine", 0.1, 10.0, 1.2),
        int("sod", "Sodium", 100, 200, 137),
        decimal("pot", "Potassium", 2.0, 10.0, 4.2),
        decimal("hemo", "Hemoglobin", 5.0, 20.0, 15.4),
        int("pcv", "PCV", 20, 60, 44),
        int("wc", "WBC count", 2000, 20000, 7800),
        decimal("rc", "RBC count", 2.0, 8.0, 5.2),
        flag("htn", "Hypertension"),
        flag("dm", "Diabetes Mellitus"),
        flag("cad", "Coronary Artery Disease"),
        flag("appet", "Appetite (0=poor,1=good)"),
        flag("pe", "Pedal Edema"),
        flag("ane", "Anemia"),
    ],
};

static HYPERTENSION: DiseaseSchema = DiseaseSchema {
    disease: Disease::Hypertension,
    fields: &[
        int("age", "Age", 1, 100, 50),
        int("education", "Education Level", 0, 5, 1),
        flag("currentSmoker", "Current Smoker"),
        int("cigsPerDay", "Cigarettes Per Day", 0, 50, 5),
        flag("BPMeds", "On BP Medication"),
        flag("prevalentStroke", "Prevalent Stroke"),
        flag("prevalentHyp", "Prevalent Hypertension"),
        flag("diabetes", "Diabetes"),
        int("totChol", "Total Cholesterol", 100, 400, 233),
        int("sysBP", "Systolic BP", 90, 200, 138),
        int("diaBP", "Diastolic BP", 60, 120, 80),
        decimal("BMI", "BMI", 10.0, 50.0, 27.0),
        int("heartRate", "Heart Rate", 40, 150, 77),
        int("glucose", "Glucose", 50, 250, 80),
    ],
};

static STROKE: DiseaseSchema = DiseaseSchema {
    disease: Disease::Stroke,
    fields: &[
        flag("gender", "Gender (0=Female,1=Male)"),
        int("age", "Age", 1, 100, 45),
        flag("hypertension", "Hypertension"),
        flag("heart_disease", "Heart Disease"),
        flag("ever_married", "Ever Married"),
        int("work_type", "Work Type (0-4)", 0, 4, 2),
        flag("Residence_type", "Residence Type (0=Rural,1=Urban)"),
        int("avg_glucose_level", "Avg Glucose Level", 50, 300, 90),
        decimal("bmi", "BMI", 10.0, 50.0, 28.0),
        int("smoking_status", "Smoking Status (0-3)", 0, 3, 1),
    ],
};

static CANCER: DiseaseSchema = DiseaseSchema {
    disease: Disease::Cancer,
    fields: &[
        decimal("radius_mean", "Radius Mean", 5.0, 30.0, 14.2),
        decimal("texture_mean", "Texture Mean", 5.0, 40.0, 20.1),
        decimal("perimeter_mean", "Perimeter Mean", 20.0, 200.0, 90.2),
        decimal("area_mean", "Area Mean", 100.0, 2500.0, 600.1),
        decimal("smoothness_mean", "Smoothness Mean", 0.05, 0.2, 0.1),
        decimal("compactness_mean", "Compactness Mean", 0.0, 1.0, 0.2),
        decimal("concavity_mean", "Concavity Mean", 0.0, 1.0, 0.3),
        decimal("concave points_mean", "Concave Points Mean", 0.0, 1.0, 0.1),
        decimal("symmetry_mean", "Symmetry Mean", 0.0, 1.0, 0.2),
        decimal("fractal_dimension_mean", "Fractal Dimension Mean", 0.0, 0.2, 0.06),
    ],
};

static LIVER: DiseaseSchema = DiseaseSchema {
    disease: Disease::Liver,
    fields: &[
        int("Age", "Age", 1, 100, 45),
        flag("Gender", "Gender (0=Female,1=Male)"),
        decimal("Total_Bilirubin", "Total Bilirubin", 0.0, 10.0, 0.9),
        decimal("Direct_Bilirubin", "Direct Bilirubin", 0.0, 5.0, 0.3),
        int("Alkaline_Phosphotase", "Alkaline Phosphotase", 50, 1000, 200),
        int("Alamine_Aminotransferase", "Alamine Aminotransferase", 0, 200, 30),
        int("Aspartate_Aminotransferase", "Aspartate Aminotransferase", 0, 200, 40),
        decimal("Total_Protiens", "Total Proteins", 2.0, 9.0, 6.8),
        decimal("Albumin", "Albumin", 1.0, 6.0, 3.5),
        decimal("Albumin_and_Globulin_Ratio", "Albumin & Globulin Ratio", 0.0, 3.0, 1.1),
    ],
};

static DIABETES: DiseaseSchema = DiseaseSchema {
    disease: Disease::Diabetes,
    fields: &[
        int("Pregnancies", "Pregnancies", 0, 15, 2),
        int("Glucose", "Glucose", 50, 250, 120),
        int("BloodPressure", "Blood Pressure", 40, 150, 70),
        int("SkinThickness", "Skin Thickness", 0, 100, 20),
        int("Insulin", "Insulin", 0, 900, 85),
        decimal("BMI", "BMI", 10.0, 60.0, 28.5),
        decimal("DiabetesPedigreeFunction", "Diabetes Pedigree Function", 0.0, 3.0, 0.5),
        int("Age", "Age", 1, 100, 35),
    ],
};

static HEART: DiseaseSchema = DiseaseSchema {
    disease: Disease::Heart,
    fields: &[
        int("age", "Age", 1, 100, 52),
        flag("sex", "Sex (0=Female,1=Male)"),
        int("cp", "Chest Pain Type (0-3)", 0, 3, 0),
        int("trestbps", "Resting BP", 80, 200, 130),
        int("chol", "Cholesterol", 100, 600, 240),
        flag("fbs", "Fasting Blood Sugar > 120 mg/dl"),
        int("restecg", "Resting ECG (0-2)", 0, 2, 1),
        int("thalach", "Max Heart Rate Achieved", 70, 220, 150),
        flag("exang", "Exercise Induced Angina"),
        decimal("oldpeak", "Oldpeak", 0.0, 10.0, 1.0),
        int("slope", "Slope (0-2)", 0, 2, 2),
        int("ca", "Major Vessels (0-3)", 0, 3, 0),
        int("thal", "Thal (0-3)", 0, 3, 2),
    ],
};

pub(crate) fn schema_of(disease: Disease) -> &'static DiseaseSchema {
    match disease {
        Disease::Kidney => &KIDNEY,
        Disease::Hypertension => &HYPERTENSION,
        Disease::Stroke => &STROKE,
        Disease::Cancer => &CANCER,
        Disease::Liver => &LIVER,
        Disease::Diabetes => &DIABETES,
        Disease::Heart => &HEART,
    }
}

/// Look up a schema by disease name.
///
/// # Errors
/// Returns `HealthError::NotFound` for names that are not one of the
/// seven supported diseases.
pub fn schema_for(name: &str) -> Result<&'static DiseaseSchema, HealthError> {
    let disease: Disease = name.parse().map_err(|_| HealthError::NotFound {
        kind: "schema",
        name: name.trim().to_string(),
    })?;
    Ok(schema_of(disease))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_field_counts() {
        let counts: Vec<(Disease, usize)> =
            Disease::ALL.iter().map(|d| (*d, d.schema().len())).collect();
        assert_eq!(
            counts,
            vec![
                (Disease::Kidney, 24),
                (Disease::Hypertension, 14),
                (Disease::Stroke, 10),
                (Disease::Cancer, 10),
                (Disease::Liver, 10),
                (Disease::Diabetes, 8),
                (Disease::Heart, 13),
            ]
        );
    }

    #[test]
    fn test_names_unique_and_defaults_in_domain() {
        for disease in Disease::ALL {
            let schema = disease.schema();
            assert_eq!(schema.disease, disease);

            let names: HashSet<_> = schema.names().collect();
            assert_eq!(names.len(), schema.len(), "duplicate field in {disease}");

            for field in schema.fields {
                assert!(
                    field.accepts(&field.default_value()),
                    "{disease}.{} default out of domain",
                    field.name
                );
            }
        }
    }

    #[test]
    fn test_schema_for_unknown() {
        let err = schema_for("Flu").unwrap_err();
        assert!(matches!(err, HealthError::NotFound { kind: "schema", .. }));
        assert_eq!(schema_for("liver").unwrap().disease, Disease::Liver);
    }

    #[test]
    fn test_step_numeric_clamps() {
        let age = DIABETES.field("Age").unwrap();
        assert_eq!(age.step_by(&FieldValue::Integer(99), 5), FieldValue::Integer(100));
        assert_eq!(age.step_by(&FieldValue::Integer(2), -5), FieldValue::Integer(1));

        let bmi = DIABETES.field("BMI").unwrap();
        assert_eq!(bmi.step_by(&FieldValue::Decimal(28.5), 1), FieldValue::Decimal(28.51));
    }

    #[test]
    fn test_step_categorical_does_not_wrap() {
        let sex = HEART.field("sex").unwrap();
        assert_eq!(sex.step_by(&FieldValue::Integer(0), 1), FieldValue::Integer(1));
        assert_eq!(sex.step_by(&FieldValue::Integer(1), 1), FieldValue::Integer(1));
        assert_eq!(sex.step_by(&FieldValue::Integer(1), -3), FieldValue::Integer(0));
    }

    #[test]
    fn test_parse_value() {
        let glucose = DIABETES.field("Glucose").unwrap();
        assert_eq!(glucose.parse_value("200"), Ok(FieldValue::Integer(200)));
        assert!(glucose.parse_value("12.5").is_err());
        assert!(glucose.parse_value("400").is_err());
        assert!(glucose.parse_value("abc").is_err());

        let dpf = DIABETES.field("DiabetesPedigreeFunction").unwrap();
        assert_eq!(dpf.parse_value("1.2"), Ok(FieldValue::Decimal(1.2)));
    }

    #[test]
    fn test_domain_hint() {
        assert_eq!(HEART.field("sex").unwrap().domain_hint(), "0/1");
        assert_eq!(DIABETES.field("Age").unwrap().domain_hint(), "1-100");
        assert_eq!(DIABETES.field("BMI").unwrap().domain_hint(), "10.0-60.0");
    }
}
