use serde::{Deserialize, Serialize};

/// Semantic type of a questionnaire answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Integer,
    Decimal,
    Category,
    Binary,
}

impl FieldKind {
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Decimal)
    }
}

/// Inclusive bounds for a numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Cross-field predicate: the owning field is only checked while the
/// referenced field currently holds `equals`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationRule {
    pub field: &'static str,
    pub equals: &'static str,
}

/// Static description of one questionnaire item and its legality rules.
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub range: Option<NumericRange>,
    pub allowed: &'static [&'static str],
    pub activation: Option<ActivationRule>,
    /// Exact user-facing message recorded when this field fails any check.
    pub message: &'static str,
}

impl FieldDef {
    fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    fn activated_by(mut self, field: &'static str, equals: &'static str) -> Self {
        self.activation = Some(ActivationRule { field, equals });
        self
    }

    pub fn within_range(&self, value: f64) -> bool {
        self.range.map_or(true, |range| range.contains(value))
    }
}

const YES_NO: &[&str] = &["Yes", "No"];

fn integer(
    name: &'static str,
    label: &'static str,
    min: f64,
    max: f64,
    message: &'static str,
) -> FieldDef {
    FieldDef {
        name,
        label,
        kind: FieldKind::Integer,
        required: true,
        range: Some(NumericRange { min, max }),
        allowed: &[],
        activation: None,
        message,
    }
}

fn decimal(
    name: &'static str,
    label: &'static str,
    min: f64,
    max: f64,
    message: &'static str,
) -> FieldDef {
    FieldDef {
        name,
        label,
        kind: FieldKind::Decimal,
        required: true,
        range: Some(NumericRange { min, max }),
        allowed: &[],
        activation: None,
        message,
    }
}

fn category(
    name: &'static str,
    label: &'static str,
    allowed: &'static [&'static str],
    message: &'static str,
) -> FieldDef {
    FieldDef {
        name,
        label,
        kind: FieldKind::Category,
        required: true,
        range: None,
        allowed,
        activation: None,
        message,
    }
}

fn binary(name: &'static str, label: &'static str, message: &'static str) -> FieldDef {
    FieldDef {
        name,
        label,
        kind: FieldKind::Binary,
        required: true,
        range: None,
        allowed: YES_NO,
        activation: None,
        message,
    }
}

/// Single source of truth for what constitutes a legal answer set.
///
/// Pure data; the registry performs no checks itself. Any field referenced by
/// an activation rule must be evaluable on its own (no rule chains), which
/// the standard definitions uphold by construction.
#[derive(Debug)]
pub struct FieldRegistry {
    fields: Vec<FieldDef>,
}

impl FieldRegistry {
    pub fn standard() -> Self {
        Self {
            fields: standard_field_definitions(),
        }
    }

    pub fn fields_in_evaluation_order(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn standard_field_definitions() -> Vec<FieldDef> {
    vec![
        // Personal details
        integer("age", "Age", 18.0, 100.0, "Age must be between 18 and 100"),
        category(
            "gender",
            "Gender",
            &["Male", "Female"],
            "Gender is required",
        ),
        category(
            "race",
            "Race",
            &[
                "White",
                "Black",
                "Asian",
                "Hispanic",
                "American Indian/Alaskan Native",
                "MexAmerican",
            ],
            "Race is required",
        ),
        category(
            "occupation",
            "Occupation",
            &[
                "Teacher",
                "Software Engineer",
                "Scientist",
                "Salesperson",
                "Nurse",
                "Manager",
                "Lawyer",
                "Engineer",
                "Doctor",
                "Accountant",
                "Student",
                "Other",
            ],
            "Occupation is required",
        ),
        // Body measurements
        decimal(
            "height",
            "Height",
            100.0,
            200.0,
            "Height must be between 100 and 200 cm",
        ),
        decimal(
            "weight",
            "Weight",
            30.0,
            150.0,
            "Weight must be between 30 and 150 kg",
        ),
        integer(
            "systolicBP",
            "Systolic BP",
            90.0,
            200.0,
            "Systolic BP must be between 90 and 200 mmHg",
        ),
        integer(
            "diastolicBP",
            "Diastolic BP",
            60.0,
            130.0,
            "Diastolic BP must be between 60 and 130 mmHg",
        ),
        integer(
            "heartRate",
            "Heart Rate",
            40.0,
            200.0,
            "Heart Rate must be between 40 and 200 bpm",
        ),
        // Sleep and daily routine
        decimal(
            "sleepDuration",
            "Sleep Duration",
            0.0,
            24.0,
            "Sleep Duration must be between 0 and 24 hours",
        ),
        integer(
            "sleepQuality",
            "Sleep Quality",
            1.0,
            10.0,
            "Sleep Quality must be between 1 and 10",
        ),
        integer(
            "dailySteps",
            "Daily Steps",
            0.0,
            50_000.0,
            "Daily Steps must be between 0 and 50,000",
        ),
        binary(
            "physicalActivity",
            "Physical Activity",
            "Physical Activity is required",
        ),
        integer(
            "physicalActivityDuration",
            "Physical Activity Duration",
            0.0,
            300.0,
            "Duration must be between 0 and 300 minutes",
        )
        .activated_by("physicalActivity", "Yes"),
        // Habits
        binary("smoking", "Smoking", "Smoking status is required"),
        binary(
            "alcoholDrinking",
            "Alcohol Drinking",
            "Alcohol drinking status is required",
        ),
        // Mental and physical well-being
        integer(
            "physicalHealth",
            "Physical Health",
            1.0,
            30.0,
            "Physical Health must be between 1 and 30",
        ),
        integer(
            "mentalHealth",
            "Mental Health",
            1.0,
            30.0,
            "Mental Health must be between 1 and 30",
        ),
        integer(
            "stressLevel",
            "Stress Level",
            1.0,
            10.0,
            "Stress Level must be between 1 and 10",
        ),
        category(
            "genHealth",
            "General Health",
            &["Excellent", "Very good", "Good", "Fair", "Poor"],
            "General Health is required",
        ),
        binary(
            "diffWalking",
            "Difficulty Walking",
            "Difficulty Walking status is required",
        ),
        // Past conditions
        binary("stroke", "Stroke", "Stroke status is required"),
        category(
            "diabetic",
            "Diabetic",
            &["Yes", "Pre-diabetic", "No"],
            "Diabetic status is required",
        ),
        binary("asthma", "Asthma", "Asthma status is required"),
        binary(
            "kidneyDisease",
            "Kidney Disease",
            "Kidney Disease status is required",
        ),
        binary("skinCancer", "Skin Cancer", "Skin Cancer status is required"),
        // Clinical indicators
        category(
            "goodCholesterol",
            "Good Cholesterol",
            &["Normal", "Low"],
            "Good Cholesterol is required",
        ),
        category(
            "uricAcidCategory",
            "Uric Acid Category",
            &["Normal", "High"],
            "Uric Acid Category is required",
        ),
        binary("albuminuria", "Albuminuria", "Albuminuria must be Yes or No").optional(),
        decimal(
            "urineAlbuminCreatinineRatio",
            "Urine Albumin-Creatinine Ratio",
            0.0,
            3000.0,
            "Urine Albumin-Creatinine Ratio must be between 0 and 3000 mg/g",
        )
        .optional(),
        category(
            "trigCategory",
            "Triglyceride Category",
            &["Normal", "High"],
            "Triglyceride Category must be Normal or High",
        )
        .optional(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_covers_every_questionnaire_item() {
        let registry = FieldRegistry::standard();
        assert_eq!(registry.len(), 31);

        let age = registry.field("age").expect("age defined");
        assert_eq!(age.kind, FieldKind::Integer);
        assert_eq!(age.range, Some(NumericRange { min: 18.0, max: 100.0 }));
        assert!(age.required);

        let gender = registry.field("gender").expect("gender defined");
        assert_eq!(gender.kind, FieldKind::Category);
        assert_eq!(gender.allowed, &["Male", "Female"]);
    }

    #[test]
    fn duration_field_activates_on_physical_activity() {
        let registry = FieldRegistry::standard();
        let duration = registry
            .field("physicalActivityDuration")
            .expect("duration defined");

        let rule = duration.activation.expect("activation rule present");
        assert_eq!(rule.field, "physicalActivity");
        assert_eq!(rule.equals, "Yes");
    }

    #[test]
    fn optional_clinical_fields_are_not_required() {
        let registry = FieldRegistry::standard();
        for name in ["albuminuria", "urineAlbuminCreatinineRatio", "trigCategory"] {
            let field = registry.field(name).expect("clinical field defined");
            assert!(!field.required, "{name} should be optional");
        }
    }

    #[test]
    fn ranges_are_inclusive_at_their_bounds() {
        let registry = FieldRegistry::standard();
        let steps = registry.field("dailySteps").expect("dailySteps defined");
        assert!(steps.within_range(0.0));
        assert!(steps.within_range(50_000.0));
        assert!(!steps.within_range(50_001.0));
    }
}
