use super::record::{CandidateRecord, FieldValue, NormalizedRecord};
use super::registry::{FieldDef, FieldKind, FieldRegistry};
use std::collections::BTreeMap;

/// Outcome of evaluating a candidate against the registry: either the
/// normalized record ready for transmission, or every failing field mapped
/// to its user-facing message.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Valid(NormalizedRecord),
    Invalid(BTreeMap<String, String>),
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn errors(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Valid(_) => None,
            Self::Invalid(errors) => Some(errors),
        }
    }
}

/// Stateless evaluator applying the field registry to candidate records.
///
/// `validate` and `normalize` are pure over the registry; each call starts
/// from a fresh error mapping and retains nothing between attempts.
pub struct ValidationEngine {
    registry: FieldRegistry,
}

impl ValidationEngine {
    pub fn new(registry: FieldRegistry) -> Self {
        Self { registry }
    }

    pub fn standard() -> Self {
        Self::new(FieldRegistry::standard())
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// Checks every field independently and collects all failures; there is
    /// no short-circuit on the first error. Fields whose activation rule is
    /// currently false are skipped entirely.
    pub fn validate(&self, candidate: &CandidateRecord) -> Verdict {
        let mut errors = BTreeMap::new();

        for field in self.registry.fields_in_evaluation_order() {
            if !field_active(field, candidate) {
                continue;
            }
            if let Some(message) = check_field(field, candidate) {
                errors.insert(field.name.to_string(), message.to_string());
            }
        }

        if errors.is_empty() {
            Verdict::Valid(self.normalize(candidate))
        } else {
            Verdict::Invalid(errors)
        }
    }

    /// Coerces textual answers to their typed representation. Numeric fields
    /// left blank become [`FieldValue::Absent`]; categorical answers pass
    /// through unchanged. Callers must only reach this with a candidate that
    /// already passed [`ValidationEngine::validate`].
    pub fn normalize(&self, candidate: &CandidateRecord) -> NormalizedRecord {
        let mut record = NormalizedRecord::default();

        for field in self.registry.fields_in_evaluation_order() {
            let raw = candidate.get(field.name).map(str::trim).unwrap_or("");
            let value = match field.kind {
                FieldKind::Integer => raw
                    .parse::<i64>()
                    .map(FieldValue::Integer)
                    .unwrap_or(FieldValue::Absent),
                FieldKind::Decimal => raw
                    .parse::<f64>()
                    .map(FieldValue::Decimal)
                    .unwrap_or(FieldValue::Absent),
                FieldKind::Category | FieldKind::Binary => FieldValue::Text(raw.to_string()),
            };
            record.insert(field.name, value);
        }

        record
    }
}

fn field_active(field: &FieldDef, candidate: &CandidateRecord) -> bool {
    match field.activation {
        Some(rule) => candidate.get(rule.field).map(str::trim) == Some(rule.equals),
        None => true,
    }
}

fn check_field(field: &FieldDef, candidate: &CandidateRecord) -> Option<&'static str> {
    let raw = candidate.get(field.name).map(str::trim).unwrap_or("");

    if raw.is_empty() {
        return field.required.then_some(field.message);
    }

    match field.kind {
        FieldKind::Integer => match raw.parse::<i64>() {
            Ok(value) if field.within_range(value as f64) => None,
            _ => Some(field.message),
        },
        FieldKind::Decimal => match raw.parse::<f64>() {
            Ok(value) if value.is_finite() && field.within_range(value) => None,
            _ => Some(field.message),
        },
        FieldKind::Category | FieldKind::Binary => {
            if field.allowed.contains(&raw) {
                None
            } else {
                Some(field.message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ValidationEngine {
        ValidationEngine::standard()
    }

    #[test]
    fn empty_candidate_flags_every_required_field() {
        let verdict = engine().validate(&CandidateRecord::new());
        let errors = verdict.errors().expect("empty candidate is invalid");

        assert_eq!(errors["age"], "Age must be between 18 and 100");
        assert_eq!(errors["gender"], "Gender is required");
        // Optional clinical fields and the inactive duration field stay silent.
        assert!(!errors.contains_key("albuminuria"));
        assert!(!errors.contains_key("urineAlbuminCreatinineRatio"));
        assert!(!errors.contains_key("trigCategory"));
        assert!(!errors.contains_key("physicalActivityDuration"));
    }

    #[test]
    fn unparsable_number_gets_the_range_message() {
        let candidate = CandidateRecord::new().with("age", "twenty-five");
        let verdict = engine().validate(&candidate);
        let errors = verdict.errors().expect("invalid");
        assert_eq!(errors["age"], "Age must be between 18 and 100");
    }

    #[test]
    fn integer_field_rejects_fractional_input() {
        let candidate = CandidateRecord::new().with("sleepQuality", "7.5");
        let verdict = engine().validate(&candidate);
        let errors = verdict.errors().expect("invalid");
        assert!(errors.contains_key("sleepQuality"));
    }

    #[test]
    fn whitespace_only_answer_counts_as_missing() {
        let candidate = CandidateRecord::new().with("gender", "   ");
        let verdict = engine().validate(&candidate);
        let errors = verdict.errors().expect("invalid");
        assert_eq!(errors["gender"], "Gender is required");
    }

    #[test]
    fn optional_numeric_is_range_checked_only_when_provided() {
        let base = CandidateRecord::new();
        let errors = engine().validate(&base);
        assert!(!errors
            .errors()
            .expect("invalid")
            .contains_key("urineAlbuminCreatinineRatio"));

        let out_of_range = CandidateRecord::new().with("urineAlbuminCreatinineRatio", "3001");
        let verdict = engine().validate(&out_of_range);
        assert_eq!(
            verdict.errors().expect("invalid")["urineAlbuminCreatinineRatio"],
            "Urine Albumin-Creatinine Ratio must be between 0 and 3000 mg/g"
        );
    }
}
