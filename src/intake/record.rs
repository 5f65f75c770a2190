use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Raw answers as supplied by the collaborator, keyed by field name.
///
/// Values are carried as text until normalization, matching the input
/// widgets' native representation. A missing entry and an empty string are
/// treated identically during validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateRecord {
    answers: BTreeMap<String, String>,
}

impl CandidateRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.answers.insert(field.into(), value.into());
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.answers.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Builds a candidate from a loosely typed JSON object, stringifying
    /// scalar values. Nulls become absent entries; arrays and objects are
    /// kept verbatim as text and will fail validation downstream.
    pub fn from_json_map(map: &serde_json::Map<String, Value>) -> Self {
        let mut candidate = Self::new();
        for (field, value) in map {
            match value {
                Value::Null => {}
                Value::String(text) => candidate.set(field, text.clone()),
                other => candidate.set(field, other.to_string()),
            }
        }
        candidate
    }
}

/// A single normalized answer ready for the wire.
///
/// `Absent` marks an optional numeric field the user left blank; it
/// serializes as JSON `null`, distinguishing "not provided" from zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Decimal(f64),
    Text(String),
    Absent,
}

impl FieldValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// Fully validated, type-coerced answer set. Only produced from a candidate
/// that passed validation in full; never transmitted partially.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NormalizedRecord {
    values: BTreeMap<String, FieldValue>,
}

impl NormalizedRecord {
    pub fn insert(&mut self, field: impl Into<String>, value: FieldValue) {
        self.values.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
