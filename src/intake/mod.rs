//! Validation core for the health questionnaire: the field registry, the
//! candidate/normalized record types, and the validation engine.

mod engine;
mod record;
mod registry;

pub use engine::{ValidationEngine, Verdict};
pub use record::{CandidateRecord, FieldValue, NormalizedRecord};
pub use registry::{ActivationRule, FieldDef, FieldKind, FieldRegistry, NumericRange};
