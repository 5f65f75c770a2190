//! Health questionnaire intake: a declarative field registry, a pure
//! validation/normalization engine, and a one-shot submission client for the
//! remote prediction service, fronted by a small HTTP gateway.

pub mod config;
pub mod error;
pub mod gateway;
pub mod intake;
pub mod predictor;
pub mod telemetry;
