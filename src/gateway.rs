//! HTTP surface the questionnaire UI talks to: health/readiness/metrics
//! plumbing plus the assessment endpoint that runs the validate-and-submit
//! pipeline.

use crate::intake::{CandidateRecord, ValidationEngine, Verdict};
use crate::predictor::PredictorClient;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ValidationEngine>,
    pub predictor: Arc<PredictorClient>,
    pub readiness: Arc<AtomicBool>,
    pub metrics: PrometheusHandle,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/assessment", post(assessment_endpoint))
        .with_state(state)
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Runs one submission attempt: validate the raw answers, and only when the
/// whole record is valid forward it to the predictor. Validation failures
/// never trigger a network call.
async fn assessment_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Map<String, serde_json::Value>>,
) -> Response {
    let candidate = CandidateRecord::from_json_map(&payload);

    match state.engine.validate(&candidate) {
        Verdict::Invalid(errors) => {
            info!(rejected_fields = errors.len(), "assessment failed validation");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "errors": errors })),
            )
                .into_response()
        }
        Verdict::Valid(record) => match state.predictor.submit(&record).await {
            Ok(prediction) => Json(prediction).into_response(),
            Err(err) => {
                warn!(endpoint = state.predictor.endpoint(), error = %err, "prediction request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({ "error": err.to_string() })),
                )
                    .into_response()
            }
        },
    }
}
