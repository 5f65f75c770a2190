mod common;

use axum::http::StatusCode;
use common::{spawn_predictor, valid_candidate};
use health_intake::config::PredictorConfig;
use health_intake::intake::{ValidationEngine, Verdict};
use health_intake::predictor::{PredictorClient, TransportError};
use serde_json::json;
use std::time::Duration;

fn client(endpoint: String) -> PredictorClient {
    PredictorClient::new(&PredictorConfig {
        endpoint,
        timeout: Duration::from_secs(5),
    })
    .expect("client builds")
}

#[tokio::test]
async fn valid_record_is_submitted_once_and_response_relayed() {
    let stub = spawn_predictor(
        StatusCode::OK,
        r#"{"heart": 0, "sleep": 1, "metabolism": 0}"#,
    )
    .await;

    let verdict = ValidationEngine::standard().validate(&valid_candidate());
    let record = match verdict {
        Verdict::Valid(record) => record,
        Verdict::Invalid(errors) => panic!("candidate should validate: {errors:?}"),
    };

    let prediction = client(stub.endpoint.clone())
        .submit(&record)
        .await
        .expect("submission succeeds");

    assert_eq!(prediction, json!({"heart": 0, "sleep": 1, "metabolism": 0}));
    assert_eq!(stub.hit_count(), 1);
}

#[tokio::test]
async fn server_failure_surfaces_status_without_retry() {
    let stub = spawn_predictor(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"error": "model unavailable"}"#,
    )
    .await;

    let record = ValidationEngine::standard().normalize(&valid_candidate());
    let result = client(stub.endpoint.clone()).submit(&record).await;

    match result {
        Err(TransportError::ServerError(status)) => assert_eq!(status, 500),
        other => panic!("expected ServerError, got {other:?}"),
    }
    assert_eq!(stub.hit_count(), 1, "a failed exchange must not be retried");
}

#[tokio::test]
async fn unparsable_response_body_is_a_malformed_response() {
    let stub = spawn_predictor(StatusCode::OK, "predictions pending").await;

    let record = ValidationEngine::standard().normalize(&valid_candidate());
    let result = client(stub.endpoint.clone()).submit(&record).await;

    assert!(matches!(result, Err(TransportError::MalformedResponse(_))));
    assert_eq!(stub.hit_count(), 1);
}

#[tokio::test]
async fn unreachable_endpoint_is_a_network_error() {
    // Bind and immediately drop a listener so the port is known to refuse.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);

    let record = ValidationEngine::standard().normalize(&valid_candidate());
    let result = client(format!("http://{addr}/predict")).submit(&record).await;

    assert!(matches!(result, Err(TransportError::Network(_))));
}

#[tokio::test]
async fn invalid_candidate_never_reaches_the_predictor() {
    let stub = spawn_predictor(StatusCode::OK, r#"{"heart": 0}"#).await;

    let candidate = valid_candidate().with("age", "15").with("gender", "");
    let verdict = ValidationEngine::standard().validate(&candidate);

    let errors = verdict.errors().expect("candidate is invalid");
    assert_eq!(errors.len(), 2);
    assert_eq!(stub.hit_count(), 0);
}
