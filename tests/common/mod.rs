#![allow(dead_code)]

use axum::http::{header, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use health_intake::intake::CandidateRecord;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A complete answer set with every required field at a valid mid-range
/// value; optional clinical fields are left out.
pub fn valid_candidate() -> CandidateRecord {
    let mut candidate = CandidateRecord::new();
    let answers = [
        ("age", "25"),
        ("gender", "Male"),
        ("race", "White"),
        ("occupation", "Teacher"),
        ("height", "170"),
        ("weight", "70"),
        ("systolicBP", "120"),
        ("diastolicBP", "80"),
        ("heartRate", "72"),
        ("sleepDuration", "7.5"),
        ("sleepQuality", "8"),
        ("dailySteps", "8000"),
        ("physicalActivity", "Yes"),
        ("physicalActivityDuration", "45"),
        ("smoking", "No"),
        ("alcoholDrinking", "No"),
        ("physicalHealth", "5"),
        ("mentalHealth", "5"),
        ("stressLevel", "3"),
        ("genHealth", "Good"),
        ("diffWalking", "No"),
        ("stroke", "No"),
        ("diabetic", "No"),
        ("asthma", "No"),
        ("kidneyDisease", "No"),
        ("skinCancer", "No"),
        ("goodCholesterol", "Normal"),
        ("uricAcidCategory", "Normal"),
    ];
    for (field, value) in answers {
        candidate.set(field, value);
    }
    candidate
}

/// Stub prediction service bound to an ephemeral port, counting the requests
/// it receives.
pub struct StubPredictor {
    pub endpoint: String,
    pub hits: Arc<AtomicUsize>,
}

impl StubPredictor {
    pub fn hit_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

pub async fn spawn_predictor(status: StatusCode, body: &'static str) -> StubPredictor {
    let hits = Arc::new(AtomicUsize::new(0));

    let app = Router::new().route(
        "/predict",
        post({
            let hits = hits.clone();
            move |Json(_): Json<serde_json::Value>| {
                let hits = hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    (status, [(header::CONTENT_TYPE, "application/json")], body)
                }
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub predictor");
    let addr = listener.local_addr().expect("stub predictor address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub predictor serves");
    });

    StubPredictor {
        endpoint: format!("http://{addr}/predict"),
        hits,
    }
}
