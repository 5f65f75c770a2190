use crate::config::PredictorConfig;
use crate::intake::NormalizedRecord;

/// Opaque payload returned by the remote predictor. The engine never
/// interprets prediction content; it is relayed verbatim to the caller.
pub type PredictionResponse = serde_json::Value;

/// Failure modes of a single submission exchange. All variants are surfaced
/// as data; no retry happens here — a retry is a new submission attempt
/// initiated by the caller.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("no response from predictor")]
    Network(#[source] reqwest::Error),
    #[error("predictor returned status {0}")]
    ServerError(u16),
    #[error("predictor response body was not parseable")]
    MalformedResponse(#[source] reqwest::Error),
}

/// Thin client around the remote prediction endpoint.
///
/// The engine imposes no deadline of its own; the configured transport
/// timeout is the only limit on an exchange.
pub struct PredictorClient {
    endpoint: String,
    http: reqwest::Client,
}

impl PredictorClient {
    pub fn new(config: &PredictorConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issues exactly one request carrying the normalized record as its JSON
    /// body and returns the parsed response or the transport failure kind.
    pub async fn submit(
        &self,
        record: &NormalizedRecord,
    ) -> Result<PredictionResponse, TransportError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(record)
            .send()
            .await
            .map_err(TransportError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::ServerError(status.as_u16()));
        }

        response
            .json::<PredictionResponse>()
            .await
            .map_err(TransportError::MalformedResponse)
    }
}
