//! Fire-and-forget reporting of completed exchanges to the evaluator
//! service.
//!
//! The dispatcher posts each exchange to the evaluator on its own tokio task
//! and never surfaces the outcome to its caller: a scored result is logged,
//! a failure is logged and dropped. There is no retry and no queueing; an
//! unreachable evaluator loses that evaluation.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::ProxyError;

/// One completed exchange, as reported to the evaluator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationPayload {
    /// User prompt that was proxied
    pub prompt: String,
    /// Text the model backend produced
    pub response: String,
    /// Measured duration of the backend call, whole milliseconds
    pub latency_ms: u64,
    /// Model that produced the response
    pub model_name: String,
    /// Caller-supplied user identifier, passed through untouched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Scored exchange returned by the evaluator. Never constructed locally;
/// only deserialized from the evaluator's response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    /// Identifier the evaluator assigned to the stored exchange
    pub request_id: i64,
    pub factuality: f64,
    pub relevance: f64,
    pub coherence: f64,
    pub safety: f64,
    pub normalized_latency: f64,
    pub calibration: f64,
    /// Composite [0,1] score across all dimensions
    pub health_score: f64,
}

/// Sink for completed exchanges.
///
/// Implementations must return without waiting for the evaluation to finish
/// and must never let a failure reach the caller.
pub trait EvaluationSink: Send + Sync {
    /// Hands one exchange off for evaluation.
    fn dispatch(&self, payload: EvaluationPayload);
}

/// HTTP client for the evaluator service.
pub struct EvaluatorClient {
    /// Endpoint evaluation payloads are posted to
    endpoint: String,
    /// HTTP client for making API requests
    client: Client,
}

impl EvaluatorClient {
    /// Creates a new evaluator client for `endpoint`.
    pub fn new(endpoint: impl Into<String>, timeout_seconds: Option<u64>) -> Self {
        let mut builder = Client::builder();
        if let Some(sec) = timeout_seconds {
            builder = builder.timeout(std::time::Duration::from_secs(sec));
        }
        Self {
            endpoint: endpoint.into(),
            client: builder.build().expect("Failed to build reqwest Client"),
        }
    }

    /// Performs the evaluation call and parses the scored result.
    ///
    /// # Errors
    /// Fails on network failure, a non-2xx status, or a malformed body. The
    /// caller of [`EvaluationSink::dispatch`] never sees these; they are
    /// logged by the spawned task.
    async fn send(
        client: Client,
        endpoint: String,
        payload: EvaluationPayload,
    ) -> Result<EvaluationResult, ProxyError> {
        let resp = client
            .post(&endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|err| ProxyError::Evaluation(err.to_string()))?;

        log::debug!("evaluator HTTP status: {}", resp.status());
        if !resp.status().is_success() {
            return Err(ProxyError::Evaluation(format!(
                "evaluator returned error status: {}",
                resp.status()
            )));
        }

        resp.json::<EvaluationResult>()
            .await
            .map_err(|err| ProxyError::Evaluation(err.to_string()))
    }
}

impl EvaluationSink for EvaluatorClient {
    fn dispatch(&self, payload: EvaluationPayload) {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        tokio::spawn(async move {
            match Self::send(client, endpoint, payload).await {
                Ok(result) => {
                    log::info!(
                        "evaluation completed for request {}: healthScore={:.3}",
                        result.request_id,
                        result.health_score
                    );
                }
                Err(err) => log::warn!("error sending data to evaluator service: {err}"),
            }
        });
    }
}
