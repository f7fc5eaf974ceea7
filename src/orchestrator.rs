//! Per-request coordination: validate, call the model backend, measure
//! latency, hand the exchange off for evaluation, reply.
//!
//! Each request runs `Validating → Generating → TimingComplete → Dispatching
//! → Responded` and ends in exactly one terminal state; nothing is retained
//! across requests. The reply never depends on the evaluation outcome: the
//! dispatch is fired after the latency is known and its completion is never
//! awaited.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::backends::ModelBackend;
use crate::error::ProxyError;
use crate::evaluator::{EvaluationPayload, EvaluationSink};

/// Fixed message returned for every rejected prompt.
pub const PROMPT_VALIDATION_MESSAGE: &str = "prompt is required and must be a string";

/// Inbound chat request.
///
/// `prompt` stays a raw JSON value until validation so that missing, null
/// and mistyped prompts all take the same rejection path instead of dying
/// in the deserializer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// Optional caller identifier, passed through to the evaluator
    #[serde(default)]
    pub user_id: Option<String>,
    /// The prompt to forward; must be a non-empty JSON string
    #[serde(default)]
    pub prompt: Option<Value>,
}

/// Reply returned to the caller.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    /// Text the model produced, possibly empty
    pub answer: String,
    /// Model that produced the answer
    pub model: String,
    /// Duration of the backend call, whole milliseconds
    pub latency_ms: u64,
}

/// Drives one chat request from validation to its terminal state.
pub struct ChatOrchestrator {
    backend: Arc<dyn ModelBackend>,
    evaluator: Arc<dyn EvaluationSink>,
}

impl ChatOrchestrator {
    /// Creates an orchestrator over the given backend and evaluation sink.
    pub fn new(backend: Arc<dyn ModelBackend>, evaluator: Arc<dyn EvaluationSink>) -> Self {
        Self { backend, evaluator }
    }

    /// Handles one request.
    ///
    /// # Errors
    /// `ProxyError::Validation` when the prompt is rejected; the backend and
    /// the evaluator are not touched in that case. Any backend error is
    /// passed through and suppresses the evaluation dispatch.
    pub async fn handle(&self, req: ChatRequest) -> Result<ChatReply, ProxyError> {
        let prompt = validate_prompt(req.prompt)?;

        let start = Instant::now();
        let reply = self.backend.generate(&prompt).await?;
        let latency_ms = start.elapsed().as_millis() as u64;

        self.evaluator.dispatch(EvaluationPayload {
            prompt,
            response: reply.content.clone(),
            latency_ms,
            model_name: reply.model_name.clone(),
            user_id: req.user_id,
        });

        Ok(ChatReply {
            answer: reply.content,
            model: reply.model_name,
            latency_ms,
        })
    }
}

fn validate_prompt(prompt: Option<Value>) -> Result<String, ProxyError> {
    match prompt {
        Some(Value::String(prompt)) if !prompt.is_empty() => Ok(prompt),
        _ => Err(ProxyError::Validation(
            PROMPT_VALIDATION_MESSAGE.to_string(),
        )),
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
