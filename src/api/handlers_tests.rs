use std::sync::Arc;

use async_trait::async_trait;
use axum::{extract::State, http::StatusCode, Json};
use serde_json::json;

use super::{handle_chat, handle_health};
use crate::api::ServerState;
use crate::backends::{ModelBackend, ModelReply};
use crate::error::ProxyError;
use crate::evaluator::{EvaluationPayload, EvaluationSink};
use crate::orchestrator::{ChatOrchestrator, ChatRequest};

struct CannedBackend {
    outcome: Result<ModelReply, ()>,
}

#[async_trait]
impl ModelBackend for CannedBackend {
    async fn generate(&self, _prompt: &str) -> Result<ModelReply, ProxyError> {
        self.outcome
            .clone()
            .map_err(|()| ProxyError::Http("connection refused".to_string()))
    }
}

struct NullSink;

impl EvaluationSink for NullSink {
    fn dispatch(&self, _payload: EvaluationPayload) {}
}

fn state(outcome: Result<ModelReply, ()>) -> ServerState {
    ServerState {
        orchestrator: Arc::new(ChatOrchestrator::new(
            Arc::new(CannedBackend { outcome }),
            Arc::new(NullSink),
        )),
    }
}

fn answering(content: &str) -> ServerState {
    state(Ok(ModelReply {
        model_name: "gemini-2.0-flash".to_string(),
        content: content.to_string(),
    }))
}

#[tokio::test]
async fn chat_returns_answer_model_and_latency() {
    let req: ChatRequest = serde_json::from_value(json!({ "prompt": "What is 2+2?" })).unwrap();

    let Json(reply) = handle_chat(State(answering("4")), Json(req)).await.unwrap();

    let body = serde_json::to_value(&reply).unwrap();
    assert_eq!(body["answer"], "4");
    assert_eq!(body["model"], "gemini-2.0-flash");
    assert!(body["latencyMs"].is_u64());
}

#[tokio::test]
async fn missing_prompt_is_a_400_with_the_fixed_message() {
    let req: ChatRequest = serde_json::from_value(json!({ "userId": "user-7" })).unwrap();

    let (status, Json(body)) = handle_chat(State(answering("4")), Json(req))
        .await
        .unwrap_err();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.error, "prompt is required and must be a string");
}

#[tokio::test]
async fn non_string_prompt_is_a_400_with_the_fixed_message() {
    let req: ChatRequest = serde_json::from_value(json!({ "prompt": 42 })).unwrap();

    let (status, Json(body)) = handle_chat(State(answering("4")), Json(req))
        .await
        .unwrap_err();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.error, "prompt is required and must be a string");
}

#[tokio::test]
async fn upstream_failure_is_an_opaque_500() {
    let req: ChatRequest = serde_json::from_value(json!({ "prompt": "anything" })).unwrap();

    let (status, Json(body)) = handle_chat(State(state(Err(()))), Json(req))
        .await
        .unwrap_err();

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.error, "Failed to process chat request");
}

#[tokio::test]
async fn empty_answer_is_still_a_success() {
    let req: ChatRequest = serde_json::from_value(json!({ "prompt": "anything" })).unwrap();

    let Json(reply) = handle_chat(State(answering("")), Json(req)).await.unwrap();

    assert_eq!(reply.answer, "");
}

#[tokio::test]
async fn health_reports_the_service_name() {
    let Json(status) = handle_health().await;
    assert_eq!(status.status, "ok");
    assert_eq!(status.service, "chatproxy");
}
