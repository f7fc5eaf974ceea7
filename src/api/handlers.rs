use axum::{extract::State, http::StatusCode, Json};

use super::types::{ErrorResponse, HealthStatus};
use super::ServerState;
use crate::error::ProxyError;
use crate::orchestrator::{ChatReply, ChatRequest};

pub type ApiResult<T> = Result<T, (StatusCode, Json<ErrorResponse>)>;

/// Handles `POST /chat`.
///
/// A rejected prompt maps to 400 with the fixed validation message. Every
/// other failure is an upstream fault: the detail is logged server-side and
/// the caller only sees the opaque 500 message.
pub async fn handle_chat(
    State(state): State<ServerState>,
    Json(req): Json<ChatRequest>,
) -> ApiResult<Json<ChatReply>> {
    match state.orchestrator.handle(req).await {
        Ok(reply) => Ok(Json(reply)),
        Err(ProxyError::Validation(message)) => Err(bad_request(message)),
        Err(err) => {
            log::error!("error in /chat route: {err}");
            Err(internal_error("Failed to process chat request"))
        }
    }
}

/// Handles `GET /health`.
pub async fn handle_health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        service: "chatproxy",
    })
}

fn bad_request(msg: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse { error: msg.into() }),
    )
}

fn internal_error(msg: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { error: msg.into() }),
    )
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
