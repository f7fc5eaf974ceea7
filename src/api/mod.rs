//! HTTP surface of the proxy.
//!
//! Exposes the chat endpoint and a liveness check, with permissive CORS and
//! JSON bodies throughout. Handlers share one immutable state value; there
//! is no per-request bookkeeping anywhere in the server.

mod handlers;
mod types;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::error::ProxyError;
use crate::orchestrator::ChatOrchestrator;
use handlers::{handle_chat, handle_health};

pub use types::{ErrorResponse, HealthStatus};

/// HTTP server wrapping a [`ChatOrchestrator`].
pub struct Server {
    orchestrator: Arc<ChatOrchestrator>,
}

/// Internal server state shared between request handlers
#[derive(Clone)]
struct ServerState {
    orchestrator: Arc<ChatOrchestrator>,
}

impl Server {
    /// Creates a new server around the given orchestrator.
    pub fn new(orchestrator: ChatOrchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }

    /// Starts the server and listens for requests on the specified address.
    ///
    /// # Errors
    /// `ProxyError::Config` if the listener cannot bind, `ProxyError::Http`
    /// if serving fails afterwards.
    pub async fn run(self, addr: &str) -> Result<(), ProxyError> {
        let app = Router::new()
            .route("/chat", post(handle_chat))
            .route("/health", get(handle_health))
            .layer(CorsLayer::permissive())
            .with_state(ServerState {
                orchestrator: self.orchestrator,
            });

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|err| ProxyError::Config(format!("failed to bind {addr}: {err}")))?;

        log::info!("chat proxy listening on {addr}");

        axum::serve(listener, app)
            .await
            .map_err(|err| ProxyError::Http(err.to_string()))?;

        Ok(())
    }
}
