//! Backend adapter for the generative model provider.

pub mod google;

use async_trait::async_trait;

use crate::error::ProxyError;

/// Canonical result of one model backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelReply {
    /// Identifier of the model that produced the text
    pub model_name: String,
    /// Generated text; empty when the provider returned no candidates
    pub content: String,
}

/// Trait for backends that turn a text prompt into a [`ModelReply`].
///
/// Prompt validation happens in the orchestrator; implementations may assume
/// a non-empty prompt and only translate it into a provider request.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Sends one generation request for `prompt`.
    ///
    /// # Errors
    /// Fails on network failure, a non-2xx provider status, or a response
    /// body that cannot be parsed. A successful call that produced no
    /// candidates is not an error.
    async fn generate(&self, prompt: &str) -> Result<ModelReply, ProxyError>;
}
