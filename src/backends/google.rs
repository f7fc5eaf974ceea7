//! Google Gemini API client implementation for the model backend.
//!
//! Translates a text prompt into a `generateContent` request and unwraps the
//! provider response into a canonical [`ModelReply`]. The provider may return
//! zero or more candidates; only the first candidate is used and its part
//! texts are concatenated in order. A response without candidates or parts
//! degrades to empty content instead of erroring.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::backends::{ModelBackend, ModelReply};
use crate::error::ProxyError;

/// Base URL of the public generative language API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Client for Google's Gemini generation endpoint.
pub struct Google {
    /// API key sent in the `x-goog-api-key` header
    api_key: SecretString,
    /// Model identifier (e.g. "gemini-2.0-flash")
    model: String,
    /// Base URL of the API, overridable for tests
    base_url: String,
    /// HTTP client for making API requests
    client: Client,
}

/// Request body for content generation
#[derive(Serialize)]
struct GoogleChatRequest<'a> {
    /// Conversation turns; a single user turn per proxy request
    contents: Vec<GoogleChatContent<'a>>,
}

/// Individual turn in the conversation
#[derive(Serialize)]
struct GoogleChatContent<'a> {
    /// Role of the message sender
    role: &'a str,
    /// Content parts of the message
    parts: Vec<GoogleContentPart<'a>>,
}

/// Text content within a turn
#[derive(Serialize)]
struct GoogleContentPart<'a> {
    /// The actual text content
    text: &'a str,
}

/// Response from the generation API. Every field the unwrapping touches is
/// optional on the wire and resolves to an empty default.
#[derive(Deserialize)]
struct GoogleChatResponse {
    #[serde(default)]
    candidates: Vec<GoogleCandidate>,
}

#[derive(Deserialize)]
struct GoogleCandidate {
    #[serde(default)]
    content: Option<GoogleResponseContent>,
}

#[derive(Deserialize)]
struct GoogleResponseContent {
    #[serde(default)]
    parts: Vec<GoogleResponsePart>,
}

#[derive(Deserialize)]
struct GoogleResponsePart {
    #[serde(default)]
    text: String,
}

impl Google {
    /// Creates a new Gemini client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Google API key for authentication
    /// * `model` - Model identifier (defaults to the configured default model)
    /// * `base_url` - API base URL (defaults to the public endpoint)
    /// * `timeout_seconds` - Request timeout in seconds
    pub fn new(
        api_key: SecretString,
        model: Option<String>,
        base_url: Option<String>,
        timeout_seconds: Option<u64>,
    ) -> Self {
        let mut builder = Client::builder();
        if let Some(sec) = timeout_seconds {
            builder = builder.timeout(std::time::Duration::from_secs(sec));
        }
        Self {
            api_key,
            model: model.unwrap_or_else(|| crate::config::DEFAULT_MODEL.to_string()),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client: builder.build().expect("Failed to build reqwest Client"),
        }
    }

    fn generate_url(&self) -> String {
        format!(
            "{base}/models/{model}:generateContent",
            base = self.base_url.trim_end_matches('/'),
            model = self.model
        )
    }
}

#[async_trait]
impl ModelBackend for Google {
    async fn generate(&self, prompt: &str) -> Result<ModelReply, ProxyError> {
        let req_body = GoogleChatRequest {
            contents: vec![GoogleChatContent {
                role: "user",
                parts: vec![GoogleContentPart { text: prompt }],
            }],
        };

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(&req_body) {
                log::trace!("Gemini request payload: {json}");
            }
        }

        let resp = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&req_body)
            .send()
            .await?;

        log::debug!("Gemini HTTP status: {}", resp.status());
        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await?;
            return Err(ProxyError::Upstream {
                message: format!("Gemini returned error status: {status}"),
                raw_response: error_text,
            });
        }

        let body = resp.text().await?;
        let json_resp: GoogleChatResponse = serde_json::from_str(&body)?;

        let content = json_resp
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        Ok(ModelReply {
            model_name: self.model.clone(),
            content,
        })
    }
}

#[cfg(test)]
#[path = "google_tests.rs"]
mod tests;
