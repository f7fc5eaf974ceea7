use thiserror::Error;

/// Error types that can occur while proxying chat requests.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Malformed client input, reported back as a client error
    #[error("Invalid request: {0}")]
    Validation(String),
    /// HTTP transport errors on an outbound call
    #[error("HTTP error: {0}")]
    Http(String),
    /// Model backend returned an error status or an unusable body
    #[error("Upstream error: {message}. Raw response: {raw_response}")]
    Upstream {
        message: String,
        raw_response: String,
    },
    /// Evaluator-side failure, contained within the dispatch path
    #[error("Evaluation error: {0}")]
    Evaluation(String),
    /// Missing or invalid startup configuration
    #[error("Config error: {0}")]
    Config(String),
    /// JSON serialization/deserialization errors
    #[error("JSON parse error: {0}")]
    Json(String),
}

/// Converts reqwest HTTP errors into ProxyErrors
impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        ProxyError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for ProxyError {
    fn from(err: serde_json::Error) -> Self {
        ProxyError::Json(format!(
            "{} at line {} column {}",
            err,
            err.line(),
            err.column()
        ))
    }
}
