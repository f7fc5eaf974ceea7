//! Process-wide configuration, loaded from the environment once at startup.

use secrecy::SecretString;

use crate::error::ProxyError;

/// Model identifier used when `GEMINI_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 30;
const DEFAULT_EVALUATOR_TIMEOUT_SECS: u64 = 10;

/// Immutable proxy configuration. Built once in the binary and never
/// mutated afterwards; missing required secrets abort startup.
#[derive(Debug)]
pub struct ProxyConfig {
    /// Port the HTTP server listens on
    pub port: u16,
    /// API key for the model backend
    pub gemini_api_key: SecretString,
    /// Model identifier sent to the backend
    pub gemini_model: String,
    /// Endpoint the evaluation payloads are posted to
    pub evaluator_url: String,
    /// Timeout for the model backend call, in seconds
    pub model_timeout_secs: u64,
    /// Timeout for the evaluator call, in seconds
    pub evaluator_timeout_secs: u64,
}

impl ProxyConfig {
    /// Reads the configuration from environment variables.
    ///
    /// # Errors
    /// Returns `ProxyError::Config` when `GEMINI_API_KEY` or `EVALUATOR_URL`
    /// is absent, or when a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ProxyError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ProxyError> {
        let port = parse_or(get("PORT"), DEFAULT_PORT, "PORT")?;

        let gemini_api_key = require(get("GEMINI_API_KEY"), "GEMINI_API_KEY")?;
        let evaluator_url = require(get("EVALUATOR_URL"), "EVALUATOR_URL")?;

        let gemini_model = get("GEMINI_MODEL")
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let model_timeout_secs = parse_or(
            get("MODEL_TIMEOUT_SECS"),
            DEFAULT_MODEL_TIMEOUT_SECS,
            "MODEL_TIMEOUT_SECS",
        )?;
        let evaluator_timeout_secs = parse_or(
            get("EVALUATOR_TIMEOUT_SECS"),
            DEFAULT_EVALUATOR_TIMEOUT_SECS,
            "EVALUATOR_TIMEOUT_SECS",
        )?;

        Ok(Self {
            port,
            gemini_api_key: SecretString::new(gemini_api_key),
            gemini_model,
            evaluator_url,
            model_timeout_secs,
            evaluator_timeout_secs,
        })
    }
}

fn require(value: Option<String>, name: &str) -> Result<String, ProxyError> {
    value
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ProxyError::Config(format!("{name} is not set in environment variables")))
}

fn parse_or<T: std::str::FromStr>(
    value: Option<String>,
    default: T,
    name: &str,
) -> Result<T, ProxyError> {
    match value.filter(|value| !value.is_empty()) {
        Some(raw) => raw
            .parse()
            .map_err(|_| ProxyError::Config(format!("{name} is not a valid number: {raw}"))),
        None => Ok(default),
    }
}
