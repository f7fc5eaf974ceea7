use serde::Serialize;

/// Error payload returned by every failing endpoint
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Fixed, client-safe description of the failure
    pub error: String,
}

/// Response payload for the liveness endpoint
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    /// Always "ok" while the process is serving
    pub status: &'static str,
    /// Name of this service
    pub service: &'static str,
}
