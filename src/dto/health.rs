use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status, always "ok" while the process serves requests.
    pub status: String,
    /// Whether the shared tick broadcaster is currently running.
    pub ticking: bool,
    /// Number of connected SSE clients.
    pub sse_clients: usize,
}

impl HealthResponse {
    /// Create a health response indicating the system is operational.
    pub fn ok(ticking: bool, sse_clients: usize) -> Self {
        Self {
            status: "ok".to_string(),
            ticking,
            sse_clients,
        }
    }
}
