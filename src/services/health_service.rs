use crate::{dto::health::HealthResponse, state::SharedState};

/// Report liveness together with the tick source and SSE fan-out status.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    HealthResponse::ok(
        state.broadcaster().is_running(),
        state.public_sse().receiver_count(),
    )
}
