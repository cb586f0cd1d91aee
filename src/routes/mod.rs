use axum::Router;

use crate::state::SharedState;

pub mod clock;
pub mod docs;
pub mod health;
pub mod roster;
pub mod sse;
pub mod tracking;

/// Compose all route trees and bind the shared state.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(sse::router())
        .merge(clock::router())
        .merge(roster::router())
        .merge(tracking::router())
        .merge(docs::router());

    api_router.with_state(state)
}
