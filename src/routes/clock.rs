use axum::{
    Json, Router,
    extract::State,
    routing::{get, post, put},
};

use crate::{
    dto::{
        clock::{MatchClockSnapshot, SeekClockRequest},
        tracking::MatchSnapshot,
    },
    error::AppError,
    services::clock_service,
    state::SharedState,
};

/// Routes driving the match clock.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/match", get(get_match))
        .route("/match/start", post(start_clock))
        .route("/match/pause", post(pause_clock))
        .route("/match/reset", post(reset_match))
        .route("/match/clock", put(seek_clock))
}

/// Full view of the live match: clock, tracked players and advisories.
#[utoipa::path(
    get,
    path = "/match",
    tag = "match",
    responses((status = 200, description = "Live match snapshot", body = MatchSnapshot))
)]
pub async fn get_match(State(state): State<SharedState>) -> Json<MatchSnapshot> {
    Json(clock_service::match_snapshot(&state).await)
}

/// Start (or keep) the match clock running.
#[utoipa::path(
    post,
    path = "/match/start",
    tag = "match",
    responses((status = 200, description = "Clock running", body = MatchClockSnapshot))
)]
pub async fn start_clock(State(state): State<SharedState>) -> Json<MatchClockSnapshot> {
    Json(clock_service::start_clock(&state).await)
}

/// Pause the match clock.
#[utoipa::path(
    post,
    path = "/match/pause",
    tag = "match",
    responses((status = 200, description = "Clock paused", body = MatchClockSnapshot))
)]
pub async fn pause_clock(State(state): State<SharedState>) -> Json<MatchClockSnapshot> {
    Json(clock_service::pause_clock(&state).await)
}

/// Reset the clock and tracking for a new fixture.
#[utoipa::path(
    post,
    path = "/match/reset",
    tag = "match",
    responses((status = 200, description = "Match reset", body = MatchSnapshot))
)]
pub async fn reset_match(State(state): State<SharedState>) -> Json<MatchSnapshot> {
    Json(clock_service::reset_match(&state).await)
}

/// Correct the match time.
#[utoipa::path(
    put,
    path = "/match/clock",
    tag = "match",
    request_body = SeekClockRequest,
    responses(
        (status = 200, description = "Clock moved", body = MatchClockSnapshot),
        (status = 400, description = "Match time out of range")
    )
)]
pub async fn seek_clock(
    State(state): State<SharedState>,
    Json(payload): Json<SeekClockRequest>,
) -> Result<Json<MatchClockSnapshot>, AppError> {
    Ok(Json(clock_service::seek_clock(&state, payload).await?))
}
