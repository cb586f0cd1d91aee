use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use validator::Validate;

use crate::{
    dto::tracking::{
        AddPlayersRequest, AddPlayersResponse, PlayerValidationSummary, TrackedPlayerSummary,
    },
    error::AppError,
    services::tracking_service,
    state::{SharedState, notifications::RoleBasedNotification, tracker::PlayerId},
};

/// Routes handling player playtime tracking.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route(
            "/tracking/players",
            get(list_players).post(add_players).delete(reset_tracking),
        )
        .route("/tracking/players/{id}", delete(remove_player))
        .route("/tracking/players/{id}/toggle", post(toggle_player))
        .route("/tracking/players/{id}/role-stop", post(role_stop_player))
        .route("/tracking/notifications", get(list_notifications))
        .route("/tracking/validation", get(validation_report))
}

/// Tracked players with their live status.
#[utoipa::path(
    get,
    path = "/tracking/players",
    tag = "tracking",
    responses((status = 200, description = "Tracked players", body = [TrackedPlayerSummary]))
)]
pub async fn list_players(State(state): State<SharedState>) -> Json<Vec<TrackedPlayerSummary>> {
    Json(tracking_service::list_players(&state).await)
}

/// Put players on the pitch at the current match time.
#[utoipa::path(
    post,
    path = "/tracking/players",
    tag = "tracking",
    request_body = AddPlayersRequest,
    responses(
        (status = 200, description = "Players added", body = AddPlayersResponse),
        (status = 400, description = "Invalid player payload")
    )
)]
pub async fn add_players(
    State(state): State<SharedState>,
    Json(payload): Json<AddPlayersRequest>,
) -> Result<Json<AddPlayersResponse>, AppError> {
    payload.validate()?;
    Ok(Json(tracking_service::add_players(&state, payload).await?))
}

/// Stop tracking every player.
#[utoipa::path(
    delete,
    path = "/tracking/players",
    tag = "tracking",
    responses((status = 204, description = "Tracking cleared"))
)]
pub async fn reset_tracking(State(state): State<SharedState>) -> StatusCode {
    tracking_service::reset_tracking(&state).await;
    StatusCode::NO_CONTENT
}

/// Stop tracking a player.
#[utoipa::path(
    delete,
    path = "/tracking/players/{id}",
    tag = "tracking",
    params(("id" = i64, Path, description = "Identifier of the tracked player")),
    responses(
        (status = 200, description = "Player removed", body = TrackedPlayerSummary),
        (status = 404, description = "Player not tracked")
    )
)]
pub async fn remove_player(
    State(state): State<SharedState>,
    Path(id): Path<PlayerId>,
) -> Result<Json<TrackedPlayerSummary>, AppError> {
    Ok(Json(tracking_service::remove_player(&state, id).await?))
}

/// Move a player between pitch and bench.
#[utoipa::path(
    post,
    path = "/tracking/players/{id}/toggle",
    tag = "tracking",
    params(("id" = i64, Path, description = "Identifier of the tracked player")),
    responses(
        (status = 200, description = "Player toggled", body = TrackedPlayerSummary),
        (status = 404, description = "Player not tracked")
    )
)]
pub async fn toggle_player(
    State(state): State<SharedState>,
    Path(id): Path<PlayerId>,
) -> Result<Json<TrackedPlayerSummary>, AppError> {
    Ok(Json(tracking_service::toggle_player(&state, id).await?))
}

/// Bench a player because a role limit was reached.
#[utoipa::path(
    post,
    path = "/tracking/players/{id}/role-stop",
    tag = "tracking",
    params(("id" = i64, Path, description = "Identifier of the tracked player")),
    responses(
        (status = 200, description = "Player benched", body = TrackedPlayerSummary),
        (status = 404, description = "Player not tracked"),
        (status = 409, description = "Player already on the bench")
    )
)]
pub async fn role_stop_player(
    State(state): State<SharedState>,
    Path(id): Path<PlayerId>,
) -> Result<Json<TrackedPlayerSummary>, AppError> {
    Ok(Json(tracking_service::role_stop_player(&state, id).await?))
}

/// Current role-based advisories.
#[utoipa::path(
    get,
    path = "/tracking/notifications",
    tag = "tracking",
    responses((status = 200, description = "Advisories", body = [RoleBasedNotification]))
)]
pub async fn list_notifications(
    State(state): State<SharedState>,
) -> Json<Vec<RoleBasedNotification>> {
    Json(tracking_service::notifications(&state).await)
}

/// Validation of every tracked player against its role rules.
#[utoipa::path(
    get,
    path = "/tracking/validation",
    tag = "tracking",
    responses((status = 200, description = "Validation report", body = [PlayerValidationSummary]))
)]
pub async fn validation_report(
    State(state): State<SharedState>,
) -> Json<Vec<PlayerValidationSummary>> {
    Json(tracking_service::validation_report(&state).await)
}
