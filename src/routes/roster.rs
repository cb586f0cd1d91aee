use axum::{Json, Router, extract::State, routing::get};
use validator::Validate;

use crate::{
    dto::roster::{ReplaceRosterRequest, RosterEntrySummary},
    error::AppError,
    services::roster_service,
    state::SharedState,
};

/// Routes managing the roster used for role lookups.
pub fn router() -> Router<SharedState> {
    Router::new().route("/roster", get(list_roster).put(replace_roster))
}

/// List league members known to the tracker.
#[utoipa::path(
    get,
    path = "/roster",
    tag = "roster",
    responses((status = 200, description = "Roster", body = [RosterEntrySummary]))
)]
pub async fn list_roster(State(state): State<SharedState>) -> Json<Vec<RosterEntrySummary>> {
    Json(roster_service::list_roster(&state).await)
}

/// Replace the roster with the members supplied by the league backend.
#[utoipa::path(
    put,
    path = "/roster",
    tag = "roster",
    request_body = ReplaceRosterRequest,
    responses(
        (status = 200, description = "Roster replaced", body = [RosterEntrySummary]),
        (status = 400, description = "Invalid roster")
    )
)]
pub async fn replace_roster(
    State(state): State<SharedState>,
    Json(payload): Json<ReplaceRosterRequest>,
) -> Result<Json<Vec<RosterEntrySummary>>, AppError> {
    payload.validate()?;
    Ok(Json(roster_service::replace_roster(&state, payload).await?))
}
