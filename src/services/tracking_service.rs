use tracing::info;

use crate::{
    dto::tracking::{
        AddPlayersRequest, AddPlayersResponse, MatchSnapshot, PlayerValidationSummary,
        TrackedPlayerSummary,
    },
    error::ServiceError,
    services::sse_events,
    state::{
        MatchSession, SharedState,
        clock::MatchTiming,
        notifications::{
            RoleBasedNotification, generate_role_based_notifications, validate_all_players,
        },
        tracker::{AddOutcome, PlayerCandidate, PlayerId},
    },
};

/// Build the full public view of a session, notifications included.
pub fn build_snapshot(session: &MatchSession, timing: &MatchTiming) -> MatchSnapshot {
    let notifications = generate_role_based_notifications(
        &session.tracker,
        &session.roster,
        session.clock.match_time(),
        timing,
    );
    MatchSnapshot::new(session, timing, notifications)
}

/// Put players on the pitch at the current match time.
///
/// Players that are already tracked are reported back untouched.
pub async fn add_players(
    state: &SharedState,
    request: AddPlayersRequest,
) -> Result<AddPlayersResponse, ServiceError> {
    if request.players.is_empty() {
        return Err(ServiceError::InvalidInput(
            "at least one player is required".into(),
        ));
    }

    let timing = *state.timing();
    let (response, snapshot) = state
        .write_session(|session| {
            let match_time = session.clock.match_time();
            let mut added_ids = Vec::new();
            let mut already_tracked = Vec::new();

            for input in request.players {
                match session
                    .tracker
                    .add_player(PlayerCandidate::from(input), match_time)
                {
                    AddOutcome::Added(player) => added_ids.push(player.id),
                    AddOutcome::AlreadyTracked(player) => already_tracked.push(player.id),
                }
            }

            let added = added_ids
                .iter()
                .filter_map(|id| session.tracker.get(*id))
                .map(|player| TrackedPlayerSummary::from_session(player, session, &timing))
                .collect();

            (
                AddPlayersResponse {
                    added,
                    already_tracked,
                },
                build_snapshot(session, &timing),
            )
        })
        .await;

    if !response.added.is_empty() {
        sse_events::broadcast_tracking_updated(state, &snapshot);
    }
    Ok(response)
}

/// Stop tracking a player.
pub async fn remove_player(
    state: &SharedState,
    id: PlayerId,
) -> Result<TrackedPlayerSummary, ServiceError> {
    let timing = *state.timing();
    let removed = state
        .write_session(|session| {
            let summary = session
                .tracker
                .get(id)
                .map(|player| TrackedPlayerSummary::from_session(player, session, &timing))?;
            session.tracker.remove_player(id)?;
            Some(summary)
        })
        .await
        .ok_or_else(|| not_tracked(id))?;

    sse_events::broadcast_player_removed(state, id);
    Ok(removed)
}

/// Flip a player between pitch and bench at the current match time.
pub async fn toggle_player(
    state: &SharedState,
    id: PlayerId,
) -> Result<TrackedPlayerSummary, ServiceError> {
    let timing = *state.timing();
    let (summary, snapshot) = state
        .write_session(|session| {
            let match_time = session.clock.match_time();
            session.tracker.toggle_player_time(id, match_time)?;
            let player = session.tracker.get(id)?;
            Some((
                TrackedPlayerSummary::from_session(player, session, &timing),
                build_snapshot(session, &timing),
            ))
        })
        .await
        .ok_or_else(|| not_tracked(id))?;

    sse_events::broadcast_tracking_updated(state, &snapshot);
    Ok(summary)
}

/// Bench a player because a role limit was reached.
pub async fn role_stop_player(
    state: &SharedState,
    id: PlayerId,
) -> Result<TrackedPlayerSummary, ServiceError> {
    let timing = *state.timing();
    let (summary, snapshot) = state
        .write_session(|session| {
            let match_time = session.clock.match_time();
            match session.tracker.get(id) {
                None => return Err(not_tracked(id)),
                Some(player) if !player.is_playing() => {
                    return Err(ServiceError::InvalidState(format!(
                        "player `{id}` is already on the bench"
                    )));
                }
                Some(_) => {}
            }
            session.tracker.bench_for_role_limit(id, match_time);
            let player = session.tracker.get(id).ok_or_else(|| not_tracked(id))?;
            Ok((
                TrackedPlayerSummary::from_session(player, session, &timing),
                build_snapshot(session, &timing),
            ))
        })
        .await?;

    sse_events::broadcast_tracking_updated(state, &snapshot);
    Ok(summary)
}

/// Forget every tracked player while keeping the clock.
pub async fn reset_tracking(state: &SharedState) {
    state
        .write_session(|session| session.tracker.reset_tracking())
        .await;
    info!("player tracking reset");
    sse_events::broadcast_tracking_reset(state, false);
}

/// Tracked players with their live status.
pub async fn list_players(state: &SharedState) -> Vec<TrackedPlayerSummary> {
    let timing = *state.timing();
    state
        .read_session(|session| {
            session
                .tracker
                .players()
                .map(|player| TrackedPlayerSummary::from_session(player, session, &timing))
                .collect()
        })
        .await
}

/// Current role-based advisories.
pub async fn notifications(state: &SharedState) -> Vec<RoleBasedNotification> {
    let timing = *state.timing();
    state
        .read_session(|session| {
            generate_role_based_notifications(
                &session.tracker,
                &session.roster,
                session.clock.match_time(),
                &timing,
            )
        })
        .await
}

/// Validate every tracked player against its role rules.
pub async fn validation_report(state: &SharedState) -> Vec<PlayerValidationSummary> {
    state
        .read_session(|session| {
            validate_all_players(&session.tracker, &session.roster)
                .into_iter()
                .map(|entry| PlayerValidationSummary::new(entry, session))
                .collect()
        })
        .await
}

fn not_tracked(id: PlayerId) -> ServiceError {
    ServiceError::NotFound(format!("player `{id}` is not tracked"))
}
