use serde::Serialize;
use tracing::warn;

use crate::{
    dto::{
        clock::MatchClockSnapshot,
        sse::{PlayerRemovedEvent, RosterUpdatedEvent, ServerEvent, TrackingResetEvent},
        tracking::MatchSnapshot,
    },
    state::{SharedState, tracker::PlayerId},
};

const EVENT_MATCH_TICK: &str = "match.tick";
const EVENT_MATCH_CLOCK: &str = "match.clock";
const EVENT_TRACKING_UPDATED: &str = "tracking.updated";
const EVENT_TRACKING_REMOVED: &str = "tracking.removed";
const EVENT_TRACKING_RESET: &str = "tracking.reset";
const EVENT_ROSTER_UPDATED: &str = "roster.updated";

/// Broadcast the match state after a tick was accounted.
pub fn broadcast_match_tick(state: &SharedState, snapshot: &MatchSnapshot) {
    send_public_event(state, EVENT_MATCH_TICK, snapshot);
}

/// Broadcast a clock start, pause or correction.
pub fn broadcast_clock_changed(state: &SharedState, clock: &MatchClockSnapshot) {
    send_public_event(state, EVENT_MATCH_CLOCK, clock);
}

/// Broadcast the match state after players were added, toggled or benched.
pub fn broadcast_tracking_updated(state: &SharedState, snapshot: &MatchSnapshot) {
    send_public_event(state, EVENT_TRACKING_UPDATED, snapshot);
}

/// Broadcast that a player is no longer tracked.
pub fn broadcast_player_removed(state: &SharedState, player_id: PlayerId) {
    send_public_event(state, EVENT_TRACKING_REMOVED, &PlayerRemovedEvent { player_id });
}

/// Broadcast that tracking was cleared.
pub fn broadcast_tracking_reset(state: &SharedState, new_fixture: bool) {
    send_public_event(state, EVENT_TRACKING_RESET, &TrackingResetEvent { new_fixture });
}

/// Broadcast that the roster was replaced.
pub fn broadcast_roster_updated(state: &SharedState, players: usize) {
    send_public_event(state, EVENT_ROSTER_UPDATED, &RosterUpdatedEvent { players });
}

fn send_public_event(state: &SharedState, event: &str, payload: &impl Serialize) {
    match ServerEvent::json(Some(event.to_string()), payload) {
        Ok(event) => state.public_sse().broadcast(event),
        Err(err) => warn!(event, error = %err, "failed to serialize public SSE payload"),
    }
}
