use serde::Serialize;
use utoipa::ToSchema;

use crate::state::tracker::PlayerId;

#[derive(Clone, Debug)]
/// Dispatched payload carried across SSE channels.
pub struct ServerEvent {
    pub event: Option<String>,
    pub data: String,
}

impl ServerEvent {
    /// Build an event carrying a plain-text payload.
    pub fn new(event: Option<String>, data: String) -> Self {
        Self { event, data }
    }

    /// Convenience wrapper that serialises `payload` into the SSE data field.
    pub fn json<E, T>(event: E, payload: &T) -> serde_json::Result<Self>
    where
        E: Into<Option<String>>,
        T: Serialize,
    {
        Ok(Self {
            event: event.into(),
            data: serde_json::to_string(payload)?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a player stops being tracked.
pub struct PlayerRemovedEvent {
    pub player_id: PlayerId,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when tracking is cleared, optionally together with the clock.
pub struct TrackingResetEvent {
    /// True when the whole fixture was reset, clock included.
    pub new_fixture: bool,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast after the roster was replaced.
pub struct RosterUpdatedEvent {
    pub players: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_events_carry_name_and_payload() {
        let event = ServerEvent::json(
            Some("tracking.removed".to_string()),
            &PlayerRemovedEvent { player_id: 12 },
        )
        .unwrap();
        assert_eq!(event.event.as_deref(), Some("tracking.removed"));
        assert_eq!(event.data, r#"{"player_id":12}"#);
    }
}
