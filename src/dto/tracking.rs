use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::{
    dto::{clock::MatchClockSnapshot, format_system_time, validation::validate_label},
    state::{
        MatchSession,
        clock::MatchTiming,
        notifications::{PlayerValidation, RoleBasedNotification},
        roles::Role,
        status::{TimeStatus, time_status},
        tracker::{PlayerCandidate, PlayerId, TrackedPlayer},
        validation::PlaytimeValidation,
    },
};

/// Player to put on the pitch.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PlayerInput {
    pub id: PlayerId,
    pub name: String,
    pub team: String,
}

impl Validate for PlayerInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_label(&self.name) {
            errors.add("name", e);
        }
        if let Err(e) = validate_label(&self.team) {
            errors.add("team", e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl From<PlayerInput> for PlayerCandidate {
    fn from(value: PlayerInput) -> Self {
        Self {
            id: value.id,
            name: value.name.trim().to_string(),
            team: value.team.trim().to_string(),
        }
    }
}

/// Players to start tracking at the current match time.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct AddPlayersRequest {
    #[validate(nested)]
    pub players: Vec<PlayerInput>,
}

/// Outcome of an add request: new entries and ids that were already tracked.
#[derive(Debug, Serialize, ToSchema)]
pub struct AddPlayersResponse {
    pub added: Vec<TrackedPlayerSummary>,
    pub already_tracked: Vec<PlayerId>,
}

/// Tracked player enriched with role, half split and live status.
#[derive(Debug, Serialize, ToSchema, Clone, PartialEq, Eq)]
pub struct TrackedPlayerSummary {
    pub id: PlayerId,
    pub name: String,
    pub team: String,
    pub role: Role,
    /// Seconds accumulated on the pitch.
    pub total_time: u32,
    pub is_playing: bool,
    /// Match time of the last resume, absent while benched.
    pub start_time: Option<u32>,
    pub first_half: u32,
    pub second_half: u32,
    pub status: TimeStatus,
    /// True when the player was benched because of a role limit.
    pub role_stopped: bool,
}

impl TrackedPlayerSummary {
    pub fn from_session(player: &TrackedPlayer, session: &MatchSession, timing: &MatchTiming) -> Self {
        let role = session.roster.role_of(player.id);
        let halves = session.tracker.half_times_of(player.id);
        let match_time = session.clock.match_time();
        Self {
            id: player.id,
            name: player.name.clone(),
            team: player.team.clone(),
            role,
            total_time: player.total_time,
            is_playing: player.is_playing(),
            start_time: player.start_time(),
            first_half: halves.first_half,
            second_half: halves.second_half,
            status: time_status(player, role, match_time, &session.tracker, timing),
            role_stopped: session.tracker.was_role_stopped(player.id),
        }
    }
}

/// Per-player validation report entry.
#[derive(Debug, Serialize, ToSchema, Clone, PartialEq, Eq)]
pub struct PlayerValidationSummary {
    pub player_id: PlayerId,
    pub name: String,
    pub team: String,
    pub role: Role,
    pub total_time: u32,
    pub first_half: u32,
    pub second_half: u32,
    pub was_auto_stopped: bool,
    pub validation: PlaytimeValidation,
}

impl PlayerValidationSummary {
    pub fn new(entry: PlayerValidation, session: &MatchSession) -> Self {
        let halves = session.tracker.half_times_of(entry.player.id);
        Self {
            player_id: entry.player.id,
            name: entry.player.name,
            team: entry.player.team,
            role: entry.role,
            total_time: entry.player.total_time,
            first_half: halves.first_half,
            second_half: halves.second_half,
            was_auto_stopped: entry.was_auto_stopped,
            validation: entry.validation,
        }
    }
}

/// Complete view of the live match pushed to frontends.
#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct MatchSnapshot {
    pub clock: MatchClockSnapshot,
    pub players: Vec<TrackedPlayerSummary>,
    pub notifications: Vec<RoleBasedNotification>,
    /// RFC 3339 timestamp of when the snapshot was built.
    pub generated_at: String,
}

impl MatchSnapshot {
    pub fn new(
        session: &MatchSession,
        timing: &MatchTiming,
        notifications: Vec<RoleBasedNotification>,
    ) -> Self {
        Self {
            clock: MatchClockSnapshot::new(&session.clock, timing),
            players: session
                .tracker
                .players()
                .map(|player| TrackedPlayerSummary::from_session(player, session, timing))
                .collect(),
            notifications,
            generated_at: format_system_time(SystemTime::now()),
        }
    }
}
