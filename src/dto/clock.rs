use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::clock::{Half, MatchClock, MatchTiming};

/// Public view of the match clock.
#[derive(Debug, Serialize, ToSchema, Clone, PartialEq, Eq)]
pub struct MatchClockSnapshot {
    /// Seconds since kickoff.
    pub match_time: u32,
    pub running: bool,
    pub half: Half,
    /// Seconds left of the standard duration.
    pub remaining: u32,
    pub duration: u32,
}

impl MatchClockSnapshot {
    pub fn new(clock: &MatchClock, timing: &MatchTiming) -> Self {
        let match_time = clock.match_time();
        Self {
            match_time,
            running: clock.is_running(),
            half: timing.half_of(match_time),
            remaining: timing.remaining(match_time),
            duration: timing.duration,
        }
    }
}

/// Request to move the match clock, e.g. after a referee correction.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SeekClockRequest {
    pub match_time: u32,
}
