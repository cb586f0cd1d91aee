use serde::Serialize;
use utoipa::ToSchema;

/// Default match length for 7-a-side fixtures (two 25 minute halves).
pub const DEFAULT_MATCH_DURATION_SECS: u32 = 50 * 60;
/// Length of the closing window in which minimum playtime is enforced.
pub const DEFAULT_ENDGAME_WINDOW_SECS: u32 = 5 * 60;

/// Half of the match a given match time falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Half {
    /// From kickoff until the half-time boundary.
    First,
    /// From the half-time boundary onwards, including stoppage time.
    Second,
}

/// League-defined match time boundaries, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchTiming {
    /// Standard duration of a match.
    pub duration: u32,
    /// Match time at which the second half begins.
    pub half_length: u32,
    /// Window before the end of the match in which starters must reach their minimum.
    pub endgame_window: u32,
}

impl Default for MatchTiming {
    fn default() -> Self {
        Self {
            duration: DEFAULT_MATCH_DURATION_SECS,
            half_length: DEFAULT_MATCH_DURATION_SECS / 2,
            endgame_window: DEFAULT_ENDGAME_WINDOW_SECS,
        }
    }
}

impl MatchTiming {
    /// Whether `match_time` lies in the second half.
    pub fn is_second_half(&self, match_time: u32) -> bool {
        match_time >= self.half_length
    }

    /// Half containing `match_time`.
    pub fn half_of(&self, match_time: u32) -> Half {
        if self.is_second_half(match_time) {
            Half::Second
        } else {
            Half::First
        }
    }

    /// Seconds left of the standard duration, zero once it has elapsed.
    pub fn remaining(&self, match_time: u32) -> u32 {
        self.duration.saturating_sub(match_time)
    }

    /// Whether `match_time` lies in the closing window of the match.
    pub fn in_endgame(&self, match_time: u32) -> bool {
        self.remaining(match_time) <= self.endgame_window
    }

    /// Latest match time the clock may be moved to, allowing a half of stoppage time.
    pub fn latest_seekable(&self) -> u32 {
        self.duration.saturating_add(self.half_length)
    }
}

/// Live match clock driven by the tick broadcaster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchClock {
    match_time: u32,
    running: bool,
}

impl MatchClock {
    /// Seconds elapsed since kickoff.
    pub fn match_time(&self) -> u32 {
        self.match_time
    }

    /// Whether the clock is currently counting.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start counting. Returns `false` when the clock was already running.
    pub fn start(&mut self) -> bool {
        !std::mem::replace(&mut self.running, true)
    }

    /// Stop counting. Returns `false` when the clock was already stopped.
    pub fn pause(&mut self) -> bool {
        std::mem::replace(&mut self.running, false)
    }

    /// Move the clock to an arbitrary match time without changing the running flag.
    pub fn seek(&mut self, match_time: u32) {
        self.match_time = match_time;
    }

    /// Advance by one second if running.
    pub fn advance(&mut self) {
        if self.running {
            self.match_time = self.match_time.saturating_add(1);
        }
    }

    /// Back to kickoff, stopped.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timing_splits_match_in_two() {
        let timing = MatchTiming::default();
        assert_eq!(timing.duration, 3000);
        assert_eq!(timing.half_length, 1500);
        assert!(!timing.is_second_half(1499));
        assert!(timing.is_second_half(1500));
        assert_eq!(timing.half_of(0), Half::First);
        assert_eq!(timing.half_of(2999), Half::Second);
    }

    #[test]
    fn endgame_window_is_inclusive() {
        let timing = MatchTiming::default();
        assert!(!timing.in_endgame(2699));
        assert!(timing.in_endgame(2700));
        assert!(timing.in_endgame(3600));
        assert_eq!(timing.remaining(3600), 0);
    }

    #[test]
    fn clock_only_advances_while_running() {
        let mut clock = MatchClock::default();
        clock.advance();
        assert_eq!(clock.match_time(), 0);

        assert!(clock.start());
        assert!(!clock.start());
        clock.advance();
        clock.advance();
        assert_eq!(clock.match_time(), 2);

        assert!(clock.pause());
        assert!(!clock.pause());
        clock.advance();
        assert_eq!(clock.match_time(), 2);

        clock.seek(1500);
        assert_eq!(clock.match_time(), 1500);
        clock.reset();
        assert_eq!(clock, MatchClock::default());
    }
}
