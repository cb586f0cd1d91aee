use serde::Serialize;
use utoipa::ToSchema;

use crate::state::{
    clock::MatchTiming,
    roles::{Role, role_constraints},
    tracker::{PlayerTracker, TrackedPlayer},
};

/// Playtime classification of a tracked player at a given match time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TimeStatus {
    /// Nothing to report.
    Normal,
    /// Approaching the per-half cap.
    Critical,
    /// Per-half cap reached.
    Exceeded,
    /// Match is ending and the minimum total has not been reached.
    Insufficient,
}

/// Classify `player` against the rules of `role`.
///
/// Per-half caps are checked before warnings. The starter minimum is only
/// evaluated inside the endgame window so mid-match substitutions do not
/// raise false alarms.
pub fn time_status(
    player: &TrackedPlayer,
    role: Role,
    match_time: u32,
    tracker: &PlayerTracker,
    timing: &MatchTiming,
) -> TimeStatus {
    let constraints = role_constraints(role);
    let current_half_time = tracker
        .half_times_of(player.id)
        .get(timing.half_of(match_time));

    match role {
        Role::SClass => {
            if constraints
                .max_per_half
                .is_some_and(|max| current_half_time >= max)
            {
                TimeStatus::Exceeded
            } else if constraints
                .warning_per_half
                .is_some_and(|warning| current_half_time >= warning)
            {
                TimeStatus::Critical
            } else {
                TimeStatus::Normal
            }
        }
        Role::Starter
            if timing.in_endgame(match_time) && player.total_time < constraints.min_total =>
        {
            TimeStatus::Insufficient
        }
        Role::Starter | Role::Captain => TimeStatus::Normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tracker::PlayerCandidate;

    fn tracker_with_player(id: i64, seconds: u32, start: u32) -> PlayerTracker {
        let timing = MatchTiming::default();
        let mut tracker = PlayerTracker::new();
        tracker.add_player(
            PlayerCandidate {
                id,
                name: "Sam".into(),
                team: "Blue".into(),
            },
            start,
        );
        for match_time in start..start + seconds {
            tracker.tick(match_time, &timing);
        }
        tracker
    }

    #[test]
    fn s_class_over_warning_is_critical() {
        let timing = MatchTiming::default();
        let tracker = tracker_with_player(1, 1000, 0);
        let player = tracker.get(1).unwrap();
        assert_eq!(
            time_status(player, Role::SClass, 1000, &tracker, &timing),
            TimeStatus::Critical
        );
    }

    #[test]
    fn s_class_at_cap_is_exceeded() {
        let timing = MatchTiming::default();
        let tracker = tracker_with_player(1, 1200, 0);
        let player = tracker.get(1).unwrap();
        assert_eq!(
            time_status(player, Role::SClass, 1200, &tracker, &timing),
            TimeStatus::Exceeded
        );
    }

    #[test]
    fn s_class_cap_is_per_half() {
        let timing = MatchTiming::default();
        let tracker = tracker_with_player(1, 1200, 0);
        let player = tracker.get(1).unwrap();
        assert_eq!(
            time_status(player, Role::SClass, 1600, &tracker, &timing),
            TimeStatus::Normal
        );
    }

    #[test]
    fn starter_minimum_only_checked_in_endgame() {
        let timing = MatchTiming::default();
        let tracker = tracker_with_player(3, 500, 0);
        let player = tracker.get(3).unwrap();
        assert_eq!(player.total_time, 500);

        assert_eq!(
            time_status(player, Role::Starter, 2700, &tracker, &timing),
            TimeStatus::Insufficient
        );
        assert_eq!(
            time_status(player, Role::Starter, 2000, &tracker, &timing),
            TimeStatus::Normal
        );
    }

    #[test]
    fn starter_with_enough_time_is_normal() {
        let timing = MatchTiming::default();
        let tracker = tracker_with_player(3, 600, 0);
        let player = tracker.get(3).unwrap();
        assert_eq!(
            time_status(player, Role::Starter, 2900, &tracker, &timing),
            TimeStatus::Normal
        );
    }

    #[test]
    fn captain_is_always_normal() {
        let timing = MatchTiming::default();
        let tracker = tracker_with_player(2, 1400, 0);
        let player = tracker.get(2).unwrap();
        assert_eq!(
            time_status(player, Role::Captain, 1400, &tracker, &timing),
            TimeStatus::Normal
        );
        assert_eq!(
            time_status(player, Role::Captain, 2990, &tracker, &timing),
            TimeStatus::Normal
        );
    }

    #[test]
    fn missing_half_times_default_to_zero() {
        let timing = MatchTiming::default();
        let tracker = tracker_with_player(2, 0, 0);
        let other = PlayerTracker::new();
        let player = tracker.get(2).unwrap();
        assert_eq!(
            time_status(player, Role::SClass, 100, &other, &timing),
            TimeStatus::Normal
        );
    }
}
