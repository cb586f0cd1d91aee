use serde::Serialize;
use utoipa::ToSchema;

use crate::state::{
    clock::MatchTiming,
    roles::{Role, role_constraints},
    roster::Roster,
    status::{TimeStatus, time_status},
    tracker::{PlayerId, PlayerTracker, TrackedPlayer},
    validation::{PlaytimeValidation, format_minutes, validate_playtime},
};

/// Kind of advisory raised for a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// The player was benched because of a role limit.
    AutoStopped,
    /// The player is close to the per-half cap.
    Warning,
    /// The match is ending and the player lacks minimum playtime.
    MinimumNeeded,
}

/// Advisory about a single tracked player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RoleBasedNotification {
    pub player_id: PlayerId,
    pub player_name: String,
    pub team: String,
    pub role: Role,
    pub kind: NotificationKind,
    pub message: String,
}

/// Validation bundle for one tracked player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerValidation {
    pub player: TrackedPlayer,
    pub role: Role,
    pub was_auto_stopped: bool,
    pub validation: PlaytimeValidation,
}

/// Derive at most one advisory per tracked player.
///
/// Priority: auto-stop marker, then warning, then missing minimum.
pub fn generate_role_based_notifications(
    tracker: &PlayerTracker,
    roster: &Roster,
    match_time: u32,
    timing: &MatchTiming,
) -> Vec<RoleBasedNotification> {
    tracker
        .players()
        .filter_map(|player| {
            let role = roster.role_of(player.id);
            let status = time_status(player, role, match_time, tracker, timing);
            let (kind, message) = if tracker.was_role_stopped(player.id) {
                (
                    NotificationKind::AutoStopped,
                    format!("{} was benched after reaching the {role} limit", player.name),
                )
            } else if status == TimeStatus::Critical {
                let constraints = role_constraints(role);
                let played = tracker
                    .half_times_of(player.id)
                    .get(timing.half_of(match_time));
                let left = constraints
                    .max_per_half
                    .map(|max| max.saturating_sub(played))
                    .unwrap_or_default();
                (
                    NotificationKind::Warning,
                    format!(
                        "{} has {} left this half",
                        player.name,
                        format_minutes(left)
                    ),
                )
            } else if status == TimeStatus::Insufficient {
                let needed = role_constraints(role)
                    .min_total
                    .saturating_sub(player.total_time);
                (
                    NotificationKind::MinimumNeeded,
                    format!(
                        "{} needs {} more to reach the minimum",
                        player.name,
                        format_minutes(needed)
                    ),
                )
            } else {
                return None;
            };

            Some(RoleBasedNotification {
                player_id: player.id,
                player_name: player.name.clone(),
                team: player.team.clone(),
                role,
                kind,
                message,
            })
        })
        .collect()
}

/// Validate every tracked player against its role rules.
pub fn validate_all_players(tracker: &PlayerTracker, roster: &Roster) -> Vec<PlayerValidation> {
    tracker
        .players()
        .map(|player| {
            let role = roster.role_of(player.id);
            let halves = tracker.half_times_of(player.id);
            PlayerValidation {
                player: player.clone(),
                role,
                was_auto_stopped: tracker.was_role_stopped(player.id),
                validation: validate_playtime(
                    player.total_time,
                    halves.first_half,
                    halves.second_half,
                    role,
                ),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{roster::RosterEntry, tracker::PlayerCandidate};

    fn roster(entries: &[(PlayerId, Role)]) -> Roster {
        let mut roster = Roster::default();
        roster.replace(entries.iter().map(|(id, role)| RosterEntry {
            id: *id,
            name: format!("P{id}"),
            team: "Red".into(),
            role: *role,
        }));
        roster
    }

    fn play(tracker: &mut PlayerTracker, ids: &[PlayerId], from: u32, to: u32) {
        let timing = MatchTiming::default();
        tracker.add_multiple_players(
            ids.iter().map(|id| PlayerCandidate {
                id: *id,
                name: format!("P{id}"),
                team: "Red".into(),
            }),
            from,
        );
        for match_time in from..to {
            tracker.tick(match_time, &timing);
        }
    }

    #[test]
    fn warning_for_s_class_near_cap() {
        let timing = MatchTiming::default();
        let mut tracker = PlayerTracker::new();
        play(&mut tracker, &[1, 2], 0, 1000);
        let roster = roster(&[(1, Role::SClass), (2, Role::Captain)]);

        let notifications = generate_role_based_notifications(&tracker, &roster, 1000, &timing);
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].player_id, 1);
        assert_eq!(notifications[0].kind, NotificationKind::Warning);
        assert!(notifications[0].message.contains("3:20"));
    }

    #[test]
    fn exceeded_without_stop_marker_is_silent() {
        let timing = MatchTiming::default();
        let mut tracker = PlayerTracker::new();
        play(&mut tracker, &[1], 0, 1250);
        let roster = roster(&[(1, Role::SClass)]);

        assert!(generate_role_based_notifications(&tracker, &roster, 1250, &timing).is_empty());
    }

    #[test]
    fn auto_stop_takes_priority() {
        let timing = MatchTiming::default();
        let mut tracker = PlayerTracker::new();
        play(&mut tracker, &[1], 0, 1000);
        tracker.bench_for_role_limit(1, 1000);
        let roster = roster(&[(1, Role::SClass)]);

        let notifications = generate_role_based_notifications(&tracker, &roster, 1000, &timing);
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, NotificationKind::AutoStopped);
    }

    #[test]
    fn unknown_roster_member_is_treated_as_starter() {
        let timing = MatchTiming::default();
        let mut tracker = PlayerTracker::new();
        play(&mut tracker, &[8], 2500, 2700);

        let notifications =
            generate_role_based_notifications(&tracker, &Roster::default(), 2700, &timing);
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].role, Role::Starter);
        assert_eq!(notifications[0].kind, NotificationKind::MinimumNeeded);
        assert!(notifications[0].message.contains("6:40"));

        assert!(
            generate_role_based_notifications(&tracker, &Roster::default(), 2000, &timing)
                .is_empty()
        );
    }

    #[test]
    fn validate_all_bundles_role_and_marker() {
        let mut tracker = PlayerTracker::new();
        play(&mut tracker, &[1, 2], 0, 300);
        tracker.bench_for_role_limit(2, 300);
        let roster = roster(&[(1, Role::Captain), (2, Role::Starter)]);

        let report = validate_all_players(&tracker, &roster);
        assert_eq!(report.len(), 2);

        assert_eq!(report[0].role, Role::Captain);
        assert!(report[0].validation.valid);
        assert!(!report[0].was_auto_stopped);

        assert_eq!(report[1].role, Role::Starter);
        assert!(!report[1].validation.valid);
        assert!(report[1].was_auto_stopped);
        assert_eq!(report[1].player.total_time, 300);
    }
}
