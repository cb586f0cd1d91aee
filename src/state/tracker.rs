use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::state::clock::{Half, MatchTiming};

/// Stable identifier of a league member.
pub type PlayerId = i64;

/// Player data needed to start tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCandidate {
    /// League member identifier.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Team label the player is fielded for.
    pub team: String,
}

/// A player whose playing time is being tracked during the current match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedPlayer {
    /// League member identifier.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Team label.
    pub team: String,
    /// Seconds accumulated on the pitch.
    pub total_time: u32,
    /// Match time of the last resume; `None` while benched.
    start_time: Option<u32>,
}

impl TrackedPlayer {
    fn new(candidate: PlayerCandidate, match_time: u32) -> Self {
        Self {
            id: candidate.id,
            name: candidate.name,
            team: candidate.team,
            total_time: 0,
            start_time: Some(match_time),
        }
    }

    /// Whether the player is currently on the pitch.
    pub fn is_playing(&self) -> bool {
        self.start_time.is_some()
    }

    /// Match time of the last resume, if the player is on the pitch.
    pub fn start_time(&self) -> Option<u32> {
        self.start_time
    }
}

/// Playing time split by half, in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HalfTimes {
    /// Seconds played in the first half.
    pub first_half: u32,
    /// Seconds played in the second half.
    pub second_half: u32,
}

impl HalfTimes {
    /// Seconds played in the given half.
    pub fn get(&self, half: Half) -> u32 {
        match half {
            Half::First => self.first_half,
            Half::Second => self.second_half,
        }
    }

    fn credit(&mut self, half: Half) {
        match half {
            Half::First => self.first_half = self.first_half.saturating_add(1),
            Half::Second => self.second_half = self.second_half.saturating_add(1),
        }
    }

    /// Sum of both halves.
    pub fn total(&self) -> u32 {
        self.first_half.saturating_add(self.second_half)
    }
}

/// Result of an attempt to start tracking a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The player was not tracked yet and has been added.
    Added(TrackedPlayer),
    /// The player was already tracked; nothing changed.
    AlreadyTracked(TrackedPlayer),
}

impl AddOutcome {
    /// The tracked record, whether new or pre-existing.
    pub fn player(&self) -> &TrackedPlayer {
        match self {
            AddOutcome::Added(player) | AddOutcome::AlreadyTracked(player) => player,
        }
    }
}

/// Authoritative store of tracked players for the current match.
///
/// Half-time splits and role-stop markers live next to the players and are
/// always created and dropped together with them.
#[derive(Debug, Clone, Default)]
pub struct PlayerTracker {
    players: IndexMap<PlayerId, TrackedPlayer>,
    half_times: HashMap<PlayerId, HalfTimes>,
    role_stops: HashSet<PlayerId>,
}

impl PlayerTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a player who enters the pitch at `match_time`.
    pub fn add_player(&mut self, candidate: PlayerCandidate, match_time: u32) -> AddOutcome {
        if let Some(existing) = self.players.get(&candidate.id) {
            warn!(player_id = candidate.id, "player is already tracked");
            return AddOutcome::AlreadyTracked(existing.clone());
        }

        let id = candidate.id;
        let player = TrackedPlayer::new(candidate, match_time);
        self.players.insert(id, player.clone());
        self.half_times.insert(id, HalfTimes::default());
        self.role_stops.remove(&id);
        info!(player_id = id, match_time, "player added to tracking");
        AddOutcome::Added(player)
    }

    /// Add several players at once, returning only those that were newly added.
    pub fn add_multiple_players<I>(&mut self, candidates: I, match_time: u32) -> Vec<TrackedPlayer>
    where
        I: IntoIterator<Item = PlayerCandidate>,
    {
        candidates
            .into_iter()
            .filter_map(|candidate| match self.add_player(candidate, match_time) {
                AddOutcome::Added(player) => Some(player),
                AddOutcome::AlreadyTracked(_) => None,
            })
            .collect()
    }

    /// Stop tracking a player, dropping its half-time split and role-stop marker.
    pub fn remove_player(&mut self, id: PlayerId) -> Option<TrackedPlayer> {
        let removed = self.players.shift_remove(&id);
        self.half_times.remove(&id);
        self.role_stops.remove(&id);
        if removed.is_some() {
            info!(player_id = id, "player removed from tracking");
        }
        removed
    }

    /// Flip a player between pitch and bench.
    ///
    /// Resuming clears any role-stop marker: a manual resume overrides an
    /// earlier automatic stop.
    pub fn toggle_player_time(&mut self, id: PlayerId, match_time: u32) -> Option<TrackedPlayer> {
        let player = self.players.get_mut(&id)?;
        if player.start_time.take().is_none() {
            player.start_time = Some(match_time);
            self.role_stops.remove(&id);
            debug!(player_id = id, match_time, "player resumed");
        } else {
            debug!(player_id = id, match_time, "player paused");
        }
        Some(player.clone())
    }

    /// Bench a player because a role limit was reached and remember why.
    pub fn bench_for_role_limit(&mut self, id: PlayerId, match_time: u32) -> Option<TrackedPlayer> {
        let player = self.players.get_mut(&id)?;
        player.start_time = None;
        self.role_stops.insert(id);
        info!(player_id = id, match_time, "player benched for role limit");
        Some(player.clone())
    }

    /// Forget every tracked player.
    pub fn reset_tracking(&mut self) {
        self.players.clear();
        self.half_times.clear();
        self.role_stops.clear();
    }

    /// Credit one second to every player on the pitch.
    ///
    /// The total and the half counter are updated together so they never
    /// drift apart. Returns the number of players credited.
    pub fn tick(&mut self, match_time: u32, timing: &MatchTiming) -> usize {
        let half = timing.half_of(match_time);
        let mut credited = 0;
        for player in self.players.values_mut().filter(|p| p.is_playing()) {
            player.total_time = player.total_time.saturating_add(1);
            self.half_times.entry(player.id).or_default().credit(half);
            credited += 1;
        }
        credited
    }

    /// Look up a tracked player.
    pub fn get(&self, id: PlayerId) -> Option<&TrackedPlayer> {
        self.players.get(&id)
    }

    /// Tracked players in insertion order.
    pub fn players(&self) -> impl Iterator<Item = &TrackedPlayer> {
        self.players.values()
    }

    /// Half-time split of a player, `{0, 0}` when unknown.
    pub fn half_times_of(&self, id: PlayerId) -> HalfTimes {
        self.half_times.get(&id).copied().unwrap_or_default()
    }

    /// Half-time splits of every tracked player.
    pub fn half_times(&self) -> &HashMap<PlayerId, HalfTimes> {
        &self.half_times
    }

    /// Whether the player was benched because of a role limit.
    pub fn was_role_stopped(&self, id: PlayerId) -> bool {
        self.role_stops.contains(&id)
    }

    /// Number of tracked players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether nobody is tracked.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: PlayerId) -> PlayerCandidate {
        PlayerCandidate {
            id,
            name: format!("Player {id}"),
            team: "Red".into(),
        }
    }

    fn assert_playing_invariant(tracker: &PlayerTracker) {
        for player in tracker.players() {
            assert_eq!(player.is_playing(), player.start_time().is_some());
        }
    }

    #[test]
    fn add_player_starts_on_pitch() {
        let mut tracker = PlayerTracker::new();
        let outcome = tracker.add_player(candidate(7), 120);

        let AddOutcome::Added(player) = outcome else {
            panic!("expected a fresh addition");
        };
        assert_eq!(player.total_time, 0);
        assert!(player.is_playing());
        assert_eq!(player.start_time(), Some(120));
        assert_eq!(tracker.half_times_of(7), HalfTimes::default());
        assert!(!tracker.was_role_stopped(7));
    }

    #[test]
    fn duplicate_add_is_a_no_op() {
        let mut tracker = PlayerTracker::new();
        let first = tracker.add_player(candidate(7), 0);
        tracker.tick(0, &MatchTiming::default());

        let second = tracker.add_player(candidate(7), 500);
        assert_eq!(tracker.len(), 1);
        match second {
            AddOutcome::AlreadyTracked(existing) => {
                assert_eq!(existing.id, first.player().id);
                assert_eq!(existing.start_time(), Some(0));
                assert_eq!(existing.total_time, 1);
            }
            other => panic!("expected existing record, got {other:?}"),
        }

        let third = tracker.add_player(candidate(7), 900);
        assert_eq!(third.player().start_time(), Some(0));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn add_multiple_collects_only_new_players() {
        let mut tracker = PlayerTracker::new();
        tracker.add_player(candidate(2), 0);

        let added = tracker.add_multiple_players([candidate(1), candidate(2), candidate(3)], 60);
        let ids: Vec<_> = added.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(tracker.len(), 3);
    }

    #[test]
    fn remove_player_drops_associated_state() {
        let mut tracker = PlayerTracker::new();
        tracker.add_player(candidate(4), 0);
        tracker.bench_for_role_limit(4, 10);

        let removed = tracker.remove_player(4).expect("player was tracked");
        assert_eq!(removed.id, 4);
        assert!(tracker.get(4).is_none());
        assert!(!tracker.half_times().contains_key(&4));
        assert!(!tracker.was_role_stopped(4));
        assert!(tracker.remove_player(4).is_none());
    }

    #[test]
    fn toggle_twice_restores_playing_with_latest_start() {
        let mut tracker = PlayerTracker::new();
        tracker.add_player(candidate(9), 0);

        let paused = tracker.toggle_player_time(9, 100).unwrap();
        assert!(!paused.is_playing());
        assert_eq!(paused.start_time(), None);
        assert_playing_invariant(&tracker);

        let resumed = tracker.toggle_player_time(9, 250).unwrap();
        assert!(resumed.is_playing());
        assert_eq!(resumed.start_time(), Some(250));
        assert_playing_invariant(&tracker);

        assert!(tracker.toggle_player_time(99, 250).is_none());
    }

    #[test]
    fn manual_resume_clears_role_stop() {
        let mut tracker = PlayerTracker::new();
        tracker.add_player(candidate(5), 0);

        let benched = tracker.bench_for_role_limit(5, 1200).unwrap();
        assert!(!benched.is_playing());
        assert!(tracker.was_role_stopped(5));

        tracker.toggle_player_time(5, 1600);
        assert!(!tracker.was_role_stopped(5));
    }

    #[test]
    fn ticks_accumulate_total_and_half_split() {
        let timing = MatchTiming::default();
        let mut tracker = PlayerTracker::new();
        tracker.add_player(candidate(1), 1495);
        tracker.add_player(candidate(2), 1495);
        tracker.toggle_player_time(2, 1495);

        for match_time in 1495..1505 {
            tracker.tick(match_time, &timing);
        }

        let playing = tracker.get(1).unwrap();
        assert_eq!(playing.total_time, 10);
        let split = tracker.half_times_of(1);
        assert_eq!(split.first_half, 5);
        assert_eq!(split.second_half, 5);
        assert_eq!(split.total(), playing.total_time);

        let benched = tracker.get(2).unwrap();
        assert_eq!(benched.total_time, 0);
        assert_eq!(tracker.half_times_of(2).total(), 0);
    }

    #[test]
    fn reset_clears_everything() {
        let timing = MatchTiming::default();
        let mut tracker = PlayerTracker::new();
        tracker.add_multiple_players([candidate(1), candidate(2), candidate(3)], 0);
        for match_time in 0..10 {
            assert_eq!(tracker.tick(match_time, &timing), 3);
        }

        tracker.reset_tracking();
        assert!(tracker.is_empty());
        assert!(tracker.half_times().is_empty());
        assert_eq!(tracker.players().count(), 0);
    }
}
