use crate::state::{
    clock::{MatchClock, MatchTiming},
    roles::{Role, role_constraints},
    roster::Roster,
    tracker::{PlayerId, PlayerTracker},
};

/// Everything the referee mutates during a live match, kept behind one lock.
#[derive(Debug, Clone, Default)]
pub struct MatchSession {
    pub clock: MatchClock,
    pub tracker: PlayerTracker,
    pub roster: Roster,
}

/// What a single tick changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Match time the tick was accounted at.
    pub match_time: u32,
    /// Players credited with one second.
    pub credited: usize,
    /// Players benched because they reached a role limit.
    pub benched: Vec<PlayerId>,
}

impl MatchSession {
    /// Account one broadcaster tick.
    ///
    /// Returns `None` while the clock is stopped. Otherwise every playing
    /// player is credited for the second starting at the current match time,
    /// then the clock moves forward.
    pub fn on_tick(&mut self, timing: &MatchTiming, auto_bench: bool) -> Option<TickReport> {
        if !self.clock.is_running() {
            return None;
        }

        let match_time = self.clock.match_time();
        let mut report = TickReport {
            match_time,
            ..TickReport::default()
        };

        if !self.tracker.is_empty() {
            report.credited = self.tracker.tick(match_time, timing);
            if auto_bench {
                report.benched = self.bench_capped_players(match_time, timing);
            }
        }

        self.clock.advance();
        Some(report)
    }

    /// Start a new fixture: clock back to kickoff, tracking cleared, roster kept.
    pub fn reset(&mut self) {
        self.clock.reset();
        self.tracker.reset_tracking();
    }

    fn bench_capped_players(&mut self, match_time: u32, timing: &MatchTiming) -> Vec<PlayerId> {
        let half = timing.half_of(match_time);
        let capped: Vec<PlayerId> = self
            .tracker
            .players()
            .filter(|player| player.is_playing())
            .filter(|player| {
                let role = self.roster.role_of(player.id);
                role == Role::SClass
                    && role_constraints(role).max_per_half.is_some_and(|max| {
                        self.tracker.half_times_of(player.id).get(half) >= max
                    })
            })
            .map(|player| player.id)
            .collect();

        for id in &capped {
            self.tracker.bench_for_role_limit(*id, match_time);
        }
        capped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{roster::RosterEntry, tracker::PlayerCandidate};

    fn session_with(ids: &[PlayerId]) -> MatchSession {
        let mut session = MatchSession::default();
        session.tracker.add_multiple_players(
            ids.iter().map(|id| PlayerCandidate {
                id: *id,
                name: format!("P{id}"),
                team: "Red".into(),
            }),
            0,
        );
        session
    }

    #[test]
    fn stopped_clock_changes_nothing() {
        let timing = MatchTiming::default();
        let mut session = session_with(&[1]);

        assert!(session.on_tick(&timing, false).is_none());
        assert_eq!(session.clock.match_time(), 0);
        assert_eq!(session.tracker.get(1).unwrap().total_time, 0);
    }

    #[test]
    fn empty_tracker_still_advances_clock() {
        let timing = MatchTiming::default();
        let mut session = MatchSession::default();
        session.clock.start();

        let report = session.on_tick(&timing, false).unwrap();
        assert_eq!(report.credited, 0);
        assert_eq!(session.clock.match_time(), 1);
    }

    #[test]
    fn ticks_keep_total_and_halves_in_step() {
        let timing = MatchTiming::default();
        let mut session = session_with(&[1, 2]);
        session.clock.seek(1490);
        session.clock.start();

        for _ in 0..20 {
            session.on_tick(&timing, false);
        }

        assert_eq!(session.clock.match_time(), 1510);
        for id in [1, 2] {
            let player = session.tracker.get(id).unwrap();
            let halves = session.tracker.half_times_of(id);
            assert_eq!(player.total_time, 20);
            assert_eq!(halves.first_half, 10);
            assert_eq!(halves.second_half, 10);
        }
    }

    #[test]
    fn reset_after_play_empties_tracking() {
        let timing = MatchTiming::default();
        let mut session = session_with(&[1, 2, 3]);
        session.clock.start();
        for _ in 0..10 {
            session.on_tick(&timing, false);
        }

        session.reset();
        assert!(session.tracker.is_empty());
        assert!(session.tracker.half_times().is_empty());
        assert_eq!(session.clock.match_time(), 0);
        assert!(!session.clock.is_running());
    }

    #[test]
    fn auto_bench_only_when_enabled() {
        let timing = MatchTiming::default();
        let mut session = session_with(&[1, 2]);
        session.roster.replace([RosterEntry {
            id: 1,
            name: "P1".into(),
            team: "Red".into(),
            role: Role::SClass,
        }]);
        session.clock.start();

        for _ in 0..1200 {
            session.on_tick(&timing, false);
        }
        assert!(session.tracker.get(1).unwrap().is_playing());

        let report = session.on_tick(&timing, true).unwrap();
        assert_eq!(report.benched, vec![1]);
        assert!(!session.tracker.get(1).unwrap().is_playing());
        assert!(session.tracker.was_role_stopped(1));
        assert!(session.tracker.get(2).unwrap().is_playing());

        let report = session.on_tick(&timing, true).unwrap();
        assert!(report.benched.is_empty());
    }
}
