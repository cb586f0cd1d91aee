use std::sync::Arc;

use futures::FutureExt;
use tracing::{debug, info, warn};

use crate::{
    dto::{
        clock::{MatchClockSnapshot, SeekClockRequest},
        tracking::MatchSnapshot,
    },
    error::ServiceError,
    services::{sse_events, tracking_service::build_snapshot},
    state::SharedState,
};

/// Subscriber id the match clock registers under on the tick broadcaster.
pub const CLOCK_SUBSCRIBER: &str = "match-clock";

/// Full public view of the live match.
pub async fn match_snapshot(state: &SharedState) -> MatchSnapshot {
    let timing = *state.timing();
    state
        .read_session(|session| build_snapshot(session, &timing))
        .await
}

/// Start the match clock and hook it to the shared tick source.
pub async fn start_clock(state: &SharedState) -> MatchClockSnapshot {
    let timing = *state.timing();
    let mut subscription = state.clock_subscription().lock().await;
    let (started, clock) = state
        .write_session(|session| {
            let started = session.clock.start();
            (started, MatchClockSnapshot::new(&session.clock, &timing))
        })
        .await;

    if subscription.is_none() {
        let weak = Arc::downgrade(state);
        *subscription = Some(state.broadcaster().subscribe(CLOCK_SUBSCRIBER, move |_tick| {
            let weak = weak.clone();
            async move {
                if let Some(state) = weak.upgrade() {
                    handle_tick(&state).await;
                }
                anyhow::Ok(())
            }
            .boxed()
        }));
    }
    drop(subscription);

    if started {
        info!(match_time = clock.match_time, "match clock started");
        sse_events::broadcast_clock_changed(state, &clock);
    }
    clock
}

/// Stop the match clock and release its tick subscription.
pub async fn pause_clock(state: &SharedState) -> MatchClockSnapshot {
    let timing = *state.timing();
    let mut subscription = state.clock_subscription().lock().await;
    let (paused, clock) = state
        .write_session(|session| {
            let paused = session.clock.pause();
            (paused, MatchClockSnapshot::new(&session.clock, &timing))
        })
        .await;
    subscription.take();
    drop(subscription);

    if paused {
        info!(match_time = clock.match_time, "match clock paused");
        sse_events::broadcast_clock_changed(state, &clock);
    }
    clock
}

/// Move the clock, keeping its running flag.
pub async fn seek_clock(
    state: &SharedState,
    request: SeekClockRequest,
) -> Result<MatchClockSnapshot, ServiceError> {
    let timing = *state.timing();
    if request.match_time > timing.latest_seekable() {
        return Err(ServiceError::InvalidInput(format!(
            "match time {} is beyond the latest allowed value {}",
            request.match_time,
            timing.latest_seekable()
        )));
    }

    let clock = state
        .write_session(|session| {
            session.clock.seek(request.match_time);
            MatchClockSnapshot::new(&session.clock, &timing)
        })
        .await;

    info!(match_time = clock.match_time, "match clock moved");
    sse_events::broadcast_clock_changed(state, &clock);
    Ok(clock)
}

/// Start a new fixture: stop the clock, rewind it and clear tracking.
pub async fn reset_match(state: &SharedState) -> MatchSnapshot {
    let timing = *state.timing();
    let mut subscription = state.clock_subscription().lock().await;
    let snapshot = state
        .write_session(|session| {
            session.reset();
            build_snapshot(session, &timing)
        })
        .await;
    subscription.take();
    drop(subscription);

    info!("match reset for a new fixture");
    sse_events::broadcast_tracking_reset(state, true);
    sse_events::broadcast_clock_changed(state, &snapshot.clock);
    snapshot
}

/// Account one broadcaster tick against the live session.
///
/// The session is read under the write lock on every call, so the handler
/// always sees the current running flag, players and match time.
pub async fn handle_tick(state: &SharedState) {
    let timing = *state.timing();
    let auto_bench = state.config().auto_bench_on_limit;
    let outcome = state
        .write_session(|session| {
            let report = session.on_tick(&timing, auto_bench)?;
            Some((report, build_snapshot(session, &timing)))
        })
        .await;

    let Some((report, snapshot)) = outcome else {
        debug!("tick ignored; match clock stopped");
        return;
    };

    for player_id in &report.benched {
        warn!(
            player_id,
            match_time = report.match_time,
            "player reached the s-class limit and was benched"
        );
    }
    sse_events::broadcast_match_tick(state, &snapshot);
}
