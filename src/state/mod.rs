pub mod broadcaster;
pub mod clock;
pub mod notifications;
pub mod roles;
pub mod roster;
pub mod session;
mod sse;
pub mod status;
pub mod tracker;
pub mod validation;

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::config::AppConfig;

pub use self::broadcaster::{Subscription, Tick, TickBroadcaster};
pub use self::session::MatchSession;
pub use self::sse::SseHub;
use self::clock::MatchTiming;

pub type SharedState = Arc<AppState>;

/// Central application state: live match session, tick source and SSE hub.
pub struct AppState {
    config: AppConfig,
    session: RwLock<MatchSession>,
    broadcaster: TickBroadcaster,
    clock_subscription: Mutex<Option<Subscription>>,
    sse: SseHub,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The match clock starts stopped at kickoff with nobody tracked.
    pub fn new(config: AppConfig) -> SharedState {
        Arc::new(Self {
            broadcaster: TickBroadcaster::new(config.tick_interval),
            sse: SseHub::new(config.sse_capacity),
            session: RwLock::new(MatchSession::default()),
            clock_subscription: Mutex::new(None),
            config,
        })
    }

    /// Immutable runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Match time boundaries in effect.
    pub fn timing(&self) -> &MatchTiming {
        &self.config.timing
    }

    /// Live match session guarded by a single lock.
    pub fn session(&self) -> &RwLock<MatchSession> {
        &self.session
    }

    /// Run `f` against a read-locked view of the session.
    pub async fn read_session<R>(&self, f: impl FnOnce(&MatchSession) -> R) -> R {
        let guard = self.session.read().await;
        f(&guard)
    }

    /// Run `f` against the write-locked session.
    pub async fn write_session<R>(&self, f: impl FnOnce(&mut MatchSession) -> R) -> R {
        let mut guard = self.session.write().await;
        f(&mut guard)
    }

    /// Shared tick source.
    pub fn broadcaster(&self) -> &TickBroadcaster {
        &self.broadcaster
    }

    /// Slot holding the match clock's tick subscription while the clock runs.
    pub fn clock_subscription(&self) -> &Mutex<Option<Subscription>> {
        &self.clock_subscription
    }

    /// Broadcast hub used for the public SSE stream.
    pub fn public_sse(&self) -> &SseHub {
        &self.sse
    }
}
