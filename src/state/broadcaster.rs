//! Shared once-per-period tick source fanned out to registered subscribers.

use std::{
    panic::{self, AssertUnwindSafe},
    sync::{
        Arc, Mutex, Weak,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use dashmap::DashMap;
use futures::{FutureExt, future::BoxFuture};
use tokio::{
    runtime::Handle,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Event delivered to subscribers on every period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Monotonic counter, starting at zero for the first tick ever emitted.
    pub sequence: u64,
}

/// Callback invoked on every tick.
pub type TickCallback = Arc<dyn Fn(Tick) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

struct Registration {
    token: Uuid,
    callback: TickCallback,
}

struct Inner {
    period: Duration,
    subscribers: DashMap<String, Registration>,
    task: Mutex<Option<JoinHandle<()>>>,
    sequence: AtomicU64,
}

/// Single shared interval fanning ticks out to every subscriber.
///
/// The interval runs only while it has subscribers: the first subscription
/// starts it and dropping the last [`Subscription`] stops it.
#[derive(Clone)]
pub struct TickBroadcaster {
    inner: Arc<Inner>,
}

/// Registration handle; dropping it unsubscribes.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    id: String,
    token: Uuid,
    inner: Weak<Inner>,
}

impl TickBroadcaster {
    /// Create a stopped broadcaster ticking every `period`.
    pub fn new(period: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                period,
                subscribers: DashMap::new(),
                task: Mutex::new(None),
                sequence: AtomicU64::new(0),
            }),
        }
    }

    /// Register `callback` under `id`, starting the interval if needed.
    ///
    /// Registering an id twice replaces the earlier callback; the earlier
    /// handle then no longer controls the registration.
    pub fn subscribe<F>(&self, id: impl Into<String>, callback: F) -> Subscription
    where
        F: Fn(Tick) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync + 'static,
    {
        let id = id.into();
        let token = Uuid::new_v4();
        let previous = self.inner.subscribers.insert(
            id.clone(),
            Registration {
                token,
                callback: Arc::new(callback),
            },
        );
        if previous.is_some() {
            debug!(subscriber = %id, "replaced existing tick subscriber");
        } else {
            debug!(subscriber = %id, "tick subscriber registered");
        }

        self.start();

        Subscription {
            id,
            token,
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Start the shared interval. No-op when it is already running.
    pub fn start(&self) {
        self.inner.start();
    }

    /// Stop the shared interval. Subscribers stay registered.
    pub fn stop(&self) {
        self.inner.stop();
    }

    /// Whether the interval task is alive.
    pub fn is_running(&self) -> bool {
        self.inner.is_running()
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.len()
    }

    /// Deliver one tick to every subscriber right away.
    pub async fn fire(&self) {
        self.inner.fan_out().await;
    }
}

impl Inner {
    fn start(self: &Arc<Self>) {
        let mut slot = self.task.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if slot.as_ref().is_some_and(|task| !task.is_finished()) {
            return;
        }

        let Ok(runtime) = Handle::try_current() else {
            warn!("no async runtime available; tick broadcaster not started");
            return;
        };

        let weak = Arc::downgrade(self);
        let period = self.period;
        *slot = Some(runtime.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let Some(inner) = weak.upgrade() else {
                    break;
                };
                inner.fan_out().await;
            }
        }));
        info!(period_ms = period.as_millis() as u64, "tick broadcaster started");
    }

    fn stop(&self) {
        let task = self
            .task
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(task) = task {
            task.abort();
            info!("tick broadcaster stopped");
        }
    }

    fn is_running(&self) -> bool {
        self.task
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    fn unsubscribe(&self, id: &str, token: Uuid) {
        let removed = self
            .subscribers
            .remove_if(id, |_, registration| registration.token == token);
        if removed.is_some() {
            debug!(subscriber = %id, "tick subscriber removed");
        }
        if self.subscribers.is_empty() {
            self.stop();
        }
    }

    async fn fan_out(&self) {
        let tick = Tick {
            sequence: self.sequence.fetch_add(1, Ordering::Relaxed),
        };
        // Snapshot first so no map shard stays locked across an await.
        let callbacks: Vec<(String, TickCallback)> = self
            .subscribers
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().callback.clone()))
            .collect();

        for (id, callback) in callbacks {
            let future = match panic::catch_unwind(AssertUnwindSafe(|| callback(tick))) {
                Ok(future) => future,
                Err(_) => {
                    error!(subscriber = %id, "tick subscriber panicked");
                    continue;
                }
            };

            match AssertUnwindSafe(future).catch_unwind().await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => warn!(subscriber = %id, error = %err, "tick subscriber failed"),
                Err(_) => error!(subscriber = %id, "tick subscriber panicked"),
            }
        }
    }
}

impl Subscription {
    /// Identifier the subscription was registered under.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.unsubscribe(&self.id, self.token);
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(task) = self
            .task
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
        {
            task.abort();
        }
    }
}
