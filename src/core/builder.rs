//! # Builder: wires a [`Watcher`] to its sink, config and subscribers.
//!
//! ```text
//! WatcherBuilder::new(sink)
//!   .with_config / .with_ttl / .with_subscribers
//!   .build()
//!     ├─ Bus::new(bus_capacity_clamped)
//!     ├─ subscribers? ─► listener task: bus.recv() ─► SubscriberSet::emit
//!     └─ Watcher::new_internal(sink, cfg, bus, listener guard)
//! ```
//!
//! ## Rules
//! - Without subscribers nothing is spawned, so `build` works outside a runtime.
//! - The listener lives as long as the watcher; dropping the watcher drops its guard.
//! - A lagging listener skips events and says so on stderr; it never blocks `stop`.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::{CancellationToken, DropGuard};

use super::{config::Config, watcher::Watcher};
use crate::{
    events::Bus,
    registrator::Registrator,
    subscribers::{Subscribe, SubscriberSet},
};

/// Builder for constructing a [`Watcher`] with optional subscribers.
pub struct WatcherBuilder<T, E> {
    registrator: Arc<dyn Registrator<T, E>>,
    cfg: Config,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl<T, E> WatcherBuilder<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Creates a new builder around the result sink, with default configuration.
    pub fn new<R>(registrator: Arc<R>) -> Self
    where
        R: Registrator<T, E> + 'static,
    {
        Self {
            registrator,
            cfg: Config::default(),
            subscribers: Vec::new(),
        }
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, cfg: Config) -> Self {
        self.cfg = cfg;
        self
    }

    /// Sets the bounded-wait used by `stop`.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.cfg.ttl = ttl;
        self
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive runtime events through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds the watcher.
    ///
    /// With subscribers configured this spawns their workers and a bus listener,
    /// so it must run inside a tokio runtime. The listener stops when the watcher is dropped.
    pub fn build(self) -> Watcher<T, E> {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let listener = if self.subscribers.is_empty() {
            None
        } else {
            Some(subscriber_listener(&bus, self.subscribers))
        };
        Watcher::new_internal(self.registrator, self.cfg, bus, listener)
    }
}

/// Subscribes to the bus and forwards events to the subscriber set (fire-and-forget).
///
/// Pending events are forwarded before the guard's cancellation is honoured;
/// the subscriber workers are then closed and awaited.
fn subscriber_listener(bus: &Bus, subscribers: Vec<Arc<dyn Subscribe>>) -> DropGuard {
    let mut rx = bus.subscribe();
    let set = SubscriberSet::new(subscribers, bus.clone());
    let token = CancellationToken::new();
    let stop = token.clone();

    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                msg = rx.recv() => match msg {
                    Ok(ev) => set.emit(&ev),
                    Err(RecvError::Lagged(skipped)) => {
                        eprintln!("[taskwatch] subscriber listener lagged; skipped {skipped} event(s)");
                    }
                    Err(RecvError::Closed) => break,
                },
                _ = stop.cancelled() => break,
            }
        }
        set.shutdown().await;
    });

    token.drop_guard()
}
