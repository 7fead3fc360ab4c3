//! # Subscribers: observe what a watcher does with its tasks.
//!
//! A [`Subscribe`] implementation receives every [`Event`] the watcher publishes:
//! - task lifecycle: `TaskSubmitted`, `TaskCompleted`, `TaskFailed`, `TaskCancelled`, `TaskSwept`
//! - watcher lifecycle: `WatcherStarted`, `StopRequested`, then `DrainedWithinTtl` or `TtlExceeded`
//! - delivery problems of other subscribers: `SubscriberOverflow`, `SubscriberPanicked`
//!
//! ```text
//! Watcher ──► Bus ──► listener ──► [queue per subscriber] ──► worker ──► on_event()
//! ```
//!
//! ## Rules
//! - Delivery is FIFO per subscriber and never holds up `stop` or the result sink.
//! - A full queue drops the event for that subscriber only (`SubscriberOverflow`).
//! - A panic in `on_event` is caught and published as `SubscriberPanicked`.
//! - Outcome values and error payloads go to the [`Registrator`](crate::Registrator), not here;
//!   events carry only the task id and a reason label.
//!
//! ## Example
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use async_trait::async_trait;
//! use taskwatch::{Event, EventKind, Subscribe};
//!
//! /// Counts tasks that `stop` had to cancel.
//! #[derive(Default)]
//! struct Overruns(AtomicUsize);
//!
//! #[async_trait]
//! impl Subscribe for Overruns {
//!     async fn on_event(&self, ev: &Event) {
//!         if ev.kind == EventKind::TaskCancelled {
//!             self.0.fetch_add(1, Ordering::Relaxed);
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "overruns" }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Receives watcher events on a dedicated worker.
///
/// `on_event` runs off the watcher's path; keep it non-blocking and handle errors inside.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Handles one event, in publish order for this subscriber.
    async fn on_event(&self, event: &Event);

    /// Name carried by `SubscriberOverflow` / `SubscriberPanicked` events about this subscriber.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Events buffered for this subscriber before new ones are dropped (at least 1; default 1024).
    fn queue_capacity(&self) -> usize {
        1024
    }
}
