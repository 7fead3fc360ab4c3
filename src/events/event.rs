//! # Runtime events emitted by the watcher.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Lifecycle events**: watcher start and stop (started, stop requested, drained, ttl exceeded)
//! - **Task events**: per-task flow (submitted, completed, failed, cancelled, swept)
//! - **Subscriber events**: delivery problems inside the fan-out (overflow, panic)
//!
//! The [`Event`] struct carries additional metadata such as timestamps, task id,
//! reasons and the configured ttl.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are delivered out of order.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use taskwatch::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::TtlExceeded)
//!     .with_reason("2 task(s) still running")
//!     .with_ttl(Duration::from_secs(1));
//!
//! assert_eq!(ev.kind, EventKind::TtlExceeded);
//! assert_eq!(ev.ttl_ms, Some(1000));
//! assert_eq!(ev.reason.as_deref(), Some("2 task(s) still running"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

use crate::core::TaskId;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `reason`: `subscriber=<name> info=<panic info>`
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `reason`: `subscriber=<name> reason=<full|closed>`
    SubscriberOverflow,

    // === Watcher lifecycle ===
    /// `start` finished its sweep; the watcher is accepting work.
    ///
    /// Sets:
    /// - `count`: number of tasks swept
    WatcherStarted,

    /// `stop` was called; the bounded drain begins.
    ///
    /// Sets:
    /// - `ttl_ms`: configured bound
    /// - `count`: tasks active when the drain began
    StopRequested,

    /// Every active task finished within the bound.
    ///
    /// Sets:
    /// - `ttl_ms`: configured bound
    DrainedWithinTtl,

    /// The bound elapsed with tasks still running; they are about to be cancelled.
    ///
    /// Sets:
    /// - `ttl_ms`: configured bound
    /// - `count`: tasks still running
    TtlExceeded,

    // === Task events ===
    /// Work was spawned and added to the active set.
    ///
    /// Sets:
    /// - `task`: task id
    TaskSubmitted,

    /// Task returned a value; it was forwarded to the sink.
    ///
    /// Sets:
    /// - `task`: task id
    TaskCompleted,

    /// Task returned an error or panicked; it was forwarded to the sink.
    ///
    /// Sets:
    /// - `task`: task id
    /// - `reason`: error label (`task_failed` / `task_panicked`)
    TaskFailed,

    /// Task was still running when the bound elapsed and was cancelled.
    ///
    /// Sets:
    /// - `task`: task id
    TaskCancelled,

    /// Task was cancelled by the sweep in `start`.
    ///
    /// Sets:
    /// - `task`: task id
    TaskSwept,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Id of the task, if applicable.
    pub task: Option<TaskId>,
    /// Human-readable reason (error labels, overflow details, etc.).
    pub reason: Option<Arc<str>>,
    /// Configured ttl in milliseconds (compact).
    pub ttl_ms: Option<u32>,
    /// Number of tasks involved (swept, active, still running).
    pub count: Option<usize>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            task: None,
            reason: None,
            ttl_ms: None,
            count: None,
        }
    }

    /// Attaches a task id.
    #[inline]
    pub fn with_task(mut self, id: TaskId) -> Self {
        self.task = Some(id);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches the ttl (stored as milliseconds).
    #[inline]
    pub fn with_ttl(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.ttl_ms = Some(ms);
        self
    }

    /// Attaches a task count.
    #[inline]
    pub fn with_count(mut self, n: usize) -> Self {
        self.count = Some(n);
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_reason(format!("subscriber={subscriber} reason={reason}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_reason(format!("subscriber={subscriber} info={info}"))
    }

    /// True for events produced by the subscriber fan-out itself.
    #[inline]
    pub fn is_subscriber_event(&self) -> bool {
        matches!(
            self.kind,
            EventKind::SubscriberOverflow | EventKind::SubscriberPanicked
        )
    }
}
