//! # Watcher configuration.
//!
//! Provides [`Config`] centralized settings for a [`Watcher`](crate::Watcher).
//!
//! ## Sentinel values
//! - `ttl = 0s` → no graceful drain: `stop` reports only tasks that are already
//!   finished and cancels everything else immediately.
//! - `bus_capacity = 0` → clamped to 1 by [`Config::bus_capacity_clamped`].

use std::time::Duration;

/// Default bounded-wait used by `stop`.
pub const DEFAULT_TTL: Duration = Duration::from_secs(10);

/// Configuration for the watcher runtime.
///
/// ## Field semantics
/// - `ttl`: upper bound on how long `stop` waits for outstanding tasks before cancelling them
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped by Bus)
///
/// All fields are public; read `bus_capacity` through [`Config::bus_capacity_clamped`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Maximum time `stop` waits for tasks to finish on their own.
    ///
    /// One bound for the whole active set, not a per-task timeout:
    /// - tasks finished before it elapses have their outcome reported;
    /// - the rest are cancelled and dropped without a report.
    pub ttl: Duration,

    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Slow receivers that lag behind more than `bus_capacity` events
    /// observe `Lagged` and skip older items.
    pub bus_capacity: usize,
}

impl Config {
    /// Creates a configuration with the given `ttl` and default bus capacity.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            ..Self::default()
        }
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `ttl = 10s`
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            bus_capacity: 1024,
        }
    }
}
