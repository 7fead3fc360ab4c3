//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to events emitted by the watcher while it tracks work.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `Watcher` (start/submit/stop), `SubscriberSet` workers (overflow/panic).
//! - **Consumers**: the subscriber listener spawned by `WatcherBuilder::build` (fans out to
//!   `SubscriberSet`) and any raw receiver obtained from `Watcher::events`.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
