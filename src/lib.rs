//! # taskwatch
//!
//! **taskwatch** is a small background-task watcher for tokio.
//!
//! It starts asynchronous units of work, tracks them while they run, records each
//! outcome (value or error) through a pluggable result sink, and shuts down in an
//! orderly way: nothing is left running or unaccounted for once `stop` returns.
//!
//! ## Architecture
//! ```text
//!   caller ──► Watcher::start()            (sweep: cancel anything still tracked)
//!   caller ──► Watcher::submit(work) ×N    (spawn + track, never suspends)
//!   caller ──► Watcher::stop()
//!                 │
//!                 ├─► bounded drain of the whole active set (Config::ttl)
//!                 │       finished ─┬─ Ok(v)    ─► Registrator::register_value(v)
//!                 │                 ├─ Err(e)   ─► Registrator::register_error(TaskError::Failed(e))
//!                 │                 └─ panic    ─► Registrator::register_error(TaskError::Panicked)
//!                 └─► cancel the rest (requested, not awaited; never reported)
//!
//!   every step ── publish(Event) ──► Bus ──► SubscriberSet ──► Subscribe::on_event
//! ```
//!
//! ## Features
//! | Area              | Description                                                      | Key types / traits                  |
//! |-------------------|------------------------------------------------------------------|-------------------------------------|
//! | **Watching**      | Start, submit, bounded stop with cancellation.                   | [`Watcher`], [`Watch`]              |
//! | **Result sink**   | Receives values and failures of finished work.                   | [`Registrator`]                     |
//! | **Errors**        | Task failures, sink failures, runtime errors.                    | [`TaskError`], [`RuntimeError`]     |
//! | **Events**        | Lifecycle events for logging/metrics.                            | [`Event`], [`EventKind`], [`Subscribe`] |
//! | **Configuration** | Bounded-wait and bus sizing.                                     | [`Config`]                          |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use std::time::Duration;
//! use taskwatch::{Registrator, RegistrationError, TaskError, Watcher};
//!
//! #[derive(Default)]
//! struct Sink {
//!     values: Mutex<Vec<u32>>,
//!     errors: Mutex<Vec<String>>,
//! }
//!
//! impl Registrator<u32, std::io::Error> for Sink {
//!     fn register_value(&self, value: u32) -> Result<(), RegistrationError> {
//!         self.values.lock().unwrap().push(value);
//!         Ok(())
//!     }
//!
//!     fn register_error(&self, error: TaskError<std::io::Error>) -> Result<(), RegistrationError> {
//!         self.errors.lock().unwrap().push(error.to_string());
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sink = Arc::new(Sink::default());
//!     let mut watcher: Watcher<u32, std::io::Error> =
//!         Watcher::builder(sink.clone()).with_ttl(Duration::from_secs(5)).build();
//!
//!     watcher.start().await;
//!     watcher.submit(async { Ok(1) });
//!     watcher.submit(async { Err(std::io::Error::other("disk gone")) });
//!     watcher.stop().await?;
//!
//!     assert_eq!(*sink.values.lock().unwrap(), vec![1]);
//!     assert_eq!(sink.errors.lock().unwrap().len(), 1);
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod events;
mod registrator;
mod subscribers;

// ---- Public re-exports ----

pub use crate::core::{Config, DEFAULT_TTL, TaskId, Watch, Watcher, WatcherBuilder, Work};
pub use error::{RegistrationError, RuntimeError, TaskError};
pub use events::{Bus, Event, EventKind};
pub use registrator::Registrator;
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
