//! Runtime core: task tracking and shutdown.
//!
//! The public API from this module is [`Watcher`] (with its [`WatcherBuilder`]),
//! the [`Watch`] trait it implements, and [`Config`].
//!
//! Internal modules:
//! - [`registry`]: arena of tracked tasks (the active set);
//! - [`watcher`]: start/submit/stop protocol, sink reporting, event publishing;
//! - [`builder`]: wires config, bus and subscribers into a watcher;
//! - [`shutdown`]: cross-platform shutdown signal handling.

mod builder;
mod config;
mod registry;
mod shutdown;
mod watch;
mod watcher;

pub use builder::WatcherBuilder;
pub use config::{Config, DEFAULT_TTL};
pub use registry::TaskId;
pub use watch::{Watch, Work};
pub use watcher::Watcher;
