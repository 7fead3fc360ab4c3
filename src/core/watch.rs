//! # Watcher abstraction.
//!
//! [`Watch`] is the surface a caller drives: `start`, any number of `submit`s, then `stop`.
//! [`Watcher`](crate::Watcher) is the runtime implementation; tests and embedders can put
//! their own type behind the same trait.

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::error::RuntimeError;

/// One unit of asynchronous work that has not started yet.
pub type Work<T, E> = BoxFuture<'static, Result<T, E>>;

/// Lifecycle of a background-task watcher.
///
/// # Example
/// ```rust
/// use taskwatch::{RuntimeError, Watch};
///
/// async fn run_batch<W: Watch<Output = u32, Error = std::io::Error>>(
///     w: &mut W,
/// ) -> Result<(), RuntimeError> {
///     w.start().await;
///     for n in 0..3 {
///         w.submit(Box::pin(async move { Ok(n) }));
///     }
///     w.stop().await
/// }
/// ```
#[async_trait]
pub trait Watch: Send {
    /// Value produced by successful work.
    type Output: Send + 'static;
    /// Error produced by failed work.
    type Error: Send + 'static;

    /// Prepares the watcher; cancels anything still tracked from earlier use.
    async fn start(&mut self);

    /// Starts `work` concurrently and tracks it. Never suspends.
    fn submit(&mut self, work: Work<Self::Output, Self::Error>);

    /// Drains tracked work within the configured bound, then cancels the rest.
    async fn stop(&mut self) -> Result<(), RuntimeError>;
}
