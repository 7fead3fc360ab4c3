//! Error types used by the taskwatch runtime and by submitted work.
//!
//! This module defines three error types:
//!
//! - [`TaskError`] - a failed outcome of one unit of work, handed to the sink.
//! - [`RegistrationError`] - raised by a [`Registrator`](crate::Registrator) that could not record an outcome.
//! - [`RuntimeError`] - errors surfaced by [`Watcher::stop`](crate::Watcher::stop) itself.
//!
//! Cancellation is deliberately absent from all three: a task cancelled by a sweep
//! is dropped from tracking and never reported.

use std::any::Any;
use std::error::Error as StdError;

use thiserror::Error;

/// # Failed outcome of a unit of work.
///
/// The original error value is carried as-is, so the sink can match on it or
/// inspect it without going through a string form.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TaskError<E> {
    /// The work resolved to `Err(e)`.
    #[error("task failed: {0}")]
    Failed(E),

    /// The work panicked while being polled.
    #[error("task panicked: {message}")]
    Panicked {
        /// Panic payload rendered as text (`&str` / `String` payloads), or a placeholder.
        message: String,
    },
}

impl<E> TaskError<E> {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use taskwatch::TaskError;
    ///
    /// let err: TaskError<std::io::Error> = TaskError::Panicked { message: "boom".into() };
    /// assert_eq!(err.as_label(), "task_panicked");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Failed(_) => "task_failed",
            TaskError::Panicked { .. } => "task_panicked",
        }
    }

    /// Returns `true` if the work panicked instead of returning an error.
    pub fn is_panic(&self) -> bool {
        matches!(self, TaskError::Panicked { .. })
    }

    /// Borrows the error returned by the work, if any.
    pub fn inner(&self) -> Option<&E> {
        match self {
            TaskError::Failed(e) => Some(e),
            TaskError::Panicked { .. } => None,
        }
    }

    /// Consumes the failure and returns the error returned by the work, if any.
    pub fn into_inner(self) -> Option<E> {
        match self {
            TaskError::Failed(e) => Some(e),
            TaskError::Panicked { .. } => None,
        }
    }

    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        TaskError::Panicked { message }
    }
}

/// # Sink could not record an outcome.
///
/// Returned by [`Registrator::register_value`](crate::Registrator::register_value) and
/// [`Registrator::register_error`](crate::Registrator::register_error).
/// The watcher does not recover from it; it propagates out of `stop`.
#[derive(Error, Debug)]
#[error("registration failed: {message}")]
pub struct RegistrationError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl RegistrationError {
    /// Creates an error carrying only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps an underlying storage error.
    pub fn with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Human-readable description.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// # Errors produced by the taskwatch runtime.
///
/// These represent failures of the watcher's own dependencies, not of the
/// submitted work (those go to the sink as [`TaskError`]).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The sink failed while `stop` was reporting an outcome.
    #[error("result sink failed during stop: {0}")]
    Registration(#[from] RegistrationError),

    /// Installing the OS signal listeners failed; nothing was stopped.
    #[error("failed to listen for shutdown signals: {0}")]
    Signal(#[source] std::io::Error),
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use taskwatch::{RegistrationError, RuntimeError};
    ///
    /// let err = RuntimeError::from(RegistrationError::new("disk full"));
    /// assert_eq!(err.as_label(), "runtime_registration_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::Registration(_) => "runtime_registration_failed",
            RuntimeError::Signal(_) => "runtime_signal_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::Registration(e) => format!("sink rejected outcome: {}", e.message()),
            RuntimeError::Signal(e) => format!("signal listener error: {e}"),
        }
    }
}
