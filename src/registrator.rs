//! # Result sink capability.
//!
//! A [`Registrator`] records what finished work produced. The watcher is its only
//! caller and calls it sequentially from `stop`, so implementations do not need to
//! guard against concurrent calls coming from the watcher (interior mutability is
//! still needed because methods take `&self`).
//!
//! ```text
//! Watcher::stop ──► finished outcome ──┬─ Ok(value)  ──► register_value(value)
//!                                      ├─ Err(e)     ──► register_error(TaskError::Failed(e))
//!                                      ├─ panic      ──► register_error(TaskError::Panicked{..})
//!                                      └─ cancelled  ──► (nothing)
//! ```
//!
//! ## Example
//! ```rust
//! use std::sync::Mutex;
//! use taskwatch::{Registrator, RegistrationError, TaskError};
//!
//! #[derive(Default)]
//! struct Recorder {
//!     values: Mutex<Vec<u32>>,
//!     errors: Mutex<Vec<TaskError<std::io::Error>>>,
//! }
//!
//! impl Registrator<u32, std::io::Error> for Recorder {
//!     fn register_value(&self, value: u32) -> Result<(), RegistrationError> {
//!         self.values.lock().unwrap().push(value);
//!         Ok(())
//!     }
//!
//!     fn register_error(&self, error: TaskError<std::io::Error>) -> Result<(), RegistrationError> {
//!         self.errors.lock().unwrap().push(error);
//!         Ok(())
//!     }
//! }
//! ```

use crate::error::{RegistrationError, TaskError};

/// Records outcomes of completed tasks.
///
/// Errors returned from either method are not handled by the watcher: they
/// abort the current `stop` call and reach its caller as
/// [`RuntimeError::Registration`](crate::RuntimeError::Registration).
pub trait Registrator<T, E>: Send + Sync {
    /// Stores a value returned by finished work.
    fn register_value(&self, value: T) -> Result<(), RegistrationError>;

    /// Stores the failure of finished work, with the original error intact.
    fn register_error(&self, error: TaskError<E>) -> Result<(), RegistrationError>;
}
