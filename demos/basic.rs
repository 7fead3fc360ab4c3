//! # Example: basic
//!
//! One watcher, a handful of jobs with different fates, and a stdout logger.
//!
//! Demonstrates how to:
//! - Implement a [`Registrator`] that keeps outcomes in memory.
//! - Build a [`Watcher`] with a ttl and the [`LogWriter`] subscriber.
//! - Submit work that succeeds, fails, panics, or outlives the ttl.
//!
//! ## Flow
//! ```text
//! start() ─► submit × 4 ─► stop()
//!                            ├─► drain up to 1s
//!                            ├─► "fast" / "flaky" / "buggy" reported to the sink
//!                            └─► "sleepy" cancelled, not reported
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example basic --features logging
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use taskwatch::{LogWriter, Registrator, RegistrationError, Subscribe, TaskError, Watcher};

#[derive(Debug, thiserror::Error)]
#[error("job {0} failed")]
struct JobError(&'static str);

#[derive(Default)]
struct MemorySink {
    values: Mutex<Vec<&'static str>>,
    errors: Mutex<Vec<TaskError<JobError>>>,
}

impl Registrator<&'static str, JobError> for MemorySink {
    fn register_value(&self, value: &'static str) -> Result<(), RegistrationError> {
        self.values
            .lock()
            .map_err(|_| RegistrationError::new("values lock poisoned"))?
            .push(value);
        Ok(())
    }

    fn register_error(&self, error: TaskError<JobError>) -> Result<(), RegistrationError> {
        self.errors
            .lock()
            .map_err(|_| RegistrationError::new("errors lock poisoned"))?
            .push(error);
        Ok(())
    }
}

async fn job(name: &'static str, ms: u64) -> Result<&'static str, JobError> {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    Ok(name)
}

async fn flaky() -> Result<&'static str, JobError> {
    tokio::time::sleep(Duration::from_millis(200)).await;
    Err(JobError("flaky"))
}

async fn buggy() -> Result<&'static str, JobError> {
    tokio::time::sleep(Duration::from_millis(300)).await;
    panic!("index out of range in buggy job");
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sink = Arc::new(MemorySink::default());
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];

    let mut watcher: Watcher<&'static str, JobError> = Watcher::builder(sink.clone())
        .with_ttl(Duration::from_secs(1))
        .with_subscribers(subs)
        .build();

    watcher.start().await;
    watcher.submit(job("fast", 100));
    watcher.submit(flaky());
    watcher.submit(buggy());
    watcher.submit(job("sleepy", 5_000));

    watcher.stop().await?;
    // give the logger a moment to flush
    tokio::time::sleep(Duration::from_millis(50)).await;

    println!("values: {:?}", sink.values.lock().map_err(|_| "poisoned")?);
    for err in sink.errors.lock().map_err(|_| "poisoned")?.iter() {
        println!("error:  {err} ({})", err.as_label());
    }
    println!("still tracked: {}", watcher.active_len());
    Ok(())
}
