//! # LogWriter - simple event printer
//!
//! A minimal subscriber that prints incoming [`Event`]s to stdout.
//! Use it for test or demo.
//!
//! ## Example output
//! ```text
//! [started] swept=0
//! [submitted] task=Id(12)
//! [stop-requested] ttl_ms=1000 active=2
//! [completed] task=Id(12)
//! [ttl-exceeded] ttl_ms=1000 running=1
//! [cancelled] task=Id(13)
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::WatcherStarted => {
                println!("[started] swept={}", e.count.unwrap_or(0));
            }
            EventKind::StopRequested => {
                println!(
                    "[stop-requested] ttl_ms={:?} active={:?}",
                    e.ttl_ms, e.count
                );
            }
            EventKind::DrainedWithinTtl => {
                println!("[drained-within-ttl] ttl_ms={:?}", e.ttl_ms);
            }
            EventKind::TtlExceeded => {
                println!("[ttl-exceeded] ttl_ms={:?} running={:?}", e.ttl_ms, e.count);
            }
            EventKind::TaskSubmitted => {
                println!("[submitted] task={:?}", e.task);
            }
            EventKind::TaskCompleted => {
                println!("[completed] task={:?}", e.task);
            }
            EventKind::TaskFailed => {
                println!("[failed] task={:?} err={:?}", e.task, e.reason);
            }
            EventKind::TaskCancelled => {
                println!("[cancelled] task={:?}", e.task);
            }
            EventKind::TaskSwept => {
                println!("[swept] task={:?}", e.task);
            }
            EventKind::SubscriberOverflow => {
                println!("[subscriber-overflow] {}", e.reason.as_deref().unwrap_or("unknown"));
            }
            EventKind::SubscriberPanicked => {
                println!("[subscriber-panicked] {}", e.reason.as_deref().unwrap_or("unknown"));
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
