//! # Active set - arena of tracked tasks keyed by task id.
//!
//! The active set owns every task the watcher has started and not yet resolved.
//!
//! ## Architecture
//! ```text
//! spawn(work) ──► JoinSet::spawn ──► AbortHandle ──► index[id]
//!
//! drain_until(deadline):
//!   JoinSet::join_next_with_id ──► classify ──► finished (FIFO, still in index)
//!
//! pop_finished() ──► (id, Outcome)          remove(id) ──► index.remove (no-op if absent)
//!
//! cancel_all():
//!   index.drain() ──► AbortHandle::abort ──► JoinSet::detach_all   (not awaited)
//! ```
//!
//! ## Rules
//! - An id appears in the index at most once; tokio task ids are unique per runtime.
//! - A task stays in the index until its outcome is taken out **and** `remove` is called,
//!   or until it is cancelled.
//! - Removing an absent id is a no-op returning `false`.
//! - Cancellation is requested, never awaited: aborted tasks are detached from the join set.

use std::collections::{HashMap, VecDeque};
use std::future::Future;

use tokio::task::{AbortHandle, JoinError, JoinSet};
use tokio::time::{self, Instant};

use crate::error::TaskError;

/// Stable identifier of a tracked task.
pub type TaskId = tokio::task::Id;

/// Terminal state of a joined task.
#[derive(Debug)]
pub(crate) enum Outcome<T, E> {
    Value(T),
    Failed(TaskError<E>),
    /// Aborted by someone other than [`ActiveSet::cancel_all`], e.g. a runtime shutdown.
    Cancelled,
}

/// How a bounded drain ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Drain {
    /// Every running task was joined.
    Drained,
    /// The deadline elapsed first.
    TimedOut,
}

pub(crate) struct ActiveSet<T, E> {
    running: JoinSet<Result<T, E>>,
    index: HashMap<TaskId, AbortHandle>,
    finished: VecDeque<(TaskId, Outcome<T, E>)>,
}

impl<T, E> ActiveSet<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    pub(crate) fn new() -> Self {
        Self {
            running: JoinSet::new(),
            index: HashMap::new(),
            finished: VecDeque::new(),
        }
    }

    /// Starts `work` on the current runtime and tracks it.
    pub(crate) fn spawn<F>(&mut self, work: F) -> TaskId
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        let abort = self.running.spawn(work);
        let id = abort.id();
        self.index.insert(id, abort);
        id
    }

    pub(crate) fn remove(&mut self, id: TaskId) -> bool {
        self.index.remove(&id).is_some()
    }

    pub(crate) fn contains(&self, id: TaskId) -> bool {
        self.index.contains_key(&id)
    }

    /// Tracked tasks, including finished ones whose outcome is not reported yet.
    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Tasks not joined yet.
    pub(crate) fn running_len(&self) -> usize {
        self.running.len()
    }

    pub(crate) fn ids(&self) -> Vec<TaskId> {
        self.index.keys().copied().collect()
    }

    /// Joins running tasks until none are left or `deadline` passes.
    ///
    /// `None` waits without a bound. Joined outcomes are buffered in join order.
    pub(crate) async fn drain_until(&mut self, deadline: Option<Instant>) -> Drain {
        loop {
            let next = match deadline {
                Some(at) => match time::timeout_at(at, self.running.join_next_with_id()).await {
                    Ok(next) => next,
                    Err(_elapsed) => return Drain::TimedOut,
                },
                None => self.running.join_next_with_id().await,
            };
            match next {
                Some(joined) => self.stash(joined),
                None => return Drain::Drained,
            }
        }
    }

    pub(crate) fn pop_finished(&mut self) -> Option<(TaskId, Outcome<T, E>)> {
        self.finished.pop_front()
    }

    /// Aborts every tracked task and forgets it. Returns the ids that were tracked.
    ///
    /// Buffered outcomes are discarded together with their tasks.
    pub(crate) fn cancel_all(&mut self) -> Vec<TaskId> {
        let ids = self
            .index
            .drain()
            .map(|(id, handle)| {
                handle.abort();
                id
            })
            .collect();
        self.running.detach_all();
        self.finished.clear();
        ids
    }

    fn stash(&mut self, joined: Result<(TaskId, Result<T, E>), JoinError>) {
        let (id, outcome) = match joined {
            Ok((id, Ok(value))) => (id, Outcome::Value(value)),
            Ok((id, Err(err))) => (id, Outcome::Failed(TaskError::Failed(err))),
            Err(join_err) => {
                let id = join_err.id();
                if join_err.is_panic() {
                    let panic = TaskError::from_panic(join_err.into_panic());
                    (id, Outcome::Failed(panic))
                } else {
                    (id, Outcome::Cancelled)
                }
            }
        };
        if self.index.contains_key(&id) {
            self.finished.push_back((id, outcome));
        }
    }
}
