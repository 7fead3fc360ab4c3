//! # Watcher: tracks background work, reports outcomes, guarantees clean shutdown.
//!
//! The [`Watcher`] owns the active set of tasks, the result sink and an event bus.
//!
//! ## Key responsibilities
//! - start submitted work immediately and track it by [`TaskId`]
//! - on `stop`, wait **once** for the whole active set, bounded by [`Config::ttl`]
//! - forward values and failures of finished work to the [`Registrator`]
//! - cancel whatever is still running when the bound elapses, without reporting it
//!
//! ## Lifecycle
//! ```text
//! start():
//!   new token generation ─► cancel_all() ─► publish TaskSwept (per task) ─► publish WatcherStarted
//!
//! submit(work):
//!   ActiveSet::spawn(work) ─► publish TaskSubmitted
//!
//! stop():
//!   publish StopRequested{ttl, active}
//!   drain_until(now + ttl)
//!     ├─ Drained  ─► publish DrainedWithinTtl
//!     └─ TimedOut ─► publish TtlExceeded{running}
//!   for each finished (join order):
//!     remove(id)
//!     ├─ Value(v)   ─► registrator.register_value(v)?  ─► publish TaskCompleted
//!     ├─ Failed(e)  ─► registrator.register_error(e)?  ─► publish TaskFailed
//!     └─ Cancelled  ─► publish TaskCancelled
//!   new token generation ─► cancel_all() ─► publish TaskCancelled (per task)
//! ```
//!
//! ## Rules
//! - After a successful `stop` the active set is empty.
//! - Cancelled work never reaches the sink.
//! - Sink calls are sequential (`stop` takes `&mut self`).
//! - A sink error returns from `stop` at once; outcomes not yet reported and tasks not yet
//!   cancelled stay tracked for the next `stop`.
//! - Dropping the watcher aborts everything it still tracks.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use std::time::Duration;
//! use taskwatch::{Registrator, RegistrationError, TaskError, Watcher};
//!
//! #[derive(Default)]
//! struct Values(Mutex<Vec<u64>>);
//!
//! impl Registrator<u64, std::io::Error> for Values {
//!     fn register_value(&self, v: u64) -> Result<(), RegistrationError> {
//!         self.0.lock().unwrap().push(v);
//!         Ok(())
//!     }
//!     fn register_error(&self, _e: TaskError<std::io::Error>) -> Result<(), RegistrationError> {
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), taskwatch::RuntimeError> {
//!     let sink = Arc::new(Values::default());
//!     let mut watcher: Watcher<u64, std::io::Error> = Watcher::new(sink.clone(), Duration::from_secs(1));
//!
//!     watcher.start().await;
//!     watcher.submit(async { Ok(42) });
//!     watcher.stop().await?;
//!
//!     assert_eq!(*sink.0.lock().unwrap(), vec![42]);
//!     assert!(watcher.is_idle());
//!     Ok(())
//! }
//! ```

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;
use tokio::time::Instant;
use tokio_util::sync::{CancellationToken, DropGuard};

use super::{
    builder::WatcherBuilder,
    config::Config,
    registry::{ActiveSet, Drain, Outcome, TaskId},
    shutdown,
    watch::{Watch, Work},
};
use crate::{
    error::{RegistrationError, RuntimeError},
    events::{Bus, Event, EventKind},
    registrator::Registrator,
};

/// Tracks background work and records its outcomes through a [`Registrator`].
pub struct Watcher<T, E> {
    cfg: Config,
    registrator: Arc<dyn Registrator<T, E>>,
    active: ActiveSet<T, E>,
    bus: Bus,
    /// Parent of every token handed out by [`Watcher::token`]; replaced on each sweep.
    generation: CancellationToken,
    /// Keeps the subscriber listener alive; dropping it stops the listener.
    _listener: Option<DropGuard>,
}

impl<T, E> Watcher<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Creates a watcher bound to `registrator` with the given bounded-wait.
    ///
    /// Use [`Watcher::builder`] for subscribers or a full [`Config`].
    pub fn new<R>(registrator: Arc<R>, ttl: Duration) -> Self
    where
        R: Registrator<T, E> + 'static,
    {
        WatcherBuilder::new(registrator).with_ttl(ttl).build()
    }

    /// Returns a builder bound to `registrator`.
    pub fn builder<R>(registrator: Arc<R>) -> WatcherBuilder<T, E>
    where
        R: Registrator<T, E> + 'static,
    {
        WatcherBuilder::new(registrator)
    }

    pub(crate) fn new_internal(
        registrator: Arc<dyn Registrator<T, E>>,
        cfg: Config,
        bus: Bus,
        listener: Option<DropGuard>,
    ) -> Self {
        Self {
            cfg,
            registrator,
            active: ActiveSet::new(),
            bus,
            generation: CancellationToken::new(),
            _listener: listener,
        }
    }

    /// Cancels and forgets everything still tracked, then accepts new work.
    ///
    /// Outcomes that were joined but not reported yet are discarded with their tasks.
    /// Does not wait for anything; on an empty watcher it only publishes `WatcherStarted`.
    pub async fn start(&mut self) {
        self.next_generation();
        let swept = self.active.cancel_all();
        for id in &swept {
            self.bus
                .publish(Event::new(EventKind::TaskSwept).with_task(*id));
        }
        self.bus
            .publish(Event::new(EventKind::WatcherStarted).with_count(swept.len()));
    }

    /// Starts `work` concurrently and tracks it (fire-and-forget).
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit<F>(&mut self, work: F)
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        self.spawn(work);
    }

    /// Same as [`Watcher::submit`], returning the id of the new task.
    pub fn spawn<F>(&mut self, work: F) -> TaskId
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        let id = self.active.spawn(work);
        self.bus
            .publish(Event::new(EventKind::TaskSubmitted).with_task(id));
        id
    }

    /// Builds work from a fresh [`Watcher::token`] and spawns it.
    pub fn spawn_with<F, Fut>(&mut self, make: F) -> TaskId
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let token = self.token();
        self.spawn(make(token))
    }

    /// Drains the active set within `ttl`, reports finished outcomes, cancels the rest.
    ///
    /// ### Errors
    /// [`RuntimeError::Registration`] if the sink fails; see the module rules for
    /// what stays tracked in that case.
    pub async fn stop(&mut self) -> Result<(), RuntimeError> {
        let ttl = self.cfg.ttl;
        self.bus.publish(
            Event::new(EventKind::StopRequested)
                .with_ttl(ttl)
                .with_count(self.active.len()),
        );

        // Duration::MAX and friends overflow Instant; treat them as "no bound".
        let deadline = Instant::now().checked_add(ttl);
        match self.active.drain_until(deadline).await {
            Drain::Drained => {
                self.bus
                    .publish(Event::new(EventKind::DrainedWithinTtl).with_ttl(ttl));
            }
            Drain::TimedOut => {
                self.bus.publish(
                    Event::new(EventKind::TtlExceeded)
                        .with_ttl(ttl)
                        .with_count(self.active.running_len()),
                );
            }
        }

        while let Some((id, outcome)) = self.active.pop_finished() {
            self.active.remove(id);
            self.report(id, outcome)?;
        }

        self.next_generation();
        for id in self.active.cancel_all() {
            self.bus
                .publish(Event::new(EventKind::TaskCancelled).with_task(id));
        }
        Ok(())
    }

    /// Waits for SIGINT/SIGTERM/SIGQUIT (Ctrl-C off unix), then runs [`Watcher::stop`].
    ///
    /// ### Errors
    /// [`RuntimeError::Signal`] if the listeners cannot be installed (nothing is stopped),
    /// otherwise whatever `stop` returns.
    pub async fn stop_on_signal(&mut self) -> Result<(), RuntimeError> {
        self.stop_after(shutdown::wait_for_shutdown_signal()).await
    }

    /// Runs [`Watcher::stop`] once `signal` resolves; an error from `signal` skips the stop.
    pub(crate) async fn stop_after<S>(&mut self, signal: S) -> Result<(), RuntimeError>
    where
        S: Future<Output = std::io::Result<()>>,
    {
        signal.await.map_err(RuntimeError::Signal)?;
        self.stop().await
    }

    /// Returns a token that is cancelled by the next sweep (`start`, end of `stop`) or drop.
    pub fn token(&self) -> CancellationToken {
        self.generation.child_token()
    }

    /// Creates a receiver for raw runtime events published after this call.
    pub fn events(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// Number of tracked tasks.
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// True if nothing is tracked.
    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    /// Ids of tracked tasks, in no particular order.
    pub fn active_ids(&self) -> Vec<TaskId> {
        self.active.ids()
    }

    /// True if the task is still tracked.
    pub fn contains(&self, id: TaskId) -> bool {
        self.active.contains(id)
    }

    /// Active configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// The sink outcomes are reported to.
    pub fn registrator(&self) -> &Arc<dyn Registrator<T, E>> {
        &self.registrator
    }

    fn report(&self, id: TaskId, outcome: Outcome<T, E>) -> Result<(), RegistrationError> {
        match outcome {
            Outcome::Value(value) => {
                self.registrator.register_value(value)?;
                self.bus
                    .publish(Event::new(EventKind::TaskCompleted).with_task(id));
            }
            Outcome::Failed(err) => {
                let label = err.as_label();
                self.registrator.register_error(err)?;
                self.bus.publish(
                    Event::new(EventKind::TaskFailed)
                        .with_task(id)
                        .with_reason(label),
                );
            }
            Outcome::Cancelled => {
                self.bus
                    .publish(Event::new(EventKind::TaskCancelled).with_task(id));
            }
        }
        Ok(())
    }

    fn next_generation(&mut self) {
        let old = std::mem::replace(&mut self.generation, CancellationToken::new());
        old.cancel();
    }
}

impl<T, E> Drop for Watcher<T, E> {
    fn drop(&mut self) {
        self.generation.cancel();
    }
}

#[async_trait]
impl<T, E> Watch for Watcher<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    type Output = T;
    type Error = E;

    async fn start(&mut self) {
        Watcher::start(self).await;
    }

    fn submit(&mut self, work: Work<T, E>) {
        self.spawn(work);
    }

    async fn stop(&mut self) -> Result<(), RuntimeError> {
        Watcher::stop(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaskError;
    use crate::subscribers::Subscribe;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use thiserror::Error;
    use tokio::time::sleep;

    #[derive(Debug, Error, PartialEq)]
    #[error("value error: {0}")]
    struct ValueError(&'static str);

    #[derive(Default)]
    struct Recorder {
        values: Mutex<Vec<i64>>,
        errors: Mutex<Vec<TaskError<ValueError>>>,
    }

    impl Recorder {
        fn values(&self) -> Vec<i64> {
            self.values.lock().unwrap().clone()
        }

        fn error_count(&self) -> usize {
            self.errors.lock().unwrap().len()
        }
    }

    impl Registrator<i64, ValueError> for Recorder {
        fn register_value(&self, value: i64) -> Result<(), RegistrationError> {
            self.values.lock().unwrap().push(value);
            Ok(())
        }

        fn register_error(&self, error: TaskError<ValueError>) -> Result<(), RegistrationError> {
            self.errors.lock().unwrap().push(error);
            Ok(())
        }
    }

    /// Rejects every value, records nothing.
    struct Broken;

    impl Registrator<i64, ValueError> for Broken {
        fn register_value(&self, _value: i64) -> Result<(), RegistrationError> {
            Err(RegistrationError::new("storage offline"))
        }

        fn register_error(&self, _error: TaskError<ValueError>) -> Result<(), RegistrationError> {
            Err(RegistrationError::new("storage offline"))
        }
    }

    fn watcher(sink: &Arc<Recorder>, ttl: Duration) -> Watcher<i64, ValueError> {
        Watcher::new(sink.clone(), ttl)
    }

    async fn after(delay: Duration, value: i64) -> Result<i64, ValueError> {
        sleep(delay).await;
        Ok(value)
    }

    async fn fail_after(delay: Duration, msg: &'static str) -> Result<i64, ValueError> {
        sleep(delay).await;
        Err(ValueError(msg))
    }

    fn drain_kinds(rx: &mut broadcast::Receiver<Event>) -> Vec<EventKind> {
        let mut kinds = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            kinds.push(ev.kind);
        }
        kinds
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_value_is_recorded() {
        let sink = Arc::new(Recorder::default());
        let mut w = watcher(&sink, Duration::from_secs(10));

        w.start().await;
        w.submit(after(Duration::from_millis(100), 42));
        assert_eq!(w.active_len(), 1);
        w.stop().await.unwrap();

        assert_eq!(sink.values(), vec![42]);
        assert_eq!(sink.error_count(), 0);
        assert!(w.is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_is_recorded_with_original_payload() {
        let sink = Arc::new(Recorder::default());
        let mut w = watcher(&sink, Duration::from_secs(10));

        w.start().await;
        w.submit(fail_after(Duration::from_millis(100), "boom"));
        w.stop().await.unwrap();

        assert!(sink.values().is_empty());
        let errors = sink.errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].inner(), Some(&ValueError("boom")));
        assert!(w.is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_exceeding_ttl_is_cancelled_and_not_recorded() {
        let sink = Arc::new(Recorder::default());
        let mut w = watcher(&sink, Duration::from_secs(1));
        let begun = Instant::now();

        w.start().await;
        let id = w.spawn(after(Duration::from_secs(5), 5));
        w.stop().await.unwrap();

        assert!(begun.elapsed() < Duration::from_secs(5));
        assert!(sink.values().is_empty());
        assert_eq!(sink.error_count(), 0);
        assert!(!w.contains(id));
        assert!(w.is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_values_of_several_tasks_form_a_set() {
        let sink = Arc::new(Recorder::default());
        let mut w = watcher(&sink, Duration::from_secs(10));

        w.start().await;
        for (i, v) in [3, 1, 2].into_iter().enumerate() {
            w.submit(after(Duration::from_millis(10 * i as u64), v));
        }
        w.stop().await.unwrap();

        let got: HashSet<i64> = sink.values().into_iter().collect();
        assert_eq!(got, HashSet::from([1, 2, 3]));
        assert_eq!(sink.values().len(), 3);
        assert!(w.is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_mixed_batch_splits_by_ttl() {
        let sink = Arc::new(Recorder::default());
        let mut w = watcher(&sink, Duration::from_secs(2));

        w.start().await;
        w.submit(after(Duration::from_millis(500), 1));
        w.submit(fail_after(Duration::from_secs(1), "late but in time"));
        w.submit(after(Duration::from_secs(3), 3));
        w.submit(fail_after(Duration::from_secs(30), "never seen"));
        w.stop().await.unwrap();

        assert_eq!(sink.values(), vec![1]);
        let errors = sink.errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].inner(), Some(&ValueError("late but in time")));
        assert!(w.is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_stop_is_a_noop() {
        let sink = Arc::new(Recorder::default());
        let mut w = watcher(&sink, Duration::from_secs(10));

        w.start().await;
        w.submit(after(Duration::from_millis(1), 7));
        w.stop().await.unwrap();
        w.stop().await.unwrap();

        assert_eq!(sink.values(), vec![7]);
        assert!(w.is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_on_fresh_watcher_records_nothing() {
        let sink = Arc::new(Recorder::default());
        let mut w = watcher(&sink, Duration::from_secs(10));
        let mut rx = w.events();

        w.start().await;

        assert!(w.is_idle());
        assert!(sink.values().is_empty());
        assert_eq!(sink.error_count(), 0);
        assert_eq!(drain_kinds(&mut rx), vec![EventKind::WatcherStarted]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_sweeps_previously_submitted_work() {
        let sink = Arc::new(Recorder::default());
        let mut w = watcher(&sink, Duration::from_secs(10));
        let mut rx = w.events();

        w.submit(after(Duration::from_secs(1), 1));
        w.submit(after(Duration::from_secs(2), 2));
        assert_eq!(w.active_len(), 2);

        w.start().await;
        assert!(w.is_idle());
        assert_eq!(
            drain_kinds(&mut rx),
            vec![
                EventKind::TaskSubmitted,
                EventKind::TaskSubmitted,
                EventKind::TaskSwept,
                EventKind::TaskSwept,
                EventKind::WatcherStarted,
            ]
        );

        w.submit(after(Duration::from_millis(10), 3));
        w.stop().await.unwrap();
        assert_eq!(sink.values(), vec![3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_panic_is_recorded_as_error() {
        async fn explode() -> Result<i64, ValueError> {
            panic!("worker bug")
        }

        let sink = Arc::new(Recorder::default());
        let mut w = watcher(&sink, Duration::from_secs(1));

        w.start().await;
        w.submit(explode());
        w.stop().await.unwrap();

        assert!(sink.values().is_empty());
        let errors = sink.errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], TaskError::Panicked { message } if message == "worker bug"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_ttl_reports_only_finished_work() {
        let sink = Arc::new(Recorder::default());
        let mut w = watcher(&sink, Duration::ZERO);

        w.start().await;
        w.submit(async { Ok(1) });
        w.submit(after(Duration::from_secs(1), 2));
        // let the ready task run to completion
        sleep(Duration::from_millis(1)).await;
        w.stop().await.unwrap();

        assert_eq!(sink.values(), vec![1]);
        assert!(w.is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sink_failure_propagates_out_of_stop() {
        let mut w: Watcher<i64, ValueError> =
            Watcher::new(Arc::new(Broken), Duration::from_secs(1));

        w.start().await;
        let done = w.spawn(after(Duration::from_millis(10), 1));
        let slow = w.spawn(after(Duration::from_secs(60), 2));

        let err = w.stop().await.unwrap_err();
        assert!(matches!(err, RuntimeError::Registration(_)));
        assert_eq!(err.as_label(), "runtime_registration_failed");

        // the reported task is gone; the unfinished one is still tracked
        assert!(!w.contains(done));
        assert!(w.contains(slow));

        // nothing left to report: the retry only cancels
        w.stop().await.unwrap();
        assert!(w.is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_token_is_cancelled_by_stop_sweep() {
        let sink = Arc::new(Recorder::default());
        let mut w = watcher(&sink, Duration::from_millis(100));

        w.start().await;
        let token = w.token();
        w.spawn_with(|ctx| async move {
            ctx.cancelled().await;
            Ok(0)
        });
        w.stop().await.unwrap();

        assert!(token.is_cancelled());
        assert!(!w.token().is_cancelled());
        assert!(sink.values().is_empty());
        assert!(w.is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_event_sequence() {
        let sink = Arc::new(Recorder::default());
        let mut w = watcher(&sink, Duration::from_secs(1));
        let mut rx = w.events();

        w.start().await;
        w.submit(after(Duration::from_millis(10), 1));
        w.submit(after(Duration::from_secs(10), 2));
        w.stop().await.unwrap();

        assert_eq!(
            drain_kinds(&mut rx),
            vec![
                EventKind::WatcherStarted,
                EventKind::TaskSubmitted,
                EventKind::TaskSubmitted,
                EventKind::StopRequested,
                EventKind::TtlExceeded,
                EventKind::TaskCompleted,
                EventKind::TaskCancelled,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_works_through_the_trait() {
        async fn batch<W>(w: &mut W) -> Result<(), RuntimeError>
        where
            W: Watch<Output = i64, Error = ValueError>,
        {
            w.start().await;
            for n in 1..=3 {
                w.submit(Box::pin(async move { Ok(n) }));
            }
            w.submit(Box::pin(async { Err(ValueError("bad")) }));
            w.stop().await
        }

        let sink = Arc::new(Recorder::default());
        let mut w = watcher(&sink, Duration::from_secs(1));
        batch(&mut w).await.unwrap();

        let got: HashSet<i64> = sink.values().into_iter().collect();
        assert_eq!(got, HashSet::from([1, 2, 3]));
        assert_eq!(sink.error_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_introspection_reports_tracked_ids_and_sink() {
        let sink = Arc::new(Recorder::default());
        let mut w = watcher(&sink, Duration::from_secs(1));

        w.start().await;
        let a = w.spawn(after(Duration::from_secs(5), 1));
        let b = w.spawn(after(Duration::from_secs(5), 2));

        let ids: HashSet<TaskId> = w.active_ids().into_iter().collect();
        assert_eq!(ids, HashSet::from([a, b]));

        w.registrator().register_value(5).unwrap();
        assert_eq!(sink.values(), vec![5]);

        w.stop().await.unwrap();
        assert!(w.active_ids().is_empty());
        assert_eq!(sink.values(), vec![5]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_after_signal_drains_and_reports() {
        let sink = Arc::new(Recorder::default());
        let mut w = watcher(&sink, Duration::from_secs(10));

        w.start().await;
        w.submit(after(Duration::from_millis(10), 4));
        w.stop_after(async { Ok(()) }).await.unwrap();

        assert_eq!(sink.values(), vec![4]);
        assert!(w.is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_after_failed_signal_stops_nothing() {
        let sink = Arc::new(Recorder::default());
        let mut w = watcher(&sink, Duration::from_secs(10));

        w.start().await;
        let id = w.spawn(after(Duration::from_millis(10), 4));
        let err = w
            .stop_after(async { Err(std::io::Error::other("no signal driver")) })
            .await
            .unwrap_err();

        assert!(matches!(err, RuntimeError::Signal(_)));
        assert_eq!(err.as_label(), "runtime_signal_failed");
        assert!(w.contains(id));
        assert!(sink.values().is_empty());

        w.stop().await.unwrap();
        assert_eq!(sink.values(), vec![4]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stop_on_signal_reacts_to_sigterm() {
        use tokio::signal::unix::{SignalKind, signal};

        // keeps SIGTERM routed to tokio instead of the default action
        let _sigterm = signal(SignalKind::terminate()).unwrap();

        let sink = Arc::new(Recorder::default());
        let mut w = watcher(&sink, Duration::from_secs(10));

        w.start().await;
        w.submit(after(Duration::from_millis(10), 8));

        tokio::spawn(async {
            sleep(Duration::from_millis(50)).await;
            let status = std::process::Command::new("kill")
                .args(["-TERM", &std::process::id().to_string()])
                .status()
                .unwrap();
            assert!(status.success());
        });

        tokio::time::timeout(Duration::from_secs(5), w.stop_on_signal())
            .await
            .expect("no SIGTERM observed")
            .unwrap();

        assert_eq!(sink.values(), vec![8]);
        assert!(w.is_idle());
    }

    struct Kinds(Mutex<Vec<EventKind>>);

    #[async_trait]
    impl Subscribe for Kinds {
        async fn on_event(&self, event: &Event) {
            self.0.lock().unwrap().push(event.kind);
        }
        fn name(&self) -> &'static str {
            "kinds"
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_receive_lifecycle_events() {
        let sink = Arc::new(Recorder::default());
        let kinds = Arc::new(Kinds(Mutex::new(Vec::new())));
        let mut w: Watcher<i64, ValueError> = Watcher::builder(sink.clone())
            .with_config(Config::with_ttl(Duration::from_secs(1)))
            .with_subscribers(vec![kinds.clone() as Arc<dyn Subscribe>])
            .build();
        assert_eq!(w.config().ttl, Duration::from_secs(1));

        w.start().await;
        w.submit(after(Duration::from_millis(5), 9));
        w.stop().await.unwrap();
        // let the listener and the subscriber worker catch up
        sleep(Duration::from_millis(1)).await;

        assert_eq!(
            *kinds.0.lock().unwrap(),
            vec![
                EventKind::WatcherStarted,
                EventKind::TaskSubmitted,
                EventKind::StopRequested,
                EventKind::DrainedWithinTtl,
                EventKind::TaskCompleted,
            ]
        );
        assert_eq!(sink.values(), vec![9]);
    }
}
