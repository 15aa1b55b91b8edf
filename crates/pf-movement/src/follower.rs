//! The path-following task.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info, info_span, trace, warn};

use pf_core::{FollowerConfig, Position, TaskId};
use pf_path::{Edge, Path};

use crate::state::TaskShared;
use crate::{
    CancelReason, Capabilities, FollowOutcome, FollowReport, MovementError, MovementResult,
    TaskState, classify, execute_move,
};

/// Source of process-unique task ids.  `TaskId::INVALID` is reserved for the
/// pre-canceled sentinel.
static NEXT_TASK_ID: AtomicU32 = AtomicU32::new(0);

/// Granularity of [`TaskHandle::wait_for_termination`] polling.
const TERMINATION_POLL: Duration = Duration::from_millis(10);

// ── PathFollower ──────────────────────────────────────────────────────────────

/// Moves an agent along one [`Path`], on its own worker thread.
///
/// Construct with [`new`](Self::new), call [`start`](Self::start) exactly
/// once, then poll [`has_terminated`](Self::has_terminated) /
/// [`was_canceled`](Self::was_canceled) or block on [`join`](Self::join).
/// Hand out a [`TaskHandle`] to let other threads observe or cancel the task.
///
/// # Failure as cancellation
///
/// A desynchronized position, a failed move, or an exceeded readiness wait
/// all cancel the task.  From the outside they look exactly like an explicit
/// [`cancel`](Self::cancel); [`join`](Self::join) reports the specific
/// [`CancelReason`] for diagnostics.
pub struct PathFollower {
    shared: Arc<TaskShared>,
    /// Everything the worker needs; taken by `start`.
    job:    Option<Job>,
    worker: Option<JoinHandle<()>>,
}

struct Job {
    path:   Path,
    caps:   Capabilities,
    config: FollowerConfig,
}

impl PathFollower {
    /// Create an unstarted task with the default [`FollowerConfig`].
    pub fn new(path: Path, caps: Capabilities) -> Self {
        Self::build(path, caps, FollowerConfig::default())
    }

    /// Create an unstarted task with an explicit configuration.
    pub fn with_config(path: Path, caps: Capabilities, config: FollowerConfig) -> MovementResult<Self> {
        config.validate()?;
        Ok(Self::build(path, caps, config))
    }

    fn build(path: Path, caps: Capabilities, config: FollowerConfig) -> Self {
        let id = next_task_id(&NEXT_TASK_ID);
        Self {
            shared: Arc::new(TaskShared::new(id)),
            job:    Some(Job { path, caps, config }),
            worker: None,
        }
    }

    /// A task that is already canceled and terminated, with no path and no
    /// thread behind it.
    ///
    /// Use it as a "nothing to do" default wherever a finished task is
    /// expected.  Every call returns an equivalent value; starting it fails
    /// with [`MovementError::AlreadyStarted`].
    pub fn canceled() -> Self {
        Self {
            shared: Arc::new(TaskShared::terminated(TaskId::INVALID)),
            job:    None,
            worker: None,
        }
    }

    /// Launch the worker thread.
    ///
    /// # Errors
    ///
    /// - [`MovementError::AlreadyStarted`] on a second call or on the
    ///   sentinel.
    /// - [`MovementError::Spawn`] if the OS refuses a new thread; the task is
    ///   then terminated and canceled.
    pub fn start(&mut self) -> MovementResult<()> {
        let id = self.shared.id;
        let job = match self.job.take() {
            Some(job) if self.shared.begin() => job,
            _ => return Err(MovementError::AlreadyStarted(id)),
        };

        let name = format!("{}-{}", job.config.thread_name_prefix, id.0);
        let shared = Arc::clone(&self.shared);
        match thread::Builder::new().name(name).spawn(move || run(shared, job)) {
            Ok(handle) => {
                self.worker = Some(handle);
                Ok(())
            }
            Err(e) => {
                warn!(task = %id, error = %e, "could not spawn path follower");
                self.shared.cancel_with(CancelReason::SpawnFailed);
                self.shared.terminate(TaskState::Running);
                Err(MovementError::Spawn(e))
            }
        }
    }

    /// Request cancellation.  Idempotent; a no-op once terminated.
    ///
    /// An in-flight environment action is not interrupted; the worker stops
    /// before the next edge.  Calling this before [`start`](Self::start)
    /// makes the task terminate without processing any edge.
    pub fn cancel(&self) {
        self.shared.cancel_with(CancelReason::Requested);
    }

    /// `true` once the worker loop has exited, for any reason.  Never flips
    /// back to `false`.
    pub fn has_terminated(&self) -> bool {
        self.shared.state().is_terminal()
    }

    /// `true` iff the task terminated through cancellation (explicit or
    /// failure-triggered).  `false` while still running.
    pub fn was_canceled(&self) -> bool {
        self.shared.state() == TaskState::Canceled
    }

    /// Whether cancellation has been requested, terminated or not.
    pub fn cancel_requested(&self) -> bool {
        self.shared.cancel_requested()
    }

    pub fn state(&self) -> TaskState {
        self.shared.state()
    }

    pub fn id(&self) -> TaskId {
        self.shared.id
    }

    /// Edges whose move has been executed successfully so far.
    pub fn edges_processed(&self) -> usize {
        self.shared.edges_processed()
    }

    /// A clonable, thread-safe observer of this task.
    pub fn handle(&self) -> TaskHandle {
        TaskHandle { shared: Arc::clone(&self.shared) }
    }

    /// Wait for the worker to finish and return the final report.
    ///
    /// Joining a task that was never started cancels it first, so this never
    /// blocks forever on an idle task.
    ///
    /// # Errors
    ///
    /// [`MovementError::WorkerPanicked`] if the worker panicked; the task is
    /// still left terminated and canceled.
    pub fn join(mut self) -> MovementResult<FollowReport> {
        match self.worker.take() {
            Some(worker) => {
                if worker.join().is_err() {
                    self.shared.cancel_with(CancelReason::WorkerPanicked);
                    self.shared.terminate(TaskState::Running);
                    return Err(MovementError::WorkerPanicked(self.shared.id));
                }
            }
            None => {
                self.shared.cancel_with(CancelReason::Requested);
                self.shared.terminate(TaskState::NotStarted);
            }
        }
        Ok(report(&self.shared))
    }
}

impl std::fmt::Debug for PathFollower {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathFollower")
            .field("id", &self.shared.id)
            .field("state", &self.shared.state())
            .field("edges_processed", &self.shared.edges_processed())
            .finish()
    }
}

// ── TaskHandle ────────────────────────────────────────────────────────────────

/// Shared view of a running [`PathFollower`].
///
/// Cheap to clone and `Send + Sync`; every clone observes and cancels the
/// same task.
#[derive(Clone)]
pub struct TaskHandle {
    shared: Arc<TaskShared>,
}

impl TaskHandle {
    pub fn cancel(&self) {
        self.shared.cancel_with(CancelReason::Requested);
    }

    pub fn has_terminated(&self) -> bool {
        self.shared.state().is_terminal()
    }

    pub fn was_canceled(&self) -> bool {
        self.shared.state() == TaskState::Canceled
    }

    pub fn state(&self) -> TaskState {
        self.shared.state()
    }

    pub fn id(&self) -> TaskId {
        self.shared.id
    }

    pub fn edges_processed(&self) -> usize {
        self.shared.edges_processed()
    }

    /// Poll until the task terminates or `timeout` elapses.  Returns whether
    /// it terminated.  Does not cancel on expiry; that is the caller's call.
    pub fn wait_for_termination(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.has_terminated() {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            thread::sleep(TERMINATION_POLL.min(deadline - now));
        }
    }
}

impl std::fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskHandle")
            .field("id", &self.shared.id)
            .field("state", &self.shared.state())
            .finish()
    }
}

/// Take the next id from `counter`, skipping `TaskId::INVALID` on wrap.
pub(crate) fn next_task_id(counter: &AtomicU32) -> TaskId {
    loop {
        let id = TaskId(counter.fetch_add(1, Ordering::Relaxed));
        if id != TaskId::INVALID {
            return id;
        }
    }
}

// ── Worker ────────────────────────────────────────────────────────────────────

/// Terminates the task as canceled if the worker unwinds, so pollers never
/// see a dead worker stuck in `Running`.
struct PanicGuard<'a>(&'a TaskShared);

impl Drop for PanicGuard<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.cancel_with(CancelReason::WorkerPanicked);
            self.0.terminate(TaskState::Running);
        }
    }
}

fn report(shared: &TaskShared) -> FollowReport {
    let outcome = shared.outcome();
    debug_assert!(outcome.is_some(), "report requested for a live task");
    FollowReport {
        task:            shared.id,
        edges_processed: shared.edges_processed(),
        outcome:         outcome.unwrap_or(FollowOutcome::Canceled(CancelReason::Requested)),
    }
}

fn run(shared: Arc<TaskShared>, job: Job) {
    shared.register_worker(thread::current());
    let _guard = PanicGuard(&shared);

    let span = info_span!("follow", task = %shared.id, edges = job.path.len());
    let _enter = span.enter();
    info!("path follower started");

    walk(&shared, &job);

    match shared.terminate(TaskState::Running) {
        TaskState::Completed => {
            info!(edges_processed = shared.edges_processed(), "path completed");
        }
        _ => {
            let reason = match shared.outcome() {
                Some(FollowOutcome::Canceled(reason)) => reason,
                _ => CancelReason::Requested,
            };
            info!(edges_processed = shared.edges_processed(), %reason, "path follower canceled");
        }
    }
}

/// Walk every edge in order until the path is exhausted or the task is
/// canceled.  Failures are recorded on `shared`, never returned.
fn walk(shared: &TaskShared, job: &Job) {
    let mut last_observed: Option<Position> = None;

    for edge in job.path.iter() {
        if shared.cancel_requested() {
            return;
        }

        match wait_until_ready(shared, job, last_observed) {
            Readiness::Ready => {}
            Readiness::Canceled => return,
            Readiness::TimedOut(waited) => {
                warn!(edge = %edge.id, ?waited, "environment never became ready");
                shared.cancel_with(CancelReason::ReadinessTimeout { edge: edge.id, waited });
                return;
            }
        }

        let current = job.caps.locator.current_position();
        last_observed = Some(current);
        if current != edge.source.pos {
            warn!(
                edge = %edge.id,
                expected = %edge.source.pos,
                actual = %current,
                "agent is not where the path expects it"
            );
            shared.cancel_with(CancelReason::Desynchronized {
                edge:     edge.id,
                expected: edge.source.pos,
                actual:   current,
            });
            return;
        }

        if !step(shared, job, edge, current) {
            return;
        }
    }
}

/// Execute one validated edge.  Returns `false` if the task was canceled.
fn step(shared: &TaskShared, job: &Job, edge: &Edge, source: Position) -> bool {
    let kind = classify(edge.cost);
    debug!(
        edge = %edge.id,
        from = %edge.source.name,
        to = %edge.destination.name,
        cost = edge.cost,
        %kind,
        "following edge"
    );
    if !execute_move(kind, source, edge.destination.pos, &job.caps) {
        shared.cancel_with(CancelReason::MoveFailed { edge: edge.id, kind });
        return false;
    }
    shared.record_edge();
    true
}

enum Readiness {
    Ready,
    Canceled,
    TimedOut(Duration),
}

/// Block until the mover allows a move and the locator reports a position
/// other than `last_observed`.
///
/// The cancel flag is checked on every tick, and `cancel()` unparks the
/// worker, so cancellation is noticed immediately and never later than one
/// poll interval.
fn wait_until_ready(shared: &TaskShared, job: &Job, last_observed: Option<Position>) -> Readiness {
    let poll = job.config.poll_interval();
    let max_wait = job.config.max_ready_wait();
    let started = Instant::now();

    loop {
        if shared.cancel_requested() {
            return Readiness::Canceled;
        }
        if job.caps.mover.can_move()
            && Some(job.caps.locator.current_position()) != last_observed
        {
            return Readiness::Ready;
        }

        let waited = started.elapsed();
        let nap = match max_wait {
            Some(max) if waited >= max => return Readiness::TimedOut(waited),
            Some(max) => poll.min(max - waited),
            None => poll,
        };

        trace!(?waited, "environment not ready");
        let parked_at = Instant::now();
        thread::park_timeout(nap);
        if parked_at.elapsed() < nap && !shared.cancel_requested() {
            debug!("woke before the poll interval; re-checking readiness");
        }
    }
}
