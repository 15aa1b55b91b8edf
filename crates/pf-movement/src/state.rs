//! Task lifecycle state and the shared cells a follower publishes it through.
//!
//! ```text
//! NotStarted ──start──▶ Running ──loop exit──▶ Completed
//!     │                    │
//!     │                    └──loop exit with cancel flag──▶ Canceled
//!     └──sentinel / spawn failure / join before start──────▶ Canceled
//! ```
//!
//! Terminal states never change.  The cancel flag and the state are atomics
//! because the creator polls them from another thread while the worker runs.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};
use std::thread::Thread;
use std::time::Duration;

use pf_core::{EdgeId, MoveType, Position, TaskId};

// ── TaskState ─────────────────────────────────────────────────────────────────

/// Where a task is in its lifecycle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum TaskState {
    NotStarted = 0,
    Running    = 1,
    Canceled   = 2,
    Completed  = 3,
}

impl TaskState {
    fn from_u8(raw: u8) -> TaskState {
        match raw {
            0 => TaskState::NotStarted,
            1 => TaskState::Running,
            2 => TaskState::Canceled,
            3 => TaskState::Completed,
            other => unreachable!("invalid task state {other}"),
        }
    }

    /// `true` for `Canceled` and `Completed`.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskState::Canceled | TaskState::Completed)
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TaskState::NotStarted => "not started",
            TaskState::Running    => "running",
            TaskState::Canceled   => "canceled",
            TaskState::Completed  => "completed",
        })
    }
}

// ── Outcome types ─────────────────────────────────────────────────────────────

/// Why a task ended up `Canceled`.
///
/// Diagnostics only: every reason reports `was_canceled() == true`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CancelReason {
    /// `cancel()` was called, or the task was abandoned before it ran.
    Requested,
    /// The agent was not at the edge's source when the edge came up.
    Desynchronized {
        edge:     EdgeId,
        expected: Position,
        actual:   Position,
    },
    /// The environment action for the edge reported failure.
    MoveFailed { edge: EdgeId, kind: MoveType },
    /// The readiness wait exceeded `max_ready_wait_ms`.
    ReadinessTimeout { edge: EdgeId, waited: Duration },
    /// The worker thread could not be spawned.
    SpawnFailed,
    /// The worker thread panicked.
    WorkerPanicked,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelReason::Requested => f.write_str("cancellation requested"),
            CancelReason::Desynchronized { edge, expected, actual } => {
                write!(f, "desynchronized at {edge}: expected {expected}, found {actual}")
            }
            CancelReason::MoveFailed { edge, kind } => write!(f, "{kind} move failed at {edge}"),
            CancelReason::ReadinessTimeout { edge, waited } => {
                write!(f, "environment not ready for {edge} after {waited:?}")
            }
            CancelReason::SpawnFailed    => f.write_str("worker thread could not be spawned"),
            CancelReason::WorkerPanicked => f.write_str("worker thread panicked"),
        }
    }
}

/// How a terminated task ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FollowOutcome {
    Completed,
    Canceled(CancelReason),
}

/// Summary returned by [`PathFollower::join`][crate::PathFollower::join].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FollowReport {
    pub task:            TaskId,
    /// Edges whose move was executed successfully.
    pub edges_processed: usize,
    pub outcome:         FollowOutcome,
}

impl FollowReport {
    #[inline]
    pub fn was_canceled(&self) -> bool {
        matches!(self.outcome, FollowOutcome::Canceled(_))
    }
}

// ── TaskShared ────────────────────────────────────────────────────────────────

/// State shared between a follower, its handles, and its worker thread.
pub(crate) struct TaskShared {
    pub(crate) id: TaskId,
    state: AtomicU8,
    cancel_requested: AtomicBool,
    edges_processed: AtomicUsize,
    /// First cancel reason recorded wins.  Also serializes `cancel_with`
    /// against `terminate`.
    reason: Mutex<Option<CancelReason>>,
    /// Set by the worker on startup so `cancel()` can wake it.
    worker: OnceLock<Thread>,
}

impl TaskShared {
    pub(crate) fn new(id: TaskId) -> Self {
        Self {
            id,
            state: AtomicU8::new(TaskState::NotStarted as u8),
            cancel_requested: AtomicBool::new(false),
            edges_processed: AtomicUsize::new(0),
            reason: Mutex::new(None),
            worker: OnceLock::new(),
        }
    }

    /// A task that is already canceled and terminated.
    pub(crate) fn terminated(id: TaskId) -> Self {
        let shared = Self::new(id);
        shared.cancel_with(CancelReason::Requested);
        shared.terminate(TaskState::NotStarted);
        shared
    }

    #[inline]
    pub(crate) fn state(&self) -> TaskState {
        TaskState::from_u8(self.state.load(Ordering::Acquire))
    }

    #[inline]
    pub(crate) fn cancel_requested(&self) -> bool {
        self.cancel_requested.load(Ordering::Acquire)
    }

    #[inline]
    pub(crate) fn edges_processed(&self) -> usize {
        self.edges_processed.load(Ordering::Acquire)
    }

    pub(crate) fn record_edge(&self) {
        self.edges_processed.fetch_add(1, Ordering::AcqRel);
    }

    /// Set the cancel flag and wake the worker.  No-op once terminal, so a
    /// completed task never reports a pending cancellation.
    pub(crate) fn cancel_with(&self, reason: CancelReason) {
        {
            let mut slot = self.reason.lock().unwrap_or_else(PoisonError::into_inner);
            if self.state().is_terminal() {
                return;
            }
            if slot.is_none() {
                *slot = Some(reason);
            }
            self.cancel_requested.store(true, Ordering::Release);
        }
        if let Some(worker) = self.worker.get() {
            worker.unpark();
        }
    }

    pub(crate) fn register_worker(&self, thread: Thread) {
        // Only the single worker ever registers.
        let _ = self.worker.set(thread);
    }

    /// Atomically leave `from` for `Canceled` (flag set) or `Completed`.
    ///
    /// Returns the state the task is in afterwards; if the task was not in
    /// `from`, nothing changes and the current state is returned.
    pub(crate) fn terminate(&self, from: TaskState) -> TaskState {
        let _slot = self.reason.lock().unwrap_or_else(PoisonError::into_inner);
        let to = if self.cancel_requested() { TaskState::Canceled } else { TaskState::Completed };
        match self.state.compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire) {
            Ok(_) => to,
            Err(actual) => TaskState::from_u8(actual),
        }
    }

    /// `NotStarted → Running`.  Returns `false` if the task was not fresh.
    pub(crate) fn begin(&self) -> bool {
        self.state
            .compare_exchange(
                TaskState::NotStarted as u8,
                TaskState::Running as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// The outcome, once terminal.
    pub(crate) fn outcome(&self) -> Option<FollowOutcome> {
        match self.state() {
            TaskState::Completed => Some(FollowOutcome::Completed),
            TaskState::Canceled => {
                let reason = self
                    .reason
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .clone()
                    .unwrap_or(CancelReason::Requested);
                Some(FollowOutcome::Canceled(reason))
            }
            TaskState::NotStarted | TaskState::Running => None,
        }
    }
}
