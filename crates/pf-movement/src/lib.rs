//! `pf-movement` — drives an agent along a precomputed path.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                       |
//! |----------------|----------------------------------------------------------------|
//! | [`capability`] | `Locator`, `Mover`, `Inventory` traits; `Capabilities` bundle  |
//! | [`classifier`] | `classify`, `execute_move`: edge cost → environment action     |
//! | [`state`]      | `TaskState`, `CancelReason`, `FollowOutcome`, `FollowReport`   |
//! | [`follower`]   | `PathFollower` (the task) and `TaskHandle` (its observer)      |
//! | [`error`]      | `MovementError`, `MovementResult<T>`                           |
//!
//! # Execution model
//!
//! A [`PathFollower`] owns one [`Path`][pf_path::Path] and, once started,
//! walks it on its own worker thread:
//!
//! 1. Wait (polling) until the mover allows a move **and** the locator
//!    reports a position different from the one observed before the last
//!    move, so the environment has registered that move.
//! 2. Re-read the position; if it is not the edge's source, the plan is
//!    stale and the task cancels itself without touching the edge.
//! 3. Classify the edge cost and execute the matching action.  A failed
//!    action cancels the task.
//!
//! The creator talks to the task only through `cancel`, `has_terminated` and
//! `was_canceled` (plus `join` for the final report).  Failures are reported
//! as cancellation, never as errors crossing the thread boundary.

pub mod capability;
pub mod classifier;
pub mod error;
pub mod follower;
pub mod state;


pub use capability::{Capabilities, Inventory, Locator, Mover};
pub use classifier::{classify, execute_move};
pub use error::{MovementError, MovementResult};
pub use follower::{PathFollower, TaskHandle};
pub use state::{CancelReason, FollowOutcome, FollowReport, TaskState};
