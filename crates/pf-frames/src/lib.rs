//! `pf-frames` — synchronization with a frame-based remote session.
//!
//! The session shows its content in named display regions (frames).  Before
//! reading or acting on a region the caller must let queued events drain,
//! switch to the region, and wait until its content is present.  Locators
//! and movers built on top of a session use this crate to stay consistent.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`wait`]    | `wait_until`: bounded retry with exponential backoff       |
//! | [`frame`]   | `Frame` enum and its name / readiness-selector table       |
//! | [`manager`] | `FrameDriver` trait, `FrameManager`                        |
//! | [`error`]   | `SyncError`, `SyncResult<T>`                               |

pub mod error;
pub mod frame;
pub mod manager;
pub mod wait;

#[cfg(test)]
mod tests;

pub use error::{SyncError, SyncResult};
pub use frame::Frame;
pub use manager::{FrameDriver, FrameManager};
pub use wait::wait_until;
