//! `pf-core` — foundational types for the `rust_pf` path follower.
//!
//! This crate is a dependency of every other `pf-*` crate.  It intentionally
//! has no `pf-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `EdgeId`, `TaskId`                          |
//! | [`geo`]         | `Position`: integer grid coordinate                   |
//! | [`move_type`]   | `MoveType` enum and its cost thresholds               |
//! | [`config`]      | `FollowerConfig`, `WaitConfig`                        |
//! | [`error`]       | `PfError`, `PfResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod move_type;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{FollowerConfig, WaitConfig};
pub use error::{PfError, PfResult};
pub use geo::Position;
pub use ids::{EdgeId, NodeId, TaskId};
pub use move_type::{ITEM_COST_MAX, MoveType, STEP_COST_MAX};
