//! `pf-path` — the walk a follower executes.
//!
//! Paths are produced by an external planner; this crate only represents and
//! validates them.  Nothing here searches a graph.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`path`]    | `Node`, `Edge`, `Path` (walk invariant checked on build)    |
//! | [`builder`] | `PathBuilder`: incremental construction by node id          |
//! | [`loader`]  | `load_path_csv`, `load_path_reader`                         |
//! | [`error`]   | `PathError`, `PathResult<T>`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Node` and `Edge`.      |

pub mod builder;
pub mod error;
pub mod loader;
pub mod path;


pub use builder::PathBuilder;
pub use error::{PathError, PathResult};
pub use loader::{load_path_csv, load_path_reader};
pub use path::{Edge, Node, Path};
