//! The environment as seen by a follower.
//!
//! The follower never talks to the environment directly; it goes through
//! these three capabilities.  Implementations usually wrap a remote session
//! and may block on network I/O, so every method can be slow.
//!
//! # Thread safety
//!
//! All traits require `Send + Sync`: the follower shares them with its
//! worker thread through `Arc`.

use std::sync::Arc;

use pf_core::{MoveType, Position};

/// Reports where the agent currently is.
pub trait Locator: Send + Sync {
    /// Best-effort current position.  May lag the environment by one poll.
    fn current_position(&self) -> Position;
}

/// Performs single-step moves.
pub trait Mover: Send + Sync {
    /// Whether a move is permitted right now.  Must not have side effects.
    fn can_move(&self) -> bool;

    /// Walk from `source` to `destination`.
    ///
    /// Returns `false` on failure.  The environment may have changed even
    /// when `false` is returned; callers treat the move as possibly partial.
    fn move_to(&self, source: Position, destination: Position) -> bool;
}

/// Uses inventory items on behalf of a move.
pub trait Inventory: Send + Sync {
    /// Use whatever item realizes (`Teleport`) or enables (`ItemAssisted`)
    /// the move from `source` to `destination`.  Returns `false` on failure.
    fn use_item_for_move(&self, kind: MoveType, source: Position, destination: Position) -> bool;
}

/// The three capabilities a follower needs, bundled for cheap cloning.
#[derive(Clone)]
pub struct Capabilities {
    pub locator:   Arc<dyn Locator>,
    pub mover:     Arc<dyn Mover>,
    pub inventory: Arc<dyn Inventory>,
}

impl Capabilities {
    pub fn new(
        locator:   Arc<dyn Locator>,
        mover:     Arc<dyn Mover>,
        inventory: Arc<dyn Inventory>,
    ) -> Self {
        Self { locator, mover, inventory }
    }

    /// Use one environment object for all three capabilities.
    pub fn from_shared<E>(env: Arc<E>) -> Self
    where
        E: Locator + Mover + Inventory + 'static,
    {
        Self {
            locator:   env.clone(),
            mover:     env.clone(),
            inventory: env,
        }
    }
}
