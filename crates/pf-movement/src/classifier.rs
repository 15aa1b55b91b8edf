//! Edge cost → environment action.
//!
//! [`classify`] is the pure half: it maps a cost to a [`MoveType`] using the
//! fixed thresholds in `pf-core`.  [`execute_move`] is the effectful half: it
//! performs the action a move type stands for through the capabilities and
//! reports whether it believes the action succeeded.
//!
//! | Move type      | Action                                                 |
//! |----------------|--------------------------------------------------------|
//! | `Step`         | `mover.move_to`                                        |
//! | `ItemAssisted` | `inventory.use_item_for_move`, then `mover.move_to`    |
//! | `Teleport`     | `inventory.use_item_for_move` only                     |

use tracing::{debug, warn};

use pf_core::{MoveType, Position};

use crate::Capabilities;

/// Map an edge cost to the move type that realizes it.
#[inline]
pub fn classify(cost: u32) -> MoveType {
    MoveType::of_cost(cost)
}

/// Realize a move of `kind` from `source` to `destination`.
///
/// Returns `false` if any part of the action fails; never panics.  For
/// `ItemAssisted` the mover is only called once the item has been used.
pub fn execute_move(
    kind:        MoveType,
    source:      Position,
    destination: Position,
    caps:        &Capabilities,
) -> bool {
    debug!(%kind, from = %source, to = %destination, "executing move");

    let ok = match kind {
        MoveType::Step => caps.mover.move_to(source, destination),
        MoveType::ItemAssisted => {
            caps.inventory.use_item_for_move(kind, source, destination)
                && caps.mover.move_to(source, destination)
        }
        MoveType::Teleport => caps.inventory.use_item_for_move(kind, source, destination),
    };

    if !ok {
        warn!(%kind, from = %source, to = %destination, "move failed");
    }
    ok
}
