//! Classification of edge costs into move types.
//!
//! Edge costs are unsigned integers, and the thresholds below are inclusive
//! upper bounds, so the mapping is total: every `u32` lands in exactly one
//! class and a boundary value always belongs to the cheaper class.
//!
//! | Cost range                          | Move type      |
//! |-------------------------------------|----------------|
//! | `0 ..= STEP_COST_MAX`               | `Step`         |
//! | `STEP_COST_MAX+1 ..= ITEM_COST_MAX` | `ItemAssisted` |
//! | `ITEM_COST_MAX+1 ..= u32::MAX`      | `Teleport`     |

/// Highest cost still realized as a plain step.
pub const STEP_COST_MAX: u32 = 10;

/// Highest cost still realized as an item-assisted move.
pub const ITEM_COST_MAX: u32 = 100;

/// How an edge is carried out in the environment.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveType {
    /// A single walk to a neighbouring cell.
    Step,
    /// An inventory item opens the passage, then the agent walks through.
    ItemAssisted,
    /// An inventory item relocates the agent on its own.
    Teleport,
}

impl MoveType {
    /// All variants, cheapest first.
    pub const ALL: [MoveType; 3] = [MoveType::Step, MoveType::ItemAssisted, MoveType::Teleport];

    /// Map an edge cost to its move type.
    #[inline]
    pub fn of_cost(cost: u32) -> MoveType {
        if cost <= STEP_COST_MAX {
            MoveType::Step
        } else if cost <= ITEM_COST_MAX {
            MoveType::ItemAssisted
        } else {
            MoveType::Teleport
        }
    }

    /// `true` if realizing this move consumes or uses an inventory item.
    #[inline]
    pub fn needs_item(self) -> bool {
        !matches!(self, MoveType::Step)
    }

    /// Short label, useful for logs and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            MoveType::Step         => "step",
            MoveType::ItemAssisted => "item",
            MoveType::Teleport     => "teleport",
        }
    }
}

impl std::fmt::Display for MoveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
