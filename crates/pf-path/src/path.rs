//! Nodes, edges, and the validated walk that connects them.

use pf_core::{EdgeId, MoveType, NodeId, Position};

use crate::{PathError, PathResult};

// ── Node ──────────────────────────────────────────────────────────────────────

/// A named vertex of the movement graph, pinned to one position.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id:   NodeId,
    pub name: String,
    pub pos:  Position,
}

impl Node {
    pub fn new(id: NodeId, name: impl Into<String>, pos: Position) -> Self {
        Self { id, name: name.into(), pos }
    }
}

// ── Edge ──────────────────────────────────────────────────────────────────────

/// A directed, weighted hop from `source` to `destination`.
///
/// The cost only selects how the hop is realized (see [`MoveType`]); the
/// follower never sums or compares costs.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub id:          EdgeId,
    pub source:      Node,
    pub destination: Node,
    pub cost:        u32,
}

impl Edge {
    /// The move type this edge's cost classifies to.
    #[inline]
    pub fn move_type(&self) -> MoveType {
        MoveType::of_cost(self.cost)
    }
}

// ── Path ──────────────────────────────────────────────────────────────────────

/// An ordered walk: each edge starts where the previous one ended.
///
/// Immutable once built.  Construct with [`Path::new`] or
/// [`PathBuilder`][crate::PathBuilder]; both enforce the walk invariant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    edges: Vec<Edge>,
}

impl Path {
    /// Validate `edges` as a walk and wrap them.
    ///
    /// An empty edge list is a valid (trivial) path.
    pub fn new(edges: Vec<Edge>) -> PathResult<Path> {
        for (index, pair) in edges.windows(2).enumerate() {
            let (prev, next) = (&pair[0], &pair[1]);
            if prev.destination.id != next.source.id {
                return Err(PathError::Discontinuous {
                    index:    index + 1,
                    expected: prev.destination.id,
                    found:    next.source.id,
                });
            }
        }
        Ok(Path { edges })
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Edge> {
        self.edges.iter()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// First node of the walk, or `None` for an empty path.
    pub fn start(&self) -> Option<&Node> {
        self.edges.first().map(|e| &e.source)
    }

    /// Last node of the walk, or `None` for an empty path.
    pub fn goal(&self) -> Option<&Node> {
        self.edges.last().map(|e| &e.destination)
    }

    /// Sum of all edge costs.
    pub fn total_cost(&self) -> u64 {
        self.edges.iter().map(|e| e.cost as u64).sum()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Edge;
    type IntoIter = std::slice::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}
