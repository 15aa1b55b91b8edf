//! Incremental path construction.

use pf_core::{EdgeId, NodeId, Position};

use crate::{Edge, Node, Path, PathError, PathResult};

/// Construct a [`Path`] hop by hop, then call [`build`](Self::build).
///
/// Nodes are registered first and referenced by the `NodeId` the builder
/// hands back.  Hops must be added in walk order; `build()` rejects a hop
/// that does not start where the previous one ended.
///
/// # Example
///
/// ```
/// use pf_core::Position;
/// use pf_path::PathBuilder;
///
/// let mut b = PathBuilder::new();
/// let a = b.add_node("gate", Position::new(0, 0));
/// let c = b.add_node("well", Position::new(1, 0));
/// b.add_edge(a, c, 1);
/// let path = b.build().unwrap();
/// assert_eq!(path.len(), 1);
/// assert_eq!(path.goal().unwrap().name, "well");
/// ```
pub struct PathBuilder {
    nodes: Vec<Node>,
    hops:  Vec<RawHop>,
}

struct RawHop {
    from: NodeId,
    to:   NodeId,
    cost: u32,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), hops: Vec::new() }
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, name: impl Into<String>, pos: Position) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(id, name, pos));
        id
    }

    /// Append the next hop of the walk.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, cost: u32) {
        self.hops.push(RawHop { from, to, cost });
    }

    /// Look up a node registered earlier.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Find a registered node by name.
    pub fn find_node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.hops.len() }

    /// Consume the builder and produce a validated [`Path`].
    pub fn build(self) -> PathResult<Path> {
        let edges = self
            .hops
            .iter()
            .enumerate()
            .map(|(i, hop)| {
                let source = self.lookup(hop.from)?;
                let destination = self.lookup(hop.to)?;
                Ok(Edge {
                    id: EdgeId(i as u32),
                    source,
                    destination,
                    cost: hop.cost,
                })
            })
            .collect::<PathResult<Vec<Edge>>>()?;
        Path::new(edges)
    }

    fn lookup(&self, id: NodeId) -> PathResult<Node> {
        self.node(id).cloned().ok_or(PathError::NodeNotFound(id))
    }
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new()
    }
}
