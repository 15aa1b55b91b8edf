//! CSV path loader.
//!
//! # CSV format
//!
//! One row per hop, in walk order.  Nodes are identified by name; the first
//! row mentioning a name fixes its position.
//!
//! ```csv
//! source,source_x,source_y,destination,destination_x,destination_y,cost
//! gate,0,0,road,1,0,1
//! road,1,0,bridge,2,0,25
//! bridge,2,0,tower,40,12,500
//! ```
//!
//! A name that reappears with a different position is a parse error, as is
//! any row that fails to deserialize.  Walk continuity is checked by
//! [`PathBuilder::build`].

use std::collections::HashMap;
use std::io::Read;

use serde::Deserialize;
use tracing::debug;

use pf_core::{NodeId, Position};

use crate::{Path, PathBuilder, PathError, PathResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct PathRecord {
    source:        String,
    source_x:      i32,
    source_y:      i32,
    destination:   String,
    destination_x: i32,
    destination_y: i32,
    cost:          u32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a path from a CSV file.
pub fn load_path_csv(path: &std::path::Path) -> PathResult<Path> {
    let file = std::fs::File::open(path)?;
    load_path_reader(file)
}

/// Like [`load_path_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for paths embedded in
/// the binary.
pub fn load_path_reader<R: Read>(reader: R) -> PathResult<Path> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut builder = PathBuilder::new();
    let mut by_name: HashMap<String, NodeId> = HashMap::new();

    for result in csv_reader.deserialize::<PathRecord>() {
        let row = result.map_err(|e| PathError::Parse(e.to_string()))?;
        let from = intern(
            &mut builder,
            &mut by_name,
            row.source,
            Position::new(row.source_x, row.source_y),
        )?;
        let to = intern(
            &mut builder,
            &mut by_name,
            row.destination,
            Position::new(row.destination_x, row.destination_y),
        )?;
        builder.add_edge(from, to, row.cost);
    }

    debug!(
        nodes = builder.node_count(),
        edges = builder.edge_count(),
        "loaded path rows"
    );
    builder.build()
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn intern(
    builder: &mut PathBuilder,
    by_name: &mut HashMap<String, NodeId>,
    name:    String,
    pos:     Position,
) -> PathResult<NodeId> {
    if let Some(&id) = by_name.get(&name) {
        return match builder.node(id) {
            Some(node) if node.pos == pos => Ok(id),
            Some(node) => Err(PathError::Parse(format!(
                "node {name:?} appears at {pos} but was first seen at {}",
                node.pos
            ))),
            None => Err(PathError::NodeNotFound(id)),
        };
    }
    let id = builder.add_node(name.clone(), pos);
    by_name.insert(name, id);
    Ok(id)
}
