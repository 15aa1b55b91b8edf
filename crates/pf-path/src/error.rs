//! Path-subsystem error type.

use thiserror::Error;

use pf_core::NodeId;

/// Errors produced by `pf-path`.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("edge {index} starts at {found} but the previous edge ends at {expected}")]
    Discontinuous {
        index:    usize,
        expected: NodeId,
        found:    NodeId,
    },

    #[error("node {0} not found in path builder")]
    NodeNotFound(NodeId),

    #[error("path parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PathResult<T> = Result<T, PathError>;
