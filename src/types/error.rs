//! Error types for the relgraph library.

use thiserror::Error;

/// All errors that can occur in the relgraph library.
///
/// Missing elements are not errors: removal of an absent node or edge
/// returns `false` and lookups return `None`.
#[derive(Error, Debug)]
pub enum GraphError {
    /// Edge (or edge id) already present and duplicates are not allowed.
    #[error("Duplicate edge not allowed: {0}")]
    DuplicateEdge(String),

    /// Node id already present in an identity-addressed node set.
    #[error("Node {0} already exists")]
    DuplicateNode(String),

    /// The node is not an endpoint of the edge.
    #[error("Node {node} is not an endpoint of edge {edge}")]
    EndpointMismatch { node: String, edge: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed line in an edge-list file.
    #[error("Parse error at line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

impl GraphError {
    pub(crate) fn duplicate_edge(edge: &impl std::fmt::Debug) -> Self {
        Self::DuplicateEdge(format!("{edge:?}"))
    }

    pub(crate) fn duplicate_node(node: &impl std::fmt::Debug) -> Self {
        Self::DuplicateNode(format!("{node:?}"))
    }
}

/// Convenience result type for relgraph operations.
pub type GraphResult<T> = Result<T, GraphError>;
