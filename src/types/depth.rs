//! Depth-tagged traversal results.

use serde::Serialize;

/// An edge paired with the BFS level at which it was discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EdgeWithDepth<E> {
    /// The discovered edge.
    pub edge: E,
    /// Edge count from the traversal start (first level is 1).
    pub depth: usize,
}

/// A node paired with the BFS level at which it was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeWithDepth<N> {
    /// The reached node.
    pub node: N,
    /// Edge count from the traversal start.
    pub depth: usize,
}
