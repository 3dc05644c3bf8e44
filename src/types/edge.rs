//! Edge types and the traits every edge implements.

use std::collections::hash_map::DefaultHasher;
use std::fmt::Debug;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use super::error::{GraphError, GraphResult};

/// Anything usable as a node identity.
pub trait GraphNode: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> GraphNode for T {}

/// A relation between two nodes.
///
/// Equality and hashing of the implementing type decide what "the same edge"
/// means for value-keyed edge sets.
pub trait GraphEdge: Clone + Eq + Hash + Debug {
    /// Node identity type.
    type Node: GraphNode;

    /// Origin of the edge.
    fn source(&self) -> &Self::Node;

    /// Destination of the edge.
    fn target(&self) -> &Self::Node;

    /// True if `node` is either endpoint.
    fn has_node(&self, node: &Self::Node) -> bool {
        self.source() == node || self.target() == node
    }

    /// True if the edge points at `node`.
    fn is_incoming(&self, node: &Self::Node) -> bool {
        self.target() == node
    }

    /// True if the edge starts at `node`.
    fn is_outgoing(&self, node: &Self::Node) -> bool {
        self.source() == node
    }

    /// True for self-loops.
    fn is_loop(&self) -> bool {
        self.source() == self.target()
    }

    /// True if the edge joins `a` and `b`, in either orientation.
    fn connects(&self, a: &Self::Node, b: &Self::Node) -> bool {
        (self.source() == a && self.target() == b) || (self.source() == b && self.target() == a)
    }

    /// The endpoint opposite to `node`.
    fn other_node(&self, node: &Self::Node) -> GraphResult<&Self::Node> {
        if self.source() == node {
            Ok(self.target())
        } else if self.target() == node {
            Ok(self.source())
        } else {
            Err(GraphError::EndpointMismatch {
                node: format!("{node:?}"),
                edge: format!("{self:?}"),
            })
        }
    }

    /// Both endpoints, source first.
    fn nodes(&self) -> [&Self::Node; 2] {
        [self.source(), self.target()]
    }
}

/// Identity capability: edges that can be addressed by an id.
pub trait Identified {
    /// Identifier type.
    type Id: Clone + Eq + Hash + Debug;

    /// The edge's identifier.
    fn id(&self) -> &Self::Id;
}

/// A directed edge. `I = ()` for edges identified by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Edge<N, I = ()> {
    /// Identifier (unit when unused).
    pub id: I,
    /// Source node.
    pub source: N,
    /// Target node.
    pub target: N,
}

impl<N> Edge<N> {
    /// Create a value-identified edge.
    pub fn new(source: N, target: N) -> Self {
        Self {
            id: (),
            source,
            target,
        }
    }
}

impl<N, I> Edge<N, I> {
    /// Create an edge carrying an explicit id.
    pub fn with_id(id: I, source: N, target: N) -> Self {
        Self { id, source, target }
    }

    /// The same edge with source and target swapped.
    pub fn reversed(self) -> Self {
        Self {
            id: self.id,
            source: self.target,
            target: self.source,
        }
    }
}

impl<N: GraphNode, I: Clone + Eq + Hash + Debug> GraphEdge for Edge<N, I> {
    type Node = N;

    fn source(&self) -> &N {
        &self.source
    }

    fn target(&self) -> &N {
        &self.target
    }
}

impl<N, I: Clone + Eq + Hash + Debug> Identified for Edge<N, I> {
    type Id = I;

    fn id(&self) -> &I {
        &self.id
    }
}

impl<N: std::fmt::Display, I> std::fmt::Display for Edge<N, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{}", self.source, self.target)
    }
}

/// An undirected edge: `UndirectedEdge::new(a, b) == UndirectedEdge::new(b, a)`.
///
/// Source and target keep the order given at construction but take no part
/// in equality or hashing beyond the unordered endpoint pair.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UndirectedEdge<N, I = ()> {
    /// Identifier (unit when unused).
    pub id: I,
    /// First endpoint.
    pub source: N,
    /// Second endpoint.
    pub target: N,
}

impl<N> UndirectedEdge<N> {
    /// Create a value-identified undirected edge.
    pub fn new(source: N, target: N) -> Self {
        Self {
            id: (),
            source,
            target,
        }
    }
}

impl<N, I> UndirectedEdge<N, I> {
    /// Create an undirected edge carrying an explicit id.
    pub fn with_id(id: I, source: N, target: N) -> Self {
        Self { id, source, target }
    }
}

impl<N: PartialEq, I: PartialEq> PartialEq for UndirectedEdge<N, I> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && ((self.source == other.source && self.target == other.target)
                || (self.source == other.target && self.target == other.source))
    }
}

impl<N: Eq, I: Eq> Eq for UndirectedEdge<N, I> {}

impl<N: Hash, I: Hash> Hash for UndirectedEdge<N, I> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Endpoint hashes are combined in sorted order so (a, b) and (b, a)
        // land on the same value.
        let a = endpoint_hash(&self.source);
        let b = endpoint_hash(&self.target);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        lo.hash(state);
        hi.hash(state);
        self.id.hash(state);
    }
}

fn endpoint_hash<N: Hash>(node: &N) -> u64 {
    let mut hasher = DefaultHasher::new();
    node.hash(&mut hasher);
    hasher.finish()
}

impl<N: GraphNode, I: Clone + Eq + Hash + Debug> GraphEdge for UndirectedEdge<N, I> {
    type Node = N;

    fn source(&self) -> &N {
        &self.source
    }

    fn target(&self) -> &N {
        &self.target
    }
}

impl<N, I: Clone + Eq + Hash + Debug> Identified for UndirectedEdge<N, I> {
    type Id = I;

    fn id(&self) -> &I {
        &self.id
    }
}

impl<N: std::fmt::Display, I> std::fmt::Display for UndirectedEdge<N, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.source, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_directed_equality_is_ordered() {
        assert_eq!(Edge::new(1, 2), Edge::new(1, 2));
        assert_ne!(Edge::new(1, 2), Edge::new(2, 1));
    }

    #[test]
    fn test_undirected_equality_and_hash_are_symmetric() {
        let a = UndirectedEdge::new("x", "y");
        let b = UndirectedEdge::new("y", "x");
        assert_eq!(a, b);

        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_undirected_ids_still_distinguish() {
        assert_ne!(
            UndirectedEdge::with_id(1, 'a', 'b'),
            UndirectedEdge::with_id(2, 'b', 'a')
        );
    }

    #[test]
    fn test_other_node() {
        let edge = Edge::new(1, 2);
        assert_eq!(*edge.other_node(&1).unwrap(), 2);
        assert_eq!(*edge.other_node(&2).unwrap(), 1);
        match edge.other_node(&3) {
            Err(GraphError::EndpointMismatch { node, .. }) => assert_eq!(node, "3"),
            other => panic!("Expected EndpointMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_self_loop_helpers() {
        let edge = Edge::new(7, 7);
        assert!(edge.is_loop());
        assert_eq!(*edge.other_node(&7).unwrap(), 7);
        assert!(edge.connects(&7, &7));
    }
}
