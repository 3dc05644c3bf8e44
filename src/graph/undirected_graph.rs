//! Undirected graph: a node set plus an incidence-indexed edge set.

use std::fmt;

use crate::types::{Change, GraphEdge, GraphResult, Identified};

use super::edge_set::{BucketEdges, ById, ByValue, DuplicatePolicy, EdgeKeying};
use super::node_set::NodeSet;
use super::undirected::{AsUndirected, UndirectedEdgeSet};

/// An undirected graph.
pub struct UndirectedGraph<E: GraphEdge, K: EdgeKeying<E> = ByValue> {
    nodes: NodeSet<E::Node>,
    edges: UndirectedEdgeSet<E, K>,
}

impl<E: GraphEdge, K: EdgeKeying<E>> UndirectedGraph<E, K> {
    /// Create an empty graph that rejects duplicate edges.
    pub fn new() -> Self {
        Self::with_policy(DuplicatePolicy::Reject)
    }

    /// Create an empty graph with the given edge duplicate policy.
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            nodes: NodeSet::new(),
            edges: UndirectedEdgeSet::with_policy(policy),
        }
    }

    /// Register a callback for node changes.
    pub fn subscribe_nodes<F>(&mut self, callback: F)
    where
        F: for<'c> FnMut(Change<'c, E::Node>) + 'static,
    {
        self.nodes.subscribe(callback);
    }

    /// Register a callback for edge changes.
    pub fn subscribe_edges<F>(&mut self, callback: F)
    where
        F: for<'c> FnMut(Change<'c, E>) + 'static,
    {
        self.edges.subscribe(callback);
    }

    /// Add a node. Returns false if it already exists.
    pub fn add_node(&mut self, node: E::Node) -> bool {
        self.nodes.add_node(node)
    }

    /// Add several nodes, returning how many were new.
    pub fn add_nodes<I: IntoIterator<Item = E::Node>>(&mut self, nodes: I) -> usize {
        self.nodes.add_nodes(nodes)
    }

    /// Add an edge.
    pub fn add_edge(&mut self, edge: E) -> GraphResult<()> {
        self.edges.add_edge(edge)
    }

    /// Add edges, stopping at the first error.
    pub fn add_edges<I: IntoIterator<Item = E>>(&mut self, edges: I) -> GraphResult<()> {
        self.edges.add_edges(edges)
    }

    /// Remove one occurrence of an edge. Returns false if it was absent.
    pub fn remove_edge(&mut self, edge: &E) -> bool {
        self.edges.remove_edge(edge)
    }

    /// Remove every occurrence of an edge, returning how many were stored.
    pub fn purge_edge(&mut self, edge: &E) -> usize {
        self.edges.purge_edge(edge)
    }

    /// Remove a node and every edge touching it, whatever its multiplicity.
    pub fn remove_node(&mut self, node: &E::Node) -> bool {
        if !self.nodes.remove_node(node) {
            return false;
        }
        let incident: Vec<E> = self.edges.edges_of(node).cloned().collect();
        let removed: usize = incident
            .iter()
            .map(|edge| self.edges.purge_edge(edge))
            .sum();
        log::debug!("removed node {:?} with {} incident edges", node, removed);
        true
    }

    /// Remove several nodes, returning how many were present.
    pub fn remove_nodes<'n, I>(&mut self, nodes: I) -> usize
    where
        I: IntoIterator<Item = &'n E::Node>,
        E::Node: 'n,
    {
        nodes
            .into_iter()
            .map(|node| self.remove_node(node))
            .filter(|removed| *removed)
            .count()
    }

    /// Remove all nodes and edges.
    pub fn clear(&mut self) {
        log::debug!(
            "clearing graph ({} nodes, {} edges)",
            self.nodes.node_count(),
            self.edges.edge_count()
        );
        self.edges.clear_edges();
        self.nodes.clear_nodes();
    }

    /// Whether the node is in the node set.
    pub fn exists_node(&self, node: &E::Node) -> bool {
        self.nodes.exists_node(node)
    }

    /// Whether the edge is stored.
    pub fn exists_edge(&self, edge: &E) -> bool {
        self.edges.exists_edge(edge)
    }

    /// Whether an edge joins `a` and `b`.
    pub fn exists_edge_between(&self, a: &E::Node, b: &E::Node) -> bool {
        self.edges.exists_edge_between(a, b)
    }

    /// All nodes in the node set.
    pub fn nodes(&self) -> impl Iterator<Item = &E::Node> + '_ {
        self.nodes.nodes()
    }

    /// All edges.
    pub fn edges(&self) -> impl Iterator<Item = &E> + '_ {
        self.edges.edges()
    }

    /// Number of nodes in the node set.
    pub fn node_count(&self) -> usize {
        self.nodes.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.edge_count()
    }

    /// Edges touching `node`.
    pub fn edges_of<'a>(&'a self, node: &E::Node) -> BucketEdges<'a, E, K> {
        self.edges.edges_of(node)
    }

    /// The node set.
    pub fn node_set(&self) -> &NodeSet<E::Node> {
        &self.nodes
    }

    /// The indexed edge set.
    pub fn edge_set(&self) -> &UndirectedEdgeSet<E, K> {
        &self.edges
    }
}

impl<E: GraphEdge + Identified> UndirectedGraph<E, ById> {
    /// Look up an edge by id.
    pub fn get_edge(&self, id: &E::Id) -> Option<&E> {
        self.edges.get_edge(id)
    }

    /// Remove the edge with this id.
    pub fn remove_edge_by_id(&mut self, id: &E::Id) -> bool {
        self.edges.remove_edge_by_id(id)
    }
}

impl<E: GraphEdge, K: EdgeKeying<E>> Default for UndirectedGraph<E, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: GraphEdge, K: EdgeKeying<E>> fmt::Debug for UndirectedGraph<E, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UndirectedGraph")
            .field("nodes", &self.nodes)
            .field("edges", &self.edges)
            .finish()
    }
}

impl<E: GraphEdge, K: EdgeKeying<E>> AsUndirected for UndirectedGraph<E, K> {
    type Edge = E;
    type Keying = K;

    fn as_undirected(&self) -> &UndirectedEdgeSet<E, K> {
        &self.edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UndirectedEdge;

    #[test]
    fn test_remove_node_cascades_incident_edges() {
        let mut graph: UndirectedGraph<UndirectedEdge<char>> = UndirectedGraph::new();
        graph.add_nodes(['a', 'b', 'c']);
        graph
            .add_edges([
                UndirectedEdge::new('a', 'b'),
                UndirectedEdge::new('c', 'b'),
                UndirectedEdge::new('a', 'c'),
            ])
            .unwrap();

        assert!(graph.remove_node(&'b'));
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.exists_edge_between(&'c', &'a'));
        assert_eq!(graph.edges_of(&'b').count(), 0);
    }

    #[test]
    fn test_remove_node_purges_repeated_edges() {
        let mut graph: UndirectedGraph<UndirectedEdge<u32>> =
            UndirectedGraph::with_policy(DuplicatePolicy::Allow);
        graph.add_nodes([1, 2]);
        graph
            .add_edges([UndirectedEdge::new(1, 2), UndirectedEdge::new(2, 1)])
            .unwrap();
        assert_eq!(graph.edge_count(), 2);

        assert!(graph.remove_node(&2));
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.edges_of(&1).count(), 0);
    }
}
