//! Directed graph: a node set plus an adjacency-indexed edge set.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;

use crate::types::{Change, GraphEdge, GraphError, GraphResult, Identified};

use super::directed::{AsDirected, DirectedEdgeSet};
use super::edge_set::{BucketEdges, ById, ByValue, DuplicatePolicy, EdgeKeying};
use super::node_set::NodeSet;

/// Synthesises a replacement edge `source -> target` when a node between
/// them is removed. Returning `None` skips the pair.
pub type RewirePolicy<E> =
    Box<dyn Fn(&<E as GraphEdge>::Node, &<E as GraphEdge>::Node) -> Option<E>>;

/// A directed graph.
///
/// Nodes and edges are stored independently: an edge may reference nodes
/// that were never added to the node set.
pub struct DirectedGraph<E: GraphEdge, K: EdgeKeying<E> = ByValue> {
    nodes: NodeSet<E::Node>,
    edges: DirectedEdgeSet<E, K>,
    rewire: Option<RewirePolicy<E>>,
}

impl<E: GraphEdge, K: EdgeKeying<E>> DirectedGraph<E, K> {
    /// Create an empty graph that rejects duplicate edges.
    pub fn new() -> Self {
        Self::with_policy(DuplicatePolicy::Reject)
    }

    /// Create an empty graph with the given edge duplicate policy.
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            nodes: NodeSet::new(),
            edges: DirectedEdgeSet::with_policy(policy),
            rewire: None,
        }
    }

    /// Install a rewire policy used by [`DirectedGraph::remove_node`].
    #[must_use]
    pub fn with_rewire<F>(mut self, rewire: F) -> Self
    where
        F: Fn(&E::Node, &E::Node) -> Option<E> + 'static,
    {
        self.rewire = Some(Box::new(rewire));
        self
    }

    /// Replace or drop the rewire policy.
    pub fn set_rewire(&mut self, rewire: Option<RewirePolicy<E>>) {
        self.rewire = rewire;
    }

    /// The edge duplicate policy in force.
    pub fn policy(&self) -> DuplicatePolicy {
        self.edges.policy()
    }

    /// Whether removing a node rewires its neighbours.
    pub fn has_rewire(&self) -> bool {
        self.rewire.is_some()
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

    /// Remove an edge. Returns false if it was absent.
    pub fn remove_edge(&mut self, edge: &E) -> bool {
        self.edges.remove_edge(edge)
    }

    /// Remove every occurrence of an edge, returning how many were stored.
    pub fn purge_edge(&mut self, edge: &E) -> usize {
        self.edges.purge_edge(edge)
    }

    /// Remove a node together with every edge touching it.
    ///
    /// Each incident edge goes entirely, whatever its multiplicity.
    ///
    /// With a rewire policy installed, each pair of an incoming edge `a -> n`
    /// and an outgoing edge `n -> b` is replaced by the edge the policy
    /// returns for `(a, b)`. Self-loops on `n` take no part in rewiring, and
    /// a synthesised edge that is already stored is skipped.
    ///
    /// Returns `Ok(false)` when the node is not in the node set. Fails with
    /// [`GraphError::DuplicateEdge`] when a synthesised edge shares its key
    /// with a different edge that would survive; the graph is left
    /// untouched in that case.
    pub fn remove_node(&mut self, node: &E::Node) -> GraphResult<bool> {
        if !self.nodes.exists_node(node) {
            return Ok(false);
        }

        let incoming: Vec<E> = self.edges.incoming_edges(node).cloned().collect();
        let outgoing: Vec<E> = self
            .edges
            .outgoing_edges(node)
            .filter(|e| !e.is_loop())
            .cloned()
            .collect();
        let synthesised = self.plan_rewire(&incoming, &outgoing)?;

        self.nodes.remove_node(node);
        let removed: usize = incoming
            .iter()
            .chain(outgoing.iter())
            .map(|edge| self.edges.purge_edge(edge))
            .sum();
        log::debug!(
            "removed node {:?} with {} incident edges",
            node,
            removed
        );

        for edge in synthesised {
            log::debug!("rewired {:?}", edge);
            self.edges.add_edge(edge)?;
        }
        Ok(true)
    }

    /// Edges the rewire policy would add once `incoming` and `outgoing` are
    /// gone, minus those already stored.
    fn plan_rewire(&self, incoming: &[E], outgoing: &[E]) -> GraphResult<Vec<E>> {
        let Some(rewire) = &self.rewire else {
            return Ok(Vec::new());
        };
        let freed: HashSet<K::Key> = incoming.iter().chain(outgoing).map(K::key).collect();
        let stored = self.edges.edge_collection();

        let mut planned: IndexMap<K::Key, E> = IndexMap::new();
        for inc in incoming.iter().filter(|e| !e.is_loop()) {
            for out in outgoing {
                let Some(edge) = rewire(inc.source(), out.target()) else {
                    continue;
                };
                let key = K::key(&edge);
                let existing = planned.get(&key).or_else(|| {
                    if freed.contains(&key) {
                        None
                    } else {
                        stored.get_by_key(&key)
                    }
                });
                match existing {
                    Some(other)
                        if other.source() == edge.source() && other.target() == edge.target() => {}
                    Some(_) => return Err(GraphError::duplicate_edge(&edge)),
                    None => {
                        planned.insert(key, edge);
                    }
                }
            }
        }
        Ok(planned.into_values().collect())
    }

    /// Remove several nodes, returning how many were present.
    pub fn remove_nodes<'n, I>(&mut self, nodes: I) -> GraphResult<usize>
    where
        I: IntoIterator<Item = &'n E::Node>,
        E::Node: 'n,
    {
        let mut count = 0;
        for node in nodes {
            if self.remove_node(node)? {
                count += 1;
            }
        }
        Ok(count)
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

    /// Whether an edge runs from `source` to `target`.
    pub fn exists_edge_between(&self, source: &E::Node, target: &E::Node) -> bool {
        self.edges.exists_edge_between(source, target)
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

    /// Edges whose target is `node`.
    pub fn incoming_edges<'a>(&'a self, node: &E::Node) -> BucketEdges<'a, E, K> {
        self.edges.incoming_edges(node)
    }

    /// Edges whose source is `node`.
    pub fn outgoing_edges<'a>(&'a self, node: &E::Node) -> BucketEdges<'a, E, K> {
        self.edges.outgoing_edges(node)
    }

    /// Direct parents of `node`.
    pub fn incoming_nodes<'a>(&'a self, node: &E::Node) -> impl Iterator<Item = &'a E::Node> + 'a {
        self.edges.incoming_nodes(node)
    }

    /// Direct children of `node`.
    pub fn outgoing_nodes<'a>(&'a self, node: &E::Node) -> impl Iterator<Item = &'a E::Node> + 'a {
        self.edges.outgoing_nodes(node)
    }

    /// The node set.
    pub fn node_set(&self) -> &NodeSet<E::Node> {
        &self.nodes
    }

    /// The indexed edge set.
    pub fn edge_set(&self) -> &DirectedEdgeSet<E, K> {
        &self.edges
    }
}

impl<E: GraphEdge + Identified> DirectedGraph<E, ById> {
    /// Look up an edge by id.
    pub fn get_edge(&self, id: &E::Id) -> Option<&E> {
        self.edges.get_edge(id)
    }

    /// Remove the edge with this id.
    pub fn remove_edge_by_id(&mut self, id: &E::Id) -> bool {
        self.edges.remove_edge_by_id(id)
    }
}

impl<E: GraphEdge, K: EdgeKeying<E>> Default for DirectedGraph<E, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: GraphEdge, K: EdgeKeying<E>> fmt::Debug for DirectedGraph<E, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectedGraph")
            .field("nodes", &self.nodes)
            .field("edges", &self.edges)
            .field("rewire", &self.rewire.is_some())
            .finish()
    }
}

impl<E: GraphEdge, K: EdgeKeying<E>> AsDirected for DirectedGraph<E, K> {
    type Edge = E;
    type Keying = K;

    fn as_directed(&self) -> &DirectedEdgeSet<E, K> {
        &self.edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Edge;

    #[test]
    fn test_remove_node_cascades() {
        let mut graph: DirectedGraph<Edge<u32>> = DirectedGraph::new();
        graph.add_nodes([1, 2, 3]);
        graph
            .add_edges([Edge::new(1, 2), Edge::new(2, 3), Edge::new(1, 3)])
            .unwrap();

        assert!(graph.remove_node(&2).unwrap());
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.exists_edge(&Edge::new(1, 3)));
        assert!(!graph.remove_node(&2).unwrap());
    }

    #[test]
    fn test_rewire_connects_parents_to_children() {
        let mut graph =
            DirectedGraph::<Edge<u32>>::new().with_rewire(|a, b| Some(Edge::new(*a, *b)));
        graph.add_nodes([1, 2, 3, 4]);
        graph
            .add_edges([
                Edge::new(1, 3),
                Edge::new(2, 3),
                Edge::new(3, 4),
                Edge::new(3, 3),
                Edge::new(1, 4),
            ])
            .unwrap();

        assert!(graph.remove_node(&3).unwrap());
        let edges: Vec<Edge<u32>> = graph.edges().copied().collect();
        assert_eq!(edges, vec![Edge::new(1, 4), Edge::new(2, 4)]);
    }

    #[test]
    fn test_remove_node_purges_repeated_edges() {
        let mut graph: DirectedGraph<Edge<u32>> = DirectedGraph::with_policy(DuplicatePolicy::Allow);
        graph.add_nodes([1, 2, 3]);
        graph
            .add_edges([Edge::new(1, 2), Edge::new(1, 2), Edge::new(2, 3)])
            .unwrap();

        assert!(graph.remove_node(&2).unwrap());
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.outgoing_edges(&1).count(), 0);
        assert_eq!(graph.incoming_edges(&2).count(), 0);
    }

    #[test]
    fn test_conflicting_rewire_leaves_graph_untouched() {
        // The policy reuses id 7, which belongs to an unrelated edge.
        let mut graph = DirectedGraph::<Edge<u32, u64>, ById>::new()
            .with_rewire(|a, b| Some(Edge::with_id(7, *a, *b)));
        graph.add_nodes([1, 2, 3]);
        graph
            .add_edges([
                Edge::with_id(1, 1, 2),
                Edge::with_id(2, 2, 3),
                Edge::with_id(7, 3, 1),
            ])
            .unwrap();

        match graph.remove_node(&2) {
            Err(GraphError::DuplicateEdge(_)) => {}
            other => panic!("Expected DuplicateEdge, got {:?}", other),
        }
        assert!(graph.exists_node(&2));
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.get_edge(&7).map(|e| e.source), Some(3));
    }

    #[test]
    fn test_rewire_may_reuse_a_freed_id() {
        let mut graph = DirectedGraph::<Edge<u32, u64>, ById>::new()
            .with_rewire(|a, b| Some(Edge::with_id(1, *a, *b)));
        graph
            .add_edges([Edge::with_id(1, 1, 2), Edge::with_id(2, 2, 3)])
            .unwrap();
        graph.add_node(2);

        assert!(graph.remove_node(&2).unwrap());
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.get_edge(&1).map(|e| (e.source, e.target)), Some((1, 3)));
    }

    #[test]
    fn test_edges_may_reference_unknown_nodes() {
        let mut graph: DirectedGraph<Edge<&str>> = DirectedGraph::new();
        graph.add_edge(Edge::new("x", "y")).unwrap();
        assert!(!graph.exists_node(&"x"));
        assert_eq!(graph.outgoing_nodes(&"x").count(), 1);
    }
}
