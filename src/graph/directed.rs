//! Directed edge set with incoming/outgoing adjacency buckets.

use std::fmt::Debug;

use crate::index::AdjacencyIndex;
use crate::types::{Change, GraphEdge, GraphResult, Identified, Observers};

use super::edge_set::{BucketEdges, ById, ByValue, DuplicatePolicy, EdgeKeying, EdgeSet, Inserted};

/// A directed edge collection answering one-hop queries in constant time.
///
/// Every stored edge is filed in exactly one outgoing bucket (its source)
/// and one incoming bucket (its target). Buckets are updated in the same
/// call as the collection, before observers are notified.
pub struct DirectedEdgeSet<E: GraphEdge, K: EdgeKeying<E> = ByValue> {
    edges: EdgeSet<E, K>,
    index: AdjacencyIndex<E::Node, K::Key>,
    observers: Observers<E>,
}

impl<E: GraphEdge, K: EdgeKeying<E>> DirectedEdgeSet<E, K> {
    /// Create an empty set that rejects duplicates.
    pub fn new() -> Self {
        Self::with_policy(DuplicatePolicy::Reject)
    }

    /// Create an empty set with the given duplicate policy.
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            edges: EdgeSet::with_policy(policy),
            index: AdjacencyIndex::new(),
            observers: Observers::new(),
        }
    }

    /// Build a set from edges, failing on the first rejected duplicate.
    pub fn from_edges<I: IntoIterator<Item = E>>(edges: I) -> GraphResult<Self> {
        let mut set = Self::new();
        set.add_edges(edges)?;
        Ok(set)
    }

    /// Register a change callback.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: for<'c> FnMut(Change<'c, E>) + 'static,
    {
        self.observers.subscribe(callback);
    }

    /// The duplicate policy in force.
    pub fn policy(&self) -> DuplicatePolicy {
        self.edges.policy()
    }

    /// Add an edge and index it under both endpoints.
    pub fn add_edge(&mut self, edge: E) -> GraphResult<()> {
        let key = K::key(&edge);
        if self.edges.insert(edge)? == Inserted::New {
            if let Some(stored) = self.edges.get_by_key(&key) {
                log::trace!("indexing {:?}", stored);
                self.index
                    .insert(stored.source(), stored.target(), key.clone());
            }
        }
        if let Some(stored) = self.edges.get_by_key(&key) {
            self.observers.notify(Change::Added(stored));
        }
        Ok(())
    }

    /// Add edges one by one, stopping at the first error.
    ///
    /// Edges added before the error stay in the set.
    pub fn add_edges<I: IntoIterator<Item = E>>(&mut self, edges: I) -> GraphResult<()> {
        for edge in edges {
            self.add_edge(edge)?;
        }
        Ok(())
    }

    /// Remove one occurrence of an edge. Returns false if it was absent.
    pub fn remove_edge(&mut self, edge: &E) -> bool {
        self.remove_key(&K::key(edge))
    }

    /// Remove several edges, returning how many were present.
    pub fn remove_edges<'e, I>(&mut self, edges: I) -> usize
    where
        I: IntoIterator<Item = &'e E>,
        E: 'e,
    {
        edges
            .into_iter()
            .map(|edge| self.remove_edge(edge))
            .filter(|removed| *removed)
            .count()
    }

    /// Remove every occurrence of an edge, returning how many were stored.
    ///
    /// Observers see one `Removed` per occurrence.
    pub fn purge_edge(&mut self, edge: &E) -> usize {
        let key = K::key(edge);
        let mut removed = 0;
        while self.remove_key(&key) {
            removed += 1;
        }
        removed
    }

    pub(crate) fn remove_key(&mut self, key: &K::Key) -> bool {
        let Some((removed, last)) = self.edges.take(key) else {
            return false;
        };
        if last {
            log::trace!("unindexing {:?}", removed);
            self.index.remove(removed.source(), removed.target(), key);
        }
        self.observers.notify(Change::Removed(&removed));
        true
    }

    /// Remove every edge. Emits a single reset if anything was removed.
    pub fn clear_edges(&mut self) {
        if self.edges.is_empty() {
            return;
        }
        log::debug!("clearing {} edges", self.edges.edge_count());
        self.edges.clear_raw();
        self.index.clear();
        self.observers.notify(Change::Reset);
    }

    /// Edges whose target is `node`.
    pub fn incoming_edges<'a>(&'a self, node: &E::Node) -> BucketEdges<'a, E, K> {
        BucketEdges::new(self.index.incoming(node), &self.edges)
    }

    /// Edges whose source is `node`.
    pub fn outgoing_edges<'a>(&'a self, node: &E::Node) -> BucketEdges<'a, E, K> {
        BucketEdges::new(self.index.outgoing(node), &self.edges)
    }

    /// Incoming then outgoing edges of `node`. A self-loop appears once.
    pub fn edges_of<'a>(&'a self, node: &'a E::Node) -> impl Iterator<Item = &'a E> + 'a {
        self.incoming_edges(node)
            .chain(self.outgoing_edges(node).filter(|e| !e.is_loop()))
    }

    /// Sources of the edges pointing at `node`.
    pub fn incoming_nodes<'a>(&'a self, node: &E::Node) -> impl Iterator<Item = &'a E::Node> + 'a {
        self.incoming_edges(node).map(|e| e.source())
    }

    /// Targets of the edges leaving `node`.
    pub fn outgoing_nodes<'a>(&'a self, node: &E::Node) -> impl Iterator<Item = &'a E::Node> + 'a {
        self.outgoing_edges(node).map(|e| e.target())
    }

    /// Number of edges pointing at `node`.
    pub fn in_degree(&self, node: &E::Node) -> usize {
        self.index.in_degree(node)
    }

    /// Number of edges leaving `node`.
    pub fn out_degree(&self, node: &E::Node) -> usize {
        self.index.out_degree(node)
    }

    /// Whether the edge is stored.
    pub fn exists_edge(&self, edge: &E) -> bool {
        self.edges.exists_edge(edge)
    }

    /// Whether an edge runs from `source` to `target`.
    pub fn exists_edge_between(&self, source: &E::Node, target: &E::Node) -> bool {
        self.outgoing_edges(source).any(|e| e.target() == target)
    }

    /// Edges running from `source` to `target`.
    pub fn edges_between<'a>(
        &'a self,
        source: &E::Node,
        target: &'a E::Node,
    ) -> impl Iterator<Item = &'a E> + 'a {
        self.outgoing_edges(source)
            .filter(move |e| e.target() == target)
    }

    /// All edges, repeated according to their multiplicity.
    pub fn edges(&self) -> impl Iterator<Item = &E> + '_ {
        self.edges.edges()
    }

    /// Each stored edge once.
    pub fn distinct_edges(&self) -> impl Iterator<Item = &E> + '_ {
        self.edges.distinct_edges()
    }

    /// How often the edge is stored.
    pub fn multiplicity(&self, edge: &E) -> usize {
        self.edges.multiplicity(edge)
    }

    /// Number of edges, counting multiplicity.
    pub fn edge_count(&self) -> usize {
        self.edges.edge_count()
    }

    /// Whether no edge is stored.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Underlying edge collection.
    pub fn edge_collection(&self) -> &EdgeSet<E, K> {
        &self.edges
    }

    pub(crate) fn index(&self) -> &AdjacencyIndex<E::Node, K::Key> {
        &self.index
    }
}

impl<E: GraphEdge + Identified> DirectedEdgeSet<E, ById> {
    /// Look up an edge by id.
    pub fn get_edge(&self, id: &E::Id) -> Option<&E> {
        self.edges.get_edge(id)
    }

    /// Whether an edge with this id exists.
    pub fn exists_edge_id(&self, id: &E::Id) -> bool {
        self.edges.exists_edge_id(id)
    }

    /// Remove the edge with this id. Returns false if none exists.
    pub fn remove_edge_by_id(&mut self, id: &E::Id) -> bool {
        self.remove_key(id)
    }
}

impl<E: GraphEdge, K: EdgeKeying<E>> Default for DirectedEdgeSet<E, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: GraphEdge, K: EdgeKeying<E>> Debug for DirectedEdgeSet<E, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectedEdgeSet")
            .field("edges", &self.edges)
            .field("sources", &self.index.outgoing_bucket_count())
            .field("targets", &self.index.incoming_bucket_count())
            .finish()
    }
}

/// Read access to a directed edge set, implemented by the set itself and
/// by the graphs that wrap one.
pub trait AsDirected {
    /// Edge type.
    type Edge: GraphEdge;
    /// Edge identity scheme.
    type Keying: EdgeKeying<Self::Edge>;

    /// The underlying indexed edge set.
    fn as_directed(&self) -> &DirectedEdgeSet<Self::Edge, Self::Keying>;
}

impl<E: GraphEdge, K: EdgeKeying<E>> AsDirected for DirectedEdgeSet<E, K> {
    type Edge = E;
    type Keying = K;

    fn as_directed(&self) -> &DirectedEdgeSet<E, K> {
        self
    }
}

/// Node type of a directed edge source.
pub type DirectedNode<G> = <<G as AsDirected>::Edge as GraphEdge>::Node;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Edge;

    fn sample() -> DirectedEdgeSet<Edge<u32>> {
        DirectedEdgeSet::from_edges([
            Edge::new(1, 2),
            Edge::new(1, 3),
            Edge::new(3, 2),
            Edge::new(2, 2),
        ])
        .unwrap()
    }

    #[test]
    fn test_buckets_follow_insertion_order() {
        let set = sample();
        let out: Vec<u32> = set.outgoing_nodes(&1).copied().collect();
        assert_eq!(out, vec![2, 3]);
        let inc: Vec<u32> = set.incoming_nodes(&2).copied().collect();
        assert_eq!(inc, vec![1, 3, 2]);
    }

    #[test]
    fn test_self_loop_listed_once_in_edges_of() {
        let set = sample();
        let loops = set.edges_of(&2).filter(|e| e.is_loop()).count();
        assert_eq!(loops, 1);
        assert_eq!(set.edges_of(&2).count(), 3);
    }

    #[test]
    fn test_remove_prunes_buckets() {
        let mut set = sample();
        assert!(set.remove_edge(&Edge::new(1, 2)));
        assert!(set.remove_edge(&Edge::new(1, 3)));
        assert_eq!(set.outgoing_edges(&1).count(), 0);
        assert_eq!(set.index().outgoing_bucket_count(), 2);
        assert!(!set.exists_edge_between(&1, &2));
        assert!(set.exists_edge_between(&3, &2));
    }

    #[test]
    fn test_duplicates_share_one_bucket_entry() {
        let mut set: DirectedEdgeSet<Edge<u32>> = DirectedEdgeSet::with_policy(DuplicatePolicy::Allow);
        set.add_edge(Edge::new(5, 6)).unwrap();
        set.add_edge(Edge::new(5, 6)).unwrap();
        assert_eq!(set.edge_count(), 2);
        assert_eq!(set.out_degree(&5), 1);

        set.remove_edge(&Edge::new(5, 6));
        assert_eq!(set.out_degree(&5), 1);
        set.remove_edge(&Edge::new(5, 6));
        assert_eq!(set.out_degree(&5), 0);
    }

    #[test]
    fn test_clear_drops_index() {
        let mut set = sample();
        set.clear_edges();
        assert!(set.is_empty());
        assert_eq!(set.incoming_edges(&2).count(), 0);
        assert_eq!(set.index().incoming_bucket_count(), 0);
    }
}
