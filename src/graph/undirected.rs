//! Undirected edge set with per-node incidence buckets.

use std::fmt::Debug;

use crate::index::IncidenceIndex;
use crate::types::{Change, GraphEdge, GraphResult, Identified, Observers};

use super::edge_set::{BucketEdges, ById, ByValue, DuplicatePolicy, EdgeKeying, EdgeSet, Inserted};

/// An undirected edge collection. Each node's bucket lists every edge that
/// touches it, whichever end it sits on.
pub struct UndirectedEdgeSet<E: GraphEdge, K: EdgeKeying<E> = ByValue> {
    edges: EdgeSet<E, K>,
    index: IncidenceIndex<E::Node, K::Key>,
    observers: Observers<E>,
}

impl<E: GraphEdge, K: EdgeKeying<E>> UndirectedEdgeSet<E, K> {
    /// Create an empty set that rejects duplicates.
    pub fn new() -> Self {
        Self::with_policy(DuplicatePolicy::Reject)
    }

    /// Create an empty set with the given duplicate policy.
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            edges: EdgeSet::with_policy(policy),
            index: IncidenceIndex::new(),
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

    /// Add an edge and file it under both endpoints.
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

    /// Remove every edge.
    pub fn clear_edges(&mut self) {
        if self.edges.is_empty() {
            return;
        }
        log::debug!("clearing {} edges", self.edges.edge_count());
        self.edges.clear_raw();
        self.index.clear();
        self.observers.notify(Change::Reset);
    }

    /// Edges touching `node`, in insertion order.
    pub fn edges_of<'a>(&'a self, node: &E::Node) -> BucketEdges<'a, E, K> {
        BucketEdges::new(self.index.incident(node), &self.edges)
    }

    /// Nodes sharing an edge with `node`. A self-loop yields `node` itself.
    pub fn adjacent_nodes<'a>(&'a self, node: &'a E::Node) -> impl Iterator<Item = &'a E::Node> + 'a {
        self.edges_of(node).map(move |e| {
            if e.source() == node {
                e.target()
            } else {
                e.source()
            }
        })
    }

    /// Number of edges touching `node`.
    pub fn degree(&self, node: &E::Node) -> usize {
        self.index.degree(node)
    }

    /// Whether the edge is stored.
    pub fn exists_edge(&self, edge: &E) -> bool {
        self.edges.exists_edge(edge)
    }

    /// Whether an edge joins `a` and `b`, in either orientation.
    pub fn exists_edge_between(&self, a: &E::Node, b: &E::Node) -> bool {
        self.edges_of(a).any(|e| e.connects(a, b))
    }

    /// Edges joining `a` and `b`, in either orientation.
    pub fn edges_between<'a>(
        &'a self,
        a: &'a E::Node,
        b: &'a E::Node,
    ) -> impl Iterator<Item = &'a E> + 'a {
        self.edges_of(a).filter(move |e| e.connects(a, b))
    }

    /// All edges, repeated according to their multiplicity.
    pub fn edges(&self) -> impl Iterator<Item = &E> + '_ {
        self.edges.edges()
    }

    /// Each stored edge once.
    pub fn distinct_edges(&self) -> impl Iterator<Item = &E> + '_ {
        self.edges.distinct_edges()
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
}

impl<E: GraphEdge + Identified> UndirectedEdgeSet<E, ById> {
    /// Look up an edge by id.
    pub fn get_edge(&self, id: &E::Id) -> Option<&E> {
        self.edges.get_edge(id)
    }

    /// Whether an edge with this id exists.
    pub fn exists_edge_id(&self, id: &E::Id) -> bool {
        self.edges.exists_edge_id(id)
    }

    /// Remove the edge with this id.
    pub fn remove_edge_by_id(&mut self, id: &E::Id) -> bool {
        self.remove_key(id)
    }
}

impl<E: GraphEdge, K: EdgeKeying<E>> Default for UndirectedEdgeSet<E, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: GraphEdge, K: EdgeKeying<E>> Debug for UndirectedEdgeSet<E, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UndirectedEdgeSet")
            .field("edges", &self.edges)
            .field("nodes", &self.index.bucket_count())
            .finish()
    }
}

/// Read access to an undirected edge set.
pub trait AsUndirected {
    /// Edge type.
    type Edge: GraphEdge;
    /// Edge identity scheme.
    type Keying: EdgeKeying<Self::Edge>;

    /// The underlying indexed edge set.
    fn as_undirected(&self) -> &UndirectedEdgeSet<Self::Edge, Self::Keying>;
}

impl<E: GraphEdge, K: EdgeKeying<E>> AsUndirected for UndirectedEdgeSet<E, K> {
    type Edge = E;
    type Keying = K;

    fn as_undirected(&self) -> &UndirectedEdgeSet<E, K> {
        self
    }
}

/// Node type of an undirected edge source.
pub type UndirectedNode<G> = <<G as AsUndirected>::Edge as GraphEdge>::Node;
