//! Undirected incidence index with one bucket of incident edges per node.

use std::hash::Hash;

use indexmap::IndexSet;

use super::buckets::Buckets;

/// Node → incident edge keys, direction-agnostic.
///
/// An edge is filed under both endpoints; a self-loop is filed once.
#[derive(Debug, Clone)]
pub struct IncidenceIndex<N, K> {
    incident: Buckets<N, K>,
}

impl<N: Clone + Eq + Hash, K: Clone + Eq + Hash> IncidenceIndex<N, K> {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            incident: Buckets::new(),
        }
    }

    /// Index an edge under both endpoints.
    pub fn insert(&mut self, source: &N, target: &N, key: K) {
        if source != target {
            self.incident.insert(target, key.clone());
        }
        self.incident.insert(source, key);
    }

    /// Remove an edge from its endpoints' buckets.
    pub fn remove(&mut self, source: &N, target: &N, key: &K) -> bool {
        let mut removed = self.incident.remove(source, key);
        if source != target {
            removed |= self.incident.remove(target, key);
        }
        removed
    }

    /// Keys of edges touching `node`.
    pub fn incident(&self, node: &N) -> Option<&IndexSet<K>> {
        self.incident.get(node)
    }

    /// Number of edges touching `node`.
    pub fn degree(&self, node: &N) -> usize {
        self.incident.degree(node)
    }

    /// Number of nodes with at least one incident edge.
    pub fn bucket_count(&self) -> usize {
        self.incident.len()
    }

    /// Drop all buckets.
    pub fn clear(&mut self) {
        self.incident.clear();
    }
}

impl<N: Clone + Eq + Hash, K: Clone + Eq + Hash> Default for IncidenceIndex<N, K> {
    fn default() -> Self {
        Self::new()
    }
}
