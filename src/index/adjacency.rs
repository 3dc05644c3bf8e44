//! Directed adjacency index: incoming and outgoing buckets per node.

use std::hash::Hash;

use indexmap::IndexSet;

use super::buckets::Buckets;

/// Two node → edge-key maps kept in step with a directed edge collection.
///
/// Every indexed edge sits in exactly one outgoing bucket (its source) and
/// exactly one incoming bucket (its target).
#[derive(Debug, Clone)]
pub struct AdjacencyIndex<N, K> {
    incoming: Buckets<N, K>,
    outgoing: Buckets<N, K>,
}

impl<N: Clone + Eq + Hash, K: Clone + Eq + Hash> AdjacencyIndex<N, K> {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            incoming: Buckets::new(),
            outgoing: Buckets::new(),
        }
    }

    /// Index an edge under its endpoints.
    pub fn insert(&mut self, source: &N, target: &N, key: K) {
        self.outgoing.insert(source, key.clone());
        self.incoming.insert(target, key);
    }

    /// Remove an edge from both buckets. Returns true if anything was removed.
    pub fn remove(&mut self, source: &N, target: &N, key: &K) -> bool {
        let out = self.outgoing.remove(source, key);
        let inc = self.incoming.remove(target, key);
        out || inc
    }

    /// Keys of edges pointing at `node`.
    pub fn incoming(&self, node: &N) -> Option<&IndexSet<K>> {
        self.incoming.get(node)
    }

    /// Keys of edges leaving `node`.
    pub fn outgoing(&self, node: &N) -> Option<&IndexSet<K>> {
        self.outgoing.get(node)
    }

    /// Number of edges pointing at `node`.
    pub fn in_degree(&self, node: &N) -> usize {
        self.incoming.degree(node)
    }

    /// Number of edges leaving `node`.
    pub fn out_degree(&self, node: &N) -> usize {
        self.outgoing.degree(node)
    }

    /// Number of nodes with at least one incoming edge.
    pub fn incoming_bucket_count(&self) -> usize {
        self.incoming.len()
    }

    /// Number of nodes with at least one outgoing edge.
    pub fn outgoing_bucket_count(&self) -> usize {
        self.outgoing.len()
    }

    /// Drop all buckets.
    pub fn clear(&mut self) {
        self.incoming.clear();
        self.outgoing.clear();
    }
}

impl<N: Clone + Eq + Hash, K: Clone + Eq + Hash> Default for AdjacencyIndex<N, K> {
    fn default() -> Self {
        Self::new()
    }
}
