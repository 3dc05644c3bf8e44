//! Node-keyed buckets of edge keys, shared by the adjacency indexes.

use std::collections::HashMap;
use std::hash::Hash;

use indexmap::IndexSet;

/// Maps each node to the ordered set of edge keys filed under it.
///
/// A bucket exists only while it holds at least one key. Keys keep their
/// insertion order within a bucket, which is the order traversals expand in.
#[derive(Debug, Clone)]
pub struct Buckets<N, K> {
    map: HashMap<N, IndexSet<K>>,
}

impl<N: Clone + Eq + Hash, K: Eq + Hash> Buckets<N, K> {
    /// Create an empty bucket map.
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// File `key` under `node`. Returns false if it was already there.
    pub fn insert(&mut self, node: &N, key: K) -> bool {
        if let Some(bucket) = self.map.get_mut(node) {
            return bucket.insert(key);
        }
        let mut bucket = IndexSet::new();
        bucket.insert(key);
        self.map.insert(node.clone(), bucket);
        true
    }

    /// Remove `key` from `node`'s bucket, dropping the bucket once empty.
    pub fn remove(&mut self, node: &N, key: &K) -> bool {
        let Some(bucket) = self.map.get_mut(node) else {
            return false;
        };
        let removed = bucket.shift_remove(key);
        if bucket.is_empty() {
            self.map.remove(node);
        }
        removed
    }

    /// The bucket of `node`, if it has any keys.
    pub fn get(&self, node: &N) -> Option<&IndexSet<K>> {
        self.map.get(node)
    }

    /// Number of keys filed under `node`.
    pub fn degree(&self, node: &N) -> usize {
        self.map.get(node).map(|b| b.len()).unwrap_or(0)
    }

    /// Whether `node` has a bucket.
    pub fn contains_node(&self, node: &N) -> bool {
        self.map.contains_key(node)
    }

    /// Number of non-empty buckets.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether no bucket exists.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Drop all buckets.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl<N: Clone + Eq + Hash, K: Eq + Hash> Default for Buckets<N, K> {
    fn default() -> Self {
        Self::new()
    }
}
