//! Edge collection with duplicate policy and identity keying.

use std::fmt::Debug;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};

use crate::types::{Change, GraphEdge, GraphError, GraphResult, Identified, Observers};

/// How an edge set identifies its edges.
pub trait EdgeKeying<E: GraphEdge> {
    /// Lookup key stored in the collection and in adjacency buckets.
    type Key: Clone + Eq + Hash + Debug;

    /// Whether repeated keys are rejected even under [`DuplicatePolicy::Allow`].
    const ALWAYS_UNIQUE: bool;

    /// Extract the key of an edge.
    fn key(edge: &E) -> Self::Key;
}

/// Edges are identified by value (their `Eq`/`Hash`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ByValue;

/// Edges are identified by their [`Identified::id`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ById;

impl<E: GraphEdge> EdgeKeying<E> for ByValue {
    type Key = E;
    const ALWAYS_UNIQUE: bool = false;

    fn key(edge: &E) -> E {
        edge.clone()
    }
}

impl<E: GraphEdge + Identified> EdgeKeying<E> for ById {
    type Key = E::Id;
    const ALWAYS_UNIQUE: bool = true;

    fn key(edge: &E) -> E::Id {
        edge.id().clone()
    }
}

/// What happens when an already-present edge is added again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Fail with [`GraphError::DuplicateEdge`].
    #[default]
    Reject,
    /// Count the edge again. Ignored by id-keyed sets.
    Allow,
}

#[derive(Debug, Clone)]
struct Slot<E> {
    edge: E,
    count: usize,
}

/// Outcome of a raw insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Inserted {
    /// First occurrence; indexes must learn about it.
    New,
    /// Multiplicity increased; indexes already know it.
    Repeat,
}

/// A collection of unique (or counted) edges.
///
/// Endpoint queries on a bare `EdgeSet` scan the whole collection; the
/// adjacency-indexed sets in [`crate::graph`] answer them from buckets.
pub struct EdgeSet<E: GraphEdge, K: EdgeKeying<E> = ByValue> {
    edges: IndexMap<K::Key, Slot<E>>,
    total: usize,
    policy: DuplicatePolicy,
    observers: Observers<E>,
}

impl<E: GraphEdge, K: EdgeKeying<E>> EdgeSet<E, K> {
    /// Create an empty set that rejects duplicates.
    pub fn new() -> Self {
        Self::with_policy(DuplicatePolicy::Reject)
    }

    /// Create an empty set with the given duplicate policy.
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            edges: IndexMap::new(),
            total: 0,
            policy,
            observers: Observers::new(),
        }
    }

    /// Build a set from edges, failing on the first rejected duplicate.
    pub fn from_edges<I: IntoIterator<Item = E>>(edges: I) -> GraphResult<Self> {
        let mut set = Self::new();
        set.add_edges(edges)?;
        Ok(set)
    }

    /// The duplicate policy in force.
    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Whether adding an existing edge again succeeds.
    pub fn allows_duplicates(&self) -> bool {
        self.policy == DuplicatePolicy::Allow && !K::ALWAYS_UNIQUE
    }

    /// Register a change callback.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: for<'c> FnMut(Change<'c, E>) + 'static,
    {
        self.observers.subscribe(callback);
    }

    /// Add an edge.
    pub fn add_edge(&mut self, edge: E) -> GraphResult<()> {
        let key = K::key(&edge);
        self.insert(edge)?;
        if let Some(slot) = self.edges.get(&key) {
            self.observers.notify(Change::Added(&slot.edge));
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
        match self.take(&K::key(edge)) {
            Some((removed, _)) => {
                self.observers.notify(Change::Removed(&removed));
                true
            }
            None => false,
        }
    }

    /// Remove several edges, returning how many were present.
    pub fn remove_edges<'e, I>(&mut self, edges: I) -> usize
    where
        I: IntoIterator<Item = &'e E>,
        E: 'e,
    {
        edges
            .into_iter()
            .filter(|edge| self.remove_edge(edge))
            .count()
    }

    /// Remove everything.
    pub fn clear_edges(&mut self) {
        if self.edges.is_empty() {
            return;
        }
        self.clear_raw();
        self.observers.notify(Change::Reset);
    }

    /// Whether the edge (or an edge with its key) is present.
    pub fn exists_edge(&self, edge: &E) -> bool {
        self.edges.contains_key(&K::key(edge))
    }

    /// Whether an edge runs from `source` to `target`. Scans every edge.
    pub fn exists_edge_between(&self, source: &E::Node, target: &E::Node) -> bool {
        self.edges_between(source, target).next().is_some()
    }

    /// Edges running from `source` to `target`. Scans every edge.
    pub fn edges_between<'a>(
        &'a self,
        source: &'a E::Node,
        target: &'a E::Node,
    ) -> impl Iterator<Item = &'a E> + 'a {
        self.distinct_edges()
            .filter(move |e| e.source() == source && e.target() == target)
    }

    /// Edges touching `node`. Scans every edge.
    pub fn edges_of<'a>(&'a self, node: &'a E::Node) -> impl Iterator<Item = &'a E> + 'a {
        self.distinct_edges().filter(move |e| e.has_node(node))
    }

    /// All edges, repeated according to their multiplicity.
    pub fn edges(&self) -> impl Iterator<Item = &E> + '_ {
        self.edges
            .values()
            .flat_map(|slot| std::iter::repeat(&slot.edge).take(slot.count))
    }

    /// Each stored edge once.
    pub fn distinct_edges(&self) -> impl Iterator<Item = &E> + '_ {
        self.edges.values().map(|slot| &slot.edge)
    }

    /// How often the edge is stored (0 when absent).
    pub fn multiplicity(&self, edge: &E) -> usize {
        self.edges
            .get(&K::key(edge))
            .map(|slot| slot.count)
            .unwrap_or(0)
    }

    /// Number of edges, counting multiplicity.
    pub fn edge_count(&self) -> usize {
        self.total
    }

    /// Number of distinct edges.
    pub fn distinct_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the set holds no edge.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub(crate) fn get_by_key(&self, key: &K::Key) -> Option<&E> {
        self.edges.get(key).map(|slot| &slot.edge)
    }

    pub(crate) fn edge_at(&self, position: usize) -> Option<&E> {
        self.edges.get_index(position).map(|(_, slot)| &slot.edge)
    }

    pub(crate) fn contains_key(&self, key: &K::Key) -> bool {
        self.edges.contains_key(key)
    }

    /// Insert without notifying observers.
    pub(crate) fn insert(&mut self, edge: E) -> GraphResult<Inserted> {
        let key = K::key(&edge);
        if let Some(slot) = self.edges.get_mut(&key) {
            if !(self.policy == DuplicatePolicy::Allow && !K::ALWAYS_UNIQUE) {
                return Err(GraphError::duplicate_edge(&edge));
            }
            slot.count += 1;
            self.total += 1;
            return Ok(Inserted::Repeat);
        }
        self.edges.insert(key, Slot { edge, count: 1 });
        self.total += 1;
        Ok(Inserted::New)
    }

    /// Remove one occurrence without notifying observers.
    ///
    /// Returns the edge and whether it is now gone entirely.
    pub(crate) fn take(&mut self, key: &K::Key) -> Option<(E, bool)> {
        let slot = self.edges.get_mut(key)?;
        self.total -= 1;
        if slot.count > 1 {
            slot.count -= 1;
            return Some((slot.edge.clone(), false));
        }
        self.edges
            .swap_remove(key)
            .map(|slot| (slot.edge, true))
    }

    pub(crate) fn clear_raw(&mut self) {
        self.edges.clear();
        self.total = 0;
    }
}

impl<E: GraphEdge + Identified> EdgeSet<E, ById> {
    /// Look up an edge by id.
    pub fn get_edge(&self, id: &E::Id) -> Option<&E> {
        self.edges.get(id).map(|slot| &slot.edge)
    }

    /// Whether an edge with this id exists.
    pub fn exists_edge_id(&self, id: &E::Id) -> bool {
        self.edges.contains_key(id)
    }

    /// Remove the edge with this id. Returns false if none exists.
    pub fn remove_edge_by_id(&mut self, id: &E::Id) -> bool {
        match self.take(id) {
            Some((removed, _)) => {
                self.observers.notify(Change::Removed(&removed));
                true
            }
            None => false,
        }
    }
}

impl<E: GraphEdge, K: EdgeKeying<E>> Default for EdgeSet<E, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: GraphEdge, K: EdgeKeying<E>> Debug for EdgeSet<E, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdgeSet")
            .field("edges", &self.distinct_edges().collect::<Vec<_>>())
            .field("total", &self.total)
            .field("policy", &self.policy)
            .finish()
    }
}

/// Iterator over the edges filed in one adjacency bucket.
pub struct BucketEdges<'a, E: GraphEdge, K: EdgeKeying<E>> {
    keys: Option<indexmap::set::Iter<'a, K::Key>>,
    edges: &'a EdgeSet<E, K>,
}

impl<'a, E: GraphEdge, K: EdgeKeying<E>> BucketEdges<'a, E, K> {
    pub(crate) fn new(bucket: Option<&'a IndexSet<K::Key>>, edges: &'a EdgeSet<E, K>) -> Self {
        Self {
            keys: bucket.map(|b| b.iter()),
            edges,
        }
    }
}

impl<'a, E: GraphEdge, K: EdgeKeying<E>> Iterator for BucketEdges<'a, E, K> {
    type Item = &'a E;

    fn next(&mut self) -> Option<&'a E> {
        let edges = self.edges;
        let keys = self.keys.as_mut()?;
        for key in keys.by_ref() {
            if let Some(edge) = edges.get_by_key(key) {
                return Some(edge);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.keys {
            Some(keys) => (0, Some(keys.len())),
            None => (0, Some(0)),
        }
    }
}
