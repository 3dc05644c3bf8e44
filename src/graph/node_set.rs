//! Node collections: plain value sets and id-addressed maps.

use std::fmt::Debug;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};

use crate::types::{Change, GraphError, GraphNode, GraphResult, Observers};

/// A set of unique nodes in insertion order.
///
/// Adding a node that is already present is ignored.
pub struct NodeSet<N: GraphNode> {
    nodes: IndexSet<N>,
    observers: Observers<N>,
}

impl<N: GraphNode> NodeSet<N> {
    /// Create an empty node set.
    pub fn new() -> Self {
        Self {
            nodes: IndexSet::new(),
            observers: Observers::new(),
        }
    }

    /// Register a change callback.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: for<'c> FnMut(Change<'c, N>) + 'static,
    {
        self.observers.subscribe(callback);
    }

    /// Add a node. Returns false if it was already present.
    pub fn add_node(&mut self, node: N) -> bool {
        let (index, inserted) = self.nodes.insert_full(node);
        if inserted {
            if let Some(added) = self.nodes.get_index(index) {
                self.observers.notify(Change::Added(added));
            }
        }
        inserted
    }

    /// Add several nodes, returning how many were new.
    pub fn add_nodes<I: IntoIterator<Item = N>>(&mut self, nodes: I) -> usize {
        nodes
            .into_iter()
            .map(|node| self.add_node(node))
            .filter(|added| *added)
            .count()
    }

    /// Remove a node. Returns false if it was absent.
    pub fn remove_node(&mut self, node: &N) -> bool {
        match self.nodes.swap_take(node) {
            Some(removed) => {
                self.observers.notify(Change::Removed(&removed));
                true
            }
            None => false,
        }
    }

    /// Remove several nodes, returning how many were present.
    pub fn remove_nodes<'n, I>(&mut self, nodes: I) -> usize
    where
        I: IntoIterator<Item = &'n N>,
        N: 'n,
    {
        nodes
            .into_iter()
            .map(|node| self.remove_node(node))
            .filter(|removed| *removed)
            .count()
    }

    /// Remove every node.
    pub fn clear_nodes(&mut self) {
        if self.nodes.is_empty() {
            return;
        }
        self.nodes.clear();
        self.observers.notify(Change::Reset);
    }

    /// Whether the node is present.
    pub fn exists_node(&self, node: &N) -> bool {
        self.nodes.contains(node)
    }

    /// All nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.nodes.iter()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the set holds no node.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<N: GraphNode> Default for NodeSet<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: GraphNode> Debug for NodeSet<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.nodes.iter()).finish()
    }
}

impl<N: GraphNode> FromIterator<N> for NodeSet<N> {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        let mut set = Self::new();
        set.add_nodes(iter);
        set
    }
}

/// Nodes addressed by an id distinct from the node value.
///
/// Unlike [`NodeSet`], a repeated id is an error. Observers receive the id.
pub struct IdNodeSet<Id, V> {
    nodes: IndexMap<Id, V>,
    observers: Observers<Id>,
}

impl<Id: Clone + Eq + Hash + Debug, V> IdNodeSet<Id, V> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            nodes: IndexMap::new(),
            observers: Observers::new(),
        }
    }

    /// Register a change callback.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: for<'c> FnMut(Change<'c, Id>) + 'static,
    {
        self.observers.subscribe(callback);
    }

    /// Add a node under `id`, failing if the id is taken.
    pub fn add_node(&mut self, id: Id, value: V) -> GraphResult<()> {
        if self.nodes.contains_key(&id) {
            return Err(GraphError::duplicate_node(&id));
        }
        let (index, _) = self.nodes.insert_full(id, value);
        if let Some((added, _)) = self.nodes.get_index(index) {
            self.observers.notify(Change::Added(added));
        }
        Ok(())
    }

    /// Remove the node with this id and return its value.
    pub fn remove_node(&mut self, id: &Id) -> Option<V> {
        let (removed, value) = self.nodes.swap_remove_entry(id)?;
        self.observers.notify(Change::Removed(&removed));
        Some(value)
    }

    /// Remove every node.
    pub fn clear_nodes(&mut self) {
        if self.nodes.is_empty() {
            return;
        }
        self.nodes.clear();
        self.observers.notify(Change::Reset);
    }

    /// Look up a node by id.
    pub fn get_node(&self, id: &Id) -> Option<&V> {
        self.nodes.get(id)
    }

    /// Mutable lookup by id. Changes to the value are not observed.
    pub fn get_node_mut(&mut self, id: &Id) -> Option<&mut V> {
        self.nodes.get_mut(id)
    }

    /// Whether the id is present.
    pub fn exists_node(&self, id: &Id) -> bool {
        self.nodes.contains_key(id)
    }

    /// All ids.
    pub fn node_ids(&self) -> impl Iterator<Item = &Id> + '_ {
        self.nodes.keys()
    }

    /// All id/value pairs.
    pub fn nodes(&self) -> impl Iterator<Item = (&Id, &V)> + '_ {
        self.nodes.iter()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the set holds no node.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<Id: Clone + Eq + Hash + Debug, V> Default for IdNodeSet<Id, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: Debug, V: Debug> Debug for IdNodeSet<Id, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.nodes.iter()).finish()
    }
}
