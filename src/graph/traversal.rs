//! Graph traversal algorithms (BFS).
//!
//! Every traversal is a lazy iterator borrowing the edge set. The start node
//! sits at depth 0; an edge found while expanding a node at depth `d` is
//! reported at depth `d + 1`. Reaching `max_depth` on dequeue, or a node for
//! which the stop predicate holds, ends the whole traversal.

use std::collections::{HashSet, VecDeque};
use std::fmt;

use crate::types::{EdgeWithDepth, GraphEdge, NodeWithDepth};

use super::directed::{AsDirected, DirectedEdgeSet, DirectedNode};
use super::edge_set::EdgeKeying;
use super::undirected::{AsUndirected, UndirectedEdgeSet, UndirectedNode};

/// Direction for graph traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalDirection {
    /// Follow outgoing edges (source -> target).
    Forward,
    /// Follow incoming edges (target <- source).
    Backward,
    /// Follow edges in both directions.
    Both,
}

type EdgeFilter<'a, E> = Box<dyn Fn(&E) -> bool + 'a>;
type NodePredicate<'a, N> = Box<dyn Fn(&N) -> bool + 'a>;

/// Limits and predicates for a breadth-first traversal.
///
/// ```
/// use relgraph::{BfsConfig, Edge};
///
/// let config = BfsConfig::<Edge<u32>>::new()
///     .max_depth(2)
///     .filter(|e| e.target != 0)
///     .stop_when(|n| *n == 42);
/// assert_eq!(config.max_depth, Some(2));
/// ```
pub struct BfsConfig<'a, E: GraphEdge> {
    /// Deepest edge level reported. `None` walks the whole reachable graph.
    pub max_depth: Option<usize>,
    filter: Option<EdgeFilter<'a, E>>,
    stop: Option<NodePredicate<'a, E::Node>>,
}

impl<'a, E: GraphEdge> BfsConfig<'a, E> {
    /// Unlimited traversal with no filter.
    pub fn new() -> Self {
        Self {
            max_depth: None,
            filter: None,
            stop: None,
        }
    }

    /// Report edges up to this depth only.
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Only follow edges accepted by `filter`.
    #[must_use]
    pub fn filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&E) -> bool + 'a,
    {
        self.filter = Some(Box::new(filter));
        self
    }

    /// End the traversal when a dequeued node satisfies `stop`.
    ///
    /// The edge leading to that node has already been reported.
    #[must_use]
    pub fn stop_when<F>(mut self, stop: F) -> Self
    where
        F: Fn(&E::Node) -> bool + 'a,
    {
        self.stop = Some(Box::new(stop));
        self
    }

    fn accepts(&self, edge: &E) -> bool {
        self.filter.as_ref().map_or(true, |f| f(edge))
    }

    fn stops_at(&self, node: &E::Node, depth: usize) -> bool {
        self.max_depth == Some(depth) || self.stop.as_ref().is_some_and(|s| s(node))
    }
}

impl<E: GraphEdge> Default for BfsConfig<'_, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: GraphEdge> fmt::Debug for BfsConfig<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BfsConfig")
            .field("max_depth", &self.max_depth)
            .field("filter", &self.filter.is_some())
            .field("stop", &self.stop.is_some())
            .finish()
    }
}

/// Which buckets a traversal expands through.
enum Walk<'a, E: GraphEdge, K: EdgeKeying<E>> {
    Directed(&'a DirectedEdgeSet<E, K>, TraversalDirection),
    Undirected(&'a UndirectedEdgeSet<E, K>),
}

impl<E: GraphEdge, K: EdgeKeying<E>> Clone for Walk<'_, E, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: GraphEdge, K: EdgeKeying<E>> Copy for Walk<'_, E, K> {}

impl<'a, E: GraphEdge, K: EdgeKeying<E>> Walk<'a, E, K> {
    /// Calls `visit(edge, far_endpoint)` for every edge leaving `node`.
    fn expand<F>(self, node: &E::Node, mut visit: F)
    where
        F: FnMut(&'a E, &'a E::Node),
    {
        match self {
            Walk::Directed(set, direction) => {
                if direction != TraversalDirection::Backward {
                    for edge in set.outgoing_edges(node) {
                        visit(edge, edge.target());
                    }
                }
                if direction != TraversalDirection::Forward {
                    for edge in set.incoming_edges(node) {
                        visit(edge, edge.source());
                    }
                }
            }
            Walk::Undirected(set) => {
                for edge in set.edges_of(node) {
                    let far = if edge.source() == node {
                        edge.target()
                    } else {
                        edge.source()
                    };
                    visit(edge, far);
                }
            }
        }
    }
}

/// Lazy breadth-first traversal yielding depth-tagged edges.
pub struct Bfs<'a, E: GraphEdge, K: EdgeKeying<E>> {
    walk: Walk<'a, E, K>,
    config: BfsConfig<'a, E>,
    frontier: VecDeque<(E::Node, usize)>,
    visited_nodes: HashSet<E::Node>,
    visited_edges: HashSet<&'a E>,
    pending: VecDeque<EdgeWithDepth<&'a E>>,
    finished: bool,
}

impl<'a, E: GraphEdge, K: EdgeKeying<E>> Bfs<'a, E, K> {
    fn new<I>(walk: Walk<'a, E, K>, seeds: I, config: BfsConfig<'a, E>) -> Self
    where
        I: IntoIterator<Item = E::Node>,
    {
        Self {
            walk,
            config,
            frontier: seeds.into_iter().map(|n| (n, 0)).collect(),
            visited_nodes: HashSet::new(),
            visited_edges: HashSet::new(),
            pending: VecDeque::new(),
            finished: false,
        }
    }

    /// Traverse a directed set from `node`.
    pub fn directed(
        set: &'a DirectedEdgeSet<E, K>,
        node: &E::Node,
        direction: TraversalDirection,
        config: BfsConfig<'a, E>,
    ) -> Self {
        Self::new(Walk::Directed(set, direction), [node.clone()], config)
    }

    /// Traverse an undirected set from `node`.
    pub fn undirected(
        set: &'a UndirectedEdgeSet<E, K>,
        node: &E::Node,
        config: BfsConfig<'a, E>,
    ) -> Self {
        Self::new(Walk::Undirected(set), [node.clone()], config)
    }

    /// Traverse an undirected set outward from both endpoints of `edge`.
    ///
    /// The seed edge itself is never reported.
    pub fn undirected_from_edge(
        set: &'a UndirectedEdgeSet<E, K>,
        edge: &E,
        config: BfsConfig<'a, E>,
    ) -> Self {
        let mut seeds = vec![edge.source().clone()];
        if !edge.is_loop() {
            seeds.push(edge.target().clone());
        }
        let mut bfs = Self::new(Walk::Undirected(set), seeds, config);
        if let Some(stored) = set.edge_collection().get_by_key(&K::key(edge)) {
            bfs.visited_edges.insert(stored);
        }
        bfs
    }

    /// Whether `node` has been expanded so far.
    pub fn has_visited(&self, node: &E::Node) -> bool {
        self.visited_nodes.contains(node)
    }

    fn finish(&mut self) {
        self.finished = true;
        self.frontier.clear();
    }
}

impl<'a, E: GraphEdge, K: EdgeKeying<E>> Iterator for Bfs<'a, E, K> {
    type Item = EdgeWithDepth<&'a E>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(found) = self.pending.pop_front() {
                return Some(found);
            }
            if self.finished {
                return None;
            }
            let Some((node, depth)) = self.frontier.pop_front() else {
                self.finished = true;
                return None;
            };
            if self.config.stops_at(&node, depth) {
                log::trace!("bfs stopped at {:?} (depth {})", node, depth);
                self.finish();
                return None;
            }
            if self.visited_nodes.contains(&node) {
                continue;
            }

            let next_depth = depth + 1;
            let walk = self.walk;
            let config = &self.config;
            let visited_edges = &mut self.visited_edges;
            let pending = &mut self.pending;
            let frontier = &mut self.frontier;
            walk.expand(&node, |edge, far| {
                if !config.accepts(edge) || !visited_edges.insert(edge) {
                    return;
                }
                pending.push_back(EdgeWithDepth {
                    edge,
                    depth: next_depth,
                });
                frontier.push_back((far.clone(), next_depth));
            });
            log::trace!(
                "bfs expanded {:?} at depth {}: {} new edges",
                node,
                depth,
                self.pending.len()
            );
            self.visited_nodes.insert(node);
        }
    }
}

/// BFS along outgoing edges, without depth tags.
pub fn outgoing_edges<'a, G: AsDirected>(
    graph: &'a G,
    node: &DirectedNode<G>,
    config: BfsConfig<'a, G::Edge>,
) -> impl Iterator<Item = &'a G::Edge> + 'a {
    outgoing_edges_with_depth(graph, node, config).map(|found| found.edge)
}

/// BFS along outgoing edges.
pub fn outgoing_edges_with_depth<'a, G: AsDirected>(
    graph: &'a G,
    node: &DirectedNode<G>,
    config: BfsConfig<'a, G::Edge>,
) -> Bfs<'a, G::Edge, G::Keying> {
    Bfs::directed(graph.as_directed(), node, TraversalDirection::Forward, config)
}

/// Targets of the edges found by [`outgoing_edges`].
///
/// A node reached over several edges is reported once per edge.
pub fn outgoing_nodes<'a, G: AsDirected>(
    graph: &'a G,
    node: &DirectedNode<G>,
    config: BfsConfig<'a, G::Edge>,
) -> impl Iterator<Item = &'a DirectedNode<G>> + 'a {
    outgoing_edges(graph, node, config).map(|e| e.target())
}

/// Targets of the outgoing BFS edges, tagged with the edge depth.
pub fn outgoing_nodes_with_depth<'a, G: AsDirected>(
    graph: &'a G,
    node: &DirectedNode<G>,
    config: BfsConfig<'a, G::Edge>,
) -> impl Iterator<Item = NodeWithDepth<&'a DirectedNode<G>>> + 'a {
    outgoing_edges_with_depth(graph, node, config).map(|found| NodeWithDepth {
        node: found.edge.target(),
        depth: found.depth,
    })
}

/// BFS along incoming edges (towards ancestors), without depth tags.
pub fn incoming_edges<'a, G: AsDirected>(
    graph: &'a G,
    node: &DirectedNode<G>,
    config: BfsConfig<'a, G::Edge>,
) -> impl Iterator<Item = &'a G::Edge> + 'a {
    incoming_edges_with_depth(graph, node, config).map(|found| found.edge)
}

/// BFS along incoming edges.
pub fn incoming_edges_with_depth<'a, G: AsDirected>(
    graph: &'a G,
    node: &DirectedNode<G>,
    config: BfsConfig<'a, G::Edge>,
) -> Bfs<'a, G::Edge, G::Keying> {
    Bfs::directed(graph.as_directed(), node, TraversalDirection::Backward, config)
}

/// Sources of the edges found by [`incoming_edges`]: the ancestors of `node`
/// in breadth-first order.
pub fn incoming_nodes<'a, G: AsDirected>(
    graph: &'a G,
    node: &DirectedNode<G>,
    config: BfsConfig<'a, G::Edge>,
) -> impl Iterator<Item = &'a DirectedNode<G>> + 'a {
    incoming_edges(graph, node, config).map(|e| e.source())
}

/// Sources of the incoming BFS edges, tagged with the edge depth.
pub fn incoming_nodes_with_depth<'a, G: AsDirected>(
    graph: &'a G,
    node: &DirectedNode<G>,
    config: BfsConfig<'a, G::Edge>,
) -> impl Iterator<Item = NodeWithDepth<&'a DirectedNode<G>>> + 'a {
    incoming_edges_with_depth(graph, node, config).map(|found| NodeWithDepth {
        node: found.edge.source(),
        depth: found.depth,
    })
}

/// BFS over a directed set ignoring edge direction.
pub fn reachable_edges_with_depth<'a, G: AsDirected>(
    graph: &'a G,
    node: &DirectedNode<G>,
    config: BfsConfig<'a, G::Edge>,
) -> Bfs<'a, G::Edge, G::Keying> {
    Bfs::directed(graph.as_directed(), node, TraversalDirection::Both, config)
}

/// Every edge reachable from `node` in an undirected set.
pub fn connected_edges<'a, G: AsUndirected>(
    graph: &'a G,
    node: &UndirectedNode<G>,
    config: BfsConfig<'a, G::Edge>,
) -> impl Iterator<Item = &'a G::Edge> + 'a {
    connected_edges_with_depth(graph, node, config).map(|found| found.edge)
}

/// Every edge reachable from `node`, tagged with its BFS level.
pub fn connected_edges_with_depth<'a, G: AsUndirected>(
    graph: &'a G,
    node: &UndirectedNode<G>,
    config: BfsConfig<'a, G::Edge>,
) -> Bfs<'a, G::Edge, G::Keying> {
    Bfs::undirected(graph.as_undirected(), node, config)
}

/// Every edge reachable from either endpoint of `edge`, excluding `edge`.
pub fn connected_edges_from_edge<'a, G: AsUndirected>(
    graph: &'a G,
    edge: &G::Edge,
    config: BfsConfig<'a, G::Edge>,
) -> impl Iterator<Item = &'a G::Edge> + 'a {
    Bfs::undirected_from_edge(graph.as_undirected(), edge, config).map(|found| found.edge)
}

/// Nodes reachable from `node`, excluding `node`, each reported once in
/// discovery order.
pub fn connected_nodes<'a, G: AsUndirected>(
    graph: &'a G,
    node: &UndirectedNode<G>,
    config: BfsConfig<'a, G::Edge>,
) -> impl Iterator<Item = &'a UndirectedNode<G>> + 'a {
    let start = node.clone();
    let mut seen: HashSet<&'a UndirectedNode<G>> = HashSet::new();
    connected_edges(graph, node, config)
        .flat_map(|edge| edge.nodes())
        .filter(move |n| **n != start && seen.insert(*n))
}
