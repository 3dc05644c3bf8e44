//! Tree-shaped queries over directed graphs.
//!
//! These read a [`DirectedGraph`] as a hierarchy where edges point from
//! parent to child.

use std::collections::HashSet;

use crate::graph::traversal::{incoming_nodes, BfsConfig};
use crate::graph::{DirectedGraph, EdgeKeying};
use crate::types::{GraphEdge, GraphResult};

/// Nodes of the node set without incoming edges.
pub fn root_nodes<E: GraphEdge, K: EdgeKeying<E>>(
    graph: &DirectedGraph<E, K>,
) -> impl Iterator<Item = &E::Node> + '_ {
    graph
        .nodes()
        .filter(|node| graph.edge_set().in_degree(node) == 0)
}

/// Distinct sources of the edges accepted by `filter` that are never the
/// target of any edge.
pub fn root_nodes_where<'a, E, K, F>(graph: &'a DirectedGraph<E, K>, filter: F) -> Vec<&'a E::Node>
where
    E: GraphEdge,
    K: EdgeKeying<E>,
    F: Fn(&E) -> bool,
{
    let mut seen = HashSet::new();
    graph
        .edges()
        .filter(|edge| filter(edge))
        .map(|edge| edge.source())
        .filter(|node| graph.edge_set().in_degree(node) == 0 && seen.insert(*node))
        .collect()
}

/// Nodes of the node set without outgoing edges.
pub fn terminal_nodes<E: GraphEdge, K: EdgeKeying<E>>(
    graph: &DirectedGraph<E, K>,
) -> impl Iterator<Item = &E::Node> + '_ {
    graph
        .nodes()
        .filter(|node| graph.edge_set().out_degree(node) == 0)
}

/// Nodes of the node set that are not the source of any edge accepted by
/// `filter`.
pub fn terminal_nodes_where<'a, E, K, F>(
    graph: &'a DirectedGraph<E, K>,
    filter: F,
) -> impl Iterator<Item = &'a E::Node> + 'a
where
    E: GraphEdge,
    K: EdgeKeying<E>,
    F: Fn(&E) -> bool + 'a,
{
    graph
        .nodes()
        .filter(move |node| !graph.outgoing_edges(node).any(|e| filter(e)))
}

/// All ancestors of `node` followed by its direct children, each once,
/// excluding `node` itself.
pub fn neighbors<'a, E: GraphEdge, K: EdgeKeying<E>>(
    graph: &'a DirectedGraph<E, K>,
    node: &'a E::Node,
) -> impl Iterator<Item = &'a E::Node> + 'a {
    let mut seen = HashSet::new();
    incoming_nodes(graph, node, BfsConfig::new())
        .chain(graph.outgoing_nodes(node))
        .filter(move |n| *n != node && seen.insert(*n))
}

/// The nearest ancestor satisfying `predicate`, searched breadth-first
/// within the limits of `config`.
pub fn find_ancestor<'a, E, K, P>(
    graph: &'a DirectedGraph<E, K>,
    node: &E::Node,
    predicate: P,
    config: BfsConfig<'a, E>,
) -> Option<&'a E::Node>
where
    E: GraphEdge,
    K: EdgeKeying<E>,
    P: Fn(&E::Node) -> bool,
{
    incoming_nodes(graph, node, config).find(|n| predicate(n))
}

/// Siblings of `node`: the other children of its direct parents.
///
/// For a node without parents the other root nodes are returned.
pub fn same_tree_level<'a, E: GraphEdge, K: EdgeKeying<E>>(
    graph: &'a DirectedGraph<E, K>,
    node: &E::Node,
) -> Vec<&'a E::Node> {
    let mut seen = HashSet::new();
    let mut level: Vec<&E::Node> = graph
        .incoming_nodes(node)
        .flat_map(|parent| graph.outgoing_nodes(parent))
        .filter(|n| *n != node && seen.insert(*n))
        .collect();
    if level.is_empty() && graph.edge_set().in_degree(node) == 0 {
        level = root_nodes(graph).filter(|n| *n != node).collect();
    }
    level
}

/// Move every edge of `source` onto `target`, then remove `source`.
///
/// Each incoming edge `a -> source` becomes `factory(a, target)` and each
/// outgoing edge `source -> b` becomes `factory(target, b)`. Repeated edges
/// are moved once, and a replacement that already exists is not added
/// twice. `target` is added to the node set if missing.
pub fn replace_node<E, K, F>(
    graph: &mut DirectedGraph<E, K>,
    source: &E::Node,
    target: E::Node,
    factory: F,
) -> GraphResult<()>
where
    E: GraphEdge,
    K: EdgeKeying<E>,
    F: Fn(&E::Node, &E::Node) -> E,
{
    let incoming: Vec<E> = graph.incoming_edges(source).cloned().collect();
    let outgoing: Vec<E> = graph
        .outgoing_edges(source)
        .filter(|e| !e.is_loop())
        .cloned()
        .collect();

    let mut replacements = Vec::with_capacity(incoming.len() + outgoing.len());
    for edge in &incoming {
        let from = if edge.is_loop() { &target } else { edge.source() };
        replacements.push(factory(from, &target));
    }
    for edge in &outgoing {
        replacements.push(factory(&target, edge.target()));
    }

    for edge in incoming.iter().chain(outgoing.iter()) {
        graph.purge_edge(edge);
    }
    graph.add_node(target);
    for edge in replacements {
        if !graph.exists_edge(&edge) {
            graph.add_edge(edge)?;
        }
    }
    log::debug!("replaced node {:?}", source);
    graph.remove_node(source)?;
    Ok(())
}
