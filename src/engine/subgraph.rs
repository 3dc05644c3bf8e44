//! Sub-graph extraction and composition over directed graphs.

use crate::graph::traversal::{outgoing_edges, BfsConfig};
use crate::graph::{DirectedGraph, EdgeKeying};
use crate::types::{GraphEdge, GraphResult};

/// Everything reachable from `node` along outgoing edges.
///
/// The result keeps the duplicate policy of `graph` and each reached
/// edge with its multiplicity. Its node set holds `node` and the reached
/// endpoints, limited to nodes present in the node set of `graph`.
pub fn subgraph_from<'a, E, K>(
    graph: &'a DirectedGraph<E, K>,
    node: &E::Node,
    config: BfsConfig<'a, E>,
) -> GraphResult<DirectedGraph<E, K>>
where
    E: GraphEdge,
    K: EdgeKeying<E>,
{
    let mut sub = DirectedGraph::with_policy(graph.policy());
    if graph.exists_node(node) {
        sub.add_node(node.clone());
    }
    for edge in outgoing_edges(graph, node, config) {
        for endpoint in edge.nodes() {
            if graph.exists_node(endpoint) {
                sub.add_node(endpoint.clone());
            }
        }
        for _ in 0..graph.edge_set().multiplicity(edge) {
            sub.add_edge(edge.clone())?;
        }
    }
    log::debug!(
        "sub-graph from {:?}: {} nodes, {} edges",
        node,
        sub.node_count(),
        sub.edge_count()
    );
    Ok(sub)
}

/// Merge `sub` into `graph`.
///
/// An edge of `sub` is added only when `graph` has no edge between the same
/// endpoints yet. Endpoints known to the node set of `sub` are added to the
/// node set of `graph`. Returns how many edges were added.
pub fn add_subgraph<E, K>(
    graph: &mut DirectedGraph<E, K>,
    sub: &DirectedGraph<E, K>,
) -> GraphResult<usize>
where
    E: GraphEdge,
    K: EdgeKeying<E>,
{
    let mut added = 0;
    for edge in sub.edge_set().distinct_edges() {
        for endpoint in edge.nodes() {
            if sub.exists_node(endpoint) {
                graph.add_node(endpoint.clone());
            }
        }
        if graph.exists_edge_between(edge.source(), edge.target()) {
            continue;
        }
        graph.add_edge(edge.clone())?;
        added += 1;
    }
    Ok(added)
}

/// Remove the edges of `sub` from `graph`, then its nodes.
///
/// Each occurrence stored in `sub` removes one occurrence from `graph`.
/// Node removal cascades (and rewires) as [`DirectedGraph::remove_node`]
/// does. Returns how many nodes were removed.
pub fn remove_subgraph<E, K>(
    graph: &mut DirectedGraph<E, K>,
    sub: &DirectedGraph<E, K>,
) -> GraphResult<usize>
where
    E: GraphEdge,
    K: EdgeKeying<E>,
{
    let removed = sub.edges().filter(|edge| graph.remove_edge(edge)).count();
    log::debug!("removed {} sub-graph edges", removed);
    graph.remove_nodes(sub.nodes())
}

/// Copy every node and edge of `source` into `target`.
///
/// Stops at the first edge `target` rejects; what was copied before stays.
pub fn copy_to<E, K1, K2>(
    source: &DirectedGraph<E, K1>,
    target: &mut DirectedGraph<E, K2>,
) -> GraphResult<()>
where
    E: GraphEdge,
    K1: EdgeKeying<E>,
    K2: EdgeKeying<E>,
{
    target.add_nodes(source.nodes().cloned());
    target.add_edges(source.edges().cloned())
}
