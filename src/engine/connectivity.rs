//! Connected-component partitioning of undirected edge sets.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::graph::traversal::{Bfs, BfsConfig};
use crate::graph::{AsUndirected, EdgeKeying, UndirectedEdgeSet, UndirectedNode};
use crate::types::GraphEdge;

/// Lazy iterator over the connected components of an undirected edge set.
///
/// Each component is the list of its edges in BFS order. Every edge belongs
/// to exactly one component; nodes without edges belong to none.
pub struct ConnectedPaths<'a, E: GraphEdge, K: EdgeKeying<E>> {
    set: &'a UndirectedEdgeSet<E, K>,
    cursor: usize,
    visited: HashSet<&'a E>,
}

impl<'a, E: GraphEdge, K: EdgeKeying<E>> Iterator for ConnectedPaths<'a, E, K> {
    type Item = Vec<&'a E>;

    fn next(&mut self) -> Option<Self::Item> {
        let set = self.set;
        loop {
            let seed = set.edge_collection().edge_at(self.cursor)?;
            self.cursor += 1;
            if self.visited.contains(seed) {
                continue;
            }
            let component: Vec<&'a E> = Bfs::undirected(set, seed.source(), BfsConfig::new())
                .map(|found| found.edge)
                .collect();
            log::trace!(
                "component seeded at {:?}: {} edges",
                seed.source(),
                component.len()
            );
            self.visited.extend(component.iter().copied());
            return Some(component);
        }
    }
}

/// Partition the edges of `graph` into connected components.
pub fn find_connected_paths<G: AsUndirected>(graph: &G) -> ConnectedPaths<'_, G::Edge, G::Keying> {
    ConnectedPaths {
        set: graph.as_undirected(),
        cursor: 0,
        visited: HashSet::new(),
    }
}

/// The distinct nodes of each connected component, in discovery order.
pub fn find_connected_nodes<G: AsUndirected>(
    graph: &G,
) -> impl Iterator<Item = Vec<&UndirectedNode<G>>> + '_ {
    find_connected_paths(graph).map(|component| {
        let mut seen = HashSet::new();
        let nodes: Vec<&UndirectedNode<G>> = component
            .into_iter()
            .flat_map(|edge| edge.nodes())
            .filter(|node| seen.insert(*node))
            .collect();
        nodes
    })
}

/// Nodes with exactly one connection.
///
/// Edges are grouped by source and, separately, by target. A node counted
/// in both groupings is never reported; otherwise it qualifies when its
/// single grouping holds exactly one edge.
pub fn nodes_with_single_connection<G: AsUndirected>(graph: &G) -> Vec<&UndirectedNode<G>> {
    let set = graph.as_undirected();
    let mut by_source: IndexMap<&UndirectedNode<G>, usize> = IndexMap::new();
    let mut by_target: IndexMap<&UndirectedNode<G>, usize> = IndexMap::new();
    for edge in set.edges() {
        *by_source.entry(edge.source()).or_insert(0) += 1;
        *by_target.entry(edge.target()).or_insert(0) += 1;
    }

    let sources = by_source
        .iter()
        .filter(|(node, count)| **count == 1 && !by_target.contains_key(*node));
    let targets = by_target
        .iter()
        .filter(|(node, count)| **count == 1 && !by_source.contains_key(*node));
    sources.chain(targets).map(|(node, _)| *node).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UndirectedEdge;

    #[test]
    fn test_empty_set_has_no_components() {
        let set: UndirectedEdgeSet<UndirectedEdge<u32>> = UndirectedEdgeSet::new();
        assert_eq!(find_connected_paths(&set).count(), 0);
        assert!(nodes_with_single_connection(&set).is_empty());
    }

    #[test]
    fn test_triangle_is_one_component_without_leaves() {
        let set: UndirectedEdgeSet<UndirectedEdge<u32>> = UndirectedEdgeSet::from_edges([
            UndirectedEdge::new(1, 2),
            UndirectedEdge::new(2, 3),
            UndirectedEdge::new(3, 1),
        ])
        .unwrap();
        let components: Vec<_> = find_connected_paths(&set).collect();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].len(), 3);
        assert!(nodes_with_single_connection(&set).is_empty());
    }
}
