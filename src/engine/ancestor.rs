//! Nearest common ancestor of a set of nodes.

use std::collections::{HashSet, VecDeque};

use crate::graph::traversal::{incoming_nodes, BfsConfig};
use crate::graph::{AsDirected, DirectedNode};

/// Find an ancestor shared by every node in `nodes`.
///
/// The first node is the pivot: all of its ancestors are collected up front.
/// The ancestors of every other node are scanned lazily, in breadth-first
/// order, and only up to the next pivot ancestor. Scans take turns; a hit
/// becomes the answer once every scan has produced it.
///
/// Returns `None` for an empty or single-node query, as soon as one scan
/// runs out of ancestors without reaching the pivot's, or when all scans
/// are exhausted without agreeing.
pub fn common_parent<G, I>(graph: &G, nodes: I) -> Option<DirectedNode<G>>
where
    G: AsDirected,
    I: IntoIterator<Item = DirectedNode<G>>,
{
    let mut nodes = nodes.into_iter();
    let pivot = nodes.next()?;
    let others: Vec<DirectedNode<G>> = nodes.filter(|n| *n != pivot).collect();
    if others.is_empty() {
        return None;
    }

    let pivot_ancestors: HashSet<&DirectedNode<G>> =
        incoming_nodes(graph, &pivot, BfsConfig::new()).collect();
    if pivot_ancestors.is_empty() {
        return None;
    }

    let mut scans: Vec<_> = others
        .iter()
        .map(|node| incoming_nodes(graph, node, BfsConfig::new()))
        .collect();
    let mut hits: Vec<HashSet<&DirectedNode<G>>> = vec![HashSet::new(); scans.len()];
    let mut queue: VecDeque<usize> = (0..scans.len()).collect();

    while let Some(current) = queue.pop_front() {
        let Some(found) = scans[current].find(|n| pivot_ancestors.contains(n)) else {
            if hits[current].is_empty() {
                return None;
            }
            continue;
        };
        hits[current].insert(found);
        if hits.iter().all(|h| h.contains(found)) {
            return Some(found.clone());
        }
        log::debug!("common parent candidate {:?} not shared yet", found);
        queue.push_back(current);
    }

    None
}
