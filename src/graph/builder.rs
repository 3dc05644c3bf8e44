//! Fluent API for building DirectedGraph instances.

use crate::types::{Edge, GraphNode, GraphResult};

use super::directed_graph::{DirectedGraph, RewirePolicy};

/// Fluent builder for constructing a directed graph over `Edge<N>`.
///
/// Linking two nodes also registers both of them in the node set.
pub struct GraphBuilder<N: GraphNode> {
    nodes: Vec<N>,
    edges: Vec<Edge<N>>,
    rewire: Option<RewirePolicy<Edge<N>>>,
}

impl<N: GraphNode> GraphBuilder<N> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            rewire: None,
        }
    }

    /// Add a node without edges.
    pub fn node(&mut self, node: N) -> &mut Self {
        self.nodes.push(node);
        self
    }

    /// Add an edge between two nodes.
    pub fn link(&mut self, source: N, target: N) -> &mut Self {
        self.nodes.push(source.clone());
        self.nodes.push(target.clone());
        self.edges.push(Edge::new(source, target));
        self
    }

    /// Link consecutive nodes: `a -> b -> c -> ...`.
    pub fn chain<I: IntoIterator<Item = N>>(&mut self, nodes: I) -> &mut Self {
        let mut previous: Option<N> = None;
        for node in nodes {
            match previous.take() {
                Some(prev) => {
                    self.link(prev, node.clone());
                }
                None => {
                    self.node(node.clone());
                }
            }
            previous = Some(node);
        }
        self
    }

    /// Link `parent` to each of `children`.
    pub fn children<I: IntoIterator<Item = N>>(&mut self, parent: N, children: I) -> &mut Self {
        self.nodes.push(parent.clone());
        for child in children {
            self.link(parent.clone(), child);
        }
        self
    }

    /// Connect parents to children whenever a node is removed from the built graph.
    pub fn rewire(&mut self) -> &mut Self
    where
        N: 'static,
    {
        self.rewire = Some(Box::new(|a: &N, b: &N| Some(Edge::new(a.clone(), b.clone()))));
        self
    }

    /// Build the final graph. Repeated links are reported as duplicate edges.
    pub fn build(&mut self) -> GraphResult<DirectedGraph<Edge<N>>> {
        let mut graph: DirectedGraph<Edge<N>> = DirectedGraph::new();
        graph.add_nodes(self.nodes.drain(..));
        graph.add_edges(self.edges.drain(..))?;
        graph.set_rewire(self.rewire.take());
        Ok(graph)
    }
}

impl<N: GraphNode> Default for GraphBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_and_children() {
        let graph = GraphBuilder::new()
            .chain(["a", "b", "c"])
            .children("c", ["d", "e"])
            .build()
            .unwrap();

        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 4);
        assert!(graph.exists_edge_between(&"b", &"c"));
        assert!(!graph.has_rewire());
    }

    #[test]
    fn test_duplicate_link_fails() {
        let result = GraphBuilder::new().link(1, 2).link(1, 2).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_rewire_is_installed() {
        let mut graph = GraphBuilder::new().chain([1, 2, 3]).rewire().build().unwrap();
        assert!(graph.remove_node(&2).unwrap());
        assert!(graph.exists_edge_between(&1, &3));
    }
}
