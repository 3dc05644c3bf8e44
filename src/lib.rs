//! relgraph: in-memory graphs with adjacency-indexed edge sets.
//!
//! Nodes and edges live in insertion-ordered sets whose incoming, outgoing
//! and incident buckets are kept in step with every mutation. Breadth-first
//! traversals read only those buckets and are exposed as lazy iterators, on
//! top of which sit common-ancestor search, connected-component
//! partitioning and a handful of hierarchy queries.
//!
//! ```
//! use relgraph::graph::traversal::outgoing_nodes;
//! use relgraph::{common_parent, BfsConfig, GraphBuilder};
//!
//! let graph = GraphBuilder::new()
//!     .children("root", ["a", "b"])
//!     .children("a", ["a1", "a2"])
//!     .build()
//!     .unwrap();
//!
//! let below: Vec<_> = outgoing_nodes(&graph, &"root", BfsConfig::new()).collect();
//! assert_eq!(below, vec![&"a", &"b", &"a1", &"a2"]);
//! assert_eq!(common_parent(&graph, ["a1", "a2"]), Some("a"));
//! ```

pub mod cli;
pub mod engine;
pub mod graph;
pub mod index;
pub mod types;

// Re-export commonly used types at the crate root
pub use engine::{
    common_parent, find_connected_nodes, find_connected_paths, nodes_with_single_connection,
};
pub use graph::{
    AsDirected, AsUndirected, BfsConfig, ById, ByValue, DirectedEdgeSet, DirectedGraph,
    DuplicatePolicy, EdgeSet, GraphBuilder, IdNodeSet, NodeSet, TraversalDirection,
    UndirectedEdgeSet, UndirectedGraph,
};
pub use types::{
    Change, Edge, EdgeWithDepth, GraphEdge, GraphError, GraphNode, GraphResult, Identified,
    NodeWithDepth, UndirectedEdge,
};
