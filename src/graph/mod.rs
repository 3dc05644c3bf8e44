//! In-memory graph containers and traversal.

pub mod builder;
pub mod directed;
pub mod directed_graph;
pub mod edge_set;
pub mod node_set;
pub mod traversal;
pub mod undirected;
pub mod undirected_graph;

pub use builder::GraphBuilder;
pub use directed::{AsDirected, DirectedEdgeSet, DirectedNode};
pub use directed_graph::{DirectedGraph, RewirePolicy};
pub use edge_set::{BucketEdges, ById, ByValue, DuplicatePolicy, EdgeKeying, EdgeSet};
pub use node_set::{IdNodeSet, NodeSet};
pub use traversal::{Bfs, BfsConfig, TraversalDirection};
pub use undirected::{AsUndirected, UndirectedEdgeSet, UndirectedNode};
pub use undirected_graph::UndirectedGraph;
