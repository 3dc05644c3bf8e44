//! Graph algorithms built on the BFS traversal engine.

pub mod ancestor;
pub mod connectivity;
pub mod hierarchy;
pub mod subgraph;

pub use ancestor::common_parent;
pub use connectivity::{
    find_connected_nodes, find_connected_paths, nodes_with_single_connection, ConnectedPaths,
};
pub use hierarchy::{
    find_ancestor, neighbors, replace_node, root_nodes, root_nodes_where, same_tree_level,
    terminal_nodes, terminal_nodes_where,
};
pub use subgraph::{add_subgraph, copy_to, remove_subgraph, subgraph_from};
