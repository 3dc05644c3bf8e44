//! All data types for the relgraph library.

pub mod depth;
pub mod edge;
pub mod error;
pub mod event;

pub use depth::{EdgeWithDepth, NodeWithDepth};
pub use edge::{Edge, GraphEdge, GraphNode, Identified, UndirectedEdge};
pub use error::{GraphError, GraphResult};
pub use event::{Change, Observers};
