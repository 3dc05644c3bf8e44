//! Adjacency indexes. Each index is incrementally updated alongside its edge set.

pub mod adjacency;
pub mod buckets;
pub mod incidence;

pub use adjacency::AdjacencyIndex;
pub use buckets::Buckets;
pub use incidence::IncidenceIndex;
