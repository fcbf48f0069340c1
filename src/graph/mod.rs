//! Directed multigraph built from integer edge pairs
//!
//! The data model is deliberately small:
//! - Vertices are integer ids, created implicitly by edge insertion
//! - Edges are directed; parallel edges and self-loops are preserved
//! - The vertex set is reported in ascending order for deterministic output

pub mod edge;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::Edge;
pub use store::GraphStore;
pub use types::{EdgeId, VertexId};
