//! Directed edge record

use super::types::{EdgeId, VertexId};
use serde::{Deserialize, Serialize};

/// A directed edge between two vertices
///
/// Identity is the [`EdgeId`], so parallel edges between the same ordered
/// pair of vertices stay distinct.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier for this edge
    pub id: EdgeId,

    /// Source vertex (edge goes FROM this vertex)
    pub source: VertexId,

    /// Target vertex (edge goes TO this vertex)
    pub target: VertexId,
}

impl Edge {
    /// Create a new directed edge
    pub fn new(id: EdgeId, source: VertexId, target: VertexId) -> Self {
        Edge { id, source, target }
    }

    /// Check if both endpoints are the same vertex
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Edge {}

impl std::hash::Hash for Edge {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
