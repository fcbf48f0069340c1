//! Dense topology view shared by the ranking algorithms
//!
//! Callers project their graph into this read-only CSR form once; the
//! iteration then works on contiguous arrays and dense indices only.

use std::collections::HashMap;

/// External vertex identifier type (i64)
pub type VertexKey = i64;

/// Compressed sparse row view of a directed multigraph.
///
/// Both edge directions are materialized so in-neighbor scans are as cheap
/// as out-neighbor scans. Parallel edges are kept as repeated entries, so
/// degrees count edges rather than distinct neighbors.
pub struct GraphView {
    /// Number of vertices
    pub vertex_count: usize,
    /// Dense index (0..N) back to the external vertex key
    pub index_to_vertex: Vec<VertexKey>,
    /// External vertex key to dense index
    pub vertex_to_index: HashMap<VertexKey, usize>,

    /// Offsets into `out_targets`, one entry per vertex plus a final end
    pub out_offsets: Vec<usize>,
    /// Flattened outbound targets as dense indices
    pub out_targets: Vec<usize>,

    /// Offsets into `in_sources`, one entry per vertex plus a final end
    pub in_offsets: Vec<usize>,
    /// Flattened inbound sources as dense indices
    pub in_sources: Vec<usize>,
}

impl GraphView {
    /// Outbound edge count of a vertex, parallel edges included
    pub fn out_degree(&self, idx: usize) -> usize {
        self.out_offsets[idx + 1] - self.out_offsets[idx]
    }

    /// Inbound edge count of a vertex, parallel edges included
    pub fn in_degree(&self, idx: usize) -> usize {
        self.in_offsets[idx + 1] - self.in_offsets[idx]
    }

    /// Targets of the outbound edges of a vertex
    pub fn successors(&self, idx: usize) -> &[usize] {
        &self.out_targets[self.out_offsets[idx]..self.out_offsets[idx + 1]]
    }

    /// Sources of the inbound edges of a vertex
    pub fn predecessors(&self, idx: usize) -> &[usize] {
        &self.in_sources[self.in_offsets[idx]..self.in_offsets[idx + 1]]
    }

    /// Build a view from per-vertex adjacency lists of dense indices.
    pub fn from_adjacency_list(
        vertex_count: usize,
        index_to_vertex: Vec<VertexKey>,
        vertex_to_index: HashMap<VertexKey, usize>,
        outgoing: Vec<Vec<usize>>,
        incoming: Vec<Vec<usize>>,
    ) -> Self {
        let (out_offsets, out_targets) = flatten(outgoing);
        let (in_offsets, in_sources) = flatten(incoming);

        GraphView {
            vertex_count,
            index_to_vertex,
            vertex_to_index,
            out_offsets,
            out_targets,
            in_offsets,
            in_sources,
        }
    }
}

/// Flatten adjacency lists into a CSR offsets/values pair
fn flatten(lists: Vec<Vec<usize>>) -> (Vec<usize>, Vec<usize>) {
    let mut offsets = Vec::with_capacity(lists.len() + 1);
    let mut values = Vec::new();

    offsets.push(0);
    for list in lists {
        values.extend(list);
        offsets.push(values.len());
    }
    (offsets, values)
}
