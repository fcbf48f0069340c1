//! In-memory directed multigraph storage

use super::edge::Edge;
use super::types::{EdgeId, VertexId};
use rustc_hash::FxHashMap;

/// In-memory directed multigraph
///
/// Vertices come into existence the first time they appear as an endpoint of
/// an inserted edge; there is no separate vertex-creation call. Parallel
/// edges and self-loops are kept as distinct edges.
///
/// Uses hash maps for O(1) adjacency lookup:
/// - outgoing: VertexId -> Vec<EdgeId>
/// - incoming: VertexId -> Vec<EdgeId>
///
/// Both maps carry an entry for every known vertex, so their key sets equal
/// the vertex set. The store is built once by repeated [`add_edge`] calls
/// and read-only afterwards.
///
/// [`add_edge`]: GraphStore::add_edge
#[derive(Debug, Default)]
pub struct GraphStore {
    /// Edge storage, indexed by EdgeId
    edges: Vec<Edge>,

    /// Outgoing edges for each vertex (adjacency list)
    outgoing: FxHashMap<VertexId, Vec<EdgeId>>,

    /// Incoming edges for each vertex (adjacency list)
    incoming: FxHashMap<VertexId, Vec<EdgeId>>,
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a directed edge, creating either endpoint if it is new.
    ///
    /// Self-loops are allowed; they count toward both the out-degree and the
    /// in-degree of the vertex. Inserting the same pair again adds another,
    /// distinct edge.
    pub fn add_edge(&mut self, source: VertexId, target: VertexId) -> EdgeId {
        let id = EdgeId::new(self.edges.len() as u64);
        self.edges.push(Edge::new(id, source, target));

        self.outgoing.entry(source).or_default().push(id);
        self.incoming.entry(target).or_default().push(id);
        // Make sure both endpoints exist in both maps
        self.outgoing.entry(target).or_default();
        self.incoming.entry(source).or_default();

        id
    }

    /// All known vertices in ascending order, independent of insertion order
    pub fn vertices(&self) -> Vec<VertexId> {
        let mut vertices: Vec<VertexId> = self.outgoing.keys().copied().collect();
        vertices.sort_unstable();
        vertices
    }

    /// Target of every outbound edge from a vertex, parallel edges repeated
    pub fn out_edges(&self, vertex: VertexId) -> Vec<VertexId> {
        self.outgoing
            .get(&vertex)
            .map(|edge_ids| {
                edge_ids
                    .iter()
                    .filter_map(|&id| self.get_edge(id))
                    .map(|edge| edge.target)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Source of every inbound edge to a vertex, parallel edges repeated
    pub fn in_neighbors(&self, vertex: VertexId) -> Vec<VertexId> {
        self.incoming
            .get(&vertex)
            .map(|edge_ids| {
                edge_ids
                    .iter()
                    .filter_map(|&id| self.get_edge(id))
                    .map(|edge| edge.source)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of outbound edges of a vertex, counting parallel edges
    pub fn out_degree(&self, vertex: VertexId) -> usize {
        self.outgoing.get(&vertex).map_or(0, |edges| edges.len())
    }

    /// Number of inbound edges of a vertex, counting parallel edges
    pub fn in_degree(&self, vertex: VertexId) -> usize {
        self.incoming.get(&vertex).map_or(0, |edges| edges.len())
    }

    /// Check whether a vertex appears in the graph
    pub fn has_vertex(&self, vertex: VertexId) -> bool {
        self.outgoing.contains_key(&vertex)
    }

    /// Get an edge by id
    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.as_u64() as usize)
    }

    /// All edges in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Get total number of vertices
    pub fn vertex_count(&self) -> usize {
        self.outgoing.len()
    }

    /// Get total number of edges, counting parallel edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
