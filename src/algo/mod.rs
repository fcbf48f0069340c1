//! Ranking over a [`GraphStore`]
//!
//! The power iteration itself lives in the `perron-algorithms` crate; this
//! module is the adapter layer that projects a store into the dense
//! topology view and maps scores back to vertex ids.

use crate::graph::{GraphStore, VertexId};
use perron_algorithms::{GraphView, PageRankRun};
use std::collections::HashMap;
use tracing::info;

// Re-export the algorithm surface
pub use perron_algorithms::{
    DanglingPolicy, Error as AlgoError, PageRankConfig, Result as AlgoResult,
};

/// Ranking result keyed by vertex id.
///
/// Scores are held in ascending vertex order, matching the order the
/// output contract presents them in.
#[derive(Debug, Clone)]
pub struct RankedScores {
    by_vertex: Vec<(VertexId, f64)>,
    /// Number of sweeps performed
    pub iterations: usize,
    /// Whether the tolerance was met before the iteration cap
    pub converged: bool,
}

impl RankedScores {
    /// Scores in ascending vertex order
    pub fn ascending(&self) -> impl Iterator<Item = (VertexId, f64)> + '_ {
        self.by_vertex.iter().copied()
    }

    /// Score of one vertex, if it is part of the ranked graph
    pub fn get(&self, vertex: VertexId) -> Option<f64> {
        self.by_vertex
            .binary_search_by_key(&vertex, |&(v, _)| v)
            .ok()
            .map(|found| self.by_vertex[found].1)
    }

    /// Sum of all scores, for diagnostic display
    pub fn total(&self) -> f64 {
        self.by_vertex.iter().map(|(_, score)| score).sum()
    }

    /// Number of ranked vertices
    pub fn len(&self) -> usize {
        self.by_vertex.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_vertex.is_empty()
    }
}

/// Build a dense topology view of the store for algorithm execution.
///
/// Dense indices are assigned in ascending vertex order, so the projection
/// does not depend on insertion order.
pub fn build_view(store: &GraphStore) -> GraphView {
    let vertices = store.vertices();

    let mut index_to_vertex = Vec::with_capacity(vertices.len());
    let mut vertex_to_index = HashMap::with_capacity(vertices.len());

    for (idx, &vertex) in vertices.iter().enumerate() {
        index_to_vertex.push(vertex.as_i64());
        vertex_to_index.insert(vertex.as_i64(), idx);
    }

    let vertex_count = index_to_vertex.len();
    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); vertex_count];
    let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); vertex_count];

    for edge in store.edges() {
        let source = vertex_to_index[&edge.source.as_i64()];
        let target = vertex_to_index[&edge.target.as_i64()];
        outgoing[source].push(target);
        incoming[target].push(source);
    }

    GraphView::from_adjacency_list(
        vertex_count,
        index_to_vertex,
        vertex_to_index,
        outgoing,
        incoming,
    )
}

/// Calculate PageRank for every vertex of the store.
pub fn page_rank(store: &GraphStore, config: PageRankConfig) -> AlgoResult<RankedScores> {
    let view = build_view(store);
    let run = perron_algorithms::page_rank(&view, config)?;
    Ok(collect_scores(&view, run))
}

/// Calculate PageRank with the sweeps spread over the rayon thread pool.
///
/// Scores are identical to [`page_rank`] on the same store and config.
pub fn page_rank_parallel(store: &GraphStore, config: PageRankConfig) -> AlgoResult<RankedScores> {
    let view = build_view(store);
    let run = perron_algorithms::page_rank_parallel(&view, config)?;
    Ok(collect_scores(&view, run))
}

fn collect_scores(view: &GraphView, run: PageRankRun) -> RankedScores {
    info!(
        "pagerank finished after {} iterations, converged: {}",
        run.iterations, run.converged
    );
    // Dense indices follow ascending vertex order, so the pairing is
    // already sorted
    let by_vertex = view
        .index_to_vertex
        .iter()
        .zip(run.scores)
        .map(|(&vertex, score)| (VertexId::new(vertex), score))
        .collect();
    RankedScores {
        by_vertex,
        iterations: run.iterations,
        converged: run.converged,
    }
}
