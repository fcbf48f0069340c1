//! Perron
//!
//! PageRank over directed multigraphs built from delimited edge lists.
//!
//! The crate splits into three layers:
//! - [`graph`]: the [`GraphStore`] multigraph, built once by repeated edge
//!   insertion and read-only afterwards
//! - [`reader`]: parsing of delimited edge-list text into a store
//! - [`algo`]: the ranking entry points, backed by the `perron-algorithms`
//!   crate's power iteration
//!
//! # Example
//!
//! ```rust
//! use perron::{page_rank, GraphStore, PageRankConfig, VertexId};
//!
//! let mut graph = GraphStore::new();
//! graph.add_edge(VertexId::new(1), VertexId::new(2));
//! graph.add_edge(VertexId::new(2), VertexId::new(1));
//!
//! let ranked = page_rank(&graph, PageRankConfig::default()).unwrap();
//! assert!(ranked.converged);
//! assert!((ranked.get(VertexId::new(1)).unwrap() - 0.5).abs() < 1e-6);
//! assert!((ranked.total() - 1.0).abs() < 1e-6);
//! ```
//!
//! Reading the same graph from text:
//!
//! ```rust
//! use perron::{page_rank, read_edge_list, PageRankConfig};
//!
//! let graph = read_edge_list("1\t2\n2\t1\n".as_bytes(), "\t").unwrap();
//! let ranked = page_rank(&graph, PageRankConfig::default()).unwrap();
//!
//! for (vertex, score) in ranked.ascending() {
//!     println!("{} = {}", vertex, score);
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod graph;
pub mod reader;

// Re-export main types for convenience
pub use algo::{
    build_view, page_rank, page_rank_parallel, AlgoError, AlgoResult, DanglingPolicy,
    PageRankConfig, RankedScores,
};
pub use graph::{Edge, EdgeId, GraphStore, VertexId};
pub use reader::{
    read_edge_list, read_edge_list_path, read_named_edge_list, read_named_edge_list_path,
    ReadError, ReadResult, VertexNames,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
