pub mod common;
pub mod pagerank;

pub use common::{GraphView, VertexKey};
pub use pagerank::{page_rank, page_rank_parallel, DanglingPolicy, PageRankConfig, PageRankRun};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, Error>;
