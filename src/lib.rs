//! Relaxgraph - approximate priority queues and relaxation-based shortest paths
//!
//! This library provides three related pieces:
//! - a soft heap, an approximate priority queue whose amortized cost depends only
//!   on the configured error rate and not on the number of stored items;
//! - a shortest-path framework built around a single distance relaxation step,
//!   parameterized by a distance relaxer (min-plus, max-plus, bottleneck);
//! - Yen's k-shortest loopless paths, repeatedly driving that framework over a
//!   private working copy of the caller's graph.

pub mod algorithm;
pub mod data_structures;
pub mod graph;

pub use algorithm::{
    bellman_ford::BellmanFord, dijkstra::Dijkstra, observers::PredecessorRecorder,
    relaxation::{RelaxationState, VertexState}, relaxer::DistanceRelaxer,
    yen::{SortedPath, YenShortestPaths}, ShortestPathAlgorithm,
};
pub use data_structures::SoftHeap;
/// Re-export main types for convenient use
pub use graph::{DirectedGraph, Edge, TaggedEdge};

/// Error types for the library
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No path found between source and target")]
    NoPathFound,

    #[error("Heap is empty")]
    EmptyHeap,

    #[error("Vertex not found in graph: {0}")]
    VertexNotFound(String),

    #[error("Negative edge weight: {0}")]
    NegativeWeight(f64),

    #[error("Cycle with improving distance reachable from source")]
    NegativeCycle,
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
