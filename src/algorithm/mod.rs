pub mod traits;
pub mod relaxer;
pub mod relaxation;
pub mod observers;
pub mod dijkstra;
pub mod bellman_ford;
pub mod yen;

pub use traits::ShortestPathAlgorithm;
