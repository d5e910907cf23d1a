pub mod traits;
pub mod edge;
pub mod directed;

pub use traits::{Edge, Graph, MutableGraph};
pub use edge::TaggedEdge;
pub use directed::DirectedGraph;
