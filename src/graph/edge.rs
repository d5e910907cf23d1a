use serde::{Deserialize, Serialize};

use crate::graph::traits::Edge;

/// A directed edge carrying a tag, compared by value on all three fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaggedEdge<V, T> {
    /// Vertex the edge leaves from
    pub source: V,

    /// Vertex the edge points to
    pub target: V,

    /// Payload, used as the default weight by the k-shortest-paths search
    pub tag: T,
}

impl<V, T> TaggedEdge<V, T> {
    /// Creates a new tagged edge
    pub fn new(source: V, target: V, tag: T) -> Self {
        TaggedEdge {
            source,
            target,
            tag,
        }
    }

    /// Returns the edge tag
    pub fn tag(&self) -> &T {
        &self.tag
    }
}

impl<V, T> Edge<V> for TaggedEdge<V, T> {
    fn source(&self) -> &V {
        &self.source
    }

    fn target(&self) -> &V {
        &self.target
    }
}

/// Untagged `(source, target)` pairs, for graphs whose weights live elsewhere
impl<V> Edge<V> for (V, V) {
    fn source(&self) -> &V {
        &self.0
    }

    fn target(&self) -> &V {
        &self.1
    }
}
