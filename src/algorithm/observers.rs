use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::graph::Edge;

/// Records, for every reached vertex, the last tree edge that improved it.
///
/// Hook it to a traversal with `on_tree_edge(|edge| recorder.record(edge))`.
#[derive(Debug, Clone)]
pub struct PredecessorRecorder<V, E>
where
    V: Clone + Eq + Hash + Debug,
    E: Edge<V> + Clone,
{
    predecessors: HashMap<V, E>,
}

impl<V, E> PredecessorRecorder<V, E>
where
    V: Clone + Eq + Hash + Debug,
    E: Edge<V> + Clone,
{
    pub fn new() -> Self {
        PredecessorRecorder {
            predecessors: HashMap::new(),
        }
    }

    /// Tree-edge handler
    pub fn record(&mut self, edge: &E) {
        self.predecessors.insert(edge.target().clone(), edge.clone());
    }

    /// Map from vertex to the edge it was last reached through
    pub fn predecessors(&self) -> &HashMap<V, E> {
        &self.predecessors
    }

    /// Edges from the traversal root to `target`.
    ///
    /// Returns `None` if `target` was never reached through an edge, which
    /// includes the root itself.
    pub fn try_get_path(&self, target: &V) -> Option<Vec<E>> {
        let mut path = Vec::new();
        let mut current = target;

        while let Some(edge) = self.predecessors.get(current) {
            // Safety check, a tree never has more edges than recorded vertices
            if path.len() >= self.predecessors.len() {
                return None;
            }
            path.push(edge.clone());
            current = edge.source();
        }

        if path.is_empty() {
            return None;
        }
        path.reverse();
        Some(path)
    }
}

impl<V, E> Default for PredecessorRecorder<V, E>
where
    V: Clone + Eq + Hash + Debug,
    E: Edge<V> + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
