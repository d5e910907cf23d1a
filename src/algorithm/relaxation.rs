use log::trace;
use num_traits::{Float, Zero};
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::hash::Hash;

use crate::algorithm::relaxer::DistanceRelaxer;
use crate::graph::{Edge, Graph};

/// Treatment state of a vertex during one traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexState {
    /// Not reached yet
    Unvisited,
    /// Reached, distance may still improve
    Frontier,
    /// Distance is final for this run
    Finished,
}

/// Per-run state shared by every relaxation-based shortest path algorithm.
///
/// Holds the distance table and vertex states of a single traversal and
/// exposes the [`relax`](RelaxationState::relax) primitive. The traversal
/// order itself is decided by the concrete algorithm driving it.
///
/// Distances only ever improve within a run: an absent entry stands for an
/// unreached vertex and is worse than any recorded distance.
pub struct RelaxationState<'a, V, E, W, G>
where
    V: Clone + Eq + Hash + Debug,
    E: Edge<V>,
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<V, E>,
{
    graph: &'a G,
    weights: Box<dyn Fn(&E) -> W + 'a>,
    relaxer: DistanceRelaxer,
    distances: HashMap<V, W>,
    vertex_states: HashMap<V, VertexState>,
    tree_edge: Option<Box<dyn FnMut(&E) + 'a>>,
}

impl<'a, V, E, W, G> RelaxationState<'a, V, E, W, G>
where
    V: Clone + Eq + Hash + Debug,
    E: Edge<V>,
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<V, E>,
{
    /// Creates the state for `graph` using the shortest-distance relaxer
    pub fn new<F>(graph: &'a G, weights: F) -> Self
    where
        F: Fn(&E) -> W + 'a,
    {
        RelaxationState {
            graph,
            weights: Box::new(weights),
            relaxer: DistanceRelaxer::default(),
            distances: HashMap::with_capacity(graph.vertex_count()),
            vertex_states: HashMap::with_capacity(graph.vertex_count()),
            tree_edge: None,
        }
    }

    /// Set the distance relaxer
    pub fn with_relaxer(mut self, relaxer: DistanceRelaxer) -> Self {
        self.relaxer = relaxer;
        self
    }

    /// Set the handler called with every edge whose relaxation improved its target
    pub fn on_tree_edge<H>(mut self, handler: H) -> Self
    where
        H: FnMut(&E) + 'a,
    {
        self.tree_edge = Some(Box::new(handler));
        self
    }

    /// Resets distances and vertex states, called once per traversal
    pub fn initialize(&mut self) {
        self.distances.clear();
        self.vertex_states.clear();
    }

    pub fn graph(&self) -> &'a G {
        self.graph
    }

    pub fn relaxer(&self) -> DistanceRelaxer {
        self.relaxer
    }

    /// Weight of `edge` under the configured weight function
    pub fn weight(&self, edge: &E) -> W {
        (self.weights)(edge)
    }

    /// Best known distance to `vertex`, if it has been reached
    pub fn try_get_distance(&self, vertex: &V) -> Option<W> {
        self.distances.get(vertex).copied()
    }

    pub fn distances(&self) -> &HashMap<V, W> {
        &self.distances
    }

    pub fn vertex_states(&self) -> &HashMap<V, VertexState> {
        &self.vertex_states
    }

    /// State of `vertex`, unvisited if it was never touched this run
    pub fn vertex_state(&self, vertex: &V) -> VertexState {
        self.vertex_states
            .get(vertex)
            .copied()
            .unwrap_or(VertexState::Unvisited)
    }

    /// Records a distance without comparison, used to seed traversal roots
    pub fn set_distance(&mut self, vertex: V, distance: W) {
        self.distances.insert(vertex, distance);
    }

    pub fn set_vertex_state(&mut self, vertex: V, state: VertexState) {
        self.vertex_states.insert(vertex, state);
    }

    /// Distance the target of `edge` would get by relaxing it, or `None` if
    /// that would not improve on the current one
    pub fn relaxed_distance(&self, edge: &E) -> Option<W> {
        let du = self.try_get_distance(edge.source())?;
        let candidate = self.relaxer.combine(du, self.weight(edge));
        match self.try_get_distance(edge.target()) {
            Some(dv) if !self.relaxer.is_better(candidate, dv) => None,
            _ => Some(candidate),
        }
    }

    /// Relaxes `edge`: if going through it improves the distance of its target,
    /// records the new distance, raises the tree-edge handler and returns true.
    pub fn relax(&mut self, edge: &E) -> bool {
        let Some(candidate) = self.relaxed_distance(edge) else {
            return false;
        };

        trace!("relaxed edge {:?} -> {:?} to {:?}", edge.source(), edge.target(), candidate);
        self.distances.insert(edge.target().clone(), candidate);
        if let Some(handler) = self.tree_edge.as_mut() {
            handler(edge);
        }
        true
    }
}

impl<'a, V, E, W, G> Debug for RelaxationState<'a, V, E, W, G>
where
    V: Clone + Eq + Hash + Debug,
    E: Edge<V>,
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<V, E>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelaxationState")
            .field("relaxer", &self.relaxer)
            .field("distances", &self.distances)
            .field("vertex_states", &self.vertex_states)
            .finish_non_exhaustive()
    }
}
