//! Bellman-Ford on top of the relaxation state. Unlike Dijkstra it accepts
//! negative weights, and reports a cycle that keeps improving distances
//! instead of looping on it.

use log::debug;
use num_traits::{Float, Zero};
use std::fmt::Debug;
use std::hash::Hash;

use crate::algorithm::relaxation::{RelaxationState, VertexState};
use crate::algorithm::relaxer::DistanceRelaxer;
use crate::algorithm::ShortestPathAlgorithm;
use crate::graph::{Edge, Graph};
use crate::{Error, Result};

#[derive(Debug)]
pub struct BellmanFord<'a, V, E, W, G>
where
    V: Clone + Eq + Hash + Debug,
    E: Edge<V>,
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<V, E>,
{
    state: RelaxationState<'a, V, E, W, G>,
}

impl<'a, V, E, W, G> BellmanFord<'a, V, E, W, G>
where
    V: Clone + Eq + Hash + Debug,
    E: Edge<V>,
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<V, E>,
{
    pub fn new<F>(graph: &'a G, weights: F) -> Self
    where
        F: Fn(&E) -> W + 'a,
    {
        BellmanFord {
            state: RelaxationState::new(graph, weights),
        }
    }

    /// Set the distance relaxer
    pub fn with_relaxer(mut self, relaxer: DistanceRelaxer) -> Self {
        self.state = self.state.with_relaxer(relaxer);
        self
    }

    /// Set the handler raised for every tree edge
    pub fn on_tree_edge<H>(mut self, handler: H) -> Self
    where
        H: FnMut(&E) + 'a,
    {
        self.state = self.state.on_tree_edge(handler);
        self
    }

    pub fn state(&self) -> &RelaxationState<'a, V, E, W, G> {
        &self.state
    }
}

impl<'a, V, E, W, G> ShortestPathAlgorithm<V, W> for BellmanFord<'a, V, E, W, G>
where
    V: Clone + Eq + Hash + Debug,
    E: Edge<V>,
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<V, E>,
{
    fn name(&self) -> &'static str {
        "Bellman-Ford"
    }

    fn compute(&mut self, root: &V) -> Result<()> {
        let graph = self.state.graph();
        if !graph.contains_vertex(root) {
            return Err(Error::VertexNotFound(format!("{:?}", root)));
        }

        let relaxer = self.state.relaxer();
        self.state.initialize();
        self.state.set_distance(root.clone(), relaxer.source_distance());
        self.state.set_vertex_state(root.clone(), VertexState::Frontier);

        // scan up to |V| - 1 times.
        let mut passes = 0;
        for _ in 1..graph.vertex_count() {
            passes += 1;
            let mut did_update = false;
            for u in graph.vertices() {
                for edge in graph.out_edges(u) {
                    if self.state.relax(edge) {
                        self.state
                            .set_vertex_state(edge.target().clone(), VertexState::Frontier);
                        did_update = true;
                    }
                }
            }
            if !did_update {
                break;
            }
        }

        // any edge that still improves its target lies on or behind an improving cycle
        for u in graph.vertices() {
            if graph
                .out_edges(u)
                .any(|edge| self.state.relaxed_distance(edge).is_some())
            {
                return Err(Error::NegativeCycle);
            }
        }

        let reached: Vec<V> = self.state.distances().keys().cloned().collect();
        for v in reached {
            self.state.set_vertex_state(v, VertexState::Finished);
        }

        debug!(
            "Bellman-Ford from {:?} reached {} vertices in {} passes",
            root,
            self.state.distances().len(),
            passes
        );
        Ok(())
    }

    fn try_get_distance(&self, vertex: &V) -> Option<W> {
        self.state.try_get_distance(vertex)
    }
}
