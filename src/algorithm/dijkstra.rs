use log::debug;
use num_traits::{Float, ToPrimitive, Zero};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::algorithm::relaxation::{RelaxationState, VertexState};
use crate::algorithm::relaxer::{DistanceRelaxer, RelaxedDistance};
use crate::algorithm::ShortestPathAlgorithm;
use crate::data_structures::BinaryHeapWrapper;
use crate::graph::{Edge, Graph};
use crate::{Error, Result};

/// Classic Dijkstra's algorithm on top of the relaxation state.
///
/// Vertices are settled in relaxer order, so the relaxer must never let an
/// edge improve on the distance it extends: non-negative weights for
/// [`DistanceRelaxer::ShortestDistance`], non-positive weights for
/// [`DistanceRelaxer::CriticalDistance`], any weights for
/// [`DistanceRelaxer::Bottleneck`]. An edge breaking this fails the run with
/// `NegativeWeight` under the shortest-distance relaxer and `InvalidArgument`
/// otherwise.
#[derive(Debug)]
pub struct Dijkstra<'a, V, E, W, G>
where
    V: Clone + Eq + Hash + Debug,
    E: Edge<V>,
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<V, E>,
{
    state: RelaxationState<'a, V, E, W, G>,
}

impl<'a, V, E, W, G> Dijkstra<'a, V, E, W, G>
where
    V: Clone + Eq + Hash + Debug,
    E: Edge<V>,
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<V, E>,
{
    /// Creates a new Dijkstra algorithm instance over `graph`
    pub fn new<F>(graph: &'a G, weights: F) -> Self
    where
        F: Fn(&E) -> W + 'a,
    {
        Dijkstra {
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

    /// Relaxation state of the last run
    pub fn state(&self) -> &RelaxationState<'a, V, E, W, G> {
        &self.state
    }
}

impl<'a, V, E, W, G> ShortestPathAlgorithm<V, W> for Dijkstra<'a, V, E, W, G>
where
    V: Clone + Eq + Hash + Debug,
    E: Edge<V>,
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<V, E>,
{
    fn name(&self) -> &'static str {
        "Dijkstra"
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

        // Vertices are queued by discovery index, which also breaks ties
        let mut index: HashMap<V, usize> = HashMap::new();
        let mut discovered: Vec<V> = Vec::new();
        index.insert(root.clone(), 0);
        discovered.push(root.clone());

        let mut queue = BinaryHeapWrapper::with_capacity(graph.vertex_count());
        queue.push(0, RelaxedDistance::new(relaxer.source_distance(), relaxer));

        // Main Dijkstra loop
        while let Some((u_index, _)) = queue.pop() {
            let u = discovered[u_index].clone();

            // Stale entry, a better one was already settled
            if self.state.vertex_state(&u) == VertexState::Finished {
                continue;
            }
            self.state.set_vertex_state(u.clone(), VertexState::Finished);

            let Some(du) = self.state.try_get_distance(&u) else {
                continue;
            };

            // Relax all outgoing edges
            for edge in graph.out_edges(&u) {
                // A settled distance must not improve through its own out-edges
                let weight = self.state.weight(edge);
                if relaxer.is_better(relaxer.combine(du, weight), du) {
                    return Err(match relaxer {
                        DistanceRelaxer::ShortestDistance => {
                            Error::NegativeWeight(weight.to_f64().unwrap_or(f64::NAN))
                        }
                        _ => Error::InvalidArgument(format!(
                            "edge {:?} -> {:?} of weight {:?} improves on {:?} under {:?}",
                            edge.source(),
                            edge.target(),
                            weight,
                            du,
                            relaxer
                        )),
                    });
                }

                let v = edge.target();
                if self.state.vertex_state(v) == VertexState::Finished {
                    continue;
                }

                if self.state.relax(edge) {
                    let v_index = *index.entry(v.clone()).or_insert_with(|| {
                        discovered.push(v.clone());
                        discovered.len() - 1
                    });
                    self.state.set_vertex_state(v.clone(), VertexState::Frontier);
                    if let Some(distance) = self.state.try_get_distance(v) {
                        queue.push(v_index, RelaxedDistance::new(distance, relaxer));
                    }
                }
            }
        }

        debug!(
            "Dijkstra from {:?} settled {} vertices",
            root,
            self.state.distances().len()
        );
        Ok(())
    }

    fn try_get_distance(&self, vertex: &V) -> Option<W> {
        self.state.try_get_distance(vertex)
    }
}
