use log::debug;
use num_traits::{Float, Zero};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::hash::Hash;

use crate::algorithm::dijkstra::Dijkstra;
use crate::algorithm::observers::PredecessorRecorder;
use crate::algorithm::ShortestPathAlgorithm;
use crate::graph::{DirectedGraph, Graph, MutableGraph, TaggedEdge};
use crate::{Error, Result};

/// A loopless path from source to target together with its total weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortedPath<V, W> {
    edges: Vec<TaggedEdge<V, W>>,
    weight: W,
}

impl<V, W> SortedPath<V, W>
where
    V: Clone,
    W: Copy,
{
    pub fn edges(&self) -> &[TaggedEdge<V, W>] {
        &self.edges
    }

    /// Sum of the edge weights under the weight function used by the search
    pub fn weight(&self) -> W {
        self.weight
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TaggedEdge<V, W>> {
        self.edges.iter()
    }

    /// Vertices along the path, source first
    pub fn vertices(&self) -> Vec<V> {
        let mut vertices = Vec::with_capacity(self.edges.len() + 1);
        if let Some(first) = self.edges.first() {
            vertices.push(first.source.clone());
        }
        vertices.extend(self.edges.iter().map(|edge| edge.target.clone()));
        vertices
    }
}

impl<'p, V, W> IntoIterator for &'p SortedPath<V, W> {
    type Item = &'p TaggedEdge<V, W>;
    type IntoIter = std::slice::Iter<'p, TaggedEdge<V, W>>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

type WeightFn<V, W> = Box<dyn Fn(&TaggedEdge<V, W>) -> W>;
type PathFilter<V, W> = Box<dyn Fn(Vec<SortedPath<V, W>>) -> Vec<SortedPath<V, W>>>;

/// Yen's k-shortest loopless paths between two vertices, for graphs with
/// non-negative edge weights.
///
/// The search works on a private clone of the caller's graph. After the first
/// shortest path is found, each iteration trial-removes every edge of the last
/// accepted path in turn, recomputes a shortest path without it and restores it.
/// The cheapest of those detours (first one wins on ties) is accepted and the
/// edge whose removal produced it is removed for good.
///
/// Successive paths are kept apart only through those permanent removals, there
/// is no root/spur path bookkeeping.
pub struct YenShortestPaths<V, W, G = DirectedGraph<V, TaggedEdge<V, W>>>
where
    V: Clone + Eq + Hash + Debug,
    W: Float + Zero + Debug + Copy + Ord,
    G: MutableGraph<V, TaggedEdge<V, W>>,
{
    source: V,
    target: V,
    k: usize,
    graph: G,
    weights: WeightFn<V, W>,
    filter: PathFilter<V, W>,
    removed_edges: Vec<TaggedEdge<V, W>>,
}

impl<V, W, G> YenShortestPaths<V, W, G>
where
    V: Clone + Eq + Hash + Debug + 'static,
    W: Float + Zero + Debug + Copy + Ord + 'static,
    G: MutableGraph<V, TaggedEdge<V, W>>,
{
    /// Prepares a search for at most `k` paths from `source` to `target`.
    ///
    /// Edge tags are used as weights unless [`with_weights`](Self::with_weights)
    /// says otherwise. Fails with `InvalidArgument` if `k` is zero.
    pub fn new(graph: &G, source: V, target: V, k: usize) -> Result<Self> {
        if k < 1 {
            return Err(Error::InvalidArgument(
                "k must be at least 1".to_string(),
            ));
        }

        Ok(YenShortestPaths {
            source,
            target,
            k,
            graph: graph.clone(),
            weights: Box::new(|edge: &TaggedEdge<V, W>| edge.tag),
            filter: Box::new(|paths| paths),
            removed_edges: Vec::new(),
        })
    }

    /// Set the function computing edge weights
    pub fn with_weights<F>(mut self, weights: F) -> Self
    where
        F: Fn(&TaggedEdge<V, W>) -> W + 'static,
    {
        self.weights = Box::new(weights);
        self
    }

    /// Set the filter applied to the found paths before they are returned
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(Vec<SortedPath<V, W>>) -> Vec<SortedPath<V, W>> + 'static,
    {
        self.filter = Box::new(filter);
        self
    }

    pub fn source(&self) -> &V {
        &self.source
    }

    pub fn target(&self) -> &V {
        &self.target
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Edges permanently removed from the working graph, in discovery order
    pub fn removed_edges(&self) -> &[TaggedEdge<V, W>] {
        &self.removed_edges
    }

    /// Runs the search.
    ///
    /// Returns between 1 and `k` paths in ascending weight order, then passed
    /// through the filter. Fails with `NoPathFound` if not even one path exists.
    /// The working graph keeps its permanent removals, so a second call
    /// continues from where the first one stopped.
    pub fn execute(&mut self) -> Result<Vec<SortedPath<V, W>>> {
        // In case the root vertex is not in the graph then there is no path found
        if !self.graph.contains_vertex(&self.source) {
            return Err(Error::NoPathFound);
        }

        let mut shortest_way = self.shortest_path_in_graph()?.ok_or(Error::NoPathFound)?;
        let mut shortest_ways = vec![shortest_way.clone()];

        for iteration in 1..self.k {
            let mut best: Option<(SortedPath<V, W>, TaggedEdge<V, W>)> = None;

            for edge in shortest_way.iter() {
                self.graph.remove_edge(edge);
                // Find shortest way in the graph without this edge
                let new_path = self.shortest_path_in_graph();
                self.graph.add_edge(edge.clone());

                let Some(new_path) = new_path? else {
                    continue;
                };
                let improves = match &best {
                    Some((path, _)) => new_path.weight() < path.weight(),
                    None => true,
                };
                if improves {
                    best = Some((new_path, edge.clone()));
                }
            }

            let Some((path, removed_edge)) = best else {
                debug!(
                    "Yen stopped after {} of {} paths, no detour left",
                    iteration, self.k
                );
                break;
            };

            debug!(
                "Yen path {} has weight {:?}, removing {:?} -> {:?}",
                iteration + 1,
                path.weight(),
                removed_edge.source,
                removed_edge.target
            );
            self.graph.remove_edge(&removed_edge);
            self.removed_edges.push(removed_edge);
            shortest_ways.push(path.clone());
            shortest_way = path;
        }

        Ok((self.filter)(shortest_ways))
    }

    fn shortest_path_in_graph(&self) -> Result<Option<SortedPath<V, W>>> {
        let mut recorder = PredecessorRecorder::new();
        {
            let weights = &self.weights;
            let mut dijkstra = Dijkstra::new(&self.graph, move |edge: &TaggedEdge<V, W>| {
                weights(edge)
            })
            .on_tree_edge(|edge| recorder.record(edge));
            dijkstra.compute(&self.source)?;
        }

        Ok(recorder
            .try_get_path(&self.target)
            .map(|edges| self.sorted_path(edges)))
    }

    fn sorted_path(&self, edges: Vec<TaggedEdge<V, W>>) -> SortedPath<V, W> {
        let weight = edges
            .iter()
            .fold(W::zero(), |total, edge| total + (self.weights)(edge));
        SortedPath { edges, weight }
    }
}

impl<V, W, G> Debug for YenShortestPaths<V, W, G>
where
    V: Clone + Eq + Hash + Debug,
    W: Float + Zero + Debug + Copy + Ord,
    G: MutableGraph<V, TaggedEdge<V, W>>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YenShortestPaths")
            .field("source", &self.source)
            .field("target", &self.target)
            .field("k", &self.k)
            .field("graph", &self.graph)
            .field("removed_edges", &self.removed_edges)
            .finish_non_exhaustive()
    }
}
