use crate::graph::traits::{Edge, Graph, MutableGraph};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// A directed graph implementation using adjacency lists
#[derive(Debug, Clone)]
pub struct DirectedGraph<V, E>
where
    V: Clone + Eq + Hash + Debug,
    E: Edge<V> + Clone + PartialEq + Debug,
{
    /// Vertices in insertion order
    vertices: Vec<V>,

    /// Outgoing edges for each vertex: vertex -> [edge]
    out_edges: HashMap<V, Vec<E>>,

    /// Total number of edges
    edge_count: usize,

    /// Whether two equal edges may coexist
    allow_parallel_edges: bool,
}

impl<V, E> DirectedGraph<V, E>
where
    V: Clone + Eq + Hash + Debug,
    E: Edge<V> + Clone + PartialEq + Debug,
{
    /// Creates a new empty directed graph
    pub fn new() -> Self {
        DirectedGraph {
            vertices: Vec::new(),
            out_edges: HashMap::new(),
            edge_count: 0,
            allow_parallel_edges: true,
        }
    }

    /// Creates a new directed graph with room for the specified number of vertices
    pub fn with_capacity(vertices: usize) -> Self {
        DirectedGraph {
            vertices: Vec::with_capacity(vertices),
            out_edges: HashMap::with_capacity(vertices),
            edge_count: 0,
            allow_parallel_edges: true,
        }
    }

    /// Builds a graph from a list of edges, adding endpoints as needed
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        let mut graph = Self::new();
        for edge in edges {
            graph.add_vertices_and_edge(edge);
        }
        graph
    }

    /// Set whether equal edges may be added more than once
    pub fn with_parallel_edges(mut self, allowed: bool) -> Self {
        self.allow_parallel_edges = allowed;
        self
    }

    /// Returns true if equal edges may be added more than once
    pub fn allows_parallel_edges(&self) -> bool {
        self.allow_parallel_edges
    }

    /// Adds both endpoints of an edge if they are missing, then the edge itself
    pub fn add_vertices_and_edge(&mut self, edge: E) -> bool {
        self.add_vertex(edge.source().clone());
        self.add_vertex(edge.target().clone());
        self.add_edge(edge)
    }

    /// Returns an iterator over every edge, grouped by source in vertex order
    pub fn edges(&self) -> impl Iterator<Item = &E> + '_ {
        self.vertices
            .iter()
            .filter_map(move |v| self.out_edges.get(v))
            .flat_map(|edges| edges.iter())
    }
}

impl<V, E> Default for DirectedGraph<V, E>
where
    V: Clone + Eq + Hash + Debug,
    E: Edge<V> + Clone + PartialEq + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> Graph<V, E> for DirectedGraph<V, E>
where
    V: Clone + Eq + Hash + Debug,
    E: Edge<V> + Clone + PartialEq + Debug,
{
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn vertices(&self) -> Box<dyn Iterator<Item = &V> + '_> {
        Box::new(self.vertices.iter())
    }

    fn out_edges(&self, vertex: &V) -> Box<dyn Iterator<Item = &E> + '_> {
        if let Some(edges) = self.out_edges.get(vertex) {
            Box::new(edges.iter())
        } else {
            Box::new(std::iter::empty())
        }
    }

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.out_edges.contains_key(vertex)
    }

    fn contains_edge(&self, edge: &E) -> bool {
        if let Some(edges) = self.out_edges.get(edge.source()) {
            edges.iter().any(|e| e == edge)
        } else {
            false
        }
    }

    fn out_degree(&self, vertex: &V) -> usize {
        self.out_edges.get(vertex).map_or(0, |edges| edges.len())
    }
}

impl<V, E> MutableGraph<V, E> for DirectedGraph<V, E>
where
    V: Clone + Eq + Hash + Debug,
    E: Edge<V> + Clone + PartialEq + Debug,
{
    fn add_vertex(&mut self, vertex: V) -> bool {
        if self.out_edges.contains_key(&vertex) {
            return false;
        }
        self.out_edges.insert(vertex.clone(), Vec::new());
        self.vertices.push(vertex);
        true
    }

    fn add_edge(&mut self, edge: E) -> bool {
        if !self.contains_vertex(edge.target()) {
            return false;
        }

        let allow_parallel_edges = self.allow_parallel_edges;
        match self.out_edges.get_mut(edge.source()) {
            Some(outgoing) => {
                if !allow_parallel_edges && outgoing.iter().any(|e| *e == edge) {
                    return false;
                }
                outgoing.push(edge);
                self.edge_count += 1;
                true
            }
            None => false,
        }
    }

    fn remove_edge(&mut self, edge: &E) -> bool {
        let Some(outgoing) = self.out_edges.get_mut(edge.source()) else {
            return false;
        };

        // Vec::remove keeps the relative order of the remaining edges
        match outgoing.iter().position(|e| e == edge) {
            Some(index) => {
                outgoing.remove(index);
                self.edge_count -= 1;
                true
            }
            None => false,
        }
    }
}
