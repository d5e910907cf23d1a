use std::fmt::Debug;

/// Trait representing a directed edge between two vertices
pub trait Edge<V> {
    /// Returns the vertex the edge leaves from
    fn source(&self) -> &V;

    /// Returns the vertex the edge points to
    fn target(&self) -> &V;
}

/// Read-only traversal contract over a directed graph
pub trait Graph<V, E>: Debug
where
    E: Edge<V>,
{
    /// Returns the number of vertices in the graph
    fn vertex_count(&self) -> usize;

    /// Returns the number of edges in the graph
    fn edge_count(&self) -> usize;

    /// Returns an iterator over the vertices, in insertion order
    fn vertices(&self) -> Box<dyn Iterator<Item = &V> + '_>;

    /// Returns an iterator over the outgoing edges from a vertex.
    ///
    /// The order is stable as long as the graph is not mutated.
    fn out_edges(&self, vertex: &V) -> Box<dyn Iterator<Item = &E> + '_>;

    /// Returns true if the vertex exists in the graph
    fn contains_vertex(&self, vertex: &V) -> bool;

    /// Returns true if an edge equal to `edge` exists in the graph
    fn contains_edge(&self, edge: &E) -> bool;

    /// Returns the number of outgoing edges from a vertex
    fn out_degree(&self, vertex: &V) -> usize {
        self.out_edges(vertex).count()
    }
}

/// Trait for mutable graph operations
pub trait MutableGraph<V, E>: Graph<V, E> + Clone
where
    E: Edge<V>,
{
    /// Adds a vertex to the graph, returns false if it was already present
    fn add_vertex(&mut self, vertex: V) -> bool;

    /// Appends an edge to the out-edges of its source.
    ///
    /// Returns false if one of the endpoints is missing, or if parallel edges
    /// are disallowed and an equal edge is already present.
    fn add_edge(&mut self, edge: E) -> bool;

    /// Removes the first edge equal to `edge`.
    ///
    /// Removing an absent edge is a no-op and returns false.
    fn remove_edge(&mut self, edge: &E) -> bool;
}
