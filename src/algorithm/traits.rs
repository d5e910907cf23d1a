use crate::Result;

/// Trait for shortest path algorithms driven by a relaxation state
pub trait ShortestPathAlgorithm<V, W> {
    /// Get the name of the algorithm
    fn name(&self) -> &'static str;

    /// Compute distances from `root` to every vertex reachable from it.
    ///
    /// Each call starts a fresh run: previous distances are discarded.
    fn compute(&mut self, root: &V) -> Result<()>;

    /// Distance to `vertex` found by the last run, if it was reached
    fn try_get_distance(&self, vertex: &V) -> Option<W>;
}
