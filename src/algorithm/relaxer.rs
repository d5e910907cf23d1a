use num_traits::{Float, Zero};
use std::cmp::Ordering;
use std::fmt::Debug;

/// The (combine, compare) algebra that defines what a "better" distance is
/// and how a distance extends through an edge.
///
/// `combine` must be monotonically non-decreasing in the distance with respect
/// to the order induced by `compare`. Under `ShortestDistance` this means edge
/// weights must be non-negative for label-setting traversals such as Dijkstra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DistanceRelaxer {
    /// Min-plus: distances add up, smaller is better
    #[default]
    ShortestDistance,

    /// Max-plus: distances add up, larger is better (critical / longest path)
    CriticalDistance,

    /// Max-min: a path is as wide as its narrowest edge, wider is better
    Bottleneck,
}

impl DistanceRelaxer {
    /// Distance assigned to the root of a traversal
    pub fn source_distance<W>(&self) -> W
    where
        W: Float + Zero + Debug + Copy,
    {
        match self {
            DistanceRelaxer::ShortestDistance | DistanceRelaxer::CriticalDistance => W::zero(),
            DistanceRelaxer::Bottleneck => W::infinity(),
        }
    }

    /// Extends `distance` through an edge of weight `weight`
    pub fn combine<W>(&self, distance: W, weight: W) -> W
    where
        W: Float + Zero + Debug + Copy,
    {
        match self {
            DistanceRelaxer::ShortestDistance | DistanceRelaxer::CriticalDistance => {
                distance + weight
            }
            DistanceRelaxer::Bottleneck => Float::min(distance, weight),
        }
    }

    /// Orders two distances so that `Ordering::Less` means `a` is better than `b`
    pub fn compare<W>(&self, a: W, b: W) -> Ordering
    where
        W: Float + Zero + Debug + Copy + Ord,
    {
        match self {
            DistanceRelaxer::ShortestDistance => a.cmp(&b),
            DistanceRelaxer::CriticalDistance | DistanceRelaxer::Bottleneck => b.cmp(&a),
        }
    }

    /// Returns true if `a` is strictly better than `b`
    pub fn is_better<W>(&self, a: W, b: W) -> bool
    where
        W: Float + Zero + Debug + Copy + Ord,
    {
        self.compare(a, b) == Ordering::Less
    }
}

/// A distance ordered by a relaxer, so that the best distance is the smallest.
///
/// Used to key priority queues for traversals that are not min-plus.
#[derive(Debug, Clone, Copy)]
pub struct RelaxedDistance<W> {
    /// The raw distance
    pub distance: W,

    /// The algebra ordering it
    pub relaxer: DistanceRelaxer,
}

impl<W> RelaxedDistance<W> {
    pub fn new(distance: W, relaxer: DistanceRelaxer) -> Self {
        RelaxedDistance { distance, relaxer }
    }
}

impl<W> PartialEq for RelaxedDistance<W>
where
    W: Float + Zero + Debug + Copy + Ord,
{
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<W> Eq for RelaxedDistance<W> where W: Float + Zero + Debug + Copy + Ord {}

impl<W> PartialOrd for RelaxedDistance<W>
where
    W: Float + Zero + Debug + Copy + Ord,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W> Ord for RelaxedDistance<W>
where
    W: Float + Zero + Debug + Copy + Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.relaxer.compare(self.distance, other.distance)
    }
}
