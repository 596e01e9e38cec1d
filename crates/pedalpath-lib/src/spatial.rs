//! KD-tree spatial index over graph node positions.
//!
//! Backs [`AdjacencyGraph::node_closest_to`](crate::graph::AdjacencyGraph)
//! with O(log n) average-case nearest-node queries. Coordinates are kept in
//! `f64` since projected map coordinates are in the millions of metres and
//! `f32` would lose metre precision.
//!
//! The graph never changes after it is built, so the tree is the balanced
//! immutable variant. It also accepts any number of nodes stacked on one
//! coordinate, which the mutable tree cannot split into buckets.

use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::SquaredEuclidean;
use tracing::info;

use crate::geometry::Point;
use crate::graph::NodeId;

/// KD-tree bucket size (kiddo default).
const BUCKET_SIZE: usize = 32;

/// Nearest-node index built once per graph.
pub struct NodeIndex {
    /// Items are node identifiers (positions in the source slice).
    tree: ImmutableKdTree<f64, u64, 2, BUCKET_SIZE>,
    len: usize,
}

impl NodeIndex {
    /// Build an index over `positions`, where node `i` sits at `positions[i]`.
    pub fn build(positions: &[Point]) -> Self {
        let coordinates: Vec<[f64; 2]> = positions
            .iter()
            .map(|point| [point.x(), point.y()])
            .collect();
        let tree = ImmutableKdTree::new_from_slice(&coordinates);

        info!(node_count = positions.len(), "built node spatial index");

        Self {
            tree,
            len: positions.len(),
        }
    }

    /// Number of indexed nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Nearest node to `point`, if one lies within `radius` (inclusive).
    pub fn nearest_within(&self, point: Point, radius: f64) -> Option<NodeId> {
        if self.is_empty() || radius.is_nan() || radius < 0.0 {
            return None;
        }

        let nearest = self
            .tree
            .nearest_one::<SquaredEuclidean>(&[point.x(), point.y()]);
        if nearest.distance > radius * radius {
            return None;
        }
        usize::try_from(nearest.item).ok()
    }
}

impl std::fmt::Debug for NodeIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeIndex").field("len", &self.len).finish()
    }
}
