use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::graph::{Graph, NodeId};

/// User-chosen anchor: a map location bound to its nearest graph node.
///
/// The node is resolved once, when the waypoint is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub point: Point,
    pub node_id: NodeId,
}

impl Waypoint {
    pub fn new(point: Point, node_id: NodeId) -> Self {
        Self { point, node_id }
    }

    /// Bind `point` to the closest node of `graph` within `search_radius` metres.
    pub fn resolve<G: Graph + ?Sized>(graph: &G, point: Point, search_radius: f64) -> Result<Self> {
        graph
            .node_closest_to(point, search_radius)
            .map(|node_id| Self::new(point, node_id))
            .ok_or(Error::NoNodeNearby {
                x: point.x(),
                y: point.y(),
                radius: search_radius,
            })
    }
}
