use crate::geometry::{self, Point};
use crate::graph::{EdgeId, Graph, NodeId};

/// One traversed graph edge, with the geometry needed for position queries.
///
/// The edge is treated as a straight segment between its end nodes while its
/// length is the one reported by the graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    edge_id: EdgeId,
    from_node: NodeId,
    to_node: NodeId,
    from_point: Point,
    to_point: Point,
    length: f64,
}

impl Edge {
    /// Build the edge `edge_id` of `graph`, traversed from `from_node` to `to_node`.
    pub fn of<G: Graph + ?Sized>(
        graph: &G,
        edge_id: EdgeId,
        from_node: NodeId,
        to_node: NodeId,
    ) -> Self {
        Self::new(
            edge_id,
            from_node,
            to_node,
            graph.node_point(from_node),
            graph.node_point(to_node),
            graph.edge_length(edge_id),
        )
    }

    /// Build an edge from explicit parts.
    pub fn new(
        edge_id: EdgeId,
        from_node: NodeId,
        to_node: NodeId,
        from_point: Point,
        to_point: Point,
        length: f64,
    ) -> Self {
        Self {
            edge_id,
            from_node,
            to_node,
            from_point,
            to_point,
            length,
        }
    }

    pub fn edge_id(&self) -> EdgeId {
        self.edge_id
    }

    pub fn from_node(&self) -> NodeId {
        self.from_node
    }

    pub fn to_node(&self) -> NodeId {
        self.to_node
    }

    pub fn from_point(&self) -> Point {
        self.from_point
    }

    pub fn to_point(&self) -> Point {
        self.to_point
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Point at `position` metres from the start of the edge.
    ///
    /// Positions outside `[0, length]` extrapolate along the edge's direction.
    pub fn point_at(&self, position: f64) -> Point {
        if self.length == 0.0 {
            return self.from_point;
        }
        geometry::interpolate_point(self.from_point, self.to_point, position / self.length)
    }

    /// Position along the edge closest to `point`, in metres, not clamped.
    pub fn position_closest_to(&self, point: Point) -> f64 {
        let projected = geometry::projection_length(self.from_point, self.to_point, point);
        let straight = geometry::distance(self.from_point, self.to_point);
        if straight == 0.0 {
            return 0.0;
        }
        projected * self.length / straight
    }
}
