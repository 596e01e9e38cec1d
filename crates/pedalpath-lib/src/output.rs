use serde::Serialize;

use crate::edge::Edge;
use crate::error::Result;
use crate::graph::NodeId;
use crate::route::Route;

/// Structured representation of a route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    /// Total length in metres.
    pub length: f64,
    /// Number of leaf segments (waypoint legs).
    pub segments: usize,
    /// Graph nodes visited, start and end included.
    pub nodes: Vec<NodeId>,
    /// Route vertices as `[x, y]` pairs.
    pub points: Vec<[f64; 2]>,
}

impl RouteSummary {
    /// Summarise `route`.
    pub fn from_route(route: &Route) -> Self {
        let nodes = std::iter::once(route.start_node())
            .chain(route.edges().map(Edge::to_node))
            .collect();
        let points = route.points().map(|point| [point.x(), point.y()]).collect();

        Self {
            length: route.length(),
            segments: route.segment_count(),
            nodes,
            points,
        }
    }

    /// Number of edges travelled.
    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Render the summary as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
