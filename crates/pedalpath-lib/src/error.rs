use std::path::PathBuf;

use thiserror::Error;

use crate::graph::{EdgeId, NodeId};

/// Convenient result alias for the pedalpath library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a route is requested from a node to itself.
    #[error("start and end node must differ (both are node {node})")]
    IdenticalEndpoints { node: NodeId },

    /// Raised when a node identifier is outside `[0, node_count)`.
    #[error("node {node} is out of range for a graph of {node_count} nodes")]
    NodeOutOfRange { node: NodeId, node_count: usize },

    /// Raised when building a graph edge whose length is negative or not finite.
    #[error("edge {edge} has invalid length {length}")]
    InvalidEdgeLength { edge: EdgeId, length: f64 },

    /// Raised when constructing a single route without any edge.
    #[error("a route needs at least one edge")]
    EmptyRoute,

    /// Raised when constructing a multi-route without any segment.
    #[error("a multi-route needs at least one segment")]
    EmptyMultiRoute,

    /// Raised when consecutive edges or segments do not share a node.
    #[error("route piece {index} does not start where the previous one ends")]
    DiscontinuousRoute { index: usize },

    /// Raised when the graph stops reporting an edge the search relaxed.
    #[error("graph reports no edge from node {from} to node {to}")]
    InconsistentGraph { from: NodeId, to: NodeId },

    /// Raised when a waypoint edit addresses a position outside the list.
    #[error("waypoint index {index} is out of range for {len} waypoints")]
    WaypointIndexOutOfRange { index: usize, len: usize },

    /// Raised when no graph node lies within the search radius of a location.
    #[error("no road nearby ({x:.1}, {y:.1}) within {radius} m")]
    NoNodeNearby { x: f64, y: f64, radius: f64 },

    /// Raised when a new waypoint would sit on the same node as its neighbour.
    #[error("a waypoint is already present at node {node}")]
    WaypointAlreadyPresent { node: NodeId },

    /// Raised when a route query needs a published route and there is none.
    #[error("there is no current route")]
    NoCurrentRoute,

    /// Raised when planner settings fail validation.
    #[error("invalid planner settings: {message}")]
    InvalidSettings { message: String },

    /// Raised when reading a settings file fails.
    #[error("failed to read settings from {path}: {source}")]
    SettingsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Wrapper for JSON (de)serialisation errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error reports a caller bug rather than a user-facing condition.
    pub fn is_precondition_violation(&self) -> bool {
        matches!(
            self,
            Error::IdenticalEndpoints { .. }
                | Error::NodeOutOfRange { .. }
                | Error::InvalidEdgeLength { .. }
                | Error::EmptyRoute
                | Error::EmptyMultiRoute
                | Error::DiscontinuousRoute { .. }
                | Error::InconsistentGraph { .. }
                | Error::WaypointIndexOutOfRange { .. }
        )
    }
}
