//! pedalpath library entry points.
//!
//! This crate computes lowest-cost routes over a static, weighted road
//! network and exposes them as queryable geometric routes. It also keeps a
//! multi-waypoint route up to date as waypoints are edited, reusing the legs
//! it already computed. Presentation layers (map rendering, waypoint
//! dragging, elevation charts) should only depend on the items exported here.
//!

#![deny(warnings)]

pub mod config;
pub mod edge;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod output;
pub mod path;
pub mod route;
pub mod routing;
pub mod spatial;

pub use config::PlannerSettings;
pub use edge::Edge;
pub use error::{Error, Result};
pub use geometry::Point;
pub use graph::{
    AdjacencyGraph, CostFunction, EdgeId, Graph, GraphBuilder, NodeId, SharedCost, UniformCost,
};
pub use output::RouteSummary;
pub use path::RouteComputer;
pub use route::{MultiRoute, Route, RoutePoint, SingleRoute};
pub use routing::{
    ElevationProfiler, ErrorReporter, RouteOrchestrator, SegmentCache, SegmentKey,
    TracingReporter, Waypoint,
};
pub use spatial::NodeIndex;
