//! Computed routes and their position-based queries.
//!
//! A [`Route`] is either a [`SingleRoute`] (contiguous edges, as produced by
//! one search) or a [`MultiRoute`] (contiguous sub-routes, as assembled from
//! waypoint legs). Both expose the same query surface, so callers never need
//! to know which shape they hold.
//!
//! Positions are distances in metres from the start of the route. Every
//! position-taking query clamps its argument to `[0, length]`.

use std::iter;
use std::sync::Arc;

use crate::edge::Edge;
use crate::error::{Error, Result};
use crate::geometry::{self, Point};
use crate::graph::NodeId;

/// Point of a route closest to some reference point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutePoint {
    /// Location on the route.
    pub point: Point,
    /// Position of `point` along the route, in metres.
    pub position: f64,
    /// Distance between `point` and the reference point.
    pub distance_to_reference: f64,
}

impl RoutePoint {
    pub fn new(point: Point, position: f64, distance_to_reference: f64) -> Self {
        Self {
            point,
            position,
            distance_to_reference,
        }
    }

    /// The closer of the two; ties keep `self`.
    pub fn min(self, other: Self) -> Self {
        if other.distance_to_reference < self.distance_to_reference {
            other
        } else {
            self
        }
    }

    /// Same point, with its position moved by `delta` metres.
    pub fn with_position_shifted_by(self, delta: f64) -> Self {
        Self {
            position: self.position + delta,
            ..self
        }
    }
}

/// Cumulative start positions: `positions[i]` is where piece `i` starts and the
/// final entry is the total length.
fn cumulative_positions(lengths: impl Iterator<Item = f64>) -> Arc<[f64]> {
    let mut total = 0.0;
    iter::once(0.0)
        .chain(lengths.map(|length| {
            total += length;
            total
        }))
        .collect()
}

/// Index of the piece containing `position`, assuming `position` is clamped.
///
/// On a boundary the later piece wins, except at the very end of the route.
fn piece_index_at(positions: &[f64], position: f64) -> usize {
    let pieces = positions.len() - 1;
    positions
        .partition_point(|&start| start <= position)
        .saturating_sub(1)
        .min(pieces - 1)
}

/// Route made of contiguous graph edges.
#[derive(Debug, Clone)]
pub struct SingleRoute {
    edges: Arc<[Edge]>,
    positions: Arc<[f64]>,
}

impl SingleRoute {
    /// Build a route from edges where each edge starts at the previous one's end node.
    pub fn new(edges: Vec<Edge>) -> Result<Self> {
        if edges.is_empty() {
            return Err(Error::EmptyRoute);
        }
        if let Some(index) = edges
            .windows(2)
            .position(|pair| pair[0].to_node() != pair[1].from_node())
        {
            return Err(Error::DiscontinuousRoute { index: index + 1 });
        }

        let positions = cumulative_positions(edges.iter().map(Edge::length));
        Ok(Self {
            edges: edges.into(),
            positions,
        })
    }

    /// Total length in metres.
    pub fn length(&self) -> f64 {
        self.positions[self.positions.len() - 1]
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn start_node(&self) -> NodeId {
        self.edges[0].from_node()
    }

    pub fn end_node(&self) -> NodeId {
        self.edges[self.edges.len() - 1].to_node()
    }

    pub fn start_point(&self) -> Point {
        self.edges[0].from_point()
    }

    pub fn end_point(&self) -> Point {
        self.edges[self.edges.len() - 1].to_point()
    }

    /// A single route is a single segment.
    pub fn segment_count(&self) -> usize {
        1
    }

    pub fn index_of_segment_at(&self, _position: f64) -> usize {
        0
    }

    /// Point at `position` metres along the route.
    pub fn point_at(&self, position: f64) -> Point {
        let position = self.clamp(position);
        let index = piece_index_at(&self.positions, position);
        self.edges[index].point_at(position - self.positions[index])
    }

    /// Graph node closest to the point at `position`, following the route's edges.
    pub fn node_closest_to(&self, position: f64) -> NodeId {
        let position = self.clamp(position);
        let index = piece_index_at(&self.positions, position);
        let edge = &self.edges[index];
        let along = position - self.positions[index];
        if along <= edge.length() - along {
            edge.from_node()
        } else {
            edge.to_node()
        }
    }

    /// Vertices of the route in travel order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.edges
            .iter()
            .map(Edge::from_point)
            .chain(self.edges.last().map(Edge::to_point))
    }

    /// Point of the route closest to `point`.
    pub fn point_closest_to(&self, point: Point) -> RoutePoint {
        let candidate = |index: usize| {
            let edge = &self.edges[index];
            let along = geometry::clamp(0.0, edge.position_closest_to(point), edge.length());
            let on_edge = edge.point_at(along);
            RoutePoint::new(
                on_edge,
                self.positions[index] + along,
                geometry::distance(on_edge, point),
            )
        };

        (1..self.edges.len()).fold(candidate(0), |best, index| best.min(candidate(index)))
    }

    fn clamp(&self, position: f64) -> f64 {
        geometry::clamp(0.0, position, self.length())
    }
}

/// Route made of contiguous sub-routes.
#[derive(Debug, Clone)]
pub struct MultiRoute {
    segments: Arc<[Route]>,
    positions: Arc<[f64]>,
}

impl MultiRoute {
    /// Build a route from segments where each segment starts at the previous one's end node.
    pub fn new(segments: Vec<Route>) -> Result<Self> {
        if segments.is_empty() {
            return Err(Error::EmptyMultiRoute);
        }
        if let Some(index) = segments
            .windows(2)
            .position(|pair| pair[0].end_node() != pair[1].start_node())
        {
            return Err(Error::DiscontinuousRoute { index: index + 1 });
        }

        let positions = cumulative_positions(segments.iter().map(Route::length));
        Ok(Self {
            segments: segments.into(),
            positions,
        })
    }

    /// Total length in metres.
    pub fn length(&self) -> f64 {
        self.positions[self.positions.len() - 1]
    }

    /// Direct sub-routes, in order.
    pub fn segments(&self) -> &[Route] {
        &self.segments
    }

    pub fn start_node(&self) -> NodeId {
        self.segments[0].start_node()
    }

    pub fn end_node(&self) -> NodeId {
        self.segments[self.segments.len() - 1].end_node()
    }

    /// Number of leaf (single-route) segments, counted through nested multi-routes.
    pub fn segment_count(&self) -> usize {
        self.segments.iter().map(Route::segment_count).sum()
    }

    /// Index of the leaf segment containing `position`.
    pub fn index_of_segment_at(&self, position: f64) -> usize {
        let position = self.clamp(position);
        let index = piece_index_at(&self.positions, position);
        let preceding: usize = self.segments[..index]
            .iter()
            .map(Route::segment_count)
            .sum();
        preceding + self.segments[index].index_of_segment_at(position - self.positions[index])
    }

    pub fn point_at(&self, position: f64) -> Point {
        let position = self.clamp(position);
        let index = piece_index_at(&self.positions, position);
        self.segments[index].point_at(position - self.positions[index])
    }

    pub fn node_closest_to(&self, position: f64) -> NodeId {
        let position = self.clamp(position);
        let index = piece_index_at(&self.positions, position);
        self.segments[index].node_closest_to(position - self.positions[index])
    }

    /// Vertices of the route in travel order; segment junctions appear once.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.segments
            .iter()
            .enumerate()
            .flat_map(|(index, segment)| segment.points().skip(usize::from(index > 0)))
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.segments.iter().flat_map(Route::edges)
    }

    pub fn point_closest_to(&self, point: Point) -> RoutePoint {
        let candidate = |index: usize| {
            self.segments[index]
                .point_closest_to(point)
                .with_position_shifted_by(self.positions[index])
        };

        (1..self.segments.len()).fold(candidate(0), |best, index| best.min(candidate(index)))
    }

    fn clamp(&self, position: f64) -> f64 {
        geometry::clamp(0.0, position, self.length())
    }
}

/// A computed route of either shape.
#[derive(Debug, Clone)]
pub enum Route {
    Single(SingleRoute),
    Multi(MultiRoute),
}

impl Route {
    /// Total length in metres.
    pub fn length(&self) -> f64 {
        match self {
            Route::Single(route) => route.length(),
            Route::Multi(route) => route.length(),
        }
    }

    pub fn start_node(&self) -> NodeId {
        match self {
            Route::Single(route) => route.start_node(),
            Route::Multi(route) => route.start_node(),
        }
    }

    pub fn end_node(&self) -> NodeId {
        match self {
            Route::Single(route) => route.end_node(),
            Route::Multi(route) => route.end_node(),
        }
    }

    /// Number of leaf segments.
    pub fn segment_count(&self) -> usize {
        match self {
            Route::Single(route) => route.segment_count(),
            Route::Multi(route) => route.segment_count(),
        }
    }

    /// Index of the leaf segment containing `position`.
    pub fn index_of_segment_at(&self, position: f64) -> usize {
        match self {
            Route::Single(route) => route.index_of_segment_at(position),
            Route::Multi(route) => route.index_of_segment_at(position),
        }
    }

    /// Point at `position` metres along the route.
    pub fn point_at(&self, position: f64) -> Point {
        match self {
            Route::Single(route) => route.point_at(position),
            Route::Multi(route) => route.point_at(position),
        }
    }

    /// Graph node closest to the point at `position`.
    pub fn node_closest_to(&self, position: f64) -> NodeId {
        match self {
            Route::Single(route) => route.node_closest_to(position),
            Route::Multi(route) => route.node_closest_to(position),
        }
    }

    /// Point of the route closest to `point`.
    pub fn point_closest_to(&self, point: Point) -> RoutePoint {
        match self {
            Route::Single(route) => route.point_closest_to(point),
            Route::Multi(route) => route.point_closest_to(point),
        }
    }

    /// Vertices of the route in travel order.
    ///
    /// The iterator is lazy; call again to restart.
    pub fn points(&self) -> Box<dyn Iterator<Item = Point> + '_> {
        match self {
            Route::Single(route) => Box::new(route.points()),
            Route::Multi(route) => Box::new(route.points()),
        }
    }

    /// All edges of the route in travel order.
    pub fn edges(&self) -> Box<dyn Iterator<Item = &Edge> + '_> {
        match self {
            Route::Single(route) => Box::new(route.edges().iter()),
            Route::Multi(route) => Box::new(route.edges()),
        }
    }
}

impl From<SingleRoute> for Route {
    fn from(route: SingleRoute) -> Self {
        Route::Single(route)
    }
}

impl From<MultiRoute> for Route {
    fn from(route: MultiRoute) -> Self {
        Route::Multi(route)
    }
}
