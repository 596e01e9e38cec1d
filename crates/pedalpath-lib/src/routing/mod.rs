//! Waypoint-driven route orchestration.
//!
//! This module provides:
//! - [`RouteOrchestrator`] - owns the waypoint list and the published route
//! - [`Waypoint`] - a location bound to its nearest graph node
//! - [`SegmentCache`] - memo of legs keyed by directed node pairs
//! - [`ElevationProfiler`] / [`ErrorReporter`] - collaborators fed by the orchestrator
//!
//! # Recomputation
//!
//! Every structural edit of the waypoint list re-derives the legs between
//! consecutive waypoints. Legs already computed for the same directed pair of
//! nodes come from the cache; the others run through the [`RouteComputer`].
//! Two consecutive waypoints on the same node form an empty leg and are
//! skipped. The walk stops at the first unreachable leg, in which case no
//! route is published.
//!
//! # Example
//!
//! ```ignore
//! use pedalpath_lib::{PlannerSettings, RouteComputer, RouteOrchestrator, UniformCost};
//!
//! let computer = RouteComputer::new(&graph, UniformCost);
//! let profiler = |route: &Route, step: f64| sample_elevations(route, step);
//! let mut planner = RouteOrchestrator::new(computer, profiler, PlannerSettings::default())?;
//! planner.add_waypoint_at(Point::new(2_532_700.0, 1_152_350.0))?;
//! planner.add_waypoint_at(Point::new(2_538_100.0, 1_154_900.0))?;
//! println!("{:.0} m", planner.route().map(Route::length).unwrap_or_default());
//! ```

mod cache;
mod collaborators;
mod waypoint;

pub use cache::{SegmentCache, SegmentKey};
pub use collaborators::{ElevationProfiler, ErrorReporter, TracingReporter};
pub use waypoint::Waypoint;

use tracing::{debug, trace};

use crate::config::PlannerSettings;
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::graph::{CostFunction, Graph, NodeId};
use crate::path::RouteComputer;
use crate::route::{MultiRoute, Route, SingleRoute};

type Subscriber = Box<dyn FnMut(Option<&Route>)>;

/// Owner of the waypoint list, the leg cache and the published route.
///
/// All state is mutated through `&mut self`; embedders that share the
/// orchestrator across threads must serialise access behind one owner.
pub struct RouteOrchestrator<G, C, E: ElevationProfiler> {
    computer: RouteComputer<G, C>,
    profiler: E,
    settings: PlannerSettings,
    reporter: Box<dyn ErrorReporter>,
    waypoints: Vec<Waypoint>,
    cache: SegmentCache,
    route: Option<Route>,
    elevation_profile: Option<E::Profile>,
    highlighted_position: f64,
    revision: u64,
    subscribers: Vec<Subscriber>,
}

impl<G, C, E> RouteOrchestrator<G, C, E>
where
    G: Graph,
    C: CostFunction,
    E: ElevationProfiler,
{
    /// Create an orchestrator with no waypoints and no route.
    pub fn new(
        computer: RouteComputer<G, C>,
        profiler: E,
        settings: PlannerSettings,
    ) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            computer,
            profiler,
            settings,
            reporter: Box::new(TracingReporter),
            waypoints: Vec::new(),
            cache: SegmentCache::with_max_entries(settings.max_cached_segments),
            route: None,
            elevation_profile: None,
            highlighted_position: 0.0,
            revision: 0,
            subscribers: Vec::new(),
        })
    }

    /// Send user-facing messages to `reporter` instead of the log.
    pub fn with_error_reporter(mut self, reporter: impl ErrorReporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    /// Call `subscriber` with the new route every time one is published.
    pub fn subscribe(&mut self, subscriber: impl FnMut(Option<&Route>) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn computer(&self) -> &RouteComputer<G, C> {
        &self.computer
    }

    pub fn settings(&self) -> &PlannerSettings {
        &self.settings
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Currently published route, absent when fewer than two waypoints are set
    /// or some leg is unreachable.
    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// Elevation profile of the published route.
    pub fn elevation_profile(&self) -> Option<&E::Profile> {
        self.elevation_profile.as_ref()
    }

    /// Number of publications so far; bumps on every recomputation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn cache(&self) -> &SegmentCache {
        &self.cache
    }

    /// Position along the route highlighted in the UI, in metres.
    pub fn highlighted_position(&self) -> f64 {
        self.highlighted_position
    }

    /// Set the highlighted position; this never triggers a recomputation.
    pub fn set_highlighted_position(&mut self, position: f64) {
        self.highlighted_position = position;
    }

    /// Replace the whole waypoint list.
    pub fn set_waypoints(&mut self, waypoints: Vec<Waypoint>) -> Result<()> {
        for waypoint in &waypoints {
            self.check_waypoint(waypoint)?;
        }
        self.waypoints = waypoints;
        self.recompute()
    }

    /// Append a waypoint.
    pub fn push_waypoint(&mut self, waypoint: Waypoint) -> Result<()> {
        self.check_waypoint(&waypoint)?;
        self.waypoints.push(waypoint);
        self.recompute()
    }

    /// Insert a waypoint before position `index` (`index == len` appends).
    pub fn insert_waypoint(&mut self, index: usize, waypoint: Waypoint) -> Result<()> {
        if index > self.waypoints.len() {
            return Err(self.index_error(index));
        }
        self.check_waypoint(&waypoint)?;
        self.waypoints.insert(index, waypoint);
        self.recompute()
    }

    /// Remove and return the waypoint at `index`.
    pub fn remove_waypoint(&mut self, index: usize) -> Result<Waypoint> {
        if index >= self.waypoints.len() {
            return Err(self.index_error(index));
        }
        let removed = self.waypoints.remove(index);
        self.recompute()?;
        Ok(removed)
    }

    /// Replace the waypoint at `index`, returning the previous one.
    pub fn replace_waypoint(&mut self, index: usize, waypoint: Waypoint) -> Result<Waypoint> {
        if index >= self.waypoints.len() {
            return Err(self.index_error(index));
        }
        self.check_waypoint(&waypoint)?;
        let previous = std::mem::replace(&mut self.waypoints[index], waypoint);
        self.recompute()?;
        Ok(previous)
    }

    /// Remove every waypoint.
    pub fn clear_waypoints(&mut self) -> Result<()> {
        self.waypoints.clear();
        self.recompute()
    }

    /// Append a waypoint at `point`, bound to the nearest node within the search radius.
    ///
    /// When no node is close enough the failure goes to the error reporter, the
    /// list is left unchanged and `Ok(false)` is returned.
    pub fn add_waypoint_at(&mut self, point: Point) -> Result<bool> {
        let Some(waypoint) = self.resolve_or_report(point) else {
            return Ok(false);
        };
        self.push_waypoint(waypoint)?;
        Ok(true)
    }

    /// Move the waypoint at `index` to `point`, re-binding it to the nearest node.
    ///
    /// Behaves like [`add_waypoint_at`](Self::add_waypoint_at) when no node is close enough.
    pub fn move_waypoint_to(&mut self, index: usize, point: Point) -> Result<bool> {
        if index >= self.waypoints.len() {
            return Err(self.index_error(index));
        }
        let Some(waypoint) = self.resolve_or_report(point) else {
            return Ok(false);
        };
        self.replace_waypoint(index, waypoint)?;
        Ok(true)
    }

    /// Insert a waypoint on the published route at the highlighted position.
    ///
    /// The new waypoint sits at `point` and is bound to the route node closest
    /// to the highlighted position. It goes between the two waypoints whose leg
    /// contains that position. A waypoint that would share its node with one of
    /// those two neighbours is reported and not inserted.
    pub fn insert_waypoint_on_route(&mut self, point: Point) -> Result<bool> {
        let position = self.highlighted_position;
        let (node_id, segment) = match (&self.route, self.index_of_non_empty_segment_at(position)) {
            (Some(route), Some(segment)) => (route.node_closest_to(position), segment),
            _ => return Err(Error::NoCurrentRoute),
        };

        let index = segment + 1;
        let neighbours = [index.checked_sub(1), Some(index)];
        let duplicate = neighbours
            .into_iter()
            .flatten()
            .filter_map(|i| self.waypoints.get(i))
            .any(|waypoint| waypoint.node_id == node_id);
        if duplicate {
            self.report(&Error::WaypointAlreadyPresent { node: node_id });
            return Ok(false);
        }

        self.insert_waypoint(index, Waypoint::new(point, node_id))?;
        Ok(true)
    }

    /// Index of the waypoint leg containing `position` on the published route.
    ///
    /// Route segments only exist for legs between distinct nodes, so the
    /// segment index is shifted past every empty leg before it.
    pub fn index_of_non_empty_segment_at(&self, position: f64) -> Option<usize> {
        let route = self.route.as_ref()?;
        let mut index = route.index_of_segment_at(position);
        let mut leg = 0;
        while leg <= index && leg + 1 < self.waypoints.len() {
            if self.waypoints[leg].node_id == self.waypoints[leg + 1].node_id {
                index += 1;
            }
            leg += 1;
        }
        Some(index)
    }

    fn recompute(&mut self) -> Result<()> {
        let legs: Vec<(NodeId, NodeId)> = self
            .waypoints
            .windows(2)
            .map(|pair| (pair[0].node_id, pair[1].node_id))
            .collect();

        let mut segments = Vec::with_capacity(legs.len());
        let mut complete = true;
        for (from, to) in legs {
            if from == to {
                trace!(node = from, "skipping empty leg");
                continue;
            }
            match self.leg_between(from, to)? {
                Some(leg) => segments.push(Route::Single(leg)),
                None => {
                    debug!(from, to, "leg unreachable; route incomplete");
                    complete = false;
                    break;
                }
            }
        }

        let route = if self.waypoints.len() >= 2 && complete && !segments.is_empty() {
            Some(Route::Multi(MultiRoute::new(segments)?))
        } else {
            None
        };
        self.publish(route);
        Ok(())
    }

    fn leg_between(&mut self, from: NodeId, to: NodeId) -> Result<Option<SingleRoute>> {
        let key = SegmentKey::new(from, to);
        if let Some(cached) = self.cache.get(&key) {
            trace!(from, to, "leg cache hit");
            return Ok(cached.clone());
        }

        trace!(from, to, "leg cache miss");
        let leg = self.computer.best_route_between(from, to)?;
        self.cache.insert(key, leg.clone());
        Ok(leg)
    }

    fn publish(&mut self, route: Option<Route>) {
        self.elevation_profile = route.as_ref().map(|route| {
            self.profiler
                .elevation_profile(route, self.settings.elevation_sampling_step)
        });
        self.route = route;
        self.revision += 1;

        debug!(
            revision = self.revision,
            waypoints = self.waypoints.len(),
            segments = self.route.as_ref().map_or(0, Route::segment_count),
            length = self.route.as_ref().map_or(0.0, Route::length),
            "published route"
        );

        let route = self.route.as_ref();
        for subscriber in &mut self.subscribers {
            subscriber(route);
        }
    }

    fn resolve_or_report(&self, point: Point) -> Option<Waypoint> {
        match Waypoint::resolve(self.computer.graph(), point, self.settings.search_radius) {
            Ok(waypoint) => Some(waypoint),
            Err(error) => {
                self.report(&error);
                None
            }
        }
    }

    fn report(&self, error: &Error) {
        self.reporter.report(&error.to_string());
    }

    fn check_waypoint(&self, waypoint: &Waypoint) -> Result<()> {
        let node_count = self.computer.graph().node_count();
        if waypoint.node_id < node_count {
            Ok(())
        } else {
            Err(Error::NodeOutOfRange {
                node: waypoint.node_id,
                node_count,
            })
        }
    }

    fn index_error(&self, index: usize) -> Error {
        Error::WaypointIndexOutOfRange {
            index,
            len: self.waypoints.len(),
        }
    }
}
