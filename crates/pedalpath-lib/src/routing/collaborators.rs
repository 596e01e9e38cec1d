//! Collaborators the orchestrator hands results and messages to.

use tracing::warn;

use crate::route::Route;

/// Turns a finished route into an elevation profile.
///
/// Sampling the terrain is the implementor's business; the orchestrator only
/// decides when a new profile is needed and with which sampling step.
pub trait ElevationProfiler {
    type Profile;

    fn elevation_profile(&self, route: &Route, sampling_step: f64) -> Self::Profile;
}

impl<F, P> ElevationProfiler for F
where
    F: Fn(&Route, f64) -> P,
{
    type Profile = P;

    fn elevation_profile(&self, route: &Route, sampling_step: f64) -> P {
        self(route, sampling_step)
    }
}

/// Receives user-facing messages, e.g. when a picked location has no road nearby.
pub trait ErrorReporter {
    fn report(&self, message: &str);
}

impl<F> ErrorReporter for F
where
    F: Fn(&str),
{
    fn report(&self, message: &str) {
        self(message)
    }
}

/// Reports messages as `warn` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, message: &str) {
        warn!(reason = message, "waypoint edit rejected");
    }
}
