//! Planner configuration.
//!
//! Settings are plain data with serde support so embedding applications can
//! keep them in whatever configuration file they already have. Every field
//! has a default, so an empty JSON object is a valid configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Radius, in metres, within which a picked location snaps to a graph node.
pub const DEFAULT_SEARCH_RADIUS: f64 = 500.0;

/// Distance, in metres, between two elevation samples along a route.
pub const DEFAULT_ELEVATION_SAMPLING_STEP: f64 = 5.0;

/// Tunables for [`RouteOrchestrator`](crate::routing::RouteOrchestrator).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlannerSettings {
    /// Radius used to resolve a location to its nearest graph node.
    pub search_radius: f64,
    /// Step handed to the elevation-profile collaborator.
    pub elevation_sampling_step: f64,
    /// Upper bound on cached waypoint legs; `None` keeps every leg.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_cached_segments: Option<usize>,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            search_radius: DEFAULT_SEARCH_RADIUS,
            elevation_sampling_step: DEFAULT_ELEVATION_SAMPLING_STEP,
            max_cached_segments: None,
        }
    }
}

impl PlannerSettings {
    /// Parse and validate settings from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate settings from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| Error::SettingsRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.search_radius.is_finite() && self.search_radius > 0.0) {
            return Err(Error::InvalidSettings {
                message: format!(
                    "search_radius must be a positive number, got {}",
                    self.search_radius
                ),
            });
        }
        if !(self.elevation_sampling_step.is_finite() && self.elevation_sampling_step > 0.0) {
            return Err(Error::InvalidSettings {
                message: format!(
                    "elevation_sampling_step must be a positive number, got {}",
                    self.elevation_sampling_step
                ),
            });
        }
        if self.max_cached_segments == Some(0) {
            return Err(Error::InvalidSettings {
                message: "max_cached_segments must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
