//! Planar geometry helpers shared by edges and routes.
//!
//! Locations are `geo::Point<f64>` values in a projected, metre-based
//! coordinate system (east, north). All distances in this crate are metres.

use geo::{Distance, Euclidean};

/// Location on the map, in metres.
pub type Point = geo::Point<f64>;

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    Euclidean.distance(a, b)
}

/// Linear interpolation between `y0` (at `x = 0`) and `y1` (at `x = 1`).
pub fn interpolate(y0: f64, y1: f64, x: f64) -> f64 {
    (y1 - y0).mul_add(x, y0)
}

/// Point at `ratio` along the segment `a -> b`; `ratio` is not clamped.
pub fn interpolate_point(a: Point, b: Point, ratio: f64) -> Point {
    Point::new(
        interpolate(a.x(), b.x(), ratio),
        interpolate(a.y(), b.y(), ratio),
    )
}

/// Clamp `value` into `[min, max]`.
///
/// Unlike `f64::clamp` this never panics; a reversed range collapses to `min`.
pub fn clamp(min: f64, value: f64, max: f64) -> f64 {
    if value < min || max < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Signed length of the projection of `a -> p` onto `a -> b`.
///
/// Negative when `p` projects before `a`, larger than `|ab|` when it projects
/// past `b`. A degenerate segment (`a == b`) yields `0`.
pub fn projection_length(a: Point, b: Point, p: Point) -> f64 {
    let (ux, uy) = (b.x() - a.x(), b.y() - a.y());
    let norm = ux.hypot(uy);
    if norm == 0.0 {
        return 0.0;
    }
    let (vx, vy) = (p.x() - a.x(), p.y() - a.y());
    ux.mul_add(vx, uy * vy) / norm
}
