//! Data types for the sweep state and its exported diagram.
//!
//! Kept small and explicit so `beachline`, `handlers` and `finalize` stay easy to read.

use nalgebra::Vector2;

use crate::geom2::cfg::{DEGENERATE_SLOPE, EPS, RAY_MARGIN};
use crate::geom2::Ray;

/// Identifier types for clarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SiteId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub u64);

/// Input point with its stable position in the caller's list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Site {
    pub index: SiteId,
    pub pos: Vector2<f64>,
}

/// Output box `[0, width] × [0, height]` used to clip open rays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[inline]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Sweep tolerances.
#[derive(Clone, Copy, Debug)]
pub struct SweepCfg {
    /// Equal-height test for sites, ray parameter slack and circle-bottom slack.
    pub eps: f64,
    /// Extension for rays that start beyond the box side they point at.
    pub ray_margin: f64,
}
impl Default for SweepCfg {
    fn default() -> Self {
        Self {
            eps: EPS,
            ray_margin: RAY_MARGIN,
        }
    }
}

/// Voronoi edge under construction.
///
/// Invariants: `start` is fixed at creation and `end` is written once.
#[derive(Clone, Debug)]
pub struct Trace {
    pub start: Vector2<f64>,
    pub end: Option<Vector2<f64>>,
    /// Site whose arc is left of the breakpoint.
    pub left: SiteId,
    /// Site whose arc is right of the breakpoint.
    pub right: SiteId,
    /// `right - left` rotated clockwise; the breakpoint moves this way.
    pub direction: Vector2<f64>,
    /// Line `y = slope · x + intercept` (large finite slope for vertical bisectors).
    pub slope: f64,
    pub intercept: f64,
    /// Edge created by the same site event, pointing the opposite way.
    pub twin: Option<EdgeId>,
    /// Set for bisectors of equal-height top sites: the edge really extends
    /// upwards without bound, `start` is just its entry into the box.
    pub unbounded_start: bool,
}

impl Trace {
    pub fn new(start: Vector2<f64>, left: &Site, right: &Site) -> Self {
        let (l, r) = (left.pos, right.pos);
        let slope = if (l.y - r.y).abs() < EPS {
            DEGENERATE_SLOPE
        } else {
            (r.x - l.x) / (l.y - r.y)
        };
        Self {
            start,
            end: None,
            left: left.index,
            right: right.index,
            direction: Vector2::new(r.y - l.y, -(r.x - l.x)),
            slope,
            intercept: start.y - slope * start.x,
            twin: None,
            unbounded_start: false,
        }
    }

    #[inline]
    pub fn ray(&self) -> Ray {
        Ray::new(self.start, self.direction)
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Write the end point. Returns `false` (and keeps the old end) if already closed.
    pub fn close(&mut self, end: Vector2<f64>) -> bool {
        if self.end.is_some() {
            return false;
        }
        self.end = Some(end);
        true
    }
}

/// Finished edge record handed to consumers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoronoiEdge {
    pub start: Vector2<f64>,
    pub end: Vector2<f64>,
    pub site_left: usize,
    pub site_right: usize,
}

impl VoronoiEdge {
    #[inline]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

/// Event counters collected during one sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub site_events: usize,
    pub circle_scheduled: usize,
    pub circle_fired: usize,
    pub stale_discarded: usize,
}
