//! Clip open rays to the output box and export closed edges.

use nalgebra::Vector2;

use super::types::{Bounds, Trace, VoronoiEdge};
use super::{Sweep, VoronoiDiagram};

/// Close an open trace where its ray leaves `[0, width] × [0, height]`.
///
/// The exit side follows the sign of each direction component. If the start is
/// already past that side the ray is extended by `margin` instead. Closed
/// traces are left untouched, so calling this twice is a no-op.
pub fn finalize_trace(trace: &mut Trace, bounds: Bounds, margin: f64) -> bool {
    if !trace.is_open() {
        return false;
    }
    let end = ray_exit(trace, bounds, margin);
    trace.close(end)
}

fn ray_exit(trace: &Trace, bounds: Bounds, margin: f64) -> Vector2<f64> {
    let (p, d) = (trace.start, trace.direction);
    let exit_param = |pos: f64, dir: f64, hi: f64| -> f64 {
        if dir > 0.0 {
            (hi - pos) / dir
        } else if dir < 0.0 {
            -pos / dir
        } else {
            f64::INFINITY
        }
    };
    let tx = exit_param(p.x, d.x, bounds.width);
    let ty = exit_param(p.y, d.y, bounds.height);
    let t = tx.min(ty);
    if !(t.is_finite() && t > 0.0) {
        let len = d.norm();
        if len > 0.0 {
            return p + d * (margin / len);
        }
        return p;
    }
    if tx <= ty && trace.slope.abs() <= 1.0 {
        // Leaves through a vertical side; the line equation is well conditioned here.
        let x = if d.x > 0.0 { bounds.width } else { 0.0 };
        return Vector2::new(x, trace.slope * x + trace.intercept);
    }
    p + d * t
}

impl Sweep {
    /// Close every edge still traced by a breakpoint.
    pub(super) fn finalize(&mut self) {
        let mut clipped = 0usize;
        for bp in self.beachline.breakpoints() {
            let edge = self.beachline.edge_of(bp);
            if finalize_trace(&mut self.edges[edge.0], self.bounds, self.cfg.ray_margin) {
                clipped += 1;
            }
        }
        tracing::debug!(clipped, "open rays clipped to bounds");
    }

    /// Closed edges only; twin links are remapped to output indices.
    pub(super) fn export(self) -> VoronoiDiagram {
        let mut slot: Vec<Option<usize>> = vec![None; self.edges.len()];
        let mut edges = Vec::with_capacity(self.edges.len());
        for (i, t) in self.edges.iter().enumerate() {
            if let Some(end) = t.end {
                slot[i] = Some(edges.len());
                edges.push(VoronoiEdge {
                    start: t.start,
                    end,
                    site_left: t.left.0,
                    site_right: t.right.0,
                });
            }
        }
        let twins = self
            .edges
            .iter()
            .zip(&slot)
            .filter(|(_, s)| s.is_some())
            .map(|(t, _)| t.twin.and_then(|j| slot[j.0]))
            .collect();
        VoronoiDiagram {
            sites: self.sites,
            edges,
            vertices: self.vertices,
            stats: self.stats,
            twins,
        }
    }
}
