//! Site and circle event handlers.

use nalgebra::Vector2;

use super::events::EventKind;
use super::types::{EdgeId, EventId, NodeId, Site, SiteId, Trace};
use super::Sweep;
use crate::geom2::{circle_bottom, parabola_y, ray_params, side, Side};

impl Sweep {
    #[inline]
    fn site(&self, id: SiteId) -> Site {
        self.sites[id.0]
    }

    #[inline]
    fn arc_site(&self, arc: NodeId) -> Site {
        self.site(self.beachline.site_of(arc))
    }

    fn cancel_event(&mut self, arc: NodeId) {
        if let Some(id) = self.beachline.take_event(arc) {
            self.queue.invalidate(id);
        }
    }

    /// Insert the arc of a new site under the sweep line.
    pub(super) fn handle_site(&mut self, id: SiteId) {
        self.stats.site_events += 1;
        let site = self.site(id);
        let Some(arc) = self
            .beachline
            .locate_arc(site.pos.x, self.sweep_y, &self.sites)
        else {
            self.beachline.set_root_arc(id);
            return;
        };
        let old = self.arc_site(arc);
        self.cancel_event(arc);
        if (old.pos.y - site.pos.y).abs() < self.cfg.eps {
            self.split_level(arc, old, site);
            return;
        }

        let start = Vector2::new(site.pos.x, parabola_y(old.pos, self.sweep_y, site.pos.x));
        let left_edge = self.push_edge(Trace::new(start, &old, &site));
        let right_edge = self.push_edge(Trace::new(start, &site, &old));
        self.edges[left_edge.0].twin = Some(right_edge);
        self.edges[right_edge.0].twin = Some(left_edge);

        let a0 = self.beachline.new_arc(old.index);
        let a1 = self.beachline.new_arc(site.index);
        let a2 = self.beachline.new_arc(old.index);
        let inner = self.beachline.new_breakpoint(left_edge, a0, a1);
        let outer = self.beachline.new_breakpoint(right_edge, inner, a2);
        self.beachline.replace(arc, outer);

        self.check_circle(a0);
        self.check_circle(a2);
    }

    /// Split an arc whose site has the new site's height: two arcs, one
    /// vertical bisector entering the box from the top. Such arcs only exist
    /// in the topmost row, so no circle event can involve them yet.
    fn split_level(&mut self, arc: NodeId, old: Site, site: Site) {
        let (l, r) = if site.pos.x > old.pos.x {
            (old, site)
        } else {
            (site, old)
        };
        let start = Vector2::new(0.5 * (l.pos.x + r.pos.x), self.bounds.height);
        let mut trace = Trace::new(start, &l, &r);
        trace.unbounded_start = true;
        let edge = self.push_edge(trace);
        let la = self.beachline.new_arc(l.index);
        let ra = self.beachline.new_arc(r.index);
        let bp = self.beachline.new_breakpoint(edge, la, ra);
        self.beachline.replace(arc, bp);
    }

    /// Schedule the circle event of `arc` if its two breakpoints converge
    /// below the sweep line.
    pub(super) fn check_circle(&mut self, arc: NodeId) {
        let Some(vertex) = self.circle_vertex(arc) else {
            return;
        };
        let Some(pred) = self.beachline.predecessor_arc(arc) else {
            return;
        };
        let bottom = circle_bottom(self.arc_site(pred).pos, vertex);
        if bottom >= self.sweep_y + self.cfg.eps {
            return;
        }
        let id = self
            .queue
            .push(vertex.x, bottom, EventKind::Circle { arc, vertex });
        self.beachline.set_event(arc, Some(id));
        self.stats.circle_scheduled += 1;
    }

    /// Meeting point of the two edges bounding `arc`, if they converge.
    fn circle_vertex(&self, arc: NodeId) -> Option<Vector2<f64>> {
        let left_bp = self.beachline.left_breakpoint(arc)?;
        let right_bp = self.beachline.right_breakpoint(arc)?;
        let a = self.arc_site(self.beachline.predecessor_arc(arc)?);
        let b = self.arc_site(arc);
        let c = self.arc_site(self.beachline.successor_arc(arc)?);
        if a.index == c.index {
            return None;
        }
        let (le, re) = (self.beachline.edge_of(left_bp), self.beachline.edge_of(right_bp));
        let (lt, rt) = (&self.edges[le.0], &self.edges[re.0]);
        // Co-created rays leave a common start in opposite directions.
        if lt.twin == Some(re) {
            return None;
        }
        if side(a.pos, b.pos, c.pos) == Side::OnLine {
            return None;
        }
        let (t, s) = ray_params(&lt.ray(), &rt.ray())?;
        let eps = self.cfg.eps;
        if (t < -eps && !lt.unbounded_start) || (s < -eps && !rt.unbounded_start) {
            return None;
        }
        let p = lt.ray().at(t);
        // Rays leaving one common point only touch there; the arc between them grows.
        let tol = eps * (1.0 + p.norm());
        if (p - lt.start).norm() <= tol && (p - rt.start).norm() <= tol {
            return None;
        }
        Some(p)
    }

    /// Remove the arc whose circle event fired and place the vertex.
    pub(super) fn handle_circle(&mut self, id: EventId, arc: NodeId, vertex: Vector2<f64>) {
        if self.beachline.event_of(arc) != Some(id) {
            tracing::debug!(?id, ?arc, "circle event no longer owned by its arc");
            return;
        }
        let (Some(left_bp), Some(right_bp)) = (
            self.beachline.left_breakpoint(arc),
            self.beachline.right_breakpoint(arc),
        ) else {
            return;
        };
        let (Some(pred), Some(succ)) = (
            self.beachline.predecessor_arc(arc),
            self.beachline.successor_arc(arc),
        ) else {
            return;
        };
        self.beachline.set_event(arc, None);
        self.cancel_event(pred);
        self.cancel_event(succ);

        self.close_edge(self.beachline.edge_of(left_bp), vertex);
        self.close_edge(self.beachline.edge_of(right_bp), vertex);

        // The arc hangs off the lower breakpoint; the other one is its ancestor.
        let lower = self.beachline.parent(arc);
        let higher = if lower == Some(left_bp) { right_bp } else { left_bp };
        debug_assert!(lower.is_some_and(|l| self.beachline.is_ancestor(higher, l)));
        let (ps, ss) = (self.arc_site(pred), self.arc_site(succ));
        let edge = self.push_edge(Trace::new(vertex, &ps, &ss));
        self.beachline.set_edge(higher, edge);
        self.beachline.remove_arc(arc);

        self.vertices.push(vertex);
        self.stats.circle_fired += 1;

        self.check_circle(pred);
        self.check_circle(succ);
    }

    fn close_edge(&mut self, edge: EdgeId, at: Vector2<f64>) {
        if !self.edges[edge.0].close(at) {
            tracing::warn!(?edge, "edge closed twice; keeping first end point");
        }
    }
}
