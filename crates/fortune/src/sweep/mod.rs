//! Fortune's sweep: Voronoi diagram of planar sites.
//!
//! Purpose
//! - Sweep a horizontal line from the topmost site downwards, keeping the
//!   beachline of parabolic arcs in a tree. Site events split arcs and start
//!   edges; circle events remove arcs and place Voronoi vertices.
//! - After the queue drains, open edges are clipped to `[0, width] × [0, height]`.
//!
//! Layout
//! - `types.rs` (ids, traces, output records), `events.rs` (queue with lazy
//!   invalidation), `beachline.rs` (arena tree), `handlers.rs` (site/circle
//!   events), `finalize.rs` (ray clipping and export), `input.rs` (validation).
//!
//! Determinism
//! - Events pop by descending y, then descending x, then creation order, so the
//!   same input yields bit-identical output.
//!
//! References
//! - Code cross-refs: `geom2::{breakpoint_x, parabola_y, ray_params, side}`, `mesh::HalfEdgeMesh`

mod beachline;
mod events;
mod finalize;
mod handlers;
mod input;
mod types;

use nalgebra::Vector2;

pub use beachline::Beachline;
pub use events::{Event, EventKind, EventQueue};
pub use finalize::finalize_trace;
pub use input::{validate, InputError};
pub use types::{
    Bounds, EdgeId, EventId, NodeId, Site, SiteId, SweepCfg, SweepStats, Trace, VoronoiEdge,
};

use crate::mesh::HalfEdgeMesh;

/// Sweep state. Drive it with `step` or consume it with `run`.
#[derive(Debug)]
pub struct Sweep {
    cfg: SweepCfg,
    bounds: Bounds,
    sites: Vec<Site>,
    beachline: Beachline,
    queue: EventQueue,
    edges: Vec<Trace>,
    vertices: Vec<Vector2<f64>>,
    sweep_y: f64,
    stats: SweepStats,
}

impl Sweep {
    /// Validate the input and queue one site event per point.
    pub fn new(points: &[Vector2<f64>], bounds: Bounds, cfg: SweepCfg) -> Result<Self, InputError> {
        let sites = validate(points, bounds, cfg.eps)?;
        let mut queue = EventQueue::with_eps(cfg.eps);
        for s in &sites {
            queue.push(s.pos.x, s.pos.y, EventKind::Site(s.index));
        }
        let sweep_y = sites.iter().map(|s| s.pos.y).fold(f64::NEG_INFINITY, f64::max);
        Ok(Self {
            cfg,
            bounds,
            sites,
            beachline: Beachline::new(),
            queue,
            edges: Vec::new(),
            vertices: Vec::new(),
            sweep_y,
            stats: SweepStats::default(),
        })
    }

    /// Process one event. Returns `false` once the queue is drained.
    pub fn step(&mut self) -> bool {
        let Some(event) = self.queue.pop_next() else {
            return false;
        };
        self.sweep_y = event.y;
        match event.kind {
            EventKind::Site(site) => self.handle_site(site),
            EventKind::Circle { arc, vertex } => self.handle_circle(event.id, arc, vertex),
        }
        true
    }

    /// Drain the queue, clip open rays and export.
    pub fn run(mut self) -> VoronoiDiagram {
        while self.step() {}
        self.finalize();
        self.stats.stale_discarded = self.queue.discarded();
        tracing::debug!(
            sites = self.sites.len(),
            edges = self.edges.len(),
            vertices = self.vertices.len(),
            stats = ?self.stats,
            "sweep finished"
        );
        self.export()
    }

    #[inline]
    pub fn sweep_y(&self) -> f64 {
        self.sweep_y
    }

    #[inline]
    pub fn stats(&self) -> SweepStats {
        self.stats
    }

    /// Edge table so far (open traces included).
    #[inline]
    pub fn traces(&self) -> &[Trace] {
        &self.edges
    }

    /// Input indices of the beachline arcs, left to right.
    pub fn beachline_sites(&self) -> Vec<usize> {
        self.beachline
            .arcs()
            .into_iter()
            .map(|a| self.beachline.site_of(a).0)
            .collect()
    }

    fn push_edge(&mut self, trace: Trace) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edges.push(trace);
        id
    }
}

/// Bounded Voronoi diagram: closed edges, vertices and event counters.
#[derive(Clone, Debug)]
pub struct VoronoiDiagram {
    pub sites: Vec<Site>,
    pub edges: Vec<VoronoiEdge>,
    /// Vertices in the order their circle events fired.
    pub vertices: Vec<Vector2<f64>>,
    pub stats: SweepStats,
    /// `twins[i]`: index of the edge created together with edge `i`.
    twins: Vec<Option<usize>>,
}

impl VoronoiDiagram {
    #[inline]
    pub fn twin_of(&self, edge: usize) -> Option<usize> {
        self.twins.get(edge).copied().flatten()
    }

    /// One segment per geometric Voronoi edge: twin half-rays are joined into
    /// `end(right-going) → end(left-going)`, other edges pass through.
    pub fn merged_edges(&self) -> Vec<VoronoiEdge> {
        let mut out = Vec::with_capacity(self.edges.len());
        for (i, e) in self.edges.iter().enumerate() {
            match self.twin_of(i) {
                Some(j) if j < i => continue,
                Some(j) => out.push(VoronoiEdge {
                    start: self.edges[j].end,
                    end: e.end,
                    site_left: e.site_left,
                    site_right: e.site_right,
                }),
                None => out.push(*e),
            }
        }
        out
    }

    /// Half-edge mesh of the exported edges (two vertices, two twins per edge).
    pub fn to_mesh(&self) -> HalfEdgeMesh {
        HalfEdgeMesh::from_edges(&self.edges)
    }
}

/// Convenience entry point with default tolerances.
pub fn voronoi(points: &[Vector2<f64>], bounds: Bounds) -> Result<VoronoiDiagram, InputError> {
    Ok(Sweep::new(points, bounds, SweepCfg::default())?.run())
}

#[cfg(test)]
mod tests;
