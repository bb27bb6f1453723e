//! Curated surface for the CLI, benches and demos (UNSTABLE).
//!
//! Prefer these re-exports over reaching into `sweep`/`geom2` directly.

// Primitives
pub use crate::geom2::{
    breakpoint_x, circle_bottom, distance, parabola_y, ray_intersection, ray_params, side, Ray,
    Side,
};
// Random site sets
pub use crate::geom2::rand::{
    draw_sites, ReplayToken as SitesReplay, SiteCfg, SiteLayout,
};
// Sweep
pub use crate::sweep::{
    finalize_trace, voronoi, Bounds, InputError, Sweep, SweepCfg, SweepStats, VoronoiDiagram,
    VoronoiEdge,
};
// Export
pub use crate::mesh::{HalfEdge, HalfEdgeMesh, MeshVertex};

use nalgebra::Vector2;

/// Sweep `points` with default tolerances and return the joined edges.
///
/// Pre: at least two distinct, finite points; positive box.
/// Post: one segment per Voronoi edge, clipped to `[0, width] × [0, height]`.
pub fn merged_voronoi_edges(
    points: &[Vector2<f64>],
    width: f64,
    height: f64,
) -> Result<Vec<VoronoiEdge>, InputError> {
    Ok(voronoi(points, Bounds::new(width, height))?.merged_edges())
}
