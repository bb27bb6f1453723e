//! Planar Voronoi diagrams by Fortune's sweep.
//!
//! Layout
//! - `geom2`: epsilon-aware primitives (orientation, parabolas, ray intersection)
//!   and replayable random site sets.
//! - `sweep`: event queue, beachline tree, event handlers, ray clipping.
//! - `mesh`: half-edge export of the finished edges.
//!
//! API Policy
//! - `api` is the curated surface for the CLI and benches; internals may move.

pub mod api;
pub mod geom2;
pub mod mesh;
pub mod sweep;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::Vector2 as Vec2;
pub use sweep::{voronoi, Bounds, VoronoiDiagram, VoronoiEdge};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom2::rand::{draw_sites, ReplayToken, SiteCfg, SiteLayout};
    pub use crate::mesh::HalfEdgeMesh;
    pub use crate::sweep::{
        voronoi, Bounds, InputError, Sweep, SweepCfg, SweepStats, VoronoiDiagram, VoronoiEdge,
    };
    pub use nalgebra::Vector2 as Vec2;
}
