//! Planar geometry primitives for the sweep.
//!
//! Purpose
//! - Orientation tests, parabola evaluation at a horizontal directrix,
//!   breakpoint solving between two parabolas, and ray/ray intersection of
//!   traced Voronoi edges.
//! - Every primitive is epsilon-aware; tolerances live in `cfg`.
//!
//! References
//! - Code cross-refs: `sweep::{Beachline, Sweep}`, `types::{Ray, Side}`

pub(crate) mod cfg;
mod parabola;
mod predicates;
pub mod rand;
mod types;

pub use parabola::{breakpoint_x, circle_bottom, parabola_y};
pub use predicates::{distance, ray_intersection, ray_params, side};
pub use types::{Ray, Side};
