//! Tolerance defaults for planar sweep geometry (internal).
//!
//! Policy
//! - Fixed constants, shared by the primitives and by `SweepCfg::default()`.
//!   Callers that need looser tolerances go through `SweepCfg`.

/// Threshold on cross products and y-differences treated as zero.
pub(crate) const EPS: f64 = 1e-9;
/// Slope substituted for bisectors of sites at (nearly) the same height.
pub(crate) const DEGENERATE_SLOPE: f64 = 1e7;
/// Extension applied to rays whose start already lies past the box exit side.
pub(crate) const RAY_MARGIN: f64 = 10.0;
