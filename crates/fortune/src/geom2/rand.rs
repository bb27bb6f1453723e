//! Random site sets in an axis-aligned box (uniform + jittered grid).
//!
//! Purpose
//! - Provide small, deterministic site samplers for tests, benches and the CLI.
//!   Every draw is reproducible from a replay token `(seed, index)`.
//!
//! Model
//! - `Uniform`: i.i.d. points in `[margin, width - margin] × [margin, height - margin]`.
//! - `JitteredGrid`: one point per cell of a near-square grid, jittered inside the cell.
//!   Keeps sites well separated, which benches like.
//!
//! References
//! - Code cross-refs: `sweep::voronoi`, `sweep::Bounds`

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Layout of the drawn sites.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SiteLayout {
    Uniform,
    JitteredGrid,
}

/// Sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct SiteCfg {
    pub count: usize,
    pub width: f64,
    pub height: f64,
    /// Fraction of the box kept free along every side. Clamped to [0, 0.45].
    pub margin_frac: f64,
    pub layout: SiteLayout,
}
impl Default for SiteCfg {
    fn default() -> Self {
        Self {
            count: 64,
            width: 100.0,
            height: 100.0,
            margin_frac: 0.05,
            layout: SiteLayout::Uniform,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}
impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw `cfg.count` sites. Returns an empty set for a non-positive box.
pub fn draw_sites(cfg: SiteCfg, tok: ReplayToken) -> Vec<Vector2<f64>> {
    if !(cfg.width > 0.0 && cfg.height > 0.0) || cfg.count == 0 {
        return Vec::new();
    }
    let mut rng = tok.to_std_rng();
    let m = cfg.margin_frac.clamp(0.0, 0.45);
    let (x0, x1) = (m * cfg.width, (1.0 - m) * cfg.width);
    let (y0, y1) = (m * cfg.height, (1.0 - m) * cfg.height);
    match cfg.layout {
        SiteLayout::Uniform => (0..cfg.count)
            .map(|_| Vector2::new(rng.gen_range(x0..x1), rng.gen_range(y0..y1)))
            .collect(),
        SiteLayout::JitteredGrid => {
            let cols = (cfg.count as f64).sqrt().ceil() as usize;
            let rows = cfg.count.div_ceil(cols);
            let cw = (x1 - x0) / cols as f64;
            let ch = (y1 - y0) / rows as f64;
            (0..cfg.count)
                .map(|k| {
                    let (i, j) = (k % cols, k / cols);
                    // Stay off the cell borders so neighbours never coincide.
                    let u = rng.gen_range(0.1..0.9);
                    let v = rng.gen_range(0.1..0.9);
                    Vector2::new(
                        x0 + (i as f64 + u) * cw,
                        y0 + (j as f64 + v) * ch,
                    )
                })
                .collect()
        }
    }
}
