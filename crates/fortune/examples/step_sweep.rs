//! Step through a small sweep and print the beachline after every event.
//!
//! Usage:
//!   cargo run -p fortune --example step_sweep -- 12
//!
//! The optional argument is the site count (default 8).

use fortune::api::{draw_sites, Bounds, SiteCfg, SitesReplay, Sweep, SweepCfg};

fn main() {
    let count = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(8usize);
    let cfg = SiteCfg {
        count,
        ..SiteCfg::default()
    };
    let pts = draw_sites(cfg, SitesReplay { seed: 7, index: 0 });
    let mut sweep = match Sweep::new(&pts, Bounds::new(cfg.width, cfg.height), SweepCfg::default()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("step_sweep: {e}");
            return;
        }
    };
    let mut k = 0;
    while sweep.step() {
        k += 1;
        println!(
            "event {k:3}: y={:8.3} arcs={:?}",
            sweep.sweep_y(),
            sweep.beachline_sites()
        );
    }
    let d = sweep.run();
    println!(
        "done: {} edges ({} merged), {} vertices, stats {:?}",
        d.edges.len(),
        d.merged_edges().len(),
        d.vertices.len(),
        d.stats
    );
}
