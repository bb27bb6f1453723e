use super::*;
use crate::geom2::breakpoint_x;
use crate::geom2::rand::{draw_sites, ReplayToken, SiteCfg, SiteLayout};
use nalgebra::{vector, Vector2};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn near(a: Vector2<f64>, b: Vector2<f64>, tol: f64) -> bool {
    (a - b).norm() < tol
}

fn assert_bisectors(d: &VoronoiDiagram) {
    for e in &d.edges {
        let a = d.sites[e.site_left].pos;
        let b = d.sites[e.site_right].pos;
        for p in [e.start, e.end] {
            let (da, db) = ((p - a).norm(), (p - b).norm());
            assert!(
                (da - db).abs() < 1e-6 * (1.0 + da.max(db)),
                "{p:?} not on bisector of {a:?} and {b:?}: {da} vs {db}"
            );
        }
    }
}

/// Interior points of every merged edge inside the box have no site closer
/// than the edge's own two.
fn assert_nearest_sites(d: &VoronoiDiagram, bounds: Bounds) {
    let inside = |p: Vector2<f64>| {
        (0.0..=bounds.width).contains(&p.x) && (0.0..=bounds.height).contains(&p.y)
    };
    for e in d.merged_edges() {
        for k in 1..10 {
            let p = e.start + (e.end - e.start) * (k as f64 / 10.0);
            if !inside(p) {
                continue;
            }
            let own = (p - d.sites[e.site_left].pos)
                .norm()
                .min((p - d.sites[e.site_right].pos).norm());
            for s in &d.sites {
                let other = (p - s.pos).norm();
                assert!(
                    other >= own - 1e-6 * (1.0 + own),
                    "{p:?} on edge {}|{} is closer to site {} ({other} < {own})",
                    e.site_left,
                    e.site_right,
                    s.index.0
                );
            }
        }
    }
}

#[test]
fn two_sites_give_one_vertical_segment() {
    let d = voronoi(&[vector![0.0, 0.0], vector![10.0, 0.0]], Bounds::new(100.0, 100.0)).unwrap();
    assert_eq!(d.edges.len(), 1);
    assert!(d.vertices.is_empty());
    let e = d.edges[0];
    assert!(near(e.start, vector![5.0, 100.0], 1e-12));
    assert!(near(e.end, vector![5.0, 0.0], 1e-12));
    assert_eq!((e.site_left, e.site_right), (0, 1));
    assert_eq!(d.merged_edges().len(), 1);
}

#[test]
fn triangle_has_one_vertex_at_circumcenter() {
    let d = voronoi(
        &[vector![0.0, 0.0], vector![10.0, 0.0], vector![5.0, 10.0]],
        Bounds::new(100.0, 100.0),
    )
    .unwrap();
    assert_eq!(d.vertices.len(), 1);
    let v = d.vertices[0];
    assert!(near(v, vector![5.0, 3.75], 1e-9), "{v:?}");
    let incident = d
        .edges
        .iter()
        .filter(|e| near(e.start, v, 1e-9) || near(e.end, v, 1e-9))
        .count();
    assert_eq!(incident, 3);
    assert_eq!(d.merged_edges().len(), 3);
    assert_eq!(d.stats.circle_scheduled, 1);
    assert_eq!(d.stats.circle_fired, 1);
    assert_eq!(d.stats.site_events, 3);
    // The edge between the two bottom sites runs straight down from the vertex.
    let bottom = d
        .edges
        .iter()
        .find(|e| e.site_left == 0 && e.site_right == 1)
        .unwrap();
    assert!(near(bottom.end, vector![5.0, 0.0], 1e-9));
    assert_bisectors(&d);
}

#[test]
fn equal_height_sites_give_parallel_bisectors() {
    let pts: Vec<_> = (0..4).map(|i| vector![10.0 * i as f64, 50.0]).collect();
    let d = voronoi(&pts, Bounds::new(100.0, 100.0)).unwrap();
    assert_eq!(d.stats.circle_scheduled, 0);
    assert!(d.vertices.is_empty());
    let mut xs: Vec<f64> = d
        .edges
        .iter()
        .map(|e| {
            assert!((e.start.x - e.end.x).abs() < 1e-12);
            assert_eq!((e.start.y, e.end.y), (100.0, 0.0));
            e.start.x
        })
        .collect();
    xs.sort_by(f64::total_cmp);
    assert_eq!(xs, vec![5.0, 15.0, 25.0]);
}

#[test]
fn vertical_column_gives_horizontal_bisectors() {
    let pts = [vector![50.0, 10.0], vector![50.0, 50.0], vector![50.0, 90.0]];
    let d = voronoi(&pts, Bounds::new(100.0, 100.0)).unwrap();
    assert!(d.vertices.is_empty());
    let merged = d.merged_edges();
    assert_eq!(merged.len(), 2);
    let mut ys: Vec<f64> = merged.iter().map(|e| e.start.y).collect();
    ys.sort_by(f64::total_cmp);
    assert!((ys[0] - 30.0).abs() < 1e-9 && (ys[1] - 70.0).abs() < 1e-9);
    for e in &merged {
        assert!((e.start.y - e.end.y).abs() < 1e-9);
        assert!((e.length() - 100.0).abs() < 1e-9);
    }
}

#[test]
fn cocircular_square_meets_in_the_center() {
    let pts = [
        vector![20.0, 20.0],
        vector![80.0, 20.0],
        vector![20.0, 80.0],
        vector![80.0, 80.0],
    ];
    let d = voronoi(&pts, Bounds::new(100.0, 100.0)).unwrap();
    let center = vector![50.0, 50.0];
    assert!(!d.vertices.is_empty());
    assert!(d.vertices.iter().all(|v| near(*v, center, 1e-9)));
    let spokes: Vec<_> = d
        .merged_edges()
        .into_iter()
        .filter(|e| e.length() > 1e-9)
        .collect();
    assert_eq!(spokes.len(), 4);
    for e in &spokes {
        assert!(near(e.start, center, 1e-9) || near(e.end, center, 1e-9));
        assert!((e.length() - 50.0).abs() < 1e-9);
    }
    assert_bisectors(&d);
}

#[test]
fn level_top_pair_with_vertex_above_the_box() {
    // The circle through the two top sites and the third one is centred far above.
    let pts = [vector![0.0, 50.0], vector![10.0, 50.0], vector![6.0, 49.9]];
    let d = voronoi(&pts, Bounds::new(60.0, 60.0)).unwrap();
    assert_eq!(d.stats.circle_fired, 1);
    assert!(near(d.vertices[0], vector![5.0, 169.95], 1e-6), "{:?}", d.vertices);
    assert_bisectors(&d);
}

#[test]
fn random_sites_respect_planar_bounds_and_bisectors() {
    for index in 0..20u64 {
        let cfg = SiteCfg {
            count: 5 + 7 * index as usize,
            ..SiteCfg::default()
        };
        let pts = draw_sites(cfg, ReplayToken { seed: 17, index });
        let n = pts.len();
        let d = voronoi(&pts, Bounds::new(cfg.width, cfg.height)).unwrap();
        assert!(d.vertices.len() <= 2 * n - 5, "n={n} v={}", d.vertices.len());
        let merged = d.merged_edges();
        assert!(merged.len() <= 3 * n - 6, "n={n} e={}", merged.len());
        // Euler for a connected diagram: E = n + V - 1.
        assert_eq!(merged.len(), n + d.vertices.len() - 1);
        assert!(d
            .edges
            .iter()
            .all(|e| e.start.iter().chain(e.end.iter()).all(|c| c.is_finite())));
        assert_bisectors(&d);
    }
}

#[test]
fn every_vertex_is_equidistant_to_three_sites() {
    let pts = draw_sites(
        SiteCfg {
            count: 80,
            layout: SiteLayout::JitteredGrid,
            ..SiteCfg::default()
        },
        ReplayToken { seed: 5, index: 0 },
    );
    let d = voronoi(&pts, Bounds::new(100.0, 100.0)).unwrap();
    assert!(!d.vertices.is_empty());
    for v in &d.vertices {
        let mut dist: Vec<f64> = pts.iter().map(|p| (p - v).norm()).collect();
        dist.sort_by(f64::total_cmp);
        // Nearest three sites are tied; nothing is strictly closer.
        assert!(dist[2] - dist[0] < 1e-6 * (1.0 + dist[0]), "{v:?}: {:?}", &dist[..3]);
    }
}

#[test]
fn repeated_runs_are_identical() {
    let mut rng = StdRng::seed_from_u64(99);
    let pts: Vec<_> = (0..300)
        .map(|_| Vector2::new(rng.gen_range(0.0..500.0), rng.gen_range(0.0..300.0)))
        .collect();
    let a = voronoi(&pts, Bounds::new(500.0, 300.0)).unwrap();
    let b = voronoi(&pts, Bounds::new(500.0, 300.0)).unwrap();
    assert_eq!(a.edges, b.edges);
    assert_eq!(a.vertices, b.vertices);
    assert_eq!(a.stats, b.stats);
}

#[test]
fn twins_are_mutual_and_share_a_start() {
    let pts = draw_sites(SiteCfg::default(), ReplayToken { seed: 1, index: 4 });
    let d = voronoi(&pts, Bounds::new(100.0, 100.0)).unwrap();
    for i in 0..d.edges.len() {
        if let Some(j) = d.twin_of(i) {
            assert_eq!(d.twin_of(j), Some(i));
            assert_eq!(d.edges[i].start, d.edges[j].start);
            assert_eq!(d.edges[i].site_left, d.edges[j].site_right);
        }
    }
}

#[test]
fn stepping_exposes_the_beachline() {
    let pts = [vector![0.0, 10.0], vector![1.0, 0.0]];
    let mut sweep = Sweep::new(&pts, Bounds::new(20.0, 20.0), SweepCfg::default()).unwrap();
    assert!(sweep.step());
    assert_eq!(sweep.beachline_sites(), vec![0]);
    assert!(sweep.step());
    assert_eq!(sweep.sweep_y(), 0.0);
    assert_eq!(sweep.beachline_sites(), vec![0, 1, 0]);
    assert_eq!(sweep.traces().len(), 2);
    assert!(sweep.traces().iter().all(Trace::is_open));
    assert!(!sweep.step());
    assert_eq!(sweep.stats().site_events, 2);
    let d = sweep.run();
    assert_eq!(d.edges.len(), 2);
    assert_eq!(d.merged_edges().len(), 1);
}

#[test]
fn finalizing_a_closed_trace_is_a_no_op() {
    let a = Site {
        index: SiteId(0),
        pos: vector![0.0, 0.0],
    };
    let b = Site {
        index: SiteId(1),
        pos: vector![10.0, 2.0],
    };
    let mut t = Trace::new(vector![5.0, 1.0], &a, &b);
    let bounds = Bounds::new(100.0, 100.0);
    assert!(finalize_trace(&mut t, bounds, 10.0));
    let end = t.end.unwrap();
    assert!(!finalize_trace(&mut t, bounds, 10.0));
    assert_eq!(t.end, Some(end));
    // Down-right ray leaves through the bottom side.
    assert!(end.y.abs() < 1e-12 && end.x > 5.0);
}

#[test]
fn ray_starting_outside_is_extended_by_margin() {
    let a = Site {
        index: SiteId(0),
        pos: vector![0.0, 0.0],
    };
    let b = Site {
        index: SiteId(1),
        pos: vector![0.0, 10.0],
    };
    // Points left; start already past the left side.
    let mut t = Trace::new(vector![-5.0, 5.0], &b, &a);
    assert!(finalize_trace(&mut t, Bounds::new(100.0, 100.0), 10.0));
    assert!(near(t.end.unwrap(), vector![-15.0, 5.0], 1e-12));
}

#[test]
fn invalid_input_is_rejected() {
    let b = Bounds::new(10.0, 10.0);
    assert_eq!(
        voronoi(&[vector![1.0, 1.0]], b).unwrap_err(),
        InputError::TooFewSites { got: 1 }
    );
    assert!(matches!(
        voronoi(&[vector![1.0, 1.0], vector![1.0, 1.0]], b),
        Err(InputError::CoincidentSites { first: 0, second: 1 })
    ));
}

#[test]
fn site_straight_below_a_breakpoint_keeps_its_cell() {
    let (a, b) = (vector![20.0, 90.0], vector![60.0, 70.0]);
    let c = vector![breakpoint_x(a, b, 30.0), 30.0];
    let bounds = Bounds::new(100.0, 100.0);
    let d = voronoi(&[a, b, c], bounds).unwrap();
    // The zero-width arc of `b` vanishes right away; nothing else fires.
    assert_eq!(d.vertices.len(), 1, "{:?}", d.vertices);
    assert_eq!(d.stats.circle_fired, 1);
    assert_eq!(d.merged_edges().len(), 3);
    let pts = [a, b, c];
    let v = d.vertices[0];
    let r: Vec<f64> = pts.iter().map(|p| (p - v).norm()).collect();
    assert!((r[0] - r[1]).abs() < 1e-6 && (r[1] - r[2]).abs() < 1e-6, "{r:?}");
    assert_bisectors(&d);
    assert_nearest_sites(&d, bounds);
}

#[test]
fn lattice_sites_keep_their_cells() {
    // Exact lattice coordinates put sites under breakpoints and on shared circles.
    let mut rng = StdRng::seed_from_u64(38);
    for _ in 0..10 {
        let mut cells: Vec<(u8, u8)> = (0..40)
            .map(|_| (rng.gen_range(0..20u8), rng.gen_range(0..20u8)))
            .collect();
        cells.sort_unstable();
        cells.dedup();
        let pts: Vec<_> = cells
            .iter()
            .map(|&(x, y)| vector![5.0 * x as f64, 5.0 * y as f64])
            .collect();
        let bounds = Bounds::new(100.0, 100.0);
        let d = voronoi(&pts, bounds).unwrap();
        assert_bisectors(&d);
        assert_nearest_sites(&d, bounds);
    }
}

#[test]
fn random_sites_have_nearest_site_edges() {
    for index in 0..5u64 {
        let cfg = SiteCfg {
            count: 60,
            ..SiteCfg::default()
        };
        let pts = draw_sites(cfg, ReplayToken { seed: 31, index });
        let bounds = Bounds::new(cfg.width, cfg.height);
        assert_nearest_sites(&voronoi(&pts, bounds).unwrap(), bounds);
    }
}
