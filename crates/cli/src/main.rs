use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fortune::api::{voronoi, Bounds, SiteCfg, SiteLayout, SitesReplay, SweepStats, VoronoiEdge};
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod sites;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Voronoi diagrams by Fortune's sweep")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Sweep a CSV site set and write the clipped edges as JSON
    Run {
        /// CSV with numeric columns `x`, `y`
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        width: f64,
        #[arg(long)]
        height: f64,
        #[arg(long)]
        out: PathBuf,
        /// Join twin half-traces into one segment per Voronoi edge
        #[arg(long)]
        merged: bool,
    },
    /// Write a replayable random site set as CSV
    Random {
        #[arg(long, default_value_t = 64)]
        count: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 100.0)]
        width: f64,
        #[arg(long, default_value_t = 100.0)]
        height: f64,
        /// Jittered grid instead of uniform samples
        #[arg(long)]
        grid: bool,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Serialize)]
struct EdgeRecord {
    start: [f64; 2],
    end: [f64; 2],
    site_left: usize,
    site_right: usize,
}

impl From<&VoronoiEdge> for EdgeRecord {
    fn from(e: &VoronoiEdge) -> Self {
        Self {
            start: [e.start.x, e.start.y],
            end: [e.end.x, e.end.y],
            site_left: e.site_left,
            site_right: e.site_right,
        }
    }
}

#[derive(Serialize)]
struct DiagramDoc {
    width: f64,
    height: f64,
    sites: usize,
    merged: bool,
    vertices: Vec<[f64; 2]>,
    edges: Vec<EdgeRecord>,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Run {
            input,
            width,
            height,
            out,
            merged,
        } => run(&input, width, height, &out, merged),
        Action::Random {
            count,
            seed,
            width,
            height,
            grid,
            out,
        } => random(count, seed, width, height, grid, &out),
        Action::Report => report(),
    }
}

fn stats_json(s: &SweepStats) -> serde_json::Value {
    json!({
        "site_events": s.site_events,
        "circle_scheduled": s.circle_scheduled,
        "circle_fired": s.circle_fired,
        "stale_discarded": s.stale_discarded,
    })
}

fn run(input: &Path, width: f64, height: f64, out: &Path, merged: bool) -> Result<()> {
    tracing::info!(input = %input.display(), width, height, merged, "run");
    let pts = sites::read_sites(input)?;
    let diagram = voronoi(&pts, Bounds::new(width, height))
        .with_context(|| format!("sweeping {} sites from {}", pts.len(), input.display()))?;

    let edges = if merged {
        diagram.merged_edges()
    } else {
        diagram.edges.clone()
    };
    tracing::info!(
        edges = edges.len(),
        vertices = diagram.vertices.len(),
        "diagram"
    );
    let doc = DiagramDoc {
        width,
        height,
        sites: pts.len(),
        merged,
        vertices: diagram.vertices.iter().map(|v| [v.x, v.y]).collect(),
        edges: edges.iter().map(EdgeRecord::from).collect(),
    };

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(out, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", out.display()))?;

    let payload = provenance::Payload::new(
        "run",
        json!({
            "width": width,
            "height": height,
            "merged": merged,
        }),
    )
    .with_input(input)
    .with_stats(stats_json(&diagram.stats));
    provenance::write_sidecar(out, payload)?;
    Ok(())
}

fn random(count: usize, seed: u64, width: f64, height: f64, grid: bool, out: &Path) -> Result<()> {
    tracing::info!(count, seed, width, height, grid, out = %out.display(), "random");
    let layout = if grid {
        SiteLayout::JitteredGrid
    } else {
        SiteLayout::Uniform
    };
    let cfg = SiteCfg {
        count,
        width,
        height,
        layout,
        ..SiteCfg::default()
    };
    let pts = fortune::api::draw_sites(cfg, SitesReplay { seed, index: 0 });
    sites::write_sites(out, &pts)?;

    let payload = provenance::Payload::new(
        "random",
        json!({
            "count": count,
            "seed": seed,
            "width": width,
            "height": height,
            "layout": format!("{layout:?}"),
        }),
    );
    provenance::write_sidecar(out, payload)?;
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "version": fortune::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
