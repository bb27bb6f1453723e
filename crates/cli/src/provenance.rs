use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What produced an artifact: subcommand, its parameters, the files it read,
/// and the sweep counters when there was a sweep.
pub struct Payload {
    pub command: &'static str,
    pub params: Value,
    pub inputs: Vec<PathBuf>,
    pub stats: Option<Value>,
}

impl Payload {
    pub fn new(command: &'static str, params: Value) -> Self {
        Self {
            command,
            params,
            inputs: Vec::new(),
            stats: None,
        }
    }

    pub fn with_input<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.inputs.push(path.into());
        self
    }

    pub fn with_stats(mut self, stats: Value) -> Self {
        self.stats = Some(stats);
        self
    }
}

#[derive(Serialize)]
struct InputRecord {
    path: String,
    bytes: u64,
}

#[derive(Serialize)]
struct Callsite {
    file: &'static str,
    line: u32,
}

#[derive(Serialize)]
struct Sidecar<'a> {
    command: &'a str,
    code_rev: String,
    version: &'static str,
    callsite: Callsite,
    params: &'a Value,
    inputs: Vec<InputRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<&'a Value>,
    output: String,
}

/// Write the provenance sidecar of `artifact` (see [`sidecar_path`]).
///
/// Inputs are recorded with their size at write time; a missing input is an error.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let callsite = Location::caller();
    let artifact = artifact.as_ref();
    let inputs = payload
        .inputs
        .iter()
        .map(|p| {
            let meta =
                fs::metadata(p).with_context(|| format!("reading input {}", p.display()))?;
            Ok(InputRecord {
                path: p.to_string_lossy().into_owned(),
                bytes: meta.len(),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let doc = Sidecar {
        command: payload.command,
        code_rev: current_git_rev(),
        version: fortune::VERSION,
        callsite: Callsite {
            file: callsite.file(),
            line: callsite.line(),
        },
        params: &payload.params,
        inputs,
        stats: payload.stats.as_ref(),
        output: artifact.to_string_lossy().into_owned(),
    };

    let path = sidecar_path(artifact);
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!(path = %path.display(), command = payload.command, "provenance");
    Ok(path)
}

/// `dir/edges.json` → `dir/edges.provenance.json`.
fn sidecar_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "artifact".to_string());
    artifact.with_file_name(format!("{stem}.provenance.json"))
}

/// Commit of the build: `GIT_COMMIT` at compile or run time, else `git rev-parse`.
pub fn current_git_rev() -> String {
    let from_env = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|s| !s.is_empty());
    from_env
        .or_else(|| {
            let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
            out.status
                .success()
                .then(|| String::from_utf8_lossy(&out.stdout).trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}
