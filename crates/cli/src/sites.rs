use anyhow::{bail, Context, Result};
use fortune::Vec2;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;

/// Read sites from a CSV file with numeric columns `x` and `y`.
///
/// Integer columns are widened to `f64`; a missing value fails the whole read.
pub fn read_sites<P: AsRef<Path>>(path: P) -> Result<Vec<Vec2<f64>>> {
    let path = path.as_ref();
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening {}", path.display()))?
        .select([
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("reading columns x,y from {}", path.display()))?;

    let xs = df.column("x")?.f64()?;
    let ys = df.column("y")?.f64()?;
    let mut out = Vec::with_capacity(df.height());
    for (row, (x, y)) in xs.into_iter().zip(ys.into_iter()).enumerate() {
        match (x, y) {
            (Some(x), Some(y)) => out.push(Vec2::new(x, y)),
            _ => bail!("{}: missing coordinate in row {row}", path.display()),
        }
    }
    Ok(out)
}

/// Write sites as a two-column CSV (`x`, `y`) with a header row.
pub fn write_sites<P: AsRef<Path>>(path: P, sites: &[Vec2<f64>]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let xs: Vec<f64> = sites.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = sites.iter().map(|p| p.y).collect();
    let mut df = df!("x" => xs, "y" => ys)?;
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
