//! Artifact export — persists run outputs for later analysis.
//!
//! Each run writes into `<output_dir>/<run_id>/`:
//! - `equity.csv` — the equity curve, one row per holdings snapshot
//! - `report.json` — the full run summary (report, counters, provenance)

use anyhow::{Context, Result};
use eventlab_core::report::EquityPoint;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::runner::RunSummary;

/// Paths of the artifacts written for one run.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub run_dir: PathBuf,
    pub equity_csv: PathBuf,
    pub report_json: PathBuf,
}

/// Write the equity curve as CSV.
pub fn write_equity_csv(path: &Path, equity: &[EquityPoint]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("failed to create equity CSV {}", path.display()))?;
    writeln!(file, "timestamp,equity")?;
    for point in equity {
        writeln!(file, "{},{:.4}", point.timestamp.to_rfc3339(), point.equity)?;
    }
    Ok(())
}

/// Write the run summary as pretty-printed JSON.
pub fn write_report_json(path: &Path, summary: &RunSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary).context("failed to serialize run summary")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report JSON {}", path.display()))?;
    Ok(())
}

/// Write all artifacts for a run under `<output_dir>/<run_id>/`.
pub fn save_artifacts(output_dir: &Path, summary: &RunSummary) -> Result<ArtifactPaths> {
    let run_dir = output_dir.join(&summary.run_id);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create run directory {}", run_dir.display()))?;

    let equity_csv = run_dir.join("equity.csv");
    write_equity_csv(&equity_csv, &summary.report.equity_curve)?;

    let report_json = run_dir.join("report.json");
    write_report_json(&report_json, summary)?;

    Ok(ArtifactPaths {
        run_dir,
        equity_csv,
        report_json,
    })
}
