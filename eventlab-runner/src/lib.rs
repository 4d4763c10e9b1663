//! EventLab Runner — run orchestration on top of `eventlab-core`.
//!
//! This crate provides everything around the simulation loop that a real
//! research workflow needs:
//! - TOML run configuration with a content-addressed run id
//! - CSV quote loading and dataset fingerprinting
//! - Seeded synthetic bar generation for demos and tests
//! - Single-run orchestration (config → collaborators → report)
//! - Artifact export (equity curve CSV, report JSON)

pub mod config;
pub mod data_loader;
pub mod export;
pub mod runner;

pub use config::{CommissionConfig, ConfigError, RunConfig, RunId, SizerConfig, StrategyConfig};
pub use data_loader::{
    dataset_hash, load_symbol_csv, load_universe, synthetic_bars, write_bars_csv, LoadError,
};
pub use export::{save_artifacts, write_equity_csv, write_report_json, ArtifactPaths};
pub use runner::{run_from_config, run_with_bars, RunError, RunSummary};
