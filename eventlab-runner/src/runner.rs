//! Backtest runner — wires config, data, and collaborators together.
//!
//! Two entry points:
//! - `run_from_config()`: loads quote CSVs, then runs. Used by the CLI.
//! - `run_with_bars()`: takes pre-loaded bar series. Used by tests and by
//!   callers that generate or own their data.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use thiserror::Error;

use eventlab_core::domain::Bar;
use eventlab_core::{
    Backtest, BacktestError, BuyAndHold, EngineConfig, FixedShares, HistoricFeed, MaCrossover,
    PercentEquity, PerformanceReport, PositionSizer, SimulatedVenue, Strategy,
};

use crate::config::{ConfigError, RunConfig, SizerConfig, StrategyConfig};
use crate::data_loader::{dataset_hash, load_universe, LoadError};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("data error: {0}")]
    Data(#[from] LoadError),

    #[error("backtest error: {0}")]
    Backtest(#[from] BacktestError),
}

/// Complete result of a single run: the core report plus provenance.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    /// Content hash of the configuration.
    pub run_id: String,
    /// BLAKE3 fingerprint of the loaded bar data.
    pub dataset_hash: String,
    pub symbols: Vec<String>,
    pub initial_capital: f64,
    pub report: PerformanceReport,
    /// Final signed position per symbol (sorted for stable serialization).
    pub final_positions: BTreeMap<String, i64>,
    pub commission_paid: f64,
}

/// Load quotes per the config and run the backtest.
pub fn run_from_config(config: &RunConfig) -> Result<RunSummary, RunError> {
    let series = load_universe(&config.csv_dir, &config.symbols)?;
    run_with_bars(config, series)
}

/// Run a backtest over pre-loaded bar series — no I/O.
pub fn run_with_bars(
    config: &RunConfig,
    series: HashMap<String, Vec<Bar>>,
) -> Result<RunSummary, RunError> {
    let dataset_hash = dataset_hash(&series);
    let feed = HistoricFeed::new(series).map_err(BacktestError::from)?;

    let engine_config = EngineConfig::new(config.symbols.clone(), config.initial_capital)
        .with_periods_per_year(config.periods_per_year);
    let venue = SimulatedVenue::new(config.commission.to_model());

    let engine = Backtest::new(
        engine_config,
        feed,
        build_strategy(&config.strategy),
        build_sizer(&config.sizer),
        venue,
    )
    .map_err(BacktestError::from)?;

    let result = engine.run()?;
    let commission_paid = result
        .holdings
        .last()
        .map(|h| h.commission)
        .unwrap_or(0.0);

    Ok(RunSummary {
        run_id: config.run_id(),
        dataset_hash,
        symbols: config.symbols.clone(),
        initial_capital: config.initial_capital,
        report: result.report,
        final_positions: result.positions.into_iter().collect(),
        commission_paid,
    })
}

fn build_strategy(config: &StrategyConfig) -> Box<dyn Strategy> {
    match *config {
        StrategyConfig::MaCrossover {
            short_window,
            long_window,
        } => Box::new(MaCrossover::new(short_window, long_window)),
        StrategyConfig::BuyAndHold => Box::new(BuyAndHold::new()),
    }
}

fn build_sizer(config: &SizerConfig) -> Box<dyn PositionSizer> {
    match *config {
        SizerConfig::FixedShares { shares } => Box::new(FixedShares::new(shares)),
        SizerConfig::PercentEquity { percent } => Box::new(PercentEquity::new(percent)),
    }
}
