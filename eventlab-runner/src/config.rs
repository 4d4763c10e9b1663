//! Serializable run configuration.
//!
//! A `RunConfig` captures everything needed to reproduce a backtest:
//! universe, capital, bar frequency, strategy, sizer, and commission model.
//! Its BLAKE3 hash is the run's content-addressed identity — two runs with
//! identical configs share a `run_id`.

use eventlab_core::execution::CommissionModel;
use eventlab_core::report::DAILY_PERIODS_PER_YEAR;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Unique identifier for a run configuration (content-addressable hash).
pub type RunId = String;

/// Errors from loading or validating a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("config lists no symbols")]
    NoSymbols,
}

/// Complete configuration for a single backtest run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    /// Symbols to trade; one CSV per symbol is expected under `csv_dir`.
    pub symbols: Vec<String>,

    /// Directory containing `<SYMBOL>.csv` quote files.
    pub csv_dir: PathBuf,

    #[serde(default = "default_initial_capital")]
    pub initial_capital: f64,

    /// Annualization basis matching the bar frequency (252 for daily bars).
    #[serde(default = "default_periods_per_year")]
    pub periods_per_year: f64,

    #[serde(default)]
    pub strategy: StrategyConfig,

    #[serde(default)]
    pub sizer: SizerConfig,

    #[serde(default)]
    pub commission: CommissionConfig,
}

fn default_initial_capital() -> f64 {
    100_000.0
}

fn default_periods_per_year() -> f64 {
    DAILY_PERIODS_PER_YEAR
}

impl RunConfig {
    /// Load and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: RunConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if config.symbols.is_empty() {
            return Err(ConfigError::NoSymbols);
        }
        Ok(config)
    }

    /// Deterministic content hash of this configuration.
    ///
    /// Canonical JSON (struct field order is fixed) hashed with BLAKE3, so
    /// identical configs always share a run id.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("RunConfig must serialize");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}

/// Strategy selection (serializable enum).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyConfig {
    /// Simple moving average crossover.
    MaCrossover {
        short_window: usize,
        long_window: usize,
    },

    /// Always long from the first bar.
    BuyAndHold,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        StrategyConfig::MaCrossover {
            short_window: 100,
            long_window: 400,
        }
    }
}

/// Position sizer selection (serializable enum).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SizerConfig {
    /// Fixed number of shares per entry.
    FixedShares { shares: i64 },

    /// Fraction of current equity per entry.
    PercentEquity { percent: f64 },
}

impl Default for SizerConfig {
    fn default() -> Self {
        SizerConfig::FixedShares { shares: 100 }
    }
}

/// Commission model selection (serializable enum).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommissionConfig {
    Free,
    PerShare { rate: f64, minimum: f64 },
    Fixed { amount: f64 },
}

impl Default for CommissionConfig {
    fn default() -> Self {
        CommissionConfig::Free
    }
}

impl CommissionConfig {
    pub fn to_model(&self) -> CommissionModel {
        match *self {
            CommissionConfig::Free => CommissionModel::Free,
            CommissionConfig::PerShare { rate, minimum } => {
                CommissionModel::PerShare { rate, minimum }
            }
            CommissionConfig::Fixed { amount } => CommissionModel::Fixed { amount },
        }
    }
}
