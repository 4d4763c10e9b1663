//! Error taxonomy for the simulation core.
//!
//! Four families, all fatal except where noted:
//! - `ConfigError`: bad collaborator wiring, detected before the first step.
//! - `FeedError`: malformed or out-of-order market data, fatal at the step
//!   where it is detected. Skipping bad bars could silently introduce
//!   look-ahead or survivorship bias, so the run aborts instead.
//! - `ExecutionError`: the venue cannot price an order.
//! - `AccountingError`: a fill references a symbol outside the tracked
//!   universe, meaning the strategy/venue pairing is inconsistent with it.
//!
//! Metric edge cases (zero-variance returns, empty equity curve) are not
//! errors; they surface as NaN in the report.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Wiring problems caught at construction, before any simulation step runs.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("no instruments configured")]
    EmptyUniverse,

    #[error("initial capital must be positive, got {0}")]
    NonPositiveCapital(f64),

    #[error("misaligned bar series: {0}")]
    MisalignedSeries(String),
}

/// Market data problems, fatal at the step where they are detected.
#[derive(Debug, Error, PartialEq)]
pub enum FeedError {
    #[error("non-monotonic timestamp for '{symbol}': {prev} followed by {next}")]
    NonMonotonicTimestamp {
        symbol: String,
        prev: DateTime<Utc>,
        next: DateTime<Utc>,
    },

    #[error("malformed bar for '{symbol}' at {timestamp}: {reason}")]
    MalformedBar {
        symbol: String,
        timestamp: DateTime<Utc>,
        reason: String,
    },

    #[error("bar for untracked symbol '{symbol}' at {timestamp}")]
    UntrackedSymbol {
        symbol: String,
        timestamp: DateTime<Utc>,
    },
}

/// The venue could not execute an order.
#[derive(Debug, Error, PartialEq)]
pub enum ExecutionError {
    #[error("no price available for '{symbol}'")]
    MissingPrice { symbol: String },
}

/// The ledger cannot settle a fill.
#[derive(Debug, Error, PartialEq)]
pub enum AccountingError {
    #[error("fill for untracked instrument '{symbol}' at {timestamp}")]
    UntrackedInstrument {
        symbol: String,
        timestamp: DateTime<Utc>,
    },
}

/// Umbrella error surfaced by the simulation loop. All variants halt the run
/// immediately; no partial or best-effort continuation is attempted.
#[derive(Debug, Error)]
pub enum BacktestError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("execution error: {0}")]
    Execution(#[from] ExecutionError),

    #[error("accounting error: {0}")]
    Accounting(#[from] AccountingError),
}
