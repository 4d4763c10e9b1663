//! EventLab Core — event-sourced market simulation and portfolio accounting.
//!
//! This crate contains the heart of the backtester:
//! - Typed event model (market update, signal, order, fill)
//! - Strict FIFO queue drained to empty before simulated time advances
//! - Append-only market history as the look-ahead boundary
//! - Collaborator traits (feed, strategy, venue, sizer) with reference
//!   implementations
//! - Portfolio ledger with exactly-once fill settlement
//! - Pure-function performance report (returns, Sharpe, max drawdown)
//!
//! The whole simulation is single-threaded and strictly sequential: handlers
//! run to completion before the next event is dispatched, and the only
//! mutable shared state — the portfolio ledger — is mutated exclusively by
//! the loop thread.

pub mod domain;
pub mod engine;
pub mod error;
pub mod event;
pub mod execution;
pub mod feed;
pub mod history;
pub mod portfolio;
pub mod queue;
pub mod report;
pub mod sizing;
pub mod strategy;

pub use domain::{Bar, HoldingsSnapshot, Symbol};
pub use engine::{Backtest, EngineConfig, RunCounters, RunResult};
pub use error::{AccountingError, BacktestError, ConfigError, ExecutionError, FeedError};
pub use event::{
    Event, FillEvent, MarketUpdate, OrderEvent, OrderKind, Side, SignalDirection, SignalEvent,
};
pub use execution::{CommissionModel, ExecutionVenue, SimulatedVenue};
pub use feed::{HistoricFeed, MarketFeed};
pub use history::MarketHistory;
pub use portfolio::Portfolio;
pub use queue::EventQueue;
pub use report::{EquityPoint, PerformanceReport, DAILY_PERIODS_PER_YEAR};
pub use sizing::{FixedShares, PercentEquity, PositionSizer};
pub use strategy::{BuyAndHold, MaCrossover, Strategy};
