//! Simulation loop — owns the event queue and drives the collaborators.
//!
//! One logical thread, no suspension points: each step asks the feed for one
//! bar per tracked symbol, pushes a single `MarketUpdate`, then drains the
//! queue to empty before touching the feed again. Handlers push follow-up
//! events onto the same queue while it drains, which is exactly what keeps a
//! signal computed from bar *t* from ever being attributed to bar *t+1*.
//!
//! Dispatch per variant:
//! - `Market` → strategy first (signals are queued, not resolved), then the
//!   portfolio's time-index update, so the holdings snapshot for the bar
//!   exists before any of its signals pop.
//! - `Signal` → portfolio emits at most one order.
//! - `Order` → venue emits exactly one fill.
//! - `Fill` → portfolio settles it.
//!
//! There is no heartbeat: backtests over historic data are instantaneous,
//! and pacing belongs to a live mode that does not exist here.

use crate::error::{BacktestError, ConfigError};
use crate::event::{Event, FillEvent};
use crate::execution::ExecutionVenue;
use crate::feed::MarketFeed;
use crate::history::MarketHistory;
use crate::portfolio::Portfolio;
use crate::queue::EventQueue;
use crate::report::{PerformanceReport, DAILY_PERIODS_PER_YEAR};
use crate::sizing::PositionSizer;
use crate::strategy::Strategy;
use crate::domain::HoldingsSnapshot;
use serde::Serialize;
use std::collections::HashMap;

/// Configuration for a single run.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Tracked symbol universe. Fills outside it are fatal.
    pub symbols: Vec<String>,
    pub initial_capital: f64,
    /// Annualization basis for the Sharpe ratio; must match the bar
    /// frequency (252 for daily bars).
    pub periods_per_year: f64,
}

impl EngineConfig {
    pub fn new(symbols: Vec<String>, initial_capital: f64) -> Self {
        Self {
            symbols,
            initial_capital,
            periods_per_year: DAILY_PERIODS_PER_YEAR,
        }
    }

    pub fn with_periods_per_year(mut self, periods_per_year: f64) -> Self {
        self.periods_per_year = periods_per_year;
        self
    }
}

/// Diagnostic tallies of events dispatched during a run. Owned by the loop;
/// no correctness depends on them.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RunCounters {
    pub signals: u64,
    pub orders: u64,
    pub fills: u64,
}

/// Everything a finished run leaves behind.
#[derive(Debug)]
pub struct RunResult {
    /// The reporting contract, computed exactly once at feed exhaustion.
    pub report: PerformanceReport,
    /// Full holdings history (one snapshot per market update).
    pub holdings: Vec<HoldingsSnapshot>,
    /// Final signed position per tracked symbol.
    pub positions: HashMap<String, i64>,
    /// Every fill settled during the run, in dispatch order.
    pub fills: Vec<FillEvent>,
}

/// The backtest engine. Collaborators are injected at construction; the
/// loop owns them for the lifetime of the run.
pub struct Backtest<F, S, V> {
    feed: F,
    strategy: S,
    venue: V,
    portfolio: Portfolio,
    history: MarketHistory,
    events: EventQueue,
    counters: RunCounters,
    periods_per_year: f64,
    fills: Vec<FillEvent>,
}

impl<F: MarketFeed, S: Strategy, V: ExecutionVenue> Backtest<F, S, V> {
    /// Wire up a run. Configuration problems (empty universe, non-positive
    /// capital) fail here, before any simulation step executes.
    pub fn new(
        config: EngineConfig,
        feed: F,
        strategy: S,
        sizer: Box<dyn PositionSizer>,
        venue: V,
    ) -> Result<Self, ConfigError> {
        let portfolio = Portfolio::new(&config.symbols, config.initial_capital, sizer)?;
        let history = MarketHistory::new(&config.symbols);
        Ok(Self {
            feed,
            strategy,
            venue,
            portfolio,
            history,
            events: EventQueue::new(),
            counters: RunCounters::default(),
            periods_per_year: config.periods_per_year,
            fills: Vec::new(),
        })
    }

    /// Advance one simulated step: one market update, then drain the queue
    /// to empty. Returns false when the feed is exhausted.
    pub fn step(&mut self) -> Result<bool, BacktestError> {
        if !self.feed.has_next() {
            return Ok(false);
        }
        let Some(update) = self.feed.advance(&mut self.history)? else {
            return Ok(false);
        };
        self.events.push(Event::Market(update));
        self.drain()?;
        Ok(true)
    }

    /// Run to feed exhaustion, then produce the performance report.
    ///
    /// Consumes the engine, so reporting can only ever happen once per run.
    pub fn run(mut self) -> Result<RunResult, BacktestError> {
        while self.step()? {}

        let report = PerformanceReport::compute(
            self.portfolio.holdings(),
            self.periods_per_year,
            self.counters.signals,
            self.counters.orders,
            self.counters.fills,
        );

        Ok(RunResult {
            report,
            holdings: self.portfolio.holdings().to_vec(),
            positions: self.portfolio.positions().clone(),
            fills: self.fills,
        })
    }

    /// Dispatch queued events until the queue is truly empty. Handlers push
    /// while this drains; errors abort immediately, mid-drain.
    fn drain(&mut self) -> Result<(), BacktestError> {
        while let Some(event) = self.events.pop_nonblocking() {
            match event {
                Event::Market(update) => {
                    for signal in self.strategy.on_market(&update, &self.history) {
                        self.events.push(Event::Signal(signal));
                    }
                    self.portfolio.on_market(&update, &self.history);
                }
                Event::Signal(signal) => {
                    self.counters.signals += 1;
                    if let Some(order) = self.portfolio.on_signal(&signal, &self.history) {
                        self.events.push(Event::Order(order));
                    }
                }
                Event::Order(order) => {
                    self.counters.orders += 1;
                    let fill = self.venue.execute(&order, &self.history)?;
                    self.events.push(Event::Fill(fill));
                }
                Event::Fill(fill) => {
                    self.counters.fills += 1;
                    self.portfolio.on_fill(&fill)?;
                    self.fills.push(fill);
                }
            }
        }
        Ok(())
    }

    pub fn counters(&self) -> RunCounters {
        self.counters
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn history(&self) -> &MarketHistory {
        &self.history
    }
}
