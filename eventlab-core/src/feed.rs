//! Market feed — the source of time-ordered bars.
//!
//! The feed is the sole authority on exhaustion: the simulation loop is
//! finite iff the feed is finite. A historic and a live feed should look
//! identical to the rest of the system; the engine only ever calls
//! `has_next` and `advance`.

use crate::domain::Bar;
use crate::error::{ConfigError, FeedError};
use crate::event::MarketUpdate;
use crate::history::MarketHistory;
use std::collections::HashMap;

/// Source of bars for the tracked symbol universe.
pub trait MarketFeed {
    /// Whether another step of bars is available.
    fn has_next(&self) -> bool;

    /// Advance one step: append exactly one new bar per tracked symbol to
    /// `history` and return the step's `MarketUpdate`, or `None` on
    /// exhaustion. Timestamps must be non-decreasing across calls.
    fn advance(&mut self, history: &mut MarketHistory) -> Result<Option<MarketUpdate>, FeedError>;
}

impl<F: MarketFeed + ?Sized> MarketFeed for Box<F> {
    fn has_next(&self) -> bool {
        (**self).has_next()
    }

    fn advance(&mut self, history: &mut MarketHistory) -> Result<Option<MarketUpdate>, FeedError> {
        (**self).advance(history)
    }
}

/// In-memory historic feed over pre-loaded, aligned per-symbol series.
///
/// All symbols advance in lockstep: row `i` of every series shares one
/// timestamp, and each `advance` releases one row. Alignment is validated at
/// construction; per-bar sanity and monotonicity are enforced by
/// `MarketHistory::append` at the step where a bad bar would enter the run.
#[derive(Debug)]
pub struct HistoricFeed {
    symbols: Vec<String>,
    series: HashMap<String, Vec<Bar>>,
    cursor: usize,
    steps: usize,
}

impl HistoricFeed {
    /// Build a feed from per-symbol bar series.
    ///
    /// Fails if the universe is empty, series lengths differ, or row
    /// timestamps disagree across symbols.
    pub fn new(series: HashMap<String, Vec<Bar>>) -> Result<Self, ConfigError> {
        if series.is_empty() {
            return Err(ConfigError::EmptyUniverse);
        }

        let mut symbols: Vec<String> = series.keys().cloned().collect();
        symbols.sort();

        let steps = series[&symbols[0]].len();
        for symbol in &symbols {
            let len = series[symbol].len();
            if len != steps {
                return Err(ConfigError::MisalignedSeries(format!(
                    "'{}' has {} bars, '{}' has {}",
                    symbols[0], steps, symbol, len
                )));
            }
        }

        let reference = &series[&symbols[0]];
        for symbol in &symbols[1..] {
            for (row, bar) in series[symbol].iter().enumerate() {
                if bar.timestamp != reference[row].timestamp {
                    return Err(ConfigError::MisalignedSeries(format!(
                        "row {} of '{}' is {}, expected {}",
                        row, symbol, bar.timestamp, reference[row].timestamp
                    )));
                }
            }
        }

        Ok(Self {
            symbols,
            series,
            cursor: 0,
            steps,
        })
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Total number of steps this feed will yield.
    pub fn len(&self) -> usize {
        self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps == 0
    }
}

impl MarketFeed for HistoricFeed {
    fn has_next(&self) -> bool {
        self.cursor < self.steps
    }

    fn advance(&mut self, history: &mut MarketHistory) -> Result<Option<MarketUpdate>, FeedError> {
        if self.cursor >= self.steps {
            return Ok(None);
        }

        let timestamp = self.series[&self.symbols[0]][self.cursor].timestamp;
        for symbol in &self.symbols {
            let bar = self.series[symbol][self.cursor].clone();
            history.append(bar)?;
        }
        self.cursor += 1;

        Ok(Some(MarketUpdate { timestamp }))
    }
}
