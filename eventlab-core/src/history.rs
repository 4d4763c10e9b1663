//! Market history — the append-only per-symbol bar series.
//!
//! This is the visibility boundary that makes look-ahead structurally
//! impossible: strategies and the portfolio receive `&MarketHistory`, which
//! only ever contains bars at or before the update currently being
//! processed. There is no way to ask it for a future bar.

use crate::domain::Bar;
use crate::error::FeedError;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Append-only time series of bars per tracked symbol.
#[derive(Debug)]
pub struct MarketHistory {
    symbols: Vec<String>,
    series: HashMap<String, Vec<Bar>>,
}

impl MarketHistory {
    /// Create an empty history for a fixed symbol universe.
    pub fn new(symbols: &[String]) -> Self {
        let series = symbols.iter().map(|s| (s.clone(), Vec::new())).collect();
        Self {
            symbols: symbols.to_vec(),
            series,
        }
    }

    /// The tracked symbol universe, in construction order.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Append a bar produced by the feed.
    ///
    /// Rejects bars for untracked symbols, insane OHLC values, and timestamps
    /// that move backwards relative to the symbol's last bar. All three are
    /// fatal: skipping bad data would silently bias the run.
    pub fn append(&mut self, bar: Bar) -> Result<(), FeedError> {
        let Some(series) = self.series.get_mut(&bar.symbol) else {
            return Err(FeedError::UntrackedSymbol {
                symbol: bar.symbol,
                timestamp: bar.timestamp,
            });
        };
        if !bar.is_sane() {
            return Err(FeedError::MalformedBar {
                symbol: bar.symbol,
                timestamp: bar.timestamp,
                reason: "OHLCV fields fail sanity check".into(),
            });
        }
        if let Some(last) = series.last() {
            if bar.timestamp < last.timestamp {
                return Err(FeedError::NonMonotonicTimestamp {
                    symbol: bar.symbol,
                    prev: last.timestamp,
                    next: bar.timestamp,
                });
            }
        }
        series.push(bar);
        Ok(())
    }

    /// The most recent bar for `symbol`, if any have been seen.
    pub fn latest_bar(&self, symbol: &str) -> Option<&Bar> {
        self.series.get(symbol).and_then(|s| s.last())
    }

    /// The most recent `n` bars for `symbol`, oldest first. Returns fewer
    /// than `n` if fewer are available.
    pub fn latest_bars(&self, symbol: &str, n: usize) -> &[Bar] {
        match self.series.get(symbol) {
            Some(series) => &series[series.len().saturating_sub(n)..],
            None => &[],
        }
    }

    /// Closing prices of the most recent `n` bars, oldest first.
    pub fn latest_closes(&self, symbol: &str, n: usize) -> Vec<f64> {
        self.latest_bars(symbol, n).iter().map(|b| b.close).collect()
    }

    /// The most recent close for `symbol`.
    pub fn latest_close(&self, symbol: &str) -> Option<f64> {
        self.latest_bar(symbol).map(|b| b.close)
    }

    /// Timestamp of the most recent bar for `symbol`.
    pub fn latest_timestamp(&self, symbol: &str) -> Option<DateTime<Utc>> {
        self.latest_bar(symbol).map(|b| b.timestamp)
    }

    /// Number of bars seen for `symbol`.
    pub fn bar_count(&self, symbol: &str) -> usize {
        self.series.get(symbol).map_or(0, |s| s.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bar(symbol: &str, day: u32, close: f64) -> Bar {
        Bar {
            symbol: symbol.into(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, day, 21, 0, 0).unwrap(),
            open: close - 1.0,
            high: close + 2.0,
            low: close - 2.0,
            close,
            volume: 1_000,
        }
    }

    fn history() -> MarketHistory {
        MarketHistory::new(&["SPY".to_string()])
    }

    #[test]
    fn append_and_read_back() {
        let mut history = history();
        history.append(bar("SPY", 2, 100.0)).unwrap();
        history.append(bar("SPY", 3, 101.0)).unwrap();

        assert_eq!(history.bar_count("SPY"), 2);
        assert_eq!(history.latest_close("SPY"), Some(101.0));
        assert_eq!(history.latest_closes("SPY", 5), vec![100.0, 101.0]);
        assert_eq!(history.latest_bars("SPY", 1)[0].close, 101.0);
    }

    #[test]
    fn rejects_untracked_symbol() {
        let mut history = history();
        let err = history.append(bar("TSLA", 2, 100.0)).unwrap_err();
        assert!(matches!(err, FeedError::UntrackedSymbol { .. }));
    }

    #[test]
    fn rejects_backwards_timestamp() {
        let mut history = history();
        history.append(bar("SPY", 3, 100.0)).unwrap();
        let err = history.append(bar("SPY", 2, 101.0)).unwrap_err();
        assert!(matches!(err, FeedError::NonMonotonicTimestamp { .. }));
    }

    #[test]
    fn rejects_malformed_bar() {
        let mut history = history();
        let mut broken = bar("SPY", 2, 100.0);
        broken.high = broken.low - 1.0;
        let err = history.append(broken).unwrap_err();
        assert!(matches!(err, FeedError::MalformedBar { .. }));
    }

    #[test]
    fn empty_history_reads_as_empty() {
        let history = history();
        assert!(history.latest_bar("SPY").is_none());
        assert!(history.latest_closes("SPY", 3).is_empty());
        assert_eq!(history.bar_count("SPY"), 0);
    }
}
