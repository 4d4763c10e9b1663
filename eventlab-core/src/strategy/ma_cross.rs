//! Moving average crossover strategy.

use super::Strategy;
use crate::event::{MarketUpdate, SignalDirection, SignalEvent};
use crate::history::MarketHistory;
use std::collections::HashMap;

/// Long/exit strategy on a simple moving average crossover.
///
/// While out of the market, the short SMA closing above the long SMA enters
/// long; while in, the short SMA closing back below the long SMA exits. No
/// signal fires until `long_window` bars of history exist for the symbol.
#[derive(Debug)]
pub struct MaCrossover {
    short_window: usize,
    long_window: usize,
    /// Symbols currently held long.
    in_market: HashMap<String, bool>,
}

impl MaCrossover {
    pub fn new(short_window: usize, long_window: usize) -> Self {
        Self {
            short_window,
            long_window,
            in_market: HashMap::new(),
        }
    }

    pub fn short_window(&self) -> usize {
        self.short_window
    }

    pub fn long_window(&self) -> usize {
        self.long_window
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

impl Strategy for MaCrossover {
    fn on_market(&mut self, update: &MarketUpdate, history: &MarketHistory) -> Vec<SignalEvent> {
        let mut signals = Vec::new();

        for symbol in history.symbols() {
            let closes = history.latest_closes(symbol, self.long_window);
            if closes.len() < self.long_window {
                continue;
            }

            let short_sma = mean(&closes[closes.len() - self.short_window..]);
            let long_sma = mean(&closes);
            let held = self.in_market.entry(symbol.clone()).or_insert(false);

            if short_sma > long_sma && !*held {
                *held = true;
                signals.push(SignalEvent {
                    timestamp: update.timestamp,
                    symbol: symbol.clone(),
                    direction: SignalDirection::Long,
                    strength: 1.0,
                });
            } else if short_sma < long_sma && *held {
                *held = false;
                signals.push(SignalEvent {
                    timestamp: update.timestamp,
                    symbol: symbol.clone(),
                    direction: SignalDirection::Exit,
                    strength: 1.0,
                });
            }
        }

        signals
    }
}
