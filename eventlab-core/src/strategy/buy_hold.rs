//! Buy-and-hold reference strategy.

use super::Strategy;
use crate::event::{MarketUpdate, SignalDirection, SignalEvent};
use crate::history::MarketHistory;
use std::collections::HashSet;

/// Goes long every tracked symbol on its first bar and never trades again.
///
/// Useful as a benchmark and as the simplest possible exercise of the full
/// signal → order → fill chain.
#[derive(Debug, Default)]
pub struct BuyAndHold {
    entered: HashSet<String>,
}

impl BuyAndHold {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Strategy for BuyAndHold {
    fn on_market(&mut self, update: &MarketUpdate, history: &MarketHistory) -> Vec<SignalEvent> {
        let mut signals = Vec::new();
        for symbol in history.symbols() {
            if history.bar_count(symbol) > 0 && self.entered.insert(symbol.clone()) {
                signals.push(SignalEvent {
                    timestamp: update.timestamp,
                    symbol: symbol.clone(),
                    direction: SignalDirection::Long,
                    strength: 1.0,
                });
            }
        }
        signals
    }
}
