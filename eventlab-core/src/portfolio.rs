//! Portfolio — positions, cash ledger, and holdings history.
//!
//! The only mutable state in the simulation. Three entry points, one per
//! event kind it consumes:
//! - `on_market` marks positions to the latest close and appends a holdings
//!   snapshot — always before any same-timestamp signal is resolved, so
//!   sizing sees the pre-trade equity of the current bar.
//! - `on_signal` turns a trade intention into at most one sized order.
//! - `on_fill` settles a fill against the ledger, exactly once per fill.

use crate::domain::HoldingsSnapshot;
use crate::error::{AccountingError, ConfigError};
use crate::event::{
    FillEvent, MarketUpdate, OrderEvent, OrderKind, SignalDirection, SignalEvent, Side,
};
use crate::history::MarketHistory;
use crate::sizing::PositionSizer;
use std::collections::{BTreeMap, HashMap};

/// Position and cash accounting for a fixed symbol universe.
pub struct Portfolio {
    initial_capital: f64,
    cash: f64,
    /// Signed quantity per tracked symbol: long > 0, short < 0, flat 0.
    /// Slots are seeded at construction; a fill for any other symbol is a
    /// fatal accounting error.
    positions: HashMap<String, i64>,
    symbols: Vec<String>,
    commission_paid: f64,
    holdings: Vec<HoldingsSnapshot>,
    sizer: Box<dyn PositionSizer>,
}

impl Portfolio {
    /// Create a flat portfolio holding `initial_capital` in cash.
    pub fn new(
        symbols: &[String],
        initial_capital: f64,
        sizer: Box<dyn PositionSizer>,
    ) -> Result<Self, ConfigError> {
        if symbols.is_empty() {
            return Err(ConfigError::EmptyUniverse);
        }
        if initial_capital <= 0.0 {
            return Err(ConfigError::NonPositiveCapital(initial_capital));
        }
        let positions = symbols.iter().map(|s| (s.clone(), 0)).collect();
        Ok(Self {
            initial_capital,
            cash: initial_capital,
            positions,
            symbols: symbols.to_vec(),
            commission_paid: 0.0,
            holdings: Vec::new(),
            sizer,
        })
    }

    /// Time-index update: mark every tracked symbol to its latest close and
    /// append one holdings snapshot for `update.timestamp`.
    pub fn on_market(&mut self, update: &MarketUpdate, history: &MarketHistory) {
        let mut market_values = BTreeMap::new();
        let mut total_equity = self.cash;

        for symbol in &self.symbols {
            let quantity = self.positions[symbol];
            let price = history.latest_close(symbol).unwrap_or(0.0);
            let market_value = quantity as f64 * price;
            market_values.insert(symbol.clone(), market_value);
            total_equity += market_value;
        }

        self.holdings.push(HoldingsSnapshot {
            timestamp: update.timestamp,
            cash: self.cash,
            market_values,
            commission: self.commission_paid,
            total_equity,
        });
    }

    /// Translate a signal into at most one market order.
    ///
    /// Long/Short enter only from flat; Exit flattens whatever is held and
    /// is a no-op when already flat (never emits a zero-quantity order).
    /// Quantities come from the injected sizer, which sees the pre-trade
    /// equity of the current bar.
    pub fn on_signal(&mut self, signal: &SignalEvent, history: &MarketHistory) -> Option<OrderEvent> {
        let current = self.positions.get(&signal.symbol).copied().unwrap_or(0);

        let (quantity, side) = match signal.direction {
            SignalDirection::Long if current == 0 => {
                (self.entry_quantity(signal, current, history), Side::Buy)
            }
            SignalDirection::Short if current == 0 => {
                (self.entry_quantity(signal, current, history), Side::Sell)
            }
            SignalDirection::Exit if current > 0 => (current, Side::Sell),
            SignalDirection::Exit if current < 0 => (-current, Side::Buy),
            _ => return None,
        };

        if quantity <= 0 {
            return None;
        }

        Some(OrderEvent {
            symbol: signal.symbol.clone(),
            kind: OrderKind::Market,
            quantity,
            side,
        })
    }

    fn entry_quantity(
        &self,
        signal: &SignalEvent,
        current: i64,
        history: &MarketHistory,
    ) -> i64 {
        let equity = self.latest_equity();
        let price = history.latest_close(&signal.symbol).unwrap_or(0.0);
        self.sizer.size(signal, current, equity, price)
    }

    /// Settle a fill: position += signed quantity, cash -= signed cost plus
    /// commission. Applied exactly once per fill; the caller (the engine)
    /// dispatches each fill event exactly once.
    pub fn on_fill(&mut self, fill: &FillEvent) -> Result<(), AccountingError> {
        let Some(position) = self.positions.get_mut(&fill.symbol) else {
            return Err(AccountingError::UntrackedInstrument {
                symbol: fill.symbol.clone(),
                timestamp: fill.timestamp,
            });
        };

        let sign = fill.side.sign();
        *position += sign * fill.quantity;
        self.cash -= sign as f64 * fill.fill_cost;
        self.cash -= fill.commission;
        self.commission_paid += fill.commission;
        Ok(())
    }

    /// Equity as of the most recent holdings snapshot (initial capital
    /// before the first snapshot exists).
    pub fn latest_equity(&self) -> f64 {
        self.holdings
            .last()
            .map(|h| h.total_equity)
            .unwrap_or(self.initial_capital)
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn initial_capital(&self) -> f64 {
        self.initial_capital
    }

    pub fn commission_paid(&self) -> f64 {
        self.commission_paid
    }

    /// Signed quantity currently held for `symbol` (None if untracked).
    pub fn position(&self, symbol: &str) -> Option<i64> {
        self.positions.get(symbol).copied()
    }

    pub fn positions(&self) -> &HashMap<String, i64> {
        &self.positions
    }

    /// The append-only holdings history — the equity curve's source of truth.
    pub fn holdings(&self) -> &[HoldingsSnapshot] {
        &self.holdings
    }
}

impl std::fmt::Debug for Portfolio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Portfolio")
            .field("cash", &self.cash)
            .field("positions", &self.positions)
            .field("commission_paid", &self.commission_paid)
            .field("snapshots", &self.holdings.len())
            .finish()
    }
}
