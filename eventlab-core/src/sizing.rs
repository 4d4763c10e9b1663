//! Position sizing — the seam between a signal and a sized order.
//!
//! The portfolio translates signal direction into buy/sell mechanics; how
//! *much* to trade is delegated here so risk management can be swapped in
//! without touching the accounting.

use crate::event::SignalEvent;

/// Maps a signal plus current portfolio context to an order quantity.
///
/// `current_equity` is the pre-trade equity of the current bar (the holdings
/// snapshot appended before any of this bar's trades settle), and
/// `latest_price` is the symbol's most recent close. A returned quantity of
/// zero means "no order".
pub trait PositionSizer {
    fn size(
        &self,
        signal: &SignalEvent,
        current_position: i64,
        current_equity: f64,
        latest_price: f64,
    ) -> i64;
}

impl<S: PositionSizer + ?Sized> PositionSizer for Box<S> {
    fn size(
        &self,
        signal: &SignalEvent,
        current_position: i64,
        current_equity: f64,
        latest_price: f64,
    ) -> i64 {
        (**self).size(signal, current_position, current_equity, latest_price)
    }
}

/// Naive fixed-quantity sizing, scaled by signal strength.
///
/// The reference rule: every entry trades `shares` (times the signal's
/// strength hint), with no regard to equity or volatility.
#[derive(Debug, Clone, Copy)]
pub struct FixedShares {
    pub shares: i64,
}

impl FixedShares {
    pub fn new(shares: i64) -> Self {
        Self { shares }
    }
}

impl PositionSizer for FixedShares {
    fn size(&self, signal: &SignalEvent, _position: i64, _equity: f64, _price: f64) -> i64 {
        (self.shares as f64 * signal.strength).floor().max(0.0) as i64
    }
}

/// Sizes each entry as a fraction of current equity.
///
/// quantity = floor(equity x percent x strength / price). Returns zero when
/// no price is available (price <= 0).
#[derive(Debug, Clone, Copy)]
pub struct PercentEquity {
    /// Fraction of equity to allocate per position (e.g. 0.25 = 25%).
    pub percent: f64,
}

impl PercentEquity {
    pub fn new(percent: f64) -> Self {
        Self { percent }
    }
}

impl PositionSizer for PercentEquity {
    fn size(&self, signal: &SignalEvent, _position: i64, equity: f64, price: f64) -> i64 {
        if price <= 0.0 || equity <= 0.0 {
            return 0;
        }
        (equity * self.percent * signal.strength / price).floor().max(0.0) as i64
    }
}
