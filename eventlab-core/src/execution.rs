//! Execution venue — turns orders into fills.
//!
//! The backtest model is idealized and synchronous: every order fills
//! immediately and completely at the symbol's latest close, with zero
//! slippage and a configurable commission schedule. A live venue would be
//! asynchronous and fallible; that is out of scope here, but the trait is
//! the seam where it would plug in.

use crate::error::ExecutionError;
use crate::event::{FillEvent, OrderEvent};
use crate::history::MarketHistory;
use serde::{Deserialize, Serialize};

/// Executes orders against a (simulated or real) market.
pub trait ExecutionVenue {
    /// Execute `order`, producing exactly one fill. Synchronous; in the
    /// reference model it always succeeds as long as the symbol has a price.
    fn execute(
        &mut self,
        order: &OrderEvent,
        history: &MarketHistory,
    ) -> Result<FillEvent, ExecutionError>;
}

impl<V: ExecutionVenue + ?Sized> ExecutionVenue for Box<V> {
    fn execute(
        &mut self,
        order: &OrderEvent,
        history: &MarketHistory,
    ) -> Result<FillEvent, ExecutionError> {
        (**self).execute(order, history)
    }
}

/// Commission schedule applied per fill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommissionModel {
    /// No transaction costs.
    Free,
    /// Per-share rate with a floor, the IBKR fixed schedule shape.
    PerShare { rate: f64, minimum: f64 },
    /// Flat amount per fill.
    Fixed { amount: f64 },
}

impl CommissionModel {
    /// The IBKR Pro fixed schedule: $0.005/share, $1.00 minimum.
    pub fn ibkr_fixed() -> Self {
        CommissionModel::PerShare {
            rate: 0.005,
            minimum: 1.0,
        }
    }

    /// Commission for a fill of `quantity` shares.
    pub fn commission(&self, quantity: i64) -> f64 {
        match *self {
            CommissionModel::Free => 0.0,
            CommissionModel::PerShare { rate, minimum } => (quantity as f64 * rate).max(minimum),
            CommissionModel::Fixed { amount } => amount,
        }
    }
}

/// Idealized immediate-fill venue for backtests.
///
/// Fill price is the latest close for the order's symbol — the order's
/// reference price at decision time — so `fill_cost = close x quantity`.
/// Both market and limit orders fill immediately; the naive order policy
/// only emits market orders, and modeling resting limit orders is a
/// different venue's job.
#[derive(Debug, Clone)]
pub struct SimulatedVenue {
    venue: String,
    commission: CommissionModel,
}

impl SimulatedVenue {
    pub fn new(commission: CommissionModel) -> Self {
        Self {
            venue: "SIMULATED".to_string(),
            commission,
        }
    }

    pub fn with_venue_name(venue: impl Into<String>, commission: CommissionModel) -> Self {
        Self {
            venue: venue.into(),
            commission,
        }
    }
}

impl ExecutionVenue for SimulatedVenue {
    fn execute(
        &mut self,
        order: &OrderEvent,
        history: &MarketHistory,
    ) -> Result<FillEvent, ExecutionError> {
        let bar = history
            .latest_bar(&order.symbol)
            .ok_or_else(|| ExecutionError::MissingPrice {
                symbol: order.symbol.clone(),
            })?;

        Ok(FillEvent {
            timestamp: bar.timestamp,
            symbol: order.symbol.clone(),
            venue: self.venue.clone(),
            quantity: order.quantity,
            side: order.side,
            fill_cost: bar.close * order.quantity as f64,
            commission: self.commission.commission(order.quantity),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bar;
    use crate::event::{OrderKind, Side};
    use chrono::{TimeZone, Utc};

    fn history_with_close(close: f64) -> MarketHistory {
        let mut history = MarketHistory::new(&["SPY".to_string()]);
        history
            .append(Bar {
                symbol: "SPY".into(),
                timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 21, 0, 0).unwrap(),
                open: close - 1.0,
                high: close + 1.0,
                low: close - 2.0,
                close,
                volume: 1_000,
            })
            .unwrap();
        history
    }

    fn order(quantity: i64, side: Side) -> OrderEvent {
        OrderEvent {
            symbol: "SPY".into(),
            kind: OrderKind::Market,
            quantity,
            side,
        }
    }

    #[test]
    fn fills_at_latest_close() {
        let mut venue = SimulatedVenue::new(CommissionModel::Free);
        let history = history_with_close(102.5);

        let fill = venue.execute(&order(100, Side::Buy), &history).unwrap();
        assert_eq!(fill.quantity, 100);
        assert_eq!(fill.side, Side::Buy);
        assert_eq!(fill.fill_cost, 10_250.0);
        assert_eq!(fill.commission, 0.0);
        assert_eq!(fill.venue, "SIMULATED");
        assert_eq!(fill.timestamp, history.latest_timestamp("SPY").unwrap());
    }

    #[test]
    fn missing_price_is_fatal() {
        let mut venue = SimulatedVenue::new(CommissionModel::Free);
        let history = MarketHistory::new(&["SPY".to_string()]);
        let err = venue.execute(&order(100, Side::Buy), &history).unwrap_err();
        assert_eq!(err, ExecutionError::MissingPrice { symbol: "SPY".into() });
    }

    #[test]
    fn per_share_commission_has_floor() {
        let schedule = CommissionModel::ibkr_fixed();
        // 100 shares * 0.005 = 0.50, below the 1.00 minimum.
        assert_eq!(schedule.commission(100), 1.0);
        // 400 shares * 0.005 = 2.00, above the minimum.
        assert_eq!(schedule.commission(400), 2.0);
    }

    #[test]
    fn fixed_and_free_commission() {
        assert_eq!(CommissionModel::Fixed { amount: 2.5 }.commission(10), 2.5);
        assert_eq!(CommissionModel::Free.commission(10_000), 0.0);
    }
}
