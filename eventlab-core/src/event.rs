//! Event model — the typed payloads carried on the simulation queue.
//!
//! Events are pure data. Behavior lives in the handlers (strategy, portfolio,
//! venue); the engine dispatches each variant to exactly one handler via
//! exhaustive pattern matching, so an unhandled variant is a compile error
//! rather than a runtime fault.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single event on the simulation queue.
///
/// Causal order within one simulated step: a `Market` update may only produce
/// `Signal`s, a signal may only produce an `Order`, an order may only produce
/// a `Fill`. The queue is FIFO and drained to empty before simulated time
/// advances, so that chain can never leak into the next bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Market(MarketUpdate),
    Signal(SignalEvent),
    Order(OrderEvent),
    Fill(FillEvent),
}

/// A new bar is available for every tracked symbol at `timestamp`.
///
/// One `MarketUpdate` per simulated step — the step, not the symbol, is the
/// unit of causal time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketUpdate {
    pub timestamp: DateTime<Utc>,
}

/// Trade intention emitted by a strategy: direction plus a strength hint,
/// not yet sized or routed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalEvent {
    pub timestamp: DateTime<Utc>,
    pub symbol: String,
    pub direction: SignalDirection,
    /// Scaling suggestion for the position sizer (1.0 = full size).
    pub strength: f64,
}

/// What the strategy wants done with the symbol's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalDirection {
    Long,
    Short,
    /// Flatten whatever is currently held.
    Exit,
}

/// A sized, directed instruction to trade, not yet executed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderEvent {
    pub symbol: String,
    pub kind: OrderKind,
    /// Always positive; direction is carried by `side`.
    pub quantity: i64,
    pub side: Side,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderKind {
    Market,
    Limit,
}

/// Buy/sell direction of an order or fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// +1 for buys, -1 for sells. Position and cash deltas are
    /// `sign * quantity` and `-sign * fill_cost`.
    pub fn sign(self) -> i64 {
        match self {
            Side::Buy => 1,
            Side::Sell => -1,
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// Confirmation that an order executed: quantity, side, gross cost, and
/// commission, stamped with the venue that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillEvent {
    pub timestamp: DateTime<Utc>,
    pub symbol: String,
    /// Identifier of the venue that reported the fill (e.g. "SIMULATED").
    pub venue: String,
    /// Always positive; direction is carried by `side`.
    pub quantity: i64,
    pub side: Side,
    /// Gross dollar value of the fill (price x quantity), excluding commission.
    pub fill_cost: f64,
    pub commission: f64,
}
