//! Strategy trait and reference implementations.
//!
//! A strategy maps the visible market history to zero or more trade signals.
//! It never sees portfolio state and never sees a bar newer than the update
//! being processed — the `&MarketHistory` parameter is the whole world.

pub mod buy_hold;
pub mod ma_cross;

pub use buy_hold::BuyAndHold;
pub use ma_cross::MaCrossover;

use crate::event::{MarketUpdate, SignalEvent};
use crate::history::MarketHistory;

/// Signal generation interface.
///
/// Works identically over historic and live data: the strategy obtains bars
/// only through `history`, so the same implementation backtests and (in a
/// future live mode) trades without modification.
pub trait Strategy {
    /// React to a market update with zero or more signals.
    fn on_market(&mut self, update: &MarketUpdate, history: &MarketHistory) -> Vec<SignalEvent>;
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn on_market(&mut self, update: &MarketUpdate, history: &MarketHistory) -> Vec<SignalEvent> {
        (**self).on_market(update, history)
    }
}
