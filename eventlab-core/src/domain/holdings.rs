//! Holdings snapshot — portfolio valuation at one timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of the append-only holdings history.
///
/// Created exactly once per market update, before any signal, order, or fill
/// for that timestamp is resolved: sizing decisions reference the portfolio
/// value as of before the current bar's trades. `BTreeMap` keeps the
/// per-symbol columns in deterministic order for serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldingsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub cash: f64,
    /// Market value of each tracked symbol's position (quantity x last close).
    pub market_values: BTreeMap<String, f64>,
    /// Commission accrued since the start of the run.
    pub commission: f64,
    /// cash + sum of market values.
    pub total_equity: f64,
}
