//! Performance report — pure functions over the holdings history.
//!
//! Every metric is a function of the equity curve alone: no portfolio
//! mutation, no wall clock, no randomness, so the same event sequence
//! reproduces the same report bit for bit. Metric edge cases (fewer than two
//! returns, zero-variance returns, empty curve) surface as NaN, never as a
//! panic.

use crate::domain::HoldingsSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default annualization basis: daily bars, 252 trading days per year.
pub const DAILY_PERIODS_PER_YEAR: f64 = 252.0;

/// One point of the equity curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub timestamp: DateTime<Utc>,
    pub equity: f64,
}

/// The reporting contract produced once per run, after feed exhaustion.
///
/// `sharpe_ratio` is NaN when undefined; `serde_json` serializes non-finite
/// floats as `null`.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceReport {
    pub cumulative_return: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown: f64,
    pub signals_seen: u64,
    pub orders_seen: u64,
    pub fills_seen: u64,
    pub equity_curve: Vec<EquityPoint>,
}

impl PerformanceReport {
    /// Compute the full report from the holdings history and run counters.
    pub fn compute(
        holdings: &[HoldingsSnapshot],
        periods_per_year: f64,
        signals_seen: u64,
        orders_seen: u64,
        fills_seen: u64,
    ) -> Self {
        let equity: Vec<f64> = holdings.iter().map(|h| h.total_equity).collect();
        let returns = period_returns(&equity);

        Self {
            cumulative_return: cumulative_return(&equity),
            sharpe_ratio: sharpe_ratio(&returns, periods_per_year),
            max_drawdown: max_drawdown(&equity),
            signals_seen,
            orders_seen,
            fills_seen,
            equity_curve: holdings
                .iter()
                .map(|h| EquityPoint {
                    timestamp: h.timestamp,
                    equity: h.total_equity,
                })
                .collect(),
        }
    }
}

// ─── Individual metric functions ────────────────────────────────────

/// Period returns: r_i = equity_i / equity_{i-1} - 1. The first snapshot has
/// no return, so the result is one shorter than the input.
pub fn period_returns(equity: &[f64]) -> Vec<f64> {
    if equity.len() < 2 {
        return Vec::new();
    }
    equity
        .windows(2)
        .map(|w| if w[0] != 0.0 { w[1] / w[0] - 1.0 } else { 0.0 })
        .collect()
}

/// Total return over the curve: equity_last / equity_first - 1.
/// NaN for an empty curve.
pub fn cumulative_return(equity: &[f64]) -> f64 {
    let (Some(&first), Some(&last)) = (equity.first(), equity.last()) else {
        return f64::NAN;
    };
    if first == 0.0 {
        return f64::NAN;
    }
    last / first - 1.0
}

/// Annualized Sharpe ratio: mean(r) / stdev(r) x sqrt(periods_per_year).
///
/// `periods_per_year` must match the bar frequency (252 for daily). NaN when
/// fewer than 2 returns exist or the returns have zero variance.
pub fn sharpe_ratio(returns: &[f64], periods_per_year: f64) -> f64 {
    if returns.len() < 2 {
        return f64::NAN;
    }
    let mean = mean_f64(returns);
    let std = std_dev(returns);
    if std < 1e-15 {
        return f64::NAN;
    }
    (mean / std) * periods_per_year.sqrt()
}

/// Maximum peak-to-trough drawdown as a positive fraction of the peak.
///
/// max over i of (peak_i - equity_i) / peak_i with peak_i the running
/// maximum. 0.0 when equity is monotonically non-decreasing; NaN for an
/// empty curve.
pub fn max_drawdown(equity: &[f64]) -> f64 {
    if equity.is_empty() {
        return f64::NAN;
    }
    let mut peak = equity[0];
    let mut max_dd = 0.0_f64;

    for &eq in equity {
        if eq > peak {
            peak = eq;
        }
        if peak > 0.0 {
            let dd = (peak - eq) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

// ─── Helpers ────────────────────────────────────────────────────────

fn mean_f64(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator).
fn std_dev(values: &[f64]) -> f64 {
    let mean = mean_f64(values);
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::BTreeMap;

    #[test]
    fn period_returns_basic() {
        let returns = period_returns(&[100.0, 110.0, 99.0]);
        assert_eq!(returns.len(), 2);
        assert!((returns[0] - 0.1).abs() < 1e-12);
        assert!((returns[1] + 0.1).abs() < 1e-12);
    }

    #[test]
    fn cumulative_return_over_curve() {
        assert!((cumulative_return(&[100.0, 120.0, 150.0]) - 0.5).abs() < 1e-12);
        assert_eq!(cumulative_return(&[100.0]), 0.0);
        assert!(cumulative_return(&[]).is_nan());
    }

    #[test]
    fn drawdown_peak_to_trough() {
        // (120 - 90) / 120 = 0.25
        assert!((max_drawdown(&[100.0, 120.0, 90.0, 150.0]) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn drawdown_zero_when_monotone() {
        assert_eq!(max_drawdown(&[100.0, 100.0, 110.0, 120.0]), 0.0);
    }

    #[test]
    fn drawdown_empty_curve_is_nan() {
        assert!(max_drawdown(&[]).is_nan());
    }

    #[test]
    fn sharpe_on_constant_curve_is_nan() {
        let returns = period_returns(&[100.0, 100.0, 100.0, 100.0]);
        assert!(sharpe_ratio(&returns, DAILY_PERIODS_PER_YEAR).is_nan());
    }

    #[test]
    fn sharpe_with_too_few_returns_is_nan() {
        assert!(sharpe_ratio(&[], DAILY_PERIODS_PER_YEAR).is_nan());
        assert!(sharpe_ratio(&[0.01], DAILY_PERIODS_PER_YEAR).is_nan());
    }

    #[test]
    fn sharpe_annualizes_by_bar_frequency() {
        let returns = [0.01, -0.005, 0.02, 0.0, 0.01];
        let daily = sharpe_ratio(&returns, 252.0);
        let hourly = sharpe_ratio(&returns, 252.0 * 6.5);
        assert!(daily.is_finite());
        // Same mean/std, larger annualization factor scales the ratio up.
        assert!((hourly / daily - 6.5_f64.sqrt()).abs() < 1e-12);
    }

    fn snapshot(day: u32, equity: f64) -> HoldingsSnapshot {
        HoldingsSnapshot {
            timestamp: Utc.with_ymd_and_hms(2024, 1, day, 21, 0, 0).unwrap(),
            cash: equity,
            market_values: BTreeMap::new(),
            commission: 0.0,
            total_equity: equity,
        }
    }

    #[test]
    fn report_assembles_curve_and_counters() {
        let holdings = vec![snapshot(2, 100.0), snapshot(3, 120.0), snapshot(4, 90.0)];
        let report = PerformanceReport::compute(&holdings, DAILY_PERIODS_PER_YEAR, 3, 2, 2);

        assert_eq!(report.equity_curve.len(), 3);
        assert_eq!(report.equity_curve[1].equity, 120.0);
        assert!((report.cumulative_return + 0.1).abs() < 1e-12);
        assert!((report.max_drawdown - 0.25).abs() < 1e-12);
        assert_eq!(report.signals_seen, 3);
        assert_eq!(report.orders_seen, 2);
        assert_eq!(report.fills_seen, 2);
    }

    #[test]
    fn nan_sharpe_serializes_as_null() {
        let holdings = vec![snapshot(2, 100.0), snapshot(3, 100.0), snapshot(4, 100.0)];
        let report = PerformanceReport::compute(&holdings, DAILY_PERIODS_PER_YEAR, 0, 0, 0);
        assert!(report.sharpe_ratio.is_nan());

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"sharpe_ratio\":null"));
    }
}
