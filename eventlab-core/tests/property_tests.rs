//! Property tests for ledger and metric invariants.
//!
//! 1. Conservation — cash and position deltas always reconcile with the
//!    fills that produced them, for any fill sequence.
//! 2. Drawdown bounds — a positive equity curve's drawdown lies in [0, 1).
//! 3. Determinism — the same bar series always produces the same equity
//!    curve, for any random walk.

use chrono::{TimeZone, Utc};
use eventlab_core::report::{max_drawdown, period_returns};
use eventlab_core::{
    Backtest, Bar, BuyAndHold, CommissionModel, EngineConfig, FillEvent, FixedShares, HistoricFeed,
    Portfolio, Side, SimulatedVenue,
};
use proptest::prelude::*;
use std::collections::HashMap;

fn arb_fill() -> impl Strategy<Value = FillEvent> {
    (1i64..500, prop::bool::ANY, 10.0f64..500.0, 0.0f64..5.0).prop_map(
        |(quantity, buy, price, commission)| FillEvent {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 21, 0, 0).unwrap(),
            symbol: "SPY".into(),
            venue: "SIMULATED".into(),
            quantity,
            side: if buy { Side::Buy } else { Side::Sell },
            fill_cost: price * quantity as f64,
            commission,
        },
    )
}

proptest! {
    /// Position equals the signed sum of fill quantities, and cash movement
    /// equals the signed sum of fill costs plus commissions, for any
    /// sequence of fills.
    #[test]
    fn settlement_conserves_cash_and_position(fills in prop::collection::vec(arb_fill(), 1..40)) {
        let mut portfolio = Portfolio::new(
            &["SPY".to_string()],
            1_000_000.0,
            Box::new(FixedShares::new(100)),
        )
        .unwrap();

        for fill in &fills {
            portfolio.on_fill(fill).unwrap();
        }

        let expected_position: i64 = fills.iter().map(|f| f.side.sign() * f.quantity).sum();
        prop_assert_eq!(portfolio.position("SPY").unwrap(), expected_position);

        let expected_cash_delta: f64 = fills
            .iter()
            .map(|f| -(f.side.sign() as f64) * f.fill_cost - f.commission)
            .sum();
        prop_assert!((portfolio.cash() - (1_000_000.0 + expected_cash_delta)).abs() < 1e-6);

        let expected_commission: f64 = fills.iter().map(|f| f.commission).sum();
        prop_assert!((portfolio.commission_paid() - expected_commission).abs() < 1e-9);
    }

    /// For strictly positive equity curves the max drawdown is a fraction in
    /// [0, 1).
    #[test]
    fn drawdown_is_a_fraction(equity in prop::collection::vec(1.0f64..1_000_000.0, 1..200)) {
        let dd = max_drawdown(&equity);
        prop_assert!(dd >= 0.0);
        prop_assert!(dd < 1.0);
    }

    /// Period returns are always one shorter than the curve (empty below two
    /// points).
    #[test]
    fn returns_length(equity in prop::collection::vec(1.0f64..1_000.0, 0..50)) {
        let returns = period_returns(&equity);
        prop_assert_eq!(returns.len(), equity.len().saturating_sub(1));
    }

    /// Identical bar series in, identical equity curve out — no hidden state
    /// leaks between runs.
    #[test]
    fn equity_curve_is_deterministic(steps in prop::collection::vec(-3.0f64..3.0, 5..60)) {
        let mut close = 100.0;
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 21, 0, 0).unwrap();
        let bars: Vec<Bar> = steps
            .iter()
            .enumerate()
            .map(|(i, delta)| {
                close = (close + delta).max(10.0);
                Bar {
                    symbol: "SPY".into(),
                    timestamp: base + chrono::Duration::days(i as i64),
                    open: close,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                    volume: 1_000,
                }
            })
            .collect();

        let run = |bars: Vec<Bar>| {
            let mut map = HashMap::new();
            map.insert("SPY".to_string(), bars);
            let feed = HistoricFeed::new(map).unwrap();
            Backtest::new(
                EngineConfig::new(vec!["SPY".to_string()], 100_000.0),
                feed,
                BuyAndHold::new(),
                Box::new(FixedShares::new(100)),
                SimulatedVenue::new(CommissionModel::Free),
            )
            .unwrap()
            .run()
            .unwrap()
        };

        let first = run(bars.clone());
        let second = run(bars);
        prop_assert_eq!(first.report.equity_curve, second.report.equity_curve);
    }
}
