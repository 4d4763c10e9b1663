//! Criterion benchmarks for the simulation hot paths.
//!
//! 1. Full event loop: moving-average crossover over a synthetic series.
//! 2. Metric computation: max drawdown over a long equity curve.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::HashMap;

use chrono::{TimeZone, Utc};
use eventlab_core::report::max_drawdown;
use eventlab_core::{
    Backtest, Bar, CommissionModel, EngineConfig, FixedShares, HistoricFeed, MaCrossover,
    SimulatedVenue,
};

fn make_bars(n: usize) -> Vec<Bar> {
    let base = Utc.with_ymd_and_hms(2020, 1, 2, 21, 0, 0).unwrap();
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            Bar {
                symbol: "SPY".into(),
                timestamp: base + chrono::Duration::days(i as i64),
                open: close - 0.3,
                high: close + 1.5,
                low: close - 1.5,
                close,
                volume: 1_000_000,
            }
        })
        .collect()
}

fn bench_event_loop(c: &mut Criterion) {
    let mut group = c.benchmark_group("event_loop");
    for bars in [500usize, 2_000] {
        group.bench_with_input(BenchmarkId::new("ma_crossover", bars), &bars, |b, &n| {
            let series = make_bars(n);
            b.iter(|| {
                let mut map = HashMap::new();
                map.insert("SPY".to_string(), series.clone());
                let feed = HistoricFeed::new(map).unwrap();
                let engine = Backtest::new(
                    EngineConfig::new(vec!["SPY".to_string()], 100_000.0),
                    feed,
                    MaCrossover::new(10, 30),
                    Box::new(FixedShares::new(100)),
                    SimulatedVenue::new(CommissionModel::ibkr_fixed()),
                )
                .unwrap();
                black_box(engine.run().unwrap())
            });
        });
    }
    group.finish();
}

fn bench_metrics(c: &mut Criterion) {
    let equity: Vec<f64> = (0..10_000)
        .map(|i| 100_000.0 + (i as f64 * 0.05).sin() * 5_000.0 + i as f64)
        .collect();
    c.bench_function("max_drawdown_10k", |b| {
        b.iter(|| black_box(max_drawdown(black_box(&equity))))
    });
}

criterion_group!(benches, bench_event_loop, bench_metrics);
criterion_main!(benches);
