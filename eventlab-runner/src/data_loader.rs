//! Quote loading — CSV files in, per-symbol bar series out.
//!
//! One CSV per symbol (`<SYMBOL>.csv` under the config's quote directory),
//! columns `date,open,high,low,close,volume`. Dates parse as either plain
//! `YYYY-MM-DD` (daily bars, stamped at midnight UTC) or full RFC 3339
//! timestamps (intraday bars). The loaded dataset is hashed with BLAKE3 so a
//! run's inputs are fingerprinted alongside its config.
//!
//! Synthetic bars are a seeded random walk for demos and tests; the same
//! seed always generates the same series.

use chrono::{DateTime, NaiveDate, Utc};
use eventlab_core::domain::Bar;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from the quote loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open quote file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse quote file {}: {source}", .path.display())]
    Csv { path: PathBuf, source: csv::Error },

    #[error("unparseable date '{date}' in {}", .path.display())]
    BadDate { path: PathBuf, date: String },

    #[error("quote file {} contains no bars", .path.display())]
    Empty { path: PathBuf },
}

/// One row of a quote CSV.
#[derive(Debug, Deserialize)]
struct QuoteRow {
    date: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

fn parse_timestamp(raw: &str, path: &Path) -> Result<DateTime<Utc>, LoadError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(date) = raw.parse::<NaiveDate>() {
        return Ok(date.and_hms_opt(0, 0, 0).unwrap().and_utc());
    }
    Err(LoadError::BadDate {
        path: path.to_path_buf(),
        date: raw.to_string(),
    })
}

/// Load one symbol's bars from a CSV file.
pub fn load_symbol_csv(path: &Path, symbol: &str) -> Result<Vec<Bar>, LoadError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    let mut bars = Vec::new();
    for row in reader.deserialize() {
        let row: QuoteRow = row.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        bars.push(Bar {
            symbol: symbol.to_string(),
            timestamp: parse_timestamp(&row.date, path)?,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        });
    }

    if bars.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(bars)
}

/// Load every symbol's bars from `<csv_dir>/<SYMBOL>.csv`.
pub fn load_universe(
    csv_dir: &Path,
    symbols: &[String],
) -> Result<HashMap<String, Vec<Bar>>, LoadError> {
    let mut series = HashMap::new();
    for symbol in symbols {
        let path = csv_dir.join(format!("{symbol}.csv"));
        series.insert(symbol.clone(), load_symbol_csv(&path, symbol)?);
    }
    Ok(series)
}

/// BLAKE3 fingerprint over the loaded dataset.
///
/// Symbols are hashed in sorted order so the fingerprint is independent of
/// `HashMap` iteration order.
pub fn dataset_hash(series: &HashMap<String, Vec<Bar>>) -> String {
    let mut hasher = blake3::Hasher::new();
    let mut symbols: Vec<&String> = series.keys().collect();
    symbols.sort();

    for symbol in symbols {
        hasher.update(symbol.as_bytes());
        for bar in &series[symbol] {
            hasher.update(&bar.timestamp.timestamp().to_le_bytes());
            hasher.update(&bar.open.to_le_bytes());
            hasher.update(&bar.high.to_le_bytes());
            hasher.update(&bar.low.to_le_bytes());
            hasher.update(&bar.close.to_le_bytes());
            hasher.update(&bar.volume.to_le_bytes());
        }
    }
    hasher.finalize().to_hex().to_string()
}

/// Generate `n` daily bars of seeded random-walk data.
pub fn synthetic_bars(symbol: &str, n: usize, seed: u64) -> Vec<Bar> {
    let mut rng = StdRng::seed_from_u64(seed);
    let base = NaiveDate::from_ymd_opt(2020, 1, 2)
        .unwrap()
        .and_hms_opt(21, 0, 0)
        .unwrap()
        .and_utc();
    let mut close = 100.0_f64;

    (0..n)
        .map(|i| {
            let drift: f64 = rng.gen_range(-2.0..2.05);
            close = (close + drift).max(5.0);
            let open = close - rng.gen_range(-0.5..0.5);
            let high = open.max(close) + rng.gen_range(0.0..1.5);
            let low = (open.min(close) - rng.gen_range(0.0..1.5)).max(1.0);
            Bar {
                symbol: symbol.to_string(),
                timestamp: base + chrono::Duration::days(i as i64),
                open,
                high,
                low,
                close,
                volume: rng.gen_range(100_000..5_000_000),
            }
        })
        .collect()
}

/// Write bars to a CSV in the loader's own format.
pub fn write_bars_csv(path: &Path, bars: &[Bar]) -> Result<(), LoadError> {
    let mut writer = csv::Writer::from_path(path).map_err(|source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    writer
        .write_record(["date", "open", "high", "low", "close", "volume"])
        .map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    for bar in bars {
        writer
            .write_record([
                bar.timestamp.to_rfc3339(),
                format!("{:.4}", bar.open),
                format!("{:.4}", bar.high),
                format!("{:.4}", bar.low),
                format!("{:.4}", bar.close),
                bar.volume.to_string(),
            ])
            .map_err(|source| LoadError::Csv {
                path: path.to_path_buf(),
                source,
            })?;
    }
    writer.flush().map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
