//! EventLab CLI — run backtests and generate sample quote data.
//!
//! Commands:
//! - `run` — execute a backtest from a TOML config file, or from flags
//! - `synth` — write a seeded synthetic quote CSV for demos and smoke tests

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use eventlab_runner::{
    run_from_config, save_artifacts, synthetic_bars, write_bars_csv, CommissionConfig, RunConfig,
    RunSummary, SizerConfig, StrategyConfig,
};

#[derive(Parser)]
#[command(name = "eventlab", about = "EventLab — event-driven backtesting engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a backtest from a TOML config file or from flags.
    Run {
        /// Path to a TOML config file. Overrides all other flags.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory containing <SYMBOL>.csv quote files.
        #[arg(long, default_value = "quotes")]
        csv_dir: PathBuf,

        /// Symbols to trade (e.g. SPY QQQ).
        #[arg(long, num_args = 1..)]
        symbols: Vec<String>,

        /// Starting capital.
        #[arg(long, default_value_t = 100_000.0)]
        capital: f64,

        /// Strategy: ma-crossover or buy-and-hold.
        #[arg(long, default_value = "ma-crossover")]
        strategy: String,

        /// Short moving average window (ma-crossover only).
        #[arg(long, default_value_t = 100)]
        short_window: usize,

        /// Long moving average window (ma-crossover only).
        #[arg(long, default_value_t = 400)]
        long_window: usize,

        /// Output directory for run artifacts.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
    /// Generate a synthetic quote CSV (seeded random walk).
    Synth {
        /// Symbol name; the file is written as <out_dir>/<SYMBOL>.csv.
        #[arg(long, default_value = "SPY")]
        symbol: String,

        /// Number of daily bars to generate.
        #[arg(long, default_value_t = 500)]
        bars: usize,

        /// RNG seed; the same seed reproduces the same series.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output directory.
        #[arg(long, default_value = "quotes")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            csv_dir,
            symbols,
            capital,
            strategy,
            short_window,
            long_window,
            output_dir,
        } => cmd_run(
            config,
            csv_dir,
            symbols,
            capital,
            &strategy,
            short_window,
            long_window,
            output_dir,
        ),
        Commands::Synth {
            symbol,
            bars,
            seed,
            out_dir,
        } => cmd_synth(&symbol, bars, seed, out_dir),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_run(
    config_path: Option<PathBuf>,
    csv_dir: PathBuf,
    symbols: Vec<String>,
    capital: f64,
    strategy: &str,
    short_window: usize,
    long_window: usize,
    output_dir: PathBuf,
) -> Result<()> {
    let config = match config_path {
        Some(path) => RunConfig::load(&path)?,
        None => {
            if symbols.is_empty() {
                bail!("either --config or --symbols is required");
            }
            let strategy = match strategy {
                "ma-crossover" => StrategyConfig::MaCrossover {
                    short_window,
                    long_window,
                },
                "buy-and-hold" => StrategyConfig::BuyAndHold,
                other => bail!("unknown strategy '{other}' (ma-crossover, buy-and-hold)"),
            };
            RunConfig {
                symbols,
                csv_dir,
                initial_capital: capital,
                periods_per_year: 252.0,
                strategy,
                sizer: SizerConfig::FixedShares { shares: 100 },
                commission: CommissionConfig::PerShare {
                    rate: 0.005,
                    minimum: 1.0,
                },
            }
        }
    };

    let summary = run_from_config(&config)?;
    print_summary(&summary);

    let paths = save_artifacts(&output_dir, &summary)?;
    println!();
    println!("Artifacts written to {}", paths.run_dir.display());
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!("Run {}", &summary.run_id[..16]);
    println!("Dataset {}", &summary.dataset_hash[..16]);
    println!();
    println!(
        "Total Return      {:>10.2}%",
        summary.report.cumulative_return * 100.0
    );
    if summary.report.sharpe_ratio.is_nan() {
        println!("Sharpe Ratio      {:>10}", "undefined");
    } else {
        println!("Sharpe Ratio      {:>10.2}", summary.report.sharpe_ratio);
    }
    println!(
        "Max Drawdown      {:>10.2}%",
        summary.report.max_drawdown * 100.0
    );
    println!("Commission Paid   {:>10.2}", summary.commission_paid);
    println!();
    println!("Signals: {}", summary.report.signals_seen);
    println!("Orders:  {}", summary.report.orders_seen);
    println!("Fills:   {}", summary.report.fills_seen);

    // Tail of the equity curve, like a researcher would eyeball first.
    let tail = summary.report.equity_curve.iter().rev().take(5).rev();
    println!();
    println!("Equity curve (last 5):");
    for point in tail {
        println!("  {}  {:>14.2}", point.timestamp.format("%Y-%m-%d %H:%M"), point.equity);
    }
}

fn cmd_synth(symbol: &str, bars: usize, seed: u64, out_dir: PathBuf) -> Result<()> {
    std::fs::create_dir_all(&out_dir)?;
    let path = out_dir.join(format!("{symbol}.csv"));
    let series = synthetic_bars(symbol, bars, seed);
    write_bars_csv(&path, &series)?;
    println!("Wrote {} bars to {}", series.len(), path.display());
    Ok(())
}
