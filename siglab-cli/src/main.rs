//! SigLab CLI — fetch, annotate, and backtest commands.
//!
//! Commands:
//! - `fetch` — download daily bars from Yahoo Finance and write them as CSV
//! - `signals` — annotate a CSV with heuristic signals where none exist
//! - `run` — execute a benchmark-vs-strategy comparison and save artifacts

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use siglab_core::data::{read_csv_file, write_csv_file, DataProvider, YahooProvider};
use siglab_core::series::BarSeries;
use siglab_core::signals::annotate;
use siglab_runner::{
    run_from_config, ArtifactManager, ComparisonResult, RunConfig, SourceConfig,
};

#[derive(Parser)]
#[command(
    name = "siglab",
    about = "SigLab CLI — signal-driven backtesting engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download daily bars from Yahoo Finance and write them to a CSV file.
    Fetch {
        /// Symbol to download (e.g., AAPL).
        symbol: String,

        /// Start date (YYYY-MM-DD). Defaults to 5 years ago.
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// Output CSV path. Defaults to <SYMBOL>.csv.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Fill the Signal column of a CSV using the heuristic indicator rules.
    Signals {
        /// Input CSV (Date,Open,High,Low,Close,Volume[,Signal]).
        #[arg(long)]
        input: PathBuf,

        /// Output CSV path. Defaults to overwriting the input.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Run a comparison backtest from a TOML config or command-line options.
    Run {
        /// Path to a TOML config file (exclusive with --symbol).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Symbol (required without --config).
        #[arg(long)]
        symbol: Option<String>,

        /// CSV file to backtest (with --symbol).
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Use seeded synthetic data instead of a CSV (with --symbol).
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Initial capital.
        #[arg(long, default_value_t = 1_000_000.0)]
        capital: f64,

        /// Commission rate per trade side.
        #[arg(long, default_value_t = 0.002)]
        commission: f64,

        /// Annual risk-free rate for Sharpe/Sortino.
        #[arg(long, default_value_t = 0.0)]
        risk_free: f64,

        /// Output directory for artifacts.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            symbol,
            start,
            end,
            out,
        } => run_fetch(symbol, start, end, out),
        Commands::Signals { input, out } => run_signals(input, out),
        Commands::Run {
            config,
            symbol,
            csv,
            synthetic,
            capital,
            commission,
            risk_free,
            output_dir,
        } => run_backtest_cmd(
            config, symbol, csv, synthetic, capital, commission, risk_free, output_dir,
        ),
    }
}

fn parse_date_arg(arg: Option<&str>, default_days_back: i64) -> Result<NaiveDate> {
    match arg {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("invalid date '{s}', expected YYYY-MM-DD")),
        None => Ok(chrono::Local::now().date_naive() - chrono::Duration::days(default_days_back)),
    }
}

fn run_fetch(
    symbol: String,
    start: Option<String>,
    end: Option<String>,
    out: Option<PathBuf>,
) -> Result<()> {
    let start_date = parse_date_arg(start.as_deref(), 365 * 5)?;
    let end_date = parse_date_arg(end.as_deref(), 0)?;
    let out_path = out.unwrap_or_else(|| PathBuf::from(format!("{symbol}.csv")));

    println!("Fetching {symbol} from {start_date} to {end_date}...");
    let provider = YahooProvider::new()?;
    let fetched = provider.fetch(&symbol, start_date, end_date)?;
    println!("  {} bars received", fetched.bars.len());

    let bars = annotate(fetched.bars);
    let series = BarSeries::validate(bars)?;
    for warning in series.warnings() {
        println!("WARNING: {warning}");
    }

    write_csv_file(&out_path, series.bars())?;
    println!("Wrote {} bars to {}", series.len(), out_path.display());
    Ok(())
}

fn run_signals(input: PathBuf, out: Option<PathBuf>) -> Result<()> {
    let out_path = out.unwrap_or_else(|| input.clone());

    let raws = read_csv_file(&input)?;
    let missing = raws.iter().filter(|r| r.signal.is_none()).count();
    let bars = annotate(raws);
    let series = BarSeries::validate(bars)?;
    for warning in series.warnings() {
        println!("WARNING: {warning}");
    }

    write_csv_file(&out_path, series.bars())?;
    println!(
        "Annotated {} of {} bars, wrote {}",
        missing,
        series.len(),
        out_path.display()
    );
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_backtest_cmd(
    config_path: Option<PathBuf>,
    symbol: Option<String>,
    csv: Option<PathBuf>,
    synthetic: bool,
    capital: f64,
    commission: f64,
    risk_free: f64,
    output_dir: PathBuf,
) -> Result<()> {
    if config_path.is_some() && symbol.is_some() {
        bail!("--config and --symbol are mutually exclusive");
    }

    let run_config = if let Some(path) = config_path {
        RunConfig::from_toml_file(&path)?
    } else {
        let symbol = match symbol {
            Some(s) => s,
            None => bail!("one of --config or --symbol is required"),
        };
        let source = if synthetic {
            let end = chrono::Local::now().date_naive();
            SourceConfig::Synthetic {
                seed: 42,
                start: end - chrono::Duration::days(365 * 3),
                end,
            }
        } else if let Some(path) = csv {
            SourceConfig::Csv { path }
        } else {
            bail!("with --symbol, provide --csv PATH or --synthetic");
        };
        RunConfig {
            symbol,
            source,
            initial_capital: capital,
            commission_rate: commission,
            risk_free_rate: risk_free,
        }
    };

    let result = run_from_config(&run_config)?;
    print_summary(&result);

    let manager = ArtifactManager::new(&output_dir)?;
    let paths = manager.save_run(&result)?;
    println!();
    println!(
        "Artifacts saved to: {}",
        paths.manifest.parent().unwrap_or(output_dir.as_path()).display()
    );

    Ok(())
}

fn print_summary(result: &ComparisonResult) {
    println!();
    println!("=== Comparison Result ===");
    println!("Symbol:         {}", result.symbol);
    println!("Period:         {} to {}", result.start_date, result.end_date);
    println!("Bars:           {}", result.bar_count);
    println!("Trades:         {}", result.strategy.metrics.trade_count);
    println!(
        "Skipped:        {}",
        result.strategy.result.skipped_signals.len()
    );
    println!();
    println!("--- Performance (strategy vs benchmark) ---");
    println!(
        "Total Return:   {:>8.2}%  vs {:>8.2}%",
        result.strategy.metrics.total_return * 100.0,
        result.benchmark.metrics.total_return * 100.0
    );
    println!(
        "CAGR:           {:>8.2}%  vs {:>8.2}%",
        result.strategy.metrics.cagr * 100.0,
        result.benchmark.metrics.cagr * 100.0
    );
    println!(
        "Sharpe:         {:>8.3}   vs {:>8.3}",
        result.strategy.metrics.sharpe, result.benchmark.metrics.sharpe
    );
    println!(
        "Max Drawdown:   {:>8.2}%  vs {:>8.2}%",
        result.strategy.metrics.max_drawdown * 100.0,
        result.benchmark.metrics.max_drawdown * 100.0
    );
    println!(
        "Win Rate:       {:>8.1}%",
        result.strategy.metrics.win_rate * 100.0
    );
    println!(
        "Profit Factor:  {:>8.2}",
        result.strategy.metrics.profit_factor
    );
    println!(
        "Final Equity:   {:>12.2} vs {:>12.2}",
        result.strategy.metrics.final_equity, result.benchmark.metrics.final_equity
    );
    if matches!(result.config.source, SourceConfig::Synthetic { .. }) {
        println!();
        println!("WARNING: Results based on SYNTHETIC data");
    }
    for warning in &result.data_warnings {
        println!("WARNING: {warning}");
    }
}
