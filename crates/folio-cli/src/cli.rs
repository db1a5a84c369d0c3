//! CLI argument definitions for folio.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `index` | Composite base-100 index for the basket |
//! | `stats` | Window return, max drawdown and per-ticker returns |
//! | `compare` | Rebase other tickers onto the index scale |
//! | `correlate` | Rank tickers by return correlation with the index |
//! | `report` | Everything above in one payload |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--snapshot` | required | JSON file of daily bars per ticker |
//! | `--basket` | | Weighted basket, e.g. `AAPL=60,MSFT=40` |
//! | `--equal` | | Equal-weight basket, e.g. `AAPL,MSFT` |
//! | `--timeframe` | `3M` | Display window (1M, 3M, 6M, YTD, 1Y) |
//! | `--as-of` | last snapshot day | Window end date |
//! | `--format` | `json` | Output format (json, table) |
//! | `--strict` | `false` | Treat warnings as errors |
//!
//! # Examples
//!
//! ```bash
//! folio index --snapshot bars.json --basket AAPL=60,MSFT=40 --sma 20,50
//! folio correlate --snapshot bars.json --equal AAPL,MSFT --top 5 --with NVDA
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Weighted basket index and analytics over daily bars.
#[derive(Debug, Parser)]
#[command(
    name = "folio",
    author,
    version,
    about = "Weighted basket index and analytics over daily bars"
)]
pub struct Cli {
    /// JSON snapshot: `{"series": {"AAPL": [bars]}, "unavailable": ["XYZ"]}`.
    #[arg(long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Weighted basket as TICKER=WEIGHT pairs separated by commas.
    #[arg(long, global = true, conflicts_with = "equal")]
    pub basket: Option<String>,

    /// Equal-weight basket as comma-separated tickers.
    #[arg(long, global = true)]
    pub equal: Option<String>,

    /// Display window preset. Overrides the settings file.
    #[arg(long, global = true)]
    pub timeframe: Option<String>,

    /// Window end date (YYYY-MM-DD). Defaults to the last day in the snapshot.
    #[arg(long, global = true)]
    pub as_of: Option<String>,

    /// TOML settings file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text for terminal display.
    Table,
    /// Single JSON object output.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Composite base-100 index, clipped to the display window.
    Index(IndexArgs),
    /// Window return, max drawdown and per-ticker returns.
    Stats,
    /// Rebase other tickers onto the index's scale.
    Compare(CompareArgs),
    /// Rank basket members, benchmarks and extra tickers by correlation.
    Correlate(CorrelateArgs),
    /// Index, statistics, comparisons and correlations together.
    Report(ReportArgs),
}

#[derive(Debug, Args)]
pub struct IndexArgs {
    /// Moving-average periods, e.g. `20,50`.
    #[arg(long)]
    pub sma: Option<String>,
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    #[arg(required = true, num_args = 1..)]
    pub tickers: Vec<String>,
}

#[derive(Debug, Args)]
pub struct CorrelateArgs {
    /// Only keep the N highest-ranked tickers.
    #[arg(long)]
    pub top: Option<usize>,

    /// Extra candidate tickers, comma-separated.
    #[arg(long)]
    pub with: Option<String>,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Comparison tickers, comma-separated.
    #[arg(long)]
    pub with: Option<String>,
}
