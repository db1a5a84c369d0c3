mod compare;
mod correlate;
mod index;
mod report;
mod stats;

use folio_core::{
    Basket, DisplayWindow, IndexSeries, PortfolioEntry, PortfolioIndexBuilder, Ticker, Timeframe,
    TimeSeriesStore, TradingDay,
};
use serde_json::Value;
use tracing::debug;

use crate::cli::{Cli, Command};
use crate::envelope::{Envelope, EnvelopeMeta};
use crate::error::CliError;
use crate::settings::Settings;
use crate::snapshot::SnapshotProvider;

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }
}

pub fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let settings = Settings::load(cli.config.as_deref())?;

    let command_result = match &cli.command {
        Command::Index(args) => {
            let session = Session::open(cli, settings, &[])?;
            index::run(args, &session)?
        }
        Command::Stats => {
            let session = Session::open(cli, settings, &[])?;
            stats::run(&session)?
        }
        Command::Compare(args) => {
            let tickers = parse_tickers(&args.tickers)?;
            let session = Session::open(cli, settings, &tickers)?;
            compare::run(&tickers, &session)?
        }
        Command::Correlate(args) => {
            let tickers = parse_optional_tickers(args.with.as_deref())?;
            let session = Session::open(cli, settings, &tickers)?;
            correlate::run(args, &tickers, &session)?
        }
        Command::Report(args) => {
            let tickers = parse_optional_tickers(args.with.as_deref())?;
            let session = Session::open(cli, settings, &tickers)?;
            report::run(&tickers, &session)?
        }
    };

    let CommandResult { data, warnings } = command_result;

    let mut meta = EnvelopeMeta::new()?;
    for warning in warnings {
        meta.push_warning(warning);
    }

    Ok(Envelope::success(meta, data))
}

/// Store, basket and window shared by every command.
pub struct Session {
    pub store: TimeSeriesStore,
    pub basket: Basket,
    pub timeframe: Timeframe,
    pub window: DisplayWindow,
    pub settings: Settings,
    pub warnings: Vec<String>,
}

impl Session {
    /// Load the basket members, the configured benchmarks and `extra` tickers
    /// from the snapshot.
    fn open(cli: &Cli, mut settings: Settings, extra: &[Ticker]) -> Result<Self, CliError> {
        if let Some(raw) = cli.timeframe.as_deref() {
            settings.timeframe = raw.parse()?;
        }

        let path = cli
            .snapshot
            .as_deref()
            .ok_or_else(|| CliError::Usage("--snapshot is required".to_owned()))?;
        let mut provider = SnapshotProvider::read(path)?;
        if let Some(raw) = cli.as_of.as_deref() {
            provider = provider.with_as_of(TradingDay::parse(raw)?);
        }

        let basket = parse_basket(cli)?;
        let mut warnings = Vec::new();
        if !basket.is_fully_allocated() {
            warnings.push(format!(
                "basket weights sum to {}, daily returns are weight-normalized",
                basket.total_weight()
            ));
        }

        let mut tickers: Vec<Ticker> = Vec::new();
        for ticker in basket
            .tickers()
            .chain(extra)
            .chain(settings.engine.correlation.benchmarks.iter())
        {
            if !tickers.contains(ticker) {
                tickers.push(ticker.clone());
            }
        }

        let mut store = TimeSeriesStore::new();
        let report = store.refresh(&provider, &tickers, settings.lookback_days);
        for failure in &report.unavailable {
            if basket.contains(&failure.ticker) || extra.contains(&failure.ticker) {
                warnings.push(format!("{}: {}", failure.ticker, failure.error));
            }
        }

        let as_of = provider.as_of().unwrap_or_else(TradingDay::today_utc);
        let window = settings.timeframe.window_ending(as_of);
        debug!(
            loaded = report.loaded.len(),
            unavailable = report.unavailable.len(),
            window_start = %window.start(),
            window_end = %window.end(),
            "session ready"
        );

        Ok(Self {
            store,
            basket,
            timeframe: settings.timeframe,
            window,
            settings,
            warnings,
        })
    }

    pub fn build_index(&self) -> IndexSeries {
        PortfolioIndexBuilder::with_config(&self.store, self.settings.engine.index.clone())
            .build(&self.basket)
    }
}

fn parse_basket(cli: &Cli) -> Result<Basket, CliError> {
    if let Some(raw) = cli.equal.as_deref() {
        return Ok(Basket::equal_weight(Ticker::parse_list(raw)?));
    }

    let raw = cli
        .basket
        .as_deref()
        .ok_or_else(|| CliError::Usage("one of --basket or --equal is required".to_owned()))?;

    let entries = raw
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            let (ticker, weight) = part.rsplit_once('=').ok_or_else(|| {
                CliError::Usage(format!("basket entry '{part}' must be TICKER=WEIGHT"))
            })?;
            let weight: f64 = weight.trim().parse().map_err(|_| {
                CliError::Usage(format!("weight '{weight}' for {ticker} is not a number"))
            })?;
            Ok(PortfolioEntry::new(Ticker::parse(ticker)?, weight)?)
        })
        .collect::<Result<Vec<_>, CliError>>()?;

    Ok(Basket::from_entries(entries)?)
}

fn parse_tickers(values: &[String]) -> Result<Vec<Ticker>, CliError> {
    let mut tickers: Vec<Ticker> = Vec::new();
    for value in values {
        for ticker in Ticker::parse_list(value)? {
            if !tickers.contains(&ticker) {
                tickers.push(ticker);
            }
        }
    }
    Ok(tickers)
}

fn parse_optional_tickers(value: Option<&str>) -> Result<Vec<Ticker>, CliError> {
    match value {
        Some(raw) => Ok(Ticker::parse_list(raw)?),
        None => Ok(Vec::new()),
    }
}

fn parse_periods(raw: &str) -> Result<Vec<usize>, CliError> {
    raw.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            part.trim().parse::<usize>().map_err(|_| {
                CliError::Usage(format!("moving-average period '{part}' is not a number"))
            })
        })
        .collect()
}
