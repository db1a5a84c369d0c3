//! File-backed [`MarketDataProvider`] reading a JSON snapshot of daily bars.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use folio_core::{BarsRequest, DailyBar, MarketDataProvider, ProviderError, Ticker, TradingDay};
use serde::Deserialize;

use crate::error::CliError;

#[derive(Debug, Default, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    series: BTreeMap<Ticker, Vec<DailyBar>>,
    #[serde(default)]
    unavailable: BTreeSet<Ticker>,
}

/// Serves bars from a snapshot, ending at a fixed as-of day.
#[derive(Debug)]
pub struct SnapshotProvider {
    series: BTreeMap<Ticker, Vec<DailyBar>>,
    unavailable: BTreeSet<Ticker>,
    as_of: Option<TradingDay>,
}

impl SnapshotProvider {
    pub fn read(path: &Path) -> Result<Self, CliError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CliError::Snapshot {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, CliError> {
        let file: SnapshotFile = serde_json::from_str(raw)?;
        let as_of = file
            .series
            .values()
            .filter_map(|bars| bars.iter().map(|bar| bar.day).max())
            .max();

        Ok(Self {
            series: file.series,
            unavailable: file.unavailable,
            as_of,
        })
    }

    /// Latest day across the whole snapshot, or the pinned as-of day.
    pub fn as_of(&self) -> Option<TradingDay> {
        self.as_of
    }

    pub fn with_as_of(mut self, as_of: TradingDay) -> Self {
        self.as_of = Some(as_of);
        self
    }
}

impl MarketDataProvider for SnapshotProvider {
    fn daily_bars(&self, request: &BarsRequest) -> Result<Vec<DailyBar>, ProviderError> {
        if self.unavailable.contains(&request.ticker) {
            return Err(ProviderError::unavailable(format!(
                "'{}' is marked unavailable in the snapshot",
                request.ticker
            )));
        }

        let bars = self
            .series
            .get(&request.ticker)
            .ok_or_else(|| ProviderError::not_found(&request.ticker))?;

        let Some(as_of) = self.as_of else {
            return Ok(Vec::new());
        };
        let earliest = as_of.minus_days(i64::from(request.lookback_days));

        Ok(bars
            .iter()
            .filter(|bar| bar.day > earliest && bar.day <= as_of)
            .copied()
            .collect())
    }
}
