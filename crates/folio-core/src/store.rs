use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::provider::{BarsRequest, MarketDataProvider, ProviderError};
use crate::{DailyBar, Ticker, TickerSeries, TradingDay, ValidationError};

/// Latest known daily bars per ticker.
///
/// Series are replaced wholesale and never patched. A ticker that was never
/// fetched, or whose fetch failed, reads back as an empty sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeriesStore {
    series: BTreeMap<Ticker, TickerSeries>,
}

impl TimeSeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the ticker's entire series.
    pub fn upsert(&mut self, ticker: Ticker, bars: Vec<DailyBar>) -> Result<(), ValidationError> {
        let series = TickerSeries::new(ticker, bars)?;
        self.insert_series(series);
        Ok(())
    }

    pub fn insert_series(&mut self, series: TickerSeries) {
        self.series.insert(series.ticker().clone(), series);
    }

    /// Record a failed fetch as an empty series.
    pub fn mark_unavailable(&mut self, ticker: Ticker) {
        self.series
            .insert(ticker.clone(), TickerSeries::empty(ticker));
    }

    pub fn series_of(&self, ticker: &Ticker) -> &[DailyBar] {
        self.series
            .get(ticker)
            .map(TickerSeries::bars)
            .unwrap_or(&[])
    }

    /// Close on exactly `day`; never forward-filled.
    pub fn close_on(&self, ticker: &Ticker, day: TradingDay) -> Option<f64> {
        self.series.get(ticker).and_then(|series| series.close_on(day))
    }

    pub fn tickers(&self) -> impl Iterator<Item = &Ticker> {
        self.series.keys()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Most recent day any stored ticker has a bar for.
    pub fn latest_day(&self) -> Option<TradingDay> {
        self.series
            .values()
            .filter_map(|series| series.bars().last().map(|bar| bar.day))
            .max()
    }

    /// Fetch every ticker from `provider`, replacing stored series.
    ///
    /// Failures, including malformed bar sequences, leave an empty series
    /// behind and are listed in the report.
    pub fn refresh(
        &mut self,
        provider: &dyn MarketDataProvider,
        tickers: &[Ticker],
        lookback_days: u32,
    ) -> RefreshReport {
        let mut report = RefreshReport::default();

        for ticker in tickers {
            let fetched = BarsRequest::new(ticker.clone(), lookback_days)
                .map_err(ProviderError::from)
                .and_then(|request| provider.daily_bars(&request))
                .and_then(|bars| {
                    TickerSeries::new(ticker.clone(), bars).map_err(ProviderError::from)
                });

            match fetched {
                Ok(series) => {
                    debug!(ticker = %ticker, bars = series.bars().len(), "stored price history");
                    self.insert_series(series);
                    report.loaded.push(ticker.clone());
                }
                Err(error) => {
                    warn!(
                        ticker = %ticker,
                        code = error.code(),
                        %error,
                        "price history unavailable"
                    );
                    self.mark_unavailable(ticker.clone());
                    report.unavailable.push(FetchFailure {
                        ticker: ticker.clone(),
                        error,
                    });
                }
            }
        }

        report
    }
}

/// Outcome of [`TimeSeriesStore::refresh`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefreshReport {
    pub loaded: Vec<Ticker>,
    pub unavailable: Vec<FetchFailure>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchFailure {
    pub ticker: Ticker,
    pub error: ProviderError,
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    struct FixedProvider {
        bars: HashMap<String, Vec<DailyBar>>,
    }

    impl MarketDataProvider for FixedProvider {
        fn daily_bars(&self, request: &BarsRequest) -> Result<Vec<DailyBar>, ProviderError> {
            self.bars
                .get(request.ticker.as_str())
                .cloned()
                .ok_or_else(|| ProviderError::not_found(&request.ticker))
        }
    }

    fn ticker(value: &str) -> Ticker {
        Ticker::parse(value).expect("ticker")
    }

    fn bar(day: &str, close: f64) -> DailyBar {
        DailyBar::from_close(TradingDay::parse(day).expect("day"), close).expect("bar")
    }

    #[test]
    fn unknown_ticker_reads_as_empty() {
        let store = TimeSeriesStore::new();
        assert!(store.series_of(&ticker("AAPL")).is_empty());
        assert_eq!(
            store.close_on(&ticker("AAPL"), TradingDay::parse("2024-01-02").expect("day")),
            None
        );
    }

    #[test]
    fn upsert_replaces_whole_series() {
        let mut store = TimeSeriesStore::new();
        store
            .upsert(ticker("AAPL"), vec![bar("2024-01-02", 10.0), bar("2024-01-03", 11.0)])
            .expect("upsert");
        store
            .upsert(ticker("AAPL"), vec![bar("2024-01-05", 12.0)])
            .expect("upsert");

        let bars = store.series_of(&ticker("AAPL"));
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].close, 12.0);
        assert_eq!(store.latest_day(), Some(TradingDay::parse("2024-01-05").expect("day")));
    }

    #[test]
    fn refresh_isolates_failures() {
        let mut bars = HashMap::new();
        bars.insert("AAPL".to_owned(), vec![bar("2024-01-02", 10.0)]);
        bars.insert(
            "BAD".to_owned(),
            vec![bar("2024-01-03", 10.0), bar("2024-01-02", 11.0)],
        );
        let provider = FixedProvider { bars };

        let mut store = TimeSeriesStore::new();
        store
            .upsert(ticker("BAD"), vec![bar("2023-12-29", 5.0)])
            .expect("seed");

        let report = store.refresh(
            &provider,
            &[ticker("AAPL"), ticker("MISSING"), ticker("BAD")],
            365,
        );

        assert_eq!(report.loaded, vec![ticker("AAPL")]);
        let failed: Vec<&str> = report.unavailable.iter().map(|f| f.ticker.as_str()).collect();
        assert_eq!(failed, vec!["MISSING", "BAD"]);
        assert!(
            store.series_of(&ticker("BAD")).is_empty(),
            "stale data must not survive a failed refresh"
        );
        assert_eq!(store.series_of(&ticker("AAPL")).len(), 1);
    }
}
