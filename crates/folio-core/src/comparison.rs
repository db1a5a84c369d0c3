//! Rebases external comparison series onto the index's scale so they start
//! at the same value as the index on the first in-window day.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{DisplayWindow, IndexPoint, IndexSeries, Ticker, TimeSeriesStore};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSeries {
    pub ticker: Ticker,
    pub points: Vec<IndexPoint>,
}

#[derive(Debug, Clone, Copy)]
pub struct ComparisonNormalizer<'a> {
    store: &'a TimeSeriesStore,
}

impl<'a> ComparisonNormalizer<'a> {
    pub fn new(store: &'a TimeSeriesStore) -> Self {
        Self { store }
    }

    /// `None` when the index has no in-window value or the ticker has no
    /// in-window closes.
    pub fn normalize(
        &self,
        index: &IndexSeries,
        ticker: &Ticker,
        window: &DisplayWindow,
    ) -> Option<NormalizedSeries> {
        let anchor = index.clip(window).first()?.value;
        let bars = window.clip(self.store.series_of(ticker), |bar| bar.day);
        let ratio = anchor / bars.first()?.close;

        if !ratio.is_finite() {
            trace!(ticker = %ticker, anchor, "comparison ratio is not finite");
            return None;
        }

        Some(NormalizedSeries {
            ticker: ticker.clone(),
            points: bars
                .iter()
                .map(|bar| IndexPoint::new(bar.day, bar.close * ratio))
                .collect(),
        })
    }

    /// Normalize each ticker in order, silently dropping unavailable ones.
    pub fn normalize_all<'t>(
        &self,
        index: &IndexSeries,
        tickers: impl IntoIterator<Item = &'t Ticker>,
        window: &DisplayWindow,
    ) -> Vec<NormalizedSeries> {
        tickers
            .into_iter()
            .filter_map(|ticker| self.normalize(index, ticker, window))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DailyBar, TradingDay};

    fn day(value: &str) -> TradingDay {
        TradingDay::parse(value).expect("day")
    }

    fn ticker(value: &str) -> Ticker {
        Ticker::parse(value).expect("ticker")
    }

    fn fixture() -> (TimeSeriesStore, IndexSeries) {
        let mut store = TimeSeriesStore::new();
        store
            .upsert(
                ticker("SPY"),
                vec![
                    DailyBar::from_close(day("2024-01-02"), 400.0).expect("bar"),
                    DailyBar::from_close(day("2024-01-03"), 440.0).expect("bar"),
                    DailyBar::from_close(day("2024-01-04"), 420.0).expect("bar"),
                ],
            )
            .expect("upsert");
        let index = IndexSeries::from_points(vec![
            IndexPoint::new(day("2024-01-02"), 100.0),
            IndexPoint::new(day("2024-01-03"), 105.0),
            IndexPoint::new(day("2024-01-04"), 103.0),
        ]);
        (store, index)
    }

    #[test]
    fn normalized_series_starts_at_index_value() {
        let (store, index) = fixture();
        let window = DisplayWindow::new(day("2024-01-03"), day("2024-01-04")).expect("window");

        let series = ComparisonNormalizer::new(&store)
            .normalize(&index, &ticker("SPY"), &window)
            .expect("normalized");

        assert_eq!(series.points.len(), 2);
        assert!((series.points[0].value - 105.0).abs() < 1e-9);
        assert!((series.points[1].value - 420.0 * 105.0 / 440.0).abs() < 1e-9);
    }

    #[test]
    fn unavailable_tickers_are_dropped() {
        let (store, index) = fixture();
        let window = DisplayWindow::new(day("2024-01-02"), day("2024-01-04")).expect("window");
        let tickers = [ticker("MISSING"), ticker("SPY")];

        let all = ComparisonNormalizer::new(&store).normalize_all(&index, &tickers, &window);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].ticker, ticker("SPY"));

        let empty_index = IndexSeries::default();
        assert!(ComparisonNormalizer::new(&store)
            .normalize(&empty_index, &ticker("SPY"), &window)
            .is_none());
    }
}
