//! Ranks candidate tickers by Pearson correlation of daily returns against
//! the composite index.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::CorrelationConfig;
use crate::{Basket, DailyBar, DisplayWindow, IndexPoint, IndexSeries, Ticker, TimeSeriesStore};

/// Centred sum of squares at or below this fraction of the raw sum of squares
/// is rounding noise from a constant series.
const ZERO_VARIANCE_TOLERANCE: f64 = f64::EPSILON;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    pub ticker: Ticker,
    pub coefficient: f64,
    pub observations: usize,
}

/// Results sorted by coefficient, highest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationRanking {
    results: Vec<CorrelationResult>,
}

impl CorrelationRanking {
    pub fn results(&self) -> &[CorrelationResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn get(&self, ticker: &Ticker) -> Option<&CorrelationResult> {
        self.results.iter().find(|result| &result.ticker == ticker)
    }

    /// The `n` most correlated candidates.
    pub fn top(&self, n: usize) -> &[CorrelationResult] {
        &self.results[..n.min(self.results.len())]
    }

    /// The `n` least correlated candidates, lowest first.
    pub fn bottom(&self, n: usize) -> Vec<&CorrelationResult> {
        self.results.iter().rev().take(n).collect()
    }

    pub fn into_results(self) -> Vec<CorrelationResult> {
        self.results
    }
}

#[derive(Debug, Clone)]
pub struct CorrelationEngine<'a> {
    store: &'a TimeSeriesStore,
    config: CorrelationConfig,
}

impl<'a> CorrelationEngine<'a> {
    pub fn new(store: &'a TimeSeriesStore) -> Self {
        Self::with_config(store, CorrelationConfig::default())
    }

    pub fn with_config(store: &'a TimeSeriesStore, config: CorrelationConfig) -> Self {
        Self { store, config }
    }

    /// Basket members, then benchmarks, then comparison tickers, first occurrence wins.
    pub fn candidates<'t>(
        &self,
        basket: &Basket,
        comparisons: impl IntoIterator<Item = &'t Ticker>,
    ) -> Vec<Ticker> {
        let mut candidates: Vec<Ticker> = Vec::new();
        let all = basket
            .tickers()
            .cloned()
            .chain(self.config.benchmarks.iter().cloned())
            .chain(comparisons.into_iter().cloned());
        for ticker in all {
            if !candidates.contains(&ticker) {
                candidates.push(ticker);
            }
        }
        candidates
    }

    /// Correlate every candidate against the index inside `window` and sort
    /// descending. Candidates with too little overlap or an undefined
    /// coefficient are left out.
    pub fn rank(
        &self,
        index: &IndexSeries,
        candidates: &[Ticker],
        window: &DisplayWindow,
    ) -> CorrelationRanking {
        let mut results: Vec<CorrelationResult> = candidates
            .iter()
            .filter_map(|ticker| self.correlate(index, ticker, window))
            .collect();
        results.sort_by(|left, right| right.coefficient.total_cmp(&left.coefficient));

        debug!(
            candidates = candidates.len(),
            ranked = results.len(),
            "ranked correlation candidates"
        );
        CorrelationRanking { results }
    }

    pub fn correlate(
        &self,
        index: &IndexSeries,
        ticker: &Ticker,
        window: &DisplayWindow,
    ) -> Option<CorrelationResult> {
        let pairs = self.paired_returns(index.points(), self.store.series_of(ticker), window);

        if pairs.len() < self.config.min_observations {
            trace!(ticker = %ticker, observations = pairs.len(), "insufficient overlap");
            return None;
        }

        let Some(coefficient) = pearson(&pairs) else {
            trace!(ticker = %ticker, "coefficient is not a real number");
            return None;
        };

        Some(CorrelationResult {
            ticker: ticker.clone(),
            coefficient,
            observations: pairs.len(),
        })
    }

    /// `(index return, candidate return)` for every in-window index day whose
    /// previous index day, possibly before the window, gives the candidate a
    /// usable close on both days.
    fn paired_returns(
        &self,
        points: &[IndexPoint],
        bars: &[DailyBar],
        window: &DisplayWindow,
    ) -> Vec<(f64, f64)> {
        let first = points
            .partition_point(|point| point.day < window.start())
            .max(1);
        let to = points.partition_point(|point| point.day <= window.end());
        if to <= first || bars.is_empty() {
            return Vec::new();
        }

        let closes: Vec<Option<f64>> = (first - 1..to)
            .map(|position| self.filled_close(points, bars, position))
            .collect();

        (first..to)
            .zip(closes.windows(2))
            .filter_map(|(position, pair)| {
                let (previous, current) = (pair[0]?, pair[1]?);
                let index_return = points[position].value / points[position - 1].value - 1.0;
                Some((index_return, current / previous - 1.0))
            })
            .collect()
    }

    /// Candidate close as of index day `position`: its latest bar on or before
    /// that day, if no more than `max_fill_gap` index days stale.
    fn filled_close(
        &self,
        points: &[IndexPoint],
        bars: &[DailyBar],
        position: usize,
    ) -> Option<f64> {
        let day = points[position].day;
        let latest = bars.partition_point(|bar| bar.day <= day).checked_sub(1)?;
        let bar = &bars[latest];

        let staleness = position + 1 - points.partition_point(|point| point.day <= bar.day);
        match self.config.max_fill_gap {
            Some(gap) if staleness > gap => None,
            _ => Some(bar.close),
        }
    }
}

/// Pearson coefficient of paired samples.
///
/// Zero variance on either side gives `Some(0.0)`; a non-real result gives
/// `None`. Computed on mean-centred sums, which is algebraically the
/// `n·Σxy − Σx·Σy` form but stable for small returns.
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.is_empty() {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    let mut raw_xx = 0.0;
    let mut raw_yy = 0.0;
    for &(x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
        raw_xx += x * x;
        raw_yy += y * y;
    }

    if sxx <= raw_xx * ZERO_VARIANCE_TOLERANCE || syy <= raw_yy * ZERO_VARIANCE_TOLERANCE {
        return Some(0.0);
    }

    let coefficient = sxy / (sxx * syy).sqrt();
    coefficient.is_finite().then(|| coefficient.clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TradingDay;

    fn day(value: &str) -> TradingDay {
        TradingDay::parse(value).expect("day")
    }

    #[test]
    fn pearson_of_identical_series_is_one() {
        let pairs: Vec<(f64, f64)> = [0.01, -0.02, 0.015, 0.003, -0.007, 0.02]
            .iter()
            .map(|r| (*r, *r))
            .collect();
        let r = pearson(&pairs).expect("defined");
        assert!((r - 1.0).abs() < 1e-9);
    }

    #[test]
    fn pearson_of_mirrored_series_is_minus_one() {
        let pairs: Vec<(f64, f64)> = [0.01, -0.02, 0.015, 0.003, -0.007]
            .iter()
            .map(|r| (*r, -*r))
            .collect();
        let r = pearson(&pairs).expect("defined");
        assert!((r + 1.0).abs() < 1e-9);
    }

    #[test]
    fn constant_series_correlates_to_zero() {
        let flat: Vec<(f64, f64)> = [0.01, -0.02, 0.015, 0.003, -0.007]
            .iter()
            .map(|r| (*r, 0.0))
            .collect();
        assert_eq!(pearson(&flat), Some(0.0));

        let constant: Vec<(f64, f64)> = [0.01, -0.02, 0.015, 0.003, -0.007]
            .iter()
            .map(|r| (*r, 0.001))
            .collect();
        assert_eq!(pearson(&constant), Some(0.0));
    }

    #[test]
    fn tiny_real_variance_around_a_level_still_correlates() {
        let returns = [0.012, -0.018, 0.015, 0.004, -0.009, 0.02, -0.003];
        let nearly_flat: Vec<(f64, f64)> =
            returns.iter().map(|r| (*r, 0.05 + 1e-6 * r)).collect();
        let r = pearson(&nearly_flat).expect("defined");
        assert!((r - 1.0).abs() < 1e-6, "got {r}");

        let level: Vec<(f64, f64)> = returns.iter().map(|r| (*r, 0.05)).collect();
        assert_eq!(pearson(&level), Some(0.0));
    }

    #[test]
    fn non_real_inputs_are_undefined() {
        let pairs = vec![(f64::NAN, 0.1), (0.2, 0.3), (0.1, 0.0)];
        assert_eq!(pearson(&pairs), None);
        assert_eq!(pearson(&[]), None);
    }

    #[test]
    fn ranking_helpers_slice_both_ends() {
        let result = |name: &str, coefficient: f64| CorrelationResult {
            ticker: Ticker::parse(name).expect("ticker"),
            coefficient,
            observations: 10,
        };
        let ranking = CorrelationRanking {
            results: vec![result("A", 0.9), result("B", 0.1), result("C", -0.5)],
        };
        assert_eq!(ranking.top(2).len(), 2);
        assert_eq!(ranking.top(10).len(), 3);
        let bottom: Vec<&str> = ranking.bottom(2).iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(bottom, vec!["C", "B"]);
    }

    #[test]
    fn single_day_gap_is_bridged_but_longer_gaps_are_not() {
        let store = TimeSeriesStore::new();
        let engine = CorrelationEngine::new(&store);
        let points: Vec<IndexPoint> = ["2024-01-02", "2024-01-03", "2024-01-04", "2024-01-05"]
            .iter()
            .enumerate()
            .map(|(i, d)| IndexPoint::new(day(d), 100.0 + i as f64))
            .collect();
        let bars = vec![DailyBar::from_close(day("2024-01-02"), 10.0).expect("bar")];

        assert_eq!(engine.filled_close(&points, &bars, 0), Some(10.0));
        assert_eq!(engine.filled_close(&points, &bars, 1), Some(10.0));
        assert_eq!(engine.filled_close(&points, &bars, 2), None);

        let unlimited = CorrelationEngine::with_config(
            &store,
            CorrelationConfig {
                max_fill_gap: None,
                ..CorrelationConfig::default()
            },
        );
        assert_eq!(unlimited.filled_close(&points, &bars, 3), Some(10.0));
    }

    #[test]
    fn first_in_window_return_pairs_with_the_day_before_the_window() {
        let store = TimeSeriesStore::new();
        let engine = CorrelationEngine::new(&store);
        let days = ["2024-01-02", "2024-01-03", "2024-01-04", "2024-01-05"];
        let points: Vec<IndexPoint> = days
            .iter()
            .enumerate()
            .map(|(i, d)| IndexPoint::new(day(d), 100.0 + i as f64))
            .collect();
        let bars: Vec<DailyBar> = days
            .iter()
            .enumerate()
            .map(|(i, d)| DailyBar::from_close(day(d), 10.0 + i as f64).expect("bar"))
            .collect();
        let window = DisplayWindow::new(day("2024-01-04"), day("2024-01-05")).expect("window");

        let pairs = engine.paired_returns(&points, &bars, &window);
        assert_eq!(pairs.len(), 2);
        assert!((pairs[0].0 - (102.0 / 101.0 - 1.0)).abs() < 1e-12);
        assert!((pairs[0].1 - (12.0 / 11.0 - 1.0)).abs() < 1e-12);
    }
}
