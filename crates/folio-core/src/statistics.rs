use serde::{Deserialize, Serialize};

use crate::{Basket, DisplayWindow, IndexPoint, IndexSeries, Ticker, TimeSeriesStore};

/// Trailing simple moving average of the index, clipped to a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingAverage {
    pub period: usize,
    pub points: Vec<IndexPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerReturn {
    pub ticker: Ticker,
    pub return_pct: f64,
}

/// Windowed view of the index and of each basket member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub window: DisplayWindow,
    pub start_value: Option<f64>,
    pub end_value: Option<f64>,
    pub return_pct: Option<f64>,
    pub max_drawdown_pct: Option<f64>,
    pub moving_averages: Vec<MovingAverage>,
    pub ticker_returns: Vec<TickerReturn>,
}

/// Stateless calculator for windowed index statistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatisticsEngine;

impl StatisticsEngine {
    pub fn new() -> Self {
        Self
    }

    /// `(end - start) / start * 100` over the in-window slice.
    pub fn window_return_pct(&self, index: &IndexSeries, window: &DisplayWindow) -> Option<f64> {
        let slice = index.clip(window);
        return_pct(slice.first()?.value, slice.last()?.value)
    }

    /// Largest peak-to-trough decline inside the window, as a positive percentage.
    pub fn max_drawdown_pct(&self, index: &IndexSeries, window: &DisplayWindow) -> Option<f64> {
        max_drawdown_pct(index.clip(window).iter().map(|point| point.value))
    }

    /// SMA over the unclipped index so the line is not truncated at the
    /// window's left edge; only the output is clipped.
    pub fn simple_moving_average(
        &self,
        index: &IndexSeries,
        period: usize,
        window: &DisplayWindow,
    ) -> MovingAverage {
        let full: Vec<IndexPoint> = if period == 0 {
            Vec::new()
        } else {
            index
                .points()
                .windows(period)
                .map(|run| {
                    let sum: f64 = run.iter().map(|point| point.value).sum();
                    IndexPoint::new(run[period - 1].day, sum / period as f64)
                })
                .collect()
        };

        MovingAverage {
            period,
            points: window.clip(&full, |point| point.day).to_vec(),
        }
    }

    /// Return of the ticker's own closes inside the window, independent of the index.
    pub fn ticker_return_pct(
        &self,
        store: &TimeSeriesStore,
        ticker: &Ticker,
        window: &DisplayWindow,
    ) -> Option<f64> {
        let bars = window.clip(store.series_of(ticker), |bar| bar.day);
        return_pct(bars.first()?.close, bars.last()?.close)
    }

    pub fn summarize(
        &self,
        index: &IndexSeries,
        store: &TimeSeriesStore,
        basket: &Basket,
        window: &DisplayWindow,
        sma_periods: &[usize],
    ) -> PerformanceSummary {
        let slice = index.clip(window);

        PerformanceSummary {
            window: *window,
            start_value: slice.first().map(|point| point.value),
            end_value: slice.last().map(|point| point.value),
            return_pct: self.window_return_pct(index, window),
            max_drawdown_pct: self.max_drawdown_pct(index, window),
            moving_averages: sma_periods
                .iter()
                .map(|&period| self.simple_moving_average(index, period, window))
                .collect(),
            ticker_returns: basket
                .tickers()
                .filter_map(|ticker| {
                    self.ticker_return_pct(store, ticker, window)
                        .map(|return_pct| TickerReturn {
                            ticker: ticker.clone(),
                            return_pct,
                        })
                })
                .collect(),
        }
    }
}

fn return_pct(start: f64, end: f64) -> Option<f64> {
    if !(start.is_finite() && start > 0.0) {
        return None;
    }
    Some((end - start) / start * 100.0)
}

fn max_drawdown_pct(mut values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut peak = values.next()?;
    let mut max_drawdown = 0.0_f64;

    for value in values {
        if value > peak {
            peak = value;
        }
        if peak > 0.0 {
            max_drawdown = max_drawdown.max((peak - value) / peak);
        }
    }

    Some(max_drawdown * 100.0)
}
