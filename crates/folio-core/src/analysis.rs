//! One-shot pipeline over a store snapshot: index, statistics, comparison
//! overlays and correlation ranking.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::{
    Basket, ComparisonNormalizer, CorrelationEngine, CorrelationRanking, DisplayWindow,
    IndexPoint, IndexSeries, NormalizedSeries, PerformanceSummary, PortfolioIndexBuilder,
    StatisticsEngine, Ticker, TimeSeriesStore,
};

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub window: DisplayWindow,
    pub comparisons: Vec<Ticker>,
    pub sma_periods: Vec<usize>,
    /// Defaults to `window` when unset.
    pub correlation_window: Option<DisplayWindow>,
}

impl AnalysisRequest {
    pub fn new(window: DisplayWindow) -> Self {
        Self {
            window,
            comparisons: Vec::new(),
            sma_periods: Vec::new(),
            correlation_window: None,
        }
    }

    pub fn with_comparisons(mut self, comparisons: Vec<Ticker>) -> Self {
        self.comparisons = comparisons;
        self
    }

    pub fn with_sma_periods(mut self, periods: Vec<usize>) -> Self {
        self.sma_periods = periods;
        self
    }

    pub fn with_correlation_window(mut self, window: DisplayWindow) -> Self {
        self.correlation_window = Some(window);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub index: IndexSeries,
    pub windowed: Vec<IndexPoint>,
    pub summary: PerformanceSummary,
    pub comparisons: Vec<NormalizedSeries>,
    pub correlations: CorrelationRanking,
}

#[derive(Debug, Clone, Default)]
pub struct Analysis {
    config: EngineConfig,
}

impl Analysis {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn run(
        &self,
        store: &TimeSeriesStore,
        basket: &Basket,
        request: &AnalysisRequest,
    ) -> AnalysisReport {
        let index =
            PortfolioIndexBuilder::with_config(store, self.config.index.clone()).build(basket);
        let window = &request.window;

        let summary =
            StatisticsEngine::new().summarize(&index, store, basket, window, &request.sma_periods);
        let comparisons =
            ComparisonNormalizer::new(store).normalize_all(&index, &request.comparisons, window);

        let correlation = CorrelationEngine::with_config(store, self.config.correlation.clone());
        let candidates = correlation.candidates(basket, &request.comparisons);
        let correlations = correlation.rank(
            &index,
            &candidates,
            request.correlation_window.as_ref().unwrap_or(window),
        );

        debug!(
            points = index.len(),
            comparisons = comparisons.len(),
            correlations = correlations.len(),
            "analysis complete"
        );

        AnalysisReport {
            windowed: index.clip(window).to_vec(),
            index,
            summary,
            comparisons,
            correlations,
        }
    }
}
