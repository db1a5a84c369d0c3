//! Core engine for folio.
//!
//! This crate contains:
//! - Canonical domain models and validation
//! - The per-ticker price store and provider boundary
//! - Composite basket index construction
//! - Windowed statistics, comparison overlays and correlation ranking
//!
//! Everything here is synchronous and free of I/O; callers feed a
//! [`TimeSeriesStore`] snapshot in and get plain values out.

pub mod analysis;
pub mod basket;
pub mod calendar;
pub mod comparison;
pub mod config;
pub mod correlation;
pub mod domain;
pub mod error;
pub mod index;
pub mod provider;
pub mod statistics;
pub mod store;

pub use analysis::{Analysis, AnalysisReport, AnalysisRequest};
pub use basket::{Basket, PortfolioEntry};
pub use calendar::CalendarUnion;
pub use comparison::{ComparisonNormalizer, NormalizedSeries};
pub use config::{CorrelationConfig, EngineConfig, IndexConfig, StatisticsConfig, ZeroWeightPolicy};
pub use correlation::{pearson, CorrelationEngine, CorrelationRanking, CorrelationResult};
pub use domain::{DailyBar, DisplayWindow, Ticker, TickerSeries, Timeframe, TradingDay};
pub use error::ValidationError;
pub use index::{IndexPoint, IndexSeries, PortfolioIndexBuilder, BASE_INDEX_VALUE};
pub use provider::{BarsRequest, MarketDataProvider, ProviderError, ProviderErrorKind};
pub use statistics::{MovingAverage, PerformanceSummary, StatisticsEngine, TickerReturn};
pub use store::{FetchFailure, RefreshReport, TimeSeriesStore};
