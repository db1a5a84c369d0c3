//! Engine tuning knobs. Every section deserializes with defaults so a
//! partial settings file is enough.

use serde::{Deserialize, Serialize};

use crate::Ticker;

/// What the index does on a day where no ticker has a usable return pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroWeightPolicy {
    /// Emit a point carrying the previous value.
    #[default]
    HoldFlat,
    /// Emit no point for that day.
    Skip,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub zero_weight_policy: ZeroWeightPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    /// Minimum paired return observations before a coefficient is reported.
    pub min_observations: usize,
    /// How many index days a candidate close may be carried forward.
    /// `None` forward-fills without limit.
    pub max_fill_gap: Option<usize>,
    /// Benchmarks always ranked alongside the basket and comparison tickers.
    pub benchmarks: Vec<Ticker>,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            min_observations: 5,
            max_fill_gap: Some(1),
            benchmarks: default_benchmarks(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticsConfig {
    pub sma_periods: Vec<usize>,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            sma_periods: vec![20, 50],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub index: IndexConfig,
    pub correlation: CorrelationConfig,
    pub statistics: StatisticsConfig,
}

fn default_benchmarks() -> Vec<Ticker> {
    ["SPY", "QQQ", "DIA", "IWM"]
        .into_iter()
        .filter_map(|raw| Ticker::parse(raw).ok())
        .collect()
}
