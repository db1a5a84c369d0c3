//! Composite base-100 index over a weighted basket.
//!
//! The day universe is the union of every member's trading days. Each member
//! carries its last observed close forward; a member with no close yet is
//! left out of the day entirely. The day's composite return is the
//! weight-normalized mean return over members with a usable close on both the
//! previous and the current day, so weights need not sum to 100.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{IndexConfig, ZeroWeightPolicy};
use crate::{Basket, CalendarUnion, DailyBar, DisplayWindow, TimeSeriesStore, TradingDay};

/// Value of the index on its first day.
pub const BASE_INDEX_VALUE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexPoint {
    pub day: TradingDay,
    pub value: f64,
}

impl IndexPoint {
    pub const fn new(day: TradingDay, value: f64) -> Self {
        Self { day, value }
    }
}

/// Day-ordered sequence of index points covering the full available history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexSeries {
    points: Vec<IndexPoint>,
}

impl IndexSeries {
    /// Wrap points that are already strictly increasing by day.
    pub fn from_points(points: Vec<IndexPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[IndexPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&IndexPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&IndexPoint> {
        self.points.last()
    }

    pub fn value_on(&self, day: TradingDay) -> Option<f64> {
        self.points
            .binary_search_by(|point| point.day.cmp(&day))
            .ok()
            .map(|index| self.points[index].value)
    }

    pub fn clip(&self, window: &DisplayWindow) -> &[IndexPoint] {
        window.clip(&self.points, |point| point.day)
    }

    /// Day-over-day simple returns, keyed by the later day.
    pub fn daily_returns(&self) -> Vec<(TradingDay, f64)> {
        self.points
            .windows(2)
            .map(|pair| (pair[1].day, pair[1].value / pair[0].value - 1.0))
            .collect()
    }

    pub fn into_points(self) -> Vec<IndexPoint> {
        self.points
    }
}

/// Builds the composite index from a store snapshot.
#[derive(Debug, Clone)]
pub struct PortfolioIndexBuilder<'a> {
    store: &'a TimeSeriesStore,
    config: IndexConfig,
}

impl<'a> PortfolioIndexBuilder<'a> {
    pub fn new(store: &'a TimeSeriesStore) -> Self {
        Self::with_config(store, IndexConfig::default())
    }

    pub fn with_config(store: &'a TimeSeriesStore, config: IndexConfig) -> Self {
        Self { store, config }
    }

    /// Full-history index for `basket`. Empty when the basket is empty or no
    /// member ever has two consecutive usable closes.
    pub fn build(&self, basket: &Basket) -> IndexSeries {
        let mut members: Vec<Member<'_>> = basket
            .entries()
            .iter()
            .map(|entry| Member::new(entry.fraction(), self.store.series_of(&entry.ticker)))
            .collect();

        let calendar = CalendarUnion::from_series(members.iter().map(|member| member.bars));
        if calendar.is_empty() {
            debug!(members = members.len(), "no price history for basket");
            return IndexSeries::default();
        }

        let mut points = Vec::with_capacity(calendar.len());
        let mut value = BASE_INDEX_VALUE;
        let mut saw_pair = false;
        let mut flat_days = 0usize;

        for (position, &day) in calendar.days().iter().enumerate() {
            let mut weighted_return = 0.0;
            let mut active_weight = 0.0;

            for member in &mut members {
                let previous = member.last_close;
                member.advance_to(day);
                if let (Some(previous), Some(current)) = (previous, member.last_close) {
                    saw_pair = true;
                    weighted_return += member.fraction * (current / previous - 1.0);
                    active_weight += member.fraction;
                }
            }

            if position == 0 {
                points.push(IndexPoint::new(day, value));
                continue;
            }

            if active_weight > 0.0 {
                value *= 1.0 + weighted_return / active_weight;
                points.push(IndexPoint::new(day, value));
                continue;
            }

            flat_days += 1;
            match self.config.zero_weight_policy {
                ZeroWeightPolicy::HoldFlat => points.push(IndexPoint::new(day, value)),
                ZeroWeightPolicy::Skip => {}
            }
        }

        if !saw_pair {
            debug!(days = calendar.len(), "basket never produced a return pair");
            return IndexSeries::default();
        }

        debug!(
            members = members.len(),
            days = calendar.len(),
            points = points.len(),
            flat_days,
            "built basket index"
        );
        IndexSeries { points }
    }
}

/// Per-call forward-fill state for one basket member.
struct Member<'a> {
    fraction: f64,
    bars: &'a [DailyBar],
    cursor: usize,
    last_close: Option<f64>,
}

impl<'a> Member<'a> {
    fn new(fraction: f64, bars: &'a [DailyBar]) -> Self {
        Self {
            fraction,
            bars,
            cursor: 0,
            last_close: None,
        }
    }

    fn advance_to(&mut self, day: TradingDay) {
        while let Some(bar) = self.bars.get(self.cursor) {
            if bar.day > day {
                break;
            }
            self.last_close = Some(bar.close);
            self.cursor += 1;
        }
    }
}
