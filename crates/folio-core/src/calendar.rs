use std::collections::BTreeSet;

use crate::{DailyBar, TradingDay};

/// Sorted union of every trading day seen across a set of series.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarUnion {
    days: Vec<TradingDay>,
}

impl CalendarUnion {
    pub fn from_series<'a>(series: impl IntoIterator<Item = &'a [DailyBar]>) -> Self {
        let mut all_days = BTreeSet::new();
        for bars in series {
            all_days.extend(bars.iter().map(|bar| bar.day));
        }
        Self {
            days: all_days.into_iter().collect(),
        }
    }

    pub fn days(&self) -> &[TradingDay] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
