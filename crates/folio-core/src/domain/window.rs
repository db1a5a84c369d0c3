use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{TradingDay, ValidationError};

/// Inclusive `[start, end]` range of trading days used to slice derived series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayWindow {
    start: TradingDay,
    end: TradingDay,
}

impl DisplayWindow {
    pub fn new(start: TradingDay, end: TradingDay) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvertedWindow {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub const fn start(&self) -> TradingDay {
        self.start
    }

    pub const fn end(&self) -> TradingDay {
        self.end
    }

    pub fn contains(&self, day: TradingDay) -> bool {
        self.start <= day && day <= self.end
    }

    /// Sub-slice of day-sorted `items` that falls inside the window.
    pub fn clip<'a, T>(&self, items: &'a [T], day_of: impl Fn(&T) -> TradingDay) -> &'a [T] {
        let from = items.partition_point(|item| day_of(item) < self.start);
        let to = items.partition_point(|item| day_of(item) <= self.end);
        if from >= to {
            return &[];
        }
        &items[from..to]
    }
}

/// Look-back presets offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "6M")]
    SixMonths,
    #[serde(rename = "YTD")]
    YearToDate,
    #[serde(rename = "1Y")]
    OneYear,
}

impl Timeframe {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneMonth => "1M",
            Self::ThreeMonths => "3M",
            Self::SixMonths => "6M",
            Self::YearToDate => "YTD",
            Self::OneYear => "1Y",
        }
    }

    /// Calendar days of look-back, `None` for year-to-date.
    pub const fn lookback_days(self) -> Option<i64> {
        match self {
            Self::OneMonth => Some(30),
            Self::ThreeMonths => Some(90),
            Self::SixMonths => Some(180),
            Self::YearToDate => None,
            Self::OneYear => Some(365),
        }
    }

    /// Window covering this preset and ending on `as_of`.
    pub fn window_ending(self, as_of: TradingDay) -> DisplayWindow {
        let start = match self.lookback_days() {
            Some(days) => as_of.minus_days(days),
            None => as_of.start_of_year(),
        };
        DisplayWindow { start, end: as_of }
    }
}

impl Default for Timeframe {
    fn default() -> Self {
        Self::ThreeMonths
    }
}

impl Display for Timeframe {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "1M" => Ok(Self::OneMonth),
            "3M" => Ok(Self::ThreeMonths),
            "6M" => Ok(Self::SixMonths),
            "YTD" => Ok(Self::YearToDate),
            "1Y" => Ok(Self::OneYear),
            other => Err(ValidationError::InvalidTimeframe {
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(value: &str) -> TradingDay {
        TradingDay::parse(value).expect("day")
    }

    #[test]
    fn parses_timeframe() {
        assert_eq!(Timeframe::from_str("ytd").expect("must parse"), Timeframe::YearToDate);
        let err = Timeframe::from_str("2W").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidTimeframe { .. }));
    }

    #[test]
    fn resolves_windows_relative_to_as_of() {
        let as_of = day("2024-06-30");
        let three_months = Timeframe::ThreeMonths.window_ending(as_of);
        assert_eq!(three_months.start(), day("2024-04-01"));
        assert_eq!(three_months.end(), as_of);

        let ytd = Timeframe::YearToDate.window_ending(as_of);
        assert_eq!(ytd.start(), day("2024-01-01"));
    }

    #[test]
    fn rejects_inverted_window() {
        let err = DisplayWindow::new(day("2024-02-01"), day("2024-01-01")).expect_err("must fail");
        assert!(matches!(err, ValidationError::InvertedWindow { .. }));
    }

    #[test]
    fn clip_is_inclusive_on_both_edges() {
        let days = vec![
            day("2024-01-01"),
            day("2024-01-02"),
            day("2024-01-03"),
            day("2024-01-04"),
        ];
        let window = DisplayWindow::new(day("2024-01-02"), day("2024-01-03")).expect("window");
        let clipped = window.clip(&days, |d| *d);
        assert_eq!(clipped, &days[1..3]);

        let outside = DisplayWindow::new(day("2025-01-01"), day("2025-02-01")).expect("window");
        assert!(outside.clip(&days, |d| *d).is_empty());
    }
}
