use serde::{Deserialize, Serialize};

use crate::{Ticker, TradingDay, ValidationError};

/// One daily OHLC bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub day: TradingDay,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl DailyBar {
    pub fn new(
        day: TradingDay,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("open", open)?;
        validate_non_negative("high", high)?;
        validate_non_negative("low", low)?;
        validate_non_negative("close", close)?;

        if close <= 0.0 {
            return Err(ValidationError::NonPositiveClose { close });
        }

        if high < low {
            return Err(ValidationError::InvalidBarRange);
        }

        Ok(Self {
            day,
            open,
            high,
            low,
            close,
        })
    }

    /// Bar carrying only a close, with open/high/low pinned to it.
    pub fn from_close(day: TradingDay, close: f64) -> Result<Self, ValidationError> {
        Self::new(day, close, close, close, close)
    }

    /// Re-run construction checks on a value that bypassed `new` (e.g. deserialized input).
    pub fn validate(&self) -> Result<(), ValidationError> {
        Self::new(self.day, self.open, self.high, self.low, self.close).map(|_| ())
    }
}

/// Ordered daily bars for a single ticker. Days are strictly increasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerSeries {
    ticker: Ticker,
    bars: Vec<DailyBar>,
}

impl TickerSeries {
    pub fn new(ticker: Ticker, bars: Vec<DailyBar>) -> Result<Self, ValidationError> {
        for bar in &bars {
            bar.validate()?;
        }

        if let Some(pair) = bars.windows(2).find(|pair| pair[0].day >= pair[1].day) {
            return Err(ValidationError::BarsOutOfOrder {
                ticker: ticker.to_string(),
                previous: pair[0].day.to_string(),
                next: pair[1].day.to_string(),
            });
        }

        Ok(Self { ticker, bars })
    }

    pub fn empty(ticker: Ticker) -> Self {
        Self {
            ticker,
            bars: Vec::new(),
        }
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn bars(&self) -> &[DailyBar] {
        &self.bars
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Close on exactly `day`, if a bar exists for it.
    pub fn close_on(&self, day: TradingDay) -> Option<f64> {
        self.bars
            .binary_search_by(|bar| bar.day.cmp(&day))
            .ok()
            .map(|index| self.bars[index].close)
    }
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(value: &str) -> TradingDay {
        TradingDay::parse(value).expect("day")
    }

    #[test]
    fn rejects_non_positive_close() {
        let err = DailyBar::new(day("2024-01-02"), 1.0, 1.0, 0.0, 0.0).expect_err("must fail");
        assert!(matches!(err, ValidationError::NonPositiveClose { .. }));
    }

    #[test]
    fn rejects_inverted_range() {
        let err = DailyBar::new(day("2024-01-02"), 10.0, 9.0, 11.0, 10.0).expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidBarRange));
    }

    #[test]
    fn rejects_nan_prices() {
        let err = DailyBar::new(day("2024-01-02"), f64::NAN, 1.0, 1.0, 1.0).expect_err("must fail");
        assert!(matches!(err, ValidationError::NonFiniteValue { field: "open" }));
    }

    #[test]
    fn series_requires_strictly_increasing_days() {
        let ticker = Ticker::parse("AAPL").expect("ticker");
        let bars = vec![
            DailyBar::from_close(day("2024-01-03"), 10.0).expect("bar"),
            DailyBar::from_close(day("2024-01-03"), 11.0).expect("bar"),
        ];
        let err = TickerSeries::new(ticker, bars).expect_err("must fail");
        assert!(matches!(err, ValidationError::BarsOutOfOrder { .. }));
    }

    #[test]
    fn close_on_is_exact_match_only() {
        let ticker = Ticker::parse("AAPL").expect("ticker");
        let bars = vec![
            DailyBar::from_close(day("2024-01-02"), 10.0).expect("bar"),
            DailyBar::from_close(day("2024-01-04"), 12.0).expect("bar"),
        ];
        let series = TickerSeries::new(ticker, bars).expect("series");
        assert_eq!(series.close_on(day("2024-01-04")), Some(12.0));
        assert_eq!(series.close_on(day("2024-01-03")), None);
    }
}
