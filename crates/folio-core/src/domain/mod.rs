//! # Domain Models
//!
//! Canonical domain types for folio price data.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Ticker`] | Validated uppercase ticker symbol |
//! | [`TradingDay`] | UTC calendar date of a session |
//! | [`DailyBar`] | Daily OHLC bar |
//! | [`TickerSeries`] | Strictly increasing bars for one ticker |
//! | [`DisplayWindow`] | Inclusive day range for slicing results |
//! | [`Timeframe`] | Look-back presets (1M, 3M, 6M, YTD, 1Y) |
//!
//! All types enforce their invariants at construction time:
//!
//! ```rust
//! use folio_core::{DailyBar, TradingDay, ValidationError};
//!
//! let day = TradingDay::parse("2024-01-02").unwrap();
//! assert!(DailyBar::new(day, 10.0, 11.0, 9.0, 10.5).is_ok());
//! assert!(matches!(
//!     DailyBar::new(day, 10.0, 11.0, 9.0, 0.0),
//!     Err(ValidationError::NonPositiveClose { .. })
//! ));
//! ```

mod bar;
mod ticker;
mod trading_day;
mod window;

pub use bar::{DailyBar, TickerSeries};
pub use ticker::Ticker;
pub use trading_day::TradingDay;
pub use window::{DisplayWindow, Timeframe};
