use thiserror::Error;

/// Validation and contract errors exposed by `folio-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("ticker cannot be empty")]
    EmptyTicker,
    #[error("ticker length {len} exceeds max {max}")]
    TickerTooLong { len: usize, max: usize },
    #[error("ticker must start with an ASCII letter or '^': '{ch}'")]
    TickerInvalidStart { ch: char },
    #[error("ticker contains invalid character '{ch}' at index {index}")]
    TickerInvalidChar { ch: char, index: usize },

    #[error("trading day must be formatted YYYY-MM-DD: '{value}'")]
    InvalidTradingDay { value: String },
    #[error("timestamp {millis}ms is outside the supported calendar range")]
    TimestampOutOfRange { millis: i64 },

    #[error("invalid timeframe '{value}', expected one of 1M, 3M, 6M, YTD, 1Y")]
    InvalidTimeframe { value: String },
    #[error("window start {start} is after window end {end}")]
    InvertedWindow { start: String, end: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },
    #[error("bar close must be strictly positive, got {close}")]
    NonPositiveClose { close: f64 },
    #[error("bar high must be >= low")]
    InvalidBarRange,
    #[error("bars for {ticker} must be strictly increasing by day: {previous} then {next}")]
    BarsOutOfOrder {
        ticker: String,
        previous: String,
        next: String,
    },

    #[error("weight for {ticker} must be a finite non-negative percentage, got {weight}")]
    InvalidWeight { ticker: String, weight: f64 },
    #[error("{ticker} appears more than once in the basket")]
    DuplicateTicker { ticker: String },
    #[error("{ticker} is not part of the basket")]
    UnknownTicker { ticker: String },

    #[error("lookback_days must be greater than zero")]
    ZeroLookback,
}
