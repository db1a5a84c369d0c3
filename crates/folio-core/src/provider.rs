//! Boundary to the upstream market data provider.
//!
//! Fetching (rate limits, retries, network failures) happens outside the
//! engine. A provider hands back ordered daily bars or a [`ProviderError`];
//! [`TimeSeriesStore::refresh`](crate::TimeSeriesStore::refresh) turns every
//! failure into an empty series so one bad ticker never aborts a batch.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{DailyBar, Ticker, ValidationError};

/// Failure categories a provider can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderErrorKind {
    Unavailable,
    NotFound,
    RateLimited,
    InvalidRequest,
}

/// Structured provider failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    kind: ProviderErrorKind,
    message: String,
    retryable: bool,
}

impl ProviderError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn not_found(ticker: &Ticker) -> Self {
        Self {
            kind: ProviderErrorKind::NotFound,
            message: format!("no price history for '{ticker}'"),
            retryable: false,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::RateLimited,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> ProviderErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            ProviderErrorKind::Unavailable => "provider.unavailable",
            ProviderErrorKind::NotFound => "provider.not_found",
            ProviderErrorKind::RateLimited => "provider.rate_limited",
            ProviderErrorKind::InvalidRequest => "provider.invalid_request",
        }
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for ProviderError {}

impl From<ValidationError> for ProviderError {
    fn from(value: ValidationError) -> Self {
        Self::invalid_request(value.to_string())
    }
}

/// Request for one ticker's daily history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarsRequest {
    pub ticker: Ticker,
    pub lookback_days: u32,
}

impl BarsRequest {
    pub fn new(ticker: Ticker, lookback_days: u32) -> Result<Self, ValidationError> {
        if lookback_days == 0 {
            return Err(ValidationError::ZeroLookback);
        }
        Ok(Self {
            ticker,
            lookback_days,
        })
    }
}

/// Source of daily bars. Implementations must return bars ordered by day.
pub trait MarketDataProvider: Send + Sync {
    fn daily_bars(&self, request: &BarsRequest) -> Result<Vec<DailyBar>, ProviderError>;
}
