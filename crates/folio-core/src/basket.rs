//! Basket composition: an ordered, ticker-keyed list of weights.
//!
//! Weights are percentage points and are not required to sum to 100; the
//! index builder renormalizes by the weight that is active on each day.
//! Insertion order is kept for display only.

use serde::{Deserialize, Serialize};

use crate::{Ticker, ValidationError};

const FULL_ALLOCATION: f64 = 100.0;
const ALLOCATION_TOLERANCE: f64 = 1e-9;

/// One basket member and its weight in percentage points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioEntry {
    pub ticker: Ticker,
    pub weight: f64,
}

impl PortfolioEntry {
    pub fn new(ticker: Ticker, weight: f64) -> Result<Self, ValidationError> {
        validate_weight(&ticker, weight)?;
        Ok(Self { ticker, weight })
    }

    /// Weight as a fraction (`weight / 100`).
    pub fn fraction(&self) -> f64 {
        self.weight / FULL_ALLOCATION
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PortfolioEntry>", into = "Vec<PortfolioEntry>")]
pub struct Basket {
    entries: Vec<PortfolioEntry>,
}

impl Basket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from explicit entries. Later duplicates of a ticker are rejected.
    pub fn from_entries(entries: Vec<PortfolioEntry>) -> Result<Self, ValidationError> {
        let mut basket = Self::new();
        for entry in entries {
            if !basket.add_weighted(entry.ticker.clone(), entry.weight)? {
                return Err(ValidationError::DuplicateTicker {
                    ticker: entry.ticker.to_string(),
                });
            }
        }
        Ok(basket)
    }

    /// Equal allocation across `tickers` (100 / n each), duplicates dropped.
    pub fn equal_weight(tickers: impl IntoIterator<Item = Ticker>) -> Self {
        let mut unique: Vec<Ticker> = Vec::new();
        for ticker in tickers {
            if !unique.contains(&ticker) {
                unique.push(ticker);
            }
        }

        if unique.is_empty() {
            return Self::new();
        }

        let weight = FULL_ALLOCATION / unique.len() as f64;
        Self {
            entries: unique
                .into_iter()
                .map(|ticker| PortfolioEntry { ticker, weight })
                .collect(),
        }
    }

    /// Add a ticker the way manual entry does: the first member takes the full
    /// allocation, later members start at zero. Returns `false` for duplicates.
    pub fn add(&mut self, ticker: Ticker) -> bool {
        if self.contains(&ticker) {
            return false;
        }
        let weight = if self.entries.is_empty() {
            FULL_ALLOCATION
        } else {
            0.0
        };
        self.entries.push(PortfolioEntry { ticker, weight });
        true
    }

    /// Add a ticker with an explicit weight. Returns `Ok(false)` for duplicates.
    pub fn add_weighted(&mut self, ticker: Ticker, weight: f64) -> Result<bool, ValidationError> {
        validate_weight(&ticker, weight)?;
        if self.contains(&ticker) {
            return Ok(false);
        }
        self.entries.push(PortfolioEntry { ticker, weight });
        Ok(true)
    }

    pub fn remove(&mut self, ticker: &Ticker) -> Option<PortfolioEntry> {
        let position = self.entries.iter().position(|entry| &entry.ticker == ticker)?;
        Some(self.entries.remove(position))
    }

    pub fn set_weight(&mut self, ticker: &Ticker, weight: f64) -> Result<(), ValidationError> {
        validate_weight(ticker, weight)?;
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| &entry.ticker == ticker)
            .ok_or_else(|| ValidationError::UnknownTicker {
                ticker: ticker.to_string(),
            })?;
        entry.weight = weight;
        Ok(())
    }

    pub fn contains(&self, ticker: &Ticker) -> bool {
        self.entries.iter().any(|entry| &entry.ticker == ticker)
    }

    pub fn entries(&self) -> &[PortfolioEntry] {
        &self.entries
    }

    pub fn tickers(&self) -> impl Iterator<Item = &Ticker> {
        self.entries.iter().map(|entry| &entry.ticker)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|entry| entry.weight).sum()
    }

    pub fn is_fully_allocated(&self) -> bool {
        (self.total_weight() - FULL_ALLOCATION).abs() <= ALLOCATION_TOLERANCE
    }
}

impl TryFrom<Vec<PortfolioEntry>> for Basket {
    type Error = ValidationError;

    fn try_from(value: Vec<PortfolioEntry>) -> Result<Self, Self::Error> {
        Self::from_entries(value)
    }
}

impl From<Basket> for Vec<PortfolioEntry> {
    fn from(value: Basket) -> Self {
        value.entries
    }
}

fn validate_weight(ticker: &Ticker, weight: f64) -> Result<(), ValidationError> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(ValidationError::InvalidWeight {
            ticker: ticker.to_string(),
            weight,
        });
    }
    Ok(())
}
