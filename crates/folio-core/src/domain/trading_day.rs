use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::macros::format_description;
use time::{Date, Duration, Month, OffsetDateTime};

use crate::ValidationError;

/// Calendar date of one trading session, normalized to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradingDay(Date);

impl TradingDay {
    pub const fn from_date(date: Date) -> Self {
        Self(date)
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let format = format_description!("[year]-[month]-[day]");
        Date::parse(input.trim(), &format)
            .map(Self)
            .map_err(|_| ValidationError::InvalidTradingDay {
                value: input.to_owned(),
            })
    }

    /// Normalize an epoch-milliseconds bar timestamp to its UTC calendar day.
    pub fn from_unix_millis(millis: i64) -> Result<Self, ValidationError> {
        let nanos = i128::from(millis) * 1_000_000;
        OffsetDateTime::from_unix_timestamp_nanos(nanos)
            .map(|value| Self(value.date()))
            .map_err(|_| ValidationError::TimestampOutOfRange { millis })
    }

    /// Today's UTC calendar date.
    pub fn today_utc() -> Self {
        Self(OffsetDateTime::now_utc().date())
    }

    pub const fn into_inner(self) -> Date {
        self.0
    }

    pub const fn year(self) -> i32 {
        self.0.year()
    }

    /// January 1st of this day's year.
    pub fn start_of_year(self) -> Self {
        // January 1st exists for every year `Date` can represent.
        Date::from_calendar_date(self.0.year(), Month::January, 1)
            .map(Self)
            .unwrap_or(self)
    }

    /// Step back `days` calendar days, saturating at the earliest representable date.
    pub fn minus_days(self, days: i64) -> Self {
        self.0
            .checked_sub(Duration::days(days))
            .map(Self)
            .unwrap_or(Self(Date::MIN))
    }

    /// Step forward `days` calendar days, saturating at the latest representable date.
    pub fn plus_days(self, days: i64) -> Self {
        self.0
            .checked_add(Duration::days(days))
            .map(Self)
            .unwrap_or(Self(Date::MAX))
    }

    pub fn format_iso(self) -> String {
        let format = format_description!("[year]-[month]-[day]");
        self.0
            .format(&format)
            .unwrap_or_else(|_| String::from("<unformattable>"))
    }
}

impl Display for TradingDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_iso())
    }
}

impl FromStr for TradingDay {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl Serialize for TradingDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_iso())
    }
}

impl<'de> Deserialize<'de> for TradingDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}
