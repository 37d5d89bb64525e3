//! Module handling date ranges
//!
//! The API wants a UTC interval.  We get calendar dates from the configuration or the command
//! line and expand them into the first and last second of the interval.
//!

use std::fmt::{Display, Formatter};

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use thiserror::Error;
use tracing::trace;

/// Format of calendar dates we accept.
pub const DATE_FMT: &str = "%Y-%m-%d";

/// ISO-8601 format used by the API for datetime parameters.
pub const API_FMT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Debug, Error, PartialEq)]
pub enum DateError {
    #[error("bad date: {0}")]
    BadDate(String),
    #[error("bad interval, {0} is after {1}")]
    Reversed(NaiveDate, NaiveDate),
}

/// A pair of calendar dates, both inclusive.
///
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, DateError> {
        if from > to {
            return Err(DateError::Reversed(from, to));
        }
        Ok(DateWindow { from, to })
    }

    /// Parse both sides of the window as `YYYY-MM-DD`.
    ///
    #[tracing::instrument]
    pub fn parse(from: &str, to: &str) -> Result<Self, DateError> {
        let from = parse_date(from)?;
        let to = parse_date(to)?;
        trace!("window from {from} to {to}");
        Self::new(from, to)
    }

    /// Start of the first day, `00:00:00Z`.
    ///
    pub fn begin(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.from.and_time(NaiveTime::MIN))
    }

    /// Last second of the last day, `23:59:59Z`.
    ///
    pub fn end(&self) -> DateTime<Utc> {
        // 23:59:59 is always valid
        let last = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        Utc.from_utc_datetime(&self.to.and_time(last))
    }

    /// Both ends formatted for the API.
    ///
    pub fn as_api(&self) -> (String, String) {
        (
            self.begin().format(API_FMT).to_string(),
            self.end().format(API_FMT).to_string(),
        )
    }
}

impl Display for DateWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.from.format(DATE_FMT), self.to.format(DATE_FMT))
    }
}

/// Parse a single calendar date.
///
pub fn parse_date(date: &str) -> Result<NaiveDate, DateError> {
    NaiveDate::parse_from_str(date.trim(), DATE_FMT)
        .map_err(|_| DateError::BadDate(date.to_string()))
}
