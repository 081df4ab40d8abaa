//! Common types used across the platform

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An inclusive calendar-date window for analysis runs.
///
/// Dates are timezone-naive: a record belongs to the window when the date
/// portion of its timestamp falls within `[start, end]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Errors produced while resolving a date range from request input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("start date {start} is after end date {end}")]
    Inverted { start: NaiveDate, end: NaiveDate },
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// Resolve a range from optional ISO date strings.
    ///
    /// A missing end date defaults to `today`; a missing start date defaults
    /// to 30 days before the end date.
    pub fn resolve(
        start: Option<&str>,
        end: Option<&str>,
        today: NaiveDate,
    ) -> Result<Self, DateRangeError> {
        let end = match end {
            Some(raw) => parse_iso_date(raw)?,
            None => today,
        };
        let start = match start {
            Some(raw) => parse_iso_date(raw)?,
            None => end - Duration::days(30),
        };
        Self::new(start, end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Human-readable form stored on analysis records, e.g. "2024-06-01 to 2024-06-30"
    pub fn label(&self) -> String {
        format!("{} to {}", self.start, self.end)
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

fn parse_iso_date(raw: &str) -> Result<NaiveDate, DateRangeError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| DateRangeError::InvalidDate(raw.to_string()))
}

/// Owner filter applied when loading detection records.
///
/// The literal "all" (or an empty value) means no restriction; anything else
/// restricts detections to the matching submitter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OwnerFilter(pub String);

impl OwnerFilter {
    pub fn all() -> Self {
        Self("all".to_string())
    }

    pub fn is_all(&self) -> bool {
        self.0.is_empty() || self.0 == "all"
    }

    pub fn as_owner(&self) -> Option<&str> {
        if self.is_all() {
            None
        } else {
            Some(&self.0)
        }
    }
}

impl From<Option<String>> for OwnerFilter {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(v) if !v.trim().is_empty() => Self(v.trim().to_string()),
            _ => Self::all(),
        }
    }
}

impl std::fmt::Display for OwnerFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
