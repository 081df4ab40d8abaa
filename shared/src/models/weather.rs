//! Weather data models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A weather observation for a location at a point in time.
///
/// Observations are immutable once stored; they are written only by the
/// external fetch process and removed individually or by date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherObservation {
    pub id: Uuid,
    pub location: String,
    pub observed_at: DateTime<Utc>,
    pub temperature_celsius: f64,
    /// Relative humidity, 0-100
    pub humidity_percent: i32,
    pub rainfall_mm: f64,
    pub wind_speed_kmh: f64,
    /// Cloud cover, 0-100; not every provider reports it
    pub cloud_cover_percent: Option<i32>,
    /// Primary sky condition as reported, e.g. "Rain", "Clear"
    pub conditions: String,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherObservation {
    /// Calendar date of the observation, timezone-naive
    pub fn observation_date(&self) -> NaiveDate {
        self.observed_at.date_naive()
    }
}
