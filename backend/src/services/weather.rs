//! Weather observation service
//!
//! Query and cleanup surface over the weather store. Observations are
//! written only by the external fetch process, so there is no create path
//! here.

use chrono::NaiveDate;
use shared::{DateRange, WeatherObservation};

use crate::error::AppResult;
use crate::stores::WeatherStore;

pub struct WeatherService<W> {
    store: W,
}

impl<W: WeatherStore> WeatherService<W> {
    pub fn new(store: W) -> Self {
        Self { store }
    }

    /// Observations whose date falls within the inclusive range
    pub async fn query_range(&self, range: DateRange) -> AppResult<Vec<WeatherObservation>> {
        self.store.query(range).await
    }

    /// Remove all observations for a calendar date, returning the count
    pub async fn delete_for_date(&self, date: NaiveDate) -> AppResult<u64> {
        let removed = self.store.delete_for_date(date).await?;
        tracing::info!(%date, removed, "weather observations deleted");
        Ok(removed)
    }
}
