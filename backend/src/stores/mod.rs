//! Store contracts for the correlation engine's external collaborators
//!
//! The engine talks to the weather store, the detection store, and the
//! analysis persistence sink through these traits; the Postgres
//! implementations live in [`postgres`], and the test suites substitute
//! in-memory implementations.

pub mod postgres;

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::{AnalysisRecord, DateRange, DetectionRecord, WeatherObservation};
use uuid::Uuid;

use crate::error::AppResult;

/// Source of truth for weather observations.
///
/// Populated by an external fetch process; this engine only queries and
/// deletes.
#[async_trait]
pub trait WeatherStore: Send + Sync {
    /// All observations whose date portion falls within the range, inclusive
    async fn query(&self, range: DateRange) -> AppResult<Vec<WeatherObservation>>;

    /// Remove every observation recorded on the given calendar date,
    /// returning the removed count
    async fn delete_for_date(&self, date: NaiveDate) -> AppResult<u64>;
}

/// Detection records owned by the upload subsystem; read-only here
#[async_trait]
pub trait DetectionStore: Send + Sync {
    /// Detections created within the range, optionally restricted to one
    /// submitter
    async fn query(
        &self,
        range: DateRange,
        owner: Option<&str>,
    ) -> AppResult<Vec<DetectionRecord>>;
}

/// Persistence sink for analysis snapshots, keyed by analysis identifier
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Insert or overwrite the record under its identifier
    async fn put(&self, record: &AnalysisRecord) -> AppResult<()>;

    async fn get(&self, id: Uuid) -> AppResult<Option<AnalysisRecord>>;

    /// Returns false when no record existed under the identifier
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Records newest-created-first, optionally restricted by owner filter,
    /// capped at `limit`
    async fn list(&self, owner: Option<&str>, limit: i64) -> AppResult<Vec<AnalysisRecord>>;
}
