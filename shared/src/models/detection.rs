//! Leaf-detection data models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label applied to a healthy leaf detection
pub const LABEL_GOOD: &str = "good";

/// Label applied to a diseased leaf detection
pub const LABEL_BAD: &str = "bad";

/// A leaf-disease detection uploaded by a field worker.
///
/// Owned by the detection-upload subsystem; read-only from the correlation
/// engine's perspective.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectionRecord {
    pub id: Uuid,
    /// Submitter email
    pub owner: String,
    pub created_at: DateTime<Utc>,
    /// Classification label; "good" or "bad" in practice
    pub label: String,
    pub farmer_name: Option<String>,
    pub location: Option<String>,
}

impl DetectionRecord {
    /// Calendar date the detection was uploaded, timezone-naive
    pub fn detection_date(&self) -> NaiveDate {
        self.created_at.date_naive()
    }

    pub fn is_bad(&self) -> bool {
        self.label == LABEL_BAD
    }

    pub fn is_good(&self) -> bool {
        self.label == LABEL_GOOD
    }
}
