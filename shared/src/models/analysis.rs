//! Correlation analysis models

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Sample size of a condition's detection join.
///
/// "No data" is reserved for conditions with zero matching weather-days; a
/// condition with weather-days but no detections reports `Count(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleSize {
    NoData,
    Count(u32),
}

impl Serialize for SampleSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SampleSize::NoData => serializer.serialize_str("No data"),
            SampleSize::Count(n) => serializer.serialize_u32(*n),
        }
    }
}

impl<'de> Deserialize<'de> for SampleSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Count(u32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Count(n) => Ok(SampleSize::Count(n)),
            Raw::Text(s) if s == "No data" => Ok(SampleSize::NoData),
            Raw::Text(s) => Err(de::Error::custom(format!("invalid sample size '{s}'"))),
        }
    }
}

/// Per-condition correlation result for one analysis run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConditionResult {
    /// Fixed classifier condition name, e.g. "High Humidity (>55%)"
    pub condition: String,
    /// Display form of the condition threshold, e.g. ">55%"
    pub threshold: String,
    /// Distinct calendar dates with at least one matching observation
    pub weather_days: u32,
    pub bad_count: u32,
    pub good_count: u32,
    /// Detections counted on matching days; only good/bad labels count
    pub total: u32,
    /// round(bad * 100 / total) when total > 0, else 0
    pub disease_rate: u32,
    pub sample_size: SampleSize,
}

/// Qualitative finding derived from ranked condition results
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Insight {
    pub kind: InsightKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Warning,
    Insight,
    Info,
}

/// Persisted snapshot of one correlation run.
///
/// Mutated in two disjoint ways: a metadata edit changes only `name` and
/// `notes`; a re-run recomputes every analytical field in place, preserving
/// `id`, `created_at`, `name`, and `notes` and setting `updated_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisRecord {
    pub id: Uuid,
    /// "<start> to <end>", ISO dates
    pub date_range: String,
    pub weather_count: u32,
    pub detection_count: u32,
    /// Sorted by disease rate descending, stable on ties
    pub condition_results: Vec<ConditionResult>,
    pub insights: Vec<Insight>,
    /// "all" or a submitter email
    pub owner_filter: String,
    pub created_at: DateTime<Utc>,
    /// Present only after a re-run
    pub updated_at: Option<DateTime<Utc>>,
    pub name: Option<String>,
    pub notes: Option<String>,
}
