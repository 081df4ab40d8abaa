//! Weather condition classifier
//!
//! A fixed, ordered table of named condition predicates. The table is data:
//! each entry pairs a display name and threshold text with a pure predicate
//! over a single observation, so membership is testable in isolation and new
//! conditions slot in without touching aggregation. An observation may match
//! zero, one, or several conditions.

use shared::WeatherObservation;

/// Condition names referenced by the insight rules
pub const HIGH_HUMIDITY: &str = "High Humidity (>55%)";
pub const LOW_HUMIDITY: &str = "Low Humidity (<50%)";
pub const RAINY_WEATHER: &str = "Rainy Weather";
pub const HOT_WEATHER: &str = "Hot Weather (>30C)";

/// One entry of the classifier table
pub struct Condition {
    pub name: &'static str,
    pub threshold: &'static str,
    pub matches: fn(&WeatherObservation) -> bool,
}

/// The canonical condition table. Order is the pre-sort order only; final
/// output order comes from the aggregator's ranking.
pub const CONDITIONS: [Condition; 8] = [
    Condition {
        name: HIGH_HUMIDITY,
        threshold: ">55%",
        matches: |obs| obs.humidity_percent > 55,
    },
    Condition {
        name: LOW_HUMIDITY,
        threshold: "<50%",
        matches: |obs| obs.humidity_percent < 50,
    },
    Condition {
        name: RAINY_WEATHER,
        threshold: "Any rain",
        matches: |obs| {
            obs.rainfall_mm > 0.0
                || matches!(obs.conditions.as_str(), "Rain" | "Drizzle" | "Thunderstorm")
        },
    },
    Condition {
        name: HOT_WEATHER,
        threshold: ">30C",
        matches: |obs| obs.temperature_celsius > 30.0,
    },
    Condition {
        name: "Warm Weather (28-30C)",
        threshold: "28-30C",
        matches: |obs| (28.0..=30.0).contains(&obs.temperature_celsius),
    },
    Condition {
        name: "Cloudy Conditions",
        threshold: "Cloudy/Overcast",
        matches: |obs| {
            matches!(
                obs.conditions.as_str(),
                "Clouds" | "Overcast" | "Mist" | "Fog" | "Haze"
            ) || obs.cloud_cover_percent.is_some_and(|c| c > 50)
        },
    },
    Condition {
        name: "High Cloud Cover (>70%)",
        threshold: ">70%",
        matches: |obs| obs.cloud_cover_percent.is_some_and(|c| c > 70),
    },
    Condition {
        name: "Clear Conditions",
        threshold: "Clear/Sunny",
        matches: |obs| matches!(obs.conditions.as_str(), "Clear" | "Sunny"),
    },
];
