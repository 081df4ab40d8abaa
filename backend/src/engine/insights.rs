//! Insight generator
//!
//! Applies a fixed rule sequence to the ranked condition results. Rules are
//! independent and each appends at most one insight; emission order follows
//! the rule sequence, not the rate ranking. The fallback guarantees the
//! output is never empty.

use shared::{ConditionResult, Insight, InsightKind};

use crate::engine::classifier::{HIGH_HUMIDITY, HOT_WEATHER, LOW_HUMIDITY, RAINY_WEATHER};

const MIN_DOMINANT_SAMPLE: u32 = 5;
const MIN_RULE_SAMPLE: u32 = 3;

/// Derive qualitative findings from ranked condition results
pub fn generate_insights(results: &[ConditionResult]) -> Vec<Insight> {
    let mut insights = Vec::new();

    // Dominant risk: first ranked condition with a meaningful sample and a
    // majority disease rate
    if let Some(top) = results
        .iter()
        .find(|r| r.total >= MIN_DOMINANT_SAMPLE && r.disease_rate > 50)
    {
        insights.push(Insight {
            kind: InsightKind::Warning,
            message: format!(
                "{} shows {}% disease rate. Monitor closely during these conditions.",
                top.condition, top.disease_rate
            ),
        });
    }

    // Humidity contrast
    if let (Some(high), Some(low)) = (find(results, HIGH_HUMIDITY), find(results, LOW_HUMIDITY)) {
        if high.total >= MIN_RULE_SAMPLE && low.total >= MIN_RULE_SAMPLE {
            let ratio = f64::from(high.disease_rate) / f64::from(low.disease_rate.max(1));
            if ratio > 2.0 {
                insights.push(Insight {
                    kind: InsightKind::Insight,
                    message: format!(
                        "Pests are {ratio:.1}x more likely during high humidity conditions. \
                         Consider protective measures when humidity exceeds 70%."
                    ),
                });
            }
        }
    }

    // Rain
    if let Some(rainy) = find(results, RAINY_WEATHER) {
        if rainy.total >= MIN_RULE_SAMPLE && rainy.disease_rate > 60 {
            insights.push(Insight {
                kind: InsightKind::Warning,
                message: format!(
                    "Rainy conditions correlate with {}% disease rate. Inspect plants after rainfall.",
                    rainy.disease_rate
                ),
            });
        }
    }

    // Heat
    if let Some(hot) = find(results, HOT_WEATHER) {
        if hot.total >= MIN_RULE_SAMPLE && hot.disease_rate > 50 {
            insights.push(Insight {
                kind: InsightKind::Insight,
                message: format!(
                    "Hot weather above 30C shows {}% disease rate. Pest activity rises in heat; \
                     keep irrigation consistent to reduce plant stress.",
                    hot.disease_rate
                ),
            });
        }
    }

    if insights.is_empty() {
        insights.push(Insight {
            kind: InsightKind::Info,
            message: "Not enough data to establish strong weather correlations yet. \
                      Keep uploading detections to improve future insights."
                .to_string(),
        });
    }

    insights
}

fn find<'a>(results: &'a [ConditionResult], name: &str) -> Option<&'a ConditionResult> {
    results.iter().find(|r| r.condition == name)
}
