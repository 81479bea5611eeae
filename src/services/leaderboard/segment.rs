//! Per-dex leaderboard views
//!
//! Each venue in the payload is aggregated independently with the per-dex
//! points rate. A venue whose data cannot be read is left out of the result;
//! the other venues and the main leaderboard are unaffected.

use rayon::prelude::*;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use super::aggregator;
use crate::core::error::AppError;
use crate::core::result::AppResult;
use crate::core::types::{ComputedEntry, ParticipantRecord, RateConfig};

/// Aggregate one venue's raw records.
///
/// `rates` are the shared rates of the read; the per-dex substitution happens
/// here. Items that are not participant objects are skipped.
pub fn compute_segment(
    segment: &str,
    raw: &Value,
    rates: &RateConfig,
) -> AppResult<Vec<ComputedEntry>> {
    let items = raw.as_array().ok_or_else(|| {
        AppError::segment(segment, format!("expected an array of records, got {}", kind_of(raw)))
    })?;

    let records: Vec<ParticipantRecord> = items
        .iter()
        .filter_map(|item| ParticipantRecord::deserialize(item).ok())
        .collect();

    if records.len() < items.len() {
        debug!(
            segment,
            dropped = items.len() - records.len(),
            "Dropped malformed segment records"
        );
    }

    Ok(aggregator::compute(&records, &rates.for_segment()))
}

/// Aggregate every venue in parallel, omitting venues that fail
pub fn compute_per_dex(
    segments: &BTreeMap<String, Value>,
    rates: &RateConfig,
) -> BTreeMap<String, Vec<ComputedEntry>> {
    segments
        .par_iter()
        .filter_map(|(name, raw)| match compute_segment(name, raw, rates) {
            Ok(entries) => Some((name.clone(), entries)),
            Err(e) => {
                e.log("Skipping per-dex segment");
                metrics::counter!("leaderboard_segment_failures_total").increment(1);
                None
            }
        })
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn rates_with_segment_rate(rate: Option<f64>) -> RateConfig {
        RateConfig {
            per_dex_referral_points_rate: rate,
            ..RateConfig::default()
        }
    }

    #[test]
    fn test_segment_uses_per_dex_rate() {
        let raw = json!([
            {"refCode": "A", "points": 0, "feesGenerated": 0},
            {"refCode": "B", "points": 1000, "feesGenerated": 100, "referrerRefCode": "A"}
        ]);

        let entries = compute_segment("orca", &raw, &rates_with_segment_rate(Some(0.05))).unwrap();
        let a = entries.iter().find(|e| e.ref_code == "A").unwrap();

        assert_eq!(a.referral_points, 50);
        // Fees keep the shared rate.
        assert_eq!(a.referral_fees, 20.0);
    }

    #[test]
    fn test_segment_rate_unset_means_zero() {
        let raw = json!([
            {"refCode": "A"},
            {"refCode": "B", "points": 1000, "referrerRefCode": "A"}
        ]);

        let entries = compute_segment("raydium", &raw, &RateConfig::default()).unwrap();
        let a = entries.iter().find(|e| e.ref_code == "A").unwrap();
        assert_eq!(a.referral_points, 0);
        assert_eq!(a.referrals, 1);
    }

    #[test]
    fn test_segment_skips_bad_items() {
        let raw = json!([{"refCode": "A", "points": 3}, "nope", 5, {"refCode": ["x"]}]);
        let entries = compute_segment("jupiter", &raw, &RateConfig::default()).unwrap();

        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_segment_must_be_array() {
        let result = compute_segment("orca", &json!({"refCode": "A"}), &RateConfig::default());
        assert_matches!(result, Err(AppError::Segment { ref segment, .. }) if segment == "orca");
    }

    #[test]
    fn test_per_dex_omits_failing_segments() {
        let mut segments = BTreeMap::new();
        segments.insert("orca".to_string(), json!([{"refCode": "A", "points": 1}]));
        segments.insert("broken".to_string(), json!("not a list"));
        segments.insert("empty".to_string(), json!([]));

        let views = compute_per_dex(&segments, &RateConfig::default());

        assert_eq!(views.len(), 2);
        assert!(views.contains_key("orca"));
        assert!(views["empty"].is_empty());
        assert!(!views.contains_key("broken"));
    }
}
