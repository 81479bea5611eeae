//! Referral points aggregation
//!
//! A participant earns a fraction of the points and fees of their direct
//! referees only. Referees of referees contribute nothing to the original
//! referrer.

use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::debug;

use crate::core::domain::rates::SELF_FEES_SHARE_RATE;
use crate::core::rounding::{round2, round_points};
use crate::core::types::{ComputedEntry, ParticipantRecord, RateConfig};

/// Compute one leaderboard row per unique participant, ranked by total points.
///
/// Records without a `refCode` are skipped. When a `refCode` repeats, the last
/// record wins but keeps the position of the first. Inputs are never mutated.
pub fn compute(records: &[ParticipantRecord], rates: &RateConfig) -> Vec<ComputedEntry> {
    let mut index: IndexMap<&str, &ParticipantRecord> = IndexMap::with_capacity(records.len());
    for record in records {
        if let Some(ref_code) = record.ref_code() {
            index.insert(ref_code, record);
        }
    }

    let skipped = records.len() - index.len();
    if skipped > 0 {
        debug!(skipped, "Skipped malformed or duplicate participant records");
    }

    let mut children: HashMap<&str, Vec<&ParticipantRecord>> = HashMap::new();
    for record in index.values() {
        if let Some(referrer) = record.referrer() {
            children.entry(referrer).or_default().push(record);
        }
    }

    let mut entries: Vec<ComputedEntry> = index
        .iter()
        .map(|(ref_code, record)| {
            let referees = children.get(ref_code).map_or(&[][..], Vec::as_slice);
            compute_entry(ref_code, record, referees, rates)
        })
        .collect();

    rank(&mut entries);
    entries
}

fn compute_entry(
    ref_code: &str,
    record: &ParticipantRecord,
    referees: &[&ParticipantRecord],
    rates: &RateConfig,
) -> ComputedEntry {
    let own_points = record.own_points();
    let own_fees = record.own_fees();

    let (earned_points, earned_fees) = referees.iter().fold((0.0, 0.0), |(points, fees), child| {
        (
            points + child.own_points() * rates.referral_points_rate,
            fees + child.own_fees() * rates.referral_fees_rate,
        )
    });

    ComputedEntry {
        id: ref_code.to_string(),
        name: record.display_name(),
        ref_code: ref_code.to_string(),
        points: round2(own_points),
        referral_points: round_points(earned_points),
        // Rounded from the unrounded sum, not from `referral_points`.
        total_points: round_points(own_points + earned_points),
        fees_generated: round2(own_fees),
        referral_fees: round2(earned_fees),
        total_fees: round2(earned_fees + own_fees * SELF_FEES_SHARE_RATE),
        referrals: referees.len(),
    }
}

/// Stable sort, highest total points first; ties keep their current order.
pub fn rank(entries: &mut [ComputedEntry]) {
    entries.sort_by(|a, b| b.total_points.cmp(&a.total_points));
}
