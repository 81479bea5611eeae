//! Referral-count-only leaderboard
//!
//! Used when no import is available. Every registry user gets a row; the only
//! score is a fixed number of points per direct referral.

use indexmap::IndexMap;
use std::collections::HashMap;

use crate::core::types::{ComputedEntry, RegistryUser};

/// One entry per registry user, scored by direct referral count. Unranked.
///
/// Scores saturate at `u64::MAX`.
pub fn compute_fallback(users: &[RegistryUser], points_per_referral: u64) -> Vec<ComputedEntry> {
    let mut index: IndexMap<&str, &RegistryUser> = IndexMap::with_capacity(users.len());
    for user in users {
        if !user.ref_code.trim().is_empty() {
            index.entry(user.ref_code.as_str()).or_insert(user);
        }
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for user in index.values() {
        if let Some(referrer) = user.referrer() {
            *counts.entry(referrer).or_default() += 1;
        }
    }

    index
        .iter()
        .map(|(ref_code, user)| {
            let referrals = counts.get(ref_code).copied().unwrap_or(0);
            let referral_points = (referrals as u64).saturating_mul(points_per_referral);
            ComputedEntry {
                referral_points,
                total_points: referral_points,
                referrals,
                ..ComputedEntry::zero(*ref_code, user.display_name())
            }
        })
        .collect()
}
