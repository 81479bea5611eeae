//! Manual bonus adjustments

use std::collections::HashMap;
use tracing::debug;

use crate::core::rounding::round_points;
use crate::core::types::{BonusOverride, ComputedEntry, RegistryUser};

/// Overrides keyed by `refCode`, for every registry user with a bonus set
pub fn bonus_overrides(users: &[RegistryUser]) -> HashMap<String, BonusOverride> {
    users
        .iter()
        .filter_map(|user| user.bonus_override().map(|bonus| (user.ref_code.clone(), bonus)))
        .collect()
}

/// Add each participant's bonus to their points, returning how many entries
/// were adjusted.
///
/// Boosted values are floored at zero and rounded; `total_points` becomes
/// their sum, saturating at `u64::MAX`. Ranking is left to the caller.
pub fn apply_bonuses(
    entries: &mut [ComputedEntry],
    overrides: &HashMap<String, BonusOverride>,
) -> usize {
    if overrides.is_empty() {
        return 0;
    }

    let mut applied = 0;
    for entry in entries.iter_mut() {
        let Some(bonus) = overrides.get(&entry.ref_code) else {
            continue;
        };

        let points = round_points(entry.points + bonus.bonus_points.unwrap_or(0.0));
        let referral_points = round_points(
            entry.referral_points as f64 + bonus.bonus_referral_points.unwrap_or(0.0),
        );

        entry.points = points as f64;
        entry.referral_points = referral_points;
        entry.total_points = points.saturating_add(referral_points);
        applied += 1;
    }

    debug!(applied, "Applied bonus overrides");
    applied
}
