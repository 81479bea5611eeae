//! Leaderboard service
//!
//! One read loads the imported payload and the user registry, then builds the
//! ranked leaderboard either from the import or, when there is none, from
//! referral counts alone. The read never fails outright: an unexpected error
//! yields an empty response with an error status.

pub mod aggregator;
pub mod bonus;
pub mod fallback;
pub mod merge;
pub mod segment;

pub use aggregator::{compute, rank};
pub use bonus::{apply_bonuses, bonus_overrides};
pub use fallback::compute_fallback;
pub use merge::zero_fill;
pub use segment::{compute_per_dex, compute_segment};

use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, info, instrument};

use crate::config::AppConfig;
use crate::core::result::AppResult;
use crate::core::types::{
    ComputedEntry, ImportPayload, LeaderboardMode, LeaderboardResponse, RateConfig, RegistryUser,
};
use crate::infrastructure::DataSources;

/// Knobs of a leaderboard read
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeaderboardSettings {
    /// Default rates; a payload may override them per read
    pub rates: RateConfig,
    /// Points per direct referral in fallback mode
    pub fallback_points_per_referral: u64,
    /// Whether per-dex views are computed
    pub include_per_dex: bool,
}

impl Default for LeaderboardSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl LeaderboardSettings {
    /// Settings from the loaded configuration
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            rates: config.rates.to_rate_config(),
            fallback_points_per_referral: config.leaderboard.fallback_points_per_referral,
            include_per_dex: config.leaderboard.include_per_dex,
        }
    }
}

/// Serves leaderboard reads
#[derive(Debug, Clone)]
pub struct LeaderboardService {
    sources: DataSources,
    settings: LeaderboardSettings,
}

impl LeaderboardService {
    /// Service over explicit sources
    pub fn new(sources: DataSources, settings: LeaderboardSettings) -> Self {
        Self { sources, settings }
    }

    /// Service over the file-backed sources named in `config`
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            DataSources::from_config(config),
            LeaderboardSettings::from_config(config),
        )
    }

    /// Compute the current leaderboard
    #[instrument(skip(self))]
    pub async fn read(&self) -> LeaderboardResponse {
        metrics::counter!("leaderboard_reads_total").increment(1);
        let started = Instant::now();

        let response = match self.try_read().await {
            Ok(response) => response,
            Err(e) => {
                e.log("Leaderboard read failed");
                metrics::counter!("leaderboard_failed_reads_total").increment(1);
                LeaderboardResponse::failed()
            }
        };

        metrics::histogram!("leaderboard_compute_duration_seconds")
            .record(started.elapsed().as_secs_f64());
        response
    }

    async fn try_read(&self) -> AppResult<LeaderboardResponse> {
        let import = match self.sources.import.load().await {
            Ok(import) => import,
            Err(e) if e.is_recoverable() => {
                e.log("Unusable import, falling back to referral counts");
                None
            }
            Err(e) => return Err(e),
        };

        let users = self.sources.registry.users().await?;

        let response = match import {
            Some(payload) => self.build_imported(&payload, &users),
            None => {
                metrics::counter!("leaderboard_fallback_reads_total").increment(1);
                self.build_fallback(&users)
            }
        };

        info!(
            mode = %response.mode,
            participants = response.leaderboard.len(),
            segments = response.per_dex.len(),
            "📊 Leaderboard computed"
        );
        Ok(response)
    }

    /// Primary path: aggregate the import, zero-fill from the registry,
    /// apply bonuses, rank. Per-dex views are computed alongside.
    pub fn build_imported(
        &self,
        payload: &ImportPayload,
        users: &[RegistryUser],
    ) -> LeaderboardResponse {
        if let Some(imported_at) = payload.imported_at {
            debug!(%imported_at, "Using imported payload");
        }

        let rates = self.settings.rates.resolve(payload.rates.as_ref());

        let mut leaderboard = compute(&payload.entries, &rates);
        zero_fill(&mut leaderboard, users);
        finish(&mut leaderboard, users);

        let per_dex = match &payload.per_dex_entries {
            Some(segments) if self.settings.include_per_dex => compute_per_dex(segments, &rates),
            _ => BTreeMap::new(),
        };

        LeaderboardResponse::ok(leaderboard, per_dex, LeaderboardMode::Imported)
    }

    /// Fallback path: score registry users by direct referral count
    pub fn build_fallback(&self, users: &[RegistryUser]) -> LeaderboardResponse {
        let mut leaderboard = compute_fallback(users, self.settings.fallback_points_per_referral);
        finish(&mut leaderboard, users);

        LeaderboardResponse::ok(leaderboard, BTreeMap::new(), LeaderboardMode::Fallback)
    }
}

fn finish(leaderboard: &mut [ComputedEntry], users: &[RegistryUser]) {
    apply_bonuses(leaderboard, &bonus_overrides(users));
    rank(leaderboard);
}
