//! Services layer module
//!
//! This module contains the leaderboard service: the referral aggregator and
//! the steps layered on top of it (zero-fill, bonuses, fallback, per-dex).

pub mod leaderboard;

// Re-export commonly used types
pub use leaderboard::{LeaderboardService, LeaderboardSettings};

use crate::config::AppConfig;
use crate::infrastructure::DataSources;

/// Services collection for dependency injection
#[derive(Debug, Clone)]
pub struct ServiceContainer {
    /// Leaderboard service
    pub leaderboard: LeaderboardService,
}

impl ServiceContainer {
    /// Initialize all services over explicit sources
    pub fn with_sources(config: &AppConfig, sources: DataSources) -> Self {
        tracing::info!("🚀 Initializing service container");

        let leaderboard = LeaderboardService::new(sources, LeaderboardSettings::from_config(config));

        tracing::info!("✅ Service container initialized successfully");
        Self { leaderboard }
    }
}
