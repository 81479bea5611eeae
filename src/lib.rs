//! Ardra Leaderboard Library
//!
//! Referral-driven leaderboard aggregation for the Ardra trading dashboard.
//! Participants earn points and fees from their own activity plus a fraction
//! of the activity of the participants they referred directly.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │        build from config • read • write JSON                │
//! └─────────────────────────────────────────────────────────────┘
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Services Layer                          │
//! │  ┌──────────┐ ┌──────────┐ ┌─────────┐ ┌─────────┐          │
//! │  │Aggregator│ │Zero-fill │ │ Bonuses │ │ Per-dex │          │
//! │  └──────────┘ └──────────┘ └─────────┘ └─────────┘          │
//! └─────────────────────────────────────────────────────────────┘
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Infrastructure Layer                       │
//! │        ┌───────────────┐      ┌───────────────┐             │
//! │        │ Import loader │      │ User registry │             │
//! │        └───────────────┘      └───────────────┘             │
//! └─────────────────────────────────────────────────────────────┘
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Core Layer                             │
//! │        Types • Errors • Rates • Rounding                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use ardra_leaderboard::{config::load_config, Application};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = load_config().await?;
//!     let app = Application::build(config)?;
//!     let status = app.run().await?;
//!     println!("served with {status}");
//!     Ok(())
//! }
//! ```
//!
//! The aggregator can also be used on its own:
//!
//! ```rust
//! use ardra_leaderboard::services::leaderboard::compute;
//! use ardra_leaderboard::{ParticipantRecord, RateConfig};
//!
//! let records = vec![
//!     ParticipantRecord::new("YOU", 1000.0, 1250.0),
//!     ParticipantRecord::new("REF1", 950.0, 300.0).referred_by("YOU"),
//! ];
//! let leaderboard = compute(&records, &RateConfig::default());
//! assert_eq!(leaderboard[0].total_points, 1095);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// Core modules - Domain layer containing business entities and rules
pub mod core;

// Application layer - Serving a leaderboard read
pub mod application;

// Configuration management - Multi-source configuration loading
pub mod config;

// Infrastructure layer - Import and registry sources
pub mod infrastructure;

// Services layer - Leaderboard computation
pub mod services;

// Utilities - Telemetry and CLI arguments
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::application::Application;
pub use crate::config::{AppConfig, ConfigLoader};
pub use crate::core::{
    error::{AppError, AppResult},
    types::*,
};
pub use crate::services::{LeaderboardService, LeaderboardSettings};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
