//! Configuration data structures and models
//!
//! This module defines the complete configuration structure for the
//! leaderboard engine and its default values.

use serde::{Deserialize, Serialize};

use crate::core::domain::{fallback, rates};
use crate::core::types::RateConfig;

/// Main application configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: EnvironmentConfig,

    /// Default reward rates
    #[serde(default)]
    pub rates: RatesConfig,

    /// Leaderboard behaviour
    #[serde(default)]
    pub leaderboard: LeaderboardConfig,

    /// Data source locations
    #[serde(default)]
    pub sources: SourcesConfig,
}

/// Environment configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Environment name (development, staging, production, test)
    #[serde(default = "default_environment_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format (json, pretty, compact)
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Directory for rolling log files; console only when unset
    #[serde(default)]
    pub log_directory: Option<String>,
}

/// Default reward rates, overridable per import
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatesConfig {
    /// Fraction of a referee's points credited to the referrer
    #[serde(default = "default_referral_points_rate")]
    pub referral_points_rate: f64,

    /// Fraction of a referee's fees credited to the referrer
    #[serde(default = "default_referral_fees_rate")]
    pub referral_fees_rate: f64,

    /// Points rate used by the per-dex views
    #[serde(default = "default_per_dex_referral_points_rate")]
    pub per_dex_referral_points_rate: f64,
}

/// Leaderboard behaviour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    /// Points granted per direct referral in fallback mode
    #[serde(default = "default_fallback_points_per_referral")]
    pub fallback_points_per_referral: u64,

    /// Compute per-dex views when the import carries segments
    #[serde(default = "default_true")]
    pub include_per_dex: bool,
}

/// Data source locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Imported payload (JSON)
    #[serde(default = "default_import_path")]
    pub import_path: String,

    /// User registry (JSON array)
    #[serde(default = "default_registry_path")]
    pub registry_path: String,

    /// Where to write the response; stdout when unset
    #[serde(default)]
    pub output_path: Option<String>,
}

fn default_environment_name() -> String { "development".to_string() }
fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "pretty".to_string() }
fn default_referral_points_rate() -> f64 { rates::DEFAULT_REFERRAL_POINTS_RATE }
fn default_referral_fees_rate() -> f64 { rates::DEFAULT_REFERRAL_FEES_RATE }
fn default_per_dex_referral_points_rate() -> f64 { rates::DEFAULT_PER_DEX_REFERRAL_POINTS_RATE }
fn default_fallback_points_per_referral() -> u64 { fallback::DEFAULT_POINTS_PER_REFERRAL }
fn default_import_path() -> String { "data/leaderboard-import.json".to_string() }
fn default_registry_path() -> String { "data/users.json".to_string() }
fn default_true() -> bool { true }

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            name: default_environment_name(),
            log_level: default_log_level(),
            log_format: default_log_format(),
            log_directory: None,
        }
    }
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            referral_points_rate: default_referral_points_rate(),
            referral_fees_rate: default_referral_fees_rate(),
            per_dex_referral_points_rate: default_per_dex_referral_points_rate(),
        }
    }
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            fallback_points_per_referral: default_fallback_points_per_referral(),
            include_per_dex: true,
        }
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            import_path: default_import_path(),
            registry_path: default_registry_path(),
            output_path: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: EnvironmentConfig::default(),
            rates: RatesConfig::default(),
            leaderboard: LeaderboardConfig::default(),
            sources: SourcesConfig::default(),
        }
    }
}

impl RatesConfig {
    /// The rates handed to the aggregator before any payload override
    pub fn to_rate_config(&self) -> RateConfig {
        RateConfig {
            referral_points_rate: self.referral_points_rate,
            referral_fees_rate: self.referral_fees_rate,
            per_dex_referral_points_rate: Some(self.per_dex_referral_points_rate),
        }
    }
}

impl AppConfig {
    /// Check if running in development mode
    pub fn is_development(&self) -> bool {
        self.environment.name == "development"
    }

    /// Check if running in production mode
    pub fn is_production(&self) -> bool {
        self.environment.name == "production"
    }

    /// Get the current environment name
    pub fn environment(&self) -> &str {
        &self.environment.name
    }

    /// Validate with the default validator
    pub fn validate(&self) -> crate::core::result::AppResult<super::ValidationResult> {
        super::ConfigValidator::new().validate(self)
    }

    /// Whether the default validator accepts this configuration
    pub fn is_valid(&self) -> bool {
        self.validate().map(|r| r.is_valid).unwrap_or(false)
    }
}
