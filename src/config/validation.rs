//! Configuration validation logic
//!
//! This module validates configuration values before the leaderboard service
//! is built, so a bad rate or an unknown log format is reported at startup
//! rather than as a skewed leaderboard.

use tracing::{debug, warn};

use super::models::{AppConfig, EnvironmentConfig, LeaderboardConfig, RatesConfig, SourcesConfig};
use crate::core::error::AppError;
use crate::core::result::AppResult;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["json", "pretty", "compact"];
const ENVIRONMENTS: &[&str] = &["development", "staging", "production", "test"];

/// Configuration validator
pub struct ConfigValidator {
    /// Strict validation mode (fails on warnings)
    strict_mode: bool,

    /// Collect all validation errors instead of failing fast
    collect_all_errors: bool,
}

/// Validation result with warnings and errors
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Fatal validation errors
    pub errors: Vec<String>,

    /// Non-fatal warnings
    pub warnings: Vec<String>,

    /// Validation passed
    pub is_valid: bool,
}

impl ConfigValidator {
    /// Create a new validator with default settings
    pub fn new() -> Self {
        Self {
            strict_mode: false,
            collect_all_errors: true,
        }
    }

    /// Enable strict validation mode
    #[must_use]
    pub fn with_strict_mode(mut self) -> Self {
        self.strict_mode = true;
        self
    }

    /// Enable fail-fast mode (stop on first error)
    #[must_use]
    pub fn with_fail_fast(mut self) -> Self {
        self.collect_all_errors = false;
        self
    }

    /// Validate the complete application configuration
    pub fn validate(&self, config: &AppConfig) -> AppResult<ValidationResult> {
        debug!("🔍 Starting configuration validation");

        let mut result = ValidationResult {
            errors: Vec::new(),
            warnings: Vec::new(),
            is_valid: true,
        };

        self.validate_environment(&config.environment, &mut result)?;
        self.validate_rates(&config.rates, &mut result)?;
        self.validate_leaderboard(&config.leaderboard, &mut result);
        self.validate_sources(&config.sources, &mut result)?;

        result.is_valid =
            result.errors.is_empty() && (!self.strict_mode || result.warnings.is_empty());

        if result.is_valid {
            debug!("✅ Configuration validation passed");
        } else {
            warn!("❌ Configuration validation failed");
            for error in &result.errors {
                warn!("   Error: {}", error);
            }
            for warning in &result.warnings {
                warn!("   Warning: {}", warning);
            }
        }

        Ok(result)
    }

    fn validate_environment(
        &self,
        config: &EnvironmentConfig,
        result: &mut ValidationResult,
    ) -> AppResult<()> {
        if !ENVIRONMENTS.contains(&config.name.as_str()) {
            self.add_warning(result, &format!("Unknown environment name '{}'", config.name));
        }

        if !LOG_LEVELS.contains(&config.log_level.to_lowercase().as_str()) {
            self.add_error(
                result,
                format!(
                    "Invalid log level '{}'. Must be one of {}",
                    config.log_level,
                    LOG_LEVELS.join(", ")
                ),
            )?;
        }

        if !LOG_FORMATS.contains(&config.log_format.as_str()) {
            self.add_error(
                result,
                format!(
                    "Invalid log format '{}'. Must be 'json', 'pretty', or 'compact'",
                    config.log_format
                ),
            )?;
        }

        if config.name == "production" && config.log_level.eq_ignore_ascii_case("trace") {
            self.add_warning(result, "Trace logging enabled in production environment");
        }

        Ok(())
    }

    fn validate_rates(&self, config: &RatesConfig, result: &mut ValidationResult) -> AppResult<()> {
        let rates = [
            ("referral_points_rate", config.referral_points_rate),
            ("referral_fees_rate", config.referral_fees_rate),
            ("per_dex_referral_points_rate", config.per_dex_referral_points_rate),
        ];

        for (name, value) in rates {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                self.add_error(result, format!("Rate {name} must lie in [0, 1], got {value}"))?;
            }
        }

        if config.referral_points_rate == 0.0 && config.referral_fees_rate == 0.0 {
            self.add_warning(result, "Both referral rates are zero; referrers earn nothing");
        }

        Ok(())
    }

    fn validate_leaderboard(&self, config: &LeaderboardConfig, result: &mut ValidationResult) {
        if config.fallback_points_per_referral == 0 {
            self.add_warning(result, "Fallback mode grants zero points per referral");
        }
    }

    fn validate_sources(&self, config: &SourcesConfig, result: &mut ValidationResult) -> AppResult<()> {
        if config.import_path.trim().is_empty() {
            self.add_error(result, "Import path cannot be empty".to_string())?;
        }

        if config.registry_path.trim().is_empty() {
            self.add_error(result, "Registry path cannot be empty".to_string())?;
        }

        if config.output_path.as_deref().is_some_and(|p| p.trim().is_empty()) {
            self.add_error(result, "Output path cannot be blank when set".to_string())?;
        }

        Ok(())
    }

    /// Add an error to the validation result
    fn add_error(&self, result: &mut ValidationResult, message: String) -> AppResult<()> {
        result.is_valid = false;

        if !self.collect_all_errors {
            let error = AppError::validation(message.clone());
            result.errors.push(message);
            return Err(error);
        }

        result.errors.push(message);
        Ok(())
    }

    /// Add a warning to the validation result
    fn add_warning(&self, result: &mut ValidationResult, message: &str) {
        result.warnings.push(message.to_string());

        if self.strict_mode {
            result.is_valid = false;
        }
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_default_config_is_valid() {
        let result = ConfigValidator::new().validate(&AppConfig::default()).unwrap();
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_rate_out_of_range() {
        let mut config = AppConfig::default();
        config.rates.referral_fees_rate = 1.5;
        config.rates.referral_points_rate = f64::NAN;

        let result = ConfigValidator::new().validate(&config).unwrap();
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn test_fail_fast_returns_error() {
        let mut config = AppConfig::default();
        config.environment.log_format = "xml".to_string();

        let result = ConfigValidator::new().with_fail_fast().validate(&config);
        assert_matches!(result, Err(AppError::Validation { .. }));
    }

    #[test]
    fn test_strict_mode_rejects_warnings() {
        let mut config = AppConfig::default();
        config.leaderboard.fallback_points_per_referral = 0;

        let lenient = ConfigValidator::new().validate(&config).unwrap();
        assert!(lenient.is_valid);
        assert_eq!(lenient.warnings.len(), 1);

        let strict = ConfigValidator::new().with_strict_mode().validate(&config).unwrap();
        assert!(!strict.is_valid);
    }

    #[test]
    fn test_empty_sources() {
        let mut config = AppConfig::default();
        config.sources.registry_path = "   ".to_string();

        let result = ConfigValidator::new().validate(&config).unwrap();
        assert!(!result.is_valid);
        assert!(result.errors[0].contains("Registry path"));
    }
}
