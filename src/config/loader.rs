//! Configuration loader with multi-source support
//!
//! Configuration is layered: a TOML file (or built-in defaults when none is
//! found), then `ARDRA_`-prefixed environment variables, then command-line
//! arguments. Later layers win.

use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::de::DeserializeOwned;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::models::AppConfig;
use crate::core::error::AppError;
use crate::core::result::AppResult;
use crate::utils::CliArgs;

/// Configuration loader with support for multiple sources
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Base configuration path
    config_path: Option<PathBuf>,

    /// CLI arguments
    cli_args: Option<CliArgs>,

    /// Environment prefix for variables
    env_prefix: String,

    /// Enable environment variable loading
    enable_env: bool,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            config_path: None,
            cli_args: None,
            env_prefix: "ARDRA".to_string(),
            enable_env: true,
        }
    }

    /// Set the base configuration path
    #[must_use]
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set CLI arguments
    #[must_use]
    pub fn with_cli_args(mut self, args: CliArgs) -> Self {
        self.cli_args = Some(args);
        self
    }

    /// Set environment variable prefix
    #[must_use]
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Disable environment variable loading
    #[must_use]
    pub fn without_env(mut self) -> Self {
        self.enable_env = false;
        self
    }

    /// Load and build the complete application configuration
    pub async fn load(self) -> AppResult<AppConfig> {
        info!("🔧 Starting configuration loading process");

        let mut config = self
            .load_base_config()
            .await
            .context("Failed to load base configuration")
            .map_err(|e| AppError::config(format!("{e:#}")))?;

        if self.enable_env {
            self.apply_environment_overrides(&mut config)
                .context("Failed to apply environment overrides")
                .map_err(|e| AppError::config(format!("{e:#}")))?;
        }

        if let Some(ref cli_args) = self.cli_args {
            Self::apply_cli_overrides(&mut config, cli_args);
        }

        info!("✅ Configuration loading completed successfully");
        debug!(
            "📊 Final configuration: environment={}, import={}, registry={}",
            config.environment.name, config.sources.import_path, config.sources.registry_path
        );

        Ok(config)
    }

    /// Load base configuration from TOML file
    async fn load_base_config(&self) -> Result<AppConfig> {
        let config_path = self.resolve_config_path();

        info!("📄 Loading base configuration from: {}", config_path.display());

        if !config_path.exists() {
            warn!("⚠️  Configuration file not found: {}", config_path.display());
            warn!("⚠️  Using default configuration values");
            return Ok(self.create_default_config());
        }

        let config_content = tokio::fs::read_to_string(&config_path)
            .await
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: AppConfig = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse TOML config: {}", config_path.display()))?;

        debug!("✅ Base configuration loaded successfully");
        Ok(config)
    }

    /// Resolve the configuration file path
    fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref path) = self.config_path {
            return path.clone();
        }

        if let Some(path) = self.cli_args.as_ref().and_then(|a| a.config_path.as_ref()) {
            return PathBuf::from(path);
        }

        if let Ok(path) = env::var("CONFIG_PATH") {
            return PathBuf::from(path);
        }

        let default_paths = ["configs/config.toml", "config.toml", "/etc/ardra/leaderboard.toml"];

        for path in &default_paths {
            let pb = PathBuf::from(path);
            if pb.exists() {
                debug!("📍 Found config file at: {}", pb.display());
                return pb;
            }
        }

        PathBuf::from("configs/config.toml")
    }

    /// Apply environment variable overrides.
    ///
    /// `ARDRA_SOURCES__IMPORT_PATH` maps to `sources.import_path`, and so on.
    fn apply_environment_overrides(&self, config: &mut AppConfig) -> Result<()> {
        debug!("🌍 Applying environment variable overrides");

        let env_config = Config::builder()
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .ignore_empty(true),
            )
            .build()
            .context("Failed to build environment configuration")?;

        Self::apply_env_var(config, &env_config, "environment.name", |cfg, val: String| {
            cfg.environment.name = val;
        });
        Self::apply_env_var(config, &env_config, "environment.log_level", |cfg, val: String| {
            cfg.environment.log_level = val;
        });
        Self::apply_env_var(config, &env_config, "environment.log_format", |cfg, val: String| {
            cfg.environment.log_format = val;
        });
        Self::apply_env_var(config, &env_config, "environment.log_directory", |cfg, val: String| {
            cfg.environment.log_directory = Some(val);
        });
        Self::apply_env_var(config, &env_config, "rates.referral_points_rate", |cfg, val: f64| {
            cfg.rates.referral_points_rate = val;
        });
        Self::apply_env_var(config, &env_config, "rates.referral_fees_rate", |cfg, val: f64| {
            cfg.rates.referral_fees_rate = val;
        });
        Self::apply_env_var(
            config,
            &env_config,
            "rates.per_dex_referral_points_rate",
            |cfg, val: f64| {
                cfg.rates.per_dex_referral_points_rate = val;
            },
        );
        Self::apply_env_var(
            config,
            &env_config,
            "leaderboard.fallback_points_per_referral",
            |cfg, val: u64| {
                cfg.leaderboard.fallback_points_per_referral = val;
            },
        );
        Self::apply_env_var(config, &env_config, "leaderboard.include_per_dex", |cfg, val: bool| {
            cfg.leaderboard.include_per_dex = val;
        });
        Self::apply_env_var(config, &env_config, "sources.import_path", |cfg, val: String| {
            cfg.sources.import_path = val;
        });
        Self::apply_env_var(config, &env_config, "sources.registry_path", |cfg, val: String| {
            cfg.sources.registry_path = val;
        });
        Self::apply_env_var(config, &env_config, "sources.output_path", |cfg, val: String| {
            cfg.sources.output_path = Some(val);
        });

        debug!("✅ Environment variable overrides applied");
        Ok(())
    }

    /// Apply a single environment variable with type conversion
    fn apply_env_var<T, F>(config: &mut AppConfig, env_config: &Config, key: &str, applier: F)
    where
        T: DeserializeOwned,
        F: FnOnce(&mut AppConfig, T),
    {
        if let Ok(value) = env_config.get::<T>(key) {
            applier(config, value);
            debug!("🔄 Applied environment override: {}", key);
        }
    }

    /// Apply CLI argument overrides
    fn apply_cli_overrides(config: &mut AppConfig, cli_args: &CliArgs) {
        debug!("⌨️  Applying CLI argument overrides");

        if let Some(ref env_name) = cli_args.environment {
            config.environment.name = env_name.clone();
        }
        if let Some(ref level) = cli_args.log_level {
            config.environment.log_level = level.clone();
        }
        if let Some(ref format) = cli_args.log_format {
            config.environment.log_format = format.clone();
        }
        if let Some(ref path) = cli_args.import_path {
            config.sources.import_path = path.clone();
        }
        if let Some(ref path) = cli_args.registry_path {
            config.sources.registry_path = path.clone();
        }
        if let Some(ref path) = cli_args.output {
            config.sources.output_path = Some(path.clone());
        }
        if cli_args.no_per_dex {
            config.leaderboard.include_per_dex = false;
        }

        debug!("✅ CLI argument overrides applied");
    }

    /// Create default configuration when no config file is found
    pub fn create_default_config(&self) -> AppConfig {
        AppConfig::default()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to load configuration with default settings
pub async fn load_config() -> AppResult<AppConfig> {
    ConfigLoader::new().load().await
}

/// Load configuration with CLI arguments
pub async fn load_config_with_args(cli_args: CliArgs) -> AppResult<AppConfig> {
    ConfigLoader::new().with_cli_args(cli_args).load().await
}

/// Load configuration from a specific path
pub async fn load_config_from_path<P: AsRef<Path>>(path: P) -> AppResult<AppConfig> {
    ConfigLoader::new().with_config_path(path).load().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn empty_cli_args() -> CliArgs {
        CliArgs {
            config_path: None,
            log_level: None,
            log_format: None,
            environment: None,
            import_path: None,
            registry_path: None,
            output: None,
            compact: false,
            no_per_dex: false,
        }
    }

    #[tokio::test]
    async fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = ConfigLoader::new()
            .with_config_path(temp_dir.path().join("absent.toml"))
            .without_env()
            .load()
            .await
            .unwrap();

        assert_eq!(config, AppConfig::default());
    }

    #[tokio::test]
    async fn test_load_from_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        tokio::fs::write(
            &path,
            r#"
[environment]
name = "production"
log_format = "json"

[leaderboard]
fallback_points_per_referral = 75
"#,
        )
        .await
        .unwrap();

        let config = load_config_from_path(&path).await.unwrap();
        assert!(config.is_production());
        assert_eq!(config.environment.log_format, "json");
        assert_eq!(config.leaderboard.fallback_points_per_referral, 75);
    }

    #[tokio::test]
    async fn test_malformed_toml_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        tokio::fs::write(&path, "[rates\nreferral_points_rate = ").await.unwrap();

        let result = ConfigLoader::new().with_config_path(&path).without_env().load().await;
        assert!(matches!(result, Err(AppError::Config { .. })));
    }

    #[tokio::test]
    async fn test_cli_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let cli_args = CliArgs {
            log_level: Some("debug".to_string()),
            log_format: Some("json".to_string()),
            environment: Some("test".to_string()),
            import_path: Some("snap.json".to_string()),
            output: Some("out.json".to_string()),
            no_per_dex: true,
            ..empty_cli_args()
        };

        let config = ConfigLoader::new()
            .with_config_path(temp_dir.path().join("absent.toml"))
            .with_cli_args(cli_args)
            .without_env()
            .load()
            .await
            .unwrap();

        assert_eq!(config.environment.log_level, "debug");
        assert_eq!(config.environment.log_format, "json");
        assert_eq!(config.environment.name, "test");
        assert_eq!(config.sources.import_path, "snap.json");
        assert_eq!(config.sources.output_path.as_deref(), Some("out.json"));
        assert_eq!(config.sources.registry_path, "data/users.json");
        assert!(!config.leaderboard.include_per_dex);
    }

    #[tokio::test]
    async fn test_environment_variable_override() {
        env::set_var("ARDRATESTENV_SOURCES__REGISTRY_PATH", "/tmp/registry.json");
        env::set_var("ARDRATESTENV_RATES__REFERRAL_FEES_RATE", "0.3");

        let loader = ConfigLoader::new().with_env_prefix("ARDRATESTENV");
        let mut config = loader.create_default_config();
        let result = loader.apply_environment_overrides(&mut config);

        env::remove_var("ARDRATESTENV_SOURCES__REGISTRY_PATH");
        env::remove_var("ARDRATESTENV_RATES__REFERRAL_FEES_RATE");

        assert!(result.is_ok());
        assert_eq!(config.sources.registry_path, "/tmp/registry.json");
        assert_eq!(config.rates.referral_fees_rate, 0.3);
    }
}
