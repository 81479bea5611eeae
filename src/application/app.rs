//! Main application structure
//!
//! The application serves a single leaderboard read: it builds the service
//! container from configuration, computes the response and writes it as JSON
//! to the configured output file or to stdout.

use http::StatusCode;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument, warn};

use crate::config::AppConfig;
use crate::core::error::AppError;
use crate::core::result::AppResult;
use crate::core::types::LeaderboardResponse;
use crate::infrastructure::DataSources;
use crate::services::ServiceContainer;

/// Main application state and coordinator
#[derive(Debug)]
pub struct Application {
    /// Application configuration
    config: Arc<AppConfig>,

    /// Services built from the configuration
    services: ServiceContainer,

    /// Emit compact instead of pretty JSON
    compact: bool,
}

impl Application {
    /// Build a new application instance with the given configuration
    #[instrument(skip(config))]
    pub fn build(config: AppConfig) -> AppResult<Self> {
        let sources = DataSources::from_config(&config);
        Self::build_with_sources(config, sources)
    }

    /// Build over explicit data sources
    pub fn build_with_sources(config: AppConfig, sources: DataSources) -> AppResult<Self> {
        info!("🏗️  Building application instance");

        let validation_result = config.validate()?;
        if !validation_result.is_valid {
            return Err(AppError::config(format!(
                "Configuration validation failed: {}",
                validation_result.errors.join("; ")
            )));
        }

        for warning in &validation_result.warnings {
            warn!("⚠️  Configuration warning: {}", warning);
        }

        let services = ServiceContainer::with_sources(&config, sources);

        info!("✅ Application instance built successfully");
        Ok(Self {
            config: Arc::new(config),
            services,
            compact: false,
        })
    }

    /// Emit compact JSON
    #[must_use]
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Compute the leaderboard without writing it
    pub async fn read(&self) -> LeaderboardResponse {
        self.services.leaderboard.read().await
    }

    /// Compute the leaderboard, write it out and return the read status
    #[instrument(skip(self))]
    pub async fn run(&self) -> AppResult<StatusCode> {
        let response = self.read().await;
        let body = self.render(&response)?;

        match self.output_path() {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::write(&path, &body).await?;
                info!("💾 Leaderboard written to {}", path.display());
            }
            None => {
                let mut stdout = tokio::io::stdout();
                stdout.write_all(body.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
        }

        if response.is_success() {
            info!("✅ Leaderboard served ({} participants)", response.leaderboard.len());
        } else {
            warn!("⚠️  Leaderboard served with status {}", response.status);
        }
        Ok(response.status)
    }

    /// Serialize a response as configured
    pub fn render(&self, response: &LeaderboardResponse) -> AppResult<String> {
        let body = if self.compact {
            serde_json::to_string(response)?
        } else {
            serde_json::to_string_pretty(response)?
        };
        Ok(body)
    }

    fn output_path(&self) -> Option<PathBuf> {
        self.config.sources.output_path.as_ref().map(PathBuf::from)
    }
}
