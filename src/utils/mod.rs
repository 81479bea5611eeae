//! Utility functions and helpers used throughout the application
//!
//! This module provides telemetry setup and command-line argument parsing.

/// Telemetry and observability utilities
pub mod telemetry {
    use anyhow::{anyhow, Result};
    use tracing_appender::non_blocking::WorkerGuard;
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::fmt::MakeWriter;
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

    /// Compact stderr subscriber for the startup window before the
    /// configured one is installed.
    ///
    /// Not installed globally; scope it with `tracing::subscriber::with_default`
    /// or `WithSubscriber::with_subscriber`.
    pub fn bootstrap(log_level: &str) -> impl tracing::Subscriber + Send + Sync + 'static {
        bootstrap_with_writer(log_level, std::io::stderr)
    }

    pub(crate) fn bootstrap_with_writer<W>(
        log_level: &str,
        writer: W,
    ) -> impl tracing::Subscriber + Send + Sync + 'static
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

        tracing_subscriber::fmt()
            .compact()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .with_target(false)
            .finish()
    }

    /// Initialize global tracing with the specified log level and format.
    ///
    /// `RUST_LOG` takes precedence over `log_level` when set.
    pub fn init(log_level: &str, log_format: &str) -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

        let registry = Registry::default().with(env_filter);

        let installed = match log_format {
            "json" => registry
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .try_init(),
            "compact" => registry
                .with(
                    fmt::layer()
                        .compact()
                        .with_writer(std::io::stderr)
                        .with_target(false),
                )
                .try_init(),
            _ => registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .try_init(),
        };

        installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))
    }

    /// Initialize console logging plus a daily rolling log file.
    ///
    /// The returned guard flushes the file writer on drop and must be held
    /// for the lifetime of the process.
    pub fn init_with_file_rotation(
        log_level: &str,
        log_format: &str,
        log_directory: &str,
        file_name_prefix: &str,
    ) -> Result<WorkerGuard> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

        let file_appender = RollingFileAppender::new(Rotation::DAILY, log_directory, file_name_prefix);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let registry = Registry::default().with(env_filter);

        let installed = match log_format {
            "json" => registry
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(non_blocking)
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .try_init(),
            _ => registry
                .with(
                    fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(false)
                        .with_target(true),
                )
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .try_init(),
        };

        installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))?;
        Ok(guard)
    }
}

/// Configuration argument parsing utilities
pub mod cli {
    use clap::Parser;

    /// Command line arguments for the application
    #[derive(Parser, Debug, Clone, Default)]
    #[command(
        name = "ardra-leaderboard",
        about = "Compute the Ardra referral leaderboard from an imported snapshot",
        version = env!("CARGO_PKG_VERSION")
    )]
    pub struct CliArgs {
        /// Path to configuration file
        #[arg(short, long, env = "CONFIG_PATH")]
        pub config_path: Option<String>,

        /// Logging level (trace, debug, info, warn, error)
        #[arg(short, long, env = "LOG_LEVEL")]
        pub log_level: Option<String>,

        /// Log format (json, pretty, compact)
        #[arg(long, env = "LOG_FORMAT")]
        pub log_format: Option<String>,

        /// Environment (development, staging, production, test)
        #[arg(short, long, env = "ENVIRONMENT")]
        pub environment: Option<String>,

        /// Imported payload (JSON)
        #[arg(short, long)]
        pub import_path: Option<String>,

        /// User registry (JSON array)
        #[arg(short, long)]
        pub registry_path: Option<String>,

        /// Write the response here instead of stdout
        #[arg(short, long)]
        pub output: Option<String>,

        /// Emit compact JSON
        #[arg(long)]
        pub compact: bool,

        /// Skip the per-dex views
        #[arg(long)]
        pub no_per_dex: bool,
    }
}

// Re-export CLI utilities
pub use cli::CliArgs;
