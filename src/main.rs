//! Ardra Leaderboard - referral points engine
//!
//! Reads the imported activity snapshot and the user registry, computes the
//! ranked leaderboard and writes it as JSON. The process exits with status 0
//! when the read succeeded and 1 otherwise.
//!
//! Configuration is layered: TOML file, `ARDRA_` environment variables, then
//! command line flags. A `.env` file in the working directory is honoured.

use ardra_leaderboard::{
    application::Application,
    config::{load_config_with_args, AppConfig, CliArgs},
    utils::telemetry,
};
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use std::process;
use tracing::instrument::WithSubscriber;
use tracing::{error, info, instrument, warn};
use tracing_appender::non_blocking::WorkerGuard;

/// Application entry point
#[tokio::main]
async fn main() {
    // Setup color-eyre for enhanced error reporting
    if let Err(e) = color_eyre::install() {
        eprintln!("Failed to install color-eyre: {e}");
        process::exit(1);
    }

    match run().await {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            error!("Fatal application error: {:?}", e);
            eprintln!("\n❌ Leaderboard run failed:");
            eprintln!("{e:?}");
            process::exit(1);
        }
    }
}

/// Returns whether the leaderboard read succeeded
async fn run() -> Result<bool> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli_args = CliArgs::parse();
    let compact = cli_args.compact;

    // The configured subscriber needs the config; startup logs go to stderr
    let bootstrap_level = cli_args.log_level.clone().unwrap_or_else(|| "info".to_string());
    let config = load_config_with_args(cli_args)
        .with_subscriber(telemetry::bootstrap(&bootstrap_level))
        .await
        .wrap_err("Configuration loading failed")?;

    let _guard = init_telemetry(&config)?;

    info!(
        "📊 {} v{} ({} mode)",
        ardra_leaderboard::NAME,
        ardra_leaderboard::VERSION,
        config.environment()
    );
    log_configuration_summary(&config);

    let app = Application::build(config)
        .wrap_err("Application initialization failed")?
        .with_compact(compact);

    serve(&app).await
}

fn init_telemetry(config: &AppConfig) -> Result<Option<WorkerGuard>> {
    let env = &config.environment;
    let installed = match env.log_directory.as_deref() {
        Some(directory) => telemetry::init_with_file_rotation(
            &env.log_level,
            &env.log_format,
            directory,
            "ardra-leaderboard.log",
        )
        .map(Some),
        None => telemetry::init(&env.log_level, &env.log_format).map(|()| None),
    };

    installed
        .map_err(|e| color_eyre::eyre::eyre!("{e:#}"))
        .wrap_err("Failed to initialize telemetry system")
}

/// Log configuration summary for transparency
fn log_configuration_summary(config: &AppConfig) {
    info!("📊 Configuration Summary:");
    info!("   Environment: {}", config.environment());
    info!("   Import: {}", config.sources.import_path);
    info!("   Registry: {}", config.sources.registry_path);
    info!(
        "   Rates: points {} • fees {} • per-dex points {}",
        config.rates.referral_points_rate,
        config.rates.referral_fees_rate,
        config.rates.per_dex_referral_points_rate
    );
    info!(
        "   Fallback points per referral: {}",
        config.leaderboard.fallback_points_per_referral
    );
    info!("   Per-dex views: {}", config.leaderboard.include_per_dex);
}

#[instrument(skip(app))]
async fn serve(app: &Application) -> Result<bool> {
    let status = app.run().await.wrap_err("Failed to write leaderboard")?;

    if status.is_success() {
        Ok(true)
    } else {
        warn!("⚠️  Leaderboard read returned {}", status);
        Ok(false)
    }
}
