//! Carbon Wise - Main Entry Point
//!
//! Household waste CO2 calculator with monthly history

use carbon_wise::app::application::run_app;
use carbon_wise::constants::APP_NAME;
use carbon_wise::domain::config::Settings;
use carbon_wise::helpers::get_or_create_data_dir;
use carbon_wise::utils::config_store::load_or_init_settings;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Install the subscriber; the returned guard flushes the writer on drop
fn init_tracing(settings: &Settings) -> WorkerGuard {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let log_dir = if settings.logging.file {
        get_or_create_data_dir().ok()
    } else {
        None
    };
    let (writer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, format!("{APP_NAME}.log"));
            tracing_appender::non_blocking(appender)
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();

    guard
}

fn main() -> anyhow::Result<()> {
    let loaded = load_or_init_settings();
    let settings = loaded.as_ref().cloned().unwrap_or_default();
    let _guard = init_tracing(&settings);

    if let Err(e) = &loaded {
        tracing::warn!(error = %e, "Failed to load settings, using defaults");
    }

    tracing::info!("Starting Carbon Wise...");

    run_app(settings)?;
    Ok(())
}
