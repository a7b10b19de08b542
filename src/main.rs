//! Solar Dashboard - Main Entry Point
//!
//! Runs the dashboard headless against the simulated gateway. An optional
//! first argument names the configuration file.

use std::path::PathBuf;

use anyhow::Context;
use solar_dashboard::app::application::run_headless;
use solar_dashboard::utils::config_store::load_config_or_default;

fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting Solar Dashboard...");

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = load_config_or_default(config_path.as_deref())
        .context("Failed to load configuration")?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;
    runtime.block_on(run_headless(config))?;
    Ok(())
}
