//! Trading 212 Portfolio Exporter - Entry Point
//!
//! Polls the account's open positions and serves them as Prometheus gauges.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use t212_exporter::config::{self, CONFIG_ENV, DEFAULT_CONFIG_PATH};

/// Trading 212 open-positions Prometheus exporter
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via T212_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    t212_telemetry::init_logging()?;

    info!("Starting t212-exporter v{}", env!("CARGO_PKG_VERSION"));

    // Determine config path: CLI arg > T212_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var(CONFIG_ENV).ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    info!(config_path = %config_path, "Loading configuration");
    let config = t212_exporter::ExporterConfig::load(&config_path)?;

    // API key is required before anything binds or polls.
    let api_key = config::load_api_key()?;

    let app = t212_exporter::Application::new(config, api_key)?;
    app.run().await?;

    Ok(())
}
