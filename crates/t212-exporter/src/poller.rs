//! Periodic portfolio poll loop.

use std::sync::Arc;
use std::time::Duration;

use t212_client::PortfolioClient;
use t212_telemetry::PortfolioMetrics;
use tokio::sync::watch;
use tracing::{error, info};

/// Fetch the portfolio once and publish it onto the gauges.
///
/// A failed fetch is logged and the cycle is skipped; previously published
/// gauge values stay visible to scrapers until a later cycle succeeds.
pub async fn poll_once(client: &PortfolioClient, metrics: &PortfolioMetrics) {
    match client.fetch_open_positions().await {
        Ok(positions) => metrics.publish(&positions),
        Err(e) => error!(error = %e, "Error fetching open positions"),
    }
}

/// Run the poll loop until shutdown.
///
/// The first tick fires immediately, then once per interval. Cycles run one
/// at a time on this task, so a slow API response delays the next tick
/// rather than overlapping it.
pub async fn poll_loop(
    client: PortfolioClient,
    metrics: Arc<PortfolioMetrics>,
    interval: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                poll_once(&client, &metrics).await;
            }
            _ = shutdown_rx.changed() => {
                info!("Poll loop stopping");
                break;
            }
        }
    }
}
