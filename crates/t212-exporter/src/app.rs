//! Main application orchestration.
//!
//! Owns the gauge registry and wires the two tasks together:
//! - Scrape server on the configured metrics port
//! - Poll loop fetching the portfolio on a fixed interval

use std::sync::Arc;
use std::time::Duration;

use t212_client::PortfolioClient;
use t212_telemetry::PortfolioMetrics;
use tokio::sync::watch;
use tracing::info;

use crate::config::ExporterConfig;
use crate::error::{AppError, AppResult};
use crate::poller;

/// Handle for requesting application shutdown.
///
/// Exists for tests and embedding; the binary itself only stops on ctrl-c.
#[derive(Clone)]
pub struct ShutdownHandle {
    tx: watch::Sender<bool>,
}

impl ShutdownHandle {
    /// Stop the poll loop and unblock `Application::run`.
    pub fn shutdown(&self) {
        let _ = self.tx.send(true);
    }
}

/// Main application.
pub struct Application {
    config: ExporterConfig,
    client: PortfolioClient,
    metrics: Arc<PortfolioMetrics>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl Application {
    /// Create a new application.
    ///
    /// # Arguments
    /// * `config` - Exporter configuration
    /// * `api_key` - Trading 212 API key (validated non-empty by the caller)
    pub fn new(config: ExporterConfig, api_key: String) -> AppResult<Self> {
        let client = PortfolioClient::new(&config.base_url, api_key)?;
        let metrics = Arc::new(PortfolioMetrics::new()?);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Ok(Self {
            config,
            client,
            metrics,
            shutdown_tx,
            shutdown_rx,
        })
    }

    /// Shared gauge registry.
    pub fn metrics(&self) -> Arc<PortfolioMetrics> {
        self.metrics.clone()
    }

    /// Handle that stops `run` from another task.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            tx: self.shutdown_tx.clone(),
        }
    }

    /// Run the exporter until ctrl-c, shutdown request, or fatal server error.
    pub async fn run(self) -> AppResult<()> {
        info!(
            base_url = %self.config.base_url,
            poll_interval_secs = self.config.poll_interval_secs,
            metrics_port = self.config.telemetry.metrics_port,
            "Starting exporter"
        );

        // Scrape server task. An early exit here is always an error: either
        // the port bind failed or the listener died underneath us.
        let server_metrics = self.metrics.clone();
        let metrics_port = self.config.telemetry.metrics_port;
        let mut server_handle = tokio::spawn(async move {
            t212_telemetry::run_server(server_metrics, metrics_port).await
        });

        // Poll loop task: first cycle immediately, then once per interval.
        let poll_handle = tokio::spawn(poller::poll_loop(
            self.client,
            self.metrics.clone(),
            Duration::from_secs(self.config.poll_interval_secs),
            self.shutdown_rx.clone(),
        ));

        let mut shutdown_rx = self.shutdown_rx.clone();
        let result = tokio::select! {
            result = &mut server_handle => match result {
                Ok(Ok(())) => Err(AppError::Server(
                    "metrics server exited unexpectedly".to_string(),
                )),
                Ok(Err(e)) => Err(AppError::Telemetry(e)),
                Err(e) => Err(AppError::Server(format!("server task failed: {e}"))),
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                Ok(())
            }
            _ = shutdown_rx.changed() => {
                info!("Shutdown requested");
                Ok(())
            }
        };

        // Cleanup
        let _ = self.shutdown_tx.send(true);
        let _ = poll_handle.await;
        server_handle.abort();

        result
    }
}
