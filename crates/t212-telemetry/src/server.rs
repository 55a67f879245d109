//! HTTP scrape server implementation using axum.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tracing::{error, info};

use crate::error::TelemetryResult;
use crate::metrics::PortfolioMetrics;

/// Content type of the Prometheus text exposition format.
const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Shared application state for axum handlers.
#[derive(Clone)]
pub struct AppState {
    metrics: Arc<PortfolioMetrics>,
}

impl AppState {
    pub fn new(metrics: Arc<PortfolioMetrics>) -> Self {
        Self { metrics }
    }
}

/// Create the axum router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/metrics", get(get_metrics))
        .route("/health", get(get_health))
        .with_state(state)
}

/// Render all registered gauges in text exposition format.
async fn get_metrics(State(state): State<AppState>) -> Response {
    match state.metrics.render() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, "encoding failed").into_response()
        }
    }
}

/// Liveness probe.
async fn get_health() -> &'static str {
    "ok"
}

/// Run the scrape server until the process exits.
///
/// Scrapes only read gauge state; the poll loop writes it concurrently
/// through the shared registry. A bind failure propagates to the caller,
/// which treats it as fatal.
pub async fn run_server(metrics: Arc<PortfolioMetrics>, port: u16) -> TelemetryResult<()> {
    let app = create_router(AppState::new(metrics));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(port, "Starting metrics scrape server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
