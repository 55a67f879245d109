//! Prometheus metrics and structured logging for the portfolio exporter.
//!
//! Provides:
//! - The gauge registry the poll loop publishes into
//! - The HTTP scrape server (`/metrics`, `/health`)
//! - Structured logging with tracing

pub mod error;
pub mod logging;
pub mod metrics;
pub mod server;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
pub use metrics::PortfolioMetrics;
pub use server::run_server;
