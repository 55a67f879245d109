//! Trading 212 portfolio exporter.
//!
//! Orchestrates the two long-running tasks:
//! - Poll loop: fetch open positions, publish them onto the gauge registry
//! - Scrape server: expose the registry on `/metrics`

pub mod app;
pub mod config;
pub mod error;
pub mod poller;

pub use app::{Application, ShutdownHandle};
pub use config::ExporterConfig;
pub use error::{AppError, AppResult};
