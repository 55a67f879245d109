//! Trading 212 REST client.
//!
//! Fetches the account's open positions from the equity portfolio endpoint
//! for republishing as Prometheus gauges.

pub mod client;
pub mod error;
pub mod position;

pub use client::PortfolioClient;
pub use error::{ClientError, ClientResult};
pub use position::Position;
