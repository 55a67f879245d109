//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Client error: {0}")]
    Client(#[from] t212_client::ClientError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] t212_telemetry::TelemetryError),

    #[error("Metrics server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
