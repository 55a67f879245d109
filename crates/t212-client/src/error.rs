//! Client error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("unexpected status code: {0}")]
    UnexpectedStatus(u16),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to decode portfolio response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;
