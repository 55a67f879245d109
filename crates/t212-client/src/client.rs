//! HTTP client for the Trading 212 equity portfolio endpoint.

use crate::error::{ClientError, ClientResult};
use crate::position::Position;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use tracing::{debug, info};

/// Path of the open-positions endpoint, relative to the API base URL.
const PORTFOLIO_PATH: &str = "/api/v0/equity/portfolio";

/// Client for fetching the account's open positions.
///
/// Holds the static bearer key for the lifetime of the process. Requests
/// carry no timeout; a poll cycle blocks until the API answers, and the
/// caller is expected to tolerate that. No retries.
pub struct PortfolioClient {
    /// HTTP client.
    client: Client,
    /// API base URL (e.g., "https://live.trading212.com").
    base_url: String,
    /// API key sent as the Authorization header value.
    api_key: String,
}

impl PortfolioClient {
    /// Create a new portfolio client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the Trading 212 API
    /// * `api_key` - Account API key (used as-is in the Authorization header)
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> ClientResult<Self> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Fetch the list of open positions.
    ///
    /// Returns the decoded array on HTTP 200. Any other status is an
    /// `UnexpectedStatus` error naming the code; network and decode failures
    /// propagate as-is.
    pub async fn fetch_open_positions(&self) -> ClientResult<Vec<Position>> {
        let url = format!("{}{}", self.base_url, PORTFOLIO_PATH);
        debug!(url = %url, "Fetching open positions");

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ClientError::UnexpectedStatus(status.as_u16()));
        }

        let body = response.text().await?;
        let positions: Vec<Position> = serde_json::from_str(&body)?;

        info!(count = positions.len(), "Fetched open positions");

        Ok(positions)
    }
}
