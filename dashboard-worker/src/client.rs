//! Coinbase Prime API client
//!
//! Only the portfolio listing is needed by the dashboard. Responses are kept
//! as raw JSON so the portfolio endpoint can relay them untouched.

use serde::de::DeserializeOwned;

use crate::auth::{self, Credentials, SignedHeaders};
use crate::error::{DashboardError, Result};
use crate::types::PortfolioList;

const BASE_URL: &str = "https://api.prime.coinbase.com";
pub const PORTFOLIOS_PATH: &str = "/v1/portfolios";

/// Coinbase Prime API client
pub struct PrimeClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl PrimeClient {
    /// Create new client with authentication
    pub fn new(credentials: Credentials) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: BASE_URL.to_string(),
            credentials,
        }
    }

    /// Point the client at another host (staging, mock servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Get all portfolios as the raw upstream JSON
    pub async fn portfolios_raw(&self) -> Result<serde_json::Value> {
        let headers = self.sign_get(PORTFOLIOS_PATH)?;
        self.send_get(PORTFOLIOS_PATH, &headers).await
    }

    /// Get all portfolios
    pub async fn portfolios(&self) -> Result<PortfolioList> {
        let value = self.portfolios_raw().await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Headers the next GET to `path` would carry
    pub fn sign_get(&self, path: &str) -> Result<SignedHeaders> {
        auth::build_headers(&self.credentials, "GET", path, "")
    }

    /// GET `path` carrying headers already signed for it
    pub async fn send_get<T: DeserializeOwned>(&self, path: &str, headers: &SignedHeaders) -> Result<T> {
        let url = format!("{}{path}", self.base_url);

        let response = headers.apply(self.client.get(&url)).send().await?;

        read_json(response).await
    }
}

/// Check the status, then parse the body as JSON
///
/// A non-success status turns the body text into `RemoteApi`.
pub async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(DashboardError::RemoteApi { status, body });
    }

    serde_json::from_str(&body).map_err(DashboardError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let client = PrimeClient::new(Credentials::new("k", "s", "p"))
            .with_base_url("http://127.0.0.1:9000/");
        assert_eq!(client.base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_sign_get_requires_credentials() {
        let client = PrimeClient::new(Credentials::new("", "", ""));
        assert!(matches!(
            client.sign_get(PORTFOLIOS_PATH),
            Err(DashboardError::MissingCredentials)
        ));
    }
}
