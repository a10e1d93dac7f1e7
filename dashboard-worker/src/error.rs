//! Error types for the dashboard
//!
//! Uses thiserror for ergonomic error definitions.
//! Every error ends up at a handler boundary as a `{ "error": message }` body.

use reqwest::StatusCode;
use thiserror::Error;

/// Custom Result type using our Error
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Dashboard errors
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Access key, signing key or passphrase is absent or blank
    #[error("Missing required Coinbase credentials")]
    MissingCredentials,

    /// Upstream answered with a non-success status
    #[error("API Error: {status} - {body}")]
    RemoteApi { status: StatusCode, body: String },

    /// Network failures
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Worker runtime errors
    #[error("Worker error: {0}")]
    Worker(String),
}

impl DashboardError {
    /// JSON body returned to the browser for this error
    pub fn to_body(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.to_string() })
    }
}

impl From<worker::Error> for DashboardError {
    fn from(err: worker::Error) -> Self {
        DashboardError::Worker(err.to_string())
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        DashboardError::Fetch(err.to_string())
    }
}

impl From<DashboardError> for worker::Error {
    fn from(err: DashboardError) -> Self {
        worker::Error::RustError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_api_display_carries_status_and_body() {
        let err = DashboardError::RemoteApi {
            status: StatusCode::UNAUTHORIZED,
            body: r#"{"message":"invalid signature"}"#.to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("401 Unauthorized"));
        assert!(msg.contains("invalid signature"));
    }

    #[test]
    fn test_error_body_shape() {
        let body = DashboardError::MissingCredentials.to_body();
        assert_eq!(body["error"], "Missing required Coinbase credentials");
        assert_eq!(body.as_object().map(serde_json::Map::len), Some(1));
    }

    #[test]
    fn test_error_conversion() {
        let json_err = serde_json::from_str::<i32>("invalid").unwrap_err();
        let err: DashboardError = json_err.into();
        assert!(matches!(err, DashboardError::Json(_)));
    }
}
