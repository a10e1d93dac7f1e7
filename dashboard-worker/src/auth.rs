//! Coinbase Prime API authentication
//!
//! Every request carries four `x-cb-access-*` headers. The signature is
//! HMAC-SHA256 over `timestamp + METHOD + path + body`, keyed with the
//! signing key and encoded as standard base64.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use worker::Env;

use crate::error::{DashboardError, Result};

type HmacSha256 = Hmac<Sha256>;

pub const ACCESS_KEY_HEADER: &str = "x-cb-access-key";
pub const SIGNATURE_HEADER: &str = "x-cb-access-signature";
pub const TIMESTAMP_HEADER: &str = "x-cb-access-timestamp";
pub const PASSPHRASE_HEADER: &str = "x-cb-access-passphrase";

/// Coinbase Prime API credentials
///
/// Values are trimmed on construction. Blank values are accepted here and
/// rejected when headers are built.
#[derive(Clone)]
pub struct Credentials {
    access_key: String,
    signing_key: String,
    passphrase: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("signing_key", &"<redacted>")
            .field("passphrase", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Read credentials from worker secrets
    ///
    /// Missing secrets become empty strings so the failure surfaces as
    /// `MissingCredentials` when a request is signed.
    pub fn from_env(env: &Env) -> Self {
        let secret = |name: &str| env.secret(name).map(|s| s.to_string()).unwrap_or_default();

        Self::new(
            secret("COINBASE_ACCESS_KEY"),
            secret("COINBASE_SIGNING_KEY"),
            secret("COINBASE_PASSPHRASE"),
        )
    }

    pub fn new(
        access_key: impl Into<String>,
        signing_key: impl Into<String>,
        passphrase: impl Into<String>,
    ) -> Self {
        Self {
            access_key: access_key.into().trim().to_string(),
            signing_key: signing_key.into().trim().to_string(),
            passphrase: passphrase.into().trim().to_string(),
        }
    }

    fn ensure_complete(&self) -> Result<()> {
        if self.access_key.is_empty() || self.signing_key.is_empty() || self.passphrase.is_empty() {
            return Err(DashboardError::MissingCredentials);
        }
        Ok(())
    }
}

/// Authentication headers for a single request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub access_key: String,
    pub signature: String,
    pub timestamp: String,
    pub passphrase: String,
}

impl SignedHeaders {
    /// Header name/value pairs, including the JSON content type
    pub fn pairs(&self) -> [(&'static str, &str); 5] {
        [
            (ACCESS_KEY_HEADER, self.access_key.as_str()),
            (SIGNATURE_HEADER, self.signature.as_str()),
            (TIMESTAMP_HEADER, self.timestamp.as_str()),
            (PASSPHRASE_HEADER, self.passphrase.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    /// Attach these headers to an outgoing request
    pub fn apply(&self, mut request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        for (name, value) in self.pairs() {
            request = request.header(name, value);
        }
        request
    }
}

/// Build signed headers for a request issued now
pub fn build_headers(
    credentials: &Credentials,
    method: &str,
    path: &str,
    body: &str,
) -> Result<SignedHeaders> {
    let timestamp = chrono::Utc::now().timestamp();
    build_headers_at(credentials, timestamp, method, path, body)
}

/// Build signed headers for a fixed Unix timestamp (seconds)
pub fn build_headers_at(
    credentials: &Credentials,
    timestamp: i64,
    method: &str,
    path: &str,
    body: &str,
) -> Result<SignedHeaders> {
    credentials.ensure_complete()?;

    let timestamp = timestamp.to_string();
    let prehash = prehash(&timestamp, method, path, body);
    let signature = sign(&credentials.signing_key, &prehash)?;

    Ok(SignedHeaders {
        access_key: credentials.access_key.clone(),
        signature,
        timestamp,
        passphrase: credentials.passphrase.clone(),
    })
}

/// Message that gets signed: no separators between the parts
pub fn prehash(timestamp: &str, method: &str, path: &str, body: &str) -> String {
    format!("{timestamp}{}{path}{body}", method.to_uppercase())
}

/// Base64 HMAC-SHA256 of `message` keyed with `signing_key`
pub fn sign(signing_key: &str, message: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(signing_key.as_bytes())
        .map_err(|e| DashboardError::Config(format!("Invalid HMAC key: {e}")))?;
    mac.update(message.as_bytes());
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}
