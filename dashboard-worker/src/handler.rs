//! Request handlers behind the worker routes
//!
//! Handlers never fail: every error is turned into a [`Reply`] carrying
//! `{ "error": message }`, so the router only has to serialize it.

use std::cell::RefCell;

use crate::auth::SignedHeaders;
use crate::client::{PORTFOLIOS_PATH, PrimeClient};
use crate::controller::{DataSource, Slot, run_cycle};
use crate::error::{DashboardError, Result};
use crate::feeds::WeatherClient;

/// Status and JSON body for a route
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: serde_json::Value,
}

impl Reply {
    pub fn ok(body: serde_json::Value) -> Self {
        Self { status: 200, body }
    }

    pub fn failure(status: u16, err: &DashboardError) -> Self {
        Self {
            status,
            body: err.to_body(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// `GET /api/coinbase/portfolios`
///
/// Relays the upstream JSON verbatim; any failure is a 500.
pub async fn portfolios(client: &PrimeClient) -> Reply {
    match client.sign_get(PORTFOLIOS_PATH) {
        Ok(headers) => signed_portfolios(client, &headers).await,
        Err(e) => Reply::failure(500, &e),
    }
}

/// Same as [`portfolios`] with headers the caller has already built
pub async fn signed_portfolios(client: &PrimeClient, headers: &SignedHeaders) -> Reply {
    match client.send_get(PORTFOLIOS_PATH, headers).await {
        Ok(body) => Reply::ok(body),
        Err(e) => Reply::failure(500, &e),
    }
}

/// `GET /api/weather?lat=&lon=`
pub async fn weather(client: &WeatherClient, lat: Option<&str>, lon: Option<&str>) -> Reply {
    let (latitude, longitude) = match parse_coordinates(lat, lon) {
        Ok(coordinates) => coordinates,
        Err(e) => return Reply::failure(400, &e),
    };

    match client.current_raw(latitude, longitude).await {
        Ok(body) => Reply::ok(body),
        Err(e) => Reply::failure(500, &e),
    }
}

/// Parse `lat`/`lon` query values
pub fn parse_coordinates(lat: Option<&str>, lon: Option<&str>) -> Result<(f64, f64)> {
    let parse = |name: &str, value: Option<&str>, limit: f64| -> Result<f64> {
        let value = value
            .ok_or_else(|| DashboardError::Config(format!("missing query parameter `{name}`")))?;
        let number: f64 = value
            .trim()
            .parse()
            .map_err(|_| DashboardError::Config(format!("invalid `{name}`: {value}")))?;
        if !(-limit..=limit).contains(&number) {
            return Err(DashboardError::Config(format!("`{name}` out of range: {value}")));
        }
        Ok(number)
    };

    Ok((parse("lat", lat, 90.0)?, parse("lon", lon, 180.0)?))
}

/// Run one fetch cycle against `source` and render the resulting slot
pub async fn card<S, F>(source: &S, render: F) -> String
where
    S: DataSource,
    F: FnOnce(&Slot<S::Data>) -> String,
{
    let slot = RefCell::new(Slot::default());
    run_cycle(&slot, source.fetch()).await;
    render(&slot.into_inner())
}
