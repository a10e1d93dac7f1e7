//! Common types for the dashboard
//!
//! Snapshots are replaced wholesale on every fetch; nothing here is merged.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions as returned by the weather API
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherReading {
    pub main: WeatherMain,
    pub weather: Vec<WeatherCondition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherMain {
    pub temp: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherCondition {
    pub main: String,
    pub description: String,
}

/// Weather card contents
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub location: String,
    /// Degrees Fahrenheit, already rounded
    pub temperature: i64,
    pub condition: String,
    pub description: String,
    /// Date in the home time zone, e.g. `Oct 18, 2026`
    pub date: String,
    /// Time in the home time zone, e.g. `03:05 PM`
    pub home_time: String,
    pub reference_time: String,
}

/// Per-asset entry of the CoinGecko simple price response
#[derive(Debug, Clone, Deserialize)]
pub struct SimplePrice {
    pub usd: f64,
    #[serde(default)]
    pub usd_24h_change: f64,
    #[serde(default)]
    pub last_updated_at: i64,
}

/// CoinGecko `/simple/price` response for the two tracked assets
#[derive(Debug, Clone, Deserialize)]
pub struct SimplePriceResponse {
    pub bitcoin: Option<SimplePrice>,
    pub ethereum: Option<SimplePrice>,
}

/// One row of the crypto card
#[derive(Debug, Clone, PartialEq)]
pub struct CryptoQuote {
    pub symbol: String,
    pub price: f64,
    pub change_24h: f64,
    pub last_updated: DateTime<Utc>,
}

impl CryptoQuote {
    fn from_simple(symbol: &str, price: &SimplePrice) -> Self {
        Self {
            symbol: symbol.to_string(),
            price: price.usd,
            change_24h: price.usd_24h_change,
            last_updated: Utc
                .timestamp_opt(price.last_updated_at, 0)
                .single()
                .unwrap_or_default(),
        }
    }

    pub fn is_positive(&self) -> bool {
        self.change_24h >= 0.0
    }
}

/// Crypto card contents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CryptoSnapshot {
    pub btc: Option<CryptoQuote>,
    pub eth: Option<CryptoQuote>,
}

impl CryptoSnapshot {
    pub fn is_empty(&self) -> bool {
        self.btc.is_none() && self.eth.is_none()
    }

    /// Quotes in display order
    pub fn quotes(&self) -> impl Iterator<Item = &CryptoQuote> {
        self.btc.iter().chain(self.eth.iter())
    }
}

impl From<SimplePriceResponse> for CryptoSnapshot {
    fn from(response: SimplePriceResponse) -> Self {
        Self {
            btc: response.bitcoin.as_ref().map(|p| CryptoQuote::from_simple("BTC", p)),
            eth: response.ethereum.as_ref().map(|p| CryptoQuote::from_simple("ETH", p)),
        }
    }
}

/// A Coinbase Prime portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub entity_id: String,
    #[serde(default)]
    pub organization_id: String,
}

/// `GET /v1/portfolios` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioList {
    #[serde(default)]
    pub portfolios: Vec<Portfolio>,
}
