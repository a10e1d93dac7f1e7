//! Public data feeds: OpenWeatherMap current weather and CoinGecko prices
//!
//! Also wires every upstream client into the page controller as a
//! [`DataSource`].

use chrono::{DateTime, Utc};

use crate::client::{PrimeClient, read_json};
use crate::config::Location;
use crate::controller::DataSource;
use crate::error::{DashboardError, Result};
use crate::format::{format_date, format_time, round_half_up};
use crate::types::{
    CryptoSnapshot, PortfolioList, SimplePriceResponse, WeatherReading, WeatherSnapshot,
};

const COINGECKO_API_BASE: &str = "https://api.coingecko.com/api/v3";
const WEATHER_API_BASE: &str = "https://api.openweathermap.org/data/2.5";

/// CoinGecko simple price client for BTC and ETH in USD
pub struct CoinGeckoClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for CoinGeckoClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CoinGeckoClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: COINGECKO_API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Current prices, 24h change and update time
    pub async fn snapshot(&self) -> Result<CryptoSnapshot> {
        let url = format!(
            "{}/simple/price?ids=bitcoin,ethereum&vs_currencies=usd&include_24hr_change=true&include_last_updated_at=true",
            self.base_url
        );
        let response = self.client.get(&url).send().await?;
        let prices: SimplePriceResponse = read_json(response).await?;
        Ok(prices.into())
    }
}

/// OpenWeatherMap current conditions client (imperial units)
pub struct WeatherClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: WEATHER_API_BASE.to_string(),
            api_key: api_key.into().trim().to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Current weather as the raw upstream JSON
    pub async fn current_raw(&self, latitude: f64, longitude: f64) -> Result<serde_json::Value> {
        if self.api_key.is_empty() {
            return Err(DashboardError::Config("OPENWEATHER_API_KEY secret not set".into()));
        }
        let url = format!(
            "{}/weather?lat={latitude}&lon={longitude}&units=imperial&appid={}",
            self.base_url, self.api_key
        );
        let response = self.client.get(&url).send().await?;
        read_json(response).await
    }

    pub async fn current(&self, latitude: f64, longitude: f64) -> Result<WeatherReading> {
        let value = self.current_raw(latitude, longitude).await?;
        Ok(serde_json::from_value(value)?)
    }
}

impl WeatherSnapshot {
    /// Card contents for `reading` as seen at `now`
    pub fn from_reading(
        location: &Location,
        reading: &WeatherReading,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let condition = reading
            .weather
            .first()
            .ok_or_else(|| DashboardError::Fetch("weather response has no conditions".into()))?;

        Ok(Self {
            location: location.name.clone(),
            temperature: round_half_up(reading.main.temp),
            condition: condition.main.clone(),
            description: condition.description.clone(),
            date: format_date(now, location.home_tz),
            home_time: format_time(now, location.home_tz),
            reference_time: format_time(now, location.reference_tz),
        })
    }
}

/// Weather for one configured location
pub struct WeatherSource {
    pub client: WeatherClient,
    pub location: Location,
}

impl DataSource for WeatherSource {
    type Data = WeatherSnapshot;

    async fn fetch(&self) -> Result<WeatherSnapshot> {
        let reading = self
            .client
            .current(self.location.latitude, self.location.longitude)
            .await?;
        WeatherSnapshot::from_reading(&self.location, &reading, Utc::now())
    }
}

impl DataSource for CoinGeckoClient {
    type Data = CryptoSnapshot;

    async fn fetch(&self) -> Result<CryptoSnapshot> {
        self.snapshot().await
    }
}

impl DataSource for PrimeClient {
    type Data = PortfolioList;

    async fn fetch(&self) -> Result<PortfolioList> {
        self.portfolios().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use chrono::TimeZone;

    fn reading(body: &str) -> WeatherReading {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_weather_snapshot_from_reading() {
        let config = Config::from_vars(|_| None).unwrap();
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let snapshot = WeatherSnapshot::from_reading(
            &config.location,
            &reading(r#"{"main":{"temp":24.7},"weather":[{"main":"Clear","description":"clear sky"}]}"#),
            now,
        )
        .unwrap();

        assert_eq!(snapshot.location, "Abu Dhabi");
        assert_eq!(snapshot.temperature, 25);
        assert_eq!(snapshot.condition, "Clear");
        assert_eq!(snapshot.description, "clear sky");
        assert_eq!(snapshot.date, "Nov 15, 2023");
        assert_eq!(snapshot.home_time, "02:13 AM");
        assert_eq!(snapshot.reference_time, "05:13 PM");
    }

    #[test]
    fn test_weather_without_conditions_is_an_error() {
        let config = Config::from_vars(|_| None).unwrap();
        let result = WeatherSnapshot::from_reading(
            &config.location,
            &reading(r#"{"main":{"temp":70.0},"weather":[]}"#),
            Utc::now(),
        );
        assert!(matches!(result, Err(DashboardError::Fetch(_))));
    }

    #[tokio::test]
    async fn test_weather_requires_api_key() {
        let client = WeatherClient::new("  ");
        let result = client.current_raw(24.4539, 54.3773).await;
        assert!(matches!(result, Err(DashboardError::Config(_))));
    }
}
