//! Configuration management for the dashboard

use std::time::Duration;

use chrono_tz::Tz;
use worker::Env;

use crate::error::{DashboardError, Result};

/// Where the weather card points and which clocks it shows
#[derive(Debug, Clone)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub home_tz: Tz,
    pub home_label: String,
    pub reference_tz: Tz,
    pub reference_label: String,
}

/// Auto-refresh cadence per card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshIntervals {
    pub weather: Duration,
    pub crypto: Duration,
    pub portfolios: Duration,
}

impl Default for RefreshIntervals {
    fn default() -> Self {
        Self {
            weather: Duration::from_secs(60),
            crypto: Duration::from_secs(30),
            portfolios: Duration::from_secs(60),
        }
    }
}

/// Dashboard configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment (production, staging, development)
    pub environment: String,

    pub location: Location,
    pub refresh: RefreshIntervals,

    /// Upstream base URLs, overridable for staging and tests
    pub prime_base_url: String,
    pub coingecko_base_url: String,
    pub weather_base_url: String,
}

impl Config {
    /// Load configuration from Cloudflare environment variables
    pub fn from_env(env: &Env) -> Result<Self> {
        Self::from_vars(|key| env.var(key).ok().map(|v| v.to_string()))
    }

    /// Load configuration from any key/value lookup
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let text = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());
        let number = |key: &str, default: f64| {
            var(key).and_then(|v| v.trim().parse().ok()).unwrap_or(default)
        };
        let seconds = |key: &str, default: u64| {
            Duration::from_secs(var(key).and_then(|v| v.trim().parse().ok()).unwrap_or(default))
        };

        let config = Self {
            environment: text("ENVIRONMENT", "production"),

            location: Location {
                name: text("LOCATION_NAME", "Abu Dhabi"),
                latitude: number("LATITUDE", 24.4539),
                longitude: number("LONGITUDE", 54.3773),
                home_tz: parse_tz(&text("HOME_TIMEZONE", "Asia/Dubai"))?,
                home_label: text("HOME_TIMEZONE_LABEL", "Abu Dhabi (GST)"),
                reference_tz: parse_tz(&text("REFERENCE_TIMEZONE", "America/New_York"))?,
                reference_label: text("REFERENCE_TIMEZONE_LABEL", "New York (EST)"),
            },

            refresh: RefreshIntervals {
                weather: seconds("WEATHER_REFRESH_SECONDS", 60),
                crypto: seconds("CRYPTO_REFRESH_SECONDS", 30),
                portfolios: seconds("PORTFOLIO_REFRESH_SECONDS", 60),
            },

            prime_base_url: text("PRIME_API_BASE_URL", "https://api.prime.coinbase.com"),
            coingecko_base_url: text("COINGECKO_API_BASE_URL", "https://api.coingecko.com/api/v3"),
            weather_base_url: text("WEATHER_API_BASE_URL", "https://api.openweathermap.org/data/2.5"),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let RefreshIntervals { weather, crypto, portfolios } = self.refresh;
        if weather.is_zero() || crypto.is_zero() || portfolios.is_zero() {
            return Err(DashboardError::Config("refresh intervals must be positive".into()));
        }
        if !(-90.0..=90.0).contains(&self.location.latitude) {
            return Err(DashboardError::Config("LATITUDE must be within -90..90".into()));
        }
        if !(-180.0..=180.0).contains(&self.location.longitude) {
            return Err(DashboardError::Config("LONGITUDE must be within -180..180".into()));
        }
        Ok(())
    }
}

fn parse_tz(name: &str) -> Result<Tz> {
    name.trim()
        .parse()
        .map_err(|_| DashboardError::Config(format!("Unknown time zone: {name}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_config_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.environment, "production");
        assert_eq!(config.location.name, "Abu Dhabi");
        assert_eq!(config.location.home_tz, chrono_tz::Asia::Dubai);
        assert_eq!(config.location.reference_tz, chrono_tz::America::New_York);
        assert_eq!(config.refresh, RefreshIntervals::default());
        assert_eq!(config.prime_base_url, "https://api.prime.coinbase.com");
    }

    #[test]
    fn test_config_overrides() {
        let config = load(&[
            ("LOCATION_NAME", "Lisbon"),
            ("LATITUDE", "38.72"),
            ("LONGITUDE", "-9.14"),
            ("HOME_TIMEZONE", "Europe/Lisbon"),
            ("CRYPTO_REFRESH_SECONDS", "10"),
        ])
        .unwrap();
        assert_eq!(config.location.name, "Lisbon");
        assert!((config.location.longitude + 9.14).abs() < 1e-9);
        assert_eq!(config.location.home_tz, chrono_tz::Europe::Lisbon);
        assert_eq!(config.refresh.crypto, Duration::from_secs(10));
        assert_eq!(config.refresh.weather, Duration::from_secs(60));
    }

    #[test]
    fn test_config_rejects_bad_values() {
        assert!(matches!(
            load(&[("HOME_TIMEZONE", "Mars/Olympus")]),
            Err(DashboardError::Config(_))
        ));
        assert!(load(&[("WEATHER_REFRESH_SECONDS", "0")]).is_err());
        assert!(load(&[("LATITUDE", "120")]).is_err());
    }
}
