use dashboard_worker::handler;
use dashboard_worker::{CoinGeckoClient, Config, DashboardError, WeatherClient, WeatherSource, dashboard};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config() -> Config {
    Config::from_vars(|_| None).expect("default config")
}

#[tokio::test]
async fn coingecko_snapshot_hits_mock_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .and(query_param("ids", "bitcoin,ethereum"))
        .and(query_param("vs_currencies", "usd"))
        .and(query_param("include_24hr_change", "true"))
        .and(query_param("include_last_updated_at", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bitcoin": {"usd": 65000, "usd_24h_change": 2.5, "last_updated_at": 1_700_000_000},
            "ethereum": {"usd": 3200, "usd_24h_change": -1.2, "last_updated_at": 1_700_000_000}
        })))
        .mount(&server)
        .await;

    let client = CoinGeckoClient::new().with_base_url(server.uri());
    let snapshot = client.snapshot().await.expect("snapshot");
    assert_eq!(snapshot.btc.as_ref().map(|q| q.symbol.as_str()), Some("BTC"));

    let config = config();
    let refresh = dashboard::refresh_action("crypto");
    let html = handler::card(&client, |slot| dashboard::crypto_card(slot, &config.location, &refresh)).await;
    assert!(html.contains("$65,000.00"));
    assert!(html.contains("2.50%"));
    assert!(html.contains("$3,200.00"));
    assert!(html.contains("-1.20%"));
}

#[tokio::test]
async fn coingecko_rate_limit_surfaces_as_remote_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Throttled"))
        .mount(&server)
        .await;

    let client = CoinGeckoClient::new().with_base_url(server.uri());
    let err = client.snapshot().await.unwrap_err();
    assert!(matches!(err, DashboardError::RemoteApi { .. }));

    let config = config();
    let html = handler::card(&client, |slot| {
        dashboard::crypto_card(slot, &config.location, &dashboard::refresh_action("crypto"))
    })
    .await;
    assert!(html.contains("card-error"));
    assert!(html.contains("Throttled"));
}

#[tokio::test]
async fn weather_proxy_relays_upstream_json() {
    let server = MockServer::start().await;
    let body = json!({"main": {"temp": 24.7}, "weather": [{"main": "Clear", "description": "clear sky"}]});
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "24.4539"))
        .and(query_param("lon", "54.3773"))
        .and(query_param("units", "imperial"))
        .and(query_param("appid", "weather-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .mount(&server)
        .await;

    let client = WeatherClient::new("weather-key").with_base_url(server.uri());
    let reply = handler::weather(&client, Some("24.4539"), Some("54.3773")).await;

    assert_eq!(reply.status, 200);
    assert_eq!(reply.body, body);
}

#[tokio::test]
async fn weather_card_renders_rounded_temperature() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "main": {"temp": 24.7},
            "weather": [{"main": "Clear", "description": "clear sky"}]
        })))
        .mount(&server)
        .await;

    let config = config();
    let source = WeatherSource {
        client: WeatherClient::new("weather-key").with_base_url(server.uri()),
        location: config.location.clone(),
    };
    let refresh = dashboard::refresh_action("weather");
    let html = handler::card(&source, |slot| dashboard::weather_card(slot, &config.location, &refresh)).await;

    assert!(html.contains("25°F"));
    assert!(html.contains("clear sky"));
    assert!(html.contains(dashboard::weather_icon("Clear")));
    assert!(html.contains("Abu Dhabi"));
}

#[tokio::test]
async fn weather_upstream_failure_is_a_500() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"cod":401,"message":"Invalid API key"}"#))
        .mount(&server)
        .await;

    let client = WeatherClient::new("bad-key").with_base_url(server.uri());
    let reply = handler::weather(&client, Some("24.4539"), Some("54.3773")).await;

    assert_eq!(reply.status, 500);
    assert!(reply.body["error"].as_str().unwrap_or_default().contains("Invalid API key"));
}
