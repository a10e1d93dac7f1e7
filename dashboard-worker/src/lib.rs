//! Dashboard Worker - personal weather, crypto and portfolio dashboard
//!
//! Runs on Cloudflare Workers.
//!
//! # Architecture
//! - Main entry point routes HTTP requests
//! - Coinbase Prime client signs every request with HMAC-SHA256
//! - Cards are rendered on the worker and polled by the page
//!
//! # Routes
//! - `/`, `/dashboard`: the page
//! - `/api/coinbase/portfolios`: signed Coinbase Prime portfolio listing
//! - `/api/weather?lat=&lon=`: current weather proxy
//! - `/cards/{weather,crypto,portfolios}`: rendered card fragments
//! - `/health`: liveness and config check

#![allow(clippy::cast_possible_truncation)] // Rounded temperatures fit i64
#![allow(clippy::doc_markdown)] // Doc style flexibility
#![allow(clippy::needless_pass_by_value)] // Worker framework patterns

mod auth;
mod client;
mod config;
mod controller;
pub mod dashboard;
mod error;
mod feeds;
mod format;
pub mod handler;
mod types;

use worker::{Context, Env, Request, Response, Router, console_error, console_log, event};

pub use auth::{Credentials, SignedHeaders, build_headers, build_headers_at, prehash, sign};
pub use client::{PORTFOLIOS_PATH, PrimeClient};
pub use config::{Config, Location, RefreshIntervals};
pub use controller::{DataSource, MountedPage, PageController, Slot, Timer, run_cycle};
pub use error::{DashboardError, Result};
pub use feeds::{CoinGeckoClient, WeatherClient, WeatherSource};
pub use format::{format_change, format_date, format_time, format_usd, round_half_up};
pub use types::*;

/// Result type alias for worker operations
type WResult<T> = std::result::Result<T, worker::Error>;

/// Main Worker entry point
#[event(fetch)]
async fn fetch(req: Request, env: Env, _ctx: Context) -> WResult<Response> {
    console_error_panic_hook::set_once();

    let router = Router::new();

    router
        // Health check
        .get_async("/health", |_req, ctx| async move {
            let config = match Config::from_env(&ctx.env) {
                Ok(c) => c,
                Err(e) => return Response::error(format!("Config error: {e}"), 500),
            };

            Response::from_json(&serde_json::json!({
                "status": "healthy",
                "version": env!("CARGO_PKG_VERSION"),
                "environment": config.environment,
                "timestamp": chrono::Utc::now().to_rfc3339(),
            }))
        })
        // Dashboard UI
        .get_async("/", |_req, ctx| async move { page(&ctx.env) })
        .get_async("/dashboard", |_req, ctx| async move { page(&ctx.env) })
        // Coinbase Prime portfolios, relayed verbatim
        .get_async("/api/coinbase/portfolios", |_req, ctx| async move {
            let config = match Config::from_env(&ctx.env) {
                Ok(c) => c,
                Err(e) => return respond(&handler::Reply::failure(500, &e)),
            };
            let client = PrimeClient::new(Credentials::from_env(&ctx.env))
                .with_base_url(&config.prime_base_url);

            let reply = match client.sign_get(PORTFOLIOS_PATH) {
                Ok(headers) => {
                    console_log!(
                        "GET {}{} signed at {} (signature {} chars)",
                        config.prime_base_url,
                        PORTFOLIOS_PATH,
                        headers.timestamp,
                        headers.signature.len()
                    );
                    handler::signed_portfolios(&client, &headers).await
                }
                Err(e) => handler::Reply::failure(500, &e),
            };
            if reply.is_success() {
                console_log!("Coinbase portfolios fetched");
            } else {
                console_error!("Coinbase API error: {}", reply.body["error"]);
            }
            respond(&reply)
        })
        // Current weather proxy
        .get_async("/api/weather", |req, ctx| async move {
            let config = match Config::from_env(&ctx.env) {
                Ok(c) => c,
                Err(e) => return respond(&handler::Reply::failure(500, &e)),
            };
            let url = req.url()?;
            let query = |name: &str| {
                url.query_pairs()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| value.into_owned())
            };

            let reply = handler::weather(
                &weather_client(&ctx.env, &config),
                query("lat").as_deref(),
                query("lon").as_deref(),
            )
            .await;
            if !reply.is_success() {
                console_error!("Weather error: {}", reply.body["error"]);
            }
            respond(&reply)
        })
        // Card fragments
        .get_async("/cards/weather", |_req, ctx| async move {
            card_response("weather", weather_card(&ctx.env).await)
        })
        .get_async("/cards/crypto", |_req, ctx| async move {
            card_response("crypto", crypto_card(&ctx.env).await)
        })
        .get_async("/cards/portfolios", |_req, ctx| async move {
            card_response("portfolios", portfolio_card(&ctx.env).await)
        })
        // Fallback
        .run(req, env)
        .await
}

fn page(env: &Env) -> WResult<Response> {
    match Config::from_env(env) {
        Ok(config) => Response::from_html(dashboard::dashboard_html(&config.refresh)),
        Err(e) => Response::error(format!("Config error: {e}"), 500),
    }
}

fn respond(reply: &handler::Reply) -> WResult<Response> {
    Ok(Response::from_json(&reply.body)?.with_status(reply.status))
}

fn card_response(card: &str, html: std::result::Result<String, DashboardError>) -> WResult<Response> {
    match html {
        Ok(html) => Response::from_html(html),
        Err(e) => {
            console_error!("Card {} failed: {}", card, e);
            Response::from_html(dashboard::error_card(&e.to_string()))
        }
    }
}

fn weather_client(env: &Env, config: &Config) -> WeatherClient {
    let api_key = env
        .secret("OPENWEATHER_API_KEY")
        .map(|s| s.to_string())
        .unwrap_or_default();
    WeatherClient::new(api_key).with_base_url(&config.weather_base_url)
}

/// Weather card after one fetch
async fn weather_card(env: &Env) -> std::result::Result<String, DashboardError> {
    let config = Config::from_env(env)?;
    let source = WeatherSource {
        client: weather_client(env, &config),
        location: config.location.clone(),
    };

    Ok(handler::card(&source, |slot| {
        dashboard::weather_card(slot, &config.location, &dashboard::refresh_action("weather"))
    })
    .await)
}

/// Crypto card after one fetch
async fn crypto_card(env: &Env) -> std::result::Result<String, DashboardError> {
    let config = Config::from_env(env)?;
    let source = CoinGeckoClient::new().with_base_url(&config.coingecko_base_url);

    Ok(handler::card(&source, |slot| {
        dashboard::crypto_card(slot, &config.location, &dashboard::refresh_action("crypto"))
    })
    .await)
}

/// Portfolio card after one fetch
async fn portfolio_card(env: &Env) -> std::result::Result<String, DashboardError> {
    let config = Config::from_env(env)?;
    let source = PrimeClient::new(Credentials::from_env(env)).with_base_url(&config.prime_base_url);

    Ok(handler::card(&source, |slot| {
        dashboard::portfolio_card(slot, &dashboard::refresh_action("portfolios"))
    })
    .await)
}
