//! Dashboard module - personal dashboard web interface
//!
//! A single page with three cards: weather, crypto prices and Coinbase Prime
//! portfolios. Cards are rendered on the worker and swapped in by the page
//! script.
//!
//! # Architecture
//! - `cards.rs`: pure card renderers (loading / error / empty / data)
//! - `html.rs`: page structure and layout
//! - `css.rs`: styling with CSS custom properties
//! - `js.rs`: per-card polling and manual refresh

mod cards;
mod css;
mod html;
mod js;

use std::time::Duration;

pub use cards::{LOADING_CARD, crypto_card, error_card, portfolio_card, weather_card, weather_icon};

use crate::config::RefreshIntervals;

/// `onclick` handler for a card's refresh button
pub fn refresh_action(card: &str) -> String {
    format!("refreshCard('{card}')")
}

fn millis(period: Duration) -> u64 {
    u64::try_from(period.as_millis()).unwrap_or(u64::MAX)
}

/// Generate the complete dashboard HTML page
pub fn dashboard_html(refresh: &RefreshIntervals) -> String {
    let client_config = serde_json::json!({
        "cards": {
            "weather": millis(refresh.weather),
            "crypto": millis(refresh.crypto),
            "portfolios": millis(refresh.portfolios),
        },
        "loadingCard": LOADING_CARD,
    });

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Dashboard</title>
    <style>
{css}
    </style>
</head>
<body>
{html}
    <script>
const CONFIG = {client_config};
{js}
    </script>
</body>
</html>"#,
        css = css::STYLES,
        html = html::TEMPLATE.replace("{loading}", LOADING_CARD),
        js = js::SCRIPT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_starts_every_card_loading() {
        let page = dashboard_html(&RefreshIntervals::default());
        for id in ["weather-card", "crypto-card", "portfolios-card"] {
            let slot = format!(r#"<section id="{id}">{LOADING_CARD}</section>"#);
            assert!(page.contains(&slot), "missing loading slot for {id}");
        }
    }

    #[test]
    fn test_page_carries_refresh_cadence() {
        let page = dashboard_html(&RefreshIntervals::default());
        assert!(page.contains(r#""weather":60000"#));
        assert!(page.contains(r#""crypto":30000"#));
        assert!(page.contains(r#""portfolios":60000"#));
    }

    #[test]
    fn test_refresh_action() {
        assert_eq!(refresh_action("crypto"), "refreshCard('crypto')");
    }
}
