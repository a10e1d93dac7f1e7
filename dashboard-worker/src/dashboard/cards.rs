//! Dashboard cards
//!
//! Each card is a pure function of its [`Slot`] plus the JavaScript to run
//! when the refresh button is clicked. Precedence is fixed: loading, then
//! error, then the empty placeholder, then data.

use std::fmt::Write as _;

use crate::config::Location;
use crate::controller::Slot;
use crate::format::{escape_html, format_change, format_time, format_usd};
use crate::types::{CryptoQuote, CryptoSnapshot, PortfolioList, WeatherSnapshot};

pub const LOADING_CARD: &str = r#"<div class="card card-loading"><div class="spinner" role="status" aria-label="Loading"></div></div>"#;

enum CardView<'a, T> {
    Loading,
    Error(&'a str),
    Empty,
    Ready(&'a T),
}

fn view<'a, T>(slot: &'a Slot<T>, is_empty: impl Fn(&T) -> bool) -> CardView<'a, T> {
    if slot.is_loading {
        return CardView::Loading;
    }
    if let Some(error) = slot.error.as_deref() {
        return CardView::Error(error);
    }
    match slot.data.as_ref() {
        Some(data) if !is_empty(data) => CardView::Ready(data),
        _ => CardView::Empty,
    }
}

pub fn error_card(message: &str) -> String {
    format!(
        r#"<div class="card"><div class="card-error">{}</div></div>"#,
        escape_html(message)
    )
}

fn placeholder_card(title: &str, on_refresh: &str, text: &str) -> String {
    format!(
        r#"<div class="card">{}<div class="placeholder">ℹ️ {}</div></div>"#,
        card_header(title, on_refresh),
        escape_html(text)
    )
}

fn card_header(title: &str, on_refresh: &str) -> String {
    format!(
        r#"<div class="card-header"><span class="card-title">{}</span><button class="btn-icon" onclick="{}" aria-label="Refresh {}">🔄</button></div>"#,
        escape_html(title),
        escape_html(on_refresh),
        escape_html(&title.to_lowercase())
    )
}

fn clocks(location: &Location, home_time: &str, reference_time: &str) -> String {
    format!(
        r#"<div class="clocks">🕒<div><div class="clock-label">{}</div><div>{}</div></div><div><div class="clock-label">{}</div><div>{}</div></div></div>"#,
        escape_html(&location.home_label),
        escape_html(home_time),
        escape_html(&location.reference_label),
        escape_html(reference_time)
    )
}

/// Icon for an OpenWeatherMap condition group
pub fn weather_icon(condition: &str) -> &'static str {
    match condition.to_lowercase().as_str() {
        "clouds" => "☁️",
        "rain" => "🌧️",
        _ => "☀️",
    }
}

pub fn weather_card(slot: &Slot<WeatherSnapshot>, location: &Location, on_refresh: &str) -> String {
    let weather = match view(slot, |_| false) {
        CardView::Loading => return LOADING_CARD.to_string(),
        CardView::Error(message) => return error_card(message),
        CardView::Empty => return placeholder_card("Weather", on_refresh, "No weather data"),
        CardView::Ready(weather) => weather,
    };

    format!(
        r#"<div class="card">{header}<div class="weather"><div><h3>{location}</h3><div class="muted">{date}</div><div class="card-value">{temp}°F</div><div class="muted">{description}</div></div><div class="weather-icon">{icon}</div></div>{clocks}</div>"#,
        header = card_header("Weather", on_refresh),
        location = escape_html(&weather.location),
        date = escape_html(&weather.date),
        temp = weather.temperature,
        description = escape_html(&weather.description),
        icon = weather_icon(&weather.condition),
        clocks = clocks(location, &weather.home_time, &weather.reference_time),
    )
}

fn price_row(quote: &CryptoQuote) -> String {
    let (class, arrow) = if quote.is_positive() {
        ("positive", "📈")
    } else {
        ("negative", "📉")
    };
    let icon = if quote.symbol == "BTC" { "₿" } else { "🪙" };

    format!(
        r#"<div class="price-row"><div class="price-asset"><span class="asset-icon">{icon}</span><div><div class="asset-pair">{symbol}/USD</div><div class="{class}">{arrow} {change}</div></div></div><div class="price">{price}</div></div>"#,
        symbol = escape_html(&quote.symbol),
        change = format_change(quote.change_24h),
        price = format_usd(quote.price),
    )
}

pub fn crypto_card(slot: &Slot<CryptoSnapshot>, location: &Location, on_refresh: &str) -> String {
    let prices = match view(slot, CryptoSnapshot::is_empty) {
        CardView::Loading => return LOADING_CARD.to_string(),
        CardView::Error(message) => return error_card(message),
        CardView::Empty => return placeholder_card("Crypto Prices", on_refresh, "No price data"),
        CardView::Ready(prices) => prices,
    };

    let rows: Vec<String> = prices.quotes().map(price_row).collect();
    let mut html = format!(
        r#"<div class="card">{}<div class="prices">{}</div>"#,
        card_header("Crypto Prices", on_refresh),
        rows.join(r#"<div class="divider"></div>"#)
    );
    if let Some(btc) = &prices.btc {
        html.push_str(&clocks(
            location,
            &format_time(btc.last_updated, location.home_tz),
            &format_time(btc.last_updated, location.reference_tz),
        ));
    }
    html.push_str("</div>");
    html
}

pub fn portfolio_card(slot: &Slot<PortfolioList>, on_refresh: &str) -> String {
    let list = match view(slot, |list| list.portfolios.is_empty()) {
        CardView::Loading => return LOADING_CARD.to_string(),
        CardView::Error(message) => return error_card(message),
        CardView::Empty => {
            return placeholder_card("Coinbase Portfolios", on_refresh, "No portfolios found");
        }
        CardView::Ready(list) => list,
    };

    let mut items = String::new();
    for portfolio in &list.portfolios {
        let name = if portfolio.name.is_empty() { "Unnamed portfolio" } else { portfolio.name.as_str() };
        let _ = write!(
            items,
            r#"<li class="portfolio" data-id="{id}">👛<div><div class="portfolio-name">{name}</div><div class="muted small">Portfolio ID: {id}</div><div class="muted small">Entity ID: {entity}</div><div class="muted small">Organization ID: {org}</div></div></li>"#,
            id = escape_html(&portfolio.id),
            name = escape_html(name),
            entity = escape_html(&portfolio.entity_id),
            org = escape_html(&portfolio.organization_id),
        );
    }

    format!(
        r#"<div class="card">{}<ul class="portfolios">{items}</ul></div>"#,
        card_header("Coinbase Portfolios", on_refresh)
    )
}
