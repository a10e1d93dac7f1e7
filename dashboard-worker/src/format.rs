//! Display formatting shared by the cards
//!
//! Output follows the browser's `en-US` conventions so server-rendered cards
//! read the same as the client-side ones did.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rust_decimal::{Decimal, RoundingStrategy};

/// Exact binary value of `value` rounded to cents, halves away from zero
///
/// Non-finite input becomes zero.
fn round_cents(value: f64) -> Decimal {
    Decimal::from_f64_retain(value)
        .unwrap_or_default()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `$65,000.00`, `-$1,234.50`
pub fn format_usd(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", round_cents(value).abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{sign}${}.{frac_part}", group_int_digits(int_part))
}

fn group_int_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Two decimals, sign only when negative: `2.50%`, `-1.20%`
pub fn format_change(percent: f64) -> String {
    let sign = if percent < 0.0 { "-" } else { "" };
    format!("{sign}{:.2}%", round_cents(percent).abs())
}

/// `Math.round`: halves go toward positive infinity
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// 12-hour clock in `tz`, e.g. `03:05 PM`
pub fn format_time(at: DateTime<Utc>, tz: Tz) -> String {
    at.with_timezone(&tz).format("%I:%M %p").to_string()
}

/// Short date in `tz`, e.g. `Oct 18, 2026`
pub fn format_date(at: DateTime<Utc>, tz: Tz) -> String {
    at.with_timezone(&tz).format("%b %d, %Y").to_string()
}

/// Escape text for HTML element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
