//! Whole-unit, thousands-grouped currency formatting for quote messages.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::rounding::round_half_up;

/// Shown in place of an amount that could not be computed.
pub const INVALID_MARKER: &str = "invalid";

/// Digit grouping convention for quote amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteLocale {
    /// `6,542,250`
    En,
    /// `6 542 250` with non-breaking spaces
    #[default]
    Ru,
}

impl QuoteLocale {
    pub fn group_separator(self) -> char {
        match self {
            QuoteLocale::En => ',',
            QuoteLocale::Ru => '\u{a0}',
        }
    }
}

impl fmt::Display for QuoteLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteLocale::En => f.write_str("en"),
            QuoteLocale::Ru => f.write_str("ru"),
        }
    }
}

impl FromStr for QuoteLocale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Ok(QuoteLocale::En),
            "ru" | "ru-ru" => Ok(QuoteLocale::Ru),
            other => Err(format!("unknown locale '{other}' (expected 'en' or 'ru')")),
        }
    }
}

/// Round to whole units and group thousands: `6542245.5 -> "6,542,246"` (en).
pub fn format_amount(value: Decimal, locale: QuoteLocale) -> String {
    let rounded = round_half_up(value).trunc();
    if rounded.is_zero() {
        return "0".to_string();
    }

    let digits = rounded.abs().to_string();
    let grouped = group_digits(&digits, locale.group_separator());
    if rounded.is_sign_negative() {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Like [`format_amount`], with [`INVALID_MARKER`] for a missing value.
pub fn format_optional_amount(value: Option<Decimal>, locale: QuoteLocale) -> String {
    value
        .map(|v| format_amount(v, locale))
        .unwrap_or_else(|| INVALID_MARKER.to_string())
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len_utf8());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
