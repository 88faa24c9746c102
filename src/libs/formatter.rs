//! Parsing and formatting of user-facing values.
//!
//! ## Formats
//!
//! - Dates are entered as `dd.mm.yyyy` or `yyyy-mm-dd` and shown as `dd.mm.yyyy`
//! - Distances are shown with thin grouping, e.g. `50 500 km`
//! - Money and volumes are shown with two decimals
//!
//! ```rust
//! use carlog::libs::formatter::{format_date, format_km, parse_date};
//!
//! let date = parse_date("15.03.2024").unwrap();
//! assert_eq!(format_date(&date), "15.03.2024");
//! assert_eq!(format_km(50_500), "50 500 km");
//! ```

use super::error::CarlogError;
use anyhow::Result;
use chrono::NaiveDate;

pub const DISPLAY_DATE_FORMAT: &str = "%d.%m.%Y";
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, DISPLAY_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(input, ISO_DATE_FORMAT))
        .map_err(|_| CarlogError::InvalidInput(format!("'{}' is not a date (expected dd.mm.yyyy)", input)).into())
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

pub fn format_optional_date(date: &Option<NaiveDate>) -> String {
    date.as_ref().map(format_date).unwrap_or_else(|| "-".to_string())
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

pub fn format_km(km: i64) -> String {
    format!("{} km", group_thousands(km))
}

pub fn format_optional_km(km: &Option<i64>) -> String {
    km.map(format_km).unwrap_or_else(|| "-".to_string())
}

pub fn format_money(amount: f64) -> String {
    format!("{:.2}", amount)
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Parses a positive decimal, accepting `,` as the decimal separator.
pub fn parse_decimal(input: &str) -> Result<f64> {
    let normalized = input.trim().replace(',', ".");
    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
        .ok_or_else(|| CarlogError::InvalidInput(format!("'{}' is not a number", input.trim())).into())
}
