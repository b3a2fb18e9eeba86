//! Fixtures
//!
//! Loading for the JSON seed documents each view reads at mount time. The
//! documents share a fixed top-level shape (`title`, `subtitle`, `filters`,
//! a collection array, optional `stats`/`countdown` blocks) and are treated
//! as read-only: parsing produces the working values the stores own, and
//! nothing ever writes back.

use jiff::civil;
use rust_decimal::{Decimal, prelude::FromPrimitive};
use rusty_money::iso::{self, Currency};
use thiserror::Error;

use crate::{countdown::CountdownError, items::DealError, orders::OrderError};

pub mod catalog;
pub mod orders;
pub mod today;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Negative price in minor units
    #[error("Invalid price: {0}")]
    InvalidPrice(i64),

    /// Rating outside 0.0 to 5.0 or not representable
    #[error("Invalid rating: {0}")]
    InvalidRating(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Unknown order status
    #[error("Unknown order status: {0}")]
    UnknownStatus(String),

    /// Malformed calendar date
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Malformed wall-clock time
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    /// Order invariant violation in the seed data
    #[error(transparent)]
    Order(#[from] OrderError),

    /// Deal invariant violation in the seed data
    #[error(transparent)]
    Deal(#[from] DealError),

    /// Malformed countdown block
    #[error(transparent)]
    Countdown(#[from] CountdownError),
}

/// Resolve a currency code to the rusty-money currency it names.
pub(crate) fn currency_from_code(code: &str) -> Result<&'static Currency, FixtureError> {
    match code {
        "PKR" => Ok(iso::PKR),
        "USD" => Ok(iso::USD),
        "GBP" => Ok(iso::GBP),
        "EUR" => Ok(iso::EUR),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}

/// Default currency for documents that do not declare one.
pub(crate) fn document_currency(code: Option<&str>) -> Result<&'static Currency, FixtureError> {
    currency_from_code(code.unwrap_or("PKR"))
}

/// Validate a minor-unit price from the seed data.
pub(crate) fn check_price(minor: i64) -> Result<i64, FixtureError> {
    if minor < 0 {
        Err(FixtureError::InvalidPrice(minor))
    } else {
        Ok(minor)
    }
}

/// Parse a 0.0 to 5.0 rating.
pub(crate) fn parse_rating(rating: f64) -> Result<Decimal, FixtureError> {
    let parsed =
        Decimal::from_f64(rating).ok_or_else(|| FixtureError::InvalidRating(rating.to_string()))?;

    if parsed < Decimal::ZERO || parsed > Decimal::from(5) {
        return Err(FixtureError::InvalidRating(rating.to_string()));
    }

    Ok(parsed)
}

/// Parse an added-date string: a full civil datetime, or a bare date taken
/// at midnight.
pub(crate) fn parse_added(value: &str) -> Result<civil::DateTime, FixtureError> {
    if let Ok(datetime) = value.parse::<civil::DateTime>() {
        return Ok(datetime);
    }

    value
        .parse::<civil::Date>()
        .map(|date| date.to_datetime(civil::Time::midnight()))
        .map_err(|_err| FixtureError::InvalidDate(value.to_string()))
}

/// Parse a "YYYY-MM-DD" calendar date.
pub(crate) fn parse_date(value: &str) -> Result<civil::Date, FixtureError> {
    value
        .parse::<civil::Date>()
        .map_err(|_err| FixtureError::InvalidDate(value.to_string()))
}

/// Parse an "HH:MM" wall-clock time.
pub(crate) fn parse_time(value: &str) -> Result<civil::Time, FixtureError> {
    civil::Time::strptime("%H:%M", value)
        .map_err(|_err| FixtureError::InvalidTime(value.to_string()))
}
