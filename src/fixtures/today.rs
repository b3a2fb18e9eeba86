//! Today Fixtures
//!
//! The today's-specials seed document: the countdown banner block plus the
//! limited deals running until their daily end time.

use std::{fs, path::Path};

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;

use crate::{
    countdown::DealDeadline,
    fixtures::{FixtureError, check_price, document_currency, parse_rating, parse_time},
    items::{CatalogItem, DealTerms, Special},
    tags::string::StringTagCollection,
};

/// Raw today document shape.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TodayDocument {
    title: String,

    subtitle: String,

    #[serde(default)]
    currency: Option<String>,

    countdown: CountdownRecord,

    specials: Vec<SpecialRecord>,
}

/// Raw countdown banner record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CountdownRecord {
    title: String,

    end_time: String,

    message: String,
}

/// Raw special record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpecialRecord {
    name: String,

    #[serde(default)]
    description: String,

    restaurant: String,

    original_price: i64,

    discounted_price: i64,

    discount: String,

    available_until: String,

    rating: f64,

    orders_left: u32,

    #[serde(default)]
    image: String,

    #[serde(default)]
    tags: Vec<String>,
}

/// The countdown banner configuration.
#[derive(Debug, Clone)]
pub struct CountdownBanner {
    /// Banner title.
    pub title: String,

    /// Banner message shown under the timer.
    pub message: String,

    /// The daily deadline the timer counts down to.
    pub deadline: DealDeadline,
}

/// A parsed today's-specials seed.
#[derive(Debug)]
pub struct TodayFixture {
    /// Section title.
    pub title: String,

    /// Section subtitle.
    pub subtitle: String,

    /// Currency all deal prices are denominated in.
    pub currency: &'static Currency,

    /// The countdown banner configuration.
    pub countdown: CountdownBanner,

    /// The deals, in document order.
    pub specials: Vec<Special<'static>>,
}

/// Parse a today's-specials seed document.
///
/// # Errors
///
/// Returns a [`FixtureError`] on JSON syntax errors, negative prices, deals
/// discounted above their original price, out-of-range ratings, or
/// malformed end times.
pub fn parse_today(source: &str) -> Result<TodayFixture, FixtureError> {
    let document: TodayDocument = serde_json::from_str(source)?;
    let currency = document_currency(document.currency.as_deref())?;

    let specials = document
        .specials
        .into_iter()
        .map(|record| special_from_record(record, currency))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TodayFixture {
        title: document.title,
        subtitle: document.subtitle,
        currency,
        countdown: CountdownBanner {
            title: document.countdown.title,
            message: document.countdown.message,
            deadline: DealDeadline::parse(&document.countdown.end_time)?,
        },
        specials,
    })
}

/// Read and parse a today's-specials seed document from disk.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the file cannot be read or parsed.
pub fn load_today(path: impl AsRef<Path>) -> Result<TodayFixture, FixtureError> {
    parse_today(&fs::read_to_string(path)?)
}

fn special_from_record(
    record: SpecialRecord,
    currency: &'static Currency,
) -> Result<Special<'static>, FixtureError> {
    let original = Money::from_minor(check_price(record.original_price)?, currency);
    let discounted = Money::from_minor(check_price(record.discounted_price)?, currency);

    let deal = DealTerms::new(
        original,
        discounted,
        record.discount,
        parse_time(&record.available_until)?,
        record.orders_left,
    )?;

    let tag_strs: Vec<&str> = record.tags.iter().map(String::as_str).collect();

    let item = CatalogItem {
        name: record.name,
        restaurant: record.restaurant,
        cuisine: String::new(),
        price: original,
        rating: parse_rating(record.rating)?,
        delivery_estimate: String::new(),
        image: record.image,
        tags: StringTagCollection::from_strs(&tag_strs),
        added_at: None,
        min_order: None,
    };

    Ok(Special {
        item,
        description: record.description,
        deal,
    })
}
