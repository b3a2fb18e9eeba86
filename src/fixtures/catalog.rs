//! Catalog Fixtures
//!
//! The favorites/cart-style seed document: a titled collection of catalog
//! items plus the category filter labels the view offers.

use std::{fs, path::Path};

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;

use crate::{
    filters::KeywordTable,
    fixtures::{FixtureError, check_price, document_currency, parse_added, parse_rating},
    items::CatalogItem,
    tags::string::StringTagCollection,
    views::ViewStore,
};

/// Raw catalog document shape.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogDocument {
    title: String,

    subtitle: String,

    #[serde(default)]
    currency: Option<String>,

    #[serde(default, alias = "categories")]
    filters: Vec<String>,

    #[serde(alias = "favorites", alias = "restaurants")]
    items: Vec<ItemRecord>,
}

/// Raw catalog item record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemRecord {
    name: String,

    restaurant: String,

    #[serde(default)]
    cuisine: String,

    price: i64,

    rating: f64,

    #[serde(default)]
    delivery_time: String,

    #[serde(default)]
    image: String,

    #[serde(default)]
    tags: Vec<String>,

    #[serde(default)]
    added_date: Option<String>,

    #[serde(default)]
    min_order: Option<i64>,
}

/// A parsed catalog seed: view copy plus its display metadata.
#[derive(Debug)]
pub struct CatalogFixture {
    /// View title.
    pub title: String,

    /// View subtitle.
    pub subtitle: String,

    /// Category filter labels the view offers.
    pub filters: Vec<String>,

    /// Currency all item prices are denominated in.
    pub currency: &'static Currency,

    /// The seeded items, in document order.
    pub items: Vec<CatalogItem<'static>>,
}

impl CatalogFixture {
    /// Move the items into a view store configured with the given keyword
    /// table.
    #[must_use]
    pub fn into_store(self, keywords: KeywordTable) -> ViewStore<'static> {
        ViewStore::seeded(keywords, self.items)
    }
}

/// Parse a catalog seed document.
///
/// # Errors
///
/// Returns a [`FixtureError`] on JSON syntax errors, negative prices,
/// out-of-range ratings, unknown currency codes or malformed added dates.
pub fn parse_catalog(source: &str) -> Result<CatalogFixture, FixtureError> {
    let document: CatalogDocument = serde_json::from_str(source)?;
    let currency = document_currency(document.currency.as_deref())?;

    let items = document
        .items
        .into_iter()
        .map(|record| item_from_record(record, currency))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CatalogFixture {
        title: document.title,
        subtitle: document.subtitle,
        filters: document.filters,
        currency,
        items,
    })
}

/// Read and parse a catalog seed document from disk.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the file cannot be read or parsed.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<CatalogFixture, FixtureError> {
    parse_catalog(&fs::read_to_string(path)?)
}

fn item_from_record(
    record: ItemRecord,
    currency: &'static Currency,
) -> Result<CatalogItem<'static>, FixtureError> {
    let price = Money::from_minor(check_price(record.price)?, currency);

    let min_order = record
        .min_order
        .map(|minor| check_price(minor).map(|minor| Money::from_minor(minor, currency)))
        .transpose()?;

    let added_at = record
        .added_date
        .as_deref()
        .map(parse_added)
        .transpose()?;

    let tag_strs: Vec<&str> = record.tags.iter().map(String::as_str).collect();

    Ok(CatalogItem {
        name: record.name,
        restaurant: record.restaurant,
        cuisine: record.cuisine,
        price,
        rating: parse_rating(record.rating)?,
        delivery_estimate: record.delivery_time,
        image: record.image,
        tags: StringTagCollection::from_strs(&tag_strs),
        added_at,
        min_order,
    })
}
