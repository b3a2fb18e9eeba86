//! Sorting
//!
//! The per-view comparator table. Sorting is stable — equal keys keep their
//! seed order — and total: malformed delivery estimates rank behind every
//! well-formed one instead of failing, and an unrecognized sort key is an
//! identity pass-through.

use std::cmp::Ordering;

use crate::{items::CatalogItem, tags::collection::TagCollection};

/// Sort key for a view's render sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Descending by added timestamp; items without one sort last.
    Recent,

    /// Descending by rating.
    Rating,

    /// Ascending by price.
    PriceLow,

    /// Descending by price.
    PriceHigh,

    /// Ascending by the leading minutes of the delivery estimate.
    DeliveryTime,

    /// Ascending by minimum order value; items without one sort last.
    MinOrder,

    /// Identity pass-through; the fallback for unrecognized keys.
    #[default]
    Unsorted,
}

impl SortKey {
    /// Parse a view's sort-key string. Unknown keys map to
    /// [`SortKey::Unsorted`] rather than an error.
    #[must_use]
    pub fn parse(key: &str) -> Self {
        match key {
            "recent" => SortKey::Recent,
            "rating" | "highest-rating" => SortKey::Rating,
            "price-low" => SortKey::PriceLow,
            "price-high" => SortKey::PriceHigh,
            "deliveryTime" => SortKey::DeliveryTime,
            "minOrder" => SortKey::MinOrder,
            _ => SortKey::Unsorted,
        }
    }

    /// Compare two items under this key.
    pub fn compare<T: TagCollection>(
        self,
        a: &CatalogItem<'_, T>,
        b: &CatalogItem<'_, T>,
    ) -> Ordering {
        match self {
            SortKey::Recent => b.added_at.cmp(&a.added_at),
            SortKey::Rating => b.rating.cmp(&a.rating),
            SortKey::PriceLow => a.price.to_minor_units().cmp(&b.price.to_minor_units()),
            SortKey::PriceHigh => b.price.to_minor_units().cmp(&a.price.to_minor_units()),
            SortKey::DeliveryTime => delivery_rank(a).cmp(&delivery_rank(b)),
            SortKey::MinOrder => min_order_rank(a).cmp(&min_order_rank(b)),
            SortKey::Unsorted => Ordering::Equal,
        }
    }
}

/// Parse the leading minutes figure of a delivery estimate ("25-30 min" is
/// 25). Returns `None` when the string does not start with digits.
pub fn leading_minutes(estimate: &str) -> Option<u32> {
    let digits: String = estimate
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();

    digits.parse().ok()
}

/// Delivery-time rank; malformed estimates rank behind every valid one.
fn delivery_rank<T: TagCollection>(item: &CatalogItem<'_, T>) -> u32 {
    leading_minutes(&item.delivery_estimate).unwrap_or(u32::MAX)
}

/// Minimum-order rank; items without a minimum rank last.
fn min_order_rank<T: TagCollection>(item: &CatalogItem<'_, T>) -> i64 {
    item.min_order
        .as_ref()
        .map_or(i64::MAX, rusty_money::Money::to_minor_units)
}

/// Return a freshly ordered copy of the given sequence; the input is left
/// untouched. The underlying sort is stable.
pub fn sort_items<'i, 'a, T: TagCollection>(
    items: &[&'i CatalogItem<'a, T>],
    key: SortKey,
) -> Vec<&'i CatalogItem<'a, T>> {
    let mut ordered = items.to_vec();
    ordered.sort_by(|a, b| key.compare(a, b));

    ordered
}
