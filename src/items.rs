//! Items
//!
//! Catalog entities shared by the cart, favorites, specials and restaurant
//! views. One shape serves all four; restaurant-style entries simply carry a
//! minimum-order value.

use jiff::civil;
use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};
use slotmap::new_key_type;
use thiserror::Error;

use crate::tags::{collection::TagCollection, string::StringTagCollection};

new_key_type! {
    /// Item Key
    ///
    /// Working identity of an item inside a view's collection.
    pub struct ItemKey;
}

/// A catalog item as seeded from the external data source.
///
/// Created at load time and never field-edited by the pipeline; quantities
/// and selection live in the owning view store.
#[derive(Debug, Clone)]
pub struct CatalogItem<'a, T: TagCollection = StringTagCollection> {
    /// Display name
    pub name: String,

    /// Owning restaurant name
    pub restaurant: String,

    /// Cuisine or category label
    pub cuisine: String,

    /// Unit price in minor units
    pub price: Money<'a, Currency>,

    /// Rating, 0.0 to 5.0
    pub rating: Decimal,

    /// Free-text delivery estimate, e.g. "25-30 min"
    pub delivery_estimate: String,

    /// Image URI
    pub image: String,

    /// Free-text tags
    pub tags: T,

    /// When the item was added (favorites carry this)
    pub added_at: Option<civil::DateTime>,

    /// Minimum order value (restaurant-style entries carry this)
    pub min_order: Option<Money<'a, Currency>>,
}

/// Returns the highest-rated item in a list of items.
pub fn top_rated<'a, T: TagCollection>(
    items: &'a [CatalogItem<'a, T>],
) -> Option<&'a CatalogItem<'a, T>> {
    items.iter().max_by_key(|item| item.rating)
}

/// Errors raised while validating a deal.
#[derive(Debug, Error)]
pub enum DealError {
    /// The discounted price is above the original price (discounted, original minor units).
    #[error("discounted price {0} exceeds original price {1}")]
    DiscountAboveOriginal(i64, i64),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Stock urgency for a limited deal, derived from orders left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockUrgency {
    /// Three or fewer orders left.
    Critical,

    /// Eight or fewer orders left.
    Low,

    /// More than eight orders left.
    Comfortable,
}

impl StockUrgency {
    /// Derive the urgency band from the number of orders left.
    #[must_use]
    pub fn from_orders_left(orders_left: u32) -> Self {
        match orders_left {
            0..=3 => StockUrgency::Critical,
            4..=8 => StockUrgency::Low,
            _ => StockUrgency::Comfortable,
        }
    }

    /// Display color for the urgency band.
    pub fn color(self) -> &'static str {
        match self {
            StockUrgency::Critical => "#ef4444",
            StockUrgency::Low => "#f97316",
            StockUrgency::Comfortable => "#22c55e",
        }
    }
}

/// Deal terms attached to a today's-special item.
#[derive(Debug, Clone)]
pub struct DealTerms<'a> {
    original_price: Money<'a, Currency>,
    discounted_price: Money<'a, Currency>,
    label: String,
    available_until: civil::Time,
    orders_left: u32,
}

impl<'a> DealTerms<'a> {
    /// Create validated deal terms.
    ///
    /// # Errors
    ///
    /// Returns a [`DealError`] if the discounted price exceeds the original.
    pub fn new(
        original_price: Money<'a, Currency>,
        discounted_price: Money<'a, Currency>,
        label: String,
        available_until: civil::Time,
        orders_left: u32,
    ) -> Result<Self, DealError> {
        if discounted_price.to_minor_units() > original_price.to_minor_units() {
            return Err(DealError::DiscountAboveOriginal(
                discounted_price.to_minor_units(),
                original_price.to_minor_units(),
            ));
        }

        Ok(Self {
            original_price,
            discounted_price,
            label,
            available_until,
            orders_left,
        })
    }

    /// Price before the deal.
    pub fn original_price(&self) -> Money<'a, Currency> {
        self.original_price
    }

    /// Price under the deal.
    pub fn discounted_price(&self) -> Money<'a, Currency> {
        self.discounted_price
    }

    /// Display label, e.g. "33% OFF".
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Daily wall-clock time the deal runs until.
    pub fn available_until(&self) -> civil::Time {
        self.available_until
    }

    /// Orders still available at the deal price.
    pub fn orders_left(&self) -> u32 {
        self.orders_left
    }

    /// Amount saved per order under the deal.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction fails.
    pub fn savings(&self) -> Result<Money<'a, Currency>, MoneyError> {
        self.original_price.sub(self.discounted_price)
    }

    /// Actual percentage off, or `None` for a free item.
    pub fn percent_off(&self) -> Option<Decimal> {
        let original = Decimal::from(self.original_price.to_minor_units());
        let saved = Decimal::from(
            self.original_price.to_minor_units() - self.discounted_price.to_minor_units(),
        );

        saved
            .checked_div(original)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
    }

    /// Stock urgency band for the deal.
    pub fn urgency(&self) -> StockUrgency {
        StockUrgency::from_orders_left(self.orders_left)
    }
}

/// A today's-special entry: a catalog item under deal terms.
#[derive(Debug, Clone)]
pub struct Special<'a, T: TagCollection = StringTagCollection> {
    /// The underlying catalog item, priced at the original price.
    pub item: CatalogItem<'a, T>,

    /// Promotional copy for the deal card.
    pub description: String,

    /// The deal applied to it.
    pub deal: DealTerms<'a>,
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::PKR;
    use testresult::TestResult;

    use super::*;

    fn item<'a>(name: &str, rating: Decimal) -> CatalogItem<'a> {
        CatalogItem {
            name: name.to_string(),
            restaurant: "Biryani Point".to_string(),
            cuisine: "Desi".to_string(),
            price: Money::from_minor(850, PKR),
            rating,
            delivery_estimate: "25-30 min".to_string(),
            image: String::new(),
            tags: StringTagCollection::empty(),
            added_at: None,
            min_order: None,
        }
    }

    #[test]
    fn top_rated_picks_highest_rating() {
        let items = [
            item("a", Decimal::new(42, 1)),
            item("b", Decimal::new(48, 1)),
            item("c", Decimal::new(39, 1)),
        ];

        let best = top_rated(&items);

        assert_eq!(best.map(|i| i.name.as_str()), Some("b"));
    }

    #[test]
    fn top_rated_empty_returns_none() {
        let items: [CatalogItem<'_>; 0] = [];

        assert!(top_rated(&items).is_none());
    }

    #[test]
    fn deal_terms_reject_discount_above_original() {
        let result = DealTerms::new(
            Money::from_minor(500, PKR),
            Money::from_minor(600, PKR),
            "deal".to_string(),
            civil::time(23, 0, 0, 0),
            10,
        );

        assert!(matches!(
            result,
            Err(DealError::DiscountAboveOriginal(600, 500))
        ));
    }

    #[test]
    fn deal_terms_savings_and_percent() -> TestResult {
        let deal = DealTerms::new(
            Money::from_minor(1200, PKR),
            Money::from_minor(800, PKR),
            "33% OFF".to_string(),
            civil::time(23, 0, 0, 0),
            12,
        )?;

        assert_eq!(deal.savings()?, Money::from_minor(400, PKR));

        let percent = deal.percent_off().map(|p| p.round_dp(0));
        assert_eq!(percent, Some(Decimal::from(33)));

        Ok(())
    }

    #[test]
    fn stock_urgency_bands() {
        assert_eq!(StockUrgency::from_orders_left(2), StockUrgency::Critical);
        assert_eq!(StockUrgency::from_orders_left(3), StockUrgency::Critical);
        assert_eq!(StockUrgency::from_orders_left(5), StockUrgency::Low);
        assert_eq!(StockUrgency::from_orders_left(20), StockUrgency::Comfortable);
        assert_eq!(StockUrgency::from_orders_left(2).color(), "#ef4444");
    }
}
