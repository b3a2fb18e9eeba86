//! Category Filters
//!
//! Maps an active category label to a keyword set and retains the items
//! whose cuisine or tags contain one of those keywords. Filtering always
//! yields a sequence, preserves seed order and never errors: a label with
//! no keywords simply matches nothing.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{items::CatalogItem, tags::collection::TagCollection};

/// Sentinel category label that passes every item through unchanged.
pub const ALL_CATEGORIES: &str = "All";

/// What a [`KeywordTable`] does with a label it has no entry for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelFallback {
    /// Use the label itself, stripped of non-alphabetic characters, as the
    /// single keyword ("🍕 Italian" becomes "Italian").
    StrippedLabel,

    /// Unknown labels match nothing.
    MatchNone,
}

/// Category label to keyword-set mapping for one view.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    entries: FxHashMap<String, SmallVec<[String; 3]>>,
    fallback: LabelFallback,
}

impl KeywordTable {
    /// An empty table that resolves every label through the generic
    /// stripped-label rule. This is what the restaurants view uses.
    #[must_use]
    pub fn generic() -> Self {
        Self {
            entries: FxHashMap::default(),
            fallback: LabelFallback::StrippedLabel,
        }
    }

    /// The favorites view's explicit lookup table. Labels outside the
    /// table match nothing.
    #[must_use]
    pub fn favorites() -> Self {
        let mut table = Self {
            entries: FxHashMap::default(),
            fallback: LabelFallback::MatchNone,
        };

        table.insert("🍕 Italian", &["Italian", "Pizza"]);
        table.insert("🍔 Fast Food", &["Fast Food", "Burger"]);
        table.insert("🍛 Desi", &["Desi", "Pakistani", "Biryani"]);
        table.insert("🍜 Chinese", &["Chinese", "Asian"]);
        table.insert("🥗 Healthy", &["Healthy", "Vegan", "Salad"]);
        table.insert("🥩 Premium", &["Premium", "Steak", "Grill"]);
        table.insert("🥤 Drinks", &["Beverages", "Cafe", "Shake"]);

        table
    }

    /// Add or replace the keyword set for a label.
    pub fn insert(&mut self, label: &str, keywords: &[&str]) {
        self.entries.insert(
            label.to_string(),
            keywords.iter().map(ToString::to_string).collect(),
        );
    }

    /// Resolve a label to its keyword set.
    pub fn keywords_for(&self, label: &str) -> SmallVec<[String; 3]> {
        if let Some(keywords) = self.entries.get(label) {
            return keywords.clone();
        }

        match self.fallback {
            LabelFallback::StrippedLabel => {
                let stripped: String = label.chars().filter(char::is_ascii_alphabetic).collect();
                let mut keywords = SmallVec::new();
                keywords.push(stripped);
                keywords
            }
            LabelFallback::MatchNone => SmallVec::new(),
        }
    }
}

/// Whether an item belongs to the given category under this table.
///
/// The [`ALL_CATEGORIES`] sentinel admits everything; otherwise the item's
/// cuisine or any of its tags must contain one of the category's keywords,
/// case-insensitively.
pub fn matches_category<T: TagCollection>(
    item: &CatalogItem<'_, T>,
    category: &str,
    table: &KeywordTable,
) -> bool {
    if category == ALL_CATEGORIES {
        return true;
    }

    table.keywords_for(category).iter().any(|keyword| {
        let needle = keyword.to_lowercase();

        item.cuisine.to_lowercase().contains(&needle) || item.tags.contains_keyword(keyword)
    })
}

/// Retain the items matching the active category, preserving input order.
pub fn filter_items<'i, 'a, T: TagCollection>(
    items: &'i [CatalogItem<'a, T>],
    category: &str,
    table: &KeywordTable,
) -> Vec<&'i CatalogItem<'a, T>> {
    items
        .iter()
        .filter(|item| matches_category(item, category, table))
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::{Money, iso::PKR};

    use crate::tags::string::StringTagCollection;

    use super::*;

    fn item<'a>(name: &str, cuisine: &str, tags: &[&str]) -> CatalogItem<'a> {
        CatalogItem {
            name: name.to_string(),
            restaurant: "Test Kitchen".to_string(),
            cuisine: cuisine.to_string(),
            price: Money::from_minor(500, PKR),
            rating: Decimal::new(45, 1),
            delivery_estimate: "20-25 min".to_string(),
            image: String::new(),
            tags: StringTagCollection::from_strs(tags),
            added_at: None,
            min_order: None,
        }
    }

    fn sample<'a>() -> Vec<CatalogItem<'a>> {
        vec![
            item("Chicken Biryani", "Pakistani", &["🔥 Spicy", "Biryani"]),
            item("Cheese Pizza", "Italian", &["🧀 Extra Cheese", "🍕 Large"]),
            item("Beef Burger", "Fast Food", &["🍔 Double Patty"]),
            item("Chocolate Shake", "Beverages", &["🍫 Chocolate", "🥤 Cold"]),
        ]
    }

    #[test]
    fn all_sentinel_returns_input_unchanged() {
        let items = sample();
        let table = KeywordTable::favorites();

        let filtered = filter_items(&items, ALL_CATEGORIES, &table);

        assert_eq!(filtered.len(), items.len());
    }

    #[test]
    fn favorites_table_matches_on_cuisine_and_tags() {
        let items = sample();
        let table = KeywordTable::favorites();

        let desi = filter_items(&items, "🍛 Desi", &table);
        assert_eq!(desi.len(), 1);
        assert_eq!(desi.first().map(|i| i.name.as_str()), Some("Chicken Biryani"));

        let drinks = filter_items(&items, "🥤 Drinks", &table);
        assert_eq!(drinks.len(), 1);
        assert_eq!(
            drinks.first().map(|i| i.name.as_str()),
            Some("Chocolate Shake")
        );
    }

    #[test]
    fn favorites_table_unknown_label_matches_nothing() {
        let items = sample();
        let table = KeywordTable::favorites();

        let filtered = filter_items(&items, "🌮 Mexican", &table);

        assert!(filtered.is_empty());
    }

    #[test]
    fn generic_table_strips_label_to_keyword() {
        let items = sample();
        let table = KeywordTable::generic();

        let filtered = filter_items(&items, "🍕 Italian", &table);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.first().map(|i| i.name.as_str()), Some("Cheese Pizza"));
    }

    #[test]
    fn category_miss_returns_empty_not_error() {
        let items = sample();
        let table = KeywordTable::generic();

        let filtered = filter_items(&items, "🚀 Rockets", &table);

        assert!(filtered.is_empty());
    }

    #[test]
    fn filtering_preserves_seed_order() {
        let items = sample();
        let mut table = KeywordTable::generic();
        table.insert("Everything", &["a", "e", "o"]);

        let filtered = filter_items(&items, "Everything", &table);

        let names: Vec<&str> = filtered.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Chicken Biryani",
                "Cheese Pizza",
                "Beef Burger",
                "Chocolate Shake"
            ]
        );
    }

    #[test]
    fn filter_is_idempotent() {
        let items = sample();
        let table = KeywordTable::favorites();

        let once: Vec<CatalogItem<'_>> = filter_items(&items, "🍔 Fast Food", &table)
            .into_iter()
            .cloned()
            .collect();
        let twice = filter_items(&once, "🍔 Fast Food", &table);

        assert_eq!(twice.len(), once.len());
    }
}

