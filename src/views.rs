//! Views
//!
//! The derived-view pipeline and its per-view mutation store. Each view owns
//! a working copy of its collection plus ephemeral state (filter, sort,
//! selection, quantities); every read of the render sequence re-runs
//! filter → sort over live state, nothing is cached eagerly.

use rustc_hash::FxHashSet;
use slotmap::{SecondaryMap, SlotMap};

use crate::{
    filters::{ALL_CATEGORIES, KeywordTable, matches_category},
    items::{CatalogItem, ItemKey},
    pricing::{CartLine, CartTotals, FeeSchedule, PricingError, cart_totals},
    sorting::SortKey,
    tags::{collection::TagCollection, string::StringTagCollection},
};

/// Ephemeral per-view state: the active category filter and sort key.
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Active category label; defaults to the "All" sentinel.
    pub category: String,

    /// Active sort key; defaults to the identity pass-through.
    pub sort: SortKey,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            category: ALL_CATEGORIES.to_string(),
            sort: SortKey::default(),
        }
    }
}

/// A view's working collection and interaction state.
///
/// The cart, favorites and restaurant views are all instances of this store
/// configured with their own keyword table; none of them share state.
#[derive(Debug)]
pub struct ViewStore<'a, T: TagCollection = StringTagCollection> {
    items: SlotMap<ItemKey, CatalogItem<'a, T>>,
    seed_order: Vec<ItemKey>,
    quantities: SecondaryMap<ItemKey, u32>,
    selected: FxHashSet<ItemKey>,
    state: ViewState,
    keywords: KeywordTable,
}

impl<'a, T: TagCollection> ViewStore<'a, T> {
    /// Create an empty store with the given keyword table.
    #[must_use]
    pub fn new(keywords: KeywordTable) -> Self {
        Self {
            items: SlotMap::with_key(),
            seed_order: Vec::new(),
            quantities: SecondaryMap::new(),
            selected: FxHashSet::default(),
            state: ViewState::default(),
            keywords,
        }
    }

    /// Create a store seeded with the given items, preserving their order.
    pub fn seeded(
        keywords: KeywordTable,
        items: impl IntoIterator<Item = CatalogItem<'a, T>>,
    ) -> Self {
        let mut store = Self::new(keywords);

        for item in items {
            store.insert(item);
        }

        store
    }

    /// Add an item to the working collection.
    pub fn insert(&mut self, item: CatalogItem<'a, T>) -> ItemKey {
        let key = self.items.insert(item);
        self.seed_order.push(key);

        key
    }

    /// Look an item up by key.
    pub fn get(&self, key: ItemKey) -> Option<&CatalogItem<'a, T>> {
        self.items.get(key)
    }

    /// Number of items in the working collection.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the working collection is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The view's current filter/sort state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Replace the active category filter. The pipeline re-runs on the next
    /// read.
    pub fn set_filter(&mut self, category: impl Into<String>) {
        self.state.category = category.into();
    }

    /// Replace the active sort key. The pipeline re-runs on the next read.
    pub fn set_sort(&mut self, sort: SortKey) {
        self.state.sort = sort;
    }

    /// Chosen quantity for an item; defaults to 1.
    pub fn quantity(&self, key: ItemKey) -> u32 {
        self.quantities.get(key).copied().unwrap_or(1)
    }

    /// Set an item's quantity. Quantities below 1 are silently rejected, as
    /// are keys outside the collection.
    pub fn set_quantity(&mut self, key: ItemKey, quantity: u32) {
        if quantity < 1 {
            tracing::debug!(?key, quantity, "quantity below 1 rejected");
            return;
        }

        if !self.items.contains_key(key) {
            tracing::debug!(?key, "quantity change for unknown item ignored");
            return;
        }

        self.quantities.insert(key, quantity);
    }

    /// Bump an item's quantity by one.
    pub fn increase_quantity(&mut self, key: ItemKey) {
        self.set_quantity(key, self.quantity(key).saturating_add(1));
    }

    /// Drop an item's quantity by one, never below 1.
    pub fn decrease_quantity(&mut self, key: ItemKey) {
        self.set_quantity(key, self.quantity(key).saturating_sub(1));
    }

    /// Remove an item. Removing an absent key is a no-op, not an error.
    pub fn remove(&mut self, key: ItemKey) {
        if self.items.remove(key).is_none() {
            return;
        }

        self.seed_order.retain(|existing| *existing != key);
        self.quantities.remove(key);
        self.selected.remove(&key);
    }

    /// Toggle an item's membership in the selection set. Unknown keys are
    /// ignored.
    pub fn toggle_select(&mut self, key: ItemKey) {
        if !self.items.contains_key(key) {
            return;
        }

        if !self.selected.insert(key) {
            self.selected.remove(&key);
        }
    }

    /// Whether an item is currently selected.
    pub fn is_selected(&self, key: ItemKey) -> bool {
        self.selected.contains(&key)
    }

    /// Number of selected items.
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Remove every selected item, then clear the selection set.
    pub fn bulk_remove_selected(&mut self) {
        let selected: Vec<ItemKey> = self.selected.iter().copied().collect();

        for key in selected {
            self.remove(key);
        }

        self.selected.clear();
    }

    /// Empty the working collection and all per-item state.
    pub fn clear(&mut self) {
        self.items.clear();
        self.seed_order.clear();
        self.quantities.clear();
        self.selected.clear();
    }

    /// Run the pipeline: filter by the active category, then stable-sort by
    /// the active key. Returns the exact sequence to render.
    pub fn visible(&self) -> Vec<(ItemKey, &CatalogItem<'a, T>)> {
        let mut sequence: Vec<(ItemKey, &CatalogItem<'a, T>)> = self
            .seed_order
            .iter()
            .filter_map(|key| self.items.get(*key).map(|item| (*key, item)))
            .filter(|(_, item)| matches_category(item, &self.state.category, &self.keywords))
            .collect();

        sequence.sort_by(|(_, a), (_, b)| self.state.sort.compare(a, b));

        sequence
    }

    /// Snapshot the full collection as cart lines with chosen quantities,
    /// in seed order. Aggregation runs over all lines, not the filtered
    /// subset.
    pub fn cart_lines(&self) -> Vec<CartLine<'a>> {
        self.seed_order
            .iter()
            .filter_map(|key| self.items.get(*key).map(|item| (*key, item)))
            .map(|(key, item)| CartLine::new(item.name.clone(), item.price, self.quantity(key)))
            .collect()
    }

    /// Aggregate the cart under a fee schedule.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if a line subtotal overflows or the money
    /// arithmetic fails.
    pub fn totals(&self, fees: &FeeSchedule<'a>) -> Result<CartTotals<'a>, PricingError> {
        cart_totals(&self.cart_lines(), fees)
    }

    /// Log the intention to favorite an item. The favorites collection is
    /// another view's state; nothing is mutated here.
    pub fn flag_favorite(&self, key: ItemKey) {
        if let Some(item) = self.items.get(key) {
            tracing::info!(item = %item.name, "favorite requested");
        }
    }

    /// Log the intention to order the selected items. No order entity is
    /// produced here.
    pub fn order_selected(&self) {
        tracing::info!(count = self.selected.len(), "order of selected items requested");
    }

    /// Log a coupon application. The fee schedule is never recomputed from
    /// a coupon; empty codes are rejected.
    pub fn apply_coupon(&self, code: &str) -> bool {
        let code = code.trim();

        if code.is_empty() {
            tracing::debug!("empty coupon code ignored");
            return false;
        }

        tracing::info!(coupon = code, "coupon applied");

        true
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::{Money, iso::PKR};
    use testresult::TestResult;

    use super::*;

    fn item<'b>(name: &str, price: i64, cuisine: &str) -> CatalogItem<'b> {
        CatalogItem {
            name: name.to_string(),
            restaurant: "Test Kitchen".to_string(),
            cuisine: cuisine.to_string(),
            price: Money::from_minor(price, PKR),
            rating: Decimal::new(44, 1),
            delivery_estimate: "25-30 min".to_string(),
            image: String::new(),
            tags: StringTagCollection::empty(),
            added_at: None,
            min_order: None,
        }
    }

    fn cart_store<'b>() -> (ViewStore<'b>, Vec<ItemKey>) {
        let mut store = ViewStore::new(KeywordTable::generic());

        let keys = vec![
            store.insert(item("Chicken Biryani", 850, "Desi")),
            store.insert(item("Cheese Pizza", 1200, "Italian")),
            store.insert(item("Beef Burger", 650, "Fast Food")),
            store.insert(item("Chocolate Shake", 350, "Beverages")),
        ];

        (store, keys)
    }

    #[test]
    fn quantities_default_to_one_and_floor_at_one() {
        let (mut store, keys) = cart_store();
        let key = keys[0];

        assert_eq!(store.quantity(key), 1);

        store.set_quantity(key, 3);
        assert_eq!(store.quantity(key), 3);

        store.set_quantity(key, 0);
        assert_eq!(store.quantity(key), 3);

        store.decrease_quantity(key);
        store.decrease_quantity(key);
        assert_eq!(store.quantity(key), 1);

        // Decrementing at the floor is silently rejected.
        store.decrease_quantity(key);
        assert_eq!(store.quantity(key), 1);
    }

    #[test]
    fn remove_is_idempotent() {
        let (mut store, keys) = cart_store();
        let key = keys[1];

        store.remove(key);
        assert_eq!(store.len(), 3);

        store.remove(key);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn toggle_select_adds_then_removes() {
        let (mut store, keys) = cart_store();
        let key = keys[2];

        store.toggle_select(key);
        assert!(store.is_selected(key));

        store.toggle_select(key);
        assert!(!store.is_selected(key));
    }

    #[test]
    fn bulk_remove_clears_selection_and_selected_items() {
        let (mut store, keys) = cart_store();

        store.toggle_select(keys[0]);
        store.toggle_select(keys[2]);

        store.bulk_remove_selected();

        assert_eq!(store.selected_count(), 0);
        assert_eq!(store.len(), 2);
        assert!(store.get(keys[0]).is_none());
        assert!(store.get(keys[2]).is_none());
        assert!(store.get(keys[1]).is_some());
    }

    #[test]
    fn visible_runs_filter_then_sort() {
        let (mut store, _keys) = cart_store();

        store.set_filter("All");
        store.set_sort(SortKey::PriceLow);

        let names: Vec<&str> = store.visible().iter().map(|(_, i)| i.name.as_str()).collect();
        assert_eq!(
            names,
            ["Chocolate Shake", "Beef Burger", "Chicken Biryani", "Cheese Pizza"]
        );

        store.set_filter("Italian");
        let names: Vec<&str> = store.visible().iter().map(|(_, i)| i.name.as_str()).collect();
        assert_eq!(names, ["Cheese Pizza"]);
    }

    #[test]
    fn pipeline_reruns_on_read_after_mutation() {
        let (mut store, keys) = cart_store();

        store.set_filter("Italian");
        assert_eq!(store.visible().len(), 1);

        store.remove(keys[1]);
        assert!(store.visible().is_empty());
    }

    #[test]
    fn totals_cover_the_full_collection_not_the_filtered_subset() -> TestResult {
        let (mut store, keys) = cart_store();

        store.set_quantity(keys[0], 2);
        store.set_quantity(keys[2], 3);
        store.set_quantity(keys[3], 2);
        store.set_filter("Italian");

        let totals = store.totals(&FeeSchedule::standard(PKR))?;

        assert_eq!(totals.subtotal, Money::from_minor(5550, PKR));
        assert_eq!(totals.total, Money::from_minor(5500, PKR));

        Ok(())
    }

    #[test]
    fn cleared_store_aggregates_as_empty_cart() -> TestResult {
        let (mut store, _keys) = cart_store();

        store.clear();
        let totals = store.totals(&FeeSchedule::standard(PKR))?;

        assert_eq!(totals.delivery_fee, Money::from_minor(0, PKR));
        assert_eq!(totals.total, Money::from_minor(-150, PKR));
        assert!(totals.is_negative());

        Ok(())
    }

    #[test]
    fn coupon_application_is_logged_but_rejects_empty_codes() {
        let (store, _keys) = cart_store();

        assert!(store.apply_coupon("WELCOME20"));
        assert!(!store.apply_coupon("   "));
    }
}
