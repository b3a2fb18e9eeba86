//! End-to-end conformance of the derived-view pipeline: the filter, sort
//! and aggregate contracts exercised together through a seeded view store.

use rusty_money::{Money, iso::PKR};
use testresult::TestResult;

use tiffin::{
    filters::{ALL_CATEGORIES, KeywordTable, filter_items},
    fixtures::catalog::load_catalog,
    pricing::FeeSchedule,
    sorting::SortKey,
    views::ViewStore,
};

fn favorites_store() -> Result<ViewStore<'static>, Box<dyn std::error::Error>> {
    let fixture = load_catalog("fixtures/favorites.json")?;

    Ok(fixture.into_store(KeywordTable::favorites()))
}

#[test]
fn seeded_store_renders_everything_under_the_all_sentinel() -> TestResult {
    let store = favorites_store()?;

    assert_eq!(store.visible().len(), store.len());

    Ok(())
}

#[test]
fn filter_is_idempotent_over_the_seeded_collection() -> TestResult {
    let fixture = load_catalog("fixtures/favorites.json")?;
    let table = KeywordTable::favorites();

    for category in &fixture.filters {
        let once: Vec<_> = filter_items(&fixture.items, category, &table)
            .into_iter()
            .cloned()
            .collect();
        let twice = filter_items(&once, category, &table);

        assert_eq!(
            twice.len(),
            once.len(),
            "filtering twice by {category} changed the result"
        );
    }

    Ok(())
}

#[test]
fn category_filters_partition_sensibly() -> TestResult {
    let mut store = favorites_store()?;

    store.set_filter("🍛 Desi");
    let desi: Vec<String> = store
        .visible()
        .iter()
        .map(|(_, item)| item.name.clone())
        .collect();
    assert_eq!(desi, ["Chicken Biryani"]);

    store.set_filter("🥤 Drinks");
    let drinks: Vec<String> = store
        .visible()
        .iter()
        .map(|(_, item)| item.name.clone())
        .collect();
    assert_eq!(drinks, ["Chocolate Shake"]);

    Ok(())
}

#[test]
fn category_miss_yields_an_empty_sequence() -> TestResult {
    let mut store = favorites_store()?;

    store.set_filter("🌮 Mexican");

    assert!(store.visible().is_empty());

    Ok(())
}

#[test]
fn sort_keys_order_the_visible_sequence() -> TestResult {
    let mut store = favorites_store()?;

    store.set_sort(SortKey::PriceLow);
    let prices: Vec<i64> = store
        .visible()
        .iter()
        .map(|(_, item)| item.price.to_minor_units())
        .collect();
    let mut ascending = prices.clone();
    ascending.sort_unstable();
    assert_eq!(prices, ascending);

    store.set_sort(SortKey::Recent);
    let added: Vec<_> = store.visible().iter().map(|(_, item)| item.added_at).collect();
    let newest = added.first().copied().flatten();
    assert_eq!(
        newest,
        Some(jiff::civil::datetime(2025, 7, 12, 0, 0, 0, 0)),
        "most recently added favorite should lead"
    );

    Ok(())
}

#[test]
fn unknown_sort_key_keeps_seed_order() -> TestResult {
    let mut store = favorites_store()?;

    let seeded: Vec<String> = store
        .visible()
        .iter()
        .map(|(_, item)| item.name.clone())
        .collect();

    store.set_sort(SortKey::parse("alphabetical"));
    let after: Vec<String> = store
        .visible()
        .iter()
        .map(|(_, item)| item.name.clone())
        .collect();

    assert_eq!(seeded, after);

    Ok(())
}

#[test]
fn removal_is_idempotent_end_to_end() -> TestResult {
    let mut store = favorites_store()?;
    let (key, _) = *store.visible().first().expect("expected a seeded item");

    store.remove(key);
    let after_once = store.len();

    store.remove(key);

    assert_eq!(store.len(), after_once);

    Ok(())
}

#[test]
fn bulk_remove_honours_the_selection_invariant() -> TestResult {
    let mut store = favorites_store()?;

    let keys: Vec<_> = store.visible().iter().map(|(key, _)| *key).collect();
    let (selected, kept) = keys.split_at(3);

    for key in selected {
        store.toggle_select(*key);
    }

    store.bulk_remove_selected();

    assert_eq!(store.selected_count(), 0);
    for key in selected {
        assert!(store.get(*key).is_none(), "selected item survived removal");
    }
    for key in kept {
        assert!(store.get(*key).is_some(), "unselected item was removed");
    }

    Ok(())
}

#[test]
fn aggregate_matches_the_storefront_cart() -> TestResult {
    let mut store = ViewStore::new(KeywordTable::generic());

    let fixture = load_catalog("fixtures/favorites.json")?;
    let quantities = [
        ("Chicken Biryani", 2),
        ("Margherita Pizza", 1),
        ("Beef Burger", 3),
        ("Chocolate Shake", 2),
    ];

    for (name, quantity) in quantities {
        let item = fixture
            .items
            .iter()
            .find(|item| item.name == name)
            .expect("expected fixture item")
            .clone();
        let key = store.insert(item);
        store.set_quantity(key, quantity);
    }

    let totals = store.totals(&FeeSchedule::standard(PKR))?;

    // 850*2 + 1200 + 650*3 + 350*2 with fees 100/50 and discount 200.
    assert_eq!(totals.subtotal, Money::from_minor(5550, PKR));
    assert_eq!(totals.total, Money::from_minor(5500, PKR));

    Ok(())
}

#[test]
fn empty_cart_surfaces_the_negative_total() -> TestResult {
    let store: ViewStore<'_> = ViewStore::new(KeywordTable::generic());

    let totals = store.totals(&FeeSchedule::standard(PKR))?;

    assert_eq!(totals.delivery_fee, Money::from_minor(0, PKR));
    assert_eq!(totals.total, Money::from_minor(-150, PKR));
    assert!(totals.is_negative());

    Ok(())
}

#[test]
fn filter_state_never_changes_the_aggregates() -> TestResult {
    let mut store = favorites_store()?;

    let before = store.totals(&FeeSchedule::standard(PKR))?;

    store.set_filter("🍕 Italian");
    store.set_sort(SortKey::PriceHigh);
    let after = store.totals(&FeeSchedule::standard(PKR))?;

    assert_eq!(before.total, after.total);

    Ok(())
}

#[test]
fn visible_respects_all_sentinel_from_fixture_filters() -> TestResult {
    let fixture = load_catalog("fixtures/favorites.json")?;

    assert_eq!(fixture.filters.first().map(String::as_str), Some(ALL_CATEGORIES));

    Ok(())
}
