//! Favorites Demo
//!
//! Loads the favorites fixture and walks the derived-view pipeline: filter
//! by a category, sort by a key, select a couple of items and bulk-remove
//! them.
//!
//! Run with: `cargo run --example favorites -- --filter "🍛 Desi"`

use anyhow::Result;
use clap::Parser;

use tiffin::{
    filters::KeywordTable, fixtures::catalog::load_catalog, sorting::SortKey, utils::DemoArgs,
};

/// Favorites Demo
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = DemoArgs::parse();

    let fixture = load_catalog(args.fixture_or("fixtures/favorites.json"))?;
    println!("{} — {}", fixture.title, fixture.subtitle);
    println!("categories: {}", fixture.filters.join(", "));
    println!();

    let mut favorites = fixture.into_store(KeywordTable::favorites());
    favorites.set_filter(&args.filter);
    favorites.set_sort(SortKey::parse(&args.sort));

    println!("{} ({} shown)", args.filter, favorites.visible().len());
    for (_, item) in favorites.visible() {
        println!(
            "  {} — {} | {} | rated {} | {}",
            item.name, item.restaurant, item.price, item.rating, item.delivery_estimate,
        );
    }

    // Select the two cheapest and drop them in one go.
    favorites.set_sort(SortKey::PriceLow);
    let cheapest: Vec<_> = favorites
        .visible()
        .iter()
        .take(2)
        .map(|(key, _)| *key)
        .collect();

    for key in cheapest {
        favorites.toggle_select(key);
    }

    favorites.order_selected();

    println!();
    println!("removing {} selected items", favorites.selected_count());
    favorites.bulk_remove_selected();
    println!("{} favorites left", favorites.len());

    Ok(())
}
