//! Cart Demo
//!
//! Seeds a cart from the favorites fixture, mutates quantities, applies a
//! coupon (logged only), and prints the order summary — then shows the
//! today's-deals upsell with a live countdown snapshot.
//!
//! Run with: `cargo run --example cart`

use anyhow::Result;
use clap::Parser;
use jiff::Zoned;

use tiffin::{
    countdown::CountdownTimer,
    filters::KeywordTable,
    fixtures::{catalog::load_catalog, today::load_today},
    pricing::FeeSchedule,
    receipt::CartReceipt,
    utils::DemoArgs,
    views::ViewStore,
};

/// Cart Demo
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = DemoArgs::parse();

    let fixture = load_catalog(args.fixture_or("fixtures/favorites.json"))?;
    let currency = fixture.currency;
    let mut cart = ViewStore::seeded(KeywordTable::generic(), fixture.items);

    let keys: Vec<_> = cart.visible().iter().map(|(key, _)| *key).collect();

    // Twice the biryani, a shake for everyone, and one item saved for later.
    if let Some(first) = keys.first() {
        cart.set_quantity(*first, 2);
        cart.flag_favorite(*first);
    }
    if let Some(last) = keys.last() {
        cart.increase_quantity(*last);
    }
    if let Some(fourth) = keys.get(3) {
        cart.remove(*fourth);
    }

    cart.apply_coupon("WELCOME20");

    let receipt = CartReceipt::new(cart.cart_lines(), &FeeSchedule::standard(currency))?;
    receipt.write_to(std::io::stdout())?;

    let today = load_today(args.today_or("fixtures/today.json"))?;
    let timer = CountdownTimer::new(today.countdown.deadline);
    let now = Zoned::now().datetime();

    println!();
    println!("{}", today.title);
    if let Some(left) = timer.poll(now) {
        println!("  {} {left}", today.countdown.title);
    }

    for special in &today.specials {
        println!(
            "  {} — {} (was {}, now {}, save {})",
            special.item.name,
            special.item.restaurant,
            special.deal.original_price(),
            special.deal.discounted_price(),
            special.deal.savings()?,
        );
    }

    Ok(())
}
