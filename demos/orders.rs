//! Orders Demo
//!
//! Loads the order-history fixture, prints the in-flight orders with their
//! progress trackers, renders the history table, and shows the derived
//! stats next to the document's declared ones.
//!
//! Run with: `cargo run --example orders -- --filter Delivered`

use anyhow::Result;
use clap::Parser;
use jiff::Zoned;
use tabled::{
    builder::Builder,
    settings::{Color, Style, object::Rows},
};

use tiffin::{
    fixtures::orders::load_orders,
    orders::{StepState, progress_steps},
    utils::DemoArgs,
};

/// Orders Demo
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = DemoArgs::parse();

    let fixture = load_orders(args.fixture_or("fixtures/orders.json"))?;
    println!("{} — {}", fixture.title, fixture.subtitle);

    let declared = fixture.stats.clone();
    let mut history = fixture.into_history()?;
    history.set_filter(&args.filter);

    println!();
    println!("Current orders:");
    for order in history.current() {
        let tracker: String = progress_steps(order.status())
            .iter()
            .map(|step| match step.state {
                StepState::Completed => format!("[{}] ", step.label),
                StepState::Active => format!(">{}< ", step.label),
                StepState::Upcoming => format!(" {}  ", step.label),
            })
            .collect();

        println!(
            "  {} — {} | {} | est. {}",
            order.id(),
            order.restaurant(),
            order.status_text(),
            order.estimated_delivery(),
        );
        println!("    {tracker}");

        if let Some(rider) = order.rider() {
            println!("    rider: {} ({})", rider.name, rider.phone);
        }
    }

    let mut builder = Builder::default();
    builder.push_record(["Order", "Restaurant", "Placed", "Amount", "Status"]);

    for order in history.past() {
        builder.push_record([
            order.id().to_string(),
            order.restaurant().to_string(),
            order.placed_at().to_string(),
            order.total().to_string(),
            order.status_text().to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);

    println!();
    println!("Order history:");
    println!("{table}");

    let today = Zoned::now().date();
    let stats = history.stats(today)?;

    println!();
    println!(
        "{} orders, {} spent, {} delivered, {} cancelled, {} this month",
        stats.total_orders,
        stats.total_spent,
        stats.delivered,
        stats.cancelled,
        stats.current_month_orders,
    );

    if let Some(declared) = declared {
        println!(
            "declared by the data source: {} orders, {} minor units spent",
            declared.total_orders, declared.total_spent,
        );
    }

    Ok(())
}
