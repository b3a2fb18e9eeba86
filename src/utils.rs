//! Utils

use clap::Parser;

/// Arguments shared by the storefront demos
#[derive(Debug, Parser)]
pub struct DemoArgs {
    /// Fixture document to load, overriding the demo's default
    #[clap(short, long)]
    pub fixture: Option<String>,

    /// Today's-specials fixture, for demos that show the deals section
    #[clap(short, long)]
    pub today: Option<String>,

    /// Active category or status filter label
    #[clap(long, default_value = "All")]
    pub filter: String,

    /// Sort key for list views
    #[clap(short, long, default_value = "recent")]
    pub sort: String,
}

impl DemoArgs {
    /// The fixture path, or the demo's default.
    #[must_use]
    pub fn fixture_or(&self, default: &str) -> String {
        self.fixture.clone().unwrap_or_else(|| default.to_string())
    }

    /// The today's-specials path, or the demo's default.
    #[must_use]
    pub fn today_or(&self, default: &str) -> String {
        self.today.clone().unwrap_or_else(|| default.to_string())
    }
}
