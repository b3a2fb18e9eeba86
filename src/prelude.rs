//! Tiffin prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    chrome::{AuthState, ChromeOptions, NavContext, UserProfile},
    countdown::{CountdownError, CountdownTimer, DealDeadline, TimeLeft},
    filters::{ALL_CATEGORIES, KeywordTable, LabelFallback, filter_items, matches_category},
    fixtures::{
        FixtureError,
        catalog::{CatalogFixture, load_catalog, parse_catalog},
        orders::{OrdersFixture, load_orders, parse_orders},
        today::{TodayFixture, load_today, parse_today},
    },
    items::{CatalogItem, DealError, DealTerms, ItemKey, Special, StockUrgency, top_rated},
    orders::{
        Order, OrderDraft, OrderError, OrderHistory, OrderLine, OrderStats, OrderStatus,
        ProgressStep, RiderContact, StatusStyle, StepState, progress_steps, style_for_label,
    },
    pricing::{CartLine, CartTotals, FeeSchedule, PricingError, cart_totals, discounted_price},
    receipt::{CartReceipt, ReceiptError},
    sorting::{SortKey, leading_minutes, sort_items},
    tags::{collection::TagCollection, string::StringTagCollection},
    views::{ViewState, ViewStore},
};
