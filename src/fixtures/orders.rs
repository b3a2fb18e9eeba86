//! Order Fixtures
//!
//! The order-history seed document: placed orders, the status filter
//! labels, and the stats block the header cards display.

use std::{fs, path::Path};

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;

use crate::{
    fixtures::{FixtureError, check_price, document_currency, parse_date, parse_time},
    orders::{Order, OrderDraft, OrderHistory, OrderLine, OrderStatus, RiderContact},
};

/// Raw orders document shape.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrdersDocument {
    title: String,

    subtitle: String,

    #[serde(default)]
    currency: Option<String>,

    #[serde(default)]
    filters: Vec<String>,

    orders: Vec<OrderRecord>,

    #[serde(default)]
    stats: Option<DeclaredOrderStats>,
}

/// Raw order record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderRecord {
    id: String,

    restaurant: String,

    status: String,

    status_text: String,

    date: String,

    time: String,

    items: Vec<LineRecord>,

    total_amount: i64,

    delivery_address: String,

    #[serde(default)]
    rider_name: Option<String>,

    #[serde(default)]
    rider_phone: Option<String>,

    payment_method: String,

    estimated_delivery: String,

    #[serde(default)]
    actual_delivery: Option<String>,

    #[serde(default)]
    rating: Option<u8>,

    can_reorder: bool,
}

/// Raw order line record.
#[derive(Debug, Deserialize)]
struct LineRecord {
    name: String,

    quantity: u32,

    price: i64,
}

/// The stats block as declared by the document. These are display values;
/// derived stats come from [`OrderHistory::stats`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclaredOrderStats {
    /// Declared lifetime order count.
    pub total_orders: usize,

    /// Declared lifetime spend in minor units.
    pub total_spent: i64,

    /// Declared orders this month.
    pub current_month_orders: usize,

    /// Most-ordered restaurant name.
    #[serde(default)]
    pub favorite_restaurant: Option<String>,
}

/// A parsed order-history seed.
#[derive(Debug)]
pub struct OrdersFixture {
    /// View title.
    pub title: String,

    /// View subtitle.
    pub subtitle: String,

    /// Status filter labels the view offers.
    pub filters: Vec<String>,

    /// Currency all order totals are denominated in.
    pub currency: &'static Currency,

    /// The validated orders, in document order.
    pub orders: Vec<Order<'static>>,

    /// The document's declared stats block, when present.
    pub stats: Option<DeclaredOrderStats>,
}

impl OrdersFixture {
    /// Move the orders into an order-history view.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the history rejects the orders.
    pub fn into_history(self) -> Result<OrderHistory<'static>, FixtureError> {
        OrderHistory::with_orders(self.orders, self.currency).map_err(FixtureError::from)
    }
}

/// Parse an order-history seed document.
///
/// # Errors
///
/// Returns a [`FixtureError`] on JSON syntax errors, unknown statuses,
/// malformed dates or times, negative prices, or order invariant
/// violations (a declared total that does not match its lines, terminal
/// statuses with inconsistent delivery timestamps, out-of-range ratings).
pub fn parse_orders(source: &str) -> Result<OrdersFixture, FixtureError> {
    let document: OrdersDocument = serde_json::from_str(source)?;
    let currency = document_currency(document.currency.as_deref())?;

    let orders = document
        .orders
        .into_iter()
        .map(|record| order_from_record(record, currency))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(OrdersFixture {
        title: document.title,
        subtitle: document.subtitle,
        filters: document.filters,
        currency,
        orders,
        stats: document.stats,
    })
}

/// Read and parse an order-history seed document from disk.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the file cannot be read or parsed.
pub fn load_orders(path: impl AsRef<Path>) -> Result<OrdersFixture, FixtureError> {
    parse_orders(&fs::read_to_string(path)?)
}

fn status_from_wire(status: &str) -> Result<OrderStatus, FixtureError> {
    match status {
        "preparing" => Ok(OrderStatus::Preparing),
        "on_the_way" => Ok(OrderStatus::OnTheWay),
        "delivered" => Ok(OrderStatus::Delivered),
        "cancelled" => Ok(OrderStatus::Cancelled),
        other => Err(FixtureError::UnknownStatus(other.to_string())),
    }
}

fn order_from_record(
    record: OrderRecord,
    currency: &'static Currency,
) -> Result<Order<'static>, FixtureError> {
    let status = status_from_wire(&record.status)?;
    let placed_at = parse_date(&record.date)?.to_datetime(parse_time(&record.time)?);

    let lines = record
        .items
        .into_iter()
        .map(|line| {
            check_price(line.price).map(|minor| OrderLine {
                name: line.name,
                quantity: line.quantity,
                unit_price: Money::from_minor(minor, currency),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let rider = match (record.rider_name, record.rider_phone) {
        (Some(name), Some(phone)) => Some(RiderContact { name, phone }),
        (Some(name), None) => Some(RiderContact {
            name,
            phone: String::new(),
        }),
        _ => None,
    };

    let draft = OrderDraft {
        id: record.id,
        restaurant: record.restaurant,
        status,
        status_text: record.status_text,
        placed_at,
        lines,
        total: Money::from_minor(check_price(record.total_amount)?, currency),
        delivery_address: record.delivery_address,
        rider,
        payment_method: record.payment_method,
        estimated_delivery: record.estimated_delivery,
        actual_delivery: record.actual_delivery,
        rating: record.rating,
        can_reorder: record.can_reorder,
    };

    Order::new(draft).map_err(FixtureError::from)
}

#[cfg(test)]
mod tests {
    use jiff::civil;
    use rusty_money::iso::PKR;
    use testresult::TestResult;

    use crate::orders::OrderError;

    use super::*;

    const ORDERS_DOC: &str = r#"{
        "title": "My Orders",
        "subtitle": "Track and manage your orders",
        "filters": ["All", "Preparing", "On The Way", "Delivered", "Cancelled"],
        "orders": [
            {
                "id": "ORD-2025-101",
                "restaurant": "Biryani Point",
                "status": "on_the_way",
                "statusText": "On the way",
                "date": "2025-07-14",
                "time": "19:30",
                "items": [
                    {"name": "Chicken Biryani", "quantity": 2, "price": 850},
                    {"name": "Raita", "quantity": 1, "price": 100}
                ],
                "totalAmount": 1800,
                "deliveryAddress": "123 Main Street, Gulberg, Lahore",
                "riderName": "Ahmed Khan",
                "riderPhone": "+92 300 1234567",
                "paymentMethod": "Cash on Delivery",
                "estimatedDelivery": "20:10",
                "canReorder": false
            },
            {
                "id": "ORD-2025-097",
                "restaurant": "Burger Lab",
                "status": "delivered",
                "statusText": "Delivered",
                "date": "2025-07-10",
                "time": "13:05",
                "items": [
                    {"name": "Beef Burger", "quantity": 3, "price": 650}
                ],
                "totalAmount": 1950,
                "deliveryAddress": "123 Main Street, Gulberg, Lahore",
                "paymentMethod": "JazzCash",
                "estimatedDelivery": "13:45",
                "actualDelivery": "38 min",
                "rating": 5,
                "canReorder": true
            }
        ],
        "stats": {
            "totalOrders": 2,
            "totalSpent": 3750,
            "currentMonthOrders": 2,
            "favoriteRestaurant": "Biryani Point"
        }
    }"#;

    #[test]
    fn parse_orders_reads_the_document_shape() -> TestResult {
        let fixture = parse_orders(ORDERS_DOC)?;

        assert_eq!(fixture.title, "My Orders");
        assert_eq!(fixture.orders.len(), 2);
        assert_eq!(fixture.currency, PKR);

        let first = fixture.orders.first().expect("expected a first order");
        assert_eq!(first.id(), "ORD-2025-101");
        assert_eq!(first.status(), OrderStatus::OnTheWay);
        assert_eq!(first.placed_at(), civil::datetime(2025, 7, 14, 19, 30, 0, 0));
        assert_eq!(first.total(), Money::from_minor(1800, PKR));
        assert_eq!(first.rider().map(|r| r.name.as_str()), Some("Ahmed Khan"));

        let stats = fixture.stats.as_ref().expect("expected a stats block");
        assert_eq!(stats.total_spent, 3750);

        Ok(())
    }

    #[test]
    fn into_history_builds_the_view() -> TestResult {
        let history = parse_orders(ORDERS_DOC)?.into_history()?;

        assert_eq!(history.len(), 2);
        assert_eq!(history.current().len(), 1);
        assert_eq!(history.past().len(), 1);

        let derived = history.stats(civil::date(2025, 7, 20))?;
        assert_eq!(derived.total_spent, Money::from_minor(3750, PKR));

        Ok(())
    }

    #[test]
    fn unknown_status_is_rejected() {
        let doc = ORDERS_DOC.replace("on_the_way", "teleporting");

        assert!(matches!(
            parse_orders(&doc),
            Err(FixtureError::UnknownStatus(status)) if status == "teleporting"
        ));
    }

    #[test]
    fn total_mismatch_in_seed_data_is_rejected() {
        let doc = ORDERS_DOC.replace("\"totalAmount\": 1800", "\"totalAmount\": 1750");

        assert!(matches!(
            parse_orders(&doc),
            Err(FixtureError::Order(OrderError::TotalMismatch(_, 1750, 1800)))
        ));
    }

    #[test]
    fn malformed_time_is_rejected() {
        let doc = ORDERS_DOC.replace("\"19:30\"", "\"7:30 pm\"");

        assert!(matches!(
            parse_orders(&doc),
            Err(FixtureError::InvalidTime(_))
        ));
    }
}
