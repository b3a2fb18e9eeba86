//! Orders
//!
//! Placed-order records with a status lifecycle, the status presentation
//! table, and the order-history view over them.

use std::fmt;

use jiff::civil;
use rusty_money::{Money, MoneyError, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to order construction or lifecycle operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Declared total does not match the line subtotals (order id, declared, computed).
    #[error("order {0} declares total {1}, but its lines sum to {2}")]
    TotalMismatch(String, i64, i64),

    /// A line has quantity zero (order id, line index).
    #[error("order {0} line {1} has zero quantity")]
    ZeroQuantityLine(String, usize),

    /// A line subtotal overflowed minor units (order id).
    #[error("order {0} line subtotal overflows minor units")]
    LineOverflow(String),

    /// A cancelled order records an actual delivery time.
    #[error("order {0} is cancelled but records an actual delivery time")]
    CancelledWithDelivery(String),

    /// A delivered order records no actual delivery time.
    #[error("order {0} is delivered but records no actual delivery time")]
    DeliveredWithoutDelivery(String),

    /// A rating is present on an order that was never delivered.
    #[error("order {0} has a rating but was not delivered")]
    RatingBeforeDelivery(String),

    /// A rating is outside the 1 to 5 range (order id, rating).
    #[error("rating {1} for order {0} is outside 1-5")]
    RatingOutOfRange(String, u8),

    /// An illegal status transition was requested (order id, from, to).
    #[error("order {0} cannot move from {1} to {2}")]
    InvalidTransition(String, OrderStatus, OrderStatus),

    /// An order's currency differs from the history currency (index, order currency, history currency).
    #[error("Order {0} has currency {1}, but history has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),

    /// No order with the given id exists.
    #[error("order {0} not found")]
    NotFound(String),

    /// Reorder requested for an order that is not reorder-eligible.
    #[error("order {0} is not eligible for reorder")]
    ReorderUnavailable(String),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Lifecycle status of a placed order.
///
/// `preparing → on_the_way → delivered`, with cancellation possible from
/// either non-terminal status. Delivered and cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// The restaurant is preparing the order.
    Preparing,

    /// A rider has picked the order up.
    OnTheWay,

    /// The order arrived. Terminal.
    Delivered,

    /// The order was cancelled. Terminal.
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OrderStatus::Preparing => "preparing",
            OrderStatus::OnTheWay => "on_the_way",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        })
    }
}

impl OrderStatus {
    /// Whether no further transition is possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Whether the lifecycle permits moving from `self` to `next`.
    ///
    /// Cancelling from on-the-way is permitted here; the storefront UI may
    /// still disable it, which is a business rule, not a data rule.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Preparing, OrderStatus::OnTheWay)
                | (OrderStatus::Preparing | OrderStatus::OnTheWay, OrderStatus::Cancelled)
                | (OrderStatus::OnTheWay, OrderStatus::Delivered)
        )
    }

    /// Parse a status-filter label from the orders view. "Pending" and
    /// "Preparing" both mean preparing. Unknown labels return `None`.
    #[must_use]
    pub fn parse_filter_label(label: &str) -> Option<Self> {
        match label {
            "Pending" | "Preparing" => Some(OrderStatus::Preparing),
            "On The Way" => Some(OrderStatus::OnTheWay),
            "Delivered" => Some(OrderStatus::Delivered),
            "Cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    /// Presentation style for this status.
    pub fn style(self) -> StatusStyle {
        match self {
            OrderStatus::Delivered => StatusStyle {
                color: "#22c55e",
                icon: "check",
            },
            OrderStatus::Preparing => StatusStyle {
                color: "#f97316",
                icon: "chef-hat",
            },
            OrderStatus::OnTheWay => StatusStyle {
                color: "#3b82f6",
                icon: "truck",
            },
            OrderStatus::Cancelled => StatusStyle {
                color: "#ef4444",
                icon: "x",
            },
        }
    }

    /// Default human status text used when a transition replaces the text
    /// that came with the seed data.
    pub fn default_text(self) -> &'static str {
        match self {
            OrderStatus::Preparing => "Being prepared",
            OrderStatus::OnTheWay => "On the way",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

/// Color and icon pair for a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStyle {
    /// Badge color, as a hex string.
    pub color: &'static str,

    /// Icon name.
    pub icon: &'static str,
}

impl StatusStyle {
    /// Style for labels that fail to parse as a status.
    pub const FALLBACK: StatusStyle = StatusStyle {
        color: "#64748b",
        icon: "package",
    };
}

/// Resolve a status label to its badge style, falling back to
/// [`StatusStyle::FALLBACK`] for unknown labels.
#[must_use]
pub fn style_for_label(label: &str) -> StatusStyle {
    OrderStatus::parse_filter_label(label).map_or(StatusStyle::FALLBACK, OrderStatus::style)
}

/// State of one step in the order progress tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    /// The step is done.
    Completed,

    /// The step is where the order currently is.
    Active,

    /// The step has not been reached.
    Upcoming,
}

/// One step of the four-step progress tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressStep {
    /// Step label.
    pub label: &'static str,

    /// Step state derived from the order status.
    pub state: StepState,
}

/// Derive the four progress-tracker steps from an order status.
#[must_use]
pub fn progress_steps(status: OrderStatus) -> [ProgressStep; 4] {
    let ordered = if status == OrderStatus::Preparing {
        StepState::Active
    } else {
        StepState::Completed
    };

    let preparing = match status {
        OrderStatus::Preparing | OrderStatus::OnTheWay => StepState::Active,
        _ => StepState::Completed,
    };

    let on_way = if status == OrderStatus::OnTheWay {
        StepState::Active
    } else {
        StepState::Upcoming
    };

    let delivered = if status == OrderStatus::Delivered {
        StepState::Completed
    } else {
        StepState::Upcoming
    };

    [
        ProgressStep {
            label: "Ordered",
            state: ordered,
        },
        ProgressStep {
            label: "Preparing",
            state: preparing,
        },
        ProgressStep {
            label: "On Way",
            state: on_way,
        },
        ProgressStep {
            label: "Delivered",
            state: delivered,
        },
    ]
}

/// One line of a placed order.
#[derive(Debug, Clone)]
pub struct OrderLine<'a> {
    /// Item name as ordered.
    pub name: String,

    /// Quantity ordered, at least 1.
    pub quantity: u32,

    /// Unit price at order time.
    pub unit_price: Money<'a, Currency>,
}

/// The rider assigned to an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiderContact {
    /// Rider name.
    pub name: String,

    /// Rider phone number.
    pub phone: String,
}

/// Unvalidated order fields, as read from the seed data.
#[derive(Debug, Clone)]
pub struct OrderDraft<'a> {
    /// Order id, e.g. "ORD-2025-001".
    pub id: String,

    /// Restaurant the order was placed with.
    pub restaurant: String,

    /// Lifecycle status.
    pub status: OrderStatus,

    /// Human status text.
    pub status_text: String,

    /// When the order was placed.
    pub placed_at: civil::DateTime,

    /// Ordered lines.
    pub lines: Vec<OrderLine<'a>>,

    /// Declared total; must equal the sum of line subtotals.
    pub total: Money<'a, Currency>,

    /// Delivery address.
    pub delivery_address: String,

    /// Assigned rider, when any.
    pub rider: Option<RiderContact>,

    /// Payment method label.
    pub payment_method: String,

    /// Estimated delivery time text.
    pub estimated_delivery: String,

    /// Actual delivery time text, once delivered.
    pub actual_delivery: Option<String>,

    /// Customer rating, 1 to 5, for delivered orders.
    pub rating: Option<u8>,

    /// Whether the storefront offers one-tap reorder for this order.
    pub can_reorder: bool,
}

/// A validated placed order.
#[derive(Debug, Clone)]
pub struct Order<'a> {
    draft: OrderDraft<'a>,
}

impl<'a> Order<'a> {
    /// Validate a draft into an order.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError`] if a line quantity is zero, the declared
    /// total does not match the line subtotals, a terminal-status timestamp
    /// rule is violated, or a rating is present on a non-delivered order or
    /// outside 1-5.
    pub fn new(draft: OrderDraft<'a>) -> Result<Self, OrderError> {
        for (index, line) in draft.lines.iter().enumerate() {
            if line.quantity == 0 {
                return Err(OrderError::ZeroQuantityLine(draft.id.clone(), index));
            }
        }

        let computed = lines_total(&draft.id, &draft.lines, draft.total.currency())?;
        if computed.to_minor_units() != draft.total.to_minor_units() {
            return Err(OrderError::TotalMismatch(
                draft.id.clone(),
                draft.total.to_minor_units(),
                computed.to_minor_units(),
            ));
        }

        match draft.status {
            OrderStatus::Cancelled if draft.actual_delivery.is_some() => {
                return Err(OrderError::CancelledWithDelivery(draft.id.clone()));
            }
            OrderStatus::Delivered if draft.actual_delivery.is_none() => {
                return Err(OrderError::DeliveredWithoutDelivery(draft.id.clone()));
            }
            _ => {}
        }

        if let Some(rating) = draft.rating {
            if draft.status != OrderStatus::Delivered {
                return Err(OrderError::RatingBeforeDelivery(draft.id.clone()));
            }

            if !(1..=5).contains(&rating) {
                return Err(OrderError::RatingOutOfRange(draft.id.clone(), rating));
            }
        }

        Ok(Self { draft })
    }

    /// Order id.
    pub fn id(&self) -> &str {
        &self.draft.id
    }

    /// Restaurant the order was placed with.
    pub fn restaurant(&self) -> &str {
        &self.draft.restaurant
    }

    /// Current lifecycle status.
    pub fn status(&self) -> OrderStatus {
        self.draft.status
    }

    /// Human status text.
    pub fn status_text(&self) -> &str {
        &self.draft.status_text
    }

    /// When the order was placed.
    pub fn placed_at(&self) -> civil::DateTime {
        self.draft.placed_at
    }

    /// Ordered lines.
    pub fn lines(&self) -> &[OrderLine<'a>] {
        &self.draft.lines
    }

    /// Order total.
    pub fn total(&self) -> Money<'a, Currency> {
        self.draft.total
    }

    /// Delivery address.
    pub fn delivery_address(&self) -> &str {
        &self.draft.delivery_address
    }

    /// Assigned rider, when any.
    pub fn rider(&self) -> Option<&RiderContact> {
        self.draft.rider.as_ref()
    }

    /// Payment method label.
    pub fn payment_method(&self) -> &str {
        &self.draft.payment_method
    }

    /// Estimated delivery time text.
    pub fn estimated_delivery(&self) -> &str {
        &self.draft.estimated_delivery
    }

    /// Actual delivery time text, once delivered.
    pub fn actual_delivery(&self) -> Option<&str> {
        self.draft.actual_delivery.as_deref()
    }

    /// Customer rating, when given.
    pub fn rating(&self) -> Option<u8> {
        self.draft.rating
    }

    /// Whether the storefront offers one-tap reorder.
    pub fn can_reorder(&self) -> bool {
        self.draft.can_reorder
    }

    /// Move the order to on-the-way with an assigned rider.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidTransition`] unless the order is
    /// currently preparing.
    pub fn dispatch(&mut self, rider: RiderContact) -> Result<(), OrderError> {
        self.check_transition(OrderStatus::OnTheWay)?;

        self.draft.rider = Some(rider);
        self.set_status(OrderStatus::OnTheWay);

        Ok(())
    }

    /// Mark the order delivered, recording the actual delivery time.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidTransition`] unless the order is
    /// currently on the way.
    pub fn deliver(&mut self, actual_delivery: impl Into<String>) -> Result<(), OrderError> {
        self.check_transition(OrderStatus::Delivered)?;

        self.draft.actual_delivery = Some(actual_delivery.into());
        self.set_status(OrderStatus::Delivered);

        Ok(())
    }

    /// Cancel the order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidTransition`] if the order already
    /// reached a terminal status.
    pub fn cancel(&mut self) -> Result<(), OrderError> {
        self.check_transition(OrderStatus::Cancelled)?;

        self.set_status(OrderStatus::Cancelled);

        Ok(())
    }

    /// Rate a delivered order, 1 to 5.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError`] if the order was not delivered or the
    /// rating is out of range.
    pub fn rate(&mut self, rating: u8) -> Result<(), OrderError> {
        if self.draft.status != OrderStatus::Delivered {
            return Err(OrderError::RatingBeforeDelivery(self.draft.id.clone()));
        }

        if !(1..=5).contains(&rating) {
            return Err(OrderError::RatingOutOfRange(self.draft.id.clone(), rating));
        }

        self.draft.rating = Some(rating);

        Ok(())
    }

    fn check_transition(&self, next: OrderStatus) -> Result<(), OrderError> {
        if self.draft.status.can_transition_to(next) {
            Ok(())
        } else {
            Err(OrderError::InvalidTransition(
                self.draft.id.clone(),
                self.draft.status,
                next,
            ))
        }
    }

    fn set_status(&mut self, status: OrderStatus) {
        self.draft.status = status;
        self.draft.status_text = status.default_text().to_string();
    }
}

/// Sum the line subtotals of an order.
fn lines_total<'a>(
    id: &str,
    lines: &[OrderLine<'a>],
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, OrderError> {
    lines
        .iter()
        .try_fold(Money::from_minor(0, currency), |acc, line| {
            let minor = line
                .unit_price
                .to_minor_units()
                .checked_mul(i64::from(line.quantity))
                .ok_or_else(|| OrderError::LineOverflow(id.to_string()))?;

            acc.add(Money::from_minor(minor, line.unit_price.currency()))
                .map_err(OrderError::from)
        })
}

/// Aggregates over an order history.
#[derive(Debug, Clone)]
pub struct OrderStats<'a> {
    /// Number of orders, any status.
    pub total_orders: usize,

    /// Sum of order totals.
    pub total_spent: Money<'a, Currency>,

    /// Delivered orders.
    pub delivered: usize,

    /// Cancelled orders.
    pub cancelled: usize,

    /// Orders still preparing or on the way.
    pub in_flight: usize,

    /// Orders placed in the reference month.
    pub current_month_orders: usize,
}

/// The orders view: a working collection of orders plus its status filter.
#[derive(Debug)]
pub struct OrderHistory<'a> {
    orders: Vec<Order<'a>>,
    filter: String,
    currency: &'a Currency,
}

impl<'a> OrderHistory<'a> {
    /// Create an order history over the given orders.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::CurrencyMismatch`] if any order total is
    /// denominated in a different currency.
    pub fn with_orders(orders: Vec<Order<'a>>, currency: &'a Currency) -> Result<Self, OrderError> {
        orders.iter().enumerate().try_for_each(|(i, order)| {
            let order_currency = order.total().currency();
            if order_currency == currency {
                Ok(())
            } else {
                Err(OrderError::CurrencyMismatch(
                    i,
                    order_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ))
            }
        })?;

        Ok(Self {
            orders,
            filter: crate::filters::ALL_CATEGORIES.to_string(),
            currency,
        })
    }

    /// Active status-filter label.
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Replace the status-filter label. The next read re-runs the filter.
    pub fn set_filter(&mut self, label: impl Into<String>) {
        self.filter = label.into();
    }

    /// Orders passing the active status filter, in seed order. The "All"
    /// sentinel and unknown labels pass everything through.
    pub fn visible(&self) -> Vec<&Order<'a>> {
        let status = if self.filter == crate::filters::ALL_CATEGORIES {
            None
        } else {
            OrderStatus::parse_filter_label(&self.filter)
        };

        self.orders
            .iter()
            .filter(|order| match status {
                Some(wanted) => order.status() == wanted,
                None => true,
            })
            .collect()
    }

    /// Orders still in flight (preparing or on the way), after filtering.
    pub fn current(&self) -> Vec<&Order<'a>> {
        self.visible()
            .into_iter()
            .filter(|order| !order.status().is_terminal())
            .collect()
    }

    /// Orders that reached a terminal status, after filtering.
    pub fn past(&self) -> Vec<&Order<'a>> {
        self.visible()
            .into_iter()
            .filter(|order| order.status().is_terminal())
            .collect()
    }

    /// Look an order up by id.
    pub fn get(&self, id: &str) -> Option<&Order<'a>> {
        self.orders.iter().find(|order| order.id() == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Order<'a>, OrderError> {
        self.orders
            .iter_mut()
            .find(|order| order.id() == id)
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    /// Cancel an order by id.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError`] if the order is unknown or already
    /// terminal.
    pub fn cancel(&mut self, id: &str) -> Result<(), OrderError> {
        self.get_mut(id)?.cancel()
    }

    /// Rate a delivered order by id.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError`] if the order is unknown, not delivered, or
    /// the rating is out of range.
    pub fn rate(&mut self, id: &str, rating: u8) -> Result<(), OrderError> {
        self.get_mut(id)?.rate(rating)
    }

    /// Request a reorder. This is a logged intention; no new order is
    /// created here.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError`] if the order is unknown or not
    /// reorder-eligible.
    pub fn reorder(&self, id: &str) -> Result<(), OrderError> {
        let order = self
            .get(id)
            .ok_or_else(|| OrderError::NotFound(id.to_string()))?;

        if !order.can_reorder() {
            return Err(OrderError::ReorderUnavailable(id.to_string()));
        }

        tracing::info!(order = id, "reorder requested");

        Ok(())
    }

    /// Request live tracking for an order. Logged intention only.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] if the order is unknown.
    pub fn track(&self, id: &str) -> Result<(), OrderError> {
        let order = self.get(id).ok_or_else(|| OrderError::NotFound(id.to_string()))?;

        tracing::info!(order = id, status = %order.status(), "tracking requested");

        Ok(())
    }

    /// Look up the rider for an order and log the contact intention.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] if the order is unknown.
    pub fn contact_rider(&self, id: &str) -> Result<Option<&RiderContact>, OrderError> {
        let order = self.get(id).ok_or_else(|| OrderError::NotFound(id.to_string()))?;

        if let Some(rider) = order.rider() {
            tracing::info!(order = id, rider = %rider.name, "rider call requested");
        }

        Ok(order.rider())
    }

    /// Aggregate stats over the full history (ignores the active filter).
    /// `today` anchors the orders-this-month count.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError`] if summing the totals fails.
    pub fn stats(&self, today: civil::Date) -> Result<OrderStats<'a>, OrderError> {
        let total_spent = self
            .orders
            .iter()
            .try_fold(Money::from_minor(0, self.currency), |acc, order| {
                acc.add(order.total())
            })?;

        let delivered = self.count_status(OrderStatus::Delivered);
        let cancelled = self.count_status(OrderStatus::Cancelled);

        let current_month_orders = self
            .orders
            .iter()
            .filter(|order| {
                let placed = order.placed_at().date();
                placed.year() == today.year() && placed.month() == today.month()
            })
            .count();

        Ok(OrderStats {
            total_orders: self.orders.len(),
            total_spent,
            delivered,
            cancelled,
            in_flight: self.orders.len() - delivered - cancelled,
            current_month_orders,
        })
    }

    fn count_status(&self, status: OrderStatus) -> usize {
        self.orders
            .iter()
            .filter(|order| order.status() == status)
            .count()
    }

    /// Number of orders, any status.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether the history has no orders.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
