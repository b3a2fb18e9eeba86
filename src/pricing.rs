//! Pricing
//!
//! Cart aggregates and deal arithmetic, all in minor units with checked
//! money operations.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors that can occur while aggregating cart totals.
#[derive(Debug, Error)]
pub enum PricingError {
    /// A line subtotal overflowed minor units (line name).
    #[error("line subtotal for {0} overflows minor units")]
    LineOverflow(String),

    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// One cart line: an item snapshot with a chosen quantity.
#[derive(Debug, Clone)]
pub struct CartLine<'a> {
    /// Display name of the item.
    pub name: String,

    /// Unit price in minor units.
    pub unit_price: Money<'a, Currency>,

    /// Chosen quantity, at least 1.
    pub quantity: u32,
}

impl<'a> CartLine<'a> {
    /// Create a cart line.
    #[must_use]
    pub fn new(name: impl Into<String>, unit_price: Money<'a, Currency>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    /// Line subtotal: unit price times quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::LineOverflow`] if the multiplication cannot
    /// be represented in minor units.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, PricingError> {
        let minor = self
            .unit_price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
            .ok_or_else(|| PricingError::LineOverflow(self.name.clone()))?;

        Ok(Money::from_minor(minor, self.unit_price.currency()))
    }
}

/// The fixed fee schedule applied to a cart.
///
/// The delivery fee applies only to non-empty carts; the platform fee and
/// the discount are unconditional.
#[derive(Debug, Clone)]
pub struct FeeSchedule<'a> {
    delivery_fee: Money<'a, Currency>,
    platform_fee: Money<'a, Currency>,
    discount: Money<'a, Currency>,
    currency: &'a Currency,
}

impl<'a> FeeSchedule<'a> {
    /// The storefront's standard schedule: delivery 100, platform 50,
    /// discount 200 minor units.
    #[must_use]
    pub fn standard(currency: &'a Currency) -> Self {
        Self {
            delivery_fee: Money::from_minor(100, currency),
            platform_fee: Money::from_minor(50, currency),
            discount: Money::from_minor(200, currency),
            currency,
        }
    }

    /// A custom schedule.
    #[must_use]
    pub fn new(
        delivery_fee: Money<'a, Currency>,
        platform_fee: Money<'a, Currency>,
        discount: Money<'a, Currency>,
        currency: &'a Currency,
    ) -> Self {
        Self {
            delivery_fee,
            platform_fee,
            discount,
            currency,
        }
    }

    /// Currency all fees are denominated in.
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }

    /// Discount applied once per cart.
    pub fn discount(&self) -> Money<'a, Currency> {
        self.discount
    }
}

/// Aggregates derived from a cart's lines under a fee schedule.
#[derive(Debug, Clone)]
pub struct CartTotals<'a> {
    /// Sum of line subtotals.
    pub subtotal: Money<'a, Currency>,

    /// Delivery fee actually charged (zero for an empty cart).
    pub delivery_fee: Money<'a, Currency>,

    /// Platform fee.
    pub platform_fee: Money<'a, Currency>,

    /// Discount subtracted once.
    pub discount: Money<'a, Currency>,

    /// subtotal + delivery fee + platform fee − discount.
    pub total: Money<'a, Currency>,
}

impl CartTotals<'_> {
    /// Whether the discount pushed the total below zero. The raw value is
    /// surfaced either way; clamping is a presentation decision.
    pub fn is_negative(&self) -> bool {
        self.total.to_minor_units() < 0
    }
}

/// Aggregate a cart's lines under the given fee schedule.
///
/// # Errors
///
/// Returns a [`PricingError`] if a line subtotal overflows or the money
/// arithmetic fails (for example, a currency mismatch between a line and
/// the schedule).
pub fn cart_totals<'a>(
    lines: &[CartLine<'a>],
    fees: &FeeSchedule<'a>,
) -> Result<CartTotals<'a>, PricingError> {
    let zero = Money::from_minor(0, fees.currency);

    let subtotal = lines.iter().try_fold(zero, |acc, line| {
        line.subtotal()
            .and_then(|line_subtotal| acc.add(line_subtotal).map_err(PricingError::from))
    })?;

    let delivery_fee = if lines.is_empty() {
        zero
    } else {
        fees.delivery_fee
    };

    let total = subtotal
        .add(delivery_fee)?
        .add(fees.platform_fee)?
        .sub(fees.discount)?;

    Ok(CartTotals {
        subtotal,
        delivery_fee,
        platform_fee: fees.platform_fee,
        discount: fees.discount,
        total,
    })
}

/// Calculate a percentage of a minor-unit amount, rounding half away from
/// zero.
///
/// # Errors
///
/// Returns [`PricingError::PercentConversion`] if the calculation overflows
/// or cannot be safely represented.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, PricingError> {
    let minor = Decimal::from_i64(minor).ok_or(PricingError::PercentConversion)?;

    ((*percent) * Decimal::ONE)
        .checked_mul(minor)
        .ok_or(PricingError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PricingError::PercentConversion)
}

/// Price after taking a percentage off, floored at zero.
///
/// # Errors
///
/// Returns a [`PricingError`] if the percentage calculation overflows.
pub fn discounted_price<'a>(
    price: &Money<'a, Currency>,
    percent: &Percentage,
) -> Result<Money<'a, Currency>, PricingError> {
    let original_minor = price.to_minor_units();

    let discounted_minor = original_minor
        .checked_sub(percent_of_minor(percent, original_minor)?)
        .ok_or(PricingError::PercentConversion)?;

    Ok(Money::from_minor(
        discounted_minor.max(0),
        price.currency(),
    ))
}
