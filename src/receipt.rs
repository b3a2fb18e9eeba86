//! Receipt
//!
//! Order-summary rendering for a cart: one table row per line, then the
//! fee/discount breakdown the storefront shows next to the checkout button.

use std::io;

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::pricing::{CartLine, CartTotals, FeeSchedule, PricingError, cart_totals};

/// Errors that can occur when building or writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Error aggregating the cart totals.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// A cart's order summary: the line snapshot plus its aggregates.
#[derive(Debug, Clone)]
pub struct CartReceipt<'a> {
    lines: Vec<CartLine<'a>>,
    totals: CartTotals<'a>,
}

impl<'a> CartReceipt<'a> {
    /// Aggregate the given lines under a fee schedule into a receipt.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if the totals cannot be calculated.
    pub fn new(lines: Vec<CartLine<'a>>, fees: &FeeSchedule<'a>) -> Result<Self, ReceiptError> {
        let totals = cart_totals(&lines, fees)?;

        Ok(Self { lines, totals })
    }

    /// The lines this receipt covers.
    pub fn lines(&self) -> &[CartLine<'a>] {
        &self.lines
    }

    /// The aggregates for the cart.
    pub fn totals(&self) -> &CartTotals<'a> {
        &self.totals
    }

    /// Write the item table and fee breakdown.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if a line subtotal fails or the writer
    /// errors.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Qty", "Unit Price", "Subtotal"]);

        for line in &self.lines {
            let subtotal = line.subtotal()?;

            builder.push_record([
                line.name.clone(),
                line.quantity.to_string(),
                line.unit_price.to_string(),
                subtotal.to_string(),
            ]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());
        let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(1, separator);

        table.with(theme);
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(1..4), Alignment::right());

        writeln!(out, "{table}").map_err(|_err| ReceiptError::IO)?;

        self.write_summary(&mut out)
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let delivery = if self.totals.delivery_fee.to_minor_units() == 0 {
            "FREE".to_string()
        } else {
            self.totals.delivery_fee.to_string()
        };

        let rows = [
            (
                format!("Subtotal ({} items)", self.lines.len()),
                self.totals.subtotal.to_string(),
            ),
            ("Delivery Fee".to_string(), delivery),
            (
                "Platform Fee".to_string(),
                self.totals.platform_fee.to_string(),
            ),
            (
                "Discount".to_string(),
                format!("- {}", self.totals.discount),
            ),
            ("Total".to_string(), self.totals.total.to_string()),
        ];

        let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

        for (label, value) in &rows {
            writeln!(out, " {label:<label_width$}  {value:>value_width$}")
                .map_err(|_err| ReceiptError::IO)?;
        }

        writeln!(out, " You're saving {}", self.totals.discount).map_err(|_err| ReceiptError::IO)
    }
}
