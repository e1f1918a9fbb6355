use itertools::Itertools;
use rust_decimal::Decimal;
use serde::Serialize;

use super::{grouped, percentage};
use crate::domain::{
    error::{Error, Result},
    line_item::LineItem,
};

/// Share of customers with at least two line items, in percent.
///
/// Line items are counted, not distinct invoices, so a single invoice with two
/// products already counts as a repurchase.
pub fn repurchase_rate(items: &[LineItem]) -> Result<Decimal> {
    let purchases = items.iter().counts_by(|item| item.customer_id.as_str());
    let returning = purchases.values().filter(|&&count| count >= 2).count();

    percentage(Decimal::from(returning), Decimal::from(purchases.len())).ok_or(
        Error::DivisionByZero {
            metric: "repurchase rate",
        },
    )
}

/// Purchase hour of every line item, in input order.
pub fn purchase_hours(items: &[LineItem]) -> Vec<&str> {
    items.iter().map(|item| item.hour.as_str()).collect()
}

#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct InvoiceItems {
    pub invoice_id: String,
    pub mean_quantity: Decimal,
}

impl InvoiceItems {
    /// Mean signed quantity per line item of each invoice.
    pub fn means(items: &[LineItem]) -> Vec<Self> {
        grouped(items, |item| item.invoice_id.clone())
            .into_iter()
            .map(|(invoice_id, items)| {
                let quantity: i64 = items.iter().map(|item| item.quantity).sum();

                InvoiceItems {
                    invoice_id,
                    mean_quantity: Decimal::from(quantity) / Decimal::from(items.len()),
                }
            })
            .collect()
    }
}
