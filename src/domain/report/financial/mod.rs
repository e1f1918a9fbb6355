use std::fmt;

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use super::{grouped, ratio, scaled, HUNDRED_THOUSAND};
use crate::domain::line_item::{LineItem, OrderStatus};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum StatusLabel {
    Status(OrderStatus),
    Total,
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusLabel::Status(status) => write!(f, "{status}"),
            StatusLabel::Total => f.write_str("Total"),
        }
    }
}

impl Serialize for StatusLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct FinancialRow {
    pub order_status: StatusLabel,
    pub quantity_abs: i64,
    pub sales_abs: Decimal,
    pub quantity_100k: Decimal,
    pub sales_100k: Decimal,
    pub customer_count: usize,
    pub avg_ticket: Option<Decimal>,
}

impl FinancialRow {
    /// Volume, revenue and customer counts per order status, closed by a
    /// `Total` row.
    pub fn report(items: &[LineItem]) -> Vec<Self> {
        let rows = grouped(items, |item| item.order_status)
            .into_iter()
            .map(|(status, items)| {
                let quantity_abs: i64 = items.iter().map(|item| item.quantity_abs).sum();
                let sales_abs: Decimal = items.iter().map(|item| item.sales_abs).sum();

                FinancialRow {
                    order_status: StatusLabel::Status(status),
                    quantity_abs,
                    sales_abs,
                    quantity_100k: scaled(Decimal::from(quantity_abs), HUNDRED_THOUSAND),
                    sales_100k: scaled(sales_abs, HUNDRED_THOUSAND),
                    customer_count: items.len(),
                    avg_ticket: None,
                }
            })
            .collect();

        append_total(rows)
            .into_iter()
            .map(|row| FinancialRow {
                avg_ticket: ratio(row.sales_abs, Decimal::from(row.customer_count)),
                ..row
            })
            .collect()
    }
}

/// Append a `Total` row holding the column-wise sum of `rows`.
///
/// The scaled columns are summed as they are, not recomputed from the summed
/// raw values. `avg_ticket` is left undefined on the new row.
pub fn append_total(mut rows: Vec<FinancialRow>) -> Vec<FinancialRow> {
    let total = rows.iter().fold(
        FinancialRow {
            order_status: StatusLabel::Total,
            quantity_abs: 0,
            sales_abs: Decimal::ZERO,
            quantity_100k: Decimal::ZERO,
            sales_100k: Decimal::ZERO,
            customer_count: 0,
            avg_ticket: None,
        },
        |mut total, row| {
            total.quantity_abs += row.quantity_abs;
            total.sales_abs += row.sales_abs;
            total.quantity_100k += row.quantity_100k;
            total.sales_100k += row.sales_100k;
            total.customer_count += row.customer_count;
            total
        },
    );

    rows.push(total);
    rows
}
