use rust_decimal::Decimal;
use serde::Serialize;

use super::{grouped, percentage, scaled, HUNDRED_THOUSAND};
use crate::domain::line_item::{LineItem, OrderStatus};

/// How approved and cancelled invoices split volume, revenue and rows.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct StatusBreakdown {
    pub order_status: OrderStatus,
    pub quantity_abs: i64,
    #[serde(skip)]
    pub sales_abs: Decimal,
    pub invoice_count: usize,
    pub sales_100k: Decimal,
    pub sales_pct: Option<Decimal>,
    pub quantity_pct: Option<Decimal>,
    pub invoice_pct: Option<Decimal>,
}

impl StatusBreakdown {
    pub fn report(items: &[LineItem]) -> Vec<Self> {
        let mut rows: Vec<_> = grouped(items, |item| item.order_status)
            .into_iter()
            .map(|(order_status, items)| {
                let sales_abs: Decimal = items.iter().map(|item| item.sales_abs).sum();

                StatusBreakdown {
                    order_status,
                    quantity_abs: items.iter().map(|item| item.quantity_abs).sum(),
                    sales_abs,
                    invoice_count: items.len(),
                    sales_100k: scaled(sales_abs, HUNDRED_THOUSAND),
                    sales_pct: None,
                    quantity_pct: None,
                    invoice_pct: None,
                }
            })
            .collect();

        let total_sales: Decimal = rows.iter().map(|row| row.sales_abs).sum();
        let total_quantity = Decimal::from(rows.iter().map(|row| row.quantity_abs).sum::<i64>());
        let total_invoices = Decimal::from(rows.iter().map(|row| row.invoice_count).sum::<usize>());

        for row in &mut rows {
            row.sales_pct = percentage(row.sales_abs, total_sales);
            row.quantity_pct = percentage(Decimal::from(row.quantity_abs), total_quantity);
            row.invoice_pct = percentage(Decimal::from(row.invoice_count), total_invoices);
        }

        rows
    }
}
