use rust_decimal::Decimal;
use serde::Serialize;

use super::{grouped, percentage};
use crate::domain::line_item::LineItem;

#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct MonthlySales {
    pub month: String,
    pub sales_abs: Decimal,
    pub quantity_abs: i64,
    pub sales_pct: Option<Decimal>,
    pub quantity_pct: Option<Decimal>,
}

impl MonthlySales {
    /// Monthly revenue and volume, each also as a share of the year, in
    /// chronological order.
    pub fn series(items: &[LineItem]) -> Vec<Self> {
        let months: Vec<(String, Decimal, i64)> = grouped(items, |item| item.month.clone())
            .into_iter()
            .map(|(month, items)| {
                (
                    month,
                    items.iter().map(|item| item.sales_abs).sum(),
                    items.iter().map(|item| item.quantity_abs).sum(),
                )
            })
            .collect();

        let total_sales: Decimal = months.iter().map(|(_, sales, _)| *sales).sum();
        let total_quantity = Decimal::from(months.iter().map(|(_, _, qty)| qty).sum::<i64>());

        months
            .into_iter()
            .map(|(month, sales_abs, quantity_abs)| MonthlySales {
                sales_pct: percentage(sales_abs, total_sales),
                quantity_pct: percentage(Decimal::from(quantity_abs), total_quantity),
                month,
                sales_abs,
                quantity_abs,
            })
            .collect()
    }
}
