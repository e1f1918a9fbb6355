use rust_decimal::Decimal;
use serde::Serialize;

use super::grouped;
use crate::domain::line_item::LineItem;

const TOP: usize = 10;

#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct BestSeller {
    pub stock_code: String,
    pub description: String,
    pub quantity_abs: i64,
}

impl BestSeller {
    /// The ten products sold in the largest volume, smallest of them first.
    pub fn top10(items: &[LineItem]) -> Vec<Self> {
        let mut products: Vec<_> = grouped(items, |item| {
            (item.stock_code.clone(), item.description.clone())
        })
        .into_iter()
        .map(|((stock_code, description), items)| BestSeller {
            stock_code,
            description,
            quantity_abs: items.iter().map(|item| item.quantity_abs).sum(),
        })
        .collect();

        products.sort_by(|a, b| b.quantity_abs.cmp(&a.quantity_abs));
        products.truncate(TOP);
        products.reverse();
        products
    }
}

#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct ProductRevenue {
    pub description: String,
    pub sales_abs: Decimal,
}

impl ProductRevenue {
    /// Every product description ranked by revenue, highest first.
    pub fn ranking(items: &[LineItem]) -> Vec<Self> {
        let mut products: Vec<_> = grouped(items, |item| item.description.clone())
            .into_iter()
            .map(|(description, items)| ProductRevenue {
                description,
                sales_abs: items.iter().map(|item| item.sales_abs).sum(),
            })
            .collect();

        products.sort_by(|a, b| b.sales_abs.cmp(&a.sales_abs));
        products
    }
}
