use rust_decimal::Decimal;
use serde::Serialize;

use super::{grouped, percentage, scaled};
use crate::domain::line_item::LineItem;

const TOP: usize = 10;

/// Net quantity and revenue for one country; returns net out.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct CountrySales {
    pub country: String,
    pub quantity: i64,
    #[serde(skip)]
    pub sales: Decimal,
    pub sales_k: Decimal,
    pub sales_pct: Option<Decimal>,
}

impl CountrySales {
    /// Every country ranked by revenue in thousands, highest first.
    ///
    /// Shares are taken from the rounded `sales_k` column. Countries with equal
    /// revenue keep their alphabetical order.
    pub fn ranking(items: &[LineItem]) -> Vec<Self> {
        let mut countries: Vec<_> = grouped(items, |item| item.country.clone())
            .into_iter()
            .map(|(country, items)| {
                let sales: Decimal = items.iter().map(|item| item.sales).sum();

                CountrySales {
                    country,
                    quantity: items.iter().map(|item| item.quantity).sum(),
                    sales,
                    sales_k: scaled(sales, Decimal::ONE_THOUSAND),
                    sales_pct: None,
                }
            })
            .collect();

        countries.sort_by(|a, b| b.sales_k.cmp(&a.sales_k));

        let total: Decimal = countries.iter().map(|country| country.sales_k).sum();
        for country in &mut countries {
            country.sales_pct = percentage(country.sales_k, total);
        }

        countries
    }

    pub fn top10(items: &[LineItem]) -> Vec<Self> {
        let mut ranking = Self::ranking(items);
        ranking.truncate(TOP);
        ranking
    }
}
