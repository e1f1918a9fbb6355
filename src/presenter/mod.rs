//! Chart datasets built from the summary tables.
//!
//! Nothing here draws; each [`Chart`] carries its title, axis labels and the
//! points a plotting tool needs.

use std::ops::{Range, RangeInclusive};

use itertools::Itertools;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::report::{BestSeller, InvoiceItems, MonthlySales, ProductRevenue};

const HOUR_RANGE: Range<u32> = 5..25;
const ITEMS_RANGE: RangeInclusive<i64> = 0..=80;
const TOP: usize = 10;

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Histogram,
    Bar,
    HorizontalBar,
}

#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct Point {
    pub series: &'static str,
    pub x: String,
    pub y: Decimal,
}

#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct Chart {
    pub name: &'static str,
    pub title: &'static str,
    pub kind: ChartKind,
    pub x_label: &'static str,
    pub y_label: &'static str,
    #[serde(skip)]
    pub points: Vec<Point>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Charts {
    pub sales_line: Chart,
    pub time_histogram: Chart,
    pub revenue_bar: Chart,
    pub volume_bar: Chart,
    pub items_histogram: Chart,
}

impl Charts {
    pub fn build(
        monthly_sales: &[MonthlySales],
        purchase_hours: &[&str],
        product_revenue: &[ProductRevenue],
        best_sellers: &[BestSeller],
        invoice_items: &[InvoiceItems],
    ) -> Self {
        Charts {
            sales_line: sales_line(monthly_sales),
            time_histogram: time_histogram(purchase_hours),
            revenue_bar: revenue_bar(product_revenue),
            volume_bar: volume_bar(best_sellers),
            items_histogram: items_histogram(invoice_items),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chart> {
        [
            &self.sales_line,
            &self.time_histogram,
            &self.revenue_bar,
            &self.volume_bar,
            &self.items_histogram,
        ]
        .into_iter()
    }
}

fn sales_line(monthly_sales: &[MonthlySales]) -> Chart {
    let series = |name: &'static str, pick: fn(&MonthlySales) -> Option<Decimal>| {
        monthly_sales
            .iter()
            .filter_map(move |month| {
                pick(month).map(|y| Point {
                    series: name,
                    x: month.month.clone(),
                    y,
                })
            })
            .collect::<Vec<_>>()
    };

    let mut points = series("Total Sales (%)", |month| month.sales_pct);
    points.extend(series("Quantity Item (%)", |month| month.quantity_pct));

    Chart {
        name: "sales_line",
        title: "Financial and Sales Report",
        kind: ChartKind::Line,
        x_label: "Month",
        y_label: "Share (%)",
        points,
    }
}

fn time_histogram(purchase_hours: &[&str]) -> Chart {
    let points = purchase_hours
        .iter()
        .filter_map(|hour| hour.parse::<u32>().ok())
        .filter(|hour| HOUR_RANGE.contains(hour))
        .counts()
        .into_iter()
        .sorted()
        .map(|(hour, count)| Point {
            series: "Purchases",
            x: hour.to_string(),
            y: Decimal::from(count),
        })
        .collect();

    Chart {
        name: "time_histogram",
        title: "Time frequency that the customer usually buys",
        kind: ChartKind::Histogram,
        x_label: "Time",
        y_label: "Count",
        points,
    }
}

fn revenue_bar(product_revenue: &[ProductRevenue]) -> Chart {
    let points = product_revenue
        .iter()
        .take(TOP)
        .map(|product| Point {
            series: "Sales",
            x: product.description.clone(),
            y: product.sales_abs,
        })
        .collect();

    Chart {
        name: "revenue_bar",
        title: "Top 10 product revenue",
        kind: ChartKind::Bar,
        x_label: "Description",
        y_label: "Sales",
        points,
    }
}

fn volume_bar(best_sellers: &[BestSeller]) -> Chart {
    let points = best_sellers
        .iter()
        .map(|product| Point {
            series: "Quantity",
            x: product.description.clone(),
            y: Decimal::from(product.quantity_abs),
        })
        .collect();

    Chart {
        name: "volume_bar",
        title: "Top 10 product volume",
        kind: ChartKind::HorizontalBar,
        x_label: "Description",
        y_label: "Quantity",
        points,
    }
}

fn items_histogram(invoice_items: &[InvoiceItems]) -> Chart {
    let points = invoice_items
        .iter()
        .filter(|invoice| {
            invoice.mean_quantity >= Decimal::from(*ITEMS_RANGE.start())
                && invoice.mean_quantity <= Decimal::from(*ITEMS_RANGE.end())
        })
        .map(|invoice| invoice.mean_quantity.floor().normalize())
        .counts()
        .into_iter()
        .sorted()
        .map(|(bucket, count)| Point {
            series: "Invoices",
            x: bucket.to_string(),
            y: Decimal::from(count),
        })
        .collect();

    Chart {
        name: "items_histogram",
        title: "Average of items by invoice",
        kind: ChartKind::Histogram,
        x_label: "Quantity",
        y_label: "Invoices",
        points,
    }
}
