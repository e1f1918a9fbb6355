use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{Error, Result};

/// Only line items invoiced in this year are reported on.
pub const TARGET_YEAR: &str = "2011";

const TIMESTAMP_FORMATS: [&str; 5] = [
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

/// One row of the retail transaction log, as exported.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct RawLineItem {
    #[serde(rename = "InvoiceNo")]
    pub invoice_id: String,
    #[serde(rename = "StockCode")]
    pub stock_code: String,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Quantity")]
    pub quantity: i64,
    #[serde(rename = "InvoiceDate")]
    pub invoice_date: String,
    #[serde(rename = "UnitPrice")]
    pub unit_price: Decimal,
    #[serde(rename = "CustomerID")]
    pub customer_id: Option<String>,
    #[serde(rename = "Country")]
    pub country: String,
}

#[derive(Debug, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum OrderStatus {
    Approved,
    Cancelled,
}

impl OrderStatus {
    /// Cancellation invoices carry a `C` somewhere in their number.
    pub fn classify(invoice_id: &str) -> Self {
        if invoice_id.contains('C') {
            OrderStatus::Cancelled
        } else {
            OrderStatus::Approved
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Approved => f.write_str("Approved"),
            OrderStatus::Cancelled => f.write_str("Cancelled"),
        }
    }
}

/// A line item with its status, monetary and calendar fields derived.
#[derive(Debug, PartialEq, Clone)]
pub struct LineItem {
    pub invoice_id: String,
    pub stock_code: String,
    pub description: String,
    pub quantity: i64,
    pub invoice_date: NaiveDateTime,
    pub unit_price: Decimal,
    pub customer_id: String,
    pub country: String,
    pub order_status: OrderStatus,
    pub sales: Decimal,
    pub sales_abs: Decimal,
    pub quantity_abs: i64,
    pub time: NaiveTime,
    pub hour: String,
    pub date: NaiveDate,
    pub month: String,
    pub year: String,
}

impl LineItem {
    fn enrich(raw: RawLineItem, description: String, customer_id: String) -> Result<Self> {
        let invoice_date = parse_timestamp(&raw.invoice_id, &raw.invoice_date)?;
        let sales = Decimal::from(raw.quantity) * raw.unit_price;

        Ok(LineItem {
            order_status: OrderStatus::classify(&raw.invoice_id),
            sales,
            sales_abs: sales.abs(),
            quantity_abs: raw.quantity.abs(),
            time: invoice_date.time(),
            hour: invoice_date.format("%H").to_string(),
            date: invoice_date.date(),
            month: invoice_date.format("%Y-%m").to_string(),
            year: invoice_date.format("%Y").to_string(),
            invoice_id: raw.invoice_id,
            stock_code: raw.stock_code,
            description,
            quantity: raw.quantity,
            invoice_date,
            unit_price: raw.unit_price,
            customer_id,
            country: raw.country,
        })
    }
}

fn parse_timestamp(invoice_id: &str, value: &str) -> Result<NaiveDateTime> {
    let trimmed = value.trim();

    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| Error::UnparseableTimestamp {
            invoice_id: invoice_id.to_owned(),
            value: value.to_owned(),
        })
}

/// Turn raw rows into enriched line items for [`TARGET_YEAR`].
///
/// Rows without a description or a customer are dropped first, keeping the
/// order of the rest. Any remaining row whose timestamp can't be parsed fails
/// the whole call, so a partial table is never returned.
pub fn preprocess(raw: impl IntoIterator<Item = RawLineItem>) -> Result<Vec<LineItem>> {
    let mut dropped = 0usize;

    let enriched = raw
        .into_iter()
        .filter_map(|mut row| match (row.description.take(), row.customer_id.take()) {
            (Some(description), Some(customer_id)) => Some((row, description, customer_id)),
            _ => {
                dropped += 1;
                None
            }
        })
        .map(|(row, description, customer_id)| LineItem::enrich(row, description, customer_id))
        .collect::<Result<Vec<_>>>()?;

    let total = enriched.len();
    let items: Vec<_> = enriched
        .into_iter()
        .filter(|item| item.year == TARGET_YEAR)
        .collect();

    debug!(
        dropped,
        out_of_year = total - items.len(),
        kept = items.len(),
        "preprocessed line items"
    );

    Ok(items)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn raw(
        invoice_id: &str,
        quantity: i64,
        unit_price: Decimal,
        customer_id: &str,
        invoice_date: &str,
    ) -> RawLineItem {
        RawLineItem {
            invoice_id: invoice_id.to_owned(),
            stock_code: "85123A".to_owned(),
            description: Some("WHITE HANGING HEART T-LIGHT HOLDER".to_owned()),
            quantity,
            invoice_date: invoice_date.to_owned(),
            unit_price,
            customer_id: Some(customer_id.to_owned()),
            country: "United Kingdom".to_owned(),
        }
    }

    #[test]
    fn classifies_cancellations_anywhere_in_invoice_id() {
        assert_eq!(OrderStatus::classify("536365"), OrderStatus::Approved);
        assert_eq!(OrderStatus::classify("C536379"), OrderStatus::Cancelled);
        assert_eq!(OrderStatus::classify("5363C79"), OrderStatus::Cancelled);
        assert_eq!(OrderStatus::classify("c536379"), OrderStatus::Approved);
    }

    #[test]
    fn drops_rows_missing_description_or_customer() {
        let mut no_description = raw("536366", 2, dec!(1.85), "17850", "2011-01-04 10:00:00");
        no_description.description = None;
        let mut no_customer = raw("536367", 3, dec!(4.25), "13047", "2011-01-04 10:00:00");
        no_customer.customer_id = None;

        let rows = vec![
            raw("536365", 6, dec!(2.55), "17850", "2011-01-04 10:00:00"),
            no_description,
            no_customer,
            raw("536368", 1, dec!(3.75), "13047", "2011-01-04 11:00:00"),
        ];

        let items = preprocess(rows).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].invoice_id, "536365");
        assert_eq!(items[1].invoice_id, "536368");
    }

    #[test]
    fn derives_signed_and_absolute_sales() {
        let items = preprocess(vec![
            raw("536365", 6, dec!(2.55), "17850", "12/1/2011 8:26"),
            raw("C536379", -1, dec!(5.0), "17850", "12/1/2011 9:41"),
        ])
        .unwrap();

        assert_eq!(items[0].order_status, OrderStatus::Approved);
        assert_eq!(items[0].sales, dec!(15.30));
        assert_eq!(items[0].sales_abs, dec!(15.30));
        assert_eq!(items[1].order_status, OrderStatus::Cancelled);
        assert_eq!(items[1].sales, dec!(-5.0));
        assert_eq!(items[1].sales_abs, dec!(5.0));
        assert_eq!(items[1].quantity_abs, 1);
    }

    #[test]
    fn splits_timestamp_into_calendar_fields() {
        let items = preprocess(vec![raw("536365", 6, dec!(2.55), "17850", "12/1/2011 8:26")]).unwrap();
        let item = &items[0];

        assert_eq!(item.time.format("%H:%M:%S").to_string(), "08:26:00");
        assert_eq!(item.hour, "08");
        assert_eq!(item.date, NaiveDate::from_ymd_opt(2011, 12, 1).unwrap());
        assert_eq!(item.month, "2011-12");
        assert_eq!(item.year, "2011");
    }

    #[test]
    fn keeps_only_target_year() {
        let items = preprocess(vec![
            raw("536365", 1, dec!(1), "17850", "2010-12-31 23:59:59"),
            raw("536366", 1, dec!(1), "17850", "2011-01-01 00:00:00"),
            raw("536367", 1, dec!(1), "17850", "2012-01-01 00:00:00"),
        ])
        .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].invoice_id, "536366");
    }

    #[test]
    fn unparseable_timestamp_aborts() {
        let err = preprocess(vec![
            raw("536365", 1, dec!(1), "17850", "2011-01-01 00:00:00"),
            raw("536366", 1, dec!(1), "17850", "yesterday"),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            Error::UnparseableTimestamp {
                invoice_id: "536366".to_owned(),
                value: "yesterday".to_owned(),
            }
        );
    }

    #[test]
    fn timestamp_of_dropped_row_is_not_parsed() {
        let mut row = raw("536366", 1, dec!(1), "17850", "");
        row.customer_id = None;

        assert!(preprocess(vec![row]).unwrap().is_empty());
    }
}
