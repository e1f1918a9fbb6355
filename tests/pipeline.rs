use std::fs;

use retail_report::{
    domain::{
        error::Error as DomainError,
        line_item::OrderStatus,
        report::StatusLabel,
    },
    error::Error,
    pipeline::Reports,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const HEADER: &str =
    "InvoiceNo,StockCode,Description,Quantity,InvoiceDate,UnitPrice,CustomerID,Country\n";

fn log(rows: &[&str]) -> String {
    let mut data = HEADER.to_owned();
    for row in rows {
        data.push_str(row);
        data.push('\n');
    }
    data
}

#[test]
fn approved_and_cancelled_invoice_report() {
    let data = log(&[
        "536365,85123A,WHITE HANGING HEART T-LIGHT HOLDER,6,12/1/2011 8:26,2.55,17850,United Kingdom",
        "C536379,D,Discount,-1,12/1/2011 9:41,5.0,17850,United Kingdom",
    ]);

    let reports = Reports::from_reader(data.as_bytes()).unwrap();

    let statuses: Vec<_> = reports.financial.iter().map(|row| row.order_status).collect();
    assert_eq!(
        statuses,
        [
            StatusLabel::Status(OrderStatus::Approved),
            StatusLabel::Status(OrderStatus::Cancelled),
            StatusLabel::Total,
        ]
    );
    assert_eq!(reports.financial[2].quantity_abs, 7);
    assert_eq!(reports.repurchase_rate, Ok(dec!(100)));
    assert_eq!(reports.status_breakdown[1].order_status, OrderStatus::Cancelled);
    assert_eq!(reports.top_countries.len(), 1);
    assert_eq!(reports.top_countries[0].sales_k, dec!(0.01));
    assert_eq!(reports.purchase_hours, ["08", "09"]);
}

#[test]
fn incomplete_and_out_of_year_rows_are_left_out() {
    let data = log(&[
        "536365,85123A,WHITE HANGING HEART T-LIGHT HOLDER,6,12/31/2010 23:59,2.55,17850,United Kingdom",
        "536366,22633,HAND WARMER UNION JACK,6,1/1/2011 0:00,1.85,17850,United Kingdom",
        "536367,84879,,32,1/4/2011 10:00,1.69,13047,United Kingdom",
        "536368,22960,JAM MAKING SET WITH JARS,6,1/4/2011 10:05,4.25,,United Kingdom",
    ]);

    let reports = Reports::from_reader(data.as_bytes()).unwrap();

    assert_eq!(reports.invoice_items.len(), 1);
    assert_eq!(reports.invoice_items[0].invoice_id, "536366");
    assert_eq!(reports.repurchase_rate, Ok(dec!(0)));
}

#[test]
fn empty_year_only_fails_the_repurchase_rate() {
    let data = log(&[
        "536365,85123A,WHITE HANGING HEART T-LIGHT HOLDER,6,12/1/2010 8:26,2.55,17850,United Kingdom",
    ]);

    let reports = Reports::from_reader(data.as_bytes()).unwrap();

    assert_eq!(
        reports.repurchase_rate,
        Err(DomainError::DivisionByZero {
            metric: "repurchase rate"
        })
    );
    assert_eq!(reports.financial.len(), 1);
    assert_eq!(reports.financial[0].avg_ticket, None);
    assert!(reports.top_countries.is_empty());
    assert!(reports.purchase_hours.is_empty());
}

#[test]
fn unparseable_timestamp_aborts_the_run() {
    let data = log(&["536365,85123A,HEART,6,first of december,2.55,17850,United Kingdom"]);

    let err = Reports::from_reader(data.as_bytes()).unwrap_err();

    assert!(matches!(
        err,
        Error::BusinessError(DomainError::UnparseableTimestamp { .. })
    ));
}

#[test]
fn writes_tables_and_charts() {
    let data = log(&[
        "536365,85123A,WHITE HANGING HEART T-LIGHT HOLDER,6,3/1/2011 8:26,2.55,17850,United Kingdom",
        "536366,22633,HAND WARMER UNION JACK,6,3/1/2011 14:10,1.85,13047,France",
    ]);
    let dir = tempfile::tempdir().unwrap();

    Reports::from_reader(data.as_bytes())
        .unwrap()
        .write_to(dir.path())
        .unwrap();

    let financial = fs::read_to_string(dir.path().join("financial.csv")).unwrap();
    assert!(financial.starts_with(
        "order_status,quantity_abs,sales_abs,quantity_100k,sales_100k,customer_count,avg_ticket\n"
    ));
    assert!(financial.lines().last().unwrap().starts_with("Total,12,"));

    let hours = fs::read_to_string(dir.path().join("purchase_hours.csv")).unwrap();
    assert_eq!(hours, "hour\n08\n14\n");

    let rate = fs::read_to_string(dir.path().join("repurchase_rate.csv")).unwrap();
    let value: Decimal = rate.lines().nth(1).unwrap().parse().unwrap();
    assert_eq!(value, Decimal::ZERO);

    for chart in [
        "sales_line",
        "time_histogram",
        "revenue_bar",
        "volume_bar",
        "items_histogram",
    ] {
        assert!(dir.path().join("charts").join(format!("{chart}.csv")).exists());
    }
}
