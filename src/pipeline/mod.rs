use std::{
    fs::{self, File},
    io::Read,
    path::Path,
};

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    domain::{
        self,
        line_item::{preprocess, LineItem},
        report::{
            purchase_hours, repurchase_rate, BestSeller, CountrySales, FinancialRow,
            InvoiceItems, MonthlySales, ProductRevenue, StatusBreakdown,
        },
    },
    error::{Error, Result},
    presenter::Charts,
};

/// Every table of one reporting run.
///
/// The repurchase rate keeps its own result so an undefined rate does not
/// hide the other tables.
#[derive(Debug)]
pub struct Reports {
    pub financial: Vec<FinancialRow>,
    pub monthly_sales: Vec<MonthlySales>,
    pub top_countries: Vec<CountrySales>,
    pub status_breakdown: Vec<StatusBreakdown>,
    pub repurchase_rate: domain::error::Result<Decimal>,
    pub purchase_hours: Vec<String>,
    pub best_sellers: Vec<BestSeller>,
    pub product_revenue: Vec<ProductRevenue>,
    pub invoice_items: Vec<InvoiceItems>,
    pub charts: Charts,
}

#[derive(Serialize)]
struct PurchaseHourRow<'a> {
    hour: &'a str,
}

#[derive(Serialize)]
struct RepurchaseRow {
    repurchase_rate: Option<Decimal>,
}

impl Reports {
    pub fn compute(items: &[LineItem]) -> Self {
        let monthly_sales = MonthlySales::series(items);
        let best_sellers = BestSeller::top10(items);
        let product_revenue = ProductRevenue::ranking(items);
        let invoice_items = InvoiceItems::means(items);
        let hours = purchase_hours(items);
        let charts = Charts::build(
            &monthly_sales,
            &hours,
            &product_revenue,
            &best_sellers,
            &invoice_items,
        );

        Reports {
            financial: FinancialRow::report(items),
            monthly_sales,
            top_countries: CountrySales::top10(items),
            status_breakdown: StatusBreakdown::report(items),
            repurchase_rate: repurchase_rate(items),
            purchase_hours: hours.into_iter().map(str::to_owned).collect(),
            best_sellers,
            product_revenue,
            invoice_items,
            charts,
        }
    }

    /// Read the transaction log, enrich it and compute every report.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let raw = crate::csv::read(reader)?;
        let read = raw.len();
        let items = preprocess(raw)?;

        info!(read, reported = items.len(), "loaded line items");

        Ok(Self::compute(&items))
    }

    /// Write each table, and each chart's points, as CSV files under `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<()> {
        let charts_dir = dir.join("charts");
        fs::create_dir_all(&charts_dir).map_err(|source| Error::FileError {
            path: charts_dir.clone(),
            source,
        })?;

        write_table(dir, "financial", &self.financial)?;
        write_table(dir, "monthly_sales", &self.monthly_sales)?;
        write_table(dir, "top_countries", &self.top_countries)?;
        write_table(dir, "order_status", &self.status_breakdown)?;
        write_table(dir, "best_sellers", &self.best_sellers)?;
        write_table(dir, "product_revenue", &self.product_revenue)?;
        write_table(dir, "invoice_items", &self.invoice_items)?;
        write_table(
            dir,
            "purchase_hours",
            self.purchase_hours.iter().map(|hour| PurchaseHourRow {
                hour: hour.as_str(),
            }),
        )?;

        let repurchase_rate = match &self.repurchase_rate {
            Ok(rate) => {
                info!(%rate, "repurchase rate");
                Some(*rate)
            }
            Err(err) => {
                warn!(%err, "repurchase rate left empty");
                None
            }
        };
        write_table(dir, "repurchase_rate", [RepurchaseRow { repurchase_rate }])?;

        write_table(dir, "charts", self.charts.iter())?;
        for chart in self.charts.iter() {
            write_table(&charts_dir, chart.name, &chart.points)?;
        }

        info!(dir = %dir.display(), "reports written");
        Ok(())
    }
}

fn write_table<T: Serialize>(
    dir: &Path,
    name: &str,
    rows: impl IntoIterator<Item = T>,
) -> Result<()> {
    let path = dir.join(format!("{name}.csv"));
    let file = File::create(&path).map_err(|source| Error::FileError {
        path: path.clone(),
        source,
    })?;

    crate::csv::write(rows, file)?;
    debug!(path = %path.display(), "wrote table");
    Ok(())
}
