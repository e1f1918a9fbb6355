//! Summary tables computed over enriched line items.
//!
//! Every report is a pure function of `&[LineItem]`; none of them depends on
//! another, so they can be computed in any order. Ratio and average cells are
//! `Option<Decimal>`, where `None` marks a zero denominator.

use std::hash::Hash;

use itertools::Itertools;
use rust_decimal::Decimal;

use super::line_item::LineItem;

pub mod country;
pub mod customer;
pub mod financial;
pub mod product;
pub mod returns;
pub mod sales;

pub use country::CountrySales;
pub use customer::{purchase_hours, repurchase_rate, InvoiceItems};
pub use financial::{append_total, FinancialRow, StatusLabel};
pub use product::{BestSeller, ProductRevenue};
pub use returns::StatusBreakdown;
pub use sales::MonthlySales;

pub(crate) const HUNDRED_THOUSAND: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

const DECIMAL_PLACES: u32 = 2;

/// Group line items by key, ordered by ascending key.
pub(crate) fn grouped<'a, K, F>(items: &'a [LineItem], key: F) -> Vec<(K, Vec<&'a LineItem>)>
where
    K: Ord + Hash,
    F: FnMut(&&'a LineItem) -> K,
{
    items
        .iter()
        .into_group_map_by(key)
        .into_iter()
        .sorted_by(|(a, _), (b, _)| a.cmp(b))
        .collect()
}

pub(crate) fn scaled(value: Decimal, unit: Decimal) -> Decimal {
    (value / unit).round_dp(DECIMAL_PLACES)
}

pub(crate) fn ratio(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    numerator
        .checked_div(denominator)
        .map(|value| value.round_dp(DECIMAL_PLACES))
}

pub(crate) fn percentage(part: Decimal, total: Decimal) -> Option<Decimal> {
    part.checked_div(total)
        .map(|share| (share * Decimal::ONE_HUNDRED).round_dp(DECIMAL_PLACES))
}
