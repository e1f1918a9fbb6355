//! Yearly sales, returns and customer behaviour reports from a retail
//! transaction log.
//!
//! Raw line items are read from CSV, enriched by [`domain::line_item::preprocess`]
//! and summarised by the functions in [`domain::report`]. The [`presenter`]
//! turns the tables into chart datasets and [`pipeline::Reports`] ties a whole
//! run together.

pub mod csv;
pub mod domain;
pub mod error;
pub mod pipeline;
pub mod presenter;
