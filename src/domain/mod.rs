pub mod error;
pub mod line_item;
pub mod report;
