use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invoice {invoice_id} has an unparseable timestamp: {value:?}")]
    UnparseableTimestamp { invoice_id: String, value: String },
    #[error("{metric} is undefined: denominator is zero")]
    DivisionByZero { metric: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
