use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not access {path}")]
    FileError {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not convert between CSV rows and report tables")]
    CsvError(#[from] csv::Error),
    #[error(transparent)]
    BusinessError(#[from] crate::domain::error::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
