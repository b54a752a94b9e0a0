//! Common error types for sentiscope

use thiserror::Error;

/// Common result type for sentiscope operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the sentiscope crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested file not found in the upload folder
    #[error("Not found: {0}")]
    NotFound(String),

    /// Filename that sanitizes to nothing
    #[error("Invalid file name: {0}")]
    InvalidFilename(String),

    /// Invalid input to a table operation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Bytes could not be read as delimited tabular data
    #[error("{0}")]
    Csv(String),
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err.to_string())
    }
}
