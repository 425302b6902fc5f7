//! Common error types for WDT

use thiserror::Error;

/// Common result type for WDT operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across WDT crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read or write error (wraps csv::Error)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML serialization error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Missing, non-numeric or out-of-range measurement
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
