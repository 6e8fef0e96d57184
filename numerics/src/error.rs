//! Driver error types.

use thiserror::Error;

/// Result type for driver operations.
pub type Result<T> = std::result::Result<T, DriverError>;

/// Errors surfaced by the `numerics` driver.
#[derive(Error, Debug)]
pub enum DriverError {
    /// The configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading the configuration or writing the report failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The integration itself failed.
    #[error("integration error: {0}")]
    Integration(#[from] nm_core::Error),
}
