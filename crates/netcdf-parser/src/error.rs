//! Error types for grid file reading.

use qg_common::PlotError;
use thiserror::Error;

/// Result type for NetCDF parser operations.
pub type NetCdfResult<T> = Result<T, NetCdfError>;

/// Error types for NetCDF parsing.
#[derive(Error, Debug)]
pub enum NetCdfError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Path does not carry the grid-file extension
    #[error("{path}: extension should be .{expected}")]
    InvalidExtension { path: String, expected: &'static str },

    /// Missing required variable or dimension
    #[error("Missing required data: {0}")]
    MissingData(String),

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

impl From<NetCdfError> for PlotError {
    fn from(err: NetCdfError) -> Self {
        match err {
            NetCdfError::InvalidExtension { .. } => PlotError::Configuration(err.to_string()),
            other => PlotError::DataAccess(other.to_string()),
        }
    }
}
