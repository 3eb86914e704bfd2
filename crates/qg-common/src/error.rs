//! Error types for the plotting pipeline.

use thiserror::Error;

/// Result type alias using PlotError.
pub type PlotResult<T> = Result<T, PlotError>;

/// Primary error type for a plotting run.
///
/// Every variant is fatal: a run never skips a snapshot or a variable.
#[derive(Debug, Error)]
pub enum PlotError {
    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Configuration(String),

    // === Data Errors ===
    #[error("Data access error: {0}")]
    DataAccess(String),

    #[error("Shape mismatch for '{name}': expected {expected}, found {found}")]
    ShapeMismatch {
        name: String,
        expected: String,
        found: String,
    },

    // === Output Errors ===
    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("Animation failed: {0}")]
    Animation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlotError {
    /// Whether this error was raised before any data was touched.
    pub fn is_configuration(&self) -> bool {
        matches!(self, PlotError::Configuration(_))
    }

    /// Whether this error came from reading or validating grid data.
    pub fn is_data_access(&self) -> bool {
        matches!(
            self,
            PlotError::DataAccess(_) | PlotError::ShapeMismatch { .. }
        )
    }
}
