//! Error types for figure rendering.

use qg_common::PlotError;
use thiserror::Error;

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to load the embedded font")]
    Font,

    #[error("Invalid canvas size {width}x{height}")]
    Canvas { width: u32, height: u32 },

    #[error("Invalid render configuration: {0}")]
    Config(String),

    #[error("Inconsistent figure input: {0}")]
    Input(String),

    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("Failed to parse render configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RenderError> for PlotError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Config(_) | RenderError::Json(_) => {
                PlotError::Configuration(err.to_string())
            }
            RenderError::Io(io) => PlotError::Io(io),
            other => PlotError::Render(other.to_string()),
        }
    }
}
