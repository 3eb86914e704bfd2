//! Figure rendering for QG model fields.
//!
//! Turns 3-D fields into stacked per-level panels:
//! - Symmetric per-level color scales shared across snapshots
//! - Filled contours with the plasma colormap
//! - Wind arrows
//! - Longitude ticks, altitude labels and colorbars
//! - JPEG export

pub mod colormap;
pub mod config;
pub mod contour;
pub mod error;
pub mod figure;
pub mod layout;
pub mod quiver;
pub mod scale;
pub mod text;
pub mod ticks;

pub use config::RenderConfig;
pub use error::{RenderError, RenderResult};
pub use figure::{render_figure, save_jpeg, FigureRenderer, FigureSpec, WindOverlay};
pub use scale::{compute_color_scales, ColorScale};
