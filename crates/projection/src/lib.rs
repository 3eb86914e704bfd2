//! Coordinate mapping for the QG channel domain.
//!
//! The model runs on a doubly-periodic/channel approximation of the
//! planet. Its grid is drawn on a plain longitude/latitude plot.

pub mod channel;

pub use channel::{ChannelDomain, ChannelGeometry, Extent, Mesh, EARTH_RADIUS_M};
