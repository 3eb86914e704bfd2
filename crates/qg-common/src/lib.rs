//! Common types shared across the QG field plotting crates.

pub mod error;
pub mod field;
pub mod variable;

pub use error::{PlotError, PlotResult};
pub use field::{Field3D, GridShape};
pub use variable::{Variable, VariableDisplay, WindComponent};
