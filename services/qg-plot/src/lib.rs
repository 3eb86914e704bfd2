//! Plotting pipeline for QG model output.
//!
//! Loads fields from one or more grid snapshots, optionally differences them
//! against a base state, renders one figure per snapshot and variable on a
//! shared per-level color scale, and joins the frames into an animated gif
//! when several ids are given.

pub mod animation;
pub mod config;
pub mod increment;
pub mod naming;
pub mod pipeline;

pub use animation::{AnimationConfig, FrameJoiner, ImageMagickJoiner};
pub use config::{PlotRequest, RunConfig, Snapshot, ID_MARKER};
pub use pipeline::{Orchestrator, RunReport};
