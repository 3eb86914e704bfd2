//! Joining rendered frames into an animated gif.
//!
//! The joiner is an out-of-process tool. The pipeline only sees the
//! [`FrameJoiner`] trait, so tests can substitute a fake.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use qg_common::{PlotError, PlotResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Turns an ordered list of frames into one looping animation.
pub trait FrameJoiner {
    /// Fail if the joiner cannot be used; called once before any work.
    fn ensure_available(&self) -> PlotResult<()>;

    /// Join `frames` in the given order into `destination` and return its path.
    fn join(&self, frames: &[PathBuf], destination: &Path) -> PlotResult<PathBuf>;
}

/// Settings for the ImageMagick `convert` call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub program: String,
    /// Delay between frames in hundredths of a second
    pub delay_cs: u32,
    /// Number of loops, 0 for forever
    pub loop_count: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            program: "convert".to_string(),
            delay_cs: 20,
            loop_count: 0,
        }
    }
}

/// Frame joiner backed by ImageMagick's `convert`.
#[derive(Debug, Clone, Default)]
pub struct ImageMagickJoiner {
    config: AnimationConfig,
}

impl ImageMagickJoiner {
    pub fn new(config: AnimationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Arguments passed to the program, frames first and the animation last.
    pub fn command_args(&self, frames: &[PathBuf], destination: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-delay".into(),
            self.config.delay_cs.to_string().into(),
            "-loop".into(),
            self.config.loop_count.to_string().into(),
        ];
        args.extend(frames.iter().map(|f| f.as_os_str().to_os_string()));
        args.push(destination.as_os_str().to_os_string());
        args
    }
}

impl FrameJoiner for ImageMagickJoiner {
    fn ensure_available(&self) -> PlotResult<()> {
        let program = &self.config.program;
        let status = Command::new(program)
            .arg("--help")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match status {
            Ok(status) if status.success() => {
                debug!(program = %program, "Frame joiner available");
                Ok(())
            }
            _ => Err(PlotError::Configuration(format!(
                "{program} (imagemagick package) should be available to create an animated gif"
            ))),
        }
    }

    fn join(&self, frames: &[PathBuf], destination: &Path) -> PlotResult<PathBuf> {
        if frames.is_empty() {
            return Err(PlotError::Animation("no frames to join".to_string()));
        }

        info!(
            program = %self.config.program,
            frames = frames.len(),
            destination = %destination.display(),
            "Joining frames"
        );
        let output = Command::new(&self.config.program)
            .args(self.command_args(frames, destination))
            .output()
            .map_err(|e| {
                PlotError::Animation(format!("failed to run {}: {e}", self.config.program))
            })?;

        if !output.status.success() {
            return Err(PlotError::Animation(format!(
                "{} exited with {}: {}",
                self.config.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(destination.to_path_buf())
    }
}
