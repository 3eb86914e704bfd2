//! The plotting run: load, difference, scale, render, animate.

use std::path::PathBuf;

use netcdf_parser::{load_snapshot, GridFile, WindFields};
use projection::ChannelGeometry;
use qg_common::{Field3D, PlotError, PlotResult, Variable, WindComponent};
use renderer::{compute_color_scales, FigureRenderer, FigureSpec, RenderConfig, WindOverlay};
use tracing::{debug, info};

use crate::animation::FrameJoiner;
use crate::config::RunConfig;
use crate::increment::{apply_increments, apply_wind_increments};
use crate::naming::{animation_path, plot_path};

/// Artifacts written by a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    /// Figures in the order they were written
    pub plots: Vec<PathBuf>,
    /// One animation per variable when animating
    pub animations: Vec<PathBuf>,
}

impl RunReport {
    pub fn artifact_count(&self) -> usize {
        self.plots.len() + self.animations.len()
    }
}

/// Fields of one variable across every snapshot of the run.
struct VariableFields {
    fields: Vec<Field3D>,
    winds: Vec<WindFields>,
}

pub struct Orchestrator<J> {
    config: RunConfig,
    renderer: FigureRenderer,
    joiner: J,
}

impl<J: FrameJoiner> Orchestrator<J> {
    pub fn new(config: RunConfig, render_config: RenderConfig, joiner: J) -> PlotResult<Self> {
        Ok(Self {
            config,
            renderer: FigureRenderer::new(render_config)?,
            joiner,
        })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn joiner(&self) -> &J {
        &self.joiner
    }

    /// Process every requested variable; the first failure aborts the run.
    pub fn run(&self) -> PlotResult<RunReport> {
        if self.config.animate {
            self.joiner.ensure_available()?;
        }

        let mut report = RunReport::default();
        for &variable in &self.config.variables {
            self.run_variable(variable, &mut report)?;
        }

        info!(
            plots = report.plots.len(),
            animations = report.animations.len(),
            "Run complete"
        );
        Ok(report)
    }

    fn run_variable(&self, variable: Variable, report: &mut RunReport) -> PlotResult<()> {
        info!(
            variable = variable.code(),
            snapshots = self.config.snapshots.len(),
            increment = self.config.is_increment(),
            "Processing variable"
        );

        let VariableFields { fields, winds } = self.load_variable(variable)?;
        let shape = fields[0].shape();
        let geometry = ChannelGeometry::new(shape);
        let altitudes = GridFile::open(self.config.first_snapshot())?.read_altitudes()?;
        if altitudes.len() < shape.nz {
            return Err(PlotError::DataAccess(format!(
                "{} altitudes for {} levels in {}",
                altitudes.len(),
                shape.nz,
                self.config.first_snapshot().display()
            )));
        }
        let scales = compute_color_scales(&fields, self.renderer.config().color_levels)?;

        let mut frames = Vec::with_capacity(fields.len());
        for (idx, (snapshot, field)) in self.config.snapshots.iter().zip(&fields).enumerate() {
            let spec = FigureSpec {
                variable,
                field,
                wind: winds.get(idx).map(|w| WindOverlay { u: &w.u, v: &w.v }),
                scales: &scales,
                geometry: &geometry,
                altitudes: &altitudes,
                increment: self.config.is_increment(),
            };
            let path = plot_path(
                snapshot,
                self.config.output.as_deref(),
                variable,
                self.config.is_increment(),
            );
            self.renderer.render_to_file(&spec, &path)?;
            println!(" -> plot produced: {}", path.display());
            frames.push(path);
        }

        if self.config.animate {
            let destination = animation_path(&frames[0]);
            let gif = self.joiner.join(&frames, &destination)?;
            println!(" -> gif produced: {}", gif.display());
            report.animations.push(gif);
        }
        report.plots.extend(frames);
        Ok(())
    }

    /// Load every snapshot, check shapes against the first one and apply the
    /// base state if there is one.
    fn load_variable(&self, variable: Variable) -> PlotResult<VariableFields> {
        let with_wind = self.config.plot_wind;
        let mut fields = Vec::with_capacity(self.config.snapshots.len());
        let mut winds = Vec::new();

        for snapshot in &self.config.snapshots {
            let loaded = load_snapshot(&snapshot.path, variable, with_wind)?;
            debug!(path = %snapshot.path.display(), shape = %loaded.field.shape(), "Loaded snapshot");
            fields.push(loaded.field);
            winds.extend(loaded.wind);
        }

        let shape = fields
            .first()
            .map(Field3D::shape)
            .ok_or_else(|| PlotError::Configuration("no snapshots to plot".to_string()))?;
        for field in &fields {
            field.ensure_shape(shape)?;
        }
        for wind in &winds {
            for component in WindComponent::ALL {
                wind.component(component).ensure_shape(shape)?;
            }
        }

        if let Some(base_path) = &self.config.base {
            let base = load_snapshot(base_path, variable, with_wind)?;
            base.field.ensure_shape(shape)?;
            apply_increments(&mut fields, &base.field)?;
            if let Some(base_wind) = &base.wind {
                apply_wind_increments(&mut winds, base_wind)?;
            }
        }

        Ok(VariableFields { fields, winds })
    }
}
