//! Run configuration.
//!
//! A [`PlotRequest`] is what the user asked for; [`RunConfig::from_request`]
//! turns it into a validated run. Every precondition that can fail without
//! reading data is checked here, before any file is opened.

use std::path::{Path, PathBuf};

use netcdf_parser::check_grid_extension;
use qg_common::{PlotError, PlotResult, Variable};
use tracing::debug;

/// Placeholder replaced by each animation id in path templates.
pub const ID_MARKER: &str = "%id%";

/// Raw user input, one field per command-line option.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotRequest {
    /// Grid file, or a template containing [`ID_MARKER`] when animating
    pub filepath: String,
    /// Base state to difference against
    pub basefilepath: Option<PathBuf>,
    /// Output base name or template
    pub output: Option<String>,
    pub plot_wind: bool,
    /// Comma-separated animation ids
    pub gif_ids: Option<String>,
    /// Comma-separated subset of variable codes
    pub variables: Option<String>,
}

/// One input grid file.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub path: PathBuf,
    /// Animation id substituted into the templates
    pub id: Option<String>,
}

/// Validated, immutable description of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Snapshots in the order frames are rendered and joined
    pub snapshots: Vec<Snapshot>,
    pub base: Option<PathBuf>,
    pub output: Option<String>,
    pub plot_wind: bool,
    /// Variables to plot, in enumeration order
    pub variables: Vec<Variable>,
    pub animate: bool,
}

impl RunConfig {
    pub fn from_request(request: PlotRequest) -> PlotResult<Self> {
        let ids = request.gif_ids.as_deref().map(parse_ids).transpose()?;

        let snapshots = match &ids {
            Some(ids) => {
                if !request.filepath.contains(ID_MARKER) {
                    return Err(PlotError::Configuration(format!(
                        "filepath should include a {ID_MARKER} pattern for gif generation"
                    )));
                }
                if let Some(output) = &request.output {
                    if !output.contains(ID_MARKER) {
                        return Err(PlotError::Configuration(format!(
                            "output should include a {ID_MARKER} pattern for gif generation"
                        )));
                    }
                }
                ids.iter()
                    .map(|id| Snapshot {
                        path: PathBuf::from(request.filepath.replace(ID_MARKER, id)),
                        id: Some(id.clone()),
                    })
                    .collect()
            }
            None => vec![Snapshot {
                path: PathBuf::from(&request.filepath),
                id: None,
            }],
        };

        for snapshot in &snapshots {
            check_grid_extension(&snapshot.path)?;
        }
        if let Some(base) = &request.basefilepath {
            check_grid_extension(base)?;
        }

        let variables = match request.variables.as_deref() {
            Some(list) => parse_variables(list)?,
            None => Variable::ALL.to_vec(),
        };

        let config = Self {
            snapshots,
            base: request.basefilepath,
            output: request.output,
            plot_wind: request.plot_wind,
            variables,
            animate: ids.is_some(),
        };
        debug!(?config, "Validated run configuration");
        Ok(config)
    }

    /// Fields are plotted as differences against the base state.
    pub fn is_increment(&self) -> bool {
        self.base.is_some()
    }

    pub fn first_snapshot(&self) -> &Path {
        &self.snapshots[0].path
    }
}

fn parse_ids(list: &str) -> PlotResult<Vec<String>> {
    let ids: Vec<String> = list
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();
    if ids.is_empty() {
        return Err(PlotError::Configuration("no gif ids given".to_string()));
    }
    Ok(ids)
}

fn parse_variables(list: &str) -> PlotResult<Vec<Variable>> {
    let mut requested = Vec::new();
    for code in list.split(',').filter(|c| !c.trim().is_empty()) {
        let variable = Variable::parse(code).ok_or_else(|| {
            PlotError::Configuration(format!("unknown variable '{}', expected x or q", code.trim()))
        })?;
        requested.push(variable);
    }
    if requested.is_empty() {
        return Err(PlotError::Configuration("no variables requested".to_string()));
    }
    Ok(Variable::ALL
        .into_iter()
        .filter(|v| requested.contains(v))
        .collect())
}
