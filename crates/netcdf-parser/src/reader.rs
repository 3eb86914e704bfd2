//! Field loading from grid files.

use std::path::{Path, PathBuf};

use qg_common::{Field3D, GridShape, Variable, WindComponent};
use tracing::debug;

use crate::error::{NetCdfError, NetCdfResult};
use crate::native::{dimension_lengths, open_dataset, read_f64_values};
use crate::{check_grid_extension, ALTITUDE_VARIABLE};

/// An open grid file.
pub struct GridFile {
    path: PathBuf,
    file: netcdf::File,
}

impl GridFile {
    /// Open a grid file. The extension is checked before anything is opened.
    pub fn open<P: AsRef<Path>>(path: P) -> NetCdfResult<Self> {
        let path = path.as_ref();
        check_grid_extension(path)?;
        let file = open_dataset(path)?;
        debug!(path = %path.display(), "Opened grid file");
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn variable(&self, name: &str) -> NetCdfResult<netcdf::Variable<'_>> {
        self.file.variable(name).ok_or_else(|| {
            NetCdfError::MissingData(format!(
                "variable '{}' not found in {}",
                name,
                self.path.display()
            ))
        })
    }

    /// Read a `(nz, ny, nx)` variable into a new field.
    pub fn read_field(&self, name: &str) -> NetCdfResult<Field3D> {
        let var = self.variable(name)?;
        let dims = dimension_lengths(&var);
        let shape = match dims.as_slice() {
            &[nz, ny, nx] => GridShape::new(nz, ny, nx),
            other => {
                return Err(NetCdfError::InvalidFormat(format!(
                    "variable '{}' in {} has {} dimensions, expected 3",
                    name,
                    self.path.display(),
                    other.len()
                )))
            }
        };

        let values = read_f64_values(&var)?;
        debug!(
            path = %self.path.display(),
            variable = name,
            shape = %shape,
            "Read field"
        );

        Field3D::new(name, shape, values).map_err(|e| NetCdfError::InvalidFormat(e.to_string()))
    }

    /// Altitude of each vertical level, in meters.
    pub fn read_altitudes(&self) -> NetCdfResult<Vec<f64>> {
        let var = self.variable(ALTITUDE_VARIABLE)?;
        read_f64_values(&var)
    }
}

/// Load one named variable from a grid file.
pub fn load_field<P: AsRef<Path>>(path: P, name: &str) -> NetCdfResult<Field3D> {
    GridFile::open(path)?.read_field(name)
}

/// Horizontal wind components of one snapshot.
#[derive(Debug, Clone)]
pub struct WindFields {
    pub u: Field3D,
    pub v: Field3D,
}

impl WindFields {
    pub fn component(&self, component: WindComponent) -> &Field3D {
        match component {
            WindComponent::U => &self.u,
            WindComponent::V => &self.v,
        }
    }

    pub fn component_mut(&mut self, component: WindComponent) -> &mut Field3D {
        match component {
            WindComponent::U => &mut self.u,
            WindComponent::V => &mut self.v,
        }
    }
}

/// Everything one snapshot contributes to a variable's figure.
#[derive(Debug, Clone)]
pub struct SnapshotFields {
    pub field: Field3D,
    pub wind: Option<WindFields>,
}

/// Load a variable and, optionally, the wind components from one snapshot.
pub fn load_snapshot<P: AsRef<Path>>(
    path: P,
    variable: Variable,
    with_wind: bool,
) -> NetCdfResult<SnapshotFields> {
    let grid = GridFile::open(path)?;
    let field = grid.read_field(variable.code())?;
    let wind = if with_wind {
        Some(WindFields {
            u: grid.read_field(WindComponent::U.code())?,
            v: grid.read_field(WindComponent::V.code())?,
        })
    } else {
        None
    };
    Ok(SnapshotFields { field, wind })
}
