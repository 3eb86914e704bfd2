//! QG grid files written to disk for loader and pipeline tests.

use std::path::{Path, PathBuf};

use qg_common::{Field3D, GridShape};

use crate::generators::create_altitudes;

/// Builder for a NetCDF grid file with `(nz, ny, nx)` variables.
#[derive(Debug, Clone)]
pub struct GridFixture {
    shape: GridShape,
    altitudes: Option<Vec<f64>>,
    fields: Vec<Field3D>,
}

impl GridFixture {
    /// An empty fixture with default altitudes.
    pub fn new(shape: GridShape) -> Self {
        Self {
            shape,
            altitudes: Some(create_altitudes(shape.nz)),
            fields: Vec::new(),
        }
    }

    /// Add a 3-D variable. Its name is taken from the field.
    pub fn with_field(mut self, field: Field3D) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_altitudes(mut self, altitudes: Vec<f64>) -> Self {
        self.altitudes = Some(altitudes);
        self
    }

    /// Leave out the `z` coordinate variable.
    pub fn without_altitudes(mut self) -> Self {
        self.altitudes = None;
        self
    }

    /// Write the file, creating or truncating `path`.
    pub fn write(&self, path: &Path) -> Result<PathBuf, netcdf::Error> {
        let mut file = netcdf::create(path)?;
        file.add_dimension("nz", self.shape.nz)?;
        file.add_dimension("ny", self.shape.ny)?;
        file.add_dimension("nx", self.shape.nx)?;

        if let Some(altitudes) = &self.altitudes {
            let mut var = file.add_variable::<f64>("z", &["nz"])?;
            var.put_values(altitudes, ..)?;
        }

        for field in &self.fields {
            let dims = if field.shape() == self.shape {
                ["nz", "ny", "nx"].map(String::from)
            } else {
                // Mismatched fields get their own dimensions
                let dims = ["nz", "ny", "nx"].map(|d| format!("{d}_{}", field.name()));
                let shape = field.shape();
                for (name, len) in dims.iter().zip([shape.nz, shape.ny, shape.nx]) {
                    file.add_dimension(name, len)?;
                }
                dims
            };
            let dim_refs: Vec<&str> = dims.iter().map(String::as_str).collect();
            let mut var = file.add_variable::<f64>(field.name(), &dim_refs)?;
            var.put_values(field.data(), ..)?;
        }

        Ok(path.to_path_buf())
    }
}

/// A fixture holding `x`, `q`, `u` and `v`, each constant.
pub fn constant_grid_fixture(shape: GridShape, x: f64, q: f64, u: f64, v: f64) -> GridFixture {
    GridFixture::new(shape)
        .with_field(Field3D::filled("x", shape, x))
        .with_field(Field3D::filled("q", shape, q))
        .with_field(Field3D::filled("u", shape, u))
        .with_field(Field3D::filled("v", shape, v))
}

/// A scratch directory removed when dropped.
pub fn scratch_dir() -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix("qg-plot-test-")
        .tempdir()
        .unwrap_or_else(|e| panic!("failed to create scratch dir: {e}"))
}
