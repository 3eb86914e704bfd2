//! Three-dimensional gridded fields indexed `[level][meridional][zonal]`.

use serde::{Deserialize, Serialize};

use crate::{PlotError, PlotResult};

/// Shape of a `(levels, meridional, zonal)` grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridShape {
    /// Number of vertical levels
    pub nz: usize,
    /// Number of points in the meridional (y) direction
    pub ny: usize,
    /// Number of points in the zonal (x) direction
    pub nx: usize,
}

impl GridShape {
    pub fn new(nz: usize, ny: usize, nx: usize) -> Self {
        Self { nz, ny, nx }
    }

    /// Number of samples in one horizontal level.
    pub fn level_len(&self) -> usize {
        self.ny * self.nx
    }

    /// Total number of samples.
    pub fn len(&self) -> usize {
        self.nz * self.level_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Display for GridShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.nz, self.ny, self.nx)
    }
}

/// A named 3-D field in row-major order (level, then row, then column).
#[derive(Debug, Clone, PartialEq)]
pub struct Field3D {
    name: String,
    shape: GridShape,
    data: Vec<f64>,
}

impl Field3D {
    /// Wrap sample data, checking that it matches the shape.
    pub fn new(name: impl Into<String>, shape: GridShape, data: Vec<f64>) -> PlotResult<Self> {
        let name = name.into();
        if data.len() != shape.len() {
            return Err(PlotError::DataAccess(format!(
                "variable '{}' holds {} values, shape {} needs {}",
                name,
                data.len(),
                shape,
                shape.len()
            )));
        }
        Ok(Self { name, shape, data })
    }

    /// A field holding the same value everywhere.
    pub fn filled(name: impl Into<String>, shape: GridShape, value: f64) -> Self {
        Self {
            name: name.into(),
            shape,
            data: vec![value; shape.len()],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// One horizontal level, `ny * nx` values, row-major.
    pub fn level(&self, k: usize) -> &[f64] {
        let n = self.shape.level_len();
        &self.data[k * n..(k + 1) * n]
    }

    /// Sample at `(level, row, column)`.
    pub fn at(&self, k: usize, j: usize, i: usize) -> f64 {
        self.data[(k * self.shape.ny + j) * self.shape.nx + i]
    }

    /// Largest absolute value on one level. NaN samples are ignored.
    pub fn max_abs_level(&self, k: usize) -> f64 {
        self.level(k)
            .iter()
            .filter(|v| !v.is_nan())
            .fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }

    /// Fail unless this field has the expected shape.
    pub fn ensure_shape(&self, expected: GridShape) -> PlotResult<()> {
        if self.shape != expected {
            return Err(PlotError::ShapeMismatch {
                name: self.name.clone(),
                expected: expected.to_string(),
                found: self.shape.to_string(),
            });
        }
        Ok(())
    }

    /// Replace this field by `self - base`, element-wise.
    pub fn subtract(&mut self, base: &Field3D) -> PlotResult<()> {
        base.ensure_shape(self.shape)?;
        for (value, reference) in self.data.iter_mut().zip(&base.data) {
            *value -= reference;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(shape: GridShape) -> Field3D {
        let data = (0..shape.len()).map(|i| i as f64 - 10.0).collect();
        Field3D::new("x", shape, data).unwrap()
    }

    #[test]
    fn test_shape_lengths() {
        let shape = GridShape::new(2, 10, 20);
        assert_eq!(shape.level_len(), 200);
        assert_eq!(shape.len(), 400);
        assert_eq!(shape.to_string(), "(2, 10, 20)");
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        let result = Field3D::new("x", GridShape::new(2, 2, 2), vec![0.0; 7]);
        assert!(matches!(result, Err(PlotError::DataAccess(_))));
    }

    #[test]
    fn test_level_and_at_indexing() {
        let field = ramp(GridShape::new(2, 3, 4));
        assert_eq!(field.level(1).len(), 12);
        assert_eq!(field.level(1)[0], 2.0);
        assert_eq!(field.at(1, 2, 3), 23.0 - 10.0);
    }

    #[test]
    fn test_max_abs_level_uses_magnitude() {
        let shape = GridShape::new(1, 1, 3);
        let field = Field3D::new("q", shape, vec![1.0, -7.5, 3.0]).unwrap();
        assert_eq!(field.max_abs_level(0), 7.5);
    }

    #[test]
    fn test_max_abs_level_ignores_nan() {
        let shape = GridShape::new(1, 1, 3);
        let field = Field3D::new("q", shape, vec![f64::NAN, -2.0, 1.0]).unwrap();
        assert_eq!(field.max_abs_level(0), 2.0);
    }

    #[test]
    fn test_subtract_self_is_zero() {
        let mut field = ramp(GridShape::new(2, 3, 4));
        let base = field.clone();
        field.subtract(&base).unwrap();
        assert!(field.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_subtract_shape_mismatch() {
        let mut field = ramp(GridShape::new(2, 3, 4));
        let base = ramp(GridShape::new(2, 3, 5));
        let err = field.subtract(&base).unwrap_err();
        assert!(err.is_data_access());
    }
}
