//! Synthetic fields with QG-like structure.
//!
//! Values are deterministic so that tests can reason about extrema.

use qg_common::{Field3D, GridShape};

/// A field holding one constant everywhere.
pub fn constant_field(name: &str, shape: GridShape, value: f64) -> Field3D {
    Field3D::filled(name, shape, value)
}

/// A field built from a closure over `(level, row, column)`.
pub fn field_from_fn<F>(name: &str, shape: GridShape, f: F) -> Field3D
where
    F: Fn(usize, usize, usize) -> f64,
{
    let mut data = Vec::with_capacity(shape.len());
    for k in 0..shape.nz {
        for j in 0..shape.ny {
            for i in 0..shape.nx {
                data.push(f(k, j, i));
            }
        }
    }
    // Length always matches the shape here
    Field3D::new(name, shape, data).unwrap_or_else(|_| Field3D::filled(name, shape, 0.0))
}

/// Zonal jet streamfunction: a meridional sine profile whose amplitude
/// grows by `level_ratio` with each level, plus a zonal wave.
pub fn create_jet_streamfunction(shape: GridShape, amplitude: f64, level_ratio: f64) -> Field3D {
    field_from_fn("x", shape, |k, j, i| {
        let y = (j as f64 + 1.0) / (shape.ny as f64 + 1.0);
        let x = (i as f64 + 0.5) / shape.nx as f64;
        let scale = amplitude * level_ratio.powi(k as i32);
        scale * ((std::f64::consts::PI * y).sin() + 0.3 * (2.0 * std::f64::consts::PI * x).cos())
    })
}

/// Potential vorticity with a single vortex per level, of order 1e-5 s⁻¹.
pub fn create_vortex_pv(shape: GridShape) -> Field3D {
    let cx = shape.nx as f64 / 2.0;
    let cy = shape.ny as f64 / 2.0;
    let radius = (shape.nx.min(shape.ny) as f64 / 4.0).max(1.0);
    field_from_fn("q", shape, |k, j, i| {
        let dx = i as f64 - cx;
        let dy = j as f64 - cy;
        let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
        sign * 1.0e-5 * (-(dx * dx + dy * dy) / (radius * radius)).exp()
    })
}

/// Uniform wind components, one `(u, v)` pair per level.
pub fn create_uniform_wind(shape: GridShape, u: f64, v: f64) -> (Field3D, Field3D) {
    (constant_field("u", shape, u), constant_field("v", shape, v))
}

/// Altitudes for `nz` levels, lowest first.
pub fn create_altitudes(nz: usize) -> Vec<f64> {
    (0..nz).map(|k| 2500.0 + 5000.0 * k as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_from_fn_ordering() {
        let shape = GridShape::new(2, 3, 4);
        let field = field_from_fn("x", shape, |k, j, i| (k * 100 + j * 10 + i) as f64);
        assert_eq!(field.at(1, 2, 3), 123.0);
        assert_eq!(field.data()[0], 0.0);
    }

    #[test]
    fn test_jet_grows_with_level() {
        let field = create_jet_streamfunction(GridShape::new(2, 10, 20), 1.0e7, 10.0);
        assert!(field.max_abs_level(1) > 5.0 * field.max_abs_level(0));
    }

    #[test]
    fn test_vortex_sign_alternates() {
        let field = create_vortex_pv(GridShape::new(2, 10, 20));
        assert!(field.at(0, 5, 10) > 0.0);
        assert!(field.at(1, 5, 10) < 0.0);
    }

    #[test]
    fn test_altitudes_increase() {
        assert_eq!(create_altitudes(2), vec![2500.0, 7500.0]);
    }
}
