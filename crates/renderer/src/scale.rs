//! Symmetric per-level color scales shared by every snapshot in a run.

use qg_common::Field3D;
use tracing::debug;

use crate::colormap::{plasma, Color};
use crate::error::{RenderError, RenderResult};

/// Level boundaries `linspace(-m, m, n)` for one vertical level.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    levels: Vec<f64>,
}

impl ColorScale {
    /// Build a symmetric scale around zero with `n` boundaries.
    pub fn symmetric(max_abs: f64, n: usize) -> Self {
        let m = if max_abs.is_finite() { max_abs.abs() } else { 0.0 };
        Self {
            levels: linspace(-m, m, n.max(2)),
        }
    }

    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    pub fn min(&self) -> f64 {
        self.levels[0]
    }

    pub fn max(&self) -> f64 {
        self.levels[self.levels.len() - 1]
    }

    pub fn max_abs(&self) -> f64 {
        self.max()
    }

    /// Number of filled bands between the boundaries.
    pub fn band_count(&self) -> usize {
        self.levels.len() - 1
    }

    /// All values at the level were zero.
    pub fn is_degenerate(&self) -> bool {
        !(self.max() > self.min())
    }

    /// Band containing `value`; values past either end fall in the outer bands.
    pub fn band_index(&self, value: f64) -> Option<usize> {
        if value.is_nan() || self.is_degenerate() {
            return None;
        }
        let upper = self.levels.partition_point(|&l| l <= value);
        Some(upper.saturating_sub(1).min(self.band_count() - 1))
    }

    /// Fill color of band `band`, sampled at the band midpoint.
    pub fn band_color(&self, band: usize) -> Color {
        let bands = self.band_count() as f64;
        plasma((band as f64 + 0.5) / bands)
    }

    /// Fill color for a sample; `None` for missing values.
    pub fn color_for(&self, value: f64) -> Option<Color> {
        if value.is_nan() {
            return None;
        }
        if self.is_degenerate() {
            return Some(plasma(0.5));
        }
        self.band_index(value).map(|b| self.band_color(b))
    }

    /// Position of `value` along the colorbar, 0 at the bottom and 1 at the top.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return 0.5;
        }
        ((value - self.min()) / (self.max() - self.min())).clamp(0.0, 1.0)
    }
}

/// Evenly spaced values with exact endpoints.
fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    let step = (stop - start) / (n - 1) as f64;
    (0..n)
        .map(|i| if i == n - 1 { stop } else { start + step * i as f64 })
        .collect()
}

/// One color scale per vertical level, shared across all `fields`.
///
/// The magnitude at level `k` is the largest absolute value found at that
/// level in any of the fields, so every frame of an animation is colored
/// against the same range.
pub fn compute_color_scales<'a, I>(fields: I, n_levels: usize) -> RenderResult<Vec<ColorScale>>
where
    I: IntoIterator<Item = &'a Field3D>,
{
    let mut fields = fields.into_iter();
    let first = fields
        .next()
        .ok_or_else(|| RenderError::Input("no fields to scale".to_string()))?;
    let shape = first.shape();
    let mut max_abs: Vec<f64> = (0..shape.nz).map(|k| first.max_abs_level(k)).collect();

    for field in fields {
        if field.shape() != shape {
            return Err(RenderError::Input(format!(
                "field '{}' has shape {}, expected {}",
                field.name(),
                field.shape(),
                shape
            )));
        }
        for (k, m) in max_abs.iter_mut().enumerate() {
            *m = m.max(field.max_abs_level(k));
        }
    }

    debug!(variable = first.name(), max_abs = ?max_abs, "Computed color scales");
    Ok(max_abs
        .into_iter()
        .map(|m| ColorScale::symmetric(m, n_levels))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let v = linspace(-1.0, 1.0, 5);
        assert_eq!(v, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_band_index_edges() {
        let scale = ColorScale::symmetric(2.0, 5);
        assert_eq!(scale.band_count(), 4);
        assert_eq!(scale.band_index(-2.0), Some(0));
        assert_eq!(scale.band_index(-1.5), Some(0));
        assert_eq!(scale.band_index(0.0), Some(2));
        assert_eq!(scale.band_index(2.0), Some(3));
        assert_eq!(scale.band_index(10.0), Some(3));
        assert_eq!(scale.band_index(-10.0), Some(0));
        assert_eq!(scale.band_index(f64::NAN), None);
    }

    #[test]
    fn test_degenerate_scale_is_flat() {
        let scale = ColorScale::symmetric(0.0, 30);
        assert!(scale.is_degenerate());
        assert_eq!(scale.levels().len(), 30);
        assert_eq!(scale.color_for(0.0), Some(plasma(0.5)));
        assert_eq!(scale.color_for(f64::NAN), None);
        assert_eq!(scale.normalize(0.0), 0.5);
    }

    #[test]
    fn test_band_colors_increase_along_map() {
        let scale = ColorScale::symmetric(1.0, 3);
        assert_eq!(scale.color_for(-0.9), Some(plasma(0.25)));
        assert_eq!(scale.color_for(0.9), Some(plasma(0.75)));
    }
}
