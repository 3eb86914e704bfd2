//! Filled contours.
//!
//! Each pixel of a panel is mapped back to fractional grid indices, the level
//! is sampled bilinearly there and the pixel takes the color of the band the
//! sample falls in. Equivalent to `contourf` with explicit level boundaries,
//! without building polygons.

use projection::ChannelGeometry;
use tiny_skia::Pixmap;

use crate::layout::Viewport;
use crate::scale::ColorScale;

/// Slack allowed past the outermost cell centers, in grid cells.
const EDGE_TOLERANCE: f64 = 1e-6;

/// Fill the panel under `viewport` with banded colors for one level.
///
/// `level` is one `[ny][nx]` slice in row-major order. Pixels outside the
/// mesh or over missing values are left untouched. Returns the number of
/// pixels filled.
pub fn fill_panel(
    pixmap: &mut Pixmap,
    viewport: &Viewport,
    geometry: &ChannelGeometry,
    level: &[f64],
    scale: &ColorScale,
) -> usize {
    let shape = geometry.shape();
    if level.len() != shape.level_len() || level.is_empty() {
        return 0;
    }

    let canvas_width = pixmap.width();
    let (x0, y0, x1, y1) = viewport.rect.pixel_span(canvas_width, pixmap.height());
    let data = pixmap.data_mut();
    let mut filled = 0;

    for py in y0..y1 {
        for px in x0..x1 {
            let (lon, lat) = viewport.to_data(px as f32 + 0.5, py as f32 + 0.5);
            let (fi, fj) = geometry.fractional_index(lon, lat);
            let (Some(fi), Some(fj)) = (clamp_index(fi, shape.nx), clamp_index(fj, shape.ny))
            else {
                continue;
            };

            let value = sample_bilinear(level, shape.nx, shape.ny, fi, fj);
            let Some(color) = scale.color_for(value) else {
                continue;
            };

            let idx = ((py * canvas_width + px) * 4) as usize;
            data[idx..idx + 4].copy_from_slice(&color.to_array());
            filled += 1;
        }
    }

    filled
}

/// Restrict a fractional index to the mesh; `None` outside it.
fn clamp_index(f: f64, n: usize) -> Option<f64> {
    let last = (n - 1) as f64;
    if n == 1 {
        return Some(0.0);
    }
    if f < -EDGE_TOLERANCE || f > last + EDGE_TOLERANCE {
        return None;
    }
    Some(f.clamp(0.0, last))
}

/// Bilinear interpolation on a row-major `[ny][nx]` grid.
///
/// Any contributing NaN corner makes the result NaN.
pub fn sample_bilinear(data: &[f64], nx: usize, ny: usize, fi: f64, fj: f64) -> f64 {
    let i0 = (fi.floor() as usize).min(nx - 1);
    let j0 = (fj.floor() as usize).min(ny - 1);
    let i1 = (i0 + 1).min(nx - 1);
    let j1 = (j0 + 1).min(ny - 1);
    let tx = fi - i0 as f64;
    let ty = fj - j0 as f64;

    let corners = [
        (data[j0 * nx + i0], (1.0 - tx) * (1.0 - ty)),
        (data[j0 * nx + i1], tx * (1.0 - ty)),
        (data[j1 * nx + i0], (1.0 - tx) * ty),
        (data[j1 * nx + i1], tx * ty),
    ];

    let mut sum = 0.0;
    for (value, weight) in corners {
        if weight == 0.0 {
            continue;
        }
        if value.is_nan() {
            return f64::NAN;
        }
        sum += value * weight;
    }
    sum
}
