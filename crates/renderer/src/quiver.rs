//! Wind arrows.
//!
//! Arrows are drawn at a subsample of grid points, pointing in the direction
//! of `(u, v)` on screen, with a length of `|(u, v)| / scale` inches. Arrow
//! proportions follow the usual quiver defaults expressed in shaft widths:
//! head width 3, head length 5, head axis length 4.5.

use projection::ChannelGeometry;
use tiny_skia::{FillRule, Mask, Paint, PathBuilder, Pixmap, Transform};

use crate::colormap::Color;
use crate::layout::Viewport;

const HEAD_WIDTH: f32 = 3.0;
const HEAD_LENGTH: f32 = 5.0;
const HEAD_AXIS_LENGTH: f32 = 4.5;

/// Arrow appearance in pixel units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuiverStyle {
    /// Wind speed drawn as one inch of arrow
    pub scale: f32,
    pub pixels_per_inch: f32,
    pub shaft_width: f32,
    pub color: Color,
}

impl QuiverStyle {
    /// Screen displacement of an arrow for wind `(u, v)`; y grows downwards.
    pub fn displacement(&self, u: f64, v: f64) -> (f32, f32) {
        let k = self.pixels_per_inch / self.scale;
        (u as f32 * k, -(v as f32) * k)
    }
}

/// Subsample stride along one axis: `max(n / divisor, 1)`.
pub fn quiver_stride(n: usize, divisor: usize) -> usize {
    (n / divisor.max(1)).max(1)
}

/// Grid points `(j, i)` that carry an arrow, starting from the first row and column.
pub fn quiver_positions(ny: usize, nx: usize, stride_y: usize, stride_x: usize) -> Vec<(usize, usize)> {
    (0..ny)
        .step_by(stride_y.max(1))
        .flat_map(|j| (0..nx).step_by(stride_x.max(1)).map(move |i| (j, i)))
        .collect()
}

/// Outline of an arrow with its tail at `tail` and tip at `tail + (dx, dy)`.
///
/// Arrows shorter than their head have the head scaled down with them; arrows
/// shorter than one shaft width yield `None` and are drawn as a dot.
pub fn arrow_polygon(tail: (f32, f32), dx: f32, dy: f32, width: f32) -> Option<Vec<(f32, f32)>> {
    let length = dx.hypot(dy);
    if !length.is_finite() || length < width {
        return None;
    }

    let mut head_length = HEAD_LENGTH * width;
    let mut head_axis = HEAD_AXIS_LENGTH * width;
    let mut head_half = HEAD_WIDTH * width / 2.0;
    if length < head_length {
        let k = length / head_length;
        head_length *= k;
        head_axis *= k;
        head_half *= k;
    }
    let half = width / 2.0;

    let local = [
        (0.0, -half),
        (length - head_axis, -half),
        (length - head_length, -head_half),
        (length, 0.0),
        (length - head_length, head_half),
        (length - head_axis, half),
        (0.0, half),
    ];

    let (cos, sin) = (dx / length, dy / length);
    Some(
        local
            .iter()
            .map(|&(a, b)| (tail.0 + a * cos - b * sin, tail.1 + a * sin + b * cos))
            .collect(),
    )
}

/// Draw the arrows of one level onto `pixmap`, clipped to `clip` when given.
///
/// `u` and `v` are `[ny][nx]` slices. Returns the number of arrows drawn.
#[allow(clippy::too_many_arguments)]
pub fn draw_quiver(
    pixmap: &mut Pixmap,
    viewport: &Viewport,
    geometry: &ChannelGeometry,
    u: &[f64],
    v: &[f64],
    strides: (usize, usize),
    style: &QuiverStyle,
    clip: Option<&Mask>,
) -> usize {
    let shape = geometry.shape();
    if u.len() != shape.level_len() || v.len() != shape.level_len() {
        return 0;
    }

    let mut paint = Paint::default();
    paint.set_color_rgba8(style.color.r, style.color.g, style.color.b, style.color.a);
    paint.anti_alias = true;

    let (stride_y, stride_x) = strides;
    let mut drawn = 0;
    for (j, i) in quiver_positions(shape.ny, shape.nx, stride_y, stride_x) {
        let idx = j * shape.nx + i;
        let (uu, vv) = (u[idx], v[idx]);
        if uu.is_nan() || vv.is_nan() {
            continue;
        }

        let tail = viewport.to_pixel(geometry.longitudes()[i], geometry.latitudes()[j]);
        let (dx, dy) = style.displacement(uu, vv);

        let path = match arrow_polygon(tail, dx, dy, style.shaft_width) {
            Some(points) => {
                let mut pb = PathBuilder::new();
                pb.move_to(points[0].0, points[0].1);
                for &(x, y) in &points[1..] {
                    pb.line_to(x, y);
                }
                pb.close();
                pb.finish()
            }
            None => PathBuilder::from_circle(tail.0, tail.1, style.shaft_width / 2.0),
        };

        if let Some(path) = path {
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), clip);
            drawn += 1;
        }
    }

    drawn
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strides() {
        assert_eq!(quiver_stride(20, 20), 1);
        assert_eq!(quiver_stride(10, 10), 1);
        assert_eq!(quiver_stride(5, 20), 1);
        assert_eq!(quiver_stride(128, 20), 6);
        assert_eq!(quiver_stride(64, 10), 6);
    }

    #[test]
    fn test_positions_start_at_origin() {
        let positions = quiver_positions(5, 7, 2, 3);
        assert_eq!(
            positions,
            vec![(0, 0), (0, 3), (0, 6), (2, 0), (2, 3), (2, 6), (4, 0), (4, 3), (4, 6)]
        );
    }

    #[test]
    fn test_displacement_scale() {
        let style = QuiverStyle {
            scale: 400.0,
            pixels_per_inch: 300.0,
            shaft_width: 2.0,
            color: Color::BLACK,
        };
        assert_eq!(style.displacement(400.0, 0.0), (300.0, 0.0));
        assert_eq!(style.displacement(0.0, 200.0), (0.0, -150.0));
    }

    #[test]
    fn test_arrow_tip_and_tail() {
        let points = arrow_polygon((10.0, 20.0), 30.0, 0.0, 2.0).unwrap();
        assert_eq!(points.len(), 7);
        assert_eq!(points[3], (40.0, 20.0));
        assert_eq!(points[0], (10.0, 19.0));
        assert_eq!(points[6], (10.0, 21.0));
        // head is three shaft widths across
        assert_eq!(points[2], (30.0, 17.0));
    }

    #[test]
    fn test_arrow_points_along_direction() {
        let points = arrow_polygon((0.0, 0.0), 0.0, -50.0, 2.0).unwrap();
        let tip = points[3];
        assert!(tip.0.abs() < 1e-4);
        assert!((tip.1 + 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_tiny_arrow_is_a_dot() {
        assert!(arrow_polygon((0.0, 0.0), 0.5, 0.0, 2.0).is_none());
        let short = arrow_polygon((0.0, 0.0), 5.0, 0.0, 2.0).unwrap();
        assert!(short.iter().all(|p| p.0 >= -1e-4 && p.0 <= 5.0 + 1e-4));
    }
}
