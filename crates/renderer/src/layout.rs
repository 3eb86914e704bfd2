//! Figure geometry: where panels, colorbars and the title land in pixels.
//!
//! Positions follow the subplot conventions of the reference plots: a grid of
//! one column and `nz` rows inside the figure margins, each row split between
//! an equal-aspect axes box and a colorbar slot on its right.

use projection::Extent;

use crate::config::RenderConfig;
use crate::error::{RenderError, RenderResult};

/// Axis-aligned rectangle in pixel space, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Integer pixel columns and rows covered by the rectangle, clipped to the canvas.
    pub fn pixel_span(&self, canvas_width: u32, canvas_height: u32) -> (u32, u32, u32, u32) {
        let x0 = self.x.round().max(0.0) as u32;
        let y0 = self.y.round().max(0.0) as u32;
        let x1 = (self.right().round().max(0.0) as u32).min(canvas_width);
        let y1 = (self.bottom().round().max(0.0) as u32).min(canvas_height);
        (x0, y0, x1.max(x0), y1.max(y0))
    }

    /// Largest rectangle of the given aspect (width / height) centered in `self`.
    pub fn fit_aspect(&self, aspect: f32) -> PixelRect {
        if self.width / self.height > aspect {
            let width = self.height * aspect;
            PixelRect::new(self.center_x() - width / 2.0, self.y, width, self.height)
        } else {
            let height = self.width / aspect;
            PixelRect::new(self.x, self.center_y() - height / 2.0, self.width, height)
        }
    }
}

/// Data limits of a panel in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataWindow {
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

impl DataWindow {
    /// Limits of the mesh; a single row or column gets one degree either side.
    pub fn from_extent(extent: Extent) -> Self {
        let (lon_min, lon_max) = widen(extent.lon_min, extent.lon_max);
        let (lat_min, lat_max) = widen(extent.lat_min, extent.lat_max);
        Self {
            lon_min,
            lon_max,
            lat_min,
            lat_max,
        }
    }

    pub fn lon_span(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    pub fn lat_span(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    /// Width over height with one degree of longitude as long as one of latitude.
    pub fn aspect(&self) -> f32 {
        (self.lon_span() / self.lat_span()) as f32
    }
}

fn widen(min: f64, max: f64) -> (f64, f64) {
    if max > min {
        (min, max)
    } else {
        (min - 1.0, max + 1.0)
    }
}

/// Mapping between data coordinates and the pixels of one axes box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub rect: PixelRect,
    pub window: DataWindow,
}

impl Viewport {
    pub fn new(rect: PixelRect, window: DataWindow) -> Self {
        Self { rect, window }
    }

    pub fn to_pixel(&self, lon: f64, lat: f64) -> (f32, f32) {
        let fx = (lon - self.window.lon_min) / self.window.lon_span();
        let fy = (self.window.lat_max - lat) / self.window.lat_span();
        (
            self.rect.x + fx as f32 * self.rect.width,
            self.rect.y + fy as f32 * self.rect.height,
        )
    }

    pub fn to_data(&self, px: f32, py: f32) -> (f64, f64) {
        let fx = ((px - self.rect.x) / self.rect.width) as f64;
        let fy = ((py - self.rect.y) / self.rect.height) as f64;
        (
            self.window.lon_min + fx * self.window.lon_span(),
            self.window.lat_max - fy * self.window.lat_span(),
        )
    }
}

/// Placement of one level's panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayout {
    pub viewport: Viewport,
    pub colorbar: PixelRect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FigureLayout {
    pub width: u32,
    pub height: u32,
    /// Top edge of the title text
    pub title_top: f32,
    /// Panels in row order, top row first
    pub panels: Vec<PanelLayout>,
}

/// Lay out `rows` stacked panels for data limited to `window`.
pub fn figure_layout(
    config: &RenderConfig,
    rows: usize,
    window: DataWindow,
) -> RenderResult<FigureLayout> {
    let (width, height) = config.pixel_size();
    if width == 0 || height == 0 {
        return Err(RenderError::Canvas { width, height });
    }
    if rows == 0 {
        return Err(RenderError::Input("figure needs at least one level".to_string()));
    }

    let m = &config.margins;
    let (w, h) = (width as f32, height as f32);
    let grid = PixelRect::new(
        m.left * w,
        (1.0 - m.top) * h,
        (m.right - m.left) * w,
        (m.top - m.bottom) * h,
    );

    let n = rows as f32;
    let cell_height = grid.height / (n + m.hspace * (n - 1.0));
    let gap = m.hspace * cell_height;
    let cb = &config.colorbar;

    let panels = (0..rows)
        .map(|row| {
            let cell = PixelRect::new(
                grid.x,
                grid.y + row as f32 * (cell_height + gap),
                grid.width,
                cell_height,
            );
            let axes_box = PixelRect::new(
                cell.x,
                cell.y,
                cell.width * (1.0 - cb.fraction - cb.pad),
                cell.height,
            );
            let bar_length = cell.height * cb.shrink;
            let bar_thickness = (bar_length / cb.aspect).min(cell.width * cb.fraction);
            let colorbar = PixelRect::new(
                cell.x + cell.width * (1.0 - cb.fraction),
                cell.center_y() - bar_length / 2.0,
                bar_thickness,
                bar_length,
            );
            PanelLayout {
                viewport: Viewport::new(axes_box.fit_aspect(window.aspect()), window),
                colorbar,
            }
        })
        .collect();

    Ok(FigureLayout {
        width,
        height,
        title_top: h * 0.02,
        panels,
    })
}
