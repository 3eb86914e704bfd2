//! Multi-level figures: one stacked panel per vertical level.
//!
//! The highest level is drawn in the top panel and the lowest at the bottom.
//! Every panel has filled contours on that level's shared color scale, an
//! optional wind-arrow overlay, longitude ticks, an altitude label and its
//! own colorbar. Shapes are drawn with tiny-skia; text is drawn afterwards
//! onto the converted image.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, DynamicImage, RgbaImage};
use projection::ChannelGeometry;
use qg_common::{Field3D, Variable};
use tiny_skia::{FillRule, Mask, Paint, Path as SkPath, PathBuilder, Pixmap, Stroke, Transform};
use tracing::{debug, info};

use crate::colormap::{plasma, Color};
use crate::config::RenderConfig;
use crate::contour::fill_panel;
use crate::error::{RenderError, RenderResult};
use crate::layout::{figure_layout, DataWindow, PanelLayout, PixelRect};
use crate::quiver::{draw_quiver, quiver_stride, QuiverStyle};
use crate::scale::ColorScale;
use crate::text::{HAlign, TextRenderer, VAlign};
use crate::ticks::{format_longitude, format_plain, format_scientific, nice_ticks};

/// Wind components drawn over the contours.
#[derive(Debug, Clone, Copy)]
pub struct WindOverlay<'a> {
    pub u: &'a Field3D,
    pub v: &'a Field3D,
}

/// Everything needed to draw one snapshot of one variable.
#[derive(Debug, Clone, Copy)]
pub struct FigureSpec<'a> {
    pub variable: Variable,
    pub field: &'a Field3D,
    pub wind: Option<WindOverlay<'a>>,
    /// One scale per level, index-aligned with the field's levels
    pub scales: &'a [ColorScale],
    pub geometry: &'a ChannelGeometry,
    /// Altitude of each level in meters
    pub altitudes: &'a [f64],
    /// Fields are differences against a base state
    pub increment: bool,
}

impl FigureSpec<'_> {
    fn validate(&self) -> RenderResult<()> {
        let shape = self.geometry.shape();
        if self.field.shape() != shape {
            return Err(RenderError::Input(format!(
                "field '{}' has shape {}, geometry expects {}",
                self.field.name(),
                self.field.shape(),
                shape
            )));
        }
        if self.scales.len() != shape.nz {
            return Err(RenderError::Input(format!(
                "{} color scales for {} levels",
                self.scales.len(),
                shape.nz
            )));
        }
        if self.altitudes.len() < shape.nz {
            return Err(RenderError::Input(format!(
                "{} altitudes for {} levels",
                self.altitudes.len(),
                shape.nz
            )));
        }
        if let Some(wind) = &self.wind {
            for component in [wind.u, wind.v] {
                if component.shape() != shape {
                    return Err(RenderError::Input(format!(
                        "wind component '{}' has shape {}, expected {}",
                        component.name(),
                        component.shape(),
                        shape
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Label shown next to each panel.
pub fn altitude_label(altitude: f64) -> String {
    format!("Altitude {altitude:.0}\u{2009}m")
}

pub struct FigureRenderer {
    config: RenderConfig,
    text: TextRenderer,
}

impl FigureRenderer {
    pub fn new(config: RenderConfig) -> RenderResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            text: TextRenderer::new()?,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Draw the figure in memory.
    pub fn render(&self, spec: &FigureSpec<'_>) -> RenderResult<RgbaImage> {
        spec.validate()?;
        let shape = spec.geometry.shape();
        let window = DataWindow::from_extent(spec.geometry.extent());
        let layout = figure_layout(&self.config, shape.nz, window)?;

        let mut pixmap = Pixmap::new(layout.width, layout.height).ok_or(RenderError::Canvas {
            width: layout.width,
            height: layout.height,
        })?;
        pixmap.fill(tiny_skia::Color::WHITE);

        // Rows run top to bottom while levels run bottom to top.
        let rows: Vec<(usize, &PanelLayout)> = layout
            .panels
            .iter()
            .enumerate()
            .map(|(row, panel)| (shape.nz - 1 - row, panel))
            .collect();

        for &(k, panel) in &rows {
            self.draw_panel_shapes(&mut pixmap, spec, k, panel)?;
        }

        let mut img = RgbaImage::from_raw(layout.width, layout.height, pixmap.take()).ok_or(
            RenderError::Canvas {
                width: layout.width,
                height: layout.height,
            },
        )?;

        let title_px = self.config.font_px() * self.config.title_scale;
        self.text.draw(
            &mut img,
            &spec.variable.title(),
            title_px,
            layout.width as f32 / 2.0,
            layout.title_top,
            HAlign::Center,
            VAlign::Top,
            Color::BLACK,
        );
        for &(k, panel) in &rows {
            self.draw_panel_labels(&mut img, spec, k, panel);
        }

        debug!(
            variable = spec.variable.code(),
            levels = shape.nz,
            width = layout.width,
            height = layout.height,
            "Rendered figure"
        );
        Ok(img)
    }

    /// Draw the figure and write it as a JPEG.
    pub fn render_to_file(&self, spec: &FigureSpec<'_>, path: &Path) -> RenderResult<()> {
        let img = self.render(spec)?;
        save_jpeg(img, path, self.config.jpeg_quality)?;
        info!(path = %path.display(), variable = spec.variable.code(), "Wrote figure");
        Ok(())
    }

    fn draw_panel_shapes(
        &self,
        pixmap: &mut Pixmap,
        spec: &FigureSpec<'_>,
        k: usize,
        panel: &PanelLayout,
    ) -> RenderResult<()> {
        let shape = spec.geometry.shape();
        let scale = &spec.scales[k];
        let axes = panel.viewport.rect;

        let filled = fill_panel(pixmap, &panel.viewport, spec.geometry, spec.field.level(k), scale);
        debug!(level = k, filled, degenerate = scale.is_degenerate(), "Filled panel");

        if let Some(wind) = &spec.wind {
            let quiver = &self.config.quiver;
            let style = QuiverStyle {
                scale: quiver.scale_for(spec.increment),
                pixels_per_inch: self.config.dpi,
                shaft_width: (quiver.width_fraction * axes.width).max(1.0),
                color: Color::from_array(quiver.color),
            };
            let strides = (
                quiver_stride(shape.ny, quiver.meridional_divisor),
                quiver_stride(shape.nx, quiver.zonal_divisor),
            );
            let clip = rect_path(axes).and_then(|path| {
                let mut mask = Mask::new(pixmap.width(), pixmap.height())?;
                mask.fill_path(&path, FillRule::Winding, false, Transform::identity());
                Some(mask)
            });
            let drawn = draw_quiver(
                pixmap,
                &panel.viewport,
                spec.geometry,
                wind.u.level(k),
                wind.v.level(k),
                strides,
                &style,
                clip.as_ref(),
            );
            debug!(level = k, arrows = drawn, "Drew wind arrows");
        }

        fill_colorbar(pixmap, panel.colorbar, scale);

        let mut paint = Paint::default();
        paint.set_color_rgba8(0, 0, 0, 255);
        paint.anti_alias = true;
        let stroke = Stroke {
            width: self.config.points_to_px(self.config.line_width_pt),
            ..Stroke::default()
        };
        let tick_len = self.config.points_to_px(self.config.tick_length_pt);

        for rect in [axes, panel.colorbar] {
            if let Some(path) = rect_path(rect) {
                pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
            }
        }

        let mut pb = PathBuilder::new();
        for lon in self.longitude_ticks(panel) {
            let (x, _) = panel.viewport.to_pixel(lon, panel.viewport.window.lat_min);
            pb.move_to(x, axes.bottom());
            pb.line_to(x, axes.bottom() + tick_len);
        }
        let bar = panel.colorbar;
        for (value, _) in colorbar_ticks(scale) {
            let y = bar.bottom() - scale.normalize(value) as f32 * bar.height;
            pb.move_to(bar.right(), y);
            pb.line_to(bar.right() + tick_len, y);
        }
        if let Some(path) = pb.finish() {
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }

        Ok(())
    }

    fn draw_panel_labels(
        &self,
        img: &mut RgbaImage,
        spec: &FigureSpec<'_>,
        k: usize,
        panel: &PanelLayout,
    ) {
        let font_px = self.config.font_px();
        let tick_len = self.config.points_to_px(self.config.tick_length_pt);
        let axes = panel.viewport.rect;

        for lon in self.longitude_ticks(panel) {
            let (x, _) = panel.viewport.to_pixel(lon, panel.viewport.window.lat_min);
            self.text.draw(
                img,
                &format_longitude(lon),
                font_px,
                x,
                axes.bottom() + 2.0 * tick_len,
                HAlign::Center,
                VAlign::Top,
                Color::BLACK,
            );
        }

        let label = altitude_label(spec.altitudes[k]);
        let (_, line_height) = self.text.measure(&label, font_px);
        self.text.draw_vertical(
            img,
            &label,
            font_px,
            axes.x - tick_len - line_height / 2.0,
            axes.center_y(),
            Color::BLACK,
        );

        let scale = &spec.scales[k];
        let bar = panel.colorbar;
        let scientific = spec.variable.display().scientific_colorbar;
        for (value, step) in colorbar_ticks(scale) {
            let text = if scientific {
                format_scientific(value)
            } else {
                format_plain(value, step)
            };
            let y = bar.bottom() - scale.normalize(value) as f32 * bar.height;
            self.text.draw(
                img,
                &text,
                font_px,
                bar.right() + 2.0 * tick_len,
                y,
                HAlign::Left,
                VAlign::Center,
                Color::BLACK,
            );
        }
    }

    fn longitude_ticks(&self, panel: &PanelLayout) -> Vec<f64> {
        let window = panel.viewport.window;
        let label_px = self.config.font_px() * 4.0;
        let max_ticks = ((panel.viewport.rect.width / label_px) as usize).clamp(2, 9);
        nice_ticks(window.lon_min, window.lon_max, max_ticks)
    }
}

/// Render one figure with a fresh renderer.
pub fn render_figure(config: &RenderConfig, spec: &FigureSpec<'_>) -> RenderResult<RgbaImage> {
    FigureRenderer::new(config.clone())?.render(spec)
}

/// Encode `img` as a JPEG at `path`.
pub fn save_jpeg(img: RgbaImage, path: &Path, quality: u8) -> RenderResult<()> {
    let rgb = DynamicImage::ImageRgba8(img).into_rgb8();
    let mut writer = BufWriter::new(File::create(path)?);
    let mut encoder = JpegEncoder::new_with_quality(&mut writer, quality);
    encoder.encode(rgb.as_raw(), rgb.width(), rgb.height(), ColorType::Rgb8)?;
    Ok(())
}

/// Colorbar tick values paired with the tick step.
fn colorbar_ticks(scale: &ColorScale) -> Vec<(f64, f64)> {
    let ticks = nice_ticks(scale.min(), scale.max(), 6);
    let step = match ticks.as_slice() {
        [a, b, ..] => b - a,
        _ => 1.0,
    };
    ticks.into_iter().map(|t| (t, step)).collect()
}

/// Paint the colorbar bands, lowest values at the bottom.
fn fill_colorbar(pixmap: &mut Pixmap, rect: PixelRect, scale: &ColorScale) {
    let canvas_width = pixmap.width();
    let (x0, y0, x1, y1) = rect.pixel_span(canvas_width, pixmap.height());
    let bands = scale.band_count();
    let data = pixmap.data_mut();

    for py in y0..y1 {
        let t = 1.0 - ((py as f32 + 0.5 - rect.y) / rect.height).clamp(0.0, 1.0);
        let color = if scale.is_degenerate() {
            plasma(0.5)
        } else {
            let band = ((t * bands as f32) as usize).min(bands - 1);
            scale.band_color(band)
        };
        for px in x0..x1 {
            let idx = ((py * canvas_width + px) * 4) as usize;
            data[idx..idx + 4].copy_from_slice(&color.to_array());
        }
    }
}

fn rect_path(rect: PixelRect) -> Option<SkPath> {
    let mut pb = PathBuilder::new();
    pb.move_to(rect.x, rect.y);
    pb.line_to(rect.right(), rect.y);
    pb.line_to(rect.right(), rect.bottom());
    pb.line_to(rect.x, rect.bottom());
    pb.close();
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_altitude_label() {
        assert_eq!(altitude_label(2500.0), "Altitude 2500\u{2009}m");
        assert_eq!(altitude_label(7499.6), "Altitude 7500\u{2009}m");
    }

    #[test]
    fn test_colorbar_ticks_degenerate() {
        let ticks = colorbar_ticks(&ColorScale::symmetric(0.0, 30));
        assert_eq!(ticks, vec![(0.0, 1.0)]);
    }

    #[test]
    fn test_colorbar_ticks_symmetric() {
        let ticks = colorbar_ticks(&ColorScale::symmetric(3.0, 30));
        let values: Vec<f64> = ticks.iter().map(|t| t.0).collect();
        assert_eq!(values, vec![-3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0]);
        assert!(ticks.iter().all(|t| t.1 == 1.0));
    }
}
