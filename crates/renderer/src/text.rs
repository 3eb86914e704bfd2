//! Text drawing with an embedded font.

use image::{imageops, Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use rusttype::{point, Font, Scale};

use crate::colormap::Color;
use crate::error::{RenderError, RenderResult};

/// Embedded font data - DejaVu Sans, which covers the degree, minus and
/// superscript glyphs used in labels.
const FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Horizontal placement of text relative to its anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Vertical placement of text relative to its anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

pub struct TextRenderer {
    font: Font<'static>,
}

impl TextRenderer {
    pub fn new() -> RenderResult<Self> {
        let font = Font::try_from_bytes(FONT_DATA).ok_or(RenderError::Font)?;
        Ok(Self { font })
    }

    /// Width and line height of `text` at `size_px`.
    pub fn measure(&self, text: &str, size_px: f32) -> (f32, f32) {
        let scale = Scale::uniform(size_px);
        let v_metrics = self.font.v_metrics(scale);
        let width = self
            .font
            .layout(text, scale, point(0.0, 0.0))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0);
        (width, v_metrics.ascent - v_metrics.descent)
    }

    /// Draw `text` so that its box is aligned to `(x, y)`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &self,
        img: &mut RgbaImage,
        text: &str,
        size_px: f32,
        x: f32,
        y: f32,
        h_align: HAlign,
        v_align: VAlign,
        color: Color,
    ) {
        let (width, height) = self.measure(text, size_px);
        let left = match h_align {
            HAlign::Left => x,
            HAlign::Center => x - width / 2.0,
            HAlign::Right => x - width,
        };
        let top = match v_align {
            VAlign::Top => y,
            VAlign::Center => y - height / 2.0,
            VAlign::Bottom => y - height,
        };
        draw_text_mut(
            img,
            Rgba(color.to_array()),
            left.round() as i32,
            top.round() as i32,
            Scale::uniform(size_px),
            &self.font,
            text,
        );
    }

    /// Draw `text` rotated a quarter turn counter-clockwise, centered on `(cx, cy)`.
    pub fn draw_vertical(
        &self,
        img: &mut RgbaImage,
        text: &str,
        size_px: f32,
        cx: f32,
        cy: f32,
        color: Color,
    ) {
        let (width, height) = self.measure(text, size_px);
        let (w, h) = (width.ceil() as u32, height.ceil() as u32);
        if w == 0 || h == 0 {
            return;
        }

        let mut label = RgbaImage::new(w, h);
        draw_text_mut(
            &mut label,
            Rgba(color.to_array()),
            0,
            0,
            Scale::uniform(size_px),
            &self.font,
            text,
        );
        let rotated = imageops::rotate270(&label);
        let left = (cx - h as f32 / 2.0).round() as i64;
        let top = (cy - w as f32 / 2.0).round() as i64;
        imageops::overlay(img, &rotated, left, top);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dark_pixels(img: &RgbaImage) -> usize {
        img.pixels().filter(|p| p.0[0] < 128).count()
    }

    #[test]
    fn test_font_loads() {
        assert!(TextRenderer::new().is_ok());
    }

    #[test]
    fn test_measure_grows_with_text() {
        let text = TextRenderer::new().unwrap();
        let (short, h1) = text.measure("60°E", 20.0);
        let (long, h2) = text.measure("\u{2212}120°E", 20.0);
        assert!(short > 0.0);
        assert!(long > short);
        assert_eq!(h1, h2);
        assert_eq!(text.measure("", 20.0).0, 0.0);
    }

    #[test]
    fn test_draw_marks_pixels() {
        let text = TextRenderer::new().unwrap();
        let mut img = RgbaImage::from_pixel(200, 60, Rgba([255, 255, 255, 255]));
        text.draw(&mut img, "Altitude", 24.0, 100.0, 30.0, HAlign::Center, VAlign::Center, Color::BLACK);
        assert!(dark_pixels(&img) > 0);
    }

    #[test]
    fn test_vertical_text_is_taller_than_wide() {
        let text = TextRenderer::new().unwrap();
        let mut img = RgbaImage::from_pixel(100, 300, Rgba([255, 255, 255, 255]));
        text.draw_vertical(&mut img, "Altitude 2500 m", 20.0, 50.0, 150.0, Color::BLACK);

        let dark: Vec<(u32, u32)> = img
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0[0] < 128)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(!dark.is_empty());
        let xs = dark.iter().map(|p| p.0);
        let ys = dark.iter().map(|p| p.1);
        let x_extent = xs.clone().max().unwrap() - xs.min().unwrap();
        let y_extent = ys.clone().max().unwrap() - ys.min().unwrap();
        assert!(y_extent > x_extent);
    }
}
