//! Rendering configuration.
//!
//! Everything that shapes a figure lives in one value handed to the
//! renderer: figure size, resolution, fonts, margins, colorbar and arrow
//! settings. Defaults give a 7 × 3.5 in figure at 300 dpi.

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};

/// Figure-level rendering settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Figure width in inches
    pub fig_width_in: f32,
    /// Figure height in inches
    pub fig_height_in: f32,
    /// Output resolution
    pub dpi: f32,
    /// Base font size in points
    pub font_size_pt: f32,
    /// Title size relative to the base font
    pub title_scale: f32,
    /// Axes frame and tick line width in points
    pub line_width_pt: f32,
    /// Tick length and label padding in points
    pub tick_length_pt: f32,
    /// Number of color levels per panel
    pub color_levels: usize,
    pub margins: Margins,
    pub colorbar: ColorbarConfig,
    pub quiver: QuiverConfig,
    /// JPEG quality, 1-100
    pub jpeg_quality: u8,
}

/// Subplot placement as fractions of the figure.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Margins {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    /// Vertical gap between panels, as a fraction of a panel height
    pub hspace: f32,
}

/// Colorbar placement next to each panel.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ColorbarConfig {
    /// Colorbar length relative to the panel height
    pub shrink: f32,
    /// Share of the panel width reserved for the colorbar
    pub fraction: f32,
    /// Gap between axes and colorbar, as a share of the panel width
    pub pad: f32,
    /// Length-to-thickness ratio
    pub aspect: f32,
}

/// Wind arrow settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct QuiverConfig {
    /// Zonal stride is `max(nx / zonal_divisor, 1)`
    pub zonal_divisor: usize,
    /// Meridional stride is `max(ny / meridional_divisor, 1)`
    pub meridional_divisor: usize,
    /// Wind speed per inch of arrow for full fields
    pub absolute_scale: f32,
    /// Wind speed per inch of arrow for increments
    pub increment_scale: f32,
    /// Shaft width as a fraction of the axes width
    pub width_fraction: f32,
    pub color: [u8; 4],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fig_width_in: 7.0,
            fig_height_in: 3.5,
            dpi: 300.0,
            font_size_pt: 12.0,
            title_scale: 1.2,
            line_width_pt: 0.8,
            tick_length_pt: 3.5,
            color_levels: 30,
            margins: Margins::default(),
            colorbar: ColorbarConfig::default(),
            quiver: QuiverConfig::default(),
            jpeg_quality: 90,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 0.04,
            right: 0.98,
            bottom: 0.04,
            top: 0.9,
            hspace: 0.01,
        }
    }
}

impl Default for ColorbarConfig {
    fn default() -> Self {
        Self {
            shrink: 0.9,
            fraction: 0.15,
            pad: 0.05,
            aspect: 20.0,
        }
    }
}

impl Default for QuiverConfig {
    fn default() -> Self {
        Self {
            zonal_divisor: 20,
            meridional_divisor: 10,
            absolute_scale: 400.0,
            increment_scale: 200.0,
            width_fraction: 0.005,
            color: [0, 0, 0, 255],
        }
    }
}

impl QuiverConfig {
    /// Arrow scale: increments are smaller, so their arrows are drawn longer.
    pub fn scale_for(&self, increment: bool) -> f32 {
        if increment {
            self.increment_scale
        } else {
            self.absolute_scale
        }
    }
}

impl RenderConfig {
    /// Load render configuration from JSON string
    pub fn from_json(json_str: &str) -> RenderResult<Self> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load render configuration from file
    pub fn from_file(path: &std::path::Path) -> RenderResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Check values a figure cannot be drawn with.
    pub fn validate(&self) -> RenderResult<()> {
        let positive = [
            ("fig_width_in", self.fig_width_in),
            ("fig_height_in", self.fig_height_in),
            ("dpi", self.dpi),
            ("font_size_pt", self.font_size_pt),
            ("quiver.absolute_scale", self.quiver.absolute_scale),
            ("quiver.increment_scale", self.quiver.increment_scale),
            ("colorbar.aspect", self.colorbar.aspect),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(RenderError::Config(format!("{name} must be positive, got {value}")));
            }
        }
        if self.color_levels < 2 {
            return Err(RenderError::Config(format!(
                "color_levels must be at least 2, got {}",
                self.color_levels
            )));
        }
        let m = &self.margins;
        if !(0.0 <= m.left && m.left < m.right && m.right <= 1.0)
            || !(0.0 <= m.bottom && m.bottom < m.top && m.top <= 1.0)
        {
            return Err(RenderError::Config(format!("invalid margins {m:?}")));
        }
        if self.colorbar.fraction + self.colorbar.pad >= 1.0 {
            return Err(RenderError::Config(
                "colorbar fraction and pad leave no room for the axes".to_string(),
            ));
        }
        if self.quiver.zonal_divisor == 0 || self.quiver.meridional_divisor == 0 {
            return Err(RenderError::Config("quiver divisors must be non-zero".to_string()));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(RenderError::Config(format!(
                "jpeg_quality must be within 1-100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }

    /// Figure size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.fig_width_in * self.dpi).round() as u32,
            (self.fig_height_in * self.dpi).round() as u32,
        )
    }

    /// Convert a length in points to pixels.
    pub fn points_to_px(&self, points: f32) -> f32 {
        points * self.dpi / 72.0
    }

    pub fn font_px(&self) -> f32 {
        self.points_to_px(self.font_size_pt)
    }
}
