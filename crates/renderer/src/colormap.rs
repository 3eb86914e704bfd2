//! Color types and the perceptually uniform `plasma` colormap.

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const WHITE: Color = Color::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn from_array(rgba: [u8; 4]) -> Self {
        Self::new(rgba[0], rgba[1], rgba[2], rgba[3])
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Anchor colors of matplotlib's plasma map at t = 0, 1/8, ..., 1.
const PLASMA_STOPS: [Color; 9] = [
    Color::rgb(0x0d, 0x08, 0x87),
    Color::rgb(0x4c, 0x02, 0xa1),
    Color::rgb(0x7e, 0x03, 0xa8),
    Color::rgb(0xa9, 0x23, 0x95),
    Color::rgb(0xcc, 0x47, 0x78),
    Color::rgb(0xe5, 0x6b, 0x5d),
    Color::rgb(0xf8, 0x94, 0x41),
    Color::rgb(0xfd, 0xc3, 0x28),
    Color::rgb(0xf0, 0xf9, 0x21),
];

/// Sample the plasma colormap at `t` in [0, 1]; out-of-range inputs clamp.
pub fn plasma(t: f64) -> Color {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let segments = (PLASMA_STOPS.len() - 1) as f64;
    let pos = t * segments;
    let idx = (pos.floor() as usize).min(PLASMA_STOPS.len() - 2);
    interpolate_color(PLASMA_STOPS[idx], PLASMA_STOPS[idx + 1], (pos - idx as f64) as f32)
}

/// Linear interpolation between two colors
fn interpolate_color(color1: Color, color2: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let t_inv = 1.0 - t;
    let mix = |a: u8, b: u8| ((a as f32 * t_inv) + (b as f32 * t)).round() as u8;

    Color::new(
        mix(color1.r, color2.r),
        mix(color1.g, color2.g),
        mix(color1.b, color2.b),
        mix(color1.a, color2.a),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plasma_endpoints() {
        assert_eq!(plasma(0.0), Color::rgb(0x0d, 0x08, 0x87));
        assert_eq!(plasma(1.0), Color::rgb(0xf0, 0xf9, 0x21));
        assert_eq!(plasma(0.5), Color::rgb(0xcc, 0x47, 0x78));
    }

    #[test]
    fn test_plasma_clamps() {
        assert_eq!(plasma(-3.0), plasma(0.0));
        assert_eq!(plasma(7.0), plasma(1.0));
        assert_eq!(plasma(f64::NAN), plasma(0.0));
    }

    #[test]
    fn test_interpolate_midpoint() {
        let mid = interpolate_color(Color::rgb(0, 0, 0), Color::rgb(200, 100, 50), 0.5);
        assert_eq!(mid, Color::rgb(100, 50, 25));
    }
}
