//! Channel-domain geometry.
//!
//! The zonal extent of the channel is the equatorial circumference
//! `2πR` and the meridional extent is a quarter of it, `0.5πR`. The
//! meridional direction excludes one boundary row, so `ny` points divide
//! the extent into `ny + 1` cells:
//!
//! ```text
//! dx  = 2πR / nx                lon(i) = (i + 0.5)·dx / 2πR · 360 − 180
//! dy  = 0.5πR / (ny + 1)        lat(j) = (j + 1)·dy / 0.5πR · 90
//! ```
//!
//! Cell centers carry a half-cell offset in the zonal direction only, so
//! longitudes fall in `[-180, 180)` and latitudes in `[0, 90)`.

use std::f64::consts::PI;

use qg_common::GridShape;

/// Earth radius at the equator (meters).
pub const EARTH_RADIUS_M: f64 = 6371229.0;

/// Physical size of the channel domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelDomain {
    /// Zonal extent (meters)
    pub zonal_extent: f64,
    /// Meridional extent (meters)
    pub meridional_extent: f64,
}

impl ChannelDomain {
    pub fn from_radius(radius: f64) -> Self {
        Self {
            zonal_extent: 2.0 * PI * radius,
            meridional_extent: 0.5 * PI * radius,
        }
    }
}

impl Default for ChannelDomain {
    fn default() -> Self {
        Self::from_radius(EARTH_RADIUS_M)
    }
}

/// Bounds of the cell-center mesh in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

impl Extent {
    pub fn lon_span(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    pub fn lat_span(&self) -> f64 {
        self.lat_max - self.lat_min
    }
}

/// Two-dimensional (longitude, latitude) mesh, row-major `[j][i]`.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub nx: usize,
    pub ny: usize,
    pub lon: Vec<f64>,
    pub lat: Vec<f64>,
}

impl Mesh {
    /// (longitude, latitude) of cell `(j, i)`.
    pub fn point(&self, j: usize, i: usize) -> (f64, f64) {
        let idx = j * self.nx + i;
        (self.lon[idx], self.lat[idx])
    }
}

/// Geometry of one run, derived from the first snapshot's shape.
#[derive(Debug, Clone)]
pub struct ChannelGeometry {
    shape: GridShape,
    domain: ChannelDomain,
    /// Zonal cell size (meters)
    pub dx: f64,
    /// Meridional cell size (meters)
    pub dy: f64,
    longitudes: Vec<f64>,
    latitudes: Vec<f64>,
}

impl ChannelGeometry {
    /// Geometry on the Earth-sized channel.
    pub fn new(shape: GridShape) -> Self {
        Self::with_domain(shape, ChannelDomain::default())
    }

    pub fn with_domain(shape: GridShape, domain: ChannelDomain) -> Self {
        let dx = domain.zonal_extent / shape.nx as f64;
        let dy = domain.meridional_extent / (shape.ny as f64 + 1.0);

        let longitudes = (0..shape.nx)
            .map(|i| (i as f64 + 0.5) * dx / domain.zonal_extent * 360.0 - 180.0)
            .collect();
        let latitudes = (0..shape.ny)
            .map(|j| (j as f64 + 1.0) * dy / domain.meridional_extent * 90.0)
            .collect();

        Self {
            shape,
            domain,
            dx,
            dy,
            longitudes,
            latitudes,
        }
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn domain(&self) -> ChannelDomain {
        self.domain
    }

    /// Cell-center longitudes, one per zonal index.
    pub fn longitudes(&self) -> &[f64] {
        &self.longitudes
    }

    /// Cell-center latitudes, one per meridional index.
    pub fn latitudes(&self) -> &[f64] {
        &self.latitudes
    }

    /// Full (longitude, latitude) mesh, like `meshgrid(lon, lat)`.
    pub fn mesh(&self) -> Mesh {
        let (nx, ny) = (self.shape.nx, self.shape.ny);
        let mut lon = Vec::with_capacity(nx * ny);
        let mut lat = Vec::with_capacity(nx * ny);
        for &la in &self.latitudes {
            for &lo in &self.longitudes {
                lon.push(lo);
                lat.push(la);
            }
        }
        Mesh { nx, ny, lon, lat }
    }

    /// Bounds of the mesh. Contours are drawn inside these.
    pub fn extent(&self) -> Extent {
        let first = |v: &[f64]| v.first().copied().unwrap_or(0.0);
        let last = |v: &[f64]| v.last().copied().unwrap_or(0.0);
        Extent {
            lon_min: first(&self.longitudes),
            lon_max: last(&self.longitudes),
            lat_min: first(&self.latitudes),
            lat_max: last(&self.latitudes),
        }
    }

    /// Inverse mapping: fractional `(i, j)` indices of a geographic point.
    ///
    /// Integer results land exactly on cell centers.
    pub fn fractional_index(&self, lon: f64, lat: f64) -> (f64, f64) {
        let fi = (lon + 180.0) / 360.0 * self.shape.nx as f64 - 0.5;
        let fj = lat / 90.0 * (self.shape.ny as f64 + 1.0) - 1.0;
        (fi, fj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_extents() {
        let domain = ChannelDomain::default();
        assert!((domain.zonal_extent - 2.0 * PI * EARTH_RADIUS_M).abs() < 1e-6);
        assert!((domain.meridional_extent * 4.0 - domain.zonal_extent).abs() < 1e-6);
    }

    #[test]
    fn test_single_cell() {
        let geometry = ChannelGeometry::new(GridShape::new(1, 1, 1));
        assert_eq!(geometry.longitudes(), &[0.0]);
        assert!((geometry.latitudes()[0] - 45.0).abs() < 1e-12);
    }

    #[test]
    fn test_fractional_index_inverts_centers() {
        let geometry = ChannelGeometry::new(GridShape::new(2, 7, 12));
        for (i, &lon) in geometry.longitudes().iter().enumerate() {
            let (fi, _) = geometry.fractional_index(lon, 45.0);
            assert!((fi - i as f64).abs() < 1e-9);
        }
        for (j, &lat) in geometry.latitudes().iter().enumerate() {
            let (_, fj) = geometry.fractional_index(0.0, lat);
            assert!((fj - j as f64).abs() < 1e-9);
        }
    }

    #[test]
    fn test_mesh_layout() {
        let geometry = ChannelGeometry::new(GridShape::new(2, 3, 4));
        let mesh = geometry.mesh();
        assert_eq!(mesh.lon.len(), 12);
        let (lon, lat) = mesh.point(2, 3);
        assert_eq!(lon, geometry.longitudes()[3]);
        assert_eq!(lat, geometry.latitudes()[2]);
    }
}
