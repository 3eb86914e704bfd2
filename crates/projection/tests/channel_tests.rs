//! Property tests for the channel coordinate mapping.

use projection::{ChannelGeometry, EARTH_RADIUS_M};
use qg_common::GridShape;
use std::f64::consts::PI;
use test_utils::{assert_approx_eq, assert_rel_eq};

const SHAPES: &[(usize, usize, usize)] = &[
    (1, 1, 1),
    (2, 1, 2),
    (2, 10, 20),
    (2, 39, 40),
    (3, 179, 360),
    (1, 500, 7),
    (2, 2, 1000),
];

#[test]
fn test_longitudes_in_half_open_range() {
    for &(nz, ny, nx) in SHAPES {
        let geometry = ChannelGeometry::new(GridShape::new(nz, ny, nx));
        for &lon in geometry.longitudes() {
            assert!((-180.0..180.0).contains(&lon), "lon {lon} for nx={nx}");
        }
    }
}

#[test]
fn test_latitudes_in_half_open_range() {
    for &(nz, ny, nx) in SHAPES {
        let geometry = ChannelGeometry::new(GridShape::new(nz, ny, nx));
        for &lat in geometry.latitudes() {
            assert!((0.0..90.0).contains(&lat), "lat {lat} for ny={ny}");
        }
    }
}

#[test]
fn test_cell_sizes_for_one_degree_grid() {
    let geometry = ChannelGeometry::new(GridShape::new(2, 179, 360));
    assert_rel_eq!(geometry.dx, 2.0 * PI * EARTH_RADIUS_M / 360.0, 1e-12);
    assert_rel_eq!(geometry.dy, 0.5 * PI * EARTH_RADIUS_M / 180.0, 1e-12);
}

#[test]
fn test_one_degree_grid_coordinates() {
    let geometry = ChannelGeometry::new(GridShape::new(2, 179, 360));
    assert_approx_eq!(geometry.longitudes()[0], -179.5, 1e-9);
    assert_approx_eq!(geometry.longitudes()[359], 179.5, 1e-9);
    assert_approx_eq!(geometry.latitudes()[0], 0.5, 1e-9);
    assert_approx_eq!(geometry.latitudes()[178], 89.5, 1e-9);
}

#[test]
fn test_coordinates_strictly_increase() {
    let geometry = ChannelGeometry::new(GridShape::new(2, 10, 20));
    assert!(geometry.longitudes().windows(2).all(|w| w[0] < w[1]));
    assert!(geometry.latitudes().windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_extent_matches_mesh() {
    let geometry = ChannelGeometry::new(GridShape::new(2, 10, 20));
    let extent = geometry.extent();
    let mesh = geometry.mesh();
    let lon_min = mesh.lon.iter().cloned().fold(f64::INFINITY, f64::min);
    let lat_max = mesh.lat.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(extent.lon_min, lon_min);
    assert_eq!(extent.lat_max, lat_max);
    assert_approx_eq!(extent.lon_span(), 342.0, 1e-9);
}
