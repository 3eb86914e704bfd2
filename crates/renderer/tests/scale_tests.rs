//! Tests for shared per-level color scales.

use qg_common::{Field3D, GridShape};
use renderer::{compute_color_scales, RenderError};
use test_utils::{constant_field, create_jet_streamfunction, create_vortex_pv, field_from_fn};

fn negated(field: &Field3D) -> Field3D {
    let data = field.data().iter().map(|v| -v).collect();
    Field3D::new(field.name(), field.shape(), data).unwrap()
}

#[test]
fn test_scale_per_level_from_max_abs() {
    let shape = GridShape::new(2, 3, 4);
    let field = field_from_fn("x", shape, |k, j, i| {
        if k == 0 {
            (j * 4 + i) as f64 - 6.0
        } else {
            100.0 * (i as f64 - 1.0)
        }
    });

    let scales = compute_color_scales([&field], 30).unwrap();
    assert_eq!(scales.len(), 2);
    assert_eq!(scales[0].levels().len(), 30);
    assert_eq!(scales[0].min(), -6.0);
    assert_eq!(scales[0].max(), 6.0);
    assert_eq!(scales[1].max(), 200.0);
}

#[test]
fn test_negated_field_has_same_scale() {
    let shape = GridShape::new(2, 10, 20);
    let field = create_vortex_pv(shape);
    let scales = compute_color_scales([&field], 30).unwrap();
    let flipped = compute_color_scales([&negated(&field)], 30).unwrap();
    assert_eq!(scales, flipped);
}

#[test]
fn test_scale_shared_across_snapshots() {
    let shape = GridShape::new(2, 10, 20);
    let weak = create_jet_streamfunction(shape, 1.0e6, 2.0);
    let strong = create_jet_streamfunction(shape, 3.0e6, 0.5);

    let scales = compute_color_scales([&weak, &strong], 30).unwrap();
    for (k, scale) in scales.iter().enumerate() {
        let expected = weak.max_abs_level(k).max(strong.max_abs_level(k));
        assert_eq!(scale.max_abs(), expected);
    }

    // Order of snapshots does not matter
    let reversed = compute_color_scales([&strong, &weak], 30).unwrap();
    assert_eq!(scales, reversed);
}

#[test]
fn test_self_difference_gives_degenerate_scale() {
    let shape = GridShape::new(2, 10, 20);
    let mut field = create_jet_streamfunction(shape, 1.0e6, 2.0);
    let base = field.clone();
    field.subtract(&base).unwrap();

    let scales = compute_color_scales([&field], 30).unwrap();
    for scale in &scales {
        assert!(scale.is_degenerate());
        assert_eq!(scale.min(), 0.0);
        assert_eq!(scale.max(), 0.0);
        assert!(scale.color_for(0.0).is_some());
    }
}

#[test]
fn test_missing_values_do_not_set_the_scale() {
    let shape = GridShape::new(1, 2, 2);
    let field = Field3D::new("q", shape, vec![f64::NAN, -2.0, 1.0, f64::NAN]).unwrap();
    let scales = compute_color_scales([&field], 30).unwrap();
    assert_eq!(scales[0].max(), 2.0);
}

#[test]
fn test_shape_mismatch_is_rejected() {
    let a = constant_field("x", GridShape::new(2, 10, 20), 1.0);
    let b = constant_field("x", GridShape::new(2, 10, 21), 1.0);
    let result = compute_color_scales([&a, &b], 30);
    assert!(matches!(result, Err(RenderError::Input(_))));
}

#[test]
fn test_no_fields_is_rejected() {
    let fields: Vec<Field3D> = Vec::new();
    assert!(compute_color_scales(&fields, 30).is_err());
}
