//! Shared test utilities for the QG plotting workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Synthetic QG-like field generators
//! - A NetCDF grid-file fixture writer
//! - Approximate float assertions
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Relative comparison, for quantities scaled by the Earth radius.
#[macro_export]
macro_rules! assert_rel_eq {
    ($left:expr, $right:expr, $rel:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let scale = left.abs().max(right.abs()).max(f64::MIN_POSITIVE);
        $crate::assert_approx_eq!(left / scale, right / scale, $rel);
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_assert_approx_eq_passes() {
        assert_approx_eq!(1.0001, 1.0, 0.001);
        assert_approx_eq!(-5.5, -5.500001, 0.0001);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq!(1.1, 1.0, 0.001);
    }

    #[test]
    fn test_assert_rel_eq_large_values() {
        assert_rel_eq!(40_030_174.0, 40_030_174.5, 1e-9);
    }
}
