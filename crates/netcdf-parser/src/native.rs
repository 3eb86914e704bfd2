//! Thin helpers over the native netcdf library.
//!
//! The netcdf crate wraps libnetcdf/HDF5, which needs a real file path.
//! Files are opened read-only and released when the handle is dropped.

use std::path::Path;
use std::sync::Once;

use crate::error::{NetCdfError, NetCdfResult};

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose diagnostics even when a lookup for an
/// optional attribute (such as `_FillValue`) fails and is handled here.
/// Only needs to run once per process; safe to call repeatedly.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and we're passing null pointers
        // to disable error output, which is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Open a NetCDF file for reading.
pub fn open_dataset(path: &Path) -> NetCdfResult<netcdf::File> {
    silence_hdf5_errors();

    if !path.exists() {
        return Err(NetCdfError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} does not exist", path.display()),
        )));
    }

    netcdf::open(path).map_err(|e| {
        NetCdfError::InvalidFormat(format!("Failed to open {}: {}", path.display(), e))
    })
}

/// Read every value of a variable as f64, mapping `_FillValue` to NaN.
pub fn read_f64_values(var: &netcdf::Variable) -> NetCdfResult<Vec<f64>> {
    let mut values: Vec<f64> = var.get_values(..).map_err(|e| {
        NetCdfError::InvalidFormat(format!("Failed to read '{}': {}", var.name(), e))
    })?;

    if let Some(fill) = get_f64_attr(var, "_FillValue") {
        for value in values.iter_mut().filter(|v| **v == fill) {
            *value = f64::NAN;
        }
    }

    Ok(values)
}

/// Lengths of a variable's dimensions, outermost first.
pub fn dimension_lengths(var: &netcdf::Variable) -> Vec<usize> {
    var.dimensions().iter().map(|d| d.len()).collect()
}

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

/// Helper to get f64 attribute.
fn get_f64_attr(var: &netcdf::Variable, name: &str) -> Option<f64> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    f64::try_from(attr_value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_file() {
        let err = open_dataset(Path::new("/definitely/not/here.nc")).unwrap_err();
        assert!(matches!(err, NetCdfError::IoError(_)));
    }

    #[test]
    fn test_silence_is_idempotent() {
        silence_hdf5_errors();
        silence_hdf5_errors();
    }
}
