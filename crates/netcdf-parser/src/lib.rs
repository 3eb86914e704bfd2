//! NetCDF reader for QG model grid files.
//!
//! A grid file stores each prognostic variable on a `(nz, ny, nx)` grid:
//! streamfunction `x`, potential vorticity `q` and the wind components `u`
//! and `v`. The coordinate variable `z` holds the altitude of each level.
//!
//! Every read returns an independent copy of the data, so reading several
//! variables from one file never aliases earlier results.

pub mod error;
pub mod native;
pub mod reader;

use std::path::Path;

pub use error::{NetCdfError, NetCdfResult};
pub use reader::{load_field, load_snapshot, GridFile, SnapshotFields, WindFields};

/// Extension every grid file must carry.
pub const GRID_FILE_EXTENSION: &str = "nc";

/// Name of the altitude coordinate variable.
pub const ALTITUDE_VARIABLE: &str = "z";

/// Reject paths that do not end in `.nc`.
///
/// This is a pure path check and never touches the filesystem.
pub fn check_grid_extension<P: AsRef<Path>>(path: P) -> NetCdfResult<()> {
    let path = path.as_ref();
    match path.extension().and_then(|e| e.to_str()) {
        Some(GRID_FILE_EXTENSION) => Ok(()),
        _ => Err(NetCdfError::InvalidExtension {
            path: path.display().to_string(),
            expected: GRID_FILE_EXTENSION,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qg_common::PlotError;

    #[test]
    fn test_extension_accepted() {
        assert!(check_grid_extension("run/state.2010-01-01.nc").is_ok());
        assert!(check_grid_extension("/abs/path/fc.%id%.nc").is_ok());
    }

    #[test]
    fn test_extension_rejected() {
        for bad in ["state.nc4", "state.grib2", "state", "state.nc.gz", "nc"] {
            let err = check_grid_extension(bad).unwrap_err();
            assert!(matches!(err, NetCdfError::InvalidExtension { .. }), "{bad}");
        }
    }

    #[test]
    fn test_extension_error_is_configuration() {
        let err: PlotError = check_grid_extension("state.txt").unwrap_err().into();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_missing_data_is_data_access() {
        let err: PlotError = NetCdfError::MissingData("variable 'q'".into()).into();
        assert!(err.is_data_access());
    }
}
