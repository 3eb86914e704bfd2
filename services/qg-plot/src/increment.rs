//! Differencing snapshots against a base state.

use netcdf_parser::WindFields;
use qg_common::{Field3D, PlotResult, WindComponent};
use tracing::debug;

/// Replace every field by `field - base`, in place.
///
/// Fails on the first field whose shape differs from the base and leaves the
/// remaining fields untouched.
pub fn apply_increments(fields: &mut [Field3D], base: &Field3D) -> PlotResult<()> {
    for field in fields.iter_mut() {
        field.subtract(base)?;
    }
    debug!(variable = base.name(), count = fields.len(), "Applied increments");
    Ok(())
}

/// Difference each wind component against its own base component.
pub fn apply_wind_increments(winds: &mut [WindFields], base: &WindFields) -> PlotResult<()> {
    for wind in winds.iter_mut() {
        for component in WindComponent::ALL {
            wind.component_mut(component)
                .subtract(base.component(component))?;
        }
    }
    Ok(())
}
