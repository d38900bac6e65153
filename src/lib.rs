#![warn(missing_docs)]
/*!
Build distance-pressure cross sections from a line of radiosonde soundings.

Each [`Sounding`] is resampled onto a common [`PressureGrid`] with linear interpolation in the
logarithm of pressure, clamping to the observed values above and below the data. The resampled
columns are placed at their great circle distance along the path and interpolated onto an evenly
spaced mesh with a [`ScatteredInterpolator`]. Station elevations are converted to a ground
pressure with the standard atmosphere so plotting code can shade the terrain.

The crate also has an [`AnalyticTrough`] generator for checking quasi-geostrophic diagnostics
against an idealized height and temperature pattern.

For one-off lookups there are [`linear_interpolate`], which interpolates any pair of parallel
profiles without clamping, and [`linear_interpolate_sounding`], which returns a whole
[`DataRow`] at a pressure with the wind interpolated as a vector.

Nothing here downloads or plots anything. Soundings come in through the [`SoundingSource`] trait
or a plain `HashMap`, and plotting is left to the caller.
*/

//
// API
//
pub use crate::{
    cross_section::{
        build_cross_section, build_cross_section_from_source, CrossSection, CrossSectionConfig,
        SoundingSource, StationColumn, Variable,
    },
    error::{AnalysisError, Result},
    geo::{great_circle_distance, initial_bearing, EARTH_RADIUS},
    grid::{PressureGrid, MAX_LEVELS},
    interpolation::{
        interpolate_profile, linear_interpolate, linear_interpolate_sounding, log_p_interpolate,
    },
    scattered::{ScatterMethod, ScatteredInterpolator, Stencil},
    sounding::{DataRow, Sounding, StationInfo},
    std_atmosphere::{height_to_pressure_std, pressure_to_height_std},
    trough::{AnalyticTrough, TroughConfig},
};

#[doc(hidden)]
pub use crate::sounding::doctest;

//
// Internal use only
//

// Modules
mod cross_section;
mod error;
mod geo;
mod grid;
mod interpolation;
mod scattered;
mod sounding;
mod std_atmosphere;
mod trough;
mod utility;
