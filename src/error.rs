//! Error types for the sounding-cross-section crate.
use thiserror::Error;

/// Error type for the crate.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum AnalysisError {
    /// A profile that is required for this analysis is missing.
    #[error("Missing profile required for the analysis.")]
    MissingProfile,
    /// A value (location, elevation, etc) that is required is not available.
    #[error("Missing value required for analysis.")]
    MissingValue,
    /// Not enough data available for analysis.
    #[error("Not enough data available for analysis.")]
    NotEnoughData,
    /// Bad or invalid input.
    #[error("Invalid input.")]
    InvalidInput,
    /// Missing data during interpolation, or it would have been extrapolation
    #[error("None value encountered during interpolation.")]
    InterpolationError,
    /// Observed pressure levels are not strictly decreasing with height.
    #[error("Pressure profile is not strictly decreasing.")]
    NonMonotonicPressure,
    /// A station on the cross section path has no sounding.
    #[error("No sounding available for station {0}.")]
    MissingStation(String),
}

/// Shorthand for results.
pub type Result<T> = ::std::result::Result<T, AnalysisError>;
