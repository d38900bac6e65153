use metfor::{Celsius, HectoPascal, Knots, Meters, WindSpdDir};
use optional::Optioned;

/// All the values observed at one level of a sounding.
///
/// Anything the sounding does not carry at that level, or at all, is missing.
#[derive(Clone, Default, Copy, Debug, PartialEq)]
pub struct DataRow {
    /// Pressure level
    pub pressure: Optioned<HectoPascal>,
    /// Air temperature
    pub temperature: Optioned<Celsius>,
    /// Dew point
    pub dew_point: Optioned<Celsius>,
    /// Wind speed and direction
    pub wind: Optioned<WindSpdDir<Knots>>,
    /// Geopotential height
    pub height: Optioned<Meters>,
}
