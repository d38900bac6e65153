//! The U.S. standard atmosphere, used to turn station elevation into a pseudo surface pressure
//! for shading terrain under a cross section.
use metfor::{HectoPascal, Meters, Quantity};

/// Standard sea level pressure.
const P0: HectoPascal = HectoPascal(1013.25);
/// Standard sea level temperature in Kelvin.
const T0: f64 = 288.0;
/// Standard lapse rate in K/m.
const GAMMA: f64 = 6.5e-3;
/// Gas constant for dry air, J/kg/K.
const RD: f64 = 287.047_49;
/// Standard gravity, m/s^2.
const G: f64 = 9.806_65;

/// Pressure at `height` above sea level in the standard atmosphere.
///
/// # Examples
///
/// ```rust
/// use metfor::{HectoPascal, Meters, Quantity};
/// use sounding_cross_section::height_to_pressure_std;
///
/// assert!((height_to_pressure_std(Meters(0.0)).unpack() - 1013.25).abs() < 1.0e-9);
///
/// // Denver is a little above 830 hPa.
/// let p = height_to_pressure_std(Meters(1609.0)).unpack();
/// assert!(p > 830.0 && p < 840.0);
/// ```
pub fn height_to_pressure_std<L>(height: L) -> HectoPascal
where
    Meters: From<L>,
    L: metfor::Length,
{
    let z = Meters::from(height).unpack();
    let exponent = G / (RD * GAMMA);

    HectoPascal(P0.unpack() * (1.0 - GAMMA * z / T0).powf(exponent))
}

/// Height above sea level of `pressure` in the standard atmosphere.
pub fn pressure_to_height_std<P>(pressure: P) -> Meters
where
    HectoPascal: From<P>,
    P: metfor::Pressure,
{
    let p = HectoPascal::from(pressure).unpack();
    let exponent = RD * GAMMA / G;

    Meters(T0 / GAMMA * (1.0 - (p / P0.unpack()).powf(exponent)))
}
