//! Distances between stations on a spherical Earth.
use metfor::Meters;

/// Mean radius of the Earth in meters, the value used by the GFS and NAM models.
pub const EARTH_RADIUS: Meters = Meters(6_371_229.0);

/// Great circle distance between two (latitude, longitude) points given in degrees.
///
/// Uses the haversine formula, which stays well conditioned for the short distances between
/// neighboring radiosonde sites.
///
/// # Examples
///
/// ```rust
/// use metfor::{Meters, Quantity};
/// use sounding_cross_section::great_circle_distance;
///
/// let bis = (46.77, -100.75);
/// let abr = (45.45, -98.41);
///
/// let d = great_circle_distance(bis, abr);
/// assert!(d > Meters(200_000.0) && d < Meters(250_000.0));
/// assert_eq!(great_circle_distance(bis, bis), Meters(0.0));
/// ```
pub fn great_circle_distance(from: (f64, f64), to: (f64, f64)) -> Meters {
    let (lat0, lon0) = (from.0.to_radians(), from.1.to_radians());
    let (lat1, lon1) = (to.0.to_radians(), to.1.to_radians());

    let half_dlat = (lat1 - lat0) / 2.0;
    let half_dlon = (lon1 - lon0) / 2.0;

    let a = half_dlat.sin().powi(2) + lat0.cos() * lat1.cos() * half_dlon.sin().powi(2);
    // Clamp for round off so asin never sees a value above 1.
    let central_angle = 2.0 * a.sqrt().min(1.0).asin();

    Meters(EARTH_RADIUS.0 * central_angle)
}

/// Initial bearing, in degrees clockwise from north, of the great circle from `from` to `to`.
pub fn initial_bearing(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat0, lon0) = (from.0.to_radians(), from.1.to_radians());
    let (lat1, lon1) = (to.0.to_radians(), to.1.to_radians());
    let dlon = lon1 - lon0;

    let y = dlon.sin() * lat1.cos();
    let x = lat0.cos() * lat1.sin() - lat0.sin() * lat1.cos() * dlon.cos();

    (y.atan2(x).to_degrees() + 360.0) % 360.0
}
