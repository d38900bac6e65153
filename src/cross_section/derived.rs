//! Fields computed from the interpolated grids of a cross section.
use super::CrossSection;
use crate::geo::initial_bearing;
use metfor::{Celsius, HectoPascal, Quantity};
use ndarray::{Array2, Zip};

impl CrossSection {
    /// Potential temperature in Kelvin at every grid point.
    pub fn potential_temperature(&self) -> Array2<f64> {
        Zip::from(&self.pressure)
            .and(&self.temperature)
            .map_collect(|&p, &t| {
                if p.is_finite() && t.is_finite() {
                    metfor::potential_temperature(HectoPascal(p), Celsius(t)).unpack()
                } else {
                    std::f64::NAN
                }
            })
    }

    /// Relative humidity as a fraction at every grid point.
    pub fn relative_humidity(&self) -> Array2<f64> {
        Zip::from(&self.temperature)
            .and(&self.dew_point)
            .map_collect(|&t, &td| {
                if t.is_finite() && td.is_finite() {
                    metfor::rh(Celsius(t), Celsius(td)).unwrap_or(std::f64::NAN)
                } else {
                    std::f64::NAN
                }
            })
    }

    /// Wind speed in m/s at every grid point.
    pub fn wind_speed(&self) -> Array2<f64> {
        Zip::from(&self.u_wind)
            .and(&self.v_wind)
            .map_collect(|&u, &v| u.hypot(v))
    }

    /// Split the wind into components along the path and across it.
    ///
    /// The path direction is the initial bearing from the first station to the last. The
    /// tangential component is positive toward the end of the path and the normal component is
    /// positive to the left of it. Both are in m/s.
    pub fn tangential_normal_wind(&self) -> (Array2<f64>, Array2<f64>) {
        let start = self.columns[0].location();
        let end = self.columns[self.columns.len() - 1].location();
        let (sin_b, cos_b) = initial_bearing(start, end).to_radians().sin_cos();

        let tangential = Zip::from(&self.u_wind)
            .and(&self.v_wind)
            .map_collect(|&u, &v| u * sin_b + v * cos_b);
        let normal = Zip::from(&self.u_wind)
            .and(&self.v_wind)
            .map_collect(|&u, &v| -u * cos_b + v * sin_b);

        (tangential, normal)
    }
}
