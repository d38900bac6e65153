//! An idealized upper level trough on an f-plane and the balanced winds and QG forcing that go
//! with it.
//!
//! The height field is a zonal flow with a cosine wave superimposed, damped with distance from
//! the center of the domain in the meridional direction. The temperature field is built the same
//! way with its own amplitude and an optional phase shift, so a thermal trough lagging the height
//! trough gives the familiar pattern of warm advection ahead of the trough.
use crate::error::{AnalysisError, Result};
use log::debug;
use ndarray::{Array2, Zip};
use std::f64::consts::PI;

/// Rotation rate of the earth in radians per second.
const OMEGA: f64 = 7.292e-5;
/// Acceleration due to gravity in m/s^2.
const GRAVITY: f64 = 9.80665;
/// Gas constant for dry air in J / (kg K)
const RD: f64 = 287.04749;

/// Parameters for an [`AnalyticTrough`]. Distances are in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TroughConfig {
    nx: usize,
    ny: usize,
    spacing: f64,
    central_latitude: f64,
    mean_height: f64,
    height_gradient: f64,
    amplitude: f64,
    wavelength: f64,
    decay_width: f64,
    mean_temperature: f64,
    temperature_gradient: f64,
    temperature_amplitude: f64,
    thermal_phase_shift: f64,
    pressure: f64,
}

impl Default for TroughConfig {
    /// A mid-latitude 500 hPa trough on a 6000 km by 4000 km domain with 100 km spacing.
    fn default() -> Self {
        TroughConfig {
            nx: 61,
            ny: 41,
            spacing: 100_000.0,
            central_latitude: 45.0,
            mean_height: 5_640.0,
            height_gradient: -1.2e-4,
            amplitude: 150.0,
            wavelength: 4_000_000.0,
            decay_width: 1_500_000.0,
            mean_temperature: 253.15,
            temperature_gradient: -8.0e-6,
            temperature_amplitude: 4.0,
            thermal_phase_shift: -500_000.0,
            pressure: 500.0,
        }
    }
}

macro_rules! make_config_setter {
    ($(#[$attr:meta])* => $name:ident, $field:ident, $field_type:ty) => {
        $(#[$attr])*
        pub fn $name(self, $field: $field_type) -> Self {
            Self { $field, ..self }
        }
    };
}

impl TroughConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method for the grid size, `nx` points west to east and `ny` south to north.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_cross_section::{AnalyticTrough, TroughConfig};
    ///
    /// let config = TroughConfig::new().with_grid_size(31, 21).with_spacing(200_000.0);
    /// let trough = AnalyticTrough::generate(&config).unwrap();
    ///
    /// assert_eq!(trough.height().dim(), (21, 31));
    /// ```
    pub fn with_grid_size(self, nx: usize, ny: usize) -> Self {
        Self { nx, ny, ..self }
    }

    make_config_setter!(
        /// Builder method for the grid spacing in meters.
        => with_spacing, spacing, f64
    );

    make_config_setter!(
        /// Builder method for the latitude of the f-plane in degrees.
        => with_central_latitude, central_latitude, f64
    );

    make_config_setter!(
        /// Builder method for the domain mean geopotential height in meters.
        => with_mean_height, mean_height, f64
    );

    make_config_setter!(
        /// Builder method for the northward gradient of the mean height, in m/m.
        => with_height_gradient, height_gradient, f64
    );

    make_config_setter!(
        /// Builder method for the wave amplitude in meters, negative values make a ridge.
        => with_amplitude, amplitude, f64
    );

    make_config_setter!(
        /// Builder method for the wavelength in meters.
        => with_wavelength, wavelength, f64
    );

    make_config_setter!(
        /// Builder method for the meridional e-folding distance of the wave in meters.
        => with_decay_width, decay_width, f64
    );

    make_config_setter!(
        /// Builder method for the domain mean temperature in Kelvin.
        => with_mean_temperature, mean_temperature, f64
    );

    make_config_setter!(
        /// Builder method for the northward temperature gradient, in K/m.
        => with_temperature_gradient, temperature_gradient, f64
    );

    make_config_setter!(
        /// Builder method for the amplitude of the thermal wave in Kelvin.
        => with_temperature_amplitude, temperature_amplitude, f64
    );

    make_config_setter!(
        /// Builder method for the eastward offset of the thermal trough from the height trough in
        /// meters.
        => with_thermal_phase_shift, thermal_phase_shift, f64
    );

    make_config_setter!(
        /// Builder method for the pressure level of the fields in hPa.
        => with_pressure, pressure, f64
    );

    /// Number of points west to east.
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Number of points south to north.
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Grid spacing in meters.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Pressure level in hPa.
    pub fn pressure(&self) -> f64 {
        self.pressure
    }

    fn validate(&self) -> Result<f64> {
        let all_finite = [
            self.spacing,
            self.central_latitude,
            self.mean_height,
            self.height_gradient,
            self.amplitude,
            self.wavelength,
            self.decay_width,
            self.mean_temperature,
            self.temperature_gradient,
            self.temperature_amplitude,
            self.thermal_phase_shift,
            self.pressure,
        ]
        .iter()
        .all(|val| val.is_finite());

        if !all_finite
            || self.nx < 3
            || self.ny < 3
            || self.spacing <= 0.0
            || self.wavelength <= 0.0
            || self.decay_width <= 0.0
            || self.pressure <= 0.0
            || self.central_latitude.abs() > 90.0
        {
            return Err(AnalysisError::InvalidInput);
        }

        let coriolis = 2.0 * OMEGA * self.central_latitude.to_radians().sin();
        if coriolis.abs() < 1.0e-12 {
            // No geostrophic balance at the equator.
            return Err(AnalysisError::InvalidInput);
        }

        Ok(coriolis)
    }
}

/// Height and temperature fields of an idealized trough on a regular grid.
///
/// Fields are indexed `[y, x]` with `y` increasing northward and `x` increasing eastward. The
/// trough axis runs through the center column of the grid.
#[derive(Debug, Clone)]
pub struct AnalyticTrough {
    config: TroughConfig,
    coriolis: f64,
    x: Vec<f64>,
    y: Vec<f64>,
    height: Array2<f64>,
    temperature: Array2<f64>,
}

impl AnalyticTrough {
    /// Build the height and temperature fields described by `config`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_cross_section::{AnalyticTrough, TroughConfig};
    ///
    /// let trough = AnalyticTrough::generate(&TroughConfig::default()).unwrap();
    /// let (u, v) = trough.geostrophic_wind();
    ///
    /// // Westerlies through the middle of the domain.
    /// assert!(u[[20, 30]] > 0.0);
    /// assert!(v[[20, 30]].abs() < 1.0e-6);
    /// ```
    pub fn generate(config: &TroughConfig) -> Result<AnalyticTrough> {
        let coriolis = config.validate()?;
        debug!(
            "generating {}x{} trough with f = {:e} at {} hPa",
            config.nx, config.ny, coriolis, config.pressure
        );

        let centered = |n: usize| -> Vec<f64> {
            let mid = (n - 1) as f64 / 2.0;
            (0..n).map(|i| (i as f64 - mid) * config.spacing).collect()
        };
        let x = centered(config.nx);
        let y = centered(config.ny);

        let k = 2.0 * PI / config.wavelength;
        let envelope = |yy: f64| (-(yy / config.decay_width).powi(2)).exp();

        let shape = (config.ny, config.nx);
        let height = Array2::from_shape_fn(shape, |(j, i)| {
            config.mean_height + config.height_gradient * y[j]
                - config.amplitude * (k * x[i]).cos() * envelope(y[j])
        });
        let temperature = Array2::from_shape_fn(shape, |(j, i)| {
            config.mean_temperature + config.temperature_gradient * y[j]
                - config.temperature_amplitude
                    * (k * (x[i] - config.thermal_phase_shift)).cos()
                    * envelope(y[j])
        });

        Ok(AnalyticTrough {
            config: *config,
            coriolis,
            x,
            y,
            height,
            temperature,
        })
    }

    /// The configuration the fields were generated from.
    pub fn config(&self) -> &TroughConfig {
        &self.config
    }

    /// Coriolis parameter in 1/s.
    pub fn coriolis(&self) -> f64 {
        self.coriolis
    }

    /// Eastward distance of each column from the center of the domain.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Northward distance of each row from the center of the domain.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Geopotential height in meters.
    pub fn height(&self) -> &Array2<f64> {
        &self.height
    }

    /// Temperature in Kelvin.
    pub fn temperature(&self) -> &Array2<f64> {
        &self.temperature
    }

    /// The (u, v) geostrophic wind in m/s.
    pub fn geostrophic_wind(&self) -> (Array2<f64>, Array2<f64>) {
        let scale = GRAVITY / self.coriolis;
        let dx = self.config.spacing;

        let u = d_dy(&self.height, dx).mapv(|dz| -scale * dz);
        let v = d_dx(&self.height, dx).mapv(|dz| scale * dz);

        (u, v)
    }

    /// The (u, v) gradient wind in m/s.
    ///
    /// The speed comes from the gradient wind balance using the curvature of the geostrophic
    /// streamlines, and the direction is that of the geostrophic wind. Points where the balance
    /// has no real solution, strongly anticyclonic flow, are NaN.
    pub fn gradient_wind(&self) -> (Array2<f64>, Array2<f64>) {
        let (ug, vg) = self.geostrophic_wind();
        let dx = self.config.spacing;
        let f = self.coriolis;

        let dudx = d_dx(&ug, dx);
        let dudy = d_dy(&ug, dx);
        let dvdx = d_dx(&vg, dx);
        let dvdy = d_dy(&vg, dx);

        let mut u = Array2::zeros(ug.dim());
        let mut v = Array2::zeros(ug.dim());

        Zip::indexed(&mut u).and(&mut v).for_each(|idx, u, v| {
            let (ugi, vgi) = (ug[idx], vg[idx]);
            let spd_g = ugi.hypot(vgi);
            if spd_g == 0.0 {
                *u = 0.0;
                *v = 0.0;
                return;
            }

            // Signed streamline curvature, positive counterclockwise.
            let curvature = (ugi * (ugi * dvdx[idx] + vgi * dvdy[idx])
                - vgi * (ugi * dudx[idx] + vgi * dudy[idx]))
                / spd_g.powi(3);

            let disc = 1.0 + 4.0 * curvature * spd_g / f;
            let ratio = if disc >= 0.0 {
                2.0 / (1.0 + disc.sqrt())
            } else {
                std::f64::NAN
            };

            *u = ugi * ratio;
            *v = vgi * ratio;
        });

        (u, v)
    }

    /// The (u, v) ageostrophic wind, gradient minus geostrophic, in m/s.
    pub fn ageostrophic_wind(&self) -> (Array2<f64>, Array2<f64>) {
        let (ug, vg) = self.geostrophic_wind();
        let (ugr, vgr) = self.gradient_wind();

        (ugr - ug, vgr - vg)
    }

    /// The (Qx, Qy) Q-vector in m^2 / (kg s).
    pub fn q_vectors(&self) -> (Array2<f64>, Array2<f64>) {
        let (ug, vg) = self.geostrophic_wind();
        let dx = self.config.spacing;
        let scale = -RD / (self.config.pressure * 100.0);

        let dtdx = d_dx(&self.temperature, dx);
        let dtdy = d_dy(&self.temperature, dx);

        let qx = Zip::from(&d_dx(&ug, dx))
            .and(&d_dx(&vg, dx))
            .and(&dtdx)
            .and(&dtdy)
            .map_collect(|&dudx, &dvdx, &dtx, &dty| scale * (dudx * dtx + dvdx * dty));
        let qy = Zip::from(&d_dy(&ug, dx))
            .and(&d_dy(&vg, dx))
            .and(&dtdx)
            .and(&dtdy)
            .map_collect(|&dudy, &dvdy, &dtx, &dty| scale * (dudy * dtx + dvdy * dty));

        (qx, qy)
    }

    /// Horizontal divergence of a vector field on this grid.
    pub fn divergence(&self, u: &Array2<f64>, v: &Array2<f64>) -> Result<Array2<f64>> {
        let shape = self.height.dim();
        if u.dim() != shape || v.dim() != shape {
            return Err(AnalysisError::InvalidInput);
        }

        let dx = self.config.spacing;
        Ok(d_dx(u, dx) + d_dy(v, dx))
    }

    /// The QG forcing for vertical motion, -2 times the divergence of the Q-vector. Positive
    /// values favor ascent.
    pub fn q_vector_divergence(&self) -> Array2<f64> {
        let (qx, qy) = self.q_vectors();
        let dx = self.config.spacing;

        (d_dx(&qx, dx) + d_dy(&qy, dx)).mapv(|div| -2.0 * div)
    }
}

/// Derivative along the rows (x direction), centered inside and one sided on the edges.
fn d_dx(field: &Array2<f64>, dx: f64) -> Array2<f64> {
    let (ny, nx) = field.dim();
    Array2::from_shape_fn((ny, nx), |(j, i)| {
        if i == 0 {
            (field[[j, 1]] - field[[j, 0]]) / dx
        } else if i == nx - 1 {
            (field[[j, i]] - field[[j, i - 1]]) / dx
        } else {
            (field[[j, i + 1]] - field[[j, i - 1]]) / (2.0 * dx)
        }
    })
}

/// Derivative along the columns (y direction), centered inside and one sided on the edges.
fn d_dy(field: &Array2<f64>, dy: f64) -> Array2<f64> {
    let (ny, nx) = field.dim();
    Array2::from_shape_fn((ny, nx), |(j, i)| {
        if j == 0 {
            (field[[1, i]] - field[[0, i]]) / dy
        } else if j == ny - 1 {
            (field[[j, i]] - field[[j - 1, i]]) / dy
        } else {
            (field[[j + 1, i]] - field[[j - 1, i]]) / (2.0 * dy)
        }
    })
}
