//! Build distance-pressure cross sections from a line of radiosonde soundings.
//!
//! Each sounding is first resampled onto a shared [`PressureGrid`](crate::PressureGrid) with
//! [`interpolate_profile`](crate::interpolate_profile). The resulting columns are placed at their
//! great circle distance from the first station on the path and the whole (distance, pressure)
//! point cloud is interpolated onto an evenly spaced mesh with a
//! [`ScatteredInterpolator`](crate::ScatteredInterpolator).
use crate::{
    error::{AnalysisError, Result},
    geo::great_circle_distance,
    grid::PressureGrid,
    interpolation::interpolate_profile,
    scattered::{ScatterMethod, ScatteredInterpolator},
    sounding::Sounding,
    utility::linspace,
};
use log::{debug, trace, warn};
use metfor::{Meters, Quantity};
use ndarray::Array2;
use optional::Optioned;
use std::collections::HashMap;
use strum_macros::EnumIter;

pub use self::source::SoundingSource;

mod derived;
mod source;

/// The variables carried through a cross section, with their fixed units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter)]
pub enum Variable {
    /// Pressure in hPa
    Pressure,
    /// Temperature in C
    Temperature,
    /// Dew point in C
    DewPoint,
    /// East-west wind component in m/s
    UWind,
    /// North-south wind component in m/s
    VWind,
}

impl Variable {
    /// Units the variable is stored in.
    pub fn units(self) -> &'static str {
        match self {
            Variable::Pressure => "hPa",
            Variable::Temperature | Variable::DewPoint => "C",
            Variable::UWind | Variable::VWind => "m/s",
        }
    }
}

/// Settings for building a cross section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossSectionConfig {
    grid: PressureGrid,
    horizontal_points: usize,
    method: ScatterMethod,
}

impl Default for CrossSectionConfig {
    /// The default pressure grid, 100 points in the horizontal, and linear interpolation.
    fn default() -> Self {
        CrossSectionConfig {
            grid: PressureGrid::default(),
            horizontal_points: 100,
            method: ScatterMethod::default(),
        }
    }
}

impl CrossSectionConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method for the vertical grid.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use metfor::HectoPascal;
    /// use sounding_cross_section::{CrossSectionConfig, PressureGrid, ScatterMethod};
    ///
    /// let grid = PressureGrid::new(HectoPascal(1000.0), HectoPascal(200.0), HectoPascal(25.0))
    ///     .unwrap();
    /// let config = CrossSectionConfig::new()
    ///     .with_grid(grid)
    ///     .with_horizontal_points(50)
    ///     .with_method(ScatterMethod::InverseDistance { power: 2.0 });
    ///
    /// assert_eq!(config.grid().len(), 33);
    /// assert_eq!(config.horizontal_points(), 50);
    /// ```
    pub fn with_grid(self, grid: PressureGrid) -> Self {
        Self { grid, ..self }
    }

    /// Builder method for the number of evenly spaced points along the path.
    pub fn with_horizontal_points(self, horizontal_points: usize) -> Self {
        Self {
            horizontal_points,
            ..self
        }
    }

    /// Builder method for the scattered data interpolation method.
    pub fn with_method(self, method: ScatterMethod) -> Self {
        Self { method, ..self }
    }

    /// The vertical grid.
    pub fn grid(&self) -> &PressureGrid {
        &self.grid
    }

    /// Number of points along the path.
    pub fn horizontal_points(&self) -> usize {
        self.horizontal_points
    }

    /// The scattered data interpolation method.
    pub fn method(&self) -> ScatterMethod {
        self.method
    }
}

/// One sounding resampled onto the standard pressure grid.
#[derive(Debug, Clone, PartialEq)]
pub struct StationColumn {
    id: String,
    location: (f64, f64),
    elevation: Optioned<Meters>,
    pressure: Vec<f64>,
    temperature: Vec<f64>,
    dew_point: Vec<f64>,
    u_wind: Vec<f64>,
    v_wind: Vec<f64>,
}

impl StationColumn {
    /// Resample `snd` onto `grid`. Every variable must have at least two valid levels and the
    /// station must have a location.
    pub fn from_sounding(id: &str, snd: &Sounding, grid: &PressureGrid) -> Result<Self> {
        let location = snd
            .station_info()
            .location()
            .ok_or(AnalysisError::MissingValue)?;

        let p = snd.pressure_profile();
        let (u, v) = snd.wind_components();

        Ok(StationColumn {
            id: id.to_owned(),
            location,
            elevation: snd.station_info().elevation(),
            pressure: interpolate_profile(p, p, grid)?,
            temperature: interpolate_profile(p, snd.temperature_profile(), grid)?,
            dew_point: interpolate_profile(p, snd.dew_point_profile(), grid)?,
            u_wind: interpolate_profile(p, &u, grid)?,
            v_wind: interpolate_profile(p, &v, grid)?,
        })
    }

    /// Station identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Latitude and longitude in degrees.
    pub fn location(&self) -> (f64, f64) {
        self.location
    }

    /// Station elevation.
    pub fn elevation(&self) -> Optioned<Meters> {
        self.elevation
    }

    /// The resampled values of one variable, one per grid level.
    pub fn values(&self, var: Variable) -> &[f64] {
        match var {
            Variable::Pressure => &self.pressure,
            Variable::Temperature => &self.temperature,
            Variable::DewPoint => &self.dew_point,
            Variable::UWind => &self.u_wind,
            Variable::VWind => &self.v_wind,
        }
    }
}

/// A vertical cross section through a line of soundings.
///
/// All 2D grids are indexed `[distance index, level index]`.
#[derive(Debug, Clone)]
pub struct CrossSection {
    levels: Vec<f64>,
    columns: Vec<StationColumn>,
    station_distances: Vec<f64>,
    distance_mesh: Array2<f64>,
    pressure_mesh: Array2<f64>,
    pressure: Array2<f64>,
    temperature: Array2<f64>,
    dew_point: Array2<f64>,
    u_wind: Array2<f64>,
    v_wind: Array2<f64>,
    ground_pressure: Vec<f64>,
}

impl CrossSection {
    /// The interpolated grid of one variable. Values outside of the data are NaN.
    pub fn grid(&self, var: Variable) -> &Array2<f64> {
        match var {
            Variable::Pressure => &self.pressure,
            Variable::Temperature => &self.temperature,
            Variable::DewPoint => &self.dew_point,
            Variable::UWind => &self.u_wind,
            Variable::VWind => &self.v_wind,
        }
    }

    /// Shape of every grid, (horizontal points, vertical levels).
    pub fn shape(&self) -> (usize, usize) {
        self.distance_mesh.dim()
    }

    /// Pressure levels of the vertical grid in hPa.
    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    /// Evenly spaced distances along the path in meters.
    pub fn distances(&self) -> Vec<f64> {
        self.distance_mesh.column(0).to_vec()
    }

    /// Great circle distance of each station from the first station, in meters.
    pub fn station_distances(&self) -> &[f64] {
        &self.station_distances
    }

    /// Distance in meters at every grid point.
    pub fn distance_mesh(&self) -> &Array2<f64> {
        &self.distance_mesh
    }

    /// Pressure in hPa at every grid point.
    pub fn pressure_mesh(&self) -> &Array2<f64> {
        &self.pressure_mesh
    }

    /// Standard atmosphere pressure of each station's elevation, for shading terrain. NaN where
    /// the elevation is unknown.
    pub fn ground_pressure(&self) -> &[f64] {
        &self.ground_pressure
    }

    /// The per station columns the grids were built from, for wind barbs and the like.
    pub fn columns(&self) -> &[StationColumn] {
        &self.columns
    }
}

/// Build a cross section along the path given by `stations`, in order, using the soundings in
/// `soundings` keyed by station identifier.
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use sounding_cross_section::{build_cross_section, CrossSectionConfig, Variable};
/// # use sounding_cross_section::doctest::make_station_sounding;
///
/// let mut soundings = HashMap::new();
/// soundings.insert("BIS".to_owned(), make_station_sounding((46.77, -100.75), 503.0, -2.0));
/// soundings.insert("ABR".to_owned(), make_station_sounding((45.45, -98.41), 397.0, 0.0));
/// soundings.insert("OAX".to_owned(), make_station_sounding((41.32, -96.37), 350.0, 4.0));
///
/// let config = CrossSectionConfig::new().with_horizontal_points(40);
/// let xsect = build_cross_section(&["BIS", "ABR", "OAX"], &soundings, &config).unwrap();
///
/// assert_eq!(xsect.shape(), (40, 91));
/// assert_eq!(xsect.grid(Variable::Temperature).dim(), (40, 91));
/// assert_eq!(xsect.station_distances()[0], 0.0);
/// ```
pub fn build_cross_section<S>(
    stations: &[S],
    soundings: &HashMap<String, Sounding>,
    config: &CrossSectionConfig,
) -> Result<CrossSection>
where
    S: AsRef<str>,
{
    let path: Vec<(&str, &Sounding)> = stations
        .iter()
        .map(|stn| {
            let stn = stn.as_ref();
            soundings
                .get(stn)
                .map(|snd| (stn, snd))
                .ok_or_else(|| AnalysisError::MissingStation(stn.to_owned()))
        })
        .collect::<Result<_>>()?;

    build_from_path(&path, config)
}

/// Fetch each station from `source` and build a cross section from the soundings.
pub fn build_cross_section_from_source<T, S>(
    source: &T,
    stations: &[S],
    valid_time: chrono::NaiveDateTime,
    config: &CrossSectionConfig,
) -> Result<CrossSection>
where
    T: SoundingSource + ?Sized,
    S: AsRef<str>,
{
    let soundings: Vec<Sounding> = stations
        .iter()
        .map(|stn| source.fetch(stn.as_ref(), valid_time))
        .collect::<Result<_>>()?;

    let path: Vec<(&str, &Sounding)> = stations
        .iter()
        .map(|stn| AsRef::<str>::as_ref(stn))
        .zip(&soundings)
        .collect();

    build_from_path(&path, config)
}

fn build_from_path(path: &[(&str, &Sounding)], config: &CrossSectionConfig) -> Result<CrossSection> {
    if path.len() < 2 || config.horizontal_points < 2 {
        return Err(AnalysisError::NotEnoughData);
    }

    let grid = config.grid;
    let levels = grid.levels();
    debug!(
        "building cross section through {} stations on {} levels with {:?}",
        path.len(),
        levels.len(),
        config.method
    );

    //
    // Resample every station onto the standard grid.
    //
    let columns: Vec<StationColumn> = path
        .iter()
        .map(|&(id, snd)| {
            trace!("interpolating station {}", id);
            StationColumn::from_sounding(id, snd, &grid)
        })
        .collect::<Result<_>>()?;

    //
    // Distance of each station from the start of the path.
    //
    let origin = columns[0].location;
    let station_distances: Vec<f64> = columns
        .iter()
        .map(|col| great_circle_distance(origin, col.location).unpack())
        .collect();
    debug!("station distances (m): {:?}", station_distances);

    let path_length = station_distances[station_distances.len() - 1];
    if path_length <= 0.0 {
        // The first and last stations are the same place, there is no horizontal axis.
        return Err(AnalysisError::InvalidInput);
    }

    //
    // Target mesh
    //
    let distances = linspace(station_distances[0], path_length, config.horizontal_points);
    let shape = (distances.len(), levels.len());
    let distance_mesh = Array2::from_shape_fn(shape, |(i, _)| distances[i]);
    let pressure_mesh = Array2::from_shape_fn(shape, |(_, j)| levels[j]);
    let targets: Vec<(f64, f64)> = distance_mesh
        .iter()
        .cloned()
        .zip(pressure_mesh.iter().cloned())
        .collect();

    //
    // Interpolate the (distance, pressure) cloud of each variable onto the mesh.
    //
    let points: Vec<(f64, f64)> = station_distances
        .iter()
        .flat_map(|&d| levels.iter().map(move |&p| (d, p)))
        .collect();

    let interpolator = ScatteredInterpolator::new(&points, config.method)?;
    let stencil = interpolator.stencil(&targets);
    if stencil.num_outside() > 0 {
        warn!(
            "{} of {} cross section points are outside the station data",
            stencil.num_outside(),
            stencil.len()
        );
    }

    let mesh_grid = |var: Variable| -> Result<Array2<f64>> {
        let values: Vec<f64> = columns
            .iter()
            .flat_map(|col| col.values(var).iter().cloned())
            .collect();

        let flat = stencil.apply(&values)?;
        trace!("interpolated {:?} onto the mesh", var);
        Array2::from_shape_vec(shape, flat).map_err(|_| AnalysisError::InterpolationError)
    };

    let pressure = mesh_grid(Variable::Pressure)?;
    let temperature = mesh_grid(Variable::Temperature)?;
    let dew_point = mesh_grid(Variable::DewPoint)?;
    let u_wind = mesh_grid(Variable::UWind)?;
    let v_wind = mesh_grid(Variable::VWind)?;

    //
    // Terrain
    //
    let ground_pressure = path
        .iter()
        .map(|(_, snd)| {
            snd.station_info()
                .standard_surface_pressure()
                .into_option()
                .map(|p| p.unpack())
                .unwrap_or(std::f64::NAN)
        })
        .collect();

    Ok(CrossSection {
        pressure,
        temperature,
        dew_point,
        u_wind,
        v_wind,
        levels,
        columns,
        station_distances,
        distance_mesh,
        pressure_mesh,
        ground_pressure,
    })
}
