//! Data type and methods to store a radiosonde sounding.

use chrono::NaiveDateTime;
use metfor::{Celsius, HectoPascal, Knots, Meters, MetersPSec, WindSpdDir, WindUV};
use optional::Optioned;

pub use self::{data_row::DataRow, station_info::StationInfo};

/// One radiosonde launch: where, when, and the observed profiles.
///
/// Profiles are parallel vectors running from the surface up, so pressure decreases along them.
/// A profile that was never observed is empty rather than full of missing values.
#[derive(Clone, Debug, Default)]
pub struct Sounding {
    // Where the data came from, eg a model name or an archive.
    source: Option<String>,
    station: StationInfo,
    valid_time: Option<NaiveDateTime>,

    pressure: Vec<Optioned<HectoPascal>>,
    temperature: Vec<Optioned<Celsius>>,
    dew_point: Vec<Optioned<Celsius>>,
    wind: Vec<Optioned<WindSpdDir<Knots>>>,
    height: Vec<Optioned<Meters>>,
}

macro_rules! make_profile_setter {
    ($(#[$attr:meta])* => $name:tt, $inner_type:tt, $p_var:ident) => {
        $(#[$attr])*
        pub fn $name(self, profile: Vec<Optioned<$inner_type>>) -> Self {
            Self {$p_var: profile, ..self}
        }
    };
}

impl Sounding {
    /// An empty sounding, ready for the `with_*` builders.
    #[inline]
    pub fn new() -> Self {
        Sounding::default()
    }

    /// Builder method for a free form description of where the data came from.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_cross_section::Sounding;
    ///
    /// let snd = Sounding::new().with_source_description("University of Wyoming".to_owned());
    /// assert_eq!(snd.source_description().unwrap(), "University of Wyoming");
    ///
    /// let snd = snd.with_source_description(None);
    /// assert!(snd.source_description().is_none());
    /// ```
    #[inline]
    pub fn with_source_description<S>(mut self, desc: S) -> Self
    where
        Option<String>: From<S>,
    {
        self.source = Option::from(desc);
        self
    }

    /// Where the data came from, if anyone said.
    #[inline]
    pub fn source_description(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Builder method for the launch site.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_cross_section::{Sounding, StationInfo};
    ///
    /// let stn = StationInfo::new().with_station_id("OUN");
    /// let snd = Sounding::new().with_station_info(stn);
    /// assert_eq!(snd.station_info().station_id(), Some("OUN"));
    /// ```
    #[inline]
    pub fn with_station_info(mut self, new_value: StationInfo) -> Self {
        self.station = new_value;
        self
    }

    /// Launch site.
    #[inline]
    pub fn station_info(&self) -> &StationInfo {
        &self.station
    }

    /// Builder method for the valid time of the sounding.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use sounding_cross_section::Sounding;
    ///
    /// let vt = NaiveDate::from_ymd_opt(2017, 4, 1)
    ///     .and_then(|d| d.and_hms_opt(0, 0, 0))
    ///     .unwrap();
    /// let snd = Sounding::new().with_valid_time(vt);
    /// assert_eq!(snd.valid_time(), Some(vt));
    ///
    /// let snd = snd.with_valid_time(None);
    /// assert!(snd.valid_time().is_none());
    /// ```
    #[inline]
    pub fn with_valid_time<T>(mut self, valid_time: T) -> Self
    where
        Option<NaiveDateTime>: From<T>,
    {
        self.valid_time = Option::from(valid_time);
        self
    }

    /// Nominal launch time.
    #[inline]
    pub fn valid_time(&self) -> Option<NaiveDateTime> {
        self.valid_time
    }

    make_profile_setter!(
        /// Builder method for the pressure profile, surface first.
        ///
        /// # Examples
        /// ```rust
        /// use metfor::HectoPascal;
        /// use optional::{none, some};
        /// use sounding_cross_section::Sounding;
        ///
        /// let snd = Sounding::new().with_pressure_profile(vec![
        ///     some(HectoPascal(1000.0)),
        ///     none(),
        ///     some(HectoPascal(500.0)),
        /// ]);
        /// assert_eq!(snd.pressure_profile().len(), 3);
        /// assert!(snd.pressure_profile()[1].is_none());
        /// ```
        #[inline]
        => with_pressure_profile, HectoPascal, pressure
    );

    /// Pressure profile. Empty if it was never set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_cross_section::Sounding;
    /// # use sounding_cross_section::doctest::make_test_sounding;
    ///
    /// let snd = make_test_sounding();
    /// let levels = snd.pressure_profile().iter().filter(|p| p.is_some()).count();
    /// assert_eq!(levels, 4);
    ///
    /// assert!(Sounding::new().pressure_profile().is_empty());
    /// ```
    #[inline]
    pub fn pressure_profile(&self) -> &[Optioned<HectoPascal>] {
        &self.pressure
    }

    make_profile_setter!(
        /// Builder method for the temperature profile.
        #[inline]
        => with_temperature_profile, Celsius, temperature
    );

    /// Temperature profile.
    #[inline]
    pub fn temperature_profile(&self) -> &[Optioned<Celsius>] {
        &self.temperature
    }

    make_profile_setter!(
        /// Builder method for the dew point profile.
        #[inline]
        => with_dew_point_profile, Celsius, dew_point
    );

    /// Dew point profile.
    #[inline]
    pub fn dew_point_profile(&self) -> &[Optioned<Celsius>] {
        &self.dew_point
    }

    make_profile_setter!(
        /// Builder method for the geopotential height profile. Not needed for a cross section.
        #[inline]
        => with_height_profile, Meters, height
    );

    /// Geopotential height profile.
    #[inline]
    pub fn height_profile(&self) -> &[Optioned<Meters>] {
        &self.height
    }

    /// Builder method for the wind profile. Accepts speed/direction or u/v components in any
    /// speed unit, they are stored as speed and direction in knots.
    ///
    /// # Examples
    ///```rust
    /// use sounding_cross_section::Sounding;
    /// use metfor::{WindSpdDir, WindUV, Knots, MetersPSec};
    /// use optional::{some, none};
    ///
    /// let snd = Sounding::new()
    ///     .with_wind_profile(vec![some(WindSpdDir{speed: Knots(10.0), direction: 270.0})]);
    /// assert_eq!(snd.wind_profile().len(), 1);
    ///
    /// let snd = Sounding::new().with_wind_profile(vec![
    ///     some(WindUV{u: MetersPSec(-7.3), v: MetersPSec(5.2)}),
    ///     none(),
    /// ]);
    /// assert_eq!(snd.wind_profile().len(), 2);
    /// assert!(snd.wind_profile()[1].is_none());
    ///```
    #[inline]
    pub fn with_wind_profile<U>(self, profile: Vec<Optioned<U>>) -> Self
    where
        U: optional::Noned + Copy,
        WindSpdDir<Knots>: From<U>,
    {
        let wind = profile
            .into_iter()
            .map(|w| w.map_t(WindSpdDir::from))
            .collect();

        Self { wind, ..self }
    }

    /// Wind profile as speed and direction.
    #[inline]
    pub fn wind_profile(&self) -> &[Optioned<WindSpdDir<Knots>>] {
        &self.wind
    }

    /// Wind profile split into u and v in m/s, missing where the wind is missing.
    ///
    /// # Examples
    ///```rust
    /// use sounding_cross_section::Sounding;
    /// use metfor::{WindSpdDir, Knots, Quantity};
    /// use optional::some;
    ///
    /// let snd = Sounding::new()
    ///     .with_wind_profile(vec![some(WindSpdDir{speed: Knots(10.0), direction: 270.0})]);
    /// let (u, v) = snd.wind_components();
    ///
    /// // Wind from the west blows toward the east.
    /// assert!(u[0].unwrap().unpack() > 5.0);
    /// assert!(v[0].unwrap().unpack().abs() < 1.0e-6);
    ///```
    pub fn wind_components(&self) -> (Vec<Optioned<MetersPSec>>, Vec<Optioned<MetersPSec>>) {
        self.wind
            .iter()
            .map(|w| match w.into_option() {
                Some(w) => {
                    let WindUV { u, v } = WindUV::<MetersPSec>::from(w);
                    (Optioned::from(u), Optioned::from(v))
                }
                None => (Optioned::default(), Optioned::default()),
            })
            .unzip()
    }

    /// Every variable at level `idx`, or `None` past the top of the pressure profile. Profiles
    /// that are shorter than the pressure profile give missing values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use metfor::{Celsius, HectoPascal};
    /// # use sounding_cross_section::doctest::make_test_sounding;
    ///
    /// let snd = make_test_sounding();
    ///
    /// let sfc = snd.data_row(0).unwrap();
    /// assert_eq!(sfc.pressure.unwrap(), HectoPascal(1000.0));
    /// assert_eq!(sfc.temperature.unwrap(), Celsius(20.0));
    /// assert!(sfc.height.is_none());
    ///
    /// assert!(snd.data_row(4).is_none());
    /// ```
    #[inline]
    pub fn data_row(&self, idx: usize) -> Option<DataRow> {
        fn level<T>(profile: &[Optioned<T>], idx: usize) -> Optioned<T>
        where
            T: optional::Noned + Copy,
        {
            profile.get(idx).copied().unwrap_or_default()
        }

        let pressure = *self.pressure.get(idx)?;

        Some(DataRow {
            pressure,
            temperature: level(&self.temperature, idx),
            dew_point: level(&self.dew_point, idx),
            wind: level(&self.wind, idx),
            height: level(&self.height, idx),
        })
    }
}

// Shared by unit tests, doc tests and benches, so it can't be cfg(test).
#[doc(hidden)]
pub mod doctest {
    use super::*;

    /// Four levels over OUN, surface at 1000 hPa.
    pub fn make_test_sounding() -> Sounding {
        use optional::some;

        let p = vec![
            some(HectoPascal(1000.0)),
            some(HectoPascal(925.0)),
            some(HectoPascal(850.0)),
            some(HectoPascal(700.0)),
        ];
        let t = vec![
            some(Celsius(20.0)),
            some(Celsius(18.0)),
            some(Celsius(10.0)),
            some(Celsius(2.0)),
        ];
        let dp = vec![
            some(Celsius(15.0)),
            some(Celsius(12.0)),
            some(Celsius(2.0)),
            some(Celsius(-8.0)),
        ];
        let wind = vec![
            some(WindSpdDir {
                speed: Knots(10.0),
                direction: 180.0,
            }),
            some(WindSpdDir {
                speed: Knots(25.0),
                direction: 200.0,
            }),
            some(WindSpdDir {
                speed: Knots(35.0),
                direction: 230.0,
            }),
            some(WindSpdDir {
                speed: Knots(45.0),
                direction: 250.0,
            }),
        ];

        Sounding::new()
            .with_station_info(StationInfo::new_with_values(
                "OUN",
                (35.18, -97.44),
                Meters(357.0),
            ))
            .with_pressure_profile(p)
            .with_temperature_profile(t)
            .with_dew_point_profile(dp)
            .with_wind_profile(wind)
    }

    /// A sounding whose temperatures, dew points and winds shift with `offset`, so neighboring
    /// stations differ.
    pub fn make_station_sounding(location: (f64, f64), elevation: f64, offset: f64) -> Sounding {
        use optional::some;

        let p = [975.0, 925.0, 850.0, 700.0, 500.0, 400.0, 300.0, 250.0, 200.0, 150.0, 100.0];
        let t = [18.0, 15.0, 10.0, 1.0, -15.0, -26.0, -40.0, -48.0, -55.0, -58.0, -60.0];
        let spread = [2.0, 3.0, 5.0, 8.0, 12.0, 15.0, 18.0, 20.0, 22.0, 25.0, 28.0];
        let spd = [10.0, 20.0, 25.0, 30.0, 45.0, 55.0, 70.0, 80.0, 75.0, 60.0, 40.0];

        let pressure = p.iter().map(|&p| some(HectoPascal(p))).collect();
        let temperature = t.iter().map(|&t| some(Celsius(t + offset))).collect();
        let dew_point = t
            .iter()
            .zip(&spread)
            .map(|(&t, &s)| some(Celsius(t + offset - s)))
            .collect();
        let wind: Vec<Optioned<WindSpdDir<Knots>>> = spd
            .iter()
            .map(|&s| {
                some(WindSpdDir {
                    speed: Knots(s + offset.abs()),
                    direction: 250.0,
                })
            })
            .collect();

        let station = StationInfo::new()
            .with_lat_lon(location)
            .with_elevation(Meters(elevation));

        Sounding::new()
            .with_station_info(station)
            .with_pressure_profile(pressure)
            .with_temperature_profile(temperature)
            .with_dew_point_profile(dew_point)
            .with_wind_profile(wind)
    }
}


mod data_row;
mod station_info;
