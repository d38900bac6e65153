use crate::{geo::great_circle_distance, std_atmosphere::height_to_pressure_std};
use metfor::{HectoPascal, Meters};
use optional::Optioned;

/// Where a sounding was launched from.
///
/// Cross sections key their soundings by the identifier and place them with the location, so
/// both are needed for a sounding to be used on a path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StationInfo {
    // Identifier, eg "OUN" or "72357"
    id: Option<String>,
    // Latitude and longitude in degrees.
    location: Option<(f64, f64)>,
    // Launch site elevation
    elevation: Optioned<Meters>,
}

impl StationInfo {
    /// Create a new `StationInfo` with everything filled in at once. The elevation may be in any
    /// length unit, or missing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use metfor::{Feet, Meters};
    /// use optional::none;
    /// use sounding_cross_section::StationInfo;
    ///
    /// let oun = StationInfo::new_with_values("OUN", (35.18, -97.44), Meters(357.0));
    /// assert_eq!(oun.station_id(), Some("OUN"));
    ///
    /// let oun = StationInfo::new_with_values("OUN", Some((35.18, -97.44)), Feet(1171.0));
    /// assert!((oun.elevation().unwrap().0 - 357.0).abs() < 0.1);
    ///
    /// let oun = StationInfo::new_with_values("OUN", None, none::<Meters>());
    /// assert!(oun.location().is_none());
    /// ```
    #[inline]
    pub fn new_with_values<S, U, V, W>(id: S, location: U, elevation: V) -> Self
    where
        S: Into<String>,
        U: Into<Option<(f64, f64)>>,
        Optioned<W>: From<V>,
        W: optional::Noned + metfor::Length,
        Meters: From<W>,
    {
        let location: Option<(f64, f64)> = location.into();

        Self::new()
            .with_station_id(id)
            .with_lat_lon(location)
            .with_elevation(elevation)
    }

    /// Create an empty `StationInfo`.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method for the station identifier.
    #[inline]
    pub fn with_station_id<S>(self, id: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            id: Some(id.into()),
            ..self
        }
    }

    /// Builder method for the latitude and longitude, in degrees.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_cross_section::StationInfo;
    ///
    /// let bis = StationInfo::new().with_lat_lon((46.77, -100.75));
    /// assert_eq!(bis.location(), Some((46.77, -100.75)));
    ///
    /// let bis = StationInfo::new().with_lat_lon(Some((46.77, -100.75)));
    /// assert_eq!(bis.location(), Some((46.77, -100.75)));
    /// ```
    #[inline]
    pub fn with_lat_lon<T>(self, coords: T) -> Self
    where
        Option<(f64, f64)>: From<T>,
    {
        Self {
            location: Option::from(coords),
            ..self
        }
    }

    /// Builder method for the elevation. Accepts any length unit, optionally wrapped in
    /// `Optioned`, and stores it in meters.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use metfor::{Feet, Km, Meters};
    /// use optional::{none, some};
    /// use sounding_cross_section::StationInfo;
    ///
    /// let bis = StationInfo::new().with_elevation(Meters(503.0));
    /// assert_eq!(bis.elevation().unwrap(), Meters(503.0));
    ///
    /// let bis = StationInfo::new().with_elevation(some(Km(0.503)));
    /// assert!((bis.elevation().unwrap().0 - 503.0).abs() < 1.0e-9);
    ///
    /// let bis = bis.with_elevation(Feet(1650.0));
    /// assert!(bis.elevation().is_some());
    ///
    /// let bis = bis.with_elevation(none::<Meters>());
    /// assert!(bis.elevation().is_none());
    /// ```
    #[inline]
    pub fn with_elevation<T, U>(self, elev: T) -> Self
    where
        Optioned<U>: From<T>,
        U: optional::Noned + metfor::Length,
        Meters: From<U>,
    {
        Self {
            elevation: Optioned::<U>::from(elev).map_t(Meters::from),
            ..self
        }
    }

    /// Station identifier, eg "OUN".
    #[inline]
    pub fn station_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Latitude and longitude in degrees.
    #[inline]
    pub fn location(&self) -> Option<(f64, f64)> {
        self.location
    }

    /// Elevation in meters.
    #[inline]
    pub fn elevation(&self) -> Optioned<Meters> {
        self.elevation
    }

    /// Pressure of the station elevation in the standard atmosphere. This stands in for the
    /// terrain when the real surface pressure is not wanted, e.g. shading the ground under a
    /// cross section.
    #[inline]
    pub fn standard_surface_pressure(&self) -> Optioned<HectoPascal> {
        self.elevation.map_t(height_to_pressure_std)
    }

    /// Great circle distance to another station, if both have a location.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sounding_cross_section::StationInfo;
    ///
    /// let bis = StationInfo::new().with_lat_lon((46.77, -100.75));
    /// let abr = StationInfo::new().with_lat_lon((45.45, -98.41));
    ///
    /// let dist = bis.distance_to(&abr).unwrap();
    /// assert!(dist.0 > 200_000.0 && dist.0 < 250_000.0);
    /// assert!(bis.distance_to(&StationInfo::new()).is_none());
    /// ```
    #[inline]
    pub fn distance_to(&self, other: &StationInfo) -> Option<Meters> {
        let from = self.location?;
        let to = other.location?;
        Some(great_circle_distance(from, to))
    }
}
