use crate::{
    error::{AnalysisError, Result},
    sounding::Sounding,
};
use chrono::NaiveDateTime;
use log::trace;
use std::collections::HashMap;

/// Anything that can look up the sounding for a station at a valid time.
///
/// Downloading and parsing soundings is left to implementors, the cross section code only needs
/// this lookup.
pub trait SoundingSource {
    /// Get the sounding for `station` valid at `valid_time`.
    fn fetch(&self, station: &str, valid_time: NaiveDateTime) -> Result<Sounding>;
}

/// An in memory collection keyed by station identifier. A sounding without a valid time matches
/// any requested time.
impl SoundingSource for HashMap<String, Sounding> {
    fn fetch(&self, station: &str, valid_time: NaiveDateTime) -> Result<Sounding> {
        trace!("looking up {} at {}", station, valid_time);

        self.get(station)
            .filter(|snd| snd.valid_time().map(|vt| vt == valid_time).unwrap_or(true))
            .cloned()
            .ok_or_else(|| AnalysisError::MissingStation(station.to_owned()))
    }
}
