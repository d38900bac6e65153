use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;

use metfor::{Celsius, HectoPascal, Knots, Meters, WindSpdDir};
use optional::Optioned;
use sounding_cross_section::{Sounding, StationInfo};

pub mod profile_tests;

/// The station files in the order they lie along the north to south test path.
#[allow(dead_code)] // False alarm - not every test binary uses it.
pub const PATH_FILES: [&str; 4] = ["bis.csv", "abr.csv", "oax.csv", "top.csv"];

#[allow(unused_macros)] // False alarm
macro_rules! check_file_complete {
    ($test_name:ident, $fname:expr) => {
        #[test]
        fn $test_name() {
            let (snd, fvals) = utils::load_test_file($fname);

            assert!(snd.station_info().station_id().is_some());
            assert!(snd.station_info().location().is_some());
            assert!(snd.station_info().elevation().is_some());
            assert!(!snd.pressure_profile().is_empty());

            let fval_keys = [
                "surface temperature",
                "temperature 500 hPa",
                "temperature 300 hPa",
                "dew point 850 hPa",
                "dew point 700 hPa",
                "ground pressure",
            ];

            // Make sure all of these keys are in the hashmap
            for key in fval_keys.iter() {
                assert!(fvals.contains_key(*key), "{}", key);
            }

            // Make sure there are no extra keys in there being ignored.
            for key in fvals.keys() {
                assert!(fval_keys.contains(&key.as_str()), "extra fval key found");
            }
        }
    };
}

#[allow(unused_macros)] // False alarm
macro_rules! test_file {
    ($test_mod_name:ident, $fname:expr) => {
        mod $test_mod_name {

            use std::collections::HashMap;

            use crate::utils;
            use sounding_cross_section::Sounding;

            fn load_data() -> (Sounding, HashMap<String, f64>) {
                utils::load_test_file($fname)
            }

            mod profiles {
                use super::load_data;
                use crate::utils::profile_tests;

                #[test]
                fn reproduces_observed_temperatures() {
                    let (snd, fvals) = load_data();
                    profile_tests::test_temperature_at(&snd, &fvals, 500.0, "temperature 500 hPa");
                    profile_tests::test_temperature_at(&snd, &fvals, 300.0, "temperature 300 hPa");
                }

                #[test]
                fn reproduces_observed_dew_points() {
                    let (snd, fvals) = load_data();
                    profile_tests::test_dew_point_at(&snd, &fvals, 850.0, "dew point 850 hPa");
                    profile_tests::test_dew_point_at(&snd, &fvals, 700.0, "dew point 700 hPa");
                }

                #[test]
                fn clamps_below_ground() {
                    let (snd, fvals) = load_data();
                    profile_tests::test_clamped_below_ground(&snd, &fvals);
                }

                #[test]
                fn ground_pressure() {
                    let (snd, fvals) = load_data();
                    profile_tests::test_ground_pressure(&snd, &fvals);
                }

                #[test]
                fn monotone_temperature_between_levels() {
                    let (snd, _) = load_data();
                    profile_tests::test_bounded_between_levels(&snd);
                }
            }
        }
    };
}

pub fn load_test_file(fname: &str) -> (Sounding, HashMap<String, f64>) {
    let mut test_path = PathBuf::new();
    test_path.push("test_data");
    test_path.push(fname);
    load_test_csv_sounding(&test_path)
}

#[allow(dead_code)] // False alarm - not every test binary uses it.
pub fn load_path_soundings() -> HashMap<String, Sounding> {
    PATH_FILES
        .iter()
        .map(|fname| {
            let (snd, _) = load_test_file(fname);
            let id = snd.station_info().station_id().unwrap().to_owned();
            (id, snd)
        })
        .collect()
}

#[allow(dead_code)] // False alarm - lint is done before macro expansion.
pub fn approx_equal(tgt: f64, guess: f64, tol: f64) -> bool {
    assert!(tol > 0.0);

    f64::abs(tgt - guess) <= tol
}

fn load_test_csv_sounding(location: &PathBuf) -> (Sounding, HashMap<String, f64>) {
    let mut f = File::open(location).expect(&format!("Error opening file: {:#?}", location));

    let mut contents = String::new();
    f.read_to_string(&mut contents)
        .expect(&format!("Error reading file: {:#?}", location));

    let lines: Vec<&str> = contents.split('\n').collect();
    let mut line_iter = lines.iter();

    //
    // Station info
    //
    let mut station = StationInfo::new();
    for line in line_iter.by_ref() {
        if line.starts_with("### Station Info ###") {
            continue;
        }
        if line.starts_with("### Profile ###") {
            break;
        }

        let tokens: Vec<&str> = line.split(',').map(str::trim).collect();
        if tokens.len() < 4 {
            continue;
        }

        let lat = f64::from_str(tokens[1]).expect("bad latitude");
        let lon = f64::from_str(tokens[2]).expect("bad longitude");
        let elev = f64::from_str(tokens[3]).expect("bad elevation");

        station = station
            .with_station_id(tokens[0].to_owned())
            .with_lat_lon((lat, lon))
            .with_elevation(Meters(elev));
    }

    //
    // Parse profile data
    //
    let mut height: Vec<Optioned<Meters>> = Vec::with_capacity(lines.len());
    let mut temp: Vec<Optioned<Celsius>> = Vec::with_capacity(lines.len());
    let mut dp: Vec<Optioned<Celsius>> = Vec::with_capacity(lines.len());
    let mut press: Vec<Optioned<HectoPascal>> = Vec::with_capacity(lines.len());
    let mut wind: Vec<Optioned<WindSpdDir<Knots>>> = Vec::with_capacity(lines.len());

    for line in line_iter.by_ref() {
        if line.starts_with("### Analysis Float Section ###") {
            break;
        }

        let tokens: Vec<&str> = line.split(',').collect();
        if tokens.len() < 6 {
            continue;
        }

        let wspd = f64::from_str(tokens[4]).ok();
        let wdir = f64::from_str(tokens[5]).ok();
        let wind_val: Option<WindSpdDir<Knots>> = wspd.and_then(|wspd| {
            wdir.map(|wdir| WindSpdDir {
                speed: Knots(wspd),
                direction: wdir,
            })
        });

        height.push(f64::from_str(tokens[0]).ok().map(Meters).into());
        temp.push(f64::from_str(tokens[1]).ok().map(Celsius).into());
        dp.push(f64::from_str(tokens[2]).ok().map(Celsius).into());
        press.push(f64::from_str(tokens[3]).ok().map(HectoPascal).into());
        wind.push(wind_val.into());
    }

    let snd = Sounding::new()
        .with_source_description(format!("test file {:?}", location))
        .with_station_info(station)
        .with_height_profile(height)
        .with_temperature_profile(temp)
        .with_dew_point_profile(dp)
        .with_pressure_profile(press)
        .with_wind_profile(wind);

    //
    // Float values.
    //
    let mut target_float_vals = HashMap::new();
    for line in line_iter.by_ref() {
        let tokens: Vec<&str> = line.split(',').map(str::trim).collect();
        if tokens.len() != 2 {
            continue;
        }

        let val = f64::from_str(tokens[1]).expect("bad analysis value");
        target_float_vals.insert(tokens[0].to_owned(), val);
    }

    (snd, target_float_vals)
}
