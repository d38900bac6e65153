use std::collections::HashMap;

use super::*;
use metfor::Quantity;
use sounding_cross_section::{
    height_to_pressure_std, interpolate_profile, PressureGrid, Sounding,
};

fn grid_value(snd: &Sounding, values: &[f64], target_p: f64) -> f64 {
    let grid = PressureGrid::default();
    let levels = grid.levels();
    let idx = levels
        .iter()
        .position(|&p| approx_equal(p, target_p, 1.0e-9))
        .expect("level not on the default grid");

    assert_eq!(values.len(), levels.len(), "{:?}", snd.source_description());
    values[idx]
}

#[allow(dead_code)] // False alarm - lint is done before macro expansion.
pub fn test_temperature_at(
    snd: &Sounding,
    tgt_float_vals: &HashMap<String, f64>,
    target_p: f64,
    key: &str,
) {
    let target = tgt_float_vals[key];
    let grid = PressureGrid::default();

    let t = interpolate_profile(snd.pressure_profile(), snd.temperature_profile(), &grid).unwrap();
    let analysis = grid_value(snd, &t, target_p);
    println!("{}: {} --- {}", key, analysis, target);
    assert!(approx_equal(analysis, target, 1.0e-9));
}

#[allow(dead_code)] // False alarm - lint is done before macro expansion.
pub fn test_dew_point_at(
    snd: &Sounding,
    tgt_float_vals: &HashMap<String, f64>,
    target_p: f64,
    key: &str,
) {
    let target = tgt_float_vals[key];
    let grid = PressureGrid::default();

    let dp = interpolate_profile(snd.pressure_profile(), snd.dew_point_profile(), &grid).unwrap();
    let analysis = grid_value(snd, &dp, target_p);
    println!("{}: {} --- {}", key, analysis, target);
    assert!(approx_equal(analysis, target, 1.0e-9));
}

#[allow(dead_code)] // False alarm - lint is done before macro expansion.
pub fn test_clamped_below_ground(snd: &Sounding, tgt_float_vals: &HashMap<String, f64>) {
    let target = tgt_float_vals["surface temperature"];
    let grid = PressureGrid::default();
    let sfc_p = snd.pressure_profile()[0].unwrap().unpack();

    let t = interpolate_profile(snd.pressure_profile(), snd.temperature_profile(), &grid).unwrap();

    let mut num_below = 0;
    for (&p, &t) in grid.levels().iter().zip(&t) {
        if p >= sfc_p {
            assert!(approx_equal(t, target, 1.0e-9));
            num_below += 1;
        }
    }

    // Every test station is above sea level.
    assert!(num_below > 0);
}

#[allow(dead_code)] // False alarm - lint is done before macro expansion.
pub fn test_ground_pressure(snd: &Sounding, tgt_float_vals: &HashMap<String, f64>) {
    let target = tgt_float_vals["ground pressure"];
    let elevation = snd.station_info().elevation().unwrap();

    let analysis = height_to_pressure_std(elevation).unpack();
    println!("ground pressure: {} --- {}", analysis, target);
    assert!(approx_equal(analysis, target, 0.05));

    // The proxy should land near the observed surface pressure.
    let sfc_p = snd.pressure_profile()[0].unwrap().unpack();
    assert!(approx_equal(analysis, sfc_p, 20.0));
}

#[allow(dead_code)] // False alarm - lint is done before macro expansion.
pub fn test_bounded_between_levels(snd: &Sounding) {
    let grid = PressureGrid::default();
    let t = interpolate_profile(snd.pressure_profile(), snd.temperature_profile(), &grid).unwrap();

    // Pair up the valid observations and check every grid value between them.
    let obs: Vec<(f64, f64)> = snd
        .pressure_profile()
        .iter()
        .zip(snd.temperature_profile())
        .filter_map(|(p, t)| {
            p.into_option()
                .and_then(|p| t.into_option().map(|t| (p.unpack(), t.unpack())))
        })
        .collect();

    for pair in obs.windows(2) {
        let (p0, t0) = pair[0];
        let (p1, t1) = pair[1];
        let (lo, hi) = if t0 < t1 { (t0, t1) } else { (t1, t0) };

        for (&p, &t) in grid.levels().iter().zip(&t) {
            if p <= p0 && p >= p1 {
                assert!(t >= lo - 1.0e-9 && t <= hi + 1.0e-9, "{} at {}", t, p);
            }
        }
    }
}
