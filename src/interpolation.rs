//! Vertical interpolation of sounding profiles.
//!
//! The workhorse is [`log_p_interpolate`], which resamples an observed profile onto a set of
//! target pressures linearly in the logarithm of pressure. Targets outside of the observed range
//! are clamped to the nearest observed value instead of extrapolated.
use crate::{
    error::{AnalysisError, Result},
    grid::PressureGrid,
    sounding::{DataRow, Sounding},
};
use itertools::{izip, Itertools};
use log::warn;
use metfor::{HectoPascal, Knots, Quantity, WindSpdDir, WindUV};
use optional::Optioned;

/// Interpolate `values`, observed at `pressures`, onto `targets` linearly in ln(p).
///
/// `pressures` must be strictly decreasing (surface first), positive, and have at least two
/// levels. Every value and target must be finite. Targets with a higher pressure than the
/// surface get the surface value, targets with a lower pressure than the top level get the top
/// value.
///
/// # Examples
///
/// ```rust
/// use sounding_cross_section::log_p_interpolate;
///
/// let p = [1000.0, 850.0, 700.0, 500.0];
/// let t = [20.0, 15.0, 5.0, -10.0];
///
/// let vals = log_p_interpolate(&p, &t, &[1050.0, 850.0, 100.0]).unwrap();
/// assert_eq!(vals, vec![20.0, 15.0, -10.0]);
///
/// // Pressure must go down as you go up.
/// assert!(log_p_interpolate(&[850.0, 1000.0], &[15.0, 20.0], &[900.0]).is_err());
/// ```
pub fn log_p_interpolate(pressures: &[f64], values: &[f64], targets: &[f64]) -> Result<Vec<f64>> {
    if pressures.len() != values.len() {
        return Err(AnalysisError::InvalidInput);
    }
    if pressures.len() < 2 {
        return Err(AnalysisError::NotEnoughData);
    }
    if pressures.iter().any(|p| !p.is_finite() || *p <= 0.0)
        || values.iter().any(|v| !v.is_finite())
        || targets.iter().any(|p| !p.is_finite() || *p <= 0.0)
    {
        return Err(AnalysisError::InvalidInput);
    }
    if !pressures.iter().tuple_windows().all(|(p0, p1)| p0 > p1) {
        return Err(AnalysisError::NonMonotonicPressure);
    }

    let log_p: Vec<f64> = pressures.iter().map(|p| p.ln()).collect();
    let last = pressures.len() - 1;

    let result = targets
        .iter()
        .map(|&tgt_p| {
            if tgt_p >= pressures[0] {
                values[0]
            } else if tgt_p <= pressures[last] {
                values[last]
            } else {
                // First level with a pressure below the target, always in 1..=last here.
                let above = pressures.partition_point(|&p| p >= tgt_p);
                let below = above - 1;
                linear_interp(
                    tgt_p.ln(),
                    log_p[below],
                    log_p[above],
                    values[below],
                    values[above],
                )
            }
        })
        .collect();

    Ok(result)
}

/// Resample a sounding profile onto a standard pressure grid with [`log_p_interpolate`].
///
/// Levels where either the pressure or the value is missing are skipped, and the interpolation
/// uses the levels on either side of them.
pub fn interpolate_profile<Q>(
    pressure: &[Optioned<HectoPascal>],
    values: &[Optioned<Q>],
    grid: &PressureGrid,
) -> Result<Vec<f64>>
where
    Q: Quantity + optional::Noned,
{
    if pressure.is_empty() || values.is_empty() {
        return Err(AnalysisError::MissingProfile);
    }
    if pressure.len() != values.len() {
        return Err(AnalysisError::InvalidInput);
    }

    let (ps, vs): (Vec<f64>, Vec<f64>) = izip!(pressure, values)
        .filter(|(p, v)| p.is_some() && v.is_some())
        .map(|(p, v)| (p.unpack().unpack(), v.unpack().unpack()))
        .unzip();

    if ps.len() < pressure.len() {
        warn!(
            "skipping {} levels with missing data",
            pressure.len() - ps.len()
        );
    }

    log_p_interpolate(&ps, &vs, &grid.levels())
}

/// Interpolate a full row of the sounding at `tgt_p`, linearly in pressure.
///
/// Wind is interpolated as u/v components so a veering wind does not lose speed between levels.
/// Unlike [`log_p_interpolate`] this will not clamp, a target pressure outside the sounding is an
/// error.
pub fn linear_interpolate_sounding(snd: &Sounding, tgt_p: HectoPascal) -> Result<DataRow> {
    let (idxs, ps): (Vec<usize>, Vec<f64>) = snd
        .pressure_profile()
        .iter()
        .enumerate()
        .filter_map(|(i, p)| p.into_option().map(|p| (i, p.unpack())))
        .unzip();

    let row = match find_bracket(&ps, tgt_p.unpack()) {
        Some(Bracket::At(j)) => snd.data_row(idxs[j]),
        Some(Bracket::Between(j0, j1)) => {
            let below = snd.data_row(idxs[j0]);
            let above = snd.data_row(idxs[j1]);
            below
                .zip(above)
                .map(|(below, above)| blend_rows(below, above, ps[j0], ps[j1], tgt_p))
        }
        None => None,
    };

    row.ok_or(AnalysisError::InterpolationError)
}

/// Interpolate values given two parallel vectors of data and a target value.
///
/// `xs` may increase or decrease but should be monotonic. Pairs with a missing value on either
/// side are skipped. Returns none if the target is outside of `xs`.
///
/// # Examples
///
/// ```rust
/// use metfor::{Celsius, HectoPascal};
/// use optional::{some, none};
/// use sounding_cross_section::linear_interpolate;
///
/// let p = vec![some(HectoPascal(1000.0)), none(), some(HectoPascal(800.0))];
/// let t = vec![some(Celsius(20.0)), some(Celsius(-99.0)), some(Celsius(10.0))];
///
/// // The middle level is skipped because its pressure is missing.
/// assert_eq!(linear_interpolate(&p, &t, HectoPascal(900.0)).unwrap(), Celsius(15.0));
/// assert!(linear_interpolate(&p, &t, HectoPascal(700.0)).is_none());
/// ```
pub fn linear_interpolate<X, Y>(xs: &[Optioned<X>], ys: &[Optioned<Y>], target_x: X) -> Optioned<Y>
where
    X: Quantity + optional::Noned,
    Y: Quantity + optional::Noned,
{
    debug_assert_eq!(xs.len(), ys.len());

    let (xs, ys): (Vec<f64>, Vec<f64>) = izip!(xs, ys)
        .filter(|(x, y)| x.is_some() && y.is_some())
        .map(|(x, y)| (x.unpack().unpack(), y.unpack().unpack()))
        .unzip();

    let tgt = target_x.unpack();
    let value = find_bracket(&xs, tgt).map(|bracket| match bracket {
        Bracket::At(i) => ys[i],
        Bracket::Between(i0, i1) => linear_interp(tgt, xs[i0], xs[i1], ys[i0], ys[i1]),
    });

    Optioned::from(value.map(Y::pack))
}

#[inline]
pub(crate) fn linear_interp(x_val: f64, x1: f64, x2: f64, y1: f64, y2: f64) -> f64 {
    debug_assert!(x1 != x2);

    let run = x2 - x1;
    let rise = y2 - y1;
    let dx = x_val - x1;

    y1 + dx * (rise / run)
}

// Where a target falls among a run of samples.
enum Bracket {
    At(usize),
    Between(usize, usize),
}

// First adjacent pair of `xs` that contains `target`, in either sort order.
fn find_bracket(xs: &[f64], target: f64) -> Option<Bracket> {
    xs.iter()
        .enumerate()
        .tuple_windows()
        .find_map(|((i0, &x0), (i1, &x1))| {
            if (x0 - target).abs() < std::f64::EPSILON {
                Some(Bracket::At(i0))
            } else if (x1 - target).abs() < std::f64::EPSILON {
                Some(Bracket::At(i1))
            } else if (x0 - target) * (x1 - target) < 0.0 {
                Some(Bracket::Between(i0, i1))
            } else {
                None
            }
        })
}

fn blend_rows(below: DataRow, above: DataRow, p0: f64, p1: f64, tgt_p: HectoPascal) -> DataRow {
    let tgt = tgt_p.unpack();
    let blend = |lo: f64, hi: f64| linear_interp(tgt, p0, p1, lo, hi);

    let wind = below
        .wind
        .into_option()
        .zip(above.wind.into_option())
        .map(|(lo, hi)| {
            let lo = WindUV::<Knots>::from(lo);
            let hi = WindUV::<Knots>::from(hi);
            WindSpdDir::from(WindUV {
                u: Knots(blend(lo.u.unpack(), hi.u.unpack())),
                v: Knots(blend(lo.v.unpack(), hi.v.unpack())),
            })
        });

    DataRow {
        pressure: Optioned::from(tgt_p),
        temperature: blend_optioned(below.temperature, above.temperature, &blend),
        dew_point: blend_optioned(below.dew_point, above.dew_point, &blend),
        wind: Optioned::from(wind),
        height: blend_optioned(below.height, above.height, &blend),
    }
}

fn blend_optioned<Y, F>(lo: Optioned<Y>, hi: Optioned<Y>, blend: F) -> Optioned<Y>
where
    Y: Quantity + optional::Noned,
    F: Fn(f64, f64) -> f64,
{
    match (lo.into_option(), hi.into_option()) {
        (Some(lo), Some(hi)) => Optioned::from(Y::pack(blend(lo.unpack(), hi.unpack()))),
        _ => Optioned::default(),
    }
}
