//! Interpolation of 2D scattered data onto arbitrary target points.
//!
//! Both coordinates are rescaled to the unit interval before anything else is done. Cross
//! section coordinates mix meters and hectopascals, and without the rescale the triangles would
//! be needles.
use crate::error::{AnalysisError, Result};
use log::trace;

use self::triangulation::Triangulation;

mod triangulation;

/// How to fill values between scattered points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScatterMethod {
    /// Linear interpolation on a Delaunay triangulation. Targets outside the convex hull of the
    /// points are NaN.
    Linear,
    /// Shepard's inverse distance weighting with the given power. Defined everywhere.
    InverseDistance {
        /// Exponent on the distance in the weights, 2 is the usual choice.
        power: f64,
    },
}

impl Default for ScatterMethod {
    fn default() -> Self {
        ScatterMethod::Linear
    }
}

/// Maps coordinates onto the unit square.
#[derive(Debug, Clone, Copy)]
struct Scaler {
    x0: f64,
    dx: f64,
    y0: f64,
    dy: f64,
}

impl Scaler {
    fn new(points: &[(f64, f64)]) -> Self {
        let (mut xmin, mut xmax) = (std::f64::INFINITY, std::f64::NEG_INFINITY);
        let (mut ymin, mut ymax) = (std::f64::INFINITY, std::f64::NEG_INFINITY);

        for &(x, y) in points {
            xmin = xmin.min(x);
            xmax = xmax.max(x);
            ymin = ymin.min(y);
            ymax = ymax.max(y);
        }

        // A zero span means a degenerate point set, leave that axis unscaled.
        let span = |lo: f64, hi: f64| if hi > lo { hi - lo } else { 1.0 };

        Scaler {
            x0: xmin,
            dx: span(xmin, xmax),
            y0: ymin,
            dy: span(ymin, ymax),
        }
    }

    #[inline]
    fn apply(&self, (x, y): (f64, f64)) -> (f64, f64) {
        ((x - self.x0) / self.dx, (y - self.y0) / self.dy)
    }
}

/// Target locations resolved against an interpolator, reusable for any set of values on the
/// same points.
#[derive(Debug, Clone)]
pub struct Stencil {
    kind: StencilKind,
    num_points: usize,
}

#[derive(Debug, Clone)]
enum StencilKind {
    Linear(Vec<Option<[(usize, f64); 3]>>),
    InverseDistance {
        targets: Vec<(f64, f64)>,
        points: Vec<(f64, f64)>,
        power: f64,
    },
}

/// Threshold under which a target is considered to sit exactly on a data point.
const COINCIDENT: f64 = 1.0e-12;

impl Stencil {
    /// Number of targets the stencil was built for.
    pub fn len(&self) -> usize {
        match &self.kind {
            StencilKind::Linear(weights) => weights.len(),
            StencilKind::InverseDistance { targets, .. } => targets.len(),
        }
    }

    /// True if there are no targets.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of targets that are outside of the data and will come out as NaN.
    pub fn num_outside(&self) -> usize {
        match &self.kind {
            StencilKind::Linear(weights) => weights.iter().filter(|w| w.is_none()).count(),
            StencilKind::InverseDistance { .. } => 0,
        }
    }

    /// Evaluate the stencil for one set of values, one value per point.
    pub fn apply(&self, values: &[f64]) -> Result<Vec<f64>> {
        if values.len() != self.num_points || values.iter().any(|v| !v.is_finite()) {
            return Err(AnalysisError::InvalidInput);
        }

        let result = match &self.kind {
            StencilKind::Linear(weights) => weights
                .iter()
                .map(|w| match w {
                    Some(w) => w.iter().map(|&(idx, wt)| values[idx] * wt).sum::<f64>(),
                    None => std::f64::NAN,
                })
                .collect(),
            StencilKind::InverseDistance {
                targets,
                points,
                power,
            } => targets
                .iter()
                .map(|&tgt| inverse_distance(points, values, tgt, *power))
                .collect(),
        };

        Ok(result)
    }
}

fn inverse_distance(points: &[(f64, f64)], values: &[f64], (x, y): (f64, f64), power: f64) -> f64 {
    let mut sum_w = 0.0;
    let mut sum_wv = 0.0;

    for (&(px, py), &val) in points.iter().zip(values) {
        let dist = ((x - px).powi(2) + (y - py).powi(2)).sqrt();
        if dist < COINCIDENT {
            return val;
        }

        let w = dist.powf(-power);
        sum_w += w;
        sum_wv += w * val;
    }

    sum_wv / sum_w
}

/// Interpolator over a fixed set of scattered points.
///
/// # Examples
///
/// ```rust
/// use sounding_cross_section::{ScatterMethod, ScatteredInterpolator};
///
/// let pnts = [(0.0, 0.0), (10.0, 0.0), (0.0, 1000.0), (10.0, 1000.0)];
/// let vals = [0.0, 10.0, 0.0, 10.0];
///
/// let interp = ScatteredInterpolator::new(&pnts, ScatterMethod::Linear).unwrap();
/// let result = interp.interpolate(&vals, &[(5.0, 500.0), (20.0, 500.0)]).unwrap();
///
/// assert!((result[0] - 5.0).abs() < 1.0e-9);
/// assert!(result[1].is_nan()); // Outside the data.
/// ```
#[derive(Debug, Clone)]
pub struct ScatteredInterpolator {
    scaler: Scaler,
    points: Vec<(f64, f64)>,
    method: ScatterMethod,
    engine: Engine,
}

#[derive(Debug, Clone)]
enum Engine {
    Linear(Triangulation),
    InverseDistance { power: f64 },
}

impl ScatteredInterpolator {
    /// Prepare to interpolate from `points`.
    ///
    /// The points must be finite and distinct. The linear method also needs at least three
    /// points that are not all on one line.
    pub fn new(points: &[(f64, f64)], method: ScatterMethod) -> Result<Self> {
        if points.is_empty() {
            return Err(AnalysisError::NotEnoughData);
        }
        if points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return Err(AnalysisError::InvalidInput);
        }
        if let ScatterMethod::InverseDistance { power } = method {
            if !power.is_finite() || power <= 0.0 {
                return Err(AnalysisError::InvalidInput);
            }
        }

        let scaler = Scaler::new(points);
        let scaled: Vec<(f64, f64)> = points.iter().map(|&p| scaler.apply(p)).collect();

        let mut sorted = scaled.clone();
        sorted.sort_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        });
        if sorted.windows(2).any(|w| w[0] == w[1]) {
            return Err(AnalysisError::InvalidInput);
        }

        let engine = match method {
            ScatterMethod::Linear => {
                let tri = Triangulation::new(&scaled)?;
                trace!("triangulated {} points into {} triangles", scaled.len(), tri.len());
                Engine::Linear(tri)
            }
            ScatterMethod::InverseDistance { power } => Engine::InverseDistance { power },
        };

        Ok(ScatteredInterpolator {
            scaler,
            points: scaled,
            method,
            engine,
        })
    }

    /// Number of data points.
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// The method in use.
    pub fn method(&self) -> ScatterMethod {
        self.method
    }

    /// Resolve `targets` against the points once so several variables can share the work.
    pub fn stencil(&self, targets: &[(f64, f64)]) -> Stencil {
        let scaled_targets = targets.iter().map(|&t| self.scaler.apply(t));

        let kind = match &self.engine {
            Engine::Linear(tri) => StencilKind::Linear(
                scaled_targets
                    .map(|t| {
                        if t.0.is_finite() && t.1.is_finite() {
                            tri.locate(&self.points, t)
                        } else {
                            None
                        }
                    })
                    .collect(),
            ),
            Engine::InverseDistance { power } => StencilKind::InverseDistance {
                targets: scaled_targets.collect(),
                points: self.points.clone(),
                power: *power,
            },
        };

        Stencil {
            kind,
            num_points: self.points.len(),
        }
    }

    /// Interpolate `values`, one per point, onto `targets`.
    pub fn interpolate(&self, values: &[f64], targets: &[(f64, f64)]) -> Result<Vec<f64>> {
        self.stencil(targets).apply(values)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utility::test_tools::approx_equal;

    // A plane in badly scaled coordinates, like a distance-pressure cross section.
    fn plane(x: f64, y: f64) -> f64 {
        3.0 + 2.0e-5 * x - 0.05 * y
    }

    fn cross_section_points() -> Vec<(f64, f64)> {
        let dists = [0.0, 120_000.0, 310_000.0, 450_000.0];
        let mut pnts = vec![];
        for &d in &dists {
            for i in 0..10 {
                pnts.push((d, 1000.0 - 100.0 * i as f64));
            }
        }
        pnts
    }

    #[test]
    fn test_linear_reproduces_plane() {
        let pnts = cross_section_points();
        let vals: Vec<f64> = pnts.iter().map(|&(x, y)| plane(x, y)).collect();

        let interp = ScatteredInterpolator::new(&pnts, ScatterMethod::Linear).unwrap();

        let targets: Vec<(f64, f64)> = (0..=30)
            .flat_map(|i| (0..=9).map(move |j| (15_000.0 * i as f64, 1000.0 - 100.0 * j as f64)))
            .collect();
        let result = interp.interpolate(&vals, &targets).unwrap();

        for (&(x, y), &r) in targets.iter().zip(&result) {
            assert!(approx_equal(r, plane(x, y), 1.0e-9), "{} {} {}", x, y, r);
        }
    }

    #[test]
    fn test_linear_nan_outside() {
        let pnts = cross_section_points();
        let vals: Vec<f64> = pnts.iter().map(|&(x, y)| plane(x, y)).collect();
        let interp = ScatteredInterpolator::new(&pnts, ScatterMethod::Linear).unwrap();

        let targets = [(-1000.0, 500.0), (460_000.0, 500.0), (100_000.0, 50.0), (100_000.0, 500.0)];
        let stencil = interp.stencil(&targets);
        assert_eq!(stencil.len(), 4);
        assert_eq!(stencil.num_outside(), 3);

        let result = stencil.apply(&vals).unwrap();
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
        assert!(result[3].is_finite());
    }

    #[test]
    fn test_inverse_distance() {
        let pnts = cross_section_points();
        let vals: Vec<f64> = pnts.iter().map(|&(x, y)| plane(x, y)).collect();
        let interp =
            ScatteredInterpolator::new(&pnts, ScatterMethod::InverseDistance { power: 2.0 })
                .unwrap();

        let lo = vals.iter().cloned().fold(std::f64::INFINITY, f64::min);
        let hi = vals.iter().cloned().fold(std::f64::NEG_INFINITY, f64::max);

        let targets = [(0.0, 1000.0), (-50_000.0, 1200.0), (200_000.0, 550.0)];
        let result = interp.interpolate(&vals, &targets).unwrap();

        // Exact at data points, bounded by the data everywhere.
        assert!(approx_equal(result[0], plane(0.0, 1000.0), 1.0e-12));
        assert!(result.iter().all(|r| *r >= lo && *r <= hi));
    }

    #[test]
    fn test_bad_input() {
        use AnalysisError::*;

        let pnts = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 0.0)];
        assert_eq!(
            ScatteredInterpolator::new(&pnts, ScatterMethod::Linear).unwrap_err(),
            InvalidInput
        );

        let pnts = [(0.0, 0.0), (1.0, 0.0), (std::f64::NAN, 1.0)];
        assert_eq!(
            ScatteredInterpolator::new(&pnts, ScatterMethod::Linear).unwrap_err(),
            InvalidInput
        );

        let pnts = [(0.0, 0.0), (1.0, 0.0)];
        assert_eq!(
            ScatteredInterpolator::new(&pnts, ScatterMethod::Linear).unwrap_err(),
            NotEnoughData
        );

        let pnts = [(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)];
        assert_eq!(
            ScatteredInterpolator::new(&pnts, ScatterMethod::Linear).unwrap_err(),
            NotEnoughData
        );

        let pnts = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)];
        assert_eq!(
            ScatteredInterpolator::new(&pnts, ScatterMethod::InverseDistance { power: 0.0 })
                .unwrap_err(),
            InvalidInput
        );

        let interp = ScatteredInterpolator::new(&pnts, ScatterMethod::Linear).unwrap();
        assert_eq!(interp.interpolate(&[1.0, 2.0], &[(0.1, 0.1)]), Err(InvalidInput));
        assert_eq!(
            interp.interpolate(&[1.0, 2.0, std::f64::NAN], &[(0.1, 0.1)]),
            Err(InvalidInput)
        );
    }
}
