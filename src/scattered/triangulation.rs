//! Bowyer-Watson Delaunay triangulation of points in the unit square.
use crate::error::{AnalysisError, Result};

/// Relative slack on the circumcircle test so cocircular points are never counted as inside.
const CIRCLE_EPS: f64 = 1.0e-12;
/// Slack on barycentric weights so targets on an edge or vertex still land in a triangle.
const BARY_EPS: f64 = 1.0e-10;
/// Half width of the super triangle, the points are expected in [0, 1] x [0, 1].
const SUPER_SIZE: f64 = 100.0;

#[derive(Debug, Clone, Copy)]
struct Triangle {
    v: [usize; 3],
    // Circumcircle center and squared radius
    cx: f64,
    cy: f64,
    r2: f64,
}

impl Triangle {
    fn new(v: [usize; 3], pts: &[(f64, f64)]) -> Self {
        let (ax, ay) = pts[v[0]];
        let (bx, by) = pts[v[1]];
        let (cx, cy) = pts[v[2]];

        let d = 2.0 * (ax * (by - cy) + bx * (cy - ay) + cx * (ay - by));
        if d.abs() < std::f64::EPSILON * std::f64::EPSILON {
            // Degenerate, any later point will see it as containing it and clean it up.
            return Triangle {
                v,
                cx: 0.0,
                cy: 0.0,
                r2: std::f64::INFINITY,
            };
        }

        let a2 = ax * ax + ay * ay;
        let b2 = bx * bx + by * by;
        let c2 = cx * cx + cy * cy;

        let ux = (a2 * (by - cy) + b2 * (cy - ay) + c2 * (ay - by)) / d;
        let uy = (a2 * (cx - bx) + b2 * (ax - cx) + c2 * (bx - ax)) / d;

        let r2 = (ax - ux).powi(2) + (ay - uy).powi(2);

        Triangle {
            v,
            cx: ux,
            cy: uy,
            r2,
        }
    }

    #[inline]
    fn circumcircle_contains(&self, (px, py): (f64, f64)) -> bool {
        let d2 = (px - self.cx).powi(2) + (py - self.cy).powi(2);
        d2 < self.r2 * (1.0 - CIRCLE_EPS)
    }

    #[inline]
    fn has_edge(&self, a: usize, b: usize) -> bool {
        self.v.contains(&a) && self.v.contains(&b)
    }
}

/// A triangulated point set ready for point location.
#[derive(Debug, Clone)]
pub(crate) struct Triangulation {
    triangles: Vec<[usize; 3]>,
    // Bounding boxes of the triangles, (xmin, xmax, ymin, ymax)
    bounds: Vec<(f64, f64, f64, f64)>,
}

impl Triangulation {
    /// Triangulate `pts`, which must be distinct and already scaled into the unit square.
    pub(crate) fn new(pts: &[(f64, f64)]) -> Result<Self> {
        let n = pts.len();
        if n < 3 {
            return Err(AnalysisError::NotEnoughData);
        }

        // Working copy of the points with the super triangle vertices at the end.
        let mut work: Vec<(f64, f64)> = Vec::with_capacity(n + 3);
        work.extend_from_slice(pts);
        work.push((0.5 - 2.0 * SUPER_SIZE, 0.5 - SUPER_SIZE));
        work.push((0.5 + 2.0 * SUPER_SIZE, 0.5 - SUPER_SIZE));
        work.push((0.5, 0.5 + 2.0 * SUPER_SIZE));

        let mut triangles = vec![Triangle::new([n, n + 1, n + 2], &work)];
        let mut bad: Vec<Triangle> = vec![];
        let mut boundary: Vec<(usize, usize)> = vec![];

        for (i, &pnt) in pts.iter().enumerate() {
            bad.clear();
            boundary.clear();

            triangles.retain(|tri| {
                if tri.circumcircle_contains(pnt) {
                    bad.push(*tri);
                    false
                } else {
                    true
                }
            });

            // The edges of the cavity are those edges of bad triangles not shared with another
            // bad triangle.
            for (j, tri) in bad.iter().enumerate() {
                for &(a, b) in &[(tri.v[0], tri.v[1]), (tri.v[1], tri.v[2]), (tri.v[2], tri.v[0])] {
                    let shared = bad
                        .iter()
                        .enumerate()
                        .any(|(k, other)| k != j && other.has_edge(a, b));
                    if !shared {
                        boundary.push((a, b));
                    }
                }
            }

            triangles.extend(boundary.iter().map(|&(a, b)| Triangle::new([a, b, i], &work)));
        }

        let triangles: Vec<[usize; 3]> = triangles
            .into_iter()
            .map(|tri| tri.v)
            .filter(|v| v.iter().all(|&idx| idx < n))
            // Collinear runs can leave slivers with no area behind, they can't hold a target.
            .filter(|v| signed_area(pts[v[0]], pts[v[1]], pts[v[2]]).abs() > BARY_EPS * BARY_EPS)
            .collect();

        if triangles.is_empty() {
            // Every point was on a single line.
            return Err(AnalysisError::NotEnoughData);
        }

        let bounds = triangles
            .iter()
            .map(|v| {
                let xs = [pts[v[0]].0, pts[v[1]].0, pts[v[2]].0];
                let ys = [pts[v[0]].1, pts[v[1]].1, pts[v[2]].1];
                (
                    xs.iter().cloned().fold(std::f64::INFINITY, f64::min),
                    xs.iter().cloned().fold(std::f64::NEG_INFINITY, f64::max),
                    ys.iter().cloned().fold(std::f64::INFINITY, f64::min),
                    ys.iter().cloned().fold(std::f64::NEG_INFINITY, f64::max),
                )
            })
            .collect();

        Ok(Triangulation { triangles, bounds })
    }

    /// Number of triangles.
    pub(crate) fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Find the triangle holding `target` and its barycentric weights, or `None` if the target is
    /// outside the convex hull of the points.
    pub(crate) fn locate(&self, pts: &[(f64, f64)], target: (f64, f64)) -> Option<[(usize, f64); 3]> {
        let (x, y) = target;

        self.triangles
            .iter()
            .zip(&self.bounds)
            .filter(|(_, bnds)| {
                let (xmin, xmax, ymin, ymax) = **bnds;
                x >= xmin - BARY_EPS
                    && x <= xmax + BARY_EPS
                    && y >= ymin - BARY_EPS
                    && y <= ymax + BARY_EPS
            })
            .find_map(|(v, _)| {
                let (a, b, c) = (pts[v[0]], pts[v[1]], pts[v[2]]);
                let area = signed_area(a, b, c);

                let wa = signed_area(target, b, c) / area;
                let wb = signed_area(a, target, c) / area;
                let wc = 1.0 - wa - wb;

                if wa >= -BARY_EPS && wb >= -BARY_EPS && wc >= -BARY_EPS {
                    Some([(v[0], wa), (v[1], wb), (v[2], wc)])
                } else {
                    None
                }
            })
    }
}

/// Twice the signed area of the triangle a, b, c.
#[inline]
fn signed_area(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> f64 {
    (b.0 - a.0) * (c.1 - a.1) - (c.0 - a.0) * (b.1 - a.1)
}
