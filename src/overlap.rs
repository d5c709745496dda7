//! Area estimates for clipped intersection polygons.

use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// How the area of an intersection polygon is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AreaEstimator {
    /// [`edge_fan_area`]: fast edge-length heuristic. Overlap thresholds are
    /// tuned against this one.
    #[default]
    EdgeFan,
    /// [`exact_area`]: true planar area.
    Exact,
}

impl AreaEstimator {
    /// Estimate the area of `points` with this estimator.
    pub fn estimate(self, points: &[Point3<Real>]) -> Real {
        match self {
            AreaEstimator::EdgeFan => edge_fan_area(points),
            AreaEstimator::Exact => exact_area(points),
        }
    }
}

/// Fan estimate anchored at the first point, `½·|P0 − P[i−1]|·|P[i] − P[i−1]|`
/// summed over every edge (the first term wraps to the last point).
///
/// Each term treats a fan triangle as a right triangle and the wrap-around
/// term adds a closing triangle, so the result is an order-of-magnitude
/// figure rather than an area: a unit square scores `1 + √2/2`.
/// Fewer than three points give `0.0`.
pub fn edge_fan_area(points: &[Point3<Real>]) -> Real {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    (0..n)
        .map(|i| {
            let prev = points[(i + n - 1) % n];
            (points[0] - prev).norm() * 0.5 * (points[i] - prev).norm()
        })
        .sum()
}

/// Planar polygon area from the Newell normal magnitude.
/// Fewer than three points give `0.0`.
pub fn exact_area(points: &[Point3<Real>]) -> Real {
    if points.len() < 3 {
        return 0.0;
    }

    let twice_area = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .fold(Vector3::zeros(), |acc: Vector3<Real>, (a, b)| {
            acc + a.coords.cross(&b.coords)
        });
    twice_area.norm() * 0.5
}
