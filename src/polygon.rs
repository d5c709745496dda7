//! **Face polygons**
//!
//! A [`Polygon`] is the position loop of one mesh face together with the
//! derived quantities the z-fight tests need: Newell normal, area, median
//! and median-weighted centers. Derived values are computed lazily and cached.

use crate::float_types::Real;
use crate::plane::Plane;
use nalgebra::{Point3, Vector3};
use std::sync::OnceLock;

/// An ordered loop of face positions.
#[derive(Debug, Clone)]
pub struct Polygon {
    /// Loop positions in winding order
    pub vertices: Vec<Point3<Real>>,

    /// Lazily-computed unit normal
    normal: OnceLock<Vector3<Real>>,

    /// Lazily-computed area
    area: OnceLock<Real>,
}

impl PartialEq for Polygon {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices
    }
}

impl Polygon {
    /// Create a polygon from its loop positions.
    ///
    /// Loops with fewer than three points are accepted but report a `+Z`
    /// normal and zero area.
    pub const fn new(vertices: Vec<Point3<Real>>) -> Self {
        Polygon {
            vertices,
            normal: OnceLock::new(),
            area: OnceLock::new(),
        }
    }

    /// Unit normal from Newell's method, `+Z` for degenerate loops.
    pub fn normal(&self) -> Vector3<Real> {
        *self.normal.get_or_init(|| {
            let n = self.vertices.len();
            if n < 3 {
                return Vector3::z();
            }

            let mut normal = Vector3::zeros();
            for (current, next) in self.edges() {
                normal.x += (current.y - next.y) * (current.z + next.z);
                normal.y += (current.z - next.z) * (current.x + next.x);
                normal.z += (current.x - next.x) * (current.y + next.y);
            }

            normal
                .try_normalize(Real::EPSILON)
                .unwrap_or_else(Vector3::z)
        })
    }

    /// Area from the shoelace formula in the polygon's own plane.
    pub fn area(&self) -> Real {
        *self.area.get_or_init(|| {
            if self.vertices.len() < 3 {
                return 0.0;
            }

            let (u, v) = build_orthonormal_basis(self.normal());
            let origin = self.vertices[0];
            let projected: Vec<(Real, Real)> = self
                .vertices
                .iter()
                .map(|p| {
                    let offset = p - origin;
                    (offset.dot(&u), offset.dot(&v))
                })
                .collect();

            let mut area = 0.0;
            for i in 0..projected.len() {
                let j = (i + 1) % projected.len();
                area += projected[i].0 * projected[j].1;
                area -= projected[j].0 * projected[i].1;
            }

            (area * 0.5).abs()
        })
    }

    /// The plane through the first vertex with this polygon's normal.
    pub fn plane(&self) -> Plane {
        let point = self.vertices.first().copied().unwrap_or_else(Point3::origin);
        Plane::from_point_normal(point, self.normal())
    }

    /// Iterator over consecutive `(start, end)` position pairs, closing the loop.
    pub fn edges(&self) -> impl Iterator<Item = (&Point3<Real>, &Point3<Real>)> + '_ {
        self.vertices
            .iter()
            .zip(self.vertices.iter().cycle().skip(1))
    }

    /// Plain average of the loop positions.
    pub fn center_median(&self) -> Point3<Real> {
        if self.vertices.is_empty() {
            return Point3::origin();
        }
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords);
        Point3::from(sum / self.vertices.len() as Real)
    }

    /// Average of the loop positions, each weighted by the summed length of
    /// its two incident edges. Falls back to [`Self::center_median`] when every
    /// edge has zero length.
    pub fn center_median_weighted(&self) -> Point3<Real> {
        let n = self.vertices.len();
        let mut sum = Vector3::zeros();
        let mut total_weight = 0.0;

        for i in 0..n {
            let prev = self.vertices[(i + n - 1) % n];
            let current = self.vertices[i];
            let next = self.vertices[(i + 1) % n];
            let weight = (current - prev).norm() + (next - current).norm();
            sum += current.coords * weight;
            total_weight += weight;
        }

        if total_weight > 0.0 {
            Point3::from(sum / total_weight)
        } else {
            self.center_median()
        }
    }

    /// Length of the longest edge.
    pub fn longest_edge(&self) -> Real {
        self.edges()
            .map(|(a, b)| (b - a).norm())
            .fold(0.0, Real::max)
    }

    /// Positions moved away from the median-weighted center by `amount`.
    ///
    /// `0.0` leaves the loop unchanged, `1.0` doubles it, `-0.5` halves it and
    /// `-1.0` collapses it onto the center.
    pub fn scaled(&self, amount: Real) -> Vec<Point3<Real>> {
        let center = self.center_median_weighted();
        self.vertices
            .iter()
            .map(|p| p + (p - center) * amount)
            .collect()
    }

    /// A copy with reversed winding (and therefore negated normal).
    pub fn flipped(&self) -> Polygon {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Polygon::new(vertices)
    }

    /// Whether `point`, projected along the normal, falls inside the loop.
    ///
    /// Uses an even-odd crossing test in the polygon's plane, so it also
    /// handles concave loops. Points exactly on the boundary may go either way.
    pub fn contains_point(&self, point: &Point3<Real>) -> bool {
        if self.vertices.len() < 3 {
            return false;
        }

        let (u, v) = build_orthonormal_basis(self.normal());
        let origin = self.vertices[0];
        let project = |p: &Point3<Real>| {
            let offset = p - origin;
            (offset.dot(&u), offset.dot(&v))
        };

        let (px, py) = project(point);
        let mut inside = false;
        for (a, b) in self.edges() {
            let (ax, ay) = project(a);
            let (bx, by) = project(b);
            if (ay > py) != (by > py) {
                let x_cross = ax + (py - ay) / (by - ay) * (bx - ax);
                if px < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

/// Build orthonormal basis for 2D projection
pub fn build_orthonormal_basis(n: Vector3<Real>) -> (Vector3<Real>, Vector3<Real>) {
    let n = n.normalize();

    let other = if n.x.abs() < n.y.abs() && n.x.abs() < n.z.abs() {
        Vector3::x()
    } else if n.y.abs() < n.z.abs() {
        Vector3::y()
    } else {
        Vector3::z()
    };

    let v = n.cross(&other).normalize();
    let u = v.cross(&n).normalize();

    (u, v)
}
