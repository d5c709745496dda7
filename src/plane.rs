//! Point–normal planes used for z-fight distance tests and as clipping half-spaces.

use crate::float_types::{EPSILON, Real};
use nalgebra::{Point3, Vector3};

/// A plane through `point` with unit `normal`.
///
/// Signed distances are positive on the side the normal points to. A plane
/// built from a zero-length normal keeps a zero normal and reports a distance
/// of `0.0` for every point.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    /// A point lying on the plane
    pub point: Point3<Real>,
    /// Unit normal vector of the plane
    pub normal: Vector3<Real>,
}

impl Plane {
    /// Create a plane through `point`, normalizing `normal`.
    pub fn from_point_normal(point: Point3<Real>, normal: Vector3<Real>) -> Self {
        let normal = normal
            .try_normalize(Real::EPSILON)
            .unwrap_or_else(Vector3::zeros);
        Plane { point, normal }
    }

    /// Get the plane normal
    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    /// Flip the plane so the other half-space becomes positive
    pub fn flip(&mut self) {
        self.normal = -self.normal;
    }

    /// Return a flipped copy of this plane
    pub fn flipped(&self) -> Self {
        Plane {
            point: self.point,
            normal: -self.normal,
        }
    }

    /// Signed perpendicular distance from `point` to the plane.
    pub fn signed_distance(&self, point: &Point3<Real>) -> Real {
        self.normal.dot(&(point - self.point))
    }

    /// Intersect the infinite line through `a` and `b` with this plane.
    ///
    /// Returns `None` when the line is parallel to the plane (or lies in it),
    /// which also covers `a == b` and degenerate planes.
    pub fn intersect_line(&self, a: &Point3<Real>, b: &Point3<Real>) -> Option<Point3<Real>> {
        let dir = b - a;
        let denom = self.normal.dot(&dir);
        if denom.abs() <= EPSILON {
            return None;
        }
        let t = -self.normal.dot(&(a - self.point)) / denom;
        Some(a + dir * t)
    }
}
