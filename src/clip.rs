//! Sutherland–Hodgman clipping of one face loop against another face's area.
//!
//! The clip face is treated as a convex region bounded by one inward-facing
//! plane per edge. Vertices within `vertex_tolerance` behind a plane still
//! count as inside, which absorbs floating-point drift for faces that share
//! boundary positions. Geometry too close to the tolerance boundary is
//! reported as a [`ClipDiagnostic`] rather than aborting the clip.

use crate::float_types::Real;
use crate::plane::Plane;
use crate::polygon::Polygon;
use nalgebra::{Point3, Vector3};
use tracing::warn;

/// A recoverable anomaly met while clipping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClipDiagnostic {
    /// The endpoints of a working edge were classified on opposite sides of a
    /// clip plane, but no intersection point could be computed. The point was
    /// omitted from the output polygon.
    MissingIntersection {
        /// Signed distance of the current vertex to the clip plane
        current: Real,
        /// Signed distance of the previous vertex to the clip plane
        previous: Real,
    },
    /// Both endpoints were accepted by the tolerance while lying behind the
    /// clip plane; both were reclassified as outside.
    BehindPlane {
        /// Signed distance of the current vertex to the clip plane
        current: Real,
        /// Signed distance of the previous vertex to the clip plane
        previous: Real,
    },
}

/// Output of [`clip_polygon`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clipped {
    /// The intersection polygon, possibly empty
    pub points: Vec<Point3<Real>>,
    /// Anomalies met along the way
    pub diagnostics: Vec<ClipDiagnostic>,
}

/// The plane along edge `a → b` of a face, oriented so that `center`
/// (and therefore the face interior) lies on its positive side.
///
/// Its normal is `(b - a) × face_normal`, negated when needed since the sign
/// depends on the edge direction.
pub fn inward_plane(
    a: &Point3<Real>,
    b: &Point3<Real>,
    face_normal: &Vector3<Real>,
    center: &Point3<Real>,
) -> Plane {
    let plane = Plane::from_point_normal(*b, (b - a).cross(face_normal));
    if plane.signed_distance(center) > 0.0 {
        plane
    } else {
        plane.flipped()
    }
}

/// Clip `subject`'s loop against the area of `clip`.
pub fn clip_polygon(clip: &Polygon, subject: &Polygon, vertex_tolerance: Real) -> Clipped {
    let center = clip.center_median();
    let normal = clip.normal();
    let mut output = subject.vertices.clone();
    let mut diagnostics = Vec::new();

    for (a, b) in clip.edges() {
        let plane = inward_plane(a, b, &normal, &center);
        let input = std::mem::take(&mut output);
        let n = input.len();

        for i in 0..n {
            let current = input[i];
            let previous = input[(i + n - 1) % n];
            let current_dist = plane.signed_distance(&current);
            let previous_dist = plane.signed_distance(&previous);
            let mut current_in = current_dist >= -vertex_tolerance;
            let mut previous_in = previous_dist >= -vertex_tolerance;

            // Both accepted only thanks to the tolerance: the segment lies
            // entirely behind the plane.
            if current_in && previous_in && current_dist < 0.0 && previous_dist < 0.0 {
                warn!(
                    current = current_dist,
                    previous = previous_dist,
                    "both vertices were within tolerance of the clip plane but behind it"
                );
                diagnostics.push(ClipDiagnostic::BehindPlane {
                    current: current_dist,
                    previous: previous_dist,
                });
                current_in = false;
                previous_in = false;
            }

            if current_in != previous_in {
                match plane.intersect_line(&current, &previous) {
                    Some(point) => output.push(point),
                    None => {
                        warn!(
                            current = current_dist,
                            previous = previous_dist,
                            "no line-plane intersection where one was expected, consider a larger vertex tolerance"
                        );
                        diagnostics.push(ClipDiagnostic::MissingIntersection {
                            current: current_dist,
                            previous: previous_dist,
                        });
                    },
                }
            }

            if current_in {
                output.push(current);
            }
        }
    }

    Clipped {
        points: output,
        diagnostics,
    }
}
