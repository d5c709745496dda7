//! The z-fight predicate: would two faces flicker against each other?
//!
//! Checks run cheapest first and stop at the first failure:
//! 1. normal alignment (`|n1 · n2| >= min_dot_product`, back-to-back faces included)
//! 2. distance of `a`'s first vertex from `b`'s plane (`<= max_distance`)
//! 3. optional proximity prefilter on the first vertices
//! 4. overlap, by clipped intersection area or by the vertex touch test

use crate::clip::{ClipDiagnostic, clip_polygon};
use crate::config::{OverlapTest, ZFightConfig};
use crate::float_types::Real;
use crate::polygon::Polygon;
use nalgebra::Point3;

/// Outcome of [`evaluate_pair`], naming the check that decided it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PairVerdict {
    /// The faces z-fight. `flipped` is set when their normals point in
    /// opposite directions; `overlap` is the estimated intersection area when
    /// the clip test decided.
    Fighting { flipped: bool, overlap: Option<Real> },
    /// Normals are not parallel enough
    Misaligned { dot: Real },
    /// Too far apart along the normal
    TooFar { distance: Real },
    /// Rejected by the proximity prefilter
    Distant { separation: Real },
    /// Intersection area below `min_overlap_area`
    InsufficientOverlap { area: Real },
    /// No scaled vertex of either face lies inside the other
    NoTouch,
}

impl PairVerdict {
    pub const fn is_fighting(&self) -> bool {
        matches!(self, PairVerdict::Fighting { .. })
    }
}

/// A verdict plus any clipping anomalies met while reaching it.
#[derive(Debug, Clone, PartialEq)]
pub struct PairEvaluation {
    pub verdict: PairVerdict,
    pub diagnostics: Vec<ClipDiagnostic>,
}

/// Would faces `a` and `b` z-fight under `config`?
pub fn faces_would_z_fight(a: &Polygon, b: &Polygon, config: &ZFightConfig) -> bool {
    evaluate_pair(a, b, config).verdict.is_fighting()
}

/// Run the z-fight checks for `a` against `b`.
///
/// For the clip test `a` is the clip face and `b` the subject.
pub fn evaluate_pair(a: &Polygon, b: &Polygon, config: &ZFightConfig) -> PairEvaluation {
    let settle = |verdict| PairEvaluation {
        verdict,
        diagnostics: Vec::new(),
    };

    let mut dot = a.normal().dot(&b.normal());
    let flipped = dot < 0.0;
    if flipped {
        dot = -dot;
    }
    if dot < config.min_dot_product {
        return settle(PairVerdict::Misaligned { dot });
    }

    // Normals already agree, so one vertex is enough.
    let (Some(a0), Some(b0)) = (a.vertices.first(), b.vertices.first()) else {
        return settle(match config.overlap_test {
            OverlapTest::Clip => PairVerdict::InsufficientOverlap { area: 0.0 },
            OverlapTest::Touch { .. } => PairVerdict::NoTouch,
        });
    };
    let distance = b.plane().signed_distance(a0).abs();
    if distance > config.max_distance {
        return settle(PairVerdict::TooFar { distance });
    }

    if let Some(factor) = config.proximity_factor {
        let separation = (a0 - b0).norm();
        if separation > (a.longest_edge() + b.longest_edge()) * factor {
            return settle(PairVerdict::Distant { separation });
        }
    }

    match &config.overlap_test {
        OverlapTest::Clip => {
            let clipped = clip_polygon(a, b, config.vertex_tolerance);
            let area = config.area_estimator.estimate(&clipped.points);
            let verdict = if area < config.min_overlap_area {
                PairVerdict::InsufficientOverlap { area }
            } else {
                PairVerdict::Fighting {
                    flipped,
                    overlap: Some(area),
                }
            };
            PairEvaluation {
                verdict,
                diagnostics: clipped.diagnostics,
            }
        },
        OverlapTest::Touch { scales } => {
            let touching = scales.iter().any(|&scale| {
                any_vertex_inside(&a.scaled(scale), b) || any_vertex_inside(&b.scaled(scale), a)
            });
            if touching {
                settle(PairVerdict::Fighting {
                    flipped,
                    overlap: None,
                })
            } else {
                settle(PairVerdict::NoTouch)
            }
        },
    }
}

/// Whether any of `points` projects inside `face`.
pub fn any_vertex_inside(points: &[Point3<Real>], face: &Polygon) -> bool {
    points.iter().any(|p| face.contains_point(p))
}
