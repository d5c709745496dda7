//! Tolerances for the z-fight predicate and scan.

use crate::errors::ConfigError;
use crate::float_types::{Real, tolerance};
use crate::overlap::AreaEstimator;

/// How the predicate decides that two aligned, nearby faces actually overlap.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlapTest {
    /// Clip the faces against each other and compare the estimated
    /// intersection area with `min_overlap_area`.
    Clip,
    /// Shrink (or grow) each face about its median-weighted center by every
    /// factor in `scales` and report a touch as soon as one scaled vertex
    /// projects inside the other face. Negative factors shrink: `-0.01`
    /// keeps 99% of the size, `-0.5` half.
    Touch { scales: Vec<Real> },
}

/// Thresholds used by [`evaluate_pair`](crate::predicate::evaluate_pair) and
/// [`find_z_fighters`](crate::resolve::find_z_fighters).
///
/// The defaults suit meshes in the unit range. Raise `min_overlap_area` to
/// tolerate more overlap before a pair counts as fighting; lower it (even to
/// `1e-5`) if visible z-fighting survives.
#[derive(Debug, Clone, PartialEq)]
pub struct ZFightConfig {
    /// Minimum `|n1 · n2|` for two faces to count as parallel.
    ///
    /// Default: `0.99`
    pub min_dot_product: Real,

    /// Faces further apart than this along the normal never fight.
    ///
    /// Default: `0.1`
    pub max_distance: Real,

    /// Estimated intersection area below which a pair is not fighting
    /// (clip test only).
    ///
    /// Default: `0.06`
    pub min_overlap_area: Real,

    /// How far behind a clip plane a vertex may lie and still count as inside.
    ///
    /// Default: [`tolerance()`](crate::float_types::tolerance)
    pub vertex_tolerance: Real,

    /// Clip-area or touch overlap test.
    ///
    /// Default: [`OverlapTest::Clip`]
    pub overlap_test: OverlapTest,

    /// Area measure used by the clip test.
    ///
    /// Default: [`AreaEstimator::EdgeFan`]
    pub area_estimator: AreaEstimator,

    /// When set to `Some(k)`, faces whose first vertices are more than
    /// `k × (longest edge of a + longest edge of b)` apart are rejected before
    /// any overlap test.
    ///
    /// Default: `None`
    pub proximity_factor: Option<Real>,
}

impl Default for ZFightConfig {
    fn default() -> Self {
        ZFightConfig {
            min_dot_product: 0.99,
            max_distance: 0.1,
            min_overlap_area: 0.06,
            vertex_tolerance: tolerance(),
            overlap_test: OverlapTest::Clip,
            area_estimator: AreaEstimator::EdgeFan,
            proximity_factor: None,
        }
    }
}

impl ZFightConfig {
    /// Only parallel (or anti-parallel) faces lying in the same plane and
    /// touching each other fight. Touch scales are `-0.01`, `-0.5` and `-0.9`.
    ///
    /// Alignment and distance both allow `64 × Real::EPSILON` of rounding
    /// noise, enough for duplicate loops of unit-scale coordinates that start
    /// at different vertices. Duplicates far from the origin may need a larger
    /// `max_distance`.
    pub fn strict() -> Self {
        let noise = 64.0 * Real::EPSILON;
        ZFightConfig {
            min_dot_product: 1.0 - noise,
            max_distance: noise,
            overlap_test: OverlapTest::Touch {
                scales: vec![-0.01, -0.5, -0.9],
            },
            ..Self::default()
        }
    }

    pub fn with_min_dot_product(mut self, value: Real) -> Self {
        self.min_dot_product = value;
        self
    }

    pub fn with_max_distance(mut self, value: Real) -> Self {
        self.max_distance = value;
        self
    }

    pub fn with_min_overlap_area(mut self, value: Real) -> Self {
        self.min_overlap_area = value;
        self
    }

    pub fn with_vertex_tolerance(mut self, value: Real) -> Self {
        self.vertex_tolerance = value;
        self
    }

    pub fn with_overlap_test(mut self, test: OverlapTest) -> Self {
        self.overlap_test = test;
        self
    }

    pub fn with_area_estimator(mut self, estimator: AreaEstimator) -> Self {
        self.area_estimator = estimator;
        self
    }

    pub fn with_proximity_factor(mut self, factor: Option<Real>) -> Self {
        self.proximity_factor = factor;
        self
    }

    /// Check that every threshold is usable.
    ///
    /// ## Errors
    /// If `min_dot_product` is outside `[0, 1]`, a distance, area or tolerance
    /// is negative or not finite, the proximity factor is not positive, or the
    /// touch test has no scale factors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.min_dot_product) {
            return Err(ConfigError::DotProductOutOfRange(self.min_dot_product));
        }

        for (name, value) in [
            ("max_distance", self.max_distance),
            ("min_overlap_area", self.min_overlap_area),
            ("vertex_tolerance", self.vertex_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::NegativeThreshold { name, value });
            }
        }

        if let Some(factor) = self.proximity_factor {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(ConfigError::ProximityFactor(factor));
            }
        }

        if let OverlapTest::Touch { scales } = &self.overlap_test {
            if scales.is_empty() {
                return Err(ConfigError::NoTouchScales);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(ZFightConfig::default().validate(), Ok(()));
        assert_eq!(ZFightConfig::strict().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_thresholds() {
        let config = ZFightConfig::default().with_min_dot_product(1.5);
        assert_eq!(config.validate(), Err(ConfigError::DotProductOutOfRange(1.5)));

        let config = ZFightConfig::default().with_max_distance(-1.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NegativeThreshold {
                name: "max_distance",
                value: -1.0
            })
        );

        let config = ZFightConfig::default().with_proximity_factor(Some(0.0));
        assert_eq!(config.validate(), Err(ConfigError::ProximityFactor(0.0)));

        let config = ZFightConfig::default().with_overlap_test(OverlapTest::Touch { scales: vec![] });
        assert_eq!(config.validate(), Err(ConfigError::NoTouchScales));
    }
}
