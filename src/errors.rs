//! Mesh construction and configuration errors

use crate::float_types::Real;
use nalgebra::Point3;

/// Problems found while assembling a [`PolyMesh`](crate::mesh::PolyMesh)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    /// A face loop has fewer than three vertices
    #[error("(TooFewPoints) face {face} has {count} vertices, at least 3 are required")]
    TooFewPoints { face: usize, count: usize },
    /// A face references a vertex that does not exist
    #[error("(InvalidVertexIndex) face {face} references vertex {vertex} (vertices.len = {len})")]
    InvalidVertexIndex { face: usize, vertex: usize, len: usize },
    /// Two consecutive indices of a face loop are identical
    #[error("(RepeatedPoint) face {face} repeats vertex {vertex} consecutively")]
    RepeatedPoint { face: usize, vertex: usize },
    /// The coordinate has a NaN or infinite component
    #[error("(InvalidCoordinate) vertex {vertex} ({point}) has a NaN or infinite coordinate")]
    InvalidCoordinate { vertex: usize, point: Point3<Real> },
}

/// Rejected [`ZFightConfig`](crate::ZFightConfig) values
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// `min_dot_product` must lie in `[0, 1]`
    #[error("min_dot_product must be within [0, 1], got {0}")]
    DotProductOutOfRange(Real),
    /// A distance, area or tolerance is negative or not finite
    #[error("{name} must be finite and non-negative, got {value}")]
    NegativeThreshold { name: &'static str, value: Real },
    /// The proximity prefilter factor must be strictly positive
    #[error("proximity_factor must be finite and positive, got {0}")]
    ProximityFactor(Real),
    /// The touch test needs at least one scale factor
    #[error("touch test requires at least one scale factor")]
    NoTouchScales,
}
