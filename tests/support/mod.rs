//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use nalgebra::Point3;
use zfight::{PolyMesh, Polygon, float_types::Real};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Helper to make a simple Polygon in 3D with given vertices.
pub fn make_polygon_3d(points: &[[Real; 3]]) -> Polygon {
    Polygon::new(
        points
            .iter()
            .map(|p| Point3::new(p[0], p[1], p[2]))
            .collect(),
    )
}

/// Counter-clockwise (normal `+Z`) axis-aligned square loop.
pub fn square_loop(center_x: Real, center_y: Real, size: Real, z: Real) -> Vec<Point3<Real>> {
    let h = size * 0.5;
    vec![
        Point3::new(center_x - h, center_y - h, z),
        Point3::new(center_x + h, center_y - h, z),
        Point3::new(center_x + h, center_y + h, z),
        Point3::new(center_x - h, center_y + h, z),
    ]
}

pub fn square(center_x: Real, center_y: Real, size: Real, z: Real) -> Polygon {
    Polygon::new(square_loop(center_x, center_y, size, z))
}

/// Mesh where every loop gets its own vertices, so no two faces are linked.
pub fn unwelded_mesh(loops: &[Vec<Point3<Real>>]) -> PolyMesh {
    let mut vertices = Vec::new();
    let mut faces = Vec::new();
    for face_loop in loops {
        let start = vertices.len();
        vertices.extend(face_loop.iter().copied());
        faces.push((start..vertices.len()).collect());
    }
    PolyMesh::new(vertices, faces).expect("valid test mesh")
}

/// Closed axis-aligned cube `[0, size]^3` with outward normals and shared vertices.
pub fn cube_loops(size: Real) -> Vec<Vec<Point3<Real>>> {
    let p = |x: Real, y: Real, z: Real| Point3::new(x * size, y * size, z * size);
    vec![
        vec![p(0.0, 0.0, 0.0), p(0.0, 1.0, 0.0), p(1.0, 1.0, 0.0), p(1.0, 0.0, 0.0)], // bottom
        vec![p(0.0, 0.0, 1.0), p(1.0, 0.0, 1.0), p(1.0, 1.0, 1.0), p(0.0, 1.0, 1.0)], // top
        vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 0.0, 1.0), p(0.0, 0.0, 1.0)], // front
        vec![p(0.0, 1.0, 0.0), p(0.0, 1.0, 1.0), p(1.0, 1.0, 1.0), p(1.0, 1.0, 0.0)], // back
        vec![p(0.0, 0.0, 0.0), p(0.0, 0.0, 1.0), p(0.0, 1.0, 1.0), p(0.0, 1.0, 0.0)], // left
        vec![p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(1.0, 1.0, 1.0), p(1.0, 0.0, 1.0)], // right
    ]
}

/// Route `tracing` output through the test harness. Honors `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
